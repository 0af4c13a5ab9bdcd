//! Paging and filtering for collection reads.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{FieldCode, FieldError};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Normalised listing request.
///
/// ## Invariants
/// - `page` starts at 1.
/// - `per_page` is within `1..=MAX_PER_PAGE`.
/// - `keyword`, when present, is trimmed and non-empty.
///
/// # Examples
/// ```
/// use recruit_admin::domain::ListQuery;
///
/// let query = ListQuery::new(Some(3), Some(10), Some("  tokyo ".into()), None).unwrap();
/// assert_eq!(query.offset(), 20);
/// assert_eq!(query.keyword(), Some("tokyo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    per_page: u32,
    keyword: Option<String>,
    parent_id: Option<Uuid>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            keyword: None,
            parent_id: None,
        }
    }
}

impl ListQuery {
    /// Validate raw listing parameters.
    pub fn new(
        page: Option<u32>,
        per_page: Option<u32>,
        keyword: Option<String>,
        parent_id: Option<Uuid>,
    ) -> Result<Self, FieldError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(FieldError::new(
                "page",
                FieldCode::OutOfRange,
                "page must be at least 1",
            ));
        }
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(FieldError::new(
                "perPage",
                FieldCode::OutOfRange,
                format!("perPage must be between 1 and {MAX_PER_PAGE}"),
            ));
        }
        let keyword = keyword
            .map(|raw| raw.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            page,
            per_page,
            keyword,
            parent_id,
        })
    }

    /// Restrict the listing to children of `parent_id`.
    #[must_use]
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Case-insensitive substring match used by in-memory adapters.
    pub fn matches_keyword(&self, label: &str) -> bool {
        self.keyword
            .as_deref()
            .is_none_or(|keyword| label.to_lowercase().contains(&keyword.to_lowercase()))
    }
}

/// One page of a listing plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Assemble a page for `query`.
    pub fn new(items: Vec<T>, total: u64, query: &ListQuery) -> Self {
        Self {
            items,
            total,
            page: query.page,
            per_page: query.per_page,
        }
    }

    /// Transform the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_apply_when_absent() {
        let query = ListQuery::new(None, None, None, None).expect("defaults are valid");
        assert_eq!(query, ListQuery::default());
        assert_eq!(query.offset(), 0);
    }

    #[rstest]
    #[case(Some(0), None, "page")]
    #[case(None, Some(0), "perPage")]
    #[case(None, Some(MAX_PER_PAGE + 1), "perPage")]
    fn rejects_out_of_range_paging(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] field: &str,
    ) {
        let err = ListQuery::new(page, per_page, None, None).expect_err("invalid paging");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), FieldCode::OutOfRange);
    }

    #[rstest]
    #[case(Some("   ".to_owned()), None)]
    #[case(Some(" Kyo ".to_owned()), Some("Kyo"))]
    fn keyword_is_trimmed(#[case] raw: Option<String>, #[case] expected: Option<&str>) {
        let query = ListQuery::new(None, None, raw, None).expect("valid query");
        assert_eq!(query.keyword(), expected);
    }

    #[rstest]
    #[case("Kyoto University", true)]
    #[case("KYOTO", true)]
    #[case("Osaka", false)]
    fn keyword_match_ignores_case(#[case] label: &str, #[case] expected: bool) {
        let query = ListQuery::new(None, None, Some("kyoto".to_owned()), None).expect("valid");
        assert_eq!(query.matches_keyword(label), expected);
    }

    #[rstest]
    fn page_map_keeps_metadata() {
        let query = ListQuery::new(Some(2), Some(5), None, None).expect("valid");
        let page = Page::new(vec![1, 2], 7, &query).map(|n| n * 10);

        assert_eq!(page.items, vec![10, 20]);
        assert_eq!((page.total, page.page, page.per_page), (7, 2, 5));
    }
}
