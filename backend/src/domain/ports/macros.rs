//! `define_port_error!` builds a port error enum whose variants each carry one
//! string of context, with a `thiserror` message and a snake_case constructor
//! accepting anything `Into<String>`.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum ExampleError {
//!         Query { message } => "query failed: {message}",
//!     }
//! }
//! let err = ExampleError::query("timeout");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;
