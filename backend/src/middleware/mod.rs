//! Request middleware.
//!
//! Purpose: request lifecycle concerns that apply to every route, currently
//! trace identifiers and access logging.

pub mod trace;

pub use trace::Trace;
