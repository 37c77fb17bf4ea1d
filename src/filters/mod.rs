//! Record filtering.
//!
//! A small query language (`user:`, `kind:`, `since:`, `until:`) parsed into a
//! [`FilterExpr`] of typed [`FilterTerm`]s, plus [`Selection`] for scoping an analysis to
//! one participant or to everyone.

pub mod apply;
pub mod query;
pub mod selection;
pub mod term;

pub use apply::apply_filters;
pub use query::{FilterExpr, parse_filter};
pub use selection::{OVERALL, Selection};
pub use term::{FilterTerm, RecordKind};
