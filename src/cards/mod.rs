//! Card definitions and the fixed catalog.

mod catalog;
mod definition;

pub use catalog::CardCatalog;
pub use definition::{Card, CardKind, StatusKind, StatusTemplate};
