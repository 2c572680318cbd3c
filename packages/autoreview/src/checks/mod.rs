//! Pure text checks used by the rule chain.

pub mod domains;
pub mod isbn;
