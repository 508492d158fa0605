//! HTTP handlers for record lookups and the server overview.

pub mod overview;
pub mod records;
pub use overview::*;
pub use records::*;
