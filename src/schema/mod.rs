pub mod loader;
pub mod resolved;

pub use loader::*;
pub use resolved::*;
