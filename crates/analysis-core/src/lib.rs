//! Shared data model for fundamentals summarization.
//!
//! Holds the provider-shaped input record, the labels the engine emits and the
//! error taxonomy. The engine itself lives in `fundamental-analysis`.

pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
