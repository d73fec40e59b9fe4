//! Core data model definitions shared across Cinelist crates.

pub mod error;
pub mod ids;
pub mod movie;
pub mod pagination;
pub mod runtime;

pub use error::RuntimeFormatError;
pub use ids::MovieId;
pub use movie::{Movie, MoviePatch, NewMovie};
pub use pagination::PageMetadata;
pub use runtime::Runtime;
