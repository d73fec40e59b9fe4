//! Application services that compose validation and storage.

mod catalog;

pub use catalog::MovieCatalog;
