//! # Cinelist Core
//!
//! Record store for the Cinelist movie catalog.
//!
//! ## Overview
//!
//! - **Validation**: a per-request [`validator::Validator`] that collects one
//!   message per field, plus the movie rules in [`movies`].
//! - **Filtering**: page/page-size/sort parameters checked against an
//!   explicit allow-list before any query text is built ([`filters`]).
//! - **Storage**: the [`database::ports::movies::MoviesRepository`] port and
//!   its PostgreSQL adapter, with optimistic concurrency on `version`,
//!   full-text/genre search and windowed total counts.
//! - **Catalog service**: [`application::MovieCatalog`] strings the pieces
//!   together the way a request handler would.
//!
//! Every store operation is bounded by [`database::QUERY_TIMEOUT`]; none of
//! them retry on their own.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod application;
pub mod database;
pub mod error;
pub mod filters;
pub mod movies;
pub mod validator;

pub use cinelist_model as model;
pub use error::{CatalogError, Result};

/// Embedded schema migrations for the catalog database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
