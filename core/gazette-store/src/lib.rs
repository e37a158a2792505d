//! SQLite storage layer for Gazette.
//!
//! Posts, comments, and newsletter subscribers live in a single SQLite
//! database. All access goes through [`BlogStore`], which holds one
//! connection behind a mutex and uses parameterized queries exclusively.
//! Schema creation is idempotent and runs on open.

mod blog_store;
mod error;

pub use blog_store::BlogStore;
pub use error::{StoreError, StoreResult};
