//! Moderation logic for Gazette: spam classification and the admin
//! authentication gate.
//!
//! Everything in this crate is pure computation over its inputs. The
//! classifier never performs I/O, and the auth gate only compares a
//! decoded header against process-wide configuration. Side effects are
//! limited to `tracing` diagnostics.

mod auth;
mod classifier;

pub use auth::AdminCredentials;
pub use classifier::{Classifier, Verdict};
