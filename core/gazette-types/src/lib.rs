//! Core type definitions for Gazette.
//!
//! This crate defines the domain types shared by the store and the HTTP
//! server:
//! - Posts and their publication status
//! - Comments, their moderation status, and the submission payload
//! - Moderation statistics
//!
//! Wire formats (JSON field names, lowercase status strings) are fixed
//! here; everything downstream serializes through these types.

mod comment;
mod post;

pub use comment::{
    Comment, CommentStats, CommentStatus, ModerationComment, NewComment, ValidationError,
    MAX_AUTHOR_NAME_CHARS, MAX_CONTENT_CHARS,
};
pub use post::{NewPost, Post, PostStatus, PostSummary};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing domain values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid comment status: {0}")]
    InvalidStatus(String),

    #[error("invalid post status: {0}")]
    InvalidPostStatus(String),
}
