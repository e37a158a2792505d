//! Comment types and submission validation.
//!
//! A comment enters the system exactly once, through an unauthenticated
//! submission whose initial status the classifier decides. After that,
//! only authenticated moderation actions may change or remove it.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a commenter's display name, in characters.
pub const MAX_AUTHOR_NAME_CHARS: usize = 100;

/// Maximum length of a comment body, in characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Moderation status of a comment.
///
/// These three values are the entire state space; parsing anything else
/// fails. Only `Approved` comments are visible to unauthenticated reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    /// Returns the lowercase wire/database representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_name: String,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: String,
}

/// A comment joined with the title of the post it belongs to, as listed
/// in the moderation queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub post_title: String,
}

/// Comment counts grouped by status, for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

/// An incoming comment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub author_name: String,
    pub content: String,
}

/// Why a submission was refused before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name and comment required")]
    MissingAuthorName,

    #[error("name and comment required")]
    MissingContent,

    #[error("name must be at most {MAX_AUTHOR_NAME_CHARS} characters")]
    AuthorNameTooLong,

    #[error("comment must be at most {MAX_CONTENT_CHARS} characters")]
    ContentTooLong,
}

impl NewComment {
    /// Checks the submission against the modeled limits.
    ///
    /// Both fields must be non-empty after trimming, and oversized input
    /// is rejected rather than truncated, so stored rows always satisfy
    /// the bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.author_name.trim().is_empty() {
            return Err(ValidationError::MissingAuthorName);
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingContent);
        }
        if self.author_name.chars().count() > MAX_AUTHOR_NAME_CHARS {
            return Err(ValidationError::AuthorNameTooLong);
        }
        if self.content.chars().count() > MAX_CONTENT_CHARS {
            return Err(ValidationError::ContentTooLong);
        }
        Ok(())
    }
}
