//! Post types.
//!
//! Posts are authored out of band and owned by the store; the API only
//! ever reads them.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication status of a post. Only published posts are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    /// Returns the lowercase wire/database representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(Error::InvalidPostStatus(other.to_string())),
        }
    }
}

/// A blog post as served by the public listing.
///
/// `author_name` is resolved by joining the authors table and may be
/// absent when the author row has been removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author_id: i64,
    pub author_name: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<String>,
}

/// A post being loaded into the store. Authoring happens out of band;
/// this is the seed/import payload rather than a public API body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author_id: i64,
    pub status: PostStatus,
    pub published_at: Option<String>,
}

/// The projection returned by search: enough to render a result list,
/// without the full body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub category: String,
}
