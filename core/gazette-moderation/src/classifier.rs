//! Deterministic spam heuristic for comment submissions.
//!
//! One canonical rule set, applied to every submission regardless of
//! route. A comment trips into the moderation queue when any rule fires;
//! otherwise it is published immediately.

use gazette_types::{CommentStatus, MAX_CONTENT_CHARS};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Below this many characters a comment is held for review.
const MIN_CONTENT_CHARS: usize = 10;

/// The shouting heuristic only applies above this length.
const SHOUTING_MIN_CHARS: usize = 20;

/// Uppercase share of alphabetic characters above which a comment is
/// considered shouting.
const SHOUTING_RATIO: f64 = 0.5;

/// Keyword table for spam categories. Matched case-insensitively as
/// substrings.
const SPAM_KEYWORDS: &[&str] = &[
    // pharmaceutical
    "viagra",
    "cialis",
    "online pharmacy",
    // gambling
    "casino",
    "poker",
    "jackpot",
    "lottery",
    // financial scams
    "forex",
    "get rich",
    "make money fast",
    "payday loan",
    "work from home",
    // adult
    "porn",
    "xxx",
    "hot singles",
];

/// The classifier's verdict on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approved,
    Pending,
}

impl Verdict {
    /// The initial status a comment is stored with. This mapping is the
    /// only entry point into the comment state space.
    #[must_use]
    pub fn initial_status(self) -> CommentStatus {
        match self {
            Self::Approved => CommentStatus::Approved,
            Self::Pending => CommentStatus::Pending,
        }
    }
}

/// Spam classifier with its patterns compiled once at construction.
pub struct Classifier {
    bare_domain: Regex,
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        // Bare domains like "example.com" without a scheme or www prefix.
        let bare_domain = Regex::new(r"[a-z0-9][a-z0-9-]*\.(com|net|org|info|biz|io|xyz)\b")
            .unwrap();
        Self { bare_domain }
    }

    /// Classifies comment content.
    ///
    /// Every rule is evaluated; the verdict is `Pending` if any fired.
    #[must_use]
    pub fn classify(&self, content: &str) -> Verdict {
        let lowered = content.to_lowercase();

        let too_long = self.is_too_long(content);
        let too_short = self.is_too_short(content);
        let keyword = self.has_spam_keyword(&lowered);
        let link = self.has_link(&lowered);
        let shouting = self.is_shouting(content);

        if too_long || too_short || keyword || link || shouting {
            Verdict::Pending
        } else {
            Verdict::Approved
        }
    }

    fn is_too_long(&self, content: &str) -> bool {
        content.chars().count() > MAX_CONTENT_CHARS
    }

    fn is_too_short(&self, content: &str) -> bool {
        content.chars().count() < MIN_CONTENT_CHARS
    }

    fn has_spam_keyword(&self, lowered: &str) -> bool {
        SPAM_KEYWORDS.iter().any(|kw| lowered.contains(kw))
    }

    fn has_link(&self, lowered: &str) -> bool {
        lowered.contains("http://")
            || lowered.contains("https://")
            || lowered.contains("www.")
            || self.bare_domain.is_match(lowered)
    }

    /// Shouting: more than half of the letters are uppercase, for
    /// contents longer than the minimum gate. The ratio is taken over
    /// alphabetic characters so spaces and punctuation do not dilute it.
    fn is_shouting(&self, content: &str) -> bool {
        if content.chars().count() <= SHOUTING_MIN_CHARS {
            return false;
        }
        let letters = content.chars().filter(|c| c.is_alphabetic()).count();
        if letters == 0 {
            return false;
        }
        let uppercase = content.chars().filter(|c| c.is_uppercase()).count();
        uppercase as f64 / letters as f64 > SHOUTING_RATIO
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
