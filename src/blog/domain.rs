//! Blog posts and their comments.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

pub type PostId = i64;
pub type CommentId = i64;

/// The title of a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostTitle(String);

impl PostTitle {
    /// Create a post title.
    ///
    /// Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return [Error::EmptyPostTitle] if `title` is empty
    /// or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyPostTitle)
        } else {
            Ok(Self(title.to_owned()))
        }
    }

    /// Create a post title without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_owned())
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PostTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostTitle::new(s)
    }
}

impl Display for PostTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blog post as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A reader's comment on a [Post].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_name: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A post together with all of its comments, oldest comment first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// The request body for creating or updating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// The request body for commenting on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub author_name: String,
    pub content: String,
}

/// The current UTC time truncated to whole seconds, the precision timestamps
/// are stored with.
pub fn now_utc_seconds() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - Duration::nanoseconds(now.nanosecond() as i64)
}
