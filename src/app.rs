//! The "app" resource as delivered by the directory's REST API.
//!
//! Only the fields the orchestration core reads are modelled; unknown
//! fields in the payload are ignored on deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an app.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AppId(pub u64);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of an uploaded media item.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for MediaId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A rendered markup fragment, e.g. the title.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    pub rendered: String,
}

/// The content of an app.
///
/// `raw` is only present once the editable representation has been
/// fetched, and is retained for as long as this value lives.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Content {
    pub rendered: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Content {
    pub fn is_editable(&self) -> bool {
        self.raw.is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Embedded {
    #[serde(default)]
    pub author: Vec<Author>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Publish,
    Pending,
    #[default]
    Draft,
    Private,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct App {
    pub id: AppId,
    pub title: Rendered,
    pub content: Content,
    #[serde(rename = "_embedded", default)]
    pub embedded: Embedded,
    #[serde(default, deserialize_with = "media_or_zero")]
    pub featured_media: Option<MediaId>,
    #[serde(default)]
    pub status: Status,
}

impl App {
    /// The primary author, being the first embedded one.
    pub fn author(&self) -> Option<&Author> {
        self.embedded.author.first()
    }
}

/// The API reports "no featured media" as `0`.
fn media_or_zero<'de, D>(deserializer: D) -> Result<Option<MediaId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None | Some(Raw::Number(0)) => None,
        Some(Raw::Number(n)) => Some(n.into()),
        Some(Raw::Text(s)) if s.is_empty() => None,
        Some(Raw::Text(s)) => Some(MediaId(s)),
    })
}

/// A partial app, as submitted to the save command.  Absent fields are
/// left untouched by the server.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AppUpdate {
    pub id: AppId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<MediaId>,
}

impl AppUpdate {
    pub fn new(id: AppId) -> Self {
        Self {
            id,
            title: None,
            content: None,
            status: None,
            featured_media: None,
        }
    }

    pub fn featured_media(mut self, media: MediaId) -> Self {
        self.featured_media = Some(media);
        self
    }
}
