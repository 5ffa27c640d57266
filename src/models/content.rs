use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "series" => Ok(ContentType::Series),
            other => Err(format!("unknown content type '{}'", other)),
        }
    }
}

/// A single watchable title in the catalog
///
/// Records are written once by the seed step and never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Unique slug, e.g. "the-boys-series"
    pub content_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Ordered, most relevant genre first
    #[serde(default)]
    pub genre: Vec<String>,
    pub image_url: String,
    pub description: String,
    pub language: Vec<String>,
    pub release_year: i32,
    #[serde(default)]
    pub video_url: String,
}

impl ContentRecord {
    /// First genre, if any
    pub fn primary_genre(&self) -> Option<&str> {
        self.genre.first().map(String::as_str)
    }
}
