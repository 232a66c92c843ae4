use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything captured from one page, in the shape the site imports.
///
/// Field order is the JSON key order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub title: String,
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub images: Vec<ImageRecord>,
    /// Never populated.
    pub links: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Maps a lower-cased tag name to its level.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        }
    }
}

/// Absent attributes are `None` and drop out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}
