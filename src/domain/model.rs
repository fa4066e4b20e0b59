use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder written for any missing, null or malformed source value.
pub const NOT_AVAILABLE: &str = "N/A";

/// A flat scalar in a normalized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    pub fn not_available() -> Self {
        FieldValue::Text(NOT_AVAILABLE.to_string())
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text == NOT_AVAILABLE)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

/// One ranked entry, flattened. Field declaration order is the export
/// column order, so every record serializes to the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub mal_id: FieldValue,
    pub title: FieldValue,
    pub title_english: FieldValue,
    pub title_japanese: FieldValue,
    pub rank: FieldValue,
    pub score: FieldValue,
    pub scored_by: FieldValue,
    pub popularity: FieldValue,
    pub members: FieldValue,
    pub favorites: FieldValue,
    #[serde(rename = "type")]
    pub kind: FieldValue,
    pub episodes: FieldValue,
    pub status: FieldValue,
    pub aired_from: FieldValue,
    pub aired_to: FieldValue,
    pub duration: FieldValue,
    pub rating: FieldValue,
    pub studios: FieldValue,
    pub genres: FieldValue,
    pub themes: FieldValue,
    pub demographics: FieldValue,
    pub synopsis: FieldValue,
    pub url: FieldValue,
    pub image_url: FieldValue,
}

impl NormalizedRecord {
    pub const FIELD_NAMES: [&'static str; 24] = [
        "mal_id",
        "title",
        "title_english",
        "title_japanese",
        "rank",
        "score",
        "scored_by",
        "popularity",
        "members",
        "favorites",
        "type",
        "episodes",
        "status",
        "aired_from",
        "aired_to",
        "duration",
        "rating",
        "studios",
        "genres",
        "themes",
        "demographics",
        "synopsis",
        "url",
        "image_url",
    ];

    /// Values in `FIELD_NAMES` order.
    pub fn values(&self) -> [&FieldValue; 24] {
        [
            &self.mal_id,
            &self.title,
            &self.title_english,
            &self.title_japanese,
            &self.rank,
            &self.score,
            &self.scored_by,
            &self.popularity,
            &self.members,
            &self.favorites,
            &self.kind,
            &self.episodes,
            &self.status,
            &self.aired_from,
            &self.aired_to,
            &self.duration,
            &self.rating,
            &self.studios,
            &self.genres,
            &self.themes,
            &self.demographics,
            &self.synopsis,
            &self.url,
            &self.image_url,
        ]
    }
}

/// One page of the upstream listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<serde_json::Value>,
    pub has_next_page: bool,
}

impl Page {
    /// A missing or non-array `data` key yields no items; a missing
    /// `pagination.has_next_page` means this is the last page.
    pub fn from_document(document: serde_json::Value) -> Self {
        let has_next_page = document
            .get("pagination")
            .and_then(|p| p.get("has_next_page"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let items = match document {
            serde_json::Value::Object(mut map) => match map.remove("data") {
                Some(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Self {
            items,
            has_next_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `has_next_page` was false.
    LastPage,
    /// A page came back with no items.
    Exhausted,
    /// The fetch failed. Handled the same as `Exhausted`.
    FetchFailed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::LastPage => f.write_str("reached the last page"),
            StopReason::Exhausted => f.write_str("no more data available"),
            StopReason::FetchFailed => f.write_str("page fetch failed"),
        }
    }
}

/// Records in fetch order plus how collection ended.
#[derive(Debug, Clone)]
pub struct Collection {
    pub records: Vec<NormalizedRecord>,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
