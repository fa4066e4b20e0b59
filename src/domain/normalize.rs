//! Flattens one upstream entry into a [`NormalizedRecord`].
//!
//! Every extractor here is total: a missing key, a `null`, or a value of the
//! wrong shape yields [`crate::domain::model::NOT_AVAILABLE`] for that field and nothing else.

use crate::domain::model::{FieldValue, NormalizedRecord};
use serde_json::Value;

pub fn normalize(raw: &Value) -> NormalizedRecord {
    NormalizedRecord {
        mal_id: scalar(raw, "mal_id"),
        title: scalar(raw, "title"),
        title_english: title_english(raw),
        title_japanese: scalar(raw, "title_japanese"),
        rank: scalar(raw, "rank"),
        score: scalar(raw, "score"),
        scored_by: scalar(raw, "scored_by"),
        popularity: scalar(raw, "popularity"),
        members: scalar(raw, "members"),
        favorites: scalar(raw, "favorites"),
        kind: scalar(raw, "type"),
        episodes: scalar(raw, "episodes"),
        status: scalar(raw, "status"),
        aired_from: aired_date(raw, "from"),
        aired_to: aired_date(raw, "to"),
        duration: scalar(raw, "duration"),
        rating: scalar(raw, "rating"),
        studios: joined_names(raw, "studios"),
        genres: joined_names(raw, "genres"),
        themes: joined_names(raw, "themes"),
        demographics: joined_names(raw, "demographics"),
        synopsis: synopsis(raw),
        url: scalar(raw, "url"),
        image_url: image_url(raw),
    }
}

fn scalar_value(value: Option<&Value>) -> Option<FieldValue> {
    match value? {
        Value::String(text) => Some(FieldValue::Text(text.clone())),
        Value::Number(number) => Some(FieldValue::Number(number.clone())),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn scalar(raw: &Value, key: &str) -> FieldValue {
    scalar_value(raw.get(key)).unwrap_or_else(FieldValue::not_available)
}

fn title_english(raw: &Value) -> FieldValue {
    match non_empty_str(raw.get("title_english")) {
        Some(title) => FieldValue::from(title),
        None => scalar(raw, "title"),
    }
}

/// `aired.from` / `aired.to`, cut to the `YYYY-MM-DD` prefix.
fn aired_date(raw: &Value, key: &str) -> FieldValue {
    non_empty_str(raw.get("aired").and_then(|aired| aired.get(key)))
        .map(|timestamp| FieldValue::Text(timestamp.chars().take(10).collect()))
        .unwrap_or_else(FieldValue::not_available)
}

/// `[{"name": ..}, ..]` joined with ", ". Entries without a string name are skipped.
fn joined_names(raw: &Value, key: &str) -> FieldValue {
    let names: Vec<&str> = raw
        .get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        FieldValue::not_available()
    } else {
        FieldValue::Text(names.join(", "))
    }
}

// 換行改空白、逗號改分號，讓簡單的逗號分隔解析也不會錯欄
fn synopsis(raw: &Value) -> FieldValue {
    match non_empty_str(raw.get("synopsis")) {
        Some(text) => FieldValue::Text(text.replace('\n', " ").replace(',', ";")),
        None => FieldValue::not_available(),
    }
}

fn image_url(raw: &Value) -> FieldValue {
    let jpg = raw.get("images").and_then(|images| images.get("jpg"));
    let large = jpg.and_then(|jpg| non_empty_str(jpg.get("large_image_url")));

    match large {
        Some(url) => FieldValue::from(url),
        None => scalar_value(jpg.and_then(|jpg| jpg.get("image_url")))
            .unwrap_or_else(FieldValue::not_available),
    }
}
