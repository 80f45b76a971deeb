//! Field codecs shared by the resource schemas.
//!
//! Console forms send list fields as delimited text, dates as bare
//! `YYYY-MM-DD` strings and booleans as `"true"`/`"false"` inside multipart
//! bodies. These helpers accept both the form shape and the canonical JSON
//! shape, and always store the canonical one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Split comma separated text into trimmed, non-empty entries.
pub fn split_tags(raw: &str) -> Vec<String> {
    split_on(raw, ',')
}

/// Split newline delimited text into trimmed, non-empty lines.
pub fn split_lines(raw: &str) -> Vec<String> {
    split_on(raw, '\n')
}

fn split_on(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    List(Vec<String>),
}

fn list_with<'de, D>(deserializer: D, split: fn(&str) -> Vec<String>) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(TextOrList::Text(text)) => split(&text),
        Some(TextOrList::List(items)) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// List field that also accepts comma separated text.
pub fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    list_with(deserializer, split_tags)
}

/// List field that also accepts newline delimited text.
pub fn line_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    list_with(deserializer, split_lines)
}

/// Parse a date given either as RFC 3339 or as a calendar day (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date `{raw}`")))
}

/// Optional date; blank text counts as absent.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{raw}`"))),
    }
}

/// Optional text; blank text counts as absent so a cleared form field clears
/// the stored value.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|text| !text.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrText {
    Bool(bool),
    Text(String),
}

/// Boolean that also accepts `"true"`, `"false"`, `"on"`, `"1"` and `"0"`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrText::deserialize(deserializer)? {
        BoolOrText::Bool(value) => Ok(value),
        BoolOrText::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Ok(true),
            "false" | "off" | "0" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid boolean `{other}`"))),
        },
    }
}

/// Lowercase, ASCII-alphanumeric words joined by `-`.
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}
