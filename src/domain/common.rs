//! Shared traits and serde helpers for finance entries.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};
use uuid::Uuid;

use super::Frequency;

/// Exposes the opaque identifier assigned by the state owner.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a common contract for retrieving nominal amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// An amount that repeats on a cadence.
pub trait Recurring: Amounted {
    fn frequency(&self) -> &Frequency;
}

/// Associates an entry with a free-text category used for grouping.
pub trait BelongsToCategory {
    fn category(&self) -> &str;
}

/// Converts an entry into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Mints a fresh opaque identifier for a new entry.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Parses user-entered numeric text, falling back to `0.0` for anything
/// that is not a finite decimal.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(de::IgnoredAny),
}

/// Accepts numbers or numeric strings; anything else becomes `0.0`.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    Ok(match raw {
        RawAmount::Number(value) => value,
        RawAmount::Text(text) => parse_amount(&text),
        RawAmount::Other(_) => 0.0,
    })
}

/// Accepts `YYYY-MM-DD` or an ISO timestamp whose date prefix is valid.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
}

pub(crate) fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

/// Parses the calendar date at the start of `raw`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let prefix = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
