use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cadence attached to a recurring income, expense, or investment line.
///
/// Unrecognised strings are kept verbatim in [`Frequency::Other`] so a
/// stored blob round-trips unchanged; the normalizer treats them as
/// already monthly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Annually,
    OneTime,
    Other(String),
}

impl Frequency {
    /// Every cadence the entry forms offer, in display order.
    pub const KNOWN: [Frequency; 7] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Annually,
        Frequency::OneTime,
    ];

    /// Parses a cadence string. Matching is exact, like the stored values.
    pub fn parse(value: &str) -> Self {
        match value {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "biweekly" => Frequency::Biweekly,
            "monthly" => Frequency::Monthly,
            "quarterly" => Frequency::Quarterly,
            "annually" => Frequency::Annually,
            "one-time" => Frequency::OneTime,
            other => Frequency::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Annually => "annually",
            Frequency::OneTime => "one-time",
            Frequency::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Frequency::Other(_))
    }

    pub fn label(&self) -> String {
        match self {
            Frequency::Daily => "Daily".into(),
            Frequency::Weekly => "Weekly".into(),
            Frequency::Biweekly => "Biweekly".into(),
            Frequency::Monthly => "Monthly".into(),
            Frequency::Quarterly => "Quarterly".into(),
            Frequency::Annually => "Annually".into(),
            Frequency::OneTime => "One-time".into(),
            Frequency::Other(raw) => format!("{raw} (as monthly)"),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Frequency {
    fn from(value: &str) -> Self {
        Frequency::parse(value)
    }
}

impl Serialize for Frequency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|raw| Frequency::parse(&raw))
            .unwrap_or_default())
    }
}
