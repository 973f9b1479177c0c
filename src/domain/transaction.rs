use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{
    generate_id, lenient_amount, lenient_date, serialize_date, Amounted, BelongsToCategory,
    Displayable, Identifiable,
};

/// A single dated expense recorded against an expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(deserialize_with = "lenient_date", serialize_with = "serialize_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: generate_id(),
            date,
            category: category.into(),
            description: description.into(),
            amount,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl BelongsToCategory for Transaction {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {}: {}", self.date, self.category, self.description)
    }
}
