use serde::{Deserialize, Serialize};

use super::common::{
    generate_id, lenient_amount, Amounted, BelongsToCategory, Displayable, Identifiable, Recurring,
};
use super::Frequency;

/// A recurring source of income, labelled by where it comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub frequency: Frequency,
}

/// A recurring expense, labelled by spending category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub frequency: Frequency,
}

/// A recurring investment contribution, labelled by vehicle type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentEntry {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub frequency: Frequency,
}

impl IncomeEntry {
    pub fn new(source: impl Into<String>, amount: f64, frequency: Frequency) -> Self {
        Self {
            id: generate_id(),
            source: source.into(),
            amount,
            frequency,
        }
    }
}

impl ExpenseEntry {
    pub fn new(category: impl Into<String>, amount: f64, frequency: Frequency) -> Self {
        Self {
            id: generate_id(),
            category: category.into(),
            amount,
            frequency,
        }
    }
}

impl InvestmentEntry {
    pub fn new(kind: impl Into<String>, amount: f64, frequency: Frequency) -> Self {
        Self {
            id: generate_id(),
            kind: kind.into(),
            amount,
            frequency,
        }
    }
}

macro_rules! recurring_entry {
    ($ty:ty, $label:ident) => {
        impl Identifiable for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Amounted for $ty {
            fn amount(&self) -> f64 {
                self.amount
            }
        }

        impl Recurring for $ty {
            fn frequency(&self) -> &Frequency {
                &self.frequency
            }
        }

        impl Displayable for $ty {
            fn display_label(&self) -> String {
                format!("{} ({})", self.$label, self.frequency.label())
            }
        }
    };
}

recurring_entry!(IncomeEntry, source);
recurring_entry!(ExpenseEntry, category);
recurring_entry!(InvestmentEntry, kind);

impl BelongsToCategory for ExpenseEntry {
    fn category(&self) -> &str {
        &self.category
    }
}
