//! Display helpers for amounts, rates and dates.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::Transaction;

const GROUPING_SEPARATOR: char = ',';

pub fn symbol_for(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

pub fn minor_units_for(code: &str) -> usize {
    match code {
        "JPY" => 0,
        _ => 2,
    }
}

/// Formats `value` with comma grouping and `precision` decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part);
    if let Some(frac) = frac_part {
        rendered.push('.');
        rendered.push_str(frac);
    }
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        rendered.insert(0, '-');
    }
    rendered
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

/// `-$1,234.56` for known symbols, `CHF 1,234.56` otherwise.
pub fn format_currency(amount: f64, code: &str) -> String {
    let code = code.trim().to_uppercase();
    let number = format_number(amount, minor_units_for(&code));
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number.as_str()),
    };
    match symbol_for(&code) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{code} {digits}"),
    }
}

/// `value` is already a percentage: `7.0` renders as `7.00%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        month_label(date.month()),
        date.day(),
        date.year()
    )
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

/// Buckets transactions under `YYYY-M` keys in first-seen order.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<(String, Vec<&Transaction>)> {
    let mut groups: Vec<(String, Vec<&Transaction>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for transaction in transactions {
        let key = format!("{}-{}", transaction.date.year(), transaction.date.month());
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(transaction),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![transaction]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_symbol_grouping_and_sign() {
        assert_eq!(format_currency(1234.56, "USD"), "$1,234.56");
        assert_eq!(format_currency(-1234.5, "usd"), "-$1,234.50");
        assert_eq!(format_currency(0.0, "EUR"), "€0.00");
        assert_eq!(format_currency(1_000_000.0, "GBP"), "£1,000,000.00");
    }

    #[test]
    fn currency_without_symbol_uses_code_prefix() {
        assert_eq!(format_currency(999.999, "CHF"), "CHF 1,000.00");
        assert_eq!(format_currency(-12.0, "CAD"), "-CAD 12.00");
    }

    #[test]
    fn yen_has_no_minor_units() {
        assert_eq!(format_currency(1234.4, "JPY"), "¥1,234");
    }

    #[test]
    fn tiny_negatives_do_not_render_negative_zero() {
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn percentage_and_date_labels() {
        assert_eq!(format_percentage(7.0), "7.00%");
        assert_eq!(format_percentage(2.456), "2.46%");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");
    }

    #[test]
    fn month_groups_keep_first_seen_order() {
        let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        let transactions = vec![
            Transaction::new(date(3, 1), "Food", "Market", 20.0),
            Transaction::new(date(1, 9), "Rent", "January", 900.0),
            Transaction::new(date(3, 28), "Food", "Cafe", 4.0),
        ];
        let groups = group_by_month(&transactions);
        let keys: Vec<&str> = groups.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["2024-3", "2024-1"]);
        assert_eq!(groups[0].1.len(), 2);
    }
}
