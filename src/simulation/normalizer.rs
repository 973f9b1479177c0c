use crate::domain::Frequency;

/// Converts `amount` at the given cadence into its monthly equivalent.
///
/// Unrecognised cadences (and one-time amounts) are treated as already
/// monthly. No sign correction is applied.
pub fn to_monthly(amount: f64, frequency: &Frequency) -> f64 {
    match frequency {
        Frequency::Daily => amount * 30.0,
        Frequency::Weekly => amount * 4.33,
        Frequency::Biweekly => amount * 2.17,
        Frequency::Monthly => amount,
        Frequency::Quarterly => amount / 3.0,
        Frequency::Annually => amount / 12.0,
        Frequency::OneTime | Frequency::Other(_) => amount,
    }
}

/// String-keyed variant of [`to_monthly`] for callers holding raw cadence text.
pub fn to_monthly_str(amount: f64, frequency: &str) -> f64 {
    to_monthly(amount, &Frequency::parse(frequency))
}
