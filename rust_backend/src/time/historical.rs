use chrono::{Datelike, NaiveDate};

use crate::models::DateKey;

/// Same calendar day over the `years_back` years preceding `selected`'s year.
///
/// # Arguments
/// * `selected` - Date picked by the user; only its month and day are used
/// * `years_back` - Number of past years to cover
///
/// # Returns
/// * `Vec<DateKey>` - Keys ordered oldest first, one per year
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use climatescope::time::generate_historical_dates;
///
/// let date = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
/// let keys = generate_historical_dates(date, 3);
/// let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
/// assert_eq!(rendered, ["20220714", "20230714", "20240714"]);
/// ```
pub fn generate_historical_dates(selected: NaiveDate, years_back: u32) -> Vec<DateKey> {
    generate_historical_dates_for_year(selected, years_back, selected.year())
}

/// Like [`generate_historical_dates`] with an explicit current year: keys run
/// from `current_year - years_back` to `current_year - 1` inclusive.
///
/// February 29 is kept as-is for every target year, leap or not. Such keys
/// report `false` from [`DateKey::is_valid_date`] and are treated as missing
/// samples downstream.
///
/// A span reaching past the representable year range yields no keys.
pub fn generate_historical_dates_for_year(
    selected: NaiveDate,
    years_back: u32,
    current_year: i32,
) -> Vec<DateKey> {
    let month = selected.month();
    let day = selected.day();
    let first_year = match i32::try_from(years_back)
        .ok()
        .and_then(|span| current_year.checked_sub(span))
    {
        Some(year) => year,
        None => return Vec::new(),
    };

    (first_year..current_year)
        .map(|year| DateKey::new(year, month, day))
        .collect()
}

/// First and last key of a generated sequence, for range queries.
pub fn date_range(keys: &[DateKey]) -> Option<(DateKey, DateKey)> {
    Some((*keys.first()?, *keys.last()?))
}
