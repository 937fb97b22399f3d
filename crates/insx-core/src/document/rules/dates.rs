//! Positional date extraction.
//!
//! Dates are picked by position, not by label: the first date-like substring
//! becomes the effective/application date, the second the expiration date.

use super::patterns::DATE;

/// All date-like substrings, left to right.
pub fn find_dates(text: &str) -> impl Iterator<Item = &str> {
    DATE.find_iter(text).map(|m| m.as_str())
}

/// The `index`-th date-like substring (0-based).
pub fn nth_date(text: &str, index: usize) -> Option<&str> {
    find_dates(text).nth(index)
}
