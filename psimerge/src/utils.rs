//! Helper macros and small functions shared by the readers and writers.

use std::path::Path;

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}
pub use with_field_fn;

/// Strips stray carriage returns and double quotes from a table cell.
pub(crate) fn clean_cell(cell: &str) -> String {
    cell.chars()
        .filter(|c| *c != '\r' && *c != '"')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Formats a ratio with two decimals, `NA` when undefined.
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => crate::data_structs::Sentinel::NotAvailable.to_string(),
    }
}

/// Significant digits kept when writing summed counts.
pub const COUNT_DIGITS: usize = 12;

/// Shortest decimal form of a summed count after rounding to
/// [`COUNT_DIGITS`] significant digits, so `1.1 + 2.2` is written as `3.3`.
/// Integral values have no decimals.
pub fn format_count(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value + 0.0);
    }
    let rounded = format!("{:.*e}", COUNT_DIGITS - 1, value)
        .parse::<f64>()
        .unwrap_or(value);
    format!("{}", rounded)
}

/// File name of `path` with `suffix` removed, if the name ends with it.
pub(crate) fn strip_suffix<'a>(
    path: &'a Path,
    suffix: &str,
) -> Option<&'a str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
}
