//! Label, tool-tip and URL generators for category data.
//!
//! Generators are plain functions of a dataset and a cell or series index.
//! Formats use `{0}` for the row key, `{1}` for the column key and `{2}` for
//! the formatted value.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::dataset::CategoryDataset;

/// Characters left unescaped in URL parameters.
const URL_PARAM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Text shown for an absent cell value.
pub const NULL_VALUE_STRING: &str = "-";

/// Produces category axis labels and item labels.
pub trait CategoryItemLabelGenerator: fmt::Debug {
    /// Label for a whole row.
    fn generate_row_label(&self, dataset: &dyn CategoryDataset, row: usize) -> Option<String>;

    /// Label for a whole column.
    fn generate_column_label(&self, dataset: &dyn CategoryDataset, column: usize)
        -> Option<String>;

    /// Label for one cell.
    fn generate_label(
        &self,
        dataset: &dyn CategoryDataset,
        row: usize,
        column: usize,
    ) -> Option<String>;
}

/// Produces the tool-tip for one cell.
pub trait CategoryToolTipGenerator: fmt::Debug {
    /// Tool-tip text, or `None` for no tool-tip.
    fn generate_tool_tip(
        &self,
        dataset: &dyn CategoryDataset,
        row: usize,
        column: usize,
    ) -> Option<String>;
}

/// Produces the link target for one cell.
pub trait CategoryUrlGenerator: fmt::Debug {
    /// URL, or `None` for no link.
    fn generate_url(
        &self,
        dataset: &dyn CategoryDataset,
        series: usize,
        category: usize,
    ) -> Option<String>;
}

/// Produces text for one series, used for legend items.
pub trait CategorySeriesLabelGenerator: fmt::Debug {
    /// Text for `series` (a row index).
    fn generate_label(&self, dataset: &dyn CategoryDataset, series: usize) -> Option<String>;
}

/// Format a cell value: integers without decimals, others with up to three.
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => NULL_VALUE_STRING.to_string(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => {
            let text = format!("{v:.3}");
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Expand `{0}`, `{1}` and `{2}` in one pass; inserted text is not rescanned.
fn substitute(format: &str, row_key: &str, column_key: &str, value: &str) -> String {
    let mut out = String::with_capacity(format.len() + row_key.len() + column_key.len());
    let mut rest = format;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let arg = match tail.get(..3) {
            Some("{0}") => Some(row_key),
            Some("{1}") => Some(column_key),
            Some("{2}") => Some(value),
            _ => None,
        };
        match arg {
            Some(text) => {
                out.push_str(text);
                rest = &tail[3..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn cell_text(format: &str, dataset: &dyn CategoryDataset, row: usize, column: usize) -> Option<String> {
    let row_key = dataset.row_key(row)?;
    let column_key = dataset.column_key(column)?;
    let value = format_value(dataset.value(row, column));
    Some(substitute(format, row_key, column_key, &value))
}

/// Key-based labels with a configurable item format (default `"{2}"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCategoryItemLabelGenerator {
    format: String,
}

impl Default for StandardCategoryItemLabelGenerator {
    fn default() -> Self {
        Self::new("{2}")
    }
}

impl StandardCategoryItemLabelGenerator {
    /// Generator with an item label format.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl CategoryItemLabelGenerator for StandardCategoryItemLabelGenerator {
    fn generate_row_label(&self, dataset: &dyn CategoryDataset, row: usize) -> Option<String> {
        dataset.row_key(row).map(str::to_owned)
    }

    fn generate_column_label(
        &self,
        dataset: &dyn CategoryDataset,
        column: usize,
    ) -> Option<String> {
        dataset.column_key(column).map(str::to_owned)
    }

    fn generate_label(
        &self,
        dataset: &dyn CategoryDataset,
        row: usize,
        column: usize,
    ) -> Option<String> {
        cell_text(&self.format, dataset, row, column)
    }
}

/// Tool-tips in the form `"({0}, {1}) = {2}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCategoryToolTipGenerator {
    format: String,
}

impl Default for StandardCategoryToolTipGenerator {
    fn default() -> Self {
        Self::new("({0}, {1}) = {2}")
    }
}

impl StandardCategoryToolTipGenerator {
    /// Generator with a custom format.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl CategoryToolTipGenerator for StandardCategoryToolTipGenerator {
    fn generate_tool_tip(
        &self,
        dataset: &dyn CategoryDataset,
        row: usize,
        column: usize,
    ) -> Option<String> {
        cell_text(&self.format, dataset, row, column)
    }
}

/// Links of the form `index.html?series=<row key>&category=<column key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCategoryUrlGenerator {
    prefix: String,
    series_parameter: String,
    category_parameter: String,
}

impl Default for StandardCategoryUrlGenerator {
    fn default() -> Self {
        Self::new("index.html", "series", "category")
    }
}

impl StandardCategoryUrlGenerator {
    /// Generator with a custom prefix and parameter names.
    #[must_use]
    pub fn new(
        prefix: impl Into<String>,
        series_parameter: impl Into<String>,
        category_parameter: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            series_parameter: series_parameter.into(),
            category_parameter: category_parameter.into(),
        }
    }
}

impl CategoryUrlGenerator for StandardCategoryUrlGenerator {
    fn generate_url(
        &self,
        dataset: &dyn CategoryDataset,
        series: usize,
        category: usize,
    ) -> Option<String> {
        let series_key = dataset.row_key(series)?;
        let category_key = dataset.column_key(category)?;
        let separator = if self.prefix.contains('?') { '&' } else { '?' };
        Some(format!(
            "{}{separator}{}={}&{}={}",
            self.prefix,
            self.series_parameter,
            utf8_percent_encode(series_key, URL_PARAM),
            self.category_parameter,
            utf8_percent_encode(category_key, URL_PARAM),
        ))
    }
}

/// Series text from a format where `{0}` is the series (row) key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardCategorySeriesLabelGenerator {
    format: String,
}

impl Default for StandardCategorySeriesLabelGenerator {
    fn default() -> Self {
        Self::new("{0}")
    }
}

impl StandardCategorySeriesLabelGenerator {
    /// Generator with a custom format.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl CategorySeriesLabelGenerator for StandardCategorySeriesLabelGenerator {
    fn generate_label(&self, dataset: &dyn CategoryDataset, series: usize) -> Option<String> {
        dataset
            .row_key(series)
            .map(|key| self.format.replace("{0}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SimpleCategoryDataset;

    fn dataset() -> SimpleCategoryDataset {
        SimpleCategoryDataset::from_rows(
            &["First Series", "S2"],
            &["Speed", "R&D"],
            &[&[Some(3.0), Some(2.5)], &[None, Some(1.125)]],
        )
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(7.0)), "7");
        assert_eq!(format_value(Some(2.5)), "2.5");
        assert_eq!(format_value(Some(1.0 / 3.0)), "0.333");
        assert_eq!(format_value(None), "-");
    }

    #[test]
    fn test_keys_containing_placeholders_are_not_rescanned() {
        let ds = SimpleCategoryDataset::from_rows(&["row {1}"], &["col {2}"], &[&[Some(4.0)]]);
        let g = StandardCategoryToolTipGenerator::default();
        assert_eq!(
            g.generate_tool_tip(&ds, 0, 0).as_deref(),
            Some("(row {1}, col {2}) = 4")
        );
        assert_eq!(substitute("{x} {0}{é", "a", "b", "c"), "{x} a{é");
    }

    #[test]
    fn test_item_labels() {
        let ds = dataset();
        let g = StandardCategoryItemLabelGenerator::default();
        assert_eq!(g.generate_row_label(&ds, 1).as_deref(), Some("S2"));
        assert_eq!(g.generate_column_label(&ds, 0).as_deref(), Some("Speed"));
        assert_eq!(g.generate_label(&ds, 0, 1).as_deref(), Some("2.5"));
        assert_eq!(g.generate_label(&ds, 1, 0).as_deref(), Some("-"));
        assert_eq!(g.generate_column_label(&ds, 9), None);
    }

    #[test]
    fn test_tool_tip_format() {
        let ds = dataset();
        let g = StandardCategoryToolTipGenerator::default();
        assert_eq!(
            g.generate_tool_tip(&ds, 1, 1).as_deref(),
            Some("(S2, R&D) = 1.125")
        );
    }

    #[test]
    fn test_url_is_percent_encoded() {
        let ds = dataset();
        let g = StandardCategoryUrlGenerator::default();
        assert_eq!(
            g.generate_url(&ds, 0, 1).as_deref(),
            Some("index.html?series=First%20Series&category=R%26D")
        );
        let g = StandardCategoryUrlGenerator::new("chart.html?id=4", "s", "c");
        assert_eq!(
            g.generate_url(&ds, 1, 0).as_deref(),
            Some("chart.html?id=4&s=S2&c=Speed")
        );
    }

    #[test]
    fn test_series_label() {
        let ds = dataset();
        let g = StandardCategorySeriesLabelGenerator::new("Series: {0}");
        assert_eq!(g.generate_label(&ds, 1).as_deref(), Some("Series: S2"));
        assert_eq!(g.generate_label(&ds, 5), None);
    }
}
