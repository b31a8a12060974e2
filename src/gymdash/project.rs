//! Tabular projection: column selection and cell formatting.
//!
//! Both entry points are synchronous, total, and pure — the same records
//! and columns always produce byte-identical output, and no value type
//! can reach the display layer as anything but a string.

use chrono::{DateTime, Utc};

use crate::model::{FieldValue, NormalizedRecord};
use crate::normalize::truncate_text;
use crate::schema::{self, CellFormat, Column};

/// Cap on auto-detected column sets, to keep unconfigured collections
/// from producing unbounded table width.
pub const MAX_AUTO_COLUMNS: usize = 6;

/// A fully formatted table: every cell is already a display string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project records through a configured column list.
///
/// Columns are filtered down to those present in at least one record of
/// the page; the configured order is preserved regardless of content.
pub fn project(records: &[NormalizedRecord], columns: &[Column]) -> TableView {
    let visible: Vec<Column> = columns
        .iter()
        .filter(|c| records.iter().any(|r| r.has(&c.field)))
        .cloned()
        .collect();

    let rows = records
        .iter()
        .map(|rec| {
            visible
                .iter()
                .map(|col| format_cell(col, rec.get(&col.field)))
                .collect()
        })
        .collect();

    TableView {
        columns: visible,
        rows,
    }
}

/// Auto-detect a column set for a collection with no configuration:
/// the union of non-identifier, non-internal field names in order of
/// first appearance, capped at [`MAX_AUTO_COLUMNS`].
///
/// Unlike the configured path, the resulting order depends on page
/// content.
pub fn auto_columns(records: &[NormalizedRecord]) -> Vec<Column> {
    let mut cols: Vec<Column> = Vec::new();
    'outer: for rec in records {
        for name in rec.field_names() {
            if name.starts_with('_') || schema::is_identifier_name(name) {
                continue;
            }
            if cols.iter().any(|c| c.field == name) {
                continue;
            }
            cols.push(Column::new(name, &label_for(name), CellFormat::Auto));
            if cols.len() == MAX_AUTO_COLUMNS {
                break 'outer;
            }
        }
    }
    cols
}

fn label_for(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

/// Format one cell. Total: every (format, value) combination yields a
/// string, in a fixed dispatch order — currency rule, missing sentinel,
/// then the column's formatter.
pub fn format_cell(column: &Column, value: &FieldValue) -> String {
    match (column.format, value) {
        (CellFormat::Currency, v) => format_currency(v),
        (_, v) if v.is_missing() => "-".to_string(),
        (CellFormat::Date, v) => match v.as_date() {
            Some(d) => format_date(d),
            None => coerce_text(v),
        },
        (CellFormat::DateTime, v) => match v.as_date() {
            Some(d) => format_date_time(d),
            None => coerce_text(v),
        },
        (CellFormat::Number, v) => match v.as_number() {
            Some(n) => format_number(n),
            None => coerce_text(v),
        },
        (CellFormat::Text, v) => coerce_text(v),
        (CellFormat::Auto, v) => auto_format(&column.field, v),
    }
}

fn auto_format(field: &str, value: &FieldValue) -> String {
    match value {
        FieldValue::Date(d) => format_date_time(*d),
        FieldValue::Number(n) if schema::is_currency_name(field) => {
            format_currency(&FieldValue::Number(*n))
        }
        FieldValue::Number(n) => format_number(*n),
        other => coerce_text(other),
    }
}

/// String coercion for anything without a dedicated formatter, with the
/// same truncation budget as the normalizer's summaries.
fn coerce_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Missing => "-".to_string(),
        FieldValue::Id(s) | FieldValue::Text(s) => truncate_text(s),
        FieldValue::Number(n) => format_number(*n),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Date(d) => format_date_time(*d),
    }
}

pub fn format_date(d: DateTime<Utc>) -> String {
    d.format("%d %b %Y").to_string()
}

pub fn format_date_time(d: DateTime<Utc>) -> String {
    d.format("%d %b %Y, %H:%M").to_string()
}

pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        group_digits(n as i64)
    } else {
        format!("{:.2}", n)
    }
}

/// Zero or absent renders as "Free"; anything else as a grouped number.
fn format_currency(value: &FieldValue) -> String {
    match value.as_number() {
        None => "Free".to_string(),
        Some(n) if n == 0.0 => "Free".to_string(),
        Some(n) => format_number(n),
    }
}

/// Thousands grouping without a locale dependency.
pub fn group_digits(n: i64) -> String {
    let negative = n < 0;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rec(fields: &[(&str, FieldValue)]) -> NormalizedRecord {
        let mut r = NormalizedRecord::new();
        for (name, value) in fields {
            r.set(*name, value.clone());
        }
        r
    }

    #[test]
    fn configured_columns_filter_to_present_fields() {
        let records = vec![
            rec(&[("name", FieldValue::Text("Squats".into()))]),
            rec(&[("level", FieldValue::Text("Beginner".into()))]),
        ];
        let columns = vec![
            Column::new("name", "Name", CellFormat::Text),
            Column::new("level", "Level", CellFormat::Text),
            Column::new("video", "Video", CellFormat::Text),
        ];
        let table = project(&records, &columns);
        let labels: Vec<_> = table.columns.iter().map(|c| c.label.as_str()).collect();
        // "video" is present in no record on this page and drops out
        assert_eq!(labels, vec!["Name", "Level"]);
        assert_eq!(table.rows[0], vec!["Squats", "-"]);
        assert_eq!(table.rows[1], vec!["-", "Beginner"]);
    }

    #[test]
    fn project_is_idempotent() {
        let records = vec![rec(&[
            ("steps", FieldValue::Number(12450.0)),
            ("user_name", FieldValue::Text("John Doe".into())),
        ])];
        let columns = vec![
            Column::new("user_name", "User", CellFormat::Text),
            Column::new("steps", "Steps", CellFormat::Number),
        ];
        let a = project(&records, &columns);
        let b = project(&records, &columns);
        assert_eq!(a, b);
    }

    #[test]
    fn auto_columns_cap_and_skip_identifiers() {
        let mut r = NormalizedRecord::new();
        r.set("_id", FieldValue::Id("x".into()));
        r.set("userId", FieldValue::Id("u".into()));
        for i in 0..8 {
            r.set(format!("field{}", i), FieldValue::Number(i as f64));
        }
        let cols = auto_columns(&[r]);
        assert_eq!(cols.len(), MAX_AUTO_COLUMNS);
        assert!(cols.iter().all(|c| c.field != "_id" && c.field != "userId"));
        // first-appearance order
        assert_eq!(cols[0].field, "field0");
    }

    #[test]
    fn auto_columns_union_across_records() {
        let a = rec(&[("name", FieldValue::Text("a".into()))]);
        let b = rec(&[
            ("name", FieldValue::Text("b".into())),
            ("level", FieldValue::Text("Beginner".into())),
        ]);
        let cols = auto_columns(&[a, b]);
        let fields: Vec<_> = cols.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "level"]);
    }

    #[test]
    fn format_cell_is_total_over_value_types() {
        let col = Column::new("anything", "Anything", CellFormat::Auto);
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let cases = [
            (FieldValue::Missing, "-".to_string()),
            (FieldValue::Id("a1".into()), "a1".to_string()),
            (FieldValue::Text("hello".into()), "hello".to_string()),
            (FieldValue::Number(12450.0), "12,450".to_string()),
            (FieldValue::Bool(true), "true".to_string()),
            (FieldValue::Date(date), "15 Jan 2024, 14:30".to_string()),
        ];
        for (value, expected) in cases {
            assert_eq!(format_cell(&col, &value), expected);
        }
    }

    #[test]
    fn date_columns_render_sentinel_not_debug_noise() {
        let col = Column::new("last_updated", "Last Updated", CellFormat::DateTime);
        let out = format_cell(&col, &FieldValue::Missing);
        assert_eq!(out, "-");
    }

    #[test]
    fn currency_rule() {
        let col = Column::new("price", "Price", CellFormat::Currency);
        assert_eq!(format_cell(&col, &FieldValue::Missing), "Free");
        assert_eq!(format_cell(&col, &FieldValue::Number(0.0)), "Free");
        assert_eq!(format_cell(&col, &FieldValue::Number(1499.0)), "1,499");
    }

    #[test]
    fn auto_format_treats_price_names_as_currency() {
        let col = Column::new("totalPrice", "TotalPrice", CellFormat::Auto);
        assert_eq!(format_cell(&col, &FieldValue::Number(0.0)), "Free");
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(8542), "8,542");
        assert_eq!(group_digits(1_248_000), "1,248,000");
        assert_eq!(group_digits(-12450), "-12,450");
    }

    #[test]
    fn fractional_numbers_keep_two_decimals() {
        assert_eq!(format_number(52.5), "52.50");
    }
}
