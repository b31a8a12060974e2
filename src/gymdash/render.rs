//! Terminal rendering for [`ViewResult`]s.
//!
//! Layout math (widths, truncation, padding) is Unicode-aware and done
//! on plain strings; color is applied only after padding so it never
//! skews alignment.

use colored::*;
use unicode_width::UnicodeWidthStr;

use gymdash::api::{MessageLevel, StatCard, ViewMessage, ViewResult};
use gymdash::model::{StatValue, SummaryStats};
use gymdash::project::TableView;

const MAX_COL_WIDTH: usize = 40;
const BAR_WIDTH: usize = 32;

pub fn print_view(result: &ViewResult) {
    println!("{}", result.title.bold());
    println!();

    if !result.cards.is_empty() {
        print!("{}", render_cards(&result.cards));
        println!();
        print!("{}", render_bars(&result.summary));
    } else {
        if !result.summary.is_empty() {
            print!("{}", render_summary(&result.summary));
            println!();
        }
        if result.table.rows.is_empty() {
            println!("No records found.");
        } else {
            print!("{}", render_table(&result.table));
        }
    }

    print_messages(&result.messages);
}

pub fn print_messages(messages: &[ViewMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn render_cards(cards: &[StatCard]) -> String {
    let title_width = cards.iter().map(|c| c.title.width()).max().unwrap_or(0);
    let value_width = cards.iter().map(|c| c.value.width()).max().unwrap_or(0);

    let mut out = String::new();
    for card in cards {
        let title_pad = " ".repeat(title_width.saturating_sub(card.title.width()));
        let value_pad = " ".repeat(value_width.saturating_sub(card.value.width()));
        out.push_str(&format!(
            "  {}{}  {}{}  {}\n",
            card.title,
            title_pad,
            value_pad,
            card.value.bold(),
            card.description.dimmed()
        ));
    }
    out
}

pub fn render_summary(summary: &SummaryStats) -> String {
    let mut out = String::new();
    for (name, value) in summary.iter() {
        out.push_str(&format!("  {}: {}\n", name.dimmed(), value));
    }
    out
}

/// Horizontal bars scaled to the largest value, one per summary entry.
pub fn render_bars(summary: &SummaryStats) -> String {
    let numeric = |value: StatValue| match value {
        StatValue::Count(n) => n as f64,
        StatValue::Sum(x) => x,
    };
    let max = summary
        .iter()
        .map(|(_, v)| numeric(v))
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let label_width = summary.iter().map(|(n, _)| n.width()).max().unwrap_or(0);

    let mut out = String::new();
    for (name, value) in summary.iter() {
        let scaled = (numeric(value) / max * BAR_WIDTH as f64).round() as usize;
        // a non-zero value always gets a visible bar
        let len = if numeric(value) > 0.0 {
            scaled.max(1)
        } else {
            0
        };
        let pad = " ".repeat(label_width.saturating_sub(name.width()));
        out.push_str(&format!(
            "  {}{}  {}{}  {}\n",
            name,
            pad,
            "█".repeat(len),
            " ".repeat(BAR_WIDTH - len.min(BAR_WIDTH)),
            value
        ));
    }
    out
}

pub fn render_table(table: &TableView) -> String {
    let index_width = table.rows.len().to_string().width().max(1);

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.label.width()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.width());
            }
        }
    }
    for w in widths.iter_mut() {
        *w = (*w).min(MAX_COL_WIDTH);
    }

    let mut out = String::new();

    // header
    let mut header = format!("  {:>width$}", "#", width = index_width);
    for (col, w) in table.columns.iter().zip(&widths) {
        header.push_str("  ");
        header.push_str(&pad_to_width(&col.label, *w));
    }
    out.push_str(&format!("{}\n", header.trim_end().bold()));

    // separator
    let total: usize = 2 + index_width + widths.iter().map(|w| w + 2).sum::<usize>();
    out.push_str(&format!("  {}\n", "-".repeat(total.saturating_sub(2))));

    // rows
    for (i, row) in table.rows.iter().enumerate() {
        let mut line = format!("  {:>width$}", i + 1, width = index_width);
        for (cell, w) in row.iter().zip(&widths) {
            line.push_str("  ");
            line.push_str(&pad_to_width(cell, *w));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let pad = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(pad))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
