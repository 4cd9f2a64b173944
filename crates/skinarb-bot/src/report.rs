//! Deal report rendering.
//!
//! The table mirrors a console table: an index column followed by name,
//! 500Casino price, CSFloat price and discount.

use crate::error::AppResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skinarb_detector::{Deal, DealRecord};

/// Message printed when the comparison found nothing.
pub const NO_DEALS_MESSAGE: &str = "No deals found.";

const TABLE_HEADERS: [&str; 5] = ["(index)", "name", "price_a", "price_b", "discount"];

/// Report output format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Single JSON document.
    Json,
}

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct DealReport {
    /// All deals, best discount first.
    pub deals: Vec<Deal>,
    /// Listings fetched from 500Casino.
    pub listings_a: usize,
    /// Listings fetched from CSFloat.
    pub listings_b: usize,
    pub generated_at: DateTime<Utc>,
}

/// JSON shape of a report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub generated_at: DateTime<Utc>,
    pub listings_a: usize,
    pub listings_b: usize,
    pub total_deals: usize,
    pub deals: Vec<DealRecord>,
}

impl DealReport {
    pub fn new(deals: Vec<Deal>, listings_a: usize, listings_b: usize) -> Self {
        Self {
            deals,
            listings_a,
            listings_b,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Best `n` deals.
    pub fn top(&self, n: usize) -> &[Deal] {
        &self.deals[..n.min(self.deals.len())]
    }

    pub fn render(&self, format: OutputFormat, top_n: usize) -> AppResult<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table(top_n)),
            OutputFormat::Json => self.render_json(top_n),
        }
    }

    /// Render the best `top_n` deals as a table, or the no-deals message.
    pub fn render_table(&self, top_n: usize) -> String {
        if self.is_empty() {
            return NO_DEALS_MESSAGE.to_string();
        }

        let rows: Vec<[String; 5]> = self
            .top(top_n)
            .iter()
            .enumerate()
            .map(|(idx, deal)| {
                let record = deal.to_record();
                [
                    idx.to_string(),
                    record.name,
                    record.price_a,
                    record.price_b,
                    record.discount,
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = format!(
            "Found {} deal(s), showing top {}\n",
            self.deals.len(),
            rows.len()
        );
        out.push_str(&border('┌', '┬', '┐', &widths));
        out.push_str(&table_row(&TABLE_HEADERS.map(str::to_string), &widths));
        out.push_str(&border('├', '┼', '┤', &widths));
        for row in &rows {
            out.push_str(&table_row(row, &widths));
        }
        out.push_str(&border('└', '┴', '┘', &widths));
        out
    }

    /// Render the best `top_n` deals as a JSON document.
    pub fn render_json(&self, top_n: usize) -> AppResult<String> {
        let report = JsonReport {
            generated_at: self.generated_at,
            listings_a: self.listings_a,
            listings_b: self.listings_b,
            total_deals: self.deals.len(),
            deals: self.top(top_n).iter().map(DealRecord::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

fn border(left: char, mid: char, right: char, widths: &[usize; 5]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&mid.to_string()))
}

fn table_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!(" {cell}{} ", " ".repeat(pad))
        })
        .collect();
    format!("│{}│\n", padded.join("│"))
}
