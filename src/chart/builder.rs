//! Chart-series construction
//!
//! Series are always built from the full dataset, independent of any
//! active filter.

use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::palette::Palette;
use super::series::{ChartDataset, ChartSeries};
use crate::dataset::{CustomerId, Dataset};

const SINGLE_BACKGROUND: &str = "rgba(75, 192, 192, 0.4)";
const SINGLE_BORDER: &str = "rgba(75, 192, 192, 1)";

/// Errors from chart construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// No customer with this id in the full dataset
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),
}

/// Series for one customer: its transaction amounts over their dates
///
/// Labels and values are taken pairwise from the stored transactions, so
/// they stay aligned by index.
pub fn build_single(dataset: &Dataset, id: &CustomerId) -> Result<ChartSeries, ChartError> {
    let customer = dataset
        .find(id)
        .ok_or_else(|| ChartError::CustomerNotFound(id.clone()))?;

    let (labels, data) = customer
        .transactions
        .iter()
        .map(|t| (t.date.clone(), Some(t.amount)))
        .unzip();

    Ok(ChartSeries {
        labels,
        datasets: vec![ChartDataset {
            label: customer.name().to_string(),
            data,
            fill: false,
            background_color: SINGLE_BACKGROUND.to_string(),
            border_color: SINGLE_BORDER.to_string(),
        }],
    })
}

/// Series for every customer over a shared date axis
///
/// The axis holds each distinct transaction date once, in chronological
/// order. A customer's value at a date is the sum of its amounts on that
/// date, or `None` when it has none, so every dataset has one entry per
/// label.
pub fn build_all(dataset: &Dataset, palette: &mut Palette) -> ChartSeries {
    let mut seen = HashSet::new();
    let mut axis: Vec<&str> = dataset
        .customers()
        .iter()
        .flat_map(|c| c.transactions.iter().map(|t| t.date.as_str()))
        .filter(|date| seen.insert(*date))
        .collect();
    axis.sort_by(|a, b| compare_dates(a, b));

    let position: HashMap<&str, usize> = axis.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    let colors = palette.colors(dataset.len());

    let datasets = dataset
        .customers()
        .iter()
        .zip(colors)
        .map(|(customer, color)| {
            let mut data: Vec<Option<f64>> = vec![None; axis.len()];
            for transaction in &customer.transactions {
                let slot = &mut data[position[transaction.date.as_str()]];
                *slot = Some(slot.unwrap_or(0.0) + transaction.amount);
            }

            ChartDataset {
                label: customer.name().to_string(),
                data,
                fill: false,
                background_color: color.background,
                border_color: color.border,
            }
        })
        .collect();

    ChartSeries {
        labels: axis.into_iter().map(str::to_string).collect(),
        datasets,
    }
}

/// Chronological order for parseable dates, which sort before
/// unparseable ones; ties fall back to the raw text
fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
