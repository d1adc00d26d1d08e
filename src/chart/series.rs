//! Chart series handed to the line-chart renderer
//!
//! Field names follow the renderer's data format (`labels`, `datasets`,
//! `backgroundColor`, ...), so a series serializes straight into it.

use serde::Serialize;

/// Labels for the x-axis plus one dataset per line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// X-axis labels (transaction dates)
    pub labels: Vec<String>,
    /// One entry per plotted line
    pub datasets: Vec<ChartDataset>,
}

/// A single plotted line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    /// Legend label (customer name)
    pub label: String,
    /// Values positionally aligned with `ChartSeries::labels`; `None` is a gap
    pub data: Vec<Option<f64>>,
    pub fill: bool,
    pub background_color: String,
    pub border_color: String,
}

impl ChartSeries {
    /// Whether every dataset has exactly one value per label
    pub fn is_aligned(&self) -> bool {
        self.datasets
            .iter()
            .all(|d| d.data.len() == self.labels.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_field_names() {
        let series = ChartSeries {
            labels: vec!["2023-01-01".to_string()],
            datasets: vec![ChartDataset {
                label: "Ann".to_string(),
                data: vec![Some(5.0), None],
                fill: false,
                background_color: "#000".to_string(),
                border_color: "#fff".to_string(),
            }],
        };

        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["datasets"][0]["backgroundColor"], "#000");
        assert_eq!(json["datasets"][0]["borderColor"], "#fff");
        assert_eq!(json["datasets"][0]["data"][1], serde_json::Value::Null);
        assert!(!series.is_aligned());
    }
}
