//! View State
//!
//! Everything the page shows, as one value. User actions go through
//! [`update`], which returns a new state and leaves the old one untouched;
//! rendering is a projection of the result.

use std::sync::Arc;
use thiserror::Error;

use crate::chart::{build_all, build_single, ChartError, ChartSeries, Palette};
use crate::dataset::{CustomerId, CustomerWithTransactions, Dataset};
use crate::filter::Filter;

/// The chart currently on screen
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActiveChart {
    #[default]
    Closed,
    /// One customer's transactions
    Single {
        customer_id: CustomerId,
        series: ChartSeries,
    },
    /// All customers on a shared axis
    All { series: ChartSeries },
}

impl ActiveChart {
    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            ActiveChart::Closed => None,
            ActiveChart::Single { series, .. } | ActiveChart::All { series } => Some(series),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ActiveChart::Closed)
    }
}

/// User actions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Typing in the name box
    FilterByName(String),
    /// Typing in the amount box
    FilterByAmount(String),
    /// Reset both boxes, the filtered view and the chart
    Clear,
    /// Row chart button
    OpenChart(CustomerId),
    /// "All customers" chart button
    OpenAllChart,
    /// Chart dismiss button
    CloseChart,
}

/// Errors from applying an action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Chart requested for an id absent from the full dataset
    #[error("No customer with id {0}")]
    LookupMiss(CustomerId),
}

impl From<ChartError> for ViewError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::CustomerNotFound(id) => ViewError::LookupMiss(id),
        }
    }
}

/// Page state
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    dataset: Arc<Dataset>,
    filter: Filter,
    filtered: Vec<CustomerWithTransactions>,
    name_query: String,
    amount_query: String,
    active_chart: ActiveChart,
}

impl ViewState {
    /// Initial state: everything shown, no chart
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filtered = dataset.customers().to_vec();
        Self {
            dataset,
            filter: Filter::All,
            filtered,
            name_query: String::new(),
            amount_query: String::new(),
            active_chart: ActiveChart::Closed,
        }
    }

    /// The full dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Customers currently shown in the table
    pub fn filtered(&self) -> &[CustomerWithTransactions] {
        &self.filtered
    }

    pub fn name_query(&self) -> &str {
        &self.name_query
    }

    pub fn amount_query(&self) -> &str {
        &self.amount_query
    }

    pub fn active_chart(&self) -> &ActiveChart {
        &self.active_chart
    }
}

/// Apply one action
///
/// On `Err` the caller keeps `state`; a missing customer never produces an
/// empty chart.
pub fn update(
    state: &ViewState,
    action: Action,
    palette: &mut Palette,
) -> Result<ViewState, ViewError> {
    let mut next = state.clone();

    match action {
        Action::FilterByName(query) => {
            next.filter = Filter::Name(query.clone());
            next.name_query = query;
            next.filtered = next.filter.apply(&next.dataset);
        }
        Action::FilterByAmount(query) => {
            next.filter = Filter::AmountPrefix(query.clone());
            next.amount_query = query;
            next.filtered = next.filter.apply(&next.dataset);
        }
        Action::Clear => {
            next.filter = Filter::All;
            next.name_query.clear();
            next.amount_query.clear();
            next.filtered = next.dataset.customers().to_vec();
            next.active_chart = ActiveChart::Closed;
        }
        Action::OpenChart(customer_id) => {
            let series = build_single(&state.dataset, &customer_id)?;
            next.active_chart = ActiveChart::Single {
                customer_id,
                series,
            };
        }
        Action::OpenAllChart => {
            next.active_chart = ActiveChart::All {
                series: build_all(&state.dataset, palette),
            };
        }
        Action::CloseChart => {
            next.active_chart = ActiveChart::Closed;
        }
    }

    Ok(next)
}
