//! Viewer Page
//!
//! - GET / - Table, search boxes and chart, rendered from the query string

use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

use crate::api::dto::PageQuery;
use crate::api::state::AppState;
use crate::source::LoadStatus;
use crate::view::{render_page, update, Action, PageModel, ViewState};

/// GET /
///
/// Starts from the initial view state and replays the actions encoded in
/// the query string. A chart request for an unknown customer, or for all
/// customers before the dataset is loaded, is dropped and reported as a
/// notice.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let load = state.dataset.snapshot().await;
    let status = load.status();
    let mut view = ViewState::new(load.dataset());
    let mut palette = state.palette();
    let mut notice = None;

    for action in query.actions() {
        if matches!(action, Action::OpenAllChart) && status != LoadStatus::Ready {
            tracing::debug!(status = ?status, "All customers chart requested before load");
            notice = Some(unloaded_notice(status).to_string());
            continue;
        }

        match update(&view, action, &mut palette) {
            Ok(next) => view = next,
            Err(e) => {
                tracing::warn!(error = %e, "Chart request ignored");
                notice = Some(e.to_string());
            }
        }
    }

    Html(render_page(&PageModel {
        state: &view,
        status,
        notice,
        chart_script_url: &state.config.chart_script_url,
    }))
}

fn unloaded_notice(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Pending => "Data is still loading",
        LoadStatus::Ready | LoadStatus::Failed => "No data to chart",
    }
}
