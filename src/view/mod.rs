//! Viewer page
//!
//! - [`ViewState`] and [`update`]: explicit page state and its transitions
//! - [`render_page`]: HTML projection of a state

mod render;
mod state;

pub use render::{escape_html, page_href, render_page, PageModel};
pub use state::{update, Action, ActiveChart, ViewError, ViewState};
