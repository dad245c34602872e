//! Page markup rendering.
//!
//! Controllers never build markup themselves; they hand data to these views
//! and pass the result to whatever displays it.

pub mod engine;

pub use engine::{render_view, ViewError};

use minijinja::context;

use crate::features::bills::models::FormattedBill;

/// Modal body showing a bill proof image
pub fn render_preview(url: &str, width: u32) -> Result<String, ViewError> {
    render_view("preview.jinja", context! { url => url, width => width })
}

/// Error page with the failure text and an optional explanation
pub fn render_error(message: &str, explanation: Option<&str>) -> Result<String, ViewError> {
    render_view(
        "error.jinja",
        context! { message => message, explanation => explanation },
    )
}

pub fn render_loading() -> Result<String, ViewError> {
    render_view("loading.jinja", context! {})
}

/// Bills table, rows in the order given
pub fn render_bills(bills: &[FormattedBill]) -> Result<String, ViewError> {
    render_view("bills.jinja", context! { bills => bills })
}
