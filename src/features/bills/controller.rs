use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::core::error::{AppError, Result};
use crate::core::router::{Navigator, Route};
use crate::features::bills::formatter;
use crate::features::bills::models::FormattedBill;
use crate::features::bills::view::{BillsView, PreviewTarget};
use crate::modules::store::BillStore;
use crate::shared::constants::PREVIEW_WIDTH_RATIO;
use crate::shared::validation::PREVIEWABLE_IMAGE_REGEX;
use crate::shared::views::render_preview;

/// Controller behind the employee bills page
pub struct BillsController {
    store: Arc<dyn BillStore>,
    navigator: Arc<dyn Navigator>,
    view: Arc<dyn BillsView>,
}

impl BillsController {
    pub fn new(
        store: Arc<dyn BillStore>,
        navigator: Arc<dyn Navigator>,
        view: Arc<dyn BillsView>,
    ) -> Self {
        Self {
            store,
            navigator,
            view,
        }
    }

    /// "New bill" button: go to the new bill form. Never touches the store.
    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Eye icon of a row: show the bill proof in the preview modal.
    ///
    /// No network call is made; the URL is expected to be resolvable as is.
    pub fn handle_click_icon_eye(&self, target: &PreviewTarget) -> Result<()> {
        let url = target
            .bill_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty() && *u != "null")
            .ok_or_else(|| {
                warn!("Preview requested for a bill without attachment");
                AppError::Validation("Bill has no attachment".to_string())
            })?;

        let resolved = resolve_preview_url(url, target.file_name.as_deref());
        let width = (self.view.modal_width() as f64 * PREVIEW_WIDTH_RATIO).floor() as u32;
        let body = render_preview(&resolved, width)?;

        debug!("Showing preview for {}", resolved);
        self.view.show_preview(&body);
        Ok(())
    }

    /// Fetch every bill from the store and format it for display.
    ///
    /// A bill that cannot be formatted is returned with its raw values, so
    /// the result always has as many entries as the store returned. Store
    /// failures propagate; nothing is retried.
    pub async fn fetch_and_format_bills(&self) -> Result<Vec<FormattedBill>> {
        let raw_bills = self.store.list().await.map_err(|e| {
            error!("Failed to fetch bills: {}", e);
            e
        })?;

        let bills: Vec<FormattedBill> = raw_bills
            .into_iter()
            .map(|raw| match formatter::format(&raw) {
                Ok(bill) => bill,
                Err(e) => {
                    warn!("Bill {} kept unformatted: {}", raw.id, e);
                    formatter::format_degraded(raw)
                }
            })
            .collect();

        info!("Fetched {} bills", bills.len());
        Ok(bills)
    }
}

/// Pick the URL to preview.
///
/// When the URL path has no image extension but the file name has one, the
/// file name replaces the last path segment (query kept). Otherwise the URL
/// is used unchanged.
pub fn resolve_preview_url(url: &str, file_name: Option<&str>) -> String {
    let split = url.find(['?', '#']).unwrap_or(url.len());
    let (path, suffix) = url.split_at(split);

    if PREVIEWABLE_IMAGE_REGEX.is_match(path) {
        return url.to_string();
    }

    let Some(name) = file_name.filter(|n| PREVIEWABLE_IMAGE_REGEX.is_match(n)) else {
        return url.to_string();
    };

    let authority_start = path.find("://").map(|i| i + 3).unwrap_or(0);
    let directory = match path[authority_start..].rfind('/') {
        Some(i) => path[..authority_start + i + 1].to_string(),
        None => format!("{}/", path),
    };

    format!("{}{}{}", directory, urlencoding::encode(name), suffix)
}
