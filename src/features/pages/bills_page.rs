use std::cmp::Reverse;
use tracing::{info, warn};

use crate::core::error::{AppError, Result, StoreErrorCode};
use crate::features::bills::models::FormattedBill;
use crate::features::bills::BillsController;
use crate::shared::constants::{
    EXPLANATION_DECODE, EXPLANATION_NETWORK, EXPLANATION_NOT_FOUND, EXPLANATION_SERVER,
    EXPLANATION_UNAUTHORIZED,
};
use crate::shared::views::{render_bills, render_error, render_loading};

/// What the employee bills route currently displays
#[derive(Debug, Clone)]
pub enum Page {
    Loading,
    Bills(Vec<FormattedBill>),
    Error(ErrorPage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    /// Failure text shown as is, e.g. `Erreur 404`
    pub message: String,
    pub code: Option<StoreErrorCode>,
}

impl ErrorPage {
    /// Canned explanation for the failure, when one applies
    pub fn explanation(&self) -> Option<&'static str> {
        match self.code? {
            StoreErrorCode::NotFound => Some(EXPLANATION_NOT_FOUND),
            StoreErrorCode::Server(_) => Some(EXPLANATION_SERVER),
            StoreErrorCode::Http(401 | 403) => Some(EXPLANATION_UNAUTHORIZED),
            StoreErrorCode::Http(_) => None,
            StoreErrorCode::Network => Some(EXPLANATION_NETWORK),
            StoreErrorCode::Decode => Some(EXPLANATION_DECODE),
        }
    }
}

impl From<&AppError> for ErrorPage {
    fn from(e: &AppError) -> Self {
        Self {
            message: e.to_string(),
            code: e.store_code(),
        }
    }
}

/// Load the bills page: one fetch, rows newest first.
///
/// Bills whose date could not be parsed go last, in store order.
pub async fn bootstrap_bills_page(controller: &BillsController) -> Page {
    match controller.fetch_and_format_bills().await {
        Ok(mut bills) => {
            // Stable sort keeps store order among equal or missing dates
            bills.sort_by_key(|b| (b.sort_date.is_none(), Reverse(b.sort_date)));
            let degraded = bills.iter().filter(|b| b.is_degraded()).count();
            if degraded > 0 {
                warn!("{} bills shown with raw values", degraded);
            }
            info!("Bills page ready with {} rows", bills.len());
            Page::Bills(bills)
        }
        Err(e) => {
            warn!("Bills page failed to load: {}", e);
            Page::Error(ErrorPage::from(&e))
        }
    }
}

pub fn render_page(page: &Page) -> Result<String> {
    let html = match page {
        Page::Loading => render_loading()?,
        Page::Bills(bills) => render_bills(bills)?,
        Page::Error(error) => render_error(&error.message, error.explanation())?,
    };
    Ok(html)
}
