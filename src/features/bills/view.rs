use crate::features::bills::models::FormattedBill;

/// Display side of the bills page
pub trait BillsView: Send + Sync {
    /// Current width of the preview modal in pixels
    fn modal_width(&self) -> u32;

    /// Fill the preview modal with `body_html` and show it
    fn show_preview(&self, body_html: &str);
}

/// Attachment referenced by a row's preview affordance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewTarget {
    pub bill_url: Option<String>,
    pub file_name: Option<String>,
}

impl From<&FormattedBill> for PreviewTarget {
    fn from(bill: &FormattedBill) -> Self {
        Self {
            bill_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        }
    }
}

/// View used when no screen is attached: the modal body goes to stdout
pub struct HeadlessBillsView {
    pub width: u32,
}

impl BillsView for HeadlessBillsView {
    fn modal_width(&self) -> u32 {
        self.width
    }

    fn show_preview(&self, body_html: &str) {
        tracing::debug!("Showing preview modal ({} px)", self.width);
        println!("{}", body_html);
    }
}
