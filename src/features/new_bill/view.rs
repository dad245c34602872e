/// Display side of the new bill form
pub trait NewBillView: Send + Sync {
    /// Set the native validation message of the file input; empty clears it
    fn set_file_validity(&self, message: &str);

    /// Reset the file input value
    fn clear_file_input(&self);
}

/// View used when no screen is attached: validity messages are logged
pub struct HeadlessNewBillView;

impl NewBillView for HeadlessNewBillView {
    fn set_file_validity(&self, message: &str) {
        if !message.is_empty() {
            tracing::warn!("File input invalid: {}", message);
        }
    }

    fn clear_file_input(&self) {
        tracing::debug!("File input cleared");
    }
}
