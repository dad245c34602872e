use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::Result;
use crate::features::bills::models::{Bill, RawBill};

/// Binary attachment picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Store answer to an attachment upload. The upload allocates the bill id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    #[serde(alias = "key")]
    pub id: String,
    pub file_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Remote persistence for the "bills" resource.
///
/// Every call is attempted exactly once; implementations never retry.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Fetch all bills visible to the current user
    async fn list(&self) -> Result<Vec<RawBill>>;

    /// Upload an attachment on behalf of `email`, allocating a bill id
    async fn upload(&self, file: FileUpload, email: &str) -> Result<UploadedFile>;

    /// Create a bill record from scratch
    async fn create(&self, bill: &Bill) -> Result<RawBill>;

    /// Overwrite the bill identified by `id`
    async fn update(&self, id: &str, bill: &Bill) -> Result<RawBill>;
}
