//! HTTP client for the bill store API
//!
//! | Method | Endpoint | Operation |
//! |--------|----------|-----------|
//! | GET | `/bills` | list |
//! | POST | `/bills` (multipart) | upload |
//! | POST | `/bills` (JSON) | create |
//! | PATCH | `/bills/{id}` | update |

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::core::config::StoreConfig;
use crate::core::error::{AppError, Result, StoreError};
use crate::features::bills::models::{Bill, RawBill};
use crate::modules::store::{BillStore, FileUpload, UploadedFile};

const REQUEST_ID_HEADER: &str = "x-request-id";
const EMAIL_HEADER: &str = "email";
const OCTET_STREAM: &str = "application/octet-stream";

/// Content type sent with an attachment.
///
/// Browsers leave the type blank for many files; the extension decides then.
fn upload_content_type(file: &FileUpload) -> &str {
    let declared = file.content_type.trim();
    if declared.contains('/') && !declared.contains(char::is_whitespace) {
        return declared;
    }

    let extension = file
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => OCTET_STREAM,
    }
}

pub struct HttpBillStore {
    client: Client,
    base_url: String,
    jwt: Option<String>,
}

impl HttpBillStore {
    pub fn new(config: &StoreConfig, jwt: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            jwt,
        })
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::now_v7().to_string();

        let mut builder = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, &request_id);

        if let Some(jwt) = &self.jwt {
            builder = builder.bearer_auth(jwt);
        }

        (builder, request_id)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        request_id: &str,
        operation: &str,
    ) -> Result<T> {
        let response = builder.send().await.map_err(|e| {
            error!("Store {} failed (request_id={}): {}", operation, request_id, e);
            StoreError::network(format!("Failed to reach bill store: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Store {} error (request_id={}): HTTP {} - {}",
                operation, request_id, status, body
            );
            return Err(StoreError::http(status.as_u16()).into());
        }

        response.json::<T>().await.map_err(|e| {
            error!(
                "Failed to parse store {} response (request_id={}): {}",
                operation, request_id, e
            );
            StoreError::decode(format!("Failed to parse {} response: {}", operation, e)).into()
        })
    }
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn list(&self) -> Result<Vec<RawBill>> {
        let (builder, request_id) = self.request(Method::GET, "/bills");
        debug!("Listing bills (request_id={})", request_id);

        let bills: Vec<RawBill> = self.send(builder, &request_id, "list").await?;
        debug!("Store returned {} bills", bills.len());
        Ok(bills)
    }

    async fn upload(&self, file: FileUpload, email: &str) -> Result<UploadedFile> {
        let content_type = upload_content_type(&file).to_string();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&content_type)
            .map_err(|e| AppError::Validation(format!("Invalid content type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("email", email.to_string());

        let (builder, request_id) = self.request(Method::POST, "/bills");
        let builder = builder.header(EMAIL_HEADER, email);
        debug!(
            "Uploading attachment {} for {} (request_id={})",
            file.file_name, email, request_id
        );

        let uploaded: UploadedFile = self
            .send(builder.multipart(form), &request_id, "upload")
            .await?;

        info!("Attachment uploaded: id={}, url={}", uploaded.id, uploaded.file_url);
        Ok(uploaded)
    }

    async fn create(&self, bill: &Bill) -> Result<RawBill> {
        let (builder, request_id) = self.request(Method::POST, "/bills");
        debug!("Creating bill for {} (request_id={})", bill.email, request_id);

        let created: RawBill = self.send(builder.json(bill), &request_id, "create").await?;
        info!("Bill created: id={}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &str, bill: &Bill) -> Result<RawBill> {
        let path = format!("/bills/{}", urlencoding::encode(id));
        let (builder, request_id) = self.request(Method::PATCH, &path);
        debug!("Updating bill {} (request_id={})", id, request_id);

        let updated: RawBill = self.send(builder.json(bill), &request_id, "update").await?;
        info!("Bill updated: id={}", updated.id);
        Ok(updated)
    }
}
