#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::{Fake, Faker};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::core::error::{Result, StoreError};
use crate::core::router::{Navigator, Route};
use crate::features::bills::models::{
    Attachment, Bill, BillStatus, ExpenseType, RawBill, DEFAULT_PCT,
};
use crate::features::bills::view::BillsView;
use crate::features::new_bill::view::NewBillView;
use crate::modules::store::{BillStore, FileUpload, UploadedFile};

pub const TEST_EMAIL: &str = "test@test.com";
pub const TEST_FILE_URL: &str = "https://localhost:3456/images/test.jpg";

fn raw_bill(
    id: &str,
    expense_type: &str,
    name: &str,
    amount: i64,
    date: &str,
    status: &str,
    file_name: &str,
) -> RawBill {
    RawBill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: expense_type.to_string(),
        name: Some(name.to_string()),
        amount: Some(amount),
        date: date.to_string(),
        vat: Some("80".to_string()),
        pct: Some(20),
        commentary: Some("séminaire billed".to_string()),
        comment_admin: None,
        file_url: Some(format!("https://test.storage.tld/v0/b/billable/{}", file_name)),
        file_name: Some(file_name.to_string()),
        status: status.to_string(),
    }
}

/// The four bills the mock store serves, "encore" first
pub fn fixture_bills() -> Vec<RawBill> {
    vec![
        raw_bill(
            "47qAXb6fIm2zOKkLzMro",
            "Hôtel et logement",
            "encore",
            400,
            "2004-04-04",
            "pending",
            "preview-facture-free-201801-pdf-1.jpg",
        ),
        raw_bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "Transports",
            "test1",
            100,
            "2001-01-01",
            "refused",
            "1592770761.jpeg",
        ),
        raw_bill(
            "UIUZtnPQvnbFnB0ozvJh",
            "Services en ligne",
            "test3",
            300,
            "2003-03-03",
            "accepted",
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
        ),
        raw_bill(
            "qcCK3SzECmaZAGRrHjaC",
            "Restaurants et bars",
            "test2",
            200,
            "2002-02-02",
            "refused",
            "preview-facture-free-201801-pdf-1.jpg",
        ),
    ]
}

/// Random bills; roughly one in four carries a corrupted date or status
pub fn fake_bills(count: usize) -> Vec<RawBill> {
    (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(
                (1990..2030).fake::<i32>(),
                (1..13).fake::<u32>(),
                (1..29).fake::<u32>(),
            )
            .unwrap();
            let corrupt = (0..4).fake::<u8>() == 0;
            RawBill {
                id: format!("fake-{}", i),
                email: SafeEmail().fake(),
                expense_type: ExpenseType::ALL[(0..7).fake::<usize>()].to_string(),
                name: Some(Word().fake()),
                amount: Some((0..10_000).fake::<i64>()),
                date: if corrupt && Faker.fake::<bool>() {
                    Word().fake()
                } else {
                    date.format("%Y-%m-%d").to_string()
                },
                vat: None,
                pct: Some(20),
                commentary: None,
                comment_admin: None,
                file_url: None,
                file_name: None,
                status: if corrupt {
                    "unknown".to_string()
                } else {
                    ["pending", "accepted", "refused"][(0..3).fake::<usize>()].to_string()
                },
            }
        })
        .collect()
}

/// Bill as the new bill form assembles it after a successful upload
pub fn sample_bill() -> Bill {
    Bill {
        id: None,
        email: TEST_EMAIL.to_string(),
        expense_type: ExpenseType::Transports,
        name: "Billet de train".to_string(),
        amount: 100,
        date: NaiveDate::from_ymd_opt(2024, 11, 27).unwrap(),
        vat: "20".to_string(),
        pct: DEFAULT_PCT,
        commentary: "Trajet client".to_string(),
        attachment: Some(Attachment {
            file_url: TEST_FILE_URL.to_string(),
            file_name: "test.jpg".to_string(),
        }),
        status: BillStatus::Pending,
    }
}

fn echo(id: &str, bill: &Bill) -> RawBill {
    let mut value = serde_json::to_value(bill).unwrap();
    value["id"] = serde_json::Value::String(id.to_string());
    serde_json::from_value(value).unwrap()
}

/// In-memory store recording every call
pub struct MockBillStore {
    list_response: std::result::Result<Vec<RawBill>, StoreError>,
    upload_error: Option<StoreError>,
    write_error: Option<StoreError>,
    write_gate: Option<Arc<Notify>>,
    pub list_calls: AtomicUsize,
    pub uploads: Mutex<Vec<(FileUpload, String)>>,
    pub creates: Mutex<Vec<Bill>>,
    pub updates: Mutex<Vec<(String, Bill)>>,
}

impl MockBillStore {
    pub fn new() -> Self {
        Self::with_bills(fixture_bills())
    }

    pub fn with_bills(bills: Vec<RawBill>) -> Self {
        Self {
            list_response: Ok(bills),
            upload_error: None,
            write_error: None,
            write_gate: None,
            list_calls: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
            creates: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_list(error: StoreError) -> Self {
        Self {
            list_response: Err(error),
            ..Self::new()
        }
    }

    pub fn with_upload_error(mut self, error: StoreError) -> Self {
        self.upload_error = Some(error);
        self
    }

    /// Make create and update reject
    pub fn with_write_error(mut self, error: StoreError) -> Self {
        self.write_error = Some(error);
        self
    }

    /// Hold create and update until the gate is notified
    pub fn with_write_gate(mut self, gate: Arc<Notify>) -> Self {
        self.write_gate = Some(gate);
        self
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn create_count(&self) -> usize {
        self.creates.lock().unwrap().len()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.write_gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl BillStore for MockBillStore {
    async fn list(&self) -> Result<Vec<RawBill>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_response.clone().map_err(Into::into)
    }

    async fn upload(&self, file: FileUpload, email: &str) -> Result<UploadedFile> {
        let file_name = file.file_name.clone();
        self.uploads
            .lock()
            .unwrap()
            .push((file, email.to_string()));

        if let Some(e) = &self.upload_error {
            return Err(e.clone().into());
        }

        Ok(UploadedFile {
            id: "1234".to_string(),
            file_url: format!("https://localhost:3456/images/{}", file_name),
            file_name: None,
        })
    }

    async fn create(&self, bill: &Bill) -> Result<RawBill> {
        self.creates.lock().unwrap().push(bill.clone());
        self.wait_for_gate().await;

        if let Some(e) = &self.write_error {
            return Err(e.clone().into());
        }
        Ok(echo("5678", bill))
    }

    async fn update(&self, id: &str, bill: &Bill) -> Result<RawBill> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), bill.clone()));
        self.wait_for_gate().await;

        if let Some(e) = &self.write_error {
            return Err(e.clone().into());
        }
        Ok(echo(id, bill))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub struct RecordingBillsView {
    pub width: u32,
    previews: Mutex<Vec<String>>,
}

impl RecordingBillsView {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            previews: Mutex::new(Vec::new()),
        }
    }

    pub fn previews(&self) -> Vec<String> {
        self.previews.lock().unwrap().clone()
    }
}

impl BillsView for RecordingBillsView {
    fn modal_width(&self) -> u32 {
        self.width
    }

    fn show_preview(&self, body_html: &str) {
        self.previews.lock().unwrap().push(body_html.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNewBillView {
    validity: Mutex<Option<String>>,
    clears: AtomicUsize,
}

impl RecordingNewBillView {
    /// Last validation message set on the file input
    pub fn validation_message(&self) -> Option<String> {
        self.validity.lock().unwrap().clone()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl NewBillView for RecordingNewBillView {
    fn set_file_validity(&self, message: &str) {
        *self.validity.lock().unwrap() = Some(message.to_string());
    }

    fn clear_file_input(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}
