//! Store module for bill persistence
//!
//! Defines the store client contract used by the controllers and its
//! HTTP implementation.

mod bill_store;
mod http_store;

pub use bill_store::{BillStore, FileUpload, UploadedFile};
pub use http_store::HttpBillStore;
