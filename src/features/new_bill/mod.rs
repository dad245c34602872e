//! New bill form.
//!
//! A bill is written in two steps against the same store record: picking a
//! proof image uploads it and allocates the bill id, then submitting the form
//! completes the record and returns to the bills page.

pub mod controller;
pub mod dtos;
pub mod models;
pub mod view;

pub use controller::NewBillController;
pub use view::{HeadlessNewBillView, NewBillView};
