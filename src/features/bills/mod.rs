//! Employee bills page.
//!
//! Lists the connected employee's bills, formatted for display, and reacts
//! to the page affordances: the "new bill" button and each row's preview icon.

pub mod controller;
pub mod formatter;
pub mod models;
pub mod view;

pub use controller::BillsController;
pub use view::{BillsView, HeadlessBillsView, PreviewTarget};
