pub mod bills_page;

pub use bills_page::{bootstrap_bills_page, render_page, ErrorPage, Page};
