pub mod bills;
pub mod new_bill;
pub mod pages;
