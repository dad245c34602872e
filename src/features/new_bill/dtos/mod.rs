mod new_bill_dto;

pub use new_bill_dto::{FileSelection, NewBillForm, SelectedFile};
