mod bill;

pub use bill::{
    Attachment, Bill, BillStatus, ExpenseType, FormattedBill, RawBill, DEFAULT_PCT,
};
