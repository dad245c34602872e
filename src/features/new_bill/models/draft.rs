use chrono::NaiveDate;

use crate::features::bills::models::{Attachment, Bill, BillStatus, ExpenseType};

/// Attachment hosted by the store, with the bill id its upload allocated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAttachment {
    pub bill_id: String,
    pub attachment: Attachment,
}

/// Typed form values
#[derive(Debug, Clone, PartialEq)]
pub struct BillDetails {
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: u32,
    pub date: NaiveDate,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
}

/// Bill assembled by the form but not yet accepted by the store
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    pub email: String,
    pub details: BillDetails,
    pub upload: Option<UploadedAttachment>,
}

impl BillDraft {
    /// Id allocated by a prior upload, if any
    pub fn bill_id(&self) -> Option<&str> {
        self.upload.as_ref().map(|u| u.bill_id.as_str())
    }

    /// Record to push to the store, always `pending`
    pub fn to_bill(&self) -> Bill {
        let d = &self.details;
        Bill {
            id: None,
            email: self.email.clone(),
            expense_type: d.expense_type,
            name: d.name.clone(),
            amount: d.amount,
            date: d.date,
            vat: d.vat.clone(),
            pct: d.pct,
            commentary: d.commentary.clone(),
            attachment: self.upload.as_ref().map(|u| u.attachment.clone()),
            status: BillStatus::Pending,
        }
    }
}

/// Bill accepted by the store. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedBill {
    bill: Bill,
}

impl SubmittedBill {
    pub fn new(id: String, mut bill: Bill) -> Self {
        bill.id = Some(id);
        Self { bill }
    }

    pub fn id(&self) -> &str {
        self.bill.id.as_deref().unwrap_or_default()
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }
}

/// Observable phase of a new bill form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    Empty,
    Uploaded,
    Submitting,
    Submitted,
}

/// Draft lifecycle: `Empty -> Uploaded -> Submitting -> Submitted`.
/// A failed submission returns to the phase it started from.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftState {
    Empty,
    Uploaded(UploadedAttachment),
    Submitting(Option<UploadedAttachment>),
    Submitted(SubmittedBill),
}

impl DraftState {
    pub fn phase(&self) -> DraftPhase {
        match self {
            DraftState::Empty => DraftPhase::Empty,
            DraftState::Uploaded(_) => DraftPhase::Uploaded,
            DraftState::Submitting(_) => DraftPhase::Submitting,
            DraftState::Submitted(_) => DraftPhase::Submitted,
        }
    }

    /// State to return to when a submission started from `upload` fails
    pub fn before_submit(upload: Option<UploadedAttachment>) -> Self {
        match upload {
            Some(u) => DraftState::Uploaded(u),
            None => DraftState::Empty,
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        match self {
            DraftState::Empty | DraftState::Submitting(None) => None,
            DraftState::Uploaded(u) | DraftState::Submitting(Some(u)) => Some(&u.attachment),
            DraftState::Submitted(s) => s.bill().attachment.as_ref(),
        }
    }

    pub fn bill_id(&self) -> Option<&str> {
        match self {
            DraftState::Empty | DraftState::Submitting(None) => None,
            DraftState::Uploaded(u) | DraftState::Submitting(Some(u)) => Some(&u.bill_id),
            DraftState::Submitted(s) => Some(s.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> BillDetails {
        BillDetails {
            expense_type: ExpenseType::Transports,
            name: "Billet de train".to_string(),
            amount: 100,
            date: NaiveDate::from_ymd_opt(2024, 11, 27).unwrap(),
            vat: "20".to_string(),
            pct: 20,
            commentary: String::new(),
        }
    }

    fn upload() -> UploadedAttachment {
        UploadedAttachment {
            bill_id: "1234".to_string(),
            attachment: Attachment {
                file_url: "https://localhost:3456/images/test.jpg".to_string(),
                file_name: "test.jpg".to_string(),
            },
        }
    }

    #[test]
    fn test_draft_to_bill_is_pending() {
        let draft = BillDraft {
            email: "test@test.com".to_string(),
            details: details(),
            upload: Some(upload()),
        };

        let bill = draft.to_bill();
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.email, "test@test.com");
        assert_eq!(draft.bill_id(), Some("1234"));
        assert_eq!(bill.attachment.unwrap().file_name, "test.jpg");
    }

    #[test]
    fn test_draft_without_upload() {
        let draft = BillDraft {
            email: "test@test.com".to_string(),
            details: details(),
            upload: None,
        };
        assert_eq!(draft.bill_id(), None);
        assert!(draft.to_bill().attachment.is_none());
    }

    #[test]
    fn test_state_accessors() {
        let state = DraftState::Uploaded(upload());
        assert_eq!(state.phase(), DraftPhase::Uploaded);
        assert_eq!(state.bill_id(), Some("1234"));
        assert_eq!(
            state.attachment().map(|a| a.file_url.as_str()),
            Some("https://localhost:3456/images/test.jpg")
        );

        assert_eq!(DraftState::before_submit(None), DraftState::Empty);
        assert_eq!(
            DraftState::before_submit(Some(upload())).phase(),
            DraftPhase::Uploaded
        );
        assert!(DraftState::Submitting(None).attachment().is_none());
    }
}
