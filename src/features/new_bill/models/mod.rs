mod draft;

pub use draft::{
    BillDetails, BillDraft, DraftPhase, DraftState, SubmittedBill, UploadedAttachment,
};
