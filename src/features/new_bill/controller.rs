use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::core::error::{AppError, Result};
use crate::core::router::{Navigator, Route};
use crate::core::session::SessionContext;
use crate::features::bills::models::Attachment;
use crate::features::new_bill::dtos::{FileSelection, NewBillForm};
use crate::features::new_bill::models::{
    BillDraft, DraftPhase, DraftState, SubmittedBill, UploadedAttachment,
};
use crate::features::new_bill::view::NewBillView;
use crate::modules::store::{BillStore, FileUpload};
use crate::shared::constants::FILE_FORMAT_ERROR;
use crate::shared::validation::ATTACHMENT_FILE_REGEX;

/// Controller behind the new bill form.
///
/// Handlers take `&self` so the form can be shared with whatever dispatches
/// its events; the draft state is the only mutable part.
pub struct NewBillController {
    store: Arc<dyn BillStore>,
    navigator: Arc<dyn Navigator>,
    view: Arc<dyn NewBillView>,
    session: SessionContext,
    state: Mutex<DraftState>,
}

impl NewBillController {
    pub fn new(
        store: Arc<dyn BillStore>,
        navigator: Arc<dyn Navigator>,
        view: Arc<dyn NewBillView>,
        session: SessionContext,
    ) -> Self {
        Self {
            store,
            navigator,
            view,
            session,
            state: Mutex::new(DraftState::Empty),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, DraftState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn phase(&self) -> DraftPhase {
        self.lock_state().phase()
    }

    pub fn file_url(&self) -> Option<String> {
        self.lock_state().attachment().map(|a| a.file_url.clone())
    }

    pub fn file_name(&self) -> Option<String> {
        self.lock_state().attachment().map(|a| a.file_name.clone())
    }

    pub fn file_id(&self) -> Option<String> {
        self.lock_state().bill_id().map(String::from)
    }

    /// File input change: validate the first selected file and upload it.
    ///
    /// Only `jpg`, `jpeg` and `png` are accepted. A rejected file sets the
    /// input's validation message, clears the input and never reaches the
    /// store. A failed upload leaves the attachment unset.
    pub async fn handle_file_selection(&self, selection: FileSelection) -> Result<()> {
        let (file, file_name) = match (selection.first_file(), selection.file_name()) {
            (Some(file), Some(name)) => (file, name),
            _ => return Err(AppError::Validation("No file selected".to_string())),
        };

        if !ATTACHMENT_FILE_REGEX.is_match(&file_name) {
            warn!("Rejected attachment with unsupported format: {}", file_name);
            self.view.set_file_validity(FILE_FORMAT_ERROR);
            self.view.clear_file_input();
            return Err(AppError::Validation(FILE_FORMAT_ERROR.to_string()));
        }
        self.view.set_file_validity("");

        if matches!(
            self.phase(),
            DraftPhase::Submitting | DraftPhase::Submitted
        ) {
            return Err(AppError::Conflict(
                "Bill is already being submitted".to_string(),
            ));
        }

        let upload = FileUpload {
            file_name: file_name.clone(),
            content_type: file.content_type.clone(),
            bytes: file.bytes.clone(),
        };

        let uploaded = self
            .store
            .upload(upload, &self.session.email)
            .await
            .map_err(|e| {
                error!("Attachment upload failed for {}: {}", file_name, e);
                e
            })?;

        let attachment = UploadedAttachment {
            bill_id: uploaded.id,
            attachment: Attachment {
                file_url: uploaded.file_url,
                file_name: uploaded.file_name.unwrap_or(file_name),
            },
        };

        let mut state = self.lock_state();
        match &*state {
            DraftState::Empty | DraftState::Uploaded(_) => {
                info!(
                    "Attachment ready: id={}, url={}",
                    attachment.bill_id, attachment.attachment.file_url
                );
                *state = DraftState::Uploaded(attachment);
                Ok(())
            }
            DraftState::Submitting(_) | DraftState::Submitted(_) => {
                warn!(
                    "Discarding attachment {} uploaded after submission started",
                    attachment.bill_id
                );
                Err(AppError::Conflict(
                    "Bill is already being submitted".to_string(),
                ))
            }
        }
    }

    /// Form submission: complete the bill and push it to the store.
    ///
    /// With an id allocated by a prior upload the record is updated,
    /// otherwise it is created. On success the navigator goes back to the
    /// bills list. On failure nothing navigates and the form can be
    /// submitted again. A submission while another is in flight is refused
    /// without calling the store.
    pub async fn handle_submit(&self, form: NewBillForm) -> Result<SubmittedBill> {
        let details = form.parse().map_err(|e| {
            warn!("New bill form rejected: {}", e);
            e
        })?;

        let upload = {
            let mut state = self.lock_state();
            let upload = match &*state {
                DraftState::Empty => None,
                DraftState::Uploaded(u) => Some(u.clone()),
                DraftState::Submitting(_) => {
                    return Err(AppError::Conflict(
                        "A submission is already in progress".to_string(),
                    ))
                }
                DraftState::Submitted(_) => {
                    return Err(AppError::Conflict("Bill already submitted".to_string()))
                }
            };
            *state = DraftState::Submitting(upload.clone());
            upload
        };

        let draft = BillDraft {
            email: self.session.email.clone(),
            details,
            upload,
        };
        let bill = draft.to_bill();

        let result = match draft.bill_id() {
            Some(id) => {
                debug!("Completing bill {}", id);
                self.store.update(id, &bill).await
            }
            None => {
                debug!("Submitting bill without attachment");
                self.store.create(&bill).await
            }
        };

        match result {
            Ok(stored) => {
                let submitted = SubmittedBill::new(stored.id, bill);
                *self.lock_state() = DraftState::Submitted(submitted.clone());
                info!("Bill submitted: id={}", submitted.id());
                self.navigator.navigate(Route::Bills);
                Ok(submitted)
            }
            Err(e) => {
                error!("Bill submission failed: {}", e);
                *self.lock_state() = DraftState::before_submit(draft.upload);
                Err(e)
            }
        }
    }
}
