use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::bills::formatter::parse_date;
use crate::features::bills::models::{ExpenseType, DEFAULT_PCT};
use crate::features::new_bill::models::BillDetails;
use crate::shared::validation::{base_name, UNSIGNED_INT_REGEX};

/// Raw values of the new bill form inputs
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewBillForm {
    #[validate(length(min = 1, message = "expense type is required"))]
    pub expense_type: String,
    pub name: String,
    #[validate(regex(
        path = *UNSIGNED_INT_REGEX,
        message = "amount must be a non-negative integer"
    ))]
    pub amount: String,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    pub vat: String,
    /// Blank means the default percentage
    #[validate(custom(function = "validate_pct"))]
    pub pct: String,
    pub commentary: String,
}

fn validate_pct(pct: &str) -> std::result::Result<(), ValidationError> {
    let pct = pct.trim();
    if pct.is_empty() || UNSIGNED_INT_REGEX.is_match(pct) {
        return Ok(());
    }
    Err(ValidationError::new("pct")
        .with_message(Cow::from("pct must be a non-negative integer")))
}

impl NewBillForm {
    /// Validate the inputs and convert them to typed bill details
    pub fn parse(&self) -> Result<BillDetails> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let expense_type = ExpenseType::parse(&self.expense_type).ok_or_else(|| {
            AppError::Validation(format!("Unknown expense type: {}", self.expense_type))
        })?;

        let amount = self
            .amount
            .parse::<u32>()
            .map_err(|e| AppError::Validation(format!("Invalid amount: {}", e)))?;

        let date = parse_date(&self.date)?;

        let pct = match self.pct.trim() {
            "" => DEFAULT_PCT,
            pct => pct
                .parse::<u32>()
                .map_err(|e| AppError::Validation(format!("Invalid pct: {}", e)))?,
        };

        Ok(BillDetails {
            expense_type,
            name: self.name.trim().to_string(),
            amount,
            date,
            vat: self.vat.trim().to_string(),
            pct,
            commentary: self.commentary.trim().to_string(),
        })
    }
}

/// One file picked in the file input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Change notification of the file input
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    /// Input value as the platform reports it, e.g. `C:\fakepath\test.jpg`
    pub input_value: String,
    pub files: Vec<SelectedFile>,
}

impl FileSelection {
    pub fn single(input_value: impl Into<String>, file: SelectedFile) -> Self {
        Self {
            input_value: input_value.into(),
            files: vec![file],
        }
    }

    pub fn first_file(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    /// Base name of the selected file
    pub fn file_name(&self) -> Option<String> {
        let from_input = base_name(self.input_value.trim());
        if !from_input.is_empty() {
            return Some(from_input.to_string());
        }
        self.first_file()
            .map(|f| base_name(&f.name).to_string())
            .filter(|n| !n.is_empty())
    }
}
