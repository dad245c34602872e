use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::features::new_bill::dtos::NewBillForm;

#[derive(Parser)]
#[command(name = "billed")]
#[command(about = "Headless client for Billed expense reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the employee bills page (default)
    List,

    /// Show the proof image of one bill
    Preview {
        /// Bill id as listed by the store
        id: String,
    },

    /// Fill and submit the new bill form
    NewBill(NewBillArgs),
}

#[derive(Args)]
pub struct NewBillArgs {
    /// Proof image to attach (jpg, jpeg or png)
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long = "type")]
    pub expense_type: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long)]
    pub amount: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    #[arg(long, default_value = "")]
    pub vat: String,

    /// Blank means 20
    #[arg(long, default_value = "")]
    pub pct: String,

    #[arg(long, default_value = "")]
    pub commentary: String,
}

impl NewBillArgs {
    pub fn form(&self) -> NewBillForm {
        NewBillForm {
            expense_type: self.expense_type.clone(),
            name: self.name.clone(),
            amount: self.amount.clone(),
            date: self.date.clone(),
            vat: self.vat.clone(),
            pct: self.pct.clone(),
            commentary: self.commentary.clone(),
        }
    }
}
