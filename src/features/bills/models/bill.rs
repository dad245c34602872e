use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default VAT percentage applied when the form leaves it blank
pub const DEFAULT_PCT: u32 = 20;

/// Approval state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(BillStatus::Pending),
            "accepted" => Some(BillStatus::Accepted),
            "refused" => Some(BillStatus::Refused),
            _ => None,
        }
    }

    /// Localized label shown to the employee
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatus::Pending => write!(f, "pending"),
            BillStatus::Accepted => write!(f, "accepted"),
            BillStatus::Refused => write!(f, "refused"),
        }
    }
}

/// Expense category offered by the new bill form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    #[serde(rename = "Transports")]
    Transports,
    #[serde(rename = "Restaurants et bars")]
    RestaurantsEtBars,
    #[serde(rename = "Hôtel et logement")]
    HotelEtLogement,
    #[serde(rename = "Services en ligne")]
    ServicesEnLigne,
    #[serde(rename = "IT et électronique")]
    ItEtElectronique,
    #[serde(rename = "Equipement et matériel")]
    EquipementEtMateriel,
    #[serde(rename = "Fournitures de bureau")]
    FournituresDeBureau,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 7] = [
        ExpenseType::Transports,
        ExpenseType::RestaurantsEtBars,
        ExpenseType::HotelEtLogement,
        ExpenseType::ServicesEnLigne,
        ExpenseType::ItEtElectronique,
        ExpenseType::EquipementEtMateriel,
        ExpenseType::FournituresDeBureau,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Transports => "Transports",
            ExpenseType::RestaurantsEtBars => "Restaurants et bars",
            ExpenseType::HotelEtLogement => "Hôtel et logement",
            ExpenseType::ServicesEnLigne => "Services en ligne",
            ExpenseType::ItEtElectronique => "IT et électronique",
            ExpenseType::EquipementEtMateriel => "Equipement et matériel",
            ExpenseType::FournituresDeBureau => "Fournitures de bureau",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bill document as returned by the store.
///
/// Fields are kept loose so one corrupted document still deserializes and
/// can be shown degraded next to the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBill {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: Option<String>,
    #[serde(default)]
    pub pct: Option<i64>,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub comment_admin: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// Hosted attachment of a bill. URL and name are always set together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_url: String,
    pub file_name: String,
}

/// Complete bill record sent to the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "BillPayload")]
pub struct Bill {
    pub id: Option<String>,
    pub email: String,
    pub expense_type: ExpenseType,
    pub name: String,
    pub amount: u32,
    pub date: NaiveDate,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub attachment: Option<Attachment>,
    pub status: BillStatus,
}

/// Wire shape of [`Bill`]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BillPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    email: String,
    #[serde(rename = "type")]
    expense_type: ExpenseType,
    name: String,
    amount: u32,
    date: String,
    vat: String,
    pct: u32,
    commentary: String,
    file_url: Option<String>,
    file_name: Option<String>,
    status: BillStatus,
}

impl From<Bill> for BillPayload {
    fn from(b: Bill) -> Self {
        let (file_url, file_name) = match b.attachment {
            Some(a) => (Some(a.file_url), Some(a.file_name)),
            None => (None, None),
        };
        Self {
            id: b.id,
            email: b.email,
            expense_type: b.expense_type,
            name: b.name,
            amount: b.amount,
            date: b.date.format("%Y-%m-%d").to_string(),
            vat: b.vat,
            pct: b.pct,
            commentary: b.commentary,
            file_url,
            file_name,
            status: b.status,
        }
    }
}

/// Display-ready bill. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: Option<String>,
    pub amount: Option<i64>,
    /// Locale-formatted date, or the raw date when it could not be parsed
    pub date: String,
    pub vat: Option<String>,
    pub pct: Option<i64>,
    pub commentary: Option<String>,
    pub comment_admin: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    /// Localized status label, or the raw status when it is not mapped
    pub status: String,
    /// Parsed date used to order rows for display
    #[serde(skip)]
    pub sort_date: Option<NaiveDate>,
    /// Data-integrity violations found while formatting
    #[serde(skip)]
    pub issues: Vec<crate::features::bills::formatter::FormatError>,
}

impl FormattedBill {
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bill(attachment: Option<Attachment>) -> Bill {
        Bill {
            id: Some("47qAXb6fIm2zOKkLzMro".to_string()),
            email: "test@test.com".to_string(),
            expense_type: ExpenseType::Transports,
            name: "Billet de train".to_string(),
            amount: 100,
            date: NaiveDate::from_ymd_opt(2024, 11, 27).unwrap(),
            vat: "20".to_string(),
            pct: DEFAULT_PCT,
            commentary: "Trajet client".to_string(),
            attachment,
            status: BillStatus::Pending,
        }
    }

    #[test]
    fn test_bill_serializes_to_store_shape() {
        let bill = sample_bill(Some(Attachment {
            file_url: "https://localhost:3456/images/test.jpg".to_string(),
            file_name: "test.jpg".to_string(),
        }));

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["type"], "Transports");
        assert_eq!(json["date"], "2024-11-27");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["fileUrl"], "https://localhost:3456/images/test.jpg");
        assert_eq!(json["fileName"], "test.jpg");
        assert_eq!(json["pct"], 20);
    }

    #[test]
    fn test_bill_without_attachment_has_null_file_fields() {
        let mut bill = sample_bill(None);
        bill.id = None;

        let json = serde_json::to_value(&bill).unwrap();
        assert!(json.get("id").is_none());
        assert!(json["fileUrl"].is_null());
        assert!(json["fileName"].is_null());
    }

    #[test]
    fn test_raw_bill_tolerates_missing_fields() {
        let raw: RawBill =
            serde_json::from_str(r#"{"id":"abc","status":"pending","date":"2004-04-04"}"#)
                .unwrap();
        assert_eq!(raw.id, "abc");
        assert!(raw.amount.is_none());
        assert!(raw.file_url.is_none());
        assert_eq!(raw.expense_type, "");
    }

    #[test]
    fn test_expense_type_parse() {
        assert_eq!(
            ExpenseType::parse("Hôtel et logement"),
            Some(ExpenseType::HotelEtLogement)
        );
        assert_eq!(ExpenseType::parse(" Transports "), Some(ExpenseType::Transports));
        assert_eq!(ExpenseType::parse("Voyage"), None);
    }

    #[test]
    fn test_status_labels_are_distinct() {
        assert_eq!(BillStatus::parse("refused"), Some(BillStatus::Refused));
        assert_eq!(BillStatus::parse("Refused"), None);
        assert_ne!(BillStatus::Pending.label(), BillStatus::Accepted.label());
        assert_ne!(BillStatus::Accepted.label(), BillStatus::Refused.label());
    }
}
