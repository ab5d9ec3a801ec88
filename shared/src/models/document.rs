//! Document Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of employee document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Id,
    OfferLetter,
    Contract,
    TaxForm,
    Certification,
    PerformanceReview,
    Other,
}

/// Uploaded employee document (metadata only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub employee_id: String,
    pub document_type: DocumentType,
    pub filename: String,
    /// Size in bytes
    pub file_size: u64,
    pub uploaded_by: String,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Whether the document has an expiry date on or before `on`
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d <= on)
    }
}

/// Upload document payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub employee_id: String,
    pub document_type: DocumentType,
    pub filename: String,
    pub file_size: u64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}
