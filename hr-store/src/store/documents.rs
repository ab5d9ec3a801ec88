use chrono::{NaiveDate, Utc};

use shared::models::{Document, NewDocument, NotificationKind};
use shared::util::generate_id;

use super::HrStore;

impl HrStore {
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn documents_for<'a>(&'a self, employee_id: &'a str) -> impl Iterator<Item = &'a Document> + 'a {
        self.documents
            .iter()
            .filter(move |d| d.employee_id == employee_id)
    }

    /// Documents whose expiry date falls on or before `on`
    pub fn expired_documents(&self, on: NaiveDate) -> impl Iterator<Item = &Document> + '_ {
        self.documents.iter().filter(move |d| d.is_expired(on))
    }

    /// Record an upload, attributed to the signed-in user
    pub fn add_document(&mut self, data: NewDocument) -> Document {
        let document = Document {
            id: generate_id("doc"),
            employee_id: data.employee_id,
            document_type: data.document_type,
            filename: data.filename,
            file_size: data.file_size,
            uploaded_by: self.acting_user_id(),
            expiry_date: data.expiry_date,
            created_at: Utc::now(),
        };

        tracing::info!(
            id = %document.id,
            employee_id = %document.employee_id,
            filename = %document.filename,
            "Document uploaded"
        );
        self.documents.push(document.clone());
        self.persist();
        self.notify("Document uploaded successfully.", NotificationKind::Success);
        document
    }

    /// Hard delete
    pub fn delete_document(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        if self.documents.len() == before {
            tracing::warn!(id = %id, "Deletion of unknown document ignored");
            return false;
        }

        tracing::info!(id = %id, "Document deleted");
        self.persist();
        self.notify("Document deleted.", NotificationKind::Info);
        true
    }
}
