//! Storage seam for specification records.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use pkspec_model::{DocumentId, PackagingSpecification, SpecStatus};
use tracing::{debug, warn};

use super::record::{SpecificationRecord, timestamp};
use crate::error::{PersistenceError, Result};

/// Changes applied by [`SpecificationRepository::update`]. Unset fields keep
/// their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecificationUpdate {
    pub title: Option<String>,
    pub status: Option<SpecStatus>,
    pub content: Option<PackagingSpecification>,
}

impl SpecificationUpdate {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SpecStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: PackagingSpecification) -> Self {
        self.content = Some(content);
        self
    }
}

/// Per-user specification storage.
///
/// Every call names the acting user; records of other users are reported
/// as [`PersistenceError::Unauthorized`].
pub trait SpecificationRepository {
    /// The user's records, most recently updated first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<SpecificationRecord>>;

    fn get(&self, user_id: &str, id: &DocumentId) -> Result<SpecificationRecord>;

    fn create(
        &self,
        user_id: &str,
        specification: &PackagingSpecification,
        title: Option<&str>,
    ) -> Result<SpecificationRecord>;

    fn update(
        &self,
        user_id: &str,
        id: &DocumentId,
        update: SpecificationUpdate,
    ) -> Result<SpecificationRecord>;

    fn delete(&self, user_id: &str, id: &DocumentId) -> Result<()>;
}

#[derive(Debug, Default)]
struct Rows {
    records: BTreeMap<DocumentId, (u64, SpecificationRecord)>,
    /// Write sequence; breaks ties between equal timestamps.
    sequence: u64,
}

impl Rows {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn owned_mut(
        &mut self,
        user_id: &str,
        id: &DocumentId,
    ) -> Result<&mut (u64, SpecificationRecord)> {
        let entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| PersistenceError::RecordNotFound { id: id.clone() })?;
        if entry.1.user_id != user_id {
            warn!(user_id, record_id = %id, "Rejected access to another user's record");
            return Err(PersistenceError::Unauthorized {
                user_id: user_id.to_string(),
                id: id.clone(),
            });
        }
        Ok(entry)
    }
}

/// Process-local repository, used by tests and offline sessions.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rows: Mutex<Rows>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, Rows> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SpecificationRepository for InMemoryRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<SpecificationRecord>> {
        let rows = self.rows();
        let mut owned: Vec<&(u64, SpecificationRecord)> = rows
            .records
            .values()
            .filter(|(_, record)| record.user_id == user_id)
            .collect();
        owned.sort_by(|(seq_a, a), (seq_b, b)| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| seq_b.cmp(seq_a))
        });
        Ok(owned.into_iter().map(|(_, record)| record.clone()).collect())
    }

    fn get(&self, user_id: &str, id: &DocumentId) -> Result<SpecificationRecord> {
        let mut rows = self.rows();
        Ok(rows.owned_mut(user_id, id)?.1.clone())
    }

    fn create(
        &self,
        user_id: &str,
        specification: &PackagingSpecification,
        title: Option<&str>,
    ) -> Result<SpecificationRecord> {
        let mut record =
            SpecificationRecord::from_specification(specification, user_id, title, Utc::now())?;
        let mut rows = self.rows();
        if rows.records.contains_key(&record.id) {
            record.id = DocumentId::generate();
        }
        let sequence = rows.next_sequence();
        rows.records
            .insert(record.id.clone(), (sequence, record.clone()));
        debug!(user_id, record_id = %record.id, "Created specification record");
        Ok(record)
    }

    fn update(
        &self,
        user_id: &str,
        id: &DocumentId,
        update: SpecificationUpdate,
    ) -> Result<SpecificationRecord> {
        let mut rows = self.rows();
        let sequence = rows.next_sequence();
        let entry = rows.owned_mut(user_id, id)?;
        let record = &mut entry.1;
        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(content) = &update.content {
            record.set_content(content)?;
        }
        record.updated_at = timestamp(Utc::now());
        entry.0 = sequence;
        debug!(user_id, record_id = %id, "Updated specification record");
        Ok(entry.1.clone())
    }

    fn delete(&self, user_id: &str, id: &DocumentId) -> Result<()> {
        let mut rows = self.rows();
        rows.owned_mut(user_id, id)?;
        rows.records.remove(id);
        debug!(user_id, record_id = %id, "Deleted specification record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkspec_core::WizardStore;

    fn specification() -> PackagingSpecification {
        WizardStore::new().full_data(Utc::now())
    }

    #[test]
    fn test_list_orders_by_latest_update() {
        let repository = InMemoryRepository::new();
        let first = repository.create("user-1", &specification(), Some("A")).unwrap();
        let second = repository.create("user-1", &specification(), Some("B")).unwrap();
        repository.create("user-2", &specification(), Some("C")).unwrap();

        let titles = |records: Vec<SpecificationRecord>| -> Vec<String> {
            records.into_iter().map(|record| record.title).collect()
        };
        assert_eq!(titles(repository.list_for_user("user-1").unwrap()), ["B", "A"]);

        repository
            .update("user-1", &first.id, SpecificationUpdate::default().with_status(SpecStatus::Submitted))
            .unwrap();
        assert_eq!(titles(repository.list_for_user("user-1").unwrap()), ["A", "B"]);
        assert_eq!(
            repository.get("user-1", &first.id).unwrap().status,
            SpecStatus::Submitted
        );
        assert_eq!(repository.get("user-1", &second.id).unwrap().title, "B");
    }

    #[test]
    fn test_other_users_are_rejected() {
        let repository = InMemoryRepository::new();
        let record = repository.create("owner", &specification(), None).unwrap();

        assert!(matches!(
            repository.get("intruder", &record.id),
            Err(PersistenceError::Unauthorized { .. })
        ));
        assert!(matches!(
            repository.delete("intruder", &record.id),
            Err(PersistenceError::Unauthorized { .. })
        ));
        repository.delete("owner", &record.id).unwrap();
        assert!(matches!(
            repository.get("owner", &record.id),
            Err(PersistenceError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_update_replaces_content() {
        let repository = InMemoryRepository::new();
        let record = repository.create("user-1", &specification(), None).unwrap();

        let mut store = WizardStore::new();
        store.set_additional_request_description("파렛트 랩핑 필수");
        let mut content = store.full_data(Utc::now());
        content.id = record.id.clone();

        let updated = repository
            .update(
                "user-1",
                &record.id,
                SpecificationUpdate::default()
                    .with_title("수정본")
                    .with_content(content),
            )
            .unwrap();
        assert_eq!(updated.title, "수정본");
        let restored = updated.to_specification().unwrap();
        assert_eq!(restored.additional_request.description, "파렛트 랩핑 필수");
    }
}
