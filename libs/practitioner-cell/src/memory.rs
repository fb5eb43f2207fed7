use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::StorageError;

use crate::models::Practitioner;
use crate::ports::PractitionerRepository;

#[derive(Default)]
pub struct InMemoryPractitionerStore {
    practitioners: RwLock<HashMap<Uuid, Practitioner>>,
}

impl InMemoryPractitionerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PractitionerRepository for InMemoryPractitionerStore {
    async fn save(&self, practitioner: &Practitioner) -> Result<(), StorageError> {
        self.practitioners
            .write()
            .await
            .insert(practitioner.id, practitioner.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Practitioner>, StorageError> {
        Ok(self.practitioners.read().await.get(&id).cloned())
    }

    async fn find_by_license_number(
        &self,
        license_number: &str,
    ) -> Result<Option<Practitioner>, StorageError> {
        Ok(self
            .practitioners
            .read()
            .await
            .values()
            .find(|p| p.license_number == license_number)
            .cloned())
    }

    async fn update(&self, practitioner: &Practitioner) -> Result<(), StorageError> {
        let mut practitioners = self.practitioners.write().await;
        if !practitioners.contains_key(&practitioner.id) {
            return Err(StorageError::Backend(format!(
                "practitioner {} is not stored",
                practitioner.id
            )));
        }
        practitioners.insert(practitioner.id, practitioner.clone());
        Ok(())
    }

    async fn list_by_specialty(
        &self,
        specialty: &str,
    ) -> Result<Vec<Practitioner>, StorageError> {
        let practitioners = self.practitioners.read().await;

        let mut matching: Vec<Practitioner> = practitioners
            .values()
            .filter(|p| p.specialty.eq_ignore_ascii_case(specialty))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.last_name.cmp(&b.last_name));

        Ok(matching)
    }
}
