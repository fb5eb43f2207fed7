use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::StorageError;

use crate::models::Patient;
use crate::ports::PatientRepository;

#[derive(Default)]
pub struct InMemoryPatientStore {
    patients: RwLock<HashMap<Uuid, Patient>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientStore {
    async fn save(&self, patient: &Patient) -> Result<(), StorageError> {
        self.patients
            .write()
            .await
            .insert(patient.id, patient.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, StorageError> {
        Ok(self.patients.read().await.get(&id).cloned())
    }

    async fn find_by_legal_identifier(
        &self,
        legal_identifier: &str,
    ) -> Result<Option<Patient>, StorageError> {
        Ok(self
            .patients
            .read()
            .await
            .values()
            .find(|p| p.legal_identifier == legal_identifier)
            .cloned())
    }

    async fn update(&self, patient: &Patient) -> Result<(), StorageError> {
        let mut patients = self.patients.write().await;
        if !patients.contains_key(&patient.id) {
            return Err(StorageError::Backend(format!(
                "patient {} is not stored",
                patient.id
            )));
        }
        patients.insert(patient.id, patient.clone());
        Ok(())
    }
}
