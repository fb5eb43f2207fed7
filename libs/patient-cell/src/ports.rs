use async_trait::async_trait;
use uuid::Uuid;

use shared_models::StorageError;

use crate::models::Patient;

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn save(&self, patient: &Patient) -> Result<(), StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, StorageError>;

    async fn find_by_legal_identifier(
        &self,
        legal_identifier: &str,
    ) -> Result<Option<Patient>, StorageError>;

    async fn update(&self, patient: &Patient) -> Result<(), StorageError>;
}
