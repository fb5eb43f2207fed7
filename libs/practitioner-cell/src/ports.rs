use async_trait::async_trait;
use uuid::Uuid;

use shared_models::StorageError;

use crate::models::Practitioner;

#[async_trait]
pub trait PractitionerRepository: Send + Sync {
    async fn save(&self, practitioner: &Practitioner) -> Result<(), StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Practitioner>, StorageError>;

    async fn find_by_license_number(
        &self,
        license_number: &str,
    ) -> Result<Option<Practitioner>, StorageError>;

    async fn update(&self, practitioner: &Practitioner) -> Result<(), StorageError>;

    async fn list_by_specialty(
        &self,
        specialty: &str,
    ) -> Result<Vec<Practitioner>, StorageError>;
}
