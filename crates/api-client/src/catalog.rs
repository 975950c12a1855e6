use shared_types::{AppError, Group, InventoryItem, Plan, Technician, UsageType};

use crate::ApiClient;

impl ApiClient {
    /// GET /plans
    #[tracing::instrument(skip(self))]
    pub async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        self.get("plans").await
    }

    /// GET /usage-types
    #[tracing::instrument(skip(self))]
    pub async fn list_usage_types(&self) -> Result<Vec<UsageType>, AppError> {
        self.get("usage-types").await
    }

    /// GET /groups
    #[tracing::instrument(skip(self))]
    pub async fn list_groups(&self) -> Result<Vec<Group>, AppError> {
        self.get("groups").await
    }

    /// GET /inventory-items
    #[tracing::instrument(skip(self))]
    pub async fn list_inventory_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.get("inventory-items").await
    }

    /// GET /users?role=technician
    #[tracing::instrument(skip(self))]
    pub async fn list_technicians(&self) -> Result<Vec<Technician>, AppError> {
        self.get_with_query("users", &[("role", "technician")]).await
    }
}
