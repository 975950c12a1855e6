use shared_types::{
    AppError, JobOrder, JobOrderItem, JobOrderUpdate, NewJobOrderItem, PhotoAttachment,
    RadiusAccount, UploadedImages,
};

use crate::ApiClient;

impl ApiClient {
    /// GET /job-orders/{id}
    #[tracing::instrument(skip(self))]
    pub async fn get_job_order(&self, id: i64) -> Result<JobOrder, AppError> {
        self.get(&format!("job-orders/{id}")).await
    }

    /// PUT /job-orders/{id}
    #[tracing::instrument(skip(self, body))]
    pub async fn update_job_order(
        &self,
        id: i64,
        body: &JobOrderUpdate,
    ) -> Result<JobOrder, AppError> {
        self.put(&format!("job-orders/{id}"), body).await
    }

    /// POST /job-orders/{id}/upload-images (multipart)
    #[tracing::instrument(skip(self, photos), fields(count = photos.len()))]
    pub async fn upload_job_order_images(
        &self,
        id: i64,
        photos: &[PhotoAttachment],
    ) -> Result<UploadedImages, AppError> {
        self.post_multipart(&format!("job-orders/{id}/upload-images"), photos)
            .await
    }

    /// POST /job-orders/{id}/create-radius-account
    #[tracing::instrument(skip(self))]
    pub async fn create_radius_account(&self, id: i64) -> Result<RadiusAccount, AppError> {
        let account: RadiusAccount = self
            .post_action(&format!("job-orders/{id}/create-radius-account"))
            .await?;
        tracing::info!(job_order_id = id, username = %account.username, "RADIUS account created");
        Ok(account)
    }

    // --- Items ---

    /// GET /job-order-items?job_order_id={id}
    #[tracing::instrument(skip(self))]
    pub async fn list_job_order_items(&self, job_order_id: i64) -> Result<Vec<JobOrderItem>, AppError> {
        self.get_with_query("job-order-items", &[("job_order_id", job_order_id)])
            .await
    }

    /// POST /job-order-items
    #[tracing::instrument(skip(self, body), fields(item = %body.item_name))]
    pub async fn create_job_order_item(
        &self,
        body: &NewJobOrderItem,
    ) -> Result<JobOrderItem, AppError> {
        self.post("job-order-items", body).await
    }

    /// DELETE /job-order-items/{id}
    #[tracing::instrument(skip(self))]
    pub async fn delete_job_order_item(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("job-order-items/{id}")).await
    }
}
