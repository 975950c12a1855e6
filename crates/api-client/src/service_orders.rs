use shared_types::{
    AppError, NewServiceOrderItem, PhotoAttachment, ServiceOrder, ServiceOrderItem,
    ServiceOrderUpdate, UploadedImages,
};

use crate::ApiClient;

impl ApiClient {
    /// GET /service-orders/{id}
    #[tracing::instrument(skip(self))]
    pub async fn get_service_order(&self, id: i64) -> Result<ServiceOrder, AppError> {
        self.get(&format!("service-orders/{id}")).await
    }

    /// PUT /service-orders/{id}
    #[tracing::instrument(skip(self, body))]
    pub async fn update_service_order(
        &self,
        id: i64,
        body: &ServiceOrderUpdate,
    ) -> Result<ServiceOrder, AppError> {
        self.put(&format!("service-orders/{id}"), body).await
    }

    /// GET /service-order-items?service_order_id={id}
    #[tracing::instrument(skip(self))]
    pub async fn list_service_order_items(
        &self,
        service_order_id: i64,
    ) -> Result<Vec<ServiceOrderItem>, AppError> {
        self.get_with_query(
            "service-order-items",
            &[("service_order_id", service_order_id)],
        )
        .await
    }

    /// POST /service-order-items
    #[tracing::instrument(skip(self, body), fields(item = %body.item_name))]
    pub async fn create_service_order_item(
        &self,
        body: &NewServiceOrderItem,
    ) -> Result<ServiceOrderItem, AppError> {
        self.post("service-order-items", body).await
    }

    /// DELETE /service-order-items/{id}
    #[tracing::instrument(skip(self))]
    pub async fn delete_service_order_item(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("service-order-items/{id}")).await
    }

    /// POST /google-drive/upload (multipart). Returns field name -> shared URL.
    #[tracing::instrument(skip(self, photos), fields(count = photos.len()))]
    pub async fn upload_to_drive(&self, photos: &[PhotoAttachment]) -> Result<UploadedImages, AppError> {
        self.post_multipart("google-drive/upload", photos).await
    }
}
