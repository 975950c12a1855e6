use shared_types::{
    AppError, Application, ApplicationRequest, ApplicationStatusUpdate, ApplicationVisit,
    VisitRequest,
};

use crate::ApiClient;

impl ApiClient {
    /// GET /applications
    #[tracing::instrument(skip(self))]
    pub async fn list_applications(&self) -> Result<Vec<Application>, AppError> {
        self.get("applications").await
    }

    /// GET /applications/{id}
    #[tracing::instrument(skip(self))]
    pub async fn get_application(&self, id: i64) -> Result<Application, AppError> {
        self.get(&format!("applications/{id}")).await
    }

    /// POST /applications
    #[tracing::instrument(skip(self, body), fields(email = %body.email))]
    pub async fn create_application(
        &self,
        body: &ApplicationRequest,
    ) -> Result<Application, AppError> {
        let created: Application = self.post("applications", body).await?;
        tracing::info!(application_id = created.id, "Application created");
        Ok(created)
    }

    /// PUT /applications/{id}
    #[tracing::instrument(skip(self, body))]
    pub async fn update_application(
        &self,
        id: i64,
        body: &ApplicationRequest,
    ) -> Result<Application, AppError> {
        self.put(&format!("applications/{id}"), body).await
    }

    /// PUT /applications/{id} with only the status fields.
    #[tracing::instrument(skip(self, body), fields(status = %body.status))]
    pub async fn update_application_status(
        &self,
        id: i64,
        body: &ApplicationStatusUpdate,
    ) -> Result<Application, AppError> {
        self.put(&format!("applications/{id}"), body).await
    }

    // --- Visits ---

    /// GET /application-visits?application_id={id}
    #[tracing::instrument(skip(self))]
    pub async fn list_visits(&self, application_id: i64) -> Result<Vec<ApplicationVisit>, AppError> {
        self.get_with_query("application-visits", &[("application_id", application_id)])
            .await
    }

    /// POST /application-visits
    #[tracing::instrument(skip(self, body), fields(application_id = body.application_id))]
    pub async fn create_visit(&self, body: &VisitRequest) -> Result<ApplicationVisit, AppError> {
        self.post("application-visits", body).await
    }

    /// PUT /application-visits/{id}
    #[tracing::instrument(skip(self, body))]
    pub async fn update_visit(
        &self,
        id: i64,
        body: &VisitRequest,
    ) -> Result<ApplicationVisit, AppError> {
        self.put(&format!("application-visits/{id}"), body).await
    }
}
