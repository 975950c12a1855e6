use shared_types::{
    AppError, CreateLcpRequest, CreateNapRequest, CreatePortRequest, CreateVlanRequest, Lcp, Nap,
    Port, Vlan,
};

use crate::ApiClient;

impl ApiClient {
    /// GET /lcp
    #[tracing::instrument(skip(self))]
    pub async fn list_lcps(&self) -> Result<Vec<Lcp>, AppError> {
        self.get("lcp").await
    }

    /// POST /lcp
    #[tracing::instrument(skip(self, body), fields(name = %body.name))]
    pub async fn create_lcp(&self, body: &CreateLcpRequest) -> Result<Lcp, AppError> {
        self.post("lcp", body).await
    }

    /// GET /nap
    #[tracing::instrument(skip(self))]
    pub async fn list_naps(&self) -> Result<Vec<Nap>, AppError> {
        self.get("nap").await
    }

    /// POST /nap
    #[tracing::instrument(skip(self, body), fields(name = %body.name, lcp_id = body.lcp_id))]
    pub async fn create_nap(&self, body: &CreateNapRequest) -> Result<Nap, AppError> {
        self.post("nap", body).await
    }

    /// GET /port
    #[tracing::instrument(skip(self))]
    pub async fn list_ports(&self) -> Result<Vec<Port>, AppError> {
        self.get("port").await
    }

    /// POST /port
    #[tracing::instrument(skip(self, body), fields(label = %body.label, nap_id = body.nap_id))]
    pub async fn create_port(&self, body: &CreatePortRequest) -> Result<Port, AppError> {
        self.post("port", body).await
    }

    /// GET /vlan
    #[tracing::instrument(skip(self))]
    pub async fn list_vlans(&self) -> Result<Vec<Vlan>, AppError> {
        self.get("vlan").await
    }

    /// POST /vlan
    #[tracing::instrument(skip(self, body), fields(value = %body.value))]
    pub async fn create_vlan(&self, body: &CreateVlanRequest) -> Result<Vlan, AppError> {
        self.post("vlan", body).await
    }
}
