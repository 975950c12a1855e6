use shared_types::{AppError, Barangay, City, LocationDetail, Region};

use crate::ApiClient;

impl ApiClient {
    /// GET /locations/regions
    #[tracing::instrument(skip(self))]
    pub async fn list_regions(&self) -> Result<Vec<Region>, AppError> {
        self.get("locations/regions").await
    }

    /// GET /locations/cities (every city, filtered client-side)
    #[tracing::instrument(skip(self))]
    pub async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        self.get("locations/cities").await
    }

    /// GET /locations/barangays
    #[tracing::instrument(skip(self))]
    pub async fn list_barangays(&self) -> Result<Vec<Barangay>, AppError> {
        self.get("locations/barangays").await
    }

    /// GET /locations/details
    #[tracing::instrument(skip(self))]
    pub async fn list_location_details(&self) -> Result<Vec<LocationDetail>, AppError> {
        self.get("locations/details").await
    }

    /// GET /locations/regions/{id}/cities
    #[tracing::instrument(skip(self))]
    pub async fn cities_in_region(&self, region_id: i64) -> Result<Vec<City>, AppError> {
        self.get(&format!("locations/regions/{region_id}/cities")).await
    }

    /// GET /locations/cities/{id}/barangays
    #[tracing::instrument(skip(self))]
    pub async fn barangays_in_city(&self, city_id: i64) -> Result<Vec<Barangay>, AppError> {
        self.get(&format!("locations/cities/{city_id}/barangays")).await
    }
}
