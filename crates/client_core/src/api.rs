use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::BuildingId,
    protocol::{
        BuildingSummary, BuildingsResponse, FloorsResponse, ReserveRequest, ReserveResponse,
        RoomSummary, SearchQuery, SearchResponse,
    },
};

/// Transport seam for the four server endpoints. The controller only ever
/// talks to this trait, so tests substitute an in-memory implementation.
#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn list_buildings(&self) -> Result<Vec<BuildingSummary>>;
    async fn list_floors(&self, building_id: BuildingId) -> Result<Vec<i64>>;
    async fn search_rooms(&self, query: &SearchQuery) -> Result<Vec<RoomSummary>>;
    async fn create_reservation(&self, request: &ReserveRequest) -> Result<ReserveResponse>;
}

/// Null object used before a server URL is configured.
pub struct UnconfiguredReservationApi;

#[async_trait]
impl ReservationApi for UnconfiguredReservationApi {
    async fn list_buildings(&self) -> Result<Vec<BuildingSummary>> {
        Err(anyhow!("reservation server is not configured"))
    }

    async fn list_floors(&self, building_id: BuildingId) -> Result<Vec<i64>> {
        Err(anyhow!(
            "reservation server is not configured (building {})",
            building_id.0
        ))
    }

    async fn search_rooms(&self, _query: &SearchQuery) -> Result<Vec<RoomSummary>> {
        Err(anyhow!("reservation server is not configured"))
    }

    async fn create_reservation(&self, _request: &ReserveRequest) -> Result<ReserveResponse> {
        Err(anyhow!("reservation server is not configured"))
    }
}

pub struct HttpReservationApi {
    http: Client,
    server_url: String,
}

impl HttpReservationApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        let mut server_url = server_url.into();
        while server_url.ends_with('/') {
            server_url.pop();
        }
        Self {
            http: Client::new(),
            server_url,
        }
    }
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn list_buildings(&self) -> Result<Vec<BuildingSummary>> {
        let response: BuildingsResponse = self
            .http
            .get(format!("{}/buildings", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.buildings)
    }

    async fn list_floors(&self, building_id: BuildingId) -> Result<Vec<i64>> {
        let response: FloorsResponse = self
            .http
            .get(format!("{}/floors/{}", self.server_url, building_id.0))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.floors)
    }

    async fn search_rooms(&self, query: &SearchQuery) -> Result<Vec<RoomSummary>> {
        let response: SearchResponse = self
            .http
            .get(format!("{}/search", self.server_url))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.rooms)
    }

    async fn create_reservation(&self, request: &ReserveRequest) -> Result<ReserveResponse> {
        // Conflict and validation replies come back as 400/409 with an
        // `error` field in the body, so the status is deliberately not
        // checked here; the caller branches on the parsed payload.
        let response: ReserveResponse = self
            .http
            .post(format!("{}/reserve", self.server_url))
            .json(request)
            .send()
            .await?
            .json()
            .await
            .context("reservation reply was not valid JSON")?;
        Ok(response)
    }
}
