// ============================================================================
// API CLIENT - HTTP only (stateless)
// ============================================================================
// Static JSON collections, the border overlay and the remote planner.
// No business logic here.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::CONFIG;
use crate::error::AppError;
use crate::models::{FestivalEvent, PlanRequest, PlanResponse, PointOfInterest, SiteRecord};

pub const MONASTERIES_PATH: &str = "/data/monastery.json";
pub const ARCHIVES_PATH: &str = "/data/archives.json";
pub const SERVICES_PATH: &str = "/data/services.json";
pub const EVENTS_PATH: &str = "/data/events.json";

#[derive(Clone)]
pub struct ApiClient {
    data_base_url: String,
    planner_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            data_base_url: CONFIG.data_base_url.clone(),
            planner_url: CONFIG.planner_api_url.clone(),
        }
    }

    fn data_url(&self, path: &str) -> String {
        format!("{}{}", self.data_base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.data_url(path);
        send_json(Request::get(&url), &url).await
    }

    pub async fn fetch_monasteries(&self) -> Result<Vec<PointOfInterest>, AppError> {
        self.get_json(MONASTERIES_PATH).await
    }

    pub async fn fetch_archives(&self) -> Result<Vec<SiteRecord>, AppError> {
        self.get_json(ARCHIVES_PATH).await
    }

    pub async fn fetch_services(&self) -> Result<Vec<SiteRecord>, AppError> {
        self.get_json(SERVICES_PATH).await
    }

    pub async fn fetch_events(&self) -> Result<Vec<FestivalEvent>, AppError> {
        self.get_json(EVENTS_PATH).await
    }

    /// Region outline as raw GeoJSON.
    pub async fn fetch_border(&self, path: &str) -> Result<serde_json::Value, AppError> {
        self.get_json(path).await
    }

    /// `POST {base}/generate-plan`
    pub async fn generate_plan(&self, request: &PlanRequest) -> Result<PlanResponse, AppError> {
        let url = format!("{}/generate-plan", self.planner_url);
        log::info!("✨ [PLANNER] Requesting {}-day plan", request.days);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| AppError::PlanGenerationFailure(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::PlanGenerationFailure(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(AppError::PlanGenerationFailure(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json::<PlanResponse>()
            .await
            .map_err(|e| AppError::PlanGenerationFailure(format!("Parse error: {}", e)))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder, url: &str) -> Result<T, AppError> {
    let response = builder
        .send()
        .await
        .map_err(|e| AppError::fetch(url, format!("Network error: {}", e)))?;

    if !response.ok() {
        return Err(AppError::fetch(
            url,
            format!("HTTP {}: {}", response.status(), response.status_text()),
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::fetch(url, format!("Parse error: {}", e)))
}
