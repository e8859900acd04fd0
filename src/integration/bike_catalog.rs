use reqwest::StatusCode;
use tracing::debug;

use crate::error::Result;
use crate::integration::BikyaClient;
use crate::methods::error_mapping;
use crate::model::BikeSummary;

impl BikyaClient {
    /// Bike card for the booking screen; `None` when the bike does not exist.
    pub async fn fetch_bike_summary(&self, bike_id: &str) -> Result<Option<BikeSummary>> {
        let url = format!("{}/bikes/{}", self.config.bike_service_url, bike_id);
        debug!(bike_id, "loading bike summary");

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        error_mapping::parse_json(response).await.map(Some)
    }
}
