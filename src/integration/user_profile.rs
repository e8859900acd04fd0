use reqwest::header::AUTHORIZATION;

use crate::error::Result;
use crate::integration::BikyaClient;
use crate::methods::error_mapping;
use crate::model::User;

impl BikyaClient {
    pub async fn fetch_user_profile(&self) -> Result<User> {
        let bearer = self.bearer()?;
        let url = format!("{}/users/me", self.config.user_service_url);
        let response = self.http.get(&url).header(AUTHORIZATION, bearer).send().await?;
        error_mapping::parse_json(response).await
    }
}
