//! Market-data endpoints

use super::types::*;
use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// List assets, with optional free-text and type filters.
    pub async fn list_assets(
        &self,
        query: Option<&str>,
        asset_type: Option<&str>,
    ) -> Result<Vec<Asset>> {
        let mut params = Vec::new();
        if let Some(q) = query {
            params.push(format!("query={}", urlencoding::encode(q)));
        }
        if let Some(t) = asset_type {
            params.push(format!("asset_type={}", urlencoding::encode(t)));
        }

        let path = if params.is_empty() {
            "/assets".to_string()
        } else {
            format!("/assets?{}", params.join("&"))
        };
        self.get_json(&path).await
    }

    pub async fn get_asset(&self, asset_id: i32) -> Result<Asset> {
        self.get_json(&format!("/assets/{}", asset_id)).await
    }

    pub async fn asset_price_history(&self, asset_id: i32) -> Result<Vec<AssetPriceHistory>> {
        self.get_json(&format!("/assets/{}/price-history", asset_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_asset_filters_are_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/assets"))
            .and(query_param("query", "galp energia"))
            .and(query_param("asset_type", "Company"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
        let client = ApiClient::new(base);

        let assets = client
            .list_assets(Some("galp energia"), Some("Company"))
            .await
            .unwrap();
        assert!(assets.is_empty());
    }
}
