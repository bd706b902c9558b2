use crate::config::PartnerConfig;
use crate::error::PartnerError;
use crate::model::IngredientLine;
use crate::partner::{
    classify_status, prepare_line_items, GroceryPartner, LandingPageConfiguration, PartnerLink,
    PartnerLinkResponse, PartnerRecipeRequest, PartnerShoppingListRequest,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const SHOPPING_LIST_PATH: &str = "/idp/v1/products/products_link";
const RECIPE_PATH: &str = "/idp/v1/products/recipe";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct InstacartClient {
    client: Client,
    api_key: String,
    base_url: String,
    linkback_url: String,
}

impl InstacartClient {
    /// Create a new Instacart client from configuration
    pub fn new(config: &PartnerConfig) -> Result<Self, PartnerError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("INSTACART_API_KEY").ok())
            .ok_or(PartnerError::MissingApiKey)?;

        Ok(InstacartClient {
            client: build_client(Duration::from_secs(config.timeout))?,
            api_key,
            base_url: config.base_url.clone(),
            linkback_url: config.linkback_url.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, PartnerError> {
        Ok(InstacartClient {
            client: build_client(DEFAULT_TIMEOUT)?,
            api_key,
            base_url,
            linkback_url: PartnerConfig::default().linkback_url,
        })
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, PartnerError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Pantry toggles are always offered on the partner landing page
    fn landing_page(&self) -> LandingPageConfiguration {
        LandingPageConfiguration {
            partner_linkback_url: self.linkback_url.clone(),
            enable_pantry_items: true,
        }
    }

    /// Single attempt; any failure is returned as-is
    async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<PartnerLink, PartnerError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Instacart returned {} for {}", status, path);
            return Err(classify_status(status.as_u16(), body));
        }

        let parsed: PartnerLinkResponse = serde_json::from_str(&body)
            .map_err(|e| PartnerError::InvalidResponse(e.to_string()))?;
        if parsed.products_link_url.trim().is_empty() {
            return Err(PartnerError::InvalidResponse(
                "products_link_url is empty".to_string(),
            ));
        }

        info!("Created Instacart link via {}", path);
        Ok(PartnerLink {
            url: parsed.products_link_url,
        })
    }
}

fn build_client(timeout: Duration) -> Result<Client, PartnerError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

#[async_trait]
impl GroceryPartner for InstacartClient {
    fn partner_name(&self) -> &str {
        "instacart"
    }

    async fn create_shopping_list(
        &self,
        ingredients: &[IngredientLine],
        title: &str,
    ) -> Result<PartnerLink, PartnerError> {
        let request = PartnerShoppingListRequest {
            title: title.to_string(),
            line_items: prepare_line_items(ingredients)?,
            landing_page_configuration: self.landing_page(),
        };
        self.post(SHOPPING_LIST_PATH, &request).await
    }

    async fn create_recipe_list(
        &self,
        name: &str,
        ingredients: &[IngredientLine],
        instructions: &[String],
        image_url: Option<&str>,
    ) -> Result<PartnerLink, PartnerError> {
        let request = PartnerRecipeRequest {
            title: name.to_string(),
            image_url: image_url.map(str::to_string),
            instructions: instructions.to_vec(),
            ingredients: prepare_line_items(ingredients)?,
            landing_page_configuration: self.landing_page(),
        };
        self.post(RECIPE_PATH, &request).await
    }
}
