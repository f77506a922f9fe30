//! HTTP GraphQL client for the content source.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Category, CategorySummary};
use crate::queries::{
    CategoriesData, CategoryData, GraphQlRequest, GraphQlResponse, SlugVariables, PAGE_CATEGORIES,
    PAGE_CATEGORY,
};
use crate::source::{CmsError, ContentSource};

/// GraphCMS endpoint the catalog is built from.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-eu-central-1.graphcms.com/v2/cl23dwaya5cng01z49zwjhdtm/master";

/// A short-lived client for one build step.
///
/// Holds no response cache; two clients never share state.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    endpoint: Url,
}

impl CmsClient {
    /// Create a client for the given GraphQL endpoint.
    pub fn new(endpoint: &str) -> Result<Self, CmsError> {
        let url = Url::parse(endpoint).map_err(|e| CmsError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        let http = Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CmsError::UpstreamQueryFailure(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: url,
        })
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run a query and decode its `data` payload.
    async fn query<V, T>(
        &self,
        operation_name: &str,
        query: &str,
        variables: Option<V>,
    ) -> Result<T, CmsError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!("Querying {} at {}", operation_name, self.endpoint);

        let request = GraphQlRequest {
            operation_name,
            query,
            variables,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| CmsError::UpstreamQueryFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CmsError::UpstreamQueryFailure(e.to_string()))?;

        if !status.is_success() {
            return Err(CmsError::UpstreamQueryFailure(format!(
                "{} returned {}: {}",
                operation_name, status, body
            )));
        }

        decode_response(operation_name, &body)
    }
}

/// Decode a GraphQL response envelope into the expected `data` shape.
fn decode_response<T: DeserializeOwned>(operation_name: &str, body: &str) -> Result<T, CmsError> {
    let envelope: GraphQlResponse<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| CmsError::MalformedResponse(format!("{}: {}", operation_name, e)))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(CmsError::UpstreamQueryFailure(format!(
            "{}: {}",
            operation_name,
            messages.join("; ")
        )));
    }

    let Some(data) = envelope.data else {
        return Err(CmsError::MalformedResponse(format!(
            "{}: response has no data",
            operation_name
        )));
    };

    serde_json::from_value(data)
        .map_err(|e| CmsError::MalformedResponse(format!("{}: {}", operation_name, e)))
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn categories(&self) -> Result<Vec<CategorySummary>, CmsError> {
        let data: CategoriesData = self
            .query::<SlugVariables<'_>, _>("PageCategories", PAGE_CATEGORIES, None)
            .await?;

        Ok(data.categories)
    }

    async fn category(&self, slug: &str) -> Result<Category, CmsError> {
        let data: CategoryData = self
            .query(
                "PageCategory",
                PAGE_CATEGORY,
                Some(SlugVariables { slug }),
            )
            .await?;

        data.category.ok_or_else(|| CmsError::CategoryNotFound {
            slug: slug.to_string(),
        })
    }
}
