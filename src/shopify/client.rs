//! Shopify Admin GraphQL client

use super::models::{ProductImage, ProductPage, ProductSummary};
use super::queries::*;
use crate::notes::{NoteList, ProductId};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failures talking to the Admin API
#[derive(Debug, Clone, Error)]
pub enum ShopifyError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("graphql error: {0}")]
    GraphQl(String),
    #[error("graphql response carried no data")]
    MissingData,
    #[error("product not found: {0}")]
    ProductNotFound(String),
    #[error("metafield rejected: {}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
            _ => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where product notes are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetafieldLocation {
    pub namespace: String,
    pub key: String,
}

impl Default for MetafieldLocation {
    fn default() -> Self {
        Self {
            namespace: "$app".to_string(),
            key: "notes".to_string(),
        }
    }
}

/// Connection settings for [`AdminClient`]
#[derive(Debug, Clone)]
pub struct AdminClientConfig {
    /// `my-shop.myshopify.com`
    pub shop_domain: String,
    pub access_token: String,
    /// Admin API version, e.g. `2025-10`
    pub api_version: String,
    pub timeout: Duration,
    /// Full GraphQL URL, replaces the one derived from domain and version
    pub endpoint_override: Option<String>,
    pub metafield: MetafieldLocation,
}

impl AdminClientConfig {
    /// GraphQL endpoint this config points at
    pub fn endpoint(&self) -> String {
        match &self.endpoint_override {
            Some(url) => url.clone(),
            None => format!(
                "https://{}/admin/api/{}/graphql.json",
                self.shop_domain.trim_end_matches('/'),
                self.api_version
            ),
        }
    }
}

/// Client for the Shopify Admin GraphQL API
///
/// Cheap to clone; the underlying reqwest client is shared.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
    metafield: MetafieldLocation,
}

impl AdminClient {
    /// Create a new Admin API client
    pub fn new(config: AdminClientConfig) -> Result<Self, ShopifyError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShopifyError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            access_token: config.access_token,
            metafield: config.metafield,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn metafield(&self) -> &MetafieldLocation {
        &self.metafield
    }

    /// Run a GraphQL document and decode its `data` member
    pub async fn execute<V, T>(&self, query: &str, variables: V) -> Result<T, ShopifyError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| ShopifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| ShopifyError::Decode(e.to_string()))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ShopifyError::GraphQl(messages.join("; ")));
        }

        envelope.data.ok_or(ShopifyError::MissingData)
    }

    /// One page of products with their notes metafield
    pub async fn fetch_products_page(
        &self,
        first: usize,
        after: Option<&str>,
    ) -> Result<ProductPage, ShopifyError> {
        let data: ProductsData = self
            .execute(
                PRODUCTS_WITH_NOTES,
                ProductsVariables {
                    first,
                    after,
                    namespace: &self.metafield.namespace,
                    key: &self.metafield.key,
                },
            )
            .await?;

        let connection = data.products;
        let products = connection
            .edges
            .into_iter()
            .filter_map(|edge| product_from_node(edge.node))
            .collect();

        Ok(ProductPage {
            products,
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        })
    }

    /// Raw notes metafield value of a product; `None` when unset
    pub async fn fetch_notes_value(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<String>, ShopifyError> {
        let data: ProductNotesData = self
            .execute(
                PRODUCT_NOTES,
                ProductNotesVariables {
                    id: product_id.as_gid(),
                    namespace: &self.metafield.namespace,
                    key: &self.metafield.key,
                },
            )
            .await?;

        let product = data
            .product
            .ok_or_else(|| ShopifyError::ProductNotFound(product_id.to_string()))?;
        Ok(product.metafield.and_then(|m| m.value))
    }

    /// Overwrite the notes metafield of a product with `value`
    pub async fn write_notes_value(
        &self,
        product_id: &ProductId,
        value: String,
    ) -> Result<(), ShopifyError> {
        let data: MetafieldsSetData = self
            .execute(
                SET_NOTES_METAFIELD,
                MetafieldsSetVariables {
                    metafields: [MetafieldsSetInput {
                        owner_id: product_id.as_gid(),
                        namespace: &self.metafield.namespace,
                        key: &self.metafield.key,
                        kind: "json",
                        value,
                    }],
                },
            )
            .await?;

        let payload = data.metafields_set.ok_or(ShopifyError::MissingData)?;
        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserErrors(payload.user_errors));
        }
        Ok(())
    }
}

fn product_from_node(node: ProductNode) -> Option<ProductSummary> {
    let id = match node.id.parse::<ProductId>() {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(id = %node.id, error = %e, "Skipping product with unexpected id");
            return None;
        }
    };

    let image = node
        .media
        .and_then(|m| m.nodes.into_iter().next())
        .and_then(|n| n.preview)
        .and_then(|p| p.image)
        .map(|img| ProductImage {
            url: img.url,
            alt_text: img.alt_text,
        });

    let raw = node.metafield.and_then(|m| m.value);
    let notes = NoteList::parse(raw.as_deref());

    Some(ProductSummary {
        id,
        title: node.title,
        image,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdminClientConfig {
        AdminClientConfig {
            shop_domain: "demo.myshopify.com".to_string(),
            access_token: "shpat_test".to_string(),
            api_version: "2025-10".to_string(),
            timeout: Duration::from_secs(5),
            endpoint_override: None,
            metafield: MetafieldLocation::default(),
        }
    }

    #[test]
    fn test_endpoint_from_domain_and_version() {
        assert_eq!(
            config().endpoint(),
            "https://demo.myshopify.com/admin/api/2025-10/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_override_wins() {
        let cfg = AdminClientConfig {
            endpoint_override: Some("http://127.0.0.1:9999/graphql".to_string()),
            ..config()
        };
        assert_eq!(cfg.endpoint(), "http://127.0.0.1:9999/graphql");
    }

    #[test]
    fn test_product_from_node_parses_notes_and_image() {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/7",
            "title": "Red Shirt",
            "metafield": { "value": "[{\"id\":1,\"title\":\"a\",\"description\":\"b\"}]" },
            "media": { "nodes": [ { "preview": { "image": { "url": "https://cdn/x.png", "altText": null } } } ] }
        }))
        .unwrap();

        let product = product_from_node(node).unwrap();
        assert_eq!(product.id.numeric(), "7");
        assert_eq!(product.notes.len(), 1);
        assert_eq!(product.image.unwrap().url, "https://cdn/x.png");
    }

    #[test]
    fn test_product_from_node_malformed_metafield() {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/7",
            "title": "Blue Hat",
            "metafield": { "value": "[{\"title\":" },
            "media": null
        }))
        .unwrap();

        let product = product_from_node(node).unwrap();
        assert!(product.notes.is_empty());
        assert!(product.image.is_none());
    }

    #[test]
    fn test_user_errors_display() {
        let err = ShopifyError::UserErrors(vec![UserError {
            field: Some(vec!["metafields".into(), "0".into(), "value".into()]),
            message: "is invalid".into(),
            code: Some("INVALID".into()),
        }]);
        assert_eq!(err.to_string(), "metafield rejected: metafields.0.value: is invalid");
    }
}
