//! GraphQL documents and wire types for the Admin API

use serde::{Deserialize, Serialize};

/// Products page with the notes metafield and first preview image
pub const PRODUCTS_WITH_NOTES: &str = r#"
query ProductsWithNotes($first: Int!, $after: String, $namespace: String!, $key: String!) {
  products(first: $first, after: $after) {
    edges {
      cursor
      node {
        id
        title
        metafield(namespace: $namespace, key: $key) {
          value
        }
        media(first: 1) {
          nodes {
            preview {
              image {
                altText
                url
              }
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

/// Notes metafield of a single product
pub const PRODUCT_NOTES: &str = r#"
query ProductNotes($id: ID!, $namespace: String!, $key: String!) {
  product(id: $id) {
    id
    metafield(namespace: $namespace, key: $key) {
      value
    }
  }
}
"#;

/// Overwrite the notes metafield of a product
pub const SET_NOTES_METAFIELD: &str = r#"
mutation SetNotesMetafield($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields {
      id
      namespace
      key
    }
    userErrors {
      field
      message
      code
    }
  }
}
"#;

// ============================================================================
// Envelope
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorMessage {
    pub message: String,
}

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct ProductsVariables<'a> {
    pub first: usize,
    pub after: Option<&'a str>,
    pub namespace: &'a str,
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductNotesVariables<'a> {
    pub id: &'a str,
    pub namespace: &'a str,
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetafieldsSetInput<'a> {
    pub owner_id: &'a str,
    pub namespace: &'a str,
    pub key: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MetafieldsSetVariables<'a> {
    pub metafields: [MetafieldsSetInput<'a>; 1],
}

// ============================================================================
// Response data
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    pub products: ProductConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductConnection {
    pub edges: Vec<ProductEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductEdge {
    pub node: ProductNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductNode {
    pub id: String,
    pub title: String,
    pub metafield: Option<MetafieldValue>,
    pub media: Option<MediaConnection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetafieldValue {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaConnection {
    #[serde(default)]
    pub nodes: Vec<MediaNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaNode {
    pub preview: Option<MediaPreview>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaPreview {
    pub image: Option<ImageNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageNode {
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductNotesData {
    pub product: Option<ProductMetafieldNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductMetafieldNode {
    pub metafield: Option<MetafieldValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetafieldsSetData {
    pub metafields_set: Option<MetafieldsSetPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetafieldsSetPayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
    pub code: Option<String>,
}
