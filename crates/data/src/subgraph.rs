//! A client for querying Graph-node style subgraph endpoints.
//!
//! Each chain is reached through its own full endpoint URL; the client does
//! not expose general GraphQL but runs fixed query strings and decodes typed
//! `data` payloads.

use reqwest::{Client, IntoUrl, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while querying a subgraph endpoint.
#[derive(Debug, Error)]
pub enum SubgraphError {
    /// HTTP transport or status failure.
    #[error("subgraph transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with a GraphQL error.
    #[error("subgraph query error: {0}")]
    Query(String),
    /// The response envelope had neither usable data nor errors.
    #[error("invalid subgraph response envelope")]
    InvalidResponse,
}

/// A thin GraphQL-over-HTTP client bound to one subgraph endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    client: Client,
    endpoint: Url,
}

impl SubgraphClient {
    /// Creates a client for the given endpoint URL.
    ///
    /// # Errors
    /// Returns an error if `endpoint` is not a valid URL.
    pub fn new(client: Client, endpoint: impl IntoUrl) -> Result<Self, SubgraphError> {
        Ok(Self {
            client,
            endpoint: endpoint.into_url()?,
        })
    }

    /// Runs `query` with `variables` and decodes the `data` payload.
    ///
    /// # Errors
    /// Returns an error on transport failure, a GraphQL error envelope, or a
    /// malformed response.
    pub async fn query<T>(&self, query: &str, variables: Value) -> Result<T, SubgraphError>
    where
        T: DeserializeOwned,
    {
        self.client
            .post(self.endpoint.clone())
            .json(&QueryBody { query, variables })
            .send()
            .await?
            .error_for_status()?
            .json::<QueryResponse<T>>()
            .await?
            .into_result()
    }
}

/// A GraphQL request body.
#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    variables: Value,
}

/// A GraphQL response envelope, converted into a `Result` while rejecting
/// responses with missing data or mixed data and errors.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct QueryResponse<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<QueryError>>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    message: String,
}

impl<T> QueryResponse<T> {
    fn into_result(self) -> Result<T, SubgraphError> {
        match self {
            Self {
                data: Some(data),
                errors: None,
            } => Ok(data),
            Self {
                data: None,
                errors: Some(mut errors),
            } if !errors.is_empty() => {
                // The first error bubbles up; the rest still deserve a trace.
                for error in &errors[1..] {
                    tracing::warn!("additional GraphQL error: {}", error.message);
                }
                Err(SubgraphError::Query(errors.swap_remove(0).message))
            }
            _ => Err(SubgraphError::InvalidResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_from_json<T>(value: Value) -> Result<T, SubgraphError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value::<QueryResponse<T>>(value)
            .unwrap()
            .into_result()
    }

    #[test]
    fn test_serialize_query_body() {
        let body = QueryBody {
            query: "{ pairs { id } }",
            variables: json!({ "account": "0xabc" }),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "query": "{ pairs { id } }",
                "variables": { "account": "0xabc" },
            }),
        );
    }

    #[test]
    fn test_successful_response() {
        assert!(response_from_json::<bool>(json!({ "data": true })).unwrap());
    }

    #[test]
    fn test_error_response_surfaces_first_message() {
        let err = response_from_json::<bool>(json!({
            "data": null,
            "errors": [
                { "message": "first" },
                { "message": "second" },
            ],
        }))
        .unwrap_err();
        assert!(matches!(err, SubgraphError::Query(message) if message == "first"));
    }

    #[test]
    fn test_invalid_envelopes_rejected() {
        for value in [
            json!({ "data": null, "errors": null }),
            json!({ "data": null, "errors": [] }),
            json!({ "data": true, "errors": [{ "message": "bad" }] }),
            json!({}),
        ] {
            let err = response_from_json::<bool>(value).unwrap_err();
            assert!(matches!(err, SubgraphError::InvalidResponse));
        }
    }
}
