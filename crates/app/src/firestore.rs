//! Firestore REST client for reservation documents.

use async_trait::async_trait;
use jiff::Timestamp;
use reqwest::Client;
use reserva::{
    reservation::{ReservationId, ReservationRequest},
    store::{ReservationStore, ReservationStoreError},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{Span, info, warn};
use uuid::Uuid;

use crate::config::FirestoreConfig;

/// Header carrying the API key, so the key never ends up in a URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Document field names used by the reservations collection.
mod fields {
    pub(super) const CUSTOMER_NAME: &str = "nombre";
    pub(super) const CUSTOMER_PHONE: &str = "telefono";
    pub(super) const COMMENTS: &str = "comentarios";
    pub(super) const PRODUCT_LINES: &str = "productos";
    pub(super) const TOTAL_DISPLAY: &str = "montoTotal";
    pub(super) const SUBMITTED_AT: &str = "fecha";
}

/// A document created by [`FirestoreClient::create_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDocument {
    /// Document identifier within the collection.
    pub id: String,

    /// Server commit time, when the response carried a parseable one.
    pub commit_time: Option<Timestamp>,
}

/// HTTP client for the Firestore `documents:commit` endpoint.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    config: FirestoreConfig,
    http: Client,
}

impl FirestoreClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: FirestoreConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Full resource name of a reservation document.
    #[must_use]
    pub fn document_name(&self, id: &str) -> String {
        format!(
            "{}/documents/{}/{id}",
            self.config.database_path(),
            self.config.collection
        )
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/{}/documents:commit",
            self.config.base_url.trim_end_matches('/'),
            self.config.database_path()
        )
    }

    /// Create a reservation document with a server-assigned timestamp.
    ///
    /// The write fails if a document with the generated identifier already
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx response.
    #[tracing::instrument(
        name = "firestore.create_document",
        skip_all,
        fields(collection = %self.config.collection, document_id = tracing::field::Empty)
    )]
    pub async fn create_document(
        &self,
        request: &ReservationRequest,
    ) -> Result<CreatedDocument, FirestoreError> {
        let id = Uuid::now_v7().to_string();

        Span::current().record("document_id", tracing::field::display(&id));

        let body = commit_body(&self.document_name(&id), request);

        let response = self
            .http
            .post(self.commit_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();

            return Err(FirestoreError::UnexpectedResponse { status, body: text });
        }

        let parsed: CommitResponse = response.json().await?;
        let commit_time = parsed.commit_time.as_deref().and_then(parse_commit_time);

        info!(document_id = %id, commit_time = ?commit_time, "created reservation document");

        Ok(CreatedDocument { id, commit_time })
    }
}

#[async_trait]
impl ReservationStore for FirestoreClient {
    async fn create_reservation(
        &self,
        request: ReservationRequest,
    ) -> Result<ReservationId, ReservationStoreError> {
        let created = self.create_document(&request).await?;

        Ok(ReservationId::new(created.id))
    }
}

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

fn commit_body(document_name: &str, request: &ReservationRequest) -> Value {
    let product_lines: Vec<Value> = request
        .product_lines()
        .iter()
        .map(|line| string_value(line))
        .collect();

    let mut document_fields = Map::new();
    document_fields.insert(
        fields::CUSTOMER_NAME.to_string(),
        string_value(request.customer_name()),
    );
    document_fields.insert(
        fields::CUSTOMER_PHONE.to_string(),
        string_value(request.customer_phone()),
    );
    document_fields.insert(fields::COMMENTS.to_string(), string_value(request.comments()));
    document_fields.insert(
        fields::PRODUCT_LINES.to_string(),
        json!({ "arrayValue": { "values": product_lines } }),
    );
    document_fields.insert(
        fields::TOTAL_DISPLAY.to_string(),
        string_value(request.total_display()),
    );

    json!({
        "writes": [{
            "update": {
                "name": document_name,
                "fields": document_fields,
            },
            "currentDocument": { "exists": false },
            "updateTransforms": [{
                "fieldPath": fields::SUBMITTED_AT,
                "setToServerValue": "REQUEST_TIME",
            }],
        }],
    })
}

fn parse_commit_time(raw: &str) -> Option<Timestamp> {
    match raw.parse::<Timestamp>() {
        Ok(timestamp) => Some(timestamp),
        Err(error) => {
            warn!(commit_time = raw, %error, "unparseable commit time");

            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    commit_time: Option<String>,
}

/// Errors that can occur when communicating with Firestore.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Firestore returned a non-2xx response.
    #[error("unexpected response from Firestore ({status}): {body}")]
    UnexpectedResponse {
        /// HTTP status code.
        status: u16,

        /// Response body.
        body: String,
    },
}

impl From<FirestoreError> for ReservationStoreError {
    fn from(error: FirestoreError) -> Self {
        match error {
            FirestoreError::Http(source) => Self::Transport(Box::new(source)),
            FirestoreError::UnexpectedResponse { status, body } => {
                Self::Rejected(format!("status {status}: {body}"))
            }
        }
    }
}
