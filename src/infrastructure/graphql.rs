// src/infrastructure/graphql.rs
use crate::application::NoteGateway;
use crate::domain::{DomainError, NoteDraft, NoteRecord};
use crate::infrastructure::config::ApiConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

const LIST_NOTES: &str = "query ListNotes {
  listNotes {
    items { id name description image }
  }
}";

const CREATE_NOTE: &str = "mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) { id name description image }
}";

const DELETE_NOTE: &str = "mutation DeleteNote($input: DeleteNoteInput!) {
  deleteNote(input: $input) { id }
}";

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListNotesData {
    #[serde(rename = "listNotes")]
    list_notes: NoteConnection,
}

#[derive(Debug, Deserialize)]
struct NoteConnection {
    items: Vec<NoteRecord>,
}

#[derive(Debug, Deserialize)]
struct CreateNoteData {
    #[serde(rename = "createNote")]
    create_note: NoteRecord,
}

#[derive(Debug, Deserialize)]
struct DeleteNoteData {
    #[serde(rename = "deleteNote")]
    #[allow(dead_code)]
    delete_note: Option<Value>,
}

/// Note gateway speaking GraphQL over HTTP
pub struct GraphQlGateway {
    endpoint: String,
    api_key: Option<String>,
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl GraphQlGateway {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: None,
            bearer_token: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            bearer_token: config.bearer_token.clone(),
            client,
        })
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_bearer_token(mut self, token: &str) -> Self {
        self.bearer_token = Some(token.to_string());
        self
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, DomainError> {
        let gateway_error =
            |message: String| DomainError::Gateway(format!("{operation}: {message}"));

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| gateway_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(gateway_error(format!("Status: {status}")));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| gateway_error(format!("Invalid response: {e}")))?;

        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(gateway_error(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| gateway_error("Response has no data".to_string()))
    }
}

#[async_trait]
impl NoteGateway for GraphQlGateway {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<NoteRecord>, DomainError> {
        let data: ListNotesData = self.execute("listNotes", LIST_NOTES, json!({})).await?;
        debug!(count = data.list_notes.items.len(), "listNotes answered");
        Ok(data.list_notes.items)
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, input: &NoteDraft) -> Result<NoteRecord, DomainError> {
        let data: CreateNoteData = self
            .execute("createNote", CREATE_NOTE, json!({ "input": input }))
            .await?;
        Ok(data.create_note)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        let _: DeleteNoteData = self
            .execute("deleteNote", DELETE_NOTE, json!({ "input": { "id": id } }))
            .await?;
        Ok(())
    }
}
