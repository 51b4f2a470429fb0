//! HTTPS client for the hosted document store.
//!
//! Speaks the Appwrite-style REST API: documents live under
//! `{endpoint}/databases/{db}/collections/{collection}/documents`, listings are
//! narrowed with JSON-encoded `queries[]` parameters and every request carries
//! the project id header.

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::TaskSource;
use crate::error::BackendError;
use crate::task::{EnergyLevel, Priority, Task, TaskRecord};

/// Resolved connection settings, secrets included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// API root, e.g. `https://cloud.example.io/v1`
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub tasks_collection: String,
    pub energy_collection: String,
    pub api_key: Option<String>,
}

/// A listing query, serialized the way the store expects.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, values: Vec<Value> },
    OrderDesc(String),
    Limit(u32),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    pub fn to_json(&self) -> String {
        match self {
            Query::Equal { attribute, values } => {
                json!({ "method": "equal", "attribute": attribute, "values": values })
            }
            Query::OrderDesc(attribute) => json!({ "method": "orderDesc", "attribute": attribute }),
            Query::Limit(n) => json!({ "method": "limit", "values": [n] }),
        }
        .to_string()
    }
}

/// Fields of a task to be created. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub course: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
struct DocumentList<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
}

#[derive(Debug, Deserialize, Serialize)]
struct EnergyLogRecord {
    #[serde(default)]
    level: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the document store.
pub struct DocumentStoreClient {
    settings: StoreSettings,
    http_client: Client,
}

impl DocumentStoreClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` if the endpoint is not an absolute http(s) URL
    /// or a required identifier is empty.
    pub fn new(settings: StoreSettings) -> Result<Self, BackendError> {
        let endpoint = Url::parse(&settings.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(BackendError::NotConfigured(format!(
                "endpoint must be http(s), got '{}'",
                settings.endpoint
            )));
        }
        for (name, value) in [
            ("project_id", &settings.project_id),
            ("database_id", &settings.database_id),
            ("tasks_collection", &settings.tasks_collection),
            ("energy_collection", &settings.energy_collection),
        ] {
            if value.trim().is_empty() {
                return Err(BackendError::NotConfigured(format!("{name} is empty")));
            }
        }
        Ok(Self {
            settings,
            http_client: Client::new(),
        })
    }

    fn documents_url(&self, collection: &str) -> Result<Url, BackendError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.database_id,
            collection
        );
        Ok(Url::parse(&url)?)
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-Appwrite-Project", &self.settings.project_id);
        match &self.settings.api_key {
            Some(key) => request.header("X-Appwrite-Key", key),
            None => request,
        }
    }

    async fn check_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// List documents of `collection` matching `queries`.
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<Vec<T>, BackendError> {
        let url = self.documents_url(collection)?;
        let mut request = self.with_headers(self.http_client.get(url));
        for query in queries {
            request = request.query(&[("queries[]", query.to_json())]);
        }

        let response = Self::check_status(request.send().await?).await?;
        let list: DocumentList<T> = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        Ok(list.documents)
    }

    /// Create a task document owned by `owner_id` and return it validated.
    pub async fn create_task(&self, owner_id: &str, task: &NewTask) -> Result<Task, BackendError> {
        let url = self.documents_url(&self.settings.tasks_collection)?;
        let mut data = json!({
            "userId": owner_id,
            "title": task.title,
            "course": task.course,
            "dueDate": task.due_date.format("%Y-%m-%d").to_string(),
            "priority": task.priority.as_str(),
            "tags": task.tags,
            "progress": 0,
        });
        if let Some(description) = &task.description {
            data["description"] = json!(description);
        }
        let body = json!({ "documentId": "unique()", "data": data });

        let request = self.with_headers(self.http_client.post(url)).json(&body);
        let response = Self::check_status(request.send().await?).await?;
        let record: TaskRecord = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        tracing::debug!(task_id = %record.id, owner_id, "task created");
        Task::try_from(record).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

impl TaskSource for DocumentStoreClient {
    async fn list_tasks(&self, owner_id: &str) -> Result<Vec<TaskRecord>, BackendError> {
        self.list_documents(
            &self.settings.tasks_collection,
            &[Query::equal("userId", owner_id)],
        )
        .await
    }

    async fn latest_energy_level(
        &self,
        owner_id: &str,
    ) -> Result<Option<EnergyLevel>, BackendError> {
        let logs: Vec<EnergyLogRecord> = self
            .list_documents(
                &self.settings.energy_collection,
                &[
                    Query::equal("userId", owner_id),
                    Query::OrderDesc("$createdAt".into()),
                    Query::Limit(1),
                ],
            )
            .await?;

        let Some(level) = logs.into_iter().next().and_then(|log| log.level) else {
            return Ok(None);
        };
        match level.parse::<EnergyLevel>() {
            Ok(energy) => Ok(Some(energy)),
            Err(error) => {
                tracing::warn!(owner_id, %error, "ignoring unrecognised energy log");
                Ok(None)
            }
        }
    }
}
