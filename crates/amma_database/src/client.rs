use amma_core::{DatabaseConfig, FileRecord, NewFileRecord};
use amma_error::{AmmaResult, DatabaseError, DatabaseErrorKind};
use amma_interface::PatientFileStore;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

const REST_PATH: &str = "rest/v1";

/// Client for a Supabase project's PostgREST endpoint.
///
/// One instance is created per process and shared by every component.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    api_key: String,
    files_table: String,
    users_table: String,
}

impl SupabaseClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Project URL, e.g. `https://xyz.supabase.co`
    /// * `api_key` - Anon or service key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let defaults = DatabaseConfig::default();
        debug!("Creating new Supabase client");
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            files_table: defaults.files_table,
            users_table: defaults.users_table,
        }
    }

    /// Creates a client from configuration, resolving the key from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no key is available.
    pub fn from_config(config: &DatabaseConfig) -> AmmaResult<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(&config.url, api_key)
            .with_tables(&config.files_table, &config.users_table))
    }

    /// Overrides the table names.
    pub fn with_tables(mut self, files_table: &str, users_table: &str) -> Self {
        self.files_table = files_table.to_string();
        self.users_table = users_table.to_string();
        self
    }

    /// REST URL of a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// `select=*` on a table with optional `eq` filters.
    #[instrument(skip(self, filters), fields(table = %table))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> AmmaResult<Vec<T>> {
        let mut query = vec![("select".to_string(), "*".to_string())];
        query.extend(
            filters
                .iter()
                .map(|(column, value)| (column.to_string(), format!("eq.{value}"))),
        );

        debug!(filters = filters.len(), "Selecting rows");
        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send select request");
                DatabaseError::new(DatabaseErrorKind::Request(e.to_string()))
            })?;

        Self::decode(response).await
    }

    /// Insert rows and return the representation the service echoes back.
    #[instrument(skip(self, rows), fields(table = %table))]
    pub async fn insert<R, T>(&self, table: &str, rows: &[R]) -> AmmaResult<Vec<T>>
    where
        R: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(rows = rows.len(), "Inserting rows");
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send insert request");
                DatabaseError::new(DatabaseErrorKind::Request(e.to_string()))
            })?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AmmaResult<Vec<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Database returned error");
            return Err(DatabaseError::new(DatabaseErrorKind::Status {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let body = response.text().await.map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Request(format!(
                "Failed to read response body: {e}"
            )))
        })?;

        // PostgREST answers `201` with an empty body when no representation is requested.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<T> = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, "Failed to parse database response");
            DatabaseError::new(DatabaseErrorKind::Parse(e.to_string()))
        })?;
        debug!(rows = rows.len(), "Decoded rows");
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl PatientFileStore for SupabaseClient {
    #[instrument(skip(self))]
    async fn files_for_patient(&self, patient_email: &str) -> AmmaResult<Vec<FileRecord>> {
        self.select(&self.files_table, &[("patient_email", patient_email)])
            .await
    }

    async fn all_files(&self) -> AmmaResult<Vec<FileRecord>> {
        self.select(&self.files_table, &[]).await
    }

    #[instrument(skip(self, record), fields(patient = %record.patient_email()))]
    async fn insert_file(&self, record: &NewFileRecord) -> AmmaResult<Vec<FileRecord>> {
        self.insert(&self.files_table, std::slice::from_ref(record))
            .await
    }

    async fn count_users(&self) -> AmmaResult<usize> {
        let rows: Vec<serde_json::Value> = self.select(&self.users_table, &[]).await?;
        Ok(rows.len())
    }
}
