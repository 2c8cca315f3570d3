//! GitLab project variables API client.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use super::types::{CreateVariableOptions, ProjectVariable, UpdateVariableOptions};
use crate::config::ProviderConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};

/// Largest page size GitLab accepts
const PER_PAGE: u32 = 100;

/// Header carrying the next page number on paginated responses
const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Remote operations needed to manage project variables.
///
/// Implementations must be shareable across concurrently running resources.
#[async_trait]
pub trait VariablesApi: Send + Sync {
    /// Create a variable in `project`
    async fn create_variable(
        &self,
        project: &str,
        options: &CreateVariableOptions,
    ) -> Result<ProjectVariable>;

    /// List every variable of `project`, across all scopes
    async fn list_variables(&self, project: &str) -> Result<Vec<ProjectVariable>>;

    /// Update the variable addressed by `project` and `key`
    async fn update_variable(
        &self,
        project: &str,
        key: &str,
        options: &UpdateVariableOptions,
    ) -> Result<ProjectVariable>;

    /// Remove the variable addressed by `project` and `key`
    async fn remove_variable(&self, project: &str, key: &str) -> Result<()>;
}

/// REST client for the project variables endpoints.
///
/// Project identifiers may be numeric IDs or full paths such as
/// `group/subgroup/app`; paths are percent-encoded into a single segment.
#[derive(Debug)]
pub struct GitLabClient {
    http: HttpClient,
}

impl GitLabClient {
    /// Create a client from provider settings
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = ProviderConfig::from_file("provider.yaml")?.with_env();
    /// let client = GitLabClient::new(&config)?;
    /// ```
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = HttpClient::with_config(config.http_client_config()?)?;
        Ok(Self { http })
    }

    /// Wrap an already configured HTTP client
    pub fn with_http(http: HttpClient) -> Self {
        Self { http }
    }

    fn variables_path(project: &str) -> String {
        format!("projects/{}/variables", urlencoding::encode(project))
    }

    fn variable_path(project: &str, key: &str) -> String {
        format!(
            "{}/{}",
            Self::variables_path(project),
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl VariablesApi for GitLabClient {
    async fn create_variable(
        &self,
        project: &str,
        options: &CreateVariableOptions,
    ) -> Result<ProjectVariable> {
        let body = serde_json::to_value(options)?;
        let response = self.http.post(&Self::variables_path(project), body).await?;
        Ok(response.json().await?)
    }

    async fn list_variables(&self, project: &str) -> Result<Vec<ProjectVariable>> {
        let path = Self::variables_path(project);
        let mut variables = Vec::new();
        let mut page: u32 = 1;

        loop {
            let config = RequestConfig::new()
                .query("page", page.to_string())
                .query("per_page", PER_PAGE.to_string());
            let response = self.http.request(Method::GET, &path, config).await?;

            let next_page = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u32>().ok());

            let batch: Vec<ProjectVariable> = response.json().await?;
            debug!(project, page, count = batch.len(), "listed project variables");
            variables.extend(batch);

            match next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(variables)
    }

    async fn update_variable(
        &self,
        project: &str,
        key: &str,
        options: &UpdateVariableOptions,
    ) -> Result<ProjectVariable> {
        let body = serde_json::to_value(options)?;
        let response = self
            .http
            .put(&Self::variable_path(project, key), body)
            .await?;
        Ok(response.json().await?)
    }

    async fn remove_variable(&self, project: &str, key: &str) -> Result<()> {
        self.http
            .delete(&Self::variable_path(project, key))
            .await?;
        Ok(())
    }
}
