//! HTTP source for the data artifacts.

use async_trait::async_trait;
use authguide_core::{RoleRecord, RoleSummary, System, Team};
use reqwest::StatusCode;
use tracing::info;

use crate::bundle::{RolesIndex, SystemsIndex, TeamsIndex, roles_index_key};
use crate::{BundleSource, DataError, bundle};

/// Fetches the preprocessed artifacts from a static file host.
///
/// `base_url` should be like `http://localhost:8080` (no trailing slash);
/// artifacts live under `{base_url}/data/`.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, artifact: &str) -> String {
        format!("{}/data/{artifact}", self.base_url)
    }

    async fn get_text(&self, artifact: &str) -> Result<(StatusCode, String), DataError> {
        let url = self.url(artifact);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok((status, body))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, artifact: &str) -> Result<T, DataError> {
        let (status, body) = self.get_text(artifact).await?;
        if !status.is_success() {
            return Err(DataError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl BundleSource for HttpSource {
    async fn fetch_teams(&self) -> Result<Vec<Team>, DataError> {
        let index: TeamsIndex = self.get_json("index_teams.json").await?;
        let teams = bundle::dedup_teams(index.teams);
        info!(count = teams.len(), "fetched teams");
        Ok(teams)
    }

    async fn fetch_systems_by_team(&self, team_code: &str) -> Result<Vec<System>, DataError> {
        let mut index: SystemsIndex = self.get_json("index_systems_by_team.json").await?;
        Ok(index.remove(team_code).unwrap_or_default())
    }

    async fn fetch_roles_by_team_sys(
        &self,
        team_code: &str,
        sys_code: &str,
    ) -> Result<Vec<RoleSummary>, DataError> {
        let mut index: RolesIndex = self.get_json("index_roles_by_team_sys.json").await?;
        Ok(index
            .remove(&roles_index_key(team_code, sys_code))
            .unwrap_or_default())
    }

    async fn fetch_role_bundle(&self, team_code: &str) -> Result<Vec<RoleRecord>, DataError> {
        let artifact = format!("by_team/role_bundle_team_{team_code}.jsonl");
        let (status, body) = self.get_text(&artifact).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(DataError::BundleMissing {
                team: team_code.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let records = bundle::parse_bundle(&body);
        info!(team = team_code, count = records.len(), "fetched role bundle");
        Ok(records)
    }
}
