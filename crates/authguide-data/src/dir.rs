//! Local-directory source over the same artifact layout.
//!
//! Lets the CLI run against a `data/` export on disk, and gives tests a
//! transport-free implementation of [`BundleSource`].

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use authguide_core::{RoleRecord, RoleSummary, System, Team};

use crate::bundle::{RolesIndex, SystemsIndex, TeamsIndex, roles_index_key};
use crate::{BundleSource, DataError, bundle};

/// Reads artifacts from `{root}/data/`.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_path(&self, artifact: &str) -> PathBuf {
        self.root.join("data").join(artifact)
    }

    async fn read_text(&self, artifact: &str) -> Result<String, DataError> {
        let path = self.artifact_path(artifact);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DataError::Io { path, source })
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, artifact: &str) -> Result<T, DataError> {
        let text = self.read_text(artifact).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl BundleSource for DirSource {
    async fn fetch_teams(&self) -> Result<Vec<Team>, DataError> {
        let index: TeamsIndex = self.read_json("index_teams.json").await?;
        Ok(bundle::dedup_teams(index.teams))
    }

    async fn fetch_systems_by_team(&self, team_code: &str) -> Result<Vec<System>, DataError> {
        let mut index: SystemsIndex = self.read_json("index_systems_by_team.json").await?;
        Ok(index.remove(team_code).unwrap_or_default())
    }

    async fn fetch_roles_by_team_sys(
        &self,
        team_code: &str,
        sys_code: &str,
    ) -> Result<Vec<RoleSummary>, DataError> {
        let mut index: RolesIndex = self.read_json("index_roles_by_team_sys.json").await?;
        Ok(index
            .remove(&roles_index_key(team_code, sys_code))
            .unwrap_or_default())
    }

    async fn fetch_role_bundle(&self, team_code: &str) -> Result<Vec<RoleRecord>, DataError> {
        let artifact = format!("by_team/role_bundle_team_{team_code}.jsonl");
        match self.read_text(&artifact).await {
            Ok(text) => Ok(bundle::parse_bundle(&text)),
            Err(DataError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Err(DataError::BundleMissing {
                    team: team_code.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }
}
