use async_trait::async_trait;
use authguide_core::{RoleRecord, RoleSummary, System, Team};

use crate::DataError;

/// Read access to the preprocessed permission artifacts.
///
/// All four fetches are independent; callers decide which failures block
/// which parts of the surface. Team lists come back de-duplicated by
/// normalised team code.
#[async_trait]
pub trait BundleSource: Send + Sync {
    async fn fetch_teams(&self) -> Result<Vec<Team>, DataError>;

    async fn fetch_systems_by_team(&self, team_code: &str) -> Result<Vec<System>, DataError>;

    async fn fetch_roles_by_team_sys(
        &self,
        team_code: &str,
        sys_code: &str,
    ) -> Result<Vec<RoleSummary>, DataError>;

    /// The full per-team bundle. Malformed JSONL lines are skipped
    /// individually; a missing artifact is [`DataError::BundleMissing`].
    async fn fetch_role_bundle(&self, team_code: &str) -> Result<Vec<RoleRecord>, DataError>;
}
