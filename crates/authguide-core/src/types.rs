//! Shared wire types for the permission/menu guide.
//!
//! Field names follow the preprocessed data artifacts (`index_teams.json`,
//! `index_systems_by_team.json`, `role_bundle_team_*.jsonl`) so every struct
//! deserialises straight off the loader.

use serde::{Deserialize, Serialize};

/// An organisational team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_code: String,
    pub team_name: String,
}

/// A target system within a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub sys_code: String,
    pub sys_name: String,
}

/// A role as listed in the per-team-system index (no menus attached).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummary {
    pub auth_code: String,
    pub auth_name: String,
    pub auth_desc: String,
}

/// One menu location a role unlocks.
///
/// `path` is a `>`-delimited breadcrumb of 1–3+ levels. Missing levels show
/// up as empty or literal `"null"` segments — they mean "no deeper level",
/// not label text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub path: String,
    pub menu_id: String,
}

/// One raw row of the per-team role bundle (JSONL).
///
/// Rows may repeat the same logical role across near-duplicate lines; the
/// aggregation engine collapses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub team_code: String,
    pub team_name: String,
    pub sys_code: String,
    pub sys_name: String,
    pub auth_code: String,
    pub auth_name: String,
    pub auth_desc: String,
    #[serde(default)]
    pub menus: Vec<Menu>,
}

/// The classified purpose of a free-text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentKind {
    /// Which menus does a given role unlock?
    RoleToMenu,
    /// Which role is needed to reach a given menu?
    MenuToRole,
    /// List every role in the selected team/system.
    RoleList,
    /// Could not be determined.
    Unknown,
}

impl IntentKind {
    /// Wire name used by the classifier service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleToMenu => "ROLE_TO_MENU",
            Self::MenuToRole => "MENU_TO_ROLE",
            Self::RoleList => "ROLE_LIST",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse a wire name. Anything outside the four valid values is
    /// [`IntentKind::Unknown`] — the caller never sees a parse failure.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "ROLE_TO_MENU" => Self::RoleToMenu,
            "MENU_TO_ROLE" => Self::MenuToRole,
            "ROLE_LIST" => Self::RoleList,
            _ => Self::Unknown,
        }
    }
}

/// Classification verdict for one query.
#[derive(Debug, Clone)]
pub struct IntentResult {
    pub kind: IntentKind,
    pub keyword: String,
    pub candidates: Vec<String>,
    pub message: String,
    pub confidence: f32,
}

impl IntentResult {
    /// An `UNKNOWN` verdict carrying a message for the user.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            kind: IntentKind::Unknown,
            keyword: String::new(),
            candidates: Vec::new(),
            message: message.into(),
            confidence: 0.0,
        }
    }
}
