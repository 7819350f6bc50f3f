//! Shared parsing for the artifact payloads.

use std::collections::HashMap;
use std::collections::HashSet;

use authguide_core::{RoleRecord, RoleSummary, System, Team, normalize};
use serde::Deserialize;
use tracing::warn;

/// `index_teams.json` payload.
#[derive(Deserialize)]
pub(crate) struct TeamsIndex {
    pub teams: Vec<Team>,
}

/// `index_systems_by_team.json` payload: team code → systems.
pub(crate) type SystemsIndex = HashMap<String, Vec<System>>;

/// `index_roles_by_team_sys.json` payload: `"{team}|{sys}"` → roles.
pub(crate) type RolesIndex = HashMap<String, Vec<RoleSummary>>;

pub(crate) fn roles_index_key(team_code: &str, sys_code: &str) -> String {
    format!("{team_code}|{sys_code}")
}

/// Parse a JSONL bundle artifact, one [`RoleRecord`] per line.
///
/// Each line parses independently; a malformed line is dropped with a
/// warning rather than failing the whole fetch.
pub fn parse_bundle(text: &str) -> Vec<RoleRecord> {
    let mut records = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<RoleRecord>(line) {
            Ok(rec) => records.push(rec),
            Err(err) => {
                warn!(lineno = lineno + 1, %err, "skipping malformed bundle line");
            }
        }
    }
    records
}

/// De-duplicate a team list by normalised team code, keeping first-seen.
pub fn dedup_teams(teams: Vec<Team>) -> Vec<Team> {
    let mut seen = HashSet::new();
    teams
        .into_iter()
        .filter(|t| seen.insert(normalize(&t.team_code)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bundle_reads_each_line() {
        let text = concat!(
            r#"{"team_code":"T1","team_name":"영업팀","sys_code":"S1","sys_name":"판매","auth_code":"R01","auth_name":"영업","auth_desc":"","menus":[]}"#,
            "\n",
            r#"{"team_code":"T1","team_name":"영업팀","sys_code":"S1","sys_name":"판매","auth_code":"R02","auth_name":"정산","auth_desc":"","menus":[]}"#,
            "\n",
        );
        let records = parse_bundle(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].auth_code, "R02");
    }

    #[test]
    fn parse_bundle_skips_malformed_lines() {
        let text = concat!(
            r#"{"team_code":"T1","team_name":"영업팀","sys_code":"S1","sys_name":"판매","auth_code":"R01","auth_name":"영업","auth_desc":""}"#,
            "\n",
            "{not json at all\n",
            "\n",
            r#"{"team_code":"T1"}"#,
            "\n",
            r#"{"team_code":"T1","team_name":"영업팀","sys_code":"S1","sys_name":"판매","auth_code":"R03","auth_name":"조회","auth_desc":""}"#,
            "\n",
        );
        let records = parse_bundle(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].auth_code, "R01");
        assert_eq!(records[1].auth_code, "R03");
    }

    #[test]
    fn parse_bundle_empty_input() {
        assert!(parse_bundle("").is_empty());
        assert!(parse_bundle("\n\n").is_empty());
    }

    #[test]
    fn dedup_teams_by_normalised_code() {
        let teams = vec![
            Team {
                team_code: "T1".into(),
                team_name: "영업팀".into(),
            },
            Team {
                team_code: " t1 ".into(),
                team_name: "영업팀(중복)".into(),
            },
            Team {
                team_code: "T2".into(),
                team_name: "재무팀".into(),
            },
        ];
        let out = dedup_teams(teams);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].team_name, "영업팀");
        assert_eq!(out[1].team_code, "T2");
    }

    #[test]
    fn roles_index_key_shape() {
        assert_eq!(roles_index_key("T1", "S1"), "T1|S1");
    }
}
