//! Session layer: selection state, the conversation transcript, and the
//! per-turn pipeline around the resolution engine.
//!
//! User messages are appended to the transcript synchronously, before any
//! awaited work, so transcript order always matches submission order.
//! `handle_search` takes `&mut self`, so only one turn is ever in flight.

use std::sync::Arc;

use authguide_ai::{ClassifyContext, IntentClassifier};
use authguide_core::{IntentKind, RoleRecord, RoleSummary, System, Team, normalize};
use authguide_data::BundleSource;
use authguide_data::DataError;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::aggregate::{UnifiedRole, unify_roles};
use crate::paging::PagingCache;
use crate::resolve::{IntentResolver, Resolution};
use crate::search::{RoleMatch, search};

const MSG_SELECT_FIRST: &str = "소속 팀과 대상 시스템을 먼저 선택해 주세요.";
const MSG_NO_MORE: &str = "더 보여드릴 메뉴가 없습니다.";
const MSG_CONTINUED: &str = "이어서 보여드릴게요.";
const MSG_MORE_HINT: &str = "'더 보여줘'라고 입력하면 다음 메뉴를 보여드립니다.";
const MSG_BROADENED: &str = "선택한 시스템에는 없어 팀 전체에서 찾았습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One transcript entry. `results` carries the structured role/menu entries
/// for the presentation layer to render.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
    pub results: Vec<RoleMatch>,
    pub intent: Option<IntentKind>,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
            results: Vec::new(),
            intent: None,
            at: Utc::now(),
        }
    }

    fn assistant(
        content: impl Into<String>,
        results: Vec<RoleMatch>,
        intent: Option<IntentKind>,
    ) -> Self {
        Self {
            speaker: Speaker::Assistant,
            content: content.into(),
            results,
            intent,
            at: Utc::now(),
        }
    }
}

/// Outcome of a team selection. The two fetches fail independently: a
/// systems-index failure is returned as an error, a bundle failure only
/// degrades to an empty bundle with a user-visible note.
#[derive(Debug)]
pub struct TeamSelection {
    pub systems: Vec<System>,
    pub bundle_warning: Option<String>,
}

/// One browser tab's worth of state.
pub struct Session {
    source: Arc<dyn BundleSource>,
    classifier: Arc<dyn IntentClassifier>,
    resolver: IntentResolver,
    teams: Vec<Team>,
    team: Option<Team>,
    systems: Vec<System>,
    system: Option<System>,
    roles: Vec<RoleSummary>,
    bundle: Vec<RoleRecord>,
    paging: PagingCache,
    transcript: Vec<ChatMessage>,
}

impl Session {
    pub fn new(source: Arc<dyn BundleSource>, classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            source,
            classifier,
            resolver: IntentResolver::new(),
            teams: Vec::new(),
            team: None,
            systems: Vec::new(),
            system: None,
            roles: Vec::new(),
            bundle: Vec::new(),
            paging: PagingCache::new(),
            transcript: Vec::new(),
        }
    }

    /// Fetch the team list (already de-duplicated by the loader).
    pub async fn load_teams(&mut self) -> Result<&[Team], DataError> {
        self.teams = self.source.fetch_teams().await?;
        Ok(&self.teams)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn roles(&self) -> &[RoleSummary] {
        &self.roles
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Unified role groups for the current selection (the role browser).
    pub fn unified_roles(&self) -> Vec<UnifiedRole> {
        let sys = self.system.as_ref().map(|s| s.sys_code.as_str());
        unify_roles(&self.bundle, sys)
    }

    /// Role browser data: every role group in the current selection with
    /// its full sorted menu list, optionally narrowed by a menu-path
    /// substring filter.
    pub fn browse_roles(&self, filter: Option<&str>) -> Vec<RoleMatch> {
        let resolution = Resolution {
            intent: IntentKind::RoleToMenu,
            all_menus: true,
            keywords: Vec::new(),
            message: String::new(),
            confidence: 1.0,
        };
        let sys = self.system.as_ref().map(|s| s.sys_code.as_str());
        let mut entries = search(&self.bundle, &resolution, sys).entries;
        if let Some(filter) = filter {
            let filter = normalize(filter);
            if !filter.is_empty() {
                for entry in &mut entries {
                    entry.all_menus.retain(|m| normalize(&m.path).contains(&filter));
                }
            }
        }
        entries
    }

    /// Select a team: systems index and role bundle are fetched as two
    /// independent operations. All prior selection state is discarded.
    pub async fn select_team(&mut self, team_code: &str) -> Result<TeamSelection, DataError> {
        let team = self
            .teams
            .iter()
            .find(|t| normalize(&t.team_code) == normalize(team_code))
            .cloned()
            .unwrap_or_else(|| Team {
                team_code: team_code.to_string(),
                team_name: team_code.to_string(),
            });
        info!(team = %team.team_code, "selecting team");

        self.team = Some(team);
        self.system = None;
        self.systems.clear();
        self.roles.clear();
        self.bundle.clear();
        self.paging.clear();

        let (systems, bundle) = tokio::join!(
            self.source.fetch_systems_by_team(team_code),
            self.source.fetch_role_bundle(team_code),
        );

        self.systems = systems?;
        let bundle_warning = match bundle {
            Ok(records) => {
                self.bundle = records;
                None
            }
            Err(err) if err.is_bundle_missing() => Some(format!(
                "팀({team_code})의 상세 데이터가 없습니다. 역할별 메뉴 조회는 제한됩니다."
            )),
            Err(err) => {
                warn!(%err, team = team_code, "role bundle fetch failed");
                Some("상세 데이터를 불러오는 중 오류가 발생했습니다.".to_string())
            }
        };

        Ok(TeamSelection {
            systems: self.systems.clone(),
            bundle_warning,
        })
    }

    /// Select a system within the current team.
    pub async fn select_system(&mut self, sys_code: &str) -> Result<&[RoleSummary], DataError> {
        let team_code = self
            .team
            .as_ref()
            .map(|t| t.team_code.clone())
            .unwrap_or_default();
        let system = self
            .systems
            .iter()
            .find(|s| normalize(&s.sys_code) == normalize(sys_code))
            .cloned()
            .unwrap_or_else(|| System {
                sys_code: sys_code.to_string(),
                sys_name: sys_code.to_string(),
            });

        self.system = Some(system);
        self.paging.clear();
        self.roles = self
            .source
            .fetch_roles_by_team_sys(&team_code, sys_code)
            .await?;
        Ok(&self.roles)
    }

    /// Run one chat turn. Always produces an assistant message; errors from
    /// classification never surface here.
    pub async fn handle_search(&mut self, input: &str) -> ChatMessage {
        let input = input.trim().to_string();
        self.transcript.push(ChatMessage::user(&input));

        let reply = self.answer(&input).await;
        self.transcript.push(reply.clone());
        reply
    }

    async fn answer(&mut self, input: &str) -> ChatMessage {
        // Continuation takes absolute priority and never classifies.
        if self.resolver.is_show_more(input) && !self.paging.is_empty() {
            return self.continue_paging();
        }

        if self.resolver.is_guide(input) {
            return ChatMessage::assistant(self.resolver.guide_text(), Vec::new(), None);
        }

        let (Some(team), Some(system)) = (self.team.clone(), self.system.clone()) else {
            return ChatMessage::assistant(MSG_SELECT_FIRST, Vec::new(), None);
        };

        let ctx = ClassifyContext {
            team_name: team.team_name.clone(),
            system_name: system.sys_name.clone(),
        };
        let resolution = self
            .resolver
            .resolve(input, &ctx, self.classifier.as_ref())
            .await;

        if resolution.intent == IntentKind::Unknown {
            self.paging.clear();
            return ChatMessage::assistant(
                resolution.message,
                Vec::new(),
                Some(IntentKind::Unknown),
            );
        }

        let outcome = search(&self.bundle, &resolution, Some(&system.sys_code));

        if outcome.entries.is_empty() {
            self.paging.clear();
            let content = format!(
                "'{} / {}'에서 검색 결과를 찾지 못했습니다. 다른 키워드로 질문해 주세요.",
                team.team_name, system.sys_name
            );
            return ChatMessage::assistant(content, Vec::new(), Some(resolution.intent));
        }

        let mut entries = outcome.entries;
        let mut content = resolution.message.clone();
        if outcome.broadened {
            content.push_str(&format!("\n({MSG_BROADENED})"));
        }

        if resolution.intent == IntentKind::RoleToMenu && resolution.all_menus {
            self.paging.prime(
                entries
                    .iter()
                    .map(|e| (e.key.clone(), e.name.clone(), e.all_menus.clone())),
            );
            let slices = self.paging.next_page();
            for entry in &mut entries {
                if let Some(slice) = slices.iter().find(|s| s.key == entry.key) {
                    entry.all_menus = slice.menus.clone();
                }
            }
            if self.paging.has_remaining() {
                content.push_str(&format!("\n({MSG_MORE_HINT})"));
            }
        } else {
            // New search invalidates any earlier pagination.
            self.paging.clear();
        }

        ChatMessage::assistant(content, entries, Some(resolution.intent))
    }

    /// Serve the next page from the cache, without classifying.
    fn continue_paging(&mut self) -> ChatMessage {
        let slices = self.paging.next_page();
        if slices.is_empty() {
            return ChatMessage::assistant(MSG_NO_MORE, Vec::new(), None);
        }

        let results: Vec<RoleMatch> = slices
            .into_iter()
            .map(|slice| RoleMatch {
                key: slice.key,
                group_key: String::new(),
                name: slice.display_name,
                desc: String::new(),
                codes: Vec::new(),
                copy_text: String::new(),
                matched_menus: Vec::new(),
                total_menus: slice.total,
                all_menus: slice.menus,
            })
            .collect();

        let mut content = MSG_CONTINUED.to_string();
        if self.paging.has_remaining() {
            content.push_str(&format!("\n({MSG_MORE_HINT})"));
        }
        ChatMessage::assistant(content, results, Some(IntentKind::RoleToMenu))
    }
}
