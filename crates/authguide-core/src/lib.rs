pub mod levels;
pub mod role_key;
pub mod sort_key;
pub mod text;
pub mod types;

pub use levels::AuthLevels;
pub use role_key::RoleKey;
pub use sort_key::{dedup_menus, menu_sort_key};
pub use text::{OTHER_LABEL, clean_value, has_korean, normalize};
pub use types::{IntentKind, IntentResult, Menu, RoleRecord, RoleSummary, System, Team};
