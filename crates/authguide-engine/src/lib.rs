//! The lookup pipeline: resolve intent, match keywords, aggregate roles,
//! sort and paginate menus, and hold per-session state.

pub mod aggregate;
pub mod paging;
pub mod resolve;
pub mod search;
pub mod session;

pub use aggregate::{UnifiedRole, unify_roles};
pub use paging::{PAGE_SIZE, PageSlice, PagingCache, order_menus};
pub use resolve::{IntentResolver, Resolution};
pub use search::{RoleMatch, SearchOutcome, search};
pub use session::{ChatMessage, Session, Speaker, TeamSelection};
