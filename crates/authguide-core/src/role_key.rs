//! Value-type identity for merged roles.

use crate::text::normalize;

/// Identity of one logical role inside the match/aggregation pipeline.
///
/// Raw bundle rows carry no first-class role id, so identity is the
/// normalised `(system, group label, auth code)` triple. A real struct with
/// value equality — not a delimiter-joined string — so component values
/// containing a delimiter character cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleKey {
    sys_code: String,
    group_label: String,
    auth_code: String,
}

impl RoleKey {
    pub fn new(sys_code: &str, group_label: &str, auth_code: &str) -> Self {
        Self {
            sys_code: normalize(sys_code),
            group_label: normalize(group_label),
            auth_code: normalize(auth_code),
        }
    }
}
