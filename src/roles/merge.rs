//! Role merger

use std::collections::BTreeMap;

use crate::roles::{Role, RoleAssignment, RoleCandidates};

/// Combine the four candidate sets into one role per node.
///
/// Sets are applied in the order organizer, gatekeeper, star, isolate and a
/// later set overwrites an earlier one for a shared node. The selectors keep
/// the first three disjoint, so only isolates ever overwrite. Nodes in no set
/// are absent from the result.
pub fn merge_roles(candidates: &RoleCandidates) -> RoleAssignment {
    let mut roles = BTreeMap::new();

    for role in Role::ALL {
        for node in candidates.get(role) {
            roles.insert(node.clone(), role);
        }
    }

    RoleAssignment::from(roles)
}
