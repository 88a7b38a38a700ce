//! # Cache Key Namespace
//!
//! Every cache key used by the service is built here, so the namespace
//! can be read in one place and no handler ever spells a key by hand.
//!
//! ## The Namespace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  gadgets_all_{userId}         unfiltered list snapshot     TTL 1 hour  │
//! │  gadgets_{status}_{userId}    status-filtered snapshot     TTL 1 hour  │
//! │  destruct_code_{gadgetId}     one-time confirmation code   TTL 5 min   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status spellings in keys are the canonical enum spellings
//! (`Available`, `Decommissioned`, `Destroyed`).

use armory_core::GadgetStatus;

// =============================================================================
// TTL Constants
// =============================================================================

/// Lifetime of cached list snapshots: one hour.
///
/// This is the worst-case staleness bound when an invalidation is lost
/// (e.g. crash between the database commit and the cache delete).
pub const LIST_TTL_SECS: u64 = 3600;

/// Lifetime of a self-destruct confirmation code: five minutes.
///
/// Long enough for the two-call confirm flow, short enough that an
/// abandoned code dies on its own.
pub const CODE_TTL_SECS: u64 = 300;

// =============================================================================
// Key Builders
// =============================================================================

/// Key for a user's unfiltered gadget list snapshot.
pub fn all_gadgets(user_id: &str) -> String {
    format!("gadgets_all_{user_id}")
}

/// Key for a user's status-filtered gadget list snapshot.
pub fn status_gadgets(status: GadgetStatus, user_id: &str) -> String {
    format!("gadgets_{status}_{user_id}")
}

/// Key for a gadget's pending self-destruct confirmation code.
pub fn destruct_code(gadget_id: &str) -> String {
    format!("destruct_code_{gadget_id}")
}

/// The set of list keys a lifecycle write invalidates.
///
/// A status change moves the gadget between two filtered views, so three
/// entries go stale: the "all" snapshot, the view it left, and the view
/// it joined. When `previous == next` (create, rename-only update) the
/// duplicate collapses and two keys come back.
pub fn invalidation_keys(
    user_id: &str,
    previous: GadgetStatus,
    next: GadgetStatus,
) -> Vec<String> {
    let mut keys = vec![all_gadgets(user_id), status_gadgets(previous, user_id)];
    if next != previous {
        keys.push(status_gadgets(next, user_id));
    }
    keys
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        assert_eq!(all_gadgets("u-1"), "gadgets_all_u-1");
        assert_eq!(
            status_gadgets(GadgetStatus::Available, "u-1"),
            "gadgets_Available_u-1"
        );
        assert_eq!(
            status_gadgets(GadgetStatus::Decommissioned, "u-1"),
            "gadgets_Decommissioned_u-1"
        );
        assert_eq!(destruct_code("g-9"), "destruct_code_g-9");
    }

    #[test]
    fn test_status_change_invalidates_three_keys() {
        let keys = invalidation_keys("u-1", GadgetStatus::Available, GadgetStatus::Destroyed);
        assert_eq!(
            keys,
            vec![
                "gadgets_all_u-1".to_string(),
                "gadgets_Available_u-1".to_string(),
                "gadgets_Destroyed_u-1".to_string(),
            ]
        );
    }

    #[test]
    fn test_same_status_invalidates_two_keys() {
        // create and rename-only update: the gadget stays in its view.
        let keys = invalidation_keys("u-1", GadgetStatus::Available, GadgetStatus::Available);
        assert_eq!(
            keys,
            vec![
                "gadgets_all_u-1".to_string(),
                "gadgets_Available_u-1".to_string(),
            ]
        );
    }

    #[test]
    fn test_keys_are_user_scoped() {
        assert_ne!(all_gadgets("u-1"), all_gadgets("u-2"));
        assert_ne!(
            status_gadgets(GadgetStatus::Available, "u-1"),
            status_gadgets(GadgetStatus::Available, "u-2")
        );
    }
}
