//! # Domain Types
//!
//! Core domain types used throughout Armory.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Gadget      │   │  RefreshToken   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  email (unique) │   │  name (code)    │   │  token (JWT)    │       │
//! │  │  password_hash  │   │  status         │   │  user_id (FK)   │       │
//! │  │  created_at     │   │  user_id (FK)   │   │  expires_at     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  GadgetStatus   │   │   GadgetView    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Available      │   │  Gadget fields  │                             │
//! │  │  Decommissioned │   │  + mission      │                             │
//! │  │  Destroyed      │   │    probability  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Model
//! Every gadget belongs to exactly one user. Repositories scope all reads
//! and writes by `user_id`, so a missing row and a foreign row are
//! indistinguishable to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Gadget Status
// =============================================================================

/// Lifecycle state of a gadget.
///
/// ## The One-Way Street
/// ```text
/// Available ──► Decommissioned ──► Destroyed
///     │                                ▲
///     └────────────────────────────────┘
/// ```
/// Transitions only ever move rightward. `Destroyed` is fully terminal:
/// once a gadget is destroyed, no operation may touch it again, not even
/// an identity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GadgetStatus {
    /// In active service and eligible for missions.
    Available,
    /// Retired from service; records the decommission timestamp.
    Decommissioned,
    /// Self-destructed. Terminal.
    Destroyed,
}

impl GadgetStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [GadgetStatus; 3] = [
        GadgetStatus::Available,
        GadgetStatus::Decommissioned,
        GadgetStatus::Destroyed,
    ];

    /// The canonical string form, matching the wire and database encoding.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GadgetStatus::Available => "Available",
            GadgetStatus::Decommissioned => "Decommissioned",
            GadgetStatus::Destroyed => "Destroyed",
        }
    }

    /// Parses the canonical string form. Case-sensitive.
    pub fn parse(s: &str) -> Option<GadgetStatus> {
        match s {
            "Available" => Some(GadgetStatus::Available),
            "Decommissioned" => Some(GadgetStatus::Decommissioned),
            "Destroyed" => Some(GadgetStatus::Destroyed),
            _ => None,
        }
    }

    /// Whether a direct transition from `self` to `next` is legal.
    ///
    /// `Available -> Available` is a legal no-op so a rename-only update
    /// doesn't fail. Re-applying `Decommissioned` to an already
    /// decommissioned gadget is rejected, as is everything out of
    /// `Destroyed`, including itself.
    pub fn can_transition_to(self, next: GadgetStatus) -> bool {
        use GadgetStatus::*;
        match (self, next) {
            (Destroyed, _) => false,
            (Decommissioned, Destroyed) => true,
            (Decommissioned, _) => false,
            (Available, _) => true,
        }
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GadgetStatus::Destroyed)
    }
}

impl Default for GadgetStatus {
    fn default() -> Self {
        GadgetStatus::Available
    }
}

impl fmt::Display for GadgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// The password hash never leaves the service; anything returned to a
/// client goes through [`UserPublic`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login email, stored lowercased. Unique across the system.
    pub email: String,

    /// Argon2 PHC-string hash of the credential.
    pub password_hash: String,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The client-safe projection of this account.
    pub fn to_public(&self) -> UserPublic {
        UserPublic {
            id: self.id.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Client-safe projection of a [`User`]. No credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Refresh Token
// =============================================================================

/// A persisted refresh token.
///
/// Refresh tokens are stored server-side so that logout revokes them and
/// the refresh flow can reject tokens that were never issued (or were
/// already revoked), even if their signature still verifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The signed JWT handed to the client.
    pub token: String,

    /// Account this token belongs to.
    pub user_id: String,

    /// Absolute expiry; rows past this instant are dead weight and get
    /// swept by the background cleanup task.
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether this token is still within its lifetime at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

// =============================================================================
// Gadget
// =============================================================================

/// A gadget in the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gadget {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Auto-assigned codename, e.g. `"The Kraken-42"`.
    pub name: String,

    /// Current lifecycle status.
    pub status: GadgetStatus,

    /// Owning user. All operations are scoped to this owner.
    pub user_id: String,

    /// When the gadget entered the inventory.
    pub created_at: DateTime<Utc>,

    /// Set exactly once, by the decommission operation.
    pub decommissioned_at: Option<DateTime<Utc>>,
}

impl Gadget {
    /// Whether the gadget still accepts lifecycle operations.
    pub fn is_operational(&self) -> bool {
        !self.status.is_terminal()
    }
}

// =============================================================================
// Gadget View
// =============================================================================

/// A [`Gadget`] decorated for presentation.
///
/// List responses attach a freshly rolled mission success probability to
/// every gadget. The probability is cosmetic and intentionally not
/// persisted, so two consecutive uncached list calls may report different
/// odds for the same gadget. Cached lists serve the decorated form as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GadgetView {
    pub id: String,
    pub name: String,
    pub status: GadgetStatus,
    /// Display string such as `"87%"`.
    pub mission_success_probability: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
}

impl GadgetView {
    /// Decorates a gadget with the given probability display string.
    pub fn with_probability(gadget: Gadget, probability: String) -> Self {
        GadgetView {
            id: gadget.id,
            name: gadget.name,
            status: gadget.status,
            mission_success_probability: probability,
            user_id: gadget.user_id,
            created_at: gadget.created_at,
            decommissioned_at: gadget.decommissioned_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_matrix() {
        use GadgetStatus::*;

        // Every pair, spelled out. The lifecycle is small enough that the
        // exhaustive table is clearer than clever assertions.
        let legal = [
            (Available, Available),
            (Available, Decommissioned),
            (Available, Destroyed),
            (Decommissioned, Destroyed),
        ];
        let illegal = [
            (Decommissioned, Available),
            (Decommissioned, Decommissioned),
            (Destroyed, Available),
            (Destroyed, Decommissioned),
            (Destroyed, Destroyed),
        ];

        for (from, to) in legal {
            assert!(from.can_transition_to(to), "{from} -> {to} should be legal");
        }
        for (from, to) in illegal {
            assert!(!from.can_transition_to(to), "{from} -> {to} should be illegal");
        }
    }

    #[test]
    fn test_only_destroyed_is_terminal() {
        assert!(!GadgetStatus::Available.is_terminal());
        assert!(!GadgetStatus::Decommissioned.is_terminal());
        assert!(GadgetStatus::Destroyed.is_terminal());
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in GadgetStatus::ALL {
            assert_eq!(GadgetStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(GadgetStatus::parse("available"), None);
        assert_eq!(GadgetStatus::parse("Retired"), None);
        assert_eq!(GadgetStatus::parse(""), None);
    }

    #[test]
    fn test_status_serializes_as_plain_string() {
        let json = serde_json::to_string(&GadgetStatus::Decommissioned).unwrap();
        assert_eq!(json, "\"Decommissioned\"");

        let status: GadgetStatus = serde_json::from_str("\"Destroyed\"").unwrap();
        assert_eq!(status, GadgetStatus::Destroyed);
    }

    #[test]
    fn test_gadget_view_wire_format_is_camel_case() {
        let gadget = Gadget {
            id: "g-1".to_string(),
            name: "The Kraken-42".to_string(),
            status: GadgetStatus::Available,
            user_id: "u-1".to_string(),
            created_at: Utc::now(),
            decommissioned_at: None,
        };
        let view = GadgetView::with_probability(gadget, "87%".to_string());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["missionSuccessProbability"], "87%");
        assert_eq!(json["userId"], "u-1");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("decommissionedAt").is_some());
        assert!(json.get("mission_success_probability").is_none());
    }

    #[test]
    fn test_user_public_hides_credentials() {
        let user = User {
            id: "u-1".to_string(),
            email: "ethan@imf.example".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(user.to_public()).unwrap();
        assert_eq!(json["email"], "ethan@imf.example");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_refresh_token_validity_window() {
        let now = Utc::now();
        let token = RefreshToken {
            id: "t-1".to_string(),
            token: "jwt".to_string(),
            user_id: "u-1".to_string(),
            expires_at: now + chrono::Duration::days(7),
        };
        assert!(token.is_valid_at(now));
        assert!(!token.is_valid_at(now + chrono::Duration::days(8)));
        // Expiry instant itself is not valid: the check is strictly greater.
        assert!(!token.is_valid_at(token.expires_at));
    }
}
