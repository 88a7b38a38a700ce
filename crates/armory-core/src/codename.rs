//! # Codenames, Probabilities and Confirmation Codes
//!
//! Everything in this module is a pure function over a [`RandomSource`],
//! formatting random draws into the strings the service hands out.
//!
//! ## The Generators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generate_codename            "The Kraken-42"                           │
//! │    prefix: fixed 10-entry set, suffix: 0..=999 (collisions allowed)     │
//! │                                                                         │
//! │  mission_success_probability  "87%"                                     │
//! │    1..=100, rolled fresh per list response, never persisted             │
//! │                                                                         │
//! │  generate_confirmation_code   "483920"                                  │
//! │    100000..=999999, cached per gadget for a short window               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::random::RandomSource;

// =============================================================================
// Codename Prefixes
// =============================================================================

/// The fixed codename set.
///
/// Collisions between generated names are allowed and not checked; the
/// UUID is the identity, the codename is flavor.
pub const GADGET_PREFIXES: [&str; 10] = [
    "Nightingale",
    "Kraken",
    "Phoenix",
    "Shadow",
    "Ghost",
    "Phantom",
    "Dragon",
    "Falcon",
    "Raven",
    "Cobra",
];

// =============================================================================
// Generators
// =============================================================================

/// Generates a gadget display name, e.g. `"The Phantom-713"`.
///
/// The numeric suffix is 0..=999 with no zero padding.
pub fn generate_codename(rng: &dyn RandomSource) -> String {
    let prefix_idx = rng.next_in_range(0, GADGET_PREFIXES.len() as u32 - 1) as usize;
    let suffix = rng.next_in_range(0, 999);
    format!("The {}-{}", GADGET_PREFIXES[prefix_idx], suffix)
}

/// Rolls a mission success probability, e.g. `"87%"`.
///
/// Always 1..=100, so no mission is ever entirely hopeless.
pub fn mission_success_probability(rng: &dyn RandomSource) -> String {
    format!("{}%", rng.next_in_range(1, 100))
}

/// Generates a six-digit self-destruct confirmation code.
///
/// The range starts at 100000 so the code never has a leading zero.
pub fn generate_confirmation_code(rng: &dyn RandomSource) -> String {
    rng.next_in_range(100_000, 999_999).to_string()
}

/// Compares a supplied confirmation code against the issued one.
///
/// Comparison is numeric: surrounding whitespace and leading zeros on the
/// supplied code are forgiven, anything non-numeric never matches.
pub fn confirmation_code_matches(supplied: &str, valid: &str) -> bool {
    match (supplied.trim().parse::<u64>(), valid.trim().parse::<u64>()) {
        (Ok(supplied), Ok(valid)) => supplied == valid,
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
