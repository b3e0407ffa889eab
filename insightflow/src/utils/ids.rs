//! Identifier generation.

use rand::Rng;
use uuid::Uuid;

/// Length of the commit-like token attached to workflow runs.
pub const COMMIT_TOKEN_LEN: usize = 7;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a new time-ordered identifier (UUID v7).
///
/// Identifiers generated later sort after earlier ones, so they double as a
/// creation-order key for meetings, tasks and workflow runs.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Generates a short lowercase base-36 token standing in for a commit hash.
#[must_use]
pub fn commit_token() -> String {
    commit_token_with(&mut rand::thread_rng())
}

/// Generates a commit token from the given random source.
pub fn commit_token_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..COMMIT_TOKEN_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect()
}
