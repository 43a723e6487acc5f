//! bcrypt password hashing. Hashes written by the previous Node deployment
//! (`$2a$`/`$2b$`, cost 10) verify unchanged.

use std::sync::OnceLock;

/// Work factor for newly hashed passwords.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, HASH_COST)
}

/// Returns `false` for a mismatch and for a malformed stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

/// Burn one verification against a throwaway hash so an unknown email costs
/// the same time as a wrong password.
pub fn verify_against_dummy(password: &str) {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    let hash = DUMMY_HASH.get_or_init(|| hash_password("dummy-password").unwrap_or_default());
    let _ = bcrypt::verify(password, hash);
}
