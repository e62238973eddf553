//! Password hashing and verification.

use bcrypt::{hash, verify, BcryptError};

/// Work factor for stored password hashes.
const HASH_COST: u32 = 10;

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
/// Returns an error if the underlying hash computation fails.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, HASH_COST)
}

/// Verify a plaintext password against a stored hash.
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() -> Result<(), BcryptError> {
        let password_hash = hash_password("secret1")?;
        assert_ne!(password_hash, "secret1");
        assert!(password_hash.starts_with("$2"));
        assert!(verify_password("secret1", &password_hash)?);
        Ok(())
    }

    #[test]
    fn wrong_password_does_not_verify() -> Result<(), BcryptError> {
        let password_hash = hash_password("secret1")?;
        assert!(!verify_password("secret2", &password_hash)?);
        Ok(())
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("secret1", "not-a-bcrypt-hash").is_err());
    }
}
