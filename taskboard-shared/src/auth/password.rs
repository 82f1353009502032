/// Password hashing using Argon2id
///
/// Stored hashes use the PHC string format, so the cost parameters travel with
/// the hash and `verify_password` works for every profile.
///
/// # Cost Profiles
///
/// | Profile | Memory | Passes | Lanes |
/// |---------|--------|--------|-------|
/// | `HashParams::interactive()` | 64 MB | 3 | 4 |
/// | `HashParams::fixture()` | 8 MB | 1 | 1 |
///
/// Seeded accounts carry a well-known placeholder password, so they use the
/// cheap fixture profile.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password, HashParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("password", HashParams::fixture())?;
/// assert!(verify_password("password", &hash)?);
/// assert!(!verify_password("wrong", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism
    pub lanes: u32,
}

impl HashParams {
    /// Cost profile for credentials chosen by real users
    pub const fn interactive() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            lanes: 4,
        }
    }

    /// Cost profile for placeholder credentials of seeded accounts
    pub const fn fixture() -> Self {
        Self {
            memory_kib: 8192,
            iterations: 1,
            lanes: 1,
        }
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Hashes a password with Argon2id and a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` if the parameters are rejected or
/// hashing fails.
pub fn hash_password(password: &str, params: HashParams) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(params.memory_kib)
        .t_cost(params.iterations)
        .p_cost(params.lanes)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a PHC-format hash
///
/// Returns `Ok(false)` for a wrong password and an error only when the hash
/// itself is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}
