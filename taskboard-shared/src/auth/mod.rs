/// Credential utilities
///
/// - [`password`]: Argon2id hashing for user credentials, including the
///   placeholder credentials given to seeded accounts

pub mod password;
