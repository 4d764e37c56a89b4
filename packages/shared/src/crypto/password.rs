//! Password hashing with scrypt (N=16384, r=16, p=1, dkLen=64) and a random
//! 16-byte salt. Stored format: "hex(salt):hex(key)".

use rand::RngCore;
use scrypt::{scrypt, Params};

#[derive(Debug)]
pub enum PasswordHashError {
    InvalidParams(String),
    InvalidHashFormat,
}

impl std::fmt::Display for PasswordHashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordHashError::InvalidParams(msg) => write!(f, "Invalid scrypt params: {}", msg),
            PasswordHashError::InvalidHashFormat => write!(f, "Invalid password hash format"),
        }
    }
}

impl std::error::Error for PasswordHashError {}

pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt_hex = hex::encode(salt_bytes);

    let key = derive_key(password, &salt_hex)?;
    Ok(format!("{}:{}", salt_hex, hex::encode(key)))
}

pub fn verify_password(hash: &str, password: &str) -> Result<bool, PasswordHashError> {
    let (salt, key_hex) = hash
        .split_once(':')
        .ok_or(PasswordHashError::InvalidHashFormat)?;
    let expected_key = hex::decode(key_hex).map_err(|_| PasswordHashError::InvalidHashFormat)?;

    let derived_key = derive_key(password, salt)?;
    Ok(constant_time_equal(&derived_key, &expected_key))
}

fn derive_key(password: &str, salt: &str) -> Result<Vec<u8>, PasswordHashError> {
    // N=16384 -> log2(N)=14
    let params = Params::new(14, 16, 1, 64)
        .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;

    let mut key = vec![0u8; 64];
    scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut key)
        .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;
    Ok(key)
}

fn constant_time_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
