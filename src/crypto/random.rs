use getrandom::fill;

use crate::error::DrillError;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), DrillError> {
    fill(buf).map_err(|_| DrillError::Random)
}

/// Generate a fresh salt of `len` bytes for a new record
pub fn generate_salt(len: usize) -> Result<Vec<u8>, DrillError> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}
