//! Passphrase hash record and its on-disk form.
//!
//! Record format:
//! ```text
//! ALGORITHM ":" BASE64(SALT) ":" BASE64(DIGEST)
//! ```
//! e.g. `scrypt:<44 chars>:<88 chars>` with the default 32 byte salt and
//! 64 byte digest. Base64 uses the standard padded alphabet, which never
//! contains the delimiter.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::debug;

use crate::config::Config;
use crate::crypto::{self, Algorithm, KdfParams};
use crate::error::DrillError;

/// The algorithm, salt and digest describing one saved passphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRecord {
    algorithm: Algorithm,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl HashRecord {
    pub fn new(algorithm: Algorithm, salt: Vec<u8>, digest: Vec<u8>) -> Self {
        Self {
            algorithm,
            salt,
            digest,
        }
    }

    /// Hashes `plaintext` under a freshly generated salt.
    pub fn create(
        algorithm: Algorithm,
        plaintext: &str,
        config: &Config,
    ) -> Result<Self, DrillError> {
        let salt = crypto::generate_salt(config.salt_len())?;
        let digest = crypto::derive(algorithm, &salt, plaintext, config.kdf())?;
        Ok(Self::new(algorithm, salt, digest))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Returns `true` if `plaintext` derives to the stored digest.
    pub fn matches(&self, plaintext: &str, params: &KdfParams) -> Result<bool, DrillError> {
        let candidate = crypto::derive(self.algorithm, &self.salt, plaintext, params)?;
        Ok(candidate == self.digest)
    }
}

/// Serializes a record to its delimited text form.
pub fn encode(record: &HashRecord, config: &Config) -> Vec<u8> {
    let delimiter = config.delimiter() as char;
    format!(
        "{}{delimiter}{}{delimiter}{}",
        record.algorithm,
        STANDARD.encode(&record.salt),
        STANDARD.encode(&record.digest)
    )
    .into_bytes()
}

/// Parses the delimited text form of a record.
///
/// Trailing whitespace (a newline added by an editor) is ignored.
///
/// # Errors
///
/// - [`DrillError::MalformedRecord`] if there are not exactly three fields,
///   a field is not valid base64, or the salt/digest length is wrong
/// - [`DrillError::UnsupportedAlgorithm`] if the algorithm name is unknown
pub fn decode(data: &[u8], config: &Config) -> Result<HashRecord, DrillError> {
    let data = data.trim_ascii_end();
    let fields: Vec<&[u8]> = data.split(|b| *b == config.delimiter()).collect();

    let [name, salt, digest] = fields[..] else {
        return Err(DrillError::MalformedRecord(format!(
            "expected 3 fields, found {}",
            fields.len()
        )));
    };

    let name = std::str::from_utf8(name)
        .map_err(|_| DrillError::MalformedRecord("algorithm name is not UTF-8".into()))?;
    let algorithm: Algorithm = name.parse()?;

    let salt = STANDARD
        .decode(salt)
        .map_err(|e| DrillError::MalformedRecord(format!("salt: {e}")))?;
    let digest = STANDARD
        .decode(digest)
        .map_err(|e| DrillError::MalformedRecord(format!("digest: {e}")))?;

    if salt.len() != config.salt_len() {
        return Err(DrillError::MalformedRecord(format!(
            "salt is {} bytes, expected {}",
            salt.len(),
            config.salt_len()
        )));
    }
    if digest.len() != config.kdf().key_len() {
        return Err(DrillError::MalformedRecord(format!(
            "digest is {} bytes, expected {}",
            digest.len(),
            config.kdf().key_len()
        )));
    }

    debug!("decoded {algorithm} record ({} bytes)", data.len());
    Ok(HashRecord::new(algorithm, salt, digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KEY_LEN, SALT_LEN, generate_salt};

    fn random_record(algorithm: Algorithm) -> HashRecord {
        HashRecord::new(
            algorithm,
            generate_salt(SALT_LEN).unwrap(),
            generate_salt(KEY_LEN).unwrap(),
        )
    }

    #[test]
    fn record_roundtrip() {
        let config = Config::default();
        for algorithm in Algorithm::ALL {
            for _ in 0..8 {
                let record = random_record(algorithm);
                let decoded = decode(&encode(&record, &config), &config).unwrap();
                assert_eq!(decoded, record);
            }
        }
    }

    #[test]
    fn encoded_layout() {
        let config = Config::default();
        let bytes = encode(&random_record(Algorithm::Scrypt), &config);
        let text = String::from_utf8(bytes).unwrap();
        let fields: Vec<&str> = text.split(':').collect();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "scrypt");
        assert_eq!(fields[1].len(), 44);
        assert_eq!(fields[2].len(), 88);
    }

    #[test]
    fn trailing_newline_is_ignored() {
        let config = Config::default();
        let record = random_record(Algorithm::Pbkdf2);
        let mut bytes = encode(&record, &config);
        bytes.extend_from_slice(b"\r\n");
        assert_eq!(decode(&bytes, &config).unwrap(), record);
    }

    #[test]
    fn unknown_algorithm_fails() {
        match decode(b"md5:AA==:BB==", &Config::default()) {
            Err(DrillError::UnsupportedAlgorithm(name)) => assert_eq!(name, "md5"),
            other => panic!("expected UnsupportedAlgorithm, got: {other:?}"),
        }
    }

    #[test]
    fn too_few_fields_fails() {
        let config = Config::default();
        for data in [&b""[..], b"pbkdf2", b"pbkdf2:AAAA"] {
            assert!(matches!(
                decode(data, &config),
                Err(DrillError::MalformedRecord(_))
            ));
        }
    }

    #[test]
    fn too_many_fields_fails() {
        let config = Config::default();
        let mut bytes = encode(&random_record(Algorithm::Pbkdf2), &config);
        bytes.extend_from_slice(b":AAAA");
        assert!(matches!(
            decode(&bytes, &config),
            Err(DrillError::MalformedRecord(_))
        ));
    }

    #[test]
    fn invalid_base64_fails() {
        let config = Config::default();
        let good = STANDARD.encode([0u8; 32]);
        let bad_salt = format!("pbkdf2:not*base64:{good}");
        let bad_digest = format!("pbkdf2:{good}:not*base64");

        for data in [bad_salt, bad_digest] {
            assert!(matches!(
                decode(data.as_bytes(), &config),
                Err(DrillError::MalformedRecord(_))
            ));
        }
    }

    #[test]
    fn wrong_lengths_fail() {
        let config = Config::default();
        let short = HashRecord::new(Algorithm::Pbkdf2, vec![1u8; 16], vec![2u8; KEY_LEN]);
        let truncated = HashRecord::new(Algorithm::Pbkdf2, vec![1u8; SALT_LEN], vec![2u8; 32]);

        for record in [short, truncated] {
            assert!(matches!(
                decode(&encode(&record, &config), &config),
                Err(DrillError::MalformedRecord(_))
            ));
        }
    }

    #[test]
    fn created_record_matches_only_its_passphrase() {
        let config = Config::default().with_kdf(KdfParams::new(64, 1_000, 10, 8, 1).unwrap());
        let record = HashRecord::create(Algorithm::Pbkdf2, "correcthorse", &config).unwrap();

        assert_eq!(record.salt().len(), SALT_LEN);
        assert_eq!(record.digest().len(), KEY_LEN);
        assert!(record.matches("correcthorse", config.kdf()).unwrap());
        assert!(!record.matches("wrongpass", config.kdf()).unwrap());
    }
}
