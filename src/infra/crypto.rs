//! Field-level encryption for sensitive columns.
//!
//! AES-256-GCM with a key derived from a configured passphrase. The
//! 12-byte nonce is generated per value and prepended to the
//! ciphertext, so each stored payload is self-contained.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use sha2::{Digest, Sha256};

use crate::errors::{AppError, AppResult};

const NONCE_LEN: usize = 12;

/// Encrypts and decrypts individual column values.
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl FieldCipher {
    /// Derive the cipher key from a passphrase with SHA-256.
    pub fn from_passphrase(passphrase: &[u8]) -> Self {
        let key_bytes: [u8; 32] = Sha256::digest(passphrase).into();
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Encrypt a plaintext value. Output is `nonce || ciphertext`.
    pub fn encrypt(&self, plaintext: &str) -> AppResult<Vec<u8>> {
        let nonce_bytes: [u8; NONCE_LEN] = rand::random();
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| AppError::internal(format!("field encryption failed: {e}")))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt a `nonce || ciphertext` payload back to the plaintext.
    pub fn decrypt(&self, payload: &[u8]) -> AppResult<String> {
        if payload.len() < NONCE_LEN {
            return Err(AppError::internal("encrypted field payload too small"));
        }
        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| AppError::internal(format!("field decryption failed: {e}")))?;

        String::from_utf8(plaintext)
            .map_err(|e| AppError::internal(format!("decrypted field is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cipher = FieldCipher::from_passphrase(b"test-passphrase");
        let payload = cipher.encrypt("sarah@example.com").unwrap();

        assert_ne!(payload, b"sarah@example.com");
        assert_eq!(cipher.decrypt(&payload).unwrap(), "sarah@example.com");
    }

    #[test]
    fn test_nonce_makes_ciphertexts_differ() {
        let cipher = FieldCipher::from_passphrase(b"test-passphrase");
        let a = cipher.encrypt("same value").unwrap();
        let b = cipher.encrypt("same value").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let cipher = FieldCipher::from_passphrase(b"test-passphrase");
        let other = FieldCipher::from_passphrase(b"other-passphrase");
        let payload = cipher.encrypt("secret").unwrap();
        assert!(other.decrypt(&payload).is_err());
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let cipher = FieldCipher::from_passphrase(b"test-passphrase");
        assert!(cipher.decrypt(&[0u8; 4]).is_err());
    }
}
