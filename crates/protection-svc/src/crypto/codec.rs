//! AES envelope codec: PKCS#7 padding, mode-specific framing, base64 encoding.
//!
//! Both operations are pure functions of their inputs — no caching, no shared
//! state — so arbitrarily many calls may run concurrently without coordination.
//!
//! **Do NOT treat these envelopes as tamper-evident.** ECB and CBC provide no
//! authentication; padding validation catches most corruption but a forged
//! envelope can decrypt to garbage that happens to unpad cleanly.

use aes::{
    cipher::{
        block_padding::Pkcs7, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
    },
    Aes128, Aes192, Aes256,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

use super::mode::{BlockMode, ProtectionMode, AES_BLOCK_SIZE};

/// Errors produced by the envelope codec.
///
/// Every variant is a caller-input failure scoped to the single operation
/// invoked; the codec never retries and never returns partial output.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The mode name is not one of the recognised protection modes.
    #[error("unsupported encryption mode: {0}")]
    UnsupportedMode(String),

    /// The encryption key is not valid standard base64.
    #[error("encryption key is not valid base64")]
    InvalidKeyEncoding,

    /// The decoded key is not a valid AES key length (16, 24 or 32 bytes).
    #[error("invalid key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    /// The encrypted payload is not valid standard base64.
    #[error("encrypted payload is not valid base64")]
    InvalidEnvelopeEncoding,

    /// A CBC envelope decoded to fewer bytes than one cipher block, so it
    /// cannot even contain an IV.
    #[error("encrypted payload too short: {len} bytes, need at least {min}")]
    EnvelopeTooShort { len: usize, min: usize },

    /// Padding validation failed after decryption. Covers corrupted
    /// ciphertext, wrong keys, wrong modes, and wrong-length payloads.
    #[error("incorrect padding")]
    InvalidPadding,

    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted payload is not valid UTF-8")]
    InvalidEncoding,
}

/// Encrypt a plaintext payload into a base64 envelope.
///
/// The plaintext's UTF-8 bytes are PKCS#7-padded to the 16-byte AES block
/// size (a full padding block when already aligned) and encrypted under
/// `mode`. ECB envelopes are `base64(ciphertext)`; CBC envelopes are
/// `base64(IV || ciphertext)` with a fresh random IV drawn from the OS
/// CSPRNG on every call.
///
/// # Errors
///
/// Returns [`CodecError::InvalidKeyEncoding`] if the key is not valid base64
/// and [`CodecError::InvalidKeyLength`] if the decoded key is not an AES key
/// length. The key length selects AES-128/192/256.
pub fn encrypt_payload(
    mode: ProtectionMode,
    key_b64: &str,
    plaintext: &str,
) -> Result<String, CodecError> {
    let key = decode_key(key_b64)?;
    let data = plaintext.as_bytes();

    let envelope = match mode.block_mode {
        BlockMode::Ecb => ecb_encrypt(&key, data)?,
        BlockMode::Cbc => {
            let mut iv = [0u8; AES_BLOCK_SIZE];
            OsRng.fill_bytes(&mut iv);
            let ciphertext = cbc_encrypt(&key, &iv, data)?;
            let mut framed = Vec::with_capacity(iv.len() + ciphertext.len());
            framed.extend_from_slice(&iv);
            framed.extend_from_slice(&ciphertext);
            framed
        }
    };

    Ok(STANDARD.encode(envelope))
}

/// Decrypt a base64 envelope back to its plaintext payload.
///
/// For CBC the first block of the decoded payload is the IV; the remainder
/// is ciphertext. ECB payloads are ciphertext alone.
///
/// # Errors
///
/// Returns [`CodecError::InvalidEnvelopeEncoding`] for non-base64 envelopes,
/// [`CodecError::EnvelopeTooShort`] for CBC payloads shorter than one block,
/// [`CodecError::InvalidPadding`] when padding validation fails after
/// decryption (the dominant failure for garbage or tampered envelopes), and
/// [`CodecError::InvalidEncoding`] when the unpadded bytes are not UTF-8.
/// Key failures are as for [`encrypt_payload`].
pub fn decrypt_payload(
    mode: ProtectionMode,
    key_b64: &str,
    envelope_b64: &str,
) -> Result<String, CodecError> {
    let key = decode_key(key_b64)?;
    let payload = STANDARD
        .decode(envelope_b64)
        .map_err(|_| CodecError::InvalidEnvelopeEncoding)?;

    let plaintext = match mode.block_mode {
        BlockMode::Ecb => ecb_decrypt(&key, &payload)?,
        BlockMode::Cbc => {
            if payload.len() < AES_BLOCK_SIZE {
                return Err(CodecError::EnvelopeTooShort {
                    len: payload.len(),
                    min: AES_BLOCK_SIZE,
                });
            }
            let (iv, ciphertext) = payload.split_at(AES_BLOCK_SIZE);
            cbc_decrypt(&key, iv, ciphertext)?
        }
    };

    String::from_utf8(plaintext).map_err(|_| CodecError::InvalidEncoding)
}

/// Decode and length-check the caller-supplied base64 key.
fn decode_key(key_b64: &str) -> Result<Vec<u8>, CodecError> {
    let key = STANDARD
        .decode(key_b64)
        .map_err(|_| CodecError::InvalidKeyEncoding)?;
    match key.len() {
        16 | 24 | 32 => Ok(key),
        n => Err(CodecError::InvalidKeyLength(n)),
    }
}

// ---------------------------------------------------------------------------
// Key-size dispatch
// ---------------------------------------------------------------------------
// `decode_key` has already constrained the length, so the fallthrough arms
// are unreachable; they keep the match exhaustive without panicking.

fn ecb_encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
    match key.len() {
        16 => ecb_encrypt_with::<Aes128>(key, plaintext),
        24 => ecb_encrypt_with::<Aes192>(key, plaintext),
        32 => ecb_encrypt_with::<Aes256>(key, plaintext),
        n => Err(CodecError::InvalidKeyLength(n)),
    }
}

fn ecb_decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CodecError> {
    match key.len() {
        16 => ecb_decrypt_with::<Aes128>(key, ciphertext),
        24 => ecb_decrypt_with::<Aes192>(key, ciphertext),
        32 => ecb_decrypt_with::<Aes256>(key, ciphertext),
        n => Err(CodecError::InvalidKeyLength(n)),
    }
}

fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
    match key.len() {
        16 => cbc_encrypt_with::<Aes128>(key, iv, plaintext),
        24 => cbc_encrypt_with::<Aes192>(key, iv, plaintext),
        32 => cbc_encrypt_with::<Aes256>(key, iv, plaintext),
        n => Err(CodecError::InvalidKeyLength(n)),
    }
}

fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CodecError> {
    match key.len() {
        16 => cbc_decrypt_with::<Aes128>(key, iv, ciphertext),
        24 => cbc_decrypt_with::<Aes192>(key, iv, ciphertext),
        32 => cbc_decrypt_with::<Aes256>(key, iv, ciphertext),
        n => Err(CodecError::InvalidKeyLength(n)),
    }
}

// ---------------------------------------------------------------------------
// Mode primitives, generic over the AES key size
// ---------------------------------------------------------------------------

fn ecb_encrypt_with<C>(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    let cipher = ecb::Encryptor::<C>::new_from_slice(key)
        .map_err(|_| CodecError::InvalidKeyLength(key.len()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn ecb_decrypt_with<C>(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CodecError>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    let cipher = ecb::Decryptor::<C>::new_from_slice(key)
        .map_err(|_| CodecError::InvalidKeyLength(key.len()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CodecError::InvalidPadding)
}

fn cbc_encrypt_with<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    let cipher = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| CodecError::InvalidKeyLength(key.len()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_decrypt_with<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CodecError>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    let cipher = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| CodecError::InvalidKeyLength(key.len()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CodecError::InvalidPadding)
}
