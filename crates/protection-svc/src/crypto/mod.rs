//! AES envelope encryption for content payloads.
//!
//! This module is intentionally free of HTTP and storage dependencies. It
//! provides the stateless encode/decode operations used by the API layer,
//! parameterised by a [`ProtectionMode`] resolved from the registry.
//!
//! # Envelope formats
//!
//! ```text
//! AES + ECB:  base64(ciphertext)
//! AES + CBC:  base64(IV || ciphertext)      IV = one 16-byte block
//! ```
//!
//! Plaintext is PKCS#7-padded before encryption, so the ciphertext length is
//! always a whole number of blocks.

pub mod codec;
pub mod mode;

pub use codec::{decrypt_payload, encrypt_payload, CodecError};
pub use mode::{BlockMode, ProtectionMode};
