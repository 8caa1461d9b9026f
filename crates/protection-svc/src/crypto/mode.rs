//! Encryption-mode descriptors resolved from protection-system mode names.

use super::codec::CodecError;

/// AES block size in bytes, shared by every supported mode.
pub const AES_BLOCK_SIZE: usize = 16;

/// Mode name recognised for AES in ECB mode. Exact match.
pub const MODE_AES_ECB: &str = "AES + ECB";

/// Mode name recognised for AES in CBC mode. Exact match.
pub const MODE_AES_CBC: &str = "AES + CBC";

/// Block cipher algorithm. Closed set; AES is the only member today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Aes,
}

/// Block chaining mode. Adding a mode means adding a variant here and a
/// matching arm in the codec, never widening string conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    /// Each block encrypted independently; deterministic, no IV.
    Ecb,
    /// Blocks chained through a fresh random IV prepended to the envelope.
    Cbc,
}

/// Immutable descriptor of how a protection system encrypts content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectionMode {
    pub algorithm: Algorithm,
    pub block_mode: BlockMode,
}

impl ProtectionMode {
    /// Resolve a mode name string to its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedMode`] for any name other than the
    /// exact strings [`MODE_AES_ECB`] and [`MODE_AES_CBC`].
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        match name {
            MODE_AES_ECB => Ok(Self {
                algorithm: Algorithm::Aes,
                block_mode: BlockMode::Ecb,
            }),
            MODE_AES_CBC => Ok(Self {
                algorithm: Algorithm::Aes,
                block_mode: BlockMode::Cbc,
            }),
            other => Err(CodecError::UnsupportedMode(other.to_owned())),
        }
    }

    /// The canonical name this descriptor resolves from.
    pub fn name(&self) -> &'static str {
        match self.block_mode {
            BlockMode::Ecb => MODE_AES_ECB,
            BlockMode::Cbc => MODE_AES_CBC,
        }
    }

    /// Cipher block size in bytes.
    pub fn block_size(&self) -> usize {
        match self.algorithm {
            Algorithm::Aes => AES_BLOCK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_mode_names() {
        let ecb = ProtectionMode::from_name("AES + ECB").unwrap();
        assert_eq!(ecb.block_mode, BlockMode::Ecb);
        assert_eq!(ecb.algorithm, Algorithm::Aes);

        let cbc = ProtectionMode::from_name("AES + CBC").unwrap();
        assert_eq!(cbc.block_mode, BlockMode::Cbc);
    }

    #[test]
    fn rejects_unknown_mode_names() {
        for name in ["RSA", "aes + ecb", "AES+ECB", "AES + GCM", ""] {
            let err = ProtectionMode::from_name(name).unwrap_err();
            assert!(matches!(err, CodecError::UnsupportedMode(ref n) if n == name));
        }
    }

    #[test]
    fn name_round_trips() {
        for name in [MODE_AES_ECB, MODE_AES_CBC] {
            assert_eq!(ProtectionMode::from_name(name).unwrap().name(), name);
        }
    }

    #[test]
    fn block_size_is_sixteen() {
        let mode = ProtectionMode::from_name(MODE_AES_CBC).unwrap();
        assert_eq!(mode.block_size(), 16);
    }
}
