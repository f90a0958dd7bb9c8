//! Error types for hashing operations.
//!
//! Every failure is synchronous and detected before any state is mutated, so a
//! rejected call leaves the hasher exactly as it was.

use thiserror::Error;

/// A hashing operation was rejected.
///
/// # Examples
///
/// ```
/// use traits::{ConfigError, HashError};
///
/// let err = HashError::InvalidConfiguration(ConfigError::OutputBitsNotByteAligned { bits: 12 });
/// assert_eq!(
///   err.to_string(),
///   "invalid configuration: output length of 12 bits is not a multiple of 8"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum HashError {
  /// Construction or configuration was malformed.
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(#[from] ConfigError),

  /// An output request would read past the declared output length.
  #[error("output of {requested} bytes at position {position} exceeds the declared length of {limit} bytes")]
  OutputLengthExceeded {
    /// Bytes already emitted.
    position: u64,
    /// Bytes requested by the rejected call.
    requested: u64,
    /// Declared total output length in bytes.
    limit: u64,
  },

  /// Input was supplied after output had begun.
  #[error("cannot absorb input after output has been read")]
  WriteAfterFinalize,
}

/// The specific configuration problem behind [`HashError::InvalidConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ConfigError {
  /// Key length does not match the algorithm's fixed key size.
  #[error("key must be {expected} bytes, got {actual}")]
  KeyLength {
    /// Required key size in bytes.
    expected: usize,
    /// Size of the key that was supplied.
    actual: usize,
  },

  /// A zero-length output was declared.
  #[error("output length must be positive")]
  OutputBitsZero,

  /// Declared output length is not a whole number of bytes.
  #[error("output length of {bits} bits is not a multiple of 8")]
  OutputBitsNotByteAligned {
    /// The rejected length in bits.
    bits: u64,
  },

  /// Declared output length is above the algorithm's documented maximum.
  #[error("output length of {bits} bits exceeds the maximum of {max} bits")]
  OutputBitsTooLarge {
    /// The rejected length in bits.
    bits: u64,
    /// The algorithm's maximum in bits.
    max: u64,
  },

  /// The output length was changed after output had begun.
  #[error("output length cannot change while output is in progress")]
  OutputInProgress,
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn display_messages() {
    assert_eq!(
      HashError::WriteAfterFinalize.to_string(),
      "cannot absorb input after output has been read"
    );
    assert_eq!(
      HashError::OutputLengthExceeded {
        position: 30,
        requested: 4,
        limit: 32
      }
      .to_string(),
      "output of 4 bytes at position 30 exceeds the declared length of 32 bytes"
    );
    assert_eq!(
      HashError::from(ConfigError::KeyLength { expected: 32, actual: 33 }).to_string(),
      "invalid configuration: key must be 32 bytes, got 33"
    );
  }

  #[test]
  fn config_error_converts() {
    let err: HashError = ConfigError::OutputBitsZero.into();
    assert_eq!(err, HashError::InvalidConfiguration(ConfigError::OutputBitsZero));
  }

  #[test]
  fn error_source_is_config() {
    use core::error::Error;

    let err = HashError::InvalidConfiguration(ConfigError::OutputInProgress);
    assert!(err.source().is_some());
    assert!(HashError::WriteAfterFinalize.source().is_none());
  }

  #[test]
  fn trait_bounds() {
    fn assert_send_sync<T: Send + Sync + Unpin>() {}
    assert_send_sync::<HashError>();
    assert_send_sync::<ConfigError>();
  }
}
