use crate::decode::VectorPolicy;
use anyhow::{bail, Result};
use std::str::FromStr;

/// Unit used for the offsets reported by [`crate::document_colors`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetEncoding {
  /// Byte offsets into the UTF-8 text
  #[default]
  Utf8,
  /// UTF-16 code units, as JavaScript strings index
  Utf16,
}

/// Configuration for document color scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanConfig {
  pub vector_policy: VectorPolicy,
  pub offset_encoding: OffsetEncoding,
}

impl FromStr for VectorPolicy {
  type Err = anyhow::Error;

  fn from_str(value: &str) -> Result<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "permissive" => Ok(VectorPolicy::Permissive),
      "strict" => Ok(VectorPolicy::Strict),
      _ => bail!(
        "Vector policy must be \"permissive\" or \"strict\" (got: {})",
        value
      ),
    }
  }
}

impl FromStr for OffsetEncoding {
  type Err = anyhow::Error;

  fn from_str(value: &str) -> Result<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "utf8" | "utf-8" => Ok(OffsetEncoding::Utf8),
      "utf16" | "utf-16" => Ok(OffsetEncoding::Utf16),
      _ => bail!(
        "Offset encoding must be \"utf8\" or \"utf16\" (got: {})",
        value
      ),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let config = ScanConfig::default();
    assert_eq!(config.vector_policy, VectorPolicy::Permissive);
    assert_eq!(config.offset_encoding, OffsetEncoding::Utf8);
  }

  #[test]
  fn parses_host_strings() {
    assert_eq!("Strict".parse::<VectorPolicy>().unwrap(), VectorPolicy::Strict);
    assert_eq!(" permissive ".parse::<VectorPolicy>().unwrap(), VectorPolicy::Permissive);
    assert_eq!("UTF-16".parse::<OffsetEncoding>().unwrap(), OffsetEncoding::Utf16);
    assert_eq!("utf8".parse::<OffsetEncoding>().unwrap(), OffsetEncoding::Utf8);
  }

  #[test]
  fn rejects_unknown_values() {
    let err = "lenient".parse::<VectorPolicy>().unwrap_err();
    assert!(err.to_string().contains("lenient"));
    assert!("latin1".parse::<OffsetEncoding>().is_err());
  }
}
