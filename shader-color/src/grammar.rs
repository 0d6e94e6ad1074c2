use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// One of the textual color-literal syntaxes recognized in shader source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
  /// `vec3(r, g, b)` or `vec4(r, g, b, a)` with components nominally in 0.0-1.0
  VectorColor,
  /// `#RGB`
  HexShort,
  /// `#RGBA`
  HexShortAlpha,
  /// `#RRGGBB`
  HexLong,
  /// `#RRGGBBAA`
  HexLongAlpha,
  /// `rgb(r, g, b)` with integer channels 0-255
  FunctionalRgb,
  /// `rgba(r, g, b, a)` with integer channels 0-255 and a float alpha 0.0-1.0
  FunctionalRgba,
}

/// Grammars grouped by their delimiter style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
  Vector,
  Hex,
  Functional,
}

impl Grammar {
  pub const ALL: [Grammar; 7] = [
    Grammar::VectorColor,
    Grammar::HexShort,
    Grammar::HexShortAlpha,
    Grammar::HexLong,
    Grammar::HexLongAlpha,
    Grammar::FunctionalRgb,
    Grammar::FunctionalRgba,
  ];

  pub fn family(self) -> Family {
    match self {
      Grammar::VectorColor => Family::Vector,
      Grammar::HexShort | Grammar::HexShortAlpha | Grammar::HexLong | Grammar::HexLongAlpha => {
        Family::Hex
      }
      Grammar::FunctionalRgb | Grammar::FunctionalRgba => Family::Functional,
    }
  }

  /// Pick the hex variant for a digit count; only 3, 4, 6 and 8 are valid
  pub fn hex_from_digit_count(count: usize) -> Option<Grammar> {
    match count {
      3 => Some(Grammar::HexShort),
      4 => Some(Grammar::HexShortAlpha),
      6 => Some(Grammar::HexLong),
      8 => Some(Grammar::HexLongAlpha),
      _ => None,
    }
  }

  pub fn hex_digit_count(self) -> Option<usize> {
    match self {
      Grammar::HexShort => Some(3),
      Grammar::HexShortAlpha => Some(4),
      Grammar::HexLong => Some(6),
      Grammar::HexLongAlpha => Some(8),
      _ => None,
    }
  }

  /// Whether the grammar always carries an alpha channel.
  ///
  /// `VectorColor` returns false: its alpha depends on the arity of the
  /// occurrence, see [`crate::Occurrence::has_alpha`].
  pub fn is_alpha_bearing(self) -> bool {
    matches!(
      self,
      Grammar::HexShortAlpha | Grammar::HexLongAlpha | Grammar::FunctionalRgba
    )
  }

  /// Stable name used across the host boundary
  pub fn as_str(self) -> &'static str {
    match self {
      Grammar::VectorColor => "vector",
      Grammar::HexShort => "hex-short",
      Grammar::HexShortAlpha => "hex-short-alpha",
      Grammar::HexLong => "hex-long",
      Grammar::HexLongAlpha => "hex-long-alpha",
      Grammar::FunctionalRgb => "rgb",
      Grammar::FunctionalRgba => "rgba",
    }
  }
}

impl fmt::Display for Grammar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Grammar {
  type Err = anyhow::Error;

  fn from_str(name: &str) -> Result<Self> {
    match Grammar::ALL.iter().find(|g| g.as_str() == name) {
      Some(&grammar) => Ok(grammar),
      None => bail!("Unknown color grammar: {}", name),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_variant_follows_digit_count() {
    for grammar in Grammar::ALL {
      if let Some(count) = grammar.hex_digit_count() {
        assert_eq!(Grammar::hex_from_digit_count(count), Some(grammar));
      }
    }
    assert_eq!(Grammar::hex_from_digit_count(5), None);
    assert_eq!(Grammar::hex_from_digit_count(7), None);
  }

  #[test]
  fn names_parse_back() {
    for grammar in Grammar::ALL {
      assert_eq!(grammar.to_string().parse::<Grammar>().unwrap(), grammar);
    }
    assert!("hsl".parse::<Grammar>().is_err());
  }

  #[test]
  fn families() {
    assert_eq!(Grammar::VectorColor.family(), Family::Vector);
    assert_eq!(Grammar::HexShortAlpha.family(), Family::Hex);
    assert_eq!(Grammar::FunctionalRgba.family(), Family::Functional);
    assert!(!Grammar::VectorColor.is_alpha_bearing());
    assert!(Grammar::HexLongAlpha.is_alpha_bearing());
  }
}
