use crate::color::{clamp_unit, normalize_channel, CanonicalColor, HEX_SHORTHAND_MULTIPLIER};
use crate::grammar::{Family, Grammar};
use crate::scan::Occurrence;
use thiserror::Error;

/// Vectors whose first three components exceed this magnitude are taken to be
/// positions or directions rather than colors
pub const VECTOR_REJECT_MAGNITUDE: f64 = 2.0;

/// Outcome of decoding an occurrence that satisfied its grammar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded {
  Color(CanonicalColor),
  /// The literal is well-formed but judged not to be a color
  Rejected,
}

impl Decoded {
  pub fn color(self) -> Option<CanonicalColor> {
    match self {
      Decoded::Color(color) => Some(color),
      Decoded::Rejected => None,
    }
  }
}

/// How out-of-range vector components are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorPolicy {
  /// Reject above [`VECTOR_REJECT_MAGNITUDE`], clamp anything else into 0.0-1.0
  #[default]
  Permissive,
  /// Reject any color component outside 0.0-1.0
  Strict,
}

/// An occurrence that does not satisfy the grammar it claims.
///
/// Occurrences produced by [`crate::scan`] never fail; these errors surface
/// only for occurrences assembled elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
  #[error("{grammar} expects {expected} fields, found {found}")]
  FieldCount {
    grammar: Grammar,
    expected: &'static str,
    found: usize,
  },
  #[error("invalid numeric field {field:?}")]
  InvalidNumber { field: String },
  #[error("invalid hex digits {digits:?}")]
  InvalidHex { digits: String },
  #[error("channel {field:?} is outside 0-255")]
  ChannelOutOfRange { field: String },
}

/// Decode with the default [`VectorPolicy::Permissive`] policy
pub fn decode(occurrence: &Occurrence) -> Result<Decoded, DecodeError> {
  decode_with_policy(occurrence, VectorPolicy::default())
}

/// Decode an occurrence into a canonical color
///
/// # Arguments
/// * `occurrence` - A match produced by the scanner (or built to the same contract)
/// * `policy` - Treatment of out-of-range vector components
///
/// # Returns
/// The color with every channel in 0.0-1.0, or `Rejected` for vectors that
/// fail the color heuristic
pub fn decode_with_policy(
  occurrence: &Occurrence,
  policy: VectorPolicy,
) -> Result<Decoded, DecodeError> {
  let fields = &occurrence.raw_fields;
  match occurrence.grammar.family() {
    Family::Vector => decode_vector(fields, policy),
    Family::Hex => decode_hex(occurrence.grammar, fields).map(Decoded::Color),
    Family::Functional => decode_functional(occurrence.grammar, fields).map(Decoded::Color),
  }
}

fn parse_float(field: &str) -> Result<f64, DecodeError> {
  field
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite())
    .ok_or_else(|| DecodeError::InvalidNumber {
      field: field.to_string(),
    })
}

fn decode_vector(fields: &[String], policy: VectorPolicy) -> Result<Decoded, DecodeError> {
  if !(3..=4).contains(&fields.len()) {
    return Err(DecodeError::FieldCount {
      grammar: Grammar::VectorColor,
      expected: "3 or 4",
      found: fields.len(),
    });
  }

  let values = fields
    .iter()
    .map(|f| parse_float(f))
    .collect::<Result<Vec<f64>, _>>()?;

  let rejected = match policy {
    VectorPolicy::Permissive => values[..3]
      .iter()
      .any(|v| v.abs() > VECTOR_REJECT_MAGNITUDE),
    VectorPolicy::Strict => values[..3].iter().any(|v| !(0.0..=1.0).contains(v)),
  };
  if rejected {
    return Ok(Decoded::Rejected);
  }

  let alpha = values.get(3).copied().unwrap_or(1.0);
  Ok(Decoded::Color(
    CanonicalColor::new(values[0], values[1], values[2], alpha).clamped(),
  ))
}

fn decode_hex(grammar: Grammar, fields: &[String]) -> Result<CanonicalColor, DecodeError> {
  let [digits] = fields else {
    return Err(DecodeError::FieldCount {
      grammar,
      expected: "1",
      found: fields.len(),
    });
  };
  let invalid = || DecodeError::InvalidHex {
    digits: digits.clone(),
  };

  // from_str_radix tolerates a leading sign, so check the digits first
  if Some(digits.len()) != grammar.hex_digit_count()
    || !digits.bytes().all(|b| b.is_ascii_hexdigit())
  {
    return Err(invalid());
  }

  let short = digits.len() <= 4;
  let width = if short { 1 } else { 2 };
  let mut bytes = [255u8; 4];
  for (i, slot) in bytes.iter_mut().enumerate().take(digits.len() / width) {
    let digit = &digits[i * width..(i + 1) * width];
    let value = u8::from_str_radix(digit, 16).map_err(|_| invalid())?;
    *slot = if short {
      value * HEX_SHORTHAND_MULTIPLIER
    } else {
      value
    };
  }

  Ok(CanonicalColor::from_bytes(bytes))
}

fn parse_channel(field: &str) -> Result<f64, DecodeError> {
  let value = field
    .parse::<u16>()
    .map_err(|_| DecodeError::InvalidNumber {
      field: field.to_string(),
    })?;
  let byte = u8::try_from(value).map_err(|_| DecodeError::ChannelOutOfRange {
    field: field.to_string(),
  })?;
  Ok(normalize_channel(byte))
}

fn decode_functional(grammar: Grammar, fields: &[String]) -> Result<CanonicalColor, DecodeError> {
  let (expected, label) = match grammar {
    Grammar::FunctionalRgba => (4, "4"),
    _ => (3, "3"),
  };
  if fields.len() != expected {
    return Err(DecodeError::FieldCount {
      grammar,
      expected: label,
      found: fields.len(),
    });
  }

  let red = parse_channel(&fields[0])?;
  let green = parse_channel(&fields[1])?;
  let blue = parse_channel(&fields[2])?;
  // rgba alpha is already 0.0-1.0; it is used as written, saturating at the bounds
  let alpha = match fields.get(3) {
    Some(field) => clamp_unit(parse_float(field)?),
    None => 1.0,
  };

  Ok(CanonicalColor::new(red, green, blue, alpha))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn occurrence(grammar: Grammar, fields: &[&str]) -> Occurrence {
    Occurrence::new(
      grammar,
      0,
      0,
      fields.iter().map(|f| f.to_string()).collect(),
    )
  }

  fn color_of(grammar: Grammar, fields: &[&str]) -> CanonicalColor {
    decode(&occurrence(grammar, fields))
      .unwrap()
      .color()
      .unwrap()
  }

  #[test]
  fn vector_components_pass_through() {
    assert_eq!(
      color_of(Grammar::VectorColor, &["0.1", "0.2", "0.3", "0.4"]),
      CanonicalColor::new(0.1, 0.2, 0.3, 0.4)
    );
    assert_eq!(
      color_of(Grammar::VectorColor, &["0.5", "0.5", "0.5"]),
      CanonicalColor::opaque(0.5, 0.5, 0.5)
    );
  }

  #[test]
  fn near_valid_vectors_are_clamped() {
    assert_eq!(
      color_of(Grammar::VectorColor, &["1.1", "0.5", "0.5"]),
      CanonicalColor::opaque(1.0, 0.5, 0.5)
    );
    assert_eq!(
      color_of(Grammar::VectorColor, &["2.0", "-0.5", "0.5", "3.0"]),
      CanonicalColor::new(1.0, 0.0, 0.5, 1.0)
    );
  }

  #[test]
  fn large_vectors_are_rejected() {
    let occ = occurrence(Grammar::VectorColor, &["2.5", "0.5", "0.5"]);
    assert_eq!(decode(&occ), Ok(Decoded::Rejected));
    let occ = occurrence(Grammar::VectorColor, &["0.5", "-10", "0.5"]);
    assert_eq!(decode(&occ), Ok(Decoded::Rejected));
  }

  #[test]
  fn alpha_does_not_trigger_rejection() {
    assert_eq!(
      color_of(Grammar::VectorColor, &["0.5", "0.5", "0.5", "9"]).alpha,
      1.0
    );
  }

  #[test]
  fn strict_policy_rejects_anything_out_of_range() {
    let occ = occurrence(Grammar::VectorColor, &["1.1", "0.5", "0.5"]);
    assert_eq!(
      decode_with_policy(&occ, VectorPolicy::Strict),
      Ok(Decoded::Rejected)
    );
    let occ = occurrence(Grammar::VectorColor, &["1.0", "0.0", "0.5", "1.5"]);
    assert_eq!(
      decode_with_policy(&occ, VectorPolicy::Strict),
      Ok(Decoded::Color(CanonicalColor::new(1.0, 0.0, 0.5, 1.0)))
    );
  }

  #[test]
  fn short_hex_duplicates_digits() {
    assert_eq!(
      color_of(Grammar::HexShort, &["F90"]),
      CanonicalColor::opaque(1.0, 153.0 / 255.0, 0.0)
    );
    assert_eq!(
      color_of(Grammar::HexShortAlpha, &["f908"]),
      CanonicalColor::new(1.0, 153.0 / 255.0, 0.0, 136.0 / 255.0)
    );
  }

  #[test]
  fn long_hex_reads_pairs() {
    assert_eq!(
      color_of(Grammar::HexLong, &["FF8000"]),
      CanonicalColor::opaque(1.0, 128.0 / 255.0, 0.0)
    );
    assert_eq!(
      color_of(Grammar::HexLongAlpha, &["00000080"]),
      CanonicalColor::new(0.0, 0.0, 0.0, 128.0 / 255.0)
    );
  }

  #[test]
  fn functional_channels_divide_by_255() {
    assert_eq!(
      color_of(Grammar::FunctionalRgba, &["255", "128", "0", "0.5"]),
      CanonicalColor::new(1.0, 128.0 / 255.0, 0.0, 0.5)
    );
    assert_eq!(
      color_of(Grammar::FunctionalRgb, &["0", "51", "255"]),
      CanonicalColor::opaque(0.0, 0.2, 1.0)
    );
    assert_eq!(
      color_of(Grammar::FunctionalRgba, &["0", "0", "0", "1.7"]).alpha,
      1.0
    );
  }

  #[test]
  fn malformed_occurrences_are_errors() {
    assert_eq!(
      decode(&occurrence(Grammar::HexLong, &["FFF"])),
      Err(DecodeError::InvalidHex {
        digits: "FFF".to_string()
      })
    );
    assert_eq!(
      decode(&occurrence(Grammar::HexShort, &["+FF"])),
      Err(DecodeError::InvalidHex {
        digits: "+FF".to_string()
      })
    );
    assert_eq!(
      decode(&occurrence(Grammar::VectorColor, &["0.1", "0.2"])),
      Err(DecodeError::FieldCount {
        grammar: Grammar::VectorColor,
        expected: "3 or 4",
        found: 2
      })
    );
    assert_eq!(
      decode(&occurrence(Grammar::VectorColor, &["NaN", "0.2", "0.3"])),
      Err(DecodeError::InvalidNumber {
        field: "NaN".to_string()
      })
    );
    assert_eq!(
      decode(&occurrence(Grammar::FunctionalRgb, &["300", "0", "0"])),
      Err(DecodeError::ChannelOutOfRange {
        field: "300".to_string()
      })
    );
    assert!(decode(&occurrence(Grammar::FunctionalRgba, &["1", "2", "3"])).is_err());
  }

  #[test]
  fn every_scanned_occurrence_decodes() {
    let text = "vec3(3.0, 0, 0) vec4(.1, .2, .3, 1.) #abc #abcd #aabbcc #aabbccdd rgb(0,0,0) rgba(9, 9, 9, .25)";
    for occ in crate::scan(text) {
      assert!(decode(&occ).is_ok(), "{:?}", occ);
    }
  }
}
