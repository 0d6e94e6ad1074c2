/// Multiplier to expand hex color shorthand (e.g., F -> FF)
pub const HEX_SHORTHAND_MULTIPLIER: u8 = 17;

/// RGBA color with every channel normalized to 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalColor {
  pub red: f64,
  pub green: f64,
  pub blue: f64,
  pub alpha: f64,
}

impl CanonicalColor {
  pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
    Self {
      red,
      green,
      blue,
      alpha,
    }
  }

  pub const fn opaque(red: f64, green: f64, blue: f64) -> Self {
    Self::new(red, green, blue, 1.0)
  }

  /// Build a color from 8-bit channels [R, G, B, A]
  pub fn from_bytes(bytes: [u8; 4]) -> Self {
    Self::new(
      normalize_channel(bytes[0]),
      normalize_channel(bytes[1]),
      normalize_channel(bytes[2]),
      normalize_channel(bytes[3]),
    )
  }

  /// Restrict every channel to 0.0-1.0. NaN saturates to 0.0.
  pub fn clamped(self) -> Self {
    Self::new(
      clamp_unit(self.red),
      clamp_unit(self.green),
      clamp_unit(self.blue),
      clamp_unit(self.alpha),
    )
  }

  /// Convert back to 8-bit channels [R, G, B, A], rounding to nearest
  pub fn to_bytes(self) -> [u8; 4] {
    [
      denormalize_channel(self.red),
      denormalize_channel(self.green),
      denormalize_channel(self.blue),
      denormalize_channel(self.alpha),
    ]
  }
}

/// Clamp into 0.0-1.0. NaN and negative zero both become positive 0.0.
pub fn clamp_unit(value: f64) -> f64 {
  if value.is_nan() || value <= 0.0 {
    0.0
  } else {
    value.min(1.0)
  }
}

pub fn normalize_channel(byte: u8) -> f64 {
  byte as f64 / 255.0
}

pub fn denormalize_channel(value: f64) -> u8 {
  (clamp_unit(value) * 255.0).round() as u8
}

/// The single hex digit a byte collapses to, if its two digits are identical (0xCC -> C)
pub fn shorthand_digit(byte: u8) -> Option<u8> {
  (byte % HEX_SHORTHAND_MULTIPLIER == 0).then_some(byte / HEX_SHORTHAND_MULTIPLIER)
}

/// Extra digits past the requested precision; enough to tell an exact tie
/// apart from the nearest f64 on either side of it
const GUARD_DIGITS: usize = 30;

/// Fixed-point formatting with JavaScript `toFixed` rounding
///
/// The decimal nearest the exact binary value is chosen, and only an exact
/// tie rounds away from zero. `0.0625` is representable and gives "0.063",
/// while `0.1235` is stored as 0.12349999... and gives "0.123". Negative zero
/// prints without a sign.
pub(crate) fn to_fixed(value: f64, digits: usize) -> String {
  if !value.is_finite() {
    return value.to_string();
  }

  let expanded = format!("{:.*}", digits + GUARD_DIGITS, value.abs());
  let (whole, fraction) = expanded.split_once('.').unwrap_or((&expanded, ""));
  let (kept, rest) = fraction.split_at(digits.min(fraction.len()));

  let mut number: Vec<u8> = whole.bytes().chain(kept.bytes()).collect();
  if rest.as_bytes().first().is_some_and(|&d| d >= b'5') {
    round_up(&mut number);
  }

  let point = number.len() - kept.len();
  let mut out = String::with_capacity(number.len() + 2);
  if value < 0.0 {
    out.push('-');
  }
  out.extend(number[..point].iter().map(|&d| d as char));
  if digits > 0 {
    out.push('.');
    out.extend(number[point..].iter().map(|&d| d as char));
  }
  out
}

/// Add one to the last digit of an ASCII decimal string, carrying leftwards
fn round_up(number: &mut Vec<u8>) {
  for digit in number.iter_mut().rev() {
    if *digit == b'9' {
      *digit = b'0';
    } else {
      *digit += 1;
      return;
    }
  }
  number.insert(0, b'1');
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clamps_each_channel() {
    let color = CanonicalColor::new(1.4, -0.2, 0.5, f64::NAN).clamped();
    assert_eq!(color, CanonicalColor::new(1.0, 0.0, 0.5, 0.0));
  }

  #[test]
  fn bytes_round_trip() {
    let bytes = [255, 153, 0, 128];
    assert_eq!(CanonicalColor::from_bytes(bytes).to_bytes(), bytes);
  }

  #[test]
  fn denormalize_rounds_to_nearest() {
    assert_eq!(denormalize_channel(0.5), 128);
    assert_eq!(denormalize_channel(0.499), 127);
    assert_eq!(denormalize_channel(3.0), 255);
  }

  #[test]
  fn shorthand_only_for_doubled_digits() {
    assert_eq!(shorthand_digit(0xCC), Some(0xC));
    assert_eq!(shorthand_digit(0x00), Some(0x0));
    assert_eq!(shorthand_digit(0xFF), Some(0xF));
    assert_eq!(shorthand_digit(0xC7), None);
  }

  #[test]
  fn fixed_formatting() {
    assert_eq!(to_fixed(0.5, 3), "0.500");
    assert_eq!(to_fixed(0.0625, 3), "0.063");
    assert_eq!(to_fixed(128.0 / 255.0, 3), "0.502");
    assert_eq!(to_fixed(1.0, 2), "1.00");
    assert_eq!(to_fixed(0.0, 3), "0.000");
  }

  #[test]
  fn fixed_formatting_rounds_the_stored_value() {
    // Each of these is stored just below the written tie
    assert_eq!(to_fixed(0.1235, 3), "0.123");
    assert_eq!(to_fixed(0.2345, 3), "0.234");
    assert_eq!(to_fixed(0.0045, 3), "0.004");
    assert_eq!(to_fixed(0.015, 2), "0.01");
    // Exact ties and values just above them round up
    assert_eq!(to_fixed(0.125, 2), "0.13");
    assert_eq!(to_fixed(0.0055, 3), "0.006");
  }

  #[test]
  fn fixed_formatting_carries() {
    assert_eq!(to_fixed(0.9995, 3), "1.000");
    assert_eq!(to_fixed(0.996, 2), "1.00");
    assert_eq!(to_fixed(9.5, 0), "10");
  }

  #[test]
  fn negative_zero_has_no_sign() {
    assert_eq!(to_fixed(-0.0, 3), "0.000");
    assert!(clamp_unit(-0.0).is_sign_positive());
    assert!(CanonicalColor::new(-0.0, 0.5, 0.5, -0.0)
      .clamped()
      .red
      .is_sign_positive());
    assert_eq!(to_fixed(-0.25, 1), "-0.3");
  }
}
