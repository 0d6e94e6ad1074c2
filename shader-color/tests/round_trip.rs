use shader_color::{
  decode, document_colors, encode, scan, CanonicalColor, Decoded, Grammar, ScanConfig,
};

fn decode_text(text: &str) -> CanonicalColor {
  let found = scan(text);
  assert_eq!(found.len(), 1, "{}", text);
  match decode(&found[0]).unwrap() {
    Decoded::Color(color) => color,
    Decoded::Rejected => panic!("{} was rejected", text),
  }
}

fn candidate_text(color: CanonicalColor, grammar: Grammar, alpha: bool) -> String {
  encode(color, grammar, alpha)
    .into_iter()
    .find(|c| c.grammar == grammar)
    .unwrap()
    .text
}

#[test]
fn long_hex_round_trips_exactly() {
  for value in (0..=0xFFFFFFu32).step_by(0x010305) {
    let text = format!("#{:06x}", value);
    let color = decode_text(&text);
    let encoded = candidate_text(color, Grammar::HexLong, false);
    assert_eq!(encoded, text);
    assert_eq!(decode_text(&encoded), color);
  }
}

#[test]
fn functional_round_trip_error_is_bounded() {
  for value in (0..=255u32).step_by(7) {
    let color = CanonicalColor::new(value as f64 / 255.0, 0.31, 0.7, 0.5);
    let text = candidate_text(color, Grammar::FunctionalRgba, true);
    let back = decode_text(&text);
    assert!((back.red - color.red).abs() <= 1.0 / 510.0);
    assert!((back.green - color.green).abs() <= 1.0 / 510.0);
    assert!((back.alpha - color.alpha).abs() <= 0.005);
  }
}

#[test]
fn vector_round_trip_error_is_bounded() {
  for step in 0..=100 {
    let v = step as f64 / 100.0 + 0.00037;
    let color = CanonicalColor::new(v.min(1.0), 1.0 - v.min(1.0), 0.123456, 0.5);
    let text = candidate_text(color, Grammar::VectorColor, true);
    let back = decode_text(&text);
    for (a, b) in [
      (back.red, color.red),
      (back.green, color.green),
      (back.blue, color.blue),
      (back.alpha, color.alpha),
    ] {
      assert!((a - b).abs() <= 1.0 / 512.0, "{} vs {}", a, b);
    }
  }
}

#[test]
fn edit_cycle_replaces_span_with_preserved_notation() {
  let text = "uniform vec3 tint = vec3(0.2, 0.4, 0.6);\nconst vec4 fog = vec4(1, 1, 1, 0.5);";
  let colors = document_colors(text, &ScanConfig::default());
  assert_eq!(colors.len(), 2);

  let fog = colors[1];
  let span = &text[fog.start..fog.start + fog.length];
  let edited = CanonicalColor { alpha: 1.0, ..fog.color };
  let candidates = shader_color::encode_for_text(edited, span);

  let replaced = format!(
    "{}{}{}",
    &text[..fog.start],
    candidates[0].text,
    &text[fog.start + fog.length..]
  );
  assert!(replaced.ends_with("vec4(1.000, 1.000, 1.000, 1.000);"));
  assert_eq!(document_colors(&replaced, &ScanConfig::default()).len(), 2);
}

#[test]
fn decode_examples() {
  assert_eq!(
    decode_text("#F90"),
    CanonicalColor::opaque(1.0, 153.0 / 255.0, 0.0)
  );
  assert_eq!(
    decode_text("rgba(255,128,0,0.5)"),
    CanonicalColor::new(1.0, 128.0 / 255.0, 0.0, 0.5)
  );
  assert_eq!(
    decode_text("vec3(1.1, 0.5, 0.5)"),
    CanonicalColor::opaque(1.0, 0.5, 0.5)
  );
  assert!(document_colors("vec3(2.5, 0.5, 0.5)", &ScanConfig::default()).is_empty());
}
