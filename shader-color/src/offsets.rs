use crate::scan::Occurrence;

/// Converts ascending byte offsets to UTF-16 code-unit offsets in one forward pass
struct Utf16Cursor<'a> {
  chars: std::str::Chars<'a>,
  byte: usize,
  unit: usize,
}

impl<'a> Utf16Cursor<'a> {
  fn new(text: &'a str) -> Self {
    Self {
      chars: text.chars(),
      byte: 0,
      unit: 0,
    }
  }

  /// Offsets must not decrease between calls
  fn advance_to(&mut self, byte_offset: usize) -> usize {
    while self.byte < byte_offset {
      let Some(ch) = self.chars.next() else {
        break;
      };
      self.byte += ch.len_utf8();
      self.unit += ch.len_utf16();
    }
    self.unit
  }
}

/// Convert a single byte offset into a UTF-16 offset
pub fn byte_to_utf16_offset(text: &str, byte_offset: usize) -> usize {
  Utf16Cursor::new(text).advance_to(byte_offset)
}

/// Convert (start, length) byte spans to UTF-16 spans
///
/// # Arguments
/// * `text` - The text the spans index into
/// * `spans` - Non-overlapping spans sorted by start
pub fn utf16_spans(text: &str, spans: &[(usize, usize)]) -> Vec<(usize, usize)> {
  let mut cursor = Utf16Cursor::new(text);
  spans
    .iter()
    .map(|&(start, length)| {
      let start16 = cursor.advance_to(start);
      let end16 = cursor.advance_to(start + length);
      (start16, end16 - start16)
    })
    .collect()
}

/// Re-express scanner output in UTF-16 offsets
pub fn utf16_occurrences(text: &str, occurrences: Vec<Occurrence>) -> Vec<Occurrence> {
  let spans: Vec<(usize, usize)> = occurrences.iter().map(|o| (o.start, o.length)).collect();
  occurrences
    .into_iter()
    .zip(utf16_spans(text, &spans))
    .map(|(occurrence, (start, length))| Occurrence {
      start,
      length,
      ..occurrence
    })
    .collect()
}
