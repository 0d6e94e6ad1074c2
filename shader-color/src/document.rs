use crate::color::CanonicalColor;
use crate::config::{OffsetEncoding, ScanConfig};
use crate::decode::{decode_with_policy, Decoded};
use crate::grammar::Grammar;
use crate::offsets::utf16_spans;
use crate::scan::scan;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

/// A decoded color literal located in a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorInformation {
  /// Start offset, in the unit chosen by [`ScanConfig::offset_encoding`]
  pub start: usize,
  pub length: usize,
  pub grammar: Grammar,
  pub color: CanonicalColor,
}

/// Find and decode every color literal in a document
///
/// Rejected literals are omitted.
///
/// # Arguments
/// * `text` - The full document text
/// * `config` - Vector policy and offset unit
///
/// # Returns
/// Colors in order of appearance
pub fn document_colors(text: &str, config: &ScanConfig) -> Vec<ColorInformation> {
  let occurrences = scan(text);

  let mut colors: Vec<ColorInformation> = occurrences
    .par_iter()
    .filter_map(
      |occurrence| match decode_with_policy(occurrence, config.vector_policy) {
        Ok(Decoded::Color(color)) => Some(ColorInformation {
          start: occurrence.start,
          length: occurrence.length,
          grammar: occurrence.grammar,
          color,
        }),
        Ok(Decoded::Rejected) => {
          trace!(start = occurrence.start, "literal is not a color");
          None
        }
        Err(e) => {
          warn!(start = occurrence.start, error = %e, "scanner produced an undecodable literal");
          None
        }
      },
    )
    .collect();

  if config.offset_encoding == OffsetEncoding::Utf16 {
    let spans: Vec<(usize, usize)> = colors.iter().map(|c| (c.start, c.length)).collect();
    for (color, (start, length)) in colors.iter_mut().zip(utf16_spans(text, &spans)) {
      color.start = start;
      color.length = length;
    }
  }

  debug!(
    occurrences = occurrences.len(),
    colors = colors.len(),
    "collected document colors"
  );
  colors
}
