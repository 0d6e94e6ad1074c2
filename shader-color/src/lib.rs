#![deny(clippy::all)]

//! Color literals in shader source: find them, decode them into normalized
//! RGBA, and render edited colors back into vector, hex and `rgb()`/`rgba()`
//! notation.
//!
//! ```
//! use shader_color::{document_colors, encode, Grammar, ScanConfig};
//!
//! let colors = document_colors("vec3(1.1, 0.5, 0.5)", &ScanConfig::default());
//! assert_eq!(colors[0].color.red, 1.0);
//!
//! let candidates = encode(colors[0].color, Grammar::VectorColor, false);
//! assert_eq!(candidates[0].text, "vec3(1.000, 0.500, 0.500)");
//! ```

pub mod color;
pub mod config;
pub mod decode;
pub mod document;
pub mod encode;
pub mod grammar;
pub mod offsets;
pub mod scan;

pub use crate::color::CanonicalColor;
pub use crate::config::{OffsetEncoding, ScanConfig};
pub use crate::decode::{decode, decode_with_policy, DecodeError, Decoded, VectorPolicy};
pub use crate::document::{document_colors, ColorInformation};
pub use crate::encode::{
  classify, encode, encode_default, encode_for_text, PresentationCandidate, SourceFormat,
  ALPHA_OPAQUE_THRESHOLD,
};
pub use crate::grammar::{Family, Grammar};
pub use crate::offsets::{byte_to_utf16_offset, utf16_occurrences, utf16_spans};
pub use crate::scan::{scan, Occurrence};
