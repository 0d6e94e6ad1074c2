#![deny(clippy::all)]

pub mod convert;

use crate::convert::{
  color_information_to_js, occurrence_from_js, occurrence_to_js, scan_config, to_canonical,
  to_js_color,
};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use shader_color::{
  decode_with_policy, document_colors, encode_for_text, scan, utf16_occurrences,
  ALPHA_OPAQUE_THRESHOLD,
};
use tracing_subscriber::EnvFilter;

#[napi(object)]
pub struct RgbaColor {
  /// Red channel (0.0-1.0)
  pub red: f64,
  /// Green channel (0.0-1.0)
  pub green: f64,
  /// Blue channel (0.0-1.0)
  pub blue: f64,
  /// Alpha channel (0.0-1.0)
  pub alpha: f64,
}

#[napi(object)]
pub struct ScanOptions {
  /// How out-of-range vec3/vec4 components are handled: "permissive" (default) or "strict"
  pub vector_policy: Option<String>,
  /// Unit of reported offsets: "utf16" (default, matches JS string indices) or "utf8"
  pub offset_encoding: Option<String>,
}

#[napi(object)]
pub struct ColorInformation {
  /// Offset of the literal in the document
  pub start: u32,
  /// Length of the literal
  pub length: u32,
  /// Notation the literal is written in
  pub grammar: String,
  /// The decoded color
  pub color: RgbaColor,
}

#[napi(object)]
pub struct RawOccurrence {
  /// Notation the literal is written in
  pub grammar: String,
  /// Offset of the literal in the document
  pub start: u32,
  /// Length of the literal
  pub length: u32,
  /// Captured fields, verbatim
  pub raw_fields: Vec<String>,
}

#[napi(object)]
pub struct ColorPresentation {
  /// Replacement text for the literal
  pub text: String,
  /// Notation of the replacement text
  pub grammar: String,
}

pub struct AsyncDocumentColors {
  text: String,
  config: shader_color::ScanConfig,
}

#[napi]
impl Task for AsyncDocumentColors {
  type Output = Vec<shader_color::ColorInformation>;
  type JsValue = Vec<ColorInformation>;

  fn compute(&mut self) -> Result<Self::Output> {
    Ok(document_colors(&self.text, &self.config))
  }

  fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
    output.into_iter().map(color_information_to_js).collect()
  }
}

#[napi]
/// Find every color literal in a document and decode it
///
/// Literals that look like positions rather than colors (e.g. `vec3(2.5, 0.5, 0.5)`)
/// are skipped.
///
/// # Arguments
/// * `text` - The full document text
/// * `options` - Vector policy and offset unit
///
/// # Returns
/// The decoded colors in order of appearance
pub fn provide_document_colors(
  text: String,
  options: Option<ScanOptions>,
) -> Result<Vec<ColorInformation>> {
  let config = scan_config(options.as_ref())?;
  document_colors(&text, &config)
    .into_iter()
    .map(color_information_to_js)
    .collect()
}

#[napi]
/// Find and decode document colors on the libuv thread pool
///
/// # Arguments
/// * `text` - The full document text
/// * `options` - Vector policy and offset unit
///
/// # Returns
/// A promise that resolves to the decoded colors in order of appearance
pub fn provide_document_colors_async(
  text: String,
  options: Option<ScanOptions>,
) -> Result<AsyncTask<AsyncDocumentColors>> {
  let config = scan_config(options.as_ref())?;
  Ok(AsyncTask::new(AsyncDocumentColors { text, config }))
}

#[napi]
/// Render an edited color in every supported notation
///
/// # Arguments
/// * `color` - The edited color
/// * `original_text` - The text of the literal being replaced
///
/// # Returns
/// Presentations with the literal's own notation first
pub fn provide_color_presentations(
  color: RgbaColor,
  original_text: String,
) -> Vec<ColorPresentation> {
  encode_for_text(to_canonical(&color), &original_text)
    .into_iter()
    .map(|candidate| ColorPresentation {
      text: candidate.text,
      grammar: candidate.grammar.to_string(),
    })
    .collect()
}

#[napi]
/// Find color literals without decoding them
///
/// # Arguments
/// * `text` - The full document text
/// * `options` - Only `offsetEncoding` applies
///
/// # Returns
/// The matched literals with their captured fields
pub fn scan_text(text: String, options: Option<ScanOptions>) -> Result<Vec<RawOccurrence>> {
  let config = scan_config(options.as_ref())?;
  let mut occurrences = scan(&text);
  if config.offset_encoding == shader_color::OffsetEncoding::Utf16 {
    occurrences = utf16_occurrences(&text, occurrences);
  }
  occurrences.iter().map(occurrence_to_js).collect()
}

#[napi]
/// Decode a single literal previously returned by `scanText`
///
/// # Arguments
/// * `occurrence` - The literal to decode
/// * `options` - Only `vectorPolicy` applies
///
/// # Returns
/// The color, or null when the literal is judged not to be a color
pub fn decode_occurrence(
  occurrence: RawOccurrence,
  options: Option<ScanOptions>,
) -> Result<Option<RgbaColor>> {
  let config = scan_config(options.as_ref())?;
  let occurrence = occurrence_from_js(occurrence)?;
  let decoded = decode_with_policy(&occurrence, config.vector_policy)
    .map_err(|e| Error::new(Status::InvalidArg, format!("Invalid occurrence: {}", e)))?;
  Ok(decoded.color().map(to_js_color))
}

#[napi]
/// Get the alpha above which alpha-bearing alternatives are left out
///
/// # Returns
/// The threshold (0.99)
pub fn get_alpha_opaque_threshold() -> f64 {
  ALPHA_OPAQUE_THRESHOLD
}

#[napi]
/// Install a stderr log subscriber
///
/// # Arguments
/// * `filter` - A tracing filter such as "shader_color=debug"; falls back to `RUST_LOG`, then "info"
///
/// # Returns
/// False if a subscriber was already installed
pub fn init_logging(filter: Option<String>) -> bool {
  let filter = filter
    .and_then(|f| EnvFilter::try_new(f).ok())
    .or_else(|| EnvFilter::try_from_default_env().ok())
    .unwrap_or_else(|| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init()
    .is_ok()
}
