use crate::{ColorInformation, RawOccurrence, RgbaColor, ScanOptions};
use napi::{Error, Result, Status};
use shader_color::{CanonicalColor, Grammar, Occurrence, OffsetEncoding, ScanConfig};

/// Build the scan configuration from host options
///
/// Hosts are JavaScript, so offsets default to UTF-16 code units.
pub fn scan_config(options: Option<&ScanOptions>) -> Result<ScanConfig> {
  parse_scan_options(options).map_err(|e| {
    Error::new(
      Status::InvalidArg,
      format!("Invalid scan options: {}", e),
    )
  })
}

fn parse_scan_options(options: Option<&ScanOptions>) -> anyhow::Result<ScanConfig> {
  let mut config = ScanConfig {
    offset_encoding: OffsetEncoding::Utf16,
    ..ScanConfig::default()
  };

  if let Some(options) = options {
    if let Some(policy) = &options.vector_policy {
      config.vector_policy = policy.parse()?;
    }
    if let Some(encoding) = &options.offset_encoding {
      config.offset_encoding = encoding.parse()?;
    }
  }

  Ok(config)
}

fn to_u32(offset: usize) -> Result<u32> {
  u32::try_from(offset).map_err(|_| {
    Error::new(
      Status::GenericFailure,
      format!("Offset {} does not fit in 32 bits", offset),
    )
  })
}

pub fn to_canonical(color: &RgbaColor) -> CanonicalColor {
  CanonicalColor::new(color.red, color.green, color.blue, color.alpha)
}

pub fn to_js_color(color: CanonicalColor) -> RgbaColor {
  RgbaColor {
    red: color.red,
    green: color.green,
    blue: color.blue,
    alpha: color.alpha,
  }
}

pub fn color_information_to_js(info: shader_color::ColorInformation) -> Result<ColorInformation> {
  Ok(ColorInformation {
    start: to_u32(info.start)?,
    length: to_u32(info.length)?,
    grammar: info.grammar.to_string(),
    color: to_js_color(info.color),
  })
}

pub fn occurrence_to_js(occurrence: &Occurrence) -> Result<RawOccurrence> {
  Ok(RawOccurrence {
    grammar: occurrence.grammar.to_string(),
    start: to_u32(occurrence.start)?,
    length: to_u32(occurrence.length)?,
    raw_fields: occurrence.raw_fields.clone(),
  })
}

pub fn occurrence_from_js(occurrence: RawOccurrence) -> Result<Occurrence> {
  let grammar: Grammar = occurrence
    .grammar
    .parse()
    .map_err(|e| Error::new(Status::InvalidArg, format!("Invalid occurrence: {}", e)))?;

  Ok(Occurrence::new(
    grammar,
    occurrence.start as usize,
    occurrence.length as usize,
    occurrence.raw_fields,
  ))
}
