use crate::color::{shorthand_digit, to_fixed, CanonicalColor};
use crate::grammar::Grammar;
use crate::scan::scan;

/// Alpha at or above this is treated as opaque and alpha-bearing alternatives are dropped
pub const ALPHA_OPAQUE_THRESHOLD: f64 = 0.99;

const VECTOR_DECIMALS: usize = 3;
const FUNCTIONAL_ALPHA_DECIMALS: usize = 2;

/// One textual rendering of a color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationCandidate {
  pub text: String,
  pub grammar: Grammar,
}

/// The notation a literal was written in before the edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFormat {
  pub grammar: Grammar,
  /// Only consulted for vectors, where it picks vec4 over vec3
  pub has_alpha: bool,
}

impl SourceFormat {
  pub fn new(grammar: Grammar, has_alpha: bool) -> Self {
    Self { grammar, has_alpha }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Form {
  grammar: Grammar,
  alpha: bool,
}

impl Form {
  fn of(grammar: Grammar) -> Self {
    Self {
      grammar,
      alpha: grammar.is_alpha_bearing(),
    }
  }

  fn vector(alpha: bool) -> Self {
    Self {
      grammar: Grammar::VectorColor,
      alpha,
    }
  }
}

fn render(color: CanonicalColor, form: Form) -> Option<String> {
  let [r, g, b, a] = color.to_bytes();

  let text = match form.grammar {
    Grammar::VectorColor => {
      let mut parts = vec![color.red, color.green, color.blue];
      if form.alpha {
        parts.push(color.alpha);
      }
      let fields: Vec<String> = parts.iter().map(|&v| to_fixed(v, VECTOR_DECIMALS)).collect();
      format!("vec{}({})", fields.len(), fields.join(", "))
    }
    Grammar::HexShort => format!(
      "#{:x}{:x}{:x}",
      shorthand_digit(r)?,
      shorthand_digit(g)?,
      shorthand_digit(b)?
    ),
    Grammar::HexShortAlpha => format!(
      "#{:x}{:x}{:x}{:x}",
      shorthand_digit(r)?,
      shorthand_digit(g)?,
      shorthand_digit(b)?,
      shorthand_digit(a)?
    ),
    Grammar::HexLong => format!("#{:02x}{:02x}{:02x}", r, g, b),
    Grammar::HexLongAlpha => format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a),
    Grammar::FunctionalRgb => format!("rgb({}, {}, {})", r, g, b),
    Grammar::FunctionalRgba => format!(
      "rgba({}, {}, {}, {})",
      r,
      g,
      b,
      to_fixed(color.alpha, FUNCTIONAL_ALPHA_DECIMALS)
    ),
  };

  Some(text)
}

fn candidate(color: CanonicalColor, form: Form) -> Option<PresentationCandidate> {
  render(color, form).map(|text| PresentationCandidate {
    text,
    grammar: form.grammar,
  })
}

/// Alternatives in display order: vector, short hex, long hex, functional
fn default_forms(translucent: bool) -> Vec<Form> {
  let mut forms = vec![Form::vector(false)];
  if translucent {
    forms.push(Form::vector(true));
  }
  for (opaque, with_alpha) in [
    (Grammar::HexShort, Grammar::HexShortAlpha),
    (Grammar::HexLong, Grammar::HexLongAlpha),
    (Grammar::FunctionalRgb, Grammar::FunctionalRgba),
  ] {
    forms.push(Form::of(opaque));
    if translucent {
      forms.push(Form::of(with_alpha));
    }
  }
  forms
}

/// Forms that preserve the source notation, best first
fn preserving_forms(source: SourceFormat) -> Vec<Form> {
  match source.grammar {
    Grammar::VectorColor => vec![Form::vector(source.has_alpha)],
    Grammar::HexShort => vec![Form::of(Grammar::HexShort), Form::of(Grammar::HexLong)],
    Grammar::HexShortAlpha => vec![
      Form::of(Grammar::HexShortAlpha),
      Form::of(Grammar::HexLongAlpha),
    ],
    grammar => vec![Form::of(grammar)],
  }
}

fn encode_candidates(color: CanonicalColor, source: Option<SourceFormat>) -> Vec<PresentationCandidate> {
  let color = color.clamped();
  let translucent = color.alpha < ALPHA_OPAQUE_THRESHOLD;
  let mut candidates = Vec::new();

  // The preserving form is exempt from alpha suppression so an edit never
  // changes the notation (or vector arity) of the literal being replaced
  if let Some(source) = source {
    candidates.extend(
      preserving_forms(source)
        .into_iter()
        .find_map(|form| candidate(color, form)),
    );
  }

  for form in default_forms(translucent) {
    if let Some(next) = candidate(color, form) {
      if !candidates.contains(&next) {
        candidates.push(next);
      }
    }
  }

  candidates
}

/// Render a color in every supported notation
///
/// # Arguments
/// * `color` - The edited color; channels are clamped to 0.0-1.0 first
/// * `original_grammar` - Notation of the literal being replaced
/// * `has_original_alpha` - For vectors, whether the literal was a vec4
///
/// # Returns
/// Candidates with the original notation first, followed by vector, hex and
/// functional alternatives
pub fn encode(
  color: CanonicalColor,
  original_grammar: Grammar,
  has_original_alpha: bool,
) -> Vec<PresentationCandidate> {
  encode_candidates(
    color,
    Some(SourceFormat::new(original_grammar, has_original_alpha)),
  )
}

/// Encode without a source notation, in default order
pub fn encode_default(color: CanonicalColor) -> Vec<PresentationCandidate> {
  encode_candidates(color, None)
}

/// Work out the notation of a span of text that held a color literal.
///
/// A span that is exactly one literal reports that literal's grammar.
/// Otherwise a leading `vec3` / `vec4` keyword still marks it as a vector.
pub fn classify(span_text: &str) -> Option<SourceFormat> {
  let trimmed = span_text.trim();
  if let [only] = scan(trimmed).as_slice() {
    if only.start == 0 && only.length == trimmed.len() {
      return Some(SourceFormat::new(only.grammar, only.has_alpha()));
    }
  }

  if trimmed.starts_with("vec") {
    return Some(SourceFormat::new(
      Grammar::VectorColor,
      trimmed.starts_with("vec4"),
    ));
  }

  None
}

/// Encode for the span being replaced, inferring its notation from the text
pub fn encode_for_text(color: CanonicalColor, span_text: &str) -> Vec<PresentationCandidate> {
  encode_candidates(color, classify(span_text))
}
