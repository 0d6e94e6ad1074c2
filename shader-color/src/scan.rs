use crate::grammar::Grammar;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// `vec3(...)` / `vec4(...)` with unsigned or negative decimal components
static VECTOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  compile(&format!(
    r"\bvec([34])\s*\(\s*({n})\s*,\s*({n})\s*,\s*({n})\s*(?:,\s*({n})\s*)?\)",
    n = r"-?(?:\d+\.?\d*|\.\d+)"
  ))
});

/// `#` plus 3, 4, 6 or 8 hex digits, not followed by another word character
static HEX_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| compile(r"#([0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4})\b"));

static RGB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  compile(r"\brgb\s*\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)")
});

static RGBA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  compile(
    r"\brgba\s*\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d+\.?\d*|\.\d+)\s*\)",
  )
});

fn compile(pattern: &str) -> Regex {
  // Patterns are constants; a failure here is caught by any scan test
  Regex::new(pattern).expect("color literal pattern must compile")
}

/// A located, undecoded match of one grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
  pub grammar: Grammar,
  /// Byte offset of the first matched character
  pub start: usize,
  /// Length of the match in bytes
  pub length: usize,
  /// Captured fields verbatim: numeric literals for vector and functional
  /// forms, the digit string (without `#`) for hex forms
  pub raw_fields: Vec<String>,
}

impl Occurrence {
  pub fn new(grammar: Grammar, start: usize, length: usize, raw_fields: Vec<String>) -> Self {
    Self {
      grammar,
      start,
      length,
      raw_fields,
    }
  }

  pub fn end(&self) -> usize {
    self.start + self.length
  }

  /// Whether the literal as written carries an alpha channel
  pub fn has_alpha(&self) -> bool {
    match self.grammar {
      Grammar::VectorColor => self.raw_fields.len() == 4,
      grammar => grammar.is_alpha_bearing(),
    }
  }

  /// The matched slice of the text this occurrence was scanned from
  pub fn matched<'a>(&self, text: &'a str) -> Option<&'a str> {
    text.get(self.start..self.end())
  }
}

/// Pattern plus the check that turns its captures into grammar fields
struct Matcher {
  name: &'static str,
  pattern: &'static LazyLock<Regex>,
  accept: fn(&Captures<'_>) -> Option<(Grammar, Vec<String>)>,
}

/// Registration order doubles as overlap priority: earlier entries win
static MATCHERS: [Matcher; 4] = [
  Matcher {
    name: "vector",
    pattern: &VECTOR_PATTERN,
    accept: accept_vector,
  },
  Matcher {
    name: "hex",
    pattern: &HEX_PATTERN,
    accept: accept_hex,
  },
  Matcher {
    name: "rgb",
    pattern: &RGB_PATTERN,
    accept: accept_rgb,
  },
  Matcher {
    name: "rgba",
    pattern: &RGBA_PATTERN,
    accept: accept_rgba,
  },
];

fn captured_fields(caps: &Captures<'_>, first: usize) -> Vec<String> {
  caps
    .iter()
    .skip(first)
    .flatten()
    .map(|m| m.as_str().to_string())
    .collect()
}

fn accept_vector(caps: &Captures<'_>) -> Option<(Grammar, Vec<String>)> {
  let arity: usize = caps.get(1)?.as_str().parse().ok()?;
  let fields = captured_fields(caps, 2);
  // vec3 takes exactly three components and vec4 exactly four
  (fields.len() == arity).then_some((Grammar::VectorColor, fields))
}

fn accept_hex(caps: &Captures<'_>) -> Option<(Grammar, Vec<String>)> {
  let digits = caps.get(1)?.as_str();
  let grammar = Grammar::hex_from_digit_count(digits.len())?;
  Some((grammar, vec![digits.to_string()]))
}

fn channels_in_range(fields: &[String]) -> bool {
  fields
    .iter()
    .take(3)
    .all(|f| f.parse::<u16>().is_ok_and(|v| v <= 255))
}

fn accept_rgb(caps: &Captures<'_>) -> Option<(Grammar, Vec<String>)> {
  let fields = captured_fields(caps, 1);
  channels_in_range(&fields).then_some((Grammar::FunctionalRgb, fields))
}

fn accept_rgba(caps: &Captures<'_>) -> Option<(Grammar, Vec<String>)> {
  let fields = captured_fields(caps, 1);
  channels_in_range(&fields).then_some((Grammar::FunctionalRgba, fields))
}

/// Whether [start, end) intersects any span in a sorted, non-overlapping list
fn overlaps(claimed: &[(usize, usize)], start: usize, end: usize) -> bool {
  let idx = claimed.partition_point(|&(_, claimed_end)| claimed_end <= start);
  claimed
    .get(idx)
    .is_some_and(|&(claimed_start, _)| claimed_start < end)
}

/// Find every color literal in `text`
///
/// Each grammar is matched independently with a fresh iterator, so no cursor
/// state carries across calls. A match overlapping a span already claimed by
/// an earlier-registered grammar is dropped.
///
/// # Returns
/// Non-overlapping occurrences ordered by start offset
pub fn scan(text: &str) -> Vec<Occurrence> {
  let mut occurrences: Vec<Occurrence> = Vec::new();
  let mut claimed: Vec<(usize, usize)> = Vec::new();

  for matcher in &MATCHERS {
    let mut found = Vec::new();

    for caps in matcher.pattern.captures_iter(text) {
      let Some(whole) = caps.get(0) else {
        continue;
      };
      let Some((grammar, raw_fields)) = (matcher.accept)(&caps) else {
        trace!(
          matcher = matcher.name,
          start = whole.start(),
          "match failed grammar constraints"
        );
        continue;
      };
      if overlaps(&claimed, whole.start(), whole.end()) {
        trace!(
          matcher = matcher.name,
          start = whole.start(),
          "match overlaps an earlier grammar"
        );
        continue;
      }
      found.push(Occurrence::new(grammar, whole.start(), whole.len(), raw_fields));
    }

    claimed.extend(found.iter().map(|o| (o.start, o.end())));
    claimed.sort_unstable();
    occurrences.append(&mut found);
  }

  occurrences.sort_by_key(|o| o.start);
  debug!(
    bytes = text.len(),
    occurrences = occurrences.len(),
    "scanned text for color literals"
  );
  occurrences
}
