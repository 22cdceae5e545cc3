use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("invalid DIGITS_RE pattern"));

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Text(String),
    /// Digit run with leading zeros stripped; compared by length, then digits.
    Number(NumberDigits),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NumberDigits(String);

impl Ord for NumberDigits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NumberDigits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key that orders embedded digit runs numerically, so `iter2` sorts
/// before `iter10`.
///
/// Segments alternate text, number, text, ... and always start with a text
/// segment (possibly empty), so segments at the same position are always of
/// the same kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Segment>);

impl NaturalKey {
    pub fn new(name: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for digits in DIGITS_RE.find_iter(name) {
            segments.push(Segment::Text(name[last..digits.start()].to_string()));

            let trimmed = digits.as_str().trim_start_matches('0');
            segments.push(Segment::Number(NumberDigits(trimmed.to_string())));
            last = digits.end();
        }
        segments.push(Segment::Text(name[last..].to_string()));

        Self(segments)
    }
}

/// Total order on names: natural key first, raw name on ties (`a01` vs `a1`).
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    NaturalKey::new(left)
        .cmp(&NaturalKey::new(right))
        .then_with(|| left.cmp(right))
}
