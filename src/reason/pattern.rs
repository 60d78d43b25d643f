//! Pattern sets: one label's alternative regexes.

use regex::Regex;

use crate::error::ClassifierError;

/// A non-empty set of alternative patterns for one label.
///
/// Matching any member is a match for the whole set. Patterns are searched,
/// not fully matched, so a pattern hits anywhere in the input unless it
/// anchors itself with `^` or `$`. A `$` also matches just before a single
/// trailing newline, so `"User Initiated\n"` still hits `^User Initiated$`.
#[derive(Debug, Clone)]
pub struct PatternSet {
    sources: Vec<String>,
    regexes: Vec<Regex>,
}

impl PatternSet {
    /// Compiles a single pattern into a one-element set.
    pub fn single(label: &str, pattern: &str) -> Result<Self, ClassifierError> {
        Self::any_of(label, [pattern])
    }

    /// Compiles a list of alternative patterns.
    ///
    /// Fails if the list is empty or any pattern does not compile.
    pub fn any_of<I, S>(label: &str, patterns: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources: Vec<String> = patterns
            .into_iter()
            .map(|pattern| pattern.as_ref().to_string())
            .collect();

        if sources.is_empty() {
            return Err(ClassifierError::EmptyPatternSet {
                label: label.to_string(),
            });
        }

        let regexes = sources
            .iter()
            .map(|pattern| {
                Regex::new(&translate_end_anchors(pattern)).map_err(|source| {
                    ClassifierError::InvalidPattern {
                        label: label.to_string(),
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sources, regexes })
    }

    /// Returns true if any pattern occurs somewhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regexes.iter().any(|regex| regex.is_match(text))
    }

    /// Source text of each pattern, in authoring order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    /// Number of alternative patterns.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the set has no patterns. Never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// End-of-input anchor that also allows one trailing newline.
const END_ANCHOR: &str = r"(?:\n?\z)";

/// Rewrites each bare `$` to [`END_ANCHOR`].
///
/// Escaped dollars and dollars inside character classes are literals and
/// stay as written.
fn translate_end_anchors(pattern: &str) -> String {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0_usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                translated.push(c);
                if let Some(escaped) = chars.next() {
                    translated.push(escaped);
                }
            }
            '[' => {
                translated.push(c);
                class_depth += 1;
                // A `]` right after `[` or `[^` is a literal member.
                if chars.peek() == Some(&'^') {
                    translated.push('^');
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    translated.push(']');
                    chars.next();
                }
            }
            ']' if class_depth > 0 => {
                translated.push(c);
                class_depth -= 1;
            }
            '$' if class_depth == 0 => translated.push_str(END_ANCHOR),
            _ => translated.push(c),
        }
    }

    translated
}
