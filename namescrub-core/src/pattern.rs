use crate::normalize::{is_space_char, normalize_spaces};
use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Code points treated as interchangeable hyphens in loose mode.
pub const HYPHEN_CHARS: [char; 9] = [
    '-',        // hyphen-minus
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2212}', // minus sign
    '\u{FE63}', // small hyphen-minus
    '\u{FF0D}', // fullwidth hyphen-minus
];

const HYPHEN_CLASS: &str =
    r"[\-\x{2010}\x{2011}\x{2012}\x{2013}\x{2014}\x{2212}\x{FE63}\x{FF0D}]";
const SPACE_CLASS: &str = r"[ \x{00A0}\x{202F}]";

/// Whether matches are removed or replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Delete,
    Replace,
}

/// What to put where the phrase matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    Delete,
    /// Inserted verbatim, `$1` and friends are not expanded.
    Replace(String),
}

impl Substitution {
    fn text(&self) -> &str {
        match self {
            Self::Delete => "",
            Self::Replace(text) => text,
        }
    }
}

/// A compiled phrase matcher. Built once per run and reused for every name.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    regex: Regex,
    substitution: Substitution,
    ignore_case: bool,
}

impl MatchPattern {
    pub fn new(
        phrase: &str,
        ignore_case: bool,
        loose: bool,
        substitution: Substitution,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: build_pattern(phrase, ignore_case, loose)?,
            substitution,
            ignore_case,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Delete or replace every occurrence, without tidying spaces.
    pub fn substitute<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.regex
            .replace_all(name, NoExpand(self.substitution.text()))
    }

    /// The name this file should get: substitution followed by space cleanup.
    pub fn propose(&self, name: &str) -> String {
        normalize_spaces(&self.substitute(name))
    }
}

/// Regex source for `phrase`.
///
/// Literal phrases are escaped as a whole. Loose phrases are NFC-composed
/// first, then every hyphen variant becomes [`HYPHEN_CLASS`] and every
/// whitespace character becomes [`SPACE_CLASS`].
pub fn pattern_source(phrase: &str, loose: bool) -> String {
    if !loose {
        return regex::escape(phrase);
    }

    let mut source = String::with_capacity(phrase.len() * 2);
    let mut buf = [0u8; 4];
    for ch in phrase.nfc() {
        if HYPHEN_CHARS.contains(&ch) {
            source.push_str(HYPHEN_CLASS);
        } else if ch.is_whitespace() || is_space_char(ch) {
            source.push_str(SPACE_CLASS);
        } else {
            source.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
    source
}

/// Compile the matcher for `phrase`.
///
/// An empty phrase matches at every position; callers reject it first.
pub fn build_pattern(phrase: &str, ignore_case: bool, loose: bool) -> Result<Regex, regex::Error> {
    let source = pattern_source(phrase, loose);
    tracing::debug!(%source, ignore_case, loose, "compiled phrase pattern");
    RegexBuilder::new(&source)
        .case_insensitive(ignore_case)
        .build()
}
