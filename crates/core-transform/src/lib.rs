//! Pure case transforms over selection text.
//!
//! Every function here is deterministic, side-effect free, and total: the
//! result is always a `String`, possibly identical to the input. Session
//! logic (what to transform, when to apply) lives in `core-cycle`; this
//! crate only knows how to produce each case form.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

pub mod width;

pub use width::{to_full_width, to_half_width};

/// The case forms a selection can be rewritten into.
///
/// Declaration order doubles as the unfiltered default cycle ordering used
/// when configuration cannot be honored (see `core-config`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseKind {
    /// The text captured when a cycling session started, untouched.
    Original,
    Lower,
    Upper,
    Title,
    Sentence,
    FullWidth,
    HalfWidth,
}

impl CaseKind {
    pub const ALL: [CaseKind; 7] = [
        CaseKind::Original,
        CaseKind::Lower,
        CaseKind::Upper,
        CaseKind::Title,
        CaseKind::Sentence,
        CaseKind::FullWidth,
        CaseKind::HalfWidth,
    ];

    /// Stable lowercase name used in configuration keys and log fields.
    pub fn label(self) -> &'static str {
        match self {
            CaseKind::Original => "original",
            CaseKind::Lower => "lower",
            CaseKind::Upper => "upper",
            CaseKind::Title => "title",
            CaseKind::Sentence => "sentence",
            CaseKind::FullWidth => "fullwidth",
            CaseKind::HalfWidth => "halfwidth",
        }
    }
}

/// Compute the text for `kind`.
///
/// `Original` is the identity at this layer; the cycling controller
/// substitutes its captured session text instead of calling through here
/// with it, but single-shot dispatch may still pass it.
pub fn apply(kind: CaseKind, text: &str, lowercase_first: bool) -> String {
    match kind {
        CaseKind::Original => text.to_owned(),
        CaseKind::Lower => to_lower_case(text),
        CaseKind::Upper => to_upper_case(text),
        CaseKind::Title => to_title_case(text, lowercase_first),
        CaseKind::Sentence => to_sentence_case(text, lowercase_first),
        CaseKind::FullWidth => to_full_width(text),
        CaseKind::HalfWidth => to_half_width(text),
    }
}

pub fn to_upper_case(text: &str) -> String {
    text.to_uppercase()
}

pub fn to_lower_case(text: &str) -> String {
    text.to_lowercase()
}

/// Capitalize the first letter of every word run.
///
/// Word runs are UAX-29 word bounds, so `don't` stays one word while
/// `foo-bar` capitalizes on both sides of the hyphen. With
/// `lowercase_first` the whole input is folded to lowercase before
/// capitalization, matching the "always lowercase text first" setting.
pub fn to_title_case(text: &str, lowercase_first: bool) -> String {
    let base = if lowercase_first {
        text.to_lowercase()
    } else {
        text.to_owned()
    };
    base.split_word_bounds().map(capitalize_first).collect()
}

/// Sentence boundary: a letter run, then anything that is not a terminator
/// or newline, then optional terminators and trailing whitespace. The first
/// character of each match (always an ASCII letter) is uppercased.
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z]+[^.!?:\n]+[.!?:]*\s*").expect("sentence pattern compiles")
});

/// Capitalize the first letter following each sentence boundary.
pub fn to_sentence_case(text: &str, lowercase_first: bool) -> String {
    let base = if lowercase_first {
        text.to_lowercase()
    } else {
        text.to_owned()
    };
    SENTENCE
        .replace_all(&base, |caps: &regex::Captures<'_>| {
            capitalize_first(&caps[0])
        })
        .into_owned()
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => first.to_uppercase().chain(chars).collect(),
        Some(first) => std::iter::once(first).chain(chars).collect(),
        None => String::new(),
    }
}
