use crate::domain::model::{
    GenerationResult, FALLBACK_BODY, FALLBACK_CLOSING, FALLBACK_TITLE, FALLBACK_VALUE_STATEMENT,
    SECTION_SEPARATOR,
};
use crate::utils::error::GenerationError;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

const SECTION_COUNT: usize = 4;

// Whitespace-only lines before the first or after the last line of text.
static EDGE_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[ \t]*\n)+|(?:\n[ \t]*)+$").expect("edge pattern is valid")
});

// A newline, then one or more lines holding only spaces or tabs.
static BLANK_LINE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("blank-line pattern is valid"));

/// What to do with segments past the fourth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Keep the first four segments and drop the rest.
    #[default]
    Truncate,
    /// Append the extra segments to the closing, separated by blank lines.
    MergeIntoClosing,
    /// Fail with a malformed-response error.
    Reject,
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "merge" | "merge-into-closing" => Ok(Self::MergeIntoClosing),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown overflow policy '{}', expected truncate, merge or reject",
                other
            )),
        }
    }
}

/// Splits raw model text into blank-line-delimited segments.
///
/// Line endings are normalised to `\n` and blank lines (empty or holding only
/// spaces and tabs) around the text are dropped first. A run of several blank
/// lines counts as one boundary.
pub fn split_segments(raw: &str) -> Vec<String> {
    let normalized = raw.replace("\r\n", "\n");
    let trimmed = EDGE_BLANK_LINES.replace_all(&normalized, "");
    if trimmed.trim().is_empty() {
        return Vec::new();
    }

    BLANK_LINE_BOUNDARY
        .split(&trimmed)
        .map(str::to_string)
        .collect()
}

/// Maps the segments of a model reply onto the four message fields, applying
/// fallbacks for missing ones.
pub fn parse_message(raw: &str, overflow: OverflowPolicy) -> Result<GenerationResult, GenerationError> {
    let mut segments = split_segments(raw);
    if segments.is_empty() {
        return Err(GenerationError::EmptyResponseError);
    }

    if segments.len() > SECTION_COUNT {
        let extra = segments.len() - SECTION_COUNT;
        match overflow {
            OverflowPolicy::Truncate => {
                tracing::warn!("Dropping {} segment(s) beyond the closing", extra);
                segments.truncate(SECTION_COUNT);
            }
            OverflowPolicy::MergeIntoClosing => {
                tracing::debug!("Merging {} extra segment(s) into the closing", extra);
                let closing = segments.split_off(SECTION_COUNT - 1).join(SECTION_SEPARATOR);
                segments.push(closing);
            }
            OverflowPolicy::Reject => {
                return Err(GenerationError::MalformedResponseError {
                    message: format!(
                        "expected {} sections, received {}",
                        SECTION_COUNT,
                        segments.len()
                    ),
                });
            }
        }
    } else if segments.len() < SECTION_COUNT {
        tracing::debug!(
            "Reply had {} segment(s); filling the rest with defaults",
            segments.len()
        );
    }

    let mut parts = segments.into_iter();
    let title = parts.next().unwrap_or_else(|| FALLBACK_TITLE.to_string());
    let body = parts.next().unwrap_or_else(|| FALLBACK_BODY.to_string());
    let value_statement = parts
        .next()
        .unwrap_or_else(|| FALLBACK_VALUE_STATEMENT.to_string());
    let closing = parts.next().unwrap_or_else(|| FALLBACK_CLOSING.to_string());

    Ok(GenerationResult::new(title, body, value_statement, closing))
}
