use std::borrow::Cow;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::CompletionError;

/// The parts of a completions reply the relay reads.
///
/// Everything except `choices` is ignored. Shapes that do not match are kept
/// as raw values so extraction can report which step failed instead of
/// failing the whole parse.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Option<Choices>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Choices {
    List(Vec<Choice>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Text { text: String },
    Other(Value),
}

impl CompletionResponse {
    /// Text of the first choice, exactly as the provider sent it.
    pub fn into_text(self) -> Result<String, CompletionError> {
        let Some(Choices::List(choices)) = self.choices else {
            return Err(CompletionError::UnexpectedFormat);
        };

        match choices.into_iter().next() {
            Some(Choice::Text { text }) => Ok(text),
            Some(Choice::Other(_)) => Err(CompletionError::MissingText),
            None => Err(CompletionError::UnexpectedFormat),
        }
    }
}

/// Parse a raw provider body and pull out the completion text.
pub fn parse_completion(body: &[u8]) -> Result<String, CompletionError> {
    if body.is_empty() {
        return Err(CompletionError::EmptyResponse);
    }

    let body = replace_lone_surrogates(body);

    // JSON `null` decodes to an empty object
    let object: Option<Map<String, Value>> =
        serde_json::from_slice(&body).map_err(CompletionError::MalformedResponse)?;

    let response: CompletionResponse =
        serde_json::from_value(Value::Object(object.unwrap_or_default()))
            .map_err(|_| CompletionError::UnexpectedFormat)?;

    response.into_text()
}

const REPLACEMENT_ESCAPE: &[u8] = b"\\ufffd";

/// Rewrite `\uXXXX` escapes that name an unpaired UTF-16 surrogate as
/// `\ufffd`.
///
/// Completions cut mid-emoji can end on half a surrogate pair, which
/// serde_json rejects outright.
fn replace_lone_surrogates(body: &[u8]) -> Cow<'_, [u8]> {
    if !body.windows(2).any(|w| w == b"\\u") {
        return Cow::Borrowed(body);
    }

    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i] != b'\\' || i + 1 >= body.len() {
            out.push(body[i]);
            i += 1;
            continue;
        }

        match unicode_escape_at(body, i) {
            Some(0xD800..=0xDBFF) => match unicode_escape_at(body, i + 6) {
                Some(0xDC00..=0xDFFF) => {
                    out.extend_from_slice(&body[i..i + 12]);
                    i += 12;
                }
                _ => {
                    out.extend_from_slice(REPLACEMENT_ESCAPE);
                    i += 6;
                }
            },
            Some(0xDC00..=0xDFFF) => {
                out.extend_from_slice(REPLACEMENT_ESCAPE);
                i += 6;
            }
            Some(_) => {
                out.extend_from_slice(&body[i..i + 6]);
                i += 6;
            }
            // any other escape, including `\\`, passes through as a pair
            None => {
                out.extend_from_slice(&body[i..i + 2]);
                i += 2;
            }
        }
    }

    Cow::Owned(out)
}

/// The code unit of a well-formed `\uXXXX` escape starting at `at`.
fn unicode_escape_at(body: &[u8], at: usize) -> Option<u16> {
    let escape = body.get(at..at + 6)?;
    if &escape[..2] != b"\\u" || !escape[2..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(&escape[2..]).ok()?;
    u16::from_str_radix(hex, 16).ok()
}
