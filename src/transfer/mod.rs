//! Task-list transfer codec.
//!
//! Turns an ordered list of [`TransferTaskRecord`]s into a short token that
//! can sit in a single query parameter, and back. The token is the compact
//! JSON array of `{"t": title, "p": priority, "m": minutes}` triples, taken
//! as UTF-8 bytes and base64-encoded with the URL-safe alphabet and no
//! padding.
//!
//! Decoding is all-or-nothing: any structural problem yields a
//! [`DecodeError`] and no records.

mod link;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{Priority, TransferTaskRecord};

pub use link::{extract_token, share_link, IMPORT_PARAM};

/// Why a token (or a link carrying one) could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Nothing left after trimming whitespace.
    #[error("import token is empty")]
    Empty,
    /// Percent-escapes that do not decode to UTF-8 text.
    #[error("import token has invalid percent-encoding")]
    PercentEncoding,
    /// Characters outside the base64 alphabet, or a truncated body.
    #[error("import token is not valid base64: {0}")]
    Alphabet(#[from] base64::DecodeError),
    /// The decoded bytes are not a JSON list of well-formed tasks.
    #[error("import token does not contain a valid task list: {0}")]
    Payload(#[from] serde_json::Error),
    /// A task decoded with a blank title.
    #[error("task #{} in import token has an empty title", .index + 1)]
    EmptyTitle {
        /// Zero-based position of the offending task.
        index: usize,
    },
    /// A link was given but it has no `import` parameter.
    #[error("link has no `import` parameter")]
    MissingImportParameter,
}

#[derive(Serialize)]
struct WireTaskRef<'a> {
    t: &'a str,
    p: Priority,
    m: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireTask {
    t: String,
    p: Priority,
    m: u32,
}

/// Encodes `records` into a URL-safe token, preserving order.
#[must_use]
pub fn encode(records: &[TransferTaskRecord]) -> String {
    let wire: Vec<WireTaskRef<'_>> = records
        .iter()
        .map(|r| WireTaskRef { t: &r.title, p: r.priority, m: r.estimated_minutes })
        .collect();
    // Strings, unit enums and integers cannot fail to serialize.
    let json = serde_json::to_vec(&wire).unwrap_or_default();
    let token = URL_SAFE_NO_PAD.encode(json);
    tracing::debug!(tasks = records.len(), token_len = token.len(), "encoded transfer token");
    token
}

/// Decodes a token produced by [`encode`].
///
/// Copy-paste damage that leaves the payload intact is repaired first:
/// surrounding whitespace, percent-escapes, `=` padding, and the standard
/// base64 alphabet (including a `+` that a form decoder turned into a
/// space).
///
/// # Errors
///
/// Returns a [`DecodeError`] if the token is empty, not base64, truncated,
/// not a JSON task list, or contains a task with a missing field, an
/// unknown priority, invalid minutes, or a blank title.
pub fn decode(token: &str) -> Result<Vec<TransferTaskRecord>, DecodeError> {
    let body = normalize(token)?;
    let bytes = URL_SAFE_NO_PAD.decode(body.as_bytes())?;
    let wire: Vec<WireTask> = serde_json::from_slice(&bytes)?;

    let records = wire
        .into_iter()
        .enumerate()
        .map(|(index, task)| {
            if task.t.trim().is_empty() {
                return Err(DecodeError::EmptyTitle { index });
            }
            Ok(TransferTaskRecord { title: task.t, priority: task.p, estimated_minutes: task.m })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(tasks = records.len(), "decoded transfer token");
    Ok(records)
}

fn normalize(token: &str) -> Result<String, DecodeError> {
    let trimmed = token.trim();
    let unescaped = if trimmed.contains('%') {
        urlencoding::decode(trimmed).map_err(|_| DecodeError::PercentEncoding)?.into_owned()
    } else {
        trimmed.to_owned()
    };

    let body: String = unescaped
        .trim()
        .trim_end_matches('=')
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .map(|c| match c {
            '+' | ' ' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    if body.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn token_for(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    fn sample() -> Vec<TransferTaskRecord> {
        vec![
            TransferTaskRecord::new("Draft report", Priority::High, 45),
            TransferTaskRecord::new("Email client", Priority::Medium, 15),
        ]
    }

    #[test]
    fn round_trips_in_order() {
        let records = vec![
            TransferTaskRecord::new("one", Priority::Low, 1),
            TransferTaskRecord::new("two", Priority::Urgent, 120),
            TransferTaskRecord::new("three", Priority::Medium, 30),
            TransferTaskRecord::new("four", Priority::High, u32::MAX),
        ];
        assert_eq!(decode(&encode(&records)).unwrap(), records);
    }

    #[test]
    fn empty_list_round_trips() {
        let token = encode(&[]);
        assert!(!token.is_empty());
        assert!(decode(&token).unwrap().is_empty());
    }

    #[test]
    fn unicode_titles_round_trip() {
        let records = vec![TransferTaskRecord::new("café 日本語 🎯", Priority::Medium, 10)];
        let decoded = decode(&encode(&records)).unwrap();
        assert_eq!(decoded[0].title, "café 日本語 🎯");
    }

    #[test]
    fn zero_minutes_is_preserved() {
        let records = vec![TransferTaskRecord::new("Quick check", Priority::Low, 0)];
        assert_eq!(decode(&encode(&records)).unwrap()[0].estimated_minutes, 0);
    }

    #[test]
    fn token_uses_only_url_safe_characters() {
        let records = vec![TransferTaskRecord::new("???>>>~~~ ÿÿÿ", Priority::Urgent, 7)];
        let token = encode(&records);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn uses_short_wire_keys() {
        let token = encode(&sample()[..1]);
        let json = String::from_utf8(URL_SAFE_NO_PAD.decode(token).unwrap()).unwrap();
        assert_eq!(json, r#"[{"t":"Draft report","p":"High","m":45}]"#);
    }

    #[test]
    fn rejects_priority_outside_enumeration() {
        let token = token_for(r#"[{"t":"Fix prod","p":"Critical","m":5}]"#);
        assert!(matches!(decode(&token), Err(DecodeError::Payload(_))));
    }

    #[test]
    fn every_truncation_fails() {
        let token = encode(&sample());
        for end in 0..token.len() {
            assert!(decode(&token[..end]).is_err(), "prefix of length {end} decoded");
        }
    }

    #[test]
    fn rejects_missing_fields_and_bad_minutes() {
        for json in [
            r#"[{"t":"x","p":"Low"}]"#,
            r#"[{"p":"Low","m":3}]"#,
            r#"[{"t":"x","p":"Low","m":-5}]"#,
            r#"[{"t":"x","p":"Low","m":4.5}]"#,
            r#"[{"t":"x","p":"Low","m":"10"}]"#,
            r#"{"t":"x","p":"Low","m":3}"#,
            "not json",
        ] {
            assert!(
                matches!(decode(&token_for(json)), Err(DecodeError::Payload(_))),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn rejects_foreign_fields() {
        for json in [
            r#"[{"t":"x","p":"Low","m":1,"id":"abc-123","status":"Done","tags":["t"]}]"#,
            r#"[{"t":"x","p":"Low","m":1,"id":"abc-123"}]"#,
            r#"[{"t":"x","p":"Low","m":1},{"t":"y","p":"High","m":2,"title":"y"}]"#,
        ] {
            assert!(
                matches!(decode(&token_for(json)), Err(DecodeError::Payload(_))),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn rejects_blank_title_without_partial_result() {
        let token = token_for(r#"[{"t":"ok","p":"Low","m":1},{"t":"  ","p":"Low","m":1}]"#);
        assert!(matches!(decode(&token), Err(DecodeError::EmptyTitle { index: 1 })));
    }

    #[test]
    fn rejects_foreign_characters_and_empty_input() {
        assert!(matches!(decode("not a token!"), Err(DecodeError::Alphabet(_))));
        assert!(matches!(decode("   "), Err(DecodeError::Empty)));
        assert!(matches!(decode("%3D%3D"), Err(DecodeError::Empty)));
    }

    #[test]
    fn tolerates_whitespace_and_percent_artifacts() {
        let token = encode(&sample());

        let padded = format!("  \n{token}\t ");
        assert_eq!(decode(&padded).unwrap(), sample());

        let escaped = format!("%{:02X}{}%3D", token.as_bytes()[0], &token[1..]);
        assert_eq!(decode(&escaped).unwrap(), sample());
    }

    #[test]
    fn accepts_standard_alphabet_tokens() {
        let json = r#"[{"t":"???>>>~~~","p":"Low","m":5}]"#;
        let standard = STANDARD.encode(json);
        let expected = vec![TransferTaskRecord::new("???>>>~~~", Priority::Low, 5)];

        assert_eq!(decode(&standard).unwrap(), expected);
        assert_eq!(decode(&standard.replace('+', " ")).unwrap(), expected);
    }
}
