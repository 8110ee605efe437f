//! Roster loading.
//!
//! The roster is a comma-separated text file, one channel per row:
//!
//! ```text
//! # name, channel, handle
//! Alice, alicestream, @alice
//! Bob, bobplays
//! "Carol, the Great", carol_tv, none
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Fields are trimmed
//! and may be double-quoted to contain commas. Channel ids are stored as
//! lowercase Twitch logins, so `AliceStream` and `twitch.tv/alicestream`
//! name the same channel. Any malformed row fails the whole load.

use std::collections::HashSet;
use std::path::Path;

use live_probe::twitch::normalize_login;
use tracing::debug;

use crate::domain::ChannelWatch;
use crate::{Error, Result};

const COMMENT: char = '#';

/// Read and parse a roster file.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<ChannelWatch>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::roster(path.display().to_string(), 0, format!("cannot read: {e}"))
    })?;

    let roster = parse_roster(&contents, &path.display().to_string())?;
    debug!(path = %path.display(), channels = roster.len(), "Roster loaded");
    Ok(roster)
}

/// Parse roster text. `source` names the input in error messages.
pub fn parse_roster(contents: &str, source: &str) -> Result<Vec<ChannelWatch>> {
    let mut roster = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        let fields = split_fields(line).map_err(|msg| Error::roster(source, line_no, msg))?;

        let (name, channel, handle) = match fields.as_slice() {
            [name, channel] => (name, channel, None),
            [name, channel, handle] => (name, channel, Some(handle.clone())),
            other => {
                return Err(Error::roster(
                    source,
                    line_no,
                    format!("expected 2 or 3 fields, found {}", other.len()),
                ));
            }
        };

        if name.is_empty() {
            return Err(Error::roster(source, line_no, "display name is empty"));
        }
        if channel.is_empty() {
            return Err(Error::roster(source, line_no, "channel id is empty"));
        }
        let login = normalize_login(channel).map_err(|_| {
            Error::roster(source, line_no, format!("invalid channel id '{channel}'"))
        })?;
        if !seen.insert(login.clone()) {
            return Err(Error::roster(
                source,
                line_no,
                format!("duplicate channel id '{login}'"),
            ));
        }

        roster.push(ChannelWatch::new(name.as_str(), login, handle));
    }

    if roster.is_empty() {
        return Err(Error::roster(source, 0, "no channels to watch"));
    }

    Ok(roster)
}

/// Split one row into trimmed fields, honoring double quotes.
fn split_fields(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() && !was_quoted => {
                field.clear();
                in_quotes = true;
                was_quoted = true;
            }
            '"' => return Err("unexpected quote inside an unquoted field".to_string()),
            ',' if !in_quotes => {
                fields.push(finish(&field, was_quoted));
                field.clear();
                was_quoted = false;
            }
            _ if was_quoted && !in_quotes => {
                if !c.is_whitespace() {
                    return Err("text after closing quote".to_string());
                }
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(finish(&field, was_quoted));
    Ok(fields)
}

fn finish(field: &str, quoted: bool) -> String {
    if quoted {
        field.to_string()
    } else {
        field.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::NotifyState;

    #[test]
    fn test_parse_roster() {
        let text = "\
# name, channel, handle
Alice, alicestream, @alice

  Bob,bobplays
\"Carol, the Great\", carol_tv, none
";
        let roster = parse_roster(text, "test").unwrap();
        assert_eq!(roster.len(), 3);

        assert_eq!(roster[0].display_name, "Alice");
        assert_eq!(roster[0].channel_id, "alicestream");
        assert_eq!(roster[0].social_handle.as_deref(), Some("@alice"));

        assert_eq!(roster[1].display_name, "Bob");
        assert_eq!(roster[1].social_handle, None);
        assert_eq!(roster[1].resolved_handle(), "Bob");

        assert_eq!(roster[2].display_name, "Carol, the Great");
        assert_eq!(roster[2].resolved_handle(), "Carol, the Great");
    }

    #[test]
    fn test_every_entry_starts_suppressed() {
        let roster = parse_roster("A, a\nB, b, bee\nC, c, ", "test").unwrap();
        assert!(
            roster
                .iter()
                .all(|e| e.notify_state() == NotifyState::ArmedSuppressed)
        );
    }

    #[test]
    fn test_empty_third_field() {
        let roster = parse_roster("Alice, alicestream, ", "test").unwrap();
        assert_eq!(roster[0].social_handle, None);
        assert_eq!(roster[0].resolved_handle(), "Alice");
    }

    #[rstest]
    #[case("Alice", "expected 2 or 3 fields, found 1")]
    #[case("Alice, a, b, c", "expected 2 or 3 fields, found 4")]
    #[case(", alicestream", "display name is empty")]
    #[case("Alice, ", "channel id is empty")]
    #[case("Alice, a\nAlicia, A", "duplicate channel id 'a'")]
    #[case("Alice, alicestream\nAlias, https://twitch.tv/AliceStream", "duplicate channel id 'alicestream'")]
    #[case("Alice, alice stream", "invalid channel id 'alice stream'")]
    #[case("Alice, twitch.tv/", "invalid channel id")]
    #[case("\"Alice, a", "unterminated quoted field")]
    #[case("Al\"ice, a", "unexpected quote")]
    fn test_malformed_rows(#[case] text: &str, #[case] expected: &str) {
        let err = parse_roster(text, "streamers.txt").unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn test_channel_urls_normalized() {
        let roster = parse_roster(
            "Alice, https://www.twitch.tv/AliceStream/\nBob, BobPlays",
            "test",
        )
        .unwrap();
        assert_eq!(roster[0].channel_id, "alicestream");
        assert_eq!(roster[1].channel_id, "bobplays");
    }

    #[test]
    fn test_duplicate_url_names_line() {
        let err = parse_roster(
            "Alice, alicestream\nAlias, https://twitch.tv/AliceStream\n",
            "streamers.txt",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Roster { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_error_names_line() {
        let err = parse_roster("# header\nAlice, a\nBroken\n", "streamers.txt").unwrap_err();
        assert!(matches!(err, Error::Roster { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_only_comments_is_error() {
        let err = parse_roster("# nobody\n\n", "streamers.txt").unwrap_err();
        assert!(err.to_string().contains("no channels"));
    }

    #[test]
    fn test_escaped_quote() {
        let fields = split_fields(r#""The ""Best"" Show", show"#).unwrap();
        assert_eq!(fields, vec!["The \"Best\" Show", "show"]);
    }
}
