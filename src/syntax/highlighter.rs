//! Lexical highlight scanner
//!
//! One pass, left to right, over a row's rendered text. The only state
//! carried between rows is the open-block-comment flag; strings never span
//! rows. Larger chunks supersede smaller ones (a comment wrapping code
//! suppresses everything inside it), so the rules run in strict priority
//! order and the first one that claims a span wins.

use super::languages::{KeywordTier, LanguageProfile};

/// Highlight category for one rendered character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    /// Control-flow/statement keywords and operators.
    Keyword1,
    /// Type/constant-class keywords.
    Keyword2,
    String,
    Number,
    Punctuation,
    /// Transient search-match overlay, never produced by the scanner.
    Match,
}

/// Token boundary characters. NUL is in the set because end-of-row behaves
/// like a terminator for keyword boundary checks.
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace()
        || byte == 0
        || matches!(
            byte,
            b'"' | b'\''
                | b','
                | b'.'
                | b'('
                | b')'
                | b'+'
                | b'-'
                | b'/'
                | b'*'
                | b'='
                | b'~'
                | b'%'
                | b'<'
                | b'>'
                | b'['
                | b']'
                | b';'
        )
}

/// The narrower set highlighted as punctuation in prose-like profiles.
pub fn is_punctuation(byte: u8) -> bool {
    matches!(
        byte,
        b'.' | b',' | b'(' | b')' | b':' | b';' | b'[' | b']' | b'!' | b'?'
    )
}

/// Scan one rendered row and classify every character.
///
/// `starts_in_block_comment` is the previous row's trailing flag (false for
/// the first row). Returns the highlight array, always exactly
/// `render.len()` entries, and whether the row ends with a block comment
/// still open. Total over any input; malformed profiles are rejected at
/// registry construction, never here.
pub fn scan_row(
    render: &str,
    starts_in_block_comment: bool,
    profile: Option<&LanguageProfile>,
) -> (Vec<Highlight>, bool) {
    let bytes = render.as_bytes();
    let mut hl = vec![Highlight::Normal; bytes.len()];

    let Some(profile) = profile else {
        return (hl, false);
    };

    let line_comment = profile.line_comment_start;
    let block_delims = profile
        .block_comment_start
        .zip(profile.block_comment_end);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_block_comment;

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if profile.flags.comments {
            if let Some(start) = line_comment {
                if in_string.is_none()
                    && !in_comment
                    && bytes[i..].starts_with(start.as_bytes())
                {
                    hl[i..].fill(Highlight::Comment);
                    break;
                }
            }

            if let Some((open, close)) = block_delims {
                if in_string.is_none() {
                    if in_comment {
                        hl[i] = Highlight::Comment;
                        if bytes[i..].starts_with(close.as_bytes()) {
                            hl[i..i + close.len()].fill(Highlight::Comment);
                            i += close.len();
                            in_comment = false;
                            prev_sep = true;
                            continue;
                        }
                        i += 1;
                        continue;
                    } else if bytes[i..].starts_with(open.as_bytes()) {
                        hl[i..i + open.len()].fill(Highlight::Comment);
                        i += open.len();
                        in_comment = true;
                        continue;
                    }
                }
            }
        }

        if profile.flags.strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                // Escape: backslash consumes the next character too.
                if c == b'\\' && i + 1 < bytes.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if profile.flags.numbers {
            let digit_start = c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number);
            let decimal_point = c == b'.' && prev_hl == Highlight::Number;
            if digit_start || decimal_point {
                hl[i] = Highlight::Number;
                i += 1;
                prev_sep = false;
                continue;
            }
        }

        if prev_sep && profile.flags.keywords {
            let mut matched = false;
            for keyword in &profile.keywords {
                let token = keyword.text.as_bytes();
                let end = i + token.len();
                if end > bytes.len() {
                    continue;
                }
                let candidate = &bytes[i..end];
                let text_matches = if profile.case_sensitive_keywords {
                    candidate == token
                } else {
                    candidate.eq_ignore_ascii_case(token)
                };
                // The character after the token must itself be a separator;
                // end-of-row counts, like the terminator would.
                let bounded = bytes.get(end).map_or(true, |&b| is_separator(b));
                if text_matches && bounded {
                    let category = match keyword.tier {
                        KeywordTier::Tier1 => Highlight::Keyword1,
                        KeywordTier::Tier2 => Highlight::Keyword2,
                    };
                    hl[i..end].fill(category);
                    i = end;
                    matched = true;
                    break;
                }
            }
            if matched {
                prev_sep = false;
                continue;
            }
        }

        // TODO: scanning rule for `flags.operators`; relying on prev_sep
        // would miss operators written without surrounding whitespace.

        if profile.flags.punctuation && is_punctuation(c) {
            // Only treat as punctuation when followed by whitespace or
            // end-of-row; the highlighted position counts as a separator.
            if i == bytes.len() - 1 || bytes[i + 1].is_ascii_whitespace() {
                hl[i] = Highlight::Punctuation;
                i += 1;
                prev_sep = true;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}
