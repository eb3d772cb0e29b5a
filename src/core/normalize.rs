use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Characters trimmed from the front of a whitespace-delimited chunk
const OPENING: &[char] = &['(', '[', '{', '"', '\'', '`', '<', '\u{201c}', '\u{2018}'];

/// Characters trimmed from the back of a whitespace-delimited chunk
const CLOSING: &[char] = &[
    ')', ']', '}', '"', '\'', '`', '>', ',', ';', ':', '!', '?', '.', '\u{201d}', '\u{2019}',
];

/// Fold text for matching: NFKC compatibility form, then lowercase
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Characters that always belong to a token (`c++`, `c#`)
#[inline]
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Tokenize text for skill matching
///
/// `joined` holds tokens that contain punctuation and must survive as a
/// single unit (`node.js`, `ci/cd`, `.net`, `scikit-learn`). Any other
/// punctuation acts as a separator; `+` and `#` are always kept.
pub fn tokenize(text: &str, joined: &HashSet<String>) -> Vec<String> {
    let folded = fold(text);
    let mut tokens = Vec::new();

    for chunk in folded.split_whitespace() {
        push_tokens(chunk, joined, &mut tokens);
    }

    tokens
}

fn push_tokens(piece: &str, joined: &HashSet<String>, tokens: &mut Vec<String>) {
    let piece = trim_chunk(piece).trim_matches('-');
    if piece.is_empty() {
        return;
    }
    if joined.contains(piece) {
        tokens.push(piece.to_string());
        return;
    }

    // A known token with a hyphenated prefix or suffix (`node.js-powered`)
    if piece.contains('-') && piece.split('-').any(|part| joined.contains(trim_chunk(part))) {
        for part in piece.split('-') {
            push_tokens(part, joined, tokens);
        }
        return;
    }

    // Split on everything except dots and hyphens, then re-check each part
    if piece.contains(is_separator) {
        for part in piece.split(is_separator) {
            push_tokens(part, joined, tokens);
        }
        return;
    }

    // Dots and hyphens that are not part of a known token
    tokens.extend(
        piece
            .split(|c: char| c == '.' || c == '-')
            .filter(|p| !p.is_empty())
            .map(str::to_string),
    );
}

#[inline]
fn is_separator(c: char) -> bool {
    !is_token_char(c) && c != '.' && c != '-'
}

/// Tokenize text with no punctuation-bearing tokens preserved
pub fn words(text: &str) -> Vec<String> {
    tokenize(text, &HashSet::new())
}

/// Tokens of an alias that need to be preserved as one unit by `tokenize`
pub fn joined_tokens(alias: &str) -> impl Iterator<Item = String> + '_ {
    alias
        .split_whitespace()
        .map(|chunk| trim_chunk(&fold(chunk)).to_string())
        .filter(|chunk| !chunk.is_empty() && chunk.chars().any(|c| !is_token_char(c)))
}

#[inline]
fn trim_chunk(chunk: &str) -> &str {
    chunk.trim_start_matches(OPENING).trim_end_matches(CLOSING)
}
