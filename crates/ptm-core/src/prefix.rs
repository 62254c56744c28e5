//! Tokenization of the user's text relative to the confirmed prefix.
//!
//! Tokens are separated by runs of ASCII spaces. A trailing separator yields
//! a trailing empty token, which stands for "the next word has not been
//! started yet".

use crate::candidate::CandidateList;

/// Split `text` into tokens and the separator runs between them.
/// `tokens.len() == separators.len() + 1` always holds.
pub fn split_with_separators(text: &str) -> (Vec<&str>, Vec<&str>) {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut separators = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b' ' {
            let sep_start = i;
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
            tokens.push(&text[start..sep_start]);
            separators.push(&text[sep_start..i]);
            start = i;
        } else {
            i += 1;
        }
    }
    tokens.push(&text[start..]);
    (tokens, separators)
}

/// Number of tokens in `text`; 0 for the empty string.
pub fn token_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        split_with_separators(text).0.len()
    }
}

/// The confirmed prefix for a segment and the prefix currently being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixState {
    /// Target text the current candidate list was generated for.
    prefix: String,
    /// All typed text except the partially typed final word.
    editing_prefix: String,
}

impl PrefixState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn editing_prefix(&self) -> &str {
        &self.editing_prefix
    }

    /// Target token index right after the confirmed prefix.
    pub fn base_target_token_index(&self) -> usize {
        token_count(&self.prefix)
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        prefix.clone_into(&mut self.prefix);
    }

    /// Returns `true` if the editing prefix changed.
    pub fn set_editing_prefix(&mut self, editing_prefix: &str) -> bool {
        if self.editing_prefix == editing_prefix {
            return false;
        }
        editing_prefix.clone_into(&mut self.editing_prefix);
        true
    }
}

/// The user's text split relative to the confirmed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTokens {
    /// Whitespace split of the text; `[""]` for empty text.
    pub tokens: Vec<String>,
    /// Token count; 0 for empty text.
    pub length: usize,
    /// Everything before the last token and its preceding separator.
    pub editing_prefix: String,
    /// The part of the text covered by the prefix tokens.
    pub overlay_prefix: String,
    /// Separator between the prefix part and the editing part.
    pub overlay_sep: String,
    /// Text typed after the prefix.
    pub overlay_editing: String,
}

impl UserTokens {
    pub fn parse(user_text: &str, prefix_length: usize) -> Self {
        let (tokens, separators) = split_with_separators(user_text);
        let length = if user_text.is_empty() { 0 } else { tokens.len() };

        // Interleave tokens and separators: t0 s0 t1 s1 ... tn.
        let mut parts: Vec<&str> = Vec::with_capacity(tokens.len() + separators.len());
        for (i, token) in tokens.iter().enumerate() {
            parts.push(token);
            if let Some(sep) = separators.get(i) {
                parts.push(sep);
            }
        }

        let editing_prefix = if length > 1 {
            parts[..parts.len() - 2].concat()
        } else {
            String::new()
        };

        let (overlay_prefix, overlay_sep, overlay_editing) = if length == 0 {
            (String::new(), String::new(), String::new())
        } else if prefix_length == 0 {
            (String::new(), String::new(), user_text.to_string())
        } else if length > prefix_length {
            let split = prefix_length * 2 - 1;
            (
                parts[..split].concat(),
                parts[split].to_string(),
                parts[split + 1..].concat(),
            )
        } else {
            (user_text.to_string(), String::new(), String::new())
        };

        Self {
            tokens: tokens.into_iter().map(String::from).collect(),
            length,
            editing_prefix,
            overlay_prefix,
            overlay_sep,
            overlay_editing,
        }
    }

    /// The partially typed final token (empty right after a separator).
    pub fn last(&self) -> &str {
        self.tokens.last().map(String::as_str).unwrap_or("")
    }

    /// The user is inside a word rather than right after a separator.
    pub fn is_mid_word(&self) -> bool {
        !self.last().is_empty()
    }
}

/// Remainder of the best candidate from the user's current word onward.
///
/// The first element is the untyped rest of the current word, or `""` if
/// the user's partial word diverges from the candidate. Empty when the
/// candidate is shorter than what the user has typed.
pub fn best_translation_overlay(candidates: &CandidateList, user_tokens: &[String]) -> Vec<String> {
    let mut overlay = Vec::new();
    let (Some(best), Some(user_token)) = (candidates.best(), user_tokens.last()) else {
        return overlay;
    };
    let n = user_tokens.len();
    if best.len() < n {
        return overlay;
    }
    let mt_token = &best.tokens[n - 1];
    match mt_token.strip_prefix(user_token.as_str()) {
        Some(rest) => overlay.push(rest.to_string()),
        None => overlay.push(String::new()),
    }
    overlay.extend(best.tokens[n..].iter().cloned());
    overlay
}
