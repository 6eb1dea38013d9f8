//! Expression normalisation and current-operand extraction.
//!
//! The display text uses glyphs (`×`, `÷`, `−`, `π`) and spaces around
//! operators; evaluation needs plain ASCII arithmetic. Both directions of
//! that gap are handled here.

use lazy_static::lazy_static;
use regex::Regex;
use std::f64::consts::{E, PI};

/// Display-only glyphs and the ASCII operator each one stands for.
const GLYPHS: &[(char, &str)] = &[('×', "*"), ('÷', "/"), ('−', "-")];

/// Display function names and the evaluator's name for them.
const FUNCTION_REWRITES: &[(&str, &str)] = &[
    ("sin", "sin"),
    ("cos", "cos"),
    ("tan", "tan"),
    ("log", "log10"),
    ("ln", "ln"),
    ("sqrt", "sqrt"),
    ("abs", "abs"),
];

lazy_static! {
    /// The constant `e` written on its own, not as part of a name or number.
    static ref STANDALONE_E: Regex = Regex::new(r"\be\b").unwrap();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// A function name directly followed by an opening parenthesis.
    static ref FUNCTION_CALL: Regex = Regex::new(r"\b([a-z][a-z0-9]*)\(").unwrap();

    /// Leading float literal, the way a lenient float parser reads one.
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();
}

/// Normalise display glyphs and strip whitespace (pipeline steps 1 and 2).
pub fn normalize(expression: &str) -> String {
    let mut text = String::with_capacity(expression.len());
    for ch in expression.chars() {
        match GLYPHS.iter().find(|(glyph, _)| *glyph == ch) {
            Some((_, ascii)) => text.push_str(ascii),
            None if ch == 'π' => text.push_str(&PI.to_string()),
            None => text.push(ch),
        }
    }

    let text = STANDALONE_E.replace_all(&text, E.to_string().as_str());
    WHITESPACE.replace_all(&text, "").into_owned()
}

/// Rename display function names to the evaluator's names (pipeline step 3).
///
/// Unknown names are left untouched; the evaluator rejects them.
pub fn rewrite_functions(expression: &str) -> String {
    FUNCTION_CALL
        .replace_all(expression, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            let target = FUNCTION_REWRITES
                .iter()
                .find(|(display, _)| *display == name)
                .map_or(name, |(_, target)| *target);
            format!("{}(", target)
        })
        .into_owned()
}

/// Run the full textual part of the pipeline: glyphs, whitespace, functions.
pub fn sanitize(expression: &str) -> String {
    rewrite_functions(&normalize(expression))
}

/// Parse the leading float of `text`, ignoring anything after it.
///
/// Returns `None` when `text` does not start with a number.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse().ok())
}

/// The trailing operand of an expression.
///
/// The expression is split on every top-level binary operator symbol
/// (`+ - * / %` and their glyphs) outside parentheses, and the last piece
/// is parsed as a float. A `-` always splits, so the operand of `"-5"` is
/// `5`. Anything unparsable counts as `0`.
pub fn current_operand(expression: &str) -> f64 {
    let mut depth = 0usize;
    let mut last_split = 0;

    for (idx, ch) in expression.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '+' | '-' | '*' | '/' | '%' | '×' | '÷' | '−' if depth == 0 => {
                last_split = idx + ch.len_utf8();
            }
            _ => {}
        }
    }

    parse_float_prefix(expression[last_split..].trim()).unwrap_or(0.0)
}
