//! Best-effort syntax repair for model-emitted JSON.
//!
//! Each pass is a small pure function. `repair` composes them in a fixed order because
//! later passes assume earlier ones ran. This only targets the malformations observed
//! from the completion backend (trailing commas, bare keys, single quotes, raw newlines);
//! it is not a JSON5 parser. Callers try a strict parse first, so these passes never
//! touch well-formed input.

use std::sync::LazyLock;

use regex::Regex;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*").expect("valid code fence regex"));

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("valid trailing comma regex"));

static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*):").expect("valid bare key regex")
});

static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([:\[,]\s*)'([^'\\]*)'").expect("valid single quote regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Removes every Markdown code-fence marker (with optional language tag).
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").into_owned()
}

/// `[1, 2,]` → `[1, 2]`
pub fn remove_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// `{name: 1}` → `{"name": 1}`
pub fn quote_bare_keys(text: &str) -> String {
    BARE_KEY
        .replace_all(text, r#"${1}"${2}"${3}:"#)
        .into_owned()
}

/// `{"a": 'x'}` → `{"a": "x"}`; only values directly after `:`, `[` or `,`.
pub fn double_quote_single_quoted(text: &str) -> String {
    SINGLE_QUOTED
        .replace_all(text, r#"${1}"${2}""#)
        .into_owned()
}

/// Collapses newlines and whitespace runs so multi-line string values parse.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Runs all repair passes in order.
pub fn repair(text: &str) -> String {
    let text = remove_trailing_commas(text);
    let text = quote_bare_keys(&text);
    let text = double_quote_single_quoted(&text);
    collapse_whitespace(&text)
}
