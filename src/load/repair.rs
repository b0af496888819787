//! Best-effort repair of almost-JSON text.
//!
//! Applied once, after a strict parse has already failed. The pass strips a
//! Markdown code-fence wrapper and undoes the escaping damage that commonly
//! arrives with pasted or machine-relayed JSON: doubled backslashes,
//! over-escaped quotes, and literal `\n` sequences standing in for newlines.

use once_cell::sync::Lazy;
use regex::Regex;

// Matches a whole input wrapped in a fenced code block, with an optional
// language tag after the opening fence.
static CODE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*(.*?)\s*```$").unwrap()
});

/// Produce a repaired candidate for one retry parse.
pub fn repair_text(text: &str) -> String {
    let trimmed = text.trim();

    let inner = match CODE_FENCE_REGEX.captures(trimmed) {
        Some(captures) => captures.get(1).map_or(trimmed, |m| m.as_str()),
        None => trimmed,
    };

    // Escape fixes must run in this order: literal newlines first, then
    // over-escaped quotes, then collapsing doubled backslashes.
    inner
        .replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\\\", "\\")
}
