//! Secret detection for structured log fields.
//!
//! Handlers that serialize metadata verbatim (JSON) run keys through
//! [`is_secret_key`] so credentials attached as call-site context never reach
//! a sink in clear text.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Segments that mark a key as secret on their own.
const SECRET_SEGMENTS: &[&str] = &[
    "token",
    "tokens",
    "secret",
    "secrets",
    "password",
    "passwords",
    "passwd",
    "passphrase",
    "credential",
    "credentials",
    "auth",
    "authorization",
    "apikey",
    "privatekey",
];

/// Segments that make a following `key` segment secret (`api_key`, `privateKey`).
const KEY_QUALIFIERS: &[&str] = &["api", "private", "secret", "access", "signing"];

/// Checks if a metadata key likely refers to a secret.
///
/// The key is split into words on `_`, `-`, `.`, whitespace and camelCase
/// boundaries, and matching is done per word, case-insensitively. A bare
/// `key` word only counts when qualified (`api_key`, `privateKey`), so
/// `cache_key` or `monkey` pass through untouched.
///
/// # Examples
///
/// ```
/// use fanlog_shared::is_secret_key;
///
/// assert!(is_secret_key("apiKey"));
/// assert!(is_secret_key("DB_PASSWORD"));
/// assert!(is_secret_key("webhook_token"));
/// assert!(!is_secret_key("request_id"));
/// assert!(!is_secret_key("author"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let segments = key_segments(key);
    segments.iter().enumerate().any(|(index, segment)| {
        if SECRET_SEGMENTS.contains(&segment.as_str()) {
            return true;
        }
        matches!(segment.as_str(), "key" | "keys")
            && index
                .checked_sub(1)
                .and_then(|previous| segments.get(previous))
                .is_some_and(|previous| KEY_QUALIFIERS.contains(&previous.as_str()))
    })
}

/// Split a key into lowercase words.
fn key_segments(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();

    for (index, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let previous = index.checked_sub(1).and_then(|i| chars.get(i));
            let next = chars.get(index + 1);
            let after_lower = previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            let ends_acronym = previous.is_some_and(|p| p.is_uppercase())
                && next.is_some_and(|n| n.is_lowercase());
            if after_lower || ends_acronym {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
