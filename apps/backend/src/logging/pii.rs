//! Redaction for values that must not reach logs verbatim.
//!
//! Emails keep their first character and domain; JWT-like and other opaque
//! token runs are replaced wholesale. Passwords are never passed here: they
//! are never logged at all.

use std::fmt;

use lazy_regex::regex;
use regex::Captures;

/// Mask emails and bearer-token-like runs in `input`.
pub fn redact(input: &str) -> String {
    let emails = regex!(r"\b([A-Za-z0-9._%+-]+)(@[A-Za-z0-9.-]+\.[A-Za-z]{1,})\b");
    let masked = emails.replace_all(input, |caps: &Captures| {
        let local = &caps[1];
        let domain = &caps[2];
        match local.chars().next() {
            Some(first) => format!("{first}***{domain}"),
            None => domain.to_string(),
        }
    });

    // JWTs are three base64url segments joined by dots.
    let jwt = regex!(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b");
    let masked = jwt.replace_all(&masked, "[REDACTED_TOKEN]");

    let opaque = regex!(r"\b[A-Za-z0-9+/_-]{24,}={0,2}");
    opaque.replace_all(&masked, "[REDACTED_TOKEN]").into_owned()
}

/// Display wrapper that redacts on format, for use in tracing fields:
/// `info!(email = %Redacted(&email), "...")`.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
