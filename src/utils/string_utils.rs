use crate::utils::CONSTANTS;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;
use std::sync::atomic::Ordering;

// Same reserved set as javascript's encodeURIComponent, ids stay stable for existing clients.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn sanitize_sensitive_info(query: &str) -> Cow<'_, str> {
    if !CONSTANTS.sanitize.load(Ordering::Relaxed) {
        return Cow::Borrowed(query);
    }
    CONSTANTS.re_credentials.replace_all(query, "$1***")
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Reverses [`encode_component`]. Returns `None` when the decoded bytes are not valid UTF-8.
pub fn decode_component(value: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(value).decode_utf8().ok()
}

pub fn is_blank_optional_string(value: &Option<String>) -> bool {
    value.as_ref().is_none_or(|s| s.trim().is_empty())
}
