//! Intent module - navigation intents derived from user input
//!
//! Voice commands and scanned QR codes both resolve to a pure value that
//! names where the app should go next. Nothing here performs navigation.

pub mod scan;
pub mod voice;

// Re-exports
pub use scan::ScanOutcome;
pub use voice::{VoiceIntent, parse_command};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query value for use in an app route
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
