//! Mapbox geocoding as a place provider.

mod client;
mod normalize;
pub mod types;

pub use client::MapboxClient;
pub use normalize::{category_for, normalize_feature, ID_PREFIX};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by `encodeURIComponent`-style encoding.
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

pub(crate) fn encode_component(raw: &str) -> String {
    percent_encoding::utf8_percent_encode(raw, COMPONENT).to_string()
}
