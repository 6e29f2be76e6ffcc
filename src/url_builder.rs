//! Redirect URL construction for each provider.

use crate::i18n::map_for_provider;
use crate::provider::{Provider, GOOGLE_ENDPOINT, KAGI_ORIGIN};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped when a URL is embedded as a single component:
/// ASCII alphanumerics and `- _ . ! ~ * ' ( )`, the same set browsers keep
/// in `encodeURIComponent`.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode `value` as one opaque path segment or query value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

/// Build the URL that shows `source_url` translated to `language_code`.
///
/// The source URL is never validated; whatever it holds is encoded as-is.
///
/// # Example
/// ```
/// use translate_redirect::{build_target_url, Provider};
///
/// assert_eq!(
///     build_target_url("https://example.com", "pl", Provider::Kagi),
///     "https://translate.kagi.com/translate/pl/https%3A%2F%2Fexample.com"
/// );
/// ```
pub fn build_target_url(source_url: &str, language_code: &str, provider: Provider) -> String {
    let encoded = encode_component(source_url);

    match provider {
        Provider::Kagi => format!("{}/translate/{}/{}", KAGI_ORIGIN, language_code, encoded),
        Provider::Google => format!(
            "{}?sl=auto&tl={}&hl=en-US&u={}&client=webapp",
            GOOGLE_ENDPOINT,
            map_for_provider(language_code, Provider::Google),
            encoded
        ),
    }
}
