//! Provider-specific language codes.
//!
//! Kagi accepts catalog codes as they are. Google wants region-qualified codes
//! for a few Chinese variants; everything else passes through.

use crate::provider::Provider;

/// Known divergences between catalog codes and Google Translate codes.
const GOOGLE_OVERRIDES: &[(&str, &str)] = &[
    ("zh", "zh-CN"),
    ("zh-tw", "zh-TW"),
    ("pt", "pt"),
    ("yue", "zh-TW"),
];

/// Map a catalog language code to the code `provider` expects.
///
/// Unknown codes are returned unchanged.
pub fn map_for_provider(code: &str, provider: Provider) -> &str {
    match provider {
        Provider::Kagi => code,
        Provider::Google => GOOGLE_OVERRIDES
            .iter()
            .find(|(from, _)| *from == code)
            .map(|(_, to)| *to)
            .unwrap_or(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_overrides() {
        assert_eq!(map_for_provider("zh", Provider::Google), "zh-CN");
        assert_eq!(map_for_provider("zh-tw", Provider::Google), "zh-TW");
        assert_eq!(map_for_provider("yue", Provider::Google), "zh-TW");
        assert_eq!(map_for_provider("pt", Provider::Google), "pt");
    }

    #[test]
    fn test_google_passthrough() {
        assert_eq!(map_for_provider("pl", Provider::Google), "pl");
        assert_eq!(map_for_provider("xx-unknown", Provider::Google), "xx-unknown");
        assert_eq!(map_for_provider("", Provider::Google), "");
    }

    #[test]
    fn test_kagi_is_identity() {
        for code in ["zh", "yue", "zh-tw", "xx-unknown"] {
            assert_eq!(map_for_provider(code, Provider::Kagi), code);
        }
    }
}
