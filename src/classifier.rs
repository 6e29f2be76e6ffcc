//! Translate-surface detection.
//!
//! Every surface checks this before acting so the extension never redirects a
//! page that is already a translation result or a translation service page.

use crate::provider::Provider;
use tracing::debug;
use url::Url;

/// Per-site proxy domains serving Google-translated pages (`*.translate.goog`)
const GOOGLE_PROXY_SUFFIX: &str = ".translate.goog";

/// Host serving Google's embedded translate widget content
const GOOGLE_WIDGET_HOST: &str = "translate.googleusercontent.com";

/// Google's internal translation API host
const GOOGLE_API_HOST: &str = "translate-pa.googleapis.com";

/// Returns true when `url` is on a translation surface.
///
/// Unparseable input returns false: the page is treated as a normal one and
/// the caller may still try to redirect it.
pub fn is_translate_surface(url: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Failed to parse URL '{}': {}", url, e);
            return false;
        }
    };

    let Some(host) = parsed.host_str() else {
        return false;
    };

    host == Provider::Kagi.host()
        || (host == Provider::Google.host() && is_google_result_page(&parsed))
        || host.ends_with(GOOGLE_PROXY_SUFFIX)
        || host.contains(GOOGLE_WIDGET_HOST)
        || host.contains(GOOGLE_API_HOST)
}

/// A Google Translate result carries both the source URL and the target language.
/// The bare landing page has neither and stays usable.
fn is_google_result_page(url: &Url) -> bool {
    let mut has_source = false;
    let mut has_target = false;

    for (key, _) in url.query_pairs() {
        match key.as_ref() {
            "u" => has_source = true,
            "tl" => has_target = true,
            _ => {}
        }
    }

    has_source && has_target
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Kagi Tests ====================

    #[test]
    fn test_kagi_host_is_surface() {
        assert!(is_translate_surface("https://translate.kagi.com/"));
        assert!(is_translate_surface(
            "https://translate.kagi.com/translate/pl/https://example.com"
        ));
    }

    #[test]
    fn test_kagi_host_is_case_insensitive() {
        assert!(is_translate_surface("https://TRANSLATE.KAGI.COM/translate/de/x"));
    }

    #[test]
    fn test_other_kagi_hosts_are_not_surfaces() {
        assert!(!is_translate_surface("https://kagi.com/search?q=translate"));
    }

    #[test]
    fn test_every_provider_host_is_recognized() {
        for provider in [Provider::Kagi, Provider::Google] {
            let url = format!("https://{}/translate?tl=pl&u=https%3A%2F%2Fexample.com", provider.host());
            assert!(is_translate_surface(&url), "{} host not recognized", provider);
        }
    }

    // ==================== Google Tests ====================

    #[test]
    fn test_google_result_page_is_surface() {
        assert!(is_translate_surface(
            "https://translate.google.com/translate?sl=auto&tl=fr&u=https://x.com"
        ));
    }

    #[test]
    fn test_google_landing_page_is_not_surface() {
        assert!(!is_translate_surface("https://translate.google.com/"));
    }

    #[test]
    fn test_google_needs_both_params() {
        assert!(!is_translate_surface(
            "https://translate.google.com/?sl=auto&tl=fr"
        ));
        assert!(!is_translate_surface(
            "https://translate.google.com/translate?u=https://x.com"
        ));
    }

    #[test]
    fn test_google_proxy_domain() {
        assert!(is_translate_surface("https://foo.translate.goog/"));
        assert!(is_translate_surface(
            "https://www-example-com.translate.goog/page?_x_tr_sl=auto"
        ));
    }

    #[test]
    fn test_bare_proxy_suffix_without_subdomain() {
        assert!(!is_translate_surface("https://translate.goog/"));
    }

    #[test]
    fn test_google_widget_and_api_hosts() {
        assert!(is_translate_surface(
            "https://translate.googleusercontent.com/translate_c?depth=1"
        ));
        assert!(is_translate_surface(
            "https://translate-pa.googleapis.com/v1/translateHtml"
        ));
    }

    // ==================== Normal Page Tests ====================

    #[test]
    fn test_regular_pages_are_not_surfaces() {
        assert!(!is_translate_surface("https://example.com"));
        assert!(!is_translate_surface("https://google.com/search?q=tl&u=1"));
        assert!(!is_translate_surface("about:blank"));
    }

    #[test]
    fn test_unparseable_url_is_not_surface() {
        assert!(!is_translate_surface("not a url"));
        assert!(!is_translate_surface(""));
        assert!(!is_translate_surface("translate.kagi.com/no-scheme"));
    }
}
