//! Post URL parsing.

use lazy_regex::regex_captures;

/// Extract the shortcode from an instagram.com post or reel URL.
pub fn extract_shortcode(url: &str) -> Option<&str> {
    regex_captures!(r"instagram\.com/(?:reel|p)/([^/?]+)", url).map(|(_, code)| code)
}
