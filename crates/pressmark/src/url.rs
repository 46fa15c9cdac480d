//! URL helpers for theme-relative font sources.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix marking a source path relative to the active theme's directory.
pub const THEME_FILE_PREFIX: &str = "file:./";

/// `scheme://host/path` or protocol-relative `//host/path`.
static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?:)?//([^/]+)(/?.*)$").expect("absolute url pattern is valid")
});

/// Returns the host (with port, if any) of an absolute or protocol-relative URL.
pub fn host_of(url: &str) -> Option<&str> {
    ABSOLUTE_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Reduces an absolute URL to a site-relative one.
///
/// The scheme and host are stripped when the URL lives on `site_url`'s host
/// (compared case-insensitively). URLs on other hosts are returned unchanged.
/// When `site_url` carries no host, any absolute URL is reduced.
///
/// ```rust
/// use pressmark::url::make_link_relative;
///
/// assert_eq!(
///     make_link_relative("https://example.com/fonts/a.woff2", "https://example.com"),
///     "/fonts/a.woff2"
/// );
/// assert_eq!(
///     make_link_relative("https://cdn.test/a.woff2", "https://example.com"),
///     "https://cdn.test/a.woff2"
/// );
/// ```
pub fn make_link_relative(link: &str, site_url: &str) -> String {
    let Some(caps) = ABSOLUTE_URL.captures(link) else {
        return link.to_string();
    };
    let host = caps.get(1).map_or("", |m| m.as_str());
    let path = caps.get(2).map_or("", |m| m.as_str());

    match host_of(site_url) {
        Some(site_host) if !site_host.eq_ignore_ascii_case(host) => link.to_string(),
        _ => path.to_string(),
    }
}

/// Rewrites a `file:./` source into a site-relative URL under the theme
/// directory. Any other URL is returned unchanged.
pub fn resolve_theme_file(url: &str, stylesheet_directory_uri: &str, site_url: &str) -> String {
    match url.strip_prefix(THEME_FILE_PREFIX) {
        Some(relative) => {
            let absolute = format!("{}/{}", stylesheet_directory_uri, relative);
            make_link_relative(&absolute, site_url)
        }
        None => url.to_string(),
    }
}
