//! Webfont providers.

use super::css::build_css;
use super::descriptor::{Webfont, DEFAULT_PROVIDER};
use crate::config::SiteConfig;

/// Generates the stylesheet for the webfonts that name it as their provider.
pub trait WebfontsProvider: Send + Sync {
    /// Unique provider id, matched against each webfont's `provider` tag.
    fn id(&self) -> &str;

    /// Returns the CSS for the given webfonts.
    fn css(&self, webfonts: &[&Webfont], site: &SiteConfig) -> String;
}

/// Provider for font files hosted by the site or the active theme.
///
/// Orders each font's sources for browser support and emits one
/// `@font-face` rule per webfont. See [`build_css`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

impl WebfontsProvider for LocalProvider {
    fn id(&self) -> &str {
        DEFAULT_PROVIDER
    }

    fn css(&self, webfonts: &[&Webfont], site: &SiteConfig) -> String {
        build_css(webfonts.iter().copied(), site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_provider_id() {
        assert_eq!(LocalProvider.id(), "local");
    }

    #[test]
    fn test_local_provider_css() {
        let font = Webfont::new()
            .with("provider", "local")
            .with("font-family", "Inter")
            .with("src", ["inter.ttf", "inter.woff2"]);

        let css = LocalProvider.css(&[&font], &SiteConfig::default());
        assert_eq!(
            css,
            "@font-face{font-family:Inter;src:local(Inter), url('inter.woff2') format('woff2'), url('inter.ttf') format('truetype');}"
        );
    }
}
