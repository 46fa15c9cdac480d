//! Registry of webfonts and their providers.
//!
//! [`WebfontRegistry`] collects webfont descriptors under unique keys and
//! generates the page's font stylesheet by handing each provider the
//! webfonts that name it.
//!
//! # Resolution
//!
//! 1. Webfonts keep registration order; re-registering a key replaces the
//!    descriptor in place.
//! 2. Providers are asked for CSS in provider registration order.
//! 3. Webfonts naming an unregistered provider are skipped.
//!
//! # Example
//!
//! ```rust
//! use pressmark::config::SiteConfig;
//! use pressmark::fonts::{Webfont, WebfontRegistry};
//!
//! let mut registry = WebfontRegistry::new();
//! registry.register(
//!     "inter.normal.400",
//!     Webfont::new().with("font-family", "Inter").with("src", "inter.woff2"),
//! );
//!
//! let css = registry.generate_styles(&SiteConfig::default());
//! assert!(css.starts_with("@font-face{font-family:Inter;"));
//! ```

use std::collections::HashSet;

use super::descriptor::Webfont;
use super::provider::{LocalProvider, WebfontsProvider};
use crate::config::SiteConfig;

/// Webfonts keyed by a unique name, plus the providers that render them.
pub struct WebfontRegistry {
    webfonts: Vec<(String, Webfont)>,
    providers: Vec<Box<dyn WebfontsProvider>>,
}

impl WebfontRegistry {
    /// Creates a registry with the bundled [`LocalProvider`].
    pub fn new() -> Self {
        Self {
            webfonts: Vec::new(),
            providers: vec![Box::new(LocalProvider)],
        }
    }

    /// Creates a registry without any provider.
    pub fn empty() -> Self {
        Self {
            webfonts: Vec::new(),
            providers: Vec::new(),
        }
    }

    /// Registers a provider, replacing any provider with the same id.
    pub fn register_provider<P: WebfontsProvider + 'static>(&mut self, provider: P) {
        self.providers.retain(|p| p.id() != provider.id());
        self.providers.push(Box::new(provider));
    }

    /// Registers a webfont under `key`. An existing key keeps its position.
    pub fn register(&mut self, key: impl Into<String>, webfont: Webfont) {
        let key = key.into();
        match self.webfonts.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = webfont,
            None => self.webfonts.push((key, webfont)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Webfont> {
        self.webfonts
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, w)| w)
    }

    /// Returns the webfonts tagged with the given provider, in registration order.
    pub fn for_provider(&self, provider_id: &str) -> Vec<&Webfont> {
        self.webfonts
            .iter()
            .map(|(_, w)| w)
            .filter(|w| w.provider() == provider_id)
            .collect()
    }

    /// Returns the ids of the registered providers.
    pub fn provider_ids(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.id())
    }

    /// Generates the combined `@font-face` stylesheet.
    pub fn generate_styles(&self, site: &SiteConfig) -> String {
        let known: HashSet<&str> = self.provider_ids().collect();
        for (key, webfont) in &self.webfonts {
            if !known.contains(webfont.provider()) {
                log::warn!(
                    "webfont '{}' uses unregistered provider '{}'; skipping",
                    key,
                    webfont.provider()
                );
            }
        }

        let mut css = String::new();
        for provider in &self.providers {
            let webfonts = self.for_provider(provider.id());
            if !webfonts.is_empty() {
                css.push_str(&provider.css(&webfonts, site));
            }
        }
        css
    }

    pub fn len(&self) -> usize {
        self.webfonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.webfonts.is_empty()
    }

    /// Returns an iterator over all registered keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.webfonts.iter().map(|(k, _)| k.as_str())
    }
}

impl Default for WebfontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WebfontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebfontRegistry")
            .field("webfonts", &self.webfonts)
            .field("providers", &self.provider_ids().collect::<Vec<_>>())
            .finish()
    }
}

impl FromIterator<(String, Webfont)> for WebfontRegistry {
    fn from_iter<T: IntoIterator<Item = (String, Webfont)>>(iter: T) -> Self {
        let mut registry = WebfontRegistry::new();
        for (key, webfont) in iter {
            registry.register(key, webfont);
        }
        registry
    }
}
