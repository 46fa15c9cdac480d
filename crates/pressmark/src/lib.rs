//! Server-side rendering helpers for a block-based publishing site.
//!
//! Two independent pieces live here:
//!
//! - [`fonts`]: builds `@font-face` stylesheets from webfont descriptors, with
//!   sources ordered by format and theme-relative URLs resolved.
//! - [`blocks`]: renders parsed block documents and annotates query listings
//!   that cannot use client-side pagination.
//!
//! Both read site-wide settings from [`SiteConfig`].
//!
//! # Example
//!
//! ```rust
//! use pressmark::{build_css, SiteConfig, Webfont};
//!
//! let font = Webfont::new()
//!     .with("font-family", "Inter")
//!     .with("font-weight", "400")
//!     .with("src", vec!["https://cdn.example.com/inter.woff2"]);
//!
//! let css = build_css([&font], &SiteConfig::default());
//! assert!(css.starts_with("@font-face{"));
//! assert!(css.contains("font-family:Inter;"));
//! ```

pub mod blocks;
pub mod config;
pub mod fonts;
pub mod url;

pub use blocks::{BlockTypeRegistry, ParsedBlock, QueryId, Renderer};
pub use config::{BlockNaming, ConfigError, SiteConfig};
pub use fonts::{build_css, order_sources, Webfont, WebfontRegistry};
