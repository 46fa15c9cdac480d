//! Self-hosted webfont stylesheets.
//!
//! This module turns webfont descriptors into `@font-face` CSS:
//!
//! - [`Webfont`]: an ordered set of descriptor properties
//! - [`order_sources`]: sorts a font's `src` list by format preference
//! - [`build_css`]: serializes webfonts as concatenated `@font-face` rules
//! - [`WebfontRegistry`]: groups webfonts by provider and builds the page stylesheet
//!
//! Generation never fails. Empty properties and sources in unknown formats
//! are left out of the output.

mod css;
mod descriptor;
mod format;
mod provider;
mod registry;

pub use css::{build_css, compile_src, compile_variations, font_face_declarations, quote_family};
pub use descriptor::{normalize_key, DescriptorValue, Webfont, DEFAULT_PROVIDER};
pub use format::{
    extension_of, is_data_uri, order_sources, FontFormat, FontSource, DATA_FORMAT, FONT_FORMATS,
};
pub use provider::{LocalProvider, WebfontsProvider};
pub use registry::WebfontRegistry;
