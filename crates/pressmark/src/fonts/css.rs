//! `@font-face` serialization.

use std::borrow::Cow;

use super::descriptor::{
    DescriptorValue, Webfont, FONT_FAMILY, FONT_VARIATION_SETTINGS, PROVIDER, SRC,
};
use super::format::{order_sources, FontSource};
use crate::config::SiteConfig;
use crate::url::resolve_theme_file;

/// Builds the `@font-face` rules for a sequence of webfonts.
///
/// Each webfont becomes one `@font-face{...}` rule; rules are concatenated
/// without separators, in iteration order. The builder never fails: empty
/// properties and unusable sources are left out.
///
/// # Example
///
/// ```rust
/// use pressmark::config::SiteConfig;
/// use pressmark::fonts::{build_css, Webfont};
///
/// let font = Webfont::new()
///     .with("provider", "local")
///     .with("font-family", "Source Serif Pro")
///     .with("font-style", "normal")
///     .with("src", "https://example.com/fonts/SourceSerif4.woff2");
///
/// let css = build_css([&font], &SiteConfig::default());
/// assert_eq!(
///     css,
///     "@font-face{font-family:\"Source Serif Pro\";font-style:normal;\
///      src:local(\"Source Serif Pro\"), \
///      url('https://example.com/fonts/SourceSerif4.woff2') format('woff2');}"
/// );
/// ```
pub fn build_css<'a, I>(webfonts: I, site: &SiteConfig) -> String
where
    I: IntoIterator<Item = &'a Webfont>,
{
    let mut css = String::new();
    for webfont in webfonts {
        css.push_str("@font-face{");
        css.push_str(&font_face_declarations(webfont, site));
        css.push('}');
    }
    css
}

/// Serializes one webfont's properties as `key:value;` declarations.
pub fn font_face_declarations(webfont: &Webfont, site: &SiteConfig) -> String {
    let family = webfont.font_family().map(quote_family).unwrap_or_default();
    let mut css = String::new();

    for (key, value) in webfont.properties() {
        let value: Cow<'_, str> = match (key, value) {
            (PROVIDER, _) => continue,
            (FONT_FAMILY, DescriptorValue::Text(_)) => Cow::Borrowed(family.as_ref()),
            (SRC, value) => {
                let sources = order_sources(value.to_list());
                Cow::Owned(compile_src(&family, &sources, site))
            }
            (FONT_VARIATION_SETTINGS, DescriptorValue::Map(pairs)) => {
                Cow::Owned(compile_variations(pairs))
            }
            (_, DescriptorValue::Text(text)) => Cow::Borrowed(text.as_str()),
            (_, DescriptorValue::List(items)) => Cow::Owned(items.join(", ")),
            (_, DescriptorValue::Map(_)) => {
                log::debug!("skipping mapping value for font descriptor '{}'", key);
                continue;
            }
        };

        if !value.is_empty() {
            css.push_str(key);
            css.push(':');
            css.push_str(&value);
            css.push(';');
        }
    }

    css
}

/// Wraps a family name in double quotes when it contains a space and is not
/// quoted already.
///
/// ```rust
/// use pressmark::fonts::quote_family;
///
/// assert_eq!(quote_family("Open Sans"), "\"Open Sans\"");
/// assert_eq!(quote_family("'Open Sans'"), "'Open Sans'");
/// assert_eq!(quote_family("Inter"), "Inter");
/// ```
pub fn quote_family(family: &str) -> Cow<'_, str> {
    if family.contains(' ') && !family.contains('"') && !family.contains('\'') {
        Cow::Owned(format!("\"{}\"", family))
    } else {
        Cow::Borrowed(family)
    }
}

/// Compiles ordered sources into the `src` value, starting with `local()`.
pub fn compile_src(family: &str, sources: &[FontSource], site: &SiteConfig) -> String {
    let mut src = format!("local({})", family);

    for source in sources {
        let url = resolve_theme_file(
            &source.url,
            &site.stylesheet_directory_uri,
            &site.site_url,
        );
        if source.is_data() {
            src.push_str(&format!(", url({})", url));
        } else {
            src.push_str(&format!(", url('{}') format('{}')", url, source.format));
        }
    }

    src
}

/// Compiles variation axis pairs as `key value`, concatenated as-is.
pub fn compile_variations(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(axis, value)| format!("{} {}", axis, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::new(
            "https://example.com",
            "https://example.com/wp-content/themes/twentytwentytwo",
        )
    }

    #[test]
    fn test_quote_family_with_space() {
        assert_eq!(quote_family("Open Sans"), "\"Open Sans\"");
    }

    #[test]
    fn test_quote_family_already_quoted() {
        assert_eq!(quote_family("\"Open Sans\""), "\"Open Sans\"");
        assert_eq!(quote_family("'Open Sans'"), "'Open Sans'");
    }

    #[test]
    fn test_quote_family_single_word() {
        assert_eq!(quote_family("Inter"), "Inter");
    }

    #[test]
    fn test_single_woff2_source() {
        let font = Webfont::new().with("font-family", "X").with("src", "u.woff2");
        assert_eq!(
            build_css([&font], &site()),
            "@font-face{font-family:X;src:local(X), url('u.woff2') format('woff2');}"
        );
    }

    #[test]
    fn test_data_uri_has_no_format_or_quotes() {
        let font = Webfont::new()
            .with("font-family", "X")
            .with("src", ["a.woff", "data:font/woff2;base64,AAAA"]);
        assert_eq!(
            font_face_declarations(&font, &site()),
            "font-family:X;src:local(X), url(data:font/woff2;base64,AAAA), url('a.woff') format('woff');"
        );
    }

    #[test]
    fn test_provider_is_skipped() {
        let font = Webfont::new()
            .with("provider", "local")
            .with("font-family", "X");
        assert_eq!(font_face_declarations(&font, &site()), "font-family:X;");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let font = Webfont::new()
            .with("font-family", "X")
            .with("font-weight", "")
            .with("font-stretch", "normal");
        assert_eq!(
            font_face_declarations(&font, &site()),
            "font-family:X;font-stretch:normal;"
        );
    }

    #[test]
    fn test_quoted_family_reused_in_local() {
        let font = Webfont::new()
            .with("font-family", "Source Serif Pro")
            .with("src", "a.ttf");
        assert_eq!(
            font_face_declarations(&font, &site()),
            "font-family:\"Source Serif Pro\";src:local(\"Source Serif Pro\"), url('a.ttf') format('truetype');"
        );
    }

    #[test]
    fn test_theme_file_sources_become_relative() {
        let font = Webfont::new()
            .with("font-family", "X")
            .with("src", "file:./assets/fonts/x.woff2");
        assert_eq!(
            font_face_declarations(&font, &site()),
            "font-family:X;src:local(X), url('/wp-content/themes/twentytwentytwo/assets/fonts/x.woff2') format('woff2');"
        );
    }

    #[test]
    fn test_variation_settings_map_concatenated() {
        let font = Webfont::new().with(
            "font-variation-settings",
            DescriptorValue::map([("wght", "400"), ("wdth", "100")]),
        );
        assert_eq!(
            font_face_declarations(&font, &site()),
            "font-variation-settings:wght 400wdth 100;"
        );
    }

    #[test]
    fn test_variation_settings_string_kept() {
        let font = Webfont::new().with("font-variation-settings", "\"wght\" 400");
        assert_eq!(
            font_face_declarations(&font, &site()),
            "font-variation-settings:\"wght\" 400;"
        );
    }

    #[test]
    fn test_src_without_usable_sources_keeps_local() {
        let font = Webfont::new()
            .with("font-family", "X")
            .with("src", ["a.svg"]);
        assert_eq!(font_face_declarations(&font, &site()), "font-family:X;src:local(X);");
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let font = Webfont::new()
            .with("font-weight", "400")
            .with("font-family", "X")
            .with("font-display", "swap");
        assert_eq!(
            font_face_declarations(&font, &site()),
            "font-weight:400;font-family:X;font-display:swap;"
        );
    }

    #[test]
    fn test_multiple_rules_concatenated() {
        let a = Webfont::new().with("font-family", "A");
        let b = Webfont::new().with("font-family", "B");
        assert_eq!(
            build_css([&a, &b], &site()),
            "@font-face{font-family:A;}@font-face{font-family:B;}"
        );
    }

    #[test]
    fn test_no_webfonts() {
        let none: [&Webfont; 0] = [];
        assert_eq!(build_css(none, &site()), "");
    }

    #[test]
    fn test_compile_variations_empty() {
        assert_eq!(compile_variations(&[]), "");
    }
}
