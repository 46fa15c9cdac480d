//! Font file formats and source ordering.
//!
//! Browsers pick the first `src` entry they can load, so sources are emitted
//! best-compression first:
//!
//! | Rank | Extension | CSS format |
//! |------|-----------|------------|
//! | 0 | `.woff2` | `woff2` |
//! | 1 | `.woff` | `woff` |
//! | 2 | `.ttf` | `truetype` |
//! | 3 | `.eot` | `embedded-opentype` |
//! | 4 | `.otf` | `opentype` |
//!
//! Inline `data:` URIs go before all of them, in their original order.

/// Format tag for inline `data:` URIs.
pub const DATA_FORMAT: &str = "data";

/// A recognized font file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFormat {
    /// Lowercase file extension, without the dot.
    pub extension: &'static str,
    /// Name used in the CSS `format()` hint.
    pub css_name: &'static str,
    /// Position in the emitted `src` list (lower comes first).
    pub rank: usize,
}

/// Recognized formats in priority order.
pub const FONT_FORMATS: &[FontFormat] = &[
    FontFormat {
        extension: "woff2",
        css_name: "woff2",
        rank: 0,
    },
    FontFormat {
        extension: "woff",
        css_name: "woff",
        rank: 1,
    },
    FontFormat {
        extension: "ttf",
        css_name: "truetype",
        rank: 2,
    },
    FontFormat {
        extension: "eot",
        css_name: "embedded-opentype",
        rank: 3,
    },
    FontFormat {
        extension: "otf",
        css_name: "opentype",
        rank: 4,
    },
];

impl FontFormat {
    /// Looks up a format by lowercase extension.
    pub fn for_extension(extension: &str) -> Option<&'static FontFormat> {
        FONT_FORMATS.iter().find(|f| f.extension == extension)
    }
}

/// A source URL paired with its format tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub url: String,
    /// A [`FontFormat::css_name`] or [`DATA_FORMAT`].
    pub format: &'static str,
}

impl FontSource {
    pub fn is_data(&self) -> bool {
        self.format == DATA_FORMAT
    }
}

/// Returns true if the source is an inline `data:` URI.
pub fn is_data_uri(url: &str) -> bool {
    url.trim().starts_with("data:")
}

/// Returns the lowercase extension of the last path segment.
///
/// ```rust
/// use pressmark::fonts::extension_of;
///
/// assert_eq!(extension_of("https://x.test/fonts/A.WOFF2"), Some("woff2".to_string()));
/// assert_eq!(extension_of("fonts/a.ttf.woff2"), Some("woff2".to_string()));
/// assert_eq!(extension_of("fonts/readme"), None);
/// ```
pub fn extension_of(url: &str) -> Option<String> {
    let basename = url.rsplit('/').next().unwrap_or(url);
    basename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Orders sources for browser support.
///
/// Data URIs come first, then one entry per recognized format in rank order.
/// When several URLs share an extension the last one wins. URLs with an
/// unrecognized extension are dropped.
pub fn order_sources<I, S>(urls: I) -> Vec<FontSource>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ordered = Vec::new();
    let mut by_rank: Vec<Option<String>> = vec![None; FONT_FORMATS.len()];

    for url in urls {
        let url = url.as_ref();
        if is_data_uri(url) {
            ordered.push(FontSource {
                url: url.to_string(),
                format: DATA_FORMAT,
            });
            continue;
        }

        match extension_of(url)
            .as_deref()
            .and_then(FontFormat::for_extension)
        {
            Some(format) => by_rank[format.rank] = Some(url.to_string()),
            None => log::debug!("dropping font source with unsupported format: {}", url),
        }
    }

    for (format, url) in FONT_FORMATS.iter().zip(by_rank) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            ordered.push(FontSource {
                url,
                format: format.css_name,
            });
        }
    }

    ordered
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn source_url() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z]{1,6}\\.(woff2|woff|ttf|eot|otf|svg)",
            "data:font/[a-z]{3,5};base64,[A-Za-z0-9]{1,8}",
        ]
    }

    proptest! {
        #[test]
        fn data_uris_precede_files_and_ranks_ascend(
            urls in prop::collection::vec(source_url(), 0..12)
        ) {
            let sources = order_sources(&urls);

            let first_file = sources.iter().position(|s| !s.is_data()).unwrap_or(sources.len());
            prop_assert!(sources[first_file..].iter().all(|s| !s.is_data()));

            let ranks: Vec<usize> = sources[first_file..]
                .iter()
                .map(|s| FONT_FORMATS.iter().position(|f| f.css_name == s.format).unwrap())
                .collect();
            prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));

            let data_in: Vec<&String> = urls.iter().filter(|u| is_data_uri(u)).collect();
            let data_out: Vec<&String> = sources[..first_file].iter().map(|s| &s.url).collect();
            prop_assert_eq!(data_in, data_out);
        }
    }
}
