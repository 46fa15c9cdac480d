//! Block tree rendering.
//!
//! [`Renderer`] walks a parsed block tree depth first. For each block it
//! stitches the rendered inner blocks into the block's `innerContent`, hands
//! the result to the block type's render callback, and finally applies the
//! enhanced-pagination verdict for query blocks.

use super::block::ParsedBlock;
use super::pagination::PaginationState;
use super::query::disable_navigation;
use super::registry::BlockTypeRegistry;
use crate::config::SiteConfig;

/// Renders block documents against a registry and site settings.
///
/// # Example
///
/// ```rust
/// use pressmark::blocks::{ParsedBlock, Renderer};
/// use pressmark::config::SiteConfig;
///
/// let mut renderer = Renderer::new(SiteConfig::default());
/// let doc = vec![ParsedBlock::new("core/query")
///     .attr("queryId", 0)
///     .attr("enhancedPagination", true)
///     .wrap(
///         "<div class=\"wp-block-query\">",
///         vec![ParsedBlock::new("acme/widget").html("<p>w</p>")],
///         "</div>",
///     )];
///
/// let html = renderer.render(&doc);
/// assert!(html.contains("data-wp-router-region=\"query-0\""));
/// assert!(html.contains("data-wp-navigation-disabled=\"true\""));
/// ```
#[derive(Debug)]
pub struct Renderer {
    registry: BlockTypeRegistry,
    site: SiteConfig,
}

impl Renderer {
    /// Creates a renderer with the core dynamic blocks registered.
    pub fn new(site: SiteConfig) -> Self {
        let registry = BlockTypeRegistry::with_core_blocks(&site.blocks);
        Self { registry, site }
    }

    /// Creates a renderer with a caller-built registry.
    pub fn with_registry(registry: BlockTypeRegistry, site: SiteConfig) -> Self {
        Self { registry, site }
    }

    pub fn registry(&self) -> &BlockTypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BlockTypeRegistry {
        &mut self.registry
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Renders a block document.
    ///
    /// Every call starts with empty pagination state, so one document never
    /// influences the next.
    pub fn render(&mut self, blocks: &[ParsedBlock]) -> String {
        let mut state = PaginationState::new();
        let mut out = String::new();
        for block in blocks {
            out.push_str(&self.render_block(block, &mut state));
        }
        if !state.is_idle() {
            log::warn!(
                "render finished with open queries {:?}",
                state.open_queries()
            );
        }
        out
    }

    fn render_block(&mut self, block: &ParsedBlock, state: &mut PaginationState) -> String {
        state.enter(block, &self.site.blocks);

        let content = self.stitch(block, state);
        let mut html = self
            .registry
            .render_block(block, content, &self.site);

        if state.finish(block, &self.site.blocks) {
            log::debug!(
                "disabling enhanced pagination for query {:?}",
                block.query_id()
            );
            html = disable_navigation(&html);
        }
        html
    }

    /// Joins the block's markup chunks with its rendered inner blocks.
    fn stitch(&mut self, block: &ParsedBlock, state: &mut PaginationState) -> String {
        let mut content = String::with_capacity(block.inner_html.len());
        let mut children = block.inner_blocks.iter();

        if block.inner_content.is_empty() {
            content.push_str(&block.inner_html);
            for child in children {
                content.push_str(&self.render_block(child, state));
            }
            return content;
        }

        for chunk in &block.inner_content {
            match chunk {
                Some(text) => content.push_str(text),
                None => match children.next() {
                    Some(child) => content.push_str(&self.render_block(child, state)),
                    None => log::debug!(
                        "block {:?} has more placeholders than inner blocks",
                        block.name()
                    ),
                },
            }
        }
        content
    }
}
