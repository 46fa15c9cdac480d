//! Server-side rendering of the query listing block.

use super::block::QueryId;
use super::markup::set_root_attributes;
use super::registry::BlockScope;
use crate::config::SiteConfig;

/// Interactivity namespace of the query block.
pub const INTERACTIVE_ATTR: &str = "data-wp-interactive";
pub const INTERACTIVE_NAMESPACE: &str = r#"{"namespace":"core/query"}"#;
/// Marks the element the client router swaps on navigation.
pub const ROUTER_REGION_ATTR: &str = "data-wp-router-region";
pub const INIT_ATTR: &str = "data-wp-init";
pub const INIT_CALLBACK: &str = "callbacks.setQueryRef";
pub const CONTEXT_ATTR: &str = "data-wp-context";
pub const EMPTY_CONTEXT: &str = "{}";
/// Tells the client runtime to fall back to full page loads.
pub const NAVIGATION_DISABLED_ATTR: &str = "data-wp-navigation-disabled";

/// Router region name for a query listing, e.g. `query-0`.
pub fn router_region(id: &QueryId) -> String {
    format!("query-{}", id)
}

/// Adds the interactivity directives to the root element of a query block.
pub fn add_directives(content: &str, id: &QueryId) -> String {
    let region = router_region(id);
    set_root_attributes(
        content,
        &[
            (INTERACTIVE_ATTR, INTERACTIVE_NAMESPACE),
            (ROUTER_REGION_ATTR, region.as_str()),
            (INIT_ATTR, INIT_CALLBACK),
            (CONTEXT_ATTR, EMPTY_CONTEXT),
        ],
    )
}

/// Marks a rendered query block so the client skips enhanced navigation.
pub fn disable_navigation(content: &str) -> String {
    set_root_attributes(content, &[(NAVIGATION_DISABLED_ATTR, "true")])
}

/// Keeps the query style asset in the block type's style handles only while
/// the block is interactive.
///
/// Nothing changes when the asset was already printed on the page. Adding and
/// removing are idempotent.
pub fn sync_style_handles(
    style_handles: &mut Vec<String>,
    interactive: bool,
    asset: &str,
    site: &SiteConfig,
) {
    if site.is_style_emitted(asset) {
        return;
    }
    let present = style_handles.iter().any(|h| h == asset);
    if interactive && !present {
        style_handles.push(asset.to_string());
    } else if !interactive && present {
        style_handles.retain(|h| h != asset);
    }
}

/// Render callback of the query block.
///
/// An interactive block (`enhancedPagination: true` with a `queryId`) gets the
/// interactivity directives on its root element. The block type's style
/// handles are synced either way.
pub fn render_query_block(content: &str, scope: &mut BlockScope<'_>) -> String {
    let id = scope.block.interactive_query_id();
    let rendered = match &id {
        Some(id) => add_directives(content, id),
        None => content.to_string(),
    };

    let site = scope.site;
    sync_style_handles(
        scope.style_handles,
        id.is_some(),
        &site.blocks.query_style_asset,
        site,
    );
    rendered
}
