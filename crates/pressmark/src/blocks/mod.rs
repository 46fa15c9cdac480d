//! Block rendering with enhanced-pagination annotation.
//!
//! This module renders parsed block documents:
//!
//! - [`ParsedBlock`]: one node of a parsed block document
//! - [`BlockTypeRegistry`]: block types, their styles and render callbacks
//! - [`Renderer`]: walks a document and produces its markup
//! - [`PaginationState`]: per-render tracking of enhanced query blocks
//! - [`TagProcessor`]: attribute edits on a fragment's root element
//!
//! Query blocks with `enhancedPagination` get interactivity directives on
//! their root element. If any non-first-party block renders inside one, the
//! query is also marked `data-wp-navigation-disabled="true"` so the client
//! falls back to full page loads.

mod block;
mod markup;
mod pagination;
mod query;
mod registry;
mod render;

pub use block::{Attributes, ParsedBlock, QueryId, ENHANCED_PAGINATION_ATTR, QUERY_ID_ATTR};
pub use markup::{set_root_attributes, MarkupError, TagProcessor};
pub use pagination::{disabled_queries, PaginationState};
pub use query::{
    add_directives, disable_navigation, render_query_block, router_region, sync_style_handles,
    CONTEXT_ATTR, EMPTY_CONTEXT, INIT_ATTR, INIT_CALLBACK, INTERACTIVE_ATTR,
    INTERACTIVE_NAMESPACE, NAVIGATION_DISABLED_ATTR, ROUTER_REGION_ATTR,
};
pub use registry::{
    BlockScope, BlockType, BlockTypeRegistry, NativeCallback, RegistryError, RenderCallback,
};
pub use render::Renderer;
