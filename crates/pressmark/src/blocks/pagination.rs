//! Enhanced-pagination compatibility tracking.
//!
//! Client-side pagination swaps a query listing's markup in place, which only
//! works when everything inside the listing comes from first-party blocks. A
//! render pass therefore tracks which enhanced query blocks are currently
//! open and flags them as soon as an incompatible descendant renders:
//!
//! - a block whose name lacks the first-party prefix, or
//! - the post-content block, which can inject arbitrary markup.
//!
//! One incompatible descendant flags every open query at once, not just its
//! nearest ancestor. A flagged query gets the navigation-disabled marker on
//! its root element once it finishes rendering.
//!
//! [`PaginationState`] holds that bookkeeping for exactly one render pass. The
//! render driver creates a fresh value per pass and threads it through the
//! traversal: [`PaginationState::enter`] runs before a block's children render,
//! [`PaginationState::finish`] after the block itself has rendered.

use std::collections::HashSet;

use super::block::{ParsedBlock, QueryId};
use crate::config::BlockNaming;

/// Per-render bookkeeping of open and flagged enhanced query blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    open: Vec<QueryId>,
    dirty: HashSet<QueryId>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the query id if `block` is an enhanced query block.
    fn enhanced_query(block: &ParsedBlock, naming: &BlockNaming) -> Option<QueryId> {
        match block.name() {
            Some(name) if name == naming.query_block => block.interactive_query_id(),
            _ => None,
        }
    }

    /// Pre-order step, run before the block's inner blocks render.
    pub fn enter(&mut self, block: &ParsedBlock, naming: &BlockNaming) {
        if let Some(id) = Self::enhanced_query(block, naming) {
            self.open.push(id);
            return;
        }

        let Some(name) = block.name() else {
            return;
        };
        if !self.open.is_empty() && !naming.is_compatible(name) {
            log::debug!(
                "block '{}' disables enhanced pagination for queries {:?}",
                name,
                self.open
            );
            self.dirty.extend(self.open.iter().cloned());
        }
    }

    /// Post-render step. Closes an enhanced query block and returns true if
    /// its navigation must be disabled.
    ///
    /// Blocks other than enhanced query blocks are ignored. Closing with no
    /// open query is a no-op.
    pub fn finish(&mut self, block: &ParsedBlock, naming: &BlockNaming) -> bool {
        let Some(id) = Self::enhanced_query(block, naming) else {
            return false;
        };
        let disabled = self.dirty.remove(&id);
        self.open.pop();
        disabled
    }

    /// Query ids currently open, outermost first.
    pub fn open_queries(&self) -> &[QueryId] {
        &self.open
    }

    pub fn is_dirty(&self, id: &QueryId) -> bool {
        self.dirty.contains(id)
    }

    /// Returns true when no enhanced query is open.
    pub fn is_idle(&self) -> bool {
        self.open.is_empty()
    }
}

/// Returns the ids of enhanced query blocks whose navigation would be
/// disabled, in the order they finish rendering.
///
/// Runs the same enter/finish steps as a render pass without producing
/// markup, with fresh state on every call.
///
/// ```rust
/// use pressmark::blocks::{disabled_queries, ParsedBlock, QueryId};
/// use pressmark::config::BlockNaming;
///
/// let tree = vec![ParsedBlock::new("core/query")
///     .attr("queryId", 0)
///     .attr("enhancedPagination", true)
///     .wrap("<div>", vec![ParsedBlock::new("acme/widget")], "</div>")];
///
/// assert_eq!(disabled_queries(&tree, &BlockNaming::default()), vec![QueryId::from(0)]);
/// ```
pub fn disabled_queries(blocks: &[ParsedBlock], naming: &BlockNaming) -> Vec<QueryId> {
    fn walk(
        block: &ParsedBlock,
        naming: &BlockNaming,
        state: &mut PaginationState,
        out: &mut Vec<QueryId>,
    ) {
        state.enter(block, naming);
        for child in &block.inner_blocks {
            walk(child, naming, state, out);
        }
        let id = block.query_id();
        if state.finish(block, naming) {
            out.extend(id);
        }
    }

    let mut state = PaginationState::new();
    let mut out = Vec::new();
    for block in blocks {
        walk(block, naming, &mut state, &mut out);
    }
    out
}
