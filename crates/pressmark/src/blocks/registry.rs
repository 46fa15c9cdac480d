//! Block type registry.
//!
//! [`BlockTypeRegistry`] maps block names to [`BlockType`]s. A block type owns
//! the style handles the page must print for it and, for dynamic blocks, a
//! render callback that rewrites the block's stitched markup.
//!
//! # Render callbacks
//!
//! | Kind | Registered with | Receives |
//! |------|-----------------|----------|
//! | Native | [`BlockTypeRegistry::register_native`] | content and a [`BlockScope`] |
//! | Template | [`BlockTypeRegistry::register_template`] | `attributes` and `content` |
//!
//! Template callbacks are MiniJinja templates compiled at registration, so
//! syntax errors surface before anything renders.
//!
//! # Example
//!
//! ```rust
//! use pressmark::blocks::BlockTypeRegistry;
//!
//! let mut registry = BlockTypeRegistry::new();
//! registry
//!     .register_template(
//!         "acme/notice",
//!         r#"<div class="notice notice-{{ attributes.level }}">{{ content }}</div>"#,
//!     )
//!     .unwrap();
//!
//! assert!(registry.is_registered("acme/notice"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use minijinja::{context, Environment};

use super::block::{Attributes, ParsedBlock};
use super::query::render_query_block;
use crate::config::{BlockNaming, SiteConfig};

/// What a render callback may see and touch while a block renders.
pub struct BlockScope<'a> {
    /// The block being rendered.
    pub block: &'a ParsedBlock,
    /// Style handles of the block's type.
    pub style_handles: &'a mut Vec<String>,
    pub site: &'a SiteConfig,
}

impl BlockScope<'_> {
    pub fn attributes(&self) -> &Attributes {
        &self.block.attrs
    }
}

/// Native render callback: receives the stitched content, returns new markup.
pub type NativeCallback = Arc<dyn Fn(&str, &mut BlockScope<'_>) -> String + Send + Sync>;

/// How a dynamic block produces its markup.
#[derive(Clone)]
pub enum RenderCallback {
    Native(NativeCallback),
    /// Name of a template compiled into the registry's environment.
    Template(String),
}

impl RenderCallback {
    pub fn native<F>(f: F) -> Self
    where
        F: Fn(&str, &mut BlockScope<'_>) -> String + Send + Sync + 'static,
    {
        RenderCallback::Native(Arc::new(f))
    }
}

impl std::fmt::Debug for RenderCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderCallback::Native(_) => f.write_str("Native(..)"),
            RenderCallback::Template(name) => f.debug_tuple("Template").field(name).finish(),
        }
    }
}

/// A registered block type.
#[derive(Debug, Clone)]
pub struct BlockType {
    pub name: String,
    pub style_handles: Vec<String>,
    pub render: Option<RenderCallback>,
}

impl BlockType {
    /// Creates a static block type with no styles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style_handles: Vec::new(),
            render: None,
        }
    }

    pub fn with_style(mut self, handle: impl Into<String>) -> Self {
        self.style_handles.push(handle.into());
        self
    }

    pub fn with_render(mut self, callback: RenderCallback) -> Self {
        self.render = Some(callback);
        self
    }

    /// Returns true if the block has a render callback.
    pub fn is_dynamic(&self) -> bool {
        self.render.is_some()
    }
}

/// Error type for block registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A block type with this name is already registered.
    AlreadyRegistered { name: String },
    /// A template callback failed to compile.
    Template { name: String, message: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::AlreadyRegistered { name } => {
                write!(f, "Block type \"{}\" is already registered", name)
            }
            RegistryError::Template { name, message } => {
                write!(f, "Invalid template for block type \"{}\": {}", name, message)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of block types by name.
///
/// The registry is not thread-safe. Each renderer owns its own.
pub struct BlockTypeRegistry {
    types: HashMap<String, BlockType>,
    env: Environment<'static>,
}

impl BlockTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            env: Environment::new(),
        }
    }

    /// Creates a registry with the first-party dynamic blocks: the query
    /// listing block, named per `naming`.
    pub fn with_core_blocks(naming: &BlockNaming) -> Self {
        let mut registry = Self::new();
        registry.types.insert(
            naming.query_block.clone(),
            BlockType::new(naming.query_block.clone())
                .with_style(naming.query_style_asset.clone())
                .with_render(RenderCallback::native(render_query_block)),
        );
        registry
    }

    /// Registers a block type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if the name is taken.
    pub fn register(&mut self, block_type: BlockType) -> Result<(), RegistryError> {
        if self.types.contains_key(&block_type.name) {
            return Err(RegistryError::AlreadyRegistered {
                name: block_type.name,
            });
        }
        if let Some(RenderCallback::Template(template)) = &block_type.render {
            if self.env.get_template(template).is_err() {
                return Err(RegistryError::Template {
                    name: block_type.name.clone(),
                    message: format!("template \"{}\" is not compiled", template),
                });
            }
        }
        self.types.insert(block_type.name.clone(), block_type);
        Ok(())
    }

    /// Registers a dynamic block rendered by a closure.
    pub fn register_native<F>(&mut self, name: &str, callback: F) -> Result<(), RegistryError>
    where
        F: Fn(&str, &mut BlockScope<'_>) -> String + Send + Sync + 'static,
    {
        self.register(BlockType::new(name).with_render(RenderCallback::native(callback)))
    }

    /// Registers a dynamic block rendered by a MiniJinja template.
    ///
    /// The template sees `attributes` (the block attributes) and `content`
    /// (the block's stitched inner markup).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Template`] if the template does not compile,
    /// or [`RegistryError::AlreadyRegistered`] if the name is taken.
    pub fn register_template(&mut self, name: &str, source: &str) -> Result<(), RegistryError> {
        if self.types.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        self.env
            .add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| RegistryError::Template {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        self.register(BlockType::new(name).with_render(RenderCallback::Template(name.to_string())))
    }

    /// Removes a block type, returning it.
    pub fn unregister(&mut self, name: &str) -> Option<BlockType> {
        self.types.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&BlockType> {
        self.types.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut BlockType> {
        self.types.get_mut(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Renders the block with its type's callback.
    ///
    /// Unregistered and static blocks return `content` unchanged, as does a
    /// template that fails at render time.
    pub fn render_block(&mut self, block: &ParsedBlock, content: String, site: &SiteConfig) -> String {
        let Some(name) = block.name() else {
            return content;
        };
        let Some(block_type) = self.types.get_mut(name) else {
            return content;
        };

        match block_type.render.clone() {
            None => content,
            Some(RenderCallback::Native(callback)) => {
                let mut scope = BlockScope {
                    block,
                    style_handles: &mut block_type.style_handles,
                    site,
                };
                callback(&content, &mut scope)
            }
            Some(RenderCallback::Template(template)) => {
                let rendered = self.env.get_template(&template).and_then(|tmpl| {
                    tmpl.render(context! {
                        attributes => &block.attrs,
                        content => &content,
                    })
                });
                match rendered {
                    Ok(html) => html,
                    Err(err) => {
                        log::warn!("template for block '{}' failed: {}", name, err);
                        content
                    }
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over all registered block names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|s| s.as_str())
    }
}

impl Default for BlockTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockTypeRegistry")
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_core_blocks() {
        let registry = BlockTypeRegistry::with_core_blocks(&BlockNaming::default());
        let query = registry.get("core/query").unwrap();
        assert!(query.is_dynamic());
        assert_eq!(query.style_handles, vec!["wp-block-query"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = BlockTypeRegistry::new();
        registry.register(BlockType::new("acme/a")).unwrap();
        let result = registry.register(BlockType::new("acme/a"));
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered { .. })));
    }

    #[test]
    fn test_register_template_syntax_error() {
        let mut registry = BlockTypeRegistry::new();
        let result = registry.register_template("acme/broken", "{{ content ");
        assert!(matches!(result, Err(RegistryError::Template { .. })));
        assert!(!registry.is_registered("acme/broken"));
    }

    #[test]
    fn test_register_template_requires_compiled_template() {
        let mut registry = BlockTypeRegistry::new();
        let result = registry.register(
            BlockType::new("acme/a").with_render(RenderCallback::Template("missing".into())),
        );
        assert!(matches!(result, Err(RegistryError::Template { .. })));
    }

    #[test]
    fn test_render_template_block() {
        let mut registry = BlockTypeRegistry::new();
        registry
            .register_template(
                "acme/notice",
                r#"<div class="notice-{{ attributes.level }}">{{ content }}</div>"#,
            )
            .unwrap();

        let block = ParsedBlock::new("acme/notice").attr("level", "warning");
        let html = registry.render_block(&block, "Careful".to_string(), &SiteConfig::default());
        assert_eq!(html, "<div class=\"notice-warning\">Careful</div>");
    }

    #[test]
    fn test_render_native_block_sees_scope() {
        let mut registry = BlockTypeRegistry::new();
        registry
            .register_native("acme/counter", |content, scope| {
                scope.style_handles.push("acme-counter".to_string());
                format!("<span data-n=\"{}\">{}</span>", scope.attributes().len(), content)
            })
            .unwrap();

        let block = ParsedBlock::new("acme/counter").attr("a", 1).attr("b", 2);
        let html = registry.render_block(&block, "x".to_string(), &SiteConfig::default());
        assert_eq!(html, "<span data-n=\"2\">x</span>");
        assert_eq!(
            registry.get("acme/counter").unwrap().style_handles,
            vec!["acme-counter"]
        );
    }

    #[test]
    fn test_render_unregistered_and_static_blocks() {
        let mut registry = BlockTypeRegistry::new();
        registry.register(BlockType::new("core/paragraph")).unwrap();
        let site = SiteConfig::default();

        let para = ParsedBlock::new("core/paragraph");
        assert_eq!(registry.render_block(&para, "<p>a</p>".into(), &site), "<p>a</p>");

        let unknown = ParsedBlock::new("acme/unknown");
        assert_eq!(registry.render_block(&unknown, "b".into(), &site), "b");

        let freeform = ParsedBlock::freeform("c");
        assert_eq!(registry.render_block(&freeform, "c".into(), &site), "c");
    }

    #[test]
    fn test_unregister() {
        let mut registry = BlockTypeRegistry::with_core_blocks(&BlockNaming::default());
        assert!(registry.unregister("core/query").is_some());
        assert!(registry.is_empty());
        assert!(registry.unregister("core/query").is_none());
    }

    #[test]
    fn test_error_display() {
        let err = RegistryError::AlreadyRegistered {
            name: "acme/a".to_string(),
        };
        assert!(err.to_string().contains("acme/a"));

        let err = RegistryError::Template {
            name: "acme/b".to_string(),
            message: "unexpected end".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("acme/b"));
        assert!(display.contains("unexpected end"));
    }
}
