//! Integration tests for query block rendering and enhanced-pagination
//! annotation.

use pressmark::blocks::{
    disabled_queries, BlockTypeRegistry, ParsedBlock, QueryId, Renderer, TagProcessor,
};
use pressmark::config::{BlockNaming, SiteConfig};

const QUERY_OPEN: &str = "<div class=\"wp-block-query\">";

fn renderer() -> Renderer {
    let site = SiteConfig::new("https://example.com", "https://example.com/theme");
    let mut renderer = Renderer::new(site);
    renderer
        .registry_mut()
        .register_native("test/plugin-block", |_, _| {
            "<div class=\"wp-block-test/plugin-block\">Test</div>".to_string()
        })
        .unwrap();
    renderer
}

fn query(id: u64, children: Vec<ParsedBlock>) -> ParsedBlock {
    ParsedBlock::new("core/query")
        .attr("queryId", id)
        .attr("query", serde_json::json!({ "inherit": true }))
        .attr("enhancedPagination", true)
        .wrap(QUERY_OPEN, children, "</div>")
}

fn post_template(children: Vec<ParsedBlock>) -> ParsedBlock {
    ParsedBlock::new("core/post-template")
        .attr("align", "wide")
        .wrap("", children, "")
}

/// Root elements of every query block in `html`, in document order.
fn query_roots(html: &str) -> Vec<TagProcessor<'_>> {
    html.match_indices(QUERY_OPEN.trim_end_matches('>'))
        .map(|(i, _)| TagProcessor::new(&html[i..]).unwrap())
        .collect()
}

#[test]
fn test_enhanced_query_gets_directives() {
    let doc = vec![query(
        0,
        vec![
            post_template(vec![]),
            ParsedBlock::new("core/query-pagination").wrap(
                "",
                vec![
                    ParsedBlock::new("core/query-pagination-previous"),
                    ParsedBlock::new("core/query-pagination-next"),
                ],
                "",
            ),
        ],
    )];

    let html = renderer().render(&doc);
    let roots = query_roots(&html);
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].get_attribute("data-wp-context"), Some("{}"));
    assert_eq!(roots[0].get_attribute("data-wp-router-region"), Some("query-0"));
    assert_eq!(
        roots[0].get_attribute("data-wp-interactive"),
        Some("{\"namespace\":\"core/query\"}")
    );
    assert_eq!(
        roots[0].get_attribute("data-wp-init"),
        Some("callbacks.setQueryRef")
    );
    assert_eq!(roots[0].get_attribute("data-wp-navigation-disabled"), None);
}

#[test]
fn test_plugin_block_disables_navigation() {
    let doc = vec![query(
        0,
        vec![post_template(vec![ParsedBlock::new("test/plugin-block")])],
    )];

    let html = renderer().render(&doc);
    let roots = query_roots(&html);
    assert_eq!(roots[0].get_attribute("data-wp-router-region"), Some("query-0"));
    assert_eq!(
        roots[0].get_attribute("data-wp-navigation-disabled"),
        Some("true")
    );
    assert!(html.contains("<div class=\"wp-block-test/plugin-block\">Test</div>"));
}

#[test]
fn test_post_content_block_disables_navigation() {
    let doc = vec![query(
        0,
        vec![post_template(vec![ParsedBlock::new("core/post-content")])],
    )];

    let html = renderer().render(&doc);
    let roots = query_roots(&html);
    assert_eq!(roots[0].get_attribute("data-wp-router-region"), Some("query-0"));
    assert_eq!(
        roots[0].get_attribute("data-wp-navigation-disabled"),
        Some("true")
    );
}

#[test]
fn test_nested_queries_from_parser_output() {
    let doc: Vec<ParsedBlock> =
        serde_json::from_str(include_str!("fixtures/nested_queries.json")).unwrap();

    let html = renderer().render(&doc);
    let roots = query_roots(&html);
    assert_eq!(roots.len(), 3);

    // Query 0 contains the plugin block through query 2.
    assert_eq!(roots[0].get_attribute("data-wp-router-region"), Some("query-0"));
    assert_eq!(
        roots[0].get_attribute("data-wp-navigation-disabled"),
        Some("true")
    );

    assert_eq!(roots[1].get_attribute("data-wp-router-region"), Some("query-1"));
    assert_eq!(roots[1].get_attribute("data-wp-navigation-disabled"), None);

    assert_eq!(roots[2].get_attribute("data-wp-router-region"), Some("query-2"));
    assert_eq!(
        roots[2].get_attribute("data-wp-navigation-disabled"),
        Some("true")
    );

    assert_eq!(
        disabled_queries(&doc, &BlockNaming::default()),
        vec![QueryId::from(2), QueryId::from(0)]
    );
}

#[test]
fn test_siblings_are_annotated_independently() {
    let doc = vec![
        query(
            1,
            vec![post_template(vec![ParsedBlock::new("test/plugin-block")])],
        ),
        query(
            2,
            vec![post_template(vec![ParsedBlock::new("core/post-title")])],
        ),
    ];

    let html = renderer().render(&doc);
    let roots = query_roots(&html);
    assert_eq!(
        roots[0].get_attribute("data-wp-navigation-disabled"),
        Some("true")
    );
    assert_eq!(roots[1].get_attribute("data-wp-navigation-disabled"), None);
}

#[test]
fn test_removing_offending_block_keeps_navigation() {
    let with_plugin = vec![query(
        0,
        vec![post_template(vec![ParsedBlock::new("test/plugin-block")])],
    )];
    let without = vec![query(0, vec![post_template(vec![])])];

    let mut renderer = renderer();
    assert!(renderer
        .render(&with_plugin)
        .contains("data-wp-navigation-disabled"));
    assert!(!renderer.render(&without).contains("data-wp-navigation-disabled"));
}

#[test]
fn test_already_emitted_style_is_left_alone() {
    let site = SiteConfig::default().with_emitted_style("wp-block-query");
    let mut renderer = Renderer::new(site);
    renderer.render(&[query(0, vec![])]);

    let query_type = renderer.registry().get("core/query").unwrap();
    assert!(query_type.style_handles.contains(&"wp-block-query".to_string()));

    renderer
        .registry_mut()
        .get_mut("core/query")
        .unwrap()
        .style_handles
        .clear();
    renderer.render(&[query(0, vec![])]);
    assert!(renderer
        .registry()
        .get("core/query")
        .unwrap()
        .style_handles
        .is_empty());
}

#[test]
fn test_template_block_inside_query() {
    let mut registry = BlockTypeRegistry::with_core_blocks(&BlockNaming::default());
    registry
        .register_template(
            "acme/badge",
            "<span class=\"badge\">{{ attributes.label }}</span>",
        )
        .unwrap();
    let mut renderer = Renderer::with_registry(registry, SiteConfig::default());

    let doc = vec![query(
        5,
        vec![ParsedBlock::new("acme/badge").attr("label", "New")],
    )];
    let html = renderer.render(&doc);

    assert!(html.contains("<span class=\"badge\">New</span>"));
    let roots = query_roots(&html);
    assert_eq!(
        roots[0].get_attribute("data-wp-navigation-disabled"),
        Some("true")
    );
}
