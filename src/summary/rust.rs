//! Rust structural extraction using tree-sitter.

use super::{
    count_code_lines, find_child_by_kind, node_text, with_rust_parser, StructuralSummary,
};

pub(super) fn summarize(content: &str) -> Option<StructuralSummary> {
    with_rust_parser(|parser| {
        let mut summary = StructuralSummary::empty(content);

        let Some(tree) = parser.parse(content, None) else {
            return summary;
        };

        visit(tree.root_node(), content, &mut summary);
        summary.code_line_count = count_code_lines(content, "//");
        summary
    })
}

fn visit(node: tree_sitter::Node, content: &str, summary: &mut StructuralSummary) {
    match node.kind() {
        "use_declaration" => {
            let text = node_text(node, content);
            summary.imports.push(text.trim_end_matches(';').to_string());
        }
        "struct_item" | "enum_item" | "trait_item" | "union_item" => {
            if let Some(name) = find_child_by_kind(node, "type_identifier") {
                summary.classes.push(node_text(name, content));
            }
        }
        "function_item" | "function_signature_item" => {
            if let Some(function) = extract_function(node, content) {
                summary.functions.push(function);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, content, summary);
    }
}

/// `[async ]name(params)` with the full parameter list text.
fn extract_function(node: tree_sitter::Node, content: &str) -> Option<String> {
    let name = find_child_by_kind(node, "identifier").map(|n| node_text(n, content))?;

    let is_async = find_child_by_kind(node, "function_modifiers")
        .map(|m| node_text(m, content).contains("async"))
        .unwrap_or(false);

    let params = find_child_by_kind(node, "parameters")
        .map(|p| {
            node_text(p, content)
                .trim_start_matches('(')
                .trim_end_matches(')')
                .to_string()
        })
        .unwrap_or_default();

    let prefix = if is_async { "async " } else { "" };
    Some(format!("{prefix}{name}({params})"))
}
