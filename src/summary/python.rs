//! Python structural extraction using tree-sitter.
//!
//! Walks every node in the parse tree, so nested functions and methods are
//! listed alongside module-level definitions.

use super::{
    count_code_lines, find_child_by_kind, node_text, with_python_parser, StructuralSummary,
};

pub(super) fn summarize(content: &str) -> Option<StructuralSummary> {
    with_python_parser(|parser| {
        let mut summary = StructuralSummary::empty(content);

        let Some(tree) = parser.parse(content, None) else {
            return summary;
        };

        visit(tree.root_node(), content, &mut summary);
        summary.code_line_count = count_code_lines(content, "#");
        summary
    })
}

fn visit(node: tree_sitter::Node, content: &str, summary: &mut StructuralSummary) {
    match node.kind() {
        "import_statement" => extract_import(node, content, summary),
        "import_from_statement" => extract_import_from(node, content, summary),
        "class_definition" => {
            if let Some(class) = extract_class(node, content) {
                summary.classes.push(class);
            }
        }
        "function_definition" => {
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

/// `import os, sys as system` becomes one entry per module, alias dropped.
fn extract_import(node: tree_sitter::Node, content: &str, summary: &mut StructuralSummary) {
    let text = node_text(node, content);
    let rest = text.trim_start_matches("import ").trim();
    for item in rest.split(',') {
        let name = item.split(" as ").next().unwrap_or(item).trim();
        if !name.is_empty() {
            summary.imports.push(format!("import {name}"));
        }
    }
}

/// `from x import a as b, c` becomes `from x import a, c`.
fn extract_import_from(node: tree_sitter::Node, content: &str, summary: &mut StructuralSummary) {
    let text = node_text(node, content);
    let mut parts = text.splitn(2, " import ");

    let Some(source) = parts.next() else { return };
    let source = source.trim_start_matches("from ").trim();

    let names: Vec<String> = parts
        .next()
        .map(|s| {
            s.split(',')
                .map(|item| item.split(" as ").next().unwrap_or(item).trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    summary
        .imports
        .push(format!("from {source} import {}", names.join(", ")));
}

/// `Name(Base1, Base2)` when the class lists superclasses, `Name` otherwise.
fn extract_class(node: tree_sitter::Node, content: &str) -> Option<String> {
    let name = find_child_by_kind(node, "identifier").map(|n| node_text(n, content))?;

    let bases: Vec<String> = find_child_by_kind(node, "argument_list")
        .map(|args| {
            args.children(&mut args.walk())
                .filter(|c| c.kind() == "identifier" || c.kind() == "attribute")
                .map(|c| node_text(c, content))
                .collect()
        })
        .unwrap_or_default();

    if bases.is_empty() {
        Some(name)
    } else {
        Some(format!("{name}({})", bases.join(", ")))
    }
}

/// `[async ]name(a, b, *args, **kwargs)` with parameter names only.
fn extract_function(node: tree_sitter::Node, content: &str) -> Option<String> {
    let name = find_child_by_kind(node, "identifier").map(|n| node_text(n, content))?;

    let is_async = node
        .children(&mut node.walk())
        .any(|c| c.kind() == "async");

    let args = find_child_by_kind(node, "parameters")
        .map(|params| parameter_names(params, content).join(", "))
        .unwrap_or_default();

    let prefix = if is_async { "async " } else { "" };
    Some(format!("{prefix}{name}({args})"))
}

fn parameter_names(params: tree_sitter::Node, content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = params.walk();

    for child in params.children(&mut cursor) {
        match child.kind() {
            "identifier" => names.push(node_text(child, content)),
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = find_child_by_kind(child, "identifier") {
                    names.push(node_text(name, content));
                }
            }
            "list_splat_pattern" => {
                if let Some(name) = find_child_by_kind(child, "identifier") {
                    names.push(format!("*{}", node_text(name, content)));
                }
            }
            "dictionary_splat_pattern" => {
                if let Some(name) = find_child_by_kind(child, "identifier") {
                    names.push(format!("**{}", node_text(name, content)));
                }
            }
            _ => {}
        }
    }

    names
}
