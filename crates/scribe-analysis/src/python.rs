//! Python source parsing via tree-sitter
//!
//! Thin wrapper around the tree-sitter-python grammar plus the lookups the
//! rest of the crate shares: tree walking, top-level function discovery and
//! function isolation.

use crate::error::AnalysisError;
use tree_sitter::{Node, Parser, Tree};

/// Parse Python source into a tree-sitter tree.
///
/// tree-sitter is error-tolerant: malformed source still yields a tree with
/// `ERROR` nodes, so downstream analyses run best-effort on whatever parsed.
pub(crate) fn parse(source: &str) -> Result<Tree, AnalysisError> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE.into();
    parser
        .set_language(&language)
        .map_err(|e| AnalysisError::ParseFailed(e.to_string()))?;
    parser
        .parse(source, None)
        .ok_or_else(|| AnalysisError::ParseFailed("parser produced no tree".to_string()))
}

/// Visit `node` and every node below it, depth-first.
pub(crate) fn walk_tree<'a>(node: Node<'a>, visit: &mut impl FnMut(Node<'a>)) {
    visit(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_tree(child, visit);
    }
}

/// A function definition together with the node that carries its full
/// source extent (the decorated wrapper when decorators are present).
#[derive(Debug, Clone, Copy)]
pub(crate) struct FunctionDef<'a> {
    /// The `function_definition` node itself
    pub(crate) definition: Node<'a>,
    /// Outermost node to slice source from
    pub(crate) extent: Node<'a>,
}

impl<'a> FunctionDef<'a> {
    /// Function name, if the name field parsed.
    pub(crate) fn name(&self, source: &'a str) -> Option<&'a str> {
        self.definition
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source.as_bytes()).ok())
    }
}

/// Collect top-level `def` / `async def` statements of a module.
///
/// Decorated definitions are unwrapped; nested and class-level functions are
/// deliberately excluded, matching the test-generation contract.
pub(crate) fn top_level_functions<'a>(tree: &'a Tree) -> Vec<FunctionDef<'a>> {
    let root = tree.root_node();
    let mut cursor = root.walk();
    let mut functions = Vec::new();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "function_definition" => functions.push(FunctionDef {
                definition: child,
                extent: child,
            }),
            "decorated_definition" => {
                if let Some(def) = child.child_by_field_name("definition") {
                    if def.kind() == "function_definition" {
                        functions.push(FunctionDef {
                            definition: def,
                            extent: child,
                        });
                    }
                }
            }
            _ => {}
        }
    }
    functions
}

/// Extract the source of the named top-level function.
///
/// Returns the exact source slice, decorators included.
pub fn isolate_function(source: &str, function_name: &str) -> Result<String, AnalysisError> {
    if function_name.trim().is_empty() {
        return Err(AnalysisError::FunctionNotFound(function_name.to_string()));
    }
    let tree = parse(source)?;
    for func in top_level_functions(&tree) {
        if func.name(source) == Some(function_name) {
            let text = func
                .extent
                .utf8_text(source.as_bytes())
                .map_err(|e| AnalysisError::ParseFailed(e.to_string()))?;
            return Ok(text.trim().to_string());
        }
    }
    Err(AnalysisError::FunctionNotFound(function_name.to_string()))
}
