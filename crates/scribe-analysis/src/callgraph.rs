//! Call graph construction
//!
//! Builds Mermaid call graphs for a single pasted snippet and a structured
//! graph payload for a whole uploaded project. Call targets are resolved
//! textually: the callee expression's source text is the label, and project
//! resolution matches the trailing identifier against defined functions.

use crate::error::AnalysisError;
use crate::python::{parse, top_level_functions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tree_sitter::Node;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Graph payload for a single pasted snippet.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetGraph {
    /// Mermaid `graph TD` text
    pub mermaid: String,
    /// Informational message (set when no functions were found)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One node of a project call graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    /// Stable identifier (`<file>:<function>` or `external::<callee>`)
    pub id: String,
    /// Display label
    pub label: String,
    /// Defining file, or `"external"`
    pub file: String,
    /// Function name or callee expression
    pub function: String,
    /// `"defined"` or `"external"`
    #[serde(rename = "type")]
    pub node_type: String,
}

/// Directed call edge.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Aggregate counts for a project graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphMetadata {
    pub files: usize,
    pub defined_functions: usize,
    pub external_nodes: usize,
    pub edges: usize,
    /// Inline SQL strings found across the project (filled in by the caller)
    pub sql_queries: usize,
}

/// Cross-file call graph for an uploaded project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectGraph {
    pub mode: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub mermaid: String,
    pub metadata: GraphMetadata,
}

/// Sanitize a label into a Mermaid-safe node id.
fn sanitize_node_id(label: &str) -> String {
    let sanitized = NON_WORD.replace_all(label, "_").to_string();
    let sanitized = if sanitized
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
    {
        format!("n_{sanitized}")
    } else {
        sanitized
    };
    if sanitized.is_empty() {
        "node".to_string()
    } else {
        sanitized
    }
}

/// Allocates unique Mermaid ids for labels, suffixing collisions.
#[derive(Debug, Default)]
struct NodeIdAllocator {
    assigned: HashMap<String, String>,
    used: HashSet<String>,
}

impl NodeIdAllocator {
    fn id_for(&mut self, label: &str) -> String {
        if let Some(id) = self.assigned.get(label) {
            return id.clone();
        }
        let base = sanitize_node_id(label);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}_{suffix}");
        }
        self.used.insert(candidate.clone());
        self.assigned.insert(label.to_string(), candidate.clone());
        candidate
    }
}

/// Source text of a call's callee expression, e.g. `foo` or `self.helper`.
fn callee_text<'a>(call: Node<'a>, source: &'a str) -> Option<&'a str> {
    call.child_by_field_name("function")
        .and_then(|f| f.utf8_text(source.as_bytes()).ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Call-graph events emitted while walking a module.
enum CallEvent<'a> {
    /// Entered a function definition scope
    Scope(&'a str),
    /// Saw `caller -> callee`
    Call(&'a str, &'a str),
}

/// Walk `node` emitting scope and call events.
///
/// Every function definition (nested included) becomes a caller scope, with
/// `qualify` mapping the bare name to the caller key used in the graph.
fn collect_calls<'a>(
    node: Node<'a>,
    source: &'a str,
    current: Option<&str>,
    qualify: &dyn Fn(&str) -> String,
    emit: &mut dyn FnMut(CallEvent<'_>),
) {
    if node.kind() == "function_definition" {
        if let Some(name) = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source.as_bytes()).ok())
        {
            let scope = qualify(name);
            emit(CallEvent::Scope(&scope));
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                collect_calls(child, source, Some(&scope), qualify, emit);
            }
            return;
        }
    }
    if node.kind() == "call" {
        if let (Some(caller), Some(callee)) = (current, callee_text(node, source)) {
            emit(CallEvent::Call(caller, callee));
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_calls(child, source, current, qualify, emit);
    }
}

/// Build the Mermaid call graph for a single snippet.
pub fn snippet_graph(source: &str) -> Result<SnippetGraph, AnalysisError> {
    let tree = parse(source)?;

    let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    collect_calls(
        tree.root_node(),
        source,
        None,
        &|name| name.to_string(),
        &mut |event| match event {
            CallEvent::Scope(scope) => {
                adjacency.entry(scope.to_string()).or_default();
            }
            CallEvent::Call(caller, callee) => {
                adjacency
                    .entry(caller.to_string())
                    .or_default()
                    .insert(callee.to_string());
            }
        },
    );

    let mut all_nodes: BTreeSet<String> = adjacency.keys().cloned().collect();
    for callees in adjacency.values() {
        all_nodes.extend(callees.iter().cloned());
    }

    if all_nodes.is_empty() {
        return Ok(SnippetGraph {
            mermaid: "graph TD\nplaceholder[\"No functions detected\"]".to_string(),
            message: Some("No functions detected.".to_string()),
        });
    }

    let mut ids = NodeIdAllocator::default();
    let mut lines = vec!["graph TD".to_string()];
    for label in &all_nodes {
        let id = ids.id_for(label);
        let display = label.replace('"', "'");
        lines.push(format!("{id}[\"{display}\"]"));
    }
    for (caller, callees) in &adjacency {
        let caller_id = ids.id_for(caller);
        for callee in callees {
            let callee_id = ids.id_for(callee);
            lines.push(format!("{caller_id} --> {callee_id}"));
        }
    }

    Ok(SnippetGraph {
        mermaid: lines.join("\n"),
        message: None,
    })
}

/// Build the cross-file call graph for `(relative path, source)` pairs.
///
/// First pass registers top-level definitions as `<path>:<name>`; second
/// pass resolves each call by its trailing identifier. Unresolved targets
/// become `external::` nodes so library calls stay visible in the graph.
pub fn project_graph(files: &[(String, String)]) -> ProjectGraph {
    let mut nodes: BTreeMap<String, GraphNode> = BTreeMap::new();
    let mut defined: HashMap<String, BTreeSet<String>> = HashMap::new();

    for (rel_path, source) in files {
        let Ok(tree) = parse(source) else { continue };
        for func in top_level_functions(&tree) {
            let Some(name) = func.name(source) else {
                continue;
            };
            let qualified = format!("{rel_path}:{name}");
            nodes.insert(
                qualified.clone(),
                GraphNode {
                    id: qualified.clone(),
                    label: qualified.clone(),
                    file: rel_path.clone(),
                    function: name.to_string(),
                    node_type: "defined".to_string(),
                },
            );
            defined.entry(name.to_string()).or_default().insert(qualified);
        }
    }

    let mut edges: BTreeSet<(String, String)> = BTreeSet::new();
    for (rel_path, source) in files {
        let Ok(tree) = parse(source) else { continue };
        collect_calls(
            tree.root_node(),
            source,
            None,
            &|name| format!("{rel_path}:{name}"),
            &mut |event| {
                let CallEvent::Call(caller, callee) = event else {
                    return;
                };
                let basic = callee
                    .split(|c: char| c.is_whitespace() || c == '(')
                    .next()
                    .unwrap_or(callee);
                let name = basic.rsplit('.').next().unwrap_or(basic);
                if let Some(targets) = defined.get(name) {
                    for target in targets {
                        edges.insert((caller.to_string(), target.clone()));
                    }
                } else {
                    let external = format!("external::{basic}");
                    nodes.entry(external.clone()).or_insert_with(|| GraphNode {
                        id: external.clone(),
                        label: basic.to_string(),
                        file: "external".to_string(),
                        function: basic.to_string(),
                        node_type: "external".to_string(),
                    });
                    edges.insert((caller.to_string(), external));
                }
            },
        );
    }

    let mut ids = NodeIdAllocator::default();
    let mut mermaid_lines = vec!["graph LR".to_string()];
    for (label, node) in &nodes {
        let id = ids.id_for(label);
        let display = node.label.replace('"', "'");
        mermaid_lines.push(format!("{id}[\"{display}\"]"));
    }
    for (source_label, target_label) in &edges {
        // Only draw edges whose endpoints made it into the node list.
        if nodes.contains_key(source_label) && nodes.contains_key(target_label) {
            let src = ids.id_for(source_label);
            let dst = ids.id_for(target_label);
            mermaid_lines.push(format!("{src} --> {dst}"));
        }
    }

    let defined_count = nodes.values().filter(|n| n.node_type == "defined").count();
    let external_count = nodes.values().filter(|n| n.node_type == "external").count();
    let metadata = GraphMetadata {
        files: files.len(),
        defined_functions: defined_count,
        external_nodes: external_count,
        edges: edges.len(),
        sql_queries: 0,
    };

    ProjectGraph {
        mode: "project".to_string(),
        nodes: nodes.into_values().collect(),
        edges: edges
            .into_iter()
            .map(|(source, target)| GraphEdge { source, target })
            .collect(),
        mermaid: mermaid_lines.join("\n"),
        metadata,
    }
}
