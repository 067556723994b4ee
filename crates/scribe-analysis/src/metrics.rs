//! Quick structural metrics
//!
//! Powers the Live Metrics panel without any model call. Cyclomatic
//! complexity is counted from branching nodes per function definition; the
//! maintainability index uses the standard
//! `171 - 5.2*ln(V) - 0.23*G - 16.2*ln(L)` formula scaled to 0..100, with a
//! token-count approximation of the Halstead volume.

use crate::python::{parse, walk_tree};
use serde::Serialize;
use std::collections::HashSet;
use tree_sitter::Node;

/// Node kinds that add a decision point.
const BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "except_clause",
    "conditional_expression",
    "boolean_operator",
    "assert_statement",
    "case_clause",
];

/// Structural metrics for a piece of Python source.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CodeMetrics {
    pub cyclomatic_complexity_avg: f64,
    pub cyclomatic_complexity_max: f64,
    pub maintainability_index: f64,
    pub loc: usize,
    pub comment_lines: usize,
}

/// Cyclomatic complexity of one function subtree.
fn function_complexity(def: Node<'_>) -> u32 {
    let mut branches = 0u32;
    walk_tree(def, &mut |node| {
        if BRANCH_KINDS.contains(&node.kind()) {
            branches += 1;
        }
    });
    1 + branches
}

/// Non-blank line count.
fn count_loc(source: &str) -> usize {
    source.lines().filter(|l| !l.trim().is_empty()).count()
}

/// Halstead volume approximation from leaf tokens: `N * log2(n)`.
fn halstead_volume(root: Node<'_>, source: &str) -> f64 {
    let mut total = 0usize;
    let mut distinct: HashSet<&str> = HashSet::new();
    walk_tree(root, &mut |node| {
        if node.child_count() == 0 && node.kind() != "comment" {
            if let Ok(text) = node.utf8_text(source.as_bytes()) {
                if !text.trim().is_empty() {
                    total += 1;
                    distinct.insert(text);
                }
            }
        }
    });
    if total == 0 || distinct.len() < 2 {
        return 0.0;
    }
    total as f64 * (distinct.len() as f64).log2()
}

/// Compute metrics for the given source.
///
/// Blank input yields all zeros. Source the parser cannot handle still gets
/// line-based `loc`/`comment_lines` so the panel never errors out.
pub fn calculate_code_metrics(source: &str) -> CodeMetrics {
    if source.trim().is_empty() {
        return CodeMetrics::default();
    }

    let loc = count_loc(source);
    let Ok(tree) = parse(source) else {
        return CodeMetrics {
            loc,
            comment_lines: source
                .lines()
                .filter(|l| l.trim().starts_with('#'))
                .count(),
            ..CodeMetrics::default()
        };
    };
    let root = tree.root_node();

    let mut complexities: Vec<u32> = Vec::new();
    let mut comment_lines = 0usize;
    walk_tree(root, &mut |node| {
        match node.kind() {
            "function_definition" => complexities.push(function_complexity(node)),
            "comment" => comment_lines += 1,
            // Docstrings: a bare string statement spans its full line range.
            "expression_statement" => {
                if node.named_child_count() == 1
                    && node.named_child(0).is_some_and(|c| c.kind() == "string")
                {
                    comment_lines += node.end_position().row - node.start_position().row + 1;
                }
            }
            _ => {}
        }
    });

    let (avg, max) = if complexities.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: u32 = complexities.iter().sum();
        let max = *complexities.iter().max().unwrap_or(&0);
        (f64::from(sum) / complexities.len() as f64, f64::from(max))
    };

    let total_complexity: u32 = complexities.iter().sum::<u32>().max(1);
    let volume = halstead_volume(root, source).max(1.0);
    let sloc = loc.max(1) as f64;
    let raw_mi =
        171.0 - 5.2 * volume.ln() - 0.23 * f64::from(total_complexity) - 16.2 * sloc.ln();
    let maintainability_index = (raw_mi * 100.0 / 171.0).clamp(0.0, 100.0);

    CodeMetrics {
        cyclomatic_complexity_avg: avg,
        cyclomatic_complexity_max: max,
        maintainability_index,
        loc,
        comment_lines,
    }
}
