//! Indented-text-to-tree parser for mind maps
//!
//! Each non-blank line becomes a node; its parent is the most recent line
//! with the greatest indentation strictly below its own. Nodes are keyed by
//! label, so repeated labels collapse into a single node.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

/// Parse failures for indented outlines
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A line has no less-indented predecessor to attach to, e.g. a second
    /// column-zero line after the root.
    #[error("line {line}: \"{label}\" has no less-indented line to attach to")]
    NoParent { line: usize, label: String },
}

/// A mind-map node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    /// Free-text description attached through the mind-map view
    pub description: Option<String>,
}

/// A directed tree of labeled nodes
#[derive(Debug, Clone, Default)]
pub struct MindMapGraph {
    nodes: Vec<Node>,
    edges: Vec<(usize, usize)>,
    index: HashMap<String, usize>,
}

impl MindMapGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Parent→child edges as node id pairs
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// The root node id; always 0 when the graph is non-empty
    pub fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    /// Insert a node, returning the existing id for a repeated label
    fn insert_node(&mut self, label: &str) -> usize {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            label: label.to_string(),
            description: None,
        });
        self.index.insert(label.to_string(), id);
        id
    }

    fn add_edge(&mut self, parent: usize, child: usize) {
        if parent != child && !self.edges.contains(&(parent, child)) {
            self.edges.push((parent, child));
        }
    }

    /// Attach a description to a node
    pub fn set_description(&mut self, id: usize, description: String) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.description = if description.is_empty() {
                    None
                } else {
                    Some(description)
                };
                true
            }
            None => false,
        }
    }

    /// Children of a node in insertion order
    pub fn children(&self, id: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|(p, _)| *p == id)
            .map(|(_, c)| *c)
            .collect()
    }

    /// Serialize back to indented text, two spaces per depth level
    pub fn to_indented_text(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            let mut visited = HashSet::new();
            self.write_node(root, 0, &mut visited, &mut out);
        }
        out
    }

    fn write_node(&self, id: usize, depth: usize, visited: &mut HashSet<usize>, out: &mut String) {
        if !visited.insert(id) {
            return;
        }
        if let Some(node) = self.nodes.get(id) {
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str(&node.label);
            out.push('\n');
        }
        for child in self.children(id) {
            self.write_node(child, depth + 1, visited, out);
        }
    }
}

/// Parse indented text into a directed tree.
///
/// The first non-blank line is the root, recorded at indentation level 0
/// regardless of its own leading spaces. Returns an empty graph for blank
/// input and [`ParseError::NoParent`] for a line with no smaller recorded
/// indentation.
pub fn parse_indented_text(text: &str) -> Result<MindMapGraph, ParseError> {
    let mut graph = MindMapGraph::default();
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, first)) = lines.next() else {
        return Ok(graph);
    };
    let root = graph.insert_node(first.trim());

    // Most recent node seen at each indentation level.
    let mut path: BTreeMap<usize, usize> = BTreeMap::new();
    path.insert(0, root);

    for (line_no, line) in lines {
        let indentation = line.len() - line.trim_start_matches(' ').len();
        let label = line.trim();

        let parent = path
            .range(..indentation)
            .next_back()
            .map(|(_, &id)| id)
            .ok_or_else(|| ParseError::NoParent {
                line: line_no + 1,
                label: label.to_string(),
            })?;

        let node = graph.insert_node(label);
        graph.add_edge(parent, node);
        path.insert(indentation, node);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Depth of the tree in levels, counting the root as one
    fn tree_depth(graph: &MindMapGraph) -> usize {
        fn depth_from(graph: &MindMapGraph, id: usize, seen: &mut HashSet<usize>) -> usize {
            if !seen.insert(id) {
                return 0;
            }
            1 + graph
                .children(id)
                .iter()
                .map(|&c| depth_from(graph, c, seen))
                .max()
                .unwrap_or(0)
        }
        graph
            .root()
            .map(|r| depth_from(graph, r, &mut HashSet::new()))
            .unwrap_or(0)
    }

    fn edge_labels(graph: &MindMapGraph) -> Vec<(String, String)> {
        graph
            .edges()
            .iter()
            .map(|&(p, c)| {
                (
                    graph.node(p).unwrap().label.clone(),
                    graph.node(c).unwrap().label.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_depth_matches_distinct_indentation_levels() {
        let graph =
            parse_indented_text("Biology\n  Cells\n    Organelles\n  Genetics\n    DNA").unwrap();
        assert_eq!(tree_depth(&graph), 3);
        assert_eq!(graph.node_count(), 5);
    }

    #[test]
    fn test_root_is_first_line_regardless_of_indentation() {
        let graph = parse_indented_text("    Physics\n      Mechanics").unwrap();
        let root = graph.root().unwrap();
        assert_eq!(graph.node(root).unwrap().label, "Physics");
        assert_eq!(
            edge_labels(&graph),
            vec![("Physics".to_string(), "Mechanics".to_string())]
        );
    }

    #[test]
    fn test_single_line_is_one_node_no_edges() {
        let graph = parse_indented_text("Just a topic\n").unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_empty_input_is_empty_graph() {
        let graph = parse_indented_text("\n  \n").unwrap();
        assert!(graph.is_empty());
        assert!(graph.root().is_none());
    }

    #[test]
    fn test_line_without_smaller_predecessor_errors() {
        let err = parse_indented_text("Root\nOrphan").unwrap_err();
        assert_eq!(
            err,
            ParseError::NoParent {
                line: 2,
                label: "Orphan".to_string()
            }
        );
    }

    #[test]
    fn test_inconsistent_step_attaches_to_nearest_smaller() {
        // A 3-space line after a 4-space one attaches to the 2-space node.
        let graph = parse_indented_text("r\n  a\n    b\n   c").unwrap();
        assert!(edge_labels(&graph).contains(&("a".to_string(), "c".to_string())));
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        let graph = parse_indented_text("Root\n  Topic\n  Topic").unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_roundtrip_is_isomorphic() {
        let original =
            parse_indented_text("Chemistry\n    Atoms\n        Electrons\n    Bonds").unwrap();
        let reparsed = parse_indented_text(&original.to_indented_text()).unwrap();

        assert_eq!(edge_labels(&original), edge_labels(&reparsed));
        assert_eq!(original.node_count(), reparsed.node_count());
    }

    #[test]
    fn test_set_description() {
        let mut graph = parse_indented_text("Root\n  Leaf").unwrap();
        assert!(graph.set_description(1, "details".to_string()));
        assert_eq!(graph.node(1).unwrap().description.as_deref(), Some("details"));

        assert!(graph.set_description(1, String::new()));
        assert!(graph.node(1).unwrap().description.is_none());

        assert!(!graph.set_description(99, "nope".to_string()));
    }
}
