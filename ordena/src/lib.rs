use errors::CycleError;
use indexmap::IndexMap;
use std::{collections::VecDeque, hash::Hash};

pub mod errors;

/// A directed graph described by its node list and an adjacency list of
/// `(from, to)` edges. Nodes that only appear in edges are picked up as well.
#[derive(Debug, Clone)]
pub struct Graph<Node> {
    pub nodes: Vec<Node>,
    pub edges: Vec<(Node, Node)>,
}

/// Kahn's algorithm over an [`IndexMap`]-backed in-degree table, so the
/// resulting order is deterministic: among nodes that are simultaneously
/// ready, declaration order wins.
///
/// # Example
/// ```
/// use ordena::Graph;
///
/// let graph = Graph {
///     nodes: vec!["core", "core/Model.php", "app"],
///     edges: vec![("core", "core/Model.php")],
/// };
/// let order = ordena::topological_order(&graph).unwrap();
///
/// assert!(
///     order.iter().position(|n| *n == "core")
///         < order.iter().position(|n| *n == "core/Model.php")
/// );
/// ```
pub fn topological_order<Node: Hash + Eq + Clone>(
    graph: &Graph<Node>,
) -> Result<Vec<Node>, CycleError<Node>> {
    let mut dependents: IndexMap<Node, Vec<Node>> = IndexMap::new();
    let mut in_degree: IndexMap<Node, usize> = IndexMap::new();

    for node in &graph.nodes {
        in_degree.entry(node.clone()).or_insert(0);
    }

    for (from, to) in &graph.edges {
        dependents.entry(from.clone()).or_default().push(to.clone());

        *in_degree.entry(to.clone()).or_insert(0) += 1;
    }

    // seed with every node that has nothing pointing at it
    let mut ready: VecDeque<Node> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(node, _)| node.clone())
        .collect();

    let mut order: Vec<Node> = Vec::with_capacity(in_degree.len());

    while let Some(node) = ready.pop_front() {
        if let Some(next) = dependents.get(&node) {
            for dependent in next {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;

                    if *degree == 0 {
                        ready.push_back(dependent.clone());
                    }
                }
            }
        }

        order.push(node);
    }

    if order.len() == in_degree.len() {
        Ok(order)
    } else {
        Err(CycleError {
            edges: graph.edges.clone(),
        })
    }
}
