use thiserror::Error;

/// Returned when the graph cannot be linearized because at least one
/// directed cycle exists. Carries the full edge list so callers can
/// report the offending dependencies.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("dependency graph contains a cycle")]
pub struct CycleError<Node> {
    pub edges: Vec<(Node, Node)>,
}
