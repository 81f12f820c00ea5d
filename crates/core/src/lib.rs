pub mod error;

use std::fmt;

use error::RaxError;

/// Boundary to the cloud provider. Everything that speaks HTTP lives behind
/// this trait; the CLI only ever sees nodes and results.
pub trait NodeProvider {
    fn list_nodes(&self) -> Result<Vec<Node>, RaxError>;
    fn stop_node(&self, node: &Node) -> Result<(), RaxError>;
    fn destroy_node(&self, node: &Node) -> Result<(), RaxError>;
}

/// Snapshot of a remote VM as last reported by the provider.
///
/// `name` is the lookup key the CLI works with; provider calls address the
/// node by `id`, which is the one guaranteed-unique field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub state: NodeState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    Running,
    Stopped,
    /// Any transitional or unusual state, carried through verbatim
    /// (e.g. "rebooting", "build", "error").
    Other(String),
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Running => write!(f, "running"),
            NodeState::Stopped => write!(f, "stopped"),
            NodeState::Other(state) => write!(f, "{}", state),
        }
    }
}

/// Result of resolving a node by name.
///
/// Names are not unique on the provider side, so a lookup can legitimately
/// hit zero, one, or several nodes. Callers must match on this rather than
/// treating the result as a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeLookup {
    NotFound,
    One(Node),
    Ambiguous(Vec<Node>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_state_renders_lowercase_names() {
        assert_eq!(NodeState::Running.to_string(), "running");
        assert_eq!(NodeState::Stopped.to_string(), "stopped");
    }

    #[test]
    fn other_state_renders_verbatim() {
        assert_eq!(NodeState::Other("rebooting".to_string()).to_string(), "rebooting");
    }
}
