use comfy_table::{Cell, Color, Table};
use log::debug;
use rax_core::error::RaxError;
use rax_core::{Node, NodeLookup, NodeProvider, NodeState};

use crate::style::{pr_green, pr_red};

/// Wraps the provider driver and mirrors its node list.
///
/// The collection is replaced wholesale on every refresh; lookups re-fetch
/// rather than trusting whatever was held before, so results always reflect
/// the provider's current view.
pub struct RaxCompute {
    provider: Box<dyn NodeProvider>,
    nodes: Vec<Node>,
}

/// What happened to a single entry of a batch stop/destroy.
#[derive(Debug)]
pub struct NodeOutcome {
    pub name: String,
    pub result: Result<(), RaxError>,
}

#[derive(Debug, Clone, Copy)]
enum NodeAction {
    Stop,
    Destroy,
}

impl RaxCompute {
    pub fn new(provider: Box<dyn NodeProvider>) -> Self {
        RaxCompute {
            provider,
            nodes: Vec::new(),
        }
    }

    /// Replace the held node collection with a fresh listing.
    pub fn refresh(&mut self) -> Result<(), RaxError> {
        self.nodes = self.provider.list_nodes()?;
        debug!("fetched {} nodes", self.nodes.len());
        Ok(())
    }

    /// Resolve a node by exact name, re-fetching the listing first.
    pub fn find_by_name(&mut self, name: &str) -> Result<NodeLookup, RaxError> {
        if name.is_empty() {
            return Err(RaxError::Validation(
                "node name must not be empty".to_string(),
            ));
        }
        self.refresh()?;

        let mut matches: Vec<Node> = self
            .nodes
            .iter()
            .filter(|node| node.name == name)
            .cloned()
            .collect();

        Ok(match matches.len() {
            0 => NodeLookup::NotFound,
            1 => NodeLookup::One(matches.remove(0)),
            _ => NodeLookup::Ambiguous(matches),
        })
    }

    /// Stop each named node in order, printing per-node outcomes as they
    /// happen. One entry failing never aborts the rest of the batch.
    pub fn stop_many(&mut self, names: &[String]) -> Vec<NodeOutcome> {
        self.act_on_many(names, NodeAction::Stop)
    }

    /// Destroy each named node in order; same contract as `stop_many`.
    pub fn destroy_many(&mut self, names: &[String]) -> Vec<NodeOutcome> {
        self.act_on_many(names, NodeAction::Destroy)
    }

    fn act_on_many(&mut self, names: &[String], action: NodeAction) -> Vec<NodeOutcome> {
        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            let result = self.act_on_one(name, action);
            match &result {
                Ok(()) => println!("{}", pr_green(&success_message(name, action))),
                Err(e) => println!(
                    "{}",
                    pr_red(&format!("Something went wrong with node {}: {}", name, e))
                ),
            }
            outcomes.push(NodeOutcome {
                name: name.clone(),
                result,
            });
        }
        outcomes
    }

    fn act_on_one(&mut self, name: &str, action: NodeAction) -> Result<(), RaxError> {
        let node = match self.find_by_name(name)? {
            NodeLookup::One(node) => node,
            NodeLookup::NotFound => return Err(RaxError::NotFound(name.to_string())),
            NodeLookup::Ambiguous(matches) => {
                return Err(RaxError::Ambiguous {
                    name: name.to_string(),
                    count: matches.len(),
                });
            }
        };

        match action {
            NodeAction::Stop => self.provider.stop_node(&node),
            NodeAction::Destroy => self.provider.destroy_node(&node),
        }
    }

    /// Print the status table for every node the provider reports.
    pub fn list_statuses(&mut self) -> Result<(), RaxError> {
        self.refresh()?;
        if self.nodes.is_empty() {
            println!("No nodes found.");
            return Ok(());
        }
        println!("{}", status_table(&self.nodes));
        Ok(())
    }
}

fn success_message(name: &str, action: NodeAction) -> String {
    match action {
        NodeAction::Stop => format!("Node {} stopped.", name),
        NodeAction::Destroy => format!("Node {} DESTROYED.", name),
    }
}

fn status_table(nodes: &[Node]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Name", "UUID", "Current State"]);
    for node in nodes {
        let state_cell = match state_color(&node.state) {
            Some(color) => Cell::new(node.state.to_string()).fg(color),
            None => Cell::new(node.state.to_string()),
        };
        table.add_row(vec![
            Cell::new(&node.name),
            Cell::new(&node.id),
            state_cell,
        ]);
    }
    table
}

/// Running nodes show green, stopped nodes red, anything else unstyled.
fn state_color(state: &NodeState) -> Option<Color> {
    match state {
        NodeState::Running => Some(Color::Green),
        NodeState::Stopped => Some(Color::Red),
        NodeState::Other(_) => None,
    }
}
