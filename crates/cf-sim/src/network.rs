//! Network description handed to the engine.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkNodeKind {
    Junction,
    Tank,
    Reservoir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkNode {
    pub id: String,
    pub kind: NetworkNodeKind,
}

/// The engine loads hydraulics from `inp_path`; contamflow only needs node names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkModel {
    pub name: String,
    pub inp_path: Option<PathBuf>,
    pub nodes: Vec<NetworkNode>,
}

impl NetworkModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inp_path: None,
            nodes: Vec::new(),
        }
    }

    pub fn with_node(mut self, id: impl Into<String>, kind: NetworkNodeKind) -> Self {
        self.nodes.push(NetworkNode {
            id: id.into(),
            kind,
        });
        self
    }

    /// Junction names in network order.
    pub fn junction_names(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NetworkNodeKind::Junction)
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junction_names_skip_storage_nodes() {
        let net = NetworkModel::new("net")
            .with_node("R1", NetworkNodeKind::Reservoir)
            .with_node("J1", NetworkNodeKind::Junction)
            .with_node("T1", NetworkNodeKind::Tank)
            .with_node("J2", NetworkNodeKind::Junction);
        assert_eq!(net.junction_names(), vec!["J1", "J2"]);
        assert!(net.contains("T1"));
        assert!(!net.contains("J3"));
    }
}
