//! Tri-state tree selection
//!
//! Category and TOP pickers render flat reference rows as a tree with
//! checkboxes. Selection lives in a plain set of selected ids; the
//! checked/indeterminate/unchecked state of any node is derived from that
//! set on demand and never stored per node.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One node of the picker tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub parent: Option<String>,
    /// Header rows are not selectable
    pub selectable: bool,
}

/// Derived checkbox state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    Checked,
    Indeterminate,
    Unchecked,
}

impl std::fmt::Display for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SelectionState::Checked => "checked",
            SelectionState::Indeterminate => "indeterminate",
            SelectionState::Unchecked => "unchecked",
        };
        write!(f, "{}", label)
    }
}

/// Parent/children index over a flat node list.
#[derive(Debug, Clone)]
pub struct TreeIndex {
    nodes: BTreeMap<String, TreeNode>,
    children: BTreeMap<String, Vec<String>>,
}

impl TreeIndex {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for node in &nodes {
            if let Some(parent) = &node.parent {
                children.entry(parent.clone()).or_default().push(node.id.clone());
            }
        }
        let nodes = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        Self { nodes, children }
    }

    /// Root nodes: no parent, or a parent missing from the data.
    pub fn roots(&self) -> Vec<&TreeNode> {
        self.nodes
            .values()
            .filter(|n| match &n.parent {
                None => true,
                Some(p) => !self.nodes.contains_key(p),
            })
            .collect()
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The node itself (if selectable) plus every selectable descendant.
    /// A visited set guards against parent cycles in bad reference data.
    fn selection_universe(&self, id: &str) -> BTreeSet<String> {
        let mut universe = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                if node.selectable {
                    universe.insert(current.clone());
                }
            }
            for child in self.children_of(&current) {
                stack.push(child.clone());
            }
        }
        universe
    }

    /// Derive the checkbox state of one node from the selected-id set.
    pub fn state(&self, id: &str, selected: &BTreeSet<String>) -> SelectionState {
        let universe = self.selection_universe(id);
        if universe.is_empty() {
            return SelectionState::Unchecked;
        }
        let picked = universe.iter().filter(|u| selected.contains(*u)).count();
        if picked == 0 {
            SelectionState::Unchecked
        } else if picked == universe.len() {
            SelectionState::Checked
        } else {
            SelectionState::Indeterminate
        }
    }

    /// Toggle a node: a fully checked subtree clears, anything else selects
    /// the whole subtree. Returns the new selected set.
    pub fn toggle(&self, id: &str, selected: &BTreeSet<String>) -> BTreeSet<String> {
        let universe = self.selection_universe(id);
        let mut next = selected.clone();
        match self.state(id, selected) {
            SelectionState::Checked => {
                for u in &universe {
                    next.remove(u);
                }
            }
            SelectionState::Indeterminate | SelectionState::Unchecked => {
                next.extend(universe);
            }
        }
        next
    }
}
