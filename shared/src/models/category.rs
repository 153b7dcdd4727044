//! Category and term-of-payment reference rows
//!
//! Both kinds of reference data are stored flat with an optional parent
//! pointer and assembled into a tree on the consuming side. Rows with
//! `status_group == 1` are group headers and cannot be selected.

use crate::selection::TreeNode;
use serde::{Deserialize, Serialize};

/// A supplier/item category row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub parent: Option<String>,
    #[serde(default)]
    pub status_group: i32,
}

/// A term-of-payment (TOP) row, e.g. "30 Days".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Top {
    pub name: String,
    pub parent: Option<String>,
    #[serde(default)]
    pub status_group: i32,
}

impl Category {
    pub fn is_header(&self) -> bool {
        self.status_group == 1
    }

    pub fn tree_node(&self) -> TreeNode {
        TreeNode {
            id: self.name.clone(),
            parent: self.parent.clone(),
            selectable: !self.is_header(),
        }
    }
}

impl Top {
    pub fn is_header(&self) -> bool {
        self.status_group == 1
    }

    pub fn tree_node(&self) -> TreeNode {
        TreeNode {
            id: self.name.clone(),
            parent: self.parent.clone(),
            selectable: !self.is_header(),
        }
    }
}
