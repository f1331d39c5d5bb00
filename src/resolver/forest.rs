//! The resolved dependency forest of one category.

use crate::core::{Identity, PackageNode};
use crate::resolver::encode::{LockRecord, LockedPackage};
use crate::resolver::errors::ResolveError;

/// Top-level packages of one dependency category, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyForest {
    /// Category the forest was resolved from
    pub category: String,

    pub roots: Vec<PackageNode>,
}

impl DependencyForest {
    pub fn new(category: impl Into<String>, roots: Vec<PackageNode>) -> Self {
        DependencyForest {
            category: category.into(),
            roots,
        }
    }

    /// Total number of packages at any depth.
    pub fn len(&self) -> usize {
        self.roots.iter().map(PackageNode::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every package, children before parents, roots in discovery order.
    pub fn post_order(&self) -> Vec<&PackageNode> {
        self.roots.iter().flat_map(PackageNode::post_order).collect()
    }

    /// Find a package by identity.
    pub fn find(&self, identity: &Identity) -> Option<&PackageNode> {
        self.post_order()
            .into_iter()
            .find(|node| &node.identity == identity)
    }

    /// Flatten the forest into a lock record.
    ///
    /// Fails if two packages anywhere in the forest share an identity.
    pub fn to_lock_record(&self) -> Result<LockRecord, ResolveError> {
        let mut record = LockRecord::new();
        for node in self.post_order() {
            record.insert(LockedPackage::from_node(node))?;
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn node(name: &str, parent: Option<&Identity>) -> PackageNode {
        let identity = Identity::derive(parent, name);
        PackageNode::new(name, identity, PathBuf::from(format!("/p/{}", name)))
    }

    fn sample_forest() -> DependencyForest {
        let alpha_id = Identity::root("Alpha");
        let beta_id = alpha_id.child("Beta");
        let alpha = node("Alpha", None)
            .with_child(node("Beta", Some(&alpha_id)).with_child(node("Gamma", Some(&beta_id))));

        DependencyForest::new("packages", vec![alpha, node("Delta", None)])
    }

    #[test]
    fn test_len_and_post_order() {
        let forest = sample_forest();
        assert_eq!(forest.len(), 4);

        let ids: Vec<_> = forest
            .post_order()
            .iter()
            .map(|n| n.identity.as_str())
            .collect();
        assert_eq!(ids, vec!["Alpha__Beta__Gamma", "Alpha__Beta", "Alpha", "Delta"]);
    }

    #[test]
    fn test_lock_record_is_flat() {
        let record = sample_forest().to_lock_record().unwrap();
        assert_eq!(record.len(), 4);

        let gamma = record.get(&Identity::from_raw("Alpha__Beta__Gamma")).unwrap();
        assert_eq!(gamma.name, "Gamma");
        assert_eq!(gamma.hash.as_str(), "Alpha__Beta__Gamma");
    }

    #[test]
    fn test_find() {
        let forest = sample_forest();
        assert!(forest.find(&Identity::from_raw("Alpha__Beta")).is_some());
        assert!(forest.find(&Identity::from_raw("Beta")).is_none());
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let forest =
            DependencyForest::new("packages", vec![node("Alpha", None), node("Alpha", None)]);
        assert!(matches!(
            forest.to_lock_record(),
            Err(ResolveError::IdentityCollision { .. })
        ));
    }
}
