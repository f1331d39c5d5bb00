//! Resolved package nodes.
//!
//! A PackageNode owns its nested dependencies outright; the resolved
//! dependency graph is a tree per top-level package.

use std::path::{Path, PathBuf};

use crate::core::flags::CompileFlags;
use crate::core::identity::Identity;

/// Source extensions globbed into a package's static library.
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "cc", "c"];

/// One resolved package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    /// Declared or inferred package name
    pub name: String,

    /// Ancestry-encoded identity
    pub identity: Identity,

    /// Absolute path to the package's source root
    pub path: PathBuf,

    /// Own flags merged with the parent's override for this package
    pub compile_flags: CompileFlags,

    /// Nested packages, in discovery order
    pub children: Vec<PackageNode>,
}

impl PackageNode {
    pub fn new(name: impl Into<String>, identity: Identity, path: PathBuf) -> Self {
        PackageNode {
            name: name.into(),
            identity,
            path,
            compile_flags: CompileFlags::new(),
            children: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: CompileFlags) -> Self {
        self.compile_flags = flags;
        self
    }

    pub fn with_child(mut self, child: PackageNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(PackageNode::subtree_len).sum::<usize>()
    }

    /// Visit the subtree children-first.
    pub fn post_order(&self) -> Vec<&PackageNode> {
        let mut out = Vec::with_capacity(self.subtree_len());
        self.collect_post_order(&mut out);
        out
    }

    fn collect_post_order<'a>(&'a self, out: &mut Vec<&'a PackageNode>) {
        for child in &self.children {
            child.collect_post_order(out);
        }
        out.push(self);
    }

    /// Directory whose sources are compiled: `src` if present, else the root.
    pub fn source_dir(&self) -> PathBuf {
        source_dir(&self.path)
    }

    /// Directory exposed to dependents as headers.
    pub fn include_dir(&self) -> PathBuf {
        include_dir(&self.path)
    }
}

/// `src` under `root` if it exists, else `root`.
pub fn source_dir(root: &Path) -> PathBuf {
    let src = root.join("src");
    if src.is_dir() {
        src
    } else {
        root.to_path_buf()
    }
}

/// `include` under `root` if it exists, else `src`, else `root`.
pub fn include_dir(root: &Path) -> PathBuf {
    let include = root.join("include");
    if include.is_dir() {
        return include;
    }
    source_dir(root)
}
