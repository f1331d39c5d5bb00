//! On-disk project fixtures.
//!
//! A [`ProjectFixture`] describes a project manifest plus the packages under
//! `lib/vendor` and `lib/remote`; [`PackageFixture`]s nest under their
//! parent's `lib/` directory. Fixtures are plain values and are only written
//! when a test asks for a tree.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::{CompileFlags, Project, MANIFEST_NAME};
use crate::resolver::FlagOverrides;

fn flags(values: &[&str]) -> CompileFlags {
    values.iter().copied().collect()
}

fn flag_array(flags: &CompileFlags) -> toml::Value {
    toml::Value::Array(flags.iter().map(|f| toml::Value::String(f.to_string())).collect())
}

fn dependencies_table(overrides: &FlagOverrides) -> toml::Table {
    let mut deps = toml::Table::new();
    for (name, flags) in overrides {
        let mut spec = toml::Table::new();
        spec.insert("compile_flags".into(), flag_array(flags));
        deps.insert(name.clone(), toml::Value::Table(spec));
    }
    deps
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A package directory, optionally with a manifest and nested packages.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    dir_name: String,
    name: Option<String>,
    with_manifest: bool,
    flags: CompileFlags,
    overrides: FlagOverrides,
    raw_manifest: Option<String>,
    files: Vec<(PathBuf, String)>,
    nested: Vec<PackageFixture>,
}

impl PackageFixture {
    pub fn new(dir_name: impl Into<String>) -> Self {
        PackageFixture {
            dir_name: dir_name.into(),
            name: None,
            with_manifest: false,
            flags: CompileFlags::new(),
            overrides: FlagOverrides::new(),
            raw_manifest: None,
            files: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Declare a name different from the directory name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.with_manifest = true;
        self
    }

    /// Write a manifest even when nothing else requires one.
    pub fn manifest(mut self) -> Self {
        self.with_manifest = true;
        self
    }

    pub fn flags(mut self, values: &[&str]) -> Self {
        self.flags = flags(values);
        self.with_manifest = true;
        self
    }

    /// Override the flags of a nested package by name.
    pub fn override_flags(mut self, dep: impl Into<String>, values: &[&str]) -> Self {
        self.overrides.insert(dep.into(), flags(values));
        self.with_manifest = true;
        self
    }

    /// Use this text verbatim as the manifest.
    pub fn raw_manifest(mut self, content: impl Into<String>) -> Self {
        self.raw_manifest = Some(content.into());
        self
    }

    pub fn file(mut self, rel: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((rel.into(), content.into()));
        self
    }

    /// Add a package under this package's `lib/` directory.
    pub fn nested(mut self, package: PackageFixture) -> Self {
        self.nested.push(package);
        self
    }

    fn manifest_text(&self) -> Option<String> {
        if let Some(raw) = &self.raw_manifest {
            return Some(raw.clone());
        }
        if !self.with_manifest {
            return None;
        }

        let mut project = toml::Table::new();
        project.insert(
            "name".into(),
            toml::Value::String(self.name.clone().unwrap_or_else(|| self.dir_name.clone())),
        );
        if !self.flags.is_empty() {
            project.insert("compile_flags".into(), flag_array(&self.flags));
        }

        let mut doc = toml::Table::new();
        doc.insert("project".into(), toml::Value::Table(project));
        if !self.overrides.is_empty() {
            doc.insert(
                "dependencies".into(),
                toml::Value::Table(dependencies_table(&self.overrides)),
            );
        }
        Some(toml::to_string(&doc).unwrap())
    }

    /// Write the package into `parent`, returning its directory.
    pub fn write_into(&self, parent: &Path) -> PathBuf {
        let dir = parent.join(&self.dir_name);
        std::fs::create_dir_all(&dir).unwrap();

        if let Some(text) = self.manifest_text() {
            write_file(&dir.join(MANIFEST_NAME), &text);
        }
        for (rel, content) in &self.files {
            write_file(&dir.join(rel), content);
        }
        for child in &self.nested {
            child.write_into(&dir.join("lib"));
        }
        dir
    }
}

/// A project with targets, overrides and vendored or fetched packages.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    name: String,
    package_flags: Option<CompileFlags>,
    targets: Vec<(String, String, CompileFlags)>,
    overrides: FlagOverrides,
    vendor: Vec<PackageFixture>,
    remote: Vec<PackageFixture>,
    files: Vec<(PathBuf, String)>,
}

impl ProjectFixture {
    /// An app project with a single `main` target for `uno`.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            package_flags: None,
            targets: vec![("main".to_string(), "uno".to_string(), CompileFlags::new())],
            overrides: FlagOverrides::new(),
            vendor: Vec::new(),
            remote: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn target(mut self, name: &str, board: &str, values: &[&str]) -> Self {
        self.targets
            .push((name.to_string(), board.to_string(), flags(values)));
        self
    }

    /// Make this a `pkg` project with the given library flags.
    pub fn package_kind(mut self, values: &[&str]) -> Self {
        self.package_flags = Some(flags(values));
        self
    }

    pub fn override_flags(mut self, dep: impl Into<String>, values: &[&str]) -> Self {
        self.overrides.insert(dep.into(), flags(values));
        self
    }

    pub fn vendor(mut self, package: PackageFixture) -> Self {
        self.vendor.push(package);
        self
    }

    pub fn remote(mut self, package: PackageFixture) -> Self {
        self.remote.push(package);
        self
    }

    pub fn file(mut self, rel: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((rel.into(), content.into()));
        self
    }

    /// Overrides declared by the project manifest.
    pub fn overrides(&self) -> FlagOverrides {
        self.overrides.clone()
    }

    pub fn manifest_text(&self) -> String {
        let mut project = toml::Table::new();
        project.insert("name".into(), toml::Value::String(self.name.clone()));
        match &self.package_flags {
            Some(lib_flags) => {
                project.insert("kind".into(), toml::Value::String("pkg".into()));
                project.insert("compile_flags".into(), flag_array(lib_flags));
            }
            None => {
                project.insert("kind".into(), toml::Value::String("app".into()));
            }
        }

        let mut targets = toml::Table::new();
        for (name, board, target_flags) in &self.targets {
            let mut spec = toml::Table::new();
            spec.insert("board".into(), toml::Value::String(board.clone()));
            if !target_flags.is_empty() {
                spec.insert("compile_flags".into(), flag_array(target_flags));
            }
            targets.insert(name.clone(), toml::Value::Table(spec));
        }

        let mut doc = toml::Table::new();
        doc.insert("project".into(), toml::Value::Table(project));
        if !self.overrides.is_empty() {
            doc.insert(
                "dependencies".into(),
                toml::Value::Table(dependencies_table(&self.overrides)),
            );
        }
        doc.insert("targets".into(), toml::Value::Table(targets));
        toml::to_string(&doc).unwrap()
    }

    /// Write the project into a fresh temporary directory.
    pub fn write(&self) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(&self.name);
        self.write_to(&root);
        (tmp, root)
    }

    pub fn write_to(&self, root: &Path) {
        std::fs::create_dir_all(root).unwrap();
        write_file(&root.join(MANIFEST_NAME), &self.manifest_text());

        for package in &self.vendor {
            package.write_into(&root.join("lib/vendor"));
        }
        for package in &self.remote {
            package.write_into(&root.join("lib/remote"));
        }
        for (rel, content) in &self.files {
            write_file(&root.join(rel), content);
        }
    }

    pub fn load(&self, root: &Path) -> Project {
        Project::load(&root.join(MANIFEST_NAME)).unwrap()
    }
}
