//! Typed build descriptors and their CMake rendering.
//!
//! Descriptors are assembled as plain records and only turned into text by
//! [`CMakeWriter`], which owns all quoting. Paths are always written with
//! forward slashes.

use std::path::{Path, PathBuf};

use crate::core::package::SOURCE_EXTENSIONS;
use crate::core::Identity;
use crate::util::fs::to_forward_slashes;

/// Minimum CMake version every descriptor requires.
pub const CMAKE_MINIMUM_VERSION: &str = "3.0.0";

/// Toolchain file for a framework: `<root>/toolchain/cmake/<Framework>Toolchain.cmake`.
pub fn toolchain_file(toolchain_root: &Path, framework: &str) -> PathBuf {
    toolchain_root
        .join("toolchain")
        .join("cmake")
        .join(format!("{}Toolchain.cmake", capitalize(framework)))
}

/// Compile definition identifying platform and framework, e.g. `__AVR_COSA__`.
pub fn platform_macro(platform: &str, framework: &str) -> String {
    format!(
        "__{}_{}__",
        platform.to_uppercase(),
        framework.to_uppercase()
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// CMake variable holding the source list of `name`.
fn sources_variable(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_SRC_FILES", sanitized)
}

/// One argument of a CMake command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CMakeArg {
    /// Written verbatim: keywords, target names, variable references
    Bare(String),
    /// Written as a quoted argument
    Quoted(String),
}

impl CMakeArg {
    pub fn bare(s: impl Into<String>) -> Self {
        CMakeArg::Bare(s.into())
    }

    pub fn quoted(s: impl Into<String>) -> Self {
        CMakeArg::Quoted(s.into())
    }

    pub fn path(path: &Path) -> Self {
        CMakeArg::Quoted(to_forward_slashes(path))
    }

    fn render(&self) -> String {
        match self {
            CMakeArg::Bare(s) => s.clone(),
            CMakeArg::Quoted(s) => quote(s),
        }
    }
}

/// Quote a string as a CMake quoted argument.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' | '"' | '$' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Accumulates CMake commands into a file body.
#[derive(Debug, Default)]
pub struct CMakeWriter {
    out: String,
}

impl CMakeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.out.push_str("# ");
            self.out.push_str(line);
            self.out.push('\n');
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Write `name(arg arg ...)`.
    pub fn command(&mut self, name: &str, args: &[CMakeArg]) -> &mut Self {
        self.out.push_str(name);
        self.out.push('(');
        let rendered: Vec<String> = args.iter().map(CMakeArg::render).collect();
        self.out.push_str(&rendered.join(" "));
        self.out.push_str(")\n");
        self
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn preamble(&mut self, toolchain_file: &Path, project: &str) -> &mut Self {
        self.comment("Generated by wio. Do not edit; changes are overwritten.")
            .blank()
            .command(
                "set",
                &[CMakeArg::bare("CMAKE_TOOLCHAIN_FILE"), CMakeArg::path(toolchain_file)],
            )
            .command(
                "cmake_minimum_required",
                &[CMakeArg::bare("VERSION"), CMakeArg::bare(CMAKE_MINIMUM_VERSION)],
            )
            .command(
                "project",
                &[
                    CMakeArg::quoted(project),
                    CMakeArg::bare("C"),
                    CMakeArg::bare("CXX"),
                    CMakeArg::bare("ASM"),
                ],
            )
            .blank()
    }

    fn source_glob(&mut self, variable: &str, dirs: &[&Path]) -> &mut Self {
        let mut args = vec![CMakeArg::bare("GLOB_RECURSE"), CMakeArg::bare(variable)];
        for dir in dirs {
            for ext in SOURCE_EXTENSIONS {
                args.push(CMakeArg::quoted(format!(
                    "{}/*.{}",
                    to_forward_slashes(dir),
                    ext
                )));
            }
        }
        self.command("file", &args)
    }

    fn definitions<'a>(
        &mut self,
        target: &str,
        definitions: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        let mut args = vec![CMakeArg::quoted(target), CMakeArg::bare("PRIVATE")];
        args.extend(definitions.into_iter().map(CMakeArg::quoted));
        self.command("target_compile_definitions", &args)
    }

    fn include_dir(&mut self, dir: &Path) -> &mut Self {
        self.command("include_directories", &[CMakeArg::path(dir)])
    }

    fn link(&mut self, target: &str, archive: &Path) -> &mut Self {
        self.command(
            "target_link_libraries",
            &[CMakeArg::quoted(target), CMakeArg::path(archive)],
        )
    }
}

/// A direct dependency as seen from its parent's descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedDependency {
    pub include_dir: PathBuf,
    /// `lib<identity>.a` inside the dependency's own artifact directory
    pub archive: PathBuf,
}

/// Descriptor of one package's static library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub identity: Identity,
    pub toolchain_file: PathBuf,
    pub source_dir: PathBuf,
    pub include_dir: PathBuf,
    pub board: String,
    /// Platform macro followed by the package's merged flags
    pub definitions: Vec<String>,
    pub dependencies: Vec<LinkedDependency>,
}

impl PackageDescriptor {
    pub fn render(&self) -> String {
        let id = self.identity.as_str();
        let sources = sources_variable(id);

        let mut w = CMakeWriter::new();
        w.preamble(&self.toolchain_file, id)
            .source_glob(&sources, &[&self.source_dir])
            .command(
                "generate_arduino_library",
                &[
                    CMakeArg::quoted(id),
                    CMakeArg::bare("SRCS"),
                    CMakeArg::bare(format!("${{{}}}", sources)),
                    CMakeArg::bare("BOARD"),
                    CMakeArg::quoted(&self.board),
                ],
            )
            .definitions(id, self.definitions.iter().map(String::as_str))
            .include_dir(&self.include_dir);

        for dep in &self.dependencies {
            w.blank().include_dir(&dep.include_dir).link(id, &dep.archive);
        }

        w.finish()
    }
}

/// What the root descriptor builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootArtifact {
    /// Application firmware from the project's sources
    Firmware,
    /// Validation firmware for a package: its sources plus its tests
    PackageTest { tests_dir: PathBuf },
}

/// Descriptor of one target's final artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDescriptor {
    pub project_name: String,
    pub target_name: String,
    pub artifact: RootArtifact,
    pub toolchain_file: PathBuf,
    pub source_dir: PathBuf,
    pub board: String,
    pub definitions: Vec<String>,
    /// Header directories exposed to the project's own sources
    pub include_dirs: Vec<PathBuf>,
    /// Every archive linked into the artifact
    pub archives: Vec<PathBuf>,
}

impl RootDescriptor {
    pub fn render(&self) -> String {
        let target = self.target_name.as_str();
        let sources = sources_variable(target);

        let mut glob_dirs: Vec<&Path> = vec![&self.source_dir];
        if let RootArtifact::PackageTest { tests_dir } = &self.artifact {
            glob_dirs.push(tests_dir);
        }

        let mut w = CMakeWriter::new();
        w.preamble(&self.toolchain_file, &self.project_name)
            .source_glob(&sources, &glob_dirs)
            .command(
                "generate_arduino_firmware",
                &[
                    CMakeArg::quoted(target),
                    CMakeArg::bare("SRCS"),
                    CMakeArg::bare(format!("${{{}}}", sources)),
                    CMakeArg::bare("BOARD"),
                    CMakeArg::quoted(&self.board),
                ],
            )
            .definitions(target, self.definitions.iter().map(String::as_str));

        if !self.include_dirs.is_empty() {
            w.blank();
            for dir in &self.include_dirs {
                w.include_dir(dir);
            }
        }

        if !self.archives.is_empty() {
            w.blank();
            for archive in &self.archives {
                w.link(target, archive);
            }
        }

        w.finish()
    }
}
