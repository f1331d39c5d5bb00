//! Test utilities for wio unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{PackageFixture, ProjectFixture};
//!
//! #[test]
//! fn test_example() {
//!     let fixture = ProjectFixture::new("blink")
//!         .vendor(PackageFixture::new("Alpha").nested(PackageFixture::new("Beta")));
//!     let (_tmp, root) = fixture.write();
//!     let project = fixture.load(&root);
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MANIFEST_NAME;

    #[test]
    fn test_project_fixture_layout() {
        let fixture = ProjectFixture::new("blink")
            .override_flags("Alpha", &["-O2"])
            .vendor(PackageFixture::new("Alpha").nested(PackageFixture::new("Beta")))
            .remote(PackageFixture::new("Delta").flags(&["-DDELTA"]));
        let (_tmp, root) = fixture.write();

        assert!(root.join(MANIFEST_NAME).is_file());
        assert!(root.join("lib/vendor/Alpha/lib/Beta").is_dir());
        assert!(!root.join("lib/vendor/Alpha").join(MANIFEST_NAME).exists());
        assert!(root.join("lib/remote/Delta").join(MANIFEST_NAME).is_file());

        let project = fixture.load(&root);
        assert_eq!(project.name(), "blink");
        assert_eq!(project.targets().len(), 1);
        let overrides = project.manifest().dependency_overrides();
        assert_eq!(overrides["Alpha"].as_slice(), ["-O2"]);
        assert_eq!(overrides, fixture.overrides());
    }
}
