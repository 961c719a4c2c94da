//! Data package locator.
//!
//! Linguistic data ships the way NLTK distributes it: a package is either an
//! unpacked directory (`corpora/wordnet/index.noun`) or a zip archive whose
//! members live under the package name (`corpora/wordnet.zip` containing
//! `wordnet/index.noun`). [`find_resource`] resolves a package against a list
//! of search roots and hands back a [`ResourceSource`] that reads members
//! from either form.

use std::{
    fs::File,
    io::Read,
    path::PathBuf,
};

use anyhow::{Context, Result};
use log::debug;
use zip::ZipArchive;

use crate::error::ResourceError;

// ─────────────────────────────────────────────────────────────────────────────
// ResourceSource
// ─────────────────────────────────────────────────────────────────────────────

/// Where a located package's files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// Unpacked package directory.
    Dir(PathBuf),
    /// Zip archive; members are looked up as `<prefix>/<name>`.
    Zip { archive: PathBuf, prefix: String },
}

impl ResourceSource {
    /// Read one member of the package as UTF-8 text.
    pub fn read_to_string(&self, name: &str) -> Result<String> {
        match self {
            ResourceSource::Dir(dir) => {
                let path = dir.join(name);
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read resource file: {}", path.display()))
            }
            ResourceSource::Zip { archive, prefix } => {
                let file = File::open(archive)
                    .with_context(|| format!("Cannot open archive: {}", archive.display()))?;
                let mut zip = ZipArchive::new(file)
                    .with_context(|| format!("Cannot open ZIP archive: {}", archive.display()))?;

                let member = if prefix.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", prefix, name)
                };
                let mut entry = zip.by_name(&member).with_context(|| {
                    format!("'{}' not found in {}", member, archive.display())
                })?;

                let mut buf = String::with_capacity(entry.size() as usize);
                entry
                    .read_to_string(&mut buf)
                    .with_context(|| format!("Failed to read ZIP entry '{}'", member))?;
                Ok(buf)
            }
        }
    }

    /// `true` if the package contains a member called `name`.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            ResourceSource::Dir(dir) => dir.join(name).is_file(),
            ResourceSource::Zip { archive, prefix } => {
                let Ok(file) = File::open(archive) else {
                    return false;
                };
                let Ok(mut zip) = ZipArchive::new(file) else {
                    return false;
                };
                let member = if prefix.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", prefix, name)
                };
                zip.by_name(&member).map(|_| ()).is_ok()
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Locate `<category>/<package>` under the first search root that has it.
///
/// Each root is probed for the unpacked directory first, then for
/// `<package>.zip`. Missing roots are skipped silently.
///
/// # Example
/// ```no_run
/// use std::path::PathBuf;
/// let src = tweetprep::resource::find_resource(
///     &[PathBuf::from("/usr/share/nltk_data")],
///     "corpora",
///     "wordnet",
/// ).unwrap();
/// let index = src.read_to_string("index.noun").unwrap();
/// ```
pub fn find_resource(
    search_paths: &[PathBuf],
    category: &str,
    package: &str,
) -> Result<ResourceSource> {
    for root in search_paths {
        let dir = root.join(category).join(package);
        if dir.is_dir() {
            debug!("resource {}/{} → {}", category, package, dir.display());
            return Ok(ResourceSource::Dir(dir));
        }

        let archive = root.join(category).join(format!("{}.zip", package));
        if archive.is_file() {
            debug!("resource {}/{} → {}", category, package, archive.display());
            return Ok(ResourceSource::Zip {
                archive,
                prefix: package.to_string(),
            });
        }
    }

    Err(ResourceError::NotFound {
        resource: format!("{}/{}", category, package),
        searched: search_paths.to_vec(),
    }
    .into())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_find_unpacked_directory() {
        let root = tempdir().unwrap();
        let pkg = root.path().join("corpora").join("wordnet");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("index.noun"), "cat n 1 0 1 0 02121620\n").unwrap();

        let src = find_resource(&[root.path().to_path_buf()], "corpora", "wordnet").unwrap();
        assert_eq!(src, ResourceSource::Dir(pkg));
        assert!(src.contains("index.noun"));
        assert!(src.read_to_string("index.noun").unwrap().starts_with("cat"));
    }

    #[test]
    fn test_find_zip_archive() {
        let root = tempdir().unwrap();
        let cat_dir = root.path().join("corpora");
        std::fs::create_dir_all(&cat_dir).unwrap();

        let archive = cat_dir.join("wordnet.zip");
        let mut zip = zip::ZipWriter::new(File::create(&archive).unwrap());
        zip.start_file("wordnet/verb.exc", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"ran run\n").unwrap();
        zip.finish().unwrap();

        let src = find_resource(&[root.path().to_path_buf()], "corpora", "wordnet").unwrap();
        assert!(matches!(src, ResourceSource::Zip { .. }));
        assert!(src.contains("verb.exc"));
        assert!(!src.contains("noun.exc"));
        assert_eq!(src.read_to_string("verb.exc").unwrap(), "ran run\n");
    }

    #[test]
    fn test_not_found_lists_searched_paths() {
        let root = tempdir().unwrap();
        let roots = vec![root.path().to_path_buf(), PathBuf::from("/nonexistent/nltk_data")];
        let err = find_resource(&roots, "taggers", "missing").unwrap_err();
        match err.downcast_ref::<ResourceError>() {
            Some(ResourceError::NotFound { resource, searched }) => {
                assert_eq!(resource, "taggers/missing");
                assert_eq!(searched, &roots);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_first_root_wins() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        for root in [a.path(), b.path()] {
            std::fs::create_dir_all(root.join("corpora").join("wordnet")).unwrap();
        }
        let src = find_resource(
            &[a.path().to_path_buf(), b.path().to_path_buf()],
            "corpora",
            "wordnet",
        )
        .unwrap();
        assert_eq!(src, ResourceSource::Dir(a.path().join("corpora").join("wordnet")));
    }
}
