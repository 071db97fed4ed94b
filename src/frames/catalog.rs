//! Local asset catalog source
//!
//! Layout: `<root>/<model>/<exterior>/<frames>`, e.g. `assets/k9/abp/k9_012.png`.
//! Every image file in the folder is a frame; order comes from the number
//! embedded in the file name (last digit run of the stem), not from the
//! directory listing.

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use super::{FrameSource, ResolveError};
use crate::subject::Subject;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit regex"));

/// Enumerates frames from a folder per subject
#[derive(Debug, Clone)]
pub struct CatalogSource {
    root: PathBuf,
    /// Public origin the catalog is served from; None = file URIs
    base_url: Option<String>,
}

impl CatalogSource {
    pub fn new(root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.map(|b| b.trim_end_matches('/').to_string()),
        }
    }

    /// Folder holding the frames of `subject`
    pub fn subject_dir(&self, subject: &Subject) -> PathBuf {
        self.root.join(&subject.model).join(&subject.exterior_color)
    }

    fn frame_id(&self, subject: &Subject, path: &Path, file_name: &str) -> String {
        match &self.base_url {
            Some(base) => format!(
                "{}/{}/{}/{}",
                base, subject.model, subject.exterior_color, file_name
            ),
            None => file_uri(path),
        }
    }
}

impl FrameSource for CatalogSource {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn try_resolve(&self, subject: &Subject) -> Result<Vec<String>, ResolveError> {
        subject.validate()?;

        let dir = self.subject_dir(subject);
        if !dir.is_dir() {
            return Err(ResolveError::Catalog(format!(
                "No catalog folder: {}",
                dir.display()
            )));
        }

        let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
        let mut frames: Vec<(u64, String, PathBuf)> = Vec::new();
        for path in glob_paths(&pattern)? {
            if !path.is_file() || !is_image(&path) {
                trace!("Skipping non-image {}", path.display());
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            frames.push((frame_number(&path), name.to_string(), path.clone()));
        }

        frames.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        debug!("Catalog {}: {} frames", dir.display(), frames.len());

        Ok(frames
            .iter()
            .map(|(_, name, path)| self.frame_id(subject, path, name))
            .collect())
    }
}

/// Expand a glob pattern into a list of paths
fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>, ResolveError> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)
        .map_err(|e| ResolveError::Catalog(format!("Glob error for pattern {}: {}", pattern, e)))?
    {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => return Err(ResolveError::Catalog(format!("Glob entry error: {}", e))),
        }
    }
    Ok(paths)
}

fn is_image(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

/// Frame number from file stem: last digit run, 0 if none.
///
/// Example: "k9_abp_012.png" -> 12, "front.png" -> 0
fn frame_number(path: &Path) -> u64 {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| DIGITS.find_iter(stem).last())
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn file_uri(path: &Path) -> String {
    let abs = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", abs.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn catalog_with(files: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("k9").join("swp");
        fs::create_dir_all(&dir).unwrap();
        for f in files {
            touch(&dir, f);
        }
        (tmp, dir)
    }

    #[test]
    fn test_frame_number() {
        assert_eq!(frame_number(Path::new("/a/k9/swp/10.png")), 10);
        assert_eq!(frame_number(Path::new("k9_swp_007.png")), 7);
        assert_eq!(frame_number(Path::new("front.png")), 0);
    }

    #[test]
    fn test_numeric_order_not_lexical() {
        let (tmp, _) = catalog_with(&["10.png", "2.png", "1.png", "notes.txt", "33.jpg"]);
        let src = CatalogSource::new(tmp.path(), Some("http://cdn.test/".into()));

        let frames = src.try_resolve(&Subject::new("k9", "swp")).unwrap();
        assert_eq!(
            frames,
            [
                "http://cdn.test/k9/swp/1.png",
                "http://cdn.test/k9/swp/2.png",
                "http://cdn.test/k9/swp/10.png",
                "http://cdn.test/k9/swp/33.jpg",
            ]
        );
    }

    #[test]
    fn test_file_uris_without_base() {
        let (tmp, _) = catalog_with(&["1.png", "2.png"]);
        let src = CatalogSource::new(tmp.path(), None);
        let frames = src.try_resolve(&Subject::new("k9", "swp")).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].starts_with("file://"));
        assert!(frames[0].ends_with("1.png"));
    }

    #[test]
    fn test_unknown_subject_is_empty() {
        let (tmp, _) = catalog_with(&["1.png"]);
        let src = CatalogSource::new(tmp.path(), None);
        let subject = Subject::new("k9", "zzz");
        assert!(src.try_resolve(&subject).is_err());
        assert!(src.resolve(&subject).is_empty());
    }

    #[test]
    fn test_malformed_subject_rejected() {
        let (tmp, _) = catalog_with(&["1.png"]);
        let src = CatalogSource::new(tmp.path(), None);
        let err = src.try_resolve(&Subject::new("..", "swp")).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSubject(_)));
    }

    #[test]
    fn test_empty_folder() {
        let (tmp, _) = catalog_with(&[]);
        let src = CatalogSource::new(tmp.path(), None);
        assert_eq!(src.try_resolve(&Subject::new("k9", "swp")).unwrap().len(), 0);
    }
}
