use std::fmt;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{CoreError, CoreResult};

/// Where a document lives: a local file or an HTTP(S) URL.
///
/// Reference targets are resolved relative to the location of the document
/// that mentions them, so locations must compare equal whenever they point
/// at the same document. Paths are lexically normalized for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Path(PathBuf),
    Url(Url),
}

impl Location {
    /// Parse a raw file argument or reference target into a location.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw)
                .map_err(|e| CoreError::reference(format!("invalid URL '{}': {}", raw, e)))?;
            Ok(Location::Url(url))
        } else {
            Ok(Location::Path(normalize(Path::new(raw))))
        }
    }

    /// Resolve `target` relative to this location.
    ///
    /// Absolute HTTP(S) targets stand on their own. Relative targets resolve
    /// against the parent directory of a file location, or through standard
    /// URL joining for a remote location.
    pub fn join(&self, target: &str) -> CoreResult<Self> {
        if target.starts_with("http://") || target.starts_with("https://") {
            return Location::parse(target);
        }
        match self {
            Location::Path(path) => {
                let parent = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Location::Path(normalize(&parent.join(target))))
            }
            Location::Url(url) => {
                let joined = url.join(target).map_err(|e| {
                    CoreError::reference(format!("cannot resolve '{}' against {}: {}", target, url, e))
                })?;
                Ok(Location::Url(joined))
            }
        }
    }

    /// The filesystem path when the location is a local file.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Path(path) => Some(path.as_path()),
            Location::Url(_) => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{}", url),
        }
    }
}

// Lexical normalization only: `a/./b` and `a/x/../b` both become `a/b`
// without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    let mut out = PathBuf::new();
    for part in parts {
        out.push(part.as_os_str());
    }
    out
}
