//! Executable resolution against the search path.
//!
//! Mirrors Unix `execvp` semantics: a name containing a path separator is
//! checked directly against the filesystem, anything else is searched for in
//! each `PATH` directory in order. The current directory is searched only
//! when `PATH` names it, explicitly or as an empty entry.

use std::env;
use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::error::{PtimeError, Result};

/// Resolves a command name to the path of an executable file.
///
/// # Errors
///
/// Returns `PtimeError::CommandNotFound` if no match exists. The caller is
/// expected to report exit code 127 without starting a child.
pub fn lookup(name: &str) -> Result<PathBuf> {
    let path = env::var_os("PATH").unwrap_or_default();
    lookup_in(name, &path)
}

/// Like [`lookup`], but against an explicit `PATH`-style directory list.
pub fn lookup_in(name: &str, path: &OsStr) -> Result<PathBuf> {
    if name.contains('/') {
        let candidate = PathBuf::from(name);
        if is_executable(&candidate) {
            return Ok(candidate);
        }
        return Err(PtimeError::CommandNotFound(name.to_string()));
    }

    for dir in env::split_paths(path) {
        // An empty PATH entry means the current directory, per execvp
        let dir = if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        };
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Ok(candidate);
        }
    }

    Err(PtimeError::CommandNotFound(name.to_string()))
}

/// A candidate matches if it is a regular file with any execute bit set.
fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
