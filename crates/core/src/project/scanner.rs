use crate::config::DiscoveryOptions;
use crate::error::{DiscoveryError, Result};
use modscope_api::Warning;
use modscope_plugin::FileMatcherCap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct Scanner;

impl Scanner {
    /// Every file under `root` accepted by `matcher`, depth-first in file-name
    /// order. An unreadable root is fatal; unreadable entries below it become
    /// warnings.
    pub fn collect_paths(
        root: &Path,
        matcher: &dyn FileMatcherCap,
        options: &DiscoveryOptions,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !options.is_skipped_dir(&e.file_name().to_string_lossy())
            });

        for entry in walker {
            if options.is_cancelled() {
                return Err(DiscoveryError::Cancelled);
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory loop at project root"));
                    return Err(DiscoveryError::io(path, source));
                }
                Err(e) => {
                    warnings.push(Warning::Unreadable {
                        path: e.path().unwrap_or(root).to_path_buf(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if entry.file_type().is_file() && matcher.supports_path(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }

    /// Immediate subdirectories of `dir` in file-name order, hidden ones excluded.
    pub fn list_dirs(dir: &Path, warnings: &mut Vec<Warning>) -> std::io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = Self::read_entries(dir, warnings)?
            .into_iter()
            .filter(|(_, file_type)| file_type.is_dir())
            .map(|(path, _)| path)
            .filter(|p| {
                !p.file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            })
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    /// Immediate files of `dir` accepted by `matcher`, in file-name order.
    pub fn list_files(
        dir: &Path,
        matcher: &dyn FileMatcherCap,
        warnings: &mut Vec<Warning>,
    ) -> std::io::Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = Self::read_entries(dir, warnings)?
            .into_iter()
            .filter(|(_, file_type)| file_type.is_file())
            .map(|(path, _)| path)
            .filter(|p| matcher.supports_path(p))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Entries of `dir` with their types. Failing to open `dir` is an error;
    /// entries that cannot be read become warnings.
    fn read_entries(
        dir: &Path,
        warnings: &mut Vec<Warning>,
    ) -> std::io::Result<Vec<(PathBuf, fs::FileType)>> {
        let entries = keep_readable(dir, fs::read_dir(dir)?, warnings);
        let mut typed = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.file_type() {
                Ok(file_type) => typed.push((entry.path(), file_type)),
                Err(e) => warnings.push(Warning::Unreadable {
                    path: entry.path(),
                    reason: e.to_string(),
                }),
            }
        }
        Ok(typed)
    }
}

fn keep_readable<T>(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<T>>,
    warnings: &mut Vec<Warning>,
) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warnings.push(Warning::Unreadable {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                });
                None
            }
        })
        .collect()
}
