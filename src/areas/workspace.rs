//! Working directory access and tree replication
//!
//! All paths handed out by this module are relative to the tree root they were listed
//! from. Ignore rules are always evaluated against such relative paths, so the same
//! rules apply to the working directory and to a snapshot store.

use anyhow::Context;
use colored::Colorize;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Ignore files consulted in order; the first one present wins.
const IGNORE_FILES: [&str; 2] = [".mygitignore", ".gitignore"];
/// Directory names excluded regardless of ignore files.
const ALWAYS_IGNORED: [&str; 2] = [".mygit", ".git"];

/// Exclusion patterns loaded from the repository root.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let mut builder = GitignoreBuilder::new(root);

        if let Some(ignore_file) = IGNORE_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
            && let Some(err) = builder.add(&ignore_file)
        {
            return Err(err).with_context(|| {
                format!("failed to parse ignore file {}", ignore_file.display())
            });
        }

        Ok(IgnoreRules {
            matcher: builder.build()?,
        })
    }

    /// Rules that only exclude the always-ignored directories.
    pub fn empty() -> Self {
        IgnoreRules {
            matcher: Gitignore::empty(),
        }
    }

    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        let always_ignored = rel_path.components().any(|component| match component {
            Component::Normal(name) => ALWAYS_IGNORED.contains(&name.to_string_lossy().as_ref()),
            _ => false,
        });

        always_ignored
            || self
                .matcher
                .matched_path_or_any_parents(rel_path, is_dir)
                .is_ignore()
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ignore_rules(&self) -> anyhow::Result<IgnoreRules> {
        IgnoreRules::load(&self.path)
    }

    /// Every non-ignored regular file of the working directory.
    pub fn list_files(&self, rules: &IgnoreRules) -> anyhow::Result<Vec<PathBuf>> {
        list_tree(&self.path, rules)
    }

    /// Expand a path relative to the root: a file lists itself, a directory lists the
    /// non-ignored files below it.
    pub fn list_under(&self, rel_path: &Path, rules: &IgnoreRules) -> anyhow::Result<Vec<PathBuf>> {
        let absolute = self.path.join(rel_path);

        if absolute.is_dir() {
            Ok(list_tree(&self.path, rules)?
                .into_iter()
                .filter(|path| path.starts_with(rel_path))
                .collect())
        } else {
            Ok(vec![rel_path.to_path_buf()])
        }
    }

    pub fn is_file(&self, rel_path: &Path) -> bool {
        self.path.join(rel_path).is_file()
    }

    pub fn read_file(&self, rel_path: &Path) -> anyhow::Result<String> {
        read_text(&self.path.join(rel_path))
    }

    /// Resolve a user supplied path (absolute or relative to the current directory)
    /// to a path relative to the workspace root.
    pub fn relativize(&self, user_path: &Path) -> anyhow::Result<PathBuf> {
        let absolute = if user_path.is_absolute() {
            user_path.to_path_buf()
        } else {
            std::env::current_dir()?.join(user_path)
        };
        let absolute = normalize(&absolute);

        absolute
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| {
                anyhow::anyhow!(
                    "path '{}' is outside repository at '{}'",
                    user_path.display(),
                    self.path.display()
                )
            })
    }

    /// Make the working directory mirror `src`, leaving ignored entries alone.
    pub fn sync_from(&self, src: &Path, rules: &IgnoreRules) -> anyhow::Result<()> {
        sync_tree(src, &self.path, rules)
    }
}

/// Read a file as text, replacing invalid UTF-8 sequences.
pub fn read_text(path: &Path) -> anyhow::Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// List the non-ignored regular files below `root`, sorted, relative to `root`.
///
/// Symbolic links and other non-regular entries are skipped with a warning.
pub fn list_tree(root: &Path, rules: &IgnoreRules) -> anyhow::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| not_ignored(root, entry.path(), entry.file_type().is_dir(), rules));

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            continue;
        }

        let rel_path = entry.path().strip_prefix(root)?.to_path_buf();
        if file_type.is_file() {
            files.push(rel_path);
        } else {
            warn_non_regular(&rel_path);
        }
    }

    Ok(files)
}

/// Recursively copy `src` into `dest`, creating directories as needed.
///
/// With `ignore` set, entries matching the rules are skipped; their relative path is
/// computed against the supplied resolution root rather than `src` so that copying a
/// subtree still honours top-level patterns.
pub fn copy_tree(
    src: &Path,
    dest: &Path,
    ignore: Option<(&IgnoreRules, &Path)>,
) -> anyhow::Result<()> {
    if !src.exists() {
        anyhow::bail!("source tree '{}' not found", src.display());
    }

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create directory {}", dest.display()))?;

    let walker = WalkDir::new(src)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| match ignore {
            Some((rules, resolution_root)) => not_ignored(
                resolution_root,
                entry.path(),
                entry.file_type().is_dir(),
                rules,
            ),
            None => true,
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        let rel_path = entry.path().strip_prefix(src)?;
        let target = dest.join(rel_path);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if target.is_file() {
                std::fs::remove_file(&target)?;
            }
            std::fs::create_dir_all(&target)
                .with_context(|| format!("failed to create directory {}", target.display()))?;
        } else if file_type.is_file() {
            if target.is_dir() {
                std::fs::remove_dir_all(&target)?;
            }
            std::fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        } else {
            warn_non_regular(rel_path);
        }
    }

    Ok(())
}

/// Make `dest` an exact mirror of `src`: copy everything over, then delete the
/// non-ignored files of `dest` that `src` lacks and prune directories left empty.
pub fn sync_tree(src: &Path, dest: &Path, rules: &IgnoreRules) -> anyhow::Result<()> {
    copy_tree(src, dest, Some((rules, src)))?;

    let wanted = list_tree(src, rules)?.into_iter().collect::<BTreeSet<_>>();

    for stale in list_tree(dest, rules)?
        .into_iter()
        .filter(|path| !wanted.contains(path))
    {
        let target = dest.join(&stale);
        std::fs::remove_file(&target)
            .with_context(|| format!("failed to remove {}", target.display()))?;
    }

    prune_empty_dirs(dest, rules)
}

fn prune_empty_dirs(root: &Path, rules: &IgnoreRules) -> anyhow::Result<()> {
    let dirs = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| not_ignored(root, entry.path(), entry.file_type().is_dir(), rules))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();

    // reversed pre-order visits children before their parents
    for dir in dirs.into_iter().rev() {
        if dir.read_dir()?.next().is_none() {
            std::fs::remove_dir(&dir)
                .with_context(|| format!("failed to remove directory {}", dir.display()))?;
        }
    }

    Ok(())
}

fn not_ignored(root: &Path, path: &Path, is_dir: bool, rules: &IgnoreRules) -> bool {
    match path.strip_prefix(root) {
        Ok(rel_path) if rel_path.as_os_str().is_empty() => true,
        Ok(rel_path) => !rules.is_ignored(rel_path, is_dir),
        Err(_) => true,
    }
}

fn warn_non_regular(rel_path: &Path) {
    eprintln!(
        "{} skipping '{}': not a regular file",
        "warning:".yellow().bold(),
        rel_path.display()
    );
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut acc, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    acc.pop();
                }
                other => acc.push(other.as_os_str()),
            }
            acc
        })
}
