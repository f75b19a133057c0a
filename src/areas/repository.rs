use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::snapshot::revision::Revision;
use crate::artifacts::status::status_info::Status;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const METADATA_DIR: &str = ".mygit";
const STAGING_FILE: &str = "STAGING";
const REPO_DIR: &str = "REPO";

/// Explicit repository context, built once per invocation and passed to every command.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open (or prepare to initialize) the repository rooted exactly at `path`.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
        }
        let path = path.canonicalize()?;
        let metadata = path.join(METADATA_DIR);

        let index = Index::new(metadata.join(STAGING_FILE).into_boxed_path());
        let database = Database::new(metadata.join(REPO_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    /// Open the repository enclosing `start`, walking up its ancestors.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let root = Self::find_root(start)
            .ok_or_else(|| RepositoryError::NotARepository(start.display().to_string()))?;

        Self::new(&root, writer)
    }

    /// Nearest ancestor of `start` (inclusive) holding the metadata directory.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        let start = start.canonicalize().ok()?;

        start
            .ancestors()
            .find(|dir| dir.join(METADATA_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn working_status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    /// The revision materialized in the working directory: HEAD's revision, else the
    /// active branch's tip, `None` before the first commit.
    pub fn working_version(&self) -> anyhow::Result<Option<Revision>> {
        let head = self.refs.read_head()?;

        match head.revision {
            Some(revision) => Ok(Some(revision)),
            None => self.refs.tip(&self.refs.active_token()?),
        }
    }
}
