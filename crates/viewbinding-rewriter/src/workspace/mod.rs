//! On-disk [`Host`] implementation over a Gradle project tree.
//!
//! Sources are read once at open time and kept in memory; transactions edit
//! the in-memory copy and [`Workspace::persist`] is the only path to disk.
//! Every committed transaction bumps a generation counter and queues the file
//! for re-indexing on a background task; the index is fresh once the indexed
//! generation catches up.

pub mod index;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{IndexingSettings, Settings};
use crate::error::{RewriteError, RewriteResult};
use crate::format::format_source;
use crate::host::{FieldId, Host, ModuleId, Reference};
use crate::model::{CompilationUnit, Visibility};
use crate::vfs::{FileId, normalized_path};

pub use index::{Occurrence, Qualifier, ReferenceIndex};

const GRADLE_BUILD_FILES: &[&str] = &["build.gradle", "build.gradle.kts"];
const KOTLIN_EXTENSION: &str = "kt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Write,
    /// Everything runs, nothing is written.
    DryRun,
}

#[derive(Debug, Clone)]
struct SourceFile {
    path: PathBuf,
    original: String,
    current: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct IndexState {
    generation: u64,
    indexed: u64,
}

impl IndexState {
    fn is_fresh(&self) -> bool {
        self.indexed >= self.generation
    }
}

type IndexRequest = (FileId, u64);

/// A file whose in-memory text differs from what was read at open time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub file: FileId,
    pub path: PathBuf,
    pub original: String,
    pub current: String,
}

pub struct Workspace {
    root: PathBuf,
    settings: Settings,
    mode: WriteMode,
    modules: BTreeMap<ModuleId, Vec<FileId>>,
    files: Arc<DashMap<FileId, SourceFile>>,
    index: Arc<ReferenceIndex>,
    state: Arc<watch::Sender<IndexState>>,
    requests: mpsc::UnboundedSender<IndexRequest>,
    transaction: Mutex<()>,
}

impl Workspace {
    /// Scans `root` for Gradle modules and their Kotlin sources and indexes them.
    pub async fn open(
        root: &Path,
        settings: Settings,
        mode: WriteMode,
    ) -> RewriteResult<Self> {
        let root = normalized_path(root);
        tokio::fs::metadata(&root).await.map_err(|source| RewriteError::io(&root, source))?;

        let scan = scan_tree(&root, &settings.indexing);
        let mut modules: BTreeMap<ModuleId, Vec<FileId>> = BTreeMap::new();
        let mut sources = Vec::new();
        for (module, path) in scan {
            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(error) => {
                    warn!("skipping unreadable source {}: {error}", path.display());
                    continue;
                },
            };
            let file = FileId::from_path(&path);
            modules.entry(module).or_default().push(file.clone());
            sources.push((file, path, text));
        }
        for files in modules.values_mut() {
            files.sort();
        }

        info!(
            "opened {} with {} module(s) and {} Kotlin file(s)",
            root.display(),
            modules.len(),
            sources.len()
        );
        Ok(Self::build(root, settings, mode, modules, sources))
    }

    /// A workspace over in-memory sources; nothing is ever written to disk.
    ///
    /// Spawns the indexer, so it must be called inside a tokio runtime.
    pub fn in_memory(
        settings: Settings,
        sources: impl IntoIterator<Item = (ModuleId, FileId, String)>,
    ) -> Self {
        let mut modules: BTreeMap<ModuleId, Vec<FileId>> = BTreeMap::new();
        let mut files = Vec::new();
        for (module, file, text) in sources {
            modules.entry(module).or_default().push(file.clone());
            let path = file.as_path().to_path_buf();
            files.push((file, path, text));
        }
        for ids in modules.values_mut() {
            ids.sort();
        }
        Self::build(PathBuf::new(), settings, WriteMode::DryRun, modules, files)
    }

    fn build(
        root: PathBuf,
        settings: Settings,
        mode: WriteMode,
        modules: BTreeMap<ModuleId, Vec<FileId>>,
        sources: Vec<(FileId, PathBuf, String)>,
    ) -> Self {
        let files = Arc::new(DashMap::new());
        let index = Arc::new(ReferenceIndex::new());
        for (file, path, text) in sources {
            index.update(file.clone(), &text);
            files.insert(file, SourceFile {
                path,
                original: text.clone(),
                current: text,
            });
        }

        let (state, _) = watch::channel(IndexState::default());
        let state = Arc::new(state);
        let requests = spawn_indexer(Arc::clone(&files), Arc::clone(&index), Arc::clone(&state));

        Self {
            root,
            settings,
            mode,
            modules,
            files,
            index,
            state,
            requests,
            transaction: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Current in-memory text of a file.
    pub fn text(
        &self,
        file: &FileId,
    ) -> Option<String> {
        self.files.get(file).map(|entry| entry.current.clone())
    }

    /// Files changed since open, sorted by id.
    pub fn changes(&self) -> Vec<FileChange> {
        let mut changes: Vec<FileChange> = self
            .files
            .iter()
            .filter(|entry| entry.current != entry.original)
            .map(|entry| FileChange {
                file: entry.key().clone(),
                path: entry.path.clone(),
                original: entry.original.clone(),
                current: entry.current.clone(),
            })
            .collect();
        changes.sort_by(|a, b| a.file.cmp(&b.file));
        changes
    }

    /// Stores `text` as the current content of `file` and queues a re-index.
    fn commit(
        &self,
        file: &FileId,
        text: String,
    ) -> RewriteResult<()> {
        {
            let mut entry = self.files.get_mut(file).ok_or_else(|| RewriteError::UnknownFile(file.clone()))?;
            entry.current = text;
        }
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
        });
        self.requests.send((file.clone(), generation)).map_err(|_| RewriteError::IndexUnavailable)
    }
}

impl Host for Workspace {
    fn modules(&self) -> Vec<ModuleId> {
        self.modules.keys().cloned().collect()
    }

    fn enumerate_source_files(
        &self,
        module: &ModuleId,
    ) -> Vec<FileId> {
        self.modules.get(module).cloned().unwrap_or_default()
    }

    fn load(
        &self,
        file: &FileId,
    ) -> RewriteResult<CompilationUnit> {
        let text = self.text(file).ok_or_else(|| RewriteError::UnknownFile(file.clone()))?;
        Ok(CompilationUnit::parse(file.clone(), &text))
    }

    fn find_references(
        &self,
        field: &FieldId,
    ) -> Vec<Reference> {
        let Ok(unit) = self.load(&field.file) else {
            return Vec::new();
        };
        let Some(class) = unit.class(&field.class) else {
            return Vec::new();
        };
        let Some(declaration) = class.field(&field.name) else {
            return Vec::new();
        };

        let mut references = BTreeSet::new();
        for occurrence in self.index.occurrences(&field.file, &field.name) {
            let unqualified = matches!(occurrence.qualifier, Qualifier::None | Qualifier::This);
            if unqualified && class.range.contains_range(occurrence.range) && occurrence.range != declaration.name_range {
                references.insert(Reference {
                    file: field.file.clone(),
                    range: occurrence.range,
                });
            }
        }

        // Member accesses through a receiver typed as the declaring class.
        if declaration.visibility != Visibility::Private {
            for file in self.index.files_mentioning(&field.name) {
                for occurrence in self.index.occurrences(&file, &field.name) {
                    if let Qualifier::Member {
                        receiver: Some(receiver),
                    } = &occurrence.qualifier
                        && self.index.declares_typed(&file, receiver, &class.name)
                    {
                        references.insert(Reference {
                            file: file.clone(),
                            range: occurrence.range,
                        });
                    }
                }
            }
        }

        trace!("{} reference(s) to {}.{}", references.len(), field.class, field.name);
        references.into_iter().collect()
    }

    async fn wait_for_index_fresh(&self) -> RewriteResult<()> {
        let mut receiver = self.state.subscribe();
        receiver.wait_for(IndexState::is_fresh).await.map(|_| ()).map_err(|_| RewriteError::IndexUnavailable)
    }

    async fn run_atomic<F>(
        &self,
        file: &FileId,
        label: &str,
        body: F,
    ) -> RewriteResult<CompilationUnit>
    where
        F: FnOnce(&CompilationUnit) -> RewriteResult<String> + Send,
    {
        let _guard = self.transaction.lock().await;
        let unit = self.load(file)?;
        let text = match body(&unit) {
            Ok(text) => text,
            Err(error) => {
                debug!("transaction `{label}` on {file} rolled back: {error}");
                return Err(error);
            },
        };
        if text == unit.text() {
            debug!("transaction `{label}` on {file} made no changes");
            return Ok(unit);
        }
        self.commit(file, text.clone())?;
        debug!("transaction `{label}` committed on {file}");
        Ok(unit.with_text(&text))
    }

    async fn persist(
        &self,
        file: &FileId,
    ) -> RewriteResult<bool> {
        let (path, original, current) = {
            let entry = self.files.get(file).ok_or_else(|| RewriteError::UnknownFile(file.clone()))?;
            (entry.path.clone(), entry.original.clone(), entry.current.clone())
        };
        if current == original {
            return Ok(false);
        }

        let formatted = format_source(&current, &self.settings.formatting).await;
        if formatted != current {
            let _guard = self.transaction.lock().await;
            self.commit(file, formatted.clone())?;
        }
        if formatted == original {
            return Ok(false);
        }

        match self.mode {
            WriteMode::Write => {
                tokio::fs::write(&path, formatted.as_bytes()).await.map_err(|source| RewriteError::io(&path, source))?;
                info!("wrote {}", path.display());
            },
            WriteMode::DryRun => debug!("dry run: not writing {}", path.display()),
        }
        Ok(true)
    }
}

/// Re-indexes committed files until every sender is dropped.
fn spawn_indexer(
    files: Arc<DashMap<FileId, SourceFile>>,
    index: Arc<ReferenceIndex>,
    state: Arc<watch::Sender<IndexState>>,
) -> mpsc::UnboundedSender<IndexRequest> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<IndexRequest>();
    tokio::spawn(async move {
        while let Some((file, generation)) = receiver.recv().await {
            let text = files.get(&file).map(|entry| entry.current.clone());
            match text {
                Some(text) => index.update(file, &text),
                None => index.remove(&file),
            }
            state.send_modify(|state| state.indexed = state.indexed.max(generation));
        }
    });
    sender
}

/// Kotlin sources under `root` paired with their nearest enclosing module, in path order.
fn scan_tree(
    root: &Path,
    indexing: &IndexingSettings,
) -> Vec<(ModuleId, PathBuf)> {
    let max_file_size_bytes = indexing.max_file_size_bytes();
    let mut module_dirs: Vec<PathBuf> = Vec::new();
    let mut sources = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| should_descend(entry, root, indexing))
        .filter_map(|entry| entry.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        if GRADLE_BUILD_FILES.contains(&file_name.as_ref()) {
            if let Some(dir) = path.parent() {
                module_dirs.push(dir.to_path_buf());
            }
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == KOTLIN_EXTENSION) {
            continue;
        }
        if let Ok(metadata) = entry.metadata()
            && metadata.len() > max_file_size_bytes
        {
            warn!("skipping large source file ({} bytes): {}", metadata.len(), path.display());
            continue;
        }
        sources.push(path.to_path_buf());
    }

    sources
        .into_iter()
        .map(|path| {
            let module = module_dirs
                .iter()
                .filter(|dir| path.starts_with(dir))
                .max_by_key(|dir| dir.components().count())
                .map_or_else(ModuleId::root, |dir| module_id_for(root, dir));
            (module, path)
        })
        .collect()
}

fn should_descend(
    entry: &DirEntry,
    root: &Path,
    indexing: &IndexingSettings,
) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    let relative = relative_slash_path(root, entry.path());
    !indexing.is_excluded(&name, &relative)
}

/// `<root>/feature/login` -> `feature:login`; `<root>` -> `:`.
fn module_id_for(
    root: &Path,
    dir: &Path,
) -> ModuleId {
    let relative = relative_slash_path(root, dir);
    ModuleId::new(&relative.replace('/', ":"))
}

fn relative_slash_path(
    root: &Path,
    path: &Path,
) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "../../tests/src/workspace/workspace_tests.rs"]
mod tests;
