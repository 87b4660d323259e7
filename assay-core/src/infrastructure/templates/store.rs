// assay-core/src/infrastructure/templates/store.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::error::DomainError;
use crate::domain::template::{Params, parse_template, substitute_params};
use crate::error::AssayError;
use crate::infrastructure::error::InfrastructureError;

/// One parsed template file. Immutable until the store's cache is cleared.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    /// Name the file was first requested under.
    pub name: String,
    pub path: PathBuf,
    pub raw: String,
    pub queries: BTreeMap<String, String>,
}

/// A named query as parsed, tied to the file it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySpec<'a> {
    pub name: &'a str,
    pub body: &'a str,
    pub file: &'a Path,
}

impl TemplateFile {
    pub fn query_specs(&self) -> impl Iterator<Item = QuerySpec<'_>> {
        self.queries.iter().map(|(name, body)| QuerySpec {
            name,
            body,
            file: &self.path,
        })
    }
}

/// Per-file cache of annotated SQL templates, keyed by resolved path so
/// `checks.sql` and `./checks.sql` share one entry.
///
/// Plain maps, no locking: share across threads behind your own `Mutex`.
#[derive(Debug, Default)]
pub struct TemplateStore {
    base_dir: PathBuf,
    files: BTreeMap<PathBuf, TemplateFile>,
    last_loaded: Option<PathBuf>,
}

impl TemplateStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files: BTreeMap::new(),
            last_loaded: None,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    // Canonical when the file exists, lexically cleaned (`.` dropped) otherwise
    fn cache_key(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.components().collect())
    }

    /// Loads and parses `filename` unless already cached. Either way it
    /// becomes the default file for `get_query`.
    #[instrument(skip(self))]
    pub fn load_file(&mut self, filename: &str) -> Result<&BTreeMap<String, String>, AssayError> {
        let path = self.resolve(filename);
        let key = Self::cache_key(&path);

        if !self.files.contains_key(&key) {
            if !path.is_file() {
                return Err(InfrastructureError::TemplateFileNotFound(path).into());
            }

            let raw = fs::read_to_string(&path).map_err(InfrastructureError::Io)?;
            let queries = parse_template(&raw);
            info!(path = ?path, queries = queries.len(), "Template file parsed");

            let file = TemplateFile {
                name: filename.to_string(),
                path,
                raw,
                queries,
            };
            self.files.insert(key.clone(), file);
        } else {
            debug!("Template file served from cache");
        }

        let queries = self
            .files
            .get(&key)
            .map(|f| &f.queries)
            .ok_or_else(|| AssayError::InternalError(format!("template cache lost '{}'", filename)))?;
        self.last_loaded = Some(key);
        Ok(queries)
    }

    /// Returns the named query, placeholders substituted when `params` is given.
    ///
    /// Without `filename`, the most recently loaded file is searched.
    pub fn get_query(
        &mut self,
        name: &str,
        filename: Option<&str>,
        params: Option<&Params>,
    ) -> Result<String, AssayError> {
        if let Some(f) = filename {
            self.load_file(f)?;
        }

        let file = self
            .last_loaded
            .as_ref()
            .and_then(|key| self.files.get(key))
            .ok_or(DomainError::NoTemplateLoaded)?;

        let body = file.queries.get(name).ok_or_else(|| DomainError::QueryNotFound {
            name: name.to_string(),
            file: file.name.clone(),
            available: file.queries.keys().cloned().collect(),
        })?;

        Ok(match params {
            Some(p) => substitute_params(body, p),
            None => body.clone(),
        })
    }

    /// Cached file names, sorted.
    pub fn list_files(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.values().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }

    pub fn list_queries(&mut self, filename: &str) -> Result<Vec<String>, AssayError> {
        Ok(self.load_file(filename)?.keys().cloned().collect())
    }

    pub fn file(&self, filename: &str) -> Option<&TemplateFile> {
        self.files.get(&Self::cache_key(&self.resolve(filename)))
    }

    /// Every cached file, in file-name order.
    pub fn files(&self) -> impl Iterator<Item = &TemplateFile> {
        let mut files: Vec<&TemplateFile> = self.files.values().collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        files.into_iter()
    }

    pub fn clear_cache(&mut self) {
        self.files.clear();
        self.last_loaded = None;
    }

    /// Loads every `*.sql` file under the base directory. Returns how many were loaded.
    pub fn preload(&mut self) -> Result<usize, AssayError> {
        if !self.base_dir.is_dir() {
            return Ok(0);
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.base_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("sql") {
                if let Ok(rel) = path.strip_prefix(&self.base_dir) {
                    names.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }

        for name in &names {
            self.load_file(name)?;
        }
        Ok(names.len())
    }
}
