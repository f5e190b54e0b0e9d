//! # Stub Options (.docstub.yml)
//!
//! Reading the options that shape generated comments. The file is looked up by
//! walking up the directory tree from the first root, falling back to the
//! user's home directory. Every key is optional.

use crate::errors::ServiceError;
use crate::scanner::ReturnTagPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

const OPTIONS_FILE_NAMES: [&str; 2] = [".docstub.yml", ".docstub.yaml"];

/// Options snapshot handed to every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StubOptions {
    /// Generate `///` stubs inside functions
    pub vsdoc_enabled: bool,
    /// Generate `/** */` stubs above functions
    pub jsdoc_enabled: bool,
    /// Continue doc comments when Enter is pressed inside them
    pub auto_new_line: bool,
    pub multi_line_summary: bool,
    pub return_tag: ReturnTagPolicy,
    /// Extra attributes written into `<returns>`
    pub return_attributes: String,
    pub multi_line_return: bool,
    /// Extra attributes written into every `<param>`
    pub param_attributes: String,
    pub multi_line_param: bool,
    /// Prefix JSDoc lines with ` * `
    pub use_asterisk: bool,
    pub use_spaces_for_tabs: bool,
    pub spaces_for_tabs_count: usize,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            vsdoc_enabled: true,
            jsdoc_enabled: true,
            auto_new_line: true,
            multi_line_summary: true,
            return_tag: ReturnTagPolicy::Auto,
            return_attributes: "type=\"\"".to_string(),
            multi_line_return: false,
            param_attributes: String::new(),
            multi_line_param: false,
            use_asterisk: true,
            use_spaces_for_tabs: true,
            spaces_for_tabs_count: 4,
        }
    }
}

impl StubOptions {
    pub fn from_file(path: &Path) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::Internal(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::from_yaml(&content)
    }

    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ServiceError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(ServiceError::from)
    }

    /// Find an options file by traversing up the directory tree
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ServiceError> {
        let mut current = start_dir;

        loop {
            for name in OPTIONS_FILE_NAMES {
                let options_path = current.join(name);
                if options_path.is_file() {
                    let options = Self::from_file(&options_path)?;
                    return Ok(Some((options_path, options)));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Ok(None)
    }

    /// One indentation unit.
    pub fn tab(&self) -> String {
        if self.use_spaces_for_tabs {
            " ".repeat(self.spaces_for_tabs_count)
        } else {
            "\t".to_string()
        }
    }
}

/// Where the options came from and how to find them again.
#[derive(Debug, Clone)]
pub enum OptionsSource {
    /// An explicit file that must exist.
    File(PathBuf),
    /// Discovered upward from this directory, then in the home directory.
    Discover(PathBuf),
}

impl OptionsSource {
    pub fn load(&self) -> Result<(Option<PathBuf>, StubOptions), ServiceError> {
        match self {
            OptionsSource::File(path) => {
                if !path.is_file() {
                    return Err(ServiceError::FileNotFound(path.clone()));
                }
                Ok((Some(path.clone()), StubOptions::from_file(path)?))
            }
            OptionsSource::Discover(start_dir) => {
                if let Some((path, options)) = StubOptions::discover(start_dir)? {
                    return Ok((Some(path), options));
                }
                match home_options_file() {
                    Some(path) => Ok((Some(path.clone()), StubOptions::from_file(&path)?)),
                    None => Ok((None, StubOptions::default())),
                }
            }
        }
    }
}

fn home_options_file() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    OPTIONS_FILE_NAMES
        .iter()
        .map(|name| home.join(name))
        .find(|path| path.is_file())
}

#[derive(Debug)]
struct LoadedOptions {
    options: Arc<StubOptions>,
    path: Option<PathBuf>,
}

/// Shared, reloadable options. Readers take a cheap snapshot; `reload` swaps
/// the whole value.
#[derive(Debug, Clone)]
pub struct OptionsStore {
    source: OptionsSource,
    inner: Arc<RwLock<LoadedOptions>>,
}

impl OptionsStore {
    pub fn load(source: OptionsSource) -> Result<Self, ServiceError> {
        let (path, options) = source.load()?;
        if let Some(path) = &path {
            info!("Loaded stub options from {}", path.display());
        }
        Ok(Self {
            source,
            inner: Arc::new(RwLock::new(LoadedOptions {
                options: Arc::new(options),
                path,
            })),
        })
    }

    /// A store that never touches the filesystem.
    pub fn fixed(options: StubOptions) -> Self {
        Self {
            source: OptionsSource::Discover(PathBuf::from(".")),
            inner: Arc::new(RwLock::new(LoadedOptions {
                options: Arc::new(options),
                path: None,
            })),
        }
    }

    pub fn snapshot(&self) -> Arc<StubOptions> {
        match self.inner.read() {
            Ok(loaded) => Arc::clone(&loaded.options),
            Err(poisoned) => Arc::clone(&poisoned.into_inner().options),
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        match self.inner.read() {
            Ok(loaded) => loaded.path.clone(),
            Err(poisoned) => poisoned.into_inner().path.clone(),
        }
    }

    /// Re-reads the options. On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<StubOptions>, ServiceError> {
        let (path, options) = self.source.load()?;
        let options = Arc::new(options);
        debug!(?path, "reloaded stub options");

        let mut loaded = self
            .inner
            .write()
            .map_err(|_| ServiceError::Internal("Options lock poisoned".to_string()))?;
        loaded.options = Arc::clone(&options);
        loaded.path = path;
        Ok(options)
    }
}
