use crate::config::{self, Credentials};
use crate::error::ConfigError;
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

/// Abstract credentials persistence interface
pub trait CredentialStore {
    /// Return the stored credentials. If nothing is stored, returns Ok(None)
    fn load(&self) -> Result<Option<Credentials>, ConfigError>;
    /// Persist the credentials, replacing whatever was stored before
    fn save(&self, credentials: &Credentials) -> Result<(), ConfigError>;
    /// Human-readable location, used in messages
    fn location(&self) -> String;
}

/// File-based credentials persistence implementation
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }

    /// Store at `~/.github_config.yaml`.
    pub fn in_home_dir() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(config::CONFIG_FILENAME)))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        config::parse_credentials(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, credentials: &Credentials) -> Result<(), ConfigError> {
        let yaml = config::render_credentials(credentials).map_err(ConfigError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
        }

        let tmp = self.temp_path();
        let mut file = File::create(&tmp).map_err(|e| self.write_err(e))?;
        restrict_permissions(&file).map_err(|e| self.write_err(e))?;
        file.write_all(yaml.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.write_err(e))?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.write_err(e)
        })?;
        tracing::debug!(path = %self.path.display(), "credentials written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: RefCell<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RefCell::new(Some(credentials)),
        }
    }

    pub fn snapshot(&self) -> Option<Credentials> {
        self.credentials.borrow().clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, ConfigError> {
        Ok(self.snapshot())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), ConfigError> {
        *self.credentials.borrow_mut() = Some(credentials.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
