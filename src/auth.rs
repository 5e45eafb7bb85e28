//! Driver session flags and the mock driver authenticator
//!
//! This sits outside the simulation core. The driver panel gate only needs
//! two persisted flags: whether a driver is logged in and which license id
//! they used. There is no server and the accepted credential pair is fixed.

use log::{info, warn};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Session key holding `"true"` while a driver is logged in
pub const LOGGED_IN_KEY: &str = "driver_logged_in";

/// Session key holding the logged-in driver's license id
pub const LICENSE_ID_KEY: &str = "driver_license_id";

pub const MIN_LICENSE_ID_LEN: usize = 5;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Demo license id accepted by the mock authenticator
pub const DEMO_LICENSE_ID: &str = "DL-9876543";

/// Demo password accepted by the mock authenticator
pub const DEMO_PASSWORD: &str = "password123";

/// Key-value flag storage for the driver session
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Session store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Session store persisted as a JSON object on disk
///
/// Every write rewrites the whole file, so flags survive a restart.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Errors from the driver login flow
#[derive(Debug)]
pub enum AuthError {
    /// The submitted form failed validation
    InvalidForm(String),
    /// Well-formed credentials that do not match
    InvalidCredentials,
    /// The session store could not be written
    Storage(io::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidForm(reason) => write!(f, "invalid login form: {}", reason),
            AuthError::InvalidCredentials => f.write_str("invalid license ID or password"),
            AuthError::Storage(err) => write!(f, "session storage failed: {}", err),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AuthError {
    fn from(err: io::Error) -> Self {
        AuthError::Storage(err)
    }
}

/// License id and password submitted by a driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub license_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(license_id: &str, password: &str) -> Self {
        Self {
            license_id: license_id.to_string(),
            password: password.to_string(),
        }
    }

    /// Form-level checks applied before any credential comparison
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.license_id.chars().count() < MIN_LICENSE_ID_LEN {
            return Err(AuthError::InvalidForm(format!(
                "License ID must be at least {} characters.",
                MIN_LICENSE_ID_LEN
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidForm(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

/// Gate in front of the driver panel
pub trait Authenticator {
    fn is_authenticated(&self) -> bool;
    fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError>;
    fn logout(&mut self) -> Result<(), AuthError>;
}

/// Mock authenticator checking against one fixed credential pair
pub struct DriverAuth<S: SessionStore> {
    store: S,
    accepted: Credentials,
}

impl<S: SessionStore> DriverAuth<S> {
    /// Authenticator accepting the demo credential pair
    pub fn new(store: S) -> Self {
        Self::with_credentials(store, Credentials::new(DEMO_LICENSE_ID, DEMO_PASSWORD))
    }

    pub fn with_credentials(store: S, accepted: Credentials) -> Self {
        Self { store, accepted }
    }

    /// License id of the logged-in driver
    pub fn license_id(&self) -> Option<String> {
        if self.is_authenticated() {
            self.store.get(LICENSE_ID_KEY)
        } else {
            None
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: SessionStore> Authenticator for DriverAuth<S> {
    fn is_authenticated(&self) -> bool {
        self.store.get(LOGGED_IN_KEY).as_deref() == Some("true")
    }

    fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        credentials.validate()?;
        if *credentials != self.accepted {
            warn!("Rejected driver login for {}", credentials.license_id);
            return Err(AuthError::InvalidCredentials);
        }

        self.store.set(LOGGED_IN_KEY, "true")?;
        self.store.set(LICENSE_ID_KEY, &credentials.license_id)?;
        info!("Driver {} logged in", credentials.license_id);
        Ok(())
    }

    fn logout(&mut self) -> Result<(), AuthError> {
        self.store.remove(LOGGED_IN_KEY)?;
        self.store.remove(LICENSE_ID_KEY)?;
        Ok(())
    }
}
