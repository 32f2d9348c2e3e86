//! In-memory application store.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::error::{StoreError, StoreResult};
use crate::metrics;

use super::password::random_password;
use super::types::{Application, ApplicationPatch, Deleted, NewApplication};

/// Source of default passwords.
pub type PasswordFn = fn() -> String;

#[derive(Debug)]
struct Inner {
    applications: BTreeMap<u64, Application>,
    next_id: u64,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            applications: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Keyed collection of Applications.
///
/// The map and the id counter sit behind one lock, so every operation is a
/// single critical section and ids are handed out exactly once.
#[derive(Debug)]
pub struct ApplicationStore {
    inner: RwLock<Inner>,
    generate_password: PasswordFn,
}

impl ApplicationStore {
    /// Create an empty store using the mock random password generator.
    pub fn new() -> Self {
        Self::with_password_fn(random_password)
    }

    /// Create an empty store with a custom password source.
    pub fn with_password_fn(generate_password: PasswordFn) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            generate_password,
        }
    }

    /// All applications, ascending by id.
    pub async fn list(&self) -> Vec<Application> {
        let inner = self.inner.read().await;
        inner.applications.values().cloned().collect()
    }

    /// Look up one application.
    pub async fn get(&self, id: u64) -> StoreResult<Application> {
        let inner = self.inner.read().await;
        inner
            .applications
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    /// Number of stored applications.
    pub async fn len(&self) -> usize {
        self.inner.read().await.applications.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Create an application, assigning the next id.
    ///
    /// Rejected requests do not consume an id.
    #[instrument(skip(self, input), fields(name = ?input.name))]
    pub async fn create(&self, input: NewApplication) -> StoreResult<Application> {
        if input.id.is_some() {
            warn!("Rejecting create with caller-supplied id {:?}", input.id);
            return Err(StoreError::IdSupplied);
        }
        let Some(name) = input.name else {
            warn!("Rejecting create without name");
            return Err(StoreError::MissingName);
        };
        let password = match input.password {
            Some(password) if !password.is_empty() => password,
            _ => (self.generate_password)(),
        };

        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let application = Application { id, name, password };
        inner.applications.insert(id, application.clone());

        info!(id, "Application created");
        metrics::inc_applications_created();
        Ok(application)
    }

    /// Apply a partial update.
    ///
    /// Checks run in order: empty payload, id mismatch, unknown id. A
    /// rejected update leaves the record untouched.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: u64, patch: ApplicationPatch) -> StoreResult<Application> {
        if patch.is_empty() {
            warn!("Rejecting update with empty body");
            return Err(StoreError::EmptyBody);
        }
        if let Some(body) = patch.id {
            if body != id {
                warn!(body, "Rejecting update with mismatched id");
                return Err(StoreError::IdMismatch { path: id, body });
            }
        }

        let mut inner = self.inner.write().await;
        let Some(application) = inner.applications.get_mut(&id) else {
            return Err(StoreError::NotFound { id });
        };

        if let Some(name) = patch.name {
            debug!("Renaming to {:?}", name);
            application.name = name;
        }
        if let Some(password) = patch.password {
            application.password = if password.is_empty() {
                debug!("Regenerating password");
                (self.generate_password)()
            } else {
                password
            };
        }

        info!("Application updated");
        metrics::inc_applications_updated();
        Ok(application.clone())
    }

    /// Remove an application. Its id is not reused.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> StoreResult<Deleted> {
        let mut inner = self.inner.write().await;
        if inner.applications.remove(&id).is_none() {
            return Err(StoreError::NotFound { id });
        }

        info!("Application deleted");
        metrics::inc_applications_deleted();
        Ok(Deleted::default())
    }

    /// Create a named application with a generated password.
    pub async fn seed(&self, name: &str) -> StoreResult<Application> {
        self.create(NewApplication::named(name)).await
    }
}

impl Default for ApplicationStore {
    fn default() -> Self {
        Self::new()
    }
}
