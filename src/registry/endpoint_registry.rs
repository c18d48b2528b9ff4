use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Registered notification destinations. Keys are opaque here; format checks
/// happen before anything reaches the registry.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: RwLock<BTreeSet<String>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, endpoint: impl Into<String>) -> AddOutcome {
        let mut endpoints = self
            .endpoints
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if endpoints.insert(endpoint.into()) {
            AddOutcome::Added
        } else {
            AddOutcome::AlreadyPresent
        }
    }

    pub fn remove(&self, endpoint: &str) -> Result<(), RegistryError> {
        let mut endpoints = self
            .endpoints
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if endpoints.remove(endpoint) {
            Ok(())
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Point-in-time copy; later mutations do not affect it.
    pub fn list(&self) -> Vec<String> {
        self.endpoints
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.endpoints
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
