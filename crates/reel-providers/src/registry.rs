//! String-keyed provider registry with lazy, cached instantiation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::speech::SpeechProvider;

/// Builds one speech engine instance; invoked at most once per key.
pub type SpeechFactory =
    Box<dyn Fn() -> ProviderResult<Arc<dyn SpeechProvider>> + Send + Sync>;

/// Maps speech-engine keys to factories. Engines are instantiated on first
/// resolve and cached, so repeated jobs share one client per key.
pub struct ProviderRegistry {
    factories: HashMap<String, SpeechFactory>,
    cache: Mutex<HashMap<String, Arc<dyn SpeechProvider>>>,
    default_key: String,
}

impl ProviderRegistry {
    pub fn new(default_key: impl Into<String>) -> Self {
        Self {
            factories: HashMap::new(),
            cache: Mutex::new(HashMap::new()),
            default_key: default_key.into(),
        }
    }

    /// Register a speech engine factory under `key`.
    pub fn register_speech(
        &mut self,
        key: impl Into<String>,
        factory: SpeechFactory,
    ) -> &mut Self {
        self.factories.insert(key.into(), factory);
        self
    }

    /// The key used when a job does not name an engine.
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Registered keys, for diagnostics.
    pub fn speech_keys(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Resolve a speech engine by key, falling back to the default key when
    /// `key` is `None`. The instance is created lazily and cached.
    pub fn resolve_speech(&self, key: Option<&str>) -> ProviderResult<Arc<dyn SpeechProvider>> {
        let key = key.unwrap_or(&self.default_key);

        if let Some(provider) = self.cache.lock().expect("registry cache poisoned").get(key) {
            return Ok(Arc::clone(provider));
        }

        let factory = self
            .factories
            .get(key)
            .ok_or_else(|| ProviderError::UnknownProvider(key.to_string()))?;

        let provider = factory()?;
        debug!(key, "Instantiated speech provider");

        self.cache
            .lock()
            .expect("registry cache poisoned")
            .insert(key.to_string(), Arc::clone(&provider));
        Ok(provider)
    }
}
