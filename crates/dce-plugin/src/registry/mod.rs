use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{debug, trace, warn};

use crate::hook::{ComposePlugin, PodStatusHook};

/// Named registry of implementations of one extension point.
///
/// Cloning yields another handle to the same registry.
pub struct ExtensionPoint<T: ?Sized> {
    kind: &'static str,
    inner: Arc<RwLock<BTreeMap<String, Arc<T>>>>,
}

impl<T: ?Sized> ExtensionPoint<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Name of the extension point (used in logs).
    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register an implementation under `name`.
    ///
    /// Returns `false` and leaves the registry untouched if `name` is empty or already taken.
    pub fn register(&self, name: impl Into<String>, ext: Arc<T>) -> bool {
        let name = name.into();
        if name.trim().is_empty() {
            warn!(target: "dce.plugin.registry", kind = self.kind, "refusing to register extension with empty name");
            return false;
        }

        let mut map = self.write();
        if map.contains_key(&name) {
            warn!(target: "dce.plugin.registry", kind = self.kind, name = %name, "extension already registered");
            return false;
        }
        debug!(target: "dce.plugin.registry", kind = self.kind, name = %name, "extension registered");
        map.insert(name, ext);
        true
    }

    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.write().remove(name).is_some();
        if removed {
            trace!(target: "dce.plugin.registry", kind = self.kind, name, "extension unregistered");
        }
        removed
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<T>> {
        self.read().get(name).cloned()
    }

    /// Resolve `names` in the given order, skipping unknown ones.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Vec<Arc<T>> {
        let map = self.read();
        names
            .iter()
            .filter_map(|n| map.get(n.as_ref()).cloned())
            .collect()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn all(&self) -> Vec<(String, Arc<T>)> {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), Arc::clone(v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<T>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<T>>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: ?Sized> Clone for ExtensionPoint<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            inner: Arc::clone(&self.inner),
        }
    }
}

/// All extension points of the compose executor.
#[derive(Clone)]
pub struct Extensions {
    pub compose_plugins: ExtensionPoint<dyn ComposePlugin>,
    pub pod_status_hooks: ExtensionPoint<dyn PodStatusHook>,
}

impl Extensions {
    pub fn new() -> Self {
        Self {
            compose_plugins: ExtensionPoint::new("compose_plugin"),
            pod_status_hooks: ExtensionPoint::new("pod_status_hook"),
        }
    }

    /// Process-wide registry plugins register themselves into at startup.
    pub fn global() -> &'static Extensions {
        static GLOBAL: OnceLock<Extensions> = OnceLock::new();
        GLOBAL.get_or_init(Extensions::new)
    }

    /// Register a compose plugin under its own [`ComposePlugin::name`].
    pub fn register_compose_plugin(&self, plugin: Arc<dyn ComposePlugin>) -> bool {
        let name = plugin.name().to_string();
        self.compose_plugins.register(name, plugin)
    }

    pub fn register_pod_status_hook(
        &self,
        name: impl Into<String>,
        hook: Arc<dyn PodStatusHook>,
    ) -> bool {
        self.pod_status_hooks.register(name, hook)
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new()
    }
}
