//! Process-wide scale registry.
//!
//! Scales are looked up by name when an axis is configured. The registry
//! starts with `"linear"`; [`init`] adds `"power_scale"`. Registration is
//! idempotent: registering a name again replaces its factory.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Once, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::error::{Error, Result};
use crate::scale::{AxisScale, LinearScale, PowerScale, ScaleOptions};

/// Builds a scale from its options.
pub type ScaleFactory = fn(&ScaleOptions) -> Result<Box<dyn AxisScale>>;

/// Name-to-factory table of axis scales.
#[derive(Clone, Default)]
pub struct ScaleRegistry {
    factories: HashMap<String, ScaleFactory>,
}

impl fmt::Debug for ScaleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleRegistry").field("names", &self.names()).finish()
    }
}

impl ScaleRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `linear` scale.
    #[must_use]
    pub fn with_builtin_scales() -> Self {
        let mut registry = Self::new();
        registry.register(LinearScale::NAME, LinearScale::factory);
        registry
    }

    /// Register a factory under `name`, replacing any previous one.
    ///
    /// Returns `true` if the name was not registered before.
    pub fn register(&mut self, name: &str, factory: ScaleFactory) -> bool {
        self.factories.insert(name.to_string(), factory).is_none()
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Create the scale registered under `name`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownScale`] if nothing is registered under `name`, or the
    /// factory's own error.
    pub fn create(&self, name: &str, options: &ScaleOptions) -> Result<Box<dyn AxisScale>> {
        let factory = self.factories.get(name).ok_or_else(|| {
            Error::UnknownScale(format!("{name} (registered: {})", self.names().join(", ")))
        })?;
        factory(options)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

static GLOBAL: OnceLock<RwLock<ScaleRegistry>> = OnceLock::new();
static INIT: Once = Once::new();

fn global() -> &'static RwLock<ScaleRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(ScaleRegistry::with_builtin_scales()))
}

/// Register the scales this crate provides. Safe to call any number of times.
pub fn init() {
    INIT.call_once(|| register_scale(PowerScale::NAME, PowerScale::factory));
}

/// Register a scale in the global registry.
pub fn register_scale(name: &str, factory: ScaleFactory) {
    let added = global().write().unwrap_or_else(PoisonError::into_inner).register(name, factory);
    debug!(name, added, "registered scale");
}

/// Create a scale from the global registry.
///
/// # Errors
///
/// [`Error::UnknownScale`] if `name` is not registered (did you call
/// [`init`]?), or the scale's own option error.
pub fn scale_factory(name: &str, options: &ScaleOptions) -> Result<Box<dyn AxisScale>> {
    global().read().unwrap_or_else(PoisonError::into_inner).create(name, options)
}

/// Names in the global registry, sorted.
pub fn scale_names() -> Vec<String> {
    global().read().unwrap_or_else(PoisonError::into_inner).names()
}
