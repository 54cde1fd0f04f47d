//! Application registry
//!
//! Apps are static descriptors: an identifier, a label, a home screen,
//! and a table of optional lifecycle hooks. The registry is a bounded,
//! duplicate-free collection built once at startup.

pub mod builtin;
pub mod grid;

use heapless::Vec;

use crate::context::WatchContext;
use crate::input::GestureEvent;
use crate::nav::Screen;

/// Registry capacity
pub const MAX_APPS: usize = 12;

/// Stable application identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppId {
    Watchface,
    Quests,
    Music,
    Games,
    Notes,
    Files,
    PdfReader,
    Settings,
    Weather,
}

/// Optional lifecycle hooks
///
/// Absence of a hook is expressed by `None`, never by a placeholder
/// function; callers check presence before dispatching.
#[derive(Clone, Copy, Default)]
pub struct AppHooks {
    /// Runs once when the app is launched
    pub init: Option<fn(&mut WatchContext)>,
    /// Runs every UI tick while the app is frontmost
    pub draw: Option<fn(&mut WatchContext)>,
    /// Receives gestures the navigation layer did not consume
    pub touch: Option<fn(&mut WatchContext, &GestureEvent)>,
    /// Runs once when the app is exited
    pub cleanup: Option<fn(&mut WatchContext)>,
}

/// One registered application
#[derive(Clone, Copy)]
pub struct AppDescriptor {
    pub id: AppId,
    pub label: &'static str,
    pub home_screen: Screen,
    pub hooks: AppHooks,
}

/// Registry construction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// More descriptors than `MAX_APPS`
    Full,
    /// Same `AppId` registered twice
    Duplicate(AppId),
}

/// Bounded app table, ordered by registration
#[derive(Default)]
pub struct AppRegistry {
    apps: Vec<AppDescriptor, MAX_APPS>,
}

impl AppRegistry {
    /// Build a registry, rejecting overflow and duplicate ids
    pub fn from_descriptors(descriptors: &[AppDescriptor]) -> Result<Self, RegistryError> {
        let mut apps: Vec<AppDescriptor, MAX_APPS> = Vec::new();
        for desc in descriptors {
            if apps.iter().any(|a| a.id == desc.id) {
                return Err(RegistryError::Duplicate(desc.id));
            }
            apps.push(*desc).map_err(|_| RegistryError::Full)?;
        }
        Ok(Self { apps })
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Look up by identifier
    pub fn get(&self, id: AppId) -> Option<&AppDescriptor> {
        self.apps.iter().find(|a| a.id == id)
    }

    /// Registration position of an app
    pub fn index_of(&self, id: AppId) -> Option<usize> {
        self.apps.iter().position(|a| a.id == id)
    }

    /// Look up by registration position
    pub fn by_index(&self, index: usize) -> Option<&AppDescriptor> {
        self.apps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }
}
