//! Virtual desktop runtime: window management, dock, spotlight search, and the Leptos shell.
//!
//! The state owners ([`WindowManager`], [`DockRegistry`], [`SpotlightSearch`]) are plain data
//! structures driven by [`reduce_desktop`]; the `components` layer only renders them and
//! dispatches [`DesktopAction`] values.

pub mod apps;
pub mod components;
pub mod dock;
mod effect_executor;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod spotlight;
pub mod window_manager;

pub use apps::{app_module, AppDescriptor, AppRegistry, RegistryError};
pub use components::DesktopShell;
pub use dock::{resolve_dock_click, DockClickAction, DockRegistry};
pub use model::*;
pub use persistence::{load_boot_snapshot, persist_layout_snapshot, persist_theme};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use spotlight::{
    is_spotlight_shortcut, KeyChord, SpotlightCommand, SpotlightKey, SpotlightResult,
    SpotlightSearch,
};
pub use window_manager::{WindowError, WindowEvent, WindowManager};
