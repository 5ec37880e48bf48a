//! App catalog and the closed mapping from [`AppKey`] to hosted renderable units.

mod placeholders;

use std::num::NonZeroUsize;

use desktop_app_contract::AppModule;
use system_ui::IconName;
use thiserror::Error;

use crate::model::AppKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Immutable metadata for one app type.
pub struct AppDescriptor {
    pub key: AppKey,
    pub display_name: &'static str,
    /// Label used under dock and desktop icons.
    pub short_name: &'static str,
    pub icon: IconName,
    /// `None` means unbounded.
    pub max_instances: Option<NonZeroUsize>,
}

impl AppDescriptor {
    pub const fn new(
        key: AppKey,
        display_name: &'static str,
        short_name: &'static str,
        icon: IconName,
    ) -> Self {
        Self {
            key,
            display_name,
            short_name,
            icon,
            max_instances: None,
        }
    }

    pub const fn with_max_instances(self, max: NonZeroUsize) -> Self {
        Self {
            max_instances: Some(max),
            ..self
        }
    }
}

const SINGLE: NonZeroUsize = NonZeroUsize::MIN;

const BUILTIN_APPS: [AppDescriptor; 7] = [
    AppDescriptor::new(AppKey::Pomodoro, "Pomodoro", "Pomodoro", IconName::Timer)
        .with_max_instances(SINGLE),
    AppDescriptor::new(
        AppKey::MarkdownNotes,
        "Markdown Notes",
        "Notes",
        IconName::NotebookPen,
    )
    .with_max_instances(SINGLE),
    AppDescriptor::new(
        AppKey::CodeSnippets,
        "Code Snippets",
        "Snippets",
        IconName::Code,
    )
    .with_max_instances(SINGLE),
    AppDescriptor::new(AppKey::JsonTools, "JSON Tools", "JSON", IconName::Braces)
        .with_max_instances(SINGLE),
    AppDescriptor::new(
        AppKey::CommandCenter,
        "Command Center",
        "Commands",
        IconName::Terminal,
    )
    .with_max_instances(SINGLE),
    AppDescriptor::new(
        AppKey::KnowledgeBase,
        "Knowledge Base (Beta)",
        "Knowledge",
        IconName::Brain,
    )
    .with_max_instances(SINGLE),
    AppDescriptor::new(
        AppKey::KanbanBoard,
        "Kanban Board",
        "Kanban",
        IconName::Kanban,
    )
    .with_max_instances(SINGLE),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("app `{0}` is registered more than once")]
    DuplicateKey(AppKey),
    #[error("app `{0}` declares a zero instance cap")]
    ZeroInstanceCap(AppKey),
}

/// Ordered, fixed-at-startup catalog of app descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRegistry {
    entries: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Builds a registry from `entries`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateKey`] if a key appears twice.
    pub fn new(entries: Vec<AppDescriptor>) -> Result<Self, RegistryError> {
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|prior| prior.key == entry.key) {
                return Err(RegistryError::DuplicateKey(entry.key));
            }
        }
        Ok(Self { entries })
    }

    /// Builds a registry from raw `(descriptor, cap)` pairs where a cap of zero is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ZeroInstanceCap`] for a zero cap, or any error of [`Self::new`].
    pub fn from_caps(
        entries: impl IntoIterator<Item = (AppDescriptor, Option<usize>)>,
    ) -> Result<Self, RegistryError> {
        let entries = entries
            .into_iter()
            .map(|(descriptor, cap)| match cap {
                None => Ok(AppDescriptor {
                    max_instances: None,
                    ..descriptor
                }),
                Some(cap) => NonZeroUsize::new(cap)
                    .map(|max| descriptor.with_max_instances(max))
                    .ok_or(RegistryError::ZeroInstanceCap(descriptor.key)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_APPS.to_vec(),
        }
    }

    pub fn get(&self, key: AppKey) -> Option<&AppDescriptor> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Renderable-unit factory for an app type.
pub fn app_module(key: AppKey) -> AppModule {
    match key {
        AppKey::Pomodoro => AppModule::new(placeholders::mount_pomodoro_app),
        AppKey::MarkdownNotes => AppModule::new(placeholders::mount_markdown_notes_app),
        AppKey::CodeSnippets => AppModule::new(placeholders::mount_code_snippets_app),
        AppKey::JsonTools => AppModule::new(placeholders::mount_json_tools_app),
        AppKey::CommandCenter => AppModule::new(placeholders::mount_command_center_app),
        AppKey::KnowledgeBase => AppModule::new(placeholders::mount_knowledge_base_app),
        AppKey::KanbanBoard => AppModule::new(placeholders::mount_kanban_board_app),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_registry_covers_every_key_in_order() {
        let registry = AppRegistry::builtin();
        let keys: Vec<AppKey> = registry.iter().map(|entry| entry.key).collect();
        assert_eq!(keys, AppKey::ALL.to_vec());
        assert!(AppRegistry::new(BUILTIN_APPS.to_vec()).is_ok());
    }

    #[test]
    fn every_builtin_app_is_single_instance() {
        // Hosted apps keep one record per app namespace.
        let registry = AppRegistry::builtin();
        for key in AppKey::ALL {
            assert_eq!(
                registry
                    .get(key)
                    .and_then(|entry| entry.max_instances)
                    .map(NonZeroUsize::get),
                Some(1),
                "{key}"
            );
        }
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let entry = AppDescriptor::new(AppKey::JsonTools, "JSON", "JSON", IconName::Braces);
        assert_eq!(
            AppRegistry::new(vec![entry, entry]),
            Err(RegistryError::DuplicateKey(AppKey::JsonTools))
        );
    }

    #[test]
    fn zero_caps_are_rejected() {
        let entry = AppDescriptor::new(AppKey::Pomodoro, "Pomodoro", "Pomodoro", IconName::Timer);
        assert_eq!(
            AppRegistry::from_caps([(entry, Some(0))]),
            Err(RegistryError::ZeroInstanceCap(AppKey::Pomodoro))
        );
        let registry = AppRegistry::from_caps([(entry, Some(2))]).expect("valid cap");
        assert_eq!(
            registry
                .get(AppKey::Pomodoro)
                .and_then(|entry| entry.max_instances)
                .map(NonZeroUsize::get),
            Some(2)
        );
    }
}
