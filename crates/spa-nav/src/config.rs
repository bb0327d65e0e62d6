//! Navigation settings.

use serde::{Deserialize, Serialize};

/// Whether links and restores may address sections inside an app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationMode {
    /// App and section navigation.
    #[default]
    Sections,
    /// Only whole apps are switched; section segments are ignored.
    AppsOnly,
}

impl NavigationMode {
    pub fn sections_enabled(self) -> bool {
        matches!(self, Self::Sections)
    }
}

/// How the shell reads the page and where it lands first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Id of the container whose children are the app panels.
    pub root_id: String,

    /// Class whose presence makes a panel visible.
    pub show_class: String,

    /// Class that marks an element inside an app as a section.
    pub section_class: String,

    /// App shown to unauthenticated users and when a remembered app is gone.
    pub default_app: String,

    /// Section shown with the default app on unauthenticated entry.
    pub default_section: String,

    pub mode: NavigationMode,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            show_class: "show".to_string(),
            section_class: "section".to_string(),
            default_app: "home".to_string(),
            default_section: "home".to_string(),
            mode: NavigationMode::default(),
        }
    }
}
