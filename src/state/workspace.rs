use serde::{Deserialize, Serialize};

use crate::state::collection::Collection;
use crate::state::environment::Environment;
use crate::state::tab::Tab;

/// Presentation flag. Lives on the workspace only because it shares the
/// persisted aggregate; it has no effect on request semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Root aggregate. Owned exclusively by `WorkspaceStore`; the persistence
/// adapter only ever sees it as one opaque snapshot.
///
/// Invariants: `tabs` is never empty, and the two active-id references always
/// resolve to an existing entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub tabs: Vec<Tab>,
    pub active_tab_id: String,
    pub collections: Vec<Collection>,
    pub environments: Vec<Environment>,
    pub active_environment_id: String,
    /// Prefixed onto every tab's URL at dispatch time when non-empty.
    pub base_url: String,
    pub theme: Theme,
}

impl Workspace {
    /// First-run state: one default tab, two seeded environments with
    /// Development active.
    pub fn seeded() -> Self {
        let tab = Tab::new("New Request");
        let development = Environment::new("Development");
        let production = Environment::new("Production");
        Self {
            active_tab_id: tab.id.clone(),
            tabs: vec![tab],
            collections: Vec::new(),
            active_environment_id: development.id.clone(),
            environments: vec![development, production],
            base_url: String::new(),
            theme: Theme::Dark,
        }
    }

    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tab(&self.active_tab_id)
    }

    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    pub fn environment(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id == id)
    }

    pub fn active_environment(&self) -> Option<&Environment> {
        self.environment(&self.active_environment_id)
    }

    /// Whether the aggregate honors its own invariants. Restored snapshots
    /// that fail this check are discarded in favor of a seeded workspace.
    pub fn is_consistent(&self) -> bool {
        !self.tabs.is_empty() && self.active_tab().is_some() && self.active_environment().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_workspace_shape() {
        let ws = Workspace::seeded();
        assert_eq!(ws.tabs.len(), 1);
        assert_eq!(ws.environments.len(), 2);
        assert_eq!(ws.environments[0].name, "Development");
        assert_eq!(ws.environments[1].name, "Production");
        assert_eq!(ws.active_environment_id, ws.environments[0].id);
        assert!(ws.collections.is_empty());
        assert_eq!(ws.theme, Theme::Dark);
        assert!(ws.is_consistent());
    }

    #[test]
    fn test_consistency_rejects_dangling_refs() {
        let mut ws = Workspace::seeded();
        ws.active_tab_id = "gone".into();
        assert!(!ws.is_consistent());

        let mut ws = Workspace::seeded();
        ws.active_environment_id = "gone".into();
        assert!(!ws.is_consistent());

        let mut ws = Workspace::seeded();
        ws.tabs.clear();
        assert!(!ws.is_consistent());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
