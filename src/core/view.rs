/// Declarative description of what the console shows after a transition.
/// The screen layer draws it; nothing here knows about terminal widgets.

use crate::core::focus::{FocusRegion, MountedRegion};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub label: &'static str,
    pub shortcut: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    List {
        title: String,
        rows: Vec<String>,
        cursor: Option<usize>,
    },
    Modal {
        prompt: String,
        actions: Vec<&'static str>,
        cursor: usize,
    },
    LogPane {
        title: String,
        text: String,
        scroll: u16,
    },
}

impl BodyView {
    pub fn mounted(&self) -> MountedRegion {
        match self {
            BodyView::List { .. } => MountedRegion::List,
            BodyView::Modal { .. } => MountedRegion::Modal,
            BodyView::LogPane { .. } => MountedRegion::LogPane,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleView {
    pub focus: FocusRegion,
    pub menu: Vec<MenuRow>,
    pub menu_cursor: usize,
    pub body: BodyView,
    /// Contents of the persistent error strip
    pub error: Option<String>,
    pub status: Option<String>,
}

impl ConsoleView {
    pub fn mounted(&self) -> MountedRegion {
        self.body.mounted()
    }
}
