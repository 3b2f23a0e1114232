/// Navigation state machine
///
/// Owns which region receives input. The right-hand slot of the layout is
/// derived from the focus: the modal and the log pane replace the list while
/// they are up, the list model underneath is kept.

use crate::core::error::{ConsoleError, ConsoleResult};
use crate::core::resource::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRegion {
    Menu,
    List,
    Modal,
    LogPane,
}

impl FocusRegion {
    pub fn name(&self) -> &'static str {
        match self {
            FocusRegion::Menu => "menu",
            FocusRegion::List => "list",
            FocusRegion::Modal => "modal",
            FocusRegion::LogPane => "log pane",
        }
    }
}

/// What occupies the right-hand slot of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountedRegion {
    List,
    Modal,
    LogPane,
}

#[derive(Debug, Clone)]
pub struct FocusRouter {
    focus: FocusRegion,
    kind: Option<ResourceKind>,
}

impl Default for FocusRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRouter {
    pub fn new() -> Self {
        Self {
            focus: FocusRegion::Menu,
            kind: None,
        }
    }

    pub fn focus(&self) -> FocusRegion {
        self.focus
    }

    pub fn mounted(&self) -> MountedRegion {
        match self.focus {
            FocusRegion::Modal => MountedRegion::Modal,
            FocusRegion::LogPane => MountedRegion::LogPane,
            FocusRegion::Menu | FocusRegion::List => MountedRegion::List,
        }
    }

    /// Kind last selected from the menu
    pub fn kind(&self) -> Option<ResourceKind> {
        self.kind
    }

    fn reject(&self, input: &'static str) -> ConsoleError {
        ConsoleError::InvalidTransition {
            from: self.focus.name(),
            input,
        }
    }

    fn expect(&self, allowed: &[FocusRegion], input: &'static str) -> ConsoleResult<()> {
        if allowed.contains(&self.focus) {
            Ok(())
        } else {
            Err(self.reject(input))
        }
    }

    /// Menu -> List. Any overlay is unmounted by construction.
    pub fn select_kind(&mut self, kind: ResourceKind) -> ConsoleResult<()> {
        self.expect(&[FocusRegion::Menu], "select kind")?;
        self.kind = Some(kind);
        self.focus = FocusRegion::List;
        Ok(())
    }

    /// List -> List, or Menu -> List once a kind has been selected
    pub fn move_right(&mut self) -> ConsoleResult<()> {
        match self.focus {
            FocusRegion::List => Ok(()),
            FocusRegion::Menu if self.kind.is_some() => {
                self.focus = FocusRegion::List;
                Ok(())
            }
            _ => Err(self.reject("move right")),
        }
    }

    /// List, Modal or LogPane -> Menu, dropping any overlay
    pub fn move_left(&mut self) -> ConsoleResult<()> {
        self.expect(
            &[FocusRegion::List, FocusRegion::Modal, FocusRegion::LogPane],
            "move left",
        )?;
        self.focus = FocusRegion::Menu;
        Ok(())
    }

    /// List -> Modal. Fails while a modal is already up.
    pub fn open_modal(&mut self) -> ConsoleResult<()> {
        self.expect(&[FocusRegion::List], "select entry")?;
        self.focus = FocusRegion::Modal;
        Ok(())
    }

    /// Modal -> List for mutating actions, Modal -> LogPane for read-only ones
    pub fn complete_modal(&mut self, read_only: bool) -> ConsoleResult<()> {
        self.expect(&[FocusRegion::Modal], "choose action")?;
        self.focus = if read_only {
            FocusRegion::LogPane
        } else {
            FocusRegion::List
        };
        Ok(())
    }

    /// Modal -> List without running anything
    pub fn cancel_modal(&mut self) -> ConsoleResult<()> {
        self.expect(&[FocusRegion::Modal], "cancel")?;
        self.focus = FocusRegion::List;
        Ok(())
    }

    /// LogPane -> List
    pub fn close_logs(&mut self) -> ConsoleResult<()> {
        self.expect(&[FocusRegion::LogPane], "dismiss")?;
        self.focus = FocusRegion::List;
        Ok(())
    }
}
