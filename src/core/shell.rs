/// Top-level console state
///
/// One `Shell` owns the router, the list snapshot, the open modal and the log
/// pane, and is the only place where inputs turn into engine calls.

use crate::core::client::ResourceClient;
use crate::core::error::{ConsoleError, ErrorSlot};
use crate::core::focus::{FocusRegion, FocusRouter, MountedRegion};
use crate::core::list_model::ResourceListModel;
use crate::core::modal::{ActionModal, ActionOutcome, ModalTicket};
use crate::core::resource::{short_id, ActionLabel, ResourceKind};
use crate::core::view::{BodyView, ConsoleView, MenuRow};

/// Abstract inputs delivered by the terminal layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    MoveLeft,
    MoveRight,
    /// Enter on whatever region has focus
    Select,
    SelectKind(ResourceKind),
    SelectEntry(usize),
    ChooseAction(ActionLabel),
    Dismiss,
    Refresh,
    Quit,
}

/// Read-only output shown in place of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPane {
    pub container_id: String,
    pub text: String,
    pub scroll: u16,
}

impl LogPane {
    /// Last line that can sit at the top of the pane
    pub fn max_scroll(&self) -> u16 {
        let lines = self.text.lines().count().saturating_sub(1);
        u16::try_from(lines).unwrap_or(u16::MAX)
    }
}

pub struct Shell<C> {
    client: C,
    router: FocusRouter,
    list: ResourceListModel,
    modal: Option<ActionModal>,
    log_pane: Option<LogPane>,
    errors: ErrorSlot,
    status: Option<String>,
    menu_cursor: usize,
    list_cursor: usize,
    modal_cursor: usize,
    next_ticket: u64,
    should_quit: bool,
}

impl<C: ResourceClient> Shell<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            router: FocusRouter::new(),
            list: ResourceListModel::new(),
            modal: None,
            log_pane: None,
            errors: ErrorSlot::default(),
            status: None,
            menu_cursor: 0,
            list_cursor: 0,
            modal_cursor: 0,
            next_ticket: 0,
            should_quit: false,
        }
    }

    pub fn focus(&self) -> FocusRegion {
        self.router.focus()
    }

    pub fn list(&self) -> &ResourceListModel {
        &self.list
    }

    pub fn modal(&self) -> Option<&ActionModal> {
        self.modal.as_ref()
    }

    pub fn log_pane(&self) -> Option<&LogPane> {
        self.log_pane.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.errors.message()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn ignore(&self, err: ConsoleError) {
        tracing::debug!(focus = self.router.focus().name(), error = %err, "input ignored");
    }

    /// Apply one input. Engine failures end up in the error strip; nothing
    /// here returns an error to the caller.
    pub async fn handle(&mut self, input: Input) {
        self.status = None;

        match input {
            Input::Quit => self.should_quit = true,
            Input::Up => self.move_cursor(-1),
            Input::Down => self.move_cursor(1),
            Input::MoveLeft => self.move_left(),
            Input::MoveRight => {
                if let Err(err) = self.router.move_right() {
                    self.ignore(err);
                }
            }
            Input::Select => self.select().await,
            Input::SelectKind(kind) => self.select_kind(kind).await,
            Input::SelectEntry(index) => self.open_modal(index),
            Input::ChooseAction(action) => match self.modal.as_ref().map(ActionModal::ticket) {
                Some(ticket) => self.complete_modal(ticket, action).await,
                None => self.ignore(ConsoleError::InvalidTransition {
                    from: self.router.focus().name(),
                    input: "choose action",
                }),
            },
            Input::Dismiss => self.dismiss().await,
            Input::Refresh => self.refresh().await,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let step = |cursor: usize, len: usize| -> usize {
            if len == 0 {
                return 0;
            }
            cursor.saturating_add_signed(delta).min(len - 1)
        };

        match self.router.focus() {
            FocusRegion::Menu => {
                self.menu_cursor = step(self.menu_cursor, ResourceKind::all().len());
            }
            FocusRegion::List => {
                self.list_cursor = step(self.list_cursor, self.list.len());
            }
            FocusRegion::Modal => {
                let len = self.modal.as_ref().map_or(0, |m| m.available_actions().len());
                self.modal_cursor = step(self.modal_cursor, len);
            }
            FocusRegion::LogPane => {
                if let Some(pane) = self.log_pane.as_mut() {
                    pane.scroll = if delta < 0 {
                        pane.scroll.saturating_sub(1)
                    } else {
                        pane.scroll.saturating_add(1).min(pane.max_scroll())
                    };
                }
            }
        }
    }

    fn move_left(&mut self) {
        match self.router.move_left() {
            Ok(()) => {
                self.modal = None;
                self.log_pane = None;
            }
            Err(err) => self.ignore(err),
        }
    }

    async fn select(&mut self) {
        match self.router.focus() {
            FocusRegion::Menu => {
                let kind = ResourceKind::all()[self.menu_cursor.min(ResourceKind::all().len() - 1)];
                self.select_kind(kind).await;
            }
            FocusRegion::List => self.open_modal(self.list_cursor),
            FocusRegion::Modal => {
                let choice = self.modal.as_ref().and_then(|modal| {
                    modal
                        .available_actions()
                        .get(self.modal_cursor)
                        .map(|action| (modal.ticket(), *action))
                });
                if let Some((ticket, action)) = choice {
                    self.complete_modal(ticket, action).await;
                }
            }
            FocusRegion::LogPane => self.dismiss().await,
        }
    }

    async fn select_kind(&mut self, kind: ResourceKind) {
        if let Err(err) = self.router.select_kind(kind) {
            self.ignore(err);
            return;
        }

        if let Some(pos) = ResourceKind::all().iter().position(|k| *k == kind) {
            self.menu_cursor = pos;
        }
        self.modal = None;
        self.log_pane = None;
        self.list_cursor = 0;
        self.reload(kind).await;
    }

    fn open_modal(&mut self, index: usize) {
        if self.modal.is_some() {
            self.ignore(ConsoleError::InvalidTransition {
                from: self.router.focus().name(),
                input: "select entry",
            });
            return;
        }

        let entry = match self.list.entry_at(index) {
            Ok(entry) => entry.clone(),
            Err(err) => {
                self.list_cursor = self.list.clamp(self.list_cursor);
                self.ignore(err);
                return;
            }
        };

        if let Err(err) = self.router.open_modal() {
            self.ignore(err);
            return;
        }

        self.next_ticket += 1;
        self.modal = Some(ActionModal::open(entry, ModalTicket(self.next_ticket)));
        self.list_cursor = index;
        self.modal_cursor = 0;
        self.errors.clear();
    }

    /// Finish the modal identified by `ticket`. A ticket that no longer
    /// matches the open modal is a no-op.
    pub async fn complete_modal(&mut self, ticket: ModalTicket, action: ActionLabel) {
        let accepted = match self.modal.as_ref() {
            Some(modal) if modal.ticket() == ticket && self.router.focus() == FocusRegion::Modal => {
                modal.accepts(action)
            }
            _ => {
                tracing::debug!(ticket = ticket.0, "stale modal completion dropped");
                return;
            }
        };
        if !accepted {
            self.ignore(ConsoleError::InvalidTransition {
                from: "modal",
                input: action.as_str(),
            });
            return;
        }

        let Some(modal) = self.modal.take() else {
            return;
        };
        let kind = modal.subject_kind();
        let subject = modal.subject_id().to_string();
        tracing::info!(kind = %kind, id = %subject, action = %action, "running action");

        match modal.complete(&self.client, action).await {
            Ok(ActionOutcome::Logs { container_id, text }) => {
                self.show_logs(container_id, text);
            }
            Ok(ActionOutcome::Started { container_id }) => {
                self.status = Some(format!("started container {}", short_id(&container_id)));
                self.back_to_list(kind).await;
            }
            Ok(ActionOutcome::Changed) => self.back_to_list(kind).await,
            Err(err) => {
                tracing::warn!(kind = %kind, id = %subject, action = %action, error = %err, "action failed");
                self.errors.set(&err);
                if action.is_read_only() {
                    self.show_logs(subject, String::new());
                } else {
                    self.back_to_list(kind).await;
                }
            }
        }
    }

    fn show_logs(&mut self, container_id: String, text: String) {
        if let Err(err) = self.router.complete_modal(true) {
            self.ignore(err);
            return;
        }
        self.log_pane = Some(LogPane {
            container_id,
            text,
            scroll: 0,
        });
    }

    async fn back_to_list(&mut self, kind: ResourceKind) {
        if let Err(err) = self.router.complete_modal(false) {
            self.ignore(err);
            return;
        }
        self.reload(kind).await;
    }

    async fn dismiss(&mut self) {
        match self.router.focus() {
            FocusRegion::Modal => {
                if let Err(err) = self.router.cancel_modal() {
                    self.ignore(err);
                    return;
                }
                self.modal = None;
                self.errors.clear();
            }
            FocusRegion::LogPane => {
                if let Err(err) = self.router.close_logs() {
                    self.ignore(err);
                    return;
                }
                self.log_pane = None;
                if let Some(kind) = self.router.kind() {
                    self.reload(kind).await;
                }
            }
            FocusRegion::Menu | FocusRegion::List => self.ignore(ConsoleError::InvalidTransition {
                from: self.router.focus().name(),
                input: "dismiss",
            }),
        }
    }

    async fn refresh(&mut self) {
        // Current kind is the menu's, not the snapshot's
        match (self.router.focus(), self.router.kind()) {
            (FocusRegion::Menu | FocusRegion::List, Some(kind)) => self.reload(kind).await,
            (focus, _) => self.ignore(ConsoleError::InvalidTransition {
                from: focus.name(),
                input: "refresh",
            }),
        }
    }

    async fn reload(&mut self, kind: ResourceKind) {
        self.list.load(&self.client, kind, &mut self.errors).await;
        self.list_cursor = self.list.clamp(self.list_cursor);
    }

    /// Snapshot of everything the screen needs to draw
    pub fn view(&self) -> ConsoleView {
        let menu = ResourceKind::all()
            .iter()
            .map(|kind| MenuRow {
                label: kind.title(),
                shortcut: kind.shortcut(),
            })
            .collect();

        let overlay = match self.router.mounted() {
            MountedRegion::Modal => self.modal.as_ref().map(|modal| BodyView::Modal {
                prompt: modal.prompt(),
                actions: modal.available_actions().iter().map(ActionLabel::as_str).collect(),
                cursor: self.modal_cursor,
            }),
            MountedRegion::LogPane => self.log_pane.as_ref().map(|pane| BodyView::LogPane {
                title: format!("Logs {}", short_id(&pane.container_id)),
                text: pane.text.clone(),
                scroll: pane.scroll,
            }),
            MountedRegion::List => None,
        };
        let body = overlay.unwrap_or_else(|| BodyView::List {
            title: self
                .list
                .kind()
                .map(|kind| kind.title().to_string())
                .unwrap_or_default(),
            rows: self.list.entries().iter().map(|e| e.label.clone()).collect(),
            cursor: (!self.list.is_empty()).then_some(self.list_cursor),
        });

        ConsoleView {
            focus: self.router.focus(),
            menu,
            menu_cursor: self.menu_cursor,
            body,
            error: self.errors.message().map(str::to_string),
            status: self.status.clone(),
        }
    }
}
