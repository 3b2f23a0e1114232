/// Pending confirmation for one selected resource

use crate::core::client::ResourceClient;
use crate::core::error::{ConsoleError, ConsoleResult};
use crate::core::resource::{ActionLabel, ResourceEntry, ResourceKind};

/// Identifies one opened modal so a late completion for an older one is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTicket(pub u64);

/// What a completed action produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Engine state changed; the list needs a reload
    Changed,
    /// An image was run; carries the new container id
    Started { container_id: String },
    /// Read-only log output for the log pane
    Logs { container_id: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionModal {
    ticket: ModalTicket,
    subject: ResourceEntry,
    actions: &'static [ActionLabel],
}

impl ActionModal {
    pub fn open(subject: ResourceEntry, ticket: ModalTicket) -> Self {
        let actions = subject.kind.actions();
        Self {
            ticket,
            subject,
            actions,
        }
    }

    pub fn ticket(&self) -> ModalTicket {
        self.ticket
    }

    pub fn subject(&self) -> &ResourceEntry {
        &self.subject
    }

    pub fn subject_id(&self) -> &str {
        &self.subject.id
    }

    pub fn subject_kind(&self) -> ResourceKind {
        self.subject.kind
    }

    pub fn available_actions(&self) -> &'static [ActionLabel] {
        self.actions
    }

    pub fn accepts(&self, action: ActionLabel) -> bool {
        self.actions.contains(&action)
    }

    /// Prompt shown above the buttons
    pub fn prompt(&self) -> String {
        format!("{} {}\n{}", self.subject.kind, self.subject.id, self.subject.label)
    }

    /// Run the single engine call bound to `action` for this subject.
    ///
    /// The modal is consumed whether or not the call succeeds.
    pub async fn complete<C>(self, client: &C, action: ActionLabel) -> ConsoleResult<ActionOutcome>
    where
        C: ResourceClient + ?Sized,
    {
        if !self.accepts(action) {
            return Err(ConsoleError::InvalidTransition {
                from: "modal",
                input: action.as_str(),
            });
        }

        let id = self.subject.id.as_str();
        match (self.subject.kind, action) {
            (ResourceKind::Image, ActionLabel::Run) => {
                let container_id = client.run(self.subject.image_ref()).await?;
                Ok(ActionOutcome::Started { container_id })
            }
            (ResourceKind::Container, ActionLabel::Stop) => {
                client.stop(id).await?;
                Ok(ActionOutcome::Changed)
            }
            (ResourceKind::Container, ActionLabel::Logs) => {
                let text = client.fetch_logs(id).await?;
                Ok(ActionOutcome::Logs {
                    container_id: id.to_string(),
                    text,
                })
            }
            (kind, ActionLabel::Remove) => {
                client.remove(kind, id).await?;
                Ok(ActionOutcome::Changed)
            }
            _ => Err(ConsoleError::InvalidTransition {
                from: "modal",
                input: action.as_str(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::MockResourceClient;

    fn image() -> ResourceEntry {
        ResourceEntry::new(ResourceKind::Image, "sha256:1111", "redis:7")
    }

    fn container() -> ResourceEntry {
        ResourceEntry::new(ResourceKind::Container, "c0ffee", "redis:7(c0ffee) Up 2 minutes")
    }

    #[test]
    fn test_image_modal_actions() {
        let modal = ActionModal::open(image(), ModalTicket(1));
        assert_eq!(modal.available_actions(), &[ActionLabel::Run, ActionLabel::Remove]);
        assert!(!modal.accepts(ActionLabel::Stop));
        assert!(!modal.accepts(ActionLabel::Logs));
    }

    #[tokio::test]
    async fn test_run_uses_image_tag() {
        let mut client = MockResourceClient::new();
        client
            .expect_run()
            .withf(|image_ref| image_ref == "redis:7")
            .times(1)
            .returning(|_| Ok("newcontainer".to_string()));

        let outcome = ActionModal::open(image(), ModalTicket(1))
            .complete(&client, ActionLabel::Run)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ActionOutcome::Started {
                container_id: "newcontainer".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_remove_dispatches_on_kind() {
        let mut client = MockResourceClient::new();
        client
            .expect_remove()
            .withf(|kind, id| *kind == ResourceKind::Container && id == "c0ffee")
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = ActionModal::open(container(), ModalTicket(2))
            .complete(&client, ActionLabel::Remove)
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Changed);
    }

    #[tokio::test]
    async fn test_action_outside_table_makes_no_call() {
        // No expectations: any engine call would panic the mock
        let client = MockResourceClient::new();

        let result = ActionModal::open(image(), ModalTicket(3))
            .complete(&client, ActionLabel::Logs)
            .await;
        assert!(matches!(result, Err(ConsoleError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_failed_call_surfaces_engine_error() {
        let mut client = MockResourceClient::new();
        client
            .expect_stop()
            .returning(|_| Err(ConsoleError::engine(ResourceKind::Container, "stop", "no such container")));

        let result = ActionModal::open(container(), ModalTicket(4))
            .complete(&client, ActionLabel::Stop)
            .await;
        assert_eq!(
            result,
            Err(ConsoleError::EngineCallFailed {
                kind: ResourceKind::Container,
                operation: "stop",
                message: "no such container".to_string(),
            })
        );
    }
}
