pub mod client;
pub mod docker;
pub mod error;
pub mod focus;
pub mod list_model;
pub mod modal;
pub mod resource;
pub mod shell;
pub mod view;

pub use client::ResourceClient;
pub use docker::{DockerClient, EngineSettings};
pub use error::{ConsoleError, ConsoleResult, ErrorSlot};
pub use focus::{FocusRegion, FocusRouter, MountedRegion};
pub use list_model::ResourceListModel;
pub use modal::{ActionModal, ActionOutcome, ModalTicket};
pub use resource::{ActionLabel, ResourceEntry, ResourceKind};
pub use shell::{Input, Shell};
