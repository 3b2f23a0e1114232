/// Resource kinds, row snapshots and the per-kind action table

use serde::Serialize;
use std::fmt;

/// The three kinds of engine resources the console can manage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Container,
    Volume,
}

impl ResourceKind {
    /// Menu order
    pub fn all() -> &'static [ResourceKind] {
        &[ResourceKind::Image, ResourceKind::Container, ResourceKind::Volume]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Image => "Images",
            ResourceKind::Container => "Containers",
            ResourceKind::Volume => "Volumes",
        }
    }

    /// Menu shortcut key
    pub fn shortcut(&self) -> char {
        match self {
            ResourceKind::Image => '1',
            ResourceKind::Container => '2',
            ResourceKind::Volume => '3',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.shortcut() == c)
    }

    /// Actions offered by the modal for a subject of this kind, in button order
    pub fn actions(&self) -> &'static [ActionLabel] {
        match self {
            ResourceKind::Image => &[ActionLabel::Run, ActionLabel::Remove],
            ResourceKind::Container => &[ActionLabel::Stop, ActionLabel::Remove, ActionLabel::Logs],
            ResourceKind::Volume => &[ActionLabel::Remove],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Image => "image",
            ResourceKind::Container => "container",
            ResourceKind::Volume => "volume",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" | "images" => Ok(ResourceKind::Image),
            "container" | "containers" => Ok(ResourceKind::Container),
            "volume" | "volumes" => Ok(ResourceKind::Volume),
            other => Err(format!("unknown resource kind '{}'", other)),
        }
    }
}

/// Modal button labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionLabel {
    Run,
    Remove,
    Stop,
    Logs,
}

impl ActionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLabel::Run => "run",
            ActionLabel::Remove => "remove",
            ActionLabel::Stop => "stop",
            ActionLabel::Logs => "logs",
        }
    }

    /// Logs is the only action that leaves engine state untouched
    pub fn is_read_only(&self) -> bool {
        matches!(self, ActionLabel::Logs)
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder label the engine uses for untagged images
pub const UNTAGGED_IMAGE: &str = "<none>:<none>";

/// One row of a resource listing. Rebuilt on every refresh, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub id: String,
    pub label: String,
    pub kind: ResourceKind,
}

impl ResourceEntry {
    pub fn new(kind: ResourceKind, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }

    /// Reference handed to the engine when running an image: the tag when
    /// there is one, the image id otherwise
    pub fn image_ref(&self) -> &str {
        if self.label.is_empty() || self.label == UNTAGGED_IMAGE {
            &self.id
        } else {
            &self.label
        }
    }
}

/// Shorten an engine id for display (sha256 prefix stripped, 12 chars)
pub fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    match id.char_indices().nth(12) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_table() {
        assert_eq!(
            ResourceKind::Image.actions(),
            &[ActionLabel::Run, ActionLabel::Remove]
        );
        assert_eq!(
            ResourceKind::Container.actions(),
            &[ActionLabel::Stop, ActionLabel::Remove, ActionLabel::Logs]
        );
        assert_eq!(ResourceKind::Volume.actions(), &[ActionLabel::Remove]);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("images".parse::<ResourceKind>(), Ok(ResourceKind::Image));
        assert_eq!("Container".parse::<ResourceKind>(), Ok(ResourceKind::Container));
        assert!("network".parse::<ResourceKind>().is_err());
        assert_eq!(ResourceKind::from_shortcut('3'), Some(ResourceKind::Volume));
        assert_eq!(ResourceKind::from_shortcut('9'), None);
    }

    #[test]
    fn test_image_ref() {
        let tagged = ResourceEntry::new(ResourceKind::Image, "sha256:abc", "nginx:latest");
        assert_eq!(tagged.image_ref(), "nginx:latest");

        let untagged = ResourceEntry::new(ResourceKind::Image, "sha256:abc", UNTAGGED_IMAGE);
        assert_eq!(untagged.image_ref(), "sha256:abc");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("sha256:0123456789abcdef"), "0123456789ab");
        assert_eq!(short_id("abc"), "abc");
    }
}
