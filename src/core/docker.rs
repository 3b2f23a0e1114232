/// Docker engine integration
///
/// Implements `ResourceClient` on top of the bollard API client.

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, ListContainersOptions, LogsOptions, StartContainerOptions,
};
use bollard::image::ListImagesOptions;
use bollard::models::{ContainerSummary, ImageSummary};
use bollard::volume::ListVolumesOptions;
use bollard::{Docker, API_DEFAULT_VERSION};
use futures::StreamExt;

use crate::core::client::ResourceClient;
use crate::core::error::{ConsoleError, ConsoleResult};
use crate::core::resource::{short_id, ResourceEntry, ResourceKind, UNTAGGED_IMAGE};
use crate::utils::strip_ansi_codes;

/// How to reach the engine
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// `unix:///path`, `tcp://host:port` or `http://host:port`; local defaults when unset
    pub host: Option<String>,
    pub timeout_secs: u64,
    /// Number of trailing log lines to fetch, everything when unset
    pub log_tail: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            host: None,
            timeout_secs: 120,
            log_tail: None,
        }
    }
}

#[derive(Clone)]
pub struct DockerClient {
    docker: Docker,
    log_tail: Option<usize>,
}

impl DockerClient {
    /// Connect and ping the daemon. This is the only place an unreachable
    /// engine is reported as fatal.
    pub async fn connect(settings: &EngineSettings) -> ConsoleResult<Self> {
        let unreachable = |e: bollard::errors::Error| ConsoleError::EngineUnreachable(e.to_string());

        let docker = match settings.host.as_deref() {
            Some(host) if host.starts_with("unix://") => {
                Docker::connect_with_socket(host, settings.timeout_secs, API_DEFAULT_VERSION)
                    .map_err(unreachable)?
            }
            Some(host) if host.starts_with("tcp://") || host.starts_with("http://") => {
                Docker::connect_with_http(host, settings.timeout_secs, API_DEFAULT_VERSION)
                    .map_err(unreachable)?
            }
            Some(other) => {
                return Err(ConsoleError::EngineUnreachable(format!(
                    "unsupported docker host '{}'",
                    other
                )))
            }
            None => Docker::connect_with_local_defaults().map_err(unreachable)?,
        };

        docker.ping().await.map_err(|e| {
            ConsoleError::EngineUnreachable(format!("{} (is Docker running?)", e))
        })?;
        tracing::info!(host = settings.host.as_deref().unwrap_or("local"), "connected to docker");

        Ok(Self {
            docker,
            log_tail: settings.log_tail,
        })
    }

    async fn list_images(&self) -> ConsoleResult<Vec<ResourceEntry>> {
        let images = self
            .docker
            .list_images(Some(ListImagesOptions::<String> {
                all: false,
                ..Default::default()
            }))
            .await
            .map_err(|e| ConsoleError::engine(ResourceKind::Image, "list", e))?;

        Ok(images.into_iter().map(image_entry).collect())
    }

    async fn list_containers(&self) -> ConsoleResult<Vec<ResourceEntry>> {
        let containers = self
            .docker
            .list_containers(Some(ListContainersOptions::<String> {
                all: true,
                ..Default::default()
            }))
            .await
            .map_err(|e| ConsoleError::engine(ResourceKind::Container, "list", e))?;

        Ok(containers.into_iter().map(container_entry).collect())
    }

    async fn list_volumes(&self) -> ConsoleResult<Vec<ResourceEntry>> {
        let response = self
            .docker
            .list_volumes(None::<ListVolumesOptions<String>>)
            .await
            .map_err(|e| ConsoleError::engine(ResourceKind::Volume, "list", e))?;

        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|v| ResourceEntry::new(ResourceKind::Volume, v.name.clone(), v.name))
            .collect())
    }
}

/// Image row: first repo tag, or the untagged placeholder
fn image_entry(summary: ImageSummary) -> ResourceEntry {
    let label = summary
        .repo_tags
        .first()
        .cloned()
        .unwrap_or_else(|| UNTAGGED_IMAGE.to_string());
    ResourceEntry::new(ResourceKind::Image, summary.id, label)
}

/// Container row: `image(short-id) status`
fn container_entry(summary: ContainerSummary) -> ResourceEntry {
    let id = summary.id.unwrap_or_default();
    let image = summary.image.unwrap_or_else(|| "unknown".to_string());
    let status = summary.status.unwrap_or_default();
    let label = format!("{}({}) {}", image, short_id(&id), status);
    ResourceEntry::new(ResourceKind::Container, id, label.trim_end())
}

#[async_trait]
impl ResourceClient for DockerClient {
    async fn list(&self, kind: ResourceKind) -> ConsoleResult<Vec<ResourceEntry>> {
        match kind {
            ResourceKind::Image => self.list_images().await,
            ResourceKind::Container => self.list_containers().await,
            ResourceKind::Volume => self.list_volumes().await,
        }
    }

    async fn remove(&self, kind: ResourceKind, id: &str) -> ConsoleResult<()> {
        let result = match kind {
            ResourceKind::Image => self.docker.remove_image(id, None, None).await.map(|_| ()),
            ResourceKind::Container => self.docker.remove_container(id, None).await,
            ResourceKind::Volume => self.docker.remove_volume(id, None).await,
        };
        result.map_err(|e| ConsoleError::engine(kind, "remove", e))?;
        tracing::info!(kind = %kind, id, "removed");
        Ok(())
    }

    async fn stop(&self, container_id: &str) -> ConsoleResult<()> {
        self.docker
            .stop_container(container_id, None)
            .await
            .map_err(|e| ConsoleError::engine(ResourceKind::Container, "stop", e))?;
        tracing::info!(id = container_id, "container stopped");
        Ok(())
    }

    async fn run(&self, image_ref: &str) -> ConsoleResult<String> {
        let config = Config {
            image: Some(image_ref.to_string()),
            ..Default::default()
        };

        let created = self
            .docker
            .create_container(None::<CreateContainerOptions<String>>, config)
            .await
            .map_err(|e| ConsoleError::engine(ResourceKind::Image, "run", e))?;

        self.docker
            .start_container(&created.id, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| ConsoleError::engine(ResourceKind::Image, "run", e))?;

        tracing::info!(image = image_ref, container = %created.id, "container started");
        Ok(created.id)
    }

    async fn fetch_logs(&self, container_id: &str) -> ConsoleResult<String> {
        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            follow: false,
            tail: self
                .log_tail
                .map(|n| n.to_string())
                .unwrap_or_else(|| "all".to_string()),
            ..Default::default()
        };

        let mut stream = self.docker.logs(container_id, Some(options));
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ConsoleError::engine(ResourceKind::Container, "logs", e))?;
            text.push_str(&chunk.to_string());
        }

        Ok(strip_ansi_codes(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_entry_label() {
        let tagged = ImageSummary {
            id: "sha256:0123456789abcdef".to_string(),
            repo_tags: vec!["nginx:latest".to_string(), "nginx:1.25".to_string()],
            ..Default::default()
        };
        let entry = image_entry(tagged);
        assert_eq!(entry.id, "sha256:0123456789abcdef");
        assert_eq!(entry.label, "nginx:latest");

        let untagged = ImageSummary {
            id: "sha256:fedcba".to_string(),
            ..Default::default()
        };
        assert_eq!(image_entry(untagged).label, UNTAGGED_IMAGE);
    }

    #[test]
    fn test_container_entry_label() {
        let summary = ContainerSummary {
            id: Some("4f2c9a1b7e3d5c6a8b9d".to_string()),
            image: Some("postgres:16".to_string()),
            status: Some("Up 3 hours".to_string()),
            ..Default::default()
        };
        let entry = container_entry(summary);
        assert_eq!(entry.kind, ResourceKind::Container);
        assert_eq!(entry.id, "4f2c9a1b7e3d5c6a8b9d");
        assert_eq!(entry.label, "postgres:16(4f2c9a1b7e3d) Up 3 hours");
    }

    #[tokio::test]
    async fn test_unsupported_host_is_unreachable() {
        let settings = EngineSettings {
            host: Some("ssh://somewhere".to_string()),
            ..Default::default()
        };
        let result = DockerClient::connect(&settings).await;
        assert!(matches!(result, Err(ConsoleError::EngineUnreachable(_))));
    }

    #[tokio::test]
    async fn test_docker_client_listing() {
        // This test requires Docker to be running
        if let Ok(client) = DockerClient::connect(&EngineSettings::default()).await {
            assert!(client.list(ResourceKind::Volume).await.is_ok());
        }
    }
}
