/// CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::resource::ResourceKind;
use crate::utils::AppConfig;

// Build timestamp injected at compile time
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser, Debug)]
#[command(name = "dcon")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    /// Docker endpoint (unix:///path/docker.sock, tcp://host:port)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Config file (defaults to <config dir>/dcon/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write diagnostics to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Diagnostics level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Number of trailing log lines to fetch
    #[arg(short = 'n', long, global = true)]
    pub tail: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one listing and exit
    List {
        /// images, containers or volumes
        kind: ResourceKind,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a container's logs and exit
    Logs {
        /// Container id or name
        container: String,
    },
}

impl Cli {
    /// Flags win over the config file
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.docker_host = Some(host.clone());
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(tail) = self.tail {
            config.log_tail = Some(tail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["dcon"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_subcommand() {
        let cli = Cli::try_parse_from(["dcon", "list", "containers", "--json"]).unwrap();
        match cli.command {
            Some(Commands::List { kind, json }) => {
                assert_eq!(kind, ResourceKind::Container);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Cli::try_parse_from(["dcon", "list", "networks"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "dcon",
            "--host",
            "tcp://10.0.0.5:2375",
            "--log-level",
            "debug",
            "-n",
            "200",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.docker_host.as_deref(), Some("tcp://10.0.0.5:2375"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_tail, Some(200));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_host_left_unset_without_flag() {
        let cli = Cli::try_parse_from(["dcon", "--log-level", "warn"]).unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.docker_host, None);
        assert_eq!(config.engine_settings().host, None);
    }
}
