use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_DEMO_PATH: &str = "/Validation31TestServlet";

/// Paths owned by the router that the demo page may not shadow.
pub const RESERVED_PATHS: &[&str] = &["/health", "/ready", "/metrics", "/api"];

fn default_http_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9080))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub http_bind_address: SocketAddr,
    /// Route serving the HTML demo report
    pub demo_path: String,
    /// Whether the `/api/demos` routes are mounted
    pub json_api: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_bind_address: default_http_bind(),
            demo_path: DEFAULT_DEMO_PATH.to_string(),
            json_api: true,
        }
    }
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            http_bind: cli_http_bind,
            demo_path: cli_demo_path,
            json_api: cli_json_api,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            http_bind: file_http_bind,
            demo_path: file_demo_path,
            json_api: file_json_api,
        } = file_config;

        let http_bind_address = cli_http_bind
            .or(file_http_bind)
            .unwrap_or_else(default_http_bind);

        let demo_path = cli_demo_path
            .or(file_demo_path)
            .map(|path| path.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_DEMO_PATH.to_string());

        let json_api = cli_json_api.or(file_json_api).unwrap_or(true);

        Ok(Self {
            http_bind_address,
            demo_path,
            json_api,
        })
    }

    /// Fails fast on a demo path the router could not mount.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.demo_path.starts_with('/'),
            "demo path {:?} must start with '/'",
            self.demo_path
        );
        anyhow::ensure!(
            self.demo_path.len() > 1,
            "demo path must not be the root path"
        );
        anyhow::ensure!(
            !self.demo_path.contains(['{', '}', '*', '?', '#']),
            "demo path {:?} contains reserved characters",
            self.demo_path
        );
        for reserved in RESERVED_PATHS {
            let shadowed = self.demo_path == *reserved
                || self
                    .demo_path
                    .strip_prefix(reserved)
                    .is_some_and(|rest| rest.starts_with('/'));
            anyhow::ensure!(
                !shadowed,
                "demo path {:?} collides with reserved route {reserved}",
                self.demo_path
            );
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "record-validation-demo",
    about = "Record validation demo server",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "VALIDATION_DEMO_HTTP_BIND",
        value_name = "ADDR",
        help = "HTTP bind address"
    )]
    pub http_bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "VALIDATION_DEMO_PATH",
        value_name = "PATH",
        help = "Route serving the HTML demo report"
    )]
    pub demo_path: Option<String>,

    #[arg(
        long,
        env = "VALIDATION_DEMO_JSON_API",
        value_name = "BOOL",
        help = "Expose the JSON demo API under /api/demos",
        value_parser = clap::value_parser!(bool)
    )]
    pub json_api: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    http_bind: Option<SocketAddr>,
    demo_path: Option<String>,
    json_api: Option<bool>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_path(path: &str) -> ServerConfig {
        ServerConfig {
            demo_path: path.to_string(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn defaults_without_arguments() {
        let config = ServerConfig::from_args(CliArgs::default()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.http_bind_address.to_string(), "127.0.0.1:9080");
        config.validate().unwrap();
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let args = CliArgs {
            demo_path: Some("/demo/".to_string()),
            ..CliArgs::default()
        };
        let config = ServerConfig::from_args(args).unwrap();
        assert_eq!(config.demo_path, "/demo");
    }

    #[test]
    fn validate_rejects_bad_demo_paths() {
        assert!(with_path("demo").validate().is_err());
        assert!(with_path("").validate().is_err());
        assert!(with_path("/health").validate().is_err());
        assert!(with_path("/api/run").validate().is_err());
        assert!(with_path("/demo/{id}").validate().is_err());
    }

    #[test]
    fn validate_accepts_prefix_lookalikes() {
        with_path("/healthy").validate().unwrap();
        with_path("/apis").validate().unwrap();
        with_path("/demos/run").validate().unwrap();
    }
}
