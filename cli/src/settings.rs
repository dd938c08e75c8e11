//! Client settings: an optional TOML file overlaid with command-line flags.
//!
//! ```toml
//! testnet = true
//! node = "localhost"
//! port = 7000
//! random_peer = false
//! route = "public"
//! banned_peers = ["10.0.0.7"]
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use lisk_sdk::config::{ApiRoute, ClientOptions};

use crate::cli::GlobalArgs;

/// Reads `path` as TOML, or returns mainnet defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<ClientOptions> {
    let Some(path) = path else {
        return Ok(ClientOptions::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
}

/// Flags win over the file.
pub fn apply_overrides(mut options: ClientOptions, args: &GlobalArgs) -> ClientOptions {
    if args.testnet {
        options.testnet = true;
    }
    if args.ssl {
        options.ssl = true;
    }
    if let Some(node) = &args.node {
        options.node = Some(node.clone());
        options.random_peer = false;
    }
    if let Some(port) = args.port {
        options.port = Some(port);
    }
    if let Some(route) = args.route {
        options.route = match route {
            crate::cli::RouteArg::Peer => ApiRoute::Peer,
            crate::cli::RouteArg::Public => ApiRoute::Public,
        };
    }
    options
}

/// Loads the file named by `--config` and applies the other global flags.
pub fn resolve(args: &GlobalArgs) -> Result<ClientOptions> {
    let options = load_options(args.config.as_deref())?;
    Ok(apply_overrides(options, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LiskCli, RouteArg};
    use clap::Parser;
    use std::io::Write;

    fn globals(argv: &[&str]) -> GlobalArgs {
        let mut full = vec!["lisk"];
        full.extend_from_slice(argv);
        full.extend_from_slice(&["address", "5d036a858ce89f844491762eb89e2bfbd50a4a0a0da658e4b2628b25b117ae09"]);
        LiskCli::try_parse_from(full).unwrap().global
    }

    #[test]
    fn missing_file_means_defaults() {
        assert_eq!(load_options(None).unwrap(), ClientOptions::default());
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "testnet = true\nnode = \"localhost\"\nport = 4000\nroute = \"public\"\nbanned_peers = [\"10.0.0.7\"]"
        )
        .unwrap();

        let opts = load_options(Some(file.path())).unwrap();
        assert!(opts.testnet);
        assert_eq!(opts.node.as_deref(), Some("localhost"));
        assert_eq!(opts.port, Some(4000));
        assert_eq!(opts.route, ApiRoute::Public);
        assert_eq!(opts.banned_peers, vec!["10.0.0.7".to_string()]);
        assert!(opts.random_peer, "unset fields keep their defaults");
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        assert!(load_options(Some(file.path())).is_err());
    }

    #[test]
    fn flags_override_file() {
        let base = ClientOptions {
            port: Some(4000),
            ..Default::default()
        };
        let args = globals(&["--node", "10.1.1.1", "--port", "7000", "--route", "public"]);
        assert_eq!(args.route, Some(RouteArg::Public));

        let opts = apply_overrides(base, &args);
        assert_eq!(opts.node.as_deref(), Some("10.1.1.1"));
        assert_eq!(opts.port, Some(7000));
        assert!(!opts.random_peer, "an explicit node pins the client");
        assert_eq!(opts.route, ApiRoute::Public);
    }
}
