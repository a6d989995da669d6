//! # Client Settings
//!
//! The persisted form of every layer's configuration, stored as pretty JSON.
//! A copy of `settings.json` is compiled into the binary and used whenever
//! the file on disk is missing or unreadable.

use mc_01_transport::TransportConfig;
use mc_02_peer_registry::RegistryConfig;
use mc_03_quorum::QuorumConfig;
use mc_04_queries::QueryConfig;
use serde::{Deserialize, Serialize};
use shared_types::Peer;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const EMBEDDED_SETTINGS: &str = include_str!("../settings.json");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hosts discovery starts from.
    pub seed_peers: Vec<String>,
    /// Hosts learned from peer lists but never measured.
    pub known_hosts: Vec<String>,
    /// Measured peers with latency and last-seen time.
    pub peers: Vec<Peer>,
    pub expand_depth: usize,
    /// Peers per quorum query. The quorum is half of this plus one.
    pub sample_size: usize,
    pub query_timeout_secs: u64,
    /// Download attempts for a hash-verified block.
    pub max_query_attempts: usize,
    pub benchmark_batch_size: usize,
    /// Query only the seed peers.
    pub force_seed_peers: bool,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        let query = QueryConfig::default();
        let registry = RegistryConfig::default();
        Self {
            seed_peers: Vec::new(),
            known_hosts: Vec::new(),
            peers: Vec::new(),
            expand_depth: registry.expand_depth,
            sample_size: query.sample_size,
            query_timeout_secs: QuorumConfig::default().deadline.as_secs(),
            max_query_attempts: query.max_block_attempts,
            benchmark_batch_size: registry.benchmark_batch_size,
            force_seed_peers: registry.force_seed_peers,
            port: TransportConfig::default().port,
        }
    }
}

impl Settings {
    /// Settings compiled into the binary.
    pub fn embedded() -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(EMBEDDED_SETTINGS)?)
    }

    /// Read settings from `path`.
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Read settings from `path`, falling back to the embedded defaults.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                info!(path = %path.display(), peers = settings.peers.len(), "settings loaded");
                settings
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "using embedded default settings");
                Self::embedded().unwrap_or_default()
            }
        }
    }

    /// Write settings to `path` as JSON indented by four spaces.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        out.push(b'\n');
        fs::write(path, out).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    // =========================================================================
    // LAYER CONFIGS
    // =========================================================================

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            port: self.port,
            ..TransportConfig::default()
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            seed_peers: self.seed_peers.clone(),
            expand_depth: self.expand_depth,
            round_timeout: self.query_timeout(),
            benchmark_batch_size: self.benchmark_batch_size.max(1),
            force_seed_peers: self.force_seed_peers,
            ..RegistryConfig::default()
        }
    }

    pub fn quorum_config(&self) -> QuorumConfig {
        QuorumConfig {
            deadline: self.query_timeout(),
            ..QuorumConfig::default()
        }
    }

    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            sample_size: self.sample_size,
            max_block_attempts: self.max_query_attempts,
            ..QueryConfig::default()
        }
    }

    fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs.max(1))
    }
}
