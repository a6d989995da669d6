//! # Client Runtime
//!
//! Wires the layers together:
//!
//! ```text
//! Settings ─→ PeerRegistry ─(sampler)─→ QueryService ─→ QuorumEngine
//!                  │                         │
//!                  └── PeerProber            └── NodeClient ─→ Session
//! ```

use crate::settings::Settings;
use mc_02_peer_registry::{PeerProber, PeerRegistry, RegistryError, TcpProber};
use mc_03_quorum::QuorumEngine;
use mc_04_queries::{NodeClient, QueryService, TcpNodeClient};
use mc_telemetry::log_peer_event;
use std::sync::Arc;
use tracing::info;

/// Runtime speaking the wire protocol over TCP.
pub type TcpRuntime = ClientRuntime<TcpProber, TcpNodeClient>;

/// The assembled client.
pub struct ClientRuntime<P: PeerProber, C: NodeClient> {
    settings: Settings,
    registry: Arc<PeerRegistry<P>>,
    queries: QueryService<C, PeerRegistry<P>>,
}

impl TcpRuntime {
    /// Build from settings with TCP adapters.
    pub fn connect(settings: Settings) -> Self {
        let transport = settings.transport_config();
        Self::with_parts(
            settings,
            Arc::new(TcpProber::new(transport.clone())),
            Arc::new(TcpNodeClient::new(transport)),
        )
    }
}

impl<P: PeerProber, C: NodeClient> ClientRuntime<P, C> {
    /// Runtime over arbitrary probe and request adapters.
    pub fn with_parts(settings: Settings, prober: Arc<P>, client: Arc<C>) -> Self {
        let registry = PeerRegistry::new(settings.registry_config(), prober)
            .with_peers(settings.peers.iter().cloned());
        registry.add_hosts(settings.known_hosts.iter().cloned());
        let registry = Arc::new(registry);

        let queries = QueryService::new(
            client,
            Arc::clone(&registry),
            QuorumEngine::new(settings.quorum_config()),
            settings.query_config(),
        );
        info!(
            seeds = settings.seed_peers.len(),
            known = registry.known_hosts().len(),
            measured = registry.len(),
            "client runtime ready"
        );

        Self {
            settings,
            registry,
            queries,
        }
    }

    pub fn registry(&self) -> &PeerRegistry<P> {
        &self.registry
    }

    pub fn queries(&self) -> &QueryService<C, PeerRegistry<P>> {
        &self.queries
    }

    /// Crawl peer lists from the known hosts.
    pub async fn expand(&self) -> Result<usize, RegistryError> {
        self.registry.expand().await
    }

    /// Measure every known host.
    pub async fn benchmark(&self) -> Result<usize, RegistryError> {
        let measured = self.registry.benchmark().await?;
        for peer in self.registry.snapshot() {
            log_peer_event!(debug, "runtime", "peer measured", peer.host, latency_ms = peer.latency_ms);
        }
        Ok(measured)
    }

    /// Current settings with the registry's peers folded in, ready to save.
    pub fn settings(&self) -> Settings {
        let peers = self.registry.snapshot();
        let known_hosts = self
            .registry
            .known_hosts()
            .into_iter()
            .filter(|host| !peers.iter().any(|p| &p.host == host))
            .collect();
        Settings {
            known_hosts,
            peers,
            ..self.settings.clone()
        }
    }
}
