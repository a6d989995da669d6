//! # Registry Flows
//!
//! `PeerRegistry<TcpProber>` discovering and benchmarking real sockets.

#[cfg(test)]
mod tests {
    use crate::harness::{dead_host, MockPeer, PeerScript};
    use mc_01_transport::TransportConfig;
    use mc_02_peer_registry::{PeerRegistry, RegistryConfig, TcpProber};
    use std::net::Ipv4Addr;
    use std::sync::Arc;
    use std::time::Duration;

    fn registry(seeds: Vec<String>) -> PeerRegistry<TcpProber> {
        let config = RegistryConfig::for_testing().with_seeds(seeds);
        PeerRegistry::new(config, Arc::new(TcpProber::new(TransportConfig::for_testing())))
    }

    #[tokio::test]
    async fn test_benchmark_measures_live_and_penalizes_dead() {
        let a = MockPeer::spawn(PeerScript::at_block(1)).await.unwrap();
        let b = MockPeer::spawn(PeerScript::at_block(1)).await.unwrap();
        let dead = dead_host().await.unwrap();
        let registry = registry(vec![a.host(), b.host(), dead.clone()]);

        let reachable = registry.benchmark().await.unwrap();

        assert_eq!(reachable, 2);
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 3);
        for peer in &snapshot {
            if peer.host == dead {
                assert_eq!(peer.latency_ms, 10_000);
                assert!(peer.last_seen.is_none());
            } else {
                assert!(peer.latency_ms < 10_000);
                assert!(peer.last_seen.is_some());
            }
        }
    }

    #[tokio::test]
    async fn test_slow_handshake_counts_as_failure() {
        let slow = MockPeer::spawn(
            PeerScript::at_block(1).with_hello_delay(Duration::from_secs(2)),
        )
        .await
        .unwrap();
        let registry = registry(vec![slow.host()]);

        assert_eq!(registry.benchmark().await.unwrap(), 0);
        let peer = &registry.snapshot()[0];
        assert!(peer.last_seen.is_none());
        assert_eq!(peer.latency_ms, 10_000);
    }

    #[tokio::test]
    async fn test_peer_without_chain_is_neither_measured_nor_expanded() {
        let empty = MockPeer::spawn(
            PeerScript::at_block(0).with_peer_list(&[Ipv4Addr::new(10, 9, 8, 5)]),
        )
        .await
        .unwrap();
        let registry = registry(vec![empty.host()]);

        assert_eq!(registry.expand_with_depth(1).await.unwrap(), 0);
        assert_eq!(registry.benchmark().await.unwrap(), 0);
        let peer = &registry.snapshot()[0];
        assert_eq!(peer.latency_ms, 10_000);
        assert!(peer.last_seen.is_none());
        assert!(empty.requests().is_empty());
    }

    #[tokio::test]
    async fn test_expand_learns_advertised_peers() {
        let seed = MockPeer::spawn(
            PeerScript::at_block(1)
                .with_peer_list(&[Ipv4Addr::new(10, 9, 8, 7), Ipv4Addr::new(10, 9, 8, 6)]),
        )
        .await
        .unwrap();
        let registry = registry(vec![seed.host()]);

        let discovered = registry.expand_with_depth(1).await.unwrap();

        assert_eq!(discovered, 2);
        let known = registry.known_hosts();
        assert!(known.contains(&"10.9.8.7".to_string()));
        assert!(known.contains(&"10.9.8.6".to_string()));
        assert!(known.contains(&seed.host()));
    }

    #[tokio::test]
    async fn test_sample_after_benchmark_draws_measured_peers() {
        let peers = [
            MockPeer::spawn(PeerScript::at_block(1)).await.unwrap(),
            MockPeer::spawn(PeerScript::at_block(1)).await.unwrap(),
            MockPeer::spawn(PeerScript::at_block(1)).await.unwrap(),
        ];
        let registry = registry(peers.iter().map(MockPeer::host).collect());
        registry.benchmark().await.unwrap();

        let mut sampled: Vec<String> = registry.sample(10).into_iter().map(|p| p.host).collect();
        sampled.sort();
        let mut expected: Vec<String> = peers.iter().map(MockPeer::host).collect();
        expected.sort();
        assert_eq!(sampled, expected);
    }
}
