//! # Query Flows
//!
//! `QueryService<TcpNodeClient, _>` against a set of mock peers where some
//! are honest, some lie and some are unreachable.

#[cfg(test)]
mod tests {
    use crate::harness::{block_hash_of, dead_host, pseudo_block, trailer_file, MockPeer, PeerScript};
    use mc_01_transport::{Opcode, TransportConfig};
    use mc_03_quorum::{QuorumConfig, QuorumEngine, QuorumError};
    use mc_04_queries::{FixedSampler, QueryConfig, QueryError, QueryService, TcpNodeClient};
    use shared_types::{
        Address, Destination, Peer, TxEntry, TxHeader, TxTrailer, WotsValidation,
    };
    use std::sync::Arc;
    use std::time::Duration;

    type TcpService = QueryService<TcpNodeClient, FixedSampler>;

    /// Live peers in order, plus `dead` unreachable hosts at the end.
    struct Network {
        peers: Vec<MockPeer>,
        service: TcpService,
    }

    async fn network(scripts: Vec<PeerScript>, dead: usize) -> Network {
        let mut peers = Vec::new();
        for script in scripts {
            peers.push(MockPeer::spawn(script).await.unwrap());
        }
        let mut hosts: Vec<Peer> = peers.iter().map(|p| Peer::new(p.host())).collect();
        for _ in 0..dead {
            hosts.push(Peer::new(dead_host().await.unwrap()));
        }

        let service = QueryService::new(
            Arc::new(TcpNodeClient::new(TransportConfig::for_testing())),
            Arc::new(FixedSampler::new(hosts)),
            QuorumEngine::new(QuorumConfig {
                deadline: Duration::from_secs(2),
                threshold_override: None,
            }),
            QueryConfig {
                sample_size: 5,
                max_block_attempts: 3,
                trailer_page_size: 4,
                download_timeout: Duration::from_secs(1),
            },
        );
        Network { peers, service }
    }

    fn tx() -> TxEntry {
        TxEntry {
            header: TxHeader {
                options: [0; 4],
                source: Address::new([9; 20], [9; 20]),
                change: Address::new([8; 20], [8; 20]),
                send_total: 10,
                change_total: 0,
                fee_total: 500,
                blocks_to_live: 0,
            },
            destinations: vec![Destination {
                tag: [7; 20],
                reference: [0; 16],
                amount: 10,
            }],
            wots: WotsValidation::default(),
            trailer: TxTrailer::default(),
        }
    }

    // =========================================================================
    // TEST GROUP 1: Agreement
    // =========================================================================

    #[tokio::test]
    async fn test_latest_block_outvotes_liar_and_dead_peer() {
        let net = network(
            vec![
                PeerScript::at_block(100),
                PeerScript::at_block(99),
                PeerScript::at_block(100),
                PeerScript::at_block(100),
            ],
            1,
        )
        .await;

        assert_eq!(net.service.latest_block_number().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_split_network_has_no_quorum() {
        let net = network(
            vec![
                PeerScript::at_block(10),
                PeerScript::at_block(10),
                PeerScript::at_block(11),
                PeerScript::at_block(11),
            ],
            1,
        )
        .await;

        let err = net.service.latest_block_number().await.unwrap_err();
        assert!(matches!(
            err,
            QueryError::NoQuorum(QuorumError::NoQuorum { required: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_balance_majority() {
        let honest = Address::new([1; 20], [2; 20]).with_amount(50);
        let inflated = honest.with_amount(51);
        let net = network(
            vec![
                PeerScript::at_block(1).with_account(inflated),
                PeerScript::at_block(1).with_account(honest),
                PeerScript::at_block(1).with_account(honest),
                PeerScript::at_block(1).with_account(honest),
            ],
            1,
        )
        .await;

        let balance = net.service.balance_hex(&Address::new([1; 20], [2; 20]).to_hex()).await;
        assert_eq!(balance.unwrap(), 50);
    }

    // =========================================================================
    // TEST GROUP 2: Verified download and trailers
    // =========================================================================

    #[tokio::test]
    async fn test_block_download_rejects_tampered_copy() {
        let good = pseudo_block(7, 1_000);
        let tampered = pseudo_block(7, 2_000);
        let hash = block_hash_of(&good);
        let net = network(
            vec![
                PeerScript::at_block(7).with_served_block(7, hash, tampered),
                PeerScript::at_block(7).with_block(7, good.clone()),
                PeerScript::at_block(7).with_block(7, good.clone()),
                PeerScript::at_block(7).with_block(7, good.clone()),
            ],
            1,
        )
        .await;

        let block = net.service.block(0).await.unwrap();

        assert_eq!(block.number(), 7);
        assert_eq!(block.trailer.bhash, hash);
        assert!(net.peers[0].opcodes().contains(&Opcode::GetBlock));
        assert!(net.peers[1].opcodes().contains(&Opcode::GetBlock));
    }

    #[tokio::test]
    async fn test_endless_download_moves_to_next_peer() {
        let good = pseudo_block(7, 1_000);
        let hash = block_hash_of(&good);
        let net = network(
            vec![
                PeerScript::at_block(7)
                    .with_hash(7, hash)
                    .with_drip_feed(Duration::from_millis(100)),
                PeerScript::at_block(7).with_block(7, good.clone()),
                PeerScript::at_block(7).with_block(7, good.clone()),
            ],
            0,
        )
        .await;

        let started = std::time::Instant::now();
        let bytes = net.service.block_bytes(7).await.unwrap();

        assert_eq!(bytes, good);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(net.peers[0].opcodes().contains(&Opcode::GetBlock));
        assert!(net.peers[1].opcodes().contains(&Opcode::GetBlock));
    }

    #[tokio::test]
    async fn test_trailers_across_pages() {
        let scripts = (0..3)
            .map(|_| {
                PeerScript::at_block(10)
                    .with_trailers(trailer_file(10))
                    .with_chunk_size(200)
            })
            .collect();
        let net = network(scripts, 0).await;

        let trailers = net.service.trailers(1, 9).await.unwrap();
        // Requests outvoted by the first two answers finish in the background.
        tokio::time::sleep(Duration::from_millis(200)).await;

        let numbers: Vec<u64> = trailers.iter().map(|t| t.bnum).collect();
        assert_eq!(numbers, (1..10).collect::<Vec<_>>());
        let mut ranges: Vec<(u32, u32)> = net.peers[0]
            .requests()
            .iter()
            .map(|env| env.trailer_range())
            .collect();
        ranges.sort();
        assert_eq!(ranges, vec![(1, 4), (5, 4), (9, 1)]);
    }

    // =========================================================================
    // TEST GROUP 3: Submission
    // =========================================================================

    #[tokio::test]
    async fn test_submit_reaches_live_peers() {
        let net = network(vec![PeerScript::at_block(1), PeerScript::at_block(1)], 1).await;

        let accepted = net.service.submit_transaction(&tx()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(accepted, 2);
        for peer in &net.peers {
            assert_eq!(peer.opcodes(), vec![Opcode::SubmitTx]);
        }
    }
}
