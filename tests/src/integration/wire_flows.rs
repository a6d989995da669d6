//! # Wire Flows
//!
//! A single [`mc_01_transport::Session`] against a mock peer: handshake,
//! each request type and its reply shape.

#[cfg(test)]
mod tests {
    use crate::harness::{block_hash_of, dead_host, pseudo_block, trailer_file, MockPeer, PeerScript};
    use mc_01_transport::{Opcode, Session, TransportConfig, TransportError};
    use shared_types::{
        Address, BlockTrailer, Destination, TxEntry, TxHeader, TxTrailer, WotsValidation,
    };
    use std::net::Ipv4Addr;
    use std::time::Duration;

    async fn open(peer: &MockPeer) -> Session {
        Session::open(&peer.host(), &TransportConfig::for_testing())
            .await
            .unwrap()
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
    // TEST GROUP 1: Handshake
    // =========================================================================

    #[tokio::test]
    async fn test_handshake_reports_peer_block() {
        let peer = MockPeer::spawn(PeerScript::at_block(500)).await.unwrap();
        let session = open(&peer).await;
        assert_eq!(session.peer_block(), 500);
        assert_eq!(session.ids().1, 0x2A2A);
    }

    #[tokio::test]
    async fn test_dead_host_is_connection_failure() {
        let host = dead_host().await.unwrap();
        let err = Session::open(&host, &TransportConfig::for_testing())
            .await
            .err()
            .unwrap();
        assert!(err.is_connection_failure());
    }

    // =========================================================================
    // TEST GROUP 2: Requests
    // =========================================================================

    #[tokio::test]
    async fn test_peer_list() {
        let script = PeerScript::at_block(1)
            .with_peer_list(&[Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(192, 168, 1, 20)]);
        let peer = MockPeer::spawn(script).await.unwrap();

        let hosts = open(&peer).await.get_peer_list().await.unwrap();
        assert_eq!(hosts, vec!["10.0.0.1", "192.168.1.20"]);
    }

    #[tokio::test]
    async fn test_balance_known_and_unknown() {
        let funded = Address::new([1; 20], [2; 20]).with_amount(99);
        let peer = MockPeer::spawn(PeerScript::at_block(1).with_account(funded))
            .await
            .unwrap();

        let known = open(&peer)
            .await
            .get_balance(&Address::new([1; 20], [2; 20]))
            .await
            .unwrap();
        assert_eq!(known.amount(), 99);

        let stranger = Address::new([3; 20], [4; 20]);
        let unknown = open(&peer).await.get_balance(&stranger).await.unwrap();
        assert_eq!(unknown, stranger);
        assert_eq!(unknown.amount(), 0);
    }

    #[tokio::test]
    async fn test_resolve_tag_requires_full_reply() {
        let registered = Address::new([5; 20], [6; 20]).with_amount(1_000);
        let peer = MockPeer::spawn(PeerScript::at_block(1).with_account(registered))
            .await
            .unwrap();

        let resolved = open(&peer).await.resolve_tag(&[5; 20]).await.unwrap();
        assert_eq!(resolved, registered);

        let err = open(&peer).await.resolve_tag(&[0xEE; 20]).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidPayload { opcode: Opcode::SendBalance, len: 40 }
        ));
    }

    #[tokio::test]
    async fn test_block_streamed_in_chunks() {
        let block = pseudo_block(7, 1_000);
        let script = PeerScript::at_block(7)
            .with_block(7, block.clone())
            .with_chunk_size(50);
        let peer = MockPeer::spawn(script).await.unwrap();

        assert_eq!(open(&peer).await.get_block_bytes(7).await.unwrap(), block);
        assert_eq!(
            open(&peer).await.get_block_hash(7).await.unwrap(),
            block_hash_of(&block)
        );
    }

    #[tokio::test]
    async fn test_block_hash_zero_means_current_block() {
        let block = pseudo_block(12, 1_000);
        let peer = MockPeer::spawn(PeerScript::at_block(12).with_block(12, block.clone()))
            .await
            .unwrap();

        let hash = open(&peer).await.get_block_hash(0).await.unwrap();

        assert_eq!(hash, block_hash_of(&block));
        assert_eq!(peer.requests()[0].block_num, 12);
    }

    #[tokio::test]
    async fn test_trailer_range() {
        let script = PeerScript::at_block(10)
            .with_trailers(trailer_file(10))
            .with_chunk_size(300);
        let peer = MockPeer::spawn(script).await.unwrap();

        let file = open(&peer).await.get_trailer_bytes(2, 5).await.unwrap();

        let numbers: Vec<u64> = BlockTrailer::decode_many(&file)
            .unwrap()
            .iter()
            .map(|t| t.bnum)
            .collect();
        assert_eq!(numbers, vec![2, 3, 4, 5, 6]);
        assert_eq!(peer.requests()[0].trailer_range(), (2, 5));
    }

    #[tokio::test]
    async fn test_oversized_trailer_request_is_not_sent() {
        let peer = MockPeer::spawn(PeerScript::at_block(1)).await.unwrap();
        let mut session = open(&peer).await;

        let err = session.get_trailer_bytes(0, 1001).await.unwrap_err();

        assert!(matches!(err, TransportError::TooManyTrailers(1001)));
        assert!(peer.requests().is_empty());
    }

    #[tokio::test]
    async fn test_submitted_transaction_reaches_peer_intact() {
        let peer = MockPeer::spawn(PeerScript::at_block(1)).await.unwrap();
        let mut session = open(&peer).await;

        session.submit_transaction(&tx()).await.unwrap();
        drop(session);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let requests = peer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].opcode, Opcode::SubmitTx);
        assert_eq!(TxEntry::decode(&requests[0].payload).unwrap(), tx());
    }
}
