//! # Mock Peers
//!
//! TCP listeners on `127.0.0.1:0` that answer the wire protocol from a
//! scripted [`PeerScript`]. Every accepted connection is served by its own
//! task: HELLO / HELLO-ACK, then requests until the client hangs up. File
//! replies are streamed in `chunk_size` pieces and end with a close.

use mc_01_transport::{Envelope, Opcode, Session, TransportConfig};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use shared_types::{
    Address, BlockTrailer, Hash, ADDR_LEN, ADDR_TAG_LEN, BTRAILER_LEN, HASH_LEN,
};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// What a mock peer knows and how it behaves.
#[derive(Debug, Clone)]
pub struct PeerScript {
    pub current_block: u64,
    pub hashes: HashMap<u64, Hash>,
    pub blocks: HashMap<u64, Vec<u8>>,
    pub ledger: HashMap<[u8; ADDR_TAG_LEN], Address>,
    pub peer_list: Vec<Ipv4Addr>,
    /// Trailers of blocks `0..` as one file.
    pub trailers: Vec<u8>,
    /// Largest `SEND_FILE` payload.
    pub chunk_size: usize,
    /// Pause before answering HELLO.
    pub hello_delay: Duration,
    /// Answer block requests with an endless chunk stream at this interval.
    pub drip_interval: Option<Duration>,
}

impl PeerScript {
    pub fn at_block(current_block: u64) -> Self {
        Self {
            current_block,
            hashes: HashMap::new(),
            blocks: HashMap::new(),
            ledger: HashMap::new(),
            peer_list: Vec::new(),
            trailers: Vec::new(),
            chunk_size: 1024,
            hello_delay: Duration::ZERO,
            drip_interval: None,
        }
    }

    /// Serve `bytes` as block `number` and its hash.
    pub fn with_block(mut self, number: u64, bytes: Vec<u8>) -> Self {
        let hash = block_hash_of(&bytes);
        self.hashes.insert(number, hash);
        self.blocks.insert(number, bytes);
        self
    }

    /// Advertise `hash` for block `number` without serving the block.
    pub fn with_hash(mut self, number: u64, hash: Hash) -> Self {
        self.hashes.insert(number, hash);
        self
    }

    /// Serve `bytes` for block `number` while advertising `hash`.
    pub fn with_served_block(mut self, number: u64, hash: Hash, bytes: Vec<u8>) -> Self {
        self.hashes.insert(number, hash);
        self.blocks.insert(number, bytes);
        self
    }

    pub fn with_account(mut self, address: Address) -> Self {
        self.ledger.insert(*address.tag(), address);
        self
    }

    pub fn with_peer_list(mut self, peers: &[Ipv4Addr]) -> Self {
        self.peer_list = peers.to_vec();
        self
    }

    pub fn with_trailers(mut self, file: Vec<u8>) -> Self {
        self.trailers = file;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_hello_delay(mut self, delay: Duration) -> Self {
        self.hello_delay = delay;
        self
    }

    /// Never finish a block download: send a chunk every `interval`.
    pub fn with_drip_feed(mut self, interval: Duration) -> Self {
        self.drip_interval = Some(interval);
        self
    }
}

/// A running mock peer. Dropping it stops the listener.
pub struct MockPeer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Envelope>>>,
    listener: JoinHandle<()>,
}

impl MockPeer {
    /// Bind `127.0.0.1:0` and start serving `script`.
    pub async fn spawn(script: PeerScript) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let script = Arc::new(script);

        let log = Arc::clone(&received);
        let listener = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let script = Arc::clone(&script);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    serve(stream, &script, &log).await;
                });
            }
        });

        Ok(Self {
            addr,
            received,
            listener,
        })
    }

    /// `127.0.0.1:port`, usable as a peer host.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Every envelope received after the handshake, in arrival order.
    pub fn requests(&self) -> Vec<Envelope> {
        self.received.lock().clone()
    }

    pub fn opcodes(&self) -> Vec<Opcode> {
        self.received.lock().iter().map(|env| env.opcode).collect()
    }
}

impl Drop for MockPeer {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// A host nothing listens on.
pub async fn dead_host() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr.to_string())
}

async fn serve(stream: TcpStream, script: &PeerScript, log: &Mutex<Vec<Envelope>>) {
    let mut session = Session::from_stream(stream, "client", TransportConfig::for_testing());
    let Ok(hello) = session.recv_one().await else {
        return;
    };
    if hello.opcode != Opcode::Hello {
        return;
    }
    tokio::time::sleep(script.hello_delay).await;
    let ack = Envelope {
        id2: 0x2A2A,
        current_block: script.current_block,
        ..Envelope::reply_to(&hello, Opcode::HelloAck)
    };
    if session.send(&ack).await.is_err() {
        return;
    }

    while let Ok(request) = session.recv_one().await {
        log.lock().push(request.clone());
        let reply = |opcode: Opcode, payload: Vec<u8>| Envelope {
            current_block: script.current_block,
            ..Envelope::reply_to(&request, opcode).with_payload(payload)
        };

        let outcome = match request.opcode {
            Opcode::GetPeerList => {
                let payload = script.peer_list.iter().flat_map(|ip| ip.octets()).collect();
                session.send(&reply(Opcode::SendPeerList, payload)).await
            }
            Opcode::GetBalance => {
                let payload = balance_reply(script, &request.payload);
                session.send(&reply(Opcode::SendBalance, payload)).await
            }
            Opcode::GetHash => match script.hashes.get(&request.block_num) {
                Some(hash) => session.send(&reply(Opcode::GetHash, hash.to_vec())).await,
                None => return,
            },
            Opcode::GetBlock => {
                if let Some(interval) = script.drip_interval {
                    drip_file(&mut session, &request, script, interval).await;
                } else if let Some(bytes) = script.blocks.get(&request.block_num) {
                    send_file(&mut session, &request, script, bytes).await;
                }
                return;
            }
            Opcode::GetPartialTrailerFile => {
                let (start, count) = request.trailer_range();
                let from = (start as usize * BTRAILER_LEN).min(script.trailers.len());
                let to = ((start as usize + count as usize) * BTRAILER_LEN).min(script.trailers.len());
                send_file(&mut session, &request, script, &script.trailers[from..to]).await;
                return;
            }
            // Fire-and-forget; keep reading until the client closes.
            Opcode::SubmitTx => Ok(()),
            _ => return,
        };
        if outcome.is_err() {
            return;
        }
    }
}

fn balance_reply(script: &PeerScript, query: &[u8]) -> Vec<u8> {
    let Some(tag) = query.get(..ADDR_TAG_LEN) else {
        return query.to_vec();
    };
    let known = <[u8; ADDR_TAG_LEN]>::try_from(tag)
        .ok()
        .and_then(|tag| script.ledger.get(&tag));
    match known {
        Some(address) => address.encode_with_amount().to_vec(),
        // Unknown: echo the address without an amount.
        None => query.iter().copied().chain(std::iter::repeat(0)).take(ADDR_LEN).collect(),
    }
}

async fn send_file(
    session: &mut Session<TcpStream>,
    request: &Envelope,
    script: &PeerScript,
    file: &[u8],
) {
    for chunk in file.chunks(script.chunk_size) {
        let env = Envelope {
            current_block: script.current_block,
            ..Envelope::reply_to(request, Opcode::SendFile).with_payload(chunk)
        };
        if session.send(&env).await.is_err() {
            return;
        }
    }
}

async fn drip_file(
    session: &mut Session<TcpStream>,
    request: &Envelope,
    script: &PeerScript,
    interval: Duration,
) {
    loop {
        let env = Envelope {
            current_block: script.current_block,
            ..Envelope::reply_to(request, Opcode::SendFile).with_payload(vec![0; script.chunk_size])
        };
        if session.send(&env).await.is_err() {
            return;
        }
        tokio::time::sleep(interval).await;
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

/// SHA-256 over everything but the trailing hash field.
pub fn block_hash_of(bytes: &[u8]) -> Hash {
    Sha256::digest(&bytes[..bytes.len() - HASH_LEN]).into()
}

/// A pseudo-block for `bnum` whose trailing hash field matches its bytes.
pub fn pseudo_block(bnum: u64, stime: u32) -> Vec<u8> {
    let trailer = BlockTrailer {
        bnum,
        stime,
        ..BlockTrailer::default()
    };
    let mut bytes = 4u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&trailer.encode());
    let hash = block_hash_of(&bytes);
    let at = bytes.len() - HASH_LEN;
    bytes[at..].copy_from_slice(&hash);
    bytes
}

/// Trailers for blocks `0..count`.
pub fn trailer_file(count: u64) -> Vec<u8> {
    (0..count)
        .flat_map(|bnum| {
            BlockTrailer {
                bnum,
                difficulty: 20,
                ..BlockTrailer::default()
            }
            .encode()
        })
        .collect()
}
