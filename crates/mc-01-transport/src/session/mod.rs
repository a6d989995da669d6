//! # Peer Session
//!
//! One connection to one peer. A session is opened, handshaken, used for a
//! single request and dropped. Every socket operation runs under its own
//! timeout from [`TransportConfig`]; nothing here retries.

mod requests;


pub use requests::MAX_TRAILERS_PER_REQUEST;

use crate::config::TransportConfig;
use crate::envelope::{Envelope, Opcode, PREFIX_LEN, SUFFIX_LEN};
use crate::error::{Result, TransportError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};

/// A framed connection to a single peer.
pub struct Session<S = TcpStream> {
    stream: S,
    host: String,
    config: TransportConfig,
    id1: u16,
    id2: u16,
    peer_block: u64,
}

impl Session<TcpStream> {
    /// Connect to `host` (`ip` or `ip:port`) without handshaking.
    pub async fn connect(host: &str, config: &TransportConfig) -> Result<Self> {
        let (addr, port) = split_host(host, config.port)?;
        let stream = timeout(config.connect_timeout, TcpStream::connect((addr, port)))
            .await
            .map_err(|_| TransportError::Timeout { op: "connect" })?
            .map_err(|source| TransportError::Connect {
                host: host.to_string(),
                source,
            })?;
        stream.set_nodelay(true)?;
        Ok(Self::from_stream(stream, host, config.clone()))
    }

    /// Connect and complete the handshake.
    pub async fn open(host: &str, config: &TransportConfig) -> Result<Self> {
        let mut session = Self::connect(host, config).await?;
        session.handshake().await?;
        Ok(session)
    }
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an established stream. A fresh random ID1 is chosen.
    pub fn from_stream(stream: S, host: impl Into<String>, config: TransportConfig) -> Self {
        Self {
            stream,
            host: host.into(),
            config,
            id1: rand::random(),
            id2: 0,
            peer_block: 0,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Connection ids currently stamped on outgoing envelopes.
    pub fn ids(&self) -> (u16, u16) {
        (self.id1, self.id2)
    }

    /// Peer's current block number, as reported by the most recent envelope.
    pub fn peer_block(&self) -> u64 {
        self.peer_block
    }

    /// Send HELLO and wait for HELLO-ACK, adopting the peer's ID2.
    pub async fn handshake(&mut self) -> Result<()> {
        self.id2 = 0;
        self.send_op(Opcode::Hello, &[]).await?;
        let ack = self.recv_one().await?;
        if ack.opcode != Opcode::HelloAck {
            return Err(TransportError::UnexpectedOpcode {
                expected: Opcode::HelloAck,
                got: ack.opcode,
            });
        }
        self.id2 = ack.id2;
        debug!(
            peer = %self.host,
            id1 = self.id1,
            id2 = self.id2,
            peer_block = self.peer_block,
            "handshake complete"
        );
        Ok(())
    }

    /// Envelope for `opcode` stamped with this session's ids.
    pub fn envelope(&self, opcode: Opcode) -> Envelope {
        Envelope {
            id1: self.id1,
            id2: self.id2,
            ..Envelope::new(opcode)
        }
    }

    /// Send `opcode` with `payload`.
    pub async fn send_op(&mut self, opcode: Opcode, payload: &[u8]) -> Result<()> {
        let env = self.envelope(opcode).with_payload(payload);
        self.send(&env).await
    }

    /// Serialize and write a fully prepared envelope.
    pub async fn send(&mut self, env: &Envelope) -> Result<()> {
        let bytes = env.encode()?;
        trace!(peer = %self.host, opcode = ?env.opcode, len = bytes.len(), "send");
        timeout(self.config.write_timeout, self.stream.write_all(&bytes))
            .await
            .map_err(|_| TransportError::Timeout { op: "write" })??;
        Ok(())
    }

    /// Read exactly one envelope: the fixed prefix, then the declared
    /// payload plus checksum and trailer.
    pub async fn recv_one(&mut self) -> Result<Envelope> {
        let mut prefix = [0u8; PREFIX_LEN];
        self.read_full(&mut prefix, true).await?;

        let declared = Envelope::declared_payload_len(&prefix);
        let mut bytes = Vec::with_capacity(PREFIX_LEN + declared + SUFFIX_LEN);
        bytes.extend_from_slice(&prefix);
        bytes.resize(PREFIX_LEN + declared + SUFFIX_LEN, 0);
        self.read_full(&mut bytes[PREFIX_LEN..], false).await?;

        let env = Envelope::decode(&bytes)?;
        self.peer_block = env.current_block;
        trace!(peer = %self.host, opcode = ?env.opcode, len = declared, "recv");
        Ok(env)
    }

    /// Collect `SEND_FILE` chunks until the peer closes the connection.
    ///
    /// End of stream after at least one chunk completes the file. Any other
    /// opcode, or end of stream before the first chunk, is an error. The
    /// whole transfer is bounded by `file_timeout` and `max_file_len`.
    pub async fn recv_file(&mut self) -> Result<Vec<u8>> {
        let file_timeout = self.config.file_timeout;
        timeout(file_timeout, self.collect_file())
            .await
            .map_err(|_| TransportError::Timeout { op: "file" })?
    }

    async fn collect_file(&mut self) -> Result<Vec<u8>> {
        let limit = self.config.max_file_len;
        let mut file = Vec::new();
        let mut chunks = 0usize;
        loop {
            let env = match self.recv_one().await {
                Ok(env) => env,
                Err(TransportError::Closed) if chunks > 0 => break,
                Err(e) => return Err(e),
            };
            if env.opcode != Opcode::SendFile {
                return Err(TransportError::UnexpectedOpcode {
                    expected: Opcode::SendFile,
                    got: env.opcode,
                });
            }
            if file.len() + env.payload.len() > limit {
                return Err(TransportError::FileTooLarge { limit });
            }
            file.extend_from_slice(&env.payload);
            chunks += 1;
        }
        debug!(peer = %self.host, chunks, len = file.len(), "file received");
        Ok(file)
    }

    /// Fill `buf` completely. A clean end of stream before the first byte is
    /// reported as `Closed` only when `at_boundary` is set.
    async fn read_full(&mut self, buf: &mut [u8], at_boundary: bool) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = timeout(self.config.read_timeout, self.stream.read(&mut buf[filled..]))
                .await
                .map_err(|_| TransportError::Timeout { op: "read" })??;
            if n == 0 {
                return Err(if filled == 0 && at_boundary {
                    TransportError::Closed
                } else {
                    TransportError::ShortRead {
                        expected: buf.len(),
                        got: filled,
                    }
                });
            }
            filled += n;
        }
        Ok(())
    }
}

/// Split `ip[:port]` into address and port.
pub fn split_host(host: &str, default_port: u16) -> Result<(&str, u16)> {
    match host.rsplit_once(':') {
        Some((addr, port)) if !addr.is_empty() => {
            let port = port
                .parse()
                .map_err(|_| TransportError::InvalidHost(host.to_string()))?;
            Ok((addr, port))
        }
        Some(_) => Err(TransportError::InvalidHost(host.to_string())),
        None if host.is_empty() => Err(TransportError::InvalidHost(host.to_string())),
        None => Ok((host, default_port)),
    }
}
