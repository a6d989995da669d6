//! Typed per-peer requests. Each runs on an already handshaken session.

use super::Session;
use crate::envelope::{Envelope, Opcode};
use crate::error::{Result, TransportError};
use shared_types::{Address, Hash, TxEntry, ADDR_LEN, AMOUNT_LEN, BTRAILER_LEN};
use std::net::Ipv4Addr;
use tokio::io::{AsyncRead, AsyncWrite};

/// Most trailers a peer will serve for one partial-trailer request.
pub const MAX_TRAILERS_PER_REQUEST: u32 = 1000;

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Ask the peer for the peers it knows.
    pub async fn get_peer_list(&mut self) -> Result<Vec<String>> {
        self.send_op(Opcode::GetPeerList, &[]).await?;
        let reply = self.expect(Opcode::SendPeerList).await?;
        Ok(reply
            .payload
            .chunks_exact(4)
            .map(|ip| Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]).to_string())
            .collect())
    }

    /// Balance lookup. An address unknown to the peer's ledger comes back
    /// without an amount and reads as zero.
    pub async fn get_balance(&mut self, address: &Address) -> Result<Address> {
        self.send_op(Opcode::GetBalance, &address.encode()).await?;
        let reply = self.expect(Opcode::SendBalance).await?;
        match reply.payload.len() {
            len if len == ADDR_LEN || len == ADDR_LEN + AMOUNT_LEN => {
                Ok(Address::decode(&reply.payload)?)
            }
            len => Err(TransportError::InvalidPayload {
                opcode: Opcode::SendBalance,
                len,
            }),
        }
    }

    /// Resolve a tag to its full address and balance.
    pub async fn resolve_tag(&mut self, tag: &[u8]) -> Result<Address> {
        self.send_op(Opcode::GetBalance, tag).await?;
        let reply = self.expect(Opcode::SendBalance).await?;
        if reply.payload.len() != ADDR_LEN + AMOUNT_LEN {
            return Err(TransportError::InvalidPayload {
                opcode: Opcode::SendBalance,
                len: reply.payload.len(),
            });
        }
        Ok(Address::decode(&reply.payload)?)
    }

    /// Hash of block `block_num`; zero asks for the peer's current block.
    pub async fn get_block_hash(&mut self, block_num: u64) -> Result<Hash> {
        let mut request = self.envelope(Opcode::GetHash);
        request.block_num = if block_num == 0 {
            self.peer_block
        } else {
            block_num
        };
        self.send(&request).await?;

        let reply = self.expect(Opcode::GetHash).await?;
        let hash: Hash = reply
            .payload
            .as_slice()
            .try_into()
            .map_err(|_| TransportError::InvalidPayload {
                opcode: Opcode::GetHash,
                len: reply.payload.len(),
            })?;
        Ok(hash)
    }

    /// Raw bytes of block `block_num`, streamed as a file.
    pub async fn get_block_bytes(&mut self, block_num: u64) -> Result<Vec<u8>> {
        let mut request = self.envelope(Opcode::GetBlock);
        request.block_num = block_num;
        self.send(&request).await?;
        self.recv_file().await
    }

    /// `count` consecutive 160-byte trailers starting at block `start`.
    pub async fn get_trailer_bytes(&mut self, start: u32, count: u32) -> Result<Vec<u8>> {
        if count > MAX_TRAILERS_PER_REQUEST {
            return Err(TransportError::TooManyTrailers(count));
        }
        let mut request = self.envelope(Opcode::GetPartialTrailerFile);
        request.set_trailer_range(start, count);
        self.send(&request).await?;

        let file = self.recv_file().await?;
        if file.len() % BTRAILER_LEN != 0 {
            return Err(TransportError::InvalidPayload {
                opcode: Opcode::SendFile,
                len: file.len(),
            });
        }
        Ok(file)
    }

    /// Send a transaction. The peer does not reply.
    pub async fn submit_transaction(&mut self, tx: &TxEntry) -> Result<()> {
        let payload = tx.encode()?;
        self.send_op(Opcode::SubmitTx, &payload).await
    }

    async fn expect(&mut self, opcode: Opcode) -> Result<Envelope> {
        let reply = self.recv_one().await?;
        if reply.opcode != opcode {
            return Err(TransportError::UnexpectedOpcode {
                expected: opcode,
                got: reply.opcode,
            });
        }
        Ok(reply)
    }
}
