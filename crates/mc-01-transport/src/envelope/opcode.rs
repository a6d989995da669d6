//! Protocol opcodes.

use crate::error::TransportError;

/// Operation code carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    Null = 0,
    /// First step of the handshake.
    Hello = 1,
    /// Handshake acknowledgement; carries the peer-issued ID2.
    HelloAck = 2,
    /// Transaction submission.
    SubmitTx = 3,
    Found = 4,
    GetBlock = 5,
    GetPeerList = 6,
    /// One chunk of a multi-message file transfer.
    SendFile = 7,
    SendPeerList = 8,
    Busy = 9,
    Nack = 10,
    GetTrailerFile = 11,
    /// Balance lookup by address, or tag resolution by tag.
    GetBalance = 12,
    SendBalance = 13,
    ResolveTag = 14,
    GetCandidateBlock = 15,
    MinedBlock = 16,
    GetHash = 17,
    GetPartialTrailerFile = 18,
    Identify = 19,
}

impl Opcode {
    /// Highest defined opcode; anything above is invalid.
    pub const LAST: u16 = Opcode::Identify as u16;

    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for Opcode {
    type Error = TransportError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        use Opcode::*;
        Ok(match value {
            0 => Null,
            1 => Hello,
            2 => HelloAck,
            3 => SubmitTx,
            4 => Found,
            5 => GetBlock,
            6 => GetPeerList,
            7 => SendFile,
            8 => SendPeerList,
            9 => Busy,
            10 => Nack,
            11 => GetTrailerFile,
            12 => GetBalance,
            13 => SendBalance,
            14 => ResolveTag,
            15 => GetCandidateBlock,
            16 => MinedBlock,
            17 => GetHash,
            18 => GetPartialTrailerFile,
            19 => Identify,
            other => return Err(TransportError::InvalidOpcode(other)),
        })
    }
}
