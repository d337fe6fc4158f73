//! BGP neighbor model and the text parser for `show ip bgp neighbors`
//!
//! The parser is split in two layers:
//!
//! - [`classify`]: stateless per-line pattern matching
//! - [`parser`]: a small state machine that groups classified lines into
//!   one [`NeighborRecord`] per neighbor block

pub mod classify;
pub mod parser;

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

pub use classify::{Line, classify};
pub use parser::{NeighborParser, parse_neighbors};

/// Phase of the BGP finite state machine for a peer (RFC 4271, BGP4-MIB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Connect,
    Active,
    OpenSent,
    OpenConfirm,
    Established,
}

impl SessionState {
    /// Map the word printed after `BGP state =` to a state.
    ///
    /// Matching is case-sensitive and follows the spelling used by the
    /// routing daemon (`Opensent`, not `OpenSent`).
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "Idle" => Some(Self::Idle),
            "Connect" => Some(Self::Connect),
            "Active" => Some(Self::Active),
            "Opensent" => Some(Self::OpenSent),
            "Openconfirm" => Some(Self::OpenConfirm),
            "Established" => Some(Self::Established),
            _ => None,
        }
    }

    /// Ordinal used for export, 1 (idle) through 6 (established)
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Idle => 1,
            Self::Connect => 2,
            Self::Active => 3,
            Self::OpenSent => 4,
            Self::OpenConfirm => 5,
            Self::Established => 6,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Connect => "Connect",
            Self::Active => "Active",
            Self::OpenSent => "Opensent",
            Self::OpenConfirm => "Openconfirm",
            Self::Established => "Established",
        };
        f.write_str(name)
    }
}

/// Last committed status of a single BGP neighbor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    /// Peer address, the unique key of the record
    pub address: IpAddr,

    /// `None` until a recognized `BGP state = ...` line was seen for the block
    pub session_state: Option<SessionState>,

    pub accepted_prefixes: u64,

    pub connections_established: u64,

    pub connections_dropped: u64,
}
