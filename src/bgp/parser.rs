//! Neighbor block parser
//!
//! Walks router output line by line and groups fields into records:
//!
//! ```text
//!            header                      connections
//!   Idle ───────────────▶ Collecting(X) ─────────────▶ emit X, Idle
//!                          │      ▲
//!                          │      │ state / prefixes
//!                          └──────┘
//!   header while Collecting(X): X is dropped, Collecting(Y)
//! ```
//!
//! A record is only emitted on its connections line. Blocks that never reach
//! it are discarded rather than partially published.

use std::net::IpAddr;

use tracing::{debug, trace};

use super::classify::{Line, classify};
use super::{NeighborRecord, SessionState};

/// Fields gathered so far for the neighbor whose header was seen last
#[derive(Debug, Clone)]
struct PendingNeighbor {
    address: IpAddr,
    session_state: Option<SessionState>,
    accepted_prefixes: u64,
}

impl PendingNeighbor {
    fn new(address: IpAddr) -> Self {
        Self {
            address,
            session_state: None,
            accepted_prefixes: 0,
        }
    }

    fn complete(self, established: u64, dropped: u64) -> NeighborRecord {
        NeighborRecord {
            address: self.address,
            session_state: self.session_state,
            accepted_prefixes: self.accepted_prefixes,
            connections_established: established,
            connections_dropped: dropped,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum ParserState {
    #[default]
    Idle,
    Collecting(PendingNeighbor),
}

/// Incremental parser for `show ip bgp neighbors` output
#[derive(Debug, Default)]
pub struct NeighborParser {
    state: ParserState,
}

impl NeighborParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a single line. Returns the record completed by this line, if any.
    pub fn feed(&mut self, line: &str) -> Option<NeighborRecord> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        match (std::mem::take(&mut self.state), classify(line)) {
            (previous, Line::Header(address)) => {
                if let ParserState::Collecting(dropped) = previous {
                    trace!("dropping incomplete block for {}", dropped.address);
                }
                trace!("start of neighbor block for {address}");
                self.state = ParserState::Collecting(PendingNeighbor::new(address));
                None
            }
            (ParserState::Collecting(mut pending), Line::SessionState(state)) => {
                pending.session_state = Some(state);
                self.state = ParserState::Collecting(pending);
                None
            }
            (ParserState::Collecting(mut pending), Line::AcceptedPrefixes(count)) => {
                pending.accepted_prefixes = count;
                self.state = ParserState::Collecting(pending);
                None
            }
            (
                ParserState::Collecting(pending),
                Line::Connections {
                    established,
                    dropped,
                },
            ) => {
                let record = pending.complete(established, dropped);
                debug!(
                    "parsed neighbor {} (state {:?}, {} prefixes)",
                    record.address, record.session_state, record.accepted_prefixes
                );
                Some(record)
            }
            (state, _) => {
                self.state = state;
                None
            }
        }
    }

    /// Whether a neighbor block is open and waiting for its connections line
    pub fn is_collecting(&self) -> bool {
        matches!(self.state, ParserState::Collecting(_))
    }

    /// End of input. An unfinished block is discarded.
    pub fn finish(self) {
        if let ParserState::Collecting(pending) = self.state {
            trace!(
                "input ended inside the block for {}, dropping it",
                pending.address
            );
        }
    }
}

/// Parse a complete block of router output into committed neighbor records,
/// in the order their blocks were completed.
pub fn parse_neighbors(text: &str) -> Vec<NeighborRecord> {
    let text = text.strip_suffix('\n').unwrap_or(text);

    let mut parser = NeighborParser::new();
    let records = text
        .split('\n')
        .filter_map(|line| parser.feed(line))
        .collect();
    parser.finish();

    records
}
