//! Per-line classification of `show ip bgp neighbors` output
//!
//! Each line is matched against the four field patterns in a fixed order
//! (header, state, prefixes, connections). The first match wins. Lines that
//! match nothing, or whose captures do not parse, are [`Line::Unrecognized`].

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::SessionState;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BGP neighbor is ([^,\s]+),").expect("header pattern is valid")
});

static STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+BGP state = (\w+)(?:,.*)?$").expect("state pattern is valid")
});

static ACCEPTED_PREFIXES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+) accepted prefixes\w*$").expect("prefixes pattern is valid")
});

static CONNECTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Connections established (\d+); dropped (\d+).*$")
        .expect("connections pattern is valid")
});

/// What a single line of router output carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// `BGP neighbor is <addr>, ...`
    Header(IpAddr),

    /// `  BGP state = <word>, ...` with a known state word
    SessionState(SessionState),

    /// `  <n> accepted prefixes`
    AcceptedPrefixes(u64),

    /// `  Connections established <n>; dropped <m>`
    Connections { established: u64, dropped: u64 },

    Unrecognized,
}

/// Classify one line of router output.
pub fn classify(line: &str) -> Line {
    if let Some(caps) = HEADER.captures(line) {
        return match caps[1].parse::<IpAddr>() {
            Ok(address) => Line::Header(address),
            Err(e) => {
                trace!("ignoring neighbor header with bad address '{}': {e}", &caps[1]);
                Line::Unrecognized
            }
        };
    }

    if let Some(caps) = STATE.captures(line) {
        return match SessionState::from_word(&caps[1]) {
            Some(state) => Line::SessionState(state),
            None => {
                trace!("ignoring unknown session state '{}'", &caps[1]);
                Line::Unrecognized
            }
        };
    }

    if let Some(caps) = ACCEPTED_PREFIXES.captures(line) {
        return caps[1]
            .parse()
            .map(Line::AcceptedPrefixes)
            .unwrap_or(Line::Unrecognized);
    }

    if let Some(caps) = CONNECTIONS.captures(line) {
        return match (caps[1].parse(), caps[2].parse()) {
            (Ok(established), Ok(dropped)) => Line::Connections {
                established,
                dropped,
            },
            _ => Line::Unrecognized,
        };
    }

    Line::Unrecognized
}
