//! Prometheus exposition
//!
//! Neighbor gauges are rebuilt from a store snapshot on every scrape, so the
//! output always reflects whole records. The exporter's own poll metrics live
//! in a long-lived registry and are appended to the same page.

use std::sync::Arc;

use prometheus::{
    Encoder, GaugeVec, Histogram, HistogramOpts, IntCounter, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::bgp::NeighborRecord;

const NEIGHBOR_LABEL: &str = "ip";

/// Metrics describing the exporter itself
#[derive(Clone)]
pub struct ExporterMetrics {
    pub polls_total: IntCounter,
    pub poll_failures_total: IntCounter,
    pub poll_duration_seconds: Histogram,
    pub last_success_timestamp_seconds: IntGauge,
    pub neighbors: IntGauge,

    pub registry: Arc<Registry>,
}

impl ExporterMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let polls_total = IntCounter::with_opts(Opts::new(
            "bgp_exporter_polls_total",
            "Total number of polls of the routing daemon",
        ))?;
        registry.register(Box::new(polls_total.clone()))?;

        let poll_failures_total = IntCounter::with_opts(Opts::new(
            "bgp_exporter_poll_failures_total",
            "Total number of polls where the neighbor output could not be obtained",
        ))?;
        registry.register(Box::new(poll_failures_total.clone()))?;

        let poll_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "bgp_exporter_poll_duration_seconds",
                "Time spent capturing and parsing the neighbor output",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(poll_duration_seconds.clone()))?;

        let last_success_timestamp_seconds = IntGauge::with_opts(Opts::new(
            "bgp_exporter_last_success_timestamp_seconds",
            "Unix time of the last successful poll",
        ))?;
        registry.register(Box::new(last_success_timestamp_seconds.clone()))?;

        let neighbors = IntGauge::with_opts(Opts::new(
            "bgp_exporter_neighbors",
            "Number of BGP neighbors currently held by the exporter",
        ))?;
        registry.register(Box::new(neighbors.clone()))?;

        Ok(Self {
            polls_total,
            poll_failures_total,
            poll_duration_seconds,
            last_success_timestamp_seconds,
            neighbors,
            registry: Arc::new(registry),
        })
    }

    pub fn record_poll_success(&self, duration_secs: f64, neighbors: usize) {
        self.polls_total.inc();
        self.poll_duration_seconds.observe(duration_secs);
        self.last_success_timestamp_seconds
            .set(chrono::Utc::now().timestamp());
        self.neighbors.set(neighbors as i64);
    }

    pub fn record_poll_failure(&self, duration_secs: f64) {
        self.polls_total.inc();
        self.poll_failures_total.inc();
        self.poll_duration_seconds.observe(duration_secs);
    }

    /// Encode the neighbor gauges for `neighbors` and the exporter metrics in
    /// the Prometheus text format
    pub fn render(&self, neighbors: &[NeighborRecord]) -> Result<String, prometheus::Error> {
        let mut families = neighbor_registry(neighbors)?.gather();
        families.extend(self.registry.gather());

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

fn neighbor_gauge(name: &str, help: &str) -> Result<GaugeVec, prometheus::Error> {
    GaugeVec::new(Opts::new(name, help), &[NEIGHBOR_LABEL])
}

/// Build a throwaway registry holding one sample per neighbor and gauge
fn neighbor_registry(neighbors: &[NeighborRecord]) -> Result<Registry, prometheus::Error> {
    let state = neighbor_gauge(
        "bgp_neighbor_state",
        "The state of the connection to a given BGP neighbor (1=idle,2=connect,3=active,4=opensent,5=openconfirm,6=established)",
    )?;
    let accepted_prefixes = neighbor_gauge(
        "bgp_neighbor_accepted_prefixes",
        "The number of accepted prefixes for a given BGP neighbor",
    )?;
    let established = neighbor_gauge(
        "bgp_neighbor_connections_established",
        "The number of connections that have been established for a given BGP neighbor",
    )?;
    let dropped = neighbor_gauge(
        "bgp_neighbor_connections_dropped",
        "The number of connections that have been dropped for a given BGP neighbor",
    )?;

    for neighbor in neighbors {
        let ip = neighbor.address.to_string();
        let labels = [ip.as_str()];

        if let Some(session_state) = neighbor.session_state {
            state
                .with_label_values(&labels)
                .set(f64::from(session_state.ordinal()));
        }
        accepted_prefixes
            .with_label_values(&labels)
            .set(neighbor.accepted_prefixes as f64);
        established
            .with_label_values(&labels)
            .set(neighbor.connections_established as f64);
        dropped
            .with_label_values(&labels)
            .set(neighbor.connections_dropped as f64);
    }

    let registry = Registry::new();
    registry.register(Box::new(state))?;
    registry.register(Box::new(accepted_prefixes))?;
    registry.register(Box::new(established))?;
    registry.register(Box::new(dropped))?;

    Ok(registry)
}
