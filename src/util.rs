use std::net::{IpAddr, Ipv4Addr};

const EXPORTER_PORT: &str = "BGP_EXPORTER_PORT";

const DEFAULT_PORT: u16 = 9114;

pub fn get_port() -> u16 {
    let port_from_env = std::env::var(EXPORTER_PORT);
    port_from_env.map_or(DEFAULT_PORT, |res| res.parse().unwrap_or(DEFAULT_PORT))
}

const EXPORTER_ADDR: &str = "BGP_EXPORTER_ADDR";

const DEFAULT_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0));

pub fn get_addr() -> IpAddr {
    let addr_from_env = std::env::var(EXPORTER_ADDR);
    addr_from_env.map_or(DEFAULT_ADDR, |res| res.parse().unwrap_or(DEFAULT_ADDR))
}
