use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use tracing::{debug, info, warn};

use crate::config::{NetworkConfig, TargetMode};

/// Destination for outbound datagrams, fixed for the process lifetime
pub fn destination(network: &NetworkConfig) -> SocketAddr {
    let ip = match network.mode {
        TargetMode::Production => network.production_ip,
        TargetMode::Local => local_address(network.production_ip),
    };
    let destination = SocketAddr::new(ip, network.port);
    info!("Sending to {} ({:?} mode)", destination, network.mode);
    destination
}

/// This machine's primary address.
///
/// Connecting an unbound UDP socket only asks the OS for a route, nothing is
/// sent. The interface picked for `probe` is the one the local listener will
/// also see traffic on. Falls back to loopback when there is no route.
pub fn local_address(probe: IpAddr) -> IpAddr {
    let resolved = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .and_then(|socket| {
            socket.connect((probe, 9))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip());

    match resolved {
        Ok(ip) if !ip.is_unspecified() => {
            debug!("Resolved local address {} via route to {}", ip, probe);
            ip
        }
        Ok(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        Err(e) => {
            warn!("No route to {} ({}), using loopback", probe, e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}
