//! `OutputSink` fans a frame out to every configured destination over
//! UDP. A failed send to one destination never prevents sends to the
//! others; failures are logged and counted, not propagated.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use ledctl_core::Frame;
use tokio::net::UdpSocket;

use crate::wire::encode_datagram;

struct Destination {
    addr: SocketAddr,
    errors: AtomicU64,
}

/// Sends one outbound datagram per configured destination per frame. Each
/// destination's failures are counted independently.
pub struct OutputSink {
    socket: UdpSocket,
    destinations: Vec<Destination>,
    control_address: String,
}

impl OutputSink {
    /// Binds an ephemeral local UDP socket and configures the given
    /// destinations.
    pub async fn bind(destinations: Vec<SocketAddr>, control_address: impl Into<String>) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        Ok(Self {
            socket,
            destinations: destinations
                .into_iter()
                .map(|addr| Destination {
                    addr,
                    errors: AtomicU64::new(0),
                })
                .collect(),
            control_address: control_address.into(),
        })
    }

    /// Encodes `frame` once and sends the resulting datagram to every
    /// configured destination. No retry is attempted on failure: the
    /// next frame carries fresh data regardless.
    pub async fn send_frame(&self, frame: &Frame) {
        let datagram = encode_datagram(frame, &self.control_address);
        for destination in &self.destinations {
            if let Err(err) = self.socket.send_to(&datagram, destination.addr).await {
                destination.errors.fetch_add(1, Ordering::Relaxed);
                log::warn!("output send to {} failed: {err}", destination.addr);
            }
        }
    }

    /// Per-destination cumulative send-error counts, in configuration
    /// order, for diagnostics.
    #[must_use]
    pub fn error_counts(&self) -> Vec<(SocketAddr, u64)> {
        self.destinations
            .iter()
            .map(|d| (d.addr, d.errors.load(Ordering::Relaxed)))
            .collect()
    }
}
