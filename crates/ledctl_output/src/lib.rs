//! Outbound LED frame encoding and per-destination UDP fan-out.

#![warn(clippy::all, clippy::pedantic)]

mod sink;
mod wire;

pub use sink::OutputSink;
pub use wire::{encode_datagram, encode_payload};
