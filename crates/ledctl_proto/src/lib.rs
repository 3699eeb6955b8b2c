//! Inbound control protocol: datagram decode, address-table dispatch, and
//! argument validation.

#![warn(clippy::all, clippy::pedantic)]

mod command;
mod dispatch;
mod error;
mod packet;

pub use command::Command;
pub use dispatch::parse;
pub use error::{ProtoError, Result};
pub use packet::decode;

pub use rosc::OscType;
