//! Error Types
//!
//! Malformed-control-input failures: wrong arity, wrong argument types,
//! unknown address, or an out-of-range value with no defined clamp.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("unknown control address: {0}")]
    UnknownAddress(String),

    #[error("{address}: expected {expected} argument(s), got {got}")]
    WrongArity {
        address: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{address}: argument {index} has the wrong type")]
    WrongArgType { address: &'static str, index: usize },

    #[error("{address}: value {value} is out of range and has no defined clamp")]
    OutOfRange { address: &'static str, value: String },

    #[error("malformed OSC packet: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
