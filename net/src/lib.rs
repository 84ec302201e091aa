//! Network message codec for dagcrust nodes
//!
//! Messages implement [`WireMessage`] and are read and written as framed
//! payloads over any `std::io` stream.

#[macro_use]
extern crate log;

mod encode;
mod error;
mod frame;
mod hash;
mod message;
mod protocol;
mod var_int;

pub use encode::{Decode, Encode};
pub use error::{Error, Result};
pub use frame::{checksum, read_message, write_message, MessageHeader, COMMAND_SIZE,
                MAX_MESSAGE_PAYLOAD, MESSAGE_HEADER_SIZE};
pub use hash::{Hash, HashError, HASH_SIZE};
pub use message::*;
pub use protocol::{MessageEncoding, Network, ProtocolVersion};
pub use var_int::{read_var_int, var_int_serialize_size, write_var_int, VarInt, MAX_VAR_INT_PAYLOAD};
