//! Message framing
//!
//! Every message travels as a 24 byte header followed by its payload:
//!
//! | size | field    | description                                   |
//! |------|----------|-----------------------------------------------|
//! | 4    | magic    | network identifier                            |
//! | 12   | command  | ASCII message type, NUL padded                |
//! | 4    | length   | payload size in bytes                         |
//! | 4    | checksum | first 4 bytes of double SHA256 of the payload |

use std::io::{Read, Write};

use crate::hash::Hash;
use crate::message::{Message, WireMessage};
use crate::protocol::{MessageEncoding, Network, ProtocolVersion};
use crate::{Decode, Encode, Error, Result};

pub const MESSAGE_HEADER_SIZE: usize = 24;
pub const COMMAND_SIZE: usize = 12;

/// Maximum payload any message may carry, whatever its type
pub const MAX_MESSAGE_PAYLOAD: usize = 32 * 1024 * 1024;


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    pub magic: u32,
    pub command: String,
    pub length: u32,
    pub checksum: [u8; 4],
}

pub fn checksum(payload: &[u8]) -> [u8; 4] {
    let mut check = [0; 4];
    check.copy_from_slice(&Hash::double_sha256(payload).as_bytes()[..4]);
    check
}

impl Encode for MessageHeader {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        if self.command.len() > COMMAND_SIZE {
            return Err(Error::message(
                "MessageHeader::encode",
                format!("command [{}] is too long [max {}]", self.command, COMMAND_SIZE)));
        }
        let mut command = [0u8; COMMAND_SIZE];
        command[..self.command.len()].copy_from_slice(self.command.as_bytes());

        self.magic.encode(w)?;
        w.write_all(&command)?;
        self.length.encode(w)?;
        w.write_all(&self.checksum)?;
        Ok(())
    }
}

impl Decode for MessageHeader {
    fn decode<R: Read>(r: &mut R) -> Result<MessageHeader> {
        let magic = u32::decode(r)?;
        let mut command = [0u8; COMMAND_SIZE];
        r.read_exact(&mut command)?;
        let length = u32::decode(r)?;
        let mut checksum = [0u8; 4];
        r.read_exact(&mut checksum)?;

        // printable ASCII, then nothing but NUL padding
        let end = command.iter().position(|b| *b == 0).unwrap_or(COMMAND_SIZE);
        if command[end..].iter().any(|b| *b != 0)
            || !command[..end].iter().all(|b| b.is_ascii_graphic()) {
            return Err(Error::message("MessageHeader::decode",
                                      format!("invalid command {:?}", &command[..])));
        }
        let command = String::from_utf8_lossy(&command[..end]).into_owned();

        Ok(MessageHeader { magic, command, length, checksum })
    }
}

/// Frames `msg` for `network` and writes header and payload to `w`.
/// Returns the number of bytes written.
pub fn write_message<W: Write>(w: &mut W,
                               msg: &Message,
                               pver: ProtocolVersion,
                               network: Network,
                               enc: MessageEncoding)
                               -> Result<usize> {
    let mut payload = Vec::new();
    msg.encode(&mut payload, pver, enc)?;

    if payload.len() > MAX_MESSAGE_PAYLOAD {
        return Err(Error::message(
            "write_message",
            format!("message payload is too large - encoded {} bytes, but maximum message payload is {} bytes",
                    payload.len(), MAX_MESSAGE_PAYLOAD)));
    }
    let max_len = msg.max_payload_len(pver);
    if payload.len() > max_len {
        return Err(Error::message(
            "write_message",
            format!("message payload is too large - encoded {} bytes, but maximum message payload size for messages of type [{}] is {}",
                    payload.len(), msg.command(), max_len)));
    }

    let header = MessageHeader {
        magic: network.magic(),
        command: msg.command().to_string(),
        length: payload.len() as u32,
        checksum: checksum(&payload),
    };
    header.encode(w)?;
    w.write_all(&payload)?;

    trace!("wrote {} message with {} byte payload", header.command, payload.len());
    Ok(MESSAGE_HEADER_SIZE + payload.len())
}

/// Reads one framed message from `r`.
///
/// The announced length is checked against both the global and the
/// per-type maximum before any payload byte is read.
pub fn read_message<R: Read>(r: &mut R,
                             pver: ProtocolVersion,
                             network: Network,
                             enc: MessageEncoding)
                             -> Result<Message> {
    let header = MessageHeader::decode(r)?;

    if header.length as usize > MAX_MESSAGE_PAYLOAD {
        debug!("frame announces {} byte payload", header.length);
        return Err(Error::message(
            "read_message",
            format!("message payload is too large - header indicates {} bytes, but max message payload is {} bytes",
                    header.length, MAX_MESSAGE_PAYLOAD)));
    }

    if header.magic != network.magic() {
        debug!("frame magic {:#010x} does not match {}", header.magic, network);
        return Err(Error::message(
            "read_message",
            format!("message from other network [{:#010x}]", header.magic)));
    }

    let mut msg = Message::from_command(&header.command)?;

    let max_len = msg.max_payload_len(pver);
    if header.length as usize > max_len {
        debug!("{} frame announces {} bytes, max {}", header.command, header.length, max_len);
        return Err(Error::message(
            "read_message",
            format!("payload exceeds max length - header indicates {} bytes, but max payload size for messages of type [{}] is {}",
                    header.length, header.command, max_len)));
    }

    let mut payload = vec![0u8; header.length as usize];
    r.read_exact(&mut payload)?;

    if checksum(&payload) != header.checksum {
        debug!("{} frame failed checksum", header.command);
        return Err(Error::message(
            "read_message",
            format!("payload checksum failed - header indicates {:?}, but actual checksum is {:?}",
                    header.checksum, checksum(&payload))));
    }

    let mut reader = &payload[..];
    msg.decode(&mut reader, pver, enc)?;
    if !reader.is_empty() {
        return Err(Error::message(
            "read_message",
            format!("{} trailing bytes after {} payload", reader.len(), header.command)));
    }

    trace!("read {} message with {} byte payload", header.command, header.length);
    Ok(msg)
}
