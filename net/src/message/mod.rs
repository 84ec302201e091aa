use std::io::{Read, Write};

use crate::protocol::{MessageEncoding, ProtocolVersion};
use crate::{Error, Result};

mod getheaders_message;

pub use self::getheaders_message::{BlockLocator, GetheadersMessage, MAX_BLOCK_LOCATORS_PER_MSG};


/// Codec contract shared by every protocol message.
///
/// The protocol version and encoding are always passed per call; whatever a
/// message stores itself is only a default for callers.
pub trait WireMessage {
    /// Identifier used in the frame header to route the payload
    fn command(&self) -> &'static str;

    /// Upper bound on the encoded payload at `pver`; frames announcing more
    /// are rejected before their payload is read.
    fn max_payload_len(&self, pver: ProtocolVersion) -> usize;

    fn encode<W: Write>(&self, w: &mut W, pver: ProtocolVersion, enc: MessageEncoding) -> Result<()>;

    /// Populates `self` from `r`. On error `self` is left half-filled and
    /// should be dropped.
    fn decode<R: Read>(&mut self, r: &mut R, pver: ProtocolVersion, enc: MessageEncoding) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    GetHeaders(GetheadersMessage),
    SendHeaders,
    Verack,
}

impl Message {
    /// Empty message of the type identified by `command`, ready to decode into
    pub fn from_command(command: &str) -> Result<Message> {
        match command {
            "getheaders" => Ok(Message::GetHeaders(GetheadersMessage::new())),
            "sendheaders" => Ok(Message::SendHeaders),
            "verack" => Ok(Message::Verack),
            other => Err(Error::message("Message::from_command",
                                        format!("unhandled command [{}]", other))),
        }
    }
}

fn check_sendheaders_version(func: &'static str, pver: ProtocolVersion) -> Result<()> {
    if pver < ProtocolVersion::SendHeaders {
        return Err(Error::message(
            func,
            format!("sendheaders message invalid for protocol version {}", pver)));
    }
    Ok(())
}

impl WireMessage for Message {
    fn command(&self) -> &'static str {
        match *self {
            Message::GetHeaders(ref m) => m.command(),
            Message::SendHeaders => "sendheaders",
            Message::Verack => "verack",
        }
    }

    fn max_payload_len(&self, pver: ProtocolVersion) -> usize {
        match *self {
            Message::GetHeaders(ref m) => m.max_payload_len(pver),
            Message::SendHeaders | Message::Verack => 0,
        }
    }

    fn encode<W: Write>(&self, w: &mut W, pver: ProtocolVersion, enc: MessageEncoding) -> Result<()> {
        match *self {
            Message::GetHeaders(ref m) => m.encode(w, pver, enc),
            Message::SendHeaders => check_sendheaders_version("Message::encode", pver),
            Message::Verack => Ok(()),
        }
    }

    fn decode<R: Read>(&mut self, r: &mut R, pver: ProtocolVersion, enc: MessageEncoding) -> Result<()> {
        match *self {
            Message::GetHeaders(ref mut m) => m.decode(r, pver, enc),
            Message::SendHeaders => check_sendheaders_version("Message::decode", pver),
            Message::Verack => Ok(()),
        }
    }
}
