//! Handshake-level constants: protocol versions, message encodings and
//! the networks a node can be attached to.

use std::fmt;
use std::str::FromStr;

use crate::Error;


/// Protocol versions a connection may negotiate.
///
/// Discriminants are the numeric values exchanged in the version handshake,
/// so the derived ordering matches "at least version X" checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    /// Multiple addresses per addr message
    MultipleAddress = 209,
    /// Timestamps added to network addresses
    NetAddressTime = 31402,
    /// Pong message and nonce field in ping (BIP 31)
    Bip0031 = 60000,
    /// Mempool message (BIP 35)
    Bip0035 = 60002,
    /// Bloom filtering (BIP 37)
    Bip0037 = 70001,
    /// Reject message
    Reject = 70002,
    /// NODE_BLOOM service flag (BIP 111)
    Bip0111 = 70011,
    /// Sendheaders message
    SendHeaders = 70012,
    /// Feefilter message
    FeeFilter = 70013,
}

impl ProtocolVersion {
    pub const LATEST: ProtocolVersion = ProtocolVersion::FeeFilter;

    pub const ALL: [ProtocolVersion; 9] = [
        ProtocolVersion::MultipleAddress,
        ProtocolVersion::NetAddressTime,
        ProtocolVersion::Bip0031,
        ProtocolVersion::Bip0035,
        ProtocolVersion::Bip0037,
        ProtocolVersion::Reject,
        ProtocolVersion::Bip0111,
        ProtocolVersion::SendHeaders,
        ProtocolVersion::FeeFilter,
    ];
}

impl From<ProtocolVersion> for u32 {
    fn from(pver: ProtocolVersion) -> u32 {
        pver as u32
    }
}

impl TryFrom<u32> for ProtocolVersion {
    type Error = Error;

    fn try_from(value: u32) -> Result<ProtocolVersion, Error> {
        ProtocolVersion::ALL
            .iter()
            .find(|pver| u32::from(**pver) == value)
            .cloned()
            .ok_or_else(|| Error::message("ProtocolVersion::try_from",
                                          format!("unknown protocol version {}", value)))
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", u32::from(*self))
    }
}

/// Wire encodings a message family may be sent in.
///
/// `Witness` carries auxiliary witness data for the messages that have any;
/// messages without such data encode identically under both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageEncoding {
    Base,
    Witness,
}

impl MessageEncoding {
    pub const ALL: [MessageEncoding; 2] = [MessageEncoding::Base, MessageEncoding::Witness];
}

impl Default for MessageEncoding {
    fn default() -> Self {
        MessageEncoding::Base
    }
}

/// Networks, identified on the wire by the magic that starts every frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    MainNet,
    /// Regression test network
    TestNet,
    TestNet3,
    SimNet,
}

impl Network {
    pub fn magic(&self) -> u32 {
        match *self {
            Network::MainNet => 0xd9b4bef9,
            Network::TestNet => 0xdab5bffa,
            Network::TestNet3 => 0x0709110b,
            Network::SimNet => 0x12141c16,
        }
    }

    pub fn from_magic(magic: u32) -> Option<Network> {
        [Network::MainNet, Network::TestNet, Network::TestNet3, Network::SimNet]
            .iter()
            .find(|n| n.magic() == magic)
            .cloned()
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::MainNet
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Network, Error> {
        match s {
            "mainnet" => Ok(Network::MainNet),
            "regtest" | "testnet" => Ok(Network::TestNet),
            "testnet3" => Ok(Network::TestNet3),
            "simnet" => Ok(Network::SimNet),
            other => Err(Error::message("Network::from_str",
                                        format!("unknown network {:?}", other))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Network::MainNet => "mainnet",
            Network::TestNet => "regtest",
            Network::TestNet3 => "testnet3",
            Network::SimNet => "simnet",
        })
    }
}
