use std::fmt::{self, Debug, Formatter};
use std::io::{Read, Write};

use byteorder::{ByteOrder, LittleEndian};

use crate::hash::{Hash, HASH_SIZE};
use crate::protocol::{MessageEncoding, ProtocolVersion};
use crate::var_int::{read_var_int, var_int_serialize_size, write_var_int, MAX_VAR_INT_PAYLOAD};
use crate::{Decode, Encode, Error, Result, WireMessage};

/// Maximum number of block locator entries in a single getheaders message.
/// Protocol wide; independent of the negotiated version.
pub const MAX_BLOCK_LOCATORS_PER_MSG: usize = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_implements_types_required_for_protocol() {
        let m = GetheadersMessage::new();
        assert_eq!(m.command(), "getheaders");
        assert_eq!(m.max_payload_len(ProtocolVersion::LATEST), 4 + 9 + 500 * 32 + 32);
        assert_eq!(m.serialize_size(), 4 + 1 + 32);
    }

    #[test]
    fn it_starts_empty_at_the_latest_version() {
        let m = GetheadersMessage::default();
        assert_eq!(m.protocol_version, 70013);
        assert!(m.block_locator_heights().is_empty());
        assert!(m.hash_stop.is_zero());
    }

    #[test]
    fn it_adds_block_locator_heights_in_order() {
        let mut m = GetheadersMessage::new();
        m.add_block_locator_height(99500).unwrap();
        m.add_block_locator_height(99499).unwrap();
        m.add_block_locator_height(-1).unwrap();

        let heights: Vec<i32> = m.block_locator_heights().iter().map(|l| l.height()).collect();
        assert_eq!(heights, vec![99500, 99499, -1]);
    }

    #[test]
    fn it_refuses_the_501st_locator() {
        let mut m = GetheadersMessage::new();
        for n in 0..MAX_BLOCK_LOCATORS_PER_MSG {
            m.add_block_locator_height(n as i32).unwrap();
            assert_eq!(m.block_locator_heights().len(), n + 1);
        }

        let err = m.add_block_locator_height(99500).unwrap_err();
        assert!(err.is_protocol_violation());
        assert_eq!(m.block_locator_heights().len(), MAX_BLOCK_LOCATORS_PER_MSG);
        assert_eq!(m.block_locator_heights()[499].height(), 499);

        assert!(m.add_block_locator(BlockLocator::from_height(1)).is_err());
        assert_eq!(m.block_locator_heights().len(), MAX_BLOCK_LOCATORS_PER_MSG);
    }

    #[test]
    fn it_lays_a_height_into_a_hash_sized_slot() {
        let locator = BlockLocator::from(99499);
        let mut expected = [0u8; 32];
        expected[..4].copy_from_slice(&[0xab, 0x84, 0x01, 0x00]);
        assert_eq!(locator.as_bytes(), &expected);
        assert_eq!(locator.height(), 99499);
    }

    #[test]
    fn it_keeps_unrecognised_slot_bytes() {
        let mut raw = [0x11u8; 32];
        raw[..4].copy_from_slice(&7i32.to_le_bytes());
        let locator = BlockLocator::new(raw);
        assert_eq!(locator.height(), 7);

        let mut buf = vec![];
        locator.encode(&mut buf).unwrap();
        assert_eq!(&buf[..], &raw[..]);
    }

    #[test]
    fn it_grows_the_encoded_size_per_locator() {
        let mut m = GetheadersMessage::new();
        for n in 0..300 {
            m.add_block_locator_height(n).unwrap();
        }
        // count no longer fits a single byte
        assert_eq!(m.serialize_size(), 4 + 3 + 300 * 32 + 32);
    }
}

/// One entry of a block locator.
///
/// The in-memory marker is a block height, but every entry occupies a
/// hash-sized slot on the wire. A height is laid out as a little endian
/// `i32` in the first four bytes with the rest zeroed; slots read from a
/// peer are kept verbatim so they re-encode byte for byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockLocator([u8; HASH_SIZE]);

impl BlockLocator {
    pub fn new(slot: [u8; HASH_SIZE]) -> BlockLocator {
        BlockLocator(slot)
    }

    pub fn from_height(height: i32) -> BlockLocator {
        let mut slot = [0; HASH_SIZE];
        LittleEndian::write_i32(&mut slot[..4], height);
        BlockLocator(slot)
    }

    pub fn height(&self) -> i32 {
        LittleEndian::read_i32(&self.0[..4])
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl From<i32> for BlockLocator {
    fn from(height: i32) -> BlockLocator {
        BlockLocator::from_height(height)
    }
}

impl Debug for BlockLocator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "BlockLocator({})", self.height())
    }
}

impl Encode for BlockLocator {
    #[inline]
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.0.encode(w)
    }
}

impl Decode for BlockLocator {
    #[inline]
    fn decode<R: Read>(r: &mut R) -> Result<BlockLocator> {
        Ok(BlockLocator(<[u8; HASH_SIZE]>::decode(r)?))
    }
}

/// Asks a peer for block headers, starting after the most recent
/// locator entry it recognises and ending at `hash_stop` (or after as many
/// headers as a single reply may carry when `hash_stop` is zero).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetheadersMessage {
    /// Version stored with the message; wire operations take theirs explicitly
    pub protocol_version: u32,
    block_locator_heights: Vec<BlockLocator>,
    pub hash_stop: Hash,
}

impl GetheadersMessage {
    pub fn new() -> GetheadersMessage {
        GetheadersMessage {
            protocol_version: u32::from(ProtocolVersion::LATEST),
            block_locator_heights: Vec::new(),
            hash_stop: Hash::ZERO,
        }
    }

    pub fn block_locator_heights(&self) -> &[BlockLocator] {
        &self.block_locator_heights
    }

    pub fn add_block_locator_height(&mut self, height: i32) -> Result<()> {
        self.append_locator(BlockLocator::from_height(height))
    }

    pub fn add_block_locator(&mut self, locator: BlockLocator) -> Result<()> {
        self.append_locator(locator)
    }

    // The only place the locator list grows; decode goes through here too.
    fn append_locator(&mut self, locator: BlockLocator) -> Result<()> {
        if self.block_locator_heights.len() + 1 > MAX_BLOCK_LOCATORS_PER_MSG {
            return Err(Error::message(
                "GetheadersMessage::add_block_locator_height",
                format!("too many block locator heights for message [max {}]",
                        MAX_BLOCK_LOCATORS_PER_MSG)));
        }
        self.block_locator_heights.push(locator);
        Ok(())
    }

    /// Exact number of bytes `encode` writes for this message
    #[inline]
    pub fn serialize_size(&self) -> usize {
        let count = self.block_locator_heights.len();
        4 + var_int_serialize_size(count as u64) + count * HASH_SIZE + HASH_SIZE
    }
}

impl Default for GetheadersMessage {
    fn default() -> Self {
        GetheadersMessage::new()
    }
}

impl WireMessage for GetheadersMessage {
    #[inline]
    fn command(&self) -> &'static str {
        "getheaders"
    }

    /// Version 4 bytes + num locators (varint) + max locators + hash stop.
    fn max_payload_len(&self, _pver: ProtocolVersion) -> usize {
        4 + MAX_VAR_INT_PAYLOAD + (MAX_BLOCK_LOCATORS_PER_MSG * HASH_SIZE) + HASH_SIZE
    }

    // Same layout under every encoding
    fn encode<W: Write>(&self, w: &mut W, pver: ProtocolVersion, _enc: MessageEncoding) -> Result<()> {
        trace!("encoding getheaders with {} locators at pver {}",
               self.block_locator_heights.len(), pver);

        self.protocol_version.encode(w)?;
        write_var_int(w, pver, self.block_locator_heights.len() as u64)?;
        for locator in &self.block_locator_heights {
            locator.encode(w)?;
        }
        self.hash_stop.encode(w)
    }

    fn decode<R: Read>(&mut self, r: &mut R, pver: ProtocolVersion, _enc: MessageEncoding) -> Result<()> {
        self.protocol_version = u32::decode(r)?;

        // Checked before anything is read or allocated for the entries
        let count = read_var_int(r, pver)?;
        if count > MAX_BLOCK_LOCATORS_PER_MSG as u64 {
            debug!("rejecting getheaders with {} locators", count);
            return Err(Error::message(
                "GetheadersMessage::decode",
                format!("too many block locator heights for message [count {}, max {}]",
                        count, MAX_BLOCK_LOCATORS_PER_MSG)));
        }

        self.block_locator_heights = Vec::with_capacity(count as usize);
        for _ in 0..count {
            self.append_locator(BlockLocator::decode(r)?)?;
        }

        self.hash_stop = Hash::decode(r)?;
        trace!("decoded getheaders with {} locators at pver {}", count, pver);
        Ok(())
    }
}
