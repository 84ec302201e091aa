use std::io::{Read, Write};

use crate::protocol::ProtocolVersion;
use crate::{Decode, Encode, Result};


/// Largest number of bytes a varint can take on the wire
pub const MAX_VAR_INT_PAYLOAD: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarInt {
    value: u64
}

impl VarInt {
    pub fn new(i: u64) -> VarInt {
        VarInt {
            value: i
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Encode for VarInt {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        if self.value < 0xFD {
            return (self.value as u8).encode(w);
        }
        if self.value <= 0xFFFF {
            0xFDu8.encode(w)?;
            return (self.value as u16).encode(w);
        }
        if self.value <= 0xFFFFFFFF {
            0xFEu8.encode(w)?;
            return (self.value as u32).encode(w);
        }
        0xFFu8.encode(w)?;
        self.value.encode(w)
    }
}

impl Decode for VarInt {
    fn decode<R: Read>(r: &mut R) -> Result<VarInt> {
        let value = match u8::decode(r)? {
            0xFF => u64::decode(r)?,
            0xFE => u32::decode(r)? as u64,
            0xFD => u16::decode(r)? as u64,
            byte1 => byte1 as u64,
        };
        Ok(VarInt::new(value))
    }
}

/// Writes `value` in its minimal compact form.
///
/// The protocol version does not change the layout yet; it is threaded
/// through so callers never have to special-case it.
pub fn write_var_int<W: Write>(w: &mut W, _pver: ProtocolVersion, value: u64) -> Result<()> {
    VarInt::new(value).encode(w)
}

/// Reads a compact integer. Any tag is accepted regardless of whether the
/// value would have fit a shorter form.
pub fn read_var_int<R: Read>(r: &mut R, _pver: ProtocolVersion) -> Result<u64> {
    Ok(VarInt::decode(r)?.value())
}

pub fn var_int_serialize_size(value: u64) -> usize {
    match value {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x10000..=0xFFFFFFFF => 5,
        _ => MAX_VAR_INT_PAYLOAD,
    }
}
