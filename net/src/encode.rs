use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::Result;

#[cfg(test)]
mod tests {
    use super::{Decode, Encode};
    use crate::Error;

    #[test]
    fn it_encodes_a_u8() {
        let mut actual = vec![];
        let _ = 23u8.encode(&mut actual);
        assert_eq!(vec![23], actual);
    }

    #[test]
    fn it_encodes_a_u16() {
        let mut actual = vec![];
        let _ = 23u16.encode(&mut actual);
        assert_eq!(vec![23, 0], actual);
    }

    #[test]
    fn it_encodes_a_u32() {
        let mut actual = vec![];
        let _ = 60002u32.encode(&mut actual);
        assert_eq!(vec![0x62, 0xea, 0, 0], actual);
    }

    #[test]
    fn it_encodes_a_u64() {
        let mut actual = vec![];
        let _ = 23u64.encode(&mut actual);
        assert_eq!(vec![23, 0, 0, 0, 0, 0, 0, 0], actual);
    }

    #[test]
    fn it_encodes_a_negative_i32() {
        let mut actual = vec![];
        let _ = (-2i32).encode(&mut actual);
        assert_eq!(vec![0xfe, 0xff, 0xff, 0xff], actual);
    }

    #[test]
    fn it_encodes_a_true() {
        let mut actual = vec![];
        let _ = true.encode(&mut actual);
        assert_eq!(vec![1], actual);
    }

    #[test]
    fn it_encodes_a_byte_array_verbatim() {
        let mut input = [0u8; 32];
        input[0] = 0xaa;
        input[31] = 0x55;
        let mut actual = vec![];
        input.encode(&mut actual).unwrap();
        assert_eq!(&input[..], &actual[..]);
    }

    #[test]
    fn it_decodes_a_u32() {
        let mut input: &[u8] = &[0x62, 0xea, 0x00, 0x00, 0xff];
        assert_eq!(u32::decode(&mut input).unwrap(), 60002);
        assert_eq!(input, &[0xff]);
    }

    #[test]
    fn it_decodes_a_false() {
        let mut input: &[u8] = &[0];
        assert_eq!(bool::decode(&mut input).unwrap(), false);
    }

    #[test]
    fn it_fails_on_a_short_read() {
        let mut input: &[u8] = &[0x62, 0xea];
        assert!(matches!(u32::decode(&mut input), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn it_fails_on_a_short_write() {
        let mut backing = [0u8; 3];
        let mut sink: &mut [u8] = &mut backing;
        assert!(matches!(60002u32.encode(&mut sink), Err(Error::ShortWrite)));
    }
}

/// Types that can write themselves in network byte layout
pub trait Encode {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()>;
}

/// Types that can read themselves from a network byte stream
pub trait Decode: Sized {
    fn decode<R: Read>(r: &mut R) -> Result<Self>;
}

macro_rules! impl_primitive {
    ($prim_type: ty, $write_method: ident, $read_method: ident) => {
        impl Encode for $prim_type {
            #[inline]
            fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
                w.$write_method::<LittleEndian>(*self).map_err(From::from)
            }
        }

        impl Decode for $prim_type {
            #[inline]
            fn decode<R: Read>(r: &mut R) -> Result<$prim_type> {
                r.$read_method::<LittleEndian>().map_err(From::from)
            }
        }
    };
}

impl_primitive!(u16, write_u16, read_u16);
impl_primitive!(u32, write_u32, read_u32);
impl_primitive!(u64, write_u64, read_u64);
impl_primitive!(i16, write_i16, read_i16);
impl_primitive!(i32, write_i32, read_i32);
impl_primitive!(i64, write_i64, read_i64);

impl Encode for u8 {
    #[inline]
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_u8(*self).map_err(From::from)
    }
}

impl Decode for u8 {
    #[inline]
    fn decode<R: Read>(r: &mut R) -> Result<u8> {
        r.read_u8().map_err(From::from)
    }
}

impl Encode for bool {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        match *self {
            true => 1u8.encode(w),
            false => 0u8.encode(w),
        }
    }
}

impl Decode for bool {
    fn decode<R: Read>(r: &mut R) -> Result<bool> {
        Ok(u8::decode(r)? != 0)
    }
}

impl Encode for [u8; 32] {
    #[inline]
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self[..]).map_err(From::from)
    }
}

impl Decode for [u8; 32] {
    #[inline]
    fn decode<R: Read>(r: &mut R) -> Result<[u8; 32]> {
        let mut result = [0; 32];
        r.read_exact(&mut result)?;
        Ok(result)
    }
}
