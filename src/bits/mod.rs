//! bit-level reader of the compressed tables
//!
//! a table is a bare bitstream: the magic header (a list of integer widths) followed by
//! the structured reads of the loader, in the order the loader performs them. there is no
//! length or checksum field, the only self-check is [`Decoder::assert_eof`].

pub use encode::Encoder;

mod encode;

use crate::error::{DecodeError, DecodeResult};

/// widths above this would overflow the u32 accumulator
const MAX_WIDTH: u32 = 31;

/// widths are strictly increasing and at least 1, so there are at most `MAX_WIDTH` levels
const MAX_LEVELS: usize = MAX_WIDTH as usize;

/// stateful reader over a borrowed buffer
pub struct Decoder<'a>
{
    /// table data
    buffer: &'a [u8],
    /// next byte to load
    position: usize,
    /// currently loaded byte
    word: u8,
    /// number of bits of `word` already consumed, 8 - load the next byte
    bit: u8,
    /// integer widths, strictly increasing; only the first `levels` are used
    magic: [u32; MAX_LEVELS],
    levels: usize,
}

impl<'a> Decoder<'a>
{
    /// reads the magic header
    pub fn new(buffer: &'a [u8]) -> DecodeResult<Self>
    {
        let mut decoder = Self {
            buffer,
            position: 0,
            word: 0,
            bit: 8,
            magic: [0; MAX_LEVELS],
            levels: 0,
        };

        decoder.read_magic()?;

        Ok(decoder)
    }

    /// integer widths declared by the header
    pub fn magic(&self) -> &[u32]
    {
        &self.magic[.. self.levels]
    }

    /// the buffer must be consumed exactly, the unused tail of the last byte is padding
    pub fn assert_eof(&self) -> DecodeResult<()>
    {
        match self.position == self.buffer.len() {
            true => Ok(()),
            false => Err(DecodeError::TrailingBytes {
                remaining: self.buffer.len() - self.position,
            }),
        }
    }

    #[inline(always)]
    fn read_bit(&mut self) -> DecodeResult<bool>
    {
        if self.bit == 8 {
            self.word = *self
                .buffer
                .get(self.position)
                .ok_or(DecodeError::UnexpectedEof {
                    position: self.position,
                })?;

            self.position += 1;
            self.bit = 0;
        }

        let bit = (self.word >> self.bit) & 1 != 0;
        self.bit += 1;

        Ok(bit)
    }

    /// number of one-bits before the next zero-bit
    fn read_unary(&mut self) -> DecodeResult<u32>
    {
        let mut value = 0;

        while self.read_bit()? {
            value += 1;

            if value > MAX_WIDTH {
                return Err(DecodeError::WidthOverflow(value));
            }
        }

        Ok(value)
    }

    /// `width` bits, most significant first
    fn read_binary(&mut self, width: u32) -> DecodeResult<u32>
    {
        let mut value = 0;

        for _ in 0 .. width {
            value = (value << 1) | self.read_bit()? as u32;
        }

        Ok(value)
    }

    fn read_magic(&mut self) -> DecodeResult<()>
    {
        let mut width = 0;

        loop {
            let delta = self.read_unary()?;

            if delta == 0 {
                break;
            }

            width += delta;

            if width > MAX_WIDTH {
                return Err(DecodeError::WidthOverflow(width));
            }

            self.magic[self.levels] = width;
            self.levels += 1;
        }

        match self.levels == 0 {
            true => Err(DecodeError::EmptyMagic),
            false => Ok(()),
        }
    }

    /// variable width integer: every level but the last is prefixed by a "continue" flag
    pub fn read_unsigned(&mut self) -> DecodeResult<u32>
    {
        let mut offset: u64 = 0;
        let last = self.levels - 1;

        for level in 0 ..= last {
            let width = self.magic[level];

            if level == last || !self.read_bit()? {
                let value = offset + self.read_binary(width)? as u64;

                return u32::try_from(value).map_err(|_| {
                    DecodeError::InvalidTable(format!("unsigned value {} overflows", value))
                });
            }

            offset += 1 << width;
        }

        unreachable!("the last magic level always returns")
    }

    /// zigzag encoded signed integer
    pub fn read_signed(&mut self) -> DecodeResult<i64>
    {
        let value = self.read_unsigned()? as i64;

        Ok(match value & 1 {
            0 => value >> 1,
            _ => !(value >> 1),
        })
    }

    /// strictly increasing values: `v[i] = v[i - 1] + 1 + delta`
    pub fn read_sorted_ascending(&mut self, count: usize) -> DecodeResult<Vec<u32>>
    {
        let mut values = Vec::with_capacity(count);
        let mut previous: i64 = -1;

        for _ in 0 .. count {
            previous += 1 + self.read_unsigned()? as i64;
            values.push(to_u32(previous)?);
        }

        Ok(values)
    }

    /// values in any order: `v[i] = v[i - 1] + zigzag(delta)`
    pub fn read_unsorted_deltas(&mut self, count: usize) -> DecodeResult<Vec<u32>>
    {
        let mut values = Vec::with_capacity(count);
        let mut previous: i64 = 0;

        for _ in 0 .. count {
            previous += self.read_signed()?;
            values.push(to_u32(previous)?);
        }

        Ok(values)
    }

    /// length-prefixed codepoint sequence
    pub fn read_string(&mut self) -> DecodeResult<String>
    {
        let count = self.read_count()?;
        let codes = self.read_unsorted_deltas(count)?;

        codes
            .into_iter()
            .map(|code| char::from_u32(code).ok_or(DecodeError::InvalidCodepoint(code as i64)))
            .collect()
    }

    /// sorted base list followed by (start, length) runs, in that order
    pub fn read_unique(&mut self) -> DecodeResult<Vec<u32>>
    {
        let count = self.read_count()?;
        let mut values = self.read_sorted_ascending(count)?;

        let runs = self.read_count()?;
        let starts = self.read_sorted_ascending(runs)?;
        let lengths = self.read_unsorted_deltas(runs)?;

        for (&start, &length) in starts.iter().zip(lengths.iter()) {
            let end = start.checked_add(length).ok_or_else(|| {
                DecodeError::InvalidTable(format!("run {:#X}+{} overflows", start, length))
            })?;

            values.extend(start .. end);
        }

        Ok(values)
    }

    /// [`Self::read_unique`], sorted
    pub fn read_sorted_unique(&mut self) -> DecodeResult<Vec<u32>>
    {
        let mut values = self.read_unique()?;
        values.sort_unstable();

        Ok(values)
    }

    /// unsigned value used as a length
    pub fn read_count(&mut self) -> DecodeResult<usize>
    {
        let count = self.read_unsigned()? as usize;

        // every element costs at least one bit
        match count > (self.buffer.len() - self.position + 1) * 8 {
            true => Err(DecodeError::InvalidTable(format!(
                "count {} exceeds the remaining data",
                count
            ))),
            false => Ok(count),
        }
    }
}

#[inline(always)]
fn to_u32(value: i64) -> DecodeResult<u32>
{
    u32::try_from(value).map_err(|_| DecodeError::InvalidCodepoint(value))
}
