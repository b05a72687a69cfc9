use crate::error::{DecodeError, DecodeResult};

/// minimal length of a consecutive range that is worth storing as a run
const MIN_RUN: usize = 4;

/// writer of the bit format read by [`super::Decoder`], used to bake tables
pub struct Encoder
{
    bytes: Vec<u8>,
    /// bits used in the last byte, 8 - start a new byte
    bit: u8,
    magic: Vec<u32>,
}

impl Encoder
{
    /// starts a table with the given (strictly increasing) integer widths
    pub fn new(magic: &[u32]) -> DecodeResult<Self>
    {
        if magic.is_empty() {
            return Err(DecodeError::EmptyMagic);
        }

        let mut encoder = Self {
            bytes: vec![],
            bit: 8,
            magic: magic.to_vec(),
        };

        let mut previous = 0;

        for &width in magic {
            if width <= previous || width > super::MAX_WIDTH {
                return Err(DecodeError::WidthOverflow(width));
            }

            encoder.write_unary(width - previous);
            previous = width;
        }

        encoder.write_unary(0);

        Ok(encoder)
    }

    /// the finished table, the last byte is zero-padded
    pub fn finish(self) -> Vec<u8>
    {
        self.bytes
    }

    fn write_bit(&mut self, bit: bool)
    {
        if self.bit == 8 {
            self.bytes.push(0);
            self.bit = 0;
        }

        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << self.bit;
            }
        }

        self.bit += 1;
    }

    fn write_unary(&mut self, value: u32)
    {
        for _ in 0 .. value {
            self.write_bit(true);
        }

        self.write_bit(false);
    }

    fn write_binary(&mut self, value: u64, width: u32)
    {
        for shift in (0 .. width).rev() {
            self.write_bit((value >> shift) & 1 != 0);
        }
    }

    pub fn write_unsigned(&mut self, value: u32) -> DecodeResult<()>
    {
        let mut rest = value as u64;
        let last = self.magic.len() - 1;

        for level in 0 ..= last {
            let width = self.magic[level];
            let size = 1u64 << width;

            if level == last {
                if rest >= size {
                    return Err(DecodeError::Overflow(value as u64));
                }

                self.write_binary(rest, width);
                return Ok(());
            }

            if rest < size {
                self.write_bit(false);
                self.write_binary(rest, width);
                return Ok(());
            }

            self.write_bit(true);
            rest -= size;
        }

        Ok(())
    }

    pub fn write_signed(&mut self, value: i64) -> DecodeResult<()>
    {
        let zigzag = match value < 0 {
            true => ((!value) << 1) | 1,
            false => value << 1,
        };

        let zigzag = u32::try_from(zigzag).map_err(|_| DecodeError::Overflow(zigzag as u64))?;

        self.write_unsigned(zigzag)
    }

    pub fn write_count(&mut self, count: usize) -> DecodeResult<()>
    {
        let count = u32::try_from(count).map_err(|_| DecodeError::Overflow(count as u64))?;

        self.write_unsigned(count)
    }

    /// values must be strictly increasing
    pub fn write_sorted_ascending(&mut self, values: &[u32]) -> DecodeResult<()>
    {
        let mut previous: i64 = -1;

        for &value in values {
            let delta = value as i64 - previous - 1;

            if delta < 0 {
                return Err(DecodeError::InvalidTable(format!(
                    "{:#X} breaks the ascending order",
                    value
                )));
            }

            self.write_unsigned(delta as u32)?;
            previous = value as i64;
        }

        Ok(())
    }

    pub fn write_unsorted_deltas(&mut self, values: &[u32]) -> DecodeResult<()>
    {
        let mut previous: i64 = 0;

        for &value in values {
            self.write_signed(value as i64 - previous)?;
            previous = value as i64;
        }

        Ok(())
    }

    pub fn write_string(&mut self, value: &str) -> DecodeResult<()>
    {
        let codes: Vec<u32> = value.chars().map(u32::from).collect();

        self.write_count(codes.len())?;
        self.write_unsorted_deltas(&codes)
    }

    /// a set: consecutive ranges of at least `MIN_RUN` codepoints become runs
    pub fn write_unique(&mut self, values: &[u32]) -> DecodeResult<()>
    {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut singles = vec![];
        let mut starts = vec![];
        let mut lengths = vec![];

        let mut i = 0;

        while i < sorted.len() {
            let mut j = i + 1;

            while j < sorted.len() && sorted[j] == sorted[j - 1] + 1 {
                j += 1;
            }

            match j - i >= MIN_RUN {
                true => {
                    starts.push(sorted[i]);
                    lengths.push((j - i) as u32);
                }
                false => singles.extend_from_slice(&sorted[i .. j]),
            }

            i = j;
        }

        self.write_count(singles.len())?;
        self.write_sorted_ascending(&singles)?;
        self.write_count(starts.len())?;
        self.write_sorted_ascending(&starts)?;
        self.write_unsorted_deltas(&lengths)
    }
}
