use core::fmt;

/// bits below the rank
const SHIFT: u32 = 24;
/// codepoint part of a packed value
const MASK: u32 = (1 << SHIFT) - 1;

/// codepoint with its combining class rank in the high bits: `code | rank << 24`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packed(u32);

impl Packed
{
    #[inline(always)]
    pub fn new(code: u32, rank: u8) -> Self
    {
        Self(code | (rank as u32) << SHIFT)
    }

    #[inline(always)]
    pub fn code(&self) -> u32
    {
        self.0 & MASK
    }

    /// 0 - starter
    #[inline(always)]
    pub fn rank(&self) -> u8
    {
        (self.0 >> SHIFT) as u8
    }

    #[inline(always)]
    pub fn is_starter(&self) -> bool
    {
        self.rank() == 0
    }
}

impl fmt::Debug for Packed
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{{ code: U+{:04X}, rank: {} }}", self.code(), self.rank())
    }
}

/// accumulates decomposed codepoints, remembers whether reordering can be needed
#[derive(Default)]
pub struct Packer
{
    buffer: Vec<Packed>,
    has_marks: bool,
}

impl Packer
{
    pub fn with_capacity(capacity: usize) -> Self
    {
        Self {
            buffer: Vec::with_capacity(capacity),
            has_marks: false,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, code: u32, rank: u8)
    {
        self.has_marks |= rank != 0;
        self.buffer.push(Packed::new(code, rank));
    }

    /// canonical ordering: non-starters are sorted by rank (stable) between starters
    pub fn finish(mut self) -> Vec<Packed>
    {
        if self.has_marks {
            reorder(&mut self.buffer);
        }

        self.buffer
    }
}

/// bubbles each mark left past marks of a higher rank, a starter is never passed
fn reorder(buffer: &mut [Packed])
{
    for i in 1 .. buffer.len() {
        if buffer[i].is_starter() {
            continue;
        }

        let rank = buffer[i].rank();

        let mut j = i;

        while j > 0 && buffer[j - 1].rank() > rank {
            buffer.swap(j - 1, j);
            j -= 1;
        }
    }
}
