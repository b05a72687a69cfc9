//! canonical decomposition and composition (NFD / NFC)
//!
//! the tables come from a dedicated blob: decompositions, composition exclusions and
//! combining class ranks. hangul is handled arithmetically.

use std::collections::HashMap;

use log::info;

use crate::bits::Decoder;
use crate::codepoint::{CodepointSet, ASCII_END};
use crate::error::{DecodeError, DecodeResult};

use composition::compose_packed;
use hangul::*;
use packed::{Packed, Packer};

mod composition;
pub mod hangul;
mod packed;

/// decomposition of a single codepoint, stored reversed: `[second, first]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decomposition
{
    Single(u32),
    Pair(u32, u32),
}

/// canonical normalizer built from the NF table
pub struct CanonicalNormalizer
{
    /// unicode version the table was built from
    unicode_version: String,
    /// never recomposed, even though a pair decomposition exists
    exclusions: CodepointSet,
    /// codepoints that may change under NFC
    quick_check: CodepointSet,
    decompositions: HashMap<u32, Decomposition>,
    /// first -> second -> composed
    recompositions: HashMap<u32, HashMap<u32, u32>>,
    /// combining class ranks, absent - starter
    ranks: HashMap<u32, u8>,
}

impl CanonicalNormalizer
{
    /// decodes a whole NF table
    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self>
    {
        let mut decoder = Decoder::new(bytes)?;
        let normalizer = Self::decode(&mut decoder)?;

        decoder.assert_eof()?;

        info!(
            "loaded NF tables: unicode {}, {} decompositions, {} ranked codepoints",
            normalizer.unicode_version,
            normalizer.decompositions.len(),
            normalizer.ranks.len()
        );

        Ok(normalizer)
    }

    fn decode(decoder: &mut Decoder) -> DecodeResult<Self>
    {
        let unicode_version = decoder.read_string()?;
        let exclusions = CodepointSet::new(decoder.read_unique()?);
        let quick_check = CodepointSet::new(decoder.read_unique()?);

        let mut decompositions = HashMap::new();
        let mut recompositions: HashMap<u32, HashMap<u32, u32>> = HashMap::new();

        let singles = decoder.read_sorted_unique()?;
        let targets = decoder.read_unsorted_deltas(singles.len())?;

        for (&code, &target) in singles.iter().zip(targets.iter()) {
            decompositions.insert(code, Decomposition::Single(target));
        }

        let pairs = decoder.read_sorted_unique()?;
        let firsts = decoder.read_unsorted_deltas(pairs.len())?;
        let seconds = decoder.read_unsorted_deltas(pairs.len())?;

        for (i, &code) in pairs.iter().enumerate() {
            let (first, second) = (firsts[i], seconds[i]);

            decompositions.insert(code, Decomposition::Pair(second, first));

            if !exclusions.contains(code) {
                recompositions.entry(first).or_default().insert(second, code);
            }
        }

        let mut ranks = HashMap::new();
        let mut rank: u32 = 0;

        loop {
            let batch = decoder.read_unique()?;

            if batch.is_empty() {
                break;
            }

            rank += 1;

            let rank = u8::try_from(rank).map_err(|_| {
                DecodeError::InvalidTable("more than 255 combining class ranks".to_owned())
            })?;

            for code in batch {
                ranks.insert(code, rank);
            }
        }

        Ok(Self {
            unicode_version,
            exclusions,
            quick_check,
            decompositions,
            recompositions,
            ranks,
        })
    }

    pub fn unicode_version(&self) -> &str
    {
        &self.unicode_version
    }

    /// combining class rank, 0 - starter
    #[inline(always)]
    pub fn rank(&self, code: u32) -> u8
    {
        match code < ASCII_END {
            true => 0,
            false => self.ranks.get(&code).copied().unwrap_or(0),
        }
    }

    /// the codepoint is excluded from recomposition
    pub fn is_excluded(&self, code: u32) -> bool
    {
        self.exclusions.contains(code)
    }

    /// canonical decomposition
    pub fn nfd(&self, codes: &[u32]) -> Vec<u32>
    {
        self.decompose(codes).iter().map(Packed::code).collect()
    }

    /// canonical decomposition followed by canonical composition
    pub fn nfc(&self, codes: &[u32]) -> Vec<u32>
    {
        if self.is_quick_nfc(codes) {
            return codes.to_vec();
        }

        compose_packed(&self.decompose(codes), |a, b| self.compose_pair(a, b))
    }

    /// the sequence is certainly in NFC: nothing from the quick check set, and the ranks of
    /// adjacent marks never decrease
    pub fn is_quick_nfc(&self, codes: &[u32]) -> bool
    {
        let mut previous = 0;

        for &code in codes {
            if code < ASCII_END {
                previous = 0;
                continue;
            }

            if self.quick_check.contains(code) {
                return false;
            }

            let rank = self.rank(code);

            if rank != 0 && previous > rank {
                return false;
            }

            previous = rank;
        }

        true
    }

    /// composition of two codepoints: hangul L + V, LV + T, then the table
    pub fn compose_pair(&self, first: u32, second: u32) -> Option<u32>
    {
        compose_jamo(first, second).or_else(|| {
            self.recompositions
                .get(&first)
                .and_then(|seconds| seconds.get(&second))
                .copied()
        })
    }

    /// full decomposition of every codepoint, canonically ordered
    fn decompose(&self, codes: &[u32]) -> Vec<Packed>
    {
        let mut packer = Packer::with_capacity(codes.len());
        let mut stack: Vec<u32> = vec![];

        for &source in codes {
            let mut code = source;

            loop {
                if code < ASCII_END {
                    packer.push(code, 0);
                } else if is_hangul_syllable(code) {
                    let (jamo, len) = decompose_syllable(code);
                    jamo[.. len].iter().for_each(|&c| packer.push(c, 0));
                } else {
                    match self.decompositions.get(&code) {
                        Some(Decomposition::Single(target)) => stack.push(*target),
                        Some(Decomposition::Pair(second, first)) => {
                            stack.push(*second);
                            stack.push(*first);
                        }
                        None => packer.push(code, self.rank(code)),
                    }
                }

                match stack.pop() {
                    Some(next) => code = next,
                    None => break,
                }
            }
        }

        packer.finish()
    }
}

impl core::fmt::Debug for CanonicalNormalizer
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.debug_struct("CanonicalNormalizer")
            .field("unicode_version", &self.unicode_version)
            .field("decompositions", &self.decompositions.len())
            .field("ranks", &self.ranks.len())
            .finish()
    }
}
