#![allow(dead_code)]

//! small, self-consistent tables baked with the encoder: a slice of latin with accents,
//! greek, cyrillic, devanagari (nukta), runic (restricted), hangul and a few emoji

use ens_normalize::bits::Encoder;
use ens_normalize::{CanonicalNormalizer, EnsNormalizer};

pub const MAGIC: [u32; 4] = [3, 7, 12, 22];

pub const UNICODE_VERSION: &str = "15.1.0";

/// combining marks of the tables, all of them non-spacing
pub const MARKS: [u32; 5] = [0x301, 0x302, 0x30A, 0x323, 0x93C];

pub const MAX_NSM: u32 = 2;

/// composed <- (first, second)
pub const PAIRS: [(u32, u32, u32); 12] = [
    (0xC5, 0x41, 0x30A),
    (0xE1, 0x61, 0x301),
    (0xE2, 0x61, 0x302),
    (0xE9, 0x65, 0x301),
    (0xEA, 0x65, 0x302),
    (0x958, 0x915, 0x93C),
    (0x1EA1, 0x61, 0x323),
    (0x1EA5, 0xE2, 0x301),
    (0x1EAD, 0x1EA1, 0x302),
    (0x1EB9, 0x65, 0x323),
    (0x1EBF, 0xEA, 0x301),
    (0x1EC7, 0x1EB9, 0x302),
];

pub const SINGLES: [(u32, u32); 2] = [(0x2126, 0x3A9), (0x212B, 0xC5)];

pub const EXCLUSIONS: [u32; 1] = [0x958];

/// from the lowest combining class up
pub const RANKS: [&[u32]; 3] = [&[0x93C], &[0x323], &[0x301, 0x302, 0x30A]];

fn range(from: u32, to: u32) -> Vec<u32>
{
    (from ..= to).collect()
}

fn concat(parts: &[&[u32]]) -> Vec<u32>
{
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}

fn jamo() -> Vec<u32>
{
    concat(&[&range(0x1100, 0x1112), &range(0x1161, 0x1175), &range(0x11A8, 0x11C2)])
}

/// the unicode normalization table
pub fn nf_table() -> Vec<u8>
{
    let mut e = Encoder::new(&MAGIC).unwrap();

    e.write_string(UNICODE_VERSION).unwrap();
    e.write_unique(&EXCLUSIONS).unwrap();

    let quick_check = concat(&[
        &MARKS,
        &[0x958, 0x2126, 0x212B],
        &range(0x1161, 0x1175),
        &range(0x11A8, 0x11C2),
    ]);
    e.write_unique(&quick_check).unwrap();

    let singles: Vec<u32> = SINGLES.iter().map(|s| s.0).collect();
    let targets: Vec<u32> = SINGLES.iter().map(|s| s.1).collect();
    e.write_unique(&singles).unwrap();
    e.write_unsorted_deltas(&targets).unwrap();

    let composed: Vec<u32> = PAIRS.iter().map(|p| p.0).collect();
    let firsts: Vec<u32> = PAIRS.iter().map(|p| p.1).collect();
    let seconds: Vec<u32> = PAIRS.iter().map(|p| p.2).collect();
    e.write_unique(&composed).unwrap();
    e.write_unsorted_deltas(&firsts).unwrap();
    e.write_unsorted_deltas(&seconds).unwrap();

    for batch in RANKS {
        e.write_unique(batch).unwrap();
    }
    e.write_unique(&[]).unwrap();

    e.finish()
}

struct GroupRecord
{
    name: &'static str,
    flags: u32,
    primary: Vec<u32>,
    secondary: Vec<u32>,
}

fn digits_dash_underscore() -> Vec<u32>
{
    concat(&[&range(0x30, 0x39), &[0x2D, 0x5F]])
}

fn groups() -> Vec<GroupRecord>
{
    vec![
        GroupRecord {
            name: "Latin",
            flags: 0,
            primary: concat(&[
                &range(0x61, 0x7A),
                &[0xE1, 0xE2, 0xE9, 0xEA, 0x1EA1, 0x1EA5, 0x1EAD, 0x1EB9, 0x1EBF, 0x1EC7],
            ]),
            secondary: concat(&[
                &digits_dash_underscore(),
                &[0x301, 0x302, 0x323, 0xB7, 0x2019, 0x3BE],
            ]),
        },
        GroupRecord {
            name: "Greek",
            flags: 0,
            primary: range(0x3B1, 0x3C9),
            secondary: concat(&[&digits_dash_underscore(), &[0x301, 0x2019]]),
        },
        GroupRecord {
            name: "Cyrillic",
            flags: 0,
            primary: range(0x430, 0x44F),
            secondary: concat(&[&digits_dash_underscore(), &[0x301, 0x2019]]),
        },
        GroupRecord {
            name: "Devanagari",
            flags: 2,
            primary: vec![0x915, 0x93C, 0x958],
            secondary: range(0x30, 0x39),
        },
        GroupRecord {
            name: "Runic",
            flags: 1,
            primary: range(0x16A0, 0x16AA),
            secondary: vec![],
        },
        GroupRecord {
            name: "Hangul",
            flags: 0,
            primary: concat(&[&range(0xAC00, 0xD7A3), &jamo()]),
            secondary: vec![],
        },
    ]
}

/// beautified emoji sequences
pub fn emojis() -> Vec<Vec<u32>>
{
    vec![
        vec![0x1F44D],
        vec![0x1F44D, 0x1F3FB],
        vec![0x2764, 0xFE0F],
        vec![0x1F3F4, 0x200D, 0x2620, 0xFE0F],
        vec![0x1F680],
        vec![0x23, 0xFE0F, 0x20E3],
        vec![0x1F3F4],
    ]
}

/// (valid, confused)
fn wholes() -> Vec<(Vec<u32>, Vec<u32>)>
{
    vec![
        (vec![0x61], vec![0x430]),
        (vec![0x65], vec![0x435]),
        (vec![0x6F], vec![0x3BF, 0x43E]),
        (vec![0x70], vec![0x3C1, 0x440]),
        (vec![0x63], vec![0x441]),
        (vec![0x78], vec![0x3C7, 0x445]),
        (vec![0x79], vec![0x443]),
    ]
}

fn mapped() -> Vec<(u32, Vec<u32>)>
{
    let mut mapped: Vec<(u32, Vec<u32>)> = (0x41 ..= 0x5A).map(|c| (c, vec![c + 0x20])).collect();

    mapped.extend([
        (0x27, vec![0x2019]),
        (0x391, vec![0x3B1]),
        (0x39E, vec![0x3BE]),
        (0x415, vec![0x435]),
        (0x2126, vec![0x3C9]),
        (0x1F1, vec![0x64, 0x7A]),
    ]);

    mapped
}

fn write_mapped(e: &mut Encoder, mapped: &[(u32, Vec<u32>)])
{
    let widths = {
        let mut widths: Vec<usize> = mapped.iter().map(|m| m.1.len()).collect();
        widths.sort_unstable();
        widths.dedup();
        widths
    };

    for width in widths {
        let mut rows: Vec<&(u32, Vec<u32>)> = mapped.iter().filter(|m| m.1.len() == width).collect();
        rows.sort_by_key(|m| m.0);

        let keys: Vec<u32> = rows.iter().map(|m| m.0).collect();

        e.write_count(width).unwrap();
        e.write_unique(&keys).unwrap();

        for column in 0 .. width {
            let values: Vec<u32> = rows.iter().map(|m| m.1[column]).collect();
            e.write_unsorted_deltas(&values).unwrap();
        }
    }

    e.write_count(0).unwrap();
}

fn write_emojis(e: &mut Encoder, emojis: &[Vec<u32>])
{
    let max = emojis.iter().map(Vec::len).max().unwrap_or(0);

    for width in 1 ..= max {
        let rows: Vec<&Vec<u32>> = emojis.iter().filter(|s| s.len() == width).collect();

        if rows.is_empty() {
            continue;
        }

        e.write_count(width).unwrap();
        e.write_count(rows.len()).unwrap();

        for column in 0 .. width {
            let values: Vec<u32> = rows.iter().map(|s| s[column]).collect();
            e.write_unsorted_deltas(&values).unwrap();
        }
    }

    e.write_count(0).unwrap();
}

/// the ENSIP-15 table
pub fn spec_table() -> Vec<u8>
{
    let mut e = Encoder::new(&MAGIC).unwrap();

    let should_escape = concat(&[&range(0, 0x1F), &[0x7F], &range(0x200B, 0x200F), &[0xFE0F]]);
    e.write_unique(&should_escape).unwrap();
    e.write_unique(&[0xAD, 0xFE0E, 0xFE0F]).unwrap();

    e.write_unique(&MARKS).unwrap();
    e.write_unsigned(MAX_NSM).unwrap();
    e.write_unique(&MARKS).unwrap();

    let nfc_check = concat(&[&MARKS, &[0x958], &range(0x1161, 0x1175), &range(0x11A8, 0x11C2)]);
    e.write_unique(&nfc_check).unwrap();

    // fenced
    e.write_count(2).unwrap();
    e.write_sorted_ascending(&[0xB7, 0x2019]).unwrap();
    e.write_string("middle dot").unwrap();
    e.write_string("apostrophe").unwrap();

    write_mapped(&mut e, &mapped());

    for group in groups() {
        e.write_string(group.name).unwrap();
        e.write_unsigned(group.flags).unwrap();
        e.write_unique(&group.primary).unwrap();
        e.write_unique(&group.secondary).unwrap();
    }
    e.write_string("").unwrap();

    write_emojis(&mut e, &emojis());

    for (valid, confused) in wholes() {
        e.write_unique(&valid).unwrap();
        e.write_unique(&confused).unwrap();
    }
    e.write_unique(&[]).unwrap();

    e.finish()
}

pub fn canonical() -> CanonicalNormalizer
{
    CanonicalNormalizer::from_bytes(&nf_table()).unwrap()
}

pub fn normalizer() -> EnsNormalizer
{
    EnsNormalizer::from_bytes(&nf_table(), &spec_table()).unwrap()
}
