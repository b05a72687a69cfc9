use std::collections::HashMap;

use super::group::Group;
use crate::bits::Decoder;
use crate::codepoint::CodepointSet;
use crate::error::DecodeResult;

/// one class of look-alike characters across scripts
#[derive(Debug)]
pub struct Whole
{
    /// characters legitimate in at least one group
    pub valid: CodepointSet,
    /// characters that look like the valid ones
    pub confused: CodepointSet,
    /// codepoint -> indices of groups holding a look-alike of it, but not the codepoint itself
    pub complements: HashMap<u32, Vec<usize>>,
}

/// codepoints of one whole that share groups
struct Record
{
    groups: Vec<usize>,
    codes: Vec<u32>,
}

impl Whole
{
    fn new(valid: CodepointSet, confused: CodepointSet, groups: &[Group]) -> Self
    {
        let mut records: Vec<Record> = vec![];

        for code in valid.iter().chain(confused.iter()) {
            let holders: Vec<usize> = groups
                .iter()
                .filter(|g| g.contains(code))
                .map(|g| g.index)
                .collect();

            let position = records
                .iter()
                .position(|r| holders.iter().any(|g| r.groups.contains(g)));

            let position = match position {
                Some(position) => position,
                None => {
                    records.push(Record {
                        groups: vec![],
                        codes: vec![],
                    });
                    records.len() - 1
                }
            };

            let record = &mut records[position];

            record.codes.push(code);

            for g in holders {
                if !record.groups.contains(&g) {
                    record.groups.push(g);
                }
            }
        }

        let mut union: Vec<usize> = records.iter().flat_map(|r| r.groups.iter().copied()).collect();
        union.sort_unstable();
        union.dedup();

        let mut complements = HashMap::new();

        for record in records.iter() {
            let complement: Vec<usize> = union
                .iter()
                .copied()
                .filter(|g| !record.groups.contains(g))
                .collect();

            for &code in record.codes.iter() {
                complements.insert(code, complement.clone());
            }
        }

        Self {
            valid,
            confused,
            complements,
        }
    }

    /// every codepoint the whole knows about
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_
    {
        self.valid.iter().chain(self.confused.iter())
    }
}

/// wholes until an empty valid set; complements are resolved against the decoded groups
pub fn decode_wholes(decoder: &mut Decoder, groups: &[Group]) -> DecodeResult<Vec<Whole>>
{
    let mut wholes = vec![];

    loop {
        let valid = decoder.read_sorted_unique()?;

        if valid.is_empty() {
            break;
        }

        let confused = decoder.read_sorted_unique()?;

        wholes.push(Whole::new(
            CodepointSet::new(valid),
            CodepointSet::new(confused),
            groups,
        ));
    }

    Ok(wholes)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn group(index: usize, name: &str, codes: &[u32]) -> Group
    {
        Group::synthetic(index, name, CodepointSet::new(codes.to_vec()))
    }

    #[test]
    fn complements_point_at_other_scripts()
    {
        let groups = vec![
            group(0, "Latin", &[0x6F, 0x31]),
            group(1, "Greek", &[0x3BF, 0x31]),
            group(2, "Cyrillic", &[0x43E, 0x31]),
        ];

        let whole = Whole::new(
            CodepointSet::new(vec![0x6F]),
            CodepointSet::new(vec![0x3BF, 0x43E]),
            &groups,
        );

        assert_eq!(whole.complements[&0x6F], vec![1, 2]);
        assert_eq!(whole.complements[&0x3BF], vec![0, 2]);
        assert_eq!(whole.complements[&0x43E], vec![0, 1]);
        assert_eq!(whole.codes().count(), 3);
    }

    #[test]
    fn shared_groups_merge_records()
    {
        // both codepoints live in Latin, no complement for either
        let groups = vec![group(0, "Latin", &[0x6C, 0x31])];

        let whole = Whole::new(
            CodepointSet::new(vec![0x6C]),
            CodepointSet::new(vec![0x31]),
            &groups,
        );

        assert!(whole.complements[&0x6C].is_empty());
        assert!(whole.complements[&0x31].is_empty());
    }
}
