//! ENSIP-15 label rules
//!
//! the order of the checks decides which error a label with several problems reports:
//! underscore, ASCII / emoji shortcuts, combining marks, fenced, group, whole-script.

use crate::codepoint::{is_ascii, str_from_codes};
use crate::error::ProcessError;
use crate::nf::CanonicalNormalizer;
use crate::render::{bidi_quoted, quoted_code, safe_str};
use crate::spec::{Confusion, Group, Spec};
use crate::tokens::OutputToken;

const UNDERSCORE: u32 = 0x5F;
const HYPHEN: u32 = 0x2D;

/// validates a tokenized label, `codes` are the flattened tokens; returns the label's group
pub fn check_valid_label<'s>(
    spec: &'s Spec,
    nf: &CanonicalNormalizer,
    codes: &[u32],
    tokens: &[OutputToken],
) -> Result<&'s Group, ProcessError>
{
    if codes.is_empty() || tokens.is_empty() {
        return Err(ProcessError::EmptyLabel);
    }

    check_leading_underscore(codes)?;

    let has_emoji = tokens.len() > 1 || tokens[0].is_emoji();

    if !has_emoji && is_ascii(codes) {
        check_label_extension(codes)?;
        return Ok(spec.ascii_group());
    }

    let chars: Vec<u32> = tokens
        .iter()
        .filter(|t| !t.is_emoji())
        .flat_map(|t| t.codes().iter().copied())
        .collect();

    if chars.is_empty() {
        return Ok(spec.emoji_group());
    }

    check_combining_marks(spec, tokens)?;
    check_fenced(spec, codes)?;

    let mut unique: Vec<u32> = Vec::with_capacity(chars.len());

    for &code in chars.iter() {
        if !unique.contains(&code) {
            unique.push(code);
        }
    }

    let group = determine_group(spec, &unique)?;

    check_group(spec, nf, group, &chars)?;
    check_whole(spec, group, &unique)?;

    Ok(group)
}

/// underscores only as a prefix
fn check_leading_underscore(codes: &[u32]) -> Result<(), ProcessError>
{
    if let Some(last) = codes.iter().rposition(|&c| c == UNDERSCORE) {
        if codes[.. last].iter().any(|&c| c != UNDERSCORE) {
            return Err(ProcessError::LeadingUnderscore);
        }
    }

    Ok(())
}

/// `??--` looks like an ACE prefix
fn check_label_extension(codes: &[u32]) -> Result<(), ProcessError>
{
    if codes.len() >= 4 && codes[2] == HYPHEN && codes[3] == HYPHEN {
        return Err(ProcessError::InvalidLabelExtension(str_from_codes(&codes[.. 4])));
    }

    Ok(())
}

/// text may not start the label, or follow an emoji, with a combining mark
fn check_combining_marks(spec: &Spec, tokens: &[OutputToken]) -> Result<(), ProcessError>
{
    for (i, token) in tokens.iter().enumerate() {
        if token.is_emoji() {
            continue;
        }

        let first = match token.codes().first() {
            Some(&first) if spec.combining_marks().contains(first) => first,
            _ => continue,
        };

        return Err(match i {
            0 => ProcessError::CmLeading(quoted_code(spec, first)),
            _ => ProcessError::CmAfterEmoji(format!(
                "{} + {}",
                bidi_quoted(&str_from_codes(tokens[i - 1].codes())),
                quoted_code(spec, first)
            )),
        });
    }

    Ok(())
}

/// fenced codepoints: not first, not last, never two in a row
fn check_fenced(spec: &Spec, codes: &[u32]) -> Result<(), ProcessError>
{
    let mut previous = match spec.fenced(codes[0]) {
        Some(name) => return Err(ProcessError::FencedLeading(name.to_owned())),
        None => None,
    };

    // index right after the last fenced codepoint, 0 - none seen
    let mut last = 0;

    for (i, code) in codes.iter().enumerate().skip(1) {
        if let Some(name) = spec.fenced(*code) {
            if last == i {
                return Err(ProcessError::FencedAdjacent(format!(
                    "{} + {}",
                    previous.unwrap_or(name),
                    name
                )));
            }

            last = i + 1;
            previous = Some(name);
        }
    }

    match (last == codes.len(), previous) {
        (true, Some(name)) => Err(ProcessError::FencedTrailing(name.to_owned())),
        _ => Ok(()),
    }
}

/// narrows the groups down codepoint by codepoint, stops as soon as one is left
fn determine_group<'s>(spec: &'s Spec, unique: &[u32]) -> Result<&'s Group, ProcessError>
{
    let mut groups: Vec<&Group> = spec.script_groups().iter().collect();

    for &code in unique {
        let next: Vec<&Group> = groups.iter().copied().filter(|g| g.contains(code)).collect();

        if next.is_empty() {
            let known = spec.script_groups().iter().any(|g| g.contains(code));

            return Err(match (groups.first(), known) {
                (Some(group), true) => mixture_error(spec, group, code),
                _ => ProcessError::DisallowedCharacter(quoted_code(spec, code)),
            });
        }

        groups = next;

        if groups.len() == 1 {
            break;
        }
    }

    groups
        .first()
        .copied()
        .ok_or(ProcessError::EmptyLabel)
}

/// every character belongs to the group; non-spacing marks are limited unless whitelisted
fn check_group(
    spec: &Spec,
    nf: &CanonicalNormalizer,
    group: &Group,
    chars: &[u32],
) -> Result<(), ProcessError>
{
    if group.restricted {
        return Err(ProcessError::DisallowedCharacter(format!(
            "{} {}",
            group,
            quoted_code(spec, chars[0])
        )));
    }

    if let Some(&code) = chars.iter().find(|&&c| !group.contains(c)) {
        return Err(mixture_error(spec, group, code));
    }

    if group.cm_whitelisted {
        return Ok(());
    }

    let decomposed = nf.nfd(chars);
    let marks = spec.non_spacing_marks();
    let max = spec.max_non_spacing_marks();

    let mut i = 1;

    while i < decomposed.len() {
        if marks.contains(decomposed[i]) {
            let mut j = i + 1;

            while j < decomposed.len() && marks.contains(decomposed[j]) {
                let code = decomposed[j];

                if decomposed[i .. j].contains(&code) {
                    return Err(ProcessError::NsmDuplicate(quoted_code(spec, code)));
                }

                j += 1;
            }

            if j - i > max {
                return Err(ProcessError::NsmExcessive(format!(
                    "{} ({}/{})",
                    bidi_quoted(&safe_str(spec, &decomposed[i - 1 .. j])),
                    j - i,
                    max
                )));
            }

            i = j;
        }

        i += 1;
    }

    Ok(())
}

/// the label is a whole-script confusable if another group can spell all of it with
/// look-alikes and shares the remaining characters
fn check_whole(spec: &Spec, group: &Group, unique: &[u32]) -> Result<(), ProcessError>
{
    let mut maker: Option<Vec<usize>> = None;
    let mut shared = vec![];

    for &code in unique {
        match spec.confusion(code) {
            Confusion::Unique => return Ok(()),
            Confusion::Shared => shared.push(code),
            Confusion::Whole(index) => {
                let complement = spec.wholes()[index]
                    .complements
                    .get(&code)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                let next: Vec<usize> = match maker {
                    Some(maker) => maker.into_iter().filter(|g| complement.contains(g)).collect(),
                    None => complement.to_vec(),
                };

                if next.is_empty() {
                    return Ok(());
                }

                maker = Some(next);
            }
        }
    }

    if let Some(maker) = maker {
        for index in maker {
            let other = &spec.groups()[index];

            if shared.iter().all(|&c| other.contains(c)) {
                return Err(ProcessError::WholeConfusable(format!("{}/{}", group, other)));
            }
        }
    }

    Ok(())
}

fn mixture_error(spec: &Spec, group: &Group, code: u32) -> ProcessError
{
    let quoted = match spec.primary_group_of(code) {
        Some(owner) => format!("{} {}", owner, quoted_code(spec, code)),
        None => quoted_code(spec, code),
    };

    ProcessError::IllegalMixture(format!("{} + {}", group, quoted))
}
