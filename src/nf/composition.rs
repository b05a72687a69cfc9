use super::packed::Packed;

/// canonical composition of a decomposed, canonically ordered sequence.
///
/// `compose` is the pair composition (hangul + table). a mark is blocked from the current
/// starter when a skipped mark before it has the same or a higher rank.
pub fn compose_packed(packed: &[Packed], compose: impl Fn(u32, u32) -> Option<u32>) -> Vec<u32>
{
    let mut result = Vec::with_capacity(packed.len());
    // marks that stay after the starter
    let mut stack: Vec<u32> = vec![];
    let mut starter: Option<u32> = None;
    // rank of the last skipped mark, 0 - nothing skipped since the starter
    let mut skipped = 0;

    for value in packed {
        let code = value.code();
        let rank = value.rank();

        let current = match starter {
            Some(current) => current,
            None => {
                match rank {
                    0 => starter = Some(code),
                    _ => result.push(code),
                }
                continue;
            }
        };

        if skipped > 0 && skipped >= rank {
            // blocked
            if rank == 0 {
                result.push(current);
                result.append(&mut stack);
                starter = Some(code);
            } else {
                stack.push(code);
            }

            skipped = rank;
            continue;
        }

        match compose(current, code) {
            Some(composed) => starter = Some(composed),
            None => match skipped == 0 && rank == 0 {
                true => {
                    result.push(current);
                    starter = Some(code);
                }
                false => {
                    stack.push(code);
                    skipped = rank;
                }
            },
        }
    }

    if let Some(current) = starter {
        result.push(current);
        result.append(&mut stack);
    }

    result
}
