// hangul syllables are decomposed and composed arithmetically, they never appear in the tables:
//  - L: leading consonants U+1100..U+1112
//  - V: vowels U+1161..U+1175
//  - T: trailing consonants U+11A8..U+11C2 (T index 0 - no trailing consonant)

/// start of the syllable block
pub const HANGUL_S_BASE: u32 = 0xAC00;
/// start of the leading consonants
pub const HANGUL_L_BASE: u32 = 0x1100;
/// start of the vowels
pub const HANGUL_V_BASE: u32 = 0x1161;
/// one before the first trailing consonant
pub const HANGUL_T_BASE: u32 = 0x11A7;
/// number of leading consonants
pub const HANGUL_L_COUNT: u32 = 19;
/// number of vowels
pub const HANGUL_V_COUNT: u32 = 21;
/// number of trailing consonants, plus one for "none"
pub const HANGUL_T_COUNT: u32 = 28;
/// vowels * trailing consonants
pub const HANGUL_N_COUNT: u32 = 588;
/// number of syllables
pub const HANGUL_S_COUNT: u32 = 11172;

#[inline(always)]
pub fn is_hangul_syllable(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// L, V and (if present) T of a syllable
#[inline(always)]
pub fn decompose_syllable(code: u32) -> ([u32; 3], usize)
{
    let s = code - HANGUL_S_BASE;

    let l = HANGUL_L_BASE + s / HANGUL_N_COUNT;
    let v = HANGUL_V_BASE + (s % HANGUL_N_COUNT) / HANGUL_T_COUNT;
    let t = s % HANGUL_T_COUNT;

    match t {
        0 => ([l, v, 0], 2),
        _ => ([l, v, HANGUL_T_BASE + t], 3),
    }
}

/// L + V -> LV, LV + T -> LVT
#[inline(always)]
pub fn compose_jamo(first: u32, second: u32) -> Option<u32>
{
    let l = first.wrapping_sub(HANGUL_L_BASE);

    if l < HANGUL_L_COUNT {
        let v = second.wrapping_sub(HANGUL_V_BASE);

        if v < HANGUL_V_COUNT {
            return Some(HANGUL_S_BASE + l * HANGUL_N_COUNT + v * HANGUL_T_COUNT);
        }

        return None;
    }

    let lv = first.wrapping_sub(HANGUL_S_BASE);

    // only an LV syllable (no trailing consonant yet) takes a T
    if lv < HANGUL_S_COUNT && lv % HANGUL_T_COUNT == 0 {
        let t = second.wrapping_sub(HANGUL_T_BASE);

        if t > 0 && t < HANGUL_T_COUNT {
            return Some(first + t);
        }
    }

    None
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn syllable_without_trailing()
    {
        assert_eq!(decompose_syllable(0xAC00), ([0x1100, 0x1161, 0], 2));
        assert_eq!(compose_jamo(0x1100, 0x1161), Some(0xAC00));
    }

    #[test]
    fn syllable_with_trailing()
    {
        // 각
        assert_eq!(decompose_syllable(0xAC01), ([0x1100, 0x1161, 0x11A8], 3));
        assert_eq!(compose_jamo(0xAC00, 0x11A8), Some(0xAC01));
        // 힣, the last syllable
        assert_eq!(decompose_syllable(0xD7A3), ([0x1112, 0x1175, 0x11C2], 3));
    }

    #[test]
    fn no_composition()
    {
        // LVT does not take another T
        assert_eq!(compose_jamo(0xAC01, 0x11A8), None);
        // T base itself is not a trailing consonant
        assert_eq!(compose_jamo(0xAC00, HANGUL_T_BASE), None);
        assert_eq!(compose_jamo(0x1100, 0x1100), None);
        assert_eq!(compose_jamo(0x61, 0x301), None);
        assert!(!is_hangul_syllable(0xD7A4));
        assert!(is_hangul_syllable(0xD7A3));
    }
}
