/// начало блока слогов хангыль
pub const HANGUL_S_BASE: u32 = 0xAC00;
/// начало блока ведущих согласных чамо
pub const HANGUL_L_BASE: u32 = 0x1100;
/// начало блока гласных чамо
pub const HANGUL_V_BASE: u32 = 0x1161;
/// перед началом блока завершающих согласных
pub const HANGUL_T_BASE: u32 = 0x11A7;
/// количество ведущих согласных
pub const HANGUL_L_COUNT: u32 = 19;
/// количество гласных
pub const HANGUL_V_COUNT: u32 = 21;
/// количество завершающих согласных (на 1 больше)
pub const HANGUL_T_COUNT: u32 = 28;
/// количество гласных * количество завершающих согласных
pub const HANGUL_N_COUNT: u32 = 588;
/// количество слогов хангыль в Unicode
pub const HANGUL_S_COUNT: u32 = 11172;

#[inline]
pub fn is_hangul_syllable(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// слог LV (без завершающей согласной)
#[inline]
pub fn is_hangul_lv(code: u32) -> bool
{
    is_hangul_syllable(code) && (code - HANGUL_S_BASE) % HANGUL_T_COUNT == 0
}

/// декомпозиция слога хангыль на 2 или 3 чамо
pub fn decompose_hangul(code: u32) -> Vec<u32>
{
    let index = code - HANGUL_S_BASE;

    let l = HANGUL_L_BASE + index / HANGUL_N_COUNT;
    let v = HANGUL_V_BASE + (index % HANGUL_N_COUNT) / HANGUL_T_COUNT;
    let t = index % HANGUL_T_COUNT;

    match t {
        0 => vec![l, v],
        _ => vec![l, v, HANGUL_T_BASE + t],
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn syllables()
    {
        assert_eq!(decompose_hangul(0xAC00), vec![0x1100, 0x1161]);
        assert_eq!(decompose_hangul(0xAC01), vec![0x1100, 0x1161, 0x11A8]);
        assert_eq!(decompose_hangul(0xD7A3), vec![0x1112, 0x1175, 0x11C2]);

        assert!(is_hangul_lv(0xAC00));
        assert!(!is_hangul_lv(0xAC01));
        assert!(!is_hangul_syllable(0xD7A4));
    }
}
