// слоги хангыль раскладываются и собираются алгоритмически:
//  - L: ведущие согласные U+1100..=U+1112
//  - V: гласные U+1161..=U+1175
//  - T: завершающие согласные U+11A8..=U+11C2 (T_BASE = U+11A7 - "нет согласной")
// слог = HANGUL_BASE + (L * V_COUNT + V) * T_COUNT + T

/// начало блока ведущих согласных чамо
pub const JAMO_L_BASE: u32 = 0x1100;
/// количество ведущих согласных
pub const JAMO_L_COUNT: u32 = 19;
pub const JAMO_L_END: u32 = JAMO_L_BASE + JAMO_L_COUNT - 1;
/// начало блока гласных чамо
pub const JAMO_V_BASE: u32 = 0x1161;
/// количество гласных
pub const JAMO_V_COUNT: u32 = 21;
pub const JAMO_V_END: u32 = JAMO_V_BASE + JAMO_V_COUNT - 1;
/// кодпоинт перед блоком завершающих согласных
pub const JAMO_T_BASE: u32 = 0x11A7;
/// количество завершающих согласных + 1 (отсутствие согласной)
pub const JAMO_T_COUNT: u32 = 28;
pub const JAMO_T_END: u32 = JAMO_T_BASE + JAMO_T_COUNT - 1;

/// начало блока слогов хангыль
pub const HANGUL_BASE: u32 = 0xAC00;
/// количество слогов хангыль
pub const HANGUL_COUNT: u32 = JAMO_L_COUNT * JAMO_V_COUNT * JAMO_T_COUNT;
pub const HANGUL_END: u32 = HANGUL_BASE + HANGUL_COUNT - 1;
/// количество слогов на одну ведущую согласную
pub const HANGUL_LV_BLOCK: u32 = JAMO_V_COUNT * JAMO_T_COUNT;

/// слог хангыль?
#[inline(always)]
pub fn is_hangul(code: u32) -> bool
{
    code.wrapping_sub(HANGUL_BASE) < HANGUL_COUNT
}

/// слог LV (без завершающей согласной)?
#[inline(always)]
pub fn is_hangul_lv(code: u32) -> bool
{
    let s = code.wrapping_sub(HANGUL_BASE);

    s < HANGUL_COUNT && s % JAMO_T_COUNT == 0
}

/// индекс ведущей согласной
#[inline(always)]
pub fn jamo_l_index(code: u32) -> Option<u32>
{
    let l = code.wrapping_sub(JAMO_L_BASE);

    match l < JAMO_L_COUNT {
        true => Some(l),
        false => None,
    }
}

/// индекс гласной
#[inline(always)]
pub fn jamo_v_index(code: u32) -> Option<u32>
{
    let v = code.wrapping_sub(JAMO_V_BASE);

    match v < JAMO_V_COUNT {
        true => Some(v),
        false => None,
    }
}

/// индекс завершающей согласной, 0 < t < T_COUNT
#[inline(always)]
pub fn jamo_t_index(code: u32) -> Option<u32>
{
    let t = code.wrapping_sub(JAMO_T_BASE);

    match 0 < t && t < JAMO_T_COUNT {
        true => Some(t),
        false => None,
    }
}

/// разложить слог на чамо (2 или 3 кодовые единицы)
#[inline]
pub fn decompose<F>(code: u32, mut write: F)
where
    F: FnMut(u16),
{
    let s = code - HANGUL_BASE;
    let t = s % JAMO_T_COUNT;
    let s = s / JAMO_T_COUNT;

    write((JAMO_L_BASE + s / JAMO_V_COUNT) as u16);
    write((JAMO_V_BASE + s % JAMO_V_COUNT) as u16);

    if t != 0 {
        write((JAMO_T_BASE + t) as u16);
    }
}

/// слог LV из индексов ведущей согласной и гласной
#[inline(always)]
pub fn compose_lv(l: u32, v: u32) -> u32
{
    HANGUL_BASE + (l * JAMO_V_COUNT + v) * JAMO_T_COUNT
}

/// слог LVT из слога LV и индекса завершающей согласной
#[inline(always)]
pub fn compose_lvt(lv: u32, t: u32) -> u32
{
    lv + t
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn decomposed(code: u32) -> Vec<u16>
    {
        let mut s = vec![];
        decompose(code, |unit| s.push(unit));
        s
    }

    #[test]
    fn syllables()
    {
        assert_eq!(decomposed(0xAC00), [0x1100, 0x1161]);
        assert_eq!(decomposed(0xAC01), [0x1100, 0x1161, 0x11A8]);
        assert_eq!(decomposed(HANGUL_END), [0x1112, 0x1175, 0x11C2]);

        assert!(is_hangul_lv(0xAC00));
        assert!(!is_hangul_lv(0xAC01));
        assert!(!is_hangul(0xABFF));
        assert!(!is_hangul(HANGUL_END + 1));

        assert_eq!(compose_lv(0, 0), 0xAC00);
        assert_eq!(compose_lvt(compose_lv(18, 20), 27), HANGUL_END);
    }

    #[test]
    fn jamo()
    {
        assert_eq!(jamo_l_index(0x1112), Some(18));
        assert_eq!(jamo_l_index(0x1113), None);
        assert_eq!(jamo_v_index(0x1175), Some(20));
        assert_eq!(jamo_v_index(0x1160), None);
        assert_eq!(jamo_t_index(0x11A7), None);
        assert_eq!(jamo_t_index(0x11A8), Some(1));
        assert_eq!(jamo_t_index(0x11C3), None);
    }
}
