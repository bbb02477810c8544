//! Full-width / half-width character conversion.
//!
//! ASCII printables and the space map through fixed numeric offsets; the
//! katakana, Hangul jamo, and currency/symbol repertoires map through
//! parallel same-length string tables matched by index. The index
//! correspondence is the invariant that makes the tables verifiable, so
//! they stay two flat strings per repertoire rather than a map. Anything
//! not covered passes through unchanged.

/// Offset between `0x21..=0x7E` and the `0xFF01..=0xFF5E` full-width block.
const ASCII_WIDTH_OFFSET: u32 = 0xFEE0;

const SPACE: char = '\u{0020}';
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

const KATAKANA_HALF: &str = "｡｢｣､･ｦｧｨｩｪｫｬｭｮｯｰｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜﾝﾞﾟ";
const KATAKANA_FULL: &str = "。「」、・ヲァィゥェォャュョッーアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン゛゜";

const HANGUL_JAMO_HALF: &str = "ﾡﾢﾣﾤﾥﾦﾧﾨﾩﾪﾫﾬﾭﾮﾯﾰﾱﾲﾳﾴﾵﾶﾷﾸﾹﾺﾻﾼﾽﾾￂￃￄￅￆￇￊￋￌￍￎￏￒￓￔￕￖￗￚￛￜ";
const HANGUL_JAMO_FULL: &str = "ㄱㄲㄳㄴㄵㄶㄷㄸㄹㄺㄻㄼㄽㄾㄿㅀㅁㅂㅃㅄㅅㅆㅇㅈㅉㅊㅋㅌㅍㅎㅏㅐㅑㅒㅓㅔㅕㅖㅗㅘㅙㅚㅛㅜㅝㅞㅟㅠㅡㅢㅣ";

const SYMBOL_HALF: &str = "¢£¬¯¦¥₩";
const SYMBOL_FULL: &str = "￠￡￢￣￤￥￦";

/// Convert every covered character to its full-width form.
pub fn to_full_width(text: &str) -> String {
    text.chars().map(full_width_char).collect()
}

/// Convert every covered character to its half-width form.
pub fn to_half_width(text: &str) -> String {
    text.chars().map(half_width_char).collect()
}

fn full_width_char(ch: char) -> char {
    match ch {
        SPACE => IDEOGRAPHIC_SPACE,
        '\u{0021}'..='\u{007E}' => {
            char::from_u32(ch as u32 + ASCII_WIDTH_OFFSET).unwrap_or(ch)
        }
        _ => table_lookup(ch, KATAKANA_HALF, KATAKANA_FULL)
            .or_else(|| table_lookup(ch, HANGUL_JAMO_HALF, HANGUL_JAMO_FULL))
            .or_else(|| table_lookup(ch, SYMBOL_HALF, SYMBOL_FULL))
            .unwrap_or(ch),
    }
}

fn half_width_char(ch: char) -> char {
    match ch {
        IDEOGRAPHIC_SPACE => SPACE,
        '\u{FF01}'..='\u{FF5E}' => {
            char::from_u32(ch as u32 - ASCII_WIDTH_OFFSET).unwrap_or(ch)
        }
        _ => table_lookup(ch, KATAKANA_FULL, KATAKANA_HALF)
            .or_else(|| table_lookup(ch, HANGUL_JAMO_FULL, HANGUL_JAMO_HALF))
            .or_else(|| table_lookup(ch, SYMBOL_FULL, SYMBOL_HALF))
            .unwrap_or(ch),
    }
}

/// Position-matched lookup: the character at index `i` of `from` maps to the
/// character at index `i` of `to`.
fn table_lookup(ch: char, from: &str, to: &str) -> Option<char> {
    let idx = from.chars().position(|c| c == ch)?;
    to.chars().nth(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_tables_are_position_matched() {
        for (half, full) in [
            (KATAKANA_HALF, KATAKANA_FULL),
            (HANGUL_JAMO_HALF, HANGUL_JAMO_FULL),
            (SYMBOL_HALF, SYMBOL_FULL),
        ] {
            assert_eq!(half.chars().count(), full.chars().count());
        }
    }

    #[test]
    fn ascii_maps_by_offset() {
        assert_eq!(to_full_width("Abc 123!"), "Ａｂｃ　１２３！");
        assert_eq!(to_half_width("Ａｂｃ　１２３！"), "Abc 123!");
    }

    #[test]
    fn space_maps_to_ideographic_space() {
        assert_eq!(to_full_width(" "), "\u{3000}");
        assert_eq!(to_half_width("\u{3000}"), " ");
    }

    #[test]
    fn katakana_maps_through_the_table() {
        assert_eq!(to_full_width("ﾃｽﾄ"), "テスト");
        assert_eq!(to_half_width("テスト"), "ﾃｽﾄ");
        // Voicing marks are their own table entries.
        assert_eq!(to_full_width("ｶﾞ"), "カ゛");
    }

    #[test]
    fn hangul_jamo_maps_through_the_table() {
        assert_eq!(to_full_width("ﾡﾱ"), "ㄱㅁ");
        assert_eq!(to_half_width("ㄱㅁ"), "ﾡﾱ");
    }

    #[test]
    fn symbols_map_through_the_table() {
        assert_eq!(to_full_width("¥₩¢"), "￥￦￠");
        assert_eq!(to_half_width("￥￦￠"), "¥₩¢");
    }

    #[test]
    fn uncovered_characters_pass_through() {
        assert_eq!(to_full_width("ひらがな漢字"), "ひらがな漢字");
        assert_eq!(to_half_width("ひらがな漢字"), "ひらがな漢字");
    }

    #[test]
    fn round_trip_over_the_covered_half_width_set() {
        let mut covered = String::from(" ");
        covered.extend('\u{0021}'..='\u{007E}');
        covered.push_str(KATAKANA_HALF);
        covered.push_str(HANGUL_JAMO_HALF);
        covered.push_str(SYMBOL_HALF);
        assert_eq!(to_half_width(&to_full_width(&covered)), covered);
    }

    #[test]
    fn round_trip_over_the_covered_full_width_set() {
        let mut covered = String::from("\u{3000}");
        covered.extend('\u{FF01}'..='\u{FF5E}');
        covered.push_str(KATAKANA_FULL);
        covered.push_str(HANGUL_JAMO_FULL);
        covered.push_str(SYMBOL_FULL);
        assert_eq!(to_full_width(&to_half_width(&covered)), covered);
    }
}
