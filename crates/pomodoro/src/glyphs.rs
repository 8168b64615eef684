//! Block glyphs for the big clock face

/// Rows per glyph
pub const GLYPH_HEIGHT: usize = 5;
/// Columns per glyph
pub const GLYPH_WIDTH: usize = 5;

const ZERO: [&str; GLYPH_HEIGHT] = [" ███ ", "█   █", "█   █", "█   █", " ███ "];
const ONE: [&str; GLYPH_HEIGHT] = ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "];
const TWO: [&str; GLYPH_HEIGHT] = [" ███ ", "█   █", "  ██ ", " █   ", "█████"];
const THREE: [&str; GLYPH_HEIGHT] = [" ███ ", "█   █", "  ██ ", "█   █", " ███ "];
const FOUR: [&str; GLYPH_HEIGHT] = ["█   █", "█   █", "█████", "    █", "    █"];
const FIVE: [&str; GLYPH_HEIGHT] = ["█████", "█    ", "████ ", "    █", "████ "];
const SIX: [&str; GLYPH_HEIGHT] = [" ███ ", "█    ", "████ ", "█   █", " ███ "];
const SEVEN: [&str; GLYPH_HEIGHT] = ["█████", "    █", "   █ ", "  █  ", "  █  "];
const EIGHT: [&str; GLYPH_HEIGHT] = [" ███ ", "█   █", " ███ ", "█   █", " ███ "];
const NINE: [&str; GLYPH_HEIGHT] = [" ███ ", "█   █", " ████", "    █", " ███ "];
const COLON: [&str; GLYPH_HEIGHT] = ["     ", "  █  ", "     ", "  █  ", "     "];
const BLANK: [&str; GLYPH_HEIGHT] = ["     "; GLYPH_HEIGHT];

/// Glyph rows for a single character; unknown characters render blank
pub fn glyph(c: char) -> &'static [&'static str; GLYPH_HEIGHT] {
    match c {
        '0' => &ZERO,
        '1' => &ONE,
        '2' => &TWO,
        '3' => &THREE,
        '4' => &FOUR,
        '5' => &FIVE,
        '6' => &SIX,
        '7' => &SEVEN,
        '8' => &EIGHT,
        '9' => &NINE,
        ':' => &COLON,
        _ => &BLANK,
    }
}

/// Render text as `GLYPH_HEIGHT` rows of block glyphs, one space between glyphs
pub fn banner(text: &str) -> Vec<String> {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
