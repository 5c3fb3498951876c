//! Advance-width metrics for the four base-14 Helvetica faces used on the
//! forms. Widths are the standard AFM values in 1/1000 em over the printable
//! ASCII range; the oblique faces share their upright tables.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl Font {
    pub const ALL: [Font; 4] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::HelveticaBoldOblique,
    ];

    /// Resource name the font is registered under in every page's /Font dict.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
            Font::HelveticaBoldOblique => "F4",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica | Font::HelveticaOblique => &HELVETICA_WIDTHS,
            Font::HelveticaBold | Font::HelveticaBoldOblique => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

// Characters outside the table (or above ASCII) fall back to one average em.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica advance widths for chars 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, // ' ' .. ')'
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556, // '*' .. '3'
    556, 556, 556, 556, 556, 556, 278, 278, 584, 584, // '4' .. '='
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, // '>' .. 'G'
    722, 278, 500, 667, 556, 833, 722, 778, 667, 778, // 'H' .. 'Q'
    722, 667, 611, 722, 667, 944, 667, 667, 611, 278, // 'R' .. '['
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556, // '\' .. 'e'
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 'f' .. 'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, // 'p' .. 'y'
    500, 334, 260, 334, 584,                          // 'z' .. '~'
];

/// Helvetica-Bold advance widths for chars 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, // ' ' .. ')'
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556, // '*' .. '3'
    556, 556, 556, 556, 556, 556, 333, 333, 584, 584, // '4' .. '='
    584, 611, 975, 722, 722, 722, 722, 667, 611, 778, // '>' .. 'G'
    722, 278, 556, 722, 611, 833, 722, 778, 667, 778, // 'H' .. 'Q'
    722, 667, 611, 722, 667, 944, 667, 667, 611, 333, // 'R' .. '['
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556, // '\' .. 'e'
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 'f' .. 'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, // 'p' .. 'y'
    500, 389, 280, 389, 584,                          // 'z' .. '~'
];

fn char_units(c: char, font: Font) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        font.widths()[(code - 32) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` rendered in `font` at `size` points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_units(c, font) as u32).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(text_width("", Font::Helvetica, 12.0), 0.0);
    }

    #[test]
    fn narrow_and_wide_glyphs_differ() {
        let w_i = text_width("i", Font::Helvetica, 12.0);
        let w_w = text_width("W", Font::Helvetica, 12.0);
        assert!(w_i < w_w);
    }

    #[test]
    fn bold_face_is_wider() {
        let regular = text_width("Store Code", Font::Helvetica, 10.0);
        let bold = text_width("Store Code", Font::HelveticaBold, 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn oblique_shares_upright_metrics() {
        let upright = text_width("Declaration", Font::Helvetica, 9.0);
        let oblique = text_width("Declaration", Font::HelveticaOblique, 9.0);
        assert_eq!(upright, oblique);
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let at_ten = text_width("Main Store", Font::HelveticaBold, 10.0);
        let at_twenty = text_width("Main Store", Font::HelveticaBold, 20.0);
        assert!((at_twenty - 2.0 * at_ten).abs() < 1e-4);
    }
}
