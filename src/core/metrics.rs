//! Text metrics for the built-in Helvetica faces and the embedded Unicode
//! face.
//!
//! The PDF base-14 fonts carry no embedded metrics, so alignment is computed
//! from the Helvetica AFM advance widths (units of 1/1000 em). Characters
//! WinAnsi cannot encode are set in the face from [`unicode_font`] and
//! measured from its own advances.

use super::fonts::unicode_font;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// Printable ASCII, 0x20 ..= 0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' .. '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' .. 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
    278, 278, 278, 469, 556, 333, // '[' .. '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' .. 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' .. 'z'
    334, 260, 334, 584, // '{' .. '~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

// Latin-1 and cp1252 extras beyond ASCII take a digit-width advance.
const FALLBACK_WIDTH: u16 = 556;

fn advance(ch: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD_WIDTHS } else { &HELVETICA_WIDTHS };
    match ch as u32 {
        code @ 0x20..=0x7E => table[(code - 0x20) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Whether the base-14 fonts can show `ch` under WinAnsiEncoding.
pub fn is_winansi(ch: char) -> bool {
    matches!(ch as u32, 0x20..=0x7E | 0xA0..=0xFF)
        || matches!(
            ch,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž' | '‘' | '’' | '“'
                | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ' | 'ž' | 'Ÿ'
        )
}

/// A maximal slice of text drawn with one kind of face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// `true` for the Helvetica faces, `false` for the Unicode face.
    pub builtin: bool,
}

pub fn text_runs(text: &str) -> Vec<TextRun<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let builtin = is_winansi(ch);
        match current {
            Some(kind) if kind != builtin => {
                runs.push(TextRun { text: &text[start..i], builtin: kind });
                start = i;
                current = Some(builtin);
            }
            None => current = Some(builtin),
            _ => {}
        }
    }
    if let Some(builtin) = current {
        runs.push(TextRun { text: &text[start..], builtin });
    }
    runs
}

/// Width of one run in millimetres. Unicode runs take no space when no face
/// is available, since nothing is drawn for them.
pub fn run_width(run: &TextRun<'_>, size_pt: f32, bold: bool) -> f32 {
    if run.builtin {
        let units: u32 = run.text.chars().map(|c| advance(c, bold) as u32).sum();
        units as f32 / 1000.0 * size_pt * MM_PER_PT
    } else {
        unicode_font().map_or(0.0, |font| font.text_width(run.text, size_pt))
    }
}

/// Width of `text` in millimetres when set at `size_pt`.
pub fn text_width(text: &str, size_pt: f32, bold: bool) -> f32 {
    text_runs(text).iter().map(|run| run_width(run, size_pt, bold)).sum()
}
