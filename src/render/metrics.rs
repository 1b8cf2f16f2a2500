//! Static font metrics for the PDF standard fonts and greedy line wrapping.
//!
//! Widths come from the Adobe AFM files for Helvetica and Helvetica-Bold, in
//! thousandths of an em. Tables cover ASCII 0x20..=0x7E; index = byte - 32.
//! Characters are measured the way the encoder draws them: a tab as a space,
//! other control characters as nothing. Anything else outside the table is
//! measured with the font's average width.

use serde::{Deserialize, Serialize};

/// The two standard Type 1 fonts used by the PDF encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFont {
    /// Regular weight (body text)
    Helvetica,
    /// Bold weight (headings)
    HelveticaBold,
}

impl StandardFont {
    /// PostScript base font name.
    pub fn base_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    /// Check if this is the bold face.
    pub fn is_bold(&self) -> bool {
        matches!(self, StandardFont::HelveticaBold)
    }

    fn table(&self) -> &'static FontMetricTable {
        match self {
            StandardFont::Helvetica => &HELVETICA,
            StandardFont::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    /// Width of a single character in thousandths of an em.
    pub fn char_width(&self, c: char) -> u16 {
        self.table().char_width(c)
    }

    /// Width of a string in thousandths of an em.
    pub fn units(&self, s: &str) -> u32 {
        s.chars().map(|c| u32::from(self.char_width(c))).sum()
    }

    /// Convert em-thousandths to points at the given size.
    pub fn units_to_pt(&self, units: u32, size_pt: f32) -> f32 {
        units as f32 * size_pt / 1000.0
    }

    /// Width of a string at the given size, in points.
    pub fn measure(&self, s: &str, size_pt: f32) -> f32 {
        self.units_to_pt(self.units(s), size_pt)
    }
}

struct FontMetricTable {
    widths: [u16; 95],
    average_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        if c == '\t' {
            return self.widths[0];
        }
        if c.is_control() {
            return 0;
        }

        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_width
        }
    }
}

static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_width: 611,
};

/// Wrap a line so that no piece is wider than `max_width_pt`.
///
/// Greedy word wrap on single spaces. Runs of spaces inside the line are
/// kept; spaces at a break point are dropped. A word wider than the line is
/// split between characters. Returns at least one piece for any input.
pub fn wrap_text(text: &str, font: StandardFont, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let fits = |units: u32| font.units_to_pt(units, size_pt) <= max_width_pt;
    let space_units = u32::from(font.char_width(' '));

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_units = 0u32;

    for (i, word) in text.split(' ').enumerate() {
        let word_units = font.units(word);

        if i == 0 {
            current.push_str(word);
            current_units = word_units;
        } else if fits(current_units + space_units + word_units) {
            current.push(' ');
            current.push_str(word);
            current_units += space_units + word_units;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_units = word_units;
        }

        if !fits(current_units) {
            current_units = split_long(&mut lines, &mut current, font, &fits);
        }
    }

    lines.push(current);
    lines
}

/// Break an over-wide `current` between characters, leaving the tail in place.
fn split_long(
    lines: &mut Vec<String>,
    current: &mut String,
    font: StandardFont,
    fits: &dyn Fn(u32) -> bool,
) -> u32 {
    let mut piece = String::new();
    let mut units = 0u32;

    for c in current.chars() {
        let w = u32::from(font.char_width(c));
        if !piece.is_empty() && !fits(units + w) {
            lines.push(std::mem::take(&mut piece));
            units = 0;
        }
        piece.push(c);
        units += w;
    }

    *current = piece;
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_widths() {
        // "Hi" = 722 + 222
        let w = StandardFont::Helvetica.measure("Hi", 10.0);
        assert!((w - 9.44).abs() < 1e-4);
        assert!(
            StandardFont::HelveticaBold.measure("SKILLS", 13.0)
                > StandardFont::Helvetica.measure("SKILLS", 13.0)
        );
    }

    #[test]
    fn test_non_ascii_uses_average() {
        assert_eq!(StandardFont::Helvetica.char_width('é'), 556);
        assert_eq!(StandardFont::HelveticaBold.char_width('€'), 611);
    }

    #[test]
    fn test_controls_measured_as_drawn() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width('\t'), font.char_width(' '));
        assert_eq!(font.char_width('\r'), 0);
        assert_eq!(font.char_width('\u{7}'), 0);
        assert_eq!(font.units("Go\r"), font.units("Go"));
    }

    #[test]
    fn test_short_line_is_not_wrapped() {
        let lines = wrap_text("- Go", StandardFont::Helvetica, 10.0, 480.0);
        assert_eq!(lines, vec!["- Go".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Designed and shipped a distributed ingestion pipeline handling millions of events per day across three regions with zero downtime";
        let max = 200.0;
        let lines = wrap_text(text, StandardFont::Helvetica, 10.0, max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(StandardFont::Helvetica.measure(line, 10.0) <= max);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_long_word_is_split() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, StandardFont::Helvetica, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(StandardFont::Helvetica.measure(line, 10.0) <= 100.0);
        }
    }

    #[test]
    fn test_empty_input_yields_one_piece() {
        assert_eq!(
            wrap_text("", StandardFont::Helvetica, 10.0, 100.0),
            vec![String::new()]
        );
    }

    #[test]
    fn test_font_names() {
        assert_eq!(StandardFont::HelveticaBold.base_name(), "Helvetica-Bold");
        assert_eq!(StandardFont::Helvetica.resource_name(), "F1");
        assert!(StandardFont::HelveticaBold.is_bold());
    }
}
