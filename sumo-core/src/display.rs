//! Display buffer and character formatting
//!
//! The robot shows six characters on a segment display. The controller
//! writes characters into a [`DisplayBuffer`] every tick; the scheduler
//! pushes the buffer to the panel at a slower rate. Only space, `0-9` and
//! `A-Z` have glyphs. Anything else is rejected with [`UnsupportedGlyph`] and
//! shown as the all-segments error glyph.

use core::fmt;

/// Number of character cells on the display
pub const DISPLAY_CELLS: usize = 6;

/// A character the segment display can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Space, all segments off
    Blank,
    /// Decimal digit 0-9
    Digit(u8),
    /// Uppercase ASCII letter, stored as its ASCII byte
    Letter(u8),
    /// Every segment lit, shown in place of unsupported characters
    AllSegments,
}

impl Glyph {
    /// Validates a character against the display's character set.
    pub fn from_char(c: char) -> Result<Self, UnsupportedGlyph> {
        match c {
            ' ' => Ok(Glyph::Blank),
            '0'..='9' => Ok(Glyph::Digit(c as u8 - b'0')),
            'A'..='Z' => Ok(Glyph::Letter(c as u8)),
            _ => Err(UnsupportedGlyph(c)),
        }
    }

    /// Glyph for a single decimal digit; values above 9 use their last digit
    pub fn digit(value: u8) -> Self {
        Glyph::Digit(value % 10)
    }

    /// ASCII rendering, `#` stands in for the all-segments glyph
    pub fn as_ascii(self) -> u8 {
        match self {
            Glyph::Blank => b' ',
            Glyph::Digit(d) => b'0' + d,
            Glyph::Letter(l) => l,
            Glyph::AllSegments => b'#',
        }
    }
}

/// Raised when asked to render a character outside space, `0-9` and `A-Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedGlyph(pub char);

impl fmt::Display for UnsupportedGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported display character {:?}", self.0)
    }
}

/// Which of the two display memories a write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayBank {
    Primary,
    Secondary,
}

impl DisplayBank {
    pub const ALL: [DisplayBank; 2] = [DisplayBank::Primary, DisplayBank::Secondary];

    pub fn index(self) -> usize {
        match self {
            DisplayBank::Primary => 0,
            DisplayBank::Secondary => 1,
        }
    }
}

/// Physical display collaborator
pub trait DisplayPanel {
    /// Renders `glyph` into `cell` (0-based) of `bank`
    fn show(&mut self, bank: DisplayBank, cell: usize, glyph: Glyph);

    /// Called once after all cells of a refresh have been written
    fn commit(&mut self) {}
}

/// The six buffered display cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    cells: [Glyph; DISPLAY_CELLS],
}

impl DisplayBuffer {
    /// A blank buffer
    pub const fn new() -> Self {
        Self {
            cells: [Glyph::Blank; DISPLAY_CELLS],
        }
    }

    /// Writes one character.
    ///
    /// Unsupported characters leave the all-segments glyph in the cell and
    /// return the error so the caller can report it.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= DISPLAY_CELLS`.
    pub fn put(&mut self, cell: usize, c: char) -> Result<(), UnsupportedGlyph> {
        match Glyph::from_char(c) {
            Ok(glyph) => {
                self.cells[cell] = glyph;
                Ok(())
            }
            Err(e) => {
                self.cells[cell] = Glyph::AllSegments;
                Err(e)
            }
        }
    }

    /// Writes a single decimal digit
    pub fn put_digit(&mut self, cell: usize, value: u8) {
        self.cells[cell] = Glyph::digit(value);
    }

    /// Writes `text` starting at `start`.
    ///
    /// Every character is written; the first unsupported one is returned.
    pub fn put_str(&mut self, start: usize, text: &str) -> Result<(), UnsupportedGlyph> {
        let mut first_error = None;
        for (offset, c) in text.chars().enumerate() {
            if let Err(e) = self.put(start + offset, c) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Right-aligns `value` in `width` cells starting at `start`, blanking
    /// leading zeros. The last cell always shows a digit, so 0 renders as
    /// `"  0"`.
    ///
    /// `value` must fit into `width` digits; larger values are a caller bug,
    /// caught by a debug assertion and otherwise saturated to all nines.
    pub fn put_number(&mut self, start: usize, width: usize, value: u16) {
        let limit = 10u32.pow(width as u32) - 1;
        debug_assert!(u32::from(value) <= limit, "{} does not fit {} cells", value, width);
        let value = u32::from(value).min(limit);

        let mut remaining = value;
        for position in (0..width).rev() {
            let cell = start + position;
            let magnitude = 10u32.pow((width - 1 - position) as u32);
            self.cells[cell] = if position + 1 < width && value < magnitude {
                Glyph::Blank
            } else {
                Glyph::digit((remaining % 10) as u8)
            };
            remaining /= 10;
        }
    }

    pub fn cells(&self) -> &[Glyph; DISPLAY_CELLS] {
        &self.cells
    }

    /// ASCII rendering of the buffer
    pub fn to_ascii(&self) -> [u8; DISPLAY_CELLS] {
        self.cells.map(Glyph::as_ascii)
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes every buffered cell to both banks, then commits.
pub fn flush<D: DisplayPanel + ?Sized>(buffer: &DisplayBuffer, panel: &mut D) {
    for bank in DisplayBank::ALL {
        for (cell, glyph) in buffer.cells().iter().enumerate() {
            panel.show(bank, cell, *glyph);
        }
    }
    panel.commit();
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    fn number(value: u16) -> [u8; 3] {
        let mut buffer = DisplayBuffer::new();
        buffer.put_number(3, 3, value);
        let ascii = buffer.to_ascii();
        [ascii[3], ascii[4], ascii[5]]
    }

    #[test]
    fn zero_keeps_last_digit() {
        assert_eq!(&number(0), b"  0");
    }

    #[test]
    fn leading_zeros_are_blanked() {
        assert_eq!(&number(7), b"  7");
        assert_eq!(&number(50), b" 50");
        assert_eq!(&number(100), b"100");
        assert_eq!(&number(999), b"999");
    }

    #[test]
    fn inner_zeros_are_kept() {
        assert_eq!(&number(105), b"105");
        assert_eq!(&number(10), b" 10");
    }

    #[test]
    fn number_only_touches_its_cells() {
        let mut buffer = DisplayBuffer::new();
        buffer.put_str(0, "M1").unwrap();
        buffer.put_number(3, 3, 42);
        assert_eq!(&buffer.to_ascii(), b"M1  42");
    }

    #[test]
    fn glyph_character_set() {
        assert_eq!(Glyph::from_char(' '), Ok(Glyph::Blank));
        assert_eq!(Glyph::from_char('7'), Ok(Glyph::Digit(7)));
        assert_eq!(Glyph::from_char('Z'), Ok(Glyph::Letter(b'Z')));
        assert_eq!(Glyph::from_char('a'), Err(UnsupportedGlyph('a')));
        assert_eq!(Glyph::from_char('-'), Err(UnsupportedGlyph('-')));
    }

    #[test]
    fn unsupported_character_shows_error_glyph() {
        let mut buffer = DisplayBuffer::new();
        assert_eq!(buffer.put(2, '?'), Err(UnsupportedGlyph('?')));
        assert_eq!(buffer.cells()[2], Glyph::AllSegments);
    }

    #[test]
    fn put_str_writes_all_and_reports_first_error() {
        let mut buffer = DisplayBuffer::new();
        assert_eq!(buffer.put_str(0, "Ab-D"), Err(UnsupportedGlyph('b')));
        assert_eq!(&buffer.to_ascii(), b"A##D  ");
    }

    #[test]
    fn unsupported_glyph_display() {
        assert_eq!(
            UnsupportedGlyph('x').to_string(),
            "Unsupported display character 'x'"
        );
    }
}
