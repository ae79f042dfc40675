//! Character framebuffer
//!
//! Provides a text-mode character grid implementing [`CharDisplay`], used
//! for host-side rendering and as a shadow buffer for displays that are
//! flushed in one go.

use crate::backend::{CharDisplay, DisplayError, GlyphBitmap, GLYPH_SLOTS};

/// Number of character rows on a 1602 display
pub const LCD_ROWS: usize = 2;

/// Number of character columns on a 1602 display
pub const LCD_COLS: usize = 16;

/// Character framebuffer for HD44780-style displays
///
/// Writes past the last column are dropped, like characters written into
/// the invisible part of the controller's DDRAM. The cursor may likewise be
/// placed outside the grid; writes there land nowhere.
#[derive(Clone)]
pub struct CharBuffer<const COLS: usize = LCD_COLS, const ROWS: usize = LCD_ROWS> {
    /// Current display content
    cells: [[u8; COLS]; ROWS],
    /// Registered custom glyphs
    glyphs: [Option<GlyphBitmap>; GLYPH_SLOTS as usize],
    /// Cursor as (column, row)
    cursor: (u8, u8),
    /// Whether the content changed since the last `mark_clean`
    dirty: bool,
    clears: u32,
    cursor_moves: u32,
}

impl<const COLS: usize, const ROWS: usize> Default for CharBuffer<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> CharBuffer<COLS, ROWS> {
    /// Create a new blank buffer
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            glyphs: [None; GLYPH_SLOTS as usize],
            cursor: (0, 0),
            dirty: true,
            clears: 0,
            cursor_moves: 0,
        }
    }

    /// Get the raw bytes of a row (empty if out of range)
    pub fn row(&self, row: usize) -> &[u8] {
        self.cells.get(row).map(|r| &r[..]).unwrap_or(&[])
    }

    /// Get a row as text
    ///
    /// Returns `None` for rows out of range or holding non-UTF-8 bytes.
    pub fn row_str(&self, row: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|r| core::str::from_utf8(r).ok())
    }

    /// Get the byte at a cell
    pub fn cell(&self, column: usize, row: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Get a registered custom glyph
    pub fn glyph(&self, slot: u8) -> Option<&GlyphBitmap> {
        self.glyphs.get(slot as usize).and_then(|g| g.as_ref())
    }

    /// Current cursor as (column, row)
    pub const fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Number of `clear` calls so far
    pub const fn clear_count(&self) -> u32 {
        self.clears
    }

    /// Number of `set_cursor` calls so far
    pub const fn cursor_move_count(&self) -> u32 {
        self.cursor_moves
    }

    /// Check if the buffer needs flushing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark buffer as clean (after flushing)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all rows as an iterator
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.iter().map(|r| &r[..])
    }
}

impl<const COLS: usize, const ROWS: usize> CharDisplay for CharBuffer<COLS, ROWS> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for row in &mut self.cells {
            row.fill(b' ');
        }
        self.cursor = (0, 0);
        self.clears += 1;
        self.dirty = true;
        Ok(())
    }

    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        self.cursor_moves += 1;
        self.cursor = (column, row);
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), DisplayError> {
        let (column, row) = self.cursor;
        if let Some(cell) = self
            .cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(column as usize))
        {
            *cell = byte;
            self.dirty = true;
        }
        self.cursor.0 = column.saturating_add(1);
        Ok(())
    }

    fn create_char(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        let entry = self
            .glyphs
            .get_mut(slot as usize)
            .ok_or(DisplayError::InvalidGlyphSlot)?;
        *entry = Some(*bitmap);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS as u8, ROWS as u8)
    }
}

#[cfg(feature = "defmt")]
impl<const COLS: usize, const ROWS: usize> defmt::Format for CharBuffer<COLS, ROWS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CharBuffer[");
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{=[u8]:a}", &row[..]);
        }
        defmt::write!(f, "]");
    }
}
