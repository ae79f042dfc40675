//! Character display backend trait
//!
//! Defines the interface the menu needs from an HD44780-style character
//! display: cursor positioning, raw byte writes, custom glyph registration
//! and clearing. Formatted printing is layered on top of `write`.

use core::cell::RefCell;
use core::fmt;

/// Number of custom glyph slots on an HD44780-compatible controller
pub const GLYPH_SLOTS: u8 = 8;

/// A 5x8 custom character, one byte per pixel row (low 5 bits used)
pub type GlyphBitmap = [u8; 8];

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display controller
    Communication,
    /// Cursor position outside the display
    InvalidCoordinates,
    /// Glyph slot outside `0..GLYPH_SLOTS`
    InvalidGlyphSlot,
    /// Display not initialized
    NotInitialized,
    /// A shared display is already borrowed by another caller
    Busy,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DisplayError::Communication => "display communication error",
            DisplayError::InvalidCoordinates => "cursor position outside the display",
            DisplayError::InvalidGlyphSlot => "custom glyph slot out of range",
            DisplayError::NotInitialized => "display not initialized",
            DisplayError::Busy => "display already in use",
        };
        f.write_str(msg)
    }
}

/// Character display backend
///
/// Implemented by LCD drivers (parallel or I2C backpack) and by
/// [`CharBuffer`](crate::CharBuffer) for host-side rendering.
pub trait CharDisplay {
    /// Clear the display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `column`: Column in characters (0-based)
    /// - `row`: Row number (0-based)
    ///
    /// Menus place lines by their stored row, which may lie below the
    /// visible window. Drivers should accept such positions as the
    /// controller does and discard what is written there.
    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError>;

    /// Write a single raw byte at the cursor and advance it
    ///
    /// Bytes `0..GLYPH_SLOTS` select previously registered custom glyphs.
    fn write(&mut self, byte: u8) -> Result<(), DisplayError>;

    /// Register a custom glyph in `slot` (`0..GLYPH_SLOTS`)
    fn create_char(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Print text at the cursor
    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        text.bytes().try_for_each(|b| self.write(b))
    }

    /// Print formatted output at the cursor without allocating
    fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), DisplayError> {
        let mut writer = Writer {
            display: self,
            error: None,
        };
        match fmt::write(&mut writer, args) {
            Ok(()) => Ok(()),
            Err(_) => Err(writer.error.unwrap_or(DisplayError::Communication)),
        }
    }
}

/// `core::fmt::Write` adapter that keeps the first display error
struct Writer<'d, D: CharDisplay + ?Sized> {
    display: &'d mut D,
    error: Option<DisplayError>,
}

impl<D: CharDisplay + ?Sized> fmt::Write for Writer<'_, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.display.print(s).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

impl<D: CharDisplay + ?Sized> CharDisplay for &mut D {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        (**self).set_cursor(column, row)
    }

    fn write(&mut self, byte: u8) -> Result<(), DisplayError> {
        (**self).write(byte)
    }

    fn create_char(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        (**self).create_char(slot, bitmap)
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        (**self).print(text)
    }
}

/// Shared display access
///
/// Lets several menus drive one physical display. Each call borrows the
/// cell for its own duration; a conflicting borrow reports `Busy`.
impl<D: CharDisplay> CharDisplay for &RefCell<D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.try_borrow_mut()
            .map_err(|_| DisplayError::Busy)?
            .clear()
    }

    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        self.try_borrow_mut()
            .map_err(|_| DisplayError::Busy)?
            .set_cursor(column, row)
    }

    fn write(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.try_borrow_mut()
            .map_err(|_| DisplayError::Busy)?
            .write(byte)
    }

    fn create_char(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        self.try_borrow_mut()
            .map_err(|_| DisplayError::Busy)?
            .create_char(slot, bitmap)
    }

    fn dimensions(&self) -> (u8, u8) {
        self.try_borrow().map(|d| d.dimensions()).unwrap_or((0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CharBuffer;

    #[test]
    fn test_print_writes_each_byte() {
        let mut lcd: CharBuffer = CharBuffer::new();
        lcd.print("Hi").unwrap();
        assert_eq!(&lcd.row(0)[..2], b"Hi");
        assert_eq!(lcd.cursor(), (2, 0));
    }

    #[test]
    fn test_print_fmt_float_precision() {
        let mut lcd: CharBuffer = CharBuffer::new();
        lcd.print_fmt(format_args!("{:.*}", 3, 1.5f32)).unwrap();
        assert_eq!(lcd.row_str(0).unwrap().trim_end(), "1.500");
    }

    struct Failing;

    impl CharDisplay for Failing {
        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
        fn set_cursor(&mut self, _column: u8, _row: u8) -> Result<(), DisplayError> {
            Ok(())
        }
        fn write(&mut self, _byte: u8) -> Result<(), DisplayError> {
            Err(DisplayError::NotInitialized)
        }
        fn create_char(&mut self, _slot: u8, _bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
            Ok(())
        }
        fn dimensions(&self) -> (u8, u8) {
            (16, 2)
        }
    }

    #[test]
    fn test_print_fmt_reports_display_error() {
        let mut lcd = Failing;
        assert_eq!(
            lcd.print_fmt(format_args!("{}", 42)),
            Err(DisplayError::NotInitialized)
        );
    }

    fn draw<D: CharDisplay>(mut display: D) -> (u8, u8) {
        display.set_cursor(3, 1).unwrap();
        display.print("ok").unwrap();
        display.dimensions()
    }

    #[test]
    fn test_mut_ref_delegates() {
        let mut lcd: CharBuffer = CharBuffer::new();
        assert_eq!(draw(&mut lcd), (16, 2));
        assert_eq!(&lcd.row(1)[3..5], b"ok");
    }

    #[test]
    fn test_refcell_shared_access() {
        let cell = RefCell::new(CharBuffer::<16, 2>::new());
        let mut a = &cell;
        let mut b = &cell;
        a.print("A").unwrap();
        b.print("B").unwrap();
        assert_eq!(&cell.borrow().row(0)[..2], b"AB");
        assert_eq!(a.dimensions(), (16, 2));
    }

    #[test]
    fn test_refcell_busy() {
        let cell = RefCell::new(CharBuffer::<16, 2>::new());
        let _guard = cell.borrow_mut();
        let mut shared = &cell;
        assert_eq!(shared.clear(), Err(DisplayError::Busy));
        assert_eq!(shared.dimensions(), (0, 0));
    }
}
