//! Recording display for tests

use heapless::{String, Vec};
use lcd_menu_display::{CharDisplay, DisplayError, GlyphBitmap, GLYPH_SLOTS};

/// A driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Clear,
    SetCursor(u8, u8),
    Write(u8),
    Print(String<32>),
    CreateChar(u8, GlyphBitmap),
}

/// Display double that records every call
pub struct RecordingDisplay {
    pub ops: Vec<Op, 128>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn clears(&self) -> usize {
        self.count(|op| *op == Op::Clear)
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    fn record(&mut self, op: Op) {
        self.ops.push(op).expect("recording full");
    }
}

impl CharDisplay for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.record(Op::Clear);
        Ok(())
    }

    fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        self.record(Op::SetCursor(column, row));
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.record(Op::Write(byte));
        Ok(())
    }

    fn create_char(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        if slot >= GLYPH_SLOTS {
            return Err(DisplayError::InvalidGlyphSlot);
        }
        self.record(Op::CreateChar(slot, *bitmap));
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (16, 2)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        let mut recorded = String::new();
        recorded.push_str(text).expect("print too long");
        self.record(Op::Print(recorded));
        Ok(())
    }
}
