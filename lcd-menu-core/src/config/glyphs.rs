//! Default focus indicator glyphs
//!
//! 5x8 bitmaps registered by `Menu::init`. Replace them with
//! `Menu::set_focus_symbol`.

use lcd_menu_display::GlyphBitmap;

/// Arrow pointing left, drawn after the line content
pub const TRAILING_FOCUS: GlyphBitmap = [
    0b00000,
    0b00100,
    0b01000,
    0b11111,
    0b01000,
    0b00100,
    0b00000,
    0b00000,
];

/// Arrow pointing right, drawn before the line content
pub const LEADING_FOCUS: GlyphBitmap = [
    0b00000,
    0b00100,
    0b00010,
    0b11111,
    0b00010,
    0b00100,
    0b00000,
    0b00000,
];

/// Filled block for an explicitly placed indicator
pub const CUSTOM_FOCUS: GlyphBitmap = [
    0b00000,
    0b00000,
    0b01110,
    0b01110,
    0b01110,
    0b00000,
    0b00000,
    0b00000,
];
