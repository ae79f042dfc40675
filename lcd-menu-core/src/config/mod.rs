//! Compile-time configuration
//!
//! Container capacities, focus indicator glyph slots and the focus cycle
//! policy. Nothing here changes at run time.

pub mod glyphs;

pub use glyphs::{CUSTOM_FOCUS, LEADING_FOCUS, TRAILING_FOCUS};

/// Maximum fields per line
pub const MAX_FIELDS: usize = 5;

/// Maximum callbacks per line
pub const MAX_CALLBACKS: usize = 8;

/// Maximum lines per screen
pub const MAX_LINES: usize = 12;

/// Maximum screens per menu
pub const MAX_SCREENS: usize = 14;

/// Maximum menus per menu system
pub const MAX_MENUS: usize = 8;

/// Decimal places for floating point fields unless a line overrides it
pub const DEFAULT_DECIMAL_PLACES: u8 = 2;

/// Glyph slot holding the trailing focus indicator
pub const TRAILING_GLYPH_SLOT: u8 = 7;

/// Glyph slot holding the leading focus indicator
pub const LEADING_GLYPH_SLOT: u8 = 6;

/// Glyph slot holding the custom-position focus indicator
pub const CUSTOM_GLYPH_SLOT: u8 = 5;

/// Whether a full focus cycle passes through the unfocused state
pub const FOCUS_GHOSTING: bool = cfg!(feature = "focus-ghosting");
