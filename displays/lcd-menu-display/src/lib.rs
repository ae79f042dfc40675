//! Character display abstraction for lcd-menu
//!
//! This crate provides:
//! - `CharDisplay` trait describing what the menu needs from an
//!   HD44780-style character LCD
//! - `CharBuffer`, a character framebuffer implementing `CharDisplay`
//!
//! # Architecture
//!
//! The menu never talks to hardware directly. LCD drivers (parallel bus,
//! I2C backpack, ...) implement `CharDisplay`; the menu renders through it.
//!
//! - **Exclusive displays**: hand the menu the driver itself or `&mut` to it.
//! - **Shared displays**: wrap the driver in a `RefCell` and hand every
//!   menu a `&RefCell<Driver>`.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod buffer;

// Re-export key types
pub use backend::{CharDisplay, DisplayError, GlyphBitmap, GLYPH_SLOTS};
pub use buffer::{CharBuffer, LCD_COLS, LCD_ROWS};
