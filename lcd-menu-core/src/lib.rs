//! Character LCD menus for embedded targets
//!
//! This crate contains the menu logic, independent of the LCD driver:
//!
//! - Fields: printable views of caller-owned variables and accessors
//! - Lines: fields at a display position, with up to eight functions
//! - Screens: sets of lines with focus tracking and scrolling
//! - Menus: sets of screens bound to a display
//! - Menu systems: sets of menus sharing navigation
//!
//! Containers borrow their children, so lines, screens and menus are built
//! first and linked afterwards. Everything lives in fixed-capacity
//! `heapless` containers; nothing is allocated. Limits are in [`config`].
//!
//! # Example
//!
//! ```
//! use core::cell::Cell;
//! use lcd_menu_core::{Line, Menu, Navigation, Screen};
//! use lcd_menu_display::CharBuffer;
//!
//! let temperature = Cell::new(21u8);
//! let heat = || temperature.set(temperature.get() + 1);
//!
//! let mut line = Line::new(1, 0);
//! line.add_field("T:")?;
//! line.add_field(&temperature)?;
//! line.attach_function(1, &heat)?;
//!
//! let screen = Screen::with_lines([&line])?;
//! let mut menu: Menu<'_, CharBuffer> = Menu::new(CharBuffer::new());
//! menu.add_screen(&screen)?;
//! menu.init()?;
//!
//! menu.switch_focus(true)?;
//! menu.call_function(1)?;
//! assert_eq!(&menu.display().row(0)[..6], b" T:22\x07");
//! # Ok::<(), lcd_menu_core::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod field;
pub mod line;
pub mod menu;
pub mod screen;
pub mod system;
pub mod traits;

#[cfg(test)]
mod mock;

pub use error::Error;
pub use field::{recognize, Field, FieldKind, Recognize, Source};
pub use line::{Callback, FocusPosition, Line};
pub use menu::Menu;
pub use screen::Screen;
pub use system::MenuSystem;
pub use traits::Navigation;
