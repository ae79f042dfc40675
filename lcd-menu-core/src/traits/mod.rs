//! Navigation interface
//!
//! Input handling (buttons, rotary encoders, serial commands) is written
//! against these traits so it works with a single menu or a menu system.

pub mod navigation;

pub use navigation::Navigation;
