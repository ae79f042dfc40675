//! Menu error type

use core::fmt;

use lcd_menu_display::DisplayError;

/// Errors reported by menu operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Fixed-size container is full (fields, lines, screens or menus)
    CapacityExceeded,
    /// Out-of-range number, wrong field kind, or a position not allowed here
    InvalidArgument,
    /// Handle does not name a stored screen or menu
    NotFound,
    /// The display driver failed
    Display(DisplayError),
}

impl From<DisplayError> for Error {
    fn from(err: DisplayError) -> Self {
        Error::Display(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded => f.write_str("capacity exceeded"),
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::NotFound => f.write_str("not found"),
            Error::Display(err) => write!(f, "display: {}", err),
        }
    }
}
