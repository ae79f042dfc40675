//! Menu lines
//!
//! A line is a row of fields printed from a fixed origin, plus up to
//! `MAX_CALLBACKS` callbacks. A line with at least one callback can take
//! focus; the focused line is marked with an indicator glyph.

use core::cell::Cell;

use heapless::Vec;
use lcd_menu_display::{CharDisplay, DisplayError};

use crate::config::{
    CUSTOM_GLYPH_SLOT, DEFAULT_DECIMAL_PLACES, LEADING_GLYPH_SLOT, MAX_CALLBACKS, MAX_FIELDS,
    TRAILING_GLYPH_SLOT,
};
use crate::error::Error;
use crate::field::{Field, FieldKind, Recognize, Source};

/// Zero-argument callback attached to a line
pub type Callback<'a> = &'a dyn Fn();

/// Where the focus indicator is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FocusPosition {
    /// Right after the line content
    #[default]
    Trailing,
    /// One column left of the line origin
    Leading,
    /// At an explicit cell
    Custom { column: u8, row: u8 },
}

impl FocusPosition {
    /// Glyph slot holding the indicator for this position
    pub const fn glyph_slot(&self) -> u8 {
        match self {
            FocusPosition::Trailing => TRAILING_GLYPH_SLOT,
            FocusPosition::Leading => LEADING_GLYPH_SLOT,
            FocusPosition::Custom { .. } => CUSTOM_GLYPH_SLOT,
        }
    }
}

/// Decode a raw position number: 1 = trailing, 2 = leading, 3 = custom
/// (at the origin until moved)
impl TryFrom<u8> for FocusPosition {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FocusPosition::Trailing),
            2 => Ok(FocusPosition::Leading),
            3 => Ok(FocusPosition::Custom { column: 0, row: 0 }),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// A row of fields with optional callbacks
pub struct Line<'a> {
    column: u8,
    row: u8,
    fields: Vec<Field<'a>, MAX_FIELDS>,
    callbacks: [Option<Callback<'a>>; MAX_CALLBACKS],
    focus_position: Cell<FocusPosition>,
    focusable: bool,
    decimal_places: u8,
}

impl<'a> Line<'a> {
    /// Create an empty line printed from (`column`, `row`)
    pub const fn new(column: u8, row: u8) -> Self {
        Self {
            column,
            row,
            fields: Vec::new(),
            callbacks: [None; MAX_CALLBACKS],
            focus_position: Cell::new(FocusPosition::Trailing),
            focusable: false,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }

    /// Append a field
    ///
    /// Accepts a `&Cell<T>` for any supported `T`, a `&str` constant or a
    /// ready-made [`Field`].
    pub fn add_field(&mut self, field: impl Into<Field<'a>>) -> Result<(), Error> {
        self.fields.push(field.into()).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("line: field capacity {} exceeded", MAX_FIELDS);
            Error::CapacityExceeded
        })
    }

    /// Append a field that calls `getter` on every print
    pub fn add_getter<T, F>(&mut self, getter: &'a F) -> Result<(), Error>
    where
        T: Recognize,
        F: Fn() -> T + 'a,
    {
        let getter: &'a dyn Fn() -> T = getter;
        self.add_field(T::bind(Source::Getter(getter)))
    }

    /// Print field `number` (1-based) as a raw custom glyph
    ///
    /// Only fields attached from a `u8` variable can be converted.
    pub fn set_as_glyph(&mut self, number: u8) -> Result<(), Error> {
        let field = self.field_slot(number)?;
        match *field {
            Field::U8(Source::Value(cell)) => {
                *field = Field::Glyph(cell);
                Ok(())
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::debug!("line: field {} is not a u8 variable", number);
                Err(Error::InvalidArgument)
            }
        }
    }

    /// Treat field `number` (1-based) as text stored in flash
    ///
    /// Only string-constant fields can be converted.
    pub fn set_as_flash(&mut self, number: u8) -> Result<(), Error> {
        let field = self.field_slot(number)?;
        match *field {
            Field::Text(text) => {
                *field = Field::FlashText(text.as_bytes());
                Ok(())
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::debug!("line: field {} is not a string constant", number);
                Err(Error::InvalidArgument)
            }
        }
    }

    fn field_slot(&mut self, number: u8) -> Result<&mut Field<'a>, Error> {
        let index = (number as usize)
            .checked_sub(1)
            .ok_or(Error::InvalidArgument)?;
        self.fields.get_mut(index).ok_or(Error::InvalidArgument)
    }

    /// Attach `callback` as function `number` (1..=MAX_CALLBACKS)
    ///
    /// Makes the line focusable.
    pub fn attach_function(&mut self, number: u8, callback: Callback<'a>) -> Result<(), Error> {
        let slot = (number as usize)
            .checked_sub(1)
            .and_then(|index| self.callbacks.get_mut(index))
            .ok_or_else(|| {
                #[cfg(feature = "defmt")]
                defmt::warn!("line: callback number {} out of range", number);
                Error::InvalidArgument
            })?;
        *slot = Some(callback);
        self.focusable = true;
        Ok(())
    }

    /// Check if function `number` is attached
    pub fn is_callable(&self, number: u8) -> bool {
        self.callback(number).is_some()
    }

    /// Call function `number`
    ///
    /// Returns `false` if nothing is attached there.
    pub fn call_function(&self, number: u8) -> bool {
        match self.callback(number) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    fn callback(&self, number: u8) -> Option<Callback<'a>> {
        let index = (number as usize).checked_sub(1)?;
        self.callbacks.get(index).copied().flatten()
    }

    /// Check if the line can take focus
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Set where the focus indicator is drawn
    ///
    /// Takes `&self` so screens and menus holding the line can change it.
    pub fn set_focus_position(&self, position: FocusPosition) {
        self.focus_position.set(position);
    }

    /// Get where the focus indicator is drawn
    pub fn focus_position(&self) -> FocusPosition {
        self.focus_position.get()
    }

    /// Set decimal places for floating point fields
    pub fn set_decimal_places(&mut self, places: u8) {
        self.decimal_places = places;
    }

    /// Get decimal places for floating point fields
    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    /// Move the line origin
    pub fn set_position(&mut self, column: u8, row: u8) {
        self.column = column;
        self.row = row;
    }

    /// Line origin as (column, row)
    pub fn position(&self) -> (u8, u8) {
        (self.column, self.row)
    }

    /// Number of attached fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Get field `number` (1-based)
    pub fn field(&self, number: u8) -> Option<&Field<'a>> {
        let index = (number as usize).checked_sub(1)?;
        self.fields.get(index)
    }

    /// Kind of field `number` (1-based)
    pub fn kind(&self, number: u8) -> Option<FieldKind> {
        self.field(number).map(Field::kind)
    }

    /// Print the line at its origin
    pub fn print<D: CharDisplay + ?Sized>(
        &self,
        display: &mut D,
        focused: bool,
    ) -> Result<(), DisplayError> {
        self.print_at(display, self.row, focused)
    }

    /// Print the line on `row` instead of its own row
    ///
    /// Used by scrolling screens; the stored row is left untouched.
    pub fn print_at<D: CharDisplay + ?Sized>(
        &self,
        display: &mut D,
        row: u8,
        focused: bool,
    ) -> Result<(), DisplayError> {
        display.set_cursor(self.column, row)?;
        for field in &self.fields {
            field.render(display, self.decimal_places)?;
        }

        if !focused {
            return Ok(());
        }

        let position = self.checked_focus_position(display.dimensions());
        match position {
            FocusPosition::Trailing => {}
            FocusPosition::Leading => display.set_cursor(self.column - 1, row)?,
            FocusPosition::Custom { column, row } => display.set_cursor(column, row)?,
        }
        display.write(position.glyph_slot())
    }

    /// Fall back to `Trailing` if the indicator cannot be drawn where asked
    fn checked_focus_position(&self, (columns, rows): (u8, u8)) -> FocusPosition {
        let position = self.focus_position.get();
        let valid = match position {
            FocusPosition::Trailing => true,
            FocusPosition::Leading => self.column > 0,
            FocusPosition::Custom { column, row } => column < columns && row < rows,
        };
        if !valid {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "line: focus position {} unusable, switching to trailing",
                position
            );
            self.focus_position.set(FocusPosition::Trailing);
            return FocusPosition::Trailing;
        }
        position
    }
}
