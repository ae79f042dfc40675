//! Printable fields
//!
//! A field borrows a caller-owned value (or a zero-argument accessor) and
//! knows how to print it. The set of printable types is closed; the kind of
//! a field is fixed when it is attached, from the Rust type of its source.

use core::cell::Cell;
use core::fmt;

use lcd_menu_display::{CharDisplay, DisplayError};

/// Size of the stack buffer flash text is copied through
const FLASH_CHUNK: usize = 16;

/// Field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    Float,
    /// String constant
    Text,
    /// Re-pointable string
    TextRef,
    /// String placed in flash, NUL- or slice-terminated
    FlashText,
    /// Raw custom glyph index
    Glyph,
    /// Zero-argument accessor of any of the value kinds
    Getter,
}

/// Where a field reads its value from
pub enum Source<'a, T> {
    /// A caller-owned variable
    Value(&'a Cell<T>),
    /// A zero-argument accessor evaluated on every print
    Getter(&'a dyn Fn() -> T),
}

impl<T> Clone for Source<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Source<'_, T> {}

impl<T: Copy> Source<'_, T> {
    /// Read the current value
    pub fn get(&self) -> T {
        match self {
            Source::Value(cell) => cell.get(),
            Source::Getter(getter) => getter(),
        }
    }

    fn is_getter(&self) -> bool {
        matches!(self, Source::Getter(_))
    }
}

/// A printable value attached to a line
#[derive(Clone, Copy)]
pub enum Field<'a> {
    Bool(Source<'a, bool>),
    Char(Source<'a, char>),
    I8(Source<'a, i8>),
    U8(Source<'a, u8>),
    I16(Source<'a, i16>),
    U16(Source<'a, u16>),
    I32(Source<'a, i32>),
    U32(Source<'a, u32>),
    Float(Source<'a, f32>),
    Text(&'a str),
    TextRef(Source<'a, &'static str>),
    FlashText(&'a [u8]),
    Glyph(&'a Cell<u8>),
}

impl Field<'_> {
    /// Kind of this field
    pub fn kind(&self) -> FieldKind {
        let (kind, getter) = match self {
            Field::Bool(s) => (FieldKind::Bool, s.is_getter()),
            Field::Char(s) => (FieldKind::Char, s.is_getter()),
            Field::I8(s) => (FieldKind::I8, s.is_getter()),
            Field::U8(s) => (FieldKind::U8, s.is_getter()),
            Field::I16(s) => (FieldKind::I16, s.is_getter()),
            Field::U16(s) => (FieldKind::U16, s.is_getter()),
            Field::I32(s) => (FieldKind::I32, s.is_getter()),
            Field::U32(s) => (FieldKind::U32, s.is_getter()),
            Field::Float(s) => (FieldKind::Float, s.is_getter()),
            Field::Text(_) => (FieldKind::Text, false),
            Field::TextRef(s) => (FieldKind::TextRef, s.is_getter()),
            Field::FlashText(_) => (FieldKind::FlashText, false),
            Field::Glyph(_) => (FieldKind::Glyph, false),
        };
        if getter {
            FieldKind::Getter
        } else {
            kind
        }
    }

    /// Print the field at the display cursor
    ///
    /// Floating point values use `decimal_places` digits after the point.
    /// Booleans print as `1`/`0`; characters outside ASCII print as `?`.
    pub fn render<D: CharDisplay + ?Sized>(
        &self,
        display: &mut D,
        decimal_places: u8,
    ) -> Result<(), DisplayError> {
        match self {
            Field::Bool(s) => display.write(if s.get() { b'1' } else { b'0' }),
            Field::Char(s) => {
                let c = s.get();
                display.write(if c.is_ascii() { c as u8 } else { b'?' })
            }
            Field::I8(s) => display.print_fmt(format_args!("{}", s.get())),
            Field::U8(s) => display.print_fmt(format_args!("{}", s.get())),
            Field::I16(s) => display.print_fmt(format_args!("{}", s.get())),
            Field::U16(s) => display.print_fmt(format_args!("{}", s.get())),
            Field::I32(s) => display.print_fmt(format_args!("{}", s.get())),
            Field::U32(s) => display.print_fmt(format_args!("{}", s.get())),
            Field::Float(s) => {
                display.print_fmt(format_args!("{:.*}", decimal_places as usize, s.get()))
            }
            Field::Text(text) => display.print(text),
            Field::TextRef(s) => display.print(s.get()),
            Field::FlashText(text) => print_flash(display, text),
            Field::Glyph(index) => display.write(index.get()),
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.kind()).finish()
    }
}

/// Copy flash text through a stack buffer and print it
fn print_flash<D: CharDisplay + ?Sized>(display: &mut D, text: &[u8]) -> Result<(), DisplayError> {
    let len = text.iter().position(|&b| b == 0).unwrap_or(text.len());
    let mut buffer = [0u8; FLASH_CHUNK];
    for chunk in text[..len].chunks(FLASH_CHUNK) {
        let buffer = &mut buffer[..chunk.len()];
        buffer.copy_from_slice(chunk);
        for &byte in buffer.iter() {
            display.write(byte)?;
        }
    }
    Ok(())
}

/// Types a field can be attached from
///
/// Implemented for every supported value type; the implementation picks the
/// field variant at compile time.
pub trait Recognize: Copy + 'static {
    /// Kind of a field attached to a variable of this type
    const KIND: FieldKind;

    /// Wrap a source of this type in the matching field variant
    fn bind(source: Source<'_, Self>) -> Field<'_>;
}

macro_rules! recognize {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Recognize for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn bind(source: Source<'_, Self>) -> Field<'_> {
                    Field::$variant(source)
                }
            }
        )*
    };
}

recognize! {
    bool => Bool,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => Float,
    &'static str => TextRef,
}

/// Kind a field attached to `value` would have
pub fn recognize<T: Recognize>(_value: &T) -> FieldKind {
    T::KIND
}

impl<'a, T: Recognize> From<&'a Cell<T>> for Field<'a> {
    fn from(cell: &'a Cell<T>) -> Self {
        T::bind(Source::Value(cell))
    }
}

impl<'a, T: Recognize> From<&'a dyn Fn() -> T> for Field<'a> {
    fn from(getter: &'a dyn Fn() -> T) -> Self {
        T::bind(Source::Getter(getter))
    }
}

impl<'a> From<&'a str> for Field<'a> {
    fn from(text: &'a str) -> Self {
        Field::Text(text)
    }
}
