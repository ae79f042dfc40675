//! Menus
//!
//! A menu borrows its screens and drives one display. Screens are shown one
//! at a time; navigation redraws the whole display.
//!
//! Call [`Menu::init`] once the display driver is ready, before the first
//! update, to register the focus indicator glyphs.

use core::cell::{Cell, Ref, RefCell, RefMut};

use heapless::Vec;
use lcd_menu_display::{CharDisplay, DisplayError, GlyphBitmap};

use crate::config::{CUSTOM_FOCUS, LEADING_FOCUS, MAX_SCREENS, TRAILING_FOCUS};
use crate::error::Error;
use crate::line::FocusPosition;
use crate::screen::Screen;
use crate::traits::Navigation;

/// A set of screens bound to a display
pub struct Menu<'a, D: CharDisplay> {
    display: RefCell<D>,
    screens: Vec<&'a Screen<'a>, MAX_SCREENS>,
    current: Cell<u8>,
}

impl<'a, D: CharDisplay> Menu<'a, D> {
    /// Create an empty menu drawing on `display`
    pub const fn new(display: D) -> Self {
        Self {
            display: RefCell::new(display),
            screens: Vec::new(),
            current: Cell::new(0),
        }
    }

    /// Register the default focus indicator glyphs
    pub fn init(&self) -> Result<(), Error> {
        let mut display = self.lock()?;
        let glyphs = [
            (FocusPosition::Trailing, &TRAILING_FOCUS),
            (FocusPosition::Leading, &LEADING_FOCUS),
            (FocusPosition::Custom { column: 0, row: 0 }, &CUSTOM_FOCUS),
        ];
        for (position, bitmap) in glyphs {
            display.create_char(position.glyph_slot(), bitmap)?;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("menu: focus glyphs registered");
        Ok(())
    }

    /// Append a screen
    pub fn add_screen(&mut self, screen: &'a Screen<'a>) -> Result<(), Error> {
        self.screens.push(screen).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: screen capacity {} exceeded", MAX_SCREENS);
            Error::CapacityExceeded
        })
    }

    /// Get screen `index` (0-based)
    pub fn screen(&self, index: usize) -> Option<&'a Screen<'a>> {
        self.screens.get(index).copied()
    }

    /// The screen being shown, `None` for an empty menu
    pub fn current_screen(&self) -> Option<&'a Screen<'a>> {
        self.screen(self.current.get() as usize)
    }

    /// Index of the screen being shown
    pub fn current_index(&self) -> usize {
        self.current.get() as usize
    }

    /// Number of screens
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// Check if `screen` is one of this menu's screens
    pub fn contains(&self, screen: &Screen<'_>) -> bool {
        self.position_of(screen).is_some()
    }

    fn position_of(&self, screen: &Screen<'_>) -> Option<usize> {
        self.screens
            .iter()
            .position(|stored| core::ptr::eq(*stored, screen))
    }

    /// Show `screen` and redraw
    ///
    /// Fails with `NotFound` unless `screen` was added to this menu.
    pub fn change_screen_to(&self, screen: &Screen<'_>) -> Result<(), Error> {
        let index = self.position_of(screen).ok_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: screen not in this menu");
            Error::NotFound
        })?;
        self.current.set(index as u8);
        self.update()
    }

    /// Set the focus indicator position on every line of every screen
    ///
    /// `Custom` is rejected: it needs a cell per line.
    pub fn set_focus_position(&self, position: FocusPosition) -> Result<(), Error> {
        if matches!(position, FocusPosition::Custom { .. }) {
            return Err(Error::InvalidArgument);
        }
        for screen in &self.screens {
            screen.set_focus_position(position)?;
        }
        Ok(())
    }

    /// Replace the glyph drawn for the focus indicator at `position`
    pub fn set_focus_symbol(
        &self,
        position: FocusPosition,
        bitmap: &GlyphBitmap,
    ) -> Result<(), Error> {
        self.lock()?.create_char(position.glyph_slot(), bitmap)?;
        Ok(())
    }

    /// Check if the focused line of the current screen has function `number`
    pub fn is_callable(&self, number: u8) -> bool {
        self.current_screen()
            .is_some_and(|screen| screen.is_callable(number))
    }

    /// Borrow the display, e.g. to inspect a host-side buffer
    ///
    /// Navigation fails with `Busy` while the borrow is held.
    pub fn display(&self) -> Ref<'_, D> {
        self.display.borrow()
    }

    /// Direct access to the display, e.g. to draw a splash screen
    pub fn display_mut(&mut self) -> &mut D {
        self.display.get_mut()
    }

    /// Consume the menu and give the display back
    pub fn release(self) -> D {
        self.display.into_inner()
    }

    fn lock(&self) -> Result<RefMut<'_, D>, DisplayError> {
        self.display.try_borrow_mut().map_err(|_| DisplayError::Busy)
    }

    fn draw(&self, clear: bool) -> Result<(), Error> {
        let mut display = self.lock()?;
        if clear {
            display.clear()?;
        }
        if let Some(screen) = self.current_screen() {
            screen.print(&mut *display)?;
        }
        Ok(())
    }

    /// Move to the next (or previous) screen that is not hidden
    ///
    /// Stays put when every other screen is hidden.
    fn step_screen(&self, forward: bool) {
        let count = self.screens.len();
        let mut index = self.current.get() as usize;
        for _ in 0..count {
            index = if forward {
                (index + 1) % count
            } else {
                (index + count - 1) % count
            };
            if !self.screens[index].is_hidden() {
                self.current.set(index as u8);
                break;
            }
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("menu: screen {}", self.current.get());
    }
}

impl<D: CharDisplay> Navigation for Menu<'_, D> {
    fn next_screen(&self) -> Result<(), Error> {
        self.step_screen(true);
        self.update()
    }

    fn previous_screen(&self) -> Result<(), Error> {
        self.step_screen(false);
        self.update()
    }

    fn change_screen(&self, number: u8) -> Result<(), Error> {
        if number == 0 || number as usize > self.screens.len() {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: screen number {} out of range", number);
            return Err(Error::InvalidArgument);
        }
        self.current.set(number - 1);
        self.update()
    }

    fn switch_focus(&self, forward: bool) -> Result<(), Error> {
        if let Some(screen) = self.current_screen() {
            screen.switch_focus(forward);
        }
        self.update()
    }

    fn call_function(&self, number: u8) -> Result<bool, Error> {
        let called = self
            .current_screen()
            .is_some_and(|screen| screen.call_function(number));
        self.update()?;
        Ok(called)
    }

    fn update(&self) -> Result<(), Error> {
        self.draw(true)
    }

    fn soft_update(&self) -> Result<(), Error> {
        self.draw(false)
    }

    fn focused_line(&self) -> Option<usize> {
        self.current_screen().and_then(Screen::focused_line)
    }

    fn set_focused_line(&self, index: usize) -> Result<(), Error> {
        self.current_screen()
            .ok_or(Error::InvalidArgument)?
            .set_focused_line(index)
    }
}
