//! Menu systems
//!
//! Groups several menus and forwards navigation to the active one. Menus
//! that share one physical display each hold a `&RefCell<Lcd>`.

use core::cell::Cell;

use heapless::Vec;
use lcd_menu_display::{CharDisplay, GlyphBitmap};

use crate::config::MAX_MENUS;
use crate::error::Error;
use crate::line::FocusPosition;
use crate::menu::Menu;
use crate::screen::Screen;
use crate::traits::Navigation;

/// A set of menus with one active at a time
pub struct MenuSystem<'a, D: CharDisplay> {
    menus: Vec<&'a Menu<'a, D>, MAX_MENUS>,
    current: Cell<u8>,
}

impl<D: CharDisplay> Default for MenuSystem<'_, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, D: CharDisplay> MenuSystem<'a, D> {
    /// Create an empty system
    pub const fn new() -> Self {
        Self {
            menus: Vec::new(),
            current: Cell::new(0),
        }
    }

    /// Append a menu
    ///
    /// The first menu added becomes the active one.
    pub fn add_menu(&mut self, menu: &'a Menu<'a, D>) -> Result<(), Error> {
        self.menus.push(menu).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("system: menu capacity {} exceeded", MAX_MENUS);
            Error::CapacityExceeded
        })
    }

    /// Register the focus glyphs of every menu
    pub fn init(&self) -> Result<(), Error> {
        self.menus.iter().try_for_each(|menu| menu.init())
    }

    /// Get menu `index` (0-based, in the order added)
    pub fn menu(&self, index: usize) -> Option<&'a Menu<'a, D>> {
        self.menus.get(index).copied()
    }

    /// The active menu, `None` while the system is empty
    pub fn active(&self) -> Option<&'a Menu<'a, D>> {
        self.menu(self.current.get() as usize)
    }

    /// Number of menus
    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    /// Make `menu` the active menu and redraw
    ///
    /// Fails with `NotFound` unless `menu` was added to this system.
    pub fn change_menu(&self, menu: &Menu<'_, D>) -> Result<(), Error> {
        let index = self
            .menus
            .iter()
            .position(|stored| core::ptr::eq(*stored, menu))
            .ok_or_else(|| {
                #[cfg(feature = "defmt")]
                defmt::warn!("system: menu not in this system");
                Error::NotFound
            })?;
        self.current.set(index as u8);
        #[cfg(feature = "defmt")]
        defmt::debug!("system: menu {} active", index);
        self.update()
    }

    /// Show `screen` in the active menu
    pub fn change_screen_to(&self, screen: &Screen<'_>) -> Result<(), Error> {
        self.active().ok_or(Error::NotFound)?.change_screen_to(screen)
    }

    /// Check if the focused line of the active menu has function `number`
    pub fn is_callable(&self, number: u8) -> bool {
        self.active().is_some_and(|menu| menu.is_callable(number))
    }

    /// Set the focus indicator position in every menu
    ///
    /// Returns the active menu's result.
    pub fn set_focus_position(&self, position: FocusPosition) -> Result<(), Error> {
        self.broadcast(|menu| menu.set_focus_position(position))
    }

    /// Replace the focus indicator glyph in every menu
    ///
    /// Returns the active menu's result.
    pub fn set_focus_symbol(
        &self,
        position: FocusPosition,
        bitmap: &GlyphBitmap,
    ) -> Result<(), Error> {
        self.broadcast(|menu| menu.set_focus_symbol(position, bitmap))
    }

    fn broadcast<F>(&self, mut apply: F) -> Result<(), Error>
    where
        F: FnMut(&Menu<'a, D>) -> Result<(), Error>,
    {
        let active = self.current.get() as usize;
        let mut result = Ok(());
        for (index, menu) in self.menus.iter().copied().enumerate() {
            let outcome = apply(menu);
            if index == active {
                result = outcome;
            }
        }
        result
    }
}

impl<D: CharDisplay> Navigation for MenuSystem<'_, D> {
    fn next_screen(&self) -> Result<(), Error> {
        self.active().map_or(Ok(()), Navigation::next_screen)
    }

    fn previous_screen(&self) -> Result<(), Error> {
        self.active().map_or(Ok(()), Navigation::previous_screen)
    }

    fn change_screen(&self, number: u8) -> Result<(), Error> {
        self.active()
            .ok_or(Error::InvalidArgument)?
            .change_screen(number)
    }

    fn switch_focus(&self, forward: bool) -> Result<(), Error> {
        self.active()
            .map_or(Ok(()), |menu| menu.switch_focus(forward))
    }

    fn call_function(&self, number: u8) -> Result<bool, Error> {
        self.active()
            .map_or(Ok(false), |menu| menu.call_function(number))
    }

    fn update(&self) -> Result<(), Error> {
        self.active().map_or(Ok(()), Navigation::update)
    }

    fn soft_update(&self) -> Result<(), Error> {
        self.active().map_or(Ok(()), Navigation::soft_update)
    }

    fn focused_line(&self) -> Option<usize> {
        self.active().and_then(Navigation::focused_line)
    }

    fn set_focused_line(&self, index: usize) -> Result<(), Error> {
        self.active()
            .ok_or(Error::InvalidArgument)?
            .set_focused_line(index)
    }
}
