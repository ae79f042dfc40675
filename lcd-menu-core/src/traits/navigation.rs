//! Menu navigation trait

use crate::error::Error;

/// Operations an input handler drives
///
/// Implemented by [`Menu`](crate::Menu) and by
/// [`MenuSystem`](crate::MenuSystem), which forwards to its active menu.
/// Every operation that changes what is shown redraws the display.
pub trait Navigation {
    /// Show the next visible screen, wrapping around
    fn next_screen(&self) -> Result<(), Error>;

    /// Show the previous visible screen, wrapping around
    fn previous_screen(&self) -> Result<(), Error>;

    /// Jump to a screen by its 1-based number
    ///
    /// Hidden screens can be reached this way.
    fn change_screen(&self, number: u8) -> Result<(), Error>;

    /// Move the focus to the next (`true`) or previous focusable line
    fn switch_focus(&self, forward: bool) -> Result<(), Error>;

    /// Call function `number` of the focused line and redraw
    ///
    /// Returns `Ok(false)` if nothing was called.
    fn call_function(&self, number: u8) -> Result<bool, Error>;

    /// Clear the display and draw the current screen
    fn update(&self) -> Result<(), Error>;

    /// Draw the current screen over the existing content
    fn soft_update(&self) -> Result<(), Error>;

    /// Index of the focused line on the current screen
    fn focused_line(&self) -> Option<usize>;

    /// Focus a line of the current screen without redrawing
    fn set_focused_line(&self, index: usize) -> Result<(), Error>;

    /// Move the focus forward
    fn focus_next(&self) -> Result<(), Error> {
        self.switch_focus(true)
    }

    /// Move the focus backward
    fn focus_previous(&self) -> Result<(), Error> {
        self.switch_focus(false)
    }
}
