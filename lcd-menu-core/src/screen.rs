//! Screens
//!
//! A screen is an ordered set of lines with a focus index and optional
//! scrolling. The focus index ranges over `0..=line_count`; `line_count`
//! itself means "no line focused".
//!
//! Screens borrow their lines. Focus, scrolling and visibility live in
//! `Cell`s so a screen can be navigated while menus hold it.
//!
//! # Scrolling
//!
//! With a display line count smaller than the number of lines, only a
//! window of lines is printed. The window follows the focus, and printed
//! lines are placed on consecutive rows from the top for that draw only.

use core::cell::Cell;

use heapless::Vec;
use lcd_menu_display::{CharDisplay, DisplayError};

use crate::config::{FOCUS_GHOSTING, MAX_LINES};
use crate::error::Error;
use crate::line::{FocusPosition, Line};

/// An ordered set of lines
pub struct Screen<'a> {
    lines: Vec<&'a Line<'a>, MAX_LINES>,
    focus: Cell<u8>,
    display_line_count: Cell<u8>,
    hidden: Cell<bool>,
}

impl Default for Screen<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Screen<'a> {
    /// Create an empty screen
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            focus: Cell::new(0),
            display_line_count: Cell::new(0),
            hidden: Cell::new(false),
        }
    }

    /// Create a screen from a set of lines
    pub fn with_lines<I>(lines: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a Line<'a>>,
    {
        let mut screen = Self::new();
        for line in lines {
            screen.add_line(line)?;
        }
        Ok(screen)
    }

    /// Append a line
    ///
    /// The focus index moves along, so a freshly built screen starts
    /// with no line focused.
    pub fn add_line(&mut self, line: &'a Line<'a>) -> Result<(), Error> {
        self.lines.push(line).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("screen: line capacity {} exceeded", MAX_LINES);
            Error::CapacityExceeded
        })?;
        self.focus.set(self.focus.get() + 1);
        Ok(())
    }

    /// Get line `index` (0-based)
    pub fn line(&self, index: usize) -> Option<&'a Line<'a>> {
        self.lines.get(index).copied()
    }

    /// Iterate over the lines in print order
    pub fn lines(&self) -> impl Iterator<Item = &'a Line<'a>> + '_ {
        self.lines.iter().copied()
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the focused line, `None` when no line is focused
    pub fn focused_line(&self) -> Option<usize> {
        let focus = self.focus.get() as usize;
        (focus < self.lines.len()).then_some(focus)
    }

    /// Focus line `index` directly
    ///
    /// Fails without side effects unless the line exists and is focusable.
    pub fn set_focused_line(&self, index: usize) -> Result<(), Error> {
        match self.lines.get(index) {
            Some(line) if line.is_focusable() => {
                self.focus.set(index as u8);
                Ok(())
            }
            _ => Err(Error::InvalidArgument),
        }
    }

    /// Move the focus to the next (or previous) focusable line
    ///
    /// With the `focus-ghosting` feature a full cycle passes through the
    /// unfocused state once.
    pub fn switch_focus(&self, forward: bool) {
        self.step_focus(forward, FOCUS_GHOSTING);
        #[cfg(feature = "defmt")]
        defmt::debug!("screen: focus switched to {}", self.focus.get());
    }

    pub(crate) fn step_focus(&self, forward: bool, ghosting: bool) {
        let count = self.lines.len();
        if count == 0 {
            return;
        }

        let mut focus = self.focus.get() as usize;
        if ghosting {
            loop {
                if forward {
                    if focus < count {
                        focus += 1;
                        if focus == count {
                            break;
                        }
                    } else {
                        focus = 0;
                    }
                } else if focus == 0 {
                    focus = count;
                    break;
                } else {
                    focus -= 1;
                }
                if self.lines[focus].is_focusable() {
                    break;
                }
            }
        } else {
            for _ in 0..count {
                focus = if forward {
                    if focus + 1 >= count {
                        0
                    } else {
                        focus + 1
                    }
                } else if focus == 0 || focus >= count {
                    count - 1
                } else {
                    focus - 1
                };
                if self.lines[focus].is_focusable() {
                    break;
                }
            }
            if !self.lines[focus].is_focusable() {
                // Nothing focusable
                focus = count;
            }
        }
        self.focus.set(focus as u8);
    }

    /// Set how many lines fit on the display (0 = all lines)
    pub fn set_display_line_count(&self, count: u8) {
        self.display_line_count.set(count);
    }

    /// Configured display line count (0 = all lines)
    pub fn display_line_count(&self) -> u8 {
        self.display_line_count.get()
    }

    fn visible_lines(&self) -> usize {
        let count = self.lines.len();
        match self.display_line_count.get() as usize {
            0 => count,
            n if n > count => count,
            n => n,
        }
    }

    /// Index of the first printed line
    pub fn scroll_offset(&self) -> usize {
        let count = self.lines.len();
        let visible = self.visible_lines();
        let focus = self.focus.get() as usize;
        if focus < visible {
            return 0;
        }
        (focus + 1 - visible).min(count - visible)
    }

    /// Hide the screen from next/previous cycling
    ///
    /// Jumping to it directly still works.
    pub fn hide(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    /// Check if the screen is skipped when cycling
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    /// Set the focus indicator position of every line
    ///
    /// `Custom` is rejected: it needs a cell per line.
    pub fn set_focus_position(&self, position: FocusPosition) -> Result<(), Error> {
        if matches!(position, FocusPosition::Custom { .. }) {
            #[cfg(feature = "defmt")]
            defmt::warn!("screen: custom focus position must be set per line");
            return Err(Error::InvalidArgument);
        }
        for line in &self.lines {
            line.set_focus_position(position);
        }
        Ok(())
    }

    fn focused(&self) -> Option<&'a Line<'a>> {
        self.focused_line().and_then(|index| self.line(index))
    }

    /// Check if the focused line has function `number`
    pub fn is_callable(&self, number: u8) -> bool {
        self.focused().is_some_and(|line| line.is_callable(number))
    }

    /// Call function `number` of the focused line
    ///
    /// Returns `false` if no line is focused or nothing is attached there.
    pub fn call_function(&self, number: u8) -> bool {
        self.focused().is_some_and(|line| line.call_function(number))
    }

    /// Print the visible lines, marking the focused one
    pub fn print<D: CharDisplay + ?Sized>(&self, display: &mut D) -> Result<(), DisplayError> {
        let visible = self.visible_lines();
        let scrolled = visible < self.lines.len();
        let offset = self.scroll_offset();
        let focus = self.focus.get() as usize;

        for (row, (index, line)) in self
            .lines
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let focused = index == focus;
            if scrolled {
                line.print_at(display, row as u8, focused)?;
            } else {
                line.print(display, focused)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcd_menu_display::CharBuffer;

    const LABELS: [&str; MAX_LINES] = [
        "L0", "L1", "L2", "L3", "L4", "L5", "L6", "L7", "L8", "L9", "L10", "L11",
    ];

    fn noop() {}

    /// One labelled line per entry, focusable where `true`
    fn lines_of(focusable: &[bool]) -> Vec<Line<'static>, MAX_LINES> {
        let mut lines = Vec::new();
        for (i, &f) in focusable.iter().enumerate() {
            let mut line = Line::new(0, i as u8);
            line.add_field(LABELS[i]).unwrap();
            if f {
                line.attach_function(1, &noop).unwrap();
            }
            if lines.push(line).is_err() {
                panic!("too many lines");
            }
        }
        lines
    }

    fn screen_of<'a>(lines: &'a [Line<'a>]) -> Screen<'a> {
        Screen::with_lines(lines).unwrap()
    }

    #[test]
    fn test_add_line_leaves_screen_unfocused() {
        let lines = lines_of(&[true, true, true]);
        let screen = screen_of(&lines);
        assert_eq!(screen.line_count(), 3);
        assert_eq!(screen.focused_line(), None);
    }

    #[test]
    fn test_add_line_capacity() {
        let lines = lines_of(&[false; MAX_LINES]);
        let extra = Line::new(0, 0);
        let mut screen = screen_of(&lines);
        assert_eq!(screen.add_line(&extra), Err(Error::CapacityExceeded));
        assert_eq!(screen.line_count(), MAX_LINES);
        assert_eq!(screen.focused_line(), None);
    }

    #[test]
    fn test_screen_stores_references() {
        assert!(core::mem::size_of::<Screen<'_>>() <= 8 * (MAX_LINES + 4));
    }

    #[test]
    fn test_line_returns_stored_reference() {
        let first = Line::new(0, 0);
        let second = Line::new(0, 1);
        let screen = Screen::with_lines([&first, &second]).unwrap();
        assert!(screen.line(1).is_some_and(|line| core::ptr::eq(line, &second)));
        assert!(screen.line(2).is_none());
    }

    #[test]
    fn test_forward_from_unfocused_skips_leading_plain_lines() {
        let lines = lines_of(&[false, false, true, true]);
        for ghosting in [true, false] {
            let screen = screen_of(&lines);
            screen.step_focus(true, ghosting);
            assert_eq!(screen.focused_line(), Some(2));
        }
    }

    #[test]
    fn test_backward_from_unfocused_lands_on_last_focusable() {
        let lines = lines_of(&[true, true, false]);
        for ghosting in [true, false] {
            let screen = screen_of(&lines);
            screen.step_focus(false, ghosting);
            assert_eq!(screen.focused_line(), Some(1));
        }
    }

    #[test]
    fn test_ghosting_cycle_passes_unfocused_state() {
        let lines = lines_of(&[true, false, true, true]);
        let screen = screen_of(&lines);
        let mut seen = [None; 5];
        for slot in &mut seen {
            screen.step_focus(true, true);
            *slot = screen.focused_line();
        }
        assert_eq!(seen, [Some(0), Some(2), Some(3), None, Some(0)]);
    }

    #[test]
    fn test_ghosting_backward_wraps_through_unfocused_state() {
        let lines = lines_of(&[true, true]);
        let screen = screen_of(&lines);
        screen.set_focused_line(0).unwrap();
        screen.step_focus(false, true);
        assert_eq!(screen.focused_line(), None);
        screen.step_focus(false, true);
        assert_eq!(screen.focused_line(), Some(1));
    }

    #[test]
    fn test_continuous_cycle_never_unfocuses() {
        let lines = lines_of(&[true, false, true, true]);
        let screen = screen_of(&lines);
        let mut seen = [None; 6];
        for slot in &mut seen {
            screen.step_focus(true, false);
            *slot = screen.focused_line();
        }
        assert_eq!(
            seen,
            [Some(0), Some(2), Some(3), Some(0), Some(2), Some(3)]
        );

        screen.step_focus(false, false);
        assert_eq!(screen.focused_line(), Some(2));
    }

    #[test]
    fn test_switch_focus_without_focusable_lines_terminates() {
        let lines = lines_of(&[false, false, false]);
        for ghosting in [true, false] {
            let screen = screen_of(&lines);
            screen.step_focus(true, ghosting);
            assert_eq!(screen.focused_line(), None);
            screen.step_focus(false, ghosting);
            assert_eq!(screen.focused_line(), None);
        }
    }

    #[test]
    fn test_switch_focus_on_empty_screen() {
        let screen = Screen::new();
        screen.switch_focus(true);
        screen.switch_focus(false);
        assert_eq!(screen.focused_line(), None);
    }

    #[test]
    fn test_single_focusable_line_keeps_focus_without_ghosting() {
        let lines = lines_of(&[false, true, false]);
        let screen = screen_of(&lines);
        screen.set_focused_line(1).unwrap();
        screen.step_focus(true, false);
        assert_eq!(screen.focused_line(), Some(1));
        screen.step_focus(false, false);
        assert_eq!(screen.focused_line(), Some(1));
    }

    #[test]
    fn test_set_focused_line_validation() {
        let lines = lines_of(&[true, false]);
        let screen = screen_of(&lines);
        assert_eq!(screen.set_focused_line(1), Err(Error::InvalidArgument));
        assert_eq!(screen.set_focused_line(2), Err(Error::InvalidArgument));
        assert_eq!(screen.focused_line(), None);
        assert_eq!(screen.set_focused_line(0), Ok(()));
        assert_eq!(screen.focused_line(), Some(0));
    }

    #[test]
    fn test_scroll_offset_follows_focus() {
        let lines = lines_of(&[true; 10]);
        let screen = screen_of(&lines);
        screen.set_display_line_count(4);

        screen.set_focused_line(2).unwrap();
        assert_eq!(screen.scroll_offset(), 0);
        screen.set_focused_line(7).unwrap();
        assert_eq!(screen.scroll_offset(), 4);
        screen.set_focused_line(9).unwrap();
        assert_eq!(screen.scroll_offset(), 6);
    }

    #[test]
    fn test_scroll_offset_without_display_line_count() {
        let lines = lines_of(&[true; 5]);
        let screen = screen_of(&lines);
        screen.set_focused_line(4).unwrap();
        assert_eq!(screen.scroll_offset(), 0);
        screen.set_display_line_count(9);
        assert_eq!(screen.scroll_offset(), 0);
    }

    #[test]
    fn test_scrolled_print_places_window_on_top_rows() {
        let lines = lines_of(&[true; 10]);
        let screen = screen_of(&lines);
        screen.set_display_line_count(4);
        screen.set_focused_line(7).unwrap();

        let mut lcd: CharBuffer<16, 4> = CharBuffer::new();
        screen.print(&mut lcd).unwrap();
        assert_eq!(&lcd.row(0)[..2], b"L4");
        assert_eq!(&lcd.row(1)[..2], b"L5");
        assert_eq!(&lcd.row(2)[..2], b"L6");
        assert_eq!(&lcd.row(3)[..3], &[b'L', b'7', 7]);
        // Stored rows are untouched
        assert_eq!(screen.line(7).map(Line::position), Some((0, 7)));
    }

    #[test]
    fn test_unscrolled_print_uses_line_rows() {
        let lines = lines_of(&[true, false]);
        let screen = screen_of(&lines);
        screen.set_focused_line(0).unwrap();
        let mut lcd: CharBuffer = CharBuffer::new();
        screen.print(&mut lcd).unwrap();
        assert_eq!(&lcd.row(0)[..3], &[b'L', b'0', 7]);
        assert_eq!(lcd.row_str(1).unwrap().trim_end(), "L1");
    }

    #[test]
    fn test_rows_below_the_display_do_not_stop_the_draw() {
        let lines = lines_of(&[true, true, true]);
        let screen = screen_of(&lines);
        screen.set_focused_line(1).unwrap();
        let mut lcd: CharBuffer = CharBuffer::new();
        assert_eq!(screen.print(&mut lcd), Ok(()));
        assert_eq!(lcd.row_str(0).unwrap().trim_end(), "L0");
        assert_eq!(&lcd.row(1)[..3], &[b'L', b'1', 7]);
    }

    #[test]
    fn test_hide_keeps_focus() {
        let lines = lines_of(&[true]);
        let screen = screen_of(&lines);
        screen.set_focused_line(0).unwrap();
        screen.hide(true);
        assert!(screen.is_hidden());
        assert_eq!(screen.focused_line(), Some(0));
        screen.hide(false);
        assert!(!screen.is_hidden());
    }

    #[test]
    fn test_set_focus_position_for_all_lines() {
        let lines = lines_of(&[true, true]);
        let screen = screen_of(&lines);
        assert_eq!(
            screen.set_focus_position(FocusPosition::Custom { column: 0, row: 0 }),
            Err(Error::InvalidArgument)
        );
        assert_eq!(screen.set_focus_position(FocusPosition::Leading), Ok(()));
        assert!(lines
            .iter()
            .all(|line| line.focus_position() == FocusPosition::Leading));
    }

    #[test]
    fn test_call_function_on_focused_line() {
        let hits = Cell::new(0u8);
        let bump = || hits.set(hits.get() + 1);
        let mut first = Line::new(0, 0);
        first.attach_function(2, &bump).unwrap();
        let second = Line::new(0, 1);
        let screen = Screen::with_lines([&first, &second]).unwrap();

        assert!(!screen.is_callable(2));
        assert!(!screen.call_function(2));
        screen.set_focused_line(0).unwrap();
        assert!(screen.is_callable(2));
        assert!(screen.call_function(2));
        assert!(!screen.call_function(1));
        assert_eq!(hits.get(), 1);
    }
}
