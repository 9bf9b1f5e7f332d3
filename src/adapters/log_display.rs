//! Serial-console stand-in for the front-panel display.
//!
//! Formats each [`DisplayFrame`] into a fixed-width status line (no heap)
//! and logs it only when it differs from the last line shown, or when the
//! frame asks for a full redraw.
//!
//! ```text
//! OFF      [..........]
//! ON   7   [#######...] 1420 rpm
//! TURBO    [##########] 2600 rpm
//! ON   9   [#########.] | hold power for turbo
//! ```

use core::fmt::Write;

use heapless::String;
use log::info;

use crate::app::output::DisplayFrame;
use crate::app::ports::DisplayPort;
use crate::fsm::context::SpeedLevel;

/// Cells in the speed bargraph, one per level 1..=10.
pub const BAR_CELLS: usize = SpeedLevel::TURBO.get() as usize;

/// Longest line [`status_line`] produces.
pub const LINE_CAPACITY: usize = 64;

pub type StatusLine = String<LINE_CAPACITY>;

/// `#` for every level up to `speed`, `.` for the rest.
pub fn bargraph(speed: SpeedLevel) -> String<BAR_CELLS> {
    let mut bar = String::new();
    for cell in 1..=BAR_CELLS {
        // Capacity equals the cell count.
        let _ = bar.push(if cell <= usize::from(speed.get()) { '#' } else { '.' });
    }
    bar
}

/// Render a frame as one console line.
pub fn status_line(frame: &DisplayFrame) -> StatusLine {
    let mut line = StatusLine::new();
    // Worst case is well under LINE_CAPACITY, so writes cannot fail.
    let _ = if !frame.power.is_powered() {
        write!(line, "OFF      ")
    } else if frame.speed.is_turbo() {
        write!(line, "TURBO    ")
    } else {
        write!(line, "ON   {:<2}  ", frame.speed.get())
    };
    let _ = write!(line, "[{}]", bargraph(frame.speed));
    if let Some(rpm) = frame.rpm {
        let _ = write!(line, " {rpm} rpm");
    }
    if frame.turbo_prompt {
        let _ = write!(line, " | hold power for turbo");
    }
    line
}

/// [`DisplayPort`] that logs status lines.
#[derive(Debug, Default)]
pub struct LogDisplay {
    last: Option<StatusLine>,
    lines_logged: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The line currently "on screen".
    pub fn current(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// How many lines have been written to the log.
    pub fn lines_logged(&self) -> u32 {
        self.lines_logged
    }
}

impl DisplayPort for LogDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        let line = status_line(frame);
        if !frame.full_redraw && self.last.as_ref() == Some(&line) {
            return;
        }
        info!("PANEL | {}", line);
        self.lines_logged += 1;
        self.last = Some(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::PowerState;

    fn frame(power: PowerState, speed: u8) -> DisplayFrame {
        DisplayFrame {
            power,
            speed: SpeedLevel::new(speed),
            rpm: None,
            turbo_prompt: power == PowerState::TurboRequested,
            full_redraw: false,
        }
    }

    #[test]
    fn bargraph_fills_one_cell_per_level() {
        assert_eq!(bargraph(SpeedLevel::OFF).as_str(), "..........");
        assert_eq!(bargraph(SpeedLevel::new(3)).as_str(), "###.......");
        assert_eq!(bargraph(SpeedLevel::TURBO).as_str(), "##########");
    }

    #[test]
    fn status_lines() {
        assert_eq!(status_line(&frame(PowerState::Off, 0)).as_str(), "OFF      [..........]");
        assert_eq!(status_line(&frame(PowerState::On, 7)).as_str(), "ON   7   [#######...]");
        assert_eq!(status_line(&frame(PowerState::On, 10)).as_str(), "TURBO    [##########]");
        assert_eq!(
            status_line(&frame(PowerState::TurboRequested, 9)).as_str(),
            "ON   9   [#########.] | hold power for turbo"
        );
        let mut with_rpm = frame(PowerState::On, 4);
        with_rpm.rpm = Some(1420);
        assert_eq!(status_line(&with_rpm).as_str(), "ON   4   [####......] 1420 rpm");
    }

    #[test]
    fn unchanged_frames_are_not_relogged() {
        let mut display = LogDisplay::new();
        display.render(&frame(PowerState::On, 5));
        display.render(&frame(PowerState::On, 5));
        assert_eq!(display.lines_logged(), 1);

        display.render(&frame(PowerState::On, 6));
        assert_eq!(display.lines_logged(), 2);

        let mut redraw = frame(PowerState::On, 6);
        redraw.full_redraw = true;
        display.render(&redraw);
        assert_eq!(display.lines_logged(), 3);
        assert_eq!(display.current(), Some("ON   6   [######....]"));
    }
}
