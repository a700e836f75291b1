use std::fmt;

use crate::sketch::Path;

/// the phase of the alarm setting workflow
///
/// transitions only move forward through this order, except for the explicit
/// reset edge back to [`Stage::Hour`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Hour,
    Minute,
    Second,
    Confirm,
    Countdown,
    Ringing,
    Done,
}

impl Stage {
    /// upper bound (in cm) for the value drawn in this stage, `None` outside
    /// the drawing stages
    #[must_use]
    pub const fn bound(self) -> Option<f64> {
        match self {
            Self::Hour => Some(24.0),
            Self::Minute | Self::Second => Some(60.0),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_drawing(self) -> bool {
        self.bound().is_some()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hour => "Hour",
            Self::Minute => "Minute",
            Self::Second => "Second",
            Self::Confirm => "Confirm",
            Self::Countdown => "Countdown",
            Self::Ringing => "Ringing",
            Self::Done => "Done",
        }
    }
}

/// the user drew a line longer than the current stage allows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverBound {
    pub stage: Stage,
    pub value: f64,
    pub bound: f64,
}

impl fmt::Display for OverBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cannot be greater than {}! Please draw again.",
            self.stage.label(),
            self.bound
        )
    }
}

/// the whole alarm workflow: current stage, the line being drawn and the
/// time values set so far
///
/// every mutation goes through one of the methods below so the stage order
/// and the set-once rule for the time values cannot be violated from outside
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AlarmFlow {
    stage: Stage,
    path: Path,
    hour: f64,
    minute: f64,
    second: f64,
    /// total seconds frozen at confirmation, kept for the progress bar
    total: u64,
    remaining: u64,
}

impl AlarmFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    #[must_use]
    pub const fn hour(&self) -> f64 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> f64 {
        self.minute
    }

    #[must_use]
    pub const fn second(&self) -> f64 {
        self.second
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// record the drawn length as the current stage's value and advance
    ///
    /// an empty line is fine and records 0.00; a line over the stage's bound
    /// is rejected, the line is cleared and the stage stays put so the user
    /// can draw again
    pub fn set(&mut self) -> Result<(), OverBound> {
        let Some(bound) = self.stage.bound() else {
            return Ok(());
        };
        let value = self.path.length_cm();
        self.path.clear();
        if value > bound {
            log::info!(
                "rejected {} of {value:.2}, bound is {bound}",
                self.stage.label()
            );
            return Err(OverBound {
                stage: self.stage,
                value,
                bound,
            });
        }
        match self.stage {
            Stage::Hour => {
                self.hour = value;
                self.stage = Stage::Minute;
            }
            Stage::Minute => {
                self.minute = value;
                self.stage = Stage::Second;
            }
            _ => {
                self.second = value;
                self.stage = Stage::Confirm;
            }
        }
        log::info!("set to {value:.2}, now at {}", self.stage.label());
        Ok(())
    }

    /// throw away the line being drawn
    pub fn erase(&mut self) {
        self.path.clear();
    }

    /// start the alarm: countdown if any time was set, otherwise ring
    /// straight away
    ///
    /// returns the new stage so the caller knows whether to start the tone
    pub fn confirm(&mut self) -> Stage {
        if self.stage == Stage::Confirm {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let total = (self.hour * 3600.0 + self.minute * 60.0 + self.second).floor() as u64;
            self.total = total;
            if total == 0 {
                self.stage = Stage::Ringing;
            } else {
                self.remaining = total;
                self.stage = Stage::Countdown;
            }
            log::info!("alarm confirmed for {total} seconds");
        }
        self.stage
    }

    /// one second of countdown has elapsed
    ///
    /// returns the new stage so the caller knows whether the tone should
    /// start; outside [`Stage::Countdown`] this is a no-op
    pub fn tick(&mut self) -> Stage {
        if self.stage == Stage::Countdown {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.stage = Stage::Ringing;
                log::info!("countdown finished, ringing");
            }
        }
        self.stage
    }

    /// the user shut the alarm off
    pub fn stop(&mut self) {
        if self.stage == Stage::Ringing {
            self.stage = Stage::Done;
        }
    }

    /// back to the beginning, only available once all three values are set
    pub fn reset(&mut self) {
        if matches!(
            self.stage,
            Stage::Confirm | Stage::Countdown | Stage::Ringing | Stage::Done
        ) {
            log::info!("reset from {}", self.stage.label());
            *self = Self::default();
        }
    }
}

/// seconds as HH:MM:SS for the countdown display
#[must_use]
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::{format_hms, AlarmFlow, Stage};
    use crate::sketch::Point;

    fn draw_line(flow: &mut AlarmFlow, pixels: f32) {
        flow.path_mut().begin(Point::new(0.0, 0.0));
        flow.path_mut().push(Point::new(pixels, 0.0));
    }

    #[test]
    fn stages_advance_in_order() {
        let mut flow = AlarmFlow::new();
        assert_eq!(flow.stage(), Stage::Hour);
        flow.set().unwrap();
        assert_eq!(flow.stage(), Stage::Minute);
        flow.set().unwrap();
        assert_eq!(flow.stage(), Stage::Second);
        flow.set().unwrap();
        assert_eq!(flow.stage(), Stage::Confirm);
    }

    #[test]
    fn empty_line_records_zero() {
        let mut flow = AlarmFlow::new();
        flow.set().unwrap();
        flow.set().unwrap();
        flow.set().unwrap();
        assert_eq!(flow.hour(), 0.0);
        assert_eq!(flow.minute(), 0.0);
        assert_eq!(flow.second(), 0.0);
    }

    #[test]
    fn boundary_value_is_accepted() {
        let mut flow = AlarmFlow::new();
        // 480 px at 20 px/cm is exactly 24, the hour bound
        draw_line(&mut flow, 480.0);
        flow.set().unwrap();
        assert_eq!(flow.stage(), Stage::Minute);
        assert!((flow.hour() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn over_bound_is_rejected_and_clears_the_line() {
        let mut flow = AlarmFlow::new();
        draw_line(&mut flow, 500.0);
        let err = flow.set().unwrap_err();
        assert_eq!(flow.stage(), Stage::Hour);
        assert!(flow.path().is_empty());
        assert!((err.value - 25.0).abs() < 1e-9);
        assert_eq!(
            err.to_string(),
            "Hour cannot be greater than 24! Please draw again."
        );
        // hour was never written
        assert_eq!(flow.hour(), 0.0);
    }

    #[test]
    fn minute_bound_is_sixty() {
        let mut flow = AlarmFlow::new();
        flow.set().unwrap();
        // 1220 px is 61 cm
        draw_line(&mut flow, 1220.0);
        assert!(flow.set().is_err());
        assert_eq!(flow.stage(), Stage::Minute);
        draw_line(&mut flow, 1200.0);
        flow.set().unwrap();
        assert_eq!(flow.stage(), Stage::Second);
        assert!((flow.minute() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn set_clears_the_line_on_success() {
        let mut flow = AlarmFlow::new();
        draw_line(&mut flow, 100.0);
        flow.set().unwrap();
        assert!(flow.path().is_empty());
    }

    #[test]
    fn all_zero_confirm_rings_immediately() {
        let mut flow = AlarmFlow::new();
        flow.set().unwrap();
        flow.set().unwrap();
        flow.set().unwrap();
        assert_eq!(flow.confirm(), Stage::Ringing);
    }

    #[test]
    fn nonzero_confirm_counts_down() {
        let mut flow = AlarmFlow::new();
        flow.set().unwrap();
        flow.set().unwrap();
        // 100 px is 5 cm, so 5 seconds
        draw_line(&mut flow, 100.0);
        flow.set().unwrap();
        assert_eq!(flow.confirm(), Stage::Countdown);
        assert_eq!(flow.remaining(), 5);
        assert_eq!(flow.total(), 5);
    }

    #[test]
    fn countdown_decrements_once_per_tick_until_ringing() {
        let mut flow = AlarmFlow::new();
        flow.set().unwrap();
        flow.set().unwrap();
        draw_line(&mut flow, 100.0);
        flow.set().unwrap();
        flow.confirm();
        for expected in (1..5).rev() {
            assert_eq!(flow.tick(), Stage::Countdown);
            assert_eq!(flow.remaining(), expected);
        }
        assert_eq!(flow.tick(), Stage::Ringing);
        assert_eq!(flow.remaining(), 0);
    }

    #[test]
    fn stop_finishes_the_alarm() {
        let mut flow = AlarmFlow::new();
        flow.set().unwrap();
        flow.set().unwrap();
        flow.set().unwrap();
        flow.confirm();
        flow.stop();
        assert_eq!(flow.stage(), Stage::Done);
    }

    #[test]
    fn stop_does_nothing_outside_ringing() {
        let mut flow = AlarmFlow::new();
        flow.stop();
        assert_eq!(flow.stage(), Stage::Hour);
    }

    #[test]
    fn reset_returns_to_hour_from_any_later_stage() {
        for ticks in [0, 1, 5] {
            let mut flow = AlarmFlow::new();
            draw_line(&mut flow, 40.0);
            flow.set().unwrap();
            flow.set().unwrap();
            draw_line(&mut flow, 100.0);
            flow.set().unwrap();
            flow.confirm();
            for _ in 0..ticks {
                flow.tick();
            }
            flow.reset();
            assert_eq!(flow.stage(), Stage::Hour);
            assert_eq!(flow.hour(), 0.0);
            assert_eq!(flow.minute(), 0.0);
            assert_eq!(flow.second(), 0.0);
            assert_eq!(flow.remaining(), 0);
            assert!(flow.path().is_empty());
        }
    }

    #[test]
    fn reset_is_unavailable_while_drawing() {
        let mut flow = AlarmFlow::new();
        draw_line(&mut flow, 40.0);
        flow.set().unwrap();
        flow.reset();
        assert_eq!(flow.stage(), Stage::Minute);
    }

    #[test]
    fn tick_outside_countdown_is_a_no_op() {
        let mut flow = AlarmFlow::new();
        assert_eq!(flow.tick(), Stage::Hour);
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(5), "00:00:05");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(86_399), "23:59:59");
    }
}
