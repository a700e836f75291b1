use std::time::Duration;

use rodio::Source;

const SAMPLE_RATE: u32 = 44_100;
/// how long each beep lasts
const BURST_SECS: f32 = 0.5;
/// beep start to beep start, the rest is silence
const PERIOD_SECS: f32 = 0.7;
/// gain at the start of a beep
const PEAK_GAIN: f32 = 0.3;
/// gain the beep decays to by its end
const FLOOR_GAIN: f32 = 0.01;

/// the ringing tone: a high pitch square wave in short repeating bursts
///
/// each burst decays exponentially from [`PEAK_GAIN`] to [`FLOOR_GAIN`] over
/// [`BURST_SECS`], then stays silent until [`PERIOD_SECS`]; the source never
/// ends, it is shut off by stopping the sink
#[derive(Debug, Clone)]
pub struct SquareBurst {
    frequency: f32,
    /// sample index within the current burst+silence period
    position: u32,
    period_samples: u32,
}

impl SquareBurst {
    #[must_use]
    pub fn new(frequency: f32) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let period_samples = (PERIOD_SECS * SAMPLE_RATE as f32) as u32;
        Self {
            frequency,
            position: 0,
            period_samples,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn sample(&self) -> f32 {
        let t = self.position as f32 / SAMPLE_RATE as f32;
        if t >= BURST_SECS {
            return 0.0;
        }
        let envelope = PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(t / BURST_SECS);
        let phase = (t * self.frequency).fract();
        if phase < 0.5 {
            envelope
        } else {
            -envelope
        }
    }
}

impl Iterator for SquareBurst {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.sample();
        self.position = (self.position + 1) % self.period_samples;
        Some(sample)
    }
}

impl Source for SquareBurst {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{SquareBurst, BURST_SECS, FLOOR_GAIN, PEAK_GAIN, PERIOD_SECS, SAMPLE_RATE};

    fn seconds_of_samples(secs: f32) -> usize {
        (secs * SAMPLE_RATE as f32) as usize
    }

    #[test]
    fn burst_starts_at_peak_gain() {
        let mut tone = SquareBurst::new(2500.0);
        let first = tone.next().unwrap();
        assert!((first - PEAK_GAIN).abs() < 1e-6);
    }

    #[test]
    fn amplitude_never_exceeds_peak() {
        let tone = SquareBurst::new(2500.0);
        assert!(tone
            .take(seconds_of_samples(PERIOD_SECS * 2.0))
            .all(|s| s.abs() <= PEAK_GAIN + 1e-6));
    }

    #[test]
    fn square_wave_swings_both_ways() {
        let samples: Vec<f32> = SquareBurst::new(2500.0).take(40).collect();
        assert!(samples.iter().any(|s| *s > 0.0));
        assert!(samples.iter().any(|s| *s < 0.0));
    }

    #[test]
    fn burst_decays_toward_floor_gain() {
        let late = SquareBurst::new(2500.0)
            .nth(seconds_of_samples(BURST_SECS) - 1)
            .unwrap();
        assert!(late.abs() <= FLOOR_GAIN * 1.1);
    }

    #[test]
    fn gap_after_burst_is_silent() {
        let tone = SquareBurst::new(2500.0);
        let gap: Vec<f32> = tone
            .skip(seconds_of_samples(BURST_SECS))
            .take(seconds_of_samples(PERIOD_SECS - BURST_SECS) - 1)
            .collect();
        assert!(gap.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn tone_repeats_after_each_period() {
        let mut tone = SquareBurst::new(2500.0);
        let first = tone.next().unwrap();
        let next_period = tone.nth(seconds_of_samples(PERIOD_SECS) - 1).unwrap();
        assert!((first - next_period).abs() < 1e-6);
    }
}
