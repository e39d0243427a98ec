//! Clinical story arcs.
//!
//! Every arc is one generic routine: interpolate each vital between a start
//! and end target along a progress fraction, add bounded uniform noise, and
//! let [`VitalsReading::from_sample`](crate::models::VitalsReading::from_sample)
//! clamp the result. Variants only change how progress is computed, which
//! indices emit a reading, and whether transient dips are layered on top.

use rand::Rng;

use crate::models::VitalSample;

/// Shorthand for a full set of vital values, in document field order.
pub const fn vitals(
    heart_rate: f64,
    systolic_bp: f64,
    diastolic_bp: f64,
    oxygen_saturation: f64,
    temperature: f64,
    respiratory_rate: f64,
    pain_score: f64,
) -> VitalSample {
    VitalSample {
        heart_rate,
        systolic_bp,
        diastolic_bp,
        oxygen_saturation,
        temperature,
        respiratory_rate,
        pain_score,
    }
}

/// Start/end targets plus per-vital noise half-widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub start: VitalSample,
    pub end: VitalSample,
    pub noise: VitalSample,
}

impl Trajectory {
    pub const fn new(start: VitalSample, end: VitalSample, noise: VitalSample) -> Self {
        Self { start, end, noise }
    }

    /// Same target throughout; only noise varies.
    pub const fn steady(level: VitalSample, noise: VitalSample) -> Self {
        Self::new(level, level, noise)
    }

    /// Interpolated targets at progress `t` in [0, 1].
    pub fn target(&self, t: f64) -> VitalSample {
        let (a, b) = (&self.start, &self.end);
        vitals(
            lerp(a.heart_rate, b.heart_rate, t),
            lerp(a.systolic_bp, b.systolic_bp, t),
            lerp(a.diastolic_bp, b.diastolic_bp, t),
            lerp(a.oxygen_saturation, b.oxygen_saturation, t),
            lerp(a.temperature, b.temperature, t),
            lerp(a.respiratory_rate, b.respiratory_rate, t),
            lerp(a.pain_score, b.pain_score, t),
        )
    }

    fn sample<R: Rng + ?Sized>(&self, t: f64, rng: &mut R) -> VitalSample {
        let target = self.target(t);
        let n = &self.noise;
        vitals(
            target.heart_rate + jitter(rng, n.heart_rate),
            target.systolic_bp + jitter(rng, n.systolic_bp),
            target.diastolic_bp + jitter(rng, n.diastolic_bp),
            target.oxygen_saturation + jitter(rng, n.oxygen_saturation),
            target.temperature + jitter(rng, n.temperature),
            target.respiratory_rate + jitter(rng, n.respiratory_rate),
            target.pain_score + jitter(rng, n.pain_score),
        )
    }
}

/// Periodic transient worsening: `width` consecutive samples out of every
/// `period`, starting at index 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipPattern {
    pub period: usize,
    pub width: usize,
    /// Added to heart rate.
    pub heart_rate: (f64, f64),
    /// Subtracted from oxygen saturation.
    pub oxygen_drop: (f64, f64),
    /// Added to respiratory rate.
    pub respiratory_rate: (f64, f64),
}

impl DipPattern {
    pub fn is_active(&self, index: usize) -> bool {
        self.period > 0 && index % self.period < self.width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArcKind {
    /// Linear over the whole series. Deteriorating, recovering and stable
    /// patients differ only in their targets.
    Steady(Trajectory),
    /// Linear with periodic dips layered on top.
    Fluctuating { trajectory: Trajectory, dips: DipPattern },
    /// Progress warped by `t^exponent`; exponents below 1 front-load change.
    FrontLoaded { trajectory: Trajectory, exponent: f64 },
    /// Only the trailing `window` samples exist (recent admission).
    LateOnset { trajectory: Trajectory, window: usize },
    /// Full series whose trailing `window` samples switch to `onset`.
    HiddenDeterioration {
        baseline: Trajectory,
        onset: Trajectory,
        window: usize,
    },
}

impl ArcKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Steady(_) => "steady",
            Self::Fluctuating { .. } => "fluctuating",
            Self::FrontLoaded { .. } => "front_loaded",
            Self::LateOnset { .. } => "late_onset",
            Self::HiddenDeterioration { .. } => "hidden_deterioration",
        }
    }

    /// Raw (unclamped) sample for position `index` of a series of `len`,
    /// or `None` when the arc has no reading at that position.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        index: usize,
        len: usize,
        rng: &mut R,
    ) -> Option<VitalSample> {
        let last = len.saturating_sub(1);
        match self {
            Self::Steady(trajectory) => Some(trajectory.sample(progress(index, last), rng)),
            Self::Fluctuating { trajectory, dips } => {
                let mut s = trajectory.sample(progress(index, last), rng);
                if dips.is_active(index) {
                    s.heart_rate += draw(rng, dips.heart_rate);
                    s.oxygen_saturation -= draw(rng, dips.oxygen_drop);
                    s.respiratory_rate += draw(rng, dips.respiratory_rate);
                }
                Some(s)
            }
            Self::FrontLoaded {
                trajectory,
                exponent,
            } => {
                let t = progress(index, last).powf(*exponent);
                Some(trajectory.sample(t, rng))
            }
            Self::LateOnset { trajectory, window } => {
                let cutoff = len.saturating_sub(*window);
                if index < cutoff {
                    return None;
                }
                let t = progress(index - cutoff, window.saturating_sub(1));
                Some(trajectory.sample(t, rng))
            }
            Self::HiddenDeterioration {
                baseline,
                onset,
                window,
            } => {
                let start = len.saturating_sub(*window);
                if index < start {
                    Some(baseline.sample(progress(index, start), rng))
                } else {
                    let t = progress(index - start, window.saturating_sub(1));
                    Some(onset.sample(t, rng))
                }
            }
        }
    }
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

fn progress(index: usize, span: usize) -> f64 {
    if span == 0 {
        0.0
    } else {
        index as f64 / span as f64
    }
}

/// Uniform noise in [-scale, +scale].
fn jitter<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-scale..=scale)
}

fn draw<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const QUIET: VitalSample = vitals(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    fn ramp() -> Trajectory {
        Trajectory::new(
            vitals(100.0, 140.0, 90.0, 90.0, 38.0, 20.0, 6.0),
            vitals(80.0, 120.0, 70.0, 98.0, 37.0, 16.0, 2.0),
            QUIET,
        )
    }

    #[test]
    fn steady_without_noise_hits_endpoints() {
        let mut rng = StdRng::seed_from_u64(1);
        let arc = ArcKind::Steady(ramp());
        let first = arc.sample(0, 11, &mut rng).unwrap();
        let mid = arc.sample(5, 11, &mut rng).unwrap();
        let last = arc.sample(10, 11, &mut rng).unwrap();
        assert_eq!(first.heart_rate, 100.0);
        assert_eq!(mid.heart_rate, 90.0);
        assert_eq!(last.heart_rate, 80.0);
        assert_eq!(last.oxygen_saturation, 98.0);
    }

    #[test]
    fn noise_stays_within_scale() {
        let mut rng = StdRng::seed_from_u64(7);
        let level = vitals(76.0, 115.0, 72.0, 98.0, 36.7, 15.0, 1.0);
        let noise = vitals(4.0, 5.0, 3.0, 0.5, 0.15, 1.0, 0.5);
        let arc = ArcKind::Steady(Trajectory::steady(level, noise));
        for i in 0..500 {
            let s = arc.sample(i, 500, &mut rng).unwrap();
            assert!((s.heart_rate - 76.0).abs() <= 4.0);
            assert!((s.temperature - 36.7).abs() <= 0.15 + 1e-12);
            assert!((s.pain_score - 1.0).abs() <= 0.5);
        }
    }

    #[test]
    fn front_loaded_improves_faster_than_linear() {
        let mut rng = StdRng::seed_from_u64(1);
        let linear = ArcKind::Steady(ramp());
        let warped = ArcKind::FrontLoaded {
            trajectory: ramp(),
            exponent: 0.5,
        };
        let l = linear.sample(25, 101, &mut rng).unwrap();
        let w = warped.sample(25, 101, &mut rng).unwrap();
        // t = 0.25 linear vs 0.5 warped
        assert_eq!(l.heart_rate, 95.0);
        assert!((w.heart_rate - 90.0).abs() < 1e-9);
    }

    #[test]
    fn dips_only_on_their_indices() {
        let dips = DipPattern {
            period: 24,
            width: 3,
            heart_rate: (5.0, 10.0),
            oxygen_drop: (1.0, 3.0),
            respiratory_rate: (1.0, 3.0),
        };
        let active: Vec<usize> = (0..60).filter(|i| dips.is_active(*i)).collect();
        assert_eq!(active, vec![0, 1, 2, 24, 25, 26, 48, 49, 50]);

        let flat = Trajectory::steady(vitals(90.0, 130.0, 80.0, 93.0, 37.0, 19.0, 2.0), QUIET);
        let arc = ArcKind::Fluctuating {
            trajectory: flat,
            dips,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let dip = arc.sample(24, 192, &mut rng).unwrap();
        let calm = arc.sample(30, 192, &mut rng).unwrap();
        assert!(dip.heart_rate >= 95.0 && dip.heart_rate <= 100.0);
        assert!(dip.oxygen_saturation <= 92.0 && dip.oxygen_saturation >= 90.0);
        assert_eq!(calm.heart_rate, 90.0);
        assert_eq!(calm.oxygen_saturation, 93.0);
    }

    #[test]
    fn late_onset_emits_only_trailing_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let arc = ArcKind::LateOnset {
            trajectory: ramp(),
            window: 16,
        };
        let emitted: Vec<usize> = (0..192)
            .filter(|i| arc.sample(*i, 192, &mut rng).is_some())
            .collect();
        assert_eq!(emitted, (176..192).collect::<Vec<_>>());
        let first = arc.sample(176, 192, &mut rng).unwrap();
        let last = arc.sample(191, 192, &mut rng).unwrap();
        assert_eq!(first.heart_rate, 100.0);
        assert_eq!(last.heart_rate, 80.0);
    }

    #[test]
    fn hidden_deterioration_switches_regime_at_window() {
        let baseline = Trajectory::steady(vitals(80.0, 122.0, 76.0, 96.0, 37.0, 16.0, 2.0), QUIET);
        let onset = Trajectory::new(
            vitals(80.0, 122.0, 76.0, 96.0, 37.0, 16.0, 2.0),
            vitals(88.0, 122.0, 76.0, 91.0, 37.4, 22.0, 4.0),
            QUIET,
        );
        let arc = ArcKind::HiddenDeterioration {
            baseline,
            onset,
            window: 16,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(arc.sample(175, 192, &mut rng).unwrap().oxygen_saturation, 96.0);
        assert_eq!(arc.sample(191, 192, &mut rng).unwrap().oxygen_saturation, 91.0);
        assert_eq!(arc.sample(191, 192, &mut rng).unwrap().respiratory_rate, 22.0);
    }

    #[test]
    fn single_sample_series_does_not_divide_by_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = ArcKind::Steady(ramp()).sample(0, 1, &mut rng).unwrap();
        assert_eq!(s.heart_rate, 100.0);
    }
}
