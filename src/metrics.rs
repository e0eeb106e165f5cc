use crate::config::WPM_TIER_BOUNDS;

/// Speed figures derived from the session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub cpm: u32,
    pub wpm: u32,
    pub accuracy: u32,
}

impl Metrics {
    /// None when no time has elapsed yet; callers keep their previous figures then.
    pub fn compute(correct: u32, errors: u32, elapsed_secs: u32) -> Option<Self> {
        if elapsed_secs == 0 {
            return None;
        }
        let cpm = (correct as f64 / elapsed_secs as f64 * 60.0).round() as u32;
        Some(Self {
            cpm,
            wpm: (cpm as f64 / 5.0).round() as u32,
            accuracy: accuracy(correct, errors),
        })
    }
}

/// Whole percentage of correct keystrokes, 0 before anything was typed
pub fn accuracy(correct: u32, errors: u32) -> u32 {
    let total = correct + errors;
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).floor() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SpeedTier {
    Slow,
    Average,
    Fast,
    Professional,
    Top,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 5] = [
        SpeedTier::Slow,
        SpeedTier::Average,
        SpeedTier::Fast,
        SpeedTier::Professional,
        SpeedTier::Top,
    ];

    /// A score of zero has no tier
    pub fn for_wpm(wpm: u32) -> Option<Self> {
        if wpm == 0 {
            return None;
        }
        let idx = WPM_TIER_BOUNDS
            .iter()
            .take_while(|&&bound| wpm >= bound)
            .count();
        Some(Self::ALL[idx])
    }

    /// Gauge label, e.g. "20 - 40"
    pub fn range_label(&self) -> String {
        let idx = *self as usize;
        let low = if idx == 0 { 0 } else { WPM_TIER_BOUNDS[idx - 1] };
        match WPM_TIER_BOUNDS.get(idx) {
            Some(high) => format!("{low} - {high}"),
            None => format!("{low} - 100+"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_half_minute() {
        let m = Metrics::compute(30, 0, 30).unwrap();
        assert_eq!(m.cpm, 60);
        assert_eq!(m.wpm, 12);
        assert_eq!(m.accuracy, 100);
    }

    #[test]
    fn test_compute_before_first_second() {
        assert_eq!(Metrics::compute(10, 2, 0), None);
    }

    #[test]
    fn test_compute_rounding() {
        // 7 chars in 9s: 46.67 cpm -> 47, 9.4 wpm -> 9
        let m = Metrics::compute(7, 0, 9).unwrap();
        assert_eq!(m.cpm, 47);
        assert_eq!(m.wpm, 9);

        // 25 cpm -> 5 wpm, 28 cpm -> 5.6 -> 6
        assert_eq!(Metrics::compute(25, 0, 60).unwrap().wpm, 5);
        assert_eq!(Metrics::compute(28, 0, 60).unwrap().wpm, 6);
    }

    #[test]
    fn test_accuracy_no_keystrokes() {
        assert_eq!(accuracy(0, 0), 0);
    }

    #[test]
    fn test_accuracy_floors() {
        assert_eq!(accuracy(2, 1), 66);
        assert_eq!(accuracy(3, 1), 75);
        assert_eq!(accuracy(0, 4), 0);
        assert_eq!(accuracy(199, 1), 99);
    }

    #[test]
    fn test_speed_tier_boundaries() {
        assert_eq!(SpeedTier::for_wpm(0), None);
        assert_eq!(SpeedTier::for_wpm(1), Some(SpeedTier::Slow));
        assert_eq!(SpeedTier::for_wpm(19), Some(SpeedTier::Slow));
        assert_eq!(SpeedTier::for_wpm(20), Some(SpeedTier::Average));
        assert_eq!(SpeedTier::for_wpm(39), Some(SpeedTier::Average));
        assert_eq!(SpeedTier::for_wpm(40), Some(SpeedTier::Fast));
        assert_eq!(SpeedTier::for_wpm(59), Some(SpeedTier::Fast));
        assert_eq!(SpeedTier::for_wpm(60), Some(SpeedTier::Professional));
        assert_eq!(SpeedTier::for_wpm(79), Some(SpeedTier::Professional));
        assert_eq!(SpeedTier::for_wpm(80), Some(SpeedTier::Top));
        assert_eq!(SpeedTier::for_wpm(212), Some(SpeedTier::Top));
    }

    #[test]
    fn test_speed_tier_labels() {
        assert_eq!(SpeedTier::Slow.to_string(), "Slow");
        assert_eq!(SpeedTier::Professional.to_string(), "Professional");
        assert_eq!(SpeedTier::Slow.range_label(), "0 - 20");
        assert_eq!(SpeedTier::Fast.range_label(), "40 - 60");
        assert_eq!(SpeedTier::Top.range_label(), "80 - 100+");
    }
}
