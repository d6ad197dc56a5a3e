use crate::units::ScaleConfig;
use serde::Serialize;

/// Knowledge-based thresholds derived from a [`ScaleConfig`].
///
/// Temporal values are in samples and amplitudes in digital units, so a new
/// set must be derived whenever the sampling frequency, gain or drawing
/// scales change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Constants {
    #[serde(skip)]
    pub scale: ScaleConfig,
    /// Bin width used to estimate the baseline level.
    pub baseline_margin: f64,
    /// Minimum signal length used to characterize the baseline level.
    pub baseline_min_len: usize,
    /// Temporal margin for measurement discrepancies (1 mm in standard scale).
    pub tmargin: usize,
    /// Maximum number of points kept by the signal simplification.
    pub rdp_npoints: usize,
    /// Minimum deviation for a point to be kept by the simplification.
    pub rdp_min_dist: f64,
    /// Maximum duration of a pacemaker spike.
    pub spike_dur: usize,
    /// Minimum amplitude of each edge of a pacemaker spike.
    pub spike_edge_amp: f64,
    /// Maximum amplitude difference between both spike edges.
    pub spike_edge_diff: f64,
    /// Maximum distance between the beat annotation and the QRS start.
    pub qrs_bann_dmax: usize,
    /// Maximum distance between the beat annotation and the QRS end.
    pub qrs_eann_dmax: usize,
    pub qrs_min_amp: f64,
    pub qrs_max_amp: f64,
}

impl Constants {
    pub fn new(scale: ScaleConfig) -> Self {
        Self {
            scale,
            baseline_margin: scale.phys_to_digital(0.02),
            baseline_min_len: scale.msec_to_samples(1000.0) as usize,
            tmargin: scale.mm_to_samples(1.0).ceil() as usize,
            rdp_npoints: 9,
            rdp_min_dist: scale.phys_to_digital(0.05),
            spike_dur: scale.msec_to_samples(30.0).round() as usize,
            spike_edge_amp: scale.phys_to_digital(0.2),
            spike_edge_diff: scale.phys_to_digital(0.1),
            qrs_bann_dmax: scale.msec_to_samples(80.0) as usize,
            qrs_eann_dmax: scale.msec_to_samples(200.0) as usize,
            qrs_min_amp: scale.phys_to_digital(0.5),
            qrs_max_amp: scale.phys_to_digital(6.5),
        }
    }

    /// Digital amplitude of `mvolts`.
    pub fn mv(&self, mvolts: f64) -> f64 {
        self.scale.phys_to_digital(mvolts)
    }

    /// Number of samples spanning `msec`.
    pub fn ms(&self, msec: f64) -> f64 {
        self.scale.msec_to_samples(msec)
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::new(ScaleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mit_bih_defaults() {
        let c = Constants::default();
        assert_eq!(c.tmargin, 15);
        assert_eq!(c.spike_dur, 11);
        assert_eq!(c.qrs_bann_dmax, 28);
        assert_eq!(c.qrs_eann_dmax, 72);
        assert_eq!(c.baseline_min_len, 360);
        assert!((c.spike_edge_amp - 40.0).abs() < 1e-9);
        assert!((c.qrs_max_amp - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn thresholds_follow_sampling_frequency() {
        let c = Constants::new(ScaleConfig {
            sampling_freq: 250.0,
            ..ScaleConfig::default()
        });
        assert_eq!(c.tmargin, 10);
        assert_eq!(c.qrs_bann_dmax, 20);
        assert_eq!(c.qrs_eann_dmax, 50);
    }
}
