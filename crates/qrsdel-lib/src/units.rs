use serde::{Deserialize, Serialize};

/// Acquisition and drawing scales the delineation thresholds depend on.
///
/// Amplitudes handled by the delineator are in digital (ADC) units, and time
/// is measured in samples. The drawing scales emulate the standard ECG paper
/// (25 mm/s, 10 mm/mV) used to express slope angles and temporal margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Sampling frequency (Hz).
    pub sampling_freq: f64,
    /// ADC gain (digital units per mV).
    pub adc_gain: f64,
    /// Temporal scale of the drawing (mm/s).
    pub temporal_scale: f64,
    /// Amplitude scale of the drawing (mm/mV).
    pub amplitude_scale: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            sampling_freq: 360.0,
            adc_gain: 200.0,
            temporal_scale: 25.0,
            amplitude_scale: 10.0,
        }
    }
}

impl ScaleConfig {
    pub fn samples_to_msec(&self, samples: f64) -> f64 {
        samples * 1000.0 / self.sampling_freq
    }

    pub fn msec_to_samples(&self, msec: f64) -> f64 {
        msec * self.sampling_freq / 1000.0
    }

    pub fn phys_to_digital(&self, mvolts: f64) -> f64 {
        mvolts * self.adc_gain
    }

    pub fn digital_to_phys(&self, difference: f64) -> f64 {
        difference / self.adc_gain
    }

    /// Digital amplitude difference expressed in drawing millimeters.
    pub fn digital_to_mm(&self, difference: f64) -> f64 {
        self.digital_to_phys(difference) * self.amplitude_scale
    }

    /// Temporal span in samples expressed in drawing millimeters.
    pub fn samples_to_mm(&self, samples: f64) -> f64 {
        self.samples_to_msec(samples) / 1000.0 * self.temporal_scale
    }

    pub fn mm_to_samples(&self, mm: f64) -> f64 {
        self.msec_to_samples(mm / self.temporal_scale * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_conversions() {
        let cfg = ScaleConfig::default();
        assert!((cfg.msec_to_samples(1000.0) - 360.0).abs() < 1e-9);
        assert!((cfg.samples_to_msec(36.0) - 100.0).abs() < 1e-9);
        assert!((cfg.phys_to_digital(0.5) - 100.0).abs() < 1e-9);
        // 1 mm on standard paper is 40 ms
        assert!((cfg.mm_to_samples(1.0) - 14.4).abs() < 1e-9);
        assert!((cfg.samples_to_mm(14.4) - 1.0).abs() < 1e-9);
        // 1 mV is 10 mm
        assert!((cfg.digital_to_mm(200.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: ScaleConfig = serde_json::from_str(r#"{"sampling_freq": 250.0}"#).unwrap();
        assert_eq!(cfg.sampling_freq, 250.0);
        assert_eq!(cfg.adc_gain, 200.0);
    }
}
