use crate::constants::Constants;
use crate::model::LeadBundle;
use crate::signal::{characterize_baseline, simplify};
use serde::{Deserialize, Serialize};

/// Multi-lead record held in memory, in digital units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// Sampling frequency in Hz.
    pub fs: f64,
    /// ADC gain (digital units per mV), when the source provides one.
    pub adc_gain: Option<f64>,
    pub leads: Vec<LeadSignal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSignal {
    pub name: String,
    pub samples: Vec<f64>,
}

impl Record {
    /// Number of samples of the longest lead.
    pub fn len(&self) -> usize {
        self.leads.iter().map(|l| l.samples.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Analysis window around one beat annotation.
#[derive(Debug, Clone)]
pub struct BeatWindow {
    /// Absolute position of the first sample of the window.
    pub offset: usize,
    /// Lead information sorted by decreasing quality.
    pub leads: Vec<LeadBundle>,
}

/// Cuts the analysis window of the beat annotated at `beat` and
/// characterizes it in every lead.
///
/// The window spans from `qrs_bann_dmax` samples before the annotation to
/// `qrs_eann_dmax` samples after it. The baseline is estimated over at least
/// `baseline_min_len` samples centered on the window. Returns `None` if the
/// annotation is closer than `qrs_bann_dmax` to the start of the record, as
/// the expected peak position would not hold, or if any lead has no signal
/// inside the window.
pub fn characterize_window(record: &Record, beat: usize, c: &Constants) -> Option<BeatWindow> {
    let beg = beat.checked_sub(c.qrs_bann_dmax)?;
    let end = beat + c.qrs_eann_dmax;
    let mut leads = Vec::with_capacity(record.leads.len());
    for lead in &record.leads {
        let n = lead.samples.len();
        if beg >= n {
            return None;
        }
        let wend = end.min(n - 1);
        let window = &lead.samples[beg..=wend];
        let center = (beg + wend) / 2;
        let half = window.len().max(c.baseline_min_len) / 2;
        let bl_beg = center.saturating_sub(half);
        let bl_end = (center + half).min(n - 1);
        let (baseline, quality) =
            characterize_baseline(&lead.samples[bl_beg..=bl_end], c.baseline_margin);
        let points = simplify(window, c.rdp_min_dist, c.rdp_npoints);
        leads.push(LeadBundle::new(
            lead.name.clone(),
            window.to_vec(),
            points,
            baseline,
            quality,
        ));
    }
    leads.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    Some(BeatWindow { offset: beg, leads })
}
