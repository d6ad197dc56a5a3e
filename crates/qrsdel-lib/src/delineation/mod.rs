pub mod cluster;
pub mod combine;
pub mod decompose;
pub mod limits;
pub mod peak;
pub mod spike;
#[cfg(test)]
pub(crate) mod synthetic;

use crate::constants::Constants;
use crate::error::{verify, InconsistencyError, Result};
use crate::model::{LeadBundle, LeadMap, Qrs};
use crate::shape::reference_wave;
use crate::units::ScaleConfig;
use combine::{combine_limits, LeadLimits};
use decompose::{paced_qrs_shape, qrs_shape};
use limits::{paced_qrs_limits, qrs_limits};
use log::{debug, trace};
use peak::{find_peak, lead_peak};

/// QRS delineator bound to a fixed set of thresholds.
///
/// A delineator holds no per-beat state, so a single instance may be shared
/// by any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Delineator {
    constants: Constants,
}

impl Delineator {
    pub fn new(scale: ScaleConfig) -> Self {
        Self::with_constants(Constants::new(scale))
    }

    pub fn with_constants(constants: Constants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn delineate(&self, leads: &[LeadBundle]) -> Result<Qrs> {
        delineate_qrs(leads, &self.constants)
    }
}

/// Delineates the QRS complex enclosed in the analysis window described by
/// `leads`, which must be sorted by decreasing quality.
///
/// A consensus peak is estimated first, then the limits of every lead
/// (paced path before the regular one) are combined. The QRS waveform is
/// extracted in each lead inside those limits and used to refine them.
///
/// All the returned positions are relative to the analysis window.
pub fn delineate_qrs(leads: &[LeadBundle], c: &Constants) -> Result<Qrs> {
    verify(!leads.is_empty(), InconsistencyError::NoLeads)?;
    let peak = find_peak(leads, c).ok_or(InconsistencyError::NoPeak)?;
    trace!("consensus peak at {peak}");

    let mut limits = LeadMap::new();
    for lead in leads {
        let paced = paced_qrs_limits(&lead.signal, &lead.points, peak, lead.baseline, c);
        let estimate = match paced {
            Ok(iv) => LeadLimits {
                paced: true,
                limits: iv,
            },
            Err(err) => {
                trace!("lead {} is not paced: {err}", lead.lead);
                match qrs_limits(&lead.signal, &lead.points, peak) {
                    Ok(iv) => LeadLimits {
                        paced: false,
                        limits: iv,
                    },
                    Err(err) => {
                        debug!("no QRS limits in lead {}: {err}", lead.lead);
                        continue;
                    }
                }
            }
        };
        limits.insert(lead.lead.clone(), estimate);
    }
    let (mut start, mut end) = combine_limits(&mut limits, leads, peak, c)?;
    verify(end > start, InconsistencyError::InvalidLimits { start, end })?;

    let mut qrs = Qrs::default();
    for lead in leads {
        if lead.signal.len() <= end {
            debug!("lead {} is shorter than the QRS limits", lead.lead);
            continue;
        }
        let sig = &lead.signal[start..=end];
        let mut points: Vec<usize> = lead
            .points
            .iter()
            .filter(|&&p| start <= p && p <= end)
            .map(|&p| p - start)
            .collect();
        if points.is_empty() {
            continue;
        }
        if points[0] != 0 {
            points.insert(0, 0);
        }
        if points[points.len() - 1] != sig.len() - 1 {
            points.push(sig.len() - 1);
        }
        if points.len() < 3 {
            continue;
        }
        let expected = c.qrs_bann_dmax as f64 - start as f64;
        let Some(lpeak) = lead_peak(sig, &points, lead.baseline, expected, c) else {
            continue;
        };
        let mut shape = None;
        if let Some(l) = limits.get(&lead.lead).copied().filter(|l| l.paced) {
            let pstart = l.limits.start().saturating_sub(start);
            let pend = l.limits.end().saturating_sub(start).min(sig.len());
            match paced_qrs_shape(sig, &points, pstart, pend, c) {
                Ok(s) => shape = Some(s),
                Err(err) => {
                    debug!("no paced shape in lead {}: {err}", lead.lead);
                    limits.insert(lead.lead.clone(), LeadLimits { paced: false, ..l });
                }
            }
        }
        let shape = match shape {
            Some(s) => s,
            None => match qrs_shape(sig, &points, lpeak, lead.baseline, c) {
                Ok(s) => s,
                Err(err) => {
                    debug!("no QRS shape in lead {}: {err}", lead.lead);
                    continue;
                }
            },
        };
        qrs.shape.insert(lead.lead.clone(), shape);
    }
    verify(!qrs.shape.is_empty(), InconsistencyError::NoShape)?;

    // The detected shapes may narrow the limits.
    let llim = qrs.shape.values().map(|s| s.start()).min().unwrap_or(0);
    if llim > 0 {
        start += llim;
        for shape in qrs.shape.values_mut() {
            shape.translate(-(llim as isize));
        }
    }
    let ulim = qrs.shape.values().map(|s| s.end()).max().unwrap_or(0);
    if ulim < end - start {
        end = start + ulim;
    }
    // Each shape has a specific reference wave, the earliest sets the peak.
    let offset = qrs
        .shape
        .values()
        .filter_map(|s| s.waves.get(reference_wave(s)).map(|w| w.mid))
        .min()
        .unwrap_or(0);

    qrs.paced = limits.values().any(|l| l.paced);
    qrs.start = start;
    qrs.peak = start + offset;
    qrs.end = end;

    // Amplitude within the physiological range in at least one lead, or a
    // recognized waveform in most leads.
    let max_amp = qrs.shape.values().map(|s| s.amplitude).fold(0.0, f64::max);
    verify(
        qrs.shape.len() as f64 > leads.len() as f64 / 2.0
            || (c.qrs_min_amp..=c.qrs_max_amp).contains(&max_amp),
        InconsistencyError::AmplitudeOutOfRange(max_amp),
    )?;
    Ok(qrs)
}
