use crate::constants::Constants;
use crate::model::LeadBundle;
use crate::signal::get_peaks;

/// Most prominent extremum among the representative points of one lead.
///
/// Each extremum is scored by its deviation from the baseline, discounted
/// by its distance to the expected peak position `expected` (in the same
/// coordinates as `points`). Returns `None` if there are fewer than three
/// points or no extremum among them.
pub fn lead_peak(
    signal: &[f64],
    points: &[usize],
    baseline: f64,
    expected: f64,
    c: &Constants,
) -> Option<usize> {
    if points.len() < 3 {
        return None;
    }
    let values: Vec<f64> = points.iter().map(|&p| signal[p]).collect();
    let norm = c.ms(150.0);
    let mut best: Option<(usize, f64)> = None;
    for k in get_peaks(&values) {
        let p = points[k];
        let penalty = 1.0 + 2.0 * (p as f64 - expected).abs() / norm;
        let score = (signal[p] - baseline).abs() / penalty;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((p, score));
        }
    }
    best.map(|(p, _)| p)
}

/// Consensus peak of a set of leads sorted by decreasing quality.
///
/// The first lead with a peak sets the reference; later leads can only move
/// it to an earlier position within the temporal margin.
pub fn find_peak(leads: &[LeadBundle], c: &Constants) -> Option<usize> {
    let expected = c.qrs_bann_dmax as f64;
    let mut peak: Option<usize> = None;
    for lead in leads {
        let Some(lpeak) = lead_peak(&lead.signal, &lead.points, lead.baseline, expected, c) else {
            continue;
        };
        peak = match peak {
            None => Some(lpeak),
            Some(p) if p.abs_diff(lpeak) <= c.tmargin => Some(p.min(lpeak)),
            keep => keep,
        };
    }
    peak
}
