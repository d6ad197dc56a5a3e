use crate::constants::Constants;
use crate::delineation::cluster::steep_segments;
use crate::delineation::spike::{find_spike, slope};
use crate::error::{verify, InconsistencyError as E, Result};
use crate::interval::Interval;
use crate::model::ptp;
use crate::signal::get_peaks;

/// `[log-slope, distance]` descriptor of the segment between two points.
fn descriptor(signal: &[f64], a: usize, b: usize, dist: usize) -> [f64; 2] {
    let slope = (signal[b] - signal[a]) / (b - a) as f64;
    [(slope.abs() + 1.0).ln(), dist as f64]
}

/// Limits of a possible QRS complex in one lead, obtained by clustering the
/// segments of the simplified signal into steep segments close to `peak`
/// and flat or distant ones.
///
/// If the excluded segments cover more than half of the time spanned by the
/// steep ones, only the run of steep segments adjacent to the peak is kept.
/// The limits must enclose at least one extremum.
pub fn qrs_limits(signal: &[f64], points: &[usize], peak: usize) -> Result<Interval<usize>> {
    verify(
        points.len() >= 3,
        E::TooFewPoints {
            expected: 3,
            actual: points.len(),
        },
    )?;
    let values: Vec<f64> = points.iter().map(|&p| signal[p]).collect();
    let pks: Vec<usize> = get_peaks(&values).into_iter().map(|k| points[k]).collect();
    verify(!pks.is_empty(), E::NoExtremum("the simplified signal"))?;
    // Each segment is represented by its point closest to the peak.
    let features: Vec<[f64; 2]> = points
        .windows(2)
        .map(|seg| {
            let point = if seg[0] < peak { seg[0] } else { seg[1] };
            descriptor(signal, seg[0], seg[1], point.abs_diff(peak))
        })
        .collect();
    let valid: Vec<usize> = steep_segments(&features)
        .into_iter()
        .enumerate()
        .filter_map(|(i, steep)| steep.then_some(i))
        .collect();
    let (Some(&first), Some(&last)) = (valid.first(), valid.last()) else {
        return Err(E::EmptyCluster);
    };
    let mut start = points[first];
    let mut end = points[last + 1];
    if invalid_time_rate(points, &valid) > 0.5 {
        let is_valid = |i: usize| valid.binary_search(&i).is_ok();
        let mut s = valid
            .iter()
            .copied()
            .filter(|&v| points[v] <= peak)
            .max()
            .ok_or(E::Rejected("no steep segment before the peak"))?;
        while s > 0 && is_valid(s - 1) {
            s -= 1;
        }
        let mut e = valid
            .iter()
            .copied()
            .filter(|&v| points[v + 1] >= peak)
            .min()
            .ok_or(E::Rejected("no steep segment after the peak"))?;
        while is_valid(e + 1) {
            e += 1;
        }
        start = points[s];
        end = points[e + 1];
    }
    verify(
        pks.iter().any(|&p| start < p && p < end),
        E::NoExtremum("the QRS limits"),
    )?;
    Interval::try_new(start, end).ok_or(E::InvalidLimits { start, end })
}

/// Ratio between the time covered by non-valid segments and the time
/// covered by valid ones, between the first and last valid segment.
fn invalid_time_rate(points: &[usize], valid: &[usize]) -> f64 {
    let (Some(&first), Some(&last)) = (valid.first(), valid.last()) else {
        return 0.0;
    };
    let (mut valid_time, mut invalid_time) = (0usize, 0usize);
    for idx in first..=last {
        let dur = points[idx + 1] - points[idx];
        if valid.binary_search(&idx).is_ok() {
            valid_time += dur;
        } else {
            invalid_time += dur;
        }
    }
    invalid_time as f64 / valid_time as f64
}

/// Limits of a paced QRS complex: a pacemaker spike followed by at least
/// one significant wave.
///
/// The start is the beginning of the spike, and the end is found by the
/// same clustering applied to the segments after the spike.
pub fn paced_qrs_limits(
    signal: &[f64],
    points: &[usize],
    peak: usize,
    baseline: f64,
    c: &Constants,
) -> Result<Interval<usize>> {
    let spike = find_spike(signal, points, c).ok_or(E::Rejected("no pacemaker spike"))?;
    let mut points = points.to_vec();
    if let Err(pos) = points.binary_search(&spike.end) {
        points.insert(pos, spike.end);
    }
    let bpts: Vec<usize> = points.iter().copied().filter(|&p| p <= spike.start).collect();
    let apts: Vec<usize> = points.iter().copied().filter(|&p| p >= spike.end).collect();
    verify(
        apts.len() >= 2,
        E::TooFewPoints {
            expected: 2,
            actual: apts.len(),
        },
    )?;
    verify(
        bpts.len() >= 2,
        E::TooFewPoints {
            expected: 2,
            actual: bpts.len(),
        },
    )?;
    // Significant slope change before and after the spike.
    let nb = bpts.len();
    verify(
        slope(signal, spike.start, spike.peak, c)
            > 2.0 * slope(signal, bpts[nb - 2], bpts[nb - 1], c),
        E::Rejected("no slope change at the spike onset"),
    )?;
    verify(
        slope(signal, spike.peak, spike.end, c) > 2.0 * slope(signal, apts[0], apts[1], c),
        E::Rejected("no slope change at the spike end"),
    )?;
    // The end of the complex is set by clustering the segments after the
    // spike.
    let features: Vec<[f64; 2]> = apts
        .windows(2)
        .map(|seg| descriptor(signal, seg[0], seg[1], seg[1].abs_diff(peak)))
        .collect();
    let last = steep_segments(&features)
        .into_iter()
        .rposition(|steep| steep)
        .ok_or(E::EmptyCluster)?;
    let end = apts[last + 1];
    verify(
        (end - apts[0]) as f64 > 2.0 * spike.duration() as f64,
        E::Rejected("paced complex shorter than twice the spike"),
    )?;
    let sgspike = &signal[spike.start..=spike.end];
    let sgqrs = &signal[apts[0]..=end];
    let qrs_amp = ptp(sgqrs);
    verify(
        qrs_amp > c.mv(0.5) && qrs_amp > 0.5 * ptp(sgspike),
        E::Rejected("paced complex amplitude too low"),
    )?;
    let qrspt: Vec<f64> = apts
        .iter()
        .filter(|&&p| p <= end)
        .map(|&p| signal[p])
        .collect();
    verify(
        qrspt.len() >= 3,
        E::TooFewPoints {
            expected: 3,
            actual: qrspt.len(),
        },
    )?;
    verify(
        (signal[end] - signal[spike.start]).abs() <= c.mv(0.3) || !get_peaks(&qrspt).is_empty(),
        E::NoExtremum("the paced complex"),
    )?;
    let origin = sgspike[0];
    let area = |s: &[f64]| s.iter().map(|v| (v - origin).abs()).sum::<f64>();
    verify(
        area(sgspike) < area(sgqrs),
        E::Rejected("spike area larger than the paced complex"),
    )?;
    verify(
        (signal[spike.start] - baseline).abs() < 0.3 * ptp(&signal[spike.start..=end]),
        E::Rejected("spike starts away from the baseline"),
    )?;
    Ok(Interval::new(spike.start, end))
}
