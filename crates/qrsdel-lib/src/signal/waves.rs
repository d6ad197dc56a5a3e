use crate::model::{ptp, Wave};
use crate::signal::peaks::get_peaks;

/// Splits the fragment spanned by `points` into consecutive waves.
///
/// Every local extremum of the representative points is the center of one
/// wave. Two neighbouring waves are separated at the sample between their
/// extrema that lies closest to the baseline, and the first and last waves
/// extend to the first and last points, so the sequence covers
/// `[points[0], points[last]]` without gaps. A fragment without interior
/// extrema is a single wave.
pub fn extract_waves(signal: &[f64], points: &[usize], baseline: f64) -> Vec<Wave> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if points.len() < 2 || last >= signal.len() || first >= last {
        return Vec::new();
    }
    let values: Vec<f64> = points.iter().map(|&p| signal[p]).collect();
    let centers: Vec<(usize, i8)> = get_peaks(&values)
        .into_iter()
        .map(|k| {
            let neighbours = (values[k - 1] + values[k + 1]) / 2.0;
            let sign = if values[k] > neighbours {
                1
            } else if values[k] < neighbours {
                -1
            } else {
                deviation_sign(signal[points[k]] - baseline)
            };
            (points[k], sign)
        })
        .collect();

    if centers.is_empty() {
        let mid = (first..=last)
            .max_by(|&a, &b| {
                let da = (signal[a] - baseline).abs();
                let db = (signal[b] - baseline).abs();
                da.total_cmp(&db).then(b.cmp(&a))
            })
            .unwrap_or(first);
        let sign = deviation_sign(signal[mid] - baseline);
        return vec![build_wave(signal, first, last, sign, baseline)];
    }

    let mut bounds = Vec::with_capacity(centers.len() + 1);
    bounds.push(first);
    for pair in centers.windows(2) {
        let (a, b) = (pair[0].0, pair[1].0);
        let split = (a + 1..b)
            .min_by(|&x, &y| {
                let dx = (signal[x] - baseline).abs();
                let dy = (signal[y] - baseline).abs();
                dx.total_cmp(&dy).then(x.cmp(&y))
            })
            .unwrap_or(a);
        bounds.push(split);
    }
    bounds.push(last);

    centers
        .iter()
        .enumerate()
        .map(|(i, &(_, sign))| build_wave(signal, bounds[i], bounds[i + 1], sign, baseline))
        .collect()
}

fn deviation_sign(deviation: f64) -> i8 {
    if deviation < 0.0 {
        -1
    } else {
        1
    }
}

fn build_wave(signal: &[f64], left: usize, right: usize, sign: i8, baseline: f64) -> Wave {
    let span = &signal[left..=right];
    let mut mid = left;
    for (i, &v) in span.iter().enumerate() {
        let cur = signal[mid];
        if (sign > 0 && v > cur) || (sign < 0 && v < cur) {
            mid = left + i;
        }
    }
    Wave {
        left,
        mid,
        right,
        sign,
        amplitude: ptp(span),
        energy: span.iter().map(|v| (v - baseline).powi(2)).sum(),
    }
}
