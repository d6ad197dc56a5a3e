/// Ramer-Douglas-Peucker simplification of a signal fragment.
///
/// Starting from the first and last samples, the sample with the largest
/// vertical deviation from the chord of its segment is added until
/// `max_points` points are kept or no sample deviates at least `min_dist`.
/// The result is sorted and always contains both endpoints (a single one
/// for one-sample fragments).
pub fn simplify(signal: &[f64], min_dist: f64, max_points: usize) -> Vec<usize> {
    match signal.len() {
        0 => return Vec::new(),
        1 => return vec![0],
        _ => {}
    }
    let mut points = vec![0, signal.len() - 1];
    while points.len() < max_points {
        let best = points
            .windows(2)
            .filter_map(|seg| farthest(signal, seg[0], seg[1]))
            .fold(None, |acc: Option<(usize, f64)>, cand| match acc {
                Some(best) if best.1 >= cand.1 => Some(best),
                _ => Some(cand),
            });
        match best {
            Some((idx, dist)) if dist >= min_dist => {
                let pos = points.partition_point(|&p| p < idx);
                points.insert(pos, idx);
            }
            _ => break,
        }
    }
    points
}

/// Interior sample of `[a, b]` farthest from the chord joining both ends.
fn farthest(signal: &[f64], a: usize, b: usize) -> Option<(usize, f64)> {
    if b <= a + 1 {
        return None;
    }
    let slope = (signal[b] - signal[a]) / (b - a) as f64;
    (a + 1..b)
        .map(|i| {
            let chord = signal[a] + slope * (i - a) as f64;
            (i, (signal[i] - chord).abs())
        })
        .fold(None, |acc: Option<(usize, f64)>, cand| match acc {
            Some(best) if best.1 >= cand.1 => Some(best),
            _ => Some(cand),
        })
}
