/// Estimates the baseline level of a fragment as the mean of the most
/// populated amplitude bin of width `margin`.
///
/// The quality is the fraction of samples within `margin` of the estimated
/// level. An empty fragment has level 0 and quality 0.
pub fn characterize_baseline(signal: &[f64], margin: f64) -> (f64, f64) {
    if signal.is_empty() {
        return (0.0, 0.0);
    }
    let lo = signal.iter().copied().fold(f64::INFINITY, f64::min);
    let width = if margin > 0.0 { margin } else { 1.0 };
    let bin_of = |v: f64| ((v - lo) / width).floor() as usize;
    let nbins = signal.iter().map(|&v| bin_of(v)).max().unwrap_or(0) + 1;
    let mut counts = vec![0usize; nbins];
    let mut sums = vec![0.0f64; nbins];
    for &v in signal {
        let b = bin_of(v);
        counts[b] += 1;
        sums[b] += v;
    }
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    let level = sums[best] / counts[best] as f64;
    let close = signal.iter().filter(|&&v| (v - level).abs() <= width).count();
    (level, close as f64 / signal.len() as f64)
}
