use crate::constants::Constants;
use crate::error::{verify, InconsistencyError as E, Result};
use crate::model::{QrsShape, Wave};
use crate::shape::{classify, is_qrs_complex, QrsTag};
use crate::signal::extract_waves;

/// Shape that best fits a signal fragment.
///
/// Starting at every wave, the longest sequence of consecutive waves that
/// stays a recognized shape is considered. Sequences must hold more than
/// half of the total energy and include `peak`; the most energetic one is
/// the result.
pub fn qrs_shape(
    signal: &[f64],
    points: &[usize],
    peak: usize,
    baseline: f64,
    c: &Constants,
) -> Result<QrsShape> {
    let waves = extract_waves(signal, points, baseline);
    verify(!waves.is_empty(), E::NoShape)?;
    let total: f64 = waves.iter().map(|w| w.energy).sum();
    let mut best: Option<(&[Wave], QrsTag, f64)> = None;
    for i in 0..waves.len() {
        let mut j = i + 1;
        while j < waves.len() && is_qrs_complex(&waves[i..=j], c) {
            j += 1;
        }
        let seq = &waves[i..j];
        let Some(tag) = classify(seq, c) else {
            continue;
        };
        let energy: f64 = seq.iter().map(|w| w.energy).sum();
        if energy / total > 0.5
            && seq.iter().any(|w| w.contains(peak))
            && best.map_or(true, |(_, _, e)| energy > e)
        {
            best = Some((seq, tag, energy));
        }
    }
    let (seq, tag, _) = best.ok_or(E::NoShape)?;
    QrsShape::from_waves(signal, seq.to_vec(), tag).ok_or(E::NoShape)
}

/// Shape of a paced complex spanning `[start, end]` of `signal`.
///
/// The baseline is taken at the beginning of the spike, and the shape is
/// the longest recognized prefix of the waves, which must hold more than
/// half of their energy. The returned waves are relative to `signal`.
pub fn paced_qrs_shape(
    signal: &[f64],
    points: &[usize],
    start: usize,
    end: usize,
    c: &Constants,
) -> Result<QrsShape> {
    let end = end.min(signal.len().saturating_sub(1));
    verify(start < end, E::InvalidLimits { start, end })?;
    let sig = &signal[start..=end];
    let mut pts: Vec<usize> = points
        .iter()
        .filter(|&&p| start <= p && p <= end)
        .map(|&p| p - start)
        .collect();
    verify(
        !pts.is_empty(),
        E::TooFewPoints {
            expected: 1,
            actual: 0,
        },
    )?;
    if pts[0] != 0 {
        pts.insert(0, 0);
    }
    if pts[pts.len() - 1] != sig.len() - 1 {
        pts.push(sig.len() - 1);
    }
    verify(
        pts.len() >= 3,
        E::TooFewPoints {
            expected: 3,
            actual: pts.len(),
        },
    )?;
    let waves = extract_waves(sig, &pts, sig[0]);
    verify(!waves.is_empty(), E::NoShape)?;
    let total: f64 = waves.iter().map(|w| w.energy).sum();
    let mut i = 0;
    while i < waves.len() && classify(&waves[..=i], c).is_some() {
        i += 1;
    }
    let tag = classify(&waves[..i], c).ok_or(E::NoShape)?;
    let mut shape = QrsShape::from_waves(sig, waves[..i].to_vec(), tag).ok_or(E::NoShape)?;
    shape.translate(start as isize);
    verify(shape.energy / total > 0.5, E::NoShape)?;
    Ok(shape)
}
