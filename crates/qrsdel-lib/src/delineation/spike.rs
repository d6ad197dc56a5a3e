use crate::constants::Constants;
use crate::signal::get_peaks;
use log::trace;

/// A pacemaker spike: rising edge `[start, peak]`, falling edge `[peak, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spike {
    pub start: usize,
    pub peak: usize,
    pub end: usize,
}

impl Spike {
    pub fn duration(&self) -> usize {
        self.end - self.start
    }
}

/// Angle (radians) of the segment joining two samples in standard ECG scale.
pub(crate) fn angle(signal: &[f64], a: usize, b: usize, c: &Constants) -> f64 {
    slope(signal, a, b, c).atan()
}

/// Absolute slope between two samples, in mm/mm of standard ECG scale.
pub(crate) fn slope(signal: &[f64], a: usize, b: usize, c: &Constants) -> f64 {
    let (a, b) = (a.min(b), a.max(b));
    let rise = c.scale.digital_to_mm(signal[b] - signal[a]);
    let run = c.scale.samples_to_mm((b - a) as f64);
    (rise / run).abs()
}

/// Looks for a pacemaker spike among the representative points of a lead.
///
/// A spike lasts at most `spike_dur` samples, both edges have at least
/// `spike_edge_amp` amplitude, the rising edge ends in a local extremum
/// with an angle of 85° or more, and the falling edge has 75° or more and
/// an amplitude that does not exceed the rising one by `spike_edge_diff`.
/// Candidates that do not share a common time point are discarded as
/// inconsistent; otherwise the one with the highest energy is returned.
pub fn find_spike(signal: &[f64], points: &[usize], c: &Constants) -> Option<Spike> {
    let n = points.len();
    if n < 5 {
        return None;
    }
    let mut candidates = Vec::new();
    for i in 1..n - 3 {
        for j in i + 1..n - 2 {
            let pts = &points[i..=j];
            let first = pts[0];
            let llim = pts[pts.len() - 1];
            if llim - first > c.spike_dur {
                break;
            }
            // No extrema inside the rising edge.
            if pts.len() >= 3 {
                let values: Vec<f64> = pts.iter().map(|&p| signal[p]).collect();
                if !get_peaks(&values).is_empty() {
                    break;
                }
            }
            // The rising edge ends in an extremum.
            if get_peaks(&signal[llim - 1..=llim + 1]).is_empty() {
                continue;
            }
            let ledge = (signal[first] - signal[llim]).abs();
            if ledge < c.spike_edge_amp || angle(signal, first, llim, c) < 85f64.to_radians() {
                continue;
            }
            let mut ulim = (first + c.spike_dur).min(points[n - 1]);
            let rsig = &signal[llim..=ulim];
            if rsig.len() < 3 {
                break;
            }
            if let Some(&rpk) = get_peaks(rsig).first() {
                ulim = llim + rpk;
            }
            if points.binary_search(&(ulim - 1)).is_ok() {
                ulim -= 1;
            }
            if points.binary_search(&(ulim + 1)).is_ok() {
                ulim += 1;
            }
            while ulim > llim {
                let redge = (signal[ulim] - signal[llim]).abs();
                if redge < c.spike_edge_amp {
                    break;
                }
                if redge - ledge < c.spike_edge_diff
                    && angle(signal, llim, ulim, c) >= 75f64.to_radians()
                {
                    trace!("spike candidate [{first}, {llim}, {ulim}]");
                    candidates.push(Spike {
                        start: first,
                        peak: llim,
                        end: ulim,
                    });
                    break;
                }
                ulim -= 1;
            }
        }
    }
    let latest_start = candidates.iter().map(|s| s.start).max()?;
    let earliest_end = candidates.iter().map(|s| s.end).min()?;
    if latest_start >= earliest_end {
        return None;
    }
    let energy = |s: &Spike| -> f64 {
        signal[s.start..=s.end]
            .windows(2)
            .map(|w| (w[1] - w[0]).powi(2))
            .sum()
    };
    let mut best: Option<(Spike, f64)> = None;
    for spike in candidates {
        let e = energy(&spike);
        if best.map_or(true, |(_, be)| e > be) {
            best = Some((spike, e));
        }
    }
    best.map(|(s, _)| s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delineation::synthetic::{paced_window, points, qrs_window};

    #[test]
    fn detects_a_spike_before_the_paced_complex() {
        let c = Constants::default();
        let signal = paced_window(300.0, -250.0);
        let spike = find_spike(&signal, &points(&signal, &c), &c).unwrap();
        assert_eq!(
            spike,
            Spike {
                start: 20,
                peak: 22,
                end: 27
            }
        );
        assert_eq!(spike.duration(), 7);
    }

    #[test]
    fn slow_waves_are_not_spikes() {
        let c = Constants::default();
        let signal = paced_window(0.0, -250.0);
        assert_eq!(find_spike(&signal, &points(&signal, &c), &c), None);
        let signal = qrs_window(0);
        assert_eq!(find_spike(&signal, &[0, 28, 100], &c), None);
    }

    fn spike_at(signal: &mut [f64], start: usize) {
        signal[start + 1] = 150.0;
        signal[start + 2] = 300.0;
        signal[start + 3] = 150.0;
    }

    #[test]
    fn disjoint_candidates_are_inconsistent() {
        let c = Constants::default();
        let mut signal = vec![0.0; 101];
        spike_at(&mut signal, 20);
        spike_at(&mut signal, 60);
        let points = [0, 20, 22, 25, 40, 60, 62, 65, 100];
        assert_eq!(find_spike(&signal, &points, &c), None);
        // Either spike alone is accepted.
        let first = find_spike(&signal, &[0, 20, 22, 25, 40, 100], &c);
        assert_eq!(first.map(|s| (s.start, s.end)), Some((20, 31)));
        let second = find_spike(&signal, &[0, 60, 62, 65, 80, 100], &c);
        assert_eq!(second.map(|s| (s.start, s.end)), Some((60, 71)));
    }

    #[test]
    fn overlapping_candidates_keep_the_most_energetic() {
        let c = Constants::default();
        let mut signal = vec![0.0; 101];
        spike_at(&mut signal, 20);
        signal[19] = -5.0;
        signal[31] = -10.0;
        // Edges starting at 19 and at 20 both qualify; the later one spans
        // the larger drop after the spike.
        let spike = find_spike(&signal, &[0, 17, 19, 20, 22, 25, 40, 100], &c);
        assert_eq!(
            spike,
            Some(Spike {
                start: 20,
                peak: 22,
                end: 31
            })
        );
    }

    #[test]
    fn slopes_use_the_standard_drawing_scale() {
        let c = Constants::default();
        // 1 mV over 40 ms is 10 mm over 1 mm.
        let signal = [0.0, 200.0];
        let c = Constants {
            scale: crate::units::ScaleConfig {
                sampling_freq: 25.0,
                ..c.scale
            },
            ..c
        };
        assert!((slope(&signal, 0, 1, &c) - 10.0).abs() < 1e-9);
        assert!((angle(&signal, 1, 0, &c) - 10f64.atan()).abs() < 1e-9);
    }
}
