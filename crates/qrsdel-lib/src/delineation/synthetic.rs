use crate::constants::Constants;
use crate::model::LeadBundle;
use crate::signal::simplify;
use std::f64::consts::PI;

/// Window of 101 samples with a qRs complex whose R wave peaks at
/// `28 + shift`.
pub fn qrs_window(shift: usize) -> Vec<f64> {
    let mut signal = vec![0.0; 101];
    let mut triangle = |center: usize, amp: f64, half: isize| {
        for k in -half..=half {
            let i = (center as isize + k) as usize;
            signal[i] += amp * (1.0 - k.abs() as f64 / (half + 1) as f64);
        }
    };
    triangle(20 + shift, -30.0, 3);
    triangle(28 + shift, 200.0, 4);
    triangle(36 + shift, -60.0, 3);
    signal
}

/// Window of 101 samples with a broad wave of amplitude `wave` after an
/// optional pacemaker spike of amplitude `spike` starting at sample 20.
pub fn paced_window(spike: f64, wave: f64) -> Vec<f64> {
    let mut signal = vec![0.0; 101];
    signal[21] = spike / 2.0;
    signal[22] = spike;
    signal[23] = spike / 2.0;
    for k in 0..=40 {
        signal[26 + k] += wave * (PI * k as f64 / 40.0).sin();
    }
    signal
}

pub fn points(signal: &[f64], c: &Constants) -> Vec<usize> {
    simplify(signal, c.rdp_min_dist, c.rdp_npoints)
}

pub fn bundle(lead: &str, signal: Vec<f64>, quality: f64, c: &Constants) -> LeadBundle {
    let points = points(&signal, c);
    LeadBundle::new(lead, signal, points, 0.0, quality)
}
