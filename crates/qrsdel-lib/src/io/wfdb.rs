use crate::characterize::{LeadSignal, Record};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Simple WFDB annotation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WfdbAnnotation {
    pub sample: usize,
    pub code: u8,
}

impl WfdbAnnotation {
    /// True for the annotation codes that mark a QRS complex.
    pub fn is_qrs(&self) -> bool {
        matches!(self.code, 1..=13 | 25 | 30 | 34 | 35 | 38 | 41)
    }
}

/// Load every signal of a WFDB header/data pair, keeping digital units.
pub fn load_wfdb_record(header_path: &Path) -> Result<Record> {
    let (header, signals) = wfdb_rust::parse_wfdb(header_path);
    if signals.is_empty() {
        anyhow::bail!("WFDB record {} contains no signals", header_path.display());
    }
    let fs = header
        .record
        .sampling_frequency
        .map(|f| f as f64)
        .unwrap_or(360.0);
    let adc_gain = header
        .signal_specs
        .first()
        .and_then(|spec| spec.adc_gain)
        .map(|g| g as f64);
    let leads = signals
        .iter()
        .enumerate()
        .map(|(i, raw)| LeadSignal {
            name: format!("signal{i}"),
            samples: raw.iter().map(|&sample| sample as f64).collect(),
        })
        .collect();
    Ok(Record {
        fs,
        adc_gain,
        leads,
    })
}

/// Parse MIT annotation binary stream into samples & codes.
pub fn parse_wfdb_annotations(buf: &[u8]) -> Vec<WfdbAnnotation> {
    let mut out = Vec::new();
    let mut idx = 0;
    let mut sample: usize = 0;
    while idx + 2 <= buf.len() {
        let word = u16::from_le_bytes([buf[idx], buf[idx + 1]]);
        idx += 2;
        let code = (word >> 10) as u8;
        let diff = (word & 0x03FF) as usize;
        if code == 0 && diff == 0 {
            break;
        }
        match code {
            59 => {
                if idx + 4 > buf.len() {
                    break;
                }
                let high = u16::from_le_bytes([buf[idx], buf[idx + 1]]) as u32;
                let low = u16::from_le_bytes([buf[idx + 2], buf[idx + 3]]) as u32;
                idx += 4;
                sample = sample.wrapping_add(((high << 16) | low) as usize);
            }
            // NUM/SUB/CHN carry no position of their own
            60..=62 => {}
            63 => {
                idx += diff;
                if diff % 2 != 0 {
                    idx += 1;
                }
            }
            _ => {
                sample = sample.wrapping_add(diff);
                out.push(WfdbAnnotation { sample, code });
            }
        }
    }
    out
}

/// Read a WFDB annotation file and keep the positions of QRS annotations.
pub fn load_wfdb_beats(path: &Path) -> Result<Vec<usize>> {
    let buf = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_wfdb_annotations(&buf)
        .into_iter()
        .filter(WfdbAnnotation::is_qrs)
        .map(|ann| ann.sample)
        .collect())
}
