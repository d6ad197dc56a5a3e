use crate::characterize::{LeadSignal, Record};
use anyhow::{anyhow, Context, Result};
use ::csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a multi-lead record from delimited text: one column per lead, lead
/// names in the header row, samples in digital units.
pub fn read_csv_record<R: Read>(reader: R, fs: f64, delimiter: u8) -> Result<Record> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers().context("reading header")?.clone();
    if headers.is_empty() {
        return Err(anyhow!("missing lead names in the header row"));
    }
    let mut leads: Vec<LeadSignal> = headers
        .iter()
        .map(|name| LeadSignal {
            name: name.to_string(),
            samples: Vec::new(),
        })
        .collect();
    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading row {}", row + 1))?;
        for (lead, value) in leads.iter_mut().zip(record.iter()) {
            let sample = value.parse::<f64>().with_context(|| {
                format!("row {}: lead {} is not numeric: {}", row + 1, lead.name, value)
            })?;
            lead.samples.push(sample);
        }
    }
    Ok(Record {
        fs,
        adc_gain: None,
        leads,
    })
}

/// Read a multi-lead CSV record from disk.
pub fn load_csv_record(path: &Path, fs: f64) -> Result<Record> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv_record(file, fs, b',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_one_column_per_lead() {
        let text = "MLII, V1\n1, -2\n3.5, 4\n0, 0\n";
        let record = read_csv_record(text.as_bytes(), 360.0, b',').unwrap();
        assert_eq!(record.leads.len(), 2);
        assert_eq!(record.leads[1].name, "V1");
        assert_eq!(record.leads[0].samples, vec![1.0, 3.5, 0.0]);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn reports_non_numeric_samples() {
        let text = "MLII\n1\nx\n";
        let err = read_csv_record(text.as_bytes(), 360.0, b',').unwrap_err();
        assert!(format!("{err:#}").contains("not numeric"));
    }
}
