use assert_cmd::cargo::cargo_bin_cmd;
use serde::Deserialize;
use std::{collections::BTreeMap, error::Error, fs, path::Path};

#[derive(Deserialize)]
struct BeatOutput {
    beat: usize,
    start: usize,
    peak: usize,
    end: usize,
    paced: bool,
    shape: BTreeMap<String, String>,
}

/// Three leads of 1000 samples with the same qRs complex, the R wave
/// peaking at sample 500 and one sample later in each following lead.
fn write_record(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut leads = vec![vec![0.0f64; 1000]; 3];
    for (shift, lead) in leads.iter_mut().enumerate() {
        for (center, amp, half) in [(492, -30.0, 3isize), (500, 200.0, 4), (508, -60.0, 3)] {
            for k in -half..=half {
                let i = (center + shift as isize + k) as usize;
                lead[i] += amp * (1.0 - k.abs() as f64 / (half + 1) as f64);
            }
        }
    }
    let mut text = String::from("I,II,III\n");
    for i in 0..1000 {
        text.push_str(&format!("{},{},{}\n", leads[0][i], leads[1][i], leads[2][i]));
    }
    fs::write(path, text)?;
    Ok(())
}

fn parse_lines(stdout: &[u8]) -> Result<Vec<BeatOutput>, Box<dyn Error>> {
    let mut out = Vec::new();
    for line in std::str::from_utf8(stdout)?.lines() {
        out.push(serde_json::from_str(line)?);
    }
    Ok(out)
}

#[test]
fn delineates_annotated_beats_of_a_csv_record() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let record = dir.path().join("record.csv");
    let beats = dir.path().join("beats.txt");
    write_record(&record)?;
    // Beat 20 is too close to the record start, beat 200 has no complex and
    // beat 5000 is past the record end.
    fs::write(&beats, "# beats\n20\n200\n500\n5000\n")?;

    let mut cmd = cargo_bin_cmd!("qrsdel");
    cmd.args([
        "delineate",
        "--input",
        record.to_str().expect("utf8 path"),
        "--annotations",
        beats.to_str().expect("utf8 path"),
        "--fs",
        "360",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let beats = parse_lines(&output)?;

    assert_eq!(beats.len(), 1);
    let beat = &beats[0];
    assert_eq!(beat.beat, 500);
    assert_eq!((beat.start, beat.peak, beat.end), (488, 500, 514));
    assert!(!beat.paced);
    assert_eq!(beat.shape.len(), 3);
    assert!(beat.shape.values().all(|tag| tag == "qRs"));
    Ok(())
}

#[test]
fn reads_mit_annotations_and_writes_to_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let record = dir.path().join("record.csv");
    let atr = dir.path().join("record.atr");
    let out = dir.path().join("qrs.jsonl");
    write_record(&record)?;
    let mut ann = Vec::new();
    // normal beat at 500, then end of file
    ann.extend(((1u16 << 10) | 500).to_le_bytes());
    ann.extend(0u16.to_le_bytes());
    fs::write(&atr, ann)?;

    let mut cmd = cargo_bin_cmd!("qrsdel");
    cmd.args([
        "delineate",
        "--input",
        record.to_str().expect("utf8 path"),
        "--annotations",
        atr.to_str().expect("utf8 path"),
        "--out",
        out.to_str().expect("utf8 path"),
    ]);
    cmd.assert().success();
    let beats = parse_lines(&fs::read(&out)?)?;
    assert_eq!(beats.len(), 1);
    assert_eq!(beats[0].peak, 500);
    Ok(())
}

#[test]
fn requires_a_record() {
    let mut cmd = cargo_bin_cmd!("qrsdel");
    cmd.args(["delineate", "--annotations", "beats.txt"]);
    cmd.assert().failure();
}
