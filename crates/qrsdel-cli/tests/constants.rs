use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::{error::Error, fs};

fn constants(args: &[&str]) -> Result<Value, Box<dyn Error>> {
    let mut cmd = cargo_bin_cmd!("qrsdel");
    cmd.arg("constants").args(args);
    let output = cmd.assert().success().get_output().stdout.clone();
    Ok(serde_json::from_slice(&output)?)
}

#[test]
fn prints_default_thresholds() -> Result<(), Box<dyn Error>> {
    let c = constants(&[])?;
    assert_eq!(c["tmargin"], 15);
    assert_eq!(c["qrs_bann_dmax"], 28);
    assert_eq!(c["qrs_eann_dmax"], 72);
    assert_eq!(c["rdp_npoints"], 9);
    assert_eq!(c["qrs_min_amp"].as_f64(), Some(100.0));
    Ok(())
}

#[test]
fn thresholds_follow_the_config_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("scale.toml");
    fs::write(&config, "sampling_freq = 250.0\n")?;
    let c = constants(&["--config", config.to_str().expect("utf8 path")])?;
    assert_eq!(c["tmargin"], 10);
    assert_eq!(c["qrs_bann_dmax"], 20);
    assert_eq!(c["qrs_eann_dmax"], 50);
    // the gain is kept at its default
    assert_eq!(c["spike_edge_amp"].as_f64(), Some(40.0));

    let c = constants(&["--config", config.to_str().expect("utf8 path"), "--fs", "360"])?;
    assert_eq!(c["tmargin"], 15);
    Ok(())
}
