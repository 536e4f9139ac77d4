use std::fs;
use std::process::Command;

const PIMA_SAMPLE: &str = "\
6,148,72,35,0,33.6,0.627,50,1
1,85,66,29,0,26.6,0.351,31,0
8,183,64,0,0,23.3,0.672,32,1
1,89,66,23,94,28.1,0.167,21,0
0,137,40,35,168,43.1,2.288,33,1
5,116,74,0,0,25.6,0.201,30,0
3,78,50,32,88,31,0.248,26,1
10,115,0,0,0,35.3,0.134,29,0
2,197,70,45,543,30.5,0.158,53,1
8,125,96,0,0,0,0.232,54,1
4,110,92,0,0,37.6,0.191,30,0
10,168,74,0,0,38,0.537,34,1
10,139,80,0,0,27.1,1.441,57,0
1,189,60,23,846,30.1,0.398,59,1
5,166,72,19,175,25.8,0.587,51,1
7,100,0,0,0,30,0.484,32,1
0,118,84,47,230,45.8,0.551,31,1
7,107,74,0,0,29.6,0.254,31,1
1,103,30,38,83,43.3,0.183,33,0
1,115,70,30,96,34.6,0.529,32,1
";

#[test]
fn trains_three_artifacts_from_a_local_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("pima.csv");
    fs::write(&csv, PIMA_SAMPLE).unwrap();
    let out = dir.path().join("models");

    let output = Command::new(env!("CARGO_BIN_EXE_medi-train"))
        .arg("--source")
        .arg(&csv)
        .arg("--out-dir")
        .arg(&out)
        .args(["--seed", "7"])
        .output()
        .expect("spawn medi-train");
    assert!(
        output.status.success(),
        "medi-train failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All models trained successfully"), "{stdout}");
    for name in ["diabetes_model.json", "heart_model.json", "kidney_model.json"] {
        assert!(out.join(name).is_file(), "{name} missing");
    }
    assert!(medi_risk::ModelSet::load(&out).is_ok());
}

#[test]
fn seeded_runs_write_identical_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("pima.csv");
    fs::write(&csv, PIMA_SAMPLE).unwrap();

    let mut outputs = Vec::new();
    for run in ["a", "b"] {
        let out = dir.path().join(run);
        let status = Command::new(env!("CARGO_BIN_EXE_medi-train"))
            .arg("--source")
            .arg(&csv)
            .arg("--out-dir")
            .arg(&out)
            .args(["--seed", "42"])
            .status()
            .expect("spawn medi-train");
        assert!(status.success());
        outputs.push(fs::read(out.join("kidney_model.json")).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn unreadable_source_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_medi-train"))
        .arg("--source")
        .arg(dir.path().join("missing.csv"))
        .arg("--out-dir")
        .arg(dir.path())
        .status()
        .expect("spawn medi-train");
    assert_eq!(status.code(), Some(1));
    assert!(!dir.path().join("diabetes_model.json").exists());
}
