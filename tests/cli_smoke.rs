use std::path::PathBuf;
use std::process::Command;

fn bin() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_scorereel")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target").join("debug").join("scorereel"))
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("top_goals.json")
}

#[test]
fn cli_validate_accepts_fixture() {
    let out = Command::new(bin())
        .args(["validate", "--in"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Thierry Henry"));
}

#[test]
fn cli_validate_rejects_broken_roster() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"[{"rank": 1, "name": "Nobody"}]"#).unwrap();

    let out = Command::new(bin())
        .args(["validate", "--in"])
        .arg(&bad)
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn cli_frame_emits_scene_json() {
    let out = Command::new(bin())
        .args(["frame", "--frame", "200", "--in"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let scene: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(scene["frame"], 200);
    assert_eq!(scene["cards"].as_array().unwrap().len(), 6);
}

#[test]
fn cli_timeline_reports_windows() {
    let out = Command::new(bin())
        .args(["timeline", "--in"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(out.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let windows = summary["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[2]["name"], "outro");
    assert_eq!(windows[2]["range"]["start"], 12_090);
}
