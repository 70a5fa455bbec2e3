//! The shipped line-network demo analyzes cleanly from a scratch copy.

use std::fs;
use std::path::{Path, PathBuf};

use cf_app::*;

fn copy_demo(dest: &Path) {
    let demo = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/line_network");
    fs::create_dir_all(dest.join("recorded")).unwrap();
    fs::copy(demo.join("project.yaml"), dest.join("project.yaml")).unwrap();
    for entry in fs::read_dir(demo.join("recorded")).unwrap() {
        let path = entry.unwrap().path();
        fs::copy(&path, dest.join("recorded").join(path.file_name().unwrap())).unwrap();
    }
}

#[test]
fn demo_detection_follows_the_line() {
    let dir = std::env::temp_dir().join(format!("cf_app_demo_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    copy_demo(&dir);
    let project_path = dir.join("project.yaml");

    let project = load_project(&project_path).unwrap();
    let net = summarize_network(&project);
    assert_eq!(net.junctions, 3);
    assert_eq!(net.injection_nodes, 3);

    let run = ensure_run(&RunRequest {
        project_path: &project_path,
        mode: RunMode::Simulate,
        options: RunOptions::default(),
    })
    .unwrap();
    let (_, tables) = load_run(&project_path, &run.run_id).unwrap();

    let det = &tables.detection;
    assert_eq!(det.get("J1", "J1").unwrap().time_s, 0.0);
    assert_eq!(det.get("J2", "J1").unwrap().time_s, 3600.0);
    assert_eq!(det.get("J3", "J1").unwrap().time_s, 7200.0);
    assert_eq!(det.get("J1", "J3").unwrap().time_s, 14_400.0);
}
