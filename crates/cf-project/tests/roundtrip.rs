use cf_project::schema::*;
use cf_project::{load, load_yaml, save_json, save_yaml, validate_project};

fn two_junction_project() -> Project {
    Project {
        version: 1,
        name: "Two junctions".to_string(),
        network: NetworkDef {
            id: "net1".to_string(),
            inp_path: Some("networks/net1.inp".into()),
            nodes: vec![
                NodeDef {
                    id: "J1".to_string(),
                    kind: NodeKind::Junction,
                },
                NodeDef {
                    id: "J2".to_string(),
                    kind: NodeKind::Junction,
                },
                NodeDef {
                    id: "R1".to_string(),
                    kind: NodeKind::Reservoir,
                },
            ],
        },
        simulation: SimulationDef::default(),
        analysis: AnalysisDef {
            sensitivity: 0.5,
            non_detection_s: None,
            injection_nodes: Some(vec!["J1".to_string()]),
            volume_method: VolumeMethodDef::Integrated,
        },
    }
}

#[test]
fn roundtrip_yaml_project() {
    let project = two_junction_project();
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("cf_project_roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_project_by_extension() {
    let project = two_junction_project();

    let path = std::env::temp_dir().join("cf_project_roundtrip.json");
    save_json(&path, &project).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn minimal_yaml_fills_defaults() {
    let yaml = r#"
version: 0
name: minimal
network:
  id: net
  nodes:
    - id: J1
    - id: T1
      kind: tank
"#;
    let path = std::env::temp_dir().join("cf_project_minimal.yaml");
    std::fs::write(&path, yaml).unwrap();
    let project = load_yaml(&path).unwrap();

    assert_eq!(project.version, 1);
    assert_eq!(project.simulation.duration_s, 86_400);
    assert_eq!(project.simulation.timestep_s, 3_600);
    assert_eq!(project.simulation.engine.file_prefix, "temp");
    assert_eq!(project.simulation.engine.version, EngineVersionDef::V2_2);
    assert_eq!(project.analysis.sensitivity, 1.0);
    assert_eq!(project.analysis.volume_method, VolumeMethodDef::DetectionStep);
    assert_eq!(project.network.nodes[0].kind, NodeKind::Junction);
    assert_eq!(project.network.nodes[1].kind, NodeKind::Tank);
}

#[test]
fn engine_version_uses_dotted_names() {
    let yaml = r#"
version: 1
name: v20
network:
  id: net
  nodes:
    - id: J1
simulation:
  engine:
    version: "2.0"
    convergence_error: true
"#;
    let project: Project = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(project.simulation.engine.version, EngineVersionDef::V2_0);
    assert!(project.simulation.engine.convergence_error);
}
