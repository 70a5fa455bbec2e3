use cf_project::schema::*;
use cf_project::{ValidationError, validate_project};

fn base_project() -> Project {
    Project {
        version: 1,
        name: "validate".to_string(),
        network: NetworkDef {
            id: "net".to_string(),
            inp_path: None,
            nodes: vec![
                NodeDef {
                    id: "J1".to_string(),
                    kind: NodeKind::Junction,
                },
                NodeDef {
                    id: "R1".to_string(),
                    kind: NodeKind::Reservoir,
                },
            ],
        },
        simulation: SimulationDef::default(),
        analysis: AnalysisDef::default(),
    }
}

#[test]
fn base_project_is_valid() {
    validate_project(&base_project()).unwrap();
}

#[test]
fn duplicate_node_ids_rejected() {
    let mut project = base_project();
    project.network.nodes.push(NodeDef {
        id: "J1".to_string(),
        kind: NodeKind::Tank,
    });
    let err = validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateId { .. }));
}

#[test]
fn unknown_injection_node_rejected() {
    let mut project = base_project();
    project.analysis.injection_nodes = Some(vec!["J9".to_string()]);
    let err = validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::MissingReference { ref id, .. } if id == "J9"));
}

#[test]
fn zero_timestep_rejected() {
    let mut project = base_project();
    project.simulation.timestep_s = 0;
    let err = validate_project(&project).unwrap_err();
    assert!(err.to_string().contains("timestep_s"));
}

#[test]
fn duration_shorter_than_timestep_rejected() {
    let mut project = base_project();
    project.simulation.duration_s = 600;
    let err = validate_project(&project).unwrap_err();
    assert!(err.to_string().contains("duration_s"));
}

#[test]
fn negative_sensitivity_rejected() {
    let mut project = base_project();
    project.analysis.sensitivity = -1.0;
    assert!(validate_project(&project).is_err());
}

#[test]
fn no_junctions_without_explicit_injection_nodes_rejected() {
    let mut project = base_project();
    project.network.nodes.retain(|n| n.kind != NodeKind::Junction);
    assert!(validate_project(&project).is_err());

    project.analysis.injection_nodes = Some(vec!["R1".to_string()]);
    validate_project(&project).unwrap();
}

#[test]
fn future_version_rejected() {
    let mut project = base_project();
    project.version = 99;
    let err = validate_project(&project).unwrap_err();
    assert!(matches!(err, ValidationError::UnsupportedVersion { version: 99 }));
}
