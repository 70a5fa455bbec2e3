//! Translate project definitions into engine and analysis settings.

use std::path::{Path, PathBuf};

use cf_analysis::{DetectionOptions, VolumeMethod};
use cf_project::schema::{EngineVersionDef, NodeKind, Project, VolumeMethodDef};
use cf_sim::{EngineVersion, NetworkModel, NetworkNode, NetworkNodeKind, RunOptions, SimSettings};

pub fn network_model(project: &Project, project_dir: &Path) -> NetworkModel {
    NetworkModel {
        name: project.network.id.clone(),
        inp_path: project
            .network
            .inp_path
            .as_ref()
            .map(|p| resolve(project_dir, p)),
        nodes: project
            .network
            .nodes
            .iter()
            .map(|n| NetworkNode {
                id: n.id.clone(),
                kind: match n.kind {
                    NodeKind::Junction => NetworkNodeKind::Junction,
                    NodeKind::Tank => NetworkNodeKind::Tank,
                    NodeKind::Reservoir => NetworkNodeKind::Reservoir,
                },
            })
            .collect(),
    }
}

pub fn sim_settings(project: &Project) -> SimSettings {
    SimSettings::new(project.simulation.duration_s, project.simulation.timestep_s)
}

pub fn engine_options(project: &Project, project_dir: &Path) -> RunOptions {
    let engine = &project.simulation.engine;
    RunOptions {
        file_prefix: engine.file_prefix.clone(),
        use_hyd: engine.use_hyd,
        save_hyd: engine.save_hyd,
        hydfile: engine.hydfile.as_ref().map(|p| resolve(project_dir, p)),
        version: match engine.version {
            EngineVersionDef::V2_0 => EngineVersion::V2_0,
            EngineVersionDef::V2_2 => EngineVersion::V2_2,
        },
        convergence_error: engine.convergence_error,
    }
}

pub fn detection_options(project: &Project) -> DetectionOptions {
    DetectionOptions {
        sensitivity: project.analysis.sensitivity,
        non_detection_s: project.analysis.non_detection_s,
    }
}

pub fn volume_method(project: &Project) -> VolumeMethod {
    match project.analysis.volume_method {
        VolumeMethodDef::Integrated => VolumeMethod::Integrated,
        VolumeMethodDef::DetectionStep => VolumeMethod::DetectionStep,
    }
}

/// Relative paths in a project are relative to the project file's directory.
pub fn resolve(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_project::schema::*;

    #[test]
    fn project_settings_translate() {
        let mut project = Project {
            version: 1,
            name: "p".into(),
            network: NetworkDef {
                id: "net".into(),
                inp_path: Some("net.inp".into()),
                nodes: vec![
                    NodeDef {
                        id: "J1".into(),
                        kind: NodeKind::Junction,
                    },
                    NodeDef {
                        id: "T1".into(),
                        kind: NodeKind::Tank,
                    },
                ],
            },
            simulation: SimulationDef::default(),
            analysis: AnalysisDef::default(),
        };
        project.simulation.engine.version = EngineVersionDef::V2_0;
        project.analysis.volume_method = VolumeMethodDef::Integrated;

        let dir = Path::new("/projects/a");
        let net = network_model(&project, dir);
        assert_eq!(net.junction_names(), vec!["J1"]);
        assert_eq!(net.inp_path, Some(PathBuf::from("/projects/a/net.inp")));

        let opts = engine_options(&project, dir);
        assert_eq!(opts.version, EngineVersion::V2_0);
        assert_eq!(opts.file_prefix, "temp");

        assert_eq!(sim_settings(&project).timestep_s, 3600);
        assert_eq!(detection_options(&project).sensitivity, 1.0);
        assert_eq!(volume_method(&project), VolumeMethod::Integrated);
    }
}
