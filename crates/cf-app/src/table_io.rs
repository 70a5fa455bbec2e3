//! CSV import and export of analysis tables.
//!
//! Formats (header row required on import):
//! - trace: `time,node,<inj_node_1>,...,<inj_node_n>`
//! - demand: `time,node,demand`
//! - detection: `node,inj_node,time,detected`
//! - volume: `node,inj_node,volume`

use std::path::Path;

use cf_analysis::SensorSummary;
use cf_core::{
    DemandRecord, DemandTable, DetectionTable, TraceRecord, TraceTable, VolumeTable,
};

use crate::error::{AppError, AppResult};

pub fn read_file(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn write_file(path: &Path, content: &str) -> AppResult<()> {
    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn parse_trace_csv(path: &Path, content: &str) -> AppResult<TraceTable> {
    let mut lines = data_lines(content);
    let (_, header) = lines.next().ok_or_else(|| parse_err(path, 1, "missing header"))?;
    let columns = split(header);
    if columns.len() < 3 || columns[0] != "time" || columns[1] != "node" {
        return Err(parse_err(
            path,
            1,
            "expected header `time,node,<inj_node>...`",
        ));
    }
    let inj_nodes: Vec<String> = columns[2..].iter().map(|c| c.to_string()).collect();

    let mut records = Vec::new();
    for (line, text) in lines {
        let fields = split(text);
        if fields.len() != columns.len() {
            return Err(parse_err(
                path,
                line,
                &format!("expected {} fields, found {}", columns.len(), fields.len()),
            ));
        }
        let concentrations = fields[2..]
            .iter()
            .map(|f| parse_f64(path, line, f))
            .collect::<AppResult<Vec<f64>>>()?;
        records.push(TraceRecord {
            time_s: parse_f64(path, line, fields[0])?,
            node: fields[1].to_string(),
            concentrations,
        });
    }
    Ok(TraceTable::new(inj_nodes, records)?)
}

pub fn parse_demand_csv(path: &Path, content: &str) -> AppResult<DemandTable> {
    let mut lines = data_lines(content);
    let (_, header) = lines.next().ok_or_else(|| parse_err(path, 1, "missing header"))?;
    if split(header) != ["time", "node", "demand"] {
        return Err(parse_err(path, 1, "expected header `time,node,demand`"));
    }

    let mut records = Vec::new();
    for (line, text) in lines {
        let fields = split(text);
        if fields.len() != 3 {
            return Err(parse_err(
                path,
                line,
                &format!("expected 3 fields, found {}", fields.len()),
            ));
        }
        records.push(DemandRecord {
            time_s: parse_f64(path, line, fields[0])?,
            node: fields[1].to_string(),
            demand: parse_f64(path, line, fields[2])?,
        });
    }
    Ok(DemandTable::new(records)?)
}

pub fn trace_to_csv(table: &TraceTable) -> String {
    let mut csv = String::from("time,node");
    for inj in table.inj_nodes() {
        csv.push(',');
        csv.push_str(inj);
    }
    csv.push('\n');
    for r in table.records() {
        csv.push_str(&format!("{},{}", r.time_s, r.node));
        for c in &r.concentrations {
            csv.push_str(&format!(",{}", c));
        }
        csv.push('\n');
    }
    csv
}

pub fn demand_to_csv(table: &DemandTable) -> String {
    let mut csv = String::from("time,node,demand\n");
    for r in table.records() {
        csv.push_str(&format!("{},{},{}\n", r.time_s, r.node, r.demand));
    }
    csv
}

pub fn detection_to_csv(table: &DetectionTable) -> String {
    let mut csv = String::from("node,inj_node,time,detected\n");
    for r in table.records() {
        csv.push_str(&format!("{},{},{},{}\n", r.node, r.inj_node, r.time_s, r.detected));
    }
    csv
}

pub fn volume_to_csv(table: &VolumeTable) -> String {
    let mut csv = String::from("node,inj_node,volume\n");
    for r in table.records() {
        csv.push_str(&format!("{},{},{}\n", r.node, r.inj_node, r.volume));
    }
    csv
}

pub fn summary_to_csv(rows: &[SensorSummary]) -> String {
    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    let mut csv = String::from(
        "node,scenarios,detected,detection_fraction,mean_detection_time_s,max_detection_time_s,mean_volume,max_volume\n",
    );
    for r in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            r.node,
            r.scenarios,
            r.detected,
            r.detection_fraction,
            opt(r.mean_detection_time_s),
            opt(r.max_detection_time_s),
            opt(r.mean_volume),
            opt(r.max_volume)
        ));
    }
    csv
}

/// Non-blank lines with 1-based line numbers.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
}

fn split(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn parse_f64(path: &Path, line: usize, field: &str) -> AppResult<f64> {
    field
        .parse::<f64>()
        .map_err(|e| parse_err(path, line, &format!("`{}`: {}", field, e)))
}

fn parse_err(path: &Path, line: usize, message: &str) -> AppError {
    AppError::TableParse {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "time,node,J1,J2\n0,J1,100,0\n0,J2,0,100\n\n3600,J1,100,25.5\n3600,J2,40,100\n";

    #[test]
    fn trace_csv_parses_injection_columns() {
        let table = parse_trace_csv(Path::new("trace.csv"), TRACE).unwrap();
        assert_eq!(table.inj_nodes(), &["J1".to_string(), "J2".to_string()]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.records()[2].concentrations, vec![100.0, 25.5]);
    }

    #[test]
    fn trace_csv_export_reparses() {
        let table = parse_trace_csv(Path::new("trace.csv"), TRACE).unwrap();
        let again = parse_trace_csv(Path::new("again.csv"), &trace_to_csv(&table)).unwrap();
        assert_eq!(table, again);
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_trace_csv(Path::new("t.csv"), "time,node,J1\n0,J1,abc\n").unwrap_err();
        assert!(matches!(err, AppError::TableParse { line: 2, .. }));
    }

    #[test]
    fn demand_header_is_checked() {
        assert!(parse_demand_csv(Path::new("d.csv"), "t,node,demand\n").is_err());
        let table =
            parse_demand_csv(Path::new("d.csv"), "time, node, demand\n0, J1, 0.5\n").unwrap();
        assert_eq!(table.index().get(0.0, "J1"), Some(0.5));
    }
}
