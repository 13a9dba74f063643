// Catalog loader: parses `soko.yml` into the domain's `Flow` values.

mod document;
mod schedule_grammar;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use document::{Document, FlowDoc, ScheduleDoc};
use oj_core::domain::{Flow, Schedule, Step};
use schedule_grammar::{parse_day_field, parse_numeric_field};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parses a `soko.yml` document's text into a list of flows, namespaced as
/// `"{project_name}.{local_key}"`.
pub fn parse(yaml: &str) -> Result<Vec<Flow>, CatalogError> {
    let document: Document = serde_yaml::from_str(yaml)?;
    Ok(to_flows(document))
}

/// Reads and parses a catalog file from disk.
pub async fn load(path: impl AsRef<Path>) -> Result<Vec<Flow>, CatalogError> {
    let path = path.as_ref();
    let contents =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.display().to_string(),
                source,
            })?;
    debug!(path = %path.display(), "loaded catalog file");
    parse(&contents)
}

fn to_flows(document: Document) -> Vec<Flow> {
    document
        .flows
        .into_iter()
        .map(|(key, flow_doc)| {
            let id = format!("{}.{}", document.name, key);
            to_flow(id, flow_doc)
        })
        .collect()
}

fn to_flow(id: String, flow_doc: FlowDoc) -> Flow {
    let steps = flow_doc
        .steps
        .into_iter()
        .map(|s| Step::new(s.cmd))
        .collect();
    let schedule = flow_doc.schedule.map(to_schedule);
    Flow::new(id, steps, schedule)
}

fn to_schedule(doc: ScheduleDoc) -> Schedule {
    Schedule {
        minutes: doc.minute.as_deref().and_then(parse_numeric_field),
        hours: doc.hour.as_deref().and_then(parse_numeric_field),
        days: doc.day.as_deref().and_then(parse_day_field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_project() {
        let yaml = r#"
name: p
flows:
  build:
    steps:
      - cmd: ["cargo", "build"]
      - cmd: ["cargo", "test"]
"#;
        let flows = parse(yaml).unwrap();
        assert_eq!(flows.len(), 1);
        let flow = &flows[0];
        assert_eq!(flow.id, "p.build");
        assert_eq!(flow.steps.len(), 2);
        assert_eq!(flow.steps[0].args, vec!["cargo", "build"]);
        assert!(flow.schedule.is_none());
    }

    #[test]
    fn parses_schedule_fields() {
        let yaml = r#"
name: p
flows:
  nightly:
    steps:
      - cmd: ["make", "release"]
    schedule:
      minute: "0"
      hour: "2"
      day: "*"
"#;
        let flows = parse(yaml).unwrap();
        let schedule = flows[0].schedule.as_ref().unwrap();
        assert_eq!(schedule.minutes, Some(vec![0]));
        assert_eq!(schedule.hours, Some(vec![2]));
        assert_eq!(schedule.days, None);
    }

    #[test]
    fn missing_flows_yields_empty_vec() {
        let yaml = "name: p\n";
        let flows = parse(yaml).unwrap();
        assert!(flows.is_empty());
    }

    #[test]
    fn malformed_yaml_errors() {
        let yaml = "not: [valid, yaml";
        assert!(parse(yaml).is_err());
    }
}
