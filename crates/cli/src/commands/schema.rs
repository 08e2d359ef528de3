use std::process::ExitCode;

use clap::{Args, ValueEnum};
use schemars::schema::RootSchema;
use schemars::schema_for;
use types::{OptimizeOutcome, SolveEnvelope, TimetableOption};

use super::print_json;
use super::validate::ValidationReport;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Document {
    /// Input of `solve` and `validate`
    #[default]
    Request,
    /// Output of `solve`
    Outcome,
    /// Output of `solve --options`
    Options,
    /// Output of `validate`
    Report,
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value_t = Document::Request)]
    pub document: Document,
}

pub fn schema(doc: Document) -> RootSchema {
    match doc {
        Document::Request => schema_for!(SolveEnvelope),
        Document::Outcome => schema_for!(OptimizeOutcome),
        Document::Options => schema_for!(Vec<TimetableOption>),
        Document::Report => schema_for!(ValidationReport),
    }
}

pub fn handle(args: SchemaArgs) -> anyhow::Result<ExitCode> {
    print_json(&schema(args.document), true)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_schema_lists_top_level_fields() {
        let json = serde_json::to_value(schema(Document::Request)).unwrap();
        let props = json["properties"].as_object().unwrap();
        for field in ["constraints", "subjects", "faculty", "classrooms", "params"] {
            assert!(props.contains_key(field), "missing {field}");
        }
    }

    #[test]
    fn time_fields_are_strings() {
        let json = serde_json::to_value(schema(Document::Outcome)).unwrap();
        assert_eq!(json["definitions"]["TimeOfDay"]["type"], "string");
    }
}
