use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use schemars::JsonSchema;
use sched_core::{diagnose, validate};
use serde::Serialize;
use types::{Conflict, OptimizeRequest};

use super::{print_json, read_envelope};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Request document, or `-` to read stdin
    pub input: PathBuf,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
    /// Subjects the search cannot place; not fatal.
    pub warnings: Vec<Conflict>,
}

pub fn report(req: &OptimizeRequest) -> ValidationReport {
    let errors = match validate(req) {
        Ok(()) => Vec::new(),
        Err(e) => e.errors().to_vec(),
    };
    ValidationReport {
        ok: errors.is_empty(),
        errors,
        warnings: diagnose(req),
    }
}

pub fn handle(args: ValidateArgs) -> anyhow::Result<ExitCode> {
    let env = read_envelope(&args.input)?;
    let report = report(&env.request);
    print_json(&report, args.pretty)?;
    Ok(if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
