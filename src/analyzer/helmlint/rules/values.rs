//! values.yaml rules.

use crate::analyzer::helmlint::parser::values::ValuesFile;
use crate::analyzer::helmlint::rules::{LintContext, Rule};
use crate::analyzer::helmlint::types::{LintMessage, Severity};

const VALUES_FILE: &str = "values.yaml";

/// Get all values.yaml rules.
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(ValuesFilePresent), Box::new(ValuesFileParseable)]
}

pub struct ValuesFilePresent;

impl Rule for ValuesFilePresent {
    fn name(&self) -> &'static str {
        "values-present"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        match ctx.values_file {
            ValuesFile::Missing => vec![LintMessage::info(VALUES_FILE, "file does not exist")],
            _ => vec![],
        }
    }
}

/// values.yaml must hold a YAML mapping.
pub struct ValuesFileParseable;

impl Rule for ValuesFileParseable {
    fn name(&self) -> &'static str {
        "values-parseable"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext) -> Vec<LintMessage> {
        match ctx.values_file {
            ValuesFile::Invalid(reason) => vec![LintMessage::error(
                VALUES_FILE,
                format!("unable to parse YAML: {}", reason),
            )],
            _ => vec![],
        }
    }
}
