use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::{Result, SeedKind, SeederError};

const OPPORTUNITY_FIELDS: [&str; 7] = [
    "id",
    "title",
    "fund_provider",
    "sector",
    "amount_description",
    "location",
    "description",
];

const INVESTOR_FIELDS: [&str; 4] = ["id", "name", "investor_type", "description"];

pub struct SeedValidator;

impl SeedValidator {
    pub fn validate(kind: SeedKind, records: &[Value]) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if records.is_empty() {
            report.errors.push(format!("No {} records found", kind));
        }

        let mut ids = HashSet::new();
        for (idx, record) in records.iter().enumerate() {
            let Some(object) = record.as_object() else {
                report
                    .errors
                    .push(format!("Record {} is not a JSON object", idx + 1));
                continue;
            };

            let label = match object.get("id").and_then(Value::as_str) {
                Some(id) if !id.trim().is_empty() => {
                    if !ids.insert(id) {
                        report.errors.push(format!("Duplicate id: '{}'", id));
                    }
                    format!("'{}'", id)
                }
                _ => format!("#{}", idx + 1),
            };

            let required: &[&str] = match kind {
                SeedKind::Opportunities => &OPPORTUNITY_FIELDS,
                SeedKind::Investors => &INVESTOR_FIELDS,
            };
            for field in required {
                let present = object
                    .get(*field)
                    .and_then(Value::as_str)
                    .is_some_and(|v| !v.trim().is_empty());
                if !present {
                    report
                        .errors
                        .push(format!("Record {} is missing {}", label, field));
                }
            }

            match kind {
                SeedKind::Opportunities => {
                    let has_links = object
                        .get("relevant_links")
                        .and_then(Value::as_array)
                        .is_some_and(|links| !links.is_empty());
                    if !has_links {
                        report
                            .warnings
                            .push(format!("Opportunity {} has no relevant links", label));
                    }
                }
                SeedKind::Investors => {
                    Self::check_stages(object.get("stages"), &label, &mut report);
                    if object.get("website").and_then(Value::as_str).is_none() {
                        report
                            .warnings
                            .push(format!("Investor {} has no website", label));
                    }
                }
            }
        }

        if !report.errors.is_empty() {
            Err(SeederError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }

    fn check_stages(stages: Option<&Value>, label: &str, report: &mut ValidationReport) {
        let Some(stages) = stages.and_then(Value::as_array).filter(|s| !s.is_empty()) else {
            report
                .errors
                .push(format!("Investor {} must list at least one stage", label));
            return;
        };

        for stage in stages {
            let valid = stage.as_u64().is_some_and(|s| s <= 4);
            if !valid {
                report.errors.push(format!(
                    "Investor {} has invalid stage {}. Stages must be 0-4",
                    label, stage
                ));
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
