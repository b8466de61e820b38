//! Subcommand handlers
//!
//! Handlers print to stdout and return the process exit code. Problems with
//! the invocation itself (unreadable files, bad flags) are `Err` and exit 2.

use anyhow::{Context, bail};
use clap::ValueEnum;
use hearth_model::{MaintainableType, MaintenanceLog};
use hearth_schema::{Question, SubtypeRegistry, extract_questions};
use hearth_validation::{OnboardingSession, ValidationEngine, ValidationReporter, ValidationResult};
use serde::Serialize;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

/// Validation failed; the input itself was readable
pub const EXIT_INVALID: u8 = 1;

/// Which schema a file is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    /// Maintainable item
    Item,
    Property,
    /// Maintenance log entry
    Log,
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn report<T: Serialize>(result: &ValidationResult<T>, label: &str, as_json: bool) -> anyhow::Result<ExitCode> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        match result {
            ValidationResult::Success(_) => println!("Valid {label}"),
            ValidationResult::Failure(errors) => {
                print!("Invalid {label}: {}", ValidationReporter::new().render_text(errors));
            }
        }
    }
    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}

/// `hearth validate`
pub fn validate(
    engine: &ValidationEngine<'_>,
    input: &Path,
    kind: RecordKind,
    subtype: Option<&str>,
    as_json: bool,
) -> anyhow::Result<ExitCode> {
    let data = read_json(input)?;
    info!("Validating {} as {:?}", input.display(), kind);

    match (kind, subtype) {
        (RecordKind::Item, Some(subtype)) => {
            report(&engine.validate_typed(&data, subtype), &format!("{subtype} item"), as_json)
        }
        (RecordKind::Item, None) => report(&engine.validate_base(&data), "item", as_json),
        (RecordKind::Property, None) => report(&engine.validate_property(&data), "property", as_json),
        (RecordKind::Log, None) => {
            let result = engine.validate_maintenance_log(&data);
            let label = match result.data().and_then(MaintenanceLog::days_until_due) {
                Some(days) => format!("maintenance log (next due {days} day(s) later)"),
                None => "maintenance log".to_string(),
            };
            report(&result, &label, as_json)
        }
        (_, Some(_)) => bail!("--subtype only applies to --kind item"),
    }
}

/// `hearth subtypes`
pub fn subtypes(registry: &SubtypeRegistry, maintainable_type: Option<&str>) -> anyhow::Result<ExitCode> {
    let entries = match maintainable_type {
        Some(name) => registry.list_by_type(name.parse::<MaintainableType>()?),
        None => registry.list_all().iter().collect(),
    };
    for entry in entries {
        println!("{}\t{}", entry.subtype(), entry.maintainable_type());
    }
    Ok(ExitCode::SUCCESS)
}

fn question_json(question: &Question) -> anyhow::Result<Value> {
    Ok(json!({
        "field": question.field,
        "inputKind": question.input_kind().as_str(),
        "description": question.schema.description(),
        "metadata": serde_json::to_value(&question.metadata)?,
    }))
}

fn describe(question: &Question) -> String {
    let meta = &question.metadata;
    let mut line = format!(
        "{:>3}. {} [{}] {}",
        meta.order,
        question.field,
        question.input_kind().as_str(),
        meta.question
    );
    if meta.required {
        line.push_str(" (required)");
    }
    if let Some(description) = question.schema.description() {
        line.push_str(&format!("\n       {description}"));
    }
    if let Some(options) = &meta.options {
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        line.push_str(&format!("\n       options: {}", values.join(", ")));
    }
    if let Some(rule) = &meta.conditional {
        line.push_str(&format!("\n       shown when {} is {}", rule.field, rule.value));
    }
    line
}

/// `hearth questions`
pub fn questions(registry: &SubtypeRegistry, subtype: &str, as_json: bool) -> anyhow::Result<ExitCode> {
    let questions = extract_questions(registry.resolve(subtype)?);
    debug!("Extracted {} questions for '{}'", questions.len(), subtype);

    if as_json {
        let list = questions
            .iter()
            .map(question_json)
            .collect::<anyhow::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for question in &questions {
            println!("{}", describe(question));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// `hearth onboard`: replay an answer file through an onboarding session
pub fn onboard(
    engine: &ValidationEngine<'_>,
    subtype: &str,
    answers_path: &Path,
    as_json: bool,
) -> anyhow::Result<ExitCode> {
    let answers = read_json(answers_path)?;
    let Some(answers) = answers.as_object() else {
        bail!("{} must contain a JSON object keyed by field path", answers_path.display());
    };

    let mut session = OnboardingSession::start(engine.registry(), subtype)?;
    while let Some(question) = session.current() {
        let field = question.field.clone();
        let step = match answers.get(&field) {
            Some(value) => session.answer(value.clone()),
            None => session.advance(),
        };
        if let Err(e) = step {
            eprintln!("{e}");
            return Ok(ExitCode::from(EXIT_INVALID));
        }
    }

    let result = session.submit(engine)?;
    report(&result, &format!("{subtype} item"), as_json)
}
