//! Content addressing for deployment documents
//!
//! Builds the initial document for a deployment and finds/rewrites a single
//! step entry inside it. Steps are addressed by structured fields
//! (environment name, then step name), never by matching rendered text.
//!
//! All functions are pure: they borrow the input document and return a new one.

use std::collections::HashSet;
use std::ops::Range;

use crate::domain::entities::{Document, Section};
use crate::error::{NotifyError, NotifyResult};

/// Banner text used when the caller doesn't supply one
pub const DEFAULT_BANNER: &str = "A deployment has been started";

/// Initial state used when the caller doesn't supply one
pub const DEFAULT_INITIAL_STATE: &str = "Not started";

/// Build the initial document for a deployment.
///
/// Layout: one banner, then per environment a header followed by every step.
/// With no environments the steps form a single implicit scope.
pub fn render(
    banner: &str,
    environments: &[String],
    steps: &[String],
    initial_state: &str,
) -> NotifyResult<Document> {
    if banner.trim().is_empty() {
        return Err(NotifyError::config("banner text must not be empty"));
    }
    validate_steps(steps)?;
    validate_environments(environments)?;

    let step_entries = || {
        steps
            .iter()
            .map(|step| Section::step_entry(step.as_str(), initial_state))
    };

    let mut sections = vec![Section::banner(banner)];
    if environments.is_empty() {
        sections.extend(step_entries());
    } else {
        for environment in environments {
            sections.push(Section::environment_header(environment.as_str()));
            sections.extend(step_entries());
        }
    }

    Ok(Document::new(sections))
}

/// Index of the step entry for `step`, optionally restricted to one
/// environment scope. First match wins.
pub fn locate(document: &Document, environment: Option<&str>, step: &str) -> NotifyResult<usize> {
    let sections = document.sections();
    let not_found = || NotifyError::StepNotFound {
        step: step.to_string(),
        environment: environment.map(str::to_string),
    };

    let range = match environment {
        Some(environment) => scope_range(sections, environment).ok_or_else(not_found)?,
        None => 0..sections.len(),
    };

    sections[range.clone()]
        .iter()
        .position(|section| section.step_name() == Some(step))
        .map(|offset| range.start + offset)
        .ok_or_else(not_found)
}

/// Copy of `document` with the located step's state replaced.
pub fn set_state(
    document: &Document,
    environment: Option<&str>,
    step: &str,
    new_state: &str,
) -> NotifyResult<Document> {
    let index = locate(document, environment, step)?;

    let mut updated = document.clone();
    if let Some(Section::StepEntry { state, .. }) = updated.sections_mut().get_mut(index) {
        *state = new_state.to_string();
    }
    Ok(updated)
}

/// Copy of `document` with the banner text replaced.
///
/// A document without a banner gets one inserted at the top.
pub fn set_banner(document: &Document, text: &str) -> NotifyResult<Document> {
    if text.trim().is_empty() {
        return Err(NotifyError::config("banner text must not be empty"));
    }

    let mut updated = document.clone();
    let sections = updated.sections_mut();
    match sections
        .iter()
        .position(|section| matches!(section, Section::Banner { .. }))
    {
        Some(index) => sections[index] = Section::banner(text),
        None => sections.insert(0, Section::banner(text)),
    }
    Ok(updated)
}

/// Half-open range of sections belonging to `environment`, header excluded.
fn scope_range(sections: &[Section], environment: &str) -> Option<Range<usize>> {
    let header = sections.iter().position(
        |section| matches!(section, Section::EnvironmentHeader { name } if name == environment),
    )?;
    let start = header + 1;
    let end = sections[start..]
        .iter()
        .position(Section::is_environment_header)
        .map_or(sections.len(), |offset| start + offset);
    Some(start..end)
}

fn validate_steps(steps: &[String]) -> NotifyResult<()> {
    if steps.is_empty() {
        return Err(NotifyError::config("at least one step is required"));
    }

    let mut seen = HashSet::new();
    for step in steps {
        if step.trim().is_empty() {
            return Err(NotifyError::config("step names must not be empty"));
        }
        // `*` delimits the step name in the rendered line
        if step.contains('*') || step.contains('\n') {
            return Err(NotifyError::config(format!(
                "step name {step:?} must not contain '*' or line breaks"
            )));
        }
        if !seen.insert(step.as_str()) {
            return Err(NotifyError::config(format!(
                "duplicate step '{step}' in one scope"
            )));
        }
    }
    Ok(())
}

fn validate_environments(environments: &[String]) -> NotifyResult<()> {
    let mut seen = HashSet::new();
    for environment in environments {
        if environment.trim().is_empty() || environment.contains('\n') {
            return Err(NotifyError::config(format!(
                "environment name {environment:?} must be non-empty and single-line"
            )));
        }
        if !seen.insert(environment.as_str()) {
            return Err(NotifyError::config(format!(
                "duplicate environment '{environment}'"
            )));
        }
    }
    Ok(())
}
