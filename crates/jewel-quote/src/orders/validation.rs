use std::fmt;

use serde::Serialize;

use super::domain::OrderSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationProblem {
    MissingName,
    MissingEmail,
    InvalidEmail,
    NoJewelryType,
    NoMetal,
    ZeroQuantity,
}

impl ValidationProblem {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingName => "name is required",
            Self::MissingEmail => "email is required",
            Self::InvalidEmail => "email address looks invalid",
            Self::NoJewelryType => "select at least one jewelry type",
            Self::NoMetal => "select a metal type",
            Self::ZeroQuantity => "quantity must be at least 1",
        }
    }
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Every problem found in a submission, reported together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order submission incomplete: {}", join_problems(.problems))]
pub struct OrderValidationError {
    pub problems: Vec<ValidationProblem>,
}

fn join_problems(problems: &[ValidationProblem]) -> String {
    problems
        .iter()
        .map(|problem| problem.message())
        .collect::<Vec<_>>()
        .join("; ")
}

fn plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

pub fn validate_submission(submission: &OrderSubmission) -> Result<(), OrderValidationError> {
    let mut problems = Vec::new();
    let contact = &submission.contact;
    let design = &submission.design;

    if contact.name.trim().is_empty() {
        problems.push(ValidationProblem::MissingName);
    }

    let email = contact.email.trim();
    if email.is_empty() {
        problems.push(ValidationProblem::MissingEmail);
    } else if !plausible_email(email) {
        problems.push(ValidationProblem::InvalidEmail);
    }

    if design.jewelry_types.is_empty() {
        problems.push(ValidationProblem::NoJewelryType);
    }
    if design.metal_type.is_none() {
        problems.push(ValidationProblem::NoMetal);
    }
    if design.quantity == 0 {
        problems.push(ValidationProblem::ZeroQuantity);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(OrderValidationError { problems })
    }
}
