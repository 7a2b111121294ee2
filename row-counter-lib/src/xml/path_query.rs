use core::fmt;
use core::str::FromStr;
use roxmltree::Node;
use thiserror::Error;

/// Errors produced when a textual path expression falls outside the supported shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("path expression is empty")]
    Empty,

    #[error("invalid path step '{0}'")]
    InvalidStep(String),

    #[error("unsupported predicate '{0}', expected contains(@attr, 'text') or not(contains(@attr, 'text'))")]
    UnsupportedPredicate(String),
}

/// Attribute test applied to the elements selected by the last step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Contains { attribute: String, needle: String },
    NotContains { attribute: String, needle: String },
}

impl Predicate {
    /// Evaluate against one element with `XPath` semantics: a missing attribute never contains anything.
    #[must_use]
    pub fn matches(&self, node: Node<'_, '_>) -> bool {
        match self {
            Self::Contains { attribute, needle } => node.attribute(attribute.as_str()).is_some_and(|v| v.contains(needle.as_str())),
            Self::NotContains { attribute, needle } => !node.attribute(attribute.as_str()).is_some_and(|v| v.contains(needle.as_str())),
        }
    }
}

/// A child-axis element path with an optional attribute predicate on the final step.
///
/// This is the only query shape reports need, e.g.
/// `dashboardreport/data/chartdashlet/measures/measure[not(contains(@measure, 'split by'))]`.
/// The first step must name the document's root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    steps: Vec<String>,
    predicate: Option<Predicate>,
}

impl PathQuery {
    /// Build a query from element names without going through the textual form.
    #[must_use]
    pub fn from_steps(steps: &[&str]) -> Self {
        Self {
            steps: steps.iter().map(|s| (*s).to_string()).collect(),
            predicate: None,
        }
    }

    /// Keep only elements whose `attribute` contains `needle`.
    #[must_use]
    pub fn contains(mut self, attribute: impl Into<String>, needle: impl Into<String>) -> Self {
        self.predicate = Some(Predicate::Contains {
            attribute: attribute.into(),
            needle: needle.into(),
        });
        self
    }

    /// Keep only elements whose `attribute` does not contain `needle` (or lack it).
    #[must_use]
    pub fn not_contains(mut self, attribute: impl Into<String>, needle: impl Into<String>) -> Self {
        self.predicate = Some(Predicate::NotContains {
            attribute: attribute.into(),
            needle: needle.into(),
        });
        self
    }

    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Parse the textual form.
    pub fn parse(expr: &str) -> Result<Self, QueryError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(QueryError::Empty);
        }

        let (path, predicate) = match expr.split_once('[') {
            Some((path, rest)) => {
                let body = rest
                    .strip_suffix(']')
                    .ok_or_else(|| QueryError::UnsupportedPredicate(format!("[{rest}")))?;
                (path, Some(parse_predicate(body)?))
            }
            None => (expr, None),
        };

        let path = path.trim().strip_prefix('/').unwrap_or(path.trim());
        if path.is_empty() {
            return Err(QueryError::Empty);
        }

        let steps = path
            .split('/')
            .map(|step| {
                if is_valid_name(step) {
                    Ok(step.to_string())
                } else {
                    Err(QueryError::InvalidStep(step.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { steps, predicate })
    }
}

impl FromStr for PathQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.steps.join("/"))?;
        match &self.predicate {
            Some(Predicate::Contains { attribute, needle }) => write!(f, "[contains(@{attribute}, '{needle}')]"),
            Some(Predicate::NotContains { attribute, needle }) => write!(f, "[not(contains(@{attribute}, '{needle}'))]"),
            None => Ok(()),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

fn parse_predicate(body: &str) -> Result<Predicate, QueryError> {
    let unsupported = || QueryError::UnsupportedPredicate(body.to_string());
    let trimmed = body.trim();

    let (negated, call) = match trimmed.strip_prefix("not(").and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    let args = call
        .strip_prefix("contains(")
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(unsupported)?;

    let (attribute, needle) = args.split_once(',').ok_or_else(unsupported)?;
    let attribute = attribute.trim().strip_prefix('@').ok_or_else(unsupported)?;
    if !is_valid_name(attribute) {
        return Err(unsupported());
    }

    let needle = needle.trim();
    let needle = needle
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| needle.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .ok_or_else(unsupported)?;

    let (attribute, needle) = (attribute.to_string(), needle.to_string());
    Ok(if negated {
        Predicate::NotContains { attribute, needle }
    } else {
        Predicate::Contains { attribute, needle }
    })
}
