use crate::xml::PathQuery;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Chart measures whose name contains this are per-dimension splits, not rows.
pub const SPLIT_BY: &str = "split by";

const TRANSACTION_STEPS: &[&str] = &["dashboardreport", "data", "businesstransactionsdashlet", "transactions", "transaction"];
const MEASURE_STEPS: &[&str] = &["dashboardreport", "data", "chartdashlet", "measures", "measure"];

/// Which dashlet of the report holds the rows being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum, strum::Display)]
pub enum DashboardKind {
    /// Business transaction table; rows are `transaction` elements grouped by `@group`
    #[serde(rename = "business-transaction", alias = "Business Transaction")]
    #[value(name = "business-transaction")]
    #[strum(serialize = "business-transaction")]
    BusinessTransaction,

    /// Chart table; rows are `measure` elements grouped by `@measure`
    #[serde(rename = "chart", alias = "Chart")]
    #[value(name = "chart")]
    #[strum(serialize = "chart")]
    Chart,
}

impl DashboardKind {
    /// Attribute carrying the composite group identity.
    #[must_use]
    pub const fn group_attribute(self) -> &'static str {
        match self {
            Self::BusinessTransaction => "group",
            Self::Chart => "measure",
        }
    }

    /// Separator between fields of the group attribute; the first field is the label.
    #[must_use]
    pub const fn delimiter(self) -> char {
        match self {
            Self::BusinessTransaction => ';',
            Self::Chart => ',',
        }
    }

    /// Elements that count as rows.
    #[must_use]
    pub fn row_query(self) -> PathQuery {
        match self {
            Self::BusinessTransaction => PathQuery::from_steps(TRANSACTION_STEPS),
            Self::Chart => PathQuery::from_steps(MEASURE_STEPS).not_contains(self.group_attribute(), SPLIT_BY),
        }
    }

    /// Elements whose group attribute contains `label`.
    ///
    /// Substring semantics are intended: the attribute is composite, so a label can
    /// also match elements of a longer label that contains it.
    #[must_use]
    pub fn label_query(self, label: &str) -> PathQuery {
        let steps = match self {
            Self::BusinessTransaction => TRANSACTION_STEPS,
            Self::Chart => MEASURE_STEPS,
        };

        PathQuery::from_steps(steps).contains(self.group_attribute(), label)
    }
}
