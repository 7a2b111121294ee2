use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How rows of a report are turned into measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum, strum::Display)]
pub enum CountingMode {
    /// Count every qualifying row
    #[serde(rename = "count-rows", alias = "count rows")]
    #[value(name = "count-rows")]
    #[strum(serialize = "count-rows")]
    RowCount,

    /// Count distinct group labels
    #[serde(rename = "count-unique-rows", alias = "count unique rows")]
    #[value(name = "count-unique-rows")]
    #[strum(serialize = "count-unique-rows")]
    UniqueRowCount,

    /// Count rows per distinct group label, one measurement per label
    #[serde(rename = "count-instances", alias = "count instances")]
    #[value(name = "count-instances")]
    #[strum(serialize = "count-instances")]
    InstancesPerUniqueRow,
}
