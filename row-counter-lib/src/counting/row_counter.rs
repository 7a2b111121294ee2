use super::{CountingMode, DashboardKind, MeasurementPoint, extract_group_label};
use crate::xml::{ParsedReport, as_count};
use roxmltree::Node;
use std::collections::BTreeSet;

pub(super) const LOG_TARGET: &str = "   counter";

/// Count the rows of `report` according to `mode`.
///
/// `RowCount` and `UniqueRowCount` always yield exactly one point. `InstancesPerUniqueRow`
/// yields one labeled point per distinct group label, in label order. A report without
/// qualifying rows yields a single zero point in every mode.
#[must_use]
pub fn count_rows(report: &ParsedReport<'_>, mode: CountingMode, kind: DashboardKind) -> Vec<MeasurementPoint> {
    log::debug!(target: LOG_TARGET, "Counting {kind} rows with mode {mode}");

    match mode {
        CountingMode::RowCount => {
            let count = report.evaluate_count(&kind.row_query());
            log::debug!(target: LOG_TARGET, "Row count: {count}");
            vec![MeasurementPoint::total(count)]
        }

        CountingMode::UniqueRowCount => {
            let nodes = report.evaluate_nodes(&kind.row_query());
            log::debug!(target: LOG_TARGET, "Rows matched: {}", nodes.len());
            if nodes.is_empty() {
                return vec![MeasurementPoint::zero()];
            }

            let labels = distinct_labels(&nodes, kind);
            log::debug!(target: LOG_TARGET, "Number of unique rows: {}", labels.len());
            vec![MeasurementPoint::total(as_count(labels.len()))]
        }

        CountingMode::InstancesPerUniqueRow => {
            let nodes = report.evaluate_nodes(&kind.row_query());
            log::debug!(target: LOG_TARGET, "Rows matched: {}", nodes.len());
            if nodes.is_empty() {
                return vec![MeasurementPoint::zero()];
            }

            let labels = distinct_labels(&nodes, kind);
            log::debug!(target: LOG_TARGET, "Number of unique rows: {}", labels.len());

            labels
                .into_iter()
                .map(|label| {
                    let count = report.evaluate_count(&kind.label_query(label));
                    log::trace!(target: LOG_TARGET, "Instances of '{label}': {count}");
                    MeasurementPoint::labeled(label, count)
                })
                .collect()
        }
    }
}

/// Distinct group labels of `nodes`; elements without a usable label are skipped.
fn distinct_labels<'a>(nodes: &[Node<'a, '_>], kind: DashboardKind) -> BTreeSet<&'a str> {
    let attribute = kind.group_attribute();

    nodes
        .iter()
        .filter_map(|node| {
            let Some(raw) = node.attribute(attribute) else {
                log::warn!(target: LOG_TARGET, "Row has no '{attribute}' attribute and will be ignored");
                return None;
            };

            let label = extract_group_label(raw, attribute, kind.delimiter());
            if label.is_none() {
                log::warn!(target: LOG_TARGET, "Row '{raw}' has an empty group label and will be ignored");
            }

            label
        })
        .collect()
}
