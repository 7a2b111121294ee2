use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Base of the report-creation REST resource.
pub const REPORT_RESOURCE: &str = "/rest/management/reports/create/";

/// Characters escaped in the report name, which forms a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped in timeframe and filter values embedded in the query string.
const QUERY_VALUE: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'&').add(b'<').add(b'>').add(b'+').add(b'%');

/// Restriction applied to the generated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Live data of one system profile (`source=live:`)
    SystemProfile,

    /// A single business transaction (`filter=bt:`)
    BusinessTransaction,

    /// Agents belonging to an agent group (`filter=ag:AgentGroups?`)
    AgentGroup,

    /// Agents whose name matches a pattern (`filter=ag:AgentsByPattern?`)
    AgentPattern { match_type: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    pub kind: FilterKind,
    pub value: String,
}

impl ReportFilter {
    #[must_use]
    pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
        Self { kind, value: value.into() }
    }

    fn query_segment(&self) -> String {
        let value = utf8_percent_encode(&self.value, QUERY_VALUE);
        match &self.kind {
            FilterKind::SystemProfile => format!("&source=live:{value}"),
            FilterKind::BusinessTransaction => format!("&filter=bt:{value}"),
            FilterKind::AgentGroup => format!("&filter=ag:AgentGroups?{value}"),
            FilterKind::AgentPattern { match_type } => {
                let match_type = utf8_percent_encode(match_type, QUERY_VALUE);
                format!("&filter=ag:AgentsByPattern?{value}@{match_type}")
            }
        }
    }
}

/// Everything that selects which report is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    report_name: String,
    timeframe: String,
    filters: Vec<ReportFilter>,
}

impl ReportQuery {
    #[must_use]
    pub fn new(report_name: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            report_name: report_name.into(),
            timeframe: timeframe.into(),
            filters: Vec::new(),
        }
    }

    /// Append a filter; filters appear in the request in the order they were added.
    #[must_use]
    pub fn with_filter(mut self, filter: ReportFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn report_name(&self) -> &str {
        &self.report_name
    }

    #[must_use]
    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    #[must_use]
    pub fn filters(&self) -> &[ReportFilter] {
        &self.filters
    }

    /// Path and query string of the report request.
    ///
    /// The result never contains a literal space.
    #[must_use]
    pub fn request_path(&self) -> String {
        let name = utf8_percent_encode(&self.report_name, PATH_SEGMENT);
        let timeframe = normalize_timeframe(&self.timeframe);
        let timeframe = utf8_percent_encode(&timeframe, QUERY_VALUE);

        let mut path = format!("{REPORT_RESOURCE}{name}?type=XML&format=XML+Export&filter=tf:OffsetTimeframe?{timeframe}");
        for filter in &self.filters {
            path.push_str(&filter.query_segment());
        }

        path.replace(' ', "%20")
    }
}

/// Turn a human timeframe such as `Last 30 Minutes` into the server's `LAST:30:MINUTES` form.
#[must_use]
pub fn normalize_timeframe(timeframe: &str) -> String {
    timeframe.trim().replace(' ', ":").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_timeframe() {
        assert_eq!(normalize_timeframe("Last 30 Minutes"), "LAST:30:MINUTES");
        assert_eq!(normalize_timeframe(" last 5 minutes "), "LAST:5:MINUTES");
        assert_eq!(normalize_timeframe("LAST:1:HOUR"), "LAST:1:HOUR");
    }

    #[test]
    fn test_request_path_without_filters() {
        let query = ReportQuery::new("Row Report", "Last 5 Minutes");
        assert_eq!(
            query.request_path(),
            "/rest/management/reports/create/Row%20Report?type=XML&format=XML+Export&filter=tf:OffsetTimeframe?LAST:5:MINUTES"
        );
    }

    #[test]
    fn test_request_path_filters_in_order() {
        let query = ReportQuery::new("BT", "Last 1 Hour")
            .with_filter(ReportFilter::new(FilterKind::SystemProfile, "easyTravel"))
            .with_filter(ReportFilter::new(FilterKind::BusinessTransaction, "Page Action"));

        assert_eq!(
            query.request_path(),
            "/rest/management/reports/create/BT?type=XML&format=XML+Export&filter=tf:OffsetTimeframe?LAST:1:HOUR\
             &source=live:easyTravel&filter=bt:Page%20Action"
        );
    }

    #[test]
    fn test_request_path_agent_filters() {
        let query = ReportQuery::new("BT", "Last 1 Hour")
            .with_filter(ReportFilter::new(FilterKind::AgentGroup, "Frontend"))
            .with_filter(ReportFilter::new(
                FilterKind::AgentPattern {
                    match_type: "Contains".to_string(),
                },
                "web",
            ));

        let path = query.request_path();
        assert!(path.ends_with("&filter=ag:AgentGroups?Frontend&filter=ag:AgentsByPattern?web@Contains"), "{path}");
    }

    #[test]
    fn test_request_path_escapes_name() {
        let query = ReportQuery::new("a/b?c#d", "Last 5 Minutes");
        let path = query.request_path();
        assert!(path.starts_with("/rest/management/reports/create/a%2Fb%3Fc%23d?type=XML"), "{path}");
    }

    #[test]
    fn test_request_path_escapes_filter_separators() {
        let query = ReportQuery::new("BT", "Last 5 Minutes").with_filter(ReportFilter::new(FilterKind::BusinessTransaction, "a&b#c"));
        assert!(query.request_path().ends_with("&filter=bt:a%26b%23c"));

        let query = ReportQuery::new("BT", "Last 5 Minutes").with_filter(ReportFilter::new(FilterKind::BusinessTransaction, "C++ Page 100%"));
        assert!(query.request_path().ends_with("&filter=bt:C%2B%2B%20Page%20100%25"));
    }

    #[test]
    fn test_request_path_has_no_spaces() {
        let query = ReportQuery::new("My Dashboard Name", "Last 2 Hours")
            .with_filter(ReportFilter::new(FilterKind::SystemProfile, "easy Travel"))
            .with_filter(ReportFilter::new(
                FilterKind::AgentPattern {
                    match_type: "Starts With".to_string(),
                },
                "web node",
            ));

        assert!(!query.request_path().contains(' '));
    }

    #[test]
    fn test_accessors() {
        let query = ReportQuery::new("BT", "Last 5 Minutes").with_filter(ReportFilter::new(FilterKind::AgentGroup, "g"));
        assert_eq!(query.report_name(), "BT");
        assert_eq!(query.timeframe(), "Last 5 Minutes");
        assert_eq!(query.filters().len(), 1);
    }
}
