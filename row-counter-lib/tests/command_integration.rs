//! Integration tests driving the command line through `row_counter_lib::run`

use camino::Utf8PathBuf;
use row_counter_lib::Host;
use std::fs;
use std::io::Write;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn json_lines(text: &str) -> Vec<serde_json::Value> {
    text.lines().map(|line| serde_json::from_str(line).expect("each line should be JSON")).collect()
}

fn write_config(dir: &tempfile::TempDir, server: &MockServer) -> Utf8PathBuf {
    let address = server.address();
    let path = Utf8PathBuf::try_from(dir.path().join("row-counter.toml")).unwrap();
    fs::write(
        &path,
        format!(
            r#"
protocol = "http"
host = "{}"
port = {}
username = "probe"
password = "s3cret"
dashboard_name = "Row Report"
timeframe = "Last 15 Minutes"
count_mode = "count-instances"
"#,
            address.ip(),
            address.port()
        ),
    )
    .unwrap();
    path
}

async fn serve(server: &MockServer, template: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/rest/management/reports/create/Row%20Report"))
        // base64("probe:s3cret")
        .and(header("authorization", "Basic cHJvYmU6czNjcmV0"))
        .respond_with(template)
        .expect(expected)
        .mount(server)
        .await;
}

fn report() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(fs::read_to_string("tests/fixtures/business_transactions.xml").unwrap())
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_count_command_instances() {
    let mut host = TestHost::default();
    row_counter_lib::run(
        &mut host,
        [
            "row-counter",
            "count",
            "--report",
            "tests/fixtures/business_transactions.xml",
            "--mode",
            "count-instances",
            "--format",
            "json",
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    let lines = json_lines(&host.output_str());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["dimension"]["name"], "unique measure");
    assert_eq!(lines[0]["dimension"]["value"], "Checkout");
    assert_eq!(lines[0]["value"], 1.0);
    assert_eq!(lines[1]["dimension"]["value"], "Login");
    assert_eq!(lines[1]["value"], 2.0);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_count_command_chart_text() {
    let mut host = TestHost::default();
    row_counter_lib::run(
        &mut host,
        [
            "row-counter",
            "count",
            "--report",
            "tests/fixtures/chart.xml",
            "--dashboard-kind",
            "chart",
            "--mode",
            "count-rows",
            "--color",
            "never",
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    let output = host.output_str();
    assert!(output.trim_end().ends_with("Row Counter/Rows = 3"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_count_command_query() {
    let mut host = TestHost::default();
    row_counter_lib::run(
        &mut host,
        [
            "row-counter",
            "count",
            "--report",
            "tests/fixtures/chart.xml",
            "--query",
            "dashboardreport/data/chartdashlet/measures/measure[contains(@measure, 'Mem')]",
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    assert_eq!(
        host.output_str(),
        "/dashboardreport/data/chartdashlet/measures/measure[contains(@measure, 'Mem')]: 2\n"
    );
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_count_command_missing_report() {
    let mut host = TestHost::default();
    let result = row_counter_lib::run(
        &mut host,
        ["row-counter", "count", "--report", "tests/fixtures/does-not-exist.xml", "--log-level", "none"],
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_run_command_publishes_measurements() {
    let server = MockServer::start().await;
    serve(&server, report(), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);

    let mut host = TestHost::default();
    row_counter_lib::run(
        &mut host,
        ["row-counter", "run", "-c", config.as_str(), "--format", "json", "--log-level", "none"],
    )
    .await
    .unwrap();

    let lines = json_lines(&host.output_str());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["group"], "Row Counter");
    assert_eq!(lines[0]["metric"], "Rows");
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_run_command_overrides_mode() {
    let server = MockServer::start().await;
    serve(&server, report(), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);

    let mut host = TestHost::default();
    row_counter_lib::run(
        &mut host,
        [
            "row-counter",
            "run",
            "-c",
            config.as_str(),
            "--mode",
            "count-unique-rows",
            "--format",
            "json",
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    let lines = json_lines(&host.output_str());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["value"], 2.0);
    assert!(lines[0].get("dimension").is_none());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_run_command_server_error() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(500), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);

    let mut host = TestHost::default();
    let result = row_counter_lib::run(&mut host, ["row-counter", "run", "-c", config.as_str(), "--log-level", "none"]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.output_buf.is_empty());
    assert!(host.error_str().contains("invocation failed"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_run_command_missing_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let config = Utf8PathBuf::try_from(dir.path().join("row-counter.toml")).unwrap();
    fs::write(&config, "dashboard_name = \"Row Report\"\n").unwrap();

    let mut host = TestHost::default();
    let result = row_counter_lib::run(&mut host, ["row-counter", "run", "-c", config.as_str(), "--log-level", "none"]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("username and password are required"), "{}", host.error_str());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_run_command_interval() {
    let server = MockServer::start().await;
    serve(&server, report(), 3).await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);
    let output = Utf8PathBuf::try_from(dir.path().join("measurements.jsonl")).unwrap();

    let mut host = TestHost::default();
    row_counter_lib::run(
        &mut host,
        [
            "row-counter",
            "run",
            "-c",
            config.as_str(),
            "--interval",
            "20ms",
            "--iterations",
            "3",
            "--format",
            "json",
            "--output",
            output.as_str(),
            "--log-level",
            "none",
        ],
    )
    .await
    .unwrap();

    let lines = json_lines(&fs::read_to_string(&output).unwrap());
    assert_eq!(lines.len(), 6);
    assert!(host.output_buf.is_empty());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_run_command_execution_timeout() {
    let server = MockServer::start().await;
    serve(&server, report().set_delay(core::time::Duration::from_secs(5)), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);

    let mut host = TestHost::default();
    let result = row_counter_lib::run(
        &mut host,
        [
            "row-counter",
            "run",
            "-c",
            config.as_str(),
            "--execution-timeout",
            "200ms",
            "--log-level",
            "none",
        ],
    )
    .await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.output_buf.is_empty());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let config = Utf8PathBuf::try_from(dir.path().join("probe.toml")).unwrap();

    let mut host = TestHost::default();
    row_counter_lib::run(&mut host, ["row-counter", "init", config.as_str()]).await.unwrap();
    assert!(host.output_str().contains("Generated default configuration file"));

    let text = fs::read_to_string(&config)
        .unwrap()
        .replace("username = \"\"", "username = \"admin\"")
        .replace("password = \"\"", "password = \"hunter2\"")
        .replace("dashboard_name = \"\"", "dashboard_name = \"Row Report\"");
    fs::write(&config, text).unwrap();

    let mut host = TestHost::default();
    row_counter_lib::run(&mut host, ["row-counter", "validate", "-c", config.as_str()]).await.unwrap();

    let output = host.output_str();
    assert!(output.contains("Configuration file is valid"));
    assert!(output.contains("https://localhost:8021/rest/management/reports/create/Row%20Report"));
    assert!(!output.contains("hunter2"));
}
