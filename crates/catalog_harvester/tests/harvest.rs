use catalog_harvester::{
    harvest, run, CrawlError, FetchSettings, HarvestConfig, HarvestError, Mirror, NullObserver,
    ReqwestFetcher,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn preformatted(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(name, size)| format!("<a href=\"{name}\">{name}</a>  16-Oct-2018 18:10  {size}\n"))
        .collect();
    format!("<html><body><pre><a href=\"../\">../</a>\n{body}</pre></body></html>")
}

async fn mount_huawei(server: &MockServer) {
    let mounts = [
        (
            "/openjdk/",
            "<html><body><pre><a href=\"../\">../</a>\n<a href=\"11.0.2/\">11.0.2/</a>\n\
             <a href=\"17/\">17/</a>\n</pre></body></html>"
                .to_string(),
        ),
        (
            "/openjdk/11.0.2/",
            preformatted(&[
                ("openjdk-11.0.2_windows-x64_bin.zip", "179 M"),
                ("openjdk-11.0.2_linux-x64_bin.tar.gz", "187 M"),
            ]),
        ),
        (
            "/openjdk/17/",
            preformatted(&[("openjdk-17_linux-x64_bin.tar.gz", "178 M")]),
        ),
    ];
    for (route, body) in mounts {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
            .mount(server)
            .await;
    }
}

fn config_for(server: &MockServer, output: &TempDir) -> HarvestConfig {
    engine_logging::initialize_for_tests();
    let mut config = HarvestConfig::for_mirror(Mirror::Huawei);
    config.base_url = format!("{}/openjdk/", server.uri());
    config.output_path = output.path().join("jdkindex.json");
    config
}

#[tokio::test]
async fn harvest_returns_catalog_in_version_then_filename_order() {
    let server = MockServer::start().await;
    mount_huawei(&server).await;
    let output = TempDir::new().unwrap();
    let config = config_for(&server, &output);
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();

    let entries = harvest(&config, &fetcher, &NullObserver).await.unwrap();
    let order: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.version.as_str(), e.filename.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("17", "openjdk-17_linux-x64_bin.tar.gz"),
            ("11.0.2", "openjdk-11.0.2_linux-x64_bin.tar.gz"),
            ("11.0.2", "openjdk-11.0.2_windows-x64_bin.zip"),
        ]
    );
    assert_eq!(entries[0].last_modified, "2018-10-16 18:10");
    assert!(!output.path().join("jdkindex.json").exists());
}

#[tokio::test]
async fn harvest_rejects_placeholder_mirror() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let config = HarvestConfig::for_mirror(Mirror::Azul);
    let err = harvest(&config, &fetcher, &NullObserver).await.unwrap_err();
    assert!(matches!(
        err,
        HarvestError::Crawl(CrawlError::NotImplemented(Mirror::Azul))
    ));
}

#[tokio::test]
async fn harvest_rejects_malformed_base_url() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let mut config = HarvestConfig::for_mirror(Mirror::Lzu);
    config.base_url = "https://mirror4.lzu.edu.cn/openjdk".to_string();
    let err = harvest(&config, &fetcher, &NullObserver).await.unwrap_err();
    assert!(matches!(err, HarvestError::Config(_)));
}

#[test]
fn run_writes_catalog_file() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(mount_huawei(&server));
    let output = TempDir::new().unwrap();
    let config = config_for(&server, &output);

    let report = run(&config, &NullObserver).unwrap();
    assert_eq!(report.entries, 3);
    assert_eq!(report.mirror, Mirror::Huawei);

    let json = std::fs::read_to_string(&report.output_path).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0]["goos"], "linux");
    assert_eq!(parsed[0]["size"], "178 M");
}

#[test]
fn run_failure_leaves_no_output() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    let output = TempDir::new().unwrap();
    let config = config_for(&server, &output);

    let err = run(&config, &NullObserver).unwrap_err();
    assert!(matches!(err, HarvestError::Crawl(CrawlError::Enumeration { .. })));
    assert!(!config.output_path.exists());
}
