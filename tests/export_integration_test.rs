//! End-to-end export tests against a mock import service

use depot::adapters::service::ServiceClient;
use depot::cli::commands::export::{GeneListArgs, StandardExportArgs};
use depot::config::{load_config, DepotConfig};
use depot::core::export::ExportOrchestrator;
use depot::domain::{DepotError, ErrorKind};
use depot::plugins::{GeneListPlugin, StandardArgs};
use mockito::{Matcher, Server};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use tokio::sync::watch;

const GENOME: &str = "PlasmoDB-66_Pfalciparum3D7_Genome";

struct Fixture {
    _config_file: tempfile::NamedTempFile,
    config_path: String,
    config: DepotConfig,
    work_dir: TempDir,
    inputs: TempDir,
}

fn fixture(server: &Server) -> Fixture {
    let work_dir = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    std::fs::write(inputs.path().join("genes.txt"), "PF3D7_0100100\nPF3D7_0100200\n").unwrap();

    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[application]
work_dir = "{work_dir}"

[service]
base_url = "{url}"
user_id_header = "User-ID"

[service.headers]
Admin-Token = "t0k3n"

[polling]
initial_interval_secs = 0.01
backoff_factor = 1.5
max_interval_secs = 0.05
timeout_secs = 5.0
"#,
        work_dir = work_dir.path().display(),
        url = server.url()
    )
    .unwrap();
    config_file.flush().unwrap();

    let config_path = config_file.path().to_string_lossy().into_owned();
    let config = load_config(&config_path).unwrap();

    Fixture {
        _config_file: config_file,
        config_path,
        config,
        work_dir,
        inputs,
    }
}

fn plugin(inputs: &Path) -> GeneListPlugin {
    let args = StandardArgs::new(
        "Liver genes",
        "Genes up in liver stage",
        "",
        "jane.42@example.org",
        inputs.join("out.html"),
    )
    .unwrap();
    GeneListPlugin::new(args, GENOME, inputs.join("genes.txt")).unwrap()
}

fn orchestrator(fixture: &Fixture) -> ExportOrchestrator {
    let user = StandardArgs::new("x", "", "", "jane.42@example.org", "o").unwrap().user_id;
    let client = ServiceClient::new(&fixture.config.service, Some(&user)).unwrap();
    let (_tx, rx) = watch::channel(false);
    ExportOrchestrator::new(&fixture.config, client.service(), rx)
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[tokio::test]
async fn test_export_succeeds_and_cleans_up() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", "/vdi-datasets")
        .match_header("Admin-Token", "t0k3n")
        .match_header("User-ID", "42")
        .match_header(
            "content-type",
            Matcher::Regex("multipart/form-data".to_string()),
        )
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jobId":"J1"}"#)
        .expect(1)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/vdi-datasets/J1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"complete","messages":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let fixture = fixture(&server);
    let job_id = orchestrator(&fixture)
        .run_export(&plugin(fixture.inputs.path()))
        .await
        .unwrap();

    assert_eq!(job_id.as_str(), "J1");
    submit.assert_async().await;
    status.assert_async().await;
    assert!(is_empty_dir(fixture.work_dir.path()));
}

#[tokio::test]
async fn test_rejected_dataset_surfaces_messages() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/vdi-datasets")
        .with_status(200)
        .with_body(r#"{"jobId":"J7"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/vdi-datasets/J7")
        .with_status(200)
        .with_body(r#"{"status":"invalid","messages":["line 2: unknown gene","line 9: duplicate"]}"#)
        .create_async()
        .await;

    let fixture = fixture(&server);
    let err = orchestrator(&fixture)
        .run_export(&plugin(fixture.inputs.path()))
        .await
        .unwrap_err();

    match &err {
        DepotError::Validation { messages } => assert_eq!(
            messages,
            &["line 2: unknown gene".to_string(), "line 9: duplicate".to_string()]
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(err.kind().is_user_correctable());
    assert_eq!(err.exit_code(), 11);
    assert!(is_empty_dir(fixture.work_dir.path()));
}

#[tokio::test]
async fn test_legacy_import_status_is_honoured() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/vdi-datasets")
        .with_status(200)
        .with_body(r#"{"jobId":"J8"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/vdi-datasets/J8")
        .with_status(200)
        .with_body(r#"{"status":"in-progress","importStatus":"failed","messages":["disk full"]}"#)
        .create_async()
        .await;

    let fixture = fixture(&server);
    let err = orchestrator(&fixture)
        .run_export(&plugin(fixture.inputs.path()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert!(err.to_string().contains("disk full"));
}

#[tokio::test]
async fn test_submit_failure_never_polls() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/vdi-datasets")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;
    let status = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let fixture = fixture(&server);
    let err = orchestrator(&fixture)
        .run_export(&plugin(fixture.inputs.path()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    status.assert_async().await;
    assert!(is_empty_dir(fixture.work_dir.path()));
}

#[tokio::test]
async fn test_gene_list_command_writes_success_page() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/vdi-datasets")
        .with_status(200)
        .with_body(r#"{"jobId":"J2"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/vdi-datasets/J2")
        .with_status(200)
        .with_body(r#"{"status":"complete"}"#)
        .create_async()
        .await;

    let fixture = fixture(&server);
    let output = fixture.inputs.path().join("success.html");
    let args = GeneListArgs {
        standard: StandardExportArgs {
            name: "Liver <genes>".to_string(),
            summary: String::new(),
            description: String::new(),
            user_email: "jane.42@example.org".to_string(),
            output: output.clone(),
        },
        genome: GENOME.to_string(),
        file: fixture.inputs.path().join("genes.txt"),
    };
    let (_tx, rx) = watch::channel(false);

    let code = args.execute(&fixture.config_path, rx).await.unwrap();

    assert_eq!(code, 0);
    let page = std::fs::read_to_string(&output).unwrap();
    assert!(page.contains("J2"));
    assert!(page.contains("Liver &lt;genes&gt;"));
    assert!(is_empty_dir(fixture.work_dir.path()));
}

#[tokio::test]
async fn test_gene_list_command_missing_file_exit_code() {
    let server = Server::new_async().await;
    let fixture = fixture(&server);
    let args = GeneListArgs {
        standard: StandardExportArgs {
            name: "Liver genes".to_string(),
            summary: String::new(),
            description: String::new(),
            user_email: "jane.42@example.org".to_string(),
            output: fixture.inputs.path().join("success.html"),
        },
        genome: GENOME.to_string(),
        file: fixture.inputs.path().join("absent.txt"),
    };
    let (_tx, rx) = watch::channel(false);

    let code = args.execute(&fixture.config_path, rx).await.unwrap();

    assert_eq!(code, 10);
    assert!(!fixture.inputs.path().join("success.html").exists());
}
