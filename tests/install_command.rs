#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `install` command.
//!
//! These tests drive the real install steps against in-memory archives
//! served by a stub fetcher and a fake vendor tool, covering the end-to-end
//! behaviour of a run: which files land in the target, what is reported,
//! and how a failing step affects the others.

mod common;

use std::sync::Arc;

use common::*;
use kaizen_cli::cli::InstallOpts;
use kaizen_cli::commands;
use kaizen_cli::logging::{Logger, StepStatus};
use kaizen_cli::steps::{self, Step};

const PROJECT: &str = "Install project files";
const STYLESHEET: &str = "Install base stylesheet";
const VENDOR: &str = "Install vendor library";

fn run_all(sandbox: &Sandbox, overwrite: bool, dry_run: bool) {
    let ctx = sandbox.context(overwrite, dry_run);
    for step in steps::all_install_steps() {
        steps::execute(step.as_ref(), &ctx);
    }
}

// ---------------------------------------------------------------------------
// Step list
// ---------------------------------------------------------------------------

#[test]
fn install_step_names() {
    let all = steps::all_install_steps();
    let names: Vec<&str> = all.iter().map(|s| s.name()).collect();
    insta::assert_snapshot!(names.join("\n"), @r"
    Install project files
    Install base stylesheet
    Install vendor library
    ");
}

// ---------------------------------------------------------------------------
// Manifest-driven extraction
// ---------------------------------------------------------------------------

#[test]
fn listed_file_installed_and_unlisted_excluded() {
    let sandbox = Sandbox::new(Some("- /styles/app.css\n"));
    run_all(&sandbox, false, false);

    assert_eq!(sandbox.read("styles/app.css"), "body { margin: 0 }");
    assert!(!sandbox.exists("README.md"));
    assert!(!sandbox.exists("index.html"));
    assert!(
        sandbox
            .log
            .messages("warn")
            .iter()
            .any(|m| m.starts_with("Excluded:") && m.ends_with("README.md"))
    );
    assert_eq!(sandbox.log.status_of(PROJECT), Some(StepStatus::Ok));
}

#[test]
fn existing_file_skipped_without_overwrite() {
    let sandbox = Sandbox::new(Some("- /styles/app.css\n"));
    sandbox.write("styles/app.css", "/* mine */");
    run_all(&sandbox, false, false);

    assert_eq!(sandbox.read("styles/app.css"), "/* mine */");
    assert!(
        sandbox
            .log
            .messages("warn")
            .iter()
            .any(|m| m.starts_with("File already exists:") && m.ends_with("app.css"))
    );
}

#[test]
fn existing_file_replaced_with_overwrite() {
    let sandbox = Sandbox::new(Some("- /styles/app.css\n"));
    sandbox.write("styles/app.css", "/* mine */");
    run_all(&sandbox, true, false);

    assert_eq!(sandbox.read("styles/app.css"), "body { margin: 0 }");
    assert!(
        sandbox
            .log
            .messages("info")
            .iter()
            .any(|m| m.starts_with("Overwritten:") && m.ends_with("app.css"))
    );
}

#[test]
fn missing_manifest_aborts_only_the_project_step() {
    let sandbox = Sandbox::new(None);
    run_all(&sandbox, false, false);

    assert!(!sandbox.exists("index.html"));
    assert!(!sandbox.exists("styles"));
    assert_eq!(sandbox.log.status_of(PROJECT), Some(StepStatus::Failed));
    assert_eq!(sandbox.log.status_of(STYLESHEET), Some(StepStatus::Ok));
    assert_eq!(sandbox.log.status_of(VENDOR), Some(StepStatus::Ok));
    assert!(sandbox.exists("scss/vendor/_normalize.scss"));
    assert!(
        sandbox.log.messages("error")[0]
            .contains("Manifest file 'Kaizen-master/*.yml' not found")
    );
}

#[test]
fn existing_stylesheet_is_a_silent_noop() {
    let sandbox = Sandbox::new(Some("- /index.html\n"));
    sandbox.write("scss/vendor/_normalize.scss", "/* customised */");
    run_all(&sandbox, true, false);

    assert_eq!(
        sandbox.read("scss/vendor/_normalize.scss"),
        "/* customised */"
    );
    assert_eq!(sandbox.log.status_of(STYLESHEET), Some(StepStatus::Ok));
    assert!(
        !sandbox
            .log
            .messages("warn")
            .iter()
            .any(|m| m.contains("_normalize.scss"))
    );
}

#[test]
fn second_run_reports_every_installed_file_as_existing() {
    let sandbox = Sandbox::new(Some("- /index.html\n- /styles/\n- /styles/app.css\n"));
    run_all(&sandbox, false, false);
    let first_installed = sandbox
        .log
        .messages("info")
        .iter()
        .filter(|m| m.starts_with("Installed:") && !m.ends_with("_normalize.scss"))
        .count();

    let again = Sandbox {
        target: sandbox.target,
        fetcher: Arc::new(
            StubFetcher::default()
                .serving(
                    PROJECT_URL,
                    project_archive(Some("- /index.html\n- /styles/\n- /styles/app.css\n")),
                )
                .serving(STYLESHEET_URL, stylesheet_archive()),
        ),
        tool: Arc::new(FakeTool::succeeding()),
        log: Arc::new(MemoryLog::default()),
    };
    run_all(&again, false, false);

    let skipped = again
        .log
        .messages("warn")
        .iter()
        .filter(|m| m.starts_with("File already exists:"))
        .count();
    assert_eq!(first_installed, 3);
    assert_eq!(skipped, first_installed);
    assert_eq!(again.read("index.html"), "<!doctype html>");
}

#[test]
fn root_folder_entry_never_reported() {
    let sandbox = Sandbox::new(Some("- /index.html\n"));
    run_all(&sandbox, false, false);

    let target = sandbox.path().display().to_string();
    for level in ["info", "warn", "error"] {
        for message in sandbox.log.messages(level) {
            assert!(
                !message.ends_with(&format!("{target}/")) && !message.ends_with(&target),
                "root folder reported: {message}"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Vendor tool
// ---------------------------------------------------------------------------

#[test]
fn vendor_tool_runs_in_target_with_vendor_path() {
    let sandbox = Sandbox::new(Some("- /index.html\n"));
    run_all(&sandbox, false, false);

    let calls = sandbox.tool.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "bourbon");
    assert_eq!(calls[0].dir, sandbox.path());
    assert_eq!(
        calls[0].args,
        vec![
            "install".to_string(),
            "--path".to_string(),
            sandbox.path().join("scss/vendor").display().to_string()
        ]
    );
}

#[test]
fn vendor_tool_failure_keeps_installed_files() {
    let sandbox = Sandbox::new(Some("- /index.html\n")).with_tool(FakeTool::failing(1));
    run_all(&sandbox, false, false);

    assert!(sandbox.exists("index.html"));
    assert!(sandbox.exists("scss/vendor/_normalize.scss"));
    assert_eq!(sandbox.log.status_of(VENDOR), Some(StepStatus::Failed));
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_touches_nothing() {
    let sandbox = Sandbox::new(Some("- /index.html\n- /styles/app.css\n"));
    run_all(&sandbox, false, true);

    assert_eq!(std::fs::read_dir(sandbox.path()).unwrap().count(), 0);
    assert!(sandbox.tool.calls().is_empty());
    for name in [PROJECT, STYLESHEET, VENDOR] {
        assert_eq!(sandbox.log.status_of(name), Some(StepStatus::DryRun), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Command entry point
// ---------------------------------------------------------------------------

fn opts(dir: &std::path::Path) -> InstallOpts {
    InstallOpts {
        dir: dir.to_path_buf(),
        overwrite: false,
        dry_run: false,
        config: None,
        skip: vec![],
        only: vec![],
    }
}

#[test]
fn command_succeeds_when_every_step_succeeds() {
    let sandbox = Sandbox::new(Some("- /index.html\n"));
    let log = Arc::new(Logger::with_log_file(None));

    commands::install::run_with(
        &opts(sandbox.path()),
        &log,
        sandbox.fetcher.clone(),
        sandbox.tool.clone(),
    )
    .unwrap();

    assert_eq!(log.step_entries().len(), 3);
    assert!(!log.has_failures());
    assert!(sandbox.exists("index.html"));
}

#[test]
fn command_fails_when_a_download_fails() {
    let sandbox = Sandbox::with_fetcher(
        StubFetcher::default().serving(STYLESHEET_URL, stylesheet_archive()),
    );
    let log = Arc::new(Logger::with_log_file(None));

    let err = commands::install::run_with(
        &opts(sandbox.path()),
        &log,
        sandbox.fetcher.clone(),
        sandbox.tool.clone(),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "1 step(s) failed");
    assert_eq!(log.failure_count(), 1);
    assert!(sandbox.exists("scss/vendor/_normalize.scss"));
    assert_eq!(sandbox.fetcher.requests(), vec![PROJECT_URL, STYLESHEET_URL]);
}

#[test]
fn command_only_filter_limits_downloads() {
    let sandbox = Sandbox::new(Some("- /index.html\n"));
    let log = Arc::new(Logger::with_log_file(None));
    let mut opts = opts(sandbox.path());
    opts.only = vec!["stylesheet".to_string()];

    commands::install::run_with(
        &opts,
        &log,
        sandbox.fetcher.clone(),
        sandbox.tool.clone(),
    )
    .unwrap();

    assert_eq!(sandbox.fetcher.requests(), vec![STYLESHEET_URL]);
    assert!(sandbox.tool.calls().is_empty());
    assert!(!sandbox.exists("index.html"));
}

#[test]
fn command_reads_sources_from_config_file() {
    let sandbox = Sandbox::with_fetcher(
        StubFetcher::default()
            .serving(
                "https://example.test/starter.zip",
                zip_bytes(&[
                    ("Starter-main/", None),
                    ("Starter-main/files.yaml", Some(b"- /main.scss\n")),
                    ("Starter-main/main.scss", Some(b"$x: 1;")),
                ]),
            )
            .serving(STYLESHEET_URL, stylesheet_archive()),
    );
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("kaizen.toml");
    std::fs::write(
        &config_path,
        "[project]\nurl = \"https://example.test/starter.zip\"\nroot_folder = \"Starter-main\"\nmanifest_extension = \"yaml\"\n",
    )
    .unwrap();
    let log = Arc::new(Logger::with_log_file(None));
    let mut opts = opts(sandbox.path());
    opts.config = Some(config_path);
    opts.skip = vec!["vendor".to_string()];

    commands::install::run_with(
        &opts,
        &log,
        sandbox.fetcher.clone(),
        sandbox.tool.clone(),
    )
    .unwrap();

    assert_eq!(sandbox.read("main.scss"), "$x: 1;");
}

#[test]
fn skip_filter_drops_matching_steps() {
    let all = steps::all_install_steps();
    let selected = commands::install::select_steps(&all, &["project".to_string()], &[]);
    let names: Vec<&str> = selected.iter().map(|s: &&dyn Step| s.name()).collect();
    assert_eq!(names, vec![STYLESHEET, VENDOR]);
}
