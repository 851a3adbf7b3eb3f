// Shared helpers for integration tests.
//
// Provides in-memory zip archives, a fetcher serving them by URL, a fake
// external tool and a recording logger, so each integration test can drive
// the install steps without network or process access.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write as _};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kaizen_cli::config::Config;
use kaizen_cli::error::{FetchError, ToolError};
use kaizen_cli::exec::{ExecResult, Executor};
use kaizen_cli::fetch::{Fetcher, Payload};
use kaizen_cli::logging::{Log, StepEntry, StepStatus};
use kaizen_cli::steps::Context;
use zip::write::SimpleFileOptions;

pub const PROJECT_URL: &str = "https://codeload.github.com/Wixel/Kaizen/zip/master";
pub const STYLESHEET_URL: &str = "https://codeload.github.com/necolas/normalize.css/zip/master";

/// Build a zip archive in memory. `None` content marks a directory entry.
pub fn zip_bytes(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        match content {
            Some(bytes) => {
                writer.start_file(*name, options).expect("start file");
                writer.write_all(bytes).expect("write entry");
            }
            None => writer.add_directory(*name, options).expect("add directory"),
        }
    }
    writer.finish().expect("finish zip").into_inner()
}

/// A primary archive laid out like the Kaizen repository.
pub fn project_archive(manifest: Option<&str>) -> Vec<u8> {
    let mut entries: Vec<(&str, Option<&[u8]>)> = vec![
        ("Kaizen-master/", None),
        ("Kaizen-master/README.md", Some(b"# Kaizen")),
        ("Kaizen-master/index.html", Some(b"<!doctype html>")),
        ("Kaizen-master/styles/", None),
        ("Kaizen-master/styles/app.css", Some(b"body { margin: 0 }")),
    ];
    if let Some(manifest) = manifest {
        entries.push(("Kaizen-master/cli.yml", Some(manifest.as_bytes())));
    }
    zip_bytes(&entries)
}

/// A secondary archive laid out like normalize.css.
pub fn stylesheet_archive() -> Vec<u8> {
    zip_bytes(&[
        ("normalize.css-master/", None),
        ("normalize.css-master/README.md", Some(b"readme")),
        (
            "normalize.css-master/normalize.css",
            Some(b"html { line-height: 1.15; }"),
        ),
    ])
}

/// Fetcher serving fixed payloads by URL; unknown URLs fail like a 404.
#[derive(Debug, Default)]
pub struct StubFetcher {
    archives: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn serving(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.archives.insert(url.to_string(), bytes);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<Payload, FetchError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(url.to_string());
        match self.archives.get(url) {
            Some(bytes) => Payload::from_bytes(url, bytes),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                reason: "http status: 404".to_string(),
            }),
        }
    }
}

/// One recorded external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

/// Executor that records invocations and answers with a fixed exit code.
#[derive(Debug)]
pub struct FakeTool {
    pub installed: bool,
    pub exit_code: i32,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeTool {
    pub fn succeeding() -> Self {
        Self {
            installed: true,
            exit_code: 0,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::succeeding()
        }
    }

    pub fn missing() -> Self {
        Self {
            installed: false,
            ..Self::succeeding()
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Executor for FakeTool {
    fn run_in(&self, dir: &Path, program: &str, args: &[String]) -> Result<ExecResult, ToolError> {
        self.calls.lock().expect("calls lock").push(Invocation {
            dir: dir.to_path_buf(),
            program: program.to_string(),
            args: args.to_vec(),
        });
        Ok(ExecResult {
            stdout: String::new(),
            stderr: if self.exit_code == 0 {
                String::new()
            } else {
                "install failed".to_string()
            },
            success: self.exit_code == 0,
            code: Some(self.exit_code),
        })
    }

    fn which(&self, _program: &str) -> bool {
        self.installed
    }
}

/// [`Log`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<(&'static str, String)>>,
    steps: Mutex<Vec<StepEntry>>,
}

impl MemoryLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("lines lock")
            .push((level, msg.to_string()));
    }

    pub fn messages(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("lines lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn steps(&self) -> Vec<StepEntry> {
        self.steps.lock().expect("steps lock").clone()
    }

    pub fn status_of(&self, name: &str) -> Option<StepStatus> {
        self.steps()
            .into_iter()
            .find(|s| s.name == name)
            .map(|s| s.status)
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        self.steps.lock().expect("steps lock").push(StepEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }
}

/// Temporary target directory plus the fakes wired into a [`Context`].
pub struct Sandbox {
    pub target: tempfile::TempDir,
    pub fetcher: Arc<StubFetcher>,
    pub tool: Arc<FakeTool>,
    pub log: Arc<MemoryLog>,
}

impl Sandbox {
    /// Serve the standard stylesheet archive and `manifest` inside the
    /// project archive (`None` leaves the manifest out).
    pub fn new(manifest: Option<&str>) -> Self {
        Self::with_fetcher(
            StubFetcher::default()
                .serving(PROJECT_URL, project_archive(manifest))
                .serving(STYLESHEET_URL, stylesheet_archive()),
        )
    }

    pub fn with_fetcher(fetcher: StubFetcher) -> Self {
        Self {
            target: tempfile::tempdir().expect("create temp dir"),
            fetcher: Arc::new(fetcher),
            tool: Arc::new(FakeTool::succeeding()),
            log: Arc::new(MemoryLog::default()),
        }
    }

    pub fn with_tool(mut self, tool: FakeTool) -> Self {
        self.tool = Arc::new(tool);
        self
    }

    pub fn path(&self) -> &Path {
        self.target.path()
    }

    pub fn context(&self, overwrite: bool, dry_run: bool) -> Context {
        Context {
            config: Arc::new(Config::default()),
            target: self.target.path().to_path_buf(),
            overwrite,
            dry_run,
            log: Arc::clone(&self.log) as Arc<dyn Log>,
            fetcher: Arc::clone(&self.fetcher) as Arc<dyn Fetcher>,
            executor: Arc::clone(&self.tool) as Arc<dyn Executor>,
        }
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, content).expect("write file");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative)).expect("read file")
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }
}
