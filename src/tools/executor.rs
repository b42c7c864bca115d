//! Tool execution: temp-file staging, timeout enforcement, cleanup.

use super::registry::ToolKind;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Hard ceiling on one fix invocation.
pub const FIX_TIMEOUT: Duration = Duration::from_secs(10);
/// Ceiling on the startup version probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool execution timeout")]
    Timeout,
    #[error("Failed to process file")]
    OutputMissing,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one bridge invocation. On failure `content` is the caller's
/// input, unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub success: bool,
    pub content: String,
    pub diagnostics: Vec<String>,
}

/// Staged temp copy of the content under fix. The name mixes a timestamp,
/// the pid, a sequence number and the original base name so concurrent
/// invocations never collide. Removal runs on every exit path via Drop.
struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    fn create(original_path: &str, content: &str) -> std::io::Result<Self> {
        static SEQUENCE: AtomicU64 = AtomicU64::new(0);
        let base = Path::new(original_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("source");
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let path = std::env::temp_dir().join(format!(
            "rufix-{millis}-{}-{}-{base}",
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed),
        ));
        fs::write(&path, content)?;
        Ok(Self { path })
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::debug!("failed to remove {}: {err}", self.path.display());
            }
        }
    }
}

/// The external formatter bridge. Tool availability is fixed at
/// construction; a tool that failed its probe is never retried.
#[derive(Debug)]
pub struct ToolBridge {
    available: HashMap<ToolKind, bool>,
    timeout: Duration,
}

impl ToolBridge {
    /// Probe every known tool once by running its version command.
    pub fn probe() -> Self {
        let mut available = HashMap::new();
        for tool in ToolKind::ALL {
            let ok = probe_tool(tool);
            log::info!(
                "external tool {}: {}",
                tool.name(),
                if ok { "available" } else { "not found" }
            );
            available.insert(tool, ok);
        }
        Self {
            available,
            timeout: FIX_TIMEOUT,
        }
    }

    /// A bridge with every tool marked unavailable; the pipeline falls back
    /// to the internal rule engine.
    pub fn disabled() -> Self {
        Self {
            available: ToolKind::ALL.iter().map(|&tool| (tool, false)).collect(),
            timeout: FIX_TIMEOUT,
        }
    }

    pub fn is_available(&self, tool: ToolKind) -> bool {
        self.available.get(&tool).copied().unwrap_or(false)
    }

    /// Run `tool` against a temp copy of `content`. The file at
    /// `original_path` is never touched; its name only seeds the temp name.
    pub fn run(&self, tool: ToolKind, original_path: &str, content: &str) -> ToolOutcome {
        if !self.is_available(tool) {
            return ToolOutcome {
                success: false,
                content: content.to_string(),
                diagnostics: vec![format!("Tool {} not available", tool.name())],
            };
        }
        match execute_fix(|staged| tool.fix_argv(staged), original_path, content, self.timeout) {
            Ok(outcome) => outcome,
            Err(err) => ToolOutcome {
                success: false,
                content: content.to_string(),
                diagnostics: vec![err.to_string()],
            },
        }
    }
}

/// Stage the content, run the tool against it, read the (possibly rewritten)
/// copy back. The staged file is removed on success, failure and timeout
/// alike.
fn execute_fix<F>(
    build_argv: F,
    original_path: &str,
    content: &str,
    timeout: Duration,
) -> Result<ToolOutcome, ToolError>
where
    F: FnOnce(&Path) -> Vec<String>,
{
    let staged = StagedFile::create(original_path, content)?;
    let argv = build_argv(&staged.path);
    let output = run_command(&argv, timeout)?;
    if !staged.path.exists() {
        return Err(ToolError::OutputMissing);
    }
    let fixed = fs::read_to_string(&staged.path)?;
    let diagnostics = output
        .stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();
    Ok(ToolOutcome {
        success: output.status.success(),
        content: fixed,
        diagnostics,
    })
}

struct CommandOutput {
    status: ExitStatus,
    stderr: String,
}

fn run_command(argv: &[String], timeout: Duration) -> Result<CommandOutput, ToolError> {
    let mut command = Command::new(&argv[0]);
    command
        .args(&argv[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn()?;

    let stdout_reader = child
        .stdout
        .take()
        .map(|pipe| thread::spawn(move || read_pipe(pipe)));
    let stderr_reader = child
        .stderr
        .take()
        .map(|pipe| thread::spawn(move || read_pipe(pipe)));

    let status = match wait_with_timeout(&mut child, timeout) {
        Ok(status) => status,
        Err(err) => {
            // The child was killed and reaped; the pipes are closed, so the
            // readers finish promptly.
            let _ = join_reader(stdout_reader);
            let _ = join_reader(stderr_reader);
            return Err(err);
        }
    };
    let _stdout = join_reader(stdout_reader);
    let stderr = join_reader(stderr_reader);
    Ok(CommandOutput { status, stderr })
}

/// Poll the child until it exits or the deadline passes. On timeout the
/// child is killed and reaped so it never leaks.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ToolError> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ToolError::Timeout);
        }
        thread::sleep(Duration::from_millis(10));
    }
}

fn probe_tool(tool: ToolKind) -> bool {
    match run_command(&tool.version_argv(), PROBE_TIMEOUT) {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

fn read_pipe<R: Read>(mut pipe: R) -> String {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
