//! LaTeX → PDF compilation via an external `tectonic` process.
//!
//! Each call gets its own scratch directory (a `TempDir`, removed on drop on
//! every exit path). Success is decided by whether `resume.pdf` exists after the
//! process exits, NOT by the exit status: tectonic runs with
//! `continue-on-errors` and routinely exits non-zero while still producing a
//! usable document.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use bytes::Bytes;
use tempfile::TempDir;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;

pub const TEX_FILE: &str = "resume.tex";
pub const PDF_FILE: &str = "resume.pdf";
pub const CLASS_FILE: &str = "resume.cls";

const COMPILER_ARGS: [&str; 4] = ["-X", "compile", "-Z", "continue-on-errors"];
const UNKNOWN_FAILURE: &str = "PDF generation failed - unknown error";

/// Pause between process exit and the artifact check, for filesystems that
/// publish the output file late.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Error)]
pub enum CompileError {
    /// The compiler ran but produced no PDF.
    #[error("{0}")]
    Diagnostics(String),

    #[error("LaTeX compilation timed out after {}s", .0.as_secs_f32())]
    TimedOut(Duration),

    #[error("{} not found on system path ({reason})", .program.display())]
    CompilerUnavailable { program: PathBuf, reason: String },

    #[error("LaTeX class file not found at {}", .path.display())]
    MissingClassFile { path: PathBuf },

    #[error("Failed to prepare compilation directory: {0}")]
    Staging(#[source] io::Error),

    #[error("Compiler process failed: {0}")]
    Process(#[source] io::Error),

    #[error("Failed to read compiled PDF: {0}")]
    Artifact(#[source] io::Error),
}

#[derive(Debug, Clone)]
pub struct CompiledPdf {
    pub job_id: Uuid,
    pub bytes: Bytes,
}

pub type CompilationOutcome = Result<CompiledPdf, CompileError>;

/// Runs compilation jobs. Holds only settings, so clones are cheap and jobs
/// never share state.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: PathBuf,
    class_file: PathBuf,
    scratch_root: Option<PathBuf>,
    timeout: Duration,
    settle_delay: Duration,
}

impl LatexCompiler {
    pub fn new(program: impl Into<PathBuf>, class_file: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            class_file: class_file.into(),
            scratch_root: None,
            timeout: Duration::from_secs(120),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.tectonic_bin, config.templates_dir.join(CLASS_FILE))
            .with_timeout(Duration::from_secs(config.compile_timeout_secs))
            .with_settle_delay(Duration::from_millis(config.compile_settle_ms))
            .with_scratch_root(config.scratch_dir.clone())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_scratch_root(mut self, root: Option<PathBuf>) -> Self {
        self.scratch_root = root;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Compiles `latex_source` into a PDF.
    ///
    /// The scratch directory is gone by the time this returns, whatever the outcome.
    pub async fn compile(&self, latex_source: &str) -> CompilationOutcome {
        let job = CompilationJob::stage(self, latex_source).await?;
        info!(
            job_id = %job.id,
            "Compiling LaTeX ({} bytes) in {}",
            latex_source.len(),
            job.dir().display()
        );

        let run = self.run(job.dir()).await?;
        tokio::time::sleep(self.settle_delay).await;

        if !job.artifact_exists().await {
            let diagnostics = if run.stderr.trim().is_empty() {
                UNKNOWN_FAILURE.to_string()
            } else {
                run.stderr
            };
            warn!(job_id = %job.id, status = %run.status, "Compiler produced no PDF");
            return Err(CompileError::Diagnostics(diagnostics));
        }

        if !run.status.success() && !run.stderr.trim().is_empty() {
            warn!(
                job_id = %job.id,
                status = %run.status,
                "PDF generated with errors: {}",
                run.stderr
            );
        }

        let bytes = job.read_artifact().await?;
        info!(job_id = %job.id, "PDF compiled ({} bytes)", bytes.len());

        Ok(CompiledPdf {
            job_id: job.id,
            bytes,
        })
    }

    async fn run(&self, workdir: &Path) -> Result<CompilerRun, CompileError> {
        let child = Command::new(&self.program)
            .args(COMPILER_ARGS)
            .arg(TEX_FILE)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CompileError::CompilerUnavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CompileError::TimedOut(self.timeout))?
            .map_err(CompileError::Process)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("Compiler stdout: {}", stdout);
        }

        Ok(CompilerRun {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

struct CompilerRun {
    status: ExitStatus,
    stderr: String,
}

/// One compilation's scratch space. Dropping it deletes the directory.
struct CompilationJob {
    id: Uuid,
    workdir: TempDir,
    artifact_path: PathBuf,
}

impl CompilationJob {
    async fn stage(compiler: &LatexCompiler, latex_source: &str) -> Result<Self, CompileError> {
        let id = Uuid::new_v4();
        let prefix = format!("resume-{id}-");
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        let workdir = match &compiler.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(CompileError::Staging)?;

        let job = Self {
            id,
            artifact_path: workdir.path().join(PDF_FILE),
            workdir,
        };

        tokio::fs::copy(&compiler.class_file, job.dir().join(CLASS_FILE))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CompileError::MissingClassFile {
                    path: compiler.class_file.clone(),
                },
                _ => CompileError::Staging(e),
            })?;

        tokio::fs::write(job.dir().join(TEX_FILE), latex_source)
            .await
            .map_err(CompileError::Staging)?;

        Ok(job)
    }

    fn dir(&self) -> &Path {
        self.workdir.path()
    }

    async fn artifact_exists(&self) -> bool {
        tokio::fs::try_exists(&self.artifact_path)
            .await
            .unwrap_or(false)
    }

    async fn read_artifact(&self) -> Result<Bytes, CompileError> {
        tokio::fs::read(&self.artifact_path)
            .await
            .map(Bytes::from)
            .map_err(CompileError::Artifact)
    }
}
