//! Shared fixtures for unit tests.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::OnceLock;

use tempfile::TempDir;

use crate::render::compiler::CLASS_FILE;

/// Stand-in for `tectonic`. Behaviour is keyed off words in the source file:
/// FATAL (stderr, no PDF), SILENT (no stderr, no PDF), RECOVERABLE (PDF plus
/// stderr and exit 1), HANG (never finishes). Anything else compiles cleanly.
/// The "PDF" is a `%PDF-` header followed by the source text.
const FAKE_TECTONIC: &str = r##"#!/bin/sh
if [ "$1" != "-X" ] || [ "$2" != "compile" ] || [ "$3" != "-Z" ] || [ "$4" != "continue-on-errors" ]; then
  echo "unexpected arguments: $*" >&2
  exit 2
fi
if [ ! -f resume.cls ]; then
  echo "resume.cls was not staged" >&2
  exit 3
fi
if grep -q HANG "$5"; then
  exec sleep 30
fi
if grep -q FATAL "$5"; then
  echo "! Emergency stop." >&2
  exit 1
fi
if grep -q SILENT "$5"; then
  exit 1
fi
{ printf '%%PDF-1.5\n'; cat "$5"; } > resume.pdf
if grep -q RECOVERABLE "$5"; then
  echo "error: resume.tex:1: Undefined control sequence" >&2
  exit 1
fi
exit 0
"##;

/// Path to the fake compiler script, written once per test process so no
/// test execs it while another still holds it open for writing.
pub fn fake_compiler() -> PathBuf {
    static SCRIPT: OnceLock<PathBuf> = OnceLock::new();
    SCRIPT
        .get_or_init(|| {
            let dir = std::env::temp_dir().join(format!("fake-tectonic-{}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            let path = dir.join("tectonic");
            std::fs::write(&path, FAKE_TECTONIC).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        })
        .clone()
}

/// A class file plus an empty scratch root, both removed on drop.
pub struct TestAssets {
    templates: TempDir,
    scratch: TempDir,
}

impl TestAssets {
    pub fn new() -> Self {
        let templates = TempDir::new().unwrap();
        std::fs::write(
            templates.path().join(CLASS_FILE),
            "\\NeedsTeXFormat{LaTeX2e}\n\\ProvidesClass{resume}\n",
        )
        .unwrap();
        std::fs::write(
            templates.path().join("index.html"),
            "<!doctype html><title>Resume Tailor</title>",
        )
        .unwrap();
        Self {
            templates,
            scratch: TempDir::new().unwrap(),
        }
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.templates.path().to_path_buf()
    }

    pub fn class_file(&self) -> PathBuf {
        self.templates.path().join(CLASS_FILE)
    }

    pub fn scratch_root(&self) -> PathBuf {
        self.scratch.path().to_path_buf()
    }

    pub fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch.path())
            .unwrap()
            .next()
            .is_none()
    }
}
