//! Integration tests for the conversion pipeline.
//!
//! The native backend is driven by an in-memory [`PageExtractor`] and the
//! external backend by small shell scripts standing in for `docetl`, so no
//! libpdfium and no network are needed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use viajes::{
    convert_external, convert_native, ExternalTool, PageExtractor, PageRecord, ViajesError,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Returns fixed page texts and counts how often it was called.
struct FakeExtractor {
    pages: Vec<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl FakeExtractor {
    fn new(pages: &[&'static str]) -> Self {
        Self {
            pages: pages.to_vec(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl PageExtractor for FakeExtractor {
    fn extract_pages(&self, _pdf_path: &Path) -> Result<Vec<PageRecord>, ViajesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.iter().map(|t| PageRecord::new(*t)).collect())
    }
}

struct FailingExtractor;

impl PageExtractor for FailingExtractor {
    fn extract_pages(&self, pdf_path: &Path) -> Result<Vec<PageRecord>, ViajesError> {
        Err(ViajesError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: "trailer not found".into(),
        })
    }
}

fn sample_pdf(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.4\n%%EOF\n").unwrap();
    path
}

#[cfg(unix)]
fn stub_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("docetl");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// ── Native backend ───────────────────────────────────────────────────────────

#[tokio::test]
async fn native_writes_stem_md_with_markers() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");
    let out_dir = work.path().join("out");

    let output = convert_native(
        FakeExtractor::new(&["Day one", "Day two"]),
        &pdf,
        Some(&out_dir),
    )
    .await
    .expect("conversion should succeed");

    assert_eq!(output, out_dir.join("trip.md"));
    let md = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        md,
        "# trip\n\n\
         <!-- PAGE 1 START -->\n\nDay one\n\n<!-- PAGE 1 END -->\n\
         \n\
         <!-- PAGE 2 START -->\n\nDay two\n\n<!-- PAGE 2 END -->\n"
    );
    assert!(!out_dir.join("trip.md.tmp").exists());
}

#[tokio::test]
async fn native_blank_page_keeps_original_numbering() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");

    let output = convert_native(
        FakeExtractor::new(&["first", "   \n  ", "third", "fourth"]),
        &pdf,
        Some(work.path()),
    )
    .await
    .unwrap();

    let md = std::fs::read_to_string(output).unwrap();
    assert!(md.starts_with("# trip\n\n"));
    assert_eq!(md.matches("START -->").count(), 3);
    assert_eq!(md.matches("END -->").count(), 3);
    assert!(!md.contains("PAGE 2"));
    assert!(md.contains("<!-- PAGE 3 START -->\n\nthird\n\n<!-- PAGE 3 END -->"));
    assert!(md.contains("<!-- PAGE 4 START -->"));
}

#[tokio::test]
async fn native_without_output_dir_uses_fresh_temp_dirs() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");

    let a = convert_native(FakeExtractor::new(&["x"]), &pdf, None)
        .await
        .unwrap();
    let b = convert_native(FakeExtractor::new(&["x"]), &pdf, None)
        .await
        .unwrap();

    assert_eq!(a.file_name().unwrap(), "trip.md");
    assert_ne!(a.parent(), b.parent());
    assert!(a.exists() && b.exists());

    for p in [a, b] {
        std::fs::remove_dir_all(p.parent().unwrap()).ok();
    }
}

#[tokio::test]
async fn missing_input_rejected_before_output_dir_created() {
    let work = tempfile::tempdir().unwrap();
    let out_dir = work.path().join("never-created");
    let extractor = FakeExtractor::new(&["x"]);
    let calls = Arc::clone(&extractor.calls);

    let err = convert_native(extractor, work.path().join("missing.pdf"), Some(&out_dir))
        .await
        .unwrap_err();

    assert!(matches!(err, ViajesError::FileNotFound { .. }), "{err}");
    assert!(!out_dir.exists());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn directory_input_rejected() {
    let work = tempfile::tempdir().unwrap();
    let err = convert_native(FakeExtractor::new(&["x"]), work.path(), Some(work.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, ViajesError::NotAFile { .. }), "{err}");
}

#[tokio::test]
async fn extraction_failure_writes_nothing() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "broken.pdf");
    let out_dir = work.path().join("out");

    let err = convert_native(FailingExtractor, &pdf, Some(&out_dir))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("trailer not found"), "{err}");
    assert!(!out_dir.join("broken.md").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn native_non_utf8_name_kept_in_output_file() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let work = tempfile::tempdir().unwrap();
    let pdf = work.path().join(OsStr::from_bytes(b"trip\xff.pdf"));
    std::fs::write(&pdf, b"%PDF-1.4\n%%EOF\n").unwrap();

    let output = convert_native(FakeExtractor::new(&["x"]), &pdf, Some(work.path()))
        .await
        .unwrap();

    assert_eq!(output.file_name().unwrap().as_bytes(), b"trip\xff.md");
    let md = std::fs::read_to_string(&output).unwrap();
    assert!(md.starts_with("# trip\u{FFFD}\n\n"), "{md}");
}

// ── External backend ─────────────────────────────────────────────────────────

#[cfg(unix)]
#[tokio::test]
async fn external_success_names_docetl_output() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");
    let out_dir = work.path().join("out");
    // $5 is the value after --output
    let tool = stub_tool(work.path(), r#"printf '# converted\n' > "$5""#);

    let output = convert_external(ExternalTool::new(tool), &pdf, Some(&out_dir))
        .await
        .expect("stub tool exits 0");

    assert_eq!(output, out_dir.join("trip_docetl.md"));
    assert_eq!(std::fs::read_to_string(output).unwrap(), "# converted\n");
}

#[cfg(unix)]
#[tokio::test]
async fn external_passes_fixed_arguments() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");
    let args_log = work.path().join("args.txt");
    let tool = stub_tool(
        work.path(),
        &format!(r#"echo "$@" > '{}'"#, args_log.display()),
    );

    let output = convert_external(ExternalTool::new(tool), &pdf, Some(work.path()))
        .await
        .unwrap();

    let logged = std::fs::read_to_string(args_log).unwrap();
    assert_eq!(
        logged.trim_end(),
        format!(
            "convert --input {} --output {} --format markdown",
            pdf.display(),
            output.display()
        )
    );
}

#[cfg(unix)]
#[tokio::test]
async fn external_nonzero_exit_reports_stderr() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");
    let out_dir = work.path().join("out");
    let tool = stub_tool(work.path(), "echo 'bad format' >&2\nexit 1");

    let err = convert_external(ExternalTool::new(tool), &pdf, Some(&out_dir))
        .await
        .unwrap_err();

    match &err {
        ViajesError::ToolFailed { code, stderr, .. } => {
            assert_eq!(*code, Some(1));
            assert!(stderr.contains("bad format"));
        }
        other => panic!("expected ToolFailed, got {other}"),
    }
    assert!(err.to_string().contains("bad format"));
    assert!(!out_dir.join("trip_docetl.md").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn external_failure_removes_partial_output() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");
    let tool = stub_tool(work.path(), r#"echo partial > "$5"; exit 3"#);

    let err = convert_external(ExternalTool::new(tool), &pdf, Some(work.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, ViajesError::ToolFailed { code: Some(3), .. }), "{err}");
    assert!(!work.path().join("trip_docetl.md").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn external_failure_keeps_earlier_output() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");
    let earlier = work.path().join("trip_docetl.md");
    std::fs::write(&earlier, "earlier good result").unwrap();
    let tool = stub_tool(work.path(), "echo 'bad format' >&2\nexit 1");

    let err = convert_external(ExternalTool::new(tool), &pdf, Some(work.path()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("bad format"), "{err}");
    assert_eq!(
        std::fs::read_to_string(&earlier).unwrap(),
        "earlier good result"
    );
}

#[tokio::test]
async fn external_missing_executable_gives_install_hint() {
    let work = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(work.path(), "trip.pdf");
    let tool = ExternalTool::new(work.path().join("bin/docetl"));

    let err = convert_external(tool, &pdf, Some(work.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, ViajesError::ToolNotInstalled { .. }), "{err}");
    assert!(err.to_string().contains("pip install docetl"));
    assert!(!work.path().join("trip_docetl.md").exists());
}
