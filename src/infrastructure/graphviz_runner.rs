/// Graphviz `dot` runner.
///
/// Layout and rasterization are delegated to the external `dot` binary; the
/// DOT source is piped through stdin.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;
use anyhow::{anyhow, Context, Result, bail};
use log::info;

const DOT_PROGRAM: &str = "dot";

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

/// Render DOT source to an image file in the given Graphviz output format.
pub fn render(dot_source: &str, format: &str, output_file: &Path) -> Result<()> {
    check_dot_available()?;

    let spec = build_command_spec(format, output_file);
    let output = run_piped(&spec, dot_source)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("dot failed with exit code {:?}: {}", output.status.code(), stderr.trim());
    }

    info!("[Graphviz] Rendered {}", output_file.display());
    Ok(())
}

/// Check that `dot` is on PATH and return its version banner.
pub fn check_dot_available() -> Result<String> {
    match Command::new(DOT_PROGRAM).arg("-V").output() {
        // dot prints its version on stderr
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
        }
        Ok(output) => bail!("{} found but returned error: {:?}", DOT_PROGRAM, output.status.code()),
        Err(_) => bail!(
            "{} not found in PATH. Install Graphviz: https://graphviz.org/download/",
            DOT_PROGRAM
        ),
    }
}

/// Run `spec` with `input` on stdin, collecting stderr.
///
/// stdin is fed from its own thread so a child that fills stderr before
/// reading all of its input cannot block the writer.
fn run_piped(spec: &DotCommandSpec, input: &str) -> Result<Output> {
    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to execute {}", spec.program))?;

    let mut stdin = child.stdin.take().context("stdin was not captured")?;
    let source = input.to_owned();
    let writer = thread::spawn(move || stdin.write_all(source.as_bytes()));

    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed to wait for {}", spec.program))?;
    let written = writer
        .join()
        .map_err(|_| anyhow!("{} stdin writer panicked", spec.program))?;
    // a failing child may close stdin early; its stderr explains more
    if output.status.success() {
        written.with_context(|| format!("Failed to stream input to {}", spec.program))?;
    }
    Ok(output)
}

// ═══════════════════════════════════════════════════════════════════════════
// Testable Command Builder
// ═══════════════════════════════════════════════════════════════════════════

/// Describes the command that would be run for a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotCommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

pub fn build_command_spec(format: &str, output_file: &Path) -> DotCommandSpec {
    DotCommandSpec {
        program: DOT_PROGRAM.to_string(),
        args: vec![
            format!("-T{}", format),
            "-o".to_string(),
            output_file.display().to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_command_spec_png() {
        let spec = build_command_spec("png", Path::new("out/expressions.png"));
        assert_eq!(spec.program, "dot");
        assert_eq!(spec.args, vec!["-Tpng", "-o", "out/expressions.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_large_stderr_does_not_block_stdin() {
        // echoes every input byte to stderr, well past the pipe buffer
        let spec = DotCommandSpec {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "cat >&2".to_string()],
        };
        let input = "x".repeat(1 << 20);
        let output = run_piped(&spec, &input).unwrap();
        assert!(output.status.success());
        assert_eq!(output.stderr.len(), input.len());
    }

    #[test]
    #[ignore] // Requires Graphviz to be installed
    fn test_render_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("g.png");
        render("digraph g { a -> b; }", "png", &out).unwrap();
        assert!(out.exists());
    }
}
