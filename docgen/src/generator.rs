//! External command-description generator.
//!
//! The manifest is produced by a separate program that prints the complete
//! command registry as JSON on standard output. It is run once per
//! documentation build; any failure aborts the build.

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};
use wait_timeout::ChildExt;

use crate::config::GeneratorConfig;
use crate::error::{DocgenError, Result};
use crate::manifest::Manifest;

type PipeReader = JoinHandle<io::Result<Vec<u8>>>;

/// Runs the generator and returns its standard output.
///
/// # Errors
///
/// Returns [`GeneratorSpawn`](DocgenError::GeneratorSpawn) when the program
/// cannot be started, [`GeneratorTimeout`](DocgenError::GeneratorTimeout)
/// when it exceeds the configured timeout, and
/// [`GeneratorFailed`](DocgenError::GeneratorFailed) on a non-zero exit.
pub fn run_generator(config: &GeneratorConfig) -> Result<String> {
    debug!(program = %config.program, args = ?config.args, "Running command description generator");

    let mut child = Command::new(&config.program)
        .args(&config.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| DocgenError::GeneratorSpawn {
            program: config.program.clone(),
            source,
        })?;

    // Drain both pipes while waiting so a large manifest cannot fill the
    // pipe buffer and stall the child.
    let stdout_thread = child.stdout.take().map(drain_pipe);
    let stderr_thread = child.stderr.take().map(drain_pipe);

    let timeout = Duration::from_secs(config.timeout_secs);
    let waited = match child.wait_timeout(timeout) {
        Ok(waited) => waited,
        Err(err) => {
            reap(&mut child);
            return Err(err.into());
        }
    };
    let Some(status) = waited else {
        debug!(
            program = %config.program,
            timeout_secs = config.timeout_secs,
            "Generator timed out, killing process"
        );
        reap(&mut child);
        return Err(DocgenError::GeneratorTimeout {
            seconds: config.timeout_secs,
        });
    };

    let stdout = join_pipe(stdout_thread)?;
    let stderr = join_pipe(stderr_thread)?;

    if !status.success() {
        return Err(DocgenError::GeneratorFailed {
            status: status.to_string(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }

    info!(program = %config.program, bytes = stdout.len(), "Generator finished");
    String::from_utf8(stdout)
        .map_err(|err| DocgenError::IoError(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Runs the generator and parses its output as a [`Manifest`].
///
/// # Errors
///
/// Any [`run_generator`] error, or
/// [`JsonError`](DocgenError::JsonError) when the output is not a manifest.
pub fn fetch_manifest(config: &GeneratorConfig) -> Result<Manifest> {
    let raw = run_generator(config)?;
    Manifest::from_json_str(&raw)
}

/// Kills the child and collects its exit status so no zombie is left behind.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn drain_pipe<R: Read + Send + 'static>(mut pipe: R) -> PipeReader {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_pipe(reader: Option<PipeReader>) -> Result<Vec<u8>> {
    let Some(reader) = reader else {
        return Ok(Vec::new());
    };
    let buf = reader
        .join()
        .map_err(|_| io::Error::other("pipe reader thread panicked"))??;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str, timeout_secs: u64) -> GeneratorConfig {
        GeneratorConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            timeout_secs,
        }
    }

    #[test]
    fn test_captures_stdout() {
        let output = run_generator(&shell("printf '[]'", 10)).unwrap();
        assert_eq!(output, "[]");
    }

    #[test]
    fn test_fetch_manifest_parses_output() {
        let script = r#"printf '[{"sig": ["mon", "stat"], "desc": "status"}]'"#;
        let manifest = fetch_manifest(&shell(script, 10)).unwrap();
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_nonzero_exit_reports_stderr() {
        let err = run_generator(&shell("echo 'no such module' >&2; exit 3", 10)).unwrap_err();
        match err {
            DocgenError::GeneratorFailed { stderr, .. } => assert_eq!(stderr, "no such module"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_program() {
        let config = GeneratorConfig {
            program: "definitely-not-a-real-generator-binary".to_string(),
            args: Vec::new(),
            timeout_secs: 10,
        };
        let err = run_generator(&config).unwrap_err();
        assert!(matches!(err, DocgenError::GeneratorSpawn { .. }));
    }

    #[test]
    fn test_timeout_kills_generator() {
        let started = std::time::Instant::now();
        let err = run_generator(&shell("sleep 5", 1)).unwrap_err();
        assert!(matches!(err, DocgenError::GeneratorTimeout { seconds: 1 }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_reap_kills_and_collects_child() {
        let mut child = Command::new("sleep")
            .arg("5")
            .stdin(Stdio::null())
            .spawn()
            .unwrap();

        reap(&mut child);

        let status = child.try_wait().unwrap().expect("child already reaped");
        assert!(!status.success());
    }

    #[test]
    fn test_garbage_output_is_malformed_manifest() {
        let err = fetch_manifest(&shell("echo not-json", 10)).unwrap_err();
        assert!(matches!(err, DocgenError::JsonError(_)));
    }
}
