//! Bounded subprocess execution for command-backed preprocessors.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::BiovalError;

/// Default deadline for preprocessor subprocesses.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Run a program, capturing stdout as text.
///
/// A non-zero exit status or any output on stderr is a hard failure of the
/// invocation. The child is killed if it outlives `timeout`. Both pipes are
/// drained on reader threads while waiting, so a child producing more than
/// the OS pipe buffer never blocks against the parent.
pub fn run_capture(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<String, BiovalError> {
    log::debug!("spawning {} {:?} (timeout {:?})", program, args, timeout);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| BiovalError::preprocessor_failed(program, e.to_string()))?;

    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            // Readers unblock on their own once the kill closes the pipes.
            let _ = child.kill();
            let _ = child.wait();
            return Err(BiovalError::subprocess_timeout(program, timeout));
        }
        Err(e) => {
            let _ = child.kill();
            return Err(BiovalError::preprocessor_failed(program, e.to_string()));
        }
    };

    let stdout = join_reader(stdout_reader, program)?;
    let stderr = join_reader(stderr_reader, program)?;

    if !stderr.trim().is_empty() {
        return Err(BiovalError::preprocessor_failed(program, stderr.trim().to_string()));
    }
    if !status.success() {
        return Err(BiovalError::preprocessor_failed(
            program,
            format!("exited with status {}", status),
        ));
    }

    Ok(stdout)
}

/// Drain a pipe to a string on its own thread.
fn spawn_reader<R: Read + Send + 'static>(mut source: R) -> JoinHandle<std::io::Result<String>> {
    thread::spawn(move || {
        let mut buffer = String::new();
        source.read_to_string(&mut buffer)?;
        Ok(buffer)
    })
}

fn join_reader(
    handle: Option<JoinHandle<std::io::Result<String>>>,
    program: &str,
) -> Result<String, BiovalError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    handle
        .join()
        .map_err(|_| BiovalError::preprocessor_failed(program, "pipe reader panicked"))?
        .map_err(|e| BiovalError::preprocessor_failed(program, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_captures_stdout() {
        let out = run_capture("sh", &sh("printf 'hello'"), DEFAULT_TIMEOUT).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_output_larger_than_pipe_buffer() {
        // 256KB of stdout from a promptly-exiting child must be drained
        // without tripping the deadline.
        let out = run_capture(
            "sh",
            &sh("head -c 262144 /dev/zero | tr '\\0' 'a'"),
            Duration::from_secs(3),
        )
        .unwrap();
        assert_eq!(out.len(), 262144);
        assert!(out.bytes().all(|b| b == b'a'));
    }

    #[test]
    fn test_stderr_is_failure() {
        let err = run_capture("sh", &sh("echo oops >&2"), DEFAULT_TIMEOUT).unwrap_err();
        assert_eq!(err.error_type(), "preprocessor_failed");
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn test_nonzero_exit_is_failure() {
        let err = run_capture("sh", &sh("exit 3"), DEFAULT_TIMEOUT).unwrap_err();
        assert_eq!(err.error_type(), "preprocessor_failed");
    }

    #[test]
    fn test_timeout_kills_child() {
        let err = run_capture("sh", &sh("sleep 5"), Duration::from_millis(100)).unwrap_err();
        assert_eq!(err.error_type(), "subprocess_timeout");
    }

    #[test]
    fn test_missing_program_is_failure() {
        let err = run_capture("bioval-no-such-program", &[], DEFAULT_TIMEOUT).unwrap_err();
        assert_eq!(err.error_type(), "preprocessor_failed");
    }
}
