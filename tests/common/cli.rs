use assert_cmd::Command;
use std::ffi::OsStr;
use std::path::Path;

#[derive(Debug)]
pub struct BenchdiffRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl BenchdiffRun {
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.status.success(),
            "expected success, got {}\nstdout:\n{}\nstderr:\n{}",
            self.status,
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.status.success(),
            "expected failure, got success\nstdout:\n{}\nstderr:\n{}",
            self.stdout,
            self.stderr
        );
        self
    }
}

/// Run the compiled `benchdiff` binary inside `dir`.
pub fn run_benchdiff<I, S>(dir: &Path, args: I) -> BenchdiffRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::cargo_bin("benchdiff").expect("benchdiff binary");
    cmd.current_dir(dir);
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "benchdiff=debug");
    cmd.env("RUST_BACKTRACE", "1");
    // Keep ambient configuration out of the tests.
    cmd.env_remove("BENCHDIFF_THRESHOLD");
    cmd.env_remove("BENCHDIFF_BASE");
    cmd.env_remove("BENCHDIFF_COMPARE");
    cmd.env_remove("BENCHDIFF_BENCH_CMD");
    cmd.env_remove("BENCHDIFF_BENCH_ARGS");

    let output = cmd.output().expect("run benchdiff");
    BenchdiffRun {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    }
}

/// Standard flags for driving the committed `bench.sh` fixture.
pub fn bench_sh_args() -> Vec<&'static str> {
    vec!["--bench-cmd", "sh", "--bench-args", "bench.sh"]
}
