use std::{
    env, fs,
    path::PathBuf,
    process::{self, Output},
};

use tempfile::TempDir;

// Environment for the integration tests: a temporary working directory
// holding a catalog fixture, plus the path to the bayou executable.
pub struct TestEnv {
    pub temp_dir: TempDir,
    bayou_exe: PathBuf,
}

impl TestEnv {
    pub fn new(catalog: &str) -> TestEnv {
        let temp_dir = TempDir::new().expect("working directory");
        fs::write(temp_dir.path().join("tours.json"), catalog).expect("catalog fixture");

        TestEnv {
            temp_dir,
            bayou_exe: find_exe(),
        }
    }

    // An environment with no catalog file at all.
    pub fn empty() -> TestEnv {
        TestEnv {
            temp_dir: TempDir::new().expect("working directory"),
            bayou_exe: find_exe(),
        }
    }

    // Runs `bayou --list` with the given extra arguments and returns stdout.
    pub fn list(&self, args: &[&str]) -> String {
        let output = self.run_command(args);

        assert!(
            output.status.success(),
            "bayou failed unexpectedly:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("stdout should be utf8")
    }

    // Assert that calling bayou with the specified arguments produces the
    // expected error.
    pub fn assert_error_msg(&self, args: &[&str], expected: &str) {
        let output = self.run_command(args);
        let stderr = String::from_utf8(output.stderr).expect("error message should be utf8");

        assert!(
            !output.status.success(),
            "bayou should have failed, stdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        );

        assert!(
            stderr.contains(expected),
            "\n\
            ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~\n\
            The error message:\n\
            {:?}\n\
            does not contain the expected message:\n\
            {:?}\n\
            ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~\n",
            stderr,
            expected
        );
    }

    fn run_command(&self, args: &[&str]) -> Output {
        let mut cmd = process::Command::new(&self.bayou_exe);
        cmd.current_dir(self.temp_dir.path());
        cmd.arg("--list");
        cmd.args(args);

        cmd.output().expect("bayou output")
    }

    // Runs bayou without forcing `--list`, for exercising the arg parser.
    pub fn run_raw(&self, args: &[&str]) -> Output {
        let mut cmd = process::Command::new(&self.bayou_exe);
        cmd.current_dir(self.temp_dir.path());
        cmd.args(args);

        cmd.output().expect("bayou output")
    }
}

// Find the bayou executable.
fn find_exe() -> PathBuf {
    // The tests exe is in target/debug/deps, the bayou exe is in target/debug
    let root = env::current_exe()
        .expect("tests executable")
        .parent()
        .expect("tests executable directory")
        .parent()
        .expect("bayou executable directory")
        .to_path_buf();

    root.join(format!("bayou{}", env::consts::EXE_SUFFIX))
}
