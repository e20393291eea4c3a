use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Runs the `eisen` binary against a throwaway database.
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    pub fn db_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("test.db")
    }

    /// A command that reads no config file and logs nothing.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("eisen").expect("Failed to find eisen binary");
        cmd.current_dir(self.temp_dir.path())
            .env("EISEN_DATABASE_PATH", self.db_path())
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// All tasks as reported by `list --json`.
    pub fn tasks(&self) -> Vec<Value> {
        let output = self
            .command()
            .args(["list", "--json"])
            .output()
            .expect("Failed to run list");
        assert!(output.status.success(), "list --json failed");
        serde_json::from_slice(&output.stdout).expect("list --json printed invalid JSON")
    }

    pub fn task(&self, id: &str) -> Value {
        self.tasks()
            .into_iter()
            .find(|task| task["id"] == id)
            .expect("Task not listed")
    }

    /// Adds a task and returns its full id.
    pub fn add(&self, title: &str, extra: &[&str]) -> String {
        let mut args = vec!["add", title];
        args.extend_from_slice(extra);
        self.run_success(&args);

        self.tasks()
            .into_iter()
            .find(|task| task["title"] == title)
            .and_then(|task| task["id"].as_str().map(String::from))
            .expect("Added task not listed")
    }
}

pub mod assertions {
    use predicates::prelude::*;

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
