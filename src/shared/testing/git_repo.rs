use std::path::{Path, PathBuf};
use std::process::Command;

/// A temporary git repository driven through the git CLI.
pub struct TestRepo {
    dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a git Command with isolated config (ignores global/system settings).
    fn git_command(dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir);
        // Ignore global/system git config so tests are isolated from
        // local settings (e.g., GPG signing, aliases, hooks).
        cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
        cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
        cmd
    }

    fn git(&self, args: &[&str]) -> String {
        let output = Self::git_command(&self.path())
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create a new test repository with an initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "--initial-branch=main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.commit_file("README.md", "# test\n", "Initial commit");

        repo
    }

    /// Get the canonicalized path to the repository.
    /// This resolves symlinks (e.g., /var -> /private/var on macOS).
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize path")
    }

    /// Write `content` to `name` without committing.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).expect("Failed to write file");
    }

    /// Write, stage and commit a file. Returns the new commit's SHA.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> String {
        self.write_file(name, content);
        self.git(&["add", name]);
        self.git(&["commit", "-m", message]);
        self.head_sha()
    }

    /// Create a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    pub fn head_sha(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }
}
