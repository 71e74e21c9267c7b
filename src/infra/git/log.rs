/// One line of `git log --oneline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Abbreviated SHA.
    pub sha: String,
    /// Subject, including `--decorate` ref names if present.
    pub subject: String,
}

impl CommitSummary {
    /// Label shown in the commit picker.
    pub fn label(&self) -> String {
        format!("{}: {}", self.sha, self.subject)
    }
}

/// Parses `git log --oneline` output. Blank lines are skipped.
pub fn parse_oneline_log(output: &str) -> Vec<CommitSummary> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (sha, subject) = line.split_once(' ').unwrap_or((line, ""));
            let subject = subject.trim();
            CommitSummary {
                sha: sha.to_string(),
                subject: if subject.is_empty() {
                    "(no message)".to_string()
                } else {
                    subject.to_string()
                },
            }
        })
        .collect()
}
