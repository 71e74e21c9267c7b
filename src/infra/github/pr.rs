use serde::Deserialize;

/// PR state as reported by `gh pr list --json state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrState {
    Open,
    Closed,
    Merged,
    #[serde(other)]
    Unknown,
}

impl PrState {
    pub fn marker(self) -> &'static str {
        match self {
            PrState::Open => "● open",
            PrState::Closed => "✕ closed",
            PrState::Merged => "◆ merged",
            PrState::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrAuthor {
    pub login: String,
}

/// Entry of `gh pr list --json number,title,author,state`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub author: PrAuthor,
    pub state: PrState,
}

impl PullRequestSummary {
    /// Label shown in the pull request picker.
    pub fn label(&self) -> String {
        format!(
            "#{}: {} (@{}) {}",
            self.number,
            self.title,
            self.author.login,
            self.state.marker()
        )
    }
}
