pub mod ai;
pub mod clipboard;
pub mod git;
pub mod github;
