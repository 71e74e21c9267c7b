use super::collect::Subject;
use crate::shared::config::Verbosity;

const REVIEW_NOTE: &str =
    "Be specific and don't describe broad intent; the description is for code review.";

/// Builds the instruction passed to the AI CLI; the diff itself goes to stdin.
pub fn build(subject: &Subject, verbosity: Verbosity) -> String {
    let task = match subject {
        Subject::Commit(_) => "Provide a summary for a commit message based on the following diff. \
             Describe the changes and the motivation."
            .to_string(),
        Subject::PullRequest(_) => "Provide an explanation for a pull request suitable for a GitHub \
             description, based on the following diff. Format it as Markdown with 'Summary' and \
             'Changes' sections."
            .to_string(),
        Subject::Diff(reference) => format!(
            "Provide a summary of the changes between the current repository state and commit \
             '{reference}'. Describe what has changed and the main differences."
        ),
    };

    let mut prompt = format!("{task} {REVIEW_NOTE}");
    if let Some(guidance) = length_guidance(verbosity) {
        prompt.push(' ');
        prompt.push_str(guidance);
    }
    prompt.push_str(" Here is the diff:");
    prompt
}

fn length_guidance(verbosity: Verbosity) -> Option<&'static str> {
    match verbosity {
        Verbosity::Concise => Some(
            "Keep it short: a few sentences or bullet points covering only the most important changes.",
        ),
        Verbosity::Balanced => None,
        Verbosity::Detailed => Some(
            "Be thorough: walk through each significant change, including notable implementation \
             details and their likely impact.",
        ),
    }
}
