// PROMPTOID Prompt Diff - Edit Highlighting
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

/// Sentinel returned when the edited prompt matches the original.
pub const NO_DIFF_SENTINEL: &str = "(No Differences Found)";

/// Highlight what the user changed in the edited prompt.
///
/// Equal spans are dropped; each run of changed characters in the edited
/// string is wrapped as `[segment]`. Pure deletions have no anchor in
/// the edited text, so only the edited side is surfaced.
pub fn prompt_diff(original: &str, edited: &str) -> String {
    let original = original.trim();
    let edited = edited.trim();

    let mut segments: Vec<String> = Vec::new();
    let mut run = String::new();
    for step in diff::chars(original, edited) {
        match step {
            diff::Result::Right(c) => run.push(c),
            _ => flush_run(&mut run, &mut segments),
        }
    }
    flush_run(&mut run, &mut segments);

    if segments.is_empty() {
        return NO_DIFF_SENTINEL.to_string();
    }
    segments
        .into_iter()
        .map(|s| format!("[{s}]"))
        .collect()
}

fn flush_run(run: &mut String, segments: &mut Vec<String>) {
    let trimmed = run.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_return_sentinel() {
        assert_eq!(prompt_diff("강아지 영상", "강아지 영상"), NO_DIFF_SENTINEL);
    }

    #[test]
    fn whitespace_only_difference_returns_sentinel() {
        assert_eq!(prompt_diff("  강아지 영상 ", "강아지 영상"), NO_DIFF_SENTINEL);
    }

    #[test]
    fn appended_text_is_bracketed() {
        let out = prompt_diff("강아지 영상", "강아지 영상 느리게");
        assert_eq!(out, "[느리게]");
    }

    #[test]
    fn pure_deletion_still_reports_sentinel_text_absent() {
        // Nothing survives on the edited side, so nothing is highlighted.
        let out = prompt_diff("귀여운 강아지 영상", "강아지 영상");
        assert_eq!(out, NO_DIFF_SENTINEL);
    }

    #[test]
    fn multiple_changed_runs_each_get_brackets() {
        let out = prompt_diff("a b c", "x b y");
        assert_eq!(out, "[x][y]");
    }
}
