// PROMPTOID Prompt Composer - Deterministic Clause Assembly
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use crate::engine::extractors::{SemanticRoles, DEFAULT_SUBJECT};

/// Fixed tail: every prompt requests a ten-second cut.
const TAIL_LITERAL: &str = "10초 영상";

/// A style hint already carrying this word overrides the mood clause.
const MOOD_WORD: &str = "분위기";

/// Assemble the final prompt sentence.
///
/// Pure by contract: identical inputs must yield the identical string,
/// because the output is what future requests are matched against.
pub fn compose(roles: &SemanticRoles, action_phrase: &str, style_hint: &str) -> String {
    let mut mood_clause = roles
        .mood
        .as_ref()
        .map(|m| format!("{m} 분위기의"))
        .unwrap_or_default();
    let style_clause = style_hint.trim();

    // A recalled style that already talks about 분위기 wins outright.
    if style_clause.contains(MOOD_WORD) {
        mood_clause.clear();
    }

    let tail = collapse_spaces(&format!("{mood_clause} {style_clause} {TAIL_LITERAL}"));

    let mut parts: Vec<String> = Vec::new();
    // A bare placeholder subject is still a subject; this clause never drops.
    parts.push(format!("{}가", subject_phrase(roles)));
    if let Some(place) = roles.place.as_deref() {
        if !place.is_empty() {
            parts.push(format!("{place}에서"));
        }
    }
    let action = action_phrase.trim();
    if !action.is_empty() {
        parts.push(action.to_string());
    }
    parts.push(tail);

    collapse_spaces(&parts.join(" "))
}

/// Adjectives + subject per head, heads joined with 와. An empty parse
/// falls back to the placeholder so the sentence always has a head.
fn subject_phrase(roles: &SemanticRoles) -> String {
    let phrases: Vec<String> = roles
        .subjects
        .iter()
        .filter(|s| !s.name.is_empty())
        .map(|s| {
            let mut words = s.adjectives.clone();
            words.push(s.name.clone());
            words.join(" ")
        })
        .collect();
    if phrases.is_empty() {
        return DEFAULT_SUBJECT.to_string();
    }
    phrases.join("와 ")
}

/// Single-space normalization; also trims both ends.
fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::extractors::SubjectRole;

    fn roles(
        subjects: Vec<(&str, Vec<&str>)>,
        place: Option<&str>,
        mood: Option<&str>,
    ) -> SemanticRoles {
        SemanticRoles {
            subjects: subjects
                .into_iter()
                .map(|(name, adjectives)| SubjectRole {
                    name: name.to_string(),
                    adjectives: adjectives.into_iter().map(str::to_string).collect(),
                })
                .collect(),
            place: place.map(str::to_string),
            verbs: vec!["뛰놀다".to_string()],
            mood: mood.map(str::to_string),
        }
    }

    #[test]
    fn composes_full_sentence() {
        let r = roles(vec![("강아지", vec!["귀여운"])], Some("공원"), Some("밝은"));
        assert_eq!(
            compose(&r, "뛰노는 장면이 담긴", ""),
            "귀여운 강아지가 공원에서 뛰노는 장면이 담긴 밝은 분위기의 10초 영상"
        );
    }

    #[test]
    fn style_hint_with_mood_word_suppresses_mood_clause() {
        let r = roles(vec![("강아지", vec![])], None, Some("밝은"));
        let out = compose(&r, "", "잔잔한 분위기");
        assert!(out.contains("잔잔한 분위기"));
        assert!(!out.contains("밝은 분위기의"));
    }

    #[test]
    fn placeholder_subject_when_parse_is_empty() {
        let r = roles(vec![], None, None);
        assert_eq!(compose(&r, "", ""), "무언가가 10초 영상");
    }

    #[test]
    fn multiple_subjects_join_with_wa() {
        let r = roles(vec![("강아지", vec!["귀여운"]), ("고양이", vec![])], None, None);
        let out = compose(&r, "", "");
        assert!(out.starts_with("귀여운 강아지와 고양이가"));
    }

    #[test]
    fn never_emits_double_or_edge_spaces() {
        let cases = [
            compose(&roles(vec![], None, None), "", ""),
            compose(&roles(vec![("강아지", vec![])], None, Some("밝은")), "", "  "),
            compose(&roles(vec![("강아지", vec![])], Some("공원"), None), "", "잔잔한 분위기"),
        ];
        for out in cases {
            assert!(!out.contains("  "), "double space in {out:?}");
            assert_eq!(out, out.trim(), "edge space in {out:?}");
            assert!(!out.is_empty());
        }
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let r = roles(vec![("강아지", vec!["귀여운"])], Some("공원"), Some("밝은"));
        assert_eq!(
            compose(&r, "뛰노는 장면이 담긴", "x"),
            compose(&r, "뛰노는 장면이 담긴", "x")
        );
    }
}
