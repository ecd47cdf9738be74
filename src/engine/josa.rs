// PROMPTOID Josa Stripper - Particle Removal for Korean Surface Forms
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

/// Grammatical particles that attach to noun-like surface forms.
/// Ordered longest-first: "으로" must win over "로", "에서" over a word
/// that merely ends in "서" after an earlier strip.
const JOSA_SUFFIXES: &[&str] = &[
    "에서", "에게", "으로", "로", "는", "은", "가", "이", "를", "을", "에", "도", "만",
];

/// Strip a trailing grammatical particle from a surface word.
///
/// The first matching suffix is removed; a word carrying no known
/// particle comes back unchanged, which makes the operation idempotent.
pub fn clean_josa(word: &str) -> &str {
    for josa in JOSA_SUFFIXES {
        if let Some(stem) = word.strip_suffix(josa) {
            return stem;
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_subject_marker() {
        assert_eq!(clean_josa("강아지가"), "강아지");
        assert_eq!(clean_josa("고양이는"), "고양이");
    }

    #[test]
    fn strips_longest_suffix_first() {
        // "으로" must be removed whole, not just the trailing "로".
        assert_eq!(clean_josa("학교으로"), "학교");
        assert_eq!(clean_josa("공원에서"), "공원");
    }

    #[test]
    fn idempotent_on_clean_words() {
        assert_eq!(clean_josa("공원"), "공원");
        assert_eq!(clean_josa(clean_josa("공원에서")), "공원");
    }

    #[test]
    fn unknown_word_unchanged() {
        assert_eq!(clean_josa("park"), "park");
        assert_eq!(clean_josa(""), "");
    }
}
