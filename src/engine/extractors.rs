// PROMPTOID Role Extractors - Semantic Roles from Raw Text
// Copyright (c) 2026 Xing_The_Creator | PROMPTOID

use serde::Serialize;
use std::sync::Arc;

use crate::engine::capabilities::{
    DepToken, DependencyParser, ModelHub, MorphemeTagger, PosToken,
};
use crate::engine::error::EngineError;
use crate::engine::josa::clean_josa;
use crate::engine::trace::{PipelineTrace, TraceEvent};

/// An adjective claims a subject appearing within this many tokens after
/// it. Proximity heuristic with no semantic guarantee; tune freely.
pub const ADJ_ASSOC_WINDOW: usize = 2;

/// Dictionary-form stem used when no verb is found.
pub const DEFAULT_VERB: &str = "하다";

/// Placeholder head when the parse finds no nominal subject.
pub const DEFAULT_SUBJECT: &str = "무언가";

/// Candidate mood labels for the zero-shot pass. The parenthetical keeps
/// the classifier anchored; only the head word survives into the prompt.
pub const MOOD_LABELS: &[&str] = &[
    "우울한 (슬픈 분위기)",
    "슬픈 (감정이 가라앉은)",
    "어두운 (무거운 느낌)",
    "밝은 (즐거운 느낌)",
    "잔잔한 (조용하고 편안한)",
    "따뜻한 (온화한 감성)",
    "몽환적인 (꿈같고 흐릿한)",
    "즐거운 (유쾌하고 활발한)",
];

pub const MOOD_HYPOTHESIS: &str = "이 문장은 {} 감정의 영상입니다.";

const PLACE_QUESTION: &str = "이 문장에서 장소는 어디인가요?";

/// One subject with the adjectives attributed to it.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectRole {
    pub name: String,
    pub adjectives: Vec<String>,
}

/// Roles extracted from one request. Subjects and place are
/// particle-stripped. Built once, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SemanticRoles {
    pub subjects: Vec<SubjectRole>,
    pub place: Option<String>,
    pub verbs: Vec<String>,
    pub mood: Option<String>,
}

impl SemanticRoles {
    /// First extracted verb stem, or the designed default.
    pub fn main_verb(&self) -> &str {
        self.verbs.first().map(String::as_str).unwrap_or(DEFAULT_VERB)
    }
}

/// Per-request linguistic annotations, derived once per input and
/// dropped after extraction completes.
pub struct LinguisticAnnotations {
    pub dep_tokens: Vec<DepToken>,
    pub pos_tokens: Vec<PosToken>,
    pub stems: Vec<PosToken>,
}

/// Wraps the dependency parser and morpheme tagger into one pass.
pub struct Analyzer {
    parser: Arc<dyn DependencyParser>,
    tagger: Arc<dyn MorphemeTagger>,
}

impl Analyzer {
    pub fn new(parser: Arc<dyn DependencyParser>, tagger: Arc<dyn MorphemeTagger>) -> Self {
        Self { parser, tagger }
    }

    pub async fn annotate(&self, text: &str) -> Result<LinguisticAnnotations, EngineError> {
        Ok(LinguisticAnnotations {
            dep_tokens: self.parser.parse(text).await?,
            pos_tokens: self.tagger.tag(text, false).await?,
            stems: self.tagger.tag(text, true).await?,
        })
    }
}

pub struct RoleExtractor {
    analyzer: Analyzer,
    hub: ModelHub,
    trace: Arc<dyn PipelineTrace>,
}

impl RoleExtractor {
    pub fn new(hub: ModelHub, trace: Arc<dyn PipelineTrace>) -> Self {
        Self {
            analyzer: Analyzer::new(hub.parser.clone(), hub.tagger.clone()),
            hub,
            trace,
        }
    }

    /// Run every extractor over one input.
    ///
    /// Place and mood have no data dependency on the parse-derived roles
    /// and run concurrently. The shared handles tolerate this: no trait
    /// method takes `&mut`, serialization happens inside each backend.
    pub async fn extract(&self, text: &str) -> Result<SemanticRoles, EngineError> {
        let annotations = self.analyzer.annotate(text).await?;

        let (place, mood) = tokio::join!(self.extract_place(text), self.extract_mood(text));
        let place = place?;
        let mood = mood?;

        let raw_subjects = subject_candidates(&annotations.dep_tokens);
        self.trace.event(TraceEvent::SubjectCandidates {
            raw: raw_subjects.clone(),
        });

        let subjects = associate_adjectives(&raw_subjects, &annotations.pos_tokens);
        self.trace.event(TraceEvent::AdjectiveMap {
            per_subject: subjects
                .iter()
                .map(|s| (s.name.clone(), s.adjectives.clone()))
                .collect(),
        });

        let verbs: Vec<String> = annotations
            .stems
            .iter()
            .filter(|t| t.tag == "Verb")
            .map(|t| t.text.clone())
            .collect();
        self.trace.event(TraceEvent::Verbs {
            stems: verbs.clone(),
        });

        Ok(SemanticRoles {
            subjects,
            place,
            verbs,
            mood,
        })
    }

    /// NER first, QA as backup. Both always run: the trace consumer wants
    /// both candidate sets even when NER already settles the pick.
    async fn extract_place(&self, text: &str) -> Result<Option<String>, EngineError> {
        let entities = self.hub.ner.entities(text).await?;
        let ner_places: Vec<String> = entities
            .iter()
            .filter(|e| e.entity_group == "LOC")
            .map(|e| e.word.clone())
            .collect();

        let qa_place = self.hub.qa.answer(PLACE_QUESTION, text).await?.trim().to_string();

        self.trace.event(TraceEvent::PlaceCandidates {
            ner: ner_places.clone(),
            qa: qa_place.clone(),
        });

        let chosen = ner_places.into_iter().next().unwrap_or(qa_place);
        let cleaned = clean_josa(&chosen).to_string();
        Ok((!cleaned.is_empty()).then_some(cleaned))
    }

    async fn extract_mood(&self, text: &str) -> Result<Option<String>, EngineError> {
        let ranked = self
            .hub
            .classifier
            .classify(text, MOOD_LABELS, MOOD_HYPOTHESIS)
            .await?;
        // Head word only; the parenthetical gloss is for the classifier.
        let mood = ranked
            .first()
            .and_then(|top| top.label.split(' ').next().map(str::to_string))
            .filter(|m| !m.is_empty());
        self.trace.event(TraceEvent::Mood { label: mood.clone() });
        Ok(mood)
    }
}

/// Every nominal subject of the parse, sentence order, surface form.
fn subject_candidates(tokens: &[DepToken]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.deprel == "nsubj")
        .map(|t| t.text.clone())
        .collect()
}

/// Attach adjectives to subjects by token proximity: an adjective at
/// index `i` claims a subject whose token index `s` satisfies
/// `i < s <= i + ADJ_ASSOC_WINDOW`.
fn associate_adjectives(raw_subjects: &[String], tokens: &[PosToken]) -> Vec<SubjectRole> {
    raw_subjects
        .iter()
        .map(|raw| {
            let name = clean_josa(raw).to_string();
            let subject_index = tokens.iter().position(|t| !name.is_empty() && t.text.contains(&name));
            let adjectives = match subject_index {
                Some(s) => tokens
                    .iter()
                    .enumerate()
                    .filter(|(i, t)| t.tag == "Adjective" && *i < s && s - *i <= ADJ_ASSOC_WINDOW)
                    .map(|(_, t)| t.text.clone())
                    .collect(),
                None => Vec::new(),
            };
            SubjectRole { name, adjectives }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(text: &str, tag: &str) -> PosToken {
        PosToken {
            text: text.to_string(),
            tag: tag.to_string(),
        }
    }

    fn dep(text: &str, deprel: &str) -> DepToken {
        DepToken {
            text: text.to_string(),
            lemma: text.to_string(),
            upos: "NOUN".to_string(),
            deprel: deprel.to_string(),
        }
    }

    #[test]
    fn collects_every_nominal_subject_in_order() {
        let tokens = vec![
            dep("강아지가", "nsubj"),
            dep("공원에서", "obl"),
            dep("고양이가", "nsubj"),
        ];
        assert_eq!(subject_candidates(&tokens), vec!["강아지가", "고양이가"]);
    }

    #[test]
    fn adjective_attaches_within_window() {
        let tokens = vec![
            pos("귀여운", "Adjective"),
            pos("강아지가", "Noun"),
            pos("뛰논다", "Verb"),
        ];
        let roles = associate_adjectives(&["강아지가".to_string()], &tokens);
        assert_eq!(roles[0].name, "강아지");
        assert_eq!(roles[0].adjectives, vec!["귀여운"]);
    }

    #[test]
    fn adjective_outside_window_is_ignored() {
        let tokens = vec![
            pos("밝은", "Adjective"),
            pos("아주", "Adverb"),
            pos("정말", "Adverb"),
            pos("강아지가", "Noun"),
        ];
        let roles = associate_adjectives(&["강아지가".to_string()], &tokens);
        assert!(roles[0].adjectives.is_empty());
    }

    #[test]
    fn adjective_after_subject_is_ignored() {
        let tokens = vec![pos("강아지가", "Noun"), pos("귀여운", "Adjective")];
        let roles = associate_adjectives(&["강아지가".to_string()], &tokens);
        assert!(roles[0].adjectives.is_empty());
    }

    #[test]
    fn main_verb_defaults_to_hada() {
        let roles = SemanticRoles {
            subjects: Vec::new(),
            place: None,
            verbs: Vec::new(),
            mood: None,
        };
        assert_eq!(roles.main_verb(), DEFAULT_VERB);
    }
}
