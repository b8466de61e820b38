//! Progressive onboarding
//!
//! An [`OnboardingSession`] walks a subtype's extracted questions one at a
//! time. Conditional questions are shown only while their governing answer
//! matches, and a required question without `skipable` must be answered before
//! the session moves past it. Submitting merges the answers into a single
//! value and runs typed validation on it.

use crate::engine::{ValidationEngine, ValidationResult};
use crate::{Error, Result};
use hearth_model::{MaintainableData, MaintainableType};
use hearth_schema::{Question, SubtypeRegistry, extract_questions};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// One-question-at-a-time form state for a single subtype
#[derive(Debug, Clone)]
pub struct OnboardingSession {
    maintainable_type: MaintainableType,
    subtype: String,
    questions: Vec<Question>,
    /// Keyed by dotted field path
    answers: Map<String, Value>,
    /// Lowest index the current question may have
    position: usize,
}

impl OnboardingSession {
    /// Start a session for a registered subtype, pre-filling default values
    ///
    /// # Errors
    ///
    /// Returns an error if the subtype is not registered.
    pub fn start(registry: &SubtypeRegistry, subtype: &str) -> Result<Self> {
        let entry = registry
            .get(subtype)
            .ok_or_else(|| hearth_schema::Error::UnknownSubtype(subtype.to_string()))?;
        let questions = extract_questions(entry.schema());
        let answers = questions
            .iter()
            .filter_map(|q| {
                q.metadata
                    .default_value
                    .clone()
                    .map(|value| (q.field.clone(), value))
            })
            .collect();
        debug!(
            "Starting onboarding for '{}' with {} questions",
            subtype,
            questions.len()
        );

        Ok(Self {
            maintainable_type: entry.maintainable_type(),
            subtype: subtype.to_string(),
            questions,
            answers,
            position: 0,
        })
    }

    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// All extracted questions, visible or not
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions visible under the current answers
    #[must_use]
    pub fn visible_questions(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.is_visible(&self.answers))
            .collect()
    }

    /// The question awaiting input, or `None` once every visible question is passed
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.current_index().map(|i| &self.questions[i])
    }

    #[must_use]
    pub fn answers(&self) -> &Map<String, Value> {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, field: &str) -> Option<&Value> {
        self.answers.get(field)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_index().is_none()
    }

    /// Visible questions not yet passed, including the current one
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions
            .iter()
            .skip(self.position)
            .filter(|q| q.is_visible(&self.answers))
            .count()
    }

    /// Record an answer to the current question and move on
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentQuestion`] if the session is complete.
    pub fn answer(&mut self, value: impl Into<Value>) -> Result<()> {
        let index = self.current_index().ok_or(Error::NoCurrentQuestion)?;
        let field = self.questions[index].field.clone();
        trace!("Answered '{}'", field);
        self.answers.insert(field, value.into());
        self.position = index + 1;
        Ok(())
    }

    /// Clear any answer to the current question and move on
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSkippable`] for a required question without
    /// `skipable`, or [`Error::NoCurrentQuestion`] if the session is complete.
    pub fn skip(&mut self) -> Result<()> {
        let index = self.current_index().ok_or(Error::NoCurrentQuestion)?;
        let question = &self.questions[index];
        if question.blocks_advance() {
            return Err(Error::NotSkippable(question.field.clone()));
        }
        self.answers.remove(&question.field);
        self.position = index + 1;
        Ok(())
    }

    /// Move on, keeping the current answer (or pre-filled default)
    ///
    /// # Errors
    ///
    /// Returns [`Error::AnswerRequired`] if the current question blocks
    /// advancing and has no answer, or [`Error::NoCurrentQuestion`] if the
    /// session is complete.
    pub fn advance(&mut self) -> Result<()> {
        let index = self.current_index().ok_or(Error::NoCurrentQuestion)?;
        let question = &self.questions[index];
        if question.blocks_advance() && !self.answers.contains_key(&question.field) {
            return Err(Error::AnswerRequired(question.field.clone()));
        }
        self.position = index + 1;
        Ok(())
    }

    /// Return to the previous visible question. Answers are kept.
    ///
    /// Returns `false` when already at the first question.
    pub fn back(&mut self) -> bool {
        let upper = self.current_index().unwrap_or(self.questions.len());
        match (0..upper)
            .rev()
            .find(|&i| self.questions[i].is_visible(&self.answers))
        {
            Some(previous) => {
                self.position = previous;
                true
            }
            None => false,
        }
    }

    /// The accumulated answers as one item value: dotted paths become nested
    /// objects, hidden questions' answers are left out, and `type`/`subtype`
    /// are always set from the session's subtype.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for question in self.visible_questions() {
            if let Some(value) = self.answers.get(&question.field) {
                insert_path(&mut root, &question.field, value.clone());
            }
        }
        root.insert(
            "type".to_string(),
            Value::String(self.maintainable_type.as_str().to_string()),
        );
        root.insert("subtype".to_string(), Value::String(self.subtype.clone()));
        Value::Object(root)
    }

    /// Validate the merged answers against the subtype's full schema
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] if visible questions remain.
    pub fn submit(&self, engine: &ValidationEngine<'_>) -> Result<ValidationResult<MaintainableData>> {
        if !self.is_complete() {
            return Err(Error::Incomplete(self.remaining()));
        }
        debug!("Submitting onboarding for '{}'", self.subtype);
        Ok(engine.validate_typed(&self.to_value(), &self.subtype))
    }

    fn current_index(&self) -> Option<usize> {
        (self.position..self.questions.len()).find(|&i| self.questions[i].is_visible(&self.answers))
    }
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            root.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = root
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(nested) = child {
                insert_path(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_schema::registry::global;
    use serde_json::json;

    fn water_heater() -> OnboardingSession {
        OnboardingSession::start(global(), "water-heater").unwrap()
    }

    fn field(session: &OnboardingSession) -> &str {
        session.current().unwrap().field.as_str()
    }

    #[test]
    fn test_defaults_prefilled() {
        let session = water_heater();
        assert_eq!(field(&session), "type");
        assert_eq!(session.answer_for("type"), Some(&json!("system")));
        assert_eq!(session.answer_for("label"), Some(&json!("Water heater")));
    }

    #[test]
    fn test_required_question_blocks_advance() {
        let mut session = water_heater();
        for _ in 0..4 {
            session.advance().unwrap();
        }
        assert_eq!(field(&session), "metadata.fuel");
        assert!(matches!(session.advance(), Err(Error::AnswerRequired(f)) if f == "metadata.fuel"));
        assert!(matches!(session.skip(), Err(Error::NotSkippable(_))));
        session.answer("gas").unwrap();
        assert_eq!(field(&session), "metadata.style");
    }

    #[test]
    fn test_conditional_question_follows_answer() {
        let mut session = water_heater();
        for _ in 0..4 {
            session.advance().unwrap();
        }
        session.answer("electric").unwrap();
        session.answer("tankless").unwrap();
        assert!(session.is_complete());

        assert!(session.back());
        assert_eq!(field(&session), "metadata.style");
        session.answer("tank").unwrap();
        assert_eq!(field(&session), "metadata.tankSize");
        session.answer(50).unwrap();
        assert!(session.is_complete());
    }

    #[test]
    fn test_hidden_answers_not_submitted() {
        let mut session = water_heater();
        for _ in 0..4 {
            session.advance().unwrap();
        }
        session.answer("gas").unwrap();
        session.answer("tank").unwrap();
        session.answer(40).unwrap();
        session.back();
        session.back();
        session.answer("tankless").unwrap();

        let value = session.to_value();
        assert_eq!(value["metadata"], json!({"fuel": "gas", "style": "tankless"}));
    }

    #[test]
    fn test_submit_merges_nested_answers() {
        let mut session = water_heater();
        session.advance().unwrap();
        session.answer("Basement heater").unwrap();
        session.answer("good").unwrap();
        session.skip().unwrap();
        assert!(matches!(session.submit(&ValidationEngine::new()), Err(Error::Incomplete(_))));
        session.answer("gas").unwrap();
        session.answer("tank").unwrap();
        session.answer(50).unwrap();

        let data = session
            .submit(&ValidationEngine::new())
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(data.label.as_deref(), Some("Basement heater"));
        assert_eq!(data.location, None);
        assert_eq!(data.metadata_field("tankSize"), Some(&json!(50)));
    }

    #[test]
    fn test_submit_reports_invalid_answers() {
        let mut session = water_heater();
        for _ in 0..4 {
            session.advance().unwrap();
        }
        session.answer("gas").unwrap();
        session.answer("tank").unwrap();
        session.answer(-1).unwrap();
        let result = session.submit(&ValidationEngine::new()).unwrap();
        assert_eq!(
            result.errors().unwrap().get("metadata.tankSize").unwrap(),
            ["Tank size must be positive".to_string()]
        );
    }

    #[test]
    fn test_answer_after_completion_fails() {
        let mut session = OnboardingSession::start(global(), "dishwasher").unwrap();
        while !session.is_complete() {
            session.advance().unwrap();
        }
        assert!(matches!(session.answer("x"), Err(Error::NoCurrentQuestion)));
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_back_at_start() {
        let mut session = water_heater();
        assert!(!session.back());
    }

    #[test]
    fn test_unknown_subtype() {
        let err = OnboardingSession::start(global(), "hovercraft").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(hearth_schema::Error::UnknownSubtype(_))
        ));
    }

    #[test]
    fn test_insert_path() {
        let mut root = Map::new();
        insert_path(&mut root, "metadata.fuel", json!("gas"));
        insert_path(&mut root, "metadata.btu", json!(1));
        insert_path(&mut root, "label", json!("x"));
        assert_eq!(
            Value::Object(root),
            json!({"metadata": {"fuel": "gas", "btu": 1}, "label": "x"})
        );
    }
}
