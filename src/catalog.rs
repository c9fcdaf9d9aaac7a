//! Level catalog
//!
//! Ordered, read-only list of questions. Loaded once and validated on load so
//! the state machine can rely on every question having exactly one answer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;
use crate::error::{Error, Result};
use crate::session::Lane;

/// Canonical levels shipped with the game
const BUILTIN_LEVELS: &str = include_str!("../data/levels.json");

/// One selectable code snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub correct: bool,
}

/// A prompt with one option per lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: [AnswerOption; LANE_COUNT],
}

impl Question {
    /// Option standing on the given lane
    pub fn option(&self, lane: Lane) -> &AnswerOption {
        &self.options[lane.index()]
    }

    /// Lane holding the correct option
    pub fn correct_lane(&self) -> Option<Lane> {
        self.options
            .iter()
            .position(|o| o.correct)
            .and_then(|i| Lane::new(i as u8))
    }
}

/// Validated, immutable sequence of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog, checking it is non-empty and every question has one answer
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        for (index, question) in questions.iter().enumerate() {
            let found = question.options.iter().filter(|o| o.correct).count();
            if found != 1 {
                return Err(Error::AmbiguousAnswer { index, found });
            }
        }
        Ok(Self { questions })
    }

    /// The ten canonical levels
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEVELS)
    }

    /// Parse a JSON array of questions
    pub fn from_json(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// Load a catalog file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&json)?;
        log::info!(
            "Loaded {} levels from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn get(&self, index: usize) -> Result<&Question> {
        self.questions.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the final level
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn option(label: &str, correct: bool) -> AnswerOption {
        AnswerOption {
            label: label.to_string(),
            correct,
        }
    }

    /// Question whose correct option sits on `correct_lane`
    pub(crate) fn question(prompt: &str, correct_lane: usize) -> Question {
        Question {
            prompt: prompt.to_string(),
            options: [
                option("a", correct_lane == 0),
                option("b", correct_lane == 1),
                option("c", correct_lane == 2),
            ],
        }
    }

    /// Small catalog with answers on lanes 0, 1, 2
    pub(crate) fn three_levels() -> Catalog {
        Catalog::new(vec![
            question("first", 0),
            question("second", 1),
            question("third", 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.last_index(), 9);

        let first = catalog.get(0).unwrap();
        assert_eq!(first.prompt, "Start with a basic conditional statement:");
        assert_eq!(first.correct_lane(), Lane::new(0));
        assert_eq!(catalog.get(1).unwrap().correct_lane(), Lane::new(1));
        assert_eq!(
            catalog.get(9).unwrap().option(Lane::SECOND).label,
            "    return result"
        );
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = three_levels();
        assert!(matches!(
            catalog.get(3),
            Err(Error::OutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(matches!(Catalog::new(vec![]), Err(Error::EmptyCatalog)));
        assert!(matches!(Catalog::from_json("[]"), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_rejects_ambiguous_answers() {
        let mut two_correct = question("q", 0);
        two_correct.options[2].correct = true;
        let none_correct = Question {
            prompt: "q".into(),
            options: [option("a", false), option("b", false), option("c", false)],
        };

        assert!(matches!(
            Catalog::new(vec![question("ok", 1), two_correct]),
            Err(Error::AmbiguousAnswer { index: 1, found: 2 })
        ));
        assert!(matches!(
            Catalog::new(vec![none_correct]),
            Err(Error::AmbiguousAnswer { index: 0, found: 0 })
        ));
    }

    #[test]
    fn test_rejects_wrong_option_count() {
        let json = r#"[{"prompt": "q", "options": [
            {"label": "a", "correct": true},
            {"label": "b", "correct": false}
        ]}]"#;
        assert!(matches!(Catalog::from_json(json), Err(Error::Json(_))));
    }
}
