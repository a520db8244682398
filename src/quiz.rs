//! Multiple-choice quiz about one continent

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{ContinentRecord, CONTINENTS};

pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// The continent's signature (first listed) animal
    Animal,
    Area,
    /// The continent's first fun fact
    Fact,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [QuestionKind::Animal, QuestionKind::Area, QuestionKind::Fact];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Almost { correct: &'static str },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }

    pub fn message(&self) -> String {
        match self {
            Feedback::Correct => "¡Correcto! 🎉 Eres un experto en geografía.".to_string(),
            Feedback::Almost { correct } => format!("¡Casi! La respuesta correcta es: {}", correct),
        }
    }
}

/// One round: question, shuffled options, and at most one answer
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub continent: &'static str,
    pub kind: QuestionKind,
    pub question: String,
    pub options: Vec<&'static str>,
    correct: &'static str,
    feedback: Option<Feedback>,
}

impl Quiz {
    /// Roll a random question type for `continent`
    pub fn generate<R: Rng + ?Sized>(continent: &'static ContinentRecord, rng: &mut R) -> Self {
        let kind = QuestionKind::ALL[rng.random_range(0..QuestionKind::ALL.len())];
        Self::with_kind(continent, kind, rng)
    }

    pub fn with_kind<R: Rng + ?Sized>(continent: &'static ContinentRecord, kind: QuestionKind, rng: &mut R) -> Self {
        let name = continent.name;
        let (question, correct, distractors) = match kind {
            QuestionKind::Animal => {
                let correct = continent.signature_animal();
                // signature animals would give away other continents' answers
                let pool: Vec<&'static str> = CONTINENTS
                    .iter()
                    .flat_map(|c| c.animals.iter().copied())
                    .filter(|a| *a != correct && !CONTINENTS.iter().any(|c| c.signature_animal() == *a))
                    .collect();
                (format!("¿Qué animal característico vive en {}?", name), correct, pool)
            }
            QuestionKind::Area => {
                let correct = continent.area;
                let pool = CONTINENTS.iter().map(|c| c.area).filter(|a| *a != correct).collect();
                (format!("¿Cuál es el área aproximada de {}?", name), correct, pool)
            }
            QuestionKind::Fact => {
                let correct = continent.fun_facts[0];
                let pool = CONTINENTS
                    .iter()
                    .flat_map(|c| c.fun_facts.iter().copied())
                    .filter(|f| *f != correct)
                    .collect();
                (format!("¿Cuál es un dato curioso sobre {}?", name), correct, pool)
            }
        };

        Self {
            continent: name,
            kind,
            question,
            options: build_options(correct, distractors, rng),
            correct,
            feedback: None,
        }
    }

    pub fn correct_answer(&self) -> &'static str {
        self.correct
    }

    /// Record an answer. Later answers in the same round are ignored and
    /// return `None`.
    pub fn answer(&mut self, option: &str) -> Option<&Feedback> {
        if self.feedback.is_some() {
            return None;
        }
        self.feedback = Some(if option == self.correct {
            Feedback::Correct
        } else {
            Feedback::Almost { correct: self.correct }
        });
        self.feedback.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_answered(&self) -> bool {
        self.feedback.is_some()
    }
}

/// Correct answer plus up to three distinct distractors, shuffled
fn build_options<R: Rng + ?Sized>(
    correct: &'static str,
    mut pool: Vec<&'static str>,
    rng: &mut R,
) -> Vec<&'static str> {
    pool.sort_unstable();
    pool.dedup();
    pool.retain(|p| *p != correct);
    pool.shuffle(rng);

    let mut options = vec![correct];
    options.extend(pool.into_iter().take(MAX_OPTIONS - 1));
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::continent_by_index;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_well_formed(quiz: &Quiz) {
        assert!(quiz.options.len() <= MAX_OPTIONS);
        assert_eq!(quiz.options.iter().filter(|o| **o == quiz.correct_answer()).count(), 1);
        let mut sorted = quiz.options.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), quiz.options.len());
    }

    #[test]
    fn every_kind_for_every_continent_is_well_formed() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for continent in CONTINENTS.iter() {
            for kind in QuestionKind::ALL {
                let quiz = Quiz::with_kind(continent, kind, &mut rng);
                assert_well_formed(&quiz);
                assert_eq!(quiz.options.len(), MAX_OPTIONS);
            }
        }
    }

    #[test]
    fn animal_distractors_skip_signature_animals() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let africa = continent_by_index(0).unwrap();
        for _ in 0..20 {
            let quiz = Quiz::with_kind(africa, QuestionKind::Animal, &mut rng);
            for option in &quiz.options {
                if *option != quiz.correct_answer() {
                    assert!(CONTINENTS.iter().all(|c| c.signature_animal() != *option));
                }
            }
        }
    }

    #[test]
    fn only_first_answer_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let continent = continent_by_index(1).unwrap();
        let mut quiz = Quiz::with_kind(continent, QuestionKind::Area, &mut rng);
        let wrong = *quiz.options.iter().find(|o| **o != quiz.correct_answer()).unwrap();

        let first = quiz.answer(wrong).cloned();
        assert_eq!(first, Some(Feedback::Almost { correct: continent.area }));
        assert!(quiz.answer(continent.area).is_none());
        assert!(!quiz.feedback().unwrap().is_correct());
    }

    #[test]
    fn feedback_messages() {
        assert_eq!(Feedback::Correct.message(), "¡Correcto! 🎉 Eres un experto en geografía.");
        assert_eq!(
            Feedback::Almost { correct: "Canguro" }.message(),
            "¡Casi! La respuesta correcta es: Canguro"
        );
    }

    #[test]
    fn same_seed_same_quiz() {
        let continent = continent_by_index(2).unwrap();
        let a = Quiz::generate(continent, &mut ChaCha8Rng::seed_from_u64(42));
        let b = Quiz::generate(continent, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
