use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use edu_viz::catalog::CONTINENTS;
use edu_viz::quiz::{Feedback, Quiz, MAX_OPTIONS};
use edu_viz::scenes::GlobeState;

#[cfg(test)]
mod quiz_tests {
    use super::*;

    #[test]
    fn test_generated_quizzes_are_well_formed_across_seeds() {
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let continent = &CONTINENTS[seed as usize % CONTINENTS.len()];
            let quiz = Quiz::generate(continent, &mut rng);

            assert_eq!(quiz.continent, continent.name);
            assert!(quiz.options.len() <= MAX_OPTIONS, "seed {} gave too many options", seed);
            assert_eq!(
                quiz.options.iter().filter(|o| **o == quiz.correct_answer()).count(),
                1,
                "seed {}: correct answer must appear exactly once",
                seed
            );
            let mut distinct = quiz.options.clone();
            distinct.sort_unstable();
            distinct.dedup();
            assert_eq!(distinct.len(), quiz.options.len(), "seed {}: duplicate options", seed);
            assert!(quiz.question.contains(continent.name));
        }
    }

    #[test]
    fn test_correct_answer_position_varies() {
        let continent = &CONTINENTS[2];
        let positions: std::collections::HashSet<usize> = (0..64)
            .map(|seed| {
                let quiz = Quiz::generate(continent, &mut ChaCha8Rng::seed_from_u64(seed));
                quiz.options.iter().position(|o| *o == quiz.correct_answer()).unwrap()
            })
            .collect();
        assert!(positions.len() > 1, "options should be shuffled");
    }

    #[test]
    fn test_quiz_needs_a_selected_continent() {
        let mut state = GlobeState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        state.start_quiz(&mut rng);
        assert!(state.quiz.is_none());
        assert!(state.answer("León").is_none());
    }

    #[test]
    fn test_first_answer_locks_the_round() {
        let mut state = GlobeState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        state.select(&CONTINENTS[0]);
        state.start_quiz(&mut rng);

        let correct = state.quiz.as_ref().unwrap().correct_answer();
        assert_eq!(state.answer(correct), Some(Feedback::Correct));
        assert!(state.answer("otra cosa").is_none(), "later answers are ignored");
        assert!(state.quiz.as_ref().unwrap().is_answered());

        // "new quiz" rolls a fresh, unanswered round
        state.start_quiz(&mut rng);
        assert!(!state.quiz.as_ref().unwrap().is_answered());
    }

    #[test]
    fn test_wrong_answer_reveals_the_right_one() {
        let mut state = GlobeState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        state.select(&CONTINENTS[3]);
        state.start_quiz(&mut rng);

        let quiz = state.quiz.as_ref().unwrap();
        let correct = quiz.correct_answer();
        let wrong = *quiz.options.iter().find(|o| **o != correct).unwrap();
        let feedback = state.answer(wrong).unwrap();
        assert!(!feedback.is_correct());
        assert!(feedback.message().ends_with(correct));
    }

    #[test]
    fn test_fact_carousel_wraps() {
        let mut state = GlobeState::default();
        let continent = &CONTINENTS[1];
        state.select(continent);
        assert_eq!(state.current_fact(), Some(continent.fun_facts[0]));

        for step in 1..=continent.fun_facts.len() {
            state.next_fact();
            let expected = continent.fun_facts[step % continent.fun_facts.len()];
            assert_eq!(state.current_fact(), Some(expected));
        }
    }

    #[test]
    fn test_selecting_another_continent_closes_the_quiz() {
        let mut state = GlobeState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        state.select(&CONTINENTS[0]);
        state.next_fact();
        state.start_quiz(&mut rng);

        state.select(&CONTINENTS[4]);
        assert!(state.quiz.is_none());
        assert_eq!(state.fact_index, 0);
    }
}
