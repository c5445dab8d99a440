//! Three-question self-check. Educational only, not a diagnosis.

pub struct Question {
    pub prompt: &'static str,
    /// Option label and its score.
    pub options: &'static [(&'static str, u8)],
}

pub const QUESTIONS: [Question; 3] = [
    Question {
        prompt: "Feeling low?",
        options: &[("No", 0), ("Sometimes", 1), ("Often", 2)],
    },
    Question {
        prompt: "Sleep quality",
        options: &[("Good", 2), ("Fair", 1), ("Poor", 0)],
    },
    Question {
        prompt: "Concentration",
        options: &[("No", 0), ("Sometimes", 1), ("Often", 2)],
    },
];

/// Totals at or below this get the cautionary message.
pub const CAUTION_THRESHOLD: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guidance {
    Cautionary,
    Reassuring,
}

impl Guidance {
    pub fn for_score(total: u8) -> Self {
        if total <= CAUTION_THRESHOLD {
            Guidance::Cautionary
        } else {
            Guidance::Reassuring
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Guidance::Cautionary => {
                "You may be experiencing low mood or poor sleep. Consider talking to someone or a clinician."
            }
            Guidance::Reassuring => "You seem okay. Keep healthy routines.",
        }
    }
}

pub fn score(answers: [u8; 3]) -> u8 {
    answers.iter().sum()
}

/// Scores from the selected option index of each question.
pub fn score_selection(selected: [usize; 3]) -> u8 {
    let mut answers = [0; 3];
    for ((answer, question), i) in answers.iter_mut().zip(&QUESTIONS).zip(selected) {
        *answer = question.options.get(i).map(|(_, s)| *s).unwrap_or(0);
    }
    score(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guidance_boundaries() {
        assert_eq!(Guidance::for_score(score([0, 0, 0])), Guidance::Cautionary);
        assert_eq!(score([2, 2, 2]), 6);
        assert_eq!(Guidance::for_score(score([2, 2, 2])), Guidance::Reassuring);
        assert_eq!(Guidance::for_score(2), Guidance::Cautionary);
        assert_eq!(Guidance::for_score(3), Guidance::Reassuring);
    }

    #[test]
    fn test_sleep_question_is_reverse_scored() {
        // "No", "Good", "No"
        assert_eq!(score_selection([0, 0, 0]), 2);
        // "Often", "Poor", "Often"
        assert_eq!(score_selection([2, 2, 2]), 4);
        assert_eq!(score_selection([9, 9, 9]), 0);
    }
}
