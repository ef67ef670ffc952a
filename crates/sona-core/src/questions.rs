//! The PHQ-9 question list.
//!
//! Each question is identified by its fixed position in the sequence and
//! carries no mutable state. The wording is the standard PHQ-9 item text
//! rephrased for speech.

/// Number of questions in the PHQ-9 instrument.
pub const QUESTION_COUNT: usize = 9;

/// The nine item prompts, in administration order.
pub const PHQ9_QUESTIONS: [&str; QUESTION_COUNT] = [
    "Over the last two weeks, how often have you had little interest or \
     pleasure in doing things?",
    "How often have you been feeling down, depressed, or hopeless?",
    "Have you had trouble sleeping, such as not being able to fall asleep, \
     or sleeping too much?",
    "How often have you been feeling tired or had little energy?",
    "Have you had a poor appetite, or found yourself overeating?",
    "How often have you been feeling bad about yourself, or felt that you \
     are a failure?",
    "Have you had trouble concentrating on things, like your attention span \
     feeling shorter?",
    "Have you been moving or speaking more slowly than usual, or the \
     opposite, felt restless and fidgety?",
    "Have you had thoughts that you would be better off dead, or of hurting \
     yourself in some way?",
];
