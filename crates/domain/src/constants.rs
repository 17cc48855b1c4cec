//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Identity validation
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 15;

// Question validation (mirrors the backend's request constraints)
pub const MAX_QUESTION_LENGTH: usize = 100;

/// Shown in place of an answer when the backend returns none.
pub const PLACEHOLDER_ANSWER: &str = "Sorry, I could not understand that.";

// Session tokens expire server-side after 5 minutes; refresh 30s early.
pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 270;
pub const MAX_TOKEN_VALIDITY_SECS: u64 = 24 * 60 * 60;

// Backend endpoints
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_ASK_PATH: &str = "/api/ask";
pub const DEFAULT_AUTH_TOKEN_PATH: &str = "/api/auth/token";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 60 * 60;

// Suggestions
pub const MIN_SUGGESTION_INPUT_LENGTH: usize = 3;
pub const MIN_KEYWORD_LENGTH: usize = 3;
pub const MAX_SUGGESTIONS: usize = 3;

/// Questions offered as suggestions while the user types.
pub const PREDEFINED_QUESTIONS: [&str; 10] = [
    "What is the Bhagavad Gita?",
    "Who narrated the Bhagavad Gita?",
    "What is the core message of the Bhagavad Gita?",
    "Why did Arjuna refuse to fight in the war?",
    "What is karma according to the Bhagavad Gita?",
    "What is the significance of Krishna in the Gita?",
    "What does the Gita say about life and death?",
    "What is dharma in the context of the Gita?",
    "How many chapters are there in the Bhagavad Gita?",
    "What is the meaning of yoga in the Bhagavad Gita?",
];

/// Keyword to [`PREDEFINED_QUESTIONS`] indices. Order is significant: it
/// decides the order suggestions are offered in.
pub const KEYWORD_MAP: &[(&str, &[usize])] = &[
    ("gita", &[0, 1, 2, 4, 5, 6, 7, 8, 9]),
    ("bhagavad", &[0, 1, 2, 4, 9]),
    ("krishna", &[5]),
    ("arjuna", &[3]),
    ("karma", &[4]),
    ("dharma", &[7]),
    ("message", &[2]),
    ("core", &[2]),
    ("narrated", &[1]),
    ("fight", &[3]),
    ("war", &[3]),
    ("life", &[6]),
    ("death", &[6]),
    ("chapters", &[8]),
    ("yoga", &[9]),
    ("significance", &[5]),
    ("meaning", &[9]),
];
