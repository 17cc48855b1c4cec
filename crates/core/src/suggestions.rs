//! Question suggestions while typing
//!
//! Each word of the input (3+ characters) is compared with the keyword map;
//! a keyword matches when either string contains the other. Matching
//! questions are offered in the order they were first hit.

use faqchat_domain::constants::{
    KEYWORD_MAP, MAX_SUGGESTIONS, MIN_KEYWORD_LENGTH, MIN_SUGGESTION_INPUT_LENGTH,
    PREDEFINED_QUESTIONS,
};

/// Keyword-based suggestion lookup over a fixed question list.
#[derive(Debug, Clone)]
pub struct SuggestionMatcher {
    questions: Vec<&'static str>,
    keywords: Vec<(&'static str, &'static [usize])>,
    limit: usize,
}

impl Default for SuggestionMatcher {
    fn default() -> Self {
        Self::new(PREDEFINED_QUESTIONS.to_vec(), KEYWORD_MAP.to_vec())
    }
}

impl SuggestionMatcher {
    pub fn new(
        questions: Vec<&'static str>,
        keywords: Vec<(&'static str, &'static [usize])>,
    ) -> Self {
        Self { questions, keywords, limit: MAX_SUGGESTIONS }
    }

    /// Questions offered when nothing has been typed yet.
    pub fn predefined(&self) -> &[&'static str] {
        &self.questions
    }

    /// Up to three questions related to `input`.
    ///
    /// Nothing is suggested for blank or short input, or while the chat is
    /// in an error state.
    pub fn suggest(&self, input: &str, has_error: bool) -> Vec<&'static str> {
        if has_error || input.trim().is_empty() || input.chars().count() < MIN_SUGGESTION_INPUT_LENGTH
        {
            return Vec::new();
        }

        let lowered = input.to_lowercase();
        let mut matched: Vec<usize> = Vec::new();

        for word in lowered.split_whitespace() {
            if word.chars().count() < MIN_KEYWORD_LENGTH {
                continue;
            }
            for (keyword, indices) in &self.keywords {
                if keyword.contains(word) || word.contains(keyword) {
                    for index in *indices {
                        if !matched.contains(index) {
                            matched.push(*index);
                        }
                    }
                }
            }
        }

        matched
            .into_iter()
            .filter_map(|index| self.questions.get(index).copied())
            .take(self.limit)
            .collect()
    }
}
