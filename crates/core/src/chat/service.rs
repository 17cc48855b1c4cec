//! Chat session - core business logic

use std::sync::Arc;

use faqchat_domain::constants::PLACEHOLDER_ANSWER;
use faqchat_domain::{FaqChatError, Identity, Message, Question, Result};
use tracing::{debug, error};

use super::ports::QuestionAnswerer;

/// One user's conversation with the assistant.
///
/// After a failed question the session is in an error state: new questions
/// are refused until [`regenerate`](Self::regenerate) succeeds.
pub struct ChatSession {
    identity: Identity,
    answerer: Arc<dyn QuestionAnswerer>,
    messages: Vec<Message>,
    last_failed_question: Option<Question>,
}

impl ChatSession {
    pub fn new(identity: Identity, answerer: Arc<dyn QuestionAnswerer>) -> Self {
        Self { identity, answerer, messages: Vec::new(), last_failed_question: None }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Transcript in order of arrival.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn has_error(&self) -> bool {
        self.last_failed_question.is_some()
    }

    pub fn last_failed_question(&self) -> Option<&str> {
        self.last_failed_question.as_ref().map(Question::as_str)
    }

    /// Ask a new question.
    ///
    /// The user message is appended before the backend is called. On
    /// success the bot reply is appended and returned.
    ///
    /// # Errors
    /// `InvalidInput` for a blank or oversized question, or while a previous
    /// failure is pending. Otherwise the answerer's error, after the user
    /// message has been flagged.
    pub async fn send(&mut self, text: &str) -> Result<Message> {
        if self.has_error() {
            return Err(FaqChatError::InvalidInput(
                "the previous question failed; regenerate it first".into(),
            ));
        }

        let question = Question::parse(text)?;
        self.messages.push(Message::user(question.as_str()));
        self.ask(question, false).await
    }

    /// Re-send the last failed question without adding another user
    /// message.
    ///
    /// # Errors
    /// `InvalidInput` when nothing has failed, otherwise the answerer's
    /// error.
    pub async fn regenerate(&mut self) -> Result<Message> {
        let question = self
            .last_failed_question
            .clone()
            .ok_or_else(|| FaqChatError::InvalidInput("no failed question to regenerate".into()))?;

        debug!(question = %question, "Regenerating answer");
        self.ask(question, true).await
    }

    async fn ask(&mut self, question: Question, is_retry: bool) -> Result<Message> {
        match self.answerer.answer(&self.identity, &question).await {
            Ok(answer) => {
                let content = answer
                    .filter(|a| !a.trim().is_empty())
                    .unwrap_or_else(|| PLACEHOLDER_ANSWER.to_string());
                let reply = Message::bot(content);
                self.messages.push(reply.clone());
                self.last_failed_question = None;
                Ok(reply)
            }
            Err(err) => {
                error!(error = %err, is_retry, "Failed to get an answer");

                if !is_retry {
                    if let Some(last) = self.messages.last_mut().filter(|m| m.is_user()) {
                        last.error = true;
                    }
                }
                self.last_failed_question = Some(question);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use faqchat_domain::MessageType;

    use super::*;

    /// Answers from a script and records what it was asked.
    #[derive(Default)]
    struct ScriptedAnswerer {
        replies: Mutex<VecDeque<Result<Option<String>>>>,
        asked: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedAnswerer {
        fn new(replies: Vec<Result<Option<String>>>) -> Arc<Self> {
            Arc::new(Self { replies: Mutex::new(replies.into()), ..Self::default() })
        }

        fn asked(&self) -> Vec<(String, String)> {
            self.asked.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuestionAnswerer for ScriptedAnswerer {
        async fn answer(&self, identity: &Identity, question: &Question) -> Result<Option<String>> {
            self.asked.lock().unwrap().push((identity.to_string(), question.to_string()));
            self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    fn session(answerer: Arc<ScriptedAnswerer>) -> ChatSession {
        ChatSession::new(Identity::parse("Arjun").unwrap(), answerer)
    }

    fn network_error() -> FaqChatError {
        FaqChatError::Network("connection refused".into())
    }

    #[tokio::test]
    async fn send_appends_question_and_answer() {
        let answerer = ScriptedAnswerer::new(vec![Ok(Some("Karma is action.".into()))]);
        let mut chat = session(answerer.clone());

        let reply = chat.send("  What is karma?  ").await.unwrap();

        assert_eq!(reply.content, "Karma is action.");
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[0].message_type, MessageType::User);
        assert_eq!(chat.messages()[0].content, "What is karma?");
        assert_eq!(chat.messages()[1].message_type, MessageType::Bot);
        assert_eq!(answerer.asked(), vec![("Arjun".into(), "What is karma?".into())]);
    }

    #[tokio::test]
    async fn missing_or_empty_answer_uses_placeholder() {
        let answerer = ScriptedAnswerer::new(vec![Ok(None), Ok(Some(String::new()))]);
        let mut chat = session(answerer);

        assert_eq!(chat.send("first").await.unwrap().content, PLACEHOLDER_ANSWER);
        assert_eq!(chat.send("second").await.unwrap().content, PLACEHOLDER_ANSWER);
    }

    #[tokio::test]
    async fn blank_question_is_rejected_without_a_call() {
        let answerer = ScriptedAnswerer::new(vec![]);
        let mut chat = session(answerer.clone());

        assert!(matches!(chat.send("   ").await, Err(FaqChatError::InvalidInput(_))));
        assert!(chat.messages().is_empty());
        assert!(answerer.asked().is_empty());
    }

    #[tokio::test]
    async fn failure_flags_user_message_and_records_question() {
        let answerer = ScriptedAnswerer::new(vec![Err(network_error())]);
        let mut chat = session(answerer);

        let err = chat.send("What is dharma?").await.unwrap_err();

        assert_eq!(err, network_error());
        assert!(chat.has_error());
        assert_eq!(chat.last_failed_question(), Some("What is dharma?"));
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.messages()[0].error);
    }

    #[tokio::test]
    async fn new_questions_are_refused_while_in_error() {
        let answerer = ScriptedAnswerer::new(vec![Err(network_error())]);
        let mut chat = session(answerer.clone());

        chat.send("What is dharma?").await.unwrap_err();
        assert!(matches!(chat.send("What is yoga?").await, Err(FaqChatError::InvalidInput(_))));
        assert_eq!(answerer.asked().len(), 1);
    }

    #[tokio::test]
    async fn regenerate_resends_without_new_user_message() {
        let answerer = ScriptedAnswerer::new(vec![
            Err(network_error()),
            Err(network_error()),
            Ok(Some("Dharma is duty.".into())),
        ]);
        let mut chat = session(answerer.clone());

        chat.send("What is dharma?").await.unwrap_err();
        chat.regenerate().await.unwrap_err();
        assert!(chat.has_error());
        assert_eq!(chat.messages().len(), 1);

        let reply = chat.regenerate().await.unwrap();
        assert_eq!(reply.content, "Dharma is duty.");
        assert!(!chat.has_error());
        assert_eq!(chat.last_failed_question(), None);
        assert_eq!(chat.messages().len(), 2);
        // the original failure stays visible on the question
        assert!(chat.messages()[0].error);
        assert_eq!(answerer.asked().len(), 3);
    }

    #[tokio::test]
    async fn regenerate_without_failure_is_rejected() {
        let mut chat = session(ScriptedAnswerer::new(vec![]));
        assert!(matches!(chat.regenerate().await, Err(FaqChatError::InvalidInput(_))));
    }
}
