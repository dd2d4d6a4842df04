//! Prompt-Based Classifier

use crate::{parse_response, Classifier, ClassifierError, ClassifierResponse, Taxonomy};
use tracing::{debug, info};

/// Text completion transport (e.g. a hosted language model)
pub trait Completion: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, ClassifierError>;
}

/// Build the classification prompt for `description`
pub fn build_prompt(description: &str, taxonomy: &Taxonomy) -> String {
    let keywords = taxonomy
        .iter()
        .map(|(level, words)| format!("Level {}: {}", level, words.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyse the following conduct description: "{description}"

Based on the keywords provided below for each severity level, identify:
1. The severity level the description most strongly suggests. If several levels are suggested, prioritise the highest.
2. The exact keywords (or clear synonyms of the concepts) found in the description that match the lists below.

Keywords by level:
{keywords}

If the description does not clearly fit any level or keyword, answer "No Level Suggested" and an empty keyword list.

Response format (JSON only, no additional explanatory text):
```json
{{
    "suggested_level": "Level X" or "No Level Suggested",
    "detected_keywords": ["keyword1", "keyword2"]
}}
```"#
    )
}

/// Classifier that prompts a completion backend and parses its reply
pub struct PromptClassifier<C: Completion> {
    backend: C,
    taxonomy: Taxonomy,
}

impl<C: Completion> PromptClassifier<C> {
    pub fn new(backend: C, taxonomy: Taxonomy) -> Self {
        info!("Creating prompt classifier");
        Self { backend, taxonomy }
    }
}

impl<C: Completion> Classifier for PromptClassifier<C> {
    fn classify(&self, description: &str) -> Result<ClassifierResponse, ClassifierError> {
        if description.trim().is_empty() {
            return Err(ClassifierError::EmptyDescription);
        }

        let prompt = build_prompt(description, &self.taxonomy);
        let reply = self.backend.complete(&prompt)?;
        debug!("Completion returned {} bytes", reply.len());
        parse_response(&reply)
    }

    fn name(&self) -> &'static str {
        "prompt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Canned {
        reply: Result<String, String>,
        seen: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Completion for Canned {
        fn complete(&self, prompt: &str) -> Result<String, ClassifierError> {
            self.seen.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(ClassifierError::Service)
        }
    }

    #[test]
    fn test_prompt_lists_every_level() {
        let prompt = build_prompt("he shouted at me", &Taxonomy::standard());
        assert!(prompt.contains("\"he shouted at me\""));
        for level in 1..=6 {
            assert!(prompt.contains(&format!("Level {}:", level)));
        }
        assert!(prompt.contains("direct insults"));
        assert!(prompt.contains("\"suggested_level\""));
    }

    #[test]
    fn test_reply_is_parsed() {
        let backend = Canned::new(Ok(
            "```json\n{\"suggested_level\": \"Level 5\", \"detected_keywords\": [\"intimidating\"]}\n```",
        ));
        let classifier = PromptClassifier::new(backend, Taxonomy::standard());

        let response = classifier.classify("intimidating behaviour").unwrap();
        assert_eq!(response.level(), Some(5));
        assert_eq!(classifier.backend.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_service_error_propagates() {
        let classifier = PromptClassifier::new(Canned::new(Err("quota")), Taxonomy::standard());
        let err = classifier.classify("something").unwrap_err();
        assert!(matches!(err, ClassifierError::Service(msg) if msg == "quota"));
    }
}
