//! Offline Keyword Classifier

use crate::{Classifier, ClassifierError, ClassifierResponse, Taxonomy};
use tracing::debug;

/// One keyword occurrence in the description
struct Hit {
    /// Position of the keyword in taxonomy order
    order: usize,
    level: u8,
    start: usize,
    end: usize,
}

impl Hit {
    fn len(&self) -> usize {
        self.end - self.start
    }

    /// Inside a strictly longer hit (e.g. "offensive" in "non-offensive")
    fn is_shadowed_by(&self, other: &Hit) -> bool {
        other.len() > self.len() && other.start <= self.start && self.end <= other.end
    }
}

/// Hyphens join words, so "non-offensive" is one word
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}

/// Byte spans where `keyword` occurs as whole words in `text`
fn occurrences<'a>(text: &'a str, keyword: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
    text.match_indices(keyword).filter_map(move |(start, m)| {
        let end = start + m.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        let bounded = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
        bounded.then_some((start, end))
    })
}

/// Matches taxonomy keywords as case-insensitive whole words
///
/// A keyword occurring only inside a longer matched keyword does not
/// count. The highest remaining level wins. Keywords are reported in
/// taxonomy order across all levels, not only the winning one.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    taxonomy: Taxonomy,
}

impl KeywordClassifier {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, description: &str) -> Result<ClassifierResponse, ClassifierError> {
        let text = description.trim().to_lowercase();
        if text.is_empty() {
            return Err(ClassifierError::EmptyDescription);
        }

        let keywords: Vec<(u8, &String)> = self
            .taxonomy
            .iter()
            .flat_map(|(level, words)| words.iter().map(move |w| (level, w)))
            .collect();

        let mut hits = Vec::new();
        for (order, (level, keyword)) in keywords.iter().enumerate() {
            let needle = keyword.to_lowercase();
            for (start, end) in occurrences(&text, &needle) {
                hits.push(Hit { order, level: *level, start, end });
            }
        }

        let mut matched: Vec<&Hit> = hits
            .iter()
            .filter(|h| !hits.iter().any(|other| h.is_shadowed_by(other)))
            .collect();
        matched.sort_by_key(|h| h.order);
        matched.dedup_by_key(|h| h.order);

        let level = matched.iter().map(|h| i64::from(h.level)).max();
        let detected: Vec<String> = matched.iter().map(|h| keywords[h.order].1.clone()).collect();

        debug!("Keyword match: level {:?}, {} keywords", level, detected.len());
        Ok(ClassifierResponse::new(level, detected))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
