//! Severity Keyword Taxonomy

use serde::{Deserialize, Serialize};
use working_memory::{MAX_SEVERITY_LEVEL, MIN_SEVERITY_LEVEL};

const LEVEL_1: &[&str] = &[
    "comments about a haircut",
    "compliments on new clothes",
    "discussions about the weather",
    "neutral subjects",
    "everyday interactions",
    "socially acceptable behaviour",
    "non-offensive",
];

const LEVEL_2: &[&str] = &[
    "questions about work skills based on gender stereotypes",
    "comments about the physical aptitude of ethnic groups",
    "comments about the appearance of ethnic groups",
    "creating discomfort",
    "embarrassment",
    "disrespectful or insensitive",
    "evoking subtle stereotypes",
    "mildly offensive",
];

const LEVEL_3: &[&str] = &[
    "jokes about sexual orientation",
    "insinuations about sexual orientation",
    "racial pejorative nicknames",
    "gender pejorative nicknames",
    "withholding work opportunities because of gender",
    "lack of consideration for differences",
    "negatively reinforcing stereotypes",
    "reproducing privilege structures",
    "offensive",
];

const LEVEL_4: &[&str] = &[
    "direct insults",
    "blatant insults",
    "derogatory comments about intellectual ability",
    "malicious humiliation",
    "malicious ridicule",
    "offensive imitation of an accent",
    "unsolicited touching",
    "explicitly humiliating",
    "degrading",
    "intentional",
    "aim to insult or belittle",
    "quite offensive",
];

const LEVEL_5: &[&str] = &[
    "unsolicited sexual advances",
    "racist comments",
    "sharing pornographic material",
    "storing pornographic material",
    "suggestion of sexual retaliation",
    "persistent gender-based actions",
    "persistent race-based actions",
    "persistent sexuality-based actions",
    "creates a hostile environment",
    "intimidating",
    "aggressive and not physically violent",
];

const LEVEL_6: &[&str] = &[
    "physical assault",
    "threats of serious violence",
    "coercion that endangers physical safety",
    "direct threat to physical integrity",
    "aggressive and physically violent",
];

/// Keyword lists indexed by severity level 1..=6
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    levels: Vec<Vec<String>>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

impl Taxonomy {
    /// The built-in workplace-conduct keyword lists
    pub fn standard() -> Self {
        let levels = [LEVEL_1, LEVEL_2, LEVEL_3, LEVEL_4, LEVEL_5, LEVEL_6]
            .iter()
            .map(|words| words.iter().map(|w| w.to_string()).collect())
            .collect();
        Self { levels }
    }

    /// Keywords for `level`; empty outside 1..=6
    pub fn keywords(&self, level: u8) -> &[String] {
        if !(MIN_SEVERITY_LEVEL..=MAX_SEVERITY_LEVEL).contains(&level) {
            return &[];
        }
        self.levels
            .get(usize::from(level - MIN_SEVERITY_LEVEL))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `(level, keywords)` pairs in ascending level order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[String])> {
        (MIN_SEVERITY_LEVEL..=MAX_SEVERITY_LEVEL).map(move |level| (level, self.keywords(level)))
    }
}
