use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest category code a reviewer may type for the `Others` category.
pub const CATEGORY_FREE_TEXT_MAX_CHARS: usize = 12;
/// Longest free-form feedback comment.
pub const FEEDBACK_MAX_CHARS: usize = 300;
/// Secondary categories a reviewer may attach next to the primary.
pub const MAX_SECONDARY_CATEGORIES: usize = 2;

/// Outcome recorded for a single UQC question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Good,
    Bad,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "good" => Some(Self::Good),
            "bad" => Some(Self::Bad),
            _ => None,
        }
    }
}

/// Three-level rating shared by the UQC, CQC and overall verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Good,
    #[serde(rename = "OK")]
    Ok,
    Bad,
}

impl Rating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Ok => "OK",
            Self::Bad => "Bad",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four required UQC questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UqcQuestion {
    #[serde(rename = "visual_clarity")]
    VisualClarity,
    #[serde(rename = "audio_clarity")]
    AudioClarity,
    #[serde(rename = "video_completeness")]
    VideoCompleteness,
    #[serde(rename = "exciting_first3")]
    ExcitingFirst3,
}

impl UqcQuestion {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::VisualClarity,
            Self::AudioClarity,
            Self::VideoCompleteness,
            Self::ExcitingFirst3,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::VisualClarity => "visual_clarity",
            Self::AudioClarity => "audio_clarity",
            Self::VideoCompleteness => "video_completeness",
            Self::ExcitingFirst3 => "exciting_first3",
        }
    }
}

/// Reviewer answers for the UQC stage. `None` means the question is still unanswered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UqcAnswers {
    pub visual_clarity: Option<Verdict>,
    pub audio_clarity: Option<Verdict>,
    pub video_completeness: Option<Verdict>,
    pub exciting_first3: Option<Verdict>,
    #[serde(default)]
    pub ansa: bool,
}

impl UqcAnswers {
    pub fn get(&self, question: UqcQuestion) -> Option<Verdict> {
        match question {
            UqcQuestion::VisualClarity => self.visual_clarity,
            UqcQuestion::AudioClarity => self.audio_clarity,
            UqcQuestion::VideoCompleteness => self.video_completeness,
            UqcQuestion::ExcitingFirst3 => self.exciting_first3,
        }
    }

    pub fn set(&mut self, question: UqcQuestion, verdict: Option<Verdict>) {
        let slot = match question {
            UqcQuestion::VisualClarity => &mut self.visual_clarity,
            UqcQuestion::AudioClarity => &mut self.audio_clarity,
            UqcQuestion::VideoCompleteness => &mut self.video_completeness,
            UqcQuestion::ExcitingFirst3 => &mut self.exciting_first3,
        };
        *slot = verdict;
    }

    pub fn verdicts(&self) -> [Option<Verdict>; 4] {
        UqcQuestion::ordered().map(|question| self.get(question))
    }
}

/// Content category of a highlight. The display label doubles as the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Random Chatting")]
    RandomChatting,
    Dancing,
    Singing,
    Gaming,
    Debating,
    Gifting,
    Others,
}

impl Category {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::RandomChatting,
            Self::Dancing,
            Self::Singing,
            Self::Gaming,
            Self::Debating,
            Self::Gifting,
            Self::Others,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RandomChatting => "Random Chatting",
            Self::Dancing => "Dancing",
            Self::Singing => "Singing",
            Self::Gaming => "Gaming",
            Self::Debating => "Debating",
            Self::Gifting => "Gifting",
            Self::Others => "Others",
        }
    }

    /// Accepts the display label in any case, with or without the inner space.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle: String = raw
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ordered().into_iter().find(|category| {
            category.label().replace(' ', "").to_ascii_lowercase() == needle
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Yes/no answers keyed by CQC question id. `None` means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CqcAnswers(BTreeMap<String, Option<bool>>);

impl CqcAnswers {
    /// Blank answer sheet holding one unanswered slot per question id.
    pub fn blank<'a>(question_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self(
            question_ids
                .into_iter()
                .map(|id| (id.to_string(), None))
                .collect(),
        )
    }

    pub fn get(&self, question_id: &str) -> Option<bool> {
        self.0.get(question_id).copied().flatten()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    /// Records an answer for a known slot. Unknown ids are left untouched.
    pub fn set(&mut self, question_id: &str, value: Option<bool>) -> bool {
        match self.0.get_mut(question_id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn answered(&self) -> usize {
        self.0.values().filter(|value| value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<bool>)> {
        self.0.iter().map(|(id, value)| (id.as_str(), *value))
    }
}

pub(crate) fn truncate_chars(raw: &str, max_chars: usize) -> String {
    raw.chars().take(max_chars).collect()
}
