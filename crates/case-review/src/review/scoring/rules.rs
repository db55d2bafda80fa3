use serde::Serialize;

use super::super::domain::{Category, UqcQuestion};

/// Static description of a UQC question and what each outcome means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UqcQuestionSpec {
    pub question: UqcQuestion,
    pub label: &'static str,
    pub good: &'static str,
    pub bad: &'static str,
}

/// Static description of a category-specific yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CqcQuestion {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

pub const ANSA_LABEL: &str = "ANSA / Excessive profanity present?";
pub const ANSA_HELP: &str = "Default: no issue. Checked: issue present (instantly bad case)";

pub const UQC_QUESTIONS: [UqcQuestionSpec; 4] = [
    UqcQuestionSpec {
        question: UqcQuestion::VisualClarity,
        label: "Visual clarity",
        good: "clear / not laggy",
        bad: "static / laggy / frozen",
    },
    UqcQuestionSpec {
        question: UqcQuestion::AudioClarity,
        label: "Audio clarity",
        good: "clear",
        bad: "laggy / distorted / unclear / heavy background noise",
    },
    UqcQuestionSpec {
        question: UqcQuestion::VideoCompleteness,
        label: "Video completeness",
        good: "key moment fully captured",
        bad: "missing start or cut-off before reaction",
    },
    UqcQuestionSpec {
        question: UqcQuestion::ExcitingFirst3,
        label: "Exciting first 3s",
        good: "something engaging in first 3s",
        bad: "nothing happens first 3s",
    },
];

const fn question(id: &'static str, label: &'static str) -> CqcQuestion {
    CqcQuestion {
        id,
        label,
        help: None,
    }
}

const fn question_with_help(
    id: &'static str,
    label: &'static str,
    help: &'static str,
) -> CqcQuestion {
    CqcQuestion {
        id,
        label,
        help: Some(help),
    }
}

const RANDOM_CHATTING: [CqcQuestion; 4] = [
    question_with_help(
        "chat_present",
        "Chatting present?",
        "Is there actual chatting happening?",
    ),
    question_with_help(
        "lang_understandable",
        "Language understandable?",
        "If mostly incomprehensible → No",
    ),
    question_with_help(
        "content_contextual",
        "Chat content understandable / contextual?",
        "Not random noise",
    ),
    question("host_visible", "Host visible in frame?"),
];

const DANCING: [CqcQuestion; 4] = [
    question("dance_present", "Dance moment present?"),
    question("synced_music", "Dance well synced w/ music?"),
    question_with_help(
        "host_interacts",
        "Host interacts w/ viewers?",
        "Acknowledges chat / reacts",
    ),
    question("host_visible", "Host clearly visible full/upper body?"),
];

const SINGING: [CqcQuestion; 4] = [
    question("singing_present", "Singing present?"),
    question(
        "song_recognizable",
        "Song recognizable or on-key enough to identify?",
    ),
    question("host_interacts", "Host interacts w/ viewers?"),
    question("host_in_frame", "Host in frame?"),
];

const GAMING: [CqcQuestion; 4] = [
    question_with_help("game_moment", "Game moment shown?", "Not lobby idle"),
    question_with_help(
        "highlight_action",
        "Highlight-worthy action?",
        "Kill/clutch/funny/victory",
    ),
    question_with_help(
        "no_loading",
        "No irrelevant loading/static screen?",
        "Yes ⇒ means clean gameplay",
    ),
    question(
        "host_interacts",
        "Host interacts w/ chat OR in-game reaction visible?",
    ),
];

const DEBATING: [CqcQuestion; 4] = [
    question_with_help(
        "both_sides",
        "Host presents both sides fairly?",
        "Or structured POV",
    ),
    question(
        "logical_argument",
        "Clear logical argument / understandable topic?",
    ),
    question_with_help(
        "no_interrupt",
        "No disruptive interruptions?",
        "Audio overlap, cross-talk",
    ),
    question("host_visible", "Host visible in frame?"),
];

const GIFTING: [CqcQuestion; 4] = [
    question("gift_present", "Gift event visible?"),
    question("host_thanked", "Host verbally thanks sender?"),
    question_with_help("host_reacted", "Host reaction visible?", "Face/body/emote"),
    question_with_help(
        "full_reaction_captured",
        "Clip captures full reaction sequence?",
        "Begin gift → show reaction",
    ),
];

const OTHERS: [CqcQuestion; 3] = [
    question("key_action", "Key action present?"),
    question("host_visible", "Host visible?"),
    question("understandable", "Action understandable w/o full context?"),
];

/// Ordered CQC checklist for a primary category.
pub fn cqc_questions(category: Category) -> &'static [CqcQuestion] {
    match category {
        Category::RandomChatting => &RANDOM_CHATTING,
        Category::Dancing => &DANCING,
        Category::Singing => &SINGING,
        Category::Gaming => &GAMING,
        Category::Debating => &DEBATING,
        Category::Gifting => &GIFTING,
        Category::Others => &OTHERS,
    }
}

/// Minimum number of answered CQC questions that unlocks submission: half, rounded up.
pub fn required_answers(question_count: usize) -> usize {
    question_count.div_ceil(2)
}
