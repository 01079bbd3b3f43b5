//! Interface strings for each supported language.

use vitrine_core::preferences::Language;
use vitrine_core::statistics::PerformanceTier;

pub struct Messages {
    pub no_questions: &'static str,
    pub profile_title: &'static str,
    pub profile_help: &'static str,
    pub answer_all_first: &'static str,
    pub invalid_input: &'static str,
    pub your_match: &'static str,
    pub no_match: &'static str,
    pub duel_title: &'static str,
    pub duel_help: &'static str,
    pub round: &'static str,
    pub champion: &'static str,
    pub trivia_help: &'static str,
    pub pick_quiz: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,
    pub did_you_know: &'static str,
    pub score: &'static str,
    pub session_ended: &'static str,
    pub tier_excellent: &'static str,
    pub tier_well_done: &'static str,
    pub tier_not_bad: &'static str,
    pub tier_keep_exploring: &'static str,
}

const EN: Messages = Messages {
    no_questions: "No questions available.",
    profile_title: "Which French philosopher are you?",
    profile_help: "Type a letter to answer, p = previous, n = next, r = restart, q = quit.",
    answer_all_first: "Answer every question to see your result.",
    invalid_input: "Not a valid choice.",
    your_match: "Your philosopher",
    no_match: "No philosopher matches your answers.",
    duel_title: "Which do you prefer?",
    duel_help: "Type 1 or 2 to choose, r = restart, q = quit.",
    round: "Round",
    champion: "Your favourite",
    trivia_help: "Type an option number, n = next, p = previous, r = restart, q = quit.",
    pick_quiz: "Choose a quiz by number:",
    correct: "Correct!",
    incorrect: "Incorrect. The answer is",
    did_you_know: "Did you know?",
    score: "Score",
    session_ended: "Session ended before the end.",
    tier_excellent: "Excellent! You are a true connaisseur of French culture!",
    tier_well_done: "Well done! You have solid knowledge of French heritage.",
    tier_not_bad: "Not bad! There is always more to discover about France.",
    tier_keep_exploring: "Keep exploring! French culture has so much to offer.",
};

const JA: Messages = Messages {
    no_questions: "質問がありません。",
    profile_title: "あなたはどのフランスの哲学者？",
    profile_help: "文字で回答、p = 前へ、n = 次へ、r = やり直し、q = 終了。",
    answer_all_first: "結果を見るにはすべての質問に答えてください。",
    invalid_input: "無効な選択です。",
    your_match: "あなたの哲学者",
    no_match: "回答に合う哲学者がいません。",
    duel_title: "どちらが好きですか？",
    duel_help: "1 または 2 で選択、r = やり直し、q = 終了。",
    round: "ラウンド",
    champion: "あなたのお気に入り",
    trivia_help: "番号で選択、n = 次へ、p = 前へ、r = やり直し、q = 終了。",
    pick_quiz: "番号でクイズを選んでください：",
    correct: "正解！",
    incorrect: "不正解。正解は",
    did_you_know: "知っていましたか？",
    score: "スコア",
    session_ended: "セッションが途中で終了しました。",
    tier_excellent: "素晴らしい！あなたはフランス文化の真の通です！",
    tier_well_done: "よくできました！フランスの遺産についてしっかりした知識があります。",
    tier_not_bad: "悪くありません！フランスにはまだ発見することがたくさんあります。",
    tier_keep_exploring: "探求を続けましょう！フランス文化には魅力がたくさんあります。",
};

impl Messages {
    pub fn for_language(language: Language) -> &'static Messages {
        match language {
            Language::En => &EN,
            Language::Ja => &JA,
        }
    }

    /// End-of-quiz message for a trivia tier.
    pub fn tier_message(&self, tier: PerformanceTier) -> &'static str {
        match tier {
            PerformanceTier::Excellent => self.tier_excellent,
            PerformanceTier::WellDone => self.tier_well_done,
            PerformanceTier::NotBad => self.tier_not_bad,
            PerformanceTier::KeepExploring => self.tier_keep_exploring,
        }
    }
}
