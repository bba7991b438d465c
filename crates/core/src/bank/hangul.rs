use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{QuestionBank, draw_distinct};
use crate::model::{Answer, GameKind, Question};

// Modern jamo sets shown at level 1 and used to synthesize level-2 syllables.
const CONSONANTS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];
const VOWELS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

const HANGUL_BASE: u32 = 0xAC00;
const JUNGSEONG_COUNT: u32 = 21;
const JONGSEONG_COUNT: u32 = 28;

/// Level-3 vocabulary: animals, food, objects, places, nature.
const WORDS: [&str; 100] = [
    "고양이", "강아지", "호랑이", "사자", "토끼", "곰", "판다", "여우", "늑대", "다람쥐",
    "코끼리", "기린", "원숭이", "돼지", "소", "닭", "참새", "펭귄", "돌고래", "상어",
    "사과", "바나나", "포도", "수박", "딸기", "복숭아", "오렌지", "파인애플", "체리", "자두",
    "빵", "우유", "치즈", "김밥", "불고기", "비빔밥", "라면", "떡볶이", "과자", "초콜릿",
    "자동차", "자전거", "버스", "비행기", "기차", "배", "우산", "시계", "책", "연필",
    "지우개", "가방", "휴대폰", "컴퓨터", "텔레비전", "냉장고", "세탁기", "신발", "모자", "옷",
    "학교", "교실", "도서관", "운동장", "놀이터", "병원", "공원", "시장", "바다", "산",
    "강", "호수", "정원", "집", "동네", "도시", "마을", "극장", "박물관", "놀이동산",
    "하늘", "구름", "바람", "비", "눈", "태양", "달", "별", "무지개", "바위",
    "꽃", "나무", "풀", "숲", "모래", "불", "물", "돌", "씨앗", "열매",
];

/// Share of level-2 syllables drawn without a trailing consonant.
const OPEN_SYLLABLE_CHANCE: f64 = 0.55;

/// Composes a precomposed syllable from jamo indices.
///
/// Indices bounded by the tables above always land in U+AC00..=U+D7A3.
fn compose_syllable(choseong: u32, jungseong: u32, jongseong: u32) -> char {
    let code = HANGUL_BASE + (choseong * JUNGSEONG_COUNT + jungseong) * JONGSEONG_COUNT + jongseong;
    debug_assert!((0xAC00..=0xD7A3).contains(&code));
    char::from_u32(code).unwrap_or('가')
}

/// Question bank for the Korean literacy game.
///
/// Level 1 shows a single jamo, level 2 a synthesized syllable block, level 3
/// a whole word. The expected answer is always the prompt itself: the player
/// has to type what they read.
pub struct HangulBank {
    rng: StdRng,
    last_prompt: Option<String>,
}

impl HangulBank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            last_prompt: None,
        }
    }

    /// Deterministic bank for tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last_prompt: None,
        }
    }

    fn draw_prompt(&mut self, level: u8) -> String {
        match level {
            1 => {
                if self.rng.random_bool(0.5) {
                    CONSONANTS[self.rng.random_range(0..CONSONANTS.len())].to_string()
                } else {
                    VOWELS[self.rng.random_range(0..VOWELS.len())].to_string()
                }
            }
            2 => {
                let choseong = self.rng.random_range(0..19);
                let jungseong = self.rng.random_range(0..JUNGSEONG_COUNT);
                let jongseong = if self.rng.random_bool(OPEN_SYLLABLE_CHANCE) {
                    0
                } else {
                    self.rng.random_range(1..JONGSEONG_COUNT)
                };
                compose_syllable(choseong, jungseong, jongseong).to_string()
            }
            _ => WORDS[self.rng.random_range(0..WORDS.len())].to_string(),
        }
    }
}

impl Default for HangulBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionBank for HangulBank {
    fn game(&self) -> GameKind {
        GameKind::Korean
    }

    fn next_question(&mut self, level: u8) -> Question {
        let last = self.last_prompt.take();
        let question = draw_distinct(last.as_deref(), || {
            let prompt = self.draw_prompt(level);
            Question::new(prompt.clone(), Answer::Text(prompt))
        });
        self.last_prompt = Some(question.prompt().to_string());
        question
    }
}
