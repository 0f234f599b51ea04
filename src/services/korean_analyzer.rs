//! 基于规则的韩文形态素分析器
//!
//! 不依赖词典，按语节（空白分隔的韩文片段）处理：
//! 1. 功能词（副词、连接词、冠形词）直接标为 MAG
//! 2. 代词（可带助词）标为 NP：그는、우리의
//! 3. 하다 / 되다 类谓词拆成 名词 + 谓词（발표했다 → 발표）
//! 4. 含过去时 ㅆ 收音、以 니다 / ㄴ다 结尾的语节标为谓词
//! 5. 谓词的冠形词形、副词形、连接形标为 VA：어려운、높은、크게、빠르게、올라
//! 6. 去掉系词、助词（单音节助词要求与前一音节的收音匹配）
//! 7. 去掉复数后缀 들

use phf::phf_set;

use crate::services::morph_service::{MorphAnalyzer, Morpheme, PosTag};

const HANGUL_FIRST: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const JONG_COUNT: u32 = 28;
const JONG_NIEUN: u32 = 4;
const JONG_RIEUL: u32 = 8;
const JONG_SSANG_SIOT: u32 = 20;

/// 不作为名词计数的功能词
static FUNCTION_WORDS: phf::Set<&'static str> = phf_set! {
    "그리고", "하지만", "그러나", "그런데", "그래서", "따라서", "또한", "또는", "및",
    "위해", "위한", "대해", "대한", "통해", "통한", "따라", "따른", "관한", "관해",
    "의해", "의한", "가장", "매우", "이미", "아직", "특히", "다시", "함께", "모두",
    "바로", "있는", "없는", "같은", "않은", "않는", "없다", "없이", "지난", "오는",
    "어떤", "이런", "그런", "저런", "이렇게", "그렇게", "한편", "이어", "아니라",
    "많은", "새로운", "다른", "이는", "라며", "이라며", "이에", "이를", "이와", "이로",
};

/// 代词
static PRONOUNS: phf::Set<&'static str> = phf_set! {
    "그", "그녀", "그들", "그녀들", "우리", "저희", "나", "당신", "이것", "그것", "저것",
    "이곳", "그곳", "여기", "거기", "누구", "무엇",
};

/// 单音节谓词词干（높다、받다、크다 …）
static PREDICATE_STEMS: phf::Set<char> = phf_set! {
    '높', '낮', '많', '적', '좋', '작', '넓', '좁', '깊', '얕', '길', '짧', '늦', '젊',
    '밝', '같', '없', '않', '받', '맞', '남', '먹', '찾', '읽', '잃', '놓', '넣', '막',
    '닫', '살', '알', '앉', '크', '세', '쓰', '하', '되',
};

/// 接在单音节谓词词干后的词尾
const SHORT_ENDINGS: &[char] = &['은', '는', '을', '게', '고', '지', '다', '아', '어', '여'];

/// 不规则活用形（르 / ㅂ 不规则）
static IRREGULAR_FORMS: phf::Set<&'static str> = phf_set! {
    "올라", "올라가", "올라와", "올라서", "몰라", "골라", "불러", "흘러", "눌러", "걸러",
    "들러", "달라", "달라져", "쉬운", "더운", "추운", "매운", "고운",
};

/// 以 운 结尾但不是冠形词形的名词
const NON_MODIFIER_ENDINGS: &[&str] = &["해운", "기운", "행운", "항운"];

/// 하다 / 되다 类谓词词尾（按长度降序）
const PREDICATE_SUFFIXES: &[&str] = &[
    "했습니다", "하겠다", "합니다", "했으며", "했지만", "하면서", "하기로", "시켰다",
    "시키는", "했다", "한다", "하는", "하고", "하며", "하면", "해야", "했던", "하기",
    "하지", "해서", "했고", "하여", "된다", "됐다", "되는", "되고", "되며", "되어",
    "되면", "됐고", "시킨", "한", "할", "함", "돼", "된", "될", "됨",
];

/// 系词词尾（按长度降序）
const COPULA_SUFFIXES: &[&str] = &[
    "이었다", "이라는", "이라고", "이라면", "입니다", "이다", "였다", "라는", "라고",
    "이며", "이라", "이고", "이자",
];

/// 助词与前一音节收音的搭配
#[derive(Debug, Clone, Copy)]
enum Agreement {
    Any,
    /// 前一音节有收音
    AfterConsonant,
    /// 前一音节无收音
    AfterVowel,
    /// 无收音或收音为 ㄹ
    AfterVowelOrRieul,
    /// 有收音且不是 ㄹ
    AfterConsonantNotRieul,
}

struct JosaRule {
    form: &'static str,
    agreement: Agreement,
    /// 去掉助词后词干至少保留的音节数
    min_stem: usize,
}

const fn josa(form: &'static str, agreement: Agreement, min_stem: usize) -> JosaRule {
    JosaRule {
        form,
        agreement,
        min_stem,
    }
}

/// 助词规则（按长度降序）
const JOSA_RULES: &[JosaRule] = &[
    josa("에서는", Agreement::Any, 1),
    josa("에게서", Agreement::Any, 1),
    josa("에서도", Agreement::Any, 1),
    josa("으로는", Agreement::AfterConsonantNotRieul, 1),
    josa("으로서", Agreement::AfterConsonantNotRieul, 1),
    josa("으로써", Agreement::AfterConsonantNotRieul, 1),
    josa("으로도", Agreement::AfterConsonantNotRieul, 1),
    josa("까지는", Agreement::Any, 1),
    josa("부터는", Agreement::Any, 1),
    josa("이나마", Agreement::AfterConsonant, 1),
    josa("에서", Agreement::Any, 1),
    josa("에게", Agreement::Any, 1),
    josa("한테", Agreement::Any, 1),
    josa("께서", Agreement::Any, 1),
    josa("으로", Agreement::AfterConsonantNotRieul, 1),
    josa("까지", Agreement::Any, 1),
    josa("부터", Agreement::Any, 1),
    josa("보다", Agreement::Any, 1),
    josa("처럼", Agreement::Any, 1),
    josa("만큼", Agreement::Any, 1),
    josa("마저", Agreement::Any, 1),
    josa("조차", Agreement::Any, 1),
    josa("밖에", Agreement::Any, 1),
    josa("에는", Agreement::Any, 1),
    josa("에도", Agreement::Any, 1),
    josa("에만", Agreement::Any, 1),
    josa("와는", Agreement::AfterVowel, 1),
    josa("과는", Agreement::AfterConsonant, 1),
    josa("로는", Agreement::AfterVowelOrRieul, 1),
    josa("로도", Agreement::AfterVowelOrRieul, 1),
    josa("이나", Agreement::AfterConsonant, 1),
    josa("이란", Agreement::AfterConsonant, 1),
    josa("은", Agreement::AfterConsonant, 1),
    josa("는", Agreement::AfterVowel, 1),
    josa("이", Agreement::AfterConsonant, 2),
    josa("가", Agreement::AfterVowel, 2),
    josa("을", Agreement::AfterConsonant, 2),
    josa("를", Agreement::AfterVowel, 2),
    josa("과", Agreement::AfterConsonant, 2),
    josa("와", Agreement::AfterVowel, 2),
    josa("로", Agreement::AfterVowelOrRieul, 2),
    josa("의", Agreement::Any, 2),
    josa("에", Agreement::Any, 2),
];

/// 以 의 结尾但不能拆的名词后缀（민주주의 等）
const NON_JOSA_ENDINGS: &[&str] = &["주의"];

fn is_hangul(c: char) -> bool {
    (HANGUL_FIRST..=HANGUL_LAST).contains(&(c as u32))
}

/// 收音索引（0 表示无收音）；非韩文音节返回 None
fn jong(c: char) -> Option<u32> {
    is_hangul(c).then(|| (c as u32 - HANGUL_FIRST) % JONG_COUNT)
}

fn agrees(prev: char, agreement: Agreement) -> bool {
    let Some(j) = jong(prev) else {
        return false;
    };
    match agreement {
        Agreement::Any => true,
        Agreement::AfterConsonant => j != 0,
        Agreement::AfterVowel => j == 0,
        Agreement::AfterVowelOrRieul => j == 0 || j == JONG_RIEUL,
        Agreement::AfterConsonantNotRieul => j != 0 && j != JONG_RIEUL,
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// 字符类别，用于切分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Hangul,
    Latin,
    Digit,
    Symbol,
    Space,
}

fn classify(c: char) -> CharClass {
    if is_hangul(c) {
        CharClass::Hangul
    } else if c.is_whitespace() {
        CharClass::Space
    } else if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Latin
    } else {
        CharClass::Symbol
    }
}

/// 基于规则的韩文分析器
#[derive(Debug, Default, Clone)]
pub struct KoreanAnalyzer;

impl KoreanAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// 分析一个韩文语节
    fn analyze_word(&self, word: &str) -> Vec<Morpheme> {
        if FUNCTION_WORDS.contains(word) {
            return vec![Morpheme::new(word, PosTag::MAG)];
        }

        if let Some(morphs) = split_pronoun(word) {
            return morphs;
        }

        if let Some(morphs) = split_predicate(word) {
            return morphs;
        }

        if is_inflected_predicate(word) {
            return vec![Morpheme::new(word, PosTag::VV)];
        }

        if is_predicate_form(word) {
            return vec![Morpheme::new(word, PosTag::VA)];
        }

        let mut tail = Vec::new();
        let stem = match split_copula(word) {
            Some((stem, copula)) => {
                tail.push(Morpheme::new(copula, PosTag::VCP));
                stem
            }
            None => match split_josa(word) {
                Some((stem, particle)) => {
                    tail.push(Morpheme::new(particle, PosTag::J));
                    stem
                }
                None => word,
            },
        };

        let mut morphs = Vec::with_capacity(3);
        match stem.strip_suffix('들') {
            Some(singular) if char_len(stem) >= 3 => {
                morphs.push(Morpheme::new(singular, PosTag::NNG));
                morphs.push(Morpheme::new("들", PosTag::XSN));
            }
            _ => morphs.push(Morpheme::new(stem, PosTag::NNG)),
        }
        morphs.extend(tail);
        morphs
    }
}

impl MorphAnalyzer for KoreanAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Morpheme> {
        let mut out = Vec::new();
        let mut start = 0;
        let mut current: Option<CharClass> = None;

        let flush = |segment: &str, class: CharClass, out: &mut Vec<Morpheme>| {
            match class {
                CharClass::Hangul => out.extend(self.analyze_word(segment)),
                CharClass::Latin => out.push(Morpheme::new(segment, PosTag::SL)),
                CharClass::Digit => out.push(Morpheme::new(segment, PosTag::SN)),
                CharClass::Symbol => out.push(Morpheme::new(segment, PosTag::SW)),
                CharClass::Space => {}
            }
        };

        for (i, c) in text.char_indices() {
            let class = classify(c);
            match current {
                Some(prev) if prev == class => {}
                Some(prev) => {
                    flush(&text[start..i], prev, &mut out);
                    start = i;
                    current = Some(class);
                }
                None => {
                    start = i;
                    current = Some(class);
                }
            }
        }
        if let Some(prev) = current {
            flush(&text[start..], prev, &mut out);
        }

        out
    }
}

/// 代词本身，或代词 + 助词（그는 → 그 + 는）
fn split_pronoun(word: &str) -> Option<Vec<Morpheme>> {
    if PRONOUNS.contains(word) {
        return Some(vec![Morpheme::new(word, PosTag::NP)]);
    }

    JOSA_RULES.iter().find_map(|rule| {
        let stem = word.strip_suffix(rule.form)?;
        let last = stem.chars().last()?;
        (PRONOUNS.contains(stem) && agrees(last, rule.agreement)).then(|| {
            vec![
                Morpheme::new(stem, PosTag::NP),
                Morpheme::new(rule.form, PosTag::J),
            ]
        })
    })
}

/// 谓词的冠形词形、副词形、连接形
fn is_predicate_form(word: &str) -> bool {
    if IRREGULAR_FORMS.contains(word) {
        return true;
    }

    let chars: Vec<char> = word.chars().collect();
    match chars.as_slice() {
        [stem, ending] => PREDICATE_STEMS.contains(stem) && SHORT_ENDINGS.contains(ending),
        [stem, '아' | '어', '서' | '도' | '야'] => PREDICATE_STEMS.contains(stem),
        // ㅂ 不规则冠形词形：어려운、아름다운
        [.., penult, '운'] => {
            jong(*penult) == Some(0) && !NON_MODIFIER_ENDINGS.iter().any(|e| word.ends_with(e))
        }
        // 副词形：빠르게、어렵게；에게 是助词
        [_, _, .., '게'] => !word.ends_with("에게"),
        _ => false,
    }
}

/// 하다 / 되다 类谓词：词干至少两个音节才拆分
fn split_predicate(word: &str) -> Option<Vec<Morpheme>> {
    PREDICATE_SUFFIXES.iter().find_map(|suffix| {
        let stem = word.strip_suffix(suffix)?;
        (char_len(stem) >= 2).then(|| {
            vec![
                Morpheme::new(stem, PosTag::NNG),
                Morpheme::new(*suffix, PosTag::VV),
            ]
        })
    })
}

/// 过去时 ㅆ 收音、니다、ㄴ다 结尾
fn is_inflected_predicate(word: &str) -> bool {
    if word.chars().any(|c| jong(c) == Some(JONG_SSANG_SIOT)) {
        return true;
    }
    if word.ends_with("니다") {
        return true;
    }
    let chars: Vec<char> = word.chars().collect();
    matches!(
        chars.as_slice(),
        [.., penult, '다'] if jong(*penult) == Some(JONG_NIEUN)
    )
}

fn split_copula(word: &str) -> Option<(&str, &'static str)> {
    // 긍정적인 → 긍정적 + 인
    if word.ends_with("적인") && char_len(word) >= 3 {
        return Some((&word[..word.len() - "인".len()], "인"));
    }

    COPULA_SUFFIXES.iter().find_map(|suffix| {
        let stem = word.strip_suffix(suffix)?;
        (!stem.is_empty()).then_some((stem, *suffix))
    })
}

fn split_josa(word: &str) -> Option<(&str, &'static str)> {
    if NON_JOSA_ENDINGS.iter().any(|e| word.ends_with(e)) {
        return None;
    }

    JOSA_RULES.iter().find_map(|rule| {
        let stem = word.strip_suffix(rule.form)?;
        let last = stem.chars().last()?;
        (char_len(stem) >= rule.min_stem && agrees(last, rule.agreement))
            .then_some((stem, rule.form))
    })
}
