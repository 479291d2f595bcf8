use serde::{Deserialize, Serialize};

/// 词义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMeaning {
    pub ja: String,
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// 例句（德语原文 + 译文）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordExample {
    pub de: String,
    pub ja: String,
}

/// 变体形式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordVariant {
    pub form: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

/// 助动词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Auxiliary {
    Haben,
    Sein,
}

impl Auxiliary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Auxiliary::Haben => "haben",
            Auxiliary::Sein => "sein",
        }
    }
}

/// 动词三基本形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conjugation {
    pub infinitive: String,
    pub preterite: String,
    pub past_participle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<Auxiliary>,
}

/// 构词成分的释义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMeaning {
    pub ja: String,
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtymologyComponent {
    pub form: String,
    pub meaning: ComponentMeaning,
    pub part_of_speech: String,
}

/// 构词类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EtymologyKind {
    Compound,
    SeparableVerb,
    DerivedNoun,
    #[default]
    #[serde(other)]
    Other,
}

/// 词源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Etymology {
    #[serde(rename = "type", default)]
    pub kind: EtymologyKind,
    #[serde(default)]
    pub components: Vec<EtymologyComponent>,
}

/// 名词的语法性别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    Plural,
}

impl Gender {
    /// 未知取值返回 None，渲染时不着色
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "masculine" => Some(Gender::Masculine),
            "feminine" => Some(Gender::Feminine),
            "neuter" => Some(Gender::Neuter),
            "plural" => Some(Gender::Plural),
            _ => None,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
            Gender::Neuter => "n",
            Gender::Plural => "p",
        }
    }
}

/// 单词条目（只读，从词表文件加载）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<WordVariant>>,
    pub meanings: Vec<WordMeaning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<WordExample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conjugation: Option<Conjugation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<Etymology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl WordEntry {
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }
}

#[cfg(test)]
impl WordEntry {
    /// 测试用的最小条目
    pub fn sample(id: &str, word: &str) -> Self {
        Self {
            id: id.to_string(),
            word: word.to_string(),
            part_of_speech: "noun".to_string(),
            gender: None,
            plural: None,
            variants: None,
            meanings: vec![WordMeaning {
                ja: format!("{}（ja）", word),
                en: format!("{} (en)", word),
                note: None,
            }],
            examples: None,
            conjugation: None,
            etymology: None,
            tags: None,
        }
    }
}
