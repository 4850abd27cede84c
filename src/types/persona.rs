//! Learner personas

use serde::{Deserialize, Serialize};

/// The learner archetype, chosen once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Older first-time computer user
    Elder,
    /// Young child
    Child,
}

impl Persona {
    /// Speech rate hint passed to speech output
    pub fn speech_rate(&self) -> f32 {
        match self {
            Persona::Elder => 0.8,
            Persona::Child => 1.0,
        }
    }

    /// Words for keyboard level 2
    pub fn word_list(&self) -> &'static [&'static str] {
        match self {
            Persona::Elder => &["사랑", "안녕", "행복", "건강", "감사"],
            Persona::Child => &["우유", "사과", "포도", "나비", "학교"],
        }
    }

    /// Rotating praise phrases
    pub fn praise_list(&self) -> &'static [&'static str] {
        match self {
            Persona::Elder => &["잘하셨어요!", "훌륭합니다!", "정확해요!", "좋습니다!", "최고예요!"],
            Persona::Child => &["대단해!", "정말 잘해!", "우와!", "최고!", "멋져!"],
        }
    }

    /// Assistant emoji shown next to the helper bubble
    pub fn mascot(&self) -> &'static str {
        match self {
            Persona::Elder => "🤖",
            Persona::Child => "🐶",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Persona::Elder => "elder",
            Persona::Child => "child",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elder" | "silver" => Ok(Persona::Elder),
            "child" | "junior" => Ok(Persona::Child),
            other => Err(format!("unknown persona '{}'", other)),
        }
    }
}
