//! Learning modules and levels

use serde::{Deserialize, Serialize};

/// Level number within a module, starting at 1
pub type LevelIndex = u8;

/// A top-level learning activity, in canonical progression order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    /// Clicking and dragging
    Pointer,
    /// Key pressing and word typing
    Keyboard,
    /// Building an image prompt from missions (child only in the normal flow)
    Prompt,
    /// Talking with the assistant
    Voice,
    /// Turning a description into an image
    Creation,
}

impl ModuleId {
    /// All modules in canonical order
    pub const ALL: [ModuleId; 5] = [
        ModuleId::Pointer,
        ModuleId::Keyboard,
        ModuleId::Prompt,
        ModuleId::Voice,
        ModuleId::Creation,
    ];

    /// Number of levels; free-form modules report 1
    pub fn level_count(&self) -> LevelIndex {
        match self {
            ModuleId::Pointer | ModuleId::Keyboard => 2,
            ModuleId::Prompt | ModuleId::Voice | ModuleId::Creation => 1,
        }
    }

    /// Does this module have a score goal and a Completed state?
    pub fn is_goal_bounded(&self) -> bool {
        matches!(self, ModuleId::Pointer | ModuleId::Keyboard | ModuleId::Prompt)
    }

    /// Free-form modules are always considered started
    pub fn always_started(&self) -> bool {
        !self.is_goal_bounded()
    }

    /// Display title for a level of this module
    pub fn title(&self, level: LevelIndex) -> &'static str {
        match (self, level) {
            (ModuleId::Pointer, 1) => "클릭 연습",
            (ModuleId::Pointer, _) => "드래그 연습",
            (ModuleId::Keyboard, 1) => "키보드 입문",
            (ModuleId::Keyboard, _) => "문장 입력",
            (ModuleId::Prompt, _) => "주문 만들기",
            (ModuleId::Voice, _) => "대화 나누기",
            (ModuleId::Creation, _) => "작품 만들기",
        }
    }

    /// Icon for the header
    pub fn icon(&self) -> &'static str {
        match self {
            ModuleId::Pointer => "🖱",
            ModuleId::Keyboard => "⌨",
            ModuleId::Prompt => "🧩",
            ModuleId::Voice => "🎤",
            ModuleId::Creation => "🪄",
        }
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModuleId::Pointer => "pointer",
            ModuleId::Keyboard => "keyboard",
            ModuleId::Prompt => "prompt",
            ModuleId::Voice => "voice",
            ModuleId::Creation => "creation",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ModuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pointer" | "mouse" => Ok(ModuleId::Pointer),
            "keyboard" => Ok(ModuleId::Keyboard),
            "prompt" => Ok(ModuleId::Prompt),
            "voice" => Ok(ModuleId::Voice),
            "creation" => Ok(ModuleId::Creation),
            other => Err(format!("unknown module '{}'", other)),
        }
    }
}
