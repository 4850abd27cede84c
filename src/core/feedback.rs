//! Feedback dispatcher: praise, milestones and spoken guidance
//!
//! Stateless. The session decides when feedback is due; this module picks the
//! words and pushes them through the collaborators.

use crate::core::collaborators::{Burst, Collaborators};
use crate::core::Spawner;
use crate::types::{LevelIndex, ModuleId, Persona};

pub struct FeedbackDispatcher;

impl FeedbackDispatcher {
    /// Pick a praise phrase for a scoring event that did not finish the level
    pub fn pick_praise(persona: Persona, spawner: &mut Spawner) -> &'static str {
        let list = persona.praise_list();
        list[spawner.pick(list.len())]
    }

    /// Speak a praise phrase
    pub fn praise(persona: Persona, phrase: &str, collaborators: &mut Collaborators) {
        collaborators.speech.speak(phrase, persona.speech_rate());
    }

    /// Level completed: milestone line and confetti
    pub fn milestone(persona: Persona, collaborators: &mut Collaborators) -> &'static str {
        let line = milestone_line(persona);
        collaborators.speech.speak(line, persona.speech_rate());
        collaborators.celebration.burst(Burst::Milestone);
        line
    }

    /// Speak any guidance line
    pub fn say(persona: Persona, line: &str, collaborators: &mut Collaborators) {
        collaborators.speech.speak(line, persona.speech_rate());
    }
}

pub fn milestone_line(persona: Persona) -> &'static str {
    match persona {
        Persona::Child => "와아! 미션 성공! 한 단계 더 올라갔어!",
        Persona::Elder => "축하합니다 어르신! 단계를 완벽하게 마치셨습니다.",
    }
}

/// Spoken once the persona is chosen
pub fn greeting_line(persona: Persona) -> &'static str {
    match persona {
        Persona::Child => "안녕 친구야! 우리 재미있게 놀자!",
        Persona::Elder => "반갑습니다 어르신. 수업을 시작해볼까요?",
    }
}

/// Start cue for a goal level
pub const START_LINE: &str = "시작!";

/// Spoken on arriving at a module or level through the advance action
pub fn arrival_line(persona: Persona, module: ModuleId, level: LevelIndex) -> &'static str {
    match (module, level, persona) {
        (ModuleId::Pointer, 1, Persona::Child) => "동그라미를 클릭해서 꽃을 피워봐!",
        (ModuleId::Pointer, 1, Persona::Elder) => "동그라미를 클릭해서 꽃을 피워보세요.",
        (ModuleId::Pointer, _, Persona::Child) => "이제 낙엽을 옮겨볼까?",
        (ModuleId::Pointer, _, Persona::Elder) => "마우스를 이동시켜 낙엽을 바구니에 담아보세요.",
        (ModuleId::Keyboard, 1, Persona::Child) => "키보드 마법을 부려보자!",
        (ModuleId::Keyboard, 1, Persona::Elder) => "이제 키보드 연습을 시작합니다.",
        (ModuleId::Keyboard, _, Persona::Child) => "단어를 직접 쳐볼까?",
        (ModuleId::Keyboard, _, Persona::Elder) => "이제 예쁜 단어를 입력해볼까요?",
        (ModuleId::Prompt, _, Persona::Child) => "마법 주문을 만들어보자!",
        (ModuleId::Prompt, _, Persona::Elder) => "그림 주문을 차례대로 골라보세요.",
        (ModuleId::Voice, _, Persona::Child) => "나랑 대화해보자!",
        (ModuleId::Voice, _, Persona::Elder) => "AI와 대화를 나누어 보세요.",
        (ModuleId::Creation, _, Persona::Child) => "상상하는 그림을 만들어보자!",
        (ModuleId::Creation, _, Persona::Elder) => "상상하시는 그림을 만들어 전송해보세요.",
    }
}

pub fn generating_line(persona: Persona) -> &'static str {
    match persona {
        Persona::Child => "그림을 그리는 중이야!",
        Persona::Elder => "AI가 그림을 만들고 있습니다.",
    }
}

pub fn creation_done_line(persona: Persona) -> &'static str {
    match persona {
        Persona::Child => "우와! 근사한 그림이야!",
        Persona::Elder => "그림이 완성되었습니다. 정말 멋지네요.",
    }
}

/// The helper mascot's tip
pub fn help_line(persona: Persona) -> &'static str {
    match persona {
        Persona::Child => "입력창을 누르고 글자를 쳐봐!",
        Persona::Elder => "화면의 지시사항을 따라해보세요.",
    }
}
