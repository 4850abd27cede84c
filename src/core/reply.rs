//! Placeholder assistant replies for the voice module
//!
//! A keyword lookup, not a language model.

use crate::types::Persona;

/// (keyword, child reply, elder reply); first match wins
const REPLIES: [(&str, &str, &str); 5] = [
    ("안녕", "안녕! 만나서 반가워!", "안녕하세요! 만나서 반갑습니다."),
    ("이름", "나는 마법 지팡이 친구야!", "저는 여러분을 돕는 AI 도우미입니다."),
    ("날씨", "오늘은 그림 그리기 좋은 날이야!", "오늘도 건강 조심하시고 좋은 하루 보내세요."),
    ("그림", "좋아! 다음에 같이 그림을 만들어보자!", "다음 단계에서 그림을 함께 만들어 보세요."),
    ("고마", "나도 고마워!", "천만에요. 언제든 불러주세요."),
];

const FALLBACK_CHILD: &str = "그렇구나! 더 이야기해줘!";
const FALLBACK_ELDER: &str = "네, 잘 들었습니다. 더 말씀해 주세요.";

/// Reply to a transcript; None for an empty one
pub fn placeholder_reply(persona: Persona, transcript: &str) -> Option<&'static str> {
    let text = transcript.trim();
    if text.is_empty() {
        return None;
    }
    let hit = REPLIES.iter().find(|(keyword, _, _)| text.contains(keyword));
    Some(match (hit, persona) {
        (Some((_, child, _)), Persona::Child) => child,
        (Some((_, _, elder)), Persona::Elder) => elder,
        (None, Persona::Child) => FALLBACK_CHILD,
        (None, Persona::Elder) => FALLBACK_ELDER,
    })
}
