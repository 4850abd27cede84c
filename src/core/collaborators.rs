//! Narrow contracts to the outside world
//!
//! Speech, sound, celebration effects and image generation are owned by the
//! host. All of them are fire-and-forget from the session's point of view; a
//! missing collaborator degrades to "nothing happens".

use crate::types::GenerationError;

/// Text-to-speech. Implementations interrupt any utterance in flight.
pub trait SpeechOutput {
    fn speak(&mut self, text: &str, rate: f32);
}

/// Speech-to-text. The transcript arrives later through
/// `GameSession::receive_transcript`.
pub trait SpeechInput {
    /// Begin listening; false when no input device or API exists
    fn start_listening(&mut self) -> bool;
}

/// Short tone, best effort
pub trait SoundCue {
    fn play_tone(&mut self, frequency: f32);
}

/// How big the confetti burst is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// Level completed
    Milestone,
    /// Image delivered
    Creation,
}

impl Burst {
    pub fn particle_count(&self) -> u32 {
        match self {
            Burst::Milestone => 150,
            Burst::Creation => 100,
        }
    }
}

/// Cosmetic celebration effect
pub trait Celebration {
    fn burst(&mut self, intensity: Burst);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub image_url: String,
}

/// Text-to-image service
pub trait ImageGenerator {
    fn generate(&mut self, prompt: &str) -> Result<GeneratedImage, GenerationError>;
}

/// Does nothing; speech input reports itself unavailable
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SpeechOutput for Silent {
    fn speak(&mut self, _text: &str, _rate: f32) {}
}

impl SpeechInput for Silent {
    fn start_listening(&mut self) -> bool {
        false
    }
}

impl SoundCue for Silent {
    fn play_tone(&mut self, _frequency: f32) {}
}

impl Celebration for Silent {
    fn burst(&mut self, _intensity: Burst) {}
}

/// Seeded stock photo keyed by the prompt text
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderImages;

impl ImageGenerator for PlaceholderImages {
    fn generate(&mut self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        Ok(GeneratedImage {
            image_url: format!("https://picsum.photos/seed/{}/800/600", encode_path_segment(prompt)),
        })
    }
}

/// Percent-encode everything outside the unreserved set
fn encode_path_segment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// The full set of collaborators a session talks to
pub struct Collaborators {
    pub speech: Box<dyn SpeechOutput>,
    pub listener: Box<dyn SpeechInput>,
    pub sound: Box<dyn SoundCue>,
    pub celebration: Box<dyn Celebration>,
    pub images: Box<dyn ImageGenerator>,
}

impl Collaborators {
    /// No speech, no sound, no effects; placeholder images
    pub fn silent() -> Self {
        Self {
            speech: Box::new(Silent),
            listener: Box::new(Silent),
            sound: Box::new(Silent),
            celebration: Box::new(Silent),
            images: Box::new(PlaceholderImages),
        }
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_url_is_keyed_by_prompt() {
        let mut images = PlaceholderImages;
        let a = images.generate("blue cat").unwrap();
        let b = images.generate("blue cat").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.image_url, "https://picsum.photos/seed/blue%20cat/800/600");
    }

    #[test]
    fn test_korean_prompt_is_encoded() {
        let url = PlaceholderImages.generate("공룡").unwrap().image_url;
        assert!(url.starts_with("https://picsum.photos/seed/%EA%B3%B5"));
        assert!(url.is_ascii());
    }

    #[test]
    fn test_silent_listener_is_unavailable() {
        assert!(!Silent.start_listening());
    }
}
