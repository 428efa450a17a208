//! Conversation personas and their prompt material.
//!
//! A persona decides who speaks for the service in a session, which base
//! instructions the generator receives, and how prior turns are rendered
//! into the context text sent along with the latest message.

use serde::{Deserialize, Serialize};

use super::{Role, Utterance};

/// Opening line of every therapist session.
pub const THERAPIST_WELCOME: &str = "Hello! I'm here to provide support and a space for reflection. \
I'd love to understand how you're feeling today and what's on your mind. How are you doing?";

const INTERPRETATION_INSTRUCTIONS: &str = "You are a professional dream analyst with expertise in psychology, symbolism, and interpretation.

Your responses should be warm, natural, and conversational. DO NOT use numbered lists or section headings.
Flow naturally from one idea to another as if having a thoughtful conversation.

When analyzing dreams:
- Begin with a warm acknowledgment and brief overall impression of the dream
- Weave interpretations of symbols, psychological perspectives, and real-life connections together naturally
- Avoid clinical language - speak as a wise, empathetic friend would
- Ask only ONE thoughtful question per response
- If you reference previous dreams, do so naturally within your analysis";

const ANALYST_FOLLOW_UP_INSTRUCTIONS: &str = "Continue the dream analysis conversation naturally. \
Be supportive and insightful. Ask only one question per response. \
Watch for any mental health concerns and provide appropriate resources if needed.";

const THERAPIST_INSTRUCTIONS: &str = "You are a compassionate, professional therapist. Your responses should be warm, supportive, and conversational.

Guidelines for your responses:
- Be empathetic and non-judgmental
- Use a warm, conversational tone
- Ask thoughtful, open-ended questions (only one per response)
- Avoid clinical language or jargon
- Provide gentle guidance and validation
- Practice active listening in your responses";

/// Who the service speaks as in a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Follow-up conversation about one submitted dream.
    Analyst,
    /// Open-ended supportive conversation.
    Therapist,
}

impl Persona {
    /// Role recorded for utterances the persona produces.
    pub fn speaker(&self) -> Role {
        match self {
            Persona::Analyst => Role::Analyst,
            Persona::Therapist => Role::Therapist,
        }
    }

    /// Name used for service turns in the rendered context.
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Analyst => "Dream Analyst",
            Persona::Therapist => "Therapist",
        }
    }

    /// Base instructions for an ongoing turn with this persona.
    pub fn follow_up_instructions(&self) -> &'static str {
        match self {
            Persona::Analyst => ANALYST_FOLLOW_UP_INSTRUCTIONS,
            Persona::Therapist => THERAPIST_INSTRUCTIONS,
        }
    }

    /// Renders prior turns plus the latest message into one context block.
    ///
    /// Analyst sessions lead with the dream under discussion.
    pub fn render_context(&self, dream: Option<&str>, history: &[Utterance], latest: &str) -> String {
        let mut turns = String::new();
        for utterance in history {
            let speaker = if utterance.is_user() { "User" } else { self.label() };
            turns.push_str(&format!("{}: {}\n\n", speaker, utterance.content()));
        }

        match self {
            Persona::Analyst => {
                let mut context = String::new();
                if let Some(dream) = dream {
                    context.push_str(&format!("Dream: {}\n\n", dream));
                }
                context.push_str(&turns);
                context.push_str(&format!("User's latest message: {}", latest));
                context
            }
            Persona::Therapist => {
                format!("Previous conversation: {}\nUser's latest message: {}", turns, latest)
            }
        }
    }
}

/// Instructions for the first interpretation of a freshly submitted dream.
///
/// `previous_dreams` holds pre-rendered context lines, newest first.
pub fn interpretation_instructions(previous_dreams: &[String]) -> String {
    let mut instructions = INTERPRETATION_INSTRUCTIONS.to_string();
    if !previous_dreams.is_empty() {
        instructions.push_str("\n\nPrevious dreams context:\n");
        instructions.push_str(&previous_dreams.join("\n"));
    }
    instructions
}

/// User message carrying a dream for its first interpretation.
pub fn interpretation_message(dream_text: &str) -> String {
    format!("Here is my dream: {}", dream_text)
}
