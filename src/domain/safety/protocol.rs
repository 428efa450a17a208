//! Safety protocol texts and the post-generation guarantee.
//!
//! Everything here is deterministic. Given the dialogue state and the
//! resource table it produces the instruction block for the generator, the
//! guarantee pass over a generated reply, and the fixed replies used when
//! generation is skipped or fails.

use super::{DialogueState, ResourceResolver};

/// Fixed sentence asking where the user is.
pub const COUNTRY_REQUEST: &str =
    "I'm concerned about you. So I can point you to the most relevant resources, which country are you in?";

/// First sentence of every templated crisis reply.
pub const CRISIS_OPENER: &str = "I'm really concerned about what you're sharing. \
It sounds like you're going through an incredibly difficult time.";

/// Templated reply when a non-crisis turn cannot be generated.
pub const GENTLE_FALLBACK: &str = "I appreciate you sharing that with me. \
Could you tell me more about how you're feeling about this situation?";

/// Applies the safety protocol on top of a resource resolver.
#[derive(Debug, Clone)]
pub struct SafetyProtocol {
    resolver: ResourceResolver,
}

impl SafetyProtocol {
    pub fn new(resolver: ResourceResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    /// Instruction block appended to the persona instructions in crisis mode.
    pub fn instructions(&self) -> String {
        let table = self.resolver.table();
        let resources: String = table
            .countries
            .iter()
            .map(|c| format!("- {}: {}\n", c.key, c.resource))
            .collect();

        format!(
            "\n\nCRITICAL: MENTAL HEALTH CRISIS PROTOCOL\n\n\
             The user has mentioned concerning content that suggests they may be in crisis.\n\n\
             Follow these steps exactly:\n\
             1. Express empathy and validation for their feelings\n\
             2. If we don't know their country yet, ask: \"{}\"\n\
             3. If we know their country, provide the appropriate crisis resources\n\
             4. Encourage them to reach out to these resources immediately\n\
             5. Remind them that they're not alone and help is available\n\n\
             Available resources:\n{}\
             Global resource: {}\n\n\
             This is your HIGHEST PRIORITY. Provide specific helpline numbers when possible.",
            COUNTRY_REQUEST,
            resources,
            table.global
        )
    }

    /// Fixed reply to a crisis-flagged first dream submission.
    pub fn first_submission_message(&self) -> String {
        format!(
            "I'm genuinely concerned about what you've shared. Dreams about suicide or self-harm \
             can be very distressing, and I want to make sure you have immediate support.\n\n\
             Your safety and wellbeing are the most important things right now. Please know that \
             help is available, and you don't have to go through these feelings alone.\n\n\
             Could you tell me which country are you in, so I can provide the most relevant crisis \
             resources? In the meantime, here are some international resources:\n\n\
             {}\n\n\
             Please reach out to these resources. They have trained professionals available 24/7 \
             who can provide immediate support.",
            self.resolver.global()
        )
    }

    /// Post-processes a generated crisis reply so it always carries either a
    /// concrete resource or a request for the user's location.
    pub fn guarantee(&self, generated: String, state: &DialogueState) -> String {
        let mut reply = generated;
        let lowered = reply.to_lowercase();

        match state.known_country.as_deref() {
            Some(country) => {
                let resource = self.resolver.resolve(country);
                if !lowered.contains(&resource.to_lowercase()) {
                    tracing::info!(country, "Appending missing crisis resource to reply");
                    reply.push_str(&format!(
                        "\n\nPlease reach out to these resources immediately: {}",
                        resource
                    ));
                }
            }
            None if asks_for_location(&lowered) => {}
            None => {
                tracing::info!("Appending country request to crisis reply");
                reply.push_str("\n\n");
                reply.push_str(COUNTRY_REQUEST);
            }
        }
        reply
    }

    /// Deterministic reply used when generation fails.
    pub fn fallback(&self, crisis: bool, state: &DialogueState) -> String {
        if !crisis {
            return GENTLE_FALLBACK.to_string();
        }

        match state.known_country.as_deref() {
            Some(country) => format!(
                "{} Please reach out to these resources immediately: {}",
                CRISIS_OPENER,
                self.resolver.resolve(country)
            ),
            None if !state.asked_for_country => format!("{} {}", CRISIS_OPENER, COUNTRY_REQUEST),
            None => format!(
                "{} Here are some global resources: {}",
                CRISIS_OPENER,
                self.resolver.global()
            ),
        }
    }
}

impl Default for SafetyProtocol {
    fn default() -> Self {
        Self::new(ResourceResolver::default())
    }
}

/// True if the text already asks where the user is.
pub fn asks_for_location(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("country") || lowered.contains("where are you")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::safety::dialogue::is_country_request;
    use proptest::prelude::*;

    const CANADA: &str = "Crisis Services Canada: 1-833-456-4566";
    const GLOBAL: &str =
        "International Association for Suicide Prevention (IASP): https://findahelpline.com";

    fn known(country: &str) -> DialogueState {
        DialogueState {
            asked_for_country: true,
            known_country: Some(country.to_string()),
        }
    }

    fn unknown(asked: bool) -> DialogueState {
        DialogueState {
            asked_for_country: asked,
            known_country: None,
        }
    }

    #[test]
    fn country_request_is_recognized_by_tracker() {
        assert!(is_country_request(COUNTRY_REQUEST));
        assert!(is_country_request(&SafetyProtocol::default().first_submission_message()));
    }

    #[test]
    fn instructions_embed_every_resource() {
        let block = SafetyProtocol::default().instructions();
        assert!(block.contains("CRISIS PROTOCOL"));
        assert!(block.contains("- canada: Crisis Services Canada"));
        assert!(block.contains("- india: Tele-MANAS"));
        assert!(block.contains(GLOBAL));
        assert!(block.contains("HIGHEST PRIORITY"));
    }

    #[test]
    fn first_submission_message_contains_global_resource() {
        let msg = SafetyProtocol::default().first_submission_message();
        assert!(msg.contains(GLOBAL));
    }

    #[test]
    fn guarantee_appends_missing_known_resource() {
        let out = SafetyProtocol::default().guarantee("Please stay safe.".into(), &known("canada"));
        assert!(out.ends_with(&format!("Please reach out to these resources immediately: {}", CANADA)));
    }

    #[test]
    fn guarantee_keeps_reply_already_containing_resource() {
        let text = "Call crisis services canada: 1-833-456-4566 now.".to_string();
        let out = SafetyProtocol::default().guarantee(text.clone(), &known("canada"));
        assert_eq!(out, text);
    }

    #[test]
    fn guarantee_asks_for_country_when_unknown_and_not_asked() {
        let out = SafetyProtocol::default().guarantee("You matter.".into(), &unknown(false));
        assert!(out.ends_with(COUNTRY_REQUEST));
    }

    #[test]
    fn guarantee_leaves_existing_location_question() {
        let text = "Where are you right now?".to_string();
        let out = SafetyProtocol::default().guarantee(text.clone(), &unknown(false));
        assert_eq!(out, text);
    }

    #[test]
    fn guarantee_asks_again_when_country_still_unknown() {
        let out = SafetyProtocol::default().guarantee("I hear you.".into(), &unknown(true));
        assert_eq!(out, format!("I hear you.\n\n{}", COUNTRY_REQUEST));
        assert!(!out.contains(GLOBAL));
    }

    #[test]
    fn fallback_for_non_crisis_is_gentle_question() {
        let out = SafetyProtocol::default().fallback(false, &known("canada"));
        assert_eq!(out, GENTLE_FALLBACK);
    }

    #[test]
    fn fallback_with_known_country_names_resource() {
        let out = SafetyProtocol::default().fallback(true, &known("canada"));
        assert!(out.starts_with(CRISIS_OPENER));
        assert!(out.contains(CANADA));
    }

    #[test]
    fn fallback_unknown_not_asked_requests_country_without_resource() {
        let out = SafetyProtocol::default().fallback(true, &unknown(false));
        assert!(asks_for_location(&out));
        assert!(!out.contains(CANADA));
        assert!(!out.contains(GLOBAL));
    }

    #[test]
    fn fallback_unknown_already_asked_gives_global() {
        let out = SafetyProtocol::default().fallback(true, &unknown(true));
        assert!(out.ends_with(GLOBAL));
    }

    fn carries_resource_or_location_request(text: &str, resolver: &ResourceResolver) -> bool {
        let lowered = text.to_lowercase();
        let table = resolver.table();
        asks_for_location(text)
            || lowered.contains(&table.global.to_lowercase())
            || table
                .countries
                .iter()
                .any(|c| lowered.contains(&c.resource.to_lowercase()))
    }

    fn dialogue_state() -> impl Strategy<Value = DialogueState> {
        let country = prop_oneof![
            Just(None),
            Just(Some("india".to_string())),
            Just(Some("united states".to_string())),
            Just(Some("uk".to_string())),
            Just(Some("australia".to_string())),
            Just(Some("canada".to_string())),
            Just(Some("atlantis".to_string())),
        ];
        (any::<bool>(), country).prop_map(|(asked_for_country, known_country)| DialogueState {
            asked_for_country,
            known_country,
        })
    }

    proptest! {
        #[test]
        fn crisis_reply_always_offers_help_or_asks_location(
            generated in "\\PC{0,120}",
            state in dialogue_state(),
            generation_failed in any::<bool>(),
        ) {
            let protocol = SafetyProtocol::default();
            let reply = if generation_failed {
                protocol.fallback(true, &state)
            } else {
                protocol.guarantee(generated, &state)
            };
            prop_assert!(
                carries_resource_or_location_request(&reply, protocol.resolver()),
                "reply lacks resource and location request: {:?}",
                reply
            );
        }
    }
}
