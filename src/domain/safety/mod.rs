//! Safety domain module.
//!
//! Crisis classification, helpline resources, dialogue state around the
//! country exchange, and the protocol that ties them to generated replies.

mod crisis;
mod dialogue;
mod protocol;
mod resources;

pub use crisis::{CrisisClassifier, DEFAULT_CRISIS_KEYWORDS};
pub use dialogue::{is_country_request, DialogueState, DialogueTracker};
pub use protocol::{asks_for_location, SafetyProtocol, COUNTRY_REQUEST, CRISIS_OPENER, GENTLE_FALLBACK};
pub use resources::{CountryResource, ResourceResolver, ResourceTable, ResourceTableError};
