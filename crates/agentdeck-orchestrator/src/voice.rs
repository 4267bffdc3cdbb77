use crate::types::{seeded_uuid, Agent, VoiceCommand, VoiceIntent};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Commands at or below this confidence are not acted on.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

const UNKNOWN_CONFIDENCE: f64 = 0.5;
const UNKNOWN_RESPONSE: &str =
    "Sorry, I didn't understand that. Try asking for agent status or project progress.";

struct IntentRule {
    keywords: [&'static str; 2],
    intent: VoiceIntent,
    confidence: f64,
    response: &'static str,
}

/// Checked in order; the first rule whose keywords all appear wins.
const RULES: [IntentRule; 4] = [
    IntentRule {
        keywords: ["agent", "status"],
        intent: VoiceIntent::ShowAgentStatus,
        confidence: 0.9,
        response: "Showing current status for all agents.",
    },
    IntentRule {
        keywords: ["schedule", "handoff"],
        intent: VoiceIntent::ScheduleHandoff,
        confidence: 0.85,
        response: "Scheduling a handoff between the selected agents.",
    },
    IntentRule {
        keywords: ["check", "progress"],
        intent: VoiceIntent::CheckProgress,
        confidence: 0.88,
        response: "Here is the latest progress across active projects.",
    },
    IntentRule {
        keywords: ["resolve", "conflict"],
        intent: VoiceIntent::ResolveConflict,
        confidence: 0.82,
        response: "Opening conflict resolution for the flagged agents.",
    },
];

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Word index where `phrase` first occurs as whole words.
fn find_phrase(transcript: &[&str], phrase: &str) -> Option<usize> {
    let phrase = phrase.to_lowercase();
    let needle = words(&phrase);
    if needle.is_empty() {
        return None;
    }
    transcript
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
}

/// Roster names and role titles mentioned in the transcript, in the order spoken.
fn extract_entities(lowered: &str, roster: &[Agent]) -> Vec<String> {
    let transcript = words(lowered);
    let mut found: Vec<(usize, String)> = Vec::new();
    for agent in roster {
        let by_name = find_phrase(&transcript, &agent.name);
        let by_first = agent
            .name
            .split_whitespace()
            .next()
            .and_then(|first| find_phrase(&transcript, first));
        if let Some(at) = by_name.into_iter().chain(by_first).min() {
            found.push((at, agent.name.clone()));
        }
        let title = agent.role.label();
        if let Some(at) = find_phrase(&transcript, title) {
            found.push((at, title.to_string()));
        }
    }
    found.sort_by_key(|(at, _)| *at);

    let mut entities: Vec<String> = Vec::with_capacity(found.len());
    for (_, entity) in found {
        if !entities.contains(&entity) {
            entities.push(entity);
        }
    }
    entities
}

/// Map a transcript to an intent by keyword matching.
pub fn interpret<R: Rng + ?Sized>(
    transcript: &str,
    roster: &[Agent],
    rng: &mut R,
    now: DateTime<Utc>,
) -> VoiceCommand {
    let lowered = transcript.to_lowercase();
    let rule = RULES
        .iter()
        .find(|rule| rule.keywords.iter().all(|k| lowered.contains(k)));

    let (intent, confidence, response) = match rule {
        Some(rule) => (rule.intent, rule.confidence, rule.response),
        None => (VoiceIntent::Unknown, UNKNOWN_CONFIDENCE, UNKNOWN_RESPONSE),
    };
    tracing::debug!(%intent, confidence, "Interpreted voice transcript");

    VoiceCommand {
        id: seeded_uuid(rng),
        transcript: transcript.to_string(),
        intent,
        entities: extract_entities(&lowered, roster),
        confidence,
        timestamp: now,
        response: response.to_string(),
    }
}

/// Whether a command is confident enough to act on (strictly above `threshold`).
pub fn is_actionable(command: &VoiceCommand, threshold: f64) -> bool {
    command.intent != VoiceIntent::Unknown && command.confidence > threshold
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::profiles::default_roster;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(transcript: &str) -> VoiceCommand {
        interpret(
            transcript,
            &default_roster(Utc::now()),
            &mut StdRng::seed_from_u64(41),
            Utc::now(),
        )
    }

    #[test]
    fn test_status_request_is_accepted() {
        let cmd = run("show me agent status please");
        assert_eq!(cmd.intent, VoiceIntent::ShowAgentStatus);
        assert!(cmd.confidence >= 0.7);
        assert!(is_actionable(&cmd, DEFAULT_CONFIDENCE_THRESHOLD));
    }

    #[test]
    fn test_gibberish_is_rejected() {
        let cmd = run("banana");
        assert_eq!(cmd.intent, VoiceIntent::Unknown);
        assert_eq!(cmd.confidence, 0.5);
        assert!(cmd.response.contains("didn't understand"));
        assert!(!is_actionable(&cmd, DEFAULT_CONFIDENCE_THRESHOLD));
    }

    #[test]
    fn test_each_intent_and_confidence() {
        assert_eq!(run("Schedule a HANDOFF").intent, VoiceIntent::ScheduleHandoff);
        assert_eq!(run("schedule a handoff").confidence, 0.85);
        assert_eq!(run("check the progress").intent, VoiceIntent::CheckProgress);
        assert_eq!(run("check the progress").confidence, 0.88);
        assert_eq!(run("resolve this conflict").intent, VoiceIntent::ResolveConflict);
        assert_eq!(run("resolve this conflict").confidence, 0.82);
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        let cmd = run("check progress and agent status");
        assert_eq!(cmd.intent, VoiceIntent::ShowAgentStatus);
    }

    #[test]
    fn test_single_keyword_is_not_enough() {
        assert_eq!(run("status").intent, VoiceIntent::Unknown);
        assert_eq!(run("handoff now").intent, VoiceIntent::Unknown);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut cmd = run("resolve conflict");
        cmd.confidence = 0.7;
        assert!(!is_actionable(&cmd, 0.7));
    }

    #[test]
    fn test_entities_from_roster() {
        let cmd = run("Schedule a handoff from Sam to the QA Engineer");
        assert!(cmd.entities.contains(&"Sam Chen".to_string()));
        assert!(cmd.entities.contains(&"QA Engineer".to_string()));
        assert!(run("banana").entities.is_empty());
    }

    #[test]
    fn test_entities_follow_transcript_order() {
        let cmd = run("schedule handoff from Morgan to Jordan");
        assert_eq!(cmd.entities, vec!["Morgan Lee", "Jordan Blake"]);
        let cmd = run("from the UI/UX designer over to Sam");
        assert_eq!(cmd.entities, vec!["UI/UX Designer", "Sam Chen"]);
    }

    #[test]
    fn test_names_match_whole_words_only() {
        assert!(run("check the same progress").entities.is_empty());
        assert!(run("caseys drewing reesearch").entities.is_empty());
        let cmd = run("schedule the same handoff from Jordan to Morgan");
        assert_eq!(cmd.entities, vec!["Jordan Blake", "Morgan Lee"]);
    }
}
