//! Voice command parsing
//!
//! Rule-based: the first matching trigger family wins.
//!
//! | Trigger                              | Intent          |
//! |--------------------------------------|-----------------|
//! | `where is`, `find`, `search for`     | `FindItem`      |
//! | `show me`, `go to`                   | `ShowContainer` |
//! | anything else                        | `Search`        |

use super::encode_query_value;
use serde::{Deserialize, Serialize};

const FIND_TRIGGERS: [&[&str]; 3] = [&["where", "is"], &["search", "for"], &["find"]];
const SHOW_TRIGGERS: [&[&str]; 2] = [&["show", "me"], &["go", "to"]];

/// What a spoken command asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "query", rename_all = "snake_case")]
pub enum VoiceIntent {
    /// "where is my drill" → locate an item
    FindItem(String),
    /// "show me camping gear" → open the container list filtered
    ShowContainer(String),
    /// Anything else is searched verbatim
    Search(String),
    /// Nothing actionable was said
    None,
}

impl VoiceIntent {
    /// App route for this intent, `None` when nothing should happen
    pub fn route(&self) -> Option<String> {
        match self {
            VoiceIntent::FindItem(q) | VoiceIntent::Search(q) => {
                Some(format!("/dashboard?q={}", encode_query_value(q)))
            }
            VoiceIntent::ShowContainer(q) if q.is_empty() => Some("/tubs".to_string()),
            VoiceIntent::ShowContainer(q) => Some(format!("/tubs?q={}", encode_query_value(q))),
            VoiceIntent::None => None,
        }
    }

    /// Extracted argument, if any
    pub fn query(&self) -> Option<&str> {
        match self {
            VoiceIntent::FindItem(q) | VoiceIntent::ShowContainer(q) | VoiceIntent::Search(q) => {
                Some(q)
            }
            VoiceIntent::None => None,
        }
    }
}

/// Map a final speech transcript to an intent
pub fn parse_command(utterance: &str) -> VoiceIntent {
    let lowered = utterance.to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| matches!(c, '?' | '!' | '.' | ',')))
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return VoiceIntent::None;
    }

    if FIND_TRIGGERS.iter().any(|t| find_phrase(&words, t).is_some()) {
        let mut rest = strip_phrases(words, &FIND_TRIGGERS);
        if rest.first() == Some(&"my") {
            rest.remove(0);
        }
        let query = rest.join(" ");
        return if query.is_empty() {
            VoiceIntent::None
        } else {
            VoiceIntent::FindItem(query)
        };
    }

    if SHOW_TRIGGERS.iter().any(|t| find_phrase(&words, t).is_some()) {
        let rest = strip_phrases(words, &SHOW_TRIGGERS);
        return VoiceIntent::ShowContainer(rest.join(" "));
    }

    VoiceIntent::Search(words.join(" "))
}

/// Index of the first occurrence of `phrase` as consecutive whole words
fn find_phrase(words: &[&str], phrase: &[&str]) -> Option<usize> {
    words.windows(phrase.len()).position(|w| w == phrase)
}

/// Remove the first occurrence of each phrase
fn strip_phrases<'a>(mut words: Vec<&'a str>, phrases: &[&[&str]]) -> Vec<&'a str> {
    for phrase in phrases {
        if let Some(at) = find_phrase(&words, phrase) {
            words.drain(at..at + phrase.len());
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_is_strips_my() {
        assert_eq!(
            parse_command("Where is my drill?"),
            VoiceIntent::FindItem("drill".into())
        );
    }

    #[test]
    fn test_find_and_search_for() {
        assert_eq!(
            parse_command("find the christmas lights"),
            VoiceIntent::FindItem("the christmas lights".into())
        );
        assert_eq!(
            parse_command("search for batteries"),
            VoiceIntent::FindItem("batteries".into())
        );
    }

    #[test]
    fn test_my_inside_words_is_kept() {
        assert_eq!(
            parse_command("find mystery box"),
            VoiceIntent::FindItem("mystery box".into())
        );
    }

    #[test]
    fn test_triggers_match_whole_words() {
        assert_eq!(
            parse_command("finder box"),
            VoiceIntent::Search("finder box".into())
        );
        assert_eq!(
            parse_command("showme tent"),
            VoiceIntent::Search("showme tent".into())
        );
    }

    #[test]
    fn test_trigger_only_is_none() {
        assert_eq!(parse_command("where is my"), VoiceIntent::None);
        assert_eq!(parse_command("   "), VoiceIntent::None);
    }

    #[test]
    fn test_show_me_and_go_to() {
        assert_eq!(
            parse_command("Show me camping gear"),
            VoiceIntent::ShowContainer("camping gear".into())
        );
        assert_eq!(
            parse_command("go to garage"),
            VoiceIntent::ShowContainer("garage".into())
        );
        assert_eq!(parse_command("show me").route().as_deref(), Some("/tubs"));
    }

    #[test]
    fn test_fallback_search() {
        let intent = parse_command("Winter Coats");
        assert_eq!(intent, VoiceIntent::Search("winter coats".into()));
        assert_eq!(intent.route().as_deref(), Some("/dashboard?q=winter%20coats"));
    }

    #[test]
    fn test_find_takes_priority_over_show() {
        assert_eq!(
            parse_command("show me where is the tent"),
            VoiceIntent::FindItem("show me the tent".into())
        );
    }

    #[test]
    fn test_routes() {
        assert_eq!(
            parse_command("where is my power drill").route().as_deref(),
            Some("/dashboard?q=power%20drill")
        );
        assert_eq!(
            parse_command("go to attic").route().as_deref(),
            Some("/tubs?q=attic")
        );
        assert_eq!(VoiceIntent::None.route(), None);
    }
}
