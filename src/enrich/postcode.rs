//! Postcode extraction from free-form address text.
//!
//! A postcode candidate is a run of exactly five ASCII digits sitting on word
//! boundaries: `56100` in `"Cheras 56100 KL"` matches, but neither an 8-digit
//! run (`12345678`) nor a token glued to letters (`A56100`) does.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{MatchPolicy, Postcode};

static POSTCODE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{5}\b").expect("postcode pattern is valid"));

/// All 5-digit candidates in left-to-right order.
pub fn postcode_candidates(text: &str) -> Vec<&str> {
    POSTCODE_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Pick one candidate according to `policy`; `None` when there are no candidates.
pub fn extract_postcode(text: &str, policy: MatchPolicy) -> Option<Postcode> {
    let mut matches = POSTCODE_TOKEN.find_iter(text);
    let chosen = match policy {
        MatchPolicy::First => matches.next(),
        MatchPolicy::Last => matches.last(),
    }?;
    Postcode::canonicalize(chosen.as_str())
}
