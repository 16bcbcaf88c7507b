//! First-name gender guessing.
//!
//! A fixed lookup of known first names followed by suffix rules. Guesses are
//! only a seed for team balancing and are known to be wrong for some names.

use crate::record::Gender;
use std::collections::HashSet;

const FEMALE_NAMES: &[&str] = &[
    "robin", "tina", "lynn", "josie", "kristen", "annie", "brittany", "lea", "aura", "bonnie",
    "michele", "erika", "kandice", "milissa", "adriana", "diana", "mary", "jennifer", "sara",
    "miriam", "gigi", "lisa", "molly", "krystal", "dana", "hannah", "abby", "shannon", "allison",
    "hanna", "marcie", "anna", "judi", "tracey", "shelly", "denise", "jill", "deborah", "krista",
    "olivia", "kelly", "jackie", "courtney", "cassie", "rachel", "victoria", "cheryl", "amy",
    "nancy", "betty", "sandra", "carol", "ruth", "sharon", "michelle", "laura", "sarah", "kimberly",
];

const MALE_NAMES: &[&str] = &[
    "lawson", "tod", "john", "jeff", "glenn", "michael", "fabian", "matthew", "dave", "andy",
    "richard", "george", "anping", "ben", "ian", "bill", "ed", "scott", "mark", "rodney", "cory",
    "ryan", "anand", "clive", "kevin", "joshua", "mitch", "jason", "jj", "nathan", "aaron",
    "james", "dustin", "dennis", "robert", "frank", "kyle", "albert", "trey", "justin",
    "christopher", "benjamin", "mike", "steve", "graig", "logan", "jon", "byron", "noah",
    "will", "anthony", "donald", "steven", "paul",
];

lazy_static::lazy_static! {
    static ref FEMALE: HashSet<&'static str> = FEMALE_NAMES.iter().copied().collect();
    static ref MALE: HashSet<&'static str> = MALE_NAMES.iter().copied().collect();
}

/// Suffix rule: a lowercase name longer than `min_len` characters ending in
/// one of `suffixes` is guessed as `gender`.
struct SuffixRule {
    suffixes: &'static [&'static str],
    min_len: usize,
    gender: Gender,
}

/// Applied in order after the name lookups; first match wins.
static SUFFIX_RULES: [SuffixRule; 2] = [
    SuffixRule {
        suffixes: &["a", "ia", "elle", "ette", "ine"],
        min_len: 0,
        gender: Gender::Female,
    },
    SuffixRule {
        suffixes: &["n", "r", "d", "k", "s"],
        min_len: 3,
        gender: Gender::Male,
    },
];

/// Guess `M`/`F` from a first name, or `None` when nothing matches.
pub fn guess_gender(first_name: &str) -> Option<Gender> {
    let name = first_name.trim().to_lowercase();

    if FEMALE.contains(name.as_str()) {
        return Some(Gender::Female);
    }
    if MALE.contains(name.as_str()) {
        return Some(Gender::Male);
    }

    let len = name.chars().count();
    SUFFIX_RULES
        .iter()
        .find(|rule| len > rule.min_len && rule.suffixes.iter().any(|s| name.ends_with(s)))
        .map(|rule| rule.gender.clone())
}
