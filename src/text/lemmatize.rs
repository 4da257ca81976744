// Verb-form lemmatizer.
//
// Reduces inflected verb forms to their base form using a small verb lexicon,
// an irregular-form exception table, and the standard detachment rules for
// English verb suffixes (-s, -ies, -es, -ed, -ing). A rule only fires when
// the candidate it produces is a known base verb, so unknown words pass
// through untouched and every base form maps to itself.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Suffix detachment rules tried in order: (suffix, replacement).
const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

/// Irregular inflections: (inflected form, base form).
const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("being", "be"),
    ("has", "have"), ("had", "have"), ("having", "have"),
    ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
    ("went", "go"), ("gone", "go"), ("goes", "go"),
    ("made", "make"), ("said", "say"), ("says", "say"),
    ("got", "get"), ("gotten", "get"), ("getting", "get"),
    ("took", "take"), ("taken", "take"),
    ("came", "come"), ("knew", "know"), ("known", "know"),
    ("thought", "think"), ("told", "tell"), ("found", "find"),
    ("gave", "give"), ("given", "give"),
    ("felt", "feel"), ("left", "leave"), ("kept", "keep"),
    ("began", "begin"), ("begun", "begin"),
    ("brought", "bring"), ("bought", "buy"), ("built", "build"),
    ("caught", "catch"), ("chose", "choose"), ("chosen", "choose"),
    ("drew", "draw"), ("drawn", "draw"), ("drank", "drink"), ("drunk", "drink"),
    ("drove", "drive"), ("driven", "drive"), ("ate", "eat"), ("eaten", "eat"),
    ("fell", "fall"), ("fallen", "fall"), ("fought", "fight"),
    ("flew", "fly"), ("flown", "fly"), ("forgot", "forget"), ("forgotten", "forget"),
    ("grew", "grow"), ("grown", "grow"), ("heard", "hear"), ("held", "hold"),
    ("hid", "hide"), ("hidden", "hide"), ("led", "lead"), ("lost", "lose"),
    ("meant", "mean"), ("met", "meet"), ("paid", "pay"), ("ran", "run"),
    ("rang", "ring"), ("rung", "ring"), ("rose", "rise"), ("risen", "rise"),
    ("sang", "sing"), ("sung", "sing"), ("sat", "sit"), ("slept", "sleep"),
    ("sold", "sell"), ("sent", "send"), ("shook", "shake"), ("shaken", "shake"),
    ("shot", "shoot"), ("showed", "show"), ("shown", "show"),
    ("spoke", "speak"), ("spoken", "speak"), ("spent", "spend"),
    ("stood", "stand"), ("stole", "steal"), ("stolen", "steal"),
    ("struck", "strike"), ("swam", "swim"), ("swum", "swim"),
    ("taught", "teach"), ("tore", "tear"), ("torn", "tear"),
    ("threw", "throw"), ("thrown", "throw"), ("understood", "understand"),
    ("woke", "wake"), ("woken", "wake"), ("wore", "wear"), ("worn", "wear"),
    ("won", "win"), ("wrote", "write"), ("written", "write"),
    ("broke", "break"), ("broken", "break"), ("blew", "blow"), ("blown", "blow"),
    ("bit", "bite"), ("bitten", "bite"), ("dealt", "deal"), ("dug", "dig"),
    ("fed", "feed"), ("forgave", "forgive"), ("forgiven", "forgive"),
    ("froze", "freeze"), ("frozen", "freeze"), ("hung", "hang"),
    ("laid", "lay"), ("lay", "lie"), ("lain", "lie"), ("lit", "light"),
    ("rode", "ride"), ("ridden", "ride"),
    ("sought", "seek"), ("sank", "sink"), ("sunk", "sink"),
    ("slid", "slide"), ("spun", "spin"), ("stuck", "stick"), ("stung", "sting"),
    ("swore", "swear"), ("sworn", "swear"), ("swept", "sweep"),
    ("swung", "swing"), ("wept", "weep"), ("wound", "wind"),
    ("dying", "die"), ("lying", "lie"), ("tying", "tie"),
    ("saw", "see"), ("seen", "see"),
];

/// Base verbs recognised by the suffix rules.
const BASE_VERBS: &[&str] = &[
    "accept", "add", "admire", "admit", "agree", "allow", "annoy", "answer",
    "appear", "appreciate", "argue", "arrive", "ask", "attack", "avoid",
    "bake", "ban", "bark", "beg", "believe", "belong", "bless", "blame",
    "boil", "bore", "borrow", "bother", "bounce", "brush", "burn", "call",
    "care", "carry", "cause", "celebrate", "change", "charge", "chase",
    "cheat", "check", "cheer", "chew", "clap", "clean", "clear", "click",
    "climb", "close", "collect", "comment", "compare", "complain",
    "complete", "confuse", "consider", "contain", "continue", "cook",
    "copy", "correct", "cough", "count", "cover", "crash", "create",
    "criticize", "cry", "dance", "dare", "decide", "delete", "deliver",
    "deny", "describe", "deserve", "destroy", "develop", "die", "disagree",
    "disappear", "discover", "dislike", "divide", "download", "drag",
    "dream", "drop", "earn", "edit", "embarrass", "enjoy", "enter",
    "entertain", "escape", "excite", "excuse", "exist", "expect",
    "explain", "fail", "fear", "file", "fill", "film", "finish", "fit",
    "fix", "follow", "force", "fry", "gather", "glue", "grab", "greet",
    "guess", "guide", "hammer", "hand", "handle", "happen", "harm", "hate",
    "head", "heat", "help", "hope", "hug", "hunt", "hurry", "ignore",
    "imagine", "impress", "improve", "include", "increase", "inspire",
    "interest", "introduce", "invent", "invite", "join", "joke", "jump",
    "kick", "kill", "kiss", "knock", "land", "last", "laugh", "learn",
    "lie", "like", "list", "listen", "live", "load", "lock", "look",
    "love", "manage", "mark", "marry", "matter", "mention", "mind", "miss",
    "mix", "move", "need", "notice", "offer", "open", "order", "own",
    "paint", "pass", "pause", "perform", "pick", "plan", "plant", "play",
    "please", "point", "post", "pour", "practice", "praise", "pray",
    "prefer", "prepare", "present", "pretend", "prevent", "print",
    "produce", "promise", "protect", "prove", "provide", "publish", "pull",
    "punch", "push", "question", "race", "rain", "reach", "react", "realise",
    "realize", "receive", "recognize", "recommend", "record", "reduce",
    "refuse", "regret", "relax", "release", "remember", "remind", "remove",
    "repeat", "replace", "reply", "report", "request", "rescue", "respect",
    "rest", "return", "review", "rob", "roll", "rub", "ruin", "rush",
    "save", "scare", "scream", "search", "seem", "serve", "settle",
    "share", "shock", "shop", "shout", "sign", "skip", "smell", "smile",
    "sound", "spell", "start", "stay", "step", "stop", "stream", "study",
    "subscribe", "succeed", "suffer", "suggest", "support", "suppose",
    "surprise", "talk", "taste", "test", "thank", "touch", "train", "travel",
    "treat", "trust", "try", "turn", "type", "upload", "use", "vote",
    "wait", "walk", "want", "warn", "wash", "waste", "watch", "wave",
    "welcome", "wish", "wonder", "work", "worry", "yell",
];

static EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR.iter().copied().collect());

// Exception targets are base forms too, which keeps lemmatization stable
// under re-application.
static BASES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    BASE_VERBS
        .iter()
        .copied()
        .chain(IRREGULAR.iter().map(|(_, base)| *base))
        .collect()
});

/// Lemmatize a lowercase token as a verb. Unknown words are returned unchanged.
pub fn lemmatize_verb(token: &str) -> String {
    if BASES.contains(token) {
        return token.to_string();
    }
    if let Some(base) = EXCEPTIONS.get(token) {
        return (*base).to_string();
    }

    let mut best: Option<String> = None;
    for (suffix, replacement) in VERB_RULES {
        let Some(stem) = token.strip_suffix(suffix) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }
        for candidate in candidates(stem, replacement, suffix) {
            if BASES.contains(candidate.as_str()) {
                // Shortest match wins, first seen on ties.
                let shorter = best
                    .as_ref()
                    .map_or(true, |current| candidate.len() < current.len());
                if shorter {
                    best = Some(candidate);
                }
            }
        }
    }

    best.unwrap_or_else(|| token.to_string())
}

/// Candidate base forms for a stem, including the undoubled consonant form
/// for `-ed` / `-ing` ("stopped" -> "stop").
fn candidates(stem: &str, replacement: &str, suffix: &str) -> Vec<String> {
    let mut out = vec![format!("{stem}{replacement}")];
    if replacement.is_empty() && (suffix == "ed" || suffix == "ing") {
        let mut tail = stem.chars().rev();
        if let (Some(last), Some(before)) = (tail.next(), tail.next()) {
            if last == before && last.is_ascii_alphabetic() && !is_vowel(last) {
                out.push(stem[..stem.len() - last.len_utf8()].to_string());
            }
        }
    }
    out
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_inflections() {
        assert_eq!(lemmatize_verb("watching"), "watch");
        assert_eq!(lemmatize_verb("loves"), "love");
        assert_eq!(lemmatize_verb("tries"), "try");
        assert_eq!(lemmatize_verb("hoped"), "hope");
        assert_eq!(lemmatize_verb("stopped"), "stop");
        assert_eq!(lemmatize_verb("planning"), "plan");
        assert_eq!(lemmatize_verb("making"), "make");
    }

    #[test]
    fn test_irregular_forms() {
        assert_eq!(lemmatize_verb("went"), "go");
        assert_eq!(lemmatize_verb("was"), "be");
        assert_eq!(lemmatize_verb("thought"), "think");
    }

    #[test]
    fn test_unknown_words_untouched() {
        assert_eq!(lemmatize_verb("video"), "video");
        assert_eq!(lemmatize_verb("bless"), "bless");
        assert_eq!(lemmatize_verb("awesome"), "awesome");
        assert_eq!(lemmatize_verb("news"), "news");
    }

    #[test]
    fn test_doubled_multibyte_stem_is_not_split() {
        // 丸 ends in bytes B8 B8 and त in A4 A4
        assert_eq!(lemmatize_verb("丸ing"), "丸ing");
        assert_eq!(lemmatize_verb("तed"), "तed");
        assert_eq!(lemmatize_verb("ççing"), "ççing");
    }

    #[test]
    fn test_base_forms_are_fixed_points() {
        for token in ["go", "be", "see", "watch", "love", "use", "lie"] {
            assert_eq!(lemmatize_verb(&lemmatize_verb(token)), lemmatize_verb(token));
        }
    }
}
