//! Word lists behind the tagger and lemmatizer. Base forms only, except the
//! exception tables which map an inflected form to its base.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const ADJECTIVE_WORDS: &[&str] = &[
    "bad", "big", "bitter", "black", "bland", "bold", "bright", "brown", "calm", "cheap",
    "clean", "clear", "cold", "common", "complex", "cool", "creamy", "crisp", "curly",
    "damp", "dark", "deep", "delicate", "dense", "dirty", "dry", "dull", "dusty", "early",
    "earthy", "easy", "empty", "faint", "fair", "fat", "fine", "flat", "floral", "fresh",
    "fruity", "full", "funky", "gentle", "golden", "good", "grand", "grassy", "great",
    "green", "grey", "gray", "happy", "hard", "harsh", "hazy", "healthy", "heavy", "high",
    "hot", "huge", "intense", "juicy", "kind", "large", "late", "lean", "light", "likely",
    "little", "lively", "long", "loose", "loud", "lovely", "low", "lush", "malty", "mellow",
    "mild", "musty", "narrow", "neat", "new", "nice", "nutty", "oaky", "odd", "oily", "old",
    "pale", "peaty", "plain", "pleasant", "poor", "pretty", "proper", "pure", "quick",
    "quiet", "rare", "raw", "red", "rich", "ripe", "robust", "rough", "round", "sad",
    "safe", "salty", "savory", "sharp", "short", "silky", "simple", "slight", "slow",
    "small", "smoky", "smooth", "soft", "solid", "sour", "spicy", "steady", "sticky",
    "strange", "strong", "subtle", "sugary", "sweet", "tangy", "tart", "tasty", "thick",
    "thin", "tight", "tiny", "true", "ugly", "vivid", "warm", "waxy", "weak", "weird",
    "wet", "white", "wide", "wild", "woody", "yellow", "young", "zesty",
];

const VERB_WORDS: &[&str] = &[
    "add", "admit", "age", "allow", "amaze", "appear", "arrive", "ask", "bake", "balance",
    "become", "begin", "believe", "bite", "blend", "bore", "bottle", "breathe", "bring",
    "build", "burn", "buy", "call", "caramelize", "carry", "catch", "change", "char",
    "choose", "close", "coat", "come", "compare", "consider", "continue", "cover",
    "create", "cut", "dance", "decide", "describe", "detect", "develop", "die", "dip",
    "disappoint", "distill", "dominate", "drink", "drop", "emerge", "enjoy", "evolve",
    "excite", "expect", "explode", "fade", "fall", "feel", "fill", "find", "finish",
    "follow", "forget", "get", "give", "go", "grab", "grow", "happen", "hate", "help",
    "hide", "hint", "hit", "hold", "hope", "impress", "improve", "include", "interest",
    "keep", "know", "last", "lead", "learn", "leave", "let", "like", "linger", "live",
    "look", "lose", "love", "make", "mature", "mean", "meet", "mention", "mix", "move",
    "need", "nose", "note", "notice", "occur", "offer", "open", "overpower", "pair",
    "pass", "pay", "pick", "plan", "play", "please", "pop", "pour", "prefer", "pull",
    "punch", "put", "raise", "rate", "reach", "read", "recommend", "refer", "regret",
    "remain", "remember", "remind", "require", "rest", "reveal", "review", "rinse",
    "roast", "rub", "run", "say", "score", "see", "seem", "sell", "send", "serve", "set",
    "settle", "share", "shine", "show", "sip", "sit", "smell", "smoke", "soften", "speak",
    "spend", "spice", "spin", "stand", "start", "stay", "stick", "stir", "stop", "suggest",
    "surprise", "sweeten", "swirl", "take", "taste", "tease", "tell", "think", "tingle",
    "tire", "toast", "try", "turn", "understand", "use", "wait", "want", "warm", "wash",
    "watch", "win", "wish", "work", "write",
];

/// Irregular verb forms (past and participle) to their base.
const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("ate", "eat"), ("eaten", "eat"), ("became", "become"), ("began", "begin"),
    ("begun", "begin"), ("bit", "bite"), ("bitten", "bite"), ("bought", "buy"),
    ("brought", "bring"), ("built", "build"), ("burnt", "burn"), ("came", "come"),
    ("caught", "catch"), ("chose", "choose"), ("chosen", "choose"), ("drank", "drink"),
    ("drunk", "drink"), ("fell", "fall"), ("fallen", "fall"), ("felt", "feel"),
    ("found", "find"), ("forgot", "forget"), ("forgotten", "forget"), ("gave", "give"),
    ("given", "give"), ("goes", "go"), ("gone", "go"), ("got", "get"), ("gotten", "get"),
    ("grew", "grow"), ("grown", "grow"), ("held", "hold"), ("hid", "hide"),
    ("hidden", "hide"), ("kept", "keep"), ("knew", "know"), ("known", "know"),
    ("led", "lead"), ("left", "leave"), ("lost", "lose"), ("made", "make"),
    ("meant", "mean"), ("met", "meet"), ("paid", "pay"), ("ran", "run"), ("said", "say"),
    ("sat", "sit"), ("saw", "see"), ("seen", "see"), ("sent", "send"), ("shone", "shine"),
    ("sold", "sell"), ("smelt", "smell"), ("spent", "spend"), ("spoke", "speak"),
    ("spoken", "speak"), ("stood", "stand"), ("stuck", "stick"), ("taken", "take"),
    ("thought", "think"), ("told", "tell"), ("took", "take"), ("understood", "understand"),
    ("went", "go"), ("won", "win"), ("wrote", "write"), ("written", "write"),
];

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("calves", "calf"), ("children", "child"), ("feet", "foot"), ("geese", "goose"),
    ("halves", "half"), ("knives", "knife"), ("leaves", "leaf"), ("lives", "life"),
    ("loaves", "loaf"), ("men", "man"), ("mice", "mouse"), ("shelves", "shelf"),
    ("teeth", "tooth"), ("thieves", "thief"), ("wives", "wife"), ("wolves", "wolf"),
    ("women", "woman"),
    // same form in singular and plural
    ("bitters", "bitters"), ("lees", "lees"), ("lens", "lens"), ("means", "means"),
    ("molasses", "molasses"), ("news", "news"), ("series", "series"), ("species", "species"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("farther", "far"), ("farthest", "far"), ("elder", "old"), ("eldest", "old"),
];

const ADVERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("best", "well"), ("better", "well"), ("farther", "far"), ("farthest", "far"),
    ("harder", "hard"), ("hardest", "hard"),
];

/// Closed-class words that survive stopword removal, with their tags.
pub const CLOSED_CLASS: &[(&str, &str)] = &[
    ("across", "IN"), ("along", "IN"), ("although", "IN"), ("around", "IN"),
    ("behind", "IN"), ("beside", "IN"), ("beyond", "IN"), ("despite", "IN"),
    ("like", "IN"), ("near", "IN"), ("since", "IN"), ("though", "IN"), ("toward", "IN"),
    ("towards", "IN"), ("unless", "IN"), ("upon", "IN"), ("whether", "IN"),
    ("within", "IN"), ("without", "IN"),
    ("either", "CC"), ("neither", "CC"), ("yet", "CC"),
    ("another", "DT"), ("every", "DT"),
    ("could", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"), ("shall", "MD"),
    ("would", "MD"),
    ("almost", "RB"), ("already", "RB"), ("also", "RB"), ("always", "RB"), ("away", "RB"),
    ("back", "RB"), ("enough", "RB"), ("even", "RB"), ("ever", "RB"), ("however", "RB"),
    ("maybe", "RB"), ("never", "RB"), ("often", "RB"), ("perhaps", "RB"), ("quite", "RB"),
    ("rather", "RB"), ("still", "RB"), ("well", "RB"),
    ("oh", "UH"), ("ok", "UH"), ("okay", "UH"), ("wow", "UH"), ("yes", "UH"),
    ("many", "JJ"), ("much", "JJ"), ("several", "JJ"),
    ("one", "CD"), ("two", "CD"), ("three", "CD"), ("four", "CD"), ("five", "CD"),
    ("six", "CD"), ("seven", "CD"), ("eight", "CD"), ("nine", "CD"), ("ten", "CD"),
    ("twelve", "CD"), ("eighteen", "CD"), ("twenty", "CD"), ("hundred", "CD"),
    ("anything", "NN"), ("everything", "NN"), ("nothing", "NN"), ("something", "NN"),
];

/// `-ing` words that are nouns, not gerunds.
pub const ING_NOUNS: &[&str] = &[
    "ceiling", "dumpling", "evening", "herring", "icing", "king", "lightning", "morning",
    "pudding", "ring", "sibling", "spring", "string", "thing", "wedding", "wing",
];

/// `-ed` words that are adjectives, not participles.
pub const ED_ADJECTIVES: &[&str] = &[
    "beloved", "crooked", "jagged", "kindred", "naked", "ragged", "rugged", "sacred",
    "wicked", "wretched",
];

/// `-ly` words that are adjectives or nouns, not adverbs.
pub const LY_NON_ADVERBS: &[(&str, &str)] = &[
    ("ally", "NN"), ("belly", "NN"), ("family", "NN"), ("jelly", "NN"), ("lily", "NN"),
    ("rally", "NN"), ("reply", "NN"), ("supply", "NN"), ("holly", "NN"),
    ("curly", "JJ"), ("early", "JJ"), ("friendly", "JJ"), ("holy", "JJ"), ("likely", "JJ"),
    ("lively", "JJ"), ("lonely", "JJ"), ("lovely", "JJ"), ("oily", "JJ"), ("silly", "JJ"),
    ("smelly", "JJ"), ("ugly", "JJ"),
];

pub static ADJECTIVES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ADJECTIVE_WORDS.iter().copied().collect());
pub static VERBS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VERB_WORDS.iter().copied().collect());

pub static VERB_EXC: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| VERB_EXCEPTIONS.iter().copied().collect());
pub static NOUN_EXC: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NOUN_EXCEPTIONS.iter().copied().collect());
pub static ADJ_EXC: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ADJECTIVE_EXCEPTIONS.iter().copied().collect());
pub static ADV_EXC: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ADVERB_EXCEPTIONS.iter().copied().collect());
