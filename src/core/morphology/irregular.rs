//! Irregular word tables.
//!
//! Closed tables: irregular noun plurals and irregular verbs with their full
//! form sets. A reverse index maps every verb form back to its base.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Irregular noun plurals.
pub const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("person", "people"),
    ("child", "children"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
];

/// Nouns ending in `f` that pluralize with a plain `s`.
pub const F_PLURAL_EXCEPTIONS: &[&str] = &["roof", "belief", "chief", "proof"];

/// Nouns whose verb-like `-ed`/`-ing` forms are spurious and suppressed.
pub const VERB_SUPPRESSED_NOUNS: &[&str] = &[
    "horn", "mare", "steed", "horse", "doe", "deer", "father", "Father", "cross", "well",
];

/// Irregular verb bases with their complete form sets.
pub const IRREGULAR_VERBS: &[(&str, &[&str])] = &[
    ("be", &["be", "am", "is", "are", "was", "were", "been", "being"]),
    ("bear", &["bear", "bears", "bore", "borne", "born", "bearing"]),
    ("beat", &["beat", "beats", "beaten", "beating"]),
    ("become", &["become", "becomes", "became", "becoming"]),
    ("begin", &["begin", "begins", "began", "begun", "beginning"]),
    ("bind", &["bind", "binds", "bound", "binding"]),
    ("blow", &["blow", "blows", "blew", "blown", "blowing"]),
    ("break", &["break", "breaks", "broke", "broken", "breaking"]),
    ("bring", &["bring", "brings", "brought", "bringing"]),
    ("build", &["build", "builds", "built", "building"]),
    ("buy", &["buy", "buys", "bought", "buying"]),
    ("catch", &["catch", "catches", "caught", "catching"]),
    ("choose", &["choose", "chooses", "chose", "chosen", "choosing"]),
    ("come", &["come", "comes", "came", "coming"]),
    ("deal", &["deal", "deals", "dealt", "dealing"]),
    ("do", &["do", "does", "did", "done", "doing"]),
    ("draw", &["draw", "draws", "drew", "drawn", "drawing"]),
    ("drink", &["drink", "drinks", "drank", "drunk", "drinking"]),
    ("drive", &["drive", "drives", "drove", "driven", "driving"]),
    ("eat", &["eat", "eats", "ate", "eaten", "eating"]),
    ("fall", &["fall", "falls", "fell", "fallen", "falling"]),
    ("feed", &["feed", "feeds", "fed", "feeding"]),
    ("fight", &["fight", "fights", "fought", "fighting"]),
    ("find", &["find", "finds", "found", "finding"]),
    ("flee", &["flee", "flees", "fled", "fleeing"]),
    ("fly", &["fly", "flies", "flew", "flown", "flying"]),
    ("forget", &["forget", "forgets", "forgot", "forgotten", "forgetting"]),
    ("forgive", &["forgive", "forgives", "forgave", "forgiven", "forgiving"]),
    ("forsake", &["forsake", "forsakes", "forsook", "forsaken", "forsaking"]),
    ("give", &["give", "gives", "gave", "given", "giving"]),
    ("go", &["go", "goes", "went", "gone", "going"]),
    ("grow", &["grow", "grows", "grew", "grown", "growing"]),
    ("hang", &["hang", "hangs", "hung", "hanged", "hanging"]),
    ("have", &["have", "has", "had", "having"]),
    ("hear", &["hear", "hears", "heard", "hearing"]),
    ("hide", &["hide", "hides", "hid", "hidden", "hiding"]),
    ("hold", &["hold", "holds", "held", "holding"]),
    ("keep", &["keep", "keeps", "kept", "keeping"]),
    ("know", &["know", "knows", "knew", "known", "knowing"]),
    ("lay", &["lay", "lays", "laid", "laying"]),
    ("lead", &["lead", "leads", "led", "leading"]),
    ("leave", &["leave", "leaves", "left", "leaving"]),
    ("lie", &["lie", "lies", "lay", "lain", "lying"]),
    ("lose", &["lose", "loses", "lost", "losing"]),
    ("make", &["make", "makes", "made", "making"]),
    ("mean", &["mean", "means", "meant", "meaning"]),
    ("meet", &["meet", "meets", "met", "meeting"]),
    ("pay", &["pay", "pays", "paid", "paying"]),
    ("rise", &["rise", "rises", "rose", "risen", "rising"]),
    ("run", &["run", "runs", "ran", "running"]),
    ("say", &["say", "says", "said", "saying"]),
    ("see", &["see", "sees", "saw", "seen", "seeing"]),
    ("seek", &["seek", "seeks", "sought", "seeking"]),
    ("sell", &["sell", "sells", "sold", "selling"]),
    ("send", &["send", "sends", "sent", "sending"]),
    ("set", &["set", "sets", "setting"]),
    ("shake", &["shake", "shakes", "shook", "shaken", "shaking"]),
    ("sing", &["sing", "sings", "sang", "sung", "singing"]),
    ("sit", &["sit", "sits", "sat", "sitting"]),
    ("slay", &["slay", "slays", "slew", "slain", "slaying"]),
    ("speak", &["speak", "speaks", "spoke", "spoken", "speaking"]),
    ("stand", &["stand", "stands", "stood", "standing"]),
    ("steal", &["steal", "steals", "stole", "stolen", "stealing"]),
    ("strike", &["strike", "strikes", "struck", "stricken", "striking"]),
    ("swear", &["swear", "swears", "swore", "sworn", "swearing"]),
    ("take", &["take", "takes", "took", "taken", "taking"]),
    ("teach", &["teach", "teaches", "taught", "teaching"]),
    ("tear", &["tear", "tears", "tore", "torn", "tearing"]),
    ("tell", &["tell", "tells", "told", "telling"]),
    ("think", &["think", "thinks", "thought", "thinking"]),
    ("throw", &["throw", "throws", "threw", "thrown", "throwing"]),
    ("understand", &["understand", "understands", "understood", "understanding"]),
    ("wear", &["wear", "wears", "wore", "worn", "wearing"]),
    ("weep", &["weep", "weeps", "wept", "weeping"]),
    ("win", &["win", "wins", "won", "winning"]),
    ("write", &["write", "writes", "wrote", "written", "writing"]),
];

/// Reverse index: any lowercase verb form -> its base.
static VERB_FORM_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (base, forms) in IRREGULAR_VERBS {
        for form in *forms {
            // first registration wins ("lay" stays the base of "lay", not a
            // past form of "lie")
            index.entry(*form).or_insert(*base);
        }
    }
    index
});

/// Irregular plural of a lowercase noun, if the table has one.
pub fn irregular_plural(word: &str) -> Option<&'static str> {
    IRREGULAR_PLURALS
        .iter()
        .find(|(singular, _)| *singular == word)
        .map(|(_, plural)| *plural)
}

/// Base of an irregular verb form (the form itself may be the base).
pub fn verb_base(form: &str) -> Option<&'static str> {
    VERB_FORM_INDEX.get(form).copied()
}

/// All forms of an irregular verb base.
pub fn verb_forms(base: &str) -> Option<&'static [&'static str]> {
    IRREGULAR_VERBS
        .iter()
        .find(|(b, _)| *b == base)
        .map(|(_, forms)| *forms)
}
