/// Languages accepted by the Translate TTS endpoint, as `(code, name)` pairs.
const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fr-CA", "French (Canada)"),
    ("gu", "Gujarati"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("zh", "Chinese (Mandarin)"),
];

#[derive(Debug, Clone)]
struct Language {
    code: &'static str,
    name: &'static str,
    lowered: String,
}

/// Case-insensitive lookup between spoken-language names and TTS language codes.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    entries: Vec<Language>,
}

impl LanguageTable {
    pub fn builtin() -> Self {
        Self::from_pairs(LANGUAGES)
    }

    fn from_pairs(pairs: &[(&'static str, &'static str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|&(code, name)| Language {
                code,
                name,
                lowered: name.to_lowercase(),
            })
            .collect();
        Self { entries }
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.code_for(name).is_some()
    }

    /// First code, in table order, whose name matches. Ambiguous names resolve to the earliest entry.
    pub fn code_for(&self, name: &str) -> Option<&'static str> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|lang| lang.lowered == wanted)
            .map(|lang| lang.code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|lang| (lang.code, lang.name))
    }
}
