//! Language registry: the static catalog of selectable target languages.
//!
//! The table is built once on first access through `OnceLock` and stays
//! immutable for the life of the process.

use std::sync::OnceLock;

/// One selectable target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Language code as stored in settings (e.g., "pl", "zh-tw", "yue")
    pub code: &'static str,

    /// English display name (e.g., "Polish")
    pub name: &'static str,

    /// Name of the language in the language itself (e.g., "Polski")
    pub native_name: &'static str,
}

/// Global language catalog singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageEntry>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

/// Number of entries the catalog keeps from the source table.
pub const CATALOG_SIZE: usize = 100;

impl LanguageRegistry {
    /// Get the global language registry instance.
    ///
    /// This method initializes the registry on first call and returns a reference
    /// to the singleton instance on subsequent calls.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: unique_languages(default_languages()),
        })
    }

    /// Get a language entry by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageEntry)` if the language exists
    /// * `None` if the code is not in the catalog
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Check if a language code is in the catalog.
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Get all languages in catalog order.
    pub fn list_all(&self) -> Vec<&LanguageEntry> {
        self.languages.iter().collect()
    }

    /// Case-insensitive search over display name, native name, and code.
    ///
    /// The term is trimmed first; an empty term matches every entry.
    pub fn search(&self, term: &str) -> Vec<&LanguageEntry> {
        let term = term.trim().to_lowercase();

        self.languages
            .iter()
            .filter(|lang| {
                lang.name.to_lowercase().contains(&term)
                    || lang.native_name.to_lowercase().contains(&term)
                    || lang.code.to_lowercase().contains(&term)
            })
            .collect()
    }
}

/// Drop repeated codes (first occurrence wins) and cap the table size.
fn unique_languages(languages: Vec<LanguageEntry>) -> Vec<LanguageEntry> {
    let mut unique: Vec<LanguageEntry> = Vec::with_capacity(CATALOG_SIZE);

    for lang in languages {
        if unique.len() == CATALOG_SIZE {
            break;
        }
        if !unique.iter().any(|existing| existing.code == lang.code) {
            unique.push(lang);
        }
    }

    unique
}

const fn entry(code: &'static str, name: &'static str, native_name: &'static str) -> LanguageEntry {
    LanguageEntry {
        code,
        name,
        native_name,
    }
}

/// Source table, ordered by number of speakers.
fn default_languages() -> Vec<LanguageEntry> {
    vec![
        entry("en", "English", "English"),
        entry("zh", "Chinese (Simplified)", "中文 (简体)"),
        entry("zh-tw", "Chinese (Traditional)", "中文 (繁體)"),
        entry("es", "Spanish", "Español"),
        entry("hi", "Hindi", "हिन्दी"),
        entry("ar", "Arabic", "العربية"),
        entry("pt", "Portuguese", "Português"),
        entry("bn", "Bengali", "বাংলা"),
        entry("ru", "Russian", "Русский"),
        entry("ja", "Japanese", "日本語"),
        entry("pa", "Punjabi", "ਪੰਜਾਬੀ"),
        entry("de", "German", "Deutsch"),
        entry("jv", "Javanese", "Basa Jawa"),
        entry("wu", "Wu Chinese", "吴语"),
        entry("ms", "Malay", "Bahasa Melayu"),
        entry("te", "Telugu", "తెలుగు"),
        entry("vi", "Vietnamese", "Tiếng Việt"),
        entry("ko", "Korean", "한국어"),
        entry("fr", "French", "Français"),
        entry("mr", "Marathi", "मराठी"),
        entry("ta", "Tamil", "தமிழ்"),
        entry("ur", "Urdu", "اردو"),
        entry("tr", "Turkish", "Türkçe"),
        entry("it", "Italian", "Italiano"),
        entry("yue", "Cantonese", "粵語"),
        entry("th", "Thai", "ไทย"),
        entry("gu", "Gujarati", "ગુજરાતી"),
        entry("jin", "Jin Chinese", "晋语"),
        entry("nan", "Min Nan Chinese", "閩南語"),
        entry("fa", "Persian", "فارسی"),
        entry("pl", "Polish", "Polski"),
        entry("pbu", "Pashto", "پښتو"),
        entry("kn", "Kannada", "ಕನ್ನಡ"),
        entry("xh", "Xhosa", "isiXhosa"),
        entry("ml", "Malayalam", "മലയാളം"),
        entry("or", "Odia", "ଓଡ଼ିଆ"),
        entry("my", "Burmese", "မြန်မာ"),
        entry("uk", "Ukrainian", "Українська"),
        entry("su", "Sundanese", "Basa Sunda"),
        entry("uz", "Uzbek", "Oʻzbekcha"),
        entry("sd", "Sindhi", "سنڌي"),
        entry("ro", "Romanian", "Română"),
        entry("tl", "Tagalog", "Tagalog"),
        entry("nl", "Dutch", "Nederlands"),
        entry("sa", "Sanskrit", "संस्कृतम्"),
        entry("he", "Hebrew", "עברית"),
        entry("cs", "Czech", "Čeština"),
        entry("el", "Greek", "Ελληνικά"),
        entry("be", "Belarusian", "Беларуская"),
        entry("hu", "Hungarian", "Magyar"),
        entry("qu", "Quechua", "Runa Simi"),
        entry("sv", "Swedish", "Svenska"),
        entry("si", "Sinhala", "සිංහල"),
        entry("km", "Khmer", "ភាសាខ្មែរ"),
        entry("da", "Danish", "Dansk"),
        entry("fi", "Finnish", "Suomi"),
        entry("sk", "Slovak", "Slovenčina"),
        entry("no", "Norwegian", "Norsk"),
        entry("lv", "Latvian", "Latviešu"),
        entry("sl", "Slovenian", "Slovenščina"),
        entry("et", "Estonian", "Eesti"),
        entry("lt", "Lithuanian", "Lietuvių"),
        entry("bg", "Bulgarian", "Български"),
        entry("hr", "Croatian", "Hrvatski"),
        entry("eu", "Basque", "Euskera"),
        entry("is", "Icelandic", "Íslenska"),
        entry("ga", "Irish", "Gaeilge"),
        entry("mt", "Maltese", "Malti"),
        entry("af", "Afrikaans", "Afrikaans"),
        entry("sq", "Albanian", "Shqip"),
        entry("az", "Azerbaijani", "Azərbaycan"),
        entry("hy", "Armenian", "Հայերեն"),
        entry("ka", "Georgian", "ქართული"),
        entry("mk", "Macedonian", "Македонски"),
        entry("sr", "Serbian", "Српски"),
        entry("bs", "Bosnian", "Bosanski"),
        entry("me", "Montenegrin", "Crnogorski"),
        entry("cy", "Welsh", "Cymraeg"),
        entry("gd", "Scottish Gaelic", "Gàidhlig"),
        entry("br", "Breton", "Brezhoneg"),
        entry("co", "Corsican", "Corsu"),
        entry("fy", "Frisian", "Frysk"),
        entry("lb", "Luxembourgish", "Lëtzebuergesch"),
        entry("rm", "Romansh", "Rumantsch"),
        entry("fo", "Faroese", "Føroyskt"),
        entry("kl", "Greenlandic", "Kalaallisut"),
        entry("mi", "Maori", "Te Reo Māori"),
        entry("sm", "Samoan", "Gagana Samoa"),
        entry("to", "Tongan", "Lea Faka-Tonga"),
        entry("fj", "Fijian", "Na Vosa Vakaviti"),
        entry("haw", "Hawaiian", "ʻŌlelo Hawaiʻi"),
        entry("mg", "Malagasy", "Malagasy"),
        entry("ny", "Chichewa", "Chichewa"),
        entry("sn", "Shona", "ChiShona"),
        entry("zu", "Zulu", "isiZulu"),
        entry("st", "Sesotho", "Sesotho"),
        entry("tn", "Setswana", "Setswana"),
        entry("ss", "Swati", "siSwati"),
        entry("ve", "Venda", "Tshivenḓa"),
        entry("ts", "Tsonga", "Xitsonga"),
        entry("nr", "Ndebele", "isiNdebele"),
        entry("sw", "Swahili", "Kiswahili"),
        entry("rw", "Kinyarwanda", "Ikinyarwanda"),
        entry("rn", "Kirundi", "Ikirundi"),
        entry("lg", "Luganda", "Luganda"),
        entry("ak", "Akan", "Akan"),
        entry("tw", "Twi", "Twi"),
        entry("ff", "Fulfulde", "Fulfulde"),
        entry("ha", "Hausa", "Hausa"),
        entry("ig", "Igbo", "Igbo"),
        entry("yo", "Yoruba", "Yorùbá"),
        entry("am", "Amharic", "አማርኛ"),
        entry("ti", "Tigrinya", "ትግርኛ"),
        entry("om", "Oromo", "Afaan Oromoo"),
        entry("so", "Somali", "Soomaali"),
    ]
}
