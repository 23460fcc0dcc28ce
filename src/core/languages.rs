//! Supported language catalog
//!
//! The catalog is built once per process and never mutated afterwards.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Source language sentinel asking the service to detect the language
pub const AUTO: &str = "auto";

/// (code, name) pairs accepted by the gtx endpoint, in display order
const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("sq", "Albanian"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("hy", "Armenian"),
    ("az", "Azerbaijani"),
    ("eu", "Basque"),
    ("be", "Belarusian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("ceb", "Cebuano"),
    ("ny", "Chichewa"),
    ("zh-cn", "Chinese (Simplified)"),
    ("zh-tw", "Chinese (Traditional)"),
    ("co", "Corsican"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("et", "Estonian"),
    ("tl", "Filipino"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fy", "Frisian"),
    ("gl", "Galician"),
    ("ka", "Georgian"),
    ("de", "German"),
    ("el", "Greek"),
    ("gu", "Gujarati"),
    ("ht", "Haitian Creole"),
    ("ha", "Hausa"),
    ("haw", "Hawaiian"),
    ("iw", "Hebrew"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hmn", "Hmong"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("ig", "Igbo"),
    ("id", "Indonesian"),
    ("ga", "Irish"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("kn", "Kannada"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("ko", "Korean"),
    ("ku", "Kurdish (Kurmanji)"),
    ("ky", "Kyrgyz"),
    ("lo", "Lao"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("lb", "Luxembourgish"),
    ("mk", "Macedonian"),
    ("mg", "Malagasy"),
    ("ms", "Malay"),
    ("ml", "Malayalam"),
    ("mt", "Maltese"),
    ("mi", "Maori"),
    ("mr", "Marathi"),
    ("mn", "Mongolian"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("no", "Norwegian"),
    ("or", "Odia"),
    ("ps", "Pashto"),
    ("fa", "Persian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pa", "Punjabi"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sm", "Samoan"),
    ("gd", "Scots Gaelic"),
    ("sr", "Serbian"),
    ("st", "Sesotho"),
    ("sn", "Shona"),
    ("sd", "Sindhi"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("so", "Somali"),
    ("es", "Spanish"),
    ("su", "Sundanese"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("tg", "Tajik"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("ug", "Uyghur"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
    ("xh", "Xhosa"),
    ("yi", "Yiddish"),
    ("yo", "Yoruba"),
    ("zu", "Zulu"),
];

static CATALOG: Lazy<LanguageCatalog> = Lazy::new(|| {
    let catalog = LanguageCatalog::new(LANGUAGES);
    debug!("Loaded language catalog with {} entries", catalog.len());
    catalog
});

/// Read-only mapping from language code to display name
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: Vec<(&'static str, &'static str)>,
    by_code: HashMap<&'static str, &'static str>,
}

impl LanguageCatalog {
    fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.to_vec(),
            by_code: entries.iter().copied().collect(),
        }
    }

    /// Process-wide catalog, loaded on first access
    pub fn global() -> &'static LanguageCatalog {
        &CATALOG
    }

    /// Display name for a code
    pub fn get(&self, code: &str) -> Option<&'static str> {
        self.by_code.get(code.to_lowercase().as_str()).copied()
    }

    /// Check whether a code is a catalog key
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Resolve a code or a language name to its catalog code
    pub fn resolve(&self, code_or_name: &str) -> Option<&'static str> {
        let wanted = code_or_name.trim().to_lowercase();

        if let Some((&code, _)) = self.by_code.get_key_value(wanted.as_str()) {
            return Some(code);
        }

        self.entries
            .iter()
            .find(|(_, name)| name.to_lowercase() == wanted)
            .map(|(code, _)| *code)
    }

    /// Resolve a source language, which may also be the auto-detect sentinel
    pub fn resolve_source(&self, code_or_name: &str) -> Result<&'static str> {
        if code_or_name.trim().eq_ignore_ascii_case(AUTO) {
            return Ok(AUTO);
        }
        self.resolve(code_or_name)
            .ok_or_else(|| TranslationError::UnsupportedLanguage {
                code: code_or_name.to_string(),
            })
    }

    /// Resolve a destination language
    pub fn resolve_dest(&self, code_or_name: &str) -> Result<&'static str> {
        self.resolve(code_or_name)
            .ok_or_else(|| TranslationError::UnsupportedLanguage {
                code: code_or_name.to_string(),
            })
    }

    /// Iterate over (code, name) pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
