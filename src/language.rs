use serde::Serialize;

/// Display metadata for a practice language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub label: &'static str,
    pub country_code: &'static str,
}

pub const LANGUAGES: [LanguageInfo; 10] = [
    LanguageInfo {
        code: "en",
        label: "English",
        country_code: "gb",
    },
    LanguageInfo {
        code: "es",
        label: "Spanish",
        country_code: "es",
    },
    LanguageInfo {
        code: "fr",
        label: "French",
        country_code: "fr",
    },
    LanguageInfo {
        code: "de",
        label: "German",
        country_code: "de",
    },
    LanguageInfo {
        code: "it",
        label: "Italian",
        country_code: "it",
    },
    LanguageInfo {
        code: "pt",
        label: "Portuguese",
        country_code: "pt",
    },
    LanguageInfo {
        code: "ja",
        label: "Japanese",
        country_code: "jp",
    },
    LanguageInfo {
        code: "zh",
        label: "Chinese",
        country_code: "cn",
    },
    LanguageInfo {
        code: "ko",
        label: "Korean",
        country_code: "kr",
    },
    LanguageInfo {
        code: "ru",
        label: "Russian",
        country_code: "ru",
    },
];

pub fn find_language(code: &str) -> Option<&'static LanguageInfo> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// Human readable label for a language code, falling back to the raw code
pub fn language_label(code: &str) -> &str {
    find_language(code).map_or(code, |lang| lang.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_language_codes_are_unique() {
        let codes: HashSet<_> = LANGUAGES.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn test_find_language() {
        let spanish = find_language("es").unwrap();
        assert_eq!(spanish.label, "Spanish");
        assert_eq!(spanish.country_code, "es");
        assert!(find_language("xx").is_none());
    }

    #[test]
    fn test_language_label_falls_back_to_code() {
        assert_eq!(language_label("fr"), "French");
        assert_eq!(language_label("tlh"), "tlh");
    }
}
