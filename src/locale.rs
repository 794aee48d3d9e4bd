// astro-report-service/src/locale.rs
//
// Static localization tables: canonical term -> display string for the
// 8 supported report languages, plus the per-request label dictionary.

use serde::Deserialize;

/// Canonical planet order used everywhere in this service.
pub const PLANETS_EN: [&str; 9] = [
    "Sun", "Moon", "Mars", "Mercury", "Jupiter", "Venus", "Saturn", "Rahu", "Ketu",
];

/// Two-letter abbreviations drawn inside chart houses.
pub const PLANET_ABBR: [&str; 9] = ["Su", "Mo", "Ma", "Me", "Ju", "Ve", "Sa", "Ra", "Ke"];

/// Lowercase keys used for per-planet upstream fan-out.
pub const PLANET_KEYS: [&str; 9] = [
    "sun", "moon", "mars", "mercury", "jupiter", "venus", "saturn", "rahu", "ketu",
];

/// Ashtakvarga scores exist only for the seven classical planets.
pub const ASHTAKVARGA_PLANETS: [&str; 7] = [
    "sun", "moon", "mars", "mercury", "jupiter", "venus", "saturn",
];

const PLANETS_HI: [&str; 9] = [
    "सूर्य", "चंद्र", "मंगल", "बुध", "गुरु", "शुक्र", "शनि", "राहु", "केतु",
];
const PLANETS_MR: [&str; 9] = [
    "सूर्य", "चंद्र", "मंगळ", "बुध", "गुरू", "शुक्र", "शनी", "राहू", "केतू",
];
const PLANETS_GU: [&str; 9] = [
    "સૂર્ય", "ચંદ્ર", "મંગળ", "બુધ", "ગુરુ", "શુક્ર", "શનિ", "રાહુ", "કેતુ",
];
const PLANETS_TA: [&str; 9] = [
    "சூரியன்", "சந்திரன்", "செவ்வாய்", "புதன்", "குரு", "சுக்கிரன்", "சனி", "ராகு", "கேது",
];
const PLANETS_TE: [&str; 9] = [
    "సూర్యుడు", "చంద్రుడు", "కుజుడు", "బుధుడు", "గురువు", "శుక్రుడు", "శని", "రాహువు", "కేతువు",
];
const PLANETS_KN: [&str; 9] = [
    "ಸೂರ್ಯ", "ಚಂದ್ರ", "ಮಂಗಳ", "ಬುಧ", "ಗುರು", "ಶುಕ್ರ", "ಶನಿ", "ರಾಹು", "ಕೇತು",
];
const PLANETS_BN: [&str; 9] = [
    "সূর্য", "চন্দ্র", "মঙ্গল", "বুধ", "বৃহস্পতি", "শুক্র", "শনি", "রাহু", "কেতু",
];

pub const SIGNS_EN: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

const SIGNS_HI: [&str; 12] = [
    "मेष", "वृषभ", "मिथुन", "कर्क", "सिंह", "कन्या", "तुला", "वृश्चिक", "धनु", "मकर", "कुंभ", "मीन",
];
const SIGNS_MR: [&str; 12] = [
    "मेष", "वृषभ", "मिथुन", "कर्क", "सिंह", "कन्या", "तूळ", "वृश्चिक", "धनु", "मकर", "कुंभ", "मीन",
];
const SIGNS_GU: [&str; 12] = [
    "મેષ", "વૃષભ", "મિથુન", "કર્ક", "સિંહ", "કન્યા", "તુલા", "વૃશ્ચિક", "ધન", "મકર", "કુંભ", "મીન",
];
const SIGNS_TA: [&str; 12] = [
    "மேஷம்", "ரிஷபம்", "மிதுனம்", "கடகம்", "சிம்மம்", "கன்னி", "துலாம்", "விருச்சிகம்", "தனுசு",
    "மகரம்", "கும்பம்", "மீனம்",
];
const SIGNS_TE: [&str; 12] = [
    "మేషం", "వృషభం", "మిథునం", "కర్కాటకం", "సింహం", "కన్య", "తుల", "వృశ్చికం", "ధనుస్సు", "మకరం",
    "కుంభం", "మీనం",
];
const SIGNS_KN: [&str; 12] = [
    "ಮೇಷ", "ವೃಷಭ", "ಮಿಥುನ", "ಕರ್ಕಾಟಕ", "ಸಿಂಹ", "ಕನ್ಯಾ", "ತುಲಾ", "ವೃಶ್ಚಿಕ", "ಧನು", "ಮಕರ", "ಕುಂಭ",
    "ಮೀನ",
];
const SIGNS_BN: [&str; 12] = [
    "মেষ", "বৃষ", "মিথুন", "কর্কট", "সিংহ", "কন্যা", "তুলা", "বৃশ্চিক", "ধনু", "মকর", "কুম্ভ", "মীন",
];

pub const NAKSHATRAS_EN: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashirsha",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

const NAKSHATRAS_HI: [&str; 27] = [
    "अश्विनी",
    "भरणी",
    "कृत्तिका",
    "रोहिणी",
    "मृगशिरा",
    "आर्द्रा",
    "पुनर्वसु",
    "पुष्य",
    "आश्लेषा",
    "मघा",
    "पूर्वा फाल्गुनी",
    "उत्तरा फाल्गुनी",
    "हस्त",
    "चित्रा",
    "स्वाती",
    "विशाखा",
    "अनुराधा",
    "ज्येष्ठा",
    "मूल",
    "पूर्वाषाढ़ा",
    "उत्तराषाढ़ा",
    "श्रवण",
    "धनिष्ठा",
    "शतभिषा",
    "पूर्वा भाद्रपद",
    "उत्तरा भाद्रपद",
    "रेवती",
];

pub const YOGINI_DASHAS_EN: [&str; 8] = [
    "Mangala", "Pingala", "Dhanya", "Bhramari", "Bhadrika", "Ulka", "Siddha", "Sankata",
];

const YOGINI_DASHAS_HI: [&str; 8] = [
    "मंगला", "पिंगला", "धान्या", "भ्रामरी", "भद्रिका", "उल्का", "सिद्धा", "संकटा",
];

/// One of the 8 supported report languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LangCode {
    En,
    Hi,
    Mr,
    Gu,
    Ta,
    Te,
    Kn,
    Bn,
}

impl LangCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "hi" => LangCode::Hi,
            "mr" => LangCode::Mr,
            "gu" => LangCode::Gu,
            "ta" => LangCode::Ta,
            "te" => LangCode::Te,
            "kn" => LangCode::Kn,
            "bn" => LangCode::Bn,
            _ => LangCode::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LangCode::En => "en",
            LangCode::Hi => "hi",
            LangCode::Mr => "mr",
            LangCode::Gu => "gu",
            LangCode::Ta => "ta",
            LangCode::Te => "te",
            LangCode::Kn => "kn",
            LangCode::Bn => "bn",
        }
    }

    /// Languages whose display strings live in the Devanagari block and
    /// therefore require the Devanagari document font.
    pub fn uses_devanagari(&self) -> bool {
        matches!(self, LangCode::Hi | LangCode::Mr)
    }
}

/// UI phrases used by page renderers. Fully translated for en/hi; the
/// remaining languages fall back to English phrases while keeping their
/// own planet/sign tables.
pub struct UiLabels {
    pub report: &'static str,
    pub page: &'static str,
    pub of: &'static str,
    pub birth_details: &'static str,
    pub planetary_positions: &'static str,
    pub planet: &'static str,
    pub sign: &'static str,
    pub degree: &'static str,
    pub nakshatra: &'static str,
    pub house: &'static str,
    pub birth_chart: &'static str,
    pub moon_chart: &'static str,
    pub navamsa_chart: &'static str,
    pub vimshottari_dasha: &'static str,
    pub yogini_dasha: &'static str,
    pub char_dasha: &'static str,
    pub sub_dasha: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub ashtakvarga: &'static str,
    pub kalsarpa: &'static str,
    pub manglik: &'static str,
    pub sadhesati: &'static str,
    pub gemstones: &'static str,
    pub numerology: &'static str,
    pub compatibility: &'static str,
    pub total_points: &'static str,
    pub name: &'static str,
    pub date_of_birth: &'static str,
    pub place: &'static str,
    pub not_available: &'static str,
}

const UI_EN: UiLabels = UiLabels {
    report: "Horoscope Report",
    page: "Page",
    of: "of",
    birth_details: "Birth Details",
    planetary_positions: "Planetary Positions",
    planet: "Planet",
    sign: "Sign",
    degree: "Degree",
    nakshatra: "Nakshatra",
    house: "House",
    birth_chart: "Birth Chart",
    moon_chart: "Moon Chart",
    navamsa_chart: "Navamsa Chart",
    vimshottari_dasha: "Vimshottari Dasha",
    yogini_dasha: "Yogini Dasha",
    char_dasha: "Char Dasha",
    sub_dasha: "Sub Periods",
    start: "Start",
    end: "End",
    ashtakvarga: "Ashtakvarga",
    kalsarpa: "Kalsarpa Analysis",
    manglik: "Manglik Analysis",
    sadhesati: "Sadhesati Status",
    gemstones: "Gemstone Suggestions",
    numerology: "Numerology",
    compatibility: "Compatibility Analysis",
    total_points: "Total Points",
    name: "Name",
    date_of_birth: "Date of Birth",
    place: "Place",
    not_available: "N/A",
};

const UI_HI: UiLabels = UiLabels {
    report: "जन्मपत्री रिपोर्ट",
    page: "पृष्ठ",
    of: "का",
    birth_details: "जन्म विवरण",
    planetary_positions: "ग्रह स्थिति",
    planet: "ग्रह",
    sign: "राशि",
    degree: "अंश",
    nakshatra: "नक्षत्र",
    house: "भाव",
    birth_chart: "जन्म कुंडली",
    moon_chart: "चंद्र कुंडली",
    navamsa_chart: "नवांश कुंडली",
    vimshottari_dasha: "विंशोत्तरी दशा",
    yogini_dasha: "योगिनी दशा",
    char_dasha: "चर दशा",
    sub_dasha: "अंतर्दशा",
    start: "आरंभ",
    end: "समाप्ति",
    ashtakvarga: "अष्टकवर्ग",
    kalsarpa: "कालसर्प विश्लेषण",
    manglik: "मांगलिक विश्लेषण",
    sadhesati: "साढ़ेसाती स्थिति",
    gemstones: "रत्न सुझाव",
    numerology: "अंक ज्योतिष",
    compatibility: "गुण मिलान",
    total_points: "कुल गुण",
    name: "नाम",
    date_of_birth: "जन्म तिथि",
    place: "स्थान",
    not_available: "N/A",
};

/// Label dictionary resolved once per request and threaded through all
/// renderers; immutable for the request's lifetime.
pub struct Labels {
    pub lang: LangCode,
    pub planets: &'static [&'static str; 9],
    pub signs: &'static [&'static str; 12],
    pub nakshatras: &'static [&'static str; 27],
    pub yogini: &'static [&'static str; 8],
    pub ui: &'static UiLabels,
}

impl Labels {
    pub fn resolve(lang: LangCode) -> Self {
        let planets = match lang {
            LangCode::En => &PLANETS_EN,
            LangCode::Hi => &PLANETS_HI,
            LangCode::Mr => &PLANETS_MR,
            LangCode::Gu => &PLANETS_GU,
            LangCode::Ta => &PLANETS_TA,
            LangCode::Te => &PLANETS_TE,
            LangCode::Kn => &PLANETS_KN,
            LangCode::Bn => &PLANETS_BN,
        };
        let signs = match lang {
            LangCode::En => &SIGNS_EN,
            LangCode::Hi => &SIGNS_HI,
            LangCode::Mr => &SIGNS_MR,
            LangCode::Gu => &SIGNS_GU,
            LangCode::Ta => &SIGNS_TA,
            LangCode::Te => &SIGNS_TE,
            LangCode::Kn => &SIGNS_KN,
            LangCode::Bn => &SIGNS_BN,
        };
        let nakshatras = match lang {
            LangCode::Hi | LangCode::Mr => &NAKSHATRAS_HI,
            _ => &NAKSHATRAS_EN,
        };
        let yogini = match lang {
            LangCode::Hi | LangCode::Mr => &YOGINI_DASHAS_HI,
            _ => &YOGINI_DASHAS_EN,
        };
        let ui = match lang {
            LangCode::Hi => &UI_HI,
            _ => &UI_EN,
        };
        Self {
            lang,
            planets,
            signs,
            nakshatras,
            yogini,
            ui,
        }
    }

    /// Localized name for a canonical English planet name; the input is
    /// echoed back when it is not one of the nine known planets.
    pub fn planet<'a>(&self, canonical: &'a str) -> &'a str {
        PLANETS_EN
            .iter()
            .position(|p| p.eq_ignore_ascii_case(canonical))
            .map(|i| self.planets[i])
            .unwrap_or(canonical)
    }

    /// Localized nakshatra name for a canonical English one; echoed back
    /// when unrecognized.
    pub fn nakshatra<'a>(&self, canonical: &'a str) -> &'a str {
        NAKSHATRAS_EN
            .iter()
            .position(|n| n.eq_ignore_ascii_case(canonical))
            .map(|i| self.nakshatras[i])
            .unwrap_or(canonical)
    }

    /// Localized sign name for a 1-based sign index.
    pub fn sign(&self, index_1_based: usize) -> &'static str {
        if (1..=12).contains(&index_1_based) {
            self.signs[index_1_based - 1]
        } else {
            self.ui.not_available
        }
    }
}

/// True when the string contains at least one code point in the
/// Devanagari block U+0900..=U+097F. Classification is whole-string:
/// mixed-script input routes entirely to the matching class.
pub fn is_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_devanagari_code_points() {
        assert!(is_devanagari("सूर्य"));
        assert!(!is_devanagari("Sun"));
        assert!(!is_devanagari(""));
    }

    #[test]
    fn mixed_script_classifies_wholesale() {
        // A single mixed string is classified by the presence of any
        // Devanagari code point; the Latin part is not split out.
        assert!(is_devanagari("Sun / सूर्य"));
    }

    #[test]
    fn non_devanagari_indic_scripts_are_not_matched() {
        // Tamil, Telugu, Bengali etc. live outside U+0900-097F.
        assert!(!is_devanagari("சூரியன்"));
        assert!(!is_devanagari("সূর্য"));
    }

    #[test]
    fn labels_resolve_with_fallbacks() {
        let hi = Labels::resolve(LangCode::Hi);
        assert_eq!(hi.planet("Sun"), "सूर्य");
        assert_eq!(hi.sign(1), "मेष");
        assert_eq!(hi.nakshatra("Rohini"), "रोहिणी");
        assert_eq!(hi.ui.page, "पृष्ठ");

        // Tamil keeps its own tables but falls back to English UI text.
        let ta = Labels::resolve(LangCode::Ta);
        assert_eq!(ta.planet("Sun"), "சூரியன்");
        assert_eq!(ta.ui.page, "Page");
    }

    #[test]
    fn unknown_planet_and_sign_degrade() {
        let en = Labels::resolve(LangCode::En);
        assert_eq!(en.planet("Pluto"), "Pluto");
        assert_eq!(en.sign(0), "N/A");
        assert_eq!(en.sign(13), "N/A");
    }

    #[test]
    fn lang_parsing_defaults_to_english() {
        assert_eq!(LangCode::parse("hi"), LangCode::Hi);
        assert_eq!(LangCode::parse("xx"), LangCode::En);
        assert!(LangCode::Hi.uses_devanagari());
        assert!(!LangCode::Ta.uses_devanagari());
    }
}
