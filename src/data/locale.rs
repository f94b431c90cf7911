//! Decimal mark of the host numeric locale.
//!
//! Resolution order follows POSIX: `LC_ALL`, then `LC_NUMERIC`, then `LANG`.
//! The first non-empty value wins.

use std::env;

use log::debug;

use crate::utils::error::{ReportError, Result};

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

/// Languages whose conventional decimal mark is a comma.
const COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo",
    "fr", "gl", "hr", "hu", "hy", "id", "is", "it", "ka", "kk", "ky", "lt", "lv", "mk", "mn",
    "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk",
    "uz", "vi",
];

/// `language_TERRITORY` pairs whose glibc decimal mark differs from the language default.
const TERRITORY_OVERRIDES: &[(&str, DecimalSeparator)] = &[
    ("de_CH", DecimalSeparator::Point),
    ("de_LI", DecimalSeparator::Point),
    ("it_CH", DecimalSeparator::Point),
    ("es_DO", DecimalSeparator::Point),
    ("es_GT", DecimalSeparator::Point),
    ("es_HN", DecimalSeparator::Point),
    ("es_MX", DecimalSeparator::Point),
    ("es_NI", DecimalSeparator::Point),
    ("es_PA", DecimalSeparator::Point),
    ("es_PR", DecimalSeparator::Point),
    ("es_SV", DecimalSeparator::Point),
    ("es_US", DecimalSeparator::Point),
    ("en_DK", DecimalSeparator::Comma),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalSeparator {
    #[default]
    Point,
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let active = LOCALE_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty());

        match active {
            Some(name) => {
                let sep = Self::from_locale_name(&name)?;
                debug!("locale {:?} uses decimal mark {:?}", name, sep.as_char());
                Ok(sep)
            }
            None => Ok(DecimalSeparator::Point),
        }
    }

    /// Parses names such as `de_DE.UTF-8`, `fr_FR@euro`, `C` or `POSIX`.
    pub fn from_locale_name(name: &str) -> Result<Self> {
        let name = name.trim();
        if name == "C" || name == "POSIX" || name.starts_with("C.") {
            return Ok(DecimalSeparator::Point);
        }

        let base = name.split(['.', '@']).next().unwrap_or_default();
        let mut parts = base.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let territory = parts.next().unwrap_or_default();
        let valid = (2..=3).contains(&language.len())
            && language.chars().all(|c| c.is_ascii_alphabetic());
        if !valid {
            return Err(ReportError::Locale {
                name: name.to_string(),
            });
        }

        let language = language.to_ascii_lowercase();
        let region = format!("{}_{}", language, territory.to_ascii_uppercase());
        if let Some(&(_, sep)) = TERRITORY_OVERRIDES.iter().find(|(key, _)| *key == region) {
            return Ok(sep);
        }

        if COMMA_LANGUAGES.contains(&language.as_str()) {
            Ok(DecimalSeparator::Comma)
        } else {
            Ok(DecimalSeparator::Point)
        }
    }

    /// Parses a decimal number written with this separator. Under a comma locale
    /// a `.` is not a decimal mark, so `12.5` is rejected.
    pub fn parse_f64(self, raw: &str) -> Option<f64> {
        let raw = raw.trim();
        let normalised = match self {
            DecimalSeparator::Point => raw.to_string(),
            DecimalSeparator::Comma if raw.contains('.') => return None,
            DecimalSeparator::Comma => raw.replace(',', "."),
        };
        normalised.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
