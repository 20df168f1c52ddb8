//! Code-number display formatting.
//!
//! A code number is expected to be exactly [`CODE_LENGTH`] characters. When it
//! is, it is split into positional groups and joined with a separator; any
//! other length passes through unchanged (after trimming).

use std::str::FromStr;

use serde::Deserialize;

/// Number of characters a code number must have to be grouped.
pub const CODE_LENGTH: usize = 12;

/// Positional grouping applied to a 12-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupScheme {
    /// Four groups of three: `123 456 789 012`.
    #[default]
    Triplets,
    /// Registry layout 3/3/2/1/3: `123 456 78 9 012`.
    Registry,
}

impl GroupScheme {
    /// Group widths in characters. Always sums to [`CODE_LENGTH`].
    pub fn widths(self) -> &'static [usize] {
        match self {
            Self::Triplets => &[3, 3, 3, 3],
            Self::Registry => &[3, 3, 2, 1, 3],
        }
    }
}

impl FromStr for GroupScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triplets" | "3-3-3-3" => Ok(Self::Triplets),
            "registry" | "3-3-2-1-3" => Ok(Self::Registry),
            other => Err(format!("unknown grouping scheme '{other}'")),
        }
    }
}

/// Grouping scheme plus the separator placed between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodeFormat {
    pub scheme: GroupScheme,
    pub separator: char,
}

impl CodeFormat {
    /// `123 456 789 012`
    pub const SPACED: Self = Self {
        scheme: GroupScheme::Triplets,
        separator: ' ',
    };

    /// `123/456/789/012`, as printed on the sticker.
    pub const SLASHED: Self = Self {
        scheme: GroupScheme::Triplets,
        separator: '/',
    };

    pub fn new(scheme: GroupScheme, separator: char) -> Self {
        Self { scheme, separator }
    }

    /// Builder: set grouping scheme.
    pub fn with_scheme(mut self, scheme: GroupScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Builder: set separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

impl Default for CodeFormat {
    fn default() -> Self {
        Self::SLASHED
    }
}

/// Parse a separator setting: `space`, `slash`, `dash`, or a single literal char.
pub fn parse_separator(s: &str) -> Option<char> {
    match s.to_ascii_lowercase().as_str() {
        "space" => Some(' '),
        "slash" => Some('/'),
        "dash" => Some('-'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
    }
}

/// Format a code number for display.
///
/// Boundaries are character counts, not digit checks, so non-numeric codes
/// are grouped too. Anything that is not exactly 12 characters after trimming
/// is returned trimmed but otherwise untouched.
pub fn format_code_number(code: &str, format: &CodeFormat) -> String {
    let clean = code.trim();
    let chars: Vec<char> = clean.chars().collect();
    if chars.len() != CODE_LENGTH {
        return clean.to_string();
    }

    let widths = format.scheme.widths();
    let mut out = String::with_capacity(clean.len() + widths.len());
    let mut start = 0;
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push(format.separator);
        }
        out.extend(&chars[start..start + width]);
        start += width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_triplets() {
        assert_eq!(
            format_code_number("123456789012", &CodeFormat::SPACED),
            "123 456 789 012"
        );
    }

    #[test]
    fn slashed_triplets() {
        assert_eq!(
            format_code_number("123456789012", &CodeFormat::SLASHED),
            "123/456/789/012"
        );
    }

    #[test]
    fn registry_scheme() {
        let format = CodeFormat::new(GroupScheme::Registry, ' ');
        assert_eq!(format_code_number("123456789012", &format), "123 456 78 9 012");
    }

    #[test]
    fn trims_before_grouping() {
        assert_eq!(
            format_code_number("  100200300400  ", &CodeFormat::SPACED),
            "100 200 300 400"
        );
    }

    #[test]
    fn non_numeric_codes_are_grouped_positionally() {
        assert_eq!(
            format_code_number("AB-C12x45678", &CodeFormat::SLASHED),
            "AB-/C12/x45/678"
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 12 chars, more than 12 bytes
        assert_eq!(
            format_code_number("ÅÅÅÄÄÄÖÖÖ123", &CodeFormat::SPACED),
            "ÅÅÅ ÄÄÄ ÖÖÖ 123"
        );
    }

    #[test]
    fn wrong_length_passes_through_trimmed() {
        for code in ["", "1", "12345678901", "1234567890123", "  abc  ", "123 456 789 012"] {
            assert_eq!(format_code_number(code, &CodeFormat::SPACED), code.trim());
        }
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(format_code_number("", &CodeFormat::default()), "");
    }

    #[test]
    fn repeated_formatting_is_stable() {
        let once = format_code_number(" 123456789012 ", &CodeFormat::SPACED);
        let twice = format_code_number(once.trim(), &CodeFormat::SPACED);
        assert_eq!(once, twice);

        let short = format_code_number("42", &CodeFormat::SPACED);
        assert_eq!(format_code_number(&short, &CodeFormat::SPACED), short);
    }

    #[test]
    fn default_is_slashed() {
        assert_eq!(CodeFormat::default(), CodeFormat::SLASHED);
    }

    #[test]
    fn scheme_widths_cover_whole_code() {
        for scheme in [GroupScheme::Triplets, GroupScheme::Registry] {
            assert_eq!(scheme.widths().iter().sum::<usize>(), CODE_LENGTH);
        }
    }

    #[test]
    fn parse_scheme_and_separator() {
        assert_eq!("Registry".parse::<GroupScheme>(), Ok(GroupScheme::Registry));
        assert_eq!("triplets".parse::<GroupScheme>(), Ok(GroupScheme::Triplets));
        assert!("pairs".parse::<GroupScheme>().is_err());

        assert_eq!(parse_separator("space"), Some(' '));
        assert_eq!(parse_separator("slash"), Some('/'));
        assert_eq!(parse_separator("."), Some('.'));
        assert_eq!(parse_separator("::"), None);
        assert_eq!(parse_separator(""), None);
    }

    #[test]
    fn deserializes_from_json() {
        let format: CodeFormat =
            serde_json::from_str(r#"{"scheme":"registry","separator":"-"}"#).unwrap();
        assert_eq!(format, CodeFormat::new(GroupScheme::Registry, '-'));

        let partial: CodeFormat = serde_json::from_str(r#"{"separator":" "}"#).unwrap();
        assert_eq!(partial, CodeFormat::SPACED);
    }
}
