//! Locale table for the locale-aware widgets.
//!
//! A fixed set of locales, each carrying just the formatting facts the
//! demo widgets need: number separators and the order of date fields.

/// Order in which a date's fields are written when no explicit pattern
/// is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    YearMonthDay,
    DayMonthYear,
    MonthDayYear,
}

/// One selectable locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// BCP 47 style tag, used in logs.
    pub code: &'static str,
    pub country: &'static str,
    pub language: &'static str,
    /// Separator between integer and fraction digits.
    pub decimal_separator: char,
    /// Separator between groups of three integer digits.
    pub grouping_separator: char,
    pub date_order: DateOrder,
    /// Separator between date fields when no explicit pattern is set.
    pub date_separator: char,
}

impl Locale {
    /// Label used in the locale select control, country first.
    pub fn display_label(&self) -> String {
        format!("{} / {}", self.country, self.language)
    }
}

pub const POLAND: Locale = Locale {
    code: "pl-PL",
    country: "Poland",
    language: "Polish",
    decimal_separator: ',',
    grouping_separator: ' ',
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
};

pub const UNITED_KINGDOM: Locale = Locale {
    code: "en-GB",
    country: "United Kingdom",
    language: "English",
    decimal_separator: '.',
    grouping_separator: ',',
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
};

pub const FRANCE: Locale = Locale {
    code: "fr-FR",
    country: "France",
    language: "French",
    decimal_separator: ',',
    grouping_separator: ' ',
    date_order: DateOrder::DayMonthYear,
    date_separator: '/',
};

pub const GERMANY: Locale = Locale {
    code: "de-DE",
    country: "Germany",
    language: "German",
    decimal_separator: ',',
    grouping_separator: '.',
    date_order: DateOrder::DayMonthYear,
    date_separator: '.',
};

pub const CHINA: Locale = Locale {
    code: "zh-CN",
    country: "China",
    language: "Chinese",
    decimal_separator: '.',
    grouping_separator: ',',
    date_order: DateOrder::YearMonthDay,
    date_separator: '-',
};

/// The locales offered by the locale select control, in display order.
pub const CHOICES: [Locale; 5] = [POLAND, UNITED_KINGDOM, FRANCE, GERMANY, CHINA];

/// Looks a locale up by its tag, case-insensitively.
pub fn by_code(code: &str) -> Option<Locale> {
    CHOICES
        .iter()
        .copied()
        .find(|l| l.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_code() {
        assert_eq!(by_code("de-DE"), Some(GERMANY));
        assert_eq!(by_code("DE-de"), Some(GERMANY));
        assert_eq!(by_code("xx-XX"), None);
    }

    #[test]
    fn display_label_reads_country_first() {
        assert_eq!(POLAND.display_label(), "Poland / Polish");
    }
}
