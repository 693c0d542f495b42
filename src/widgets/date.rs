//! Date and date-time fields.
//!
//! Segment-based editing: while the field holds capture, Left/Right pick
//! a segment and Up/Down adjust it. Display follows an explicit
//! [`DatePattern`] when one is set, otherwise the locale's own field
//! order.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::capability::CapabilityId;
use crate::locale::{self, DateOrder, Locale};
use crate::widgets::traits::{HasDatePattern, HasLocale, HasValue};
use crate::widgets::{DemoWidget, FieldEvent, Outbox};

const DATE_FIELD_CAPS: &[CapabilityId] = &[
    CapabilityId::HasValue,
    CapabilityId::HasLocale,
    CapabilityId::HasDatePattern,
    CapabilityId::FocusNotifier,
    CapabilityId::BlurNotifier,
];

/// A fixed date display pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// yyyy-MM-dd
    YearMonthDay,
    /// M/d/yyyy
    MonthDayYearSlash,
    /// dd.MM.yyyy
    DayMonthYearDotted,
    /// d.M.yy
    DayMonthShortYearDotted,
}

impl DatePattern {
    /// Patterns offered by the pattern select control.
    pub const CHOICES: [DatePattern; 4] = [
        DatePattern::YearMonthDay,
        DatePattern::MonthDayYearSlash,
        DatePattern::DayMonthYearDotted,
        DatePattern::DayMonthShortYearDotted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DatePattern::YearMonthDay => "yyyy-MM-dd",
            DatePattern::MonthDayYearSlash => "M/d/yyyy",
            DatePattern::DayMonthYearDotted => "dd.MM.yyyy",
            DatePattern::DayMonthShortYearDotted => "d.M.yy",
        }
    }

    pub fn format(self, date: NaiveDate) -> String {
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self {
            DatePattern::YearMonthDay => format!("{y:04}-{m:02}-{d:02}"),
            DatePattern::MonthDayYearSlash => format!("{m}/{d}/{y:04}"),
            DatePattern::DayMonthYearDotted => format!("{d:02}.{m:02}.{y:04}"),
            DatePattern::DayMonthShortYearDotted => format!("{d}.{m}.{:02}", y.rem_euclid(100)),
        }
    }

    fn date_order(self) -> DateOrder {
        match self {
            DatePattern::YearMonthDay => DateOrder::YearMonthDay,
            DatePattern::MonthDayYearSlash => DateOrder::MonthDayYear,
            DatePattern::DayMonthYearDotted | DatePattern::DayMonthShortYearDotted => {
                DateOrder::DayMonthYear
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl Segment {
    fn name(self) -> &'static str {
        match self {
            Segment::Year => "year",
            Segment::Month => "month",
            Segment::Day => "day",
            Segment::Hour => "hour",
            Segment::Minute => "minute",
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// Shared state of the date fields.
pub struct DateCore {
    label: String,
    value: NaiveDateTime,
    with_time: bool,
    pattern: Option<DatePattern>,
    locale: Locale,
    read_only: bool,
    focused: bool,
    segment: usize,
    outbox: Outbox,
}

impl DateCore {
    pub fn new(label: impl Into<String>, value: NaiveDateTime, with_time: bool) -> Self {
        Self {
            label: label.into(),
            value,
            with_time,
            pattern: None,
            locale: locale::UNITED_KINGDOM,
            read_only: false,
            focused: false,
            segment: 0,
            outbox: Outbox::default(),
        }
    }

    pub fn with_date_pattern(mut self, pattern: DatePattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    fn effective_order(&self) -> DateOrder {
        match self.pattern {
            Some(p) => p.date_order(),
            None => self.locale.date_order,
        }
    }

    fn segments(&self) -> Vec<Segment> {
        let mut out = match self.effective_order() {
            DateOrder::YearMonthDay => vec![Segment::Year, Segment::Month, Segment::Day],
            DateOrder::DayMonthYear => vec![Segment::Day, Segment::Month, Segment::Year],
            DateOrder::MonthDayYear => vec![Segment::Month, Segment::Day, Segment::Year],
        };
        if self.with_time {
            out.push(Segment::Hour);
            out.push(Segment::Minute);
        }
        out
    }

    fn display_date(&self) -> String {
        let date = self.value.date();
        if let Some(pattern) = self.pattern {
            return pattern.format(date);
        }
        let (y, m, d) = (date.year(), date.month(), date.day());
        let sep = self.locale.date_separator;
        match self.locale.date_order {
            DateOrder::YearMonthDay => format!("{y:04}{sep}{m:02}{sep}{d:02}"),
            DateOrder::DayMonthYear => format!("{d:02}{sep}{m:02}{sep}{y:04}"),
            DateOrder::MonthDayYear => format!("{m:02}{sep}{d:02}{sep}{y:04}"),
        }
    }

    fn display_text(&self) -> String {
        let mut out = self.display_date();
        if self.with_time {
            out.push_str(&format!(
                " {:02}:{:02}",
                self.value.hour(),
                self.value.minute()
            ));
        }
        out
    }

    fn set_date(&mut self, year: i32, month: u32, day: u32) {
        let day = day.min(days_in_month(year, month));
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            self.value = date
                .and_hms_opt(self.value.hour(), self.value.minute(), 0)
                .unwrap_or(self.value);
        }
    }

    fn adjust(&mut self, delta: i64) {
        let segments = self.segments();
        let Some(segment) = segments.get(self.segment).copied() else {
            return;
        };
        let (y, m, d) = (self.value.year(), self.value.month(), self.value.day());
        match segment {
            Segment::Year => self.set_date((y as i64 + delta).clamp(1900, 2100) as i32, m, d),
            Segment::Month => {
                let next = ((m as i64 - 1 + delta).rem_euclid(12) + 1) as u32;
                self.set_date(y, next, d);
            }
            Segment::Day => {
                let len = days_in_month(y, m) as i64;
                let next = ((d as i64 - 1 + delta).rem_euclid(len) + 1) as u32;
                self.set_date(y, m, next);
            }
            Segment::Hour => {
                let next = (self.value.hour() as i64 + delta).rem_euclid(24) as u32;
                self.value = self.value.with_hour(next).unwrap_or(self.value);
            }
            Segment::Minute => {
                let next = (self.value.minute() as i64 + delta).rem_euclid(60) as u32;
                self.value = self.value.with_minute(next).unwrap_or(self.value);
            }
        }
        let text = self.display_text();
        self.outbox.push(FieldEvent::ValueChanged(text));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                self.segment = self.segment.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.segment = (self.segment + 1).min(self.segments().len() - 1);
                true
            }
            KeyCode::Up if !self.read_only => {
                self.adjust(1);
                true
            }
            KeyCode::Down if !self.read_only => {
                self.adjust(-1);
                true
            }
            _ => false,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.outbox.push(if focused {
            FieldEvent::Focused
        } else {
            FieldEvent::Blurred
        });
    }

    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        self.outbox.drain()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool) {
        let border = if captured {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(self.label.clone());

        let mut spans = vec![Span::raw(self.display_text())];
        if captured {
            let segment = self
                .segments()
                .get(self.segment)
                .map(|s| s.name())
                .unwrap_or("?");
            spans.push(Span::styled(
                format!("  ◄► segment, ▲▼ adjust [{segment}]"),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, area);
    }
}

impl HasValue for DateCore {
    fn value_text(&self) -> String {
        self.display_text()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}

impl HasLocale for DateCore {
    fn locale(&self) -> Locale {
        self.locale
    }

    fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.segment = 0;
    }
}

impl HasDatePattern for DateCore {
    fn set_date_pattern(&mut self, pattern: Option<DatePattern>) {
        self.pattern = pattern;
        self.segment = 0;
    }

    fn date_pattern(&self) -> Option<DatePattern> {
        self.pattern
    }
}

macro_rules! date_field_widget {
    ($ty:ident, $name:literal) => {
        impl DemoWidget for $ty {
            fn type_name(&self) -> &'static str {
                $name
            }

            fn capabilities(&self) -> &'static [CapabilityId] {
                DATE_FIELD_CAPS
            }

            fn render(&mut self, frame: &mut Frame, area: Rect, captured: bool) {
                self.core.render(frame, area, captured);
            }

            fn handle_key(&mut self, key: KeyEvent) -> bool {
                self.core.handle_key(key)
            }

            fn set_focused(&mut self, focused: bool) {
                self.core.set_focused(focused);
            }

            fn drain_events(&mut self) -> Vec<FieldEvent> {
                self.core.drain_events()
            }

            fn as_has_value(&mut self) -> Option<&mut dyn HasValue> {
                Some(&mut self.core)
            }

            fn as_has_locale(&mut self) -> Option<&mut dyn HasLocale> {
                Some(&mut self.core)
            }

            fn as_date_pattern(&mut self) -> Option<&mut dyn HasDatePattern> {
                Some(&mut self.core)
            }

            $crate::impl_widget_any!();
        }
    };
}

/// Calendar date picker.
pub struct DateField {
    core: DateCore,
}

impl DateField {
    pub fn new(label: impl Into<String>, value: NaiveDate) -> Self {
        Self {
            core: DateCore::new(label, value.and_time(chrono::NaiveTime::MIN), false),
        }
    }

    pub fn with_date_pattern(mut self, pattern: DatePattern) -> Self {
        self.core = self.core.with_date_pattern(pattern);
        self
    }
}

/// Calendar date and time-of-day picker.
pub struct DateTimeField {
    core: DateCore,
}

impl DateTimeField {
    pub fn new(label: impl Into<String>, value: NaiveDateTime) -> Self {
        Self {
            core: DateCore::new(label, value, true),
        }
    }

    pub fn with_date_pattern(mut self, pattern: DatePattern) -> Self {
        self.core = self.core.with_date_pattern(pattern);
        self
    }
}

date_field_widget!(DateField, "DateField");
date_field_widget!(DateTimeField, "DateTimeField");

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pattern_formats() {
        let d = date(2020, 4, 7);
        assert_eq!(DatePattern::YearMonthDay.format(d), "2020-04-07");
        assert_eq!(DatePattern::MonthDayYearSlash.format(d), "4/7/2020");
        assert_eq!(DatePattern::DayMonthYearDotted.format(d), "07.04.2020");
        assert_eq!(DatePattern::DayMonthShortYearDotted.format(d), "7.4.20");
    }

    #[test]
    fn locale_order_applies_without_pattern() {
        let mut core = DateCore::new("d", date(2020, 4, 7).and_time(chrono::NaiveTime::MIN), false);
        core.set_locale(locale::GERMANY);
        assert_eq!(core.value_text(), "07.04.2020");
        core.set_locale(locale::CHINA);
        assert_eq!(core.value_text(), "2020-04-07");
    }

    #[test]
    fn explicit_pattern_wins_over_locale() {
        let mut core = DateCore::new("d", date(2020, 4, 7).and_time(chrono::NaiveTime::MIN), false);
        core.set_locale(locale::GERMANY);
        core.set_date_pattern(Some(DatePattern::MonthDayYearSlash));
        assert_eq!(core.value_text(), "4/7/2020");
        core.set_date_pattern(None);
        assert_eq!(core.value_text(), "07.04.2020");
    }

    #[test]
    fn month_wraps_and_day_clamps() {
        let mut core =
            DateCore::new("d", date(2021, 1, 31).and_time(chrono::NaiveTime::MIN), false);
        core.set_locale(locale::CHINA); // year month day order
        core.segment = 1; // month
        core.adjust(1);
        // January 31st plus one month clamps to February 28th
        assert_eq!(core.value.date(), date(2021, 2, 28));
        core.adjust(-1);
        assert_eq!(core.value.date(), date(2021, 1, 28));
    }

    #[test]
    fn time_segments_wrap() {
        let mut core = DateCore::new(
            "d",
            date(2021, 6, 1).and_hms_opt(23, 59, 0).unwrap(),
            true,
        );
        core.segment = 3; // hour
        core.adjust(1);
        assert_eq!(core.value.hour(), 0);
        core.segment = 4; // minute
        core.adjust(1);
        assert_eq!(core.value.minute(), 0);
    }
}
