//! Display-ready rows derived from stored events.
//!
//! A `DecoratedEvent` is recomputed on every render pass from the current
//! event list. It carries the long-form date, the days-left count, an emoji
//! picked from the event name and a card color. Deriving never reorders,
//! filters or fails: a date that does not parse is shown as stored.

use chrono::NaiveDate;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};

use crate::date::format_long_date;
use crate::event::Event;

/// Keyword → glyph table. Matching is a case-insensitive substring test and
/// the first matching row wins.
pub const EMOJI_KEYWORDS: [(&str, &str); 9] = [
    ("birthday", "🎂"),
    ("school", "🎓"),
    ("vacation", "🏖️"),
    ("wedding", "💍"),
    ("christmas", "🎄"),
    ("new year", "🎉"),
    ("meeting", "📅"),
    ("exam", "📝"),
    ("trip", "✈️"),
];

/// Glyphs used when no keyword matches.
pub const FALLBACK_EMOJIS: [&str; 6] = ["🌟", "🎯", "💡", "🕒", "🚀", "🎈"];

/// Card colors.
pub const PALETTE: [Color; 7] = [
    Color("#007bff"),
    Color("#28a745"),
    Color("#17a2b8"),
    Color("#ffc107"),
    Color("#6610f2"),
    Color("#dc3545"),
    Color("#20c997"),
];

/// A `#rrggbb` palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

impl Color {
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// How a per-event display choice is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variety {
    /// A fresh random pick on every render.
    #[default]
    Random,
    /// Derived from the event id, so an event always looks the same.
    Stable,
}

/// Where the days-left count comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaysLeftSource {
    /// Trust the store's `daysLeft`; compute locally only when it is missing.
    #[default]
    Server,
    /// Always compute `date - today`.
    Local,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default)]
    pub colors: Variety,

    #[serde(default)]
    pub emoji_fallback: Variety,

    #[serde(default)]
    pub days_left: DaysLeftSource,
}

/// An event plus everything needed to draw its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedEvent {
    pub event: Event,
    pub formatted_date: String,
    /// `None` when the store sent no count and the date does not parse.
    pub days_left: Option<i64>,
    pub emoji: &'static str,
    pub color: Color,
}

/// Glyph for the first table keyword contained in `name`, if any.
pub fn keyword_emoji(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    EMOJI_KEYWORDS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, emoji)| *emoji)
}

/// Turns stored events into decorated events.
pub struct Deriver<R> {
    options: DisplayOptions,
    today: NaiveDate,
    rng: R,
}

impl Deriver<ThreadRng> {
    /// A deriver using the thread RNG and today's local date.
    pub fn new(options: DisplayOptions) -> Self {
        Deriver::with_rng(options, chrono::Local::now().date_naive(), rand::thread_rng())
    }
}

impl<R: Rng> Deriver<R> {
    pub fn with_rng(options: DisplayOptions, today: NaiveDate, rng: R) -> Self {
        Deriver { options, today, rng }
    }

    /// Decorate every event, keeping count and order.
    pub fn derive(&mut self, events: &[Event]) -> Vec<DecoratedEvent> {
        events.iter().map(|event| self.decorate(event)).collect()
    }

    pub fn decorate(&mut self, event: &Event) -> DecoratedEvent {
        let date = event.calendar_date();

        let days_left = match self.options.days_left {
            DaysLeftSource::Server => event.days_left.or_else(|| event.days_from(self.today)),
            DaysLeftSource::Local => event.days_from(self.today).or(event.days_left),
        };

        let emoji = match keyword_emoji(&event.name) {
            Some(emoji) => emoji,
            None => {
                let variety = self.options.emoji_fallback;
                FALLBACK_EMOJIS[self.pick(variety, &event.id, 1, FALLBACK_EMOJIS.len())]
            }
        };

        let color = PALETTE[self.pick(self.options.colors, &event.id, 0, PALETTE.len())];

        let formatted_date = match date {
            Some(date) => format_long_date(date),
            None => event.date.clone(),
        };

        DecoratedEvent {
            event: event.clone(),
            formatted_date,
            days_left,
            emoji,
            color,
        }
    }

    fn pick(&mut self, variety: Variety, id: &str, salt: u8, len: usize) -> usize {
        match variety {
            Variety::Random => self.rng.gen_range(0..len),
            Variety::Stable => (stable_hash(id, salt) % len as u64) as usize,
        }
    }
}

/// FNV-1a over the id bytes, prefixed by a salt so color and emoji picks for
/// the same id are independent.
fn stable_hash(id: &str, salt: u8) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    std::iter::once(salt)
        .chain(id.bytes())
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, name: &str, date: NaiveDate, days_left: Option<i64>) -> Event {
        Event {
            id: id.into(),
            name: name.into(),
            date: crate::date::to_wire(date),
            days_left,
        }
    }

    fn raw_event(id: &str, date: &str, days_left: Option<i64>) -> Event {
        Event {
            id: id.into(),
            name: "Launch".into(),
            date: date.into(),
            days_left,
        }
    }

    fn deriver(options: DisplayOptions, seed: u64) -> Deriver<StdRng> {
        Deriver::with_rng(options, ymd(2026, 10, 16), StdRng::seed_from_u64(seed))
    }

    fn sample_events() -> Vec<Event> {
        vec![
            event("c", "Zebra day", ymd(2026, 12, 1), Some(46)),
            event("a", "Birthday party", ymd(2026, 11, 2), Some(17)),
            event("b", "Birthday party", ymd(2026, 11, 2), Some(17)),
            event("d", "Launch", ymd(2026, 1, 5), Some(-284)),
        ]
    }

    // --- derive ---

    #[test]
    fn derive_preserves_length_and_order() {
        let events = sample_events();
        let decorated = deriver(DisplayOptions::default(), 7).derive(&events);

        assert_eq!(decorated.len(), events.len());
        let ids: Vec<_> = decorated.iter().map(|d| d.event.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b", "d"]);
    }

    #[test]
    fn derive_empty_list() {
        assert!(deriver(DisplayOptions::default(), 1).derive(&[]).is_empty());
    }

    #[test]
    fn formatted_date_is_long_form() {
        let events = [event("1", "Launch", ymd(2026, 1, 5), Some(0))];
        let decorated = deriver(DisplayOptions::default(), 1).derive(&events);
        assert_eq!(decorated[0].formatted_date, "January 5, 2026");
    }

    #[test]
    fn malformed_date_is_shown_as_stored() {
        let events = [
            event("1", "Exam", ymd(2026, 11, 3), Some(18)),
            raw_event("2", "2026-11-3T00:00:00", Some(18)),
        ];
        let decorated = deriver(DisplayOptions::default(), 1).derive(&events);

        assert_eq!(decorated.len(), 2);
        assert_eq!(decorated[0].formatted_date, "November 3, 2026");
        assert_eq!(decorated[1].formatted_date, "2026-11-3T00:00:00");
        assert_eq!(decorated[1].days_left, Some(18));
    }

    #[test]
    fn malformed_date_without_count_has_no_days_left() {
        let local = DisplayOptions {
            days_left: DaysLeftSource::Local,
            ..Default::default()
        };
        for options in [DisplayOptions::default(), local] {
            let decorated = deriver(options, 1).decorate(&raw_event("1", "someday", None));
            assert_eq!(decorated.days_left, None);
        }
    }

    // --- emoji ---

    #[test]
    fn keyword_match_ignores_case() {
        assert_eq!(keyword_emoji("BIRTHDAY"), Some("🎂"));
        assert_eq!(keyword_emoji("Sam's Wedding"), Some("💍"));
        assert_eq!(keyword_emoji("happy NEW YEAR!"), Some("🎉"));
        assert_eq!(keyword_emoji("Road TrIp"), Some("✈️"));
    }

    #[test]
    fn keyword_matches_inside_words() {
        assert_eq!(keyword_emoji("Preschool graduation"), Some("🎓"));
        assert_eq!(keyword_emoji("Final examination"), Some("📝"));
    }

    #[test]
    fn first_keyword_in_table_order_wins() {
        // "trip" appears first in the name but "birthday" comes first in the table.
        assert_eq!(keyword_emoji("trip for my birthday"), Some("🎂"));
        assert_eq!(keyword_emoji("exam meeting"), Some("📅"));
        assert_eq!(keyword_emoji("christmas vacation"), Some("🏖️"));
    }

    #[test]
    fn no_keyword_returns_none() {
        assert_eq!(keyword_emoji("Launch day"), None);
        assert_eq!(keyword_emoji(""), None);
    }

    #[test]
    fn keyword_emoji_is_used_regardless_of_rng() {
        let events = [event("1", "Dad's BIRTHDAY", ymd(2026, 11, 2), Some(17))];
        for seed in 0..20 {
            let decorated = deriver(DisplayOptions::default(), seed).derive(&events);
            assert_eq!(decorated[0].emoji, "🎂");
        }
    }

    #[test]
    fn unmatched_name_gets_fallback_glyph() {
        let events = [event("1", "Launch", ymd(2026, 11, 2), Some(17))];
        for seed in 0..50 {
            let decorated = deriver(DisplayOptions::default(), seed).derive(&events);
            assert!(FALLBACK_EMOJIS.contains(&decorated[0].emoji));
        }
    }

    #[test]
    fn stable_fallback_depends_only_on_id() {
        let options = DisplayOptions {
            emoji_fallback: Variety::Stable,
            ..Default::default()
        };
        let first = event("abc", "Launch", ymd(2026, 1, 1), None);
        let second = event("abc", "Other", ymd(2027, 1, 1), None);

        let first = deriver(options, 1).decorate(&first);
        let second = deriver(options, 99).decorate(&second);
        assert_eq!(first.emoji, second.emoji);
    }

    // --- color ---

    #[test]
    fn color_comes_from_palette() {
        let events = sample_events();
        for seed in 0..20 {
            for decorated in deriver(DisplayOptions::default(), seed).derive(&events) {
                assert!(PALETTE.contains(&decorated.color));
            }
        }
    }

    #[test]
    fn random_colors_vary_across_renders() {
        let events: Vec<_> = (0..32)
            .map(|i| event(&i.to_string(), "Launch", ymd(2026, 1, 1), None))
            .collect();
        let colors: std::collections::HashSet<_> = deriver(DisplayOptions::default(), 3)
            .derive(&events)
            .into_iter()
            .map(|d| d.color)
            .collect();
        assert!(colors.len() > 1);
    }

    #[test]
    fn stable_colors_repeat_for_the_same_id() {
        let options = DisplayOptions {
            colors: Variety::Stable,
            ..Default::default()
        };
        let events = sample_events();
        let first = deriver(options, 1).derive(&events);
        let second = deriver(options, 2).derive(&events);

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn color_rgb_channels() {
        assert_eq!(Color("#007bff").rgb(), (0x00, 0x7b, 0xff));
        assert_eq!(Color("#dc3545").rgb(), (0xdc, 0x35, 0x45));
    }

    // --- days left ---

    #[test]
    fn server_days_left_passes_through() {
        // The store's count wins even when it disagrees with the local clock.
        let events = [event("1", "Launch", ymd(2026, 10, 20), Some(-3))];
        let decorated = deriver(DisplayOptions::default(), 1).derive(&events);
        assert_eq!(decorated[0].days_left, Some(-3));
    }

    #[test]
    fn server_mode_computes_when_missing() {
        let events = [event("1", "Launch", ymd(2026, 10, 20), None)];
        let decorated = deriver(DisplayOptions::default(), 1).derive(&events);
        assert_eq!(decorated[0].days_left, Some(4));
    }

    #[test]
    fn local_mode_ignores_server_value() {
        let options = DisplayOptions {
            days_left: DaysLeftSource::Local,
            ..Default::default()
        };
        let events = [
            event("1", "Launch", ymd(2026, 10, 20), Some(99)),
            event("2", "Today", ymd(2026, 10, 16), Some(99)),
            event("3", "Past", ymd(2026, 10, 1), Some(99)),
        ];
        let days: Vec<_> = deriver(options, 1)
            .derive(&events)
            .iter()
            .map(|d| d.days_left)
            .collect();
        assert_eq!(days, [Some(4), Some(0), Some(-15)]);
    }

    #[test]
    fn display_options_deserialize_lowercase() {
        let options: DisplayOptions =
            toml::from_str("colors = \"stable\"\ndays_left = \"local\"").unwrap();
        assert_eq!(options.colors, Variety::Stable);
        assert_eq!(options.emoji_fallback, Variety::Random);
        assert_eq!(options.days_left, DaysLeftSource::Local);
    }
}
