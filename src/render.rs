//! Terminal rendering for countdown view models.

use countdown_core::controller::{Notice, View};
use countdown_core::view_model::DecoratedEvent;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DecoratedEvent {
    fn render(&self) -> String {
        let (r, g, b) = self.color.rgb();
        let title = format!("{} {}", self.emoji, self.event.name);
        let id = format!("[{}]", self.event.id);

        format!(
            "{} {}\n   {}  {}",
            title.truecolor(r, g, b).bold(),
            id.dimmed(),
            self.formatted_date,
            days_label(self.days_left).truecolor(r, g, b),
        )
    }
}

impl Render for View {
    fn render(&self) -> String {
        match self {
            View::Loading => "Loading events...".dimmed().to_string(),
            View::Empty => "No events yet!".dimmed().to_string(),
            View::Events(rows) => rows
                .iter()
                .map(Render::render)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        let headline = self.to_string();
        let reason = self.reason().to_string();
        format!("{}\n   {}", headline.red().bold(), reason.dimmed())
    }
}

/// "12 days left", "1 day left"; a passed event keeps its negative count.
pub fn days_label(days: Option<i64>) -> String {
    match days {
        Some(1) => "1 day left".to_string(),
        Some(days) => format!("{days} days left"),
        None => "days left unknown".to_string(),
    }
}

/// Short one-line label for pickers, e.g. "Exam (November 3, 2026)".
pub fn pick_label(row: &DecoratedEvent) -> String {
    format!("{} {} ({})", row.emoji, row.event.name, row.formatted_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_core::Event;
    use countdown_core::view_model::{Deriver, DisplayOptions};

    fn stored_row(name: &str, date: &str, days_left: Option<i64>) -> DecoratedEvent {
        let event = Event {
            id: "e1".into(),
            name: name.into(),
            date: date.into(),
            days_left,
        };
        Deriver::new(DisplayOptions::default()).decorate(&event)
    }

    fn row(name: &str) -> DecoratedEvent {
        stored_row(name, "2026-11-03", Some(18))
    }

    #[test]
    fn days_label_pluralizes() {
        assert_eq!(days_label(Some(18)), "18 days left");
        assert_eq!(days_label(Some(1)), "1 day left");
        assert_eq!(days_label(Some(0)), "0 days left");
        assert_eq!(days_label(Some(-3)), "-3 days left");
        assert_eq!(days_label(None), "days left unknown");
    }

    #[test]
    fn malformed_date_renders_as_stored() {
        let out = stored_row("Launch", "next friday", None).render();
        assert!(out.contains("next friday"));
        assert!(out.contains("days left unknown"));
    }

    #[test]
    fn event_render_shows_fields() {
        let out = row("Final exam").render();
        assert!(out.contains("📝 Final exam"));
        assert!(out.contains("November 3, 2026"));
        assert!(out.contains("18 days left"));
        assert!(out.contains("[e1]"));
    }

    #[test]
    fn empty_and_loading_messages() {
        assert!(View::Empty.render().contains("No events yet!"));
        assert!(View::Loading.render().contains("Loading events..."));
    }

    #[test]
    fn pick_label_is_one_line() {
        assert_eq!(pick_label(&row("Wedding")), "💍 Wedding (November 3, 2026)");
    }
}
