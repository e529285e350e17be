//! Renderers: model state in, [`Markup`] out. No side effects.

use shoreline_forecast::{ForecastDay, Range};
use shoreline_store::{CleanupEvent, CrewMember};

use crate::markup::Markup;

pub const EMPTY_CREW: &str = "No crew members yet. Add yourself to join the squad!";
pub const EMPTY_EVENTS: &str = "No cleanup events scheduled yet. Create the first one!";
pub const FORECAST_LOADING: &str = "Loading forecast...";

const DEFAULT_ROLE: &str = "Volunteer";

pub fn crew_list(crew: &[CrewMember]) -> Markup {
    let mut m = Markup::new();
    if crew.is_empty() {
        m.raw(r#"<p class="empty-state">"#).text(EMPTY_CREW).raw("</p>");
        return m;
    }

    for member in crew {
        let initial = member
            .name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        let role = if member.role.is_empty() {
            DEFAULT_ROLE
        } else {
            member.role.as_str()
        };

        m.raw(r#"<div class="crew-member" data-id=""#)
            .text(&member.id)
            .raw(r#""><div class="crew-avatar">"#)
            .text(&initial)
            .raw(r#"</div><div class="crew-info"><h4>"#)
            .text(&member.name)
            .raw("</h4><p>")
            .text(role)
            .raw("</p><small>Joined ")
            .display(member.joined_at.format("%b %-d, %Y"))
            .raw(r#"</small></div><button class="btn-remove" data-action="remove-crew" data-id=""#)
            .text(&member.id)
            .raw(r#"">Remove</button></div>"#);
    }
    m
}

pub fn event_list(events: &[CleanupEvent]) -> Markup {
    let mut m = Markup::new();
    if events.is_empty() {
        m.raw(r#"<p class="empty-state">"#).text(EMPTY_EVENTS).raw("</p>");
        return m;
    }

    for event in events {
        m.raw(r#"<div class="event-card" data-id=""#)
            .text(&event.id)
            .raw(r#""><h3>"#)
            .text(&event.title)
            .raw(r#"</h3><p class="event-meta">📍 "#)
            .text(&event.location)
            .raw(r#"</p><p class="event-meta">📅 "#);
        match event.date {
            Some(date) => {
                m.display(date.format("%a, %b %-d, %Y"));
            }
            None => {
                m.raw("Date TBD");
            }
        }
        if !event.time.is_empty() {
            m.raw(" · ").text(&event.time);
        }
        m.raw("</p>");

        if !event.description.is_empty() {
            m.raw(r#"<p class="event-description">"#)
                .text(&event.description)
                .raw("</p>");
        }

        m.raw(r#"<div class="event-footer"><span class="attendees">👥 "#)
            .display(event.attendees)
            .raw(r#" attending</span><button class="btn-join" data-action="join-squad" data-id=""#)
            .text(&event.id)
            .raw(r#"">Join Squad</button></div></div>"#);
    }
    m
}

pub fn forecast_grid(days: &[ForecastDay]) -> Markup {
    let mut m = Markup::new();
    for day in days {
        let icon = day.icon();
        m.raw(r#"<div class="forecast-card icon-"#)
            .raw(icon.icon_name())
            .raw(r#""><div class="forecast-date">"#);
        match day.parsed_date() {
            Some(date) => {
                m.display(date.format("%a, %b %-d"));
            }
            None => {
                m.text(&day.date);
            }
        }
        m.raw(r#"</div><div class="forecast-icon">"#)
            .raw(icon.glyph())
            .raw(r#"</div><div class="forecast-text">"#)
            .text(&day.forecast)
            .raw("</div>");

        reading(&mut m, "Temp", day.temperature.as_ref(), "°C");
        reading(&mut m, "Wind", day.wind_speed.as_ref(), "km/h");
        reading(&mut m, "Humidity", day.relative_humidity.as_ref(), "%");

        m.raw("</div>");
    }
    m
}

fn reading(m: &mut Markup, label: &'static str, range: Option<&Range>, unit: &'static str) {
    m.raw(r#"<div class="forecast-reading"><span class="label">"#)
        .raw(label)
        .raw(r#"</span> <span class="value">"#)
        .text(&Range::display(range))
        .raw(r#"</span> <span class="unit">"#)
        .raw(unit)
        .raw("</span></div>");
}

pub fn forecast_loading() -> Markup {
    let mut m = Markup::new();
    m.raw(r#"<div class="forecast-loading">"#)
        .text(FORECAST_LOADING)
        .raw("</div>");
    m
}

pub fn forecast_error(message: &str) -> Markup {
    let mut m = Markup::new();
    m.raw(r#"<div class="forecast-error">"#).text(message).raw("</div>");
    m
}
