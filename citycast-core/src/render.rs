use std::fmt::Write;

use crate::{
    icon::icon_for,
    model::{DailyEntry, ForecastSnapshot},
    session::ViewState,
};

pub const LOADING_INDICATOR: &str = "Loading...";
pub const EMPTY_PLACEHOLDER: &str = "No forecast to show.";

/// Names this long push the country onto its own line.
const LONG_TITLE_CHARS: usize = 15;

/// Lay out the current view as plain text.
pub fn render(view: &ViewState) -> String {
    if view.loading {
        return format!("{LOADING_INDICATOR}\n");
    }

    let mut out = String::new();

    if !view.places.is_empty() {
        out.push_str("Search results:\n");
        for (i, place) in view.places.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}, {}", i + 1, place.name, place.country);
        }
        out.push('\n');
    }

    match &view.snapshot {
        Some(snapshot) => render_snapshot(&mut out, snapshot),
        None => {
            let _ = writeln!(out, "{EMPTY_PLACEHOLDER}");
        }
    }

    out
}

pub fn title(snapshot: &ForecastSnapshot) -> String {
    let place = &snapshot.place;
    let long = place.name.chars().count() >= LONG_TITLE_CHARS
        || place.country.chars().count() >= LONG_TITLE_CHARS;

    if long {
        format!("{},\n{}", place.name, place.country)
    } else {
        format!("{}, {}", place.name, place.country)
    }
}

/// "Tomorrow" for the first upcoming day, the weekday name after that.
pub fn day_label(position: usize, day: &DailyEntry) -> String {
    if position == 0 { "Tomorrow".to_string() } else { day.date.format("%A").to_string() }
}

fn render_snapshot(out: &mut String, snapshot: &ForecastSnapshot) {
    let current = &snapshot.current;

    let _ = writeln!(out, "{}", title(snapshot));
    let _ = writeln!(out, "{}  {}°C", icon_for(&current.condition), current.temperature_c);
    let _ = writeln!(out, "{}", current.condition);
    let _ = writeln!(
        out,
        "wind {} km   humidity {} %   sunrise {}",
        current.wind_kph,
        current.humidity_pct,
        snapshot.sunrise().unwrap_or("-"),
    );

    let upcoming = snapshot.upcoming_days();
    let _ = writeln!(out, "\nNext {} Days", upcoming.len());
    for (i, day) in upcoming.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<10} {}  {}°C",
            day_label(i, day),
            icon_for(&day.condition),
            day.avg_temperature_c
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{place, snapshot};

    fn loaded(snapshot: ForecastSnapshot) -> ViewState {
        ViewState { snapshot: Some(snapshot), ..ViewState::default() }
    }

    #[test]
    fn loading_hides_everything_else() {
        let view = ViewState {
            loading: true,
            places: vec![place("Paris", "France")],
            snapshot: Some(snapshot("Paris", "France", 3)),
            ..ViewState::default()
        };

        assert_eq!(render(&view), "Loading...\n");
    }

    #[test]
    fn empty_view_shows_placeholder() {
        assert_eq!(render(&ViewState::default()), "No forecast to show.\n");
    }

    #[test]
    fn snapshot_layout() {
        let out = render(&loaded(snapshot("Da Nang", "Vietnam", 7)));

        assert!(out.starts_with("Da Nang, Vietnam\n☀️  24.5°C\nSunny\n"));
        assert!(out.contains("wind 11.2 km   humidity 60 %   sunrise 05:10 AM"));
        assert!(out.contains("Next 6 Days"));
        // 2024-06-03 is a Monday; day index 1 is "Tomorrow", index 2 a Wednesday.
        assert!(out.contains("  Tomorrow   ⛅  21°C"));
        assert!(out.contains("  Wednesday  🌧️  22°C"));
        assert!(!out.contains("Monday"));
    }

    #[test]
    fn day_rows_match_requested_days_minus_one() {
        let out = render(&loaded(snapshot("Oslo", "Norway", 3)));
        let rows = out.lines().skip_while(|l| !l.starts_with("Next")).skip(1).count();

        assert_eq!(rows, 2);
    }

    #[test]
    fn long_names_break_title() {
        let snap = snapshot("Llanfairpwllgwyngyll", "United Kingdom", 2);
        assert_eq!(title(&snap), "Llanfairpwllgwyngyll,\nUnited Kingdom");

        let snap = snapshot("Hue", "Vietnam", 2);
        assert_eq!(title(&snap), "Hue, Vietnam");
    }

    #[test]
    fn search_results_are_numbered() {
        let view = ViewState {
            places: vec![place("London", "United Kingdom"), place("London", "Canada")],
            ..ViewState::default()
        };
        let out = render(&view);

        assert!(out.contains("  1. London, United Kingdom\n"));
        assert!(out.contains("  2. London, Canada\n"));
        assert!(out.ends_with("No forecast to show.\n"));
    }
}
