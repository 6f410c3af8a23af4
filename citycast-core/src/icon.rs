/// Glyph used when a condition has no dedicated icon.
pub const FALLBACK_ICON: &str = "🌡️";

/// Icon for a WeatherAPI condition text such as `"Partly cloudy"`.
pub fn icon_for(condition: &str) -> &'static str {
    match condition.trim().to_lowercase().as_str() {
        "sunny" | "clear" => "☀️",
        "partly cloudy" => "⛅",
        "cloudy" | "overcast" => "☁️",
        "mist" | "fog" | "freezing fog" => "🌫️",
        "patchy rain possible" | "patchy rain nearby" | "patchy light rain" | "light rain"
        | "light drizzle" | "patchy light drizzle" | "light rain shower" => "🌦️",
        "moderate rain" | "moderate rain at times" | "heavy rain" | "heavy rain at times"
        | "moderate or heavy rain shower" | "torrential rain shower"
        | "moderate or heavy freezing rain" => "🌧️",
        "thundery outbreaks possible"
        | "thundery outbreaks in nearby"
        | "patchy light rain with thunder"
        | "moderate or heavy rain with thunder" => "⛈️",
        "patchy snow possible" | "light snow" | "moderate snow" | "heavy snow" | "blizzard"
        | "blowing snow" => "🌨️",
        _ => FALLBACK_ICON,
    }
}
