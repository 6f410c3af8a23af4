use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A searchable city/region, as returned by the lookup endpoint.
///
/// The forecast endpoint describes its location with the same fields minus
/// `id` and `url`, so those two are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Option<u64>,
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub avg_temperature_c: f64,
    pub condition: String,
    /// Local sunrise as the provider formats it, e.g. `05:21 AM`.
    pub sunrise: String,
}

/// Current conditions plus the daily outlook for one place.
///
/// Each fetch produces a whole new snapshot; nothing is merged between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub place: Place,
    pub current: CurrentConditions,
    /// In provider order; the first entry is today.
    pub days: Vec<DailyEntry>,
}

impl ForecastSnapshot {
    /// Days after today, in provider order.
    pub fn upcoming_days(&self) -> &[DailyEntry] {
        self.days.get(1..).unwrap_or_default()
    }

    /// Today's sunrise, if the provider sent any days at all.
    pub fn sunrise(&self) -> Option<&str> {
        self.days.first().map(|day| day.sunrise.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::snapshot;

    #[test]
    fn upcoming_days_skips_today() {
        let snap = snapshot("Da Nang", "Vietnam", 7);

        let upcoming = snap.upcoming_days();
        assert_eq!(upcoming.len(), 6);
        assert_eq!(upcoming[0].date, snap.days[1].date);
    }

    #[test]
    fn upcoming_days_empty_when_no_days() {
        let snap = snapshot("Da Nang", "Vietnam", 0);

        assert!(snap.upcoming_days().is_empty());
        assert_eq!(snap.sunrise(), None);
    }

    #[test]
    fn sunrise_comes_from_today() {
        let snap = snapshot("Da Nang", "Vietnam", 3);
        assert_eq!(snap.sunrise(), Some(snap.days[0].sunrise.as_str()));
    }
}
