//! Day/season derivation from the accumulated spin counter.

pub const SEASONS: [&str; 6] = [
    "Nightfall",
    "Long Night",
    "Nightspring",
    "Dayspring",
    "Long Day",
    "Dayfall",
];

/// Which half of the season a day falls in. Each season splits into a "Low"
/// and a "High" civic month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonHalf {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    /// Day of the year, 1-based.
    pub day_of_year: u32,
    pub season_index: usize,
    pub half: SeasonHalf,
    /// Day within the civic month, 1-based.
    pub month_day: u32,
}

impl CalendarDate {
    /// Derive the calendar date from completed spins. The year divides into
    /// 6 seasons of `year_days/6` days, each split into two civic months.
    pub fn from_spins(full_spins: u64, year_days: u32) -> Self {
        let day = (full_spins % year_days as u64) as u32 + 1;
        let season_len = (year_days / 6).max(1);
        let month_len = (year_days / 12).max(1);
        let season_index = (((day - 1) / season_len) as usize).min(SEASONS.len() - 1);
        let half = if (day - 1) % season_len < month_len {
            SeasonHalf::Low
        } else {
            SeasonHalf::High
        };
        Self {
            day_of_year: day,
            season_index,
            half,
            month_day: (day - 1) % month_len + 1,
        }
    }

    pub fn season(&self) -> &'static str {
        SEASONS[self.season_index]
    }

    /// "Low Nightfall", "High Dayspring", ...
    pub fn civic_month(&self) -> String {
        let half = match self.half {
            SeasonHalf::Low => "Low",
            SeasonHalf::High => "High",
        };
        format!("{half} {}", self.season())
    }

    /// The multi-line status string shown by the UI collaborator.
    pub fn display(&self) -> String {
        format!(
            "Day of Halferth Year: {}\nSeason: {}\nDate: Day {} of {}",
            self.day_of_year,
            self.season(),
            self.month_day,
            self.civic_month()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_starts_in_low_nightfall() {
        let d = CalendarDate::from_spins(0, 420);
        assert_eq!(d.day_of_year, 1);
        assert_eq!(d.season(), "Nightfall");
        assert_eq!(d.half, SeasonHalf::Low);
        assert_eq!(d.month_day, 1);
    }

    #[test]
    fn season_boundaries() {
        // Day 70 is still the last day of Nightfall; day 71 opens Long Night.
        assert_eq!(CalendarDate::from_spins(69, 420).season(), "Nightfall");
        assert_eq!(CalendarDate::from_spins(69, 420).half, SeasonHalf::High);
        assert_eq!(CalendarDate::from_spins(70, 420).season(), "Long Night");
        assert_eq!(CalendarDate::from_spins(70, 420).half, SeasonHalf::Low);
    }

    #[test]
    fn month_day_cycles_every_35_days() {
        let d = CalendarDate::from_spins(35, 420);
        assert_eq!(d.day_of_year, 36);
        assert_eq!(d.month_day, 1);
        assert_eq!(d.half, SeasonHalf::High);
        assert_eq!(d.civic_month(), "High Nightfall");
    }

    #[test]
    fn year_wraps() {
        let d = CalendarDate::from_spins(420, 420);
        assert_eq!(d.day_of_year, 1);
        assert_eq!(d.season(), "Nightfall");
        // Many years in, the derivation still lands on a valid day.
        let d = CalendarDate::from_spins(420 * 1000 + 419, 420);
        assert_eq!(d.day_of_year, 420);
        assert_eq!(d.season(), "Dayfall");
        assert_eq!(d.half, SeasonHalf::High);
    }

    #[test]
    fn display_mentions_the_civic_month() {
        let d = CalendarDate::from_spins(100, 420);
        let s = d.display();
        assert!(s.contains("Day of Halferth Year: 101"));
        assert!(s.contains("Long Night"));
    }
}
