//! Fixed seven-slot container keyed by weekday.

use std::ops::{Index, IndexMut};

use chrono::Weekday;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Monday-first iteration order used everywhere a week is walked.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Exactly one `T` per weekday. There is no way to build a `Week` with a
/// missing day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Week<T>([T; 7]);

/// Rendered text per weekday for one poll cycle. Empty string means nothing
/// is scheduled that day.
pub type WeekSnapshot = Week<String>;

impl<T> Week<T> {
    /// Build a week by calling `f` once per day, Monday first.
    pub fn from_fn(mut f: impl FnMut(Weekday) -> T) -> Self {
        Week(std::array::from_fn(|i| f(WEEKDAYS[i])))
    }

    pub fn get(&self, day: Weekday) -> &T {
        &self.0[day.num_days_from_monday() as usize]
    }

    pub fn get_mut(&mut self, day: Weekday) -> &mut T {
        &mut self.0[day.num_days_from_monday() as usize]
    }

    /// Iterate `(weekday, value)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &T)> {
        WEEKDAYS.iter().copied().zip(self.0.iter())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }

    pub fn map<U>(&self, mut f: impl FnMut(Weekday, &T) -> U) -> Week<U> {
        Week::from_fn(|day| f(day, self.get(day)))
    }
}

impl<T> Index<Weekday> for Week<T> {
    type Output = T;

    fn index(&self, day: Weekday) -> &T {
        self.get(day)
    }
}

impl<T> IndexMut<Weekday> for Week<T> {
    fn index_mut(&mut self, day: Weekday) -> &mut T {
        self.get_mut(day)
    }
}

/// Short lowercase key for a weekday, as used in config files and logs.
pub fn day_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

impl Week<String> {
    /// English day names, the label set used when none is configured.
    pub fn english_labels() -> Self {
        Week::from_fn(|day| {
            let name = match day {
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
                Weekday::Sun => "Sunday",
            };
            name.to_string()
        })
    }
}

impl<T: Serialize> Serialize for Week<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (day, value) in self.iter() {
            map.serialize_entry(day_key(day), value)?;
        }
        map.end()
    }
}
