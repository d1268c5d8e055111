//! Text rendering of merged days.
//!
//! The output is compared byte for byte between poll cycles, so any change
//! here shows up as every non-empty day having changed on the next run.

use crate::models::{MergedDay, Occurrence};
use crate::week::{Week, WeekSnapshot};

const SPACER: &str = "-------------------------";
const TIME_FORMAT: &str = "%H:%M";

impl MergedDay {
    /// Render the day as a message. A day without activities renders to an
    /// empty string, which callers use to mean "nothing to publish".
    pub fn render(&self) -> String {
        if self.activities.is_empty() {
            return String::new();
        }

        let mut output = format!("{SPACER}\n\n**{}:**\n\n", self.label);

        for activity in &self.activities {
            output.push_str(&format!("--- **{}** ---\n", activity.name));

            for info in &activity.infos {
                output.push_str(&info.label);
                output.push('\n');

                for occurrence in &info.occurrences {
                    output.push_str(&render_occurrence(occurrence));
                    output.push('\n');
                }
            }

            output.push('\n');
        }
        output.push_str(SPACER);

        output
    }
}

fn render_occurrence(occurrence: &Occurrence) -> String {
    format!(
        "**{}** - {}",
        occurrence.start.format(TIME_FORMAT),
        occurrence.end.format(TIME_FORMAT)
    )
}

/// Render all seven days.
pub fn render_week(days: &Week<MergedDay>) -> WeekSnapshot {
    days.map(|_, day| day.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MergedActivity, MergedInfo};
    use chrono::{DateTime, Weekday};

    fn occurrence(start: &str, end: &str) -> Occurrence {
        Occurrence {
            start: DateTime::parse_from_rfc3339(start).unwrap(),
            end: DateTime::parse_from_rfc3339(end).unwrap(),
        }
    }

    fn math_monday() -> MergedDay {
        MergedDay {
            label: "Monday".to_string(),
            activities: vec![MergedActivity {
                name: "Math".to_string(),
                infos: vec![
                    MergedInfo {
                        label: "Lecture".to_string(),
                        occurrences: vec![
                            occurrence("2024-03-04T09:00:00+01:00", "2024-03-04T10:00:00+01:00"),
                            occurrence("2024-03-04T14:00:00+01:00", "2024-03-04T15:30:00+01:00"),
                        ],
                    },
                    MergedInfo {
                        label: "Lab".to_string(),
                        occurrences: vec![occurrence(
                            "2024-03-04T11:00:00+01:00",
                            "2024-03-04T12:00:00+01:00",
                        )],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_empty_day_renders_empty_string() {
        let day = MergedDay {
            label: "Friday".to_string(),
            activities: Vec::new(),
        };
        assert_eq!(day.render(), "");
    }

    #[test]
    fn test_render_layout() {
        let expected = "-------------------------\n\
                        \n\
                        **Monday:**\n\
                        \n\
                        --- **Math** ---\n\
                        Lecture\n\
                        **09:00** - 10:00\n\
                        **14:00** - 15:30\n\
                        Lab\n\
                        **11:00** - 12:00\n\
                        \n\
                        -------------------------";
        assert_eq!(math_monday().render(), expected);
    }

    #[test]
    fn test_times_use_event_offset() {
        let rendered = math_monday().render();
        // 09:00+01:00 must not be shown as 08:00 UTC
        assert!(rendered.contains("**09:00** - 10:00"));
        assert!(!rendered.contains("08:00"));
    }

    #[test]
    fn test_render_week_keeps_empty_days() {
        let mut days: Week<MergedDay> = Week::default();
        days[Weekday::Mon] = math_monday();

        let snapshot = render_week(&days);
        assert!(snapshot[Weekday::Mon].starts_with(SPACER));
        assert_eq!(snapshot.iter().filter(|(_, s)| s.is_empty()).count(), 6);
    }
}
