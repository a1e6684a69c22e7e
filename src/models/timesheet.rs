use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard limit on the number of day rows; a full month fits on one page.
pub const MAX_DAYS: usize = 31;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TimesheetDocument {
    pub name: String,
    pub month: String,
    pub days: Vec<DayEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DayEntry {
    pub date: String,
    #[serde(default)]
    pub is_weekend: bool,
    /// Older payloads classify days with a `kind` string instead of the flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub ranges: Vec<TimeRange>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TimeRange {
    pub begin: TimeOfDay,
    pub end: TimeOfDay,
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
}

impl TimeOfDay {
    pub fn new(hours: u8, minutes: u8) -> Self {
        Self { hours, minutes }
    }

    /// Zero-padded clock label, e.g. `{9, 5}` becomes "09:05".
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hours, self.minutes)
    }

    /// Fractional hours since midnight, the unit of the planning axis.
    pub fn as_hours(&self) -> f32 {
        f32::from(self.hours) + f32::from(self.minutes) / 60.0
    }

    fn validate(&self) -> Result<(), String> {
        if self.hours > 23 {
            return Err(format!("Invalid time of day: hours {} out of range", self.hours));
        }
        if self.minutes > 59 {
            return Err(format!(
                "Invalid time of day: minutes {} out of range",
                self.minutes
            ));
        }
        Ok(())
    }
}

impl TimeRange {
    /// Label drawn inside the range block, e.g. "09:00 - 12:30".
    pub fn label(&self) -> String {
        format!("{} - {}", self.begin.label(), self.end.label())
    }

    fn validate(&self) -> Result<(), String> {
        self.begin.validate()?;
        self.end.validate()?;
        if self.end.as_hours() <= self.begin.as_hours() {
            return Err(format!(
                "Range {} must end after it begins",
                self.label()
            ));
        }
        if self.code.is_empty() {
            return Err(format!("Range {} is missing its activity code", self.label()));
        }
        Ok(())
    }
}

impl DayEntry {
    /// Weekend classification, honoring both the flag and the legacy `kind`.
    pub fn weekend(&self) -> bool {
        self.is_weekend || self.kind.as_deref() == Some("weekend")
    }

    fn validate(&self, index: usize) -> Result<(), String> {
        if self.date.is_empty() {
            return Err(format!("Day #{} is missing its date label", index + 1));
        }
        for range in &self.ranges {
            range
                .validate()
                .map_err(|e| format!("Day {}: {}", self.date, e))?;
        }
        Ok(())
    }
}

impl TimesheetDocument {
    /// Check the document shape before anything is drawn.
    ///
    /// Every problem surfaces as a descriptive error instead of a crash
    /// halfway through the page.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Employee name is missing".to_string());
        }
        if self.month.is_empty() {
            return Err("Month label is missing".to_string());
        }
        if self.days.len() > MAX_DAYS {
            return Err(format!("Exceeds max day count {}", MAX_DAYS));
        }
        for (i, day) in self.days.iter().enumerate() {
            day.validate(i)?;
        }
        Ok(())
    }

    /// Parse and validate a document from its JSON wire shape.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let doc: TimesheetDocument =
            serde_json::from_str(json).map_err(|e| format!("Invalid timesheet JSON: {}", e))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Scaffold a whole calendar month: one empty entry per day, weekend
    /// flags derived from the weekday, labels formatted from the date.
    pub fn for_month(name: &str, year: i32, month: u32) -> Result<Self, String> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| format!("Invalid month {}-{:02}", year, month))?;

        let mut days = Vec::new();
        let mut current = first;
        while current.month() == month {
            let weekday = current.weekday();
            days.push(DayEntry {
                date: current.format("%a %d").to_string(),
                is_weekend: weekday == Weekday::Sat || weekday == Weekday::Sun,
                kind: None,
                ranges: Vec::new(),
            });
            current = match current.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(TimesheetDocument {
            name: name.to_string(),
            month: first.format("%B %Y").to_string(),
            days,
        })
    }
}

impl fmt::Display for TimesheetDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timesheet:")?;
        writeln!(f, "  Name: {}", self.name)?;
        writeln!(f, "  Month: {}", self.month)?;
        writeln!(f, "  Days: {}", self.days.len())?;

        for day in &self.days {
            writeln!(
                f,
                "  {} {}",
                day.date,
                if day.weekend() { "(weekend)" } else { "" }
            )?;
            for range in &day.ranges {
                writeln!(f, "    {} [{}]", range.label(), range.code)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(begin: (u8, u8), end: (u8, u8), code: &str) -> TimeRange {
        TimeRange {
            begin: TimeOfDay::new(begin.0, begin.1),
            end: TimeOfDay::new(end.0, end.1),
            code: code.to_string(),
        }
    }

    #[test]
    fn time_labels_are_zero_padded() {
        assert_eq!(TimeOfDay::new(9, 5).label(), "09:05");
        assert_eq!(TimeOfDay::new(23, 0).label(), "23:00");
    }

    #[test]
    fn range_label_joins_both_ends() {
        assert_eq!(range((9, 0), (12, 30), "N").label(), "09:00 - 12:30");
    }

    #[test]
    fn weekend_honors_flag_and_kind() {
        let mut day = DayEntry {
            date: "Sat 06".to_string(),
            is_weekend: false,
            kind: None,
            ranges: Vec::new(),
        };
        assert!(!day.weekend());

        day.is_weekend = true;
        assert!(day.weekend());

        day.is_weekend = false;
        day.kind = Some("weekend".to_string());
        assert!(day.weekend());
    }

    #[test]
    fn validate_rejects_out_of_range_times() {
        let doc = TimesheetDocument {
            name: "Jo Doe".to_string(),
            month: "April 2024".to_string(),
            days: vec![DayEntry {
                date: "Mon 01".to_string(),
                is_weekend: false,
                kind: None,
                ranges: vec![range((24, 0), (25, 0), "N")],
            }],
        };
        let err = doc.validate().unwrap_err();
        assert!(err.contains("hours 24 out of range"), "{}", err);
    }

    #[test]
    fn validate_rejects_reversed_ranges() {
        let doc = TimesheetDocument {
            name: "Jo Doe".to_string(),
            month: "April 2024".to_string(),
            days: vec![DayEntry {
                date: "Mon 01".to_string(),
                is_weekend: false,
                kind: None,
                ranges: vec![range((12, 0), (9, 0), "N")],
            }],
        };
        let err = doc.validate().unwrap_err();
        assert!(err.contains("must end after it begins"), "{}", err);
        assert!(err.contains("Day Mon 01"), "{}", err);
    }

    #[test]
    fn validate_rejects_missing_header_fields() {
        let doc = TimesheetDocument {
            name: String::new(),
            month: "April 2024".to_string(),
            days: Vec::new(),
        };
        assert_eq!(doc.validate().unwrap_err(), "Employee name is missing");
    }

    #[test]
    fn validate_caps_day_count() {
        let doc = TimesheetDocument {
            name: "Jo Doe".to_string(),
            month: "April 2024".to_string(),
            days: (0..32)
                .map(|i| DayEntry {
                    date: format!("Day {}", i + 1),
                    is_weekend: false,
                    kind: None,
                    ranges: Vec::new(),
                })
                .collect(),
        };
        assert_eq!(doc.validate().unwrap_err(), "Exceeds max day count 31");
    }

    #[test]
    fn from_json_accepts_the_wire_shape() {
        let json = r#"{
            "name": "Jo Doe",
            "month": "April 2024",
            "days": [
                { "date": "Mon 01",
                  "ranges": [
                    { "begin": { "hours": 9, "minutes": 0 },
                      "end": { "hours": 12, "minutes": 0 },
                      "code": "N" }
                  ] },
                { "date": "Sat 06", "is_weekend": true },
                { "date": "Sun 07", "kind": "weekend" }
            ]
        }"#;

        let doc = TimesheetDocument::from_json(json).unwrap();
        assert_eq!(doc.days.len(), 3);
        assert_eq!(doc.days[0].ranges.len(), 1);
        assert!(!doc.days[0].weekend());
        assert!(doc.days[1].weekend());
        assert!(doc.days[2].weekend());
    }

    #[test]
    fn from_json_reports_malformed_input() {
        let err = TimesheetDocument::from_json("{ not json").unwrap_err();
        assert!(err.starts_with("Invalid timesheet JSON"), "{}", err);
    }

    #[test]
    fn for_month_scaffolds_the_calendar() {
        let doc = TimesheetDocument::for_month("Jo Doe", 2024, 4).unwrap();
        assert_eq!(doc.month, "April 2024");
        assert_eq!(doc.days.len(), 30);
        // April 2024 starts on a Monday; the first weekend is the 6th/7th.
        assert!(!doc.days[0].weekend());
        assert!(doc.days[5].weekend());
        assert!(doc.days[6].weekend());
        assert_eq!(doc.days[5].date, "Sat 06");
        assert!(doc.days.iter().all(|d| d.ranges.is_empty()));
    }

    #[test]
    fn for_month_rejects_bad_months() {
        let err = TimesheetDocument::for_month("Jo Doe", 2024, 13).unwrap_err();
        assert_eq!(err, "Invalid month 2024-13");
    }
}
