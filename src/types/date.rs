// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::Days;
use chrono::Local;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::TimeZone;
use chrono::Utc;

use crate::types::timestamp::Timestamp;

/// A calendar date in the user's local timezone.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn plus_days(self, days: u64) -> Self {
        // Overflow only happens at the end of chrono's calendar.
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(self.0))
    }

    /// The last second of this date, local time.
    pub fn end_of_day(self) -> Timestamp {
        let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        let naive = self.0.and_time(time);
        let ts = match Local.from_local_datetime(&naive).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&naive),
        };
        Timestamp::new(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_day_is_same_local_date() {
        let date = Date::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(date.end_of_day().local_date(), date);
    }

    #[test]
    fn test_end_of_day_ordering() {
        let date = Date::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert!(date.end_of_day() < date.plus_days(1).end_of_day());
    }

    #[test]
    fn test_plus_days() {
        let date = Date::new(NaiveDate::from_ymd_opt(2025, 12, 30).unwrap());
        assert_eq!(
            date.plus_days(7),
            Date::new(NaiveDate::from_ymd_opt(2026, 1, 6).unwrap())
        );
    }
}
