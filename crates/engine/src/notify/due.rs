// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Due-time normalisation (§4.7 step 2, resolved per DESIGN.md: calendar
//! arithmetic rather than the source's naive `day + 1`).

use chrono::{DateTime, NaiveTime, TimeZone, Timelike, Utc};
use wfe_core::Frequency;

const DAILY_HOUR: u32 = 20;

/// `null → now`; `hourly → next top-of-hour`; `daily → today 20:00 if
/// now.hour <= 20 else tomorrow 20:00`.
pub fn normalise(frequency: Option<Frequency>, now: DateTime<Utc>) -> DateTime<Utc> {
    match frequency {
        None => now,
        Some(Frequency::Hourly) => {
            let next_hour = now.date_naive().and_hms_opt(now.hour(), 0, 0).unwrap() + chrono::Duration::hours(1);
            Utc.from_utc_datetime(&next_hour)
        }
        Some(Frequency::Daily) => {
            let today_due = Utc.from_utc_datetime(
                &now.date_naive().and_time(NaiveTime::from_hms_opt(DAILY_HOUR, 0, 0).unwrap()),
            );
            if now.hour() <= DAILY_HOUR {
                today_due
            } else {
                Utc.from_utc_datetime(
                    &now.date_naive().succ_opt().unwrap().and_time(NaiveTime::from_hms_opt(DAILY_HOUR, 0, 0).unwrap()),
                )
            }
        }
    }
}
