/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// this should be used wherever we need the wall clock time of record creation
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// UTC date with the given time of day, None if any of the components is out of range
pub fn utc_datetime (year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).single()
}

/// number of days in given month, taking leap years into account
pub fn days_in_month (year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year+1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month+1, 1)?
    };
    Some( (next - first).num_days() as u32)
}

pub fn first_day_of_month (year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_day_of_month (year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)
}

/// median of the day differences between consecutive dates. Returns None for less than two dates
pub fn median_day_spacing (dates: &[NaiveDate]) -> Option<i64> {
    if dates.len() < 2 { return None }

    let mut diffs: Vec<i64> = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).collect();
    diffs.sort_unstable();
    Some( diffs[diffs.len()/2] )
}

/* #region CF time coordinates ***********************************************************************/

lazy_static! {
    // e.g. "days since 1800-01-01 00:00:00" or "hours since 1900-1-1T00:00"
    static ref CF_UNITS_RE: Regex = Regex::new(
        r"^\s*(days?|hours?|minutes?|seconds?)\s+since\s+(-?\d{1,4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(?:\.\d*)?)?"
    ).unwrap();
}

/// time units of a CF convention time coordinate variable (`<unit> since <epoch>`)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CfTimeUnits {
    pub secs_per_unit: f64,
    pub epoch: NaiveDateTime
}

impl CfTimeUnits {
    pub fn parse (units: &str) -> Option<CfTimeUnits> {
        let caps = CF_UNITS_RE.captures(units)?;

        let secs_per_unit = match &caps[1] {
            "day" | "days" => 86_400.0,
            "hour" | "hours" => 3_600.0,
            "minute" | "minutes" => 60.0,
            _ => 1.0
        };

        let year: i32 = caps[2].parse().ok()?;
        let month: u32 = caps[3].parse().ok()?;
        let day: u32 = caps[4].parse().ok()?;
        let hour: u32 = caps.get(5).map_or( Some(0), |m| m.as_str().parse().ok())?;
        let min: u32 = caps.get(6).map_or( Some(0), |m| m.as_str().parse().ok())?;
        let sec: u32 = caps.get(7).map_or( Some(0), |m| m.as_str().parse().ok())?;

        let epoch = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)?;
        Some( CfTimeUnits { secs_per_unit, epoch })
    }

    /// the datetime for a given coordinate value
    pub fn to_datetime (&self, value: f64) -> Option<NaiveDateTime> {
        if !value.is_finite() { return None }
        let millis = (value * self.secs_per_unit * 1000.0).round() as i64;
        self.epoch.checked_add_signed( TimeDelta::try_milliseconds(millis)?)
    }

    pub fn to_date (&self, value: f64) -> Option<NaiveDate> {
        self.to_datetime(value).map(|dt| dt.date())
    }
}

/* #endregion CF time coordinates */
