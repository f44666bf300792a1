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

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use chrono::{Datelike, NaiveDate};
use serde::{Serialize,Deserialize};

use nclim_common::datetime::{first_day_of_month, last_day_of_month};
use crate::constants::Frequency;
use crate::errors::{ParseYearMonthError, Result, invalid_constraint, out_of_range};

/// a calendar month, ordered numerically (189501 < 189502 < 189601)
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32
}

impl YearMonth {
    pub fn new (year: i32, month: u32) -> Option<YearMonth> {
        if (1..=12).contains(&month) { Some( YearMonth{year,month}) } else { None }
    }

    pub fn from_date (date: &NaiveDate) -> YearMonth {
        YearMonth { year: date.year(), month: date.month() }
    }

    pub fn first_day (&self) -> Option<NaiveDate> {
        first_day_of_month(self.year, self.month)
    }

    pub fn last_day (&self) -> Option<NaiveDate> {
        last_day_of_month(self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    /// accepts "YYYYMM" and "YYYY-MM"
    fn from_str (s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseYearMonthError(s.to_string());
        let digits: String = s.trim().chars().filter(|c| *c != '-').collect();
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_digit()) { return Err(err()) }

        let year: i32 = digits[0..4].parse().map_err(|_| err())?;
        let month: u32 = digits[4..6].parse().map_err(|_| err())?;
        YearMonth::new(year, month).ok_or_else(err)
    }
}

/// the key that identifies a time step within its source
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub enum StepKey {
    /// 1-based offset into the time axis of a daily source
    Day(u32),
    Month(YearMonth)
}

/// one time step to materialize
#[derive(Debug,Clone,PartialEq)]
pub struct TimeStep {
    pub key: StepKey,
    /// 1-based raster band index of this time step in the source
    pub band: usize,
    pub date: NaiveDate,
}

impl TimeStep {
    /// the date part of the COG file names for this step (YYYYMMDD for days, YYYYMM for months)
    pub fn date_digits (&self) -> String {
        match self.key {
            StepKey::Day(_) => self.date.format("%Y%m%d").to_string(),
            StepKey::Month(ym) => ym.to_string()
        }
    }
}

/// restrictions on which time steps get materialized. All ranges are inclusive
#[derive(Debug,Clone,Default,PartialEq)]
pub struct StepConstraints {
    /// only the last time step, ignoring any range
    pub latest_only: bool,
    pub day_range: Option<(u32,u32)>,
    pub month_range: Option<(YearMonth,YearMonth)>,
}

impl StepConstraints {
    pub fn latest () -> Self {
        StepConstraints { latest_only: true, ..Default::default() }
    }

    pub fn days (first: u32, last: u32) -> Self {
        StepConstraints { day_range: Some((first,last)), ..Default::default() }
    }

    pub fn months (first: YearMonth, last: YearMonth) -> Self {
        StepConstraints { month_range: Some((first,last)), ..Default::default() }
    }
}

/// enumerate the time steps of a source with the given time axis (one date per band), in
/// ascending order and without duplicates
pub fn enumerate_steps (frequency: Frequency, axis: &[NaiveDate], constraints: &StepConstraints) -> Result<Vec<TimeStep>> {
    if axis.is_empty() {
        return Err( out_of_range("source has no time steps"))
    }

    let mut steps = match frequency {
        Frequency::Daily => day_steps(axis),
        Frequency::Monthly => month_steps(axis)
    };

    if constraints.latest_only {
        // steps are sorted and non-empty at this point, ranges don't matter
        return Ok( steps.split_off( steps.len()-1))
    }

    match frequency {
        Frequency::Daily if constraints.month_range.is_some() => {
            return Err( invalid_constraint("month range given for daily source"))
        }
        Frequency::Monthly if constraints.day_range.is_some() => {
            return Err( invalid_constraint("day range given for monthly source"))
        }
        _ => {}
    }

    if let Some((first,last)) = constraints.day_range {
        steps.retain(|s| matches!( s.key, StepKey::Day(d) if d >= first && d <= last));
        if steps.is_empty() {
            return Err( out_of_range( format!("no days in range {first}..={last} (source has {} days)", axis.len())))
        }
    }

    if let Some((first,last)) = constraints.month_range {
        steps.retain(|s| matches!( s.key, StepKey::Month(ym) if ym >= first && ym <= last));
        if steps.is_empty() {
            return Err( out_of_range( format!("no months in range {first}..={last}")))
        }
    }

    Ok(steps)
}

fn day_steps (axis: &[NaiveDate]) -> Vec<TimeStep> {
    axis.iter().enumerate().map(|(i,date)| {
        TimeStep { key: StepKey::Day( (i+1) as u32), band: i+1, date: *date }
    }).collect()
}

fn month_steps (axis: &[NaiveDate]) -> Vec<TimeStep> {
    let mut months: BTreeMap<YearMonth,TimeStep> = BTreeMap::new();
    for (i,date) in axis.iter().enumerate() {
        let ym = YearMonth::from_date(date);
        months.entry(ym).or_insert_with(|| TimeStep { key: StepKey::Month(ym), band: i+1, date: *date });
    }
    months.into_values().collect()
}
