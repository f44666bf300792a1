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
use std::str::FromStr;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use nclim_common::{datetime::median_day_spacing, fs::{href_filename, replace_href_filename}};
use crate::constants::{Frequency, Variable};
use crate::errors::{Result, malformed_identifier, op_failed, unrecognized_format};

/// per-variable hrefs (either netCDF sources or COGs)
pub type VarHrefs = BTreeMap<Variable,String>;

lazy_static! {
    static ref MONTHLY_SOURCE_RE: Regex = Regex::new(r"^nclimgrid_(prcp|tavg|tmax|tmin)\.\w+$").unwrap();
    static ref DAILY_SOURCE_RE: Regex = Regex::new(r"^(prcp|tavg|tmax|tmin|ncdd)-(\d{6})-grd-(prelim|scaled)\.\w+$").unwrap();
    static ref COG_RE: Regex = Regex::new(r"^nclimgrid-(prcp|tavg|tmax|tmin)-(\d*)\.tiff?$").unwrap();
}

/// what we can tell about a netCDF source from its file name
#[derive(Debug,Clone,PartialEq)]
pub enum SourceName {
    /// `nclimgrid_<var>.nc`, one file per variable holding the whole period of record
    Monthly { var: Variable },
    /// `<var>-<YYYYMM>-grd-prelim.nc`, one file per variable and month
    DailyPrelim { var: Variable, year_month: String },
    /// `ncdd-<YYYYMM>-grd-scaled.nc`, all variables of a month in one file
    DailyScaled { year_month: String },
}

impl SourceName {
    pub fn parse (href: &str) -> Option<SourceName> {
        let name = href_filename(href)?;

        if let Some(caps) = MONTHLY_SOURCE_RE.captures(name) {
            let var = Variable::from_str(&caps[1]).ok()?;
            Some( SourceName::Monthly{var})

        } else if let Some(caps) = DAILY_SOURCE_RE.captures(name) {
            let year_month = caps[2].to_string();
            match (&caps[1], &caps[3]) {
                ("ncdd", "scaled") => Some( SourceName::DailyScaled{year_month}),
                (v, "prelim") if v != "ncdd" => Some( SourceName::DailyPrelim{ var: Variable::from_str(v).ok()?, year_month }),
                _ => None
            }
        } else {
            None
        }
    }

    pub fn frequency (&self) -> Frequency {
        match self {
            SourceName::Monthly{..} => Frequency::Monthly,
            _ => Frequency::Daily
        }
    }

    fn filename_for (&self, var: Variable) -> String {
        match self {
            SourceName::Monthly{..} => format!("nclimgrid_{}.nc", var),
            SourceName::DailyPrelim{year_month,..} => format!("{}-{}-grd-prelim.nc", var, year_month),
            SourceName::DailyScaled{year_month} => format!("ncdd-{}-grd-scaled.nc", year_month),
        }
    }
}

/// the parsed file name of a generated COG: `nclimgrid-<var>-<YYYYMM|YYYYMMDD>.tif`
#[derive(Debug,Clone,PartialEq)]
pub struct CogName {
    pub var: Variable,
    pub frequency: Frequency,
    /// the trailing date digits (YYYYMM for monthly, YYYYMMDD for daily)
    pub digits: String,
    /// first calendar day covered by the COG
    pub date: NaiveDate,
}

impl CogName {
    /// parse a COG href. Note that we only get an error if the name looks like a COG we generated
    /// but does not have valid date digits, otherwise this returns `Ok(None)`
    pub fn parse (href: &str) -> Result<Option<CogName>> {
        let Some(name) = href_filename(href) else { return Ok(None) };
        let Some(caps) = COG_RE.captures(name) else { return Ok(None) };

        let var = Variable::from_str(&caps[1]).map_err(|_| malformed_identifier(name))?;
        let digits = caps[2].to_string();

        let (frequency, day) = match digits.len() {
            8 => (Frequency::Daily, parse_digits(&digits[6..8], name)?),
            6 => (Frequency::Monthly, 1),
            _ => return Err( malformed_identifier( format!("no YYYYMM or YYYYMMDD date in '{name}'")))
        };
        let year: i32 = parse_digits(&digits[0..4], name)?;
        let month: u32 = parse_digits(&digits[4..6], name)?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| malformed_identifier( format!("invalid date in '{name}'")))?;

        Ok( Some( CogName{ var, frequency, digits, date }) )
    }
}

fn parse_digits<T: FromStr> (s: &str, name: &str) -> Result<T> {
    s.parse::<T>().map_err(|_| malformed_identifier( format!("invalid date digits in '{name}'")))
}

/// determine the cadence of a source or COG href from its file name
pub fn detect_frequency (href: &str) -> Result<Frequency> {
    if let Some(source) = SourceName::parse(href) {
        Ok( source.frequency() )
    } else if let Some(cog) = CogName::parse(href)? {
        Ok( cog.frequency )
    } else {
        Err( unrecognized_format( format!("not a NClimGrid file name: {href}")))
    }
}

/// the hrefs of the netCDF files that hold the respective variables of the given source.
/// Directory and query parts of the input href are preserved
pub fn variable_hrefs (nc_href: &str) -> Result<VarHrefs> {
    let source = SourceName::parse(nc_href)
        .ok_or_else(|| unrecognized_format( format!("not a NClimGrid netCDF file name: {nc_href}")))?;

    Ok( Variable::ALL.iter().map(|var| (*var, replace_href_filename(nc_href, &source.filename_for(*var)))).collect() )
}

pub fn var_href<'a> (hrefs: &'a VarHrefs, var: Variable) -> Result<&'a str> {
    hrefs.get(&var).map(|s| s.as_str()).ok_or_else(|| op_failed( format!("no href for variable {var}")))
}

/// check that the time axis of a source matches the cadence we derived from its name
pub fn check_time_axis (frequency: Frequency, dates: &[NaiveDate]) -> Result<()> {
    if let Some(spacing) = median_day_spacing(dates) {
        debug!("median time step spacing: {spacing} day(s)");
        let matches = match frequency {
            Frequency::Daily => spacing == 1,
            Frequency::Monthly => (28..=31).contains(&spacing)
        };
        if !matches {
            return Err( unrecognized_format( format!("{spacing} day time step spacing does not match {} cadence", frequency.as_str())))
        }
    }
    Ok(())
}
