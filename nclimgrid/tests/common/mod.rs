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

#![allow(unused)]

use std::cell::RefCell;
use std::path::Path;
use chrono::NaiveDate;
use nclimgrid::{BoundingBox, RasterFootprint};
use nclimgrid::cog::RasterSource;
use nclimgrid::constants::Variable;
use nclimgrid::errors::{Result, op_failed};

/// a RasterSource that serves a fixed time axis and writes empty COG files
pub struct FakeSource {
    pub axis: Vec<NaiveDate>,
    pub axis_reads: RefCell<Vec<String>>,
    pub extractions: RefCell<Vec<(String,Variable,usize)>>,
}

impl FakeSource {
    pub fn new (axis: Vec<NaiveDate>) -> Self {
        FakeSource { axis, axis_reads: RefCell::new(Vec::new()), extractions: RefCell::new(Vec::new()) }
    }
}

impl RasterSource for FakeSource {
    fn time_axis (&self, href: &str, var: Variable) -> Result<Vec<NaiveDate>> {
        self.axis_reads.borrow_mut().push( href.to_string());
        Ok( self.axis.clone() )
    }

    fn extract_cog (&self, href: &str, var: Variable, band: usize, cog_path: &Path) -> Result<()> {
        if band < 1 || band > self.axis.len() {
            return Err( op_failed( format!("no band {band}")))
        }
        std::fs::write( cog_path, b"")?;
        self.extractions.borrow_mut().push( (href.to_string(), var, band));
        Ok(())
    }

    fn footprint (&self, href: &str) -> Result<RasterFootprint> {
        let bbox = BoundingBox::new( -124.708333, 24.541666, -66.999995, 49.375001);
        Ok( RasterFootprint {
            epsg: Some(4326),
            shape: [596, 1385],
            transform: [-124.708333, 0.041666666, 0.0, 49.375001, 0.0, -0.041666666],
            native_bbox: bbox,
            geo_bbox: bbox,
        })
    }
}

pub fn date (y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// all days of the given month
pub fn daily_axis (year: i32, month: u32) -> Vec<NaiveDate> {
    let first = date(year, month, 1);
    first.iter_days().take_while(|d| chrono::Datelike::month(d) == month).collect()
}

/// first days of `n` consecutive months
pub fn monthly_axis (year: i32, month: u32, n: usize) -> Vec<NaiveDate> {
    (0..n).map(|i| {
        let m0 = (month - 1) as usize + i;
        date( year + (m0 / 12) as i32, (m0 % 12) as u32 + 1, 1)
    }).collect()
}
