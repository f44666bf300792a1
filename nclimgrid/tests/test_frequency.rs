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

mod common;
use common::*;

use nclimgrid::constants::{Frequency, Variable};
use nclimgrid::errors::NclimgridError;
use nclimgrid::frequency::*;

#[test]
fn test_detect_frequency() {
    assert_eq!( detect_frequency("data/nclimgrid_prcp.nc").unwrap(), Frequency::Monthly);
    assert_eq!( detect_frequency("https://host/monthly/nclimgrid_tmin.nc?sig=abc").unwrap(), Frequency::Monthly);
    assert_eq!( detect_frequency("/data/tavg-202201-grd-prelim.nc").unwrap(), Frequency::Daily);
    assert_eq!( detect_frequency("/data/ncdd-202201-grd-scaled.nc").unwrap(), Frequency::Daily);

    assert_eq!( detect_frequency("/cogs/nclimgrid-prcp-189501.tif").unwrap(), Frequency::Monthly);
    assert_eq!( detect_frequency("/cogs/nclimgrid-tmax-20220101.tif").unwrap(), Frequency::Daily);

    assert!( matches!( detect_frequency("/data/something.nc"), Err(NclimgridError::UnrecognizedFormat(_))));
    assert!( matches!( detect_frequency("/data/ncdd-202201-grd-prelim.nc"), Err(NclimgridError::UnrecognizedFormat(_))));
    assert!( matches!( detect_frequency("/data/nclimgrid_snow.nc"), Err(NclimgridError::UnrecognizedFormat(_))));
    assert!( matches!( detect_frequency("/cogs/nclimgrid-prcp-1895.tif"), Err(NclimgridError::MalformedIdentifier(_))));
}

#[test]
fn test_variable_hrefs() {
    let hrefs = variable_hrefs("https://host/monthly/nclimgrid_tavg.nc?sig=x").unwrap();
    assert_eq!( hrefs.len(), 4);
    assert_eq!( hrefs[&Variable::Prcp], "https://host/monthly/nclimgrid_prcp.nc?sig=x");
    assert_eq!( hrefs[&Variable::Tmin], "https://host/monthly/nclimgrid_tmin.nc?sig=x");

    let hrefs = variable_hrefs("/data/prcp-202201-grd-prelim.nc").unwrap();
    assert_eq!( hrefs[&Variable::Tmax], "/data/tmax-202201-grd-prelim.nc");

    // scaled files hold all variables
    let hrefs = variable_hrefs("/data/ncdd-202201-grd-scaled.nc").unwrap();
    assert!( hrefs.values().all(|h| h == "/data/ncdd-202201-grd-scaled.nc"));

    // keys come out in processing order
    let vars: Vec<Variable> = hrefs.keys().copied().collect();
    assert_eq!( vars, Variable::ALL.to_vec());

    assert!( variable_hrefs("/cogs/nclimgrid-prcp-189501.tif").is_err());
}

#[test]
fn test_cog_name() {
    let cog = CogName::parse("/cogs/nclimgrid-tmin-18960229.tif").unwrap().unwrap();
    assert_eq!( cog.var, Variable::Tmin);
    assert_eq!( cog.frequency, Frequency::Daily);
    assert_eq!( cog.digits, "18960229");
    assert_eq!( cog.date, date(1896, 2, 29));

    assert!( CogName::parse("/data/nclimgrid_prcp.nc").unwrap().is_none());
    assert!( CogName::parse("/cogs/nclimgrid-prcp-18950229.tif").is_err()); // no leap year
    assert!( CogName::parse("/cogs/nclimgrid-prcp-189513.tif").is_err());
    assert!( CogName::parse("/cogs/nclimgrid-prcp-.tif").is_err());
}

#[test]
fn test_check_time_axis() {
    assert!( check_time_axis( Frequency::Daily, &daily_axis(2022, 1)).is_ok());
    assert!( check_time_axis( Frequency::Monthly, &monthly_axis(1895, 1, 24)).is_ok());
    assert!( check_time_axis( Frequency::Monthly, &[date(1895,1,1)]).is_ok());

    assert!( matches!( check_time_axis( Frequency::Monthly, &daily_axis(2022, 1)), Err(NclimgridError::UnrecognizedFormat(_))));
    assert!( matches!( check_time_axis( Frequency::Daily, &monthly_axis(1895, 1, 3)), Err(NclimgridError::UnrecognizedFormat(_))));
}
