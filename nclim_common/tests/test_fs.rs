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

use nclim_common::fs::*;

#[test]
fn test_href_filename() {
    assert_eq!( href_filename("data/monthly/nclimgrid_prcp.nc"), Some("nclimgrid_prcp.nc"));
    assert_eq!( href_filename("nclimgrid_prcp.nc"), Some("nclimgrid_prcp.nc"));
    assert_eq!( href_filename("https://host/nclimgrid/nclimgrid_prcp.nc?sv=2020&sig=a%2Fb"), Some("nclimgrid_prcp.nc"));
    assert_eq!( href_filename("https://host/dir/"), None);
}

#[test]
fn test_replace_href_filename() {
    assert_eq!( replace_href_filename("data/nclimgrid_prcp.nc", "nclimgrid_tavg.nc"), "data/nclimgrid_tavg.nc");
    assert_eq!( replace_href_filename("nclimgrid_prcp.nc", "nclimgrid_tmax.nc"), "nclimgrid_tmax.nc");
    assert_eq!(
        replace_href_filename("https://host/a/prcp-202201-grd-prelim.nc?sig=x/y", "tmin-202201-grd-prelim.nc"),
        "https://host/a/tmin-202201-grd-prelim.nc?sig=x/y"
    );
}

#[test]
fn test_ensure_writable_dir() {
    let tmp = std::env::temp_dir().join("nclim_common_test_fs");
    let dir = tmp.join("a").join("b");
    assert!( ensure_writable_dir(&dir).is_ok());
    assert!( dir.is_dir());
    let _ = std::fs::remove_dir_all(&tmp);
}
