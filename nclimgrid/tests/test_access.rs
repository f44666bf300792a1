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

use nclimgrid::access::{AccessConfig, HrefResolver, load_config};

#[test]
fn test_gdal_path() {
    let config = AccessConfig::default();
    let resolver = HrefResolver::new( &config, None);

    assert_eq!( resolver.gdal_path("/data/nclimgrid_prcp.nc"), "/data/nclimgrid_prcp.nc");
    assert_eq!( resolver.gdal_path("data/nclimgrid_prcp.nc"), "data/nclimgrid_prcp.nc");
    assert_eq!( resolver.gdal_path("https://host/a/nclimgrid_prcp.nc?sig=x"), "/vsicurl/https://host/a/nclimgrid_prcp.nc?sig=x");
    assert_eq!( resolver.gdal_path("s3://bucket/a/nclimgrid_prcp.nc"), "/vsis3/bucket/a/nclimgrid_prcp.nc");
    assert_eq!( resolver.gdal_path("az://container/nclimgrid_prcp.nc"), "/vsiaz/container/nclimgrid_prcp.nc");

    // object store paths can't carry a query
    assert_eq!( resolver.gdal_path("s3://bucket/a/nclimgrid_prcp.nc?versionId=3"), "/vsis3/bucket/a/nclimgrid_prcp.nc");
    assert_eq!( resolver.gdal_path("gs://bucket/nclimgrid_prcp.nc?x=1"), "/vsigs/bucket/nclimgrid_prcp.nc");
    assert_eq!( resolver.gdal_path("file:///data/nclimgrid_prcp.nc"), "/data/nclimgrid_prcp.nc");
    assert_eq!( resolver.gdal_path("/vsicurl/https://host/x.nc"), "/vsicurl/https://host/x.nc");
    assert_eq!( resolver.gdal_path("ftp://host/x.nc"), "ftp://host/x.nc");
}

#[test]
fn test_modifier() {
    let config = AccessConfig::default();
    let append: &dyn Fn(&str)->String = &|href: &str| format!("{href}?token=t");
    let resolver = HrefResolver::new( &config, Some(append));

    assert_eq!( resolver.read_href("https://host/x.nc"), "/vsicurl/https://host/x.nc?token=t");
    assert_eq!( resolver.read_href("/data/x.nc"), "/data/x.nc?token=t");
}

#[test]
fn test_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.ron");
    std::fs::write( &path, r#"(
        gdal_config: [ ("GDAL_HTTP_MAX_RETRY", "3") ],
        cog_options: [ "COMPRESS=LZW" ],
    )"#).unwrap();

    let config: AccessConfig = load_config(&path).unwrap();
    assert_eq!( config.gdal_config, vec![("GDAL_HTTP_MAX_RETRY".to_string(), "3".to_string())]);
    assert_eq!( config.cog_options, vec!["COMPRESS=LZW"]);
    assert_eq!( config.vsi_prefixes, AccessConfig::default().vsi_prefixes); // defaulted

    std::fs::write( &path, "( cog_options: 42 )").unwrap();
    assert!( load_config::<AccessConfig>(&path).is_err());
}
