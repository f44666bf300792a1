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

use clap::FromArgMatches;
use nclimgrid::commands::{CliRegistry, CreateItemsArgs, register_plugin};
use nclimgrid::indices::{StepConstraints, YearMonth};

fn registry () -> CliRegistry {
    let mut registry = CliRegistry::new("nclimgrid");
    register_plugin( &mut registry);
    registry
}

#[test]
fn test_register_plugin() {
    let registry = registry();
    assert_eq!( registry.subcommand_names(), vec!["create-collection", "create-items"]);
}

#[test]
fn test_create_collection_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection").join("monthly.json");

    registry().run_from( ["nclimgrid", "create-collection", "monthly", path.to_str().unwrap()]).unwrap();

    let json: serde_json::Value = serde_json::from_str( &std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!( json["id"], "noaa-nclimgrid-monthly");
    assert_eq!( json["item_assets"].as_object().unwrap().len(), 4);

    let path = dir.path().join("daily.json");
    registry().run_from( ["nclimgrid", "create-collection", "daily", path.to_str().unwrap(), "--nc-assets"]).unwrap();
    let json: serde_json::Value = serde_json::from_str( &std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!( json["item_assets"].as_object().unwrap().len(), 8);

    assert!( registry().run_from( ["nclimgrid", "create-collection", "weekly", "x.json"]).is_err());
}

#[test]
fn test_create_items_args() {
    let cmd = registry().command();

    let matches = cmd.clone().try_get_matches_from([
        "nclimgrid", "create-items", "/data/nclimgrid_prcp.nc", "/out/cogs", "/out/items",
        "--month-range", "189501", "189512", "--nc-assets"
    ]).unwrap();
    let (name, sub) = matches.subcommand().unwrap();
    assert_eq!( name, "create-items");

    let args = CreateItemsArgs::from_arg_matches(sub).unwrap();
    let opts = args.options();
    assert!( opts.nc_assets);
    assert_eq!( opts.constraints, StepConstraints::months( "189501".parse().unwrap(), "189512".parse().unwrap()));

    let matches = cmd.clone().try_get_matches_from([
        "nclimgrid", "create-items", "/data/ncdd-202201-grd-scaled.nc", "/out/cogs", "/out/items", "--day-range", "3", "9"
    ]).unwrap();
    let args = CreateItemsArgs::from_arg_matches( matches.subcommand().unwrap().1).unwrap();
    assert_eq!( args.options().constraints, StepConstraints::days(3, 9));

    let matches = cmd.clone().try_get_matches_from([
        "nclimgrid", "create-items", "/data/ncdd-202201-grd-scaled.nc", "/out/cogs", "/out/items", "--latest-only"
    ]).unwrap();
    let args = CreateItemsArgs::from_arg_matches( matches.subcommand().unwrap().1).unwrap();
    assert_eq!( args.options().constraints, StepConstraints::latest());

    assert!( cmd.clone().try_get_matches_from([
        "nclimgrid", "create-items", "/data/nclimgrid_prcp.nc", "/out/cogs", "/out/items", "--month-range", "1895x1", "189512"
    ]).is_err());
}
