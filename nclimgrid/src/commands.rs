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

use std::ffi::OsString;
use std::path::PathBuf;
use anyhow::anyhow;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use tracing::info;

use nclim_common::fs::ensure_writable_dir;
use crate::{CreateItemsOptions, create_items_with_gdal};
use crate::access::{AccessConfig, load_config};
use crate::collection::create_collection;
use crate::constants::Frequency;
use crate::indices::{StepConstraints, YearMonth};

pub type SubcommandHandler = Box<dyn Fn(&ArgMatches)->anyhow::Result<()>>;

/// something that hosts subcommands, e.g. a CLI application
pub trait Registry {
    fn register_subcommand (&mut self, command: Command, handler: SubcommandHandler);
}

/// register all nclimgrid subcommands with the given host
pub fn register_plugin<R: Registry + ?Sized> (registry: &mut R) {
    registry.register_subcommand(
        CreateCollectionArgs::augment_args( Command::new("create-collection").about("create a STAC Collection for daily or monthly NClimGrid items")),
        Box::new( run_create_collection)
    );
    registry.register_subcommand(
        CreateItemsArgs::augment_args( Command::new("create-items").about("create COGs and STAC Items from a NClimGrid netCDF file")),
        Box::new( run_create_items)
    );
}

/* #region create-collection ******************************************************************************************/

#[derive(Args,Debug)]
pub struct CreateCollectionArgs {
    /// cadence of the items in the collection
    #[arg(value_enum)]
    pub frequency: Frequency,

    /// path of the collection JSON file to write
    pub destination: PathBuf,

    /// include item asset definitions for the netCDF source files
    #[arg(long)]
    pub nc_assets: bool,
}

fn run_create_collection (matches: &ArgMatches) -> anyhow::Result<()> {
    let args = CreateCollectionArgs::from_arg_matches(matches)?;

    let collection = create_collection( args.frequency, args.nc_assets)?;
    if let Some(dir) = args.destination.parent() {
        if !dir.as_os_str().is_empty() { ensure_writable_dir(dir)? }
    }
    collection.save( &args.destination)?;

    info!("saved collection {} to {:?}", collection.id, args.destination);
    Ok(())
}

/* #endregion create-collection */

/* #region create-items ***********************************************************************************************/

#[derive(Args,Debug)]
pub struct CreateItemsArgs {
    /// href of a NClimGrid netCDF file (any variable)
    pub nc_href: String,

    /// directory to store COGs in
    pub cog_dir: PathBuf,

    /// directory to store item JSON files in
    pub item_dir: PathBuf,

    /// only process the last time step of the source
    #[arg(long)]
    pub latest_only: bool,

    /// inclusive range of 1-based day indices (daily sources only)
    #[arg(long, num_args=2, value_names=["FIRST","LAST"])]
    pub day_range: Option<Vec<u32>>,

    /// inclusive range of YYYYMM months (monthly sources only)
    #[arg(long, num_args=2, value_names=["FIRST","LAST"])]
    pub month_range: Option<Vec<YearMonth>>,

    /// add assets for the netCDF source files
    #[arg(long)]
    pub nc_assets: bool,

    /// RON file with the access configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CreateItemsArgs {
    pub fn options (&self) -> CreateItemsOptions {
        let constraints = StepConstraints {
            latest_only: self.latest_only,
            day_range: self.day_range.as_ref().and_then(|r| pair(r)),
            month_range: self.month_range.as_ref().and_then(|r| pair(r)),
        };
        CreateItemsOptions { constraints, nc_assets: self.nc_assets }
    }
}

fn pair<T: Copy> (v: &[T]) -> Option<(T,T)> {
    match v {
        [first,last] => Some((*first,*last)),
        _ => None
    }
}

fn run_create_items (matches: &ArgMatches) -> anyhow::Result<()> {
    let args = CreateItemsArgs::from_arg_matches(matches)?;

    let config: AccessConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => AccessConfig::default()
    };

    let (items, cog_paths) = create_items_with_gdal( &config, None, &args.nc_href, &args.cog_dir, &args.options())?;

    ensure_writable_dir( &args.item_dir)?;
    for item in &items {
        item.save( args.item_dir.join( format!("{}.json", item.id)))?;
    }

    info!("saved {} items to {:?} ({} COGs in {:?})", items.len(), args.item_dir, cog_paths.len(), args.cog_dir);
    Ok(())
}

/* #endregion create-items */

/* #region CLI registry ***********************************************************************************************/

/// a `Registry` that turns the registered subcommands into a command line application
pub struct CliRegistry {
    name: &'static str,
    commands: Vec<(Command,SubcommandHandler)>,
}

impl CliRegistry {
    pub fn new (name: &'static str) -> Self {
        CliRegistry { name, commands: Vec::new() }
    }

    pub fn subcommand_names (&self) -> Vec<&str> {
        self.commands.iter().map(|(cmd,_)| cmd.get_name()).collect()
    }

    pub fn command (&self) -> Command {
        let mut cmd = Command::new(self.name)
            .version( env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true);
        for (sub,_) in &self.commands {
            cmd = cmd.subcommand( sub.clone());
        }
        cmd
    }

    /// parse `args` (including the program name) and run the selected subcommand
    pub fn run_from<I,T> (&self, args: I) -> anyhow::Result<()>
        where I: IntoIterator<Item=T>, T: Into<OsString> + Clone
    {
        let matches = self.command().try_get_matches_from(args)?;
        self.dispatch( &matches)
    }

    /// parse the process arguments and run the selected subcommand. Exits on usage errors
    pub fn run (&self) -> anyhow::Result<()> {
        let matches = self.command().get_matches();
        self.dispatch( &matches)
    }

    fn dispatch (&self, matches: &ArgMatches) -> anyhow::Result<()> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| anyhow!("no subcommand given"))?;

        let (_,handler) = self.commands.iter().find(|(cmd,_)| cmd.get_name() == name)
            .ok_or_else(|| anyhow!("unknown subcommand {name}"))?;
        handler(sub_matches)
    }
}

impl Registry for CliRegistry {
    fn register_subcommand (&mut self, command: Command, handler: SubcommandHandler) {
        self.commands.push( (command,handler));
    }
}

/* #endregion CLI registry */
