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

//! conversion of NOAA NClimGrid netCDF datasets into per time step Cloud Optimized GeoTIFFs and
//! STAC Items, plus the STAC Collections for daily and monthly cadence

use std::path::{Path,PathBuf};
use tracing::{debug,info};

pub mod errors;
pub mod constants;
pub mod frequency;
pub mod indices;
pub mod access;
pub mod cog;
pub mod item;
pub mod collection;
pub mod commands;

use nclim_common::fs::{ensure_writable_dir, path_to_lossy_string};
use errors::Result;
use constants::Variable;
use frequency::{VarHrefs, check_time_axis, detect_frequency, var_href, variable_hrefs};
use indices::{StepConstraints, enumerate_steps};
use access::{AccessConfig, HrefResolver, ReadHrefModifier};
use cog::{GdalRasterSource, RasterSource, create_cogs};
use item::{Item, create_item};

pub use nclim_common::BoundingBox;
pub use nclim_gdal::RasterFootprint;

#[derive(Debug,Clone,Default,PartialEq)]
pub struct CreateItemsOptions {
    pub constraints: StepConstraints,
    /// add assets for the netCDF files the COGs were extracted from
    pub nc_assets: bool,
}

/// create the COGs and items for the (selected) time steps of the NClimGrid source `nc_href`.
/// COGs are written to `cog_dir`, which is created if it does not exist yet.
/// Returns the items and the paths of all created COGs, both in time step order. Any error
/// aborts the whole batch
pub fn create_items<R: RasterSource> (source: &R, resolver: &HrefResolver, nc_href: &str, cog_dir: &Path,
                                      opts: &CreateItemsOptions) -> Result<(Vec<Item>,Vec<PathBuf>)>
{
    let frequency = detect_frequency(nc_href)?;
    let nc_hrefs = variable_hrefs(nc_href)?;
    ensure_writable_dir(cog_dir)?;

    let axis_href = resolver.read_href( var_href(&nc_hrefs, Variable::Prcp)?);
    let axis = source.time_axis( &axis_href, Variable::Prcp)?;
    check_time_axis( frequency, &axis)?;

    let steps = enumerate_steps( frequency, &axis, &opts.constraints)?;
    info!("creating {} {} item(s) from {}", steps.len(), frequency.as_str(), nc_href);

    let mut items = Vec::with_capacity(steps.len());
    let mut cog_paths = Vec::with_capacity(steps.len() * Variable::ALL.len());

    for step in &steps {
        let cogs = create_cogs( source, resolver, &nc_hrefs, cog_dir, step)?;
        let cog_hrefs: VarHrefs = cogs.iter().map(|(var,path)| (*var, path_to_lossy_string(path))).collect();

        let item = create_item( source, &cog_hrefs, if opts.nc_assets { Some(&nc_hrefs) } else { None })?;
        debug!("created item {}", item.id);

        cog_paths.extend( cogs.into_values());
        items.push(item);
    }

    Ok((items, cog_paths))
}

/// `create_items` with the GDAL raster source for the given access configuration
pub fn create_items_with_gdal (config: &AccessConfig, modifier: Option<ReadHrefModifier>, nc_href: &str,
                               cog_dir: &Path, opts: &CreateItemsOptions) -> Result<(Vec<Item>,Vec<PathBuf>)>
{
    let source = GdalRasterSource::new(config)?;
    let resolver = HrefResolver::new(config, modifier);
    create_items( &source, &resolver, nc_href, cog_dir, opts)
}
