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
use std::path::{Path,PathBuf};
use chrono::NaiveDate;
use tracing::{debug,info};

use nclim_gdal::{RasterFootprint, create_cog_from_band, get_raster_footprint_for_path, get_time_axis, open_variable,
    run_quiet, set_config_options, to_creation_options};
use crate::access::{AccessConfig, HrefResolver};
use crate::constants::Variable;
use crate::frequency::{VarHrefs, var_href};
use crate::indices::TimeStep;
use crate::errors::Result;

/// the raster data access we need for conversion. Hrefs passed into this trait are already
/// resolved (see `HrefResolver`), i.e. they are paths GDAL can open
pub trait RasterSource {
    /// the calendar dates of the time steps (bands) of variable `var` in `href`
    fn time_axis (&self, href: &str, var: Variable) -> Result<Vec<NaiveDate>>;

    /// write band `band` (1-based) of variable `var` in `href` as a COG to `cog_path`
    fn extract_cog (&self, href: &str, var: Variable, band: usize, cog_path: &Path) -> Result<()>;

    /// projection, shape and bounds of a (COG) raster
    fn footprint (&self, href: &str) -> Result<RasterFootprint>;
}

/// the GDAL backed `RasterSource`
pub struct GdalRasterSource {
    cog_options: Vec<String>,
}

impl GdalRasterSource {
    /// note this sets the configured GDAL options process wide
    pub fn new (config: &AccessConfig) -> Result<Self> {
        set_config_options( &config.gdal_config)?;
        Ok( GdalRasterSource { cog_options: config.cog_options.clone() } )
    }
}

impl RasterSource for GdalRasterSource {
    fn time_axis (&self, href: &str, var: Variable) -> Result<Vec<NaiveDate>> {
        let ds = open_variable( href, var.as_str())?;
        Ok( get_time_axis( &ds, "time")? )
    }

    fn extract_cog (&self, href: &str, var: Variable, band: usize, cog_path: &Path) -> Result<()> {
        let ds = open_variable( href, var.as_str())?;
        let opts = to_creation_options( &self.cog_options)?;
        create_cog_from_band( &ds, band, cog_path, &opts)?;
        Ok(())
    }

    fn footprint (&self, href: &str) -> Result<RasterFootprint> {
        Ok( run_quiet( || get_raster_footprint_for_path(href))? )
    }
}

pub fn cog_filename (var: Variable, step: &TimeStep) -> String {
    format!("nclimgrid-{}-{}.tif", var, step.date_digits())
}

/// create the COGs of all variables for one time step in `cog_dir`. The resolver is invoked for
/// each variable, right before its extraction
pub fn create_cogs<R: RasterSource> (source: &R, resolver: &HrefResolver, nc_hrefs: &VarHrefs,
                                     cog_dir: &Path, step: &TimeStep) -> Result<BTreeMap<Variable,PathBuf>>
{
    let mut cogs = BTreeMap::new();
    for var in Variable::ALL {
        let href = resolver.read_href( var_href(nc_hrefs, var)?);
        let cog_path = cog_dir.join( cog_filename(var, step));

        debug!("extracting band {} of {} from {} into {:?}", step.band, var, href, cog_path);
        source.extract_cog( &href, var, step.band, &cog_path)?;
        info!("created {:?}", cog_path);

        cogs.insert( var, cog_path);
    }
    Ok(cogs)
}
