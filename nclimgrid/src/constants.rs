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

use serde::{Serialize,Deserialize};
use strum::{Display, EnumString};

pub const STAC_VERSION: &str = "1.0.0";

pub const PROJECTION_EXTENSION: &str = "https://stac-extensions.github.io/projection/v1.0.0/schema.json";
pub const RASTER_EXTENSION: &str = "https://stac-extensions.github.io/raster/v1.1.0/schema.json";
pub const SCIENTIFIC_EXTENSION: &str = "https://stac-extensions.github.io/scientific/v1.0.0/schema.json";
pub const ITEM_ASSETS_EXTENSION: &str = "https://stac-extensions.github.io/item-assets/v1.0.0/schema.json";

pub const COG_MEDIA_TYPE: &str = "image/tiff; application=geotiff; profile=cloud-optimized";
pub const NETCDF_MEDIA_TYPE: &str = "application/netcdf";

/// nominal grid spacing in meters
pub const SPATIAL_RESOLUTION: f64 = 5000.0;

/// CONUS extent of the NClimGrid grid as [west, south, east, north]
pub const CONUS_BBOX: [f64;4] = [-124.708333, 24.541666, -66.999995, 49.375001];

/// the climate variables of NClimGrid datasets, in the order in which we process them
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase")]
pub enum Variable {
    Prcp,
    Tavg,
    Tmax,
    Tmin
}

impl Variable {
    pub const ALL: [Variable;4] = [Variable::Prcp, Variable::Tavg, Variable::Tmax, Variable::Tmin];

    pub fn as_str (&self) -> &'static str {
        match self {
            Variable::Prcp => "prcp",
            Variable::Tavg => "tavg",
            Variable::Tmax => "tmax",
            Variable::Tmin => "tmin",
        }
    }

    pub fn title (&self) -> &'static str {
        match self {
            Variable::Prcp => "Precipitation (mm)",
            Variable::Tavg => "Average Temperature (degree Celsius)",
            Variable::Tmax => "Maximum Temperature (degree Celsius)",
            Variable::Tmin => "Minimum Temperature (degree Celsius)",
        }
    }

    pub fn unit (&self) -> &'static str {
        match self {
            Variable::Prcp => "mm",
            _ => "degree Celsius"
        }
    }

    pub fn raster_band (&self) -> RasterBandInfo {
        RasterBandInfo {
            data_type: "float32".to_string(),
            nodata: "nan".to_string(),
            unit: self.unit().to_string(),
            spatial_resolution: SPATIAL_RESOLUTION,
        }
    }

    /// asset key of the netCDF file this variable was extracted from
    pub fn source_asset_key (&self) -> String {
        format!("{}_source", self.as_str())
    }
}

/// the time step cadence of a dataset
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString,clap::ValueEnum)]
#[serde(rename_all="lowercase")]
pub enum Frequency {
    Daily,
    Monthly
}

impl Frequency {
    /// lowercase name as used in collection ids and on the command line
    pub fn as_str (&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Monthly => "monthly",
        }
    }

    /// id of the collection that holds items of this cadence
    pub fn collection_id (&self) -> String {
        format!("noaa-nclimgrid-{}", self.as_str())
    }
}

/// the `raster:bands` entry of NClimGrid COG assets
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RasterBandInfo {
    pub data_type: String,
    pub nodata: String,
    pub unit: String,
    pub spatial_resolution: f64,
}
