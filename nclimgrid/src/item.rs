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
use std::path::Path;
use chrono::{DateTime, Datelike, Utc};
use serde::{Serialize,Deserialize};
use tracing::debug;

use nclim_common::{BoundingBox, datetime::{days_in_month, utc_datetime, utc_now}};
use crate::cog::RasterSource;
use crate::constants::*;
use crate::frequency::{CogName, VarHrefs, var_href};
use crate::errors::{Result, malformed_identifier, op_failed};

/* #region record types ***********************************************************************************************/

/// the fields an asset shares with its `item_assets` definition in the collection
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct AssetDefinition {
    #[serde(rename="type")]
    pub media_type: String,

    pub roles: Vec<String>,

    #[serde(skip_serializing_if="nclim_common::is_none")]
    pub title: Option<String>,

    #[serde(rename="raster:bands", skip_serializing_if="nclim_common::is_none")]
    pub raster_bands: Option<Vec<RasterBandInfo>>,
}

impl AssetDefinition {
    /// the COG asset of a variable
    pub fn cog (var: Variable, frequency: Frequency) -> Self {
        AssetDefinition {
            media_type: COG_MEDIA_TYPE.to_string(),
            roles: vec!["data".to_string()],
            title: Some( format!("{} {}", frequency, var.title())),
            raster_bands: Some( vec![ var.raster_band() ]),
        }
    }

    /// the netCDF source asset of a variable
    pub fn netcdf (var: Variable, frequency: Frequency) -> Self {
        AssetDefinition {
            media_type: NETCDF_MEDIA_TYPE.to_string(),
            roles: vec!["source".to_string()],
            title: Some( format!("{} {} Source NetCDF", frequency, var.title())),
            raster_bands: None,
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Asset {
    pub href: String,

    #[serde(flatten)]
    pub definition: AssetDefinition,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,

    #[serde(rename="type", skip_serializing_if="nclim_common::is_none")]
    pub media_type: Option<String>,

    #[serde(skip_serializing_if="nclim_common::is_none")]
    pub title: Option<String>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ItemProperties {
    /// always serialized, `null` for monthly items
    pub datetime: Option<DateTime<Utc>>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub created: DateTime<Utc>,

    #[serde(rename="proj:epsg")]
    pub epsg: Option<u32>,

    /// [rows, cols]
    #[serde(rename="proj:shape")]
    pub shape: [usize;2],

    #[serde(rename="proj:transform")]
    pub transform: [f64;6],
}

/// a STAC Item for one time step of a NClimGrid dataset
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Item {
    #[serde(rename="type")]
    pub type_: String,
    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub geometry: geojson::Geometry,
    pub bbox: [f64;4],
    pub properties: ItemProperties,
    pub links: Vec<Link>,
    pub assets: BTreeMap<String,Asset>,

    #[serde(skip_serializing_if="nclim_common::is_none")]
    pub collection: Option<String>,
}

impl Item {
    /// structural checks of the record (not a schema validation)
    pub fn validate (&self) -> Result<()> {
        if self.id.is_empty() {
            return Err( op_failed("item has no id"))
        }

        let props = &self.properties;
        if props.start_datetime > props.end_datetime {
            return Err( op_failed( format!("item {} ends before it starts", self.id)))
        }
        if let Some(dt) = props.datetime {
            if dt < props.start_datetime || dt > props.end_datetime {
                return Err( op_failed( format!("item {} datetime outside of its interval", self.id)))
            }
        }

        let [west,south,east,north] = self.bbox;
        if !(west <= east && south <= north) {
            return Err( op_failed( format!("item {} has an invalid bbox {:?}", self.id, self.bbox)))
        }

        for var in Variable::ALL {
            if !self.assets.contains_key( var.as_str()) {
                return Err( op_failed( format!("item {} has no {} asset", self.id, var)))
            }
        }
        Ok(())
    }

    pub fn to_json (&self) -> Result<String> {
        Ok( serde_json::to_string_pretty(self)? )
    }

    pub fn save (&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write( path, self.to_json()?)?;
        Ok(())
    }
}

/* #endregion record types */

/// id and temporal extent of an item
#[derive(Debug,Clone,PartialEq)]
pub struct ItemDates {
    pub frequency: Frequency,
    pub id: String,
    pub datetime: Option<DateTime<Utc>>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// derive the item id and time interval from the name of one of its COGs.
/// Daily items are identified by their YYYYMMDD date and cover that whole day. Monthly items are
/// identified as `nclimgrid-YYYYMM` and only have a start (first day) and end (last day) but
/// no datetime
pub fn item_dates (cog_href: &str) -> Result<ItemDates> {
    let cog = CogName::parse(cog_href)?
        .ok_or_else(|| malformed_identifier( format!("not a NClimGrid COG name: {cog_href}")))?;

    let (y, m, d) = (cog.date.year(), cog.date.month(), cog.date.day());
    let bad_date = || malformed_identifier( format!("invalid date in {cog_href}"));

    match cog.frequency {
        Frequency::Daily => {
            let start = utc_datetime(y, m, d, 0, 0, 0).ok_or_else(bad_date)?;
            let end = utc_datetime(y, m, d, 23, 59, 59).ok_or_else(bad_date)?;
            Ok( ItemDates { frequency: cog.frequency, id: cog.digits, datetime: Some(start), start, end })
        }
        Frequency::Monthly => {
            let last = days_in_month(y, m).ok_or_else(bad_date)?;
            let start = utc_datetime(y, m, 1, 0, 0, 0).ok_or_else(bad_date)?;
            let end = utc_datetime(y, m, last, 0, 0, 0).ok_or_else(bad_date)?;
            Ok( ItemDates { frequency: cog.frequency, id: format!("nclimgrid-{}", cog.digits), datetime: None, start, end })
        }
    }
}

/// assemble the item for the COGs of one time step. If `nc_hrefs` is given the item also gets
/// assets that refer to the netCDF files the COGs were extracted from
pub fn create_item<R: RasterSource> (source: &R, cog_hrefs: &VarHrefs, nc_hrefs: Option<&VarHrefs>) -> Result<Item> {
    let prcp_href = var_href(cog_hrefs, Variable::Prcp)?;
    let dates = item_dates(prcp_href)?;
    let frequency = dates.frequency;

    let fp = source.footprint(prcp_href)?;
    let geometry = footprint_geometry( &fp.geo_bbox);
    debug!("item {} footprint: {:?}", dates.id, fp.geo_bbox);

    let mut assets = BTreeMap::new();
    for var in Variable::ALL {
        let href = var_href(cog_hrefs, var)?.to_string();
        assets.insert( var.as_str().to_string(), Asset { href, definition: AssetDefinition::cog(var, frequency) });
    }
    if let Some(nc_hrefs) = nc_hrefs {
        for var in Variable::ALL {
            let href = var_href(nc_hrefs, var)?.to_string();
            assets.insert( var.source_asset_key(), Asset { href, definition: AssetDefinition::netcdf(var, frequency) });
        }
    }

    let item = Item {
        type_: "Feature".to_string(),
        stac_version: STAC_VERSION.to_string(),
        stac_extensions: vec![ PROJECTION_EXTENSION.to_string(), RASTER_EXTENSION.to_string() ],
        id: dates.id,
        geometry,
        bbox: fp.geo_bbox.to_minmax_array(),
        properties: ItemProperties {
            datetime: dates.datetime,
            start_datetime: dates.start,
            end_datetime: dates.end,
            created: utc_now(),
            epsg: fp.epsg,
            shape: fp.shape,
            transform: fp.transform,
        },
        links: Vec::new(),
        assets,
        collection: Some( frequency.collection_id()),
    };

    item.validate()?;
    Ok(item)
}

fn footprint_geometry (bbox: &BoundingBox<f64>) -> geojson::Geometry {
    let ring: Vec<Vec<f64>> = bbox.to_ring().iter().map(|p| p.to_vec()).collect();
    geojson::Geometry::new( geojson::Value::Polygon( vec![ring]))
}
