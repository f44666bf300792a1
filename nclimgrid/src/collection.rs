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
use chrono::{DateTime, Utc};
use serde::{Serialize,Deserialize};

use nclim_common::datetime::utc_datetime;
use crate::constants::*;
use crate::item::{AssetDefinition, Link};
use crate::errors::{Result, op_failed};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Provider {
    pub name: String,
    pub roles: Vec<String>,
    pub url: String,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SpatialExtent {
    pub bbox: Vec<[f64;4]>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TemporalExtent {
    /// open ended intervals have a `null` end
    pub interval: Vec<[Option<DateTime<Utc>>;2]>,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Extent {
    pub spatial: SpatialExtent,
    pub temporal: TemporalExtent,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Publication {
    pub doi: String,
    pub citation: String,
}

/// the STAC Collection of all daily or all monthly NClimGrid items
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Collection {
    #[serde(rename="type")]
    pub type_: String,
    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub license: String,
    pub providers: Vec<Provider>,
    pub extent: Extent,
    pub links: Vec<Link>,
    pub item_assets: BTreeMap<String,AssetDefinition>,

    #[serde(rename="sci:doi", skip_serializing_if="nclim_common::is_none")]
    pub sci_doi: Option<String>,

    #[serde(rename="sci:citation", skip_serializing_if="nclim_common::is_none")]
    pub sci_citation: Option<String>,

    #[serde(rename="sci:publications", skip_serializing_if="nclim_common::is_none")]
    pub sci_publications: Option<Vec<Publication>>,
}

impl Collection {
    pub fn to_json (&self) -> Result<String> {
        Ok( serde_json::to_string_pretty(self)? )
    }

    pub fn save (&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write( path, self.to_json()?)?;
        Ok(())
    }
}

const MONTHLY_DOI: &str = "10.7289/V5SX6B56";
const MONTHLY_CITATION: &str = "Vose, Russell S.; Applequist, Scott; Squires, Mike; Durre, Imke; Menne, Matthew J.; \
    Williams, Claude N., Jr.; Fenimore, Chris; Gleason, Karin; Arndt, Derek (2014): NOAA Monthly U.S. Climate \
    Gridded Dataset (NClimGrid), Version 1. NOAA National Centers for Environmental Information.";
const PUBLICATION_DOI: &str = "10.1175/JAMC-D-13-0248.1";
const PUBLICATION_CITATION: &str = "Vose, R. S., Applequist, S., Squires, M., Durre, I., Menne, M. J., Williams, C. N., Jr., \
    Fenimore, C., Gleason, K., & Arndt, D. (2014). Improved Historical Temperature and Precipitation Time Series for U.S. \
    Climate Divisions. Journal of Applied Meteorology and Climatology, 53(5), 1232-1251.";

fn description (frequency: Frequency) -> String {
    let (cadence, period) = match frequency {
        Frequency::Daily => ("daily", "1951"),
        Frequency::Monthly => ("monthly", "1895"),
    };
    format!("The NOAA U.S. Climate Gridded Dataset (NClimGrid) consists of four climate variables derived from \
        the Global Historical Climatology Network daily (GHCNd) dataset: maximum temperature, minimum temperature, \
        average temperature, and precipitation. The data are provided on a 1/24 degree (about 5 km) lat/lon grid \
        covering the contiguous United States, with {cadence} values from {period} to the present. Each item holds one \
        Cloud Optimized GeoTIFF per variable for a single {} time step.",
        if frequency == Frequency::Daily { "day" } else { "month" })
}

/// build the collection for the given cadence. With `nc_assets` the item asset definitions
/// also cover the netCDF source assets
pub fn create_collection (frequency: Frequency, nc_assets: bool) -> Result<Collection> {
    let start_year = match frequency {
        Frequency::Daily => 1951,
        Frequency::Monthly => 1895,
    };
    let start = utc_datetime(start_year, 1, 1, 0, 0, 0).ok_or_else(|| op_failed("invalid collection start"))?;

    let mut item_assets = BTreeMap::new();
    for var in Variable::ALL {
        item_assets.insert( var.as_str().to_string(), AssetDefinition::cog(var, frequency));
        if nc_assets {
            item_assets.insert( var.source_asset_key(), AssetDefinition::netcdf(var, frequency));
        }
    }

    let mut stac_extensions = vec![ ITEM_ASSETS_EXTENSION.to_string(), RASTER_EXTENSION.to_string() ];
    let mut links = Vec::new();
    let (mut sci_doi, mut sci_citation, mut sci_publications) = (None, None, None);

    if frequency == Frequency::Monthly {
        stac_extensions.push( SCIENTIFIC_EXTENSION.to_string());
        sci_doi = Some( MONTHLY_DOI.to_string());
        sci_citation = Some( MONTHLY_CITATION.to_string());
        sci_publications = Some( vec![ Publication { doi: PUBLICATION_DOI.to_string(), citation: PUBLICATION_CITATION.to_string() } ]);
        links.push( Link {
            rel: "cite-as".to_string(),
            href: format!("https://doi.org/{MONTHLY_DOI}"),
            media_type: None,
            title: None,
        });
    }

    Ok( Collection {
        type_: "Collection".to_string(),
        stac_version: STAC_VERSION.to_string(),
        stac_extensions,
        id: frequency.collection_id(),
        title: format!("{} NOAA U.S. Gridded Climate Dataset (NClimGrid)", frequency),
        description: description(frequency),
        keywords: ["NOAA", "NClimGrid", "United States", "Climate", "Temperature", "Precipitation"]
            .iter().map(|s| s.to_string()).collect(),
        license: "proprietary".to_string(),
        providers: vec![ Provider {
            name: "NOAA National Centers for Environmental Information".to_string(),
            roles: vec!["producer".to_string(), "processor".to_string(), "licensor".to_string()],
            url: "https://www.ncei.noaa.gov".to_string(),
        }],
        extent: Extent {
            spatial: SpatialExtent { bbox: vec![CONUS_BBOX] },
            temporal: TemporalExtent { interval: vec![[Some(start), None]] },
        },
        links,
        item_assets,
        sci_doi,
        sci_citation,
        sci_publications,
    })
}
