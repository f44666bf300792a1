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

use std::path::Path;
use serde::{Serialize,Deserialize};
use serde::de::DeserializeOwned;
use url::Url;
use tracing::debug;

use nclim_common::fs::{filepath_contents_as_string, split_href_query};
use crate::errors::Result;

/// how we get at source data. This replaces any process global "remote access" state - whatever
/// GDAL needs to read remote hrefs is configured here and handed to the raster source
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct AccessConfig {
    /// URL scheme -> GDAL virtual file system prefix
    pub vsi_prefixes: Vec<(String,String)>,

    /// GDAL config options (e.g. "GDAL_HTTP_MAX_RETRY") to set before any dataset is opened
    pub gdal_config: Vec<(String,String)>,

    /// GDAL COG driver creation options
    pub cog_options: Vec<String>,
}

impl Default for AccessConfig {
    fn default () -> Self {
        AccessConfig {
            vsi_prefixes: vec![
                ("http".to_string(), "/vsicurl/".to_string()),
                ("https".to_string(), "/vsicurl/".to_string()),
                ("s3".to_string(), "/vsis3/".to_string()),
                ("az".to_string(), "/vsiaz/".to_string()),
                ("gs".to_string(), "/vsigs/".to_string()),
            ],
            gdal_config: Vec::new(),
            cog_options: nclim_gdal::default_cog_create_opts(),
        }
    }
}

impl AccessConfig {
    fn vsi_prefix (&self, scheme: &str) -> Option<&str> {
        self.vsi_prefixes.iter().find(|(s,_)| s == scheme).map(|(_,p)| p.as_str())
    }
}

pub fn load_config<C: DeserializeOwned> (path: impl AsRef<Path>) -> Result<C> {
    let path = path.as_ref();
    debug!("loading config {path:?}");
    let input = filepath_contents_as_string(&path)?;
    Ok( ron::from_str(&input)? )
}

/// user supplied rewrite of source hrefs, e.g. to append a SAS token
pub type ReadHrefModifier<'a> = &'a dyn Fn(&str)->String;

/// turns source hrefs into paths GDAL can open
pub struct HrefResolver<'a> {
    config: &'a AccessConfig,
    modifier: Option<ReadHrefModifier<'a>>,
}

impl<'a> HrefResolver<'a> {
    pub fn new (config: &'a AccessConfig, modifier: Option<ReadHrefModifier<'a>>) -> Self {
        HrefResolver { config, modifier }
    }

    /// apply the modifier (if any) and map the result to a GDAL path. This is not cached, the
    /// modifier runs on each call
    pub fn read_href (&self, href: &str) -> String {
        let href = match self.modifier {
            Some(modifier) => modifier(href),
            None => href.to_string()
        };
        self.gdal_path(&href)
    }

    /// map a URL to the respective GDAL virtual file system path. Local paths (including
    /// Windows drive letters) and already prefixed paths are returned unchanged.
    /// Only http(s) URLs keep their query, object store paths (`/vsis3/` etc.) can't have one.
    /// Credentials for those have to be set through `AccessConfig::gdal_config`
    pub fn gdal_path (&self, href: &str) -> String {
        if let Ok(url) = Url::parse(href) {
            let scheme = url.scheme();
            if scheme == "file" {
                if let Ok(path) = url.to_file_path() {
                    return path.to_string_lossy().to_string()
                }
            } else if scheme.len() > 1 {
                if let Some(prefix) = self.config.vsi_prefix(scheme) {
                    return match (scheme, href.split_once("://")) {
                        ("http" | "https", _) => format!("{prefix}{href}"),
                        (_, Some((_,bucket_path))) => format!("{prefix}{}", split_href_query(bucket_path).0),
                        _ => href.to_string()
                    }
                }
            }
        }
        href.to_string()
    }
}
