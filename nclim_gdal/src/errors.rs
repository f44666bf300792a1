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

use thiserror::Error;
use gdal::errors::GdalError;

pub type Result<T> = std::result::Result<T, NclimGdalError>;

#[derive(Error,Debug)]
pub enum NclimGdalError {

    // pass through for errors in gdal crate
    #[error("gdal error {0}")]
    GdalError( #[from] GdalError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("time axis error {0}")]
    TimeAxisError(String),

    #[error("misc error {0}")]
    MiscError(String),
}

pub fn misc_error (msg: impl ToString)->NclimGdalError {
    NclimGdalError::MiscError(msg.to_string())
}

pub fn time_axis_error (msg: impl ToString)->NclimGdalError {
    NclimGdalError::TimeAxisError(msg.to_string())
}

pub fn gdal_error (e: GdalError)->NclimGdalError {
    NclimGdalError::GdalError(e)
}
