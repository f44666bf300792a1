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
use nclim_common::map_to_opaque_error;

pub type Result<T> = std::result::Result<T, NclimgridError>;

#[derive(Error,Debug)]
pub enum NclimgridError {
    /// the source (or COG) href does not follow any known NClimGrid naming or time axis structure
    #[error("unrecognized format: {0}")]
    UnrecognizedFormat(String),

    /// a time step constraint selects nothing
    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// a constraint that does not apply to the cadence of the source
    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("gdal error {0}")]
    NclimGdalError( #[from] nclim_gdal::errors::NclimGdalError),

    #[error("gdal error {0}")]
    GdalError( #[from] nclim_gdal::GdalError),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),

    #[error("config error {0}")]
    ConfigError(String),

    /// a generic error
    #[error("operation failed {0}")]
    OpFailed(String)
}

map_to_opaque_error!( ron::error::SpannedError => NclimgridError::ConfigError);

pub fn unrecognized_format (msg: impl ToString)->NclimgridError {
    NclimgridError::UnrecognizedFormat(msg.to_string())
}

pub fn out_of_range (msg: impl ToString)->NclimgridError {
    NclimgridError::OutOfRange(msg.to_string())
}

pub fn malformed_identifier (msg: impl ToString)->NclimgridError {
    NclimgridError::MalformedIdentifier(msg.to_string())
}

pub fn invalid_constraint (msg: impl ToString)->NclimgridError {
    NclimgridError::InvalidConstraint(msg.to_string())
}

pub fn op_failed (msg: impl ToString)->NclimgridError {
    NclimgridError::OpFailed(msg.to_string())
}

#[derive(Error,Debug,Clone,PartialEq)]
#[error("invalid year-month '{0}', expected YYYYMM")]
pub struct ParseYearMonthError(pub String);
