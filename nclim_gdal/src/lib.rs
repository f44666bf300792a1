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

pub mod errors;

use gdal::errors::CplErrType;
use lazy_static::lazy_static;
use static_init::constructor;
use std::{collections::HashMap, path::Path, sync::Mutex};
use chrono::NaiveDate;

// we re-export these so that other crates don't have to use a direct gdal depedency to import.
pub use gdal::{self, Driver, DriverManager, Metadata, Dataset, errors::GdalError, GeoTransform, cpl::CslStringList};
pub use gdal::raster::{GdalDataType, RasterBand, Buffer, RasterCreationOptions};
pub use gdal::spatial_ref::{CoordTransform, CoordTransformOptions, SpatialRef};

use nclim_common::{BoundingBox, datetime::CfTimeUnits, fs::href_filename};
use crate::errors::{Result, misc_error, time_axis_error, gdal_error, NclimGdalError};

lazy_static! {
    static ref EXT_MAP: HashMap<&'static str, &'static str> = HashMap::from( [ // file extension -> driver short name
        ("tif", "GTiff"),
        ("tiff", "GTiff"),
        ("nc", "netCDF"),
        ("nc4", "netCDF"),
        ("vrt", "VRT"),
    ]);
}

/// use this to protect non-threadsafe GDAL operations
static GLOB_GDAL_MUTEX: Mutex<usize> = Mutex::new(0);

#[constructor(0)]
extern "C" fn _initialize_gdal() {
    gdal::config::set_error_handler(no_error_output);
}

fn no_error_output (cpl_et: CplErrType, ec: i32, msg: &str) {}

/// Note that filename extension has to be lower case
pub fn get_driver_name_for_extension (ext: &str) -> Option<&'static str> {
    EXT_MAP.get( ext).map(|v| &**v)
}

/// driver name for the file extension of an href (path or URL, query strings are ignored)
pub fn get_driver_name_for_href (href: &str) -> Option<&'static str> {
    href_filename(href)
        .and_then( |name| name.rsplit_once('.'))
        .and_then( |(_,ext)| get_driver_name_for_extension( ext.to_ascii_lowercase().as_str()))
}

/// run the provided closure with the global GDAL error handler disabled. Note this does not
/// change the return value but prevents GDAL from printing errors and warnings to the console
pub fn run_quiet<T,F> (f: F)->Result<T> where F: FnOnce()->Result<T> {
    let lock = GLOB_GDAL_MUTEX.lock().unwrap_or_else( |e| e.into_inner());
    unsafe { gdal_sys::CPLPushErrorHandler( Some(gdal_sys::CPLQuietErrorHandler)); }
    let result = f();
    unsafe { gdal_sys::CPLPopErrorHandler(); }
    result
}

/// set process wide GDAL config options (e.g. GDAL_HTTP_HEADER_FILE or AZURE_STORAGE_SAS_TOKEN)
pub fn set_config_options (options: &[(String,String)]) -> Result<()> {
    let lock = GLOB_GDAL_MUTEX.lock().unwrap_or_else( |e| e.into_inner());
    for (key,value) in options {
        gdal::config::set_config_option( key, value)?;
    }
    Ok(())
}

/* #region netCDF variables and time axis ****************************************************************************/

pub fn nc_subdataset_path (nc_path: &str, var_name: &str) -> String {
    format!("NETCDF:\"{}\":{}", nc_path, var_name)
}

// NClimGrid files trigger CF conformance warnings on the console that are irrelevant for us since
// we only read the grid, its geotransform and the time coordinate
pub fn quiet_nc_dataset (nc_path: &str, var_name: &str) -> Result<Dataset> {
    let path = nc_subdataset_path( nc_path, var_name);
    run_quiet( move || Ok( Dataset::open(&path)? ) )
}

/// open the dataset for a given variable. netCDF sources are opened as sub-datasets, everything else
/// (e.g. multi-band GeoTIFFs with one band per time step) is opened directly
pub fn open_variable (href: &str, var_name: &str) -> Result<Dataset> {
    if get_driver_name_for_href(href) == Some("netCDF") {
        quiet_nc_dataset( href, var_name)
    } else {
        run_quiet( || Ok( Dataset::open(href)? ) )
    }
}

/// parse the "{v0,v1,..}" value lists GDAL uses for NETCDF_DIM_<dim>_VALUES
fn parse_dim_values (s: &str) -> Option<Vec<f64>> {
    let list = s.trim().trim_start_matches('{').trim_end_matches('}');
    if list.is_empty() { return Some(Vec::new()) }
    list.split(',').map( |s| s.trim().parse::<f64>().ok()).collect()
}

/// get the dates of the time coordinate `dim` of a dataset, one per raster band.
/// This relies on the metadata the GDAL netCDF driver provides: "<dim>#units" on the dataset and
/// "NETCDF_DIM_<dim>" on each band (or "NETCDF_DIM_<dim>_VALUES" on the dataset)
pub fn get_time_axis (ds: &Dataset, dim: &str) -> Result<Vec<NaiveDate>> {
    let units_key = format!("{dim}#units");
    let units_str = ds.metadata_item( &units_key, "").ok_or_else( || time_axis_error( format!("no {units_key} metadata")))?;
    let units = CfTimeUnits::parse( &units_str).ok_or_else( || time_axis_error( format!("unsupported time units '{units_str}'")))?;

    let band_key = format!("NETCDF_DIM_{dim}");
    let n_bands = ds.raster_count();
    let mut values: Vec<f64> = Vec::with_capacity(n_bands);

    for i in 1..=n_bands {
        let band = ds.rasterband(i)?;
        match band.metadata_item( &band_key, "") {
            Some(v) => {
                let v = v.trim().parse::<f64>().map_err( |_| time_axis_error( format!("invalid {band_key} value '{v}' in band {i}")))?;
                values.push(v)
            }
            None => break
        }
    }

    if values.len() != n_bands { // fall back to dataset level value list
        let values_key = format!("NETCDF_DIM_{dim}_VALUES");
        let list = ds.metadata_item( &values_key, "").ok_or_else( || time_axis_error( format!("no {band_key} band metadata")))?;
        values = parse_dim_values( &list).ok_or_else( || time_axis_error( format!("invalid {values_key} '{list}'")))?;
        if values.len() != n_bands {
            return Err( time_axis_error( format!("{} time values for {} bands", values.len(), n_bands)))
        }
    }

    values.iter().map( |v| {
        units.to_date(*v).ok_or_else( || time_axis_error( format!("time value {v} out of range")))
    }).collect()
}

/* #endregion netCDF variables and time axis */

/* #region COG creation ***********************************************************************************************/

pub fn to_creation_options (opts: &[String]) -> Result<RasterCreationOptions> {
    let mut co = RasterCreationOptions::new();
    for s in opts {
        co.add_string( s.as_str())?;
    }
    Ok(co)
}

pub fn default_cog_create_opts ()->Vec<String> {
    vec![ "COMPRESS=DEFLATE".to_string(), "PREDICTOR=YES".to_string() ]
}

/// extract a single band of `src` into a (single band, float32) Cloud Optimized GeoTIFF.
/// Source nodata values are replaced by NaN, which becomes the nodata value of the COG.
/// If the source has no spatial reference we assume geographic coordinates (EPSG:4326)
pub fn create_cog_from_band<P> (src: &Dataset, band_index: usize, cog_path: P, create_opts: &RasterCreationOptions) -> Result<()>
    where P: AsRef<Path>
{
    if band_index < 1 || band_index > src.raster_count() {
        return Err( misc_error( format!("band index {} out of range 1..={}", band_index, src.raster_count())))
    }

    let src_band = src.rasterband(band_index)?;
    let (w,h) = src_band.size();

    let mem_driver = DriverManager::get_driver_by_name("MEM")?;
    let mut mem_ds = mem_driver.create_with_band_type::<f32,_>( "", w, h, 1)?;

    mem_ds.set_geo_transform( &src.geo_transform()?)?;
    match src.spatial_ref() {
        Ok(srs) => mem_ds.set_spatial_ref( &srs)?,
        Err(_) => mem_ds.set_spatial_ref( &srs_epsg_4326()?)?
    }

    {
        let mut buf: Buffer<f32> = src_band.read_as( (0,0), (w,h), (w,h), None)?;
        if let Some(no_data) = src_band.no_data_value() {
            if !no_data.is_nan() {
                let no_data = no_data as f32;
                for v in buf.data_mut() {
                    if *v == no_data { *v = f32::NAN }
                }
            }
        }

        let mut tgt_band = mem_ds.rasterband(1)?;
        tgt_band.write( (0,0), (w,h), &mut buf)?;
        tgt_band.set_no_data_value( Some(f64::NAN))?;
    }

    let cog_driver = DriverManager::get_driver_by_name("COG")?;
    mem_ds.create_copy( &cog_driver, cog_path.as_ref(), create_opts)?;
    Ok(())
}

/* #endregion COG creation */

/* #region raster geometry ********************************************************************************************/

pub fn srs_epsg_4326 () -> Result<SpatialRef> { Ok(SpatialRef::from_epsg(4326)?) }

// watch out - if source or target are geographic we might have to swap axis order
// (we don't want to change axis_mapping_strategy in the provided SpatialRefs though)
pub fn transform_bounds_2d (s_srs: &SpatialRef, t_srs: &SpatialRef,
                            x_min: f64, y_min: f64,
                            x_max: f64, y_max: f64,
                            opt_densify_pts: Option<i32>) -> Result<(f64,f64,f64,f64)> {

    let s_is_geo = s_srs.is_geographic();
    let t_is_geo = t_srs.is_geographic();

    let mut bounds: [f64;4] = if s_is_geo && !t_is_geo { [y_min,x_min,y_max,x_max] } else { [x_min,y_min,x_max,y_max] };
    let densify_pts: i32 = opt_densify_pts.unwrap_or(21); // default recommended by GDAL OCTTransformBounds doc

    let mut ct_options = CoordTransformOptions::new()?;
    ct_options.desired_accuracy( 0.0);
    ct_options.set_ballpark_allowed(false);

    CoordTransform::new_with_options(s_srs,t_srs, &ct_options)
        .and_then( |transform| transform.transform_bounds(&mut bounds, densify_pts))
        .map_err( gdal_error)
        .map( |a| {
            if t_is_geo && !s_is_geo { (a[1], a[0], a[3], a[2]) } else { (a[0], a[1], a[2], a[3]) }
        })
}

#[derive(Debug)]
pub struct RasterInfo {
    pub cols: usize,
    pub left: f64,
    pub right: f64,
    pub dx: f64,

    pub rows: usize,
    pub top: f64,
    pub bottom: f64,
    pub dy: f64
}

pub fn get_raster_info (ds: &Dataset)->Result<RasterInfo> {
    let (cols,rows) = ds.raster_size();
    let a = ds.geo_transform()?;

    let left = a[0];
    let dx = a[1];
    let right = left + (dx * cols as f64);

    let top = a[3];
    let dy = a[5];
    let bottom = top + (dy * rows as f64);

    Ok( RasterInfo { cols, left, right, dx, rows, top, bottom, dy } )
}

/// the spatial properties of a raster file we need to describe it in a catalog record
#[derive(Debug,Clone,PartialEq)]
pub struct RasterFootprint {
    /// EPSG code of the native spatial reference system (if it has one)
    pub epsg: Option<u32>,
    /// (rows, cols)
    pub shape: [usize;2],
    /// GDAL geotransform of the native grid
    pub transform: [f64;6],
    /// bounds in native coordinates
    pub native_bbox: BoundingBox<f64>,
    /// bounds in geographic lon/lat degrees
    pub geo_bbox: BoundingBox<f64>,
}

pub fn get_raster_footprint (ds: &Dataset) -> Result<RasterFootprint> {
    let info = get_raster_info(ds)?;
    let transform = ds.geo_transform()?;
    let srs = ds.spatial_ref().ok();

    let epsg = srs.as_ref()
        .filter( |srs| srs.auth_name().map( |n| n.eq_ignore_ascii_case("EPSG")).unwrap_or(false))
        .and_then( |srs| srs.auth_code().ok())
        .and_then( |code| u32::try_from(code).ok());

    let native_bbox = BoundingBox::from_corners( info.left, info.bottom, info.right, info.top);
    let geo_bbox = match srs {
        Some(ref srs) if !srs.is_geographic() => {
            let (west,south,east,north) = transform_bounds_2d( srs, &srs_epsg_4326()?,
                native_bbox.west, native_bbox.south, native_bbox.east, native_bbox.north, None)?;
            BoundingBox::new( west, south, east, north)
        }
        _ => native_bbox
    };

    Ok( RasterFootprint { epsg, shape: [info.rows, info.cols], transform, native_bbox, geo_bbox } )
}

pub fn get_raster_footprint_for_path<P: AsRef<Path>> (path: P) -> Result<RasterFootprint> {
    let ds = Dataset::open( path.as_ref())?;
    get_raster_footprint( &ds)
}

/* #endregion raster geometry */
