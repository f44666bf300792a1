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

use std::fs::{self,File};
use std::io::{self,Read,ErrorKind};
use std::path::{Path,PathBuf};
use io::ErrorKind::*;

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn path_to_lossy_string (path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().as_ref().to_string()
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/* #region href strings *****************************************************************************/

// hrefs can be local paths or URLs (possibly with query strings such as signed access tokens), which
// is why we can't just use Path for them

/// split href into (path-part, optional query including the leading '?')
pub fn split_href_query<'a> (href: &'a str) -> (&'a str, Option<&'a str>) {
    match href.find('?') {
        Some(idx) => (&href[..idx], Some(&href[idx..])),
        None => (href, None)
    }
}

/// index of the first char of the last path element in the (query-less) href
fn href_filename_start (path_part: &str) -> usize {
    let idx = path_part.rfind('/').map(|i| i+1).unwrap_or(0);
    if std::path::MAIN_SEPARATOR != '/' {
        idx.max( path_part.rfind(std::path::MAIN_SEPARATOR).map(|i| i+1).unwrap_or(0))
    } else {
        idx
    }
}

/// the last path element of an href, without query
pub fn href_filename<'a> (href: &'a str) -> Option<&'a str> {
    let (path_part,_) = split_href_query(href);
    let name = &path_part[href_filename_start(path_part)..];
    if name.is_empty() { None } else { Some(name) }
}

/// return a new href with the filename replaced by `new_filename`, keeping directory and query parts
pub fn replace_href_filename (href: &str, new_filename: &str) -> String {
    let (path_part,query) = split_href_query(href);
    let i0 = href_filename_start(path_part);
    let mut s = String::with_capacity( href.len() + new_filename.len());
    s.push_str( &path_part[..i0]);
    s.push_str( new_filename);
    if let Some(query) = query { s.push_str(query) }
    s
}

/* #endregion href strings */
