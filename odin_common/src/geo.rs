/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
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
#![allow(unused,uncommon_codepoints,non_snake_case)]

//! great circle computations on a spherical earth (mean radius).
//! Inputs are geodetic degrees that are not range checked - out-of-range values produce
//! defined but meaningless results, NaN inputs propagate.

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::{sin, sin2, cos, asin, atan2, sqrt, deg, rad};
use crate::geo_constants::MEAN_EARTH_RADIUS_KM;

/// haversine distance in kilometers between two lat/lon points given in degrees
pub fn distance_km (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    let φ1 = rad(lat1);
    let φ2 = rad(lat2);
    let Δφ = φ2 - φ1;
    let Δλ = rad(lon2) - rad(lon1);

    let a = sin2(Δφ/2.0) + cos(φ1) * cos(φ2) * sin2(Δλ/2.0);
    let c = 2.0 * asin( sqrt(a));
    c * MEAN_EARTH_RADIUS_KM
}

/// initial great circle bearing from point 1 to point 2 in degrees [0,360)
pub fn bearing_deg (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    let φ1 = rad(lat1);
    let φ2 = rad(lat2);
    let Δλ = rad(lon2) - rad(lon1);

    let y = sin(Δλ) * cos(φ2);
    let x = cos(φ1) * sin(φ2) - sin(φ1) * cos(φ2) * cos(Δλ);
    let θ = atan2( y, x);

    (deg(θ) + 360.0) % 360.0
}

/// a simple lat/lon position in degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPos {
    #[serde(alias="lat")]
    pub latitude: f64,

    #[serde(alias="lon")]
    pub longitude: f64
}

impl GeoPos {
    pub fn from_lat_lon_degrees (latitude: f64, longitude: f64)->Self {
        GeoPos { latitude, longitude }
    }

    pub fn distance_km_to (&self, other: &GeoPos)->f64 {
        distance_km( self.latitude, self.longitude, other.latitude, other.longitude)
    }

    pub fn bearing_deg_to (&self, other: &GeoPos)->f64 {
        bearing_deg( self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl fmt::Display for GeoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5}]", self.latitude, self.longitude)
    }
}
