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

use std::{fs, path::Path, time::Duration};
use serde::{Serialize,Deserialize};
use odin_common::{datetime::secs, geo::GeoPos};
use crate::{DEFAULT_DROP_AFTER, DEFAULT_FRESH_AFTER, errors::{Result,OdinRadarError,config_error}};

#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
pub struct RadarConfig {
    pub url: String, // of the socket from which to read SBS messages
    pub observer: GeoPos, // the radar center
    pub display_width: u32, // px
    pub display_height: u32, // px
    pub radar_coverage_km: f64, // distance that maps to the display edge
    pub fresh_after: Duration, // tracks updated within this duration get the fresh color
    pub drop_after: Duration, // duration after which un-changed tracks are dropped
    pub update_interval: Duration, // render interval
    pub marker_size: u32, // px
    pub observer_marker_size: u32, // px
}

impl Default for RadarConfig {
    fn default()->Self {
        RadarConfig {
            url: "radar:30003".to_string(),
            observer: GeoPos::from_lat_lon_degrees( 50.8695727978406, 7.146051119738116),
            display_width: 240,
            display_height: 240,
            radar_coverage_km: 60.0,
            fresh_after: DEFAULT_FRESH_AFTER,
            drop_after: DEFAULT_DROP_AFTER,
            update_interval: secs(1),
            marker_size: 4,
            observer_marker_size: 6,
        }
    }
}

impl RadarConfig {
    pub fn validate (&self)->Result<()> {
        if self.display_width == 0 || self.display_height == 0 {
            return Err( config_error!( "display size has to be positive: {}x{}", self.display_width, self.display_height))
        }
        if !(self.radar_coverage_km > 0.0) {
            return Err( config_error!( "radar coverage has to be positive: {}", self.radar_coverage_km))
        }
        if self.fresh_after > self.drop_after {
            return Err( config_error!( "fresh_after {:?} exceeds drop_after {:?}", self.fresh_after, self.drop_after))
        }
        if self.update_interval.is_zero() {
            return Err( config_error!( "update_interval has to be positive"))
        }
        Ok(())
    }

    /// pixels per km
    pub fn scale (&self)->f64 {
        (self.display_width as f64 / 2.0) / self.radar_coverage_km
    }
}

/// load and validate a RON config file
pub fn load_config<P: AsRef<Path>> (path: P)->Result<RadarConfig> {
    let data = fs::read( path.as_ref())?;
    let config: RadarConfig = ron::de::from_bytes( data.as_slice())?;
    config.validate()?;
    Ok(config)
}
