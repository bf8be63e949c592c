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
#![allow(unused)]

use odin_common::geo::*;
use odin_common::geo_constants::KM_PER_DEGREE;

// run with "cargo test --test test_geo -- --nocapture"

fn assert_close (actual: f64, expected: f64, eps: f64) {
    assert!( (actual - expected).abs() <= eps, "expected {expected} +- {eps}, got {actual}");
}

#[test]
fn test_zero_distance() {
    for (lat,lon) in [(0.0,0.0), (50.8695727978406, 7.146051119738116), (-33.9, 151.2), (89.9, -179.9)] {
        assert_eq!( distance_km( lat, lon, lat, lon), 0.0);
    }
}

#[test]
fn test_distance() {
    // one degree of longitude on the equator
    let d = distance_km( 0.0, 0.0, 0.0, 1.0);
    println!("1deg lon at equator: {d} km");
    assert_close( d, KM_PER_DEGREE, 1e-9);
    assert_close( d, 111.195, 0.001);

    // one degree of latitude anywhere
    assert_close( distance_km( 45.0, 10.0, 46.0, 10.0), KM_PER_DEGREE, 1e-6);

    // symmetric
    let d1 = distance_km( 37.0, -122.0, 33.0, -118.0);
    let d2 = distance_km( 33.0, -118.0, 37.0, -122.0);
    assert_close( d1, d2, 1e-9);

    // antipodes
    assert_close( distance_km( 0.0, 0.0, 0.0, 180.0), KM_PER_DEGREE * 180.0, 1e-6);
}

#[test]
fn test_cardinal_bearings() {
    assert_close( bearing_deg( 0.0, 0.0, 1.0, 0.0), 0.0, 1e-9);
    assert_close( bearing_deg( 0.0, 0.0, 0.0, 1.0), 90.0, 1e-9);
    assert_close( bearing_deg( 0.0, 0.0, -1.0, 0.0), 180.0, 1e-9);
    assert_close( bearing_deg( 0.0, 0.0, 0.0, -1.0), 270.0, 1e-9);
}

#[test]
fn test_bearing_range() {
    // negative raw atan2 angles have to be normalized into [0,360)
    let b = bearing_deg( 0.0, 0.0, 1.0, -1.0);
    println!("bearing to NW: {b}");
    assert!( b >= 0.0 && b < 360.0);
    assert_close( b, 315.0, 0.05);

    for i in 0..72 {
        let θ = (i as f64 * 5.0).to_radians();
        let b = bearing_deg( 50.0, 7.0, 50.0 + 0.3 * θ.cos(), 7.0 + 0.3 * θ.sin());
        assert!( b >= 0.0 && b < 360.0, "bearing out of range: {b}");
    }
}

#[test]
fn test_bearing_continuity() {
    // small steps around each quadrant boundary should not jump
    let eps = 1e-6;
    for (dlat,dlon,expected) in [(1.0,eps,0.0), (eps,1.0,90.0), (-1.0,eps,180.0), (eps,-1.0,270.0)] {
        let b1 = bearing_deg( 0.0, 0.0, dlat, dlon);
        let b2 = bearing_deg( 0.0, 0.0, dlat - eps, dlon - eps);
        let diff = (b1 - b2).abs();
        let diff = if diff > 180.0 { 360.0 - diff } else { diff };
        assert!( diff < 0.01, "bearing jumps at {expected}: {b1} vs {b2}");
    }
}

#[test]
fn test_nan_propagation() {
    assert!( distance_km( f64::NAN, 0.0, 0.0, 0.0).is_nan());
    assert!( bearing_deg( 0.0, f64::NAN, 0.0, 0.0).is_nan());
}

#[test]
fn test_geo_pos() {
    let observer = GeoPos::from_lat_lon_degrees( 0.0, 0.0);
    let target = GeoPos::from_lat_lon_degrees( 0.0, 1.0);
    assert_close( observer.distance_km_to(&target), KM_PER_DEGREE, 1e-9);
    assert_close( observer.bearing_deg_to(&target), 90.0, 1e-9);

    let input = "(latitude: 50.87, longitude: 7.15)";
    let p: GeoPos = ron::from_str(input).unwrap();
    println!("deserialized GeoPos: {p}");
    assert_eq!( p, GeoPos::from_lat_lon_degrees( 50.87, 7.15));
}
