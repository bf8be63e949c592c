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

use std::{collections::HashMap, fmt, sync::{Arc,Mutex,MutexGuard}, time::Duration};
use odin_common::{datetime::{self,elapsed_secs}, geo::GeoPos};

pub mod errors;
pub mod config;
pub mod sbs;
pub mod feed;
pub mod display;
pub mod radar;

/// tracks that have not been updated within this duration are dropped from the store
pub const DEFAULT_DROP_AFTER: Duration = Duration::from_secs(60);

/// tracks updated within this duration are rendered as fresh
pub const DEFAULT_FRESH_AFTER: Duration = Duration::from_secs(30);

/// the data model for a tracked aircraft
#[derive(Debug,Clone,PartialEq)]
pub struct Track {
    pub icao24: Arc<str>, // shared with the store index
    pub callsign: Option<String>,
    pub altitude: Option<i64>, // ft
    pub position: Option<GeoPos>,
    pub last_seen: i64, // epoch seconds
}

impl Track {
    pub fn new (icao24: &str, last_seen: i64)->Self {
        Track { icao24: Arc::from( icao24), callsign: None, altitude: None, position: None, last_seen }
    }

    /// field-wise overwrite - fields that are not set in the update keep their value
    pub fn apply (&mut self, update: TrackUpdate, now: i64) {
        if update.callsign.is_some() { self.callsign = update.callsign; }
        if update.altitude.is_some() { self.altitude = update.altitude; }
        if update.position.is_some() { self.position = update.position; }
        self.last_seen = now; // even for empty updates
    }

    /// what we show next to the marker
    pub fn label (&self)->&str {
        self.callsign.as_deref().unwrap_or( self.icao24.as_ref())
    }

    pub fn age_secs (&self, now: i64)->i64 {
        elapsed_secs( self.last_seen, now)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Track( icao24: {}", self.icao24)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        if let Some(alt) = self.altitude { write!( f, ", alt: {alt}")?; }
        if let Some(pos) = &self.position { write!( f, ", pos: {pos}")?; }
        write!( f, ", last_seen: {} )", self.last_seen)
    }
}

/// a partial track update as produced by the feed parser. Only the fields that are set get merged
#[derive(Debug,Clone,Default,PartialEq)]
pub struct TrackUpdate {
    pub callsign: Option<String>,
    pub altitude: Option<i64>,
    pub position: Option<GeoPos>,
}

impl TrackUpdate {
    pub fn callsign (cs: &str)->Self {
        TrackUpdate { callsign: Some(cs.to_string()), ..Default::default() }
    }

    pub fn altitude_position (altitude: i64, position: GeoPos)->Self {
        TrackUpdate { altitude: Some(altitude), position: Some(position), ..Default::default() }
    }
}

/// the table of currently tracked aircraft, in insertion order
#[derive(Debug,Default)]
pub struct FlightStore {
    tracks: Vec<Track>,
    index: HashMap<Arc<str>,usize>,
}

impl FlightStore {
    pub fn new ()->Self { FlightStore::default() }

    pub fn len (&self)->usize { self.tracks.len() }
    pub fn is_empty (&self)->bool { self.tracks.is_empty() }

    pub fn get (&self, icao24: &str)->Option<&Track> {
        self.index.get( icao24).map( |i| &self.tracks[*i])
    }

    /// merge with the wall clock as update time
    pub fn merge (&mut self, icao24: &str, update: TrackUpdate) {
        self.merge_at( icao24, update, datetime::epoch_secs())
    }

    pub fn merge_at (&mut self, icao24: &str, update: TrackUpdate, now: i64) {
        if let Some(i) = self.index.get( icao24) {
            self.tracks[*i].apply( update, now);
        } else {
            let mut track = Track::new( icao24, now);
            track.apply( update, now);
            self.index.insert( track.icao24.clone(), self.tracks.len());
            self.tracks.push( track);
        }
    }

    /// remove all tracks that were last seen more than `drop_after` before `now` and return their ids.
    /// Candidates are collected before anything is removed
    pub fn expire (&mut self, now: i64, drop_after: Duration)->Vec<Arc<str>> {
        let max_age = drop_after.as_secs() as i64;

        let dropped: Vec<Arc<str>> = self.tracks.iter()
            .filter( |t| t.age_secs(now) > max_age)
            .map( |t| t.icao24.clone())
            .collect();

        if !dropped.is_empty() {
            self.tracks.retain( |t| t.age_secs(now) <= max_age);
            self.index = self.tracks.iter().enumerate().map( |(i,t)| (t.icao24.clone(), i)).collect();
        }

        dropped
    }

    /// read-only copy of all tracks in insertion order
    pub fn snapshot (&self)->Vec<Track> {
        self.tracks.clone()
    }
}

/// the handle through which ingest and render loops share a single [`FlightStore`].
/// Each operation holds the lock only for its own duration
#[derive(Debug,Clone,Default)]
pub struct SharedFlightStore(Arc<Mutex<FlightStore>>);

impl SharedFlightStore {
    pub fn new ()->Self { SharedFlightStore::default() }

    // merges are not observable half-done, so a poisoned table is still consistent
    fn lock (&self)->MutexGuard<'_,FlightStore> {
        self.0.lock().unwrap_or_else( |poisoned| poisoned.into_inner())
    }

    pub fn merge (&self, icao24: &str, update: TrackUpdate) {
        self.lock().merge( icao24, update)
    }

    pub fn merge_at (&self, icao24: &str, update: TrackUpdate, now: i64) {
        self.lock().merge_at( icao24, update, now)
    }

    pub fn expire (&self, now: i64, drop_after: Duration)->Vec<Arc<str>> {
        self.lock().expire( now, drop_after)
    }

    pub fn snapshot (&self)->Vec<Track> {
        self.lock().snapshot()
    }

    pub fn get (&self, icao24: &str)->Option<Track> {
        self.lock().get( icao24).cloned()
    }

    pub fn len (&self)->usize {
        self.lock().len()
    }
}
