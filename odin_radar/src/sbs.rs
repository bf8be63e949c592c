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

use std::{fmt, str::FromStr};
use odin_common::geo::GeoPos;
use crate::{SharedFlightStore, TrackUpdate, errors::Discard};

const TRANSMISSION_TYPE: usize = 1;
const ICAO24: usize = 4;
const CALLSIGN: usize = 10;
const ALTITUDE: usize = 11;
const LATITUDE: usize = 14;
const LONGITUDE: usize = 15;

/// the SBS messages we process
#[derive(Debug,Clone,PartialEq)]
pub enum SbsMsg<'a> {
    AircraftIdentification { icao24: &'a str, callsign: &'a str },
    AirbornePosition { icao24: &'a str, altitude: i64, position: GeoPos },
    Ignored { transmission_type: &'a str },
}

impl<'a> SbsMsg<'a> {
    /// the store update for this message, None if it does not affect the store
    pub fn to_update (&self)->Option<(&'a str,TrackUpdate)> {
        match *self {
            SbsMsg::AircraftIdentification { icao24, callsign } => Some( (icao24, TrackUpdate::callsign( callsign)) ),
            SbsMsg::AirbornePosition { icao24, altitude, position } => Some( (icao24, TrackUpdate::altitude_position( altitude, position)) ),
            SbsMsg::Ignored {..} => None
        }
    }
}

impl<'a> fmt::Display for SbsMsg<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SbsMsg::AircraftIdentification { icao24, callsign } => write!( f, "AircraftIdentification( icao24: {icao24}, callsign: {callsign} )"),
            SbsMsg::AirbornePosition { icao24, altitude, position } => write!( f, "AirbornePosition( icao24: {icao24}, altitude: {altitude}, position: {position} )"),
            SbsMsg::Ignored { transmission_type } => write!( f, "Ignored( transmission_type: {transmission_type} )"),
        }
    }
}

/// what happened to a processed feed line
#[derive(Debug,Clone,PartialEq)]
pub enum SbsOutcome {
    Merged,
    Ignored,
    Discarded(Discard)
}

/// SBS-1 BaseStation socket data as produced by dump1090 and friends (port 30003),
/// see http://woodair.net/SBS/Article/Barebones42_Socket_Data.htm
///
///  MSG,1,111,11111,AA2BC2,111111,2016/03/11,13:07:16.663,2016/03/11,13:07:16.626,UAL814  ,,,,,,,,,,,0
///  MSG,3,111,11111,A04424,111111,2016/03/11,13:07:05.343,2016/03/11,13:07:05.288,,11025,,,37.17274,-122.03935,,,,,,0
///
/// fields we use (0-based):
///   1: transmission type (1: identification, 3: airborne position)
///   4: ICAO 24 bit id
///  10: callsign
///  11: mode-C altitude (ft)
///  14: latitude
///  15: longitude
///
/// Other fields are never looked at, i.e. they can't make a message invalid.
/// Transmission types other than 1 and 3 are `Ignored`, which is not an error
pub fn parse_msg (line: &str)->Result<SbsMsg<'_>,Discard> {
    let line = line.trim_end_matches( ['\r','\n']);
    let fields: Vec<&str> = line.split(',').collect();

    let transmission_type = field( &fields, TRANSMISSION_TYPE)?.trim();
    match transmission_type {
        "1" => parse_aircraft_identification( &fields),
        "3" => parse_airborne_position( &fields),
        _ => Ok( SbsMsg::Ignored { transmission_type })
    }
}

fn parse_aircraft_identification<'a> (fields: &[&'a str])->Result<SbsMsg<'a>,Discard> {
    require( fields, CALLSIGN)?;
    let icao24 = icao24( fields)?;

    let callsign = fields[CALLSIGN].trim();
    if callsign.is_empty() {
        return Err( Discard::EmptyCallsign)
    }

    Ok( SbsMsg::AircraftIdentification { icao24, callsign })
}

/// altitude and position are merged atomically - if any of them is missing or invalid we drop the whole message
fn parse_airborne_position<'a> (fields: &[&'a str])->Result<SbsMsg<'a>,Discard> {
    require( fields, LONGITUDE)?;
    let icao24 = icao24( fields)?;

    let altitude: i64 = parse_field( fields, ALTITUDE, "altitude")?;
    let latitude: f64 = parse_field( fields, LATITUDE, "latitude")?;
    let longitude: f64 = parse_field( fields, LONGITUDE, "longitude")?;

    if !latitude.is_finite() {
        return Err( Discard::InvalidField { field: "latitude", value: fields[LATITUDE].to_string() })
    }
    if !longitude.is_finite() {
        return Err( Discard::InvalidField { field: "longitude", value: fields[LONGITUDE].to_string() })
    }

    let position = GeoPos::from_lat_lon_degrees( latitude, longitude);
    Ok( SbsMsg::AirbornePosition { icao24, altitude, position })
}

fn require (fields: &[&str], idx: usize)->Result<(),Discard> {
    if fields.len() > idx {
        Ok(())
    } else {
        Err( Discard::TooFewFields { found: fields.len(), required: idx+1 })
    }
}

fn field<'a> (fields: &[&'a str], idx: usize)->Result<&'a str,Discard> {
    require( fields, idx)?;
    Ok( fields[idx])
}

fn icao24<'a> (fields: &[&'a str])->Result<&'a str,Discard> {
    let icao24 = field( fields, ICAO24)?.trim();
    if icao24.is_empty() { Err( Discard::MissingIcao24) } else { Ok(icao24) }
}

fn parse_field<T: FromStr> (fields: &[&str], idx: usize, name: &'static str)->Result<T,Discard> {
    let s = field( fields, idx)?.trim();
    if s.is_empty() {
        Err( Discard::MissingField(name))
    } else {
        s.parse::<T>().map_err( |_| Discard::InvalidField { field: name, value: s.to_string() })
    }
}

/// parse a single feed line and merge the result into the store
pub fn process_line (store: &SharedFlightStore, line: &str)->SbsOutcome {
    match parse_msg( line) {
        Ok(msg) => {
            if let Some((icao24,update)) = msg.to_update() {
                store.merge( icao24, update);
                SbsOutcome::Merged
            } else {
                SbsOutcome::Ignored
            }
        }
        Err(discard) => SbsOutcome::Discarded(discard)
    }
}
