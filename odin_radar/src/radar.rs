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

use std::sync::Arc;
use tokio::{task, time::{self, MissedTickBehavior}};
use tracing::{debug,info};
use odin_common::{cos, sqrt, pow2, rad, datetime, geo::GeoPos};
use crate::{Track, SharedFlightStore, config::RadarConfig, feed::IngestStats, errors::Result,
    display::{Color, DisplaySink, DrawCmd}};

/// label position relative to the track marker
const LABEL_DX: i32 = 10;
const LABEL_DY: i32 = -2;
/// flight level goes one 8px text line below the label
const FL_DY: i32 = LABEL_DY + 10;

/// placeholder for tracks without altitude
pub const NO_FLIGHT_LEVEL: &str = "XX";

/// map a (distance,bearing) pair onto screen coordinates around (cx,cy) with y pointing down.
/// The distance is split into the two legs of the right triangle within the 90° sector of
/// `angle` (`a` being the leg adjacent to the sector start axis' normal) and those are
/// assigned to screen axes per sector. The legs swap roles at each sector boundary, which
/// keeps the projection continuous at 0, 90, 180 and 270 degrees. Nothing is clipped
pub fn project_polar (distance: f64, angle: f64, cx: f64, cy: f64, scale: f64)->(f64,f64) {
    let beta = 90.0 - (angle % 90.0);
    let a = distance * cos( rad(beta));
    let b = sqrt( (pow2(distance) - pow2(a)).max(0.0)); // rounding can push this slightly below 0

    let a = a * scale;
    let b = b * scale;

    if angle >= 270.0 {
        (cx - b, cy - a)
    } else if angle >= 180.0 {
        (cx - a, cy + b)
    } else if angle >= 90.0 {
        (cx + b, cy + a)
    } else {
        (cx + a, cy - b)
    }
}

/// coarse flight level indicator: the first two digits of the altitude
pub fn flight_level (altitude: Option<i64>)->String {
    match altitude {
        Some(alt) => alt.to_string().chars().take(2).collect(),
        None => NO_FLIGHT_LEVEL.to_string()
    }
}

/// turns flight store snapshots into frames of draw commands
pub struct RadarRenderer {
    config: Arc<RadarConfig>,
    cx: f64,
    cy: f64,
    scale: f64,
}

impl RadarRenderer {
    pub fn new (config: Arc<RadarConfig>)->Self {
        let cx = config.display_width as f64 / 2.0;
        let cy = config.display_height as f64 / 2.0;
        let scale = config.scale();
        RadarRenderer { config, cx, cy, scale }
    }

    pub fn config (&self)->&RadarConfig { self.config.as_ref() }

    /// screen position of `pos` as fractional pixels
    pub fn project (&self, pos: &GeoPos)->(f64,f64) {
        let observer = &self.config.observer;
        let distance = observer.distance_km_to( pos);
        let angle = observer.bearing_deg_to( pos);
        project_polar( distance, angle, self.cx, self.cy, self.scale)
    }

    /// screen position of `pos` truncated to pixels
    pub fn screen_pos (&self, pos: &GeoPos)->(i32,i32) {
        let (x,y) = self.project( pos);
        (x as i32, y as i32)
    }

    /// a complete frame for the given tracks. Each frame starts with a full screen fill and ends
    /// with the observer marker, tracks without position are skipped
    pub fn render (&self, tracks: &[Track], now: i64)->Vec<DrawCmd> {
        let mut frame = Vec::with_capacity( tracks.len() * 3 + 2);
        frame.push( DrawCmd::Fill { color: Color::BLACK });

        for track in tracks {
            if let Some(pos) = &track.position {
                self.render_track( &mut frame, track, pos, now);
            }
        }

        let size = self.config.observer_marker_size;
        let x = self.cx as i32 - (size/2) as i32;
        let y = self.cy as i32 - (size/2) as i32;
        frame.push( DrawCmd::FillRect { x, y, w: size, h: size, color: Color::RED });

        frame
    }

    fn render_track (&self, frame: &mut Vec<DrawCmd>, track: &Track, pos: &GeoPos, now: i64) {
        let (x,y) = self.screen_pos( pos);
        let size = self.config.marker_size;

        let color = if track.age_secs(now) < self.config.fresh_after.as_secs() as i64 { Color::BLUE } else { Color::YELLOW };
        frame.push( DrawCmd::FillRect { x, y, w: size, h: size, color });

        frame.push( DrawCmd::Text { x: x + LABEL_DX, y: y + LABEL_DY, text: track.label().to_string(), fg: Color::WHITE, bg: Color::BLACK });
        frame.push( DrawCmd::Text { x: x + LABEL_DX, y: y + FL_DY, text: flight_level( track.altitude), fg: Color::WHITE, bg: Color::BLACK });
    }

    pub fn draw<D> (&self, sink: &mut D, frame: &[DrawCmd])->Result<()> where D: DisplaySink + ?Sized {
        for cmd in frame {
            cmd.draw_to( sink)?;
        }
        sink.flush()
    }

    /// one render cycle: drop stale tracks, then render and draw what is left. Returns the number of remaining tracks
    pub fn render_cycle<D> (&self, store: &SharedFlightStore, sink: &mut D, now: i64)->Result<usize> where D: DisplaySink + ?Sized {
        let dropped = store.expire( now, self.config.drop_after);
        for icao24 in &dropped {
            debug!("dropped stale track {}", icao24);
        }

        let tracks = store.snapshot();
        let frame = self.render( &tracks, now);
        self.draw( sink, &frame)?;

        Ok(tracks.len())
    }
}

/// the render loop - runs render cycles in the configured interval until drawing fails.
/// Cycles run on the blocking thread pool, the display sink is moved in and out of each one
pub async fn run_render_loop<D> (config: Arc<RadarConfig>, store: SharedFlightStore, stats: Arc<IngestStats>, mut display: D)->Result<()>
    where D: DisplaySink + Send + 'static
{
    let renderer = Arc::new( RadarRenderer::new( config.clone()));
    let mut interval = time::interval( config.update_interval);
    interval.set_missed_tick_behavior( MissedTickBehavior::Delay); // no catch-up bursts after a slow frame
    info!("rendering {}x{} px, coverage {} km around {}", config.display_width, config.display_height, config.radar_coverage_km, config.observer);

    loop {
        interval.tick().await;

        let (r, s) = (renderer.clone(), store.clone());
        let (res, d) = task::spawn_blocking( move || {
            let res = r.render_cycle( &s, &mut display, datetime::epoch_secs());
            (res, display)
        }).await?;
        display = d;

        let n_tracks = res?;
        debug!("rendered {} tracks ({})", n_tracks, stats);
    }
}
