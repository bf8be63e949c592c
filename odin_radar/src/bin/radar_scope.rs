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

use std::{io, path::PathBuf, sync::Arc};
use tokio;
use anyhow::Result;
use clap::Parser;
use tracing::{error,info};
use tracing_subscriber::EnvFilter;
use odin_radar::{
    SharedFlightStore,
    config::{load_config, RadarConfig},
    display::{RecordingDisplay, TextDisplay},
    feed::{connect_and_process, IngestStats},
    radar::run_render_loop
};

#[derive(Parser, Debug)]
#[command(version, about = "radar scope for SBS (BaseStation) ADS-B feeds")]
pub struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// address of the SBS socket, overrides the config
    #[arg(short,long)]
    pub url: Option<String>,

    /// don't draw to the terminal, log frames at debug level instead
    #[arg(long)]
    pub headless: bool,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))  // use RUST_LOG to set max level
        .with_writer( io::stderr) // stdout is our display
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config( path)?,
        None => RadarConfig::default()
    };
    if let Some(url) = &args.url {
        config.url = url.clone();
    }
    let config = Arc::new(config);
    info!("using config {:?}", config);

    // the only state shared between the two loops
    let store = SharedFlightStore::new();
    let stats = Arc::new( IngestStats::default());

    let ingest = tokio::spawn( connect_and_process( config.url.clone(), store.clone(), stats.clone()));
    let render = if args.headless {
        tokio::spawn( run_render_loop( config.clone(), store.clone(), stats.clone(), RecordingDisplay::new()))
    } else {
        let display = TextDisplay::new( config.display_width, config.display_height, io::stdout());
        tokio::spawn( run_render_loop( config.clone(), store.clone(), stats.clone(), display))
    };

    // both loops are supposed to run forever, whichever one returns first ends the process
    let res = tokio::select! {
        res = ingest => res?,
        res = render => res?,
    };
    if let Err(e) = &res {
        error!("radar terminated: {}", e);
    }
    Ok(res?)
}
