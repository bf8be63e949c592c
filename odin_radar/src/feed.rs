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

use std::{fmt, sync::{Arc, atomic::{AtomicU64,Ordering}}};
use tokio::{self, net::TcpStream, io::{AsyncRead, AsyncReadExt, BufReader, AsyncBufReadExt}};
use tracing::{debug,info,warn};
use crate::{SharedFlightStore, errors::{Result,OdinRadarError}, sbs::{process_line,SbsOutcome}};

/// upper bound for a single feed record in bytes (including the line terminator). SBS records
/// are well below 200 bytes, anything longer than this is dropped
pub const MAX_RECORD_LEN: usize = 1024;

/// reassembles feed records from a byte source that delivers text in arbitrary chunks.
/// Only complete, newline terminated records are returned - a partial record is kept until the
/// rest arrives with a subsequent read. The feed is single byte text which we decode as Latin-1
pub struct SbsLineReader<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
    line: String,
}

impl<R> SbsLineReader<R> where R: AsyncRead + Unpin {
    pub fn new (reader: R)->Self {
        SbsLineReader { reader: BufReader::with_capacity( 8192, reader), buf: Vec::with_capacity(256), line: String::with_capacity(256) }
    }

    /// read the next complete record into `line()`. Returns false at the end of the stream,
    /// in which case an unterminated trailing record is dropped. Records exceeding
    /// [`MAX_RECORD_LEN`] are skipped
    pub async fn next_line (&mut self)->Result<bool> {
        loop {
            let n = self.read_chunk().await?;

            if n == 0 {
                return Ok(false)
            }
            if self.buf.last() == Some(&b'\n') {
                break
            }
            if n < MAX_RECORD_LEN {
                debug!("dropping incomplete record at end of feed: {} bytes", n);
                return Ok(false)
            }

            warn!("dropping oversized feed record");
            if !self.skip_record().await? {
                return Ok(false)
            }
        }

        self.line.clear();
        self.line.extend( self.buf.iter().map( |b| *b as char));
        let len = self.line.trim_end_matches( ['\r','\n']).len();
        self.line.truncate( len);
        Ok(true)
    }

    /// read up to the next newline but never more than MAX_RECORD_LEN bytes into `buf`
    async fn read_chunk (&mut self)->Result<usize> {
        self.buf.clear();
        let n = (&mut self.reader).take( MAX_RECORD_LEN as u64).read_until( b'\n', &mut self.buf).await?;
        Ok(n)
    }

    /// consume the rest of an oversized record. Returns false if the stream ended before
    async fn skip_record (&mut self)->Result<bool> {
        loop {
            let n = self.read_chunk().await?;
            if self.buf.last() == Some(&b'\n') { return Ok(true) }
            if n < MAX_RECORD_LEN { return Ok(false) }
        }
    }

    pub fn line (&self)->&str { self.line.as_str() }
}

/// ingest counters, updated by the ingest loop and reported by the render loop
#[derive(Debug,Default)]
pub struct IngestStats {
    pub lines: AtomicU64,
    pub merged: AtomicU64,
    pub ignored: AtomicU64,
    pub discarded: AtomicU64,
}

impl IngestStats {
    pub fn record (&self, outcome: &SbsOutcome) {
        self.lines.fetch_add( 1, Ordering::Relaxed);
        let counter = match outcome {
            SbsOutcome::Merged => &self.merged,
            SbsOutcome::Ignored => &self.ignored,
            SbsOutcome::Discarded(_) => &self.discarded,
        };
        counter.fetch_add( 1, Ordering::Relaxed);
    }
}

impl fmt::Display for IngestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "lines: {}, merged: {}, ignored: {}, discarded: {}",
            self.lines.load(Ordering::Relaxed), self.merged.load(Ordering::Relaxed),
            self.ignored.load(Ordering::Relaxed), self.discarded.load(Ordering::Relaxed))
    }
}

/// the ingest loop: read records from `reader` until the stream ends and merge them into `store`.
/// Malformed records are logged and skipped, read errors terminate the loop
pub async fn process_msgs<R> (reader: R, store: &SharedFlightStore, stats: &IngestStats)->Result<()> where R: AsyncRead + Unpin {
    let mut lines = SbsLineReader::new( reader);

    while lines.next_line().await? {
        let outcome = process_line( store, lines.line());
        if let SbsOutcome::Discarded(reason) = &outcome {
            debug!("discarded '{}': {}", lines.line(), reason);
        }
        stats.record( &outcome);
    }

    Ok(())
}

/// connect to the feed socket and run the ingest loop on it. There is no reconnect, hence
/// the feed closing is reported as an error
pub async fn connect_and_process (url: String, store: SharedFlightStore, stats: Arc<IngestStats>)->Result<()> {
    let stream = TcpStream::connect( url.as_str()).await?;
    info!("connected to SBS feed {}", url);

    process_msgs( stream, &store, &stats).await?;

    warn!("SBS feed {} closed", url);
    Err( OdinRadarError::FeedClosed(url))
}
