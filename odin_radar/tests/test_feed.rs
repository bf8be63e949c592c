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

use std::{io, pin::Pin, sync::{Arc, atomic::Ordering}, task::{Context, Poll}};
use tokio::{self, net::TcpListener, io::{duplex, AsyncRead, AsyncWriteExt, ReadBuf}};
use odin_radar::{
    SharedFlightStore,
    errors::OdinRadarError,
    feed::{connect_and_process, process_msgs, IngestStats, SbsLineReader, MAX_RECORD_LEN}
};

// run with "cargo test --test test_feed -- --nocapture"

const MSG_1: &'static str = "MSG,1,111,11111,AA2BC2,111111,2016/03/11,13:07:16.663,2016/03/11,13:07:16.626,UAL814  ,,,,,,,,,,,0\r\n";
const MSG_3: &'static str = "MSG,3,111,11111,A04424,111111,2016/03/11,13:07:05.343,2016/03/11,13:07:05.288,,11025,,,37.17274,-122.03935,,,,,,0\r\n";
const MSG_4: &'static str = "MSG,4,111,11111,AC1FCC,111111,2016/03/11,13:07:07.777,2016/03/11,13:07:07.713,,,316,106,,,1536,,,,,0\r\n";

#[tokio::test]
async fn test_split_records() {
    let (mut tx, rx) = duplex(64);

    // chop records at arbitrary positions, including in the middle of the line terminator
    let data = format!("{MSG_3}{MSG_1}");
    let chunks: Vec<Vec<u8>> = data.as_bytes().chunks(7).map( |c| c.to_vec()).collect();
    let writer = tokio::spawn( async move {
        for c in chunks {
            tx.write_all( &c).await.unwrap();
            tx.flush().await.unwrap();
            tokio::task::yield_now().await;
        }
    });

    let mut lines = SbsLineReader::new( rx);
    assert!( lines.next_line().await.unwrap());
    assert_eq!( lines.line(), MSG_3.trim_end());
    assert!( lines.next_line().await.unwrap());
    assert_eq!( lines.line(), MSG_1.trim_end());

    writer.await.unwrap(); // drops tx, which ends the stream
    assert!( !lines.next_line().await.unwrap());
}

#[tokio::test]
async fn test_trailing_partial_record() {
    let data = format!("{MSG_3}MSG,1,111,11111,AA2BC2,111111");
    let mut lines = SbsLineReader::new( data.as_bytes());

    assert!( lines.next_line().await.unwrap());
    assert!( lines.line().starts_with("MSG,3"));
    assert!( !lines.next_line().await.unwrap()); // unterminated record is never returned
}

#[tokio::test]
async fn test_latin1() {
    let mut data: Vec<u8> = b"MSG,1,111,11111,AA2BC2,111111,,,,,D".to_vec();
    data.extend_from_slice( &[0xC4]);
    data.extend_from_slice( b"LH,,,,,,,,,,,0\n");

    let mut lines = SbsLineReader::new( data.as_slice());
    assert!( lines.next_line().await.unwrap());
    println!("{}", lines.line());
    assert!( lines.line().contains("D\u{C4}LH"));
}

#[tokio::test]
async fn test_process_msgs() {
    let store = SharedFlightStore::new();
    let stats = IngestStats::default();

    let data = format!("{MSG_3}garbage\r\n\r\n{MSG_4}MSG,1,111,11111,AC1FCC,111111,,,,,   ,,,,,,,,,,,0\r\n{MSG_1}");
    process_msgs( data.as_bytes(), &store, &stats).await.unwrap();
    println!("{stats}");

    // bad records in between don't stop ingestion
    assert_eq!( store.len(), 2);
    assert!( store.get("AA2BC2").is_some());
    assert!( store.get("AC1FCC").is_none());

    assert_eq!( stats.lines.load( Ordering::Relaxed), 6);
    assert_eq!( stats.merged.load( Ordering::Relaxed), 2);
    assert_eq!( stats.ignored.load( Ordering::Relaxed), 1);
    assert_eq!( stats.discarded.load( Ordering::Relaxed), 3);
}

/// delivers `data` and then fails with a connection reset
struct ResettingReader {
    data: Vec<u8>,
    pos: usize,
}

impl AsyncRead for ResettingReader {
    fn poll_read (mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>)->Poll<io::Result<()>> {
        if self.pos < self.data.len() {
            let start = self.pos;
            let n = buf.remaining().min( self.data.len() - start);
            buf.put_slice( &self.data[start..start+n]);
            self.pos += n;
            Poll::Ready( Ok(()))
        } else {
            Poll::Ready( Err( io::Error::new( io::ErrorKind::ConnectionReset, "connection reset")))
        }
    }
}

#[tokio::test]
async fn test_read_error() {
    let store = SharedFlightStore::new();
    let stats = IngestStats::default();
    let reader = ResettingReader { data: format!("{MSG_1}MSG,3,1,1,A0").into_bytes(), pos: 0 };

    let res = process_msgs( reader, &store, &stats).await;
    println!("result: {res:?}");

    // transport errors end ingestion, the record cut off by the error is not parsed
    assert!( matches!( res, Err( OdinRadarError::IOError(ref e)) if e.kind() == io::ErrorKind::ConnectionReset));
    assert_eq!( store.len(), 1);
    assert_eq!( stats.lines.load( Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_feed_closed() {
    let listener = TcpListener::bind( "127.0.0.1:0").await.unwrap();
    let url = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn( async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all( MSG_3.as_bytes()).await.unwrap();
        // socket is dropped here, which closes the feed
    });

    let store = SharedFlightStore::new();
    let stats = Arc::new( IngestStats::default());
    let res = connect_and_process( url.clone(), store.clone(), stats.clone()).await;
    server.await.unwrap();
    println!("result: {res:?}");

    assert!( matches!( res, Err( OdinRadarError::FeedClosed(ref u)) if *u == url));
    assert_eq!( store.len(), 1); // what was received before the close is still merged
}

#[tokio::test]
async fn test_oversized_record() {
    let max_len = format!("{}\n", "a".repeat( MAX_RECORD_LEN - 1));
    let data = format!("{}\n{MSG_3}{max_len}{}", "x".repeat( 3 * MAX_RECORD_LEN), "y".repeat( 2 * MAX_RECORD_LEN));
    let mut lines = SbsLineReader::new( data.as_bytes());

    // the oversized record is skipped as a whole
    assert!( lines.next_line().await.unwrap());
    assert_eq!( lines.line(), MSG_3.trim_end());

    // a record that fits exactly is kept
    assert!( lines.next_line().await.unwrap());
    assert_eq!( lines.line().len(), MAX_RECORD_LEN - 1);

    // oversized and unterminated at the end of the feed
    assert!( !lines.next_line().await.unwrap());
}
