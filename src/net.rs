// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! TCP realization of the sync channel: newline-delimited JSON messages over
//! one `TcpStream`. TCP supplies the reliable ordered delivery the protocol
//! assumes; peer discovery stays out of scope (the host prints the address it
//! bound, the joiner types it in).

use crate::error::LedgerError;
use crate::sync::{SyncChannel, SyncEvent, SyncMessage, SyncSession};
use rusqlite::Connection;
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::time::Duration;

/// Short pause before teardown so the peer's final message can land.
const TEARDOWN_GRACE: Duration = Duration::from_secs(1);

pub struct TcpChannel {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl TcpChannel {
    pub fn new(stream: TcpStream) -> Result<Self, LedgerError> {
        let writer = stream
            .try_clone()
            .map_err(|e| LedgerError::Channel(e.to_string()))?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /// Blocks for the next message. `Ok(None)` means the peer closed.
    pub fn recv(&mut self) -> Result<Option<SyncMessage>, LedgerError> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .map_err(|e| LedgerError::Channel(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        let msg = serde_json::from_str(line.trim_end())
            .map_err(|e| LedgerError::Channel(format!("malformed sync message: {}", e)))?;
        Ok(Some(msg))
    }
}

impl SyncChannel for TcpChannel {
    fn send(&mut self, msg: &SyncMessage) -> Result<(), LedgerError> {
        let mut line = serde_json::to_string(msg)
            .map_err(|e| LedgerError::Channel(format!("encode sync message: {}", e)))?;
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| LedgerError::Channel(e.to_string()))
    }

    fn close(&mut self) {
        let _ = self.writer.shutdown(Shutdown::Both);
    }
}

/// Hosts a session: binds `addr`, prints the address the joiner must enter,
/// waits for one peer, then drives the exchange to completion.
pub fn run_host(conn: &Connection, addr: &str) -> Result<(), LedgerError> {
    let listener = TcpListener::bind(addr).map_err(|e| LedgerError::Channel(e.to_string()))?;
    let local = listener
        .local_addr()
        .map_err(|e| LedgerError::Channel(e.to_string()))?;
    println!("Hosting sync at {} — on the other device run: saldo sync join {}", local, local);

    let (stream, peer) = listener
        .accept()
        .map_err(|e| LedgerError::Channel(e.to_string()))?;
    log::info!("peer connected from {}", peer);

    let mut session = SyncSession::host();
    let mut chan = TcpChannel::new(stream)?;
    session.handle_event(conn, &mut chan, SyncEvent::PeerFound)?;
    session.handle_event(conn, &mut chan, SyncEvent::Opened)?;
    pump(conn, &mut session, &mut chan)
}

/// Joins a host at `addr` and drives the exchange to completion.
pub fn run_join(conn: &Connection, addr: &str) -> Result<(), LedgerError> {
    let stream = TcpStream::connect(addr).map_err(|e| LedgerError::Channel(e.to_string()))?;
    let mut session = SyncSession::join();
    let mut chan = TcpChannel::new(stream)?;
    session.handle_event(conn, &mut chan, SyncEvent::PeerFound)?;
    session.handle_event(conn, &mut chan, SyncEvent::Opened)?;
    pump(conn, &mut session, &mut chan)
}

/// Feeds channel messages into the session until it reaches a terminal
/// state, then tears the channel down after a short grace period.
fn pump(
    conn: &Connection,
    session: &mut SyncSession,
    chan: &mut TcpChannel,
) -> Result<(), LedgerError> {
    while !session.is_terminal() {
        match chan.recv() {
            Ok(Some(msg)) => session.handle_event(conn, chan, SyncEvent::Message(msg))?,
            Ok(None) => session.handle_event(conn, chan, SyncEvent::Closed)?,
            Err(e) => {
                session.handle_event(conn, chan, SyncEvent::Failed(e.to_string()))?;
            }
        }
    }
    std::thread::sleep(TEARDOWN_GRACE);
    chan.close();
    Ok(())
}
