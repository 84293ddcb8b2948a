#![allow(dead_code)]

use splice::prelude::*;

/// Builds a single track record.
pub fn record(id: u8, name: &str, steps: [u8; STEPS_PER_TRACK]) -> Vec<u8> {
    let mut bytes = vec![id];
    bytes.extend_from_slice(&(name.len() as u32).to_be_bytes());
    bytes.extend_from_slice(name.as_bytes());
    bytes.extend_from_slice(&steps);
    bytes
}

/// Builds a frame whose declared length covers exactly the version, tempo and records.
pub fn frame(version: &str, tempo: f32, records: &[Vec<u8>]) -> Vec<u8> {
    let mut body = Vec::new();
    let mut raw_version = [0u8; VERSION_LEN];
    raw_version[..version.len()].copy_from_slice(version.as_bytes());
    body.extend_from_slice(&raw_version);
    body.extend_from_slice(&tempo.to_le_bytes());
    for record in records {
        body.extend_from_slice(record);
    }

    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&(body.len() as u64).to_be_bytes());
    bytes.extend_from_slice(&body);
    bytes
}

/// Overwrites the declared payload length of a frame.
pub fn set_payload_len(frame: &mut [u8], len: u64) {
    frame[6..14].copy_from_slice(&len.to_be_bytes());
}

pub const FOUR_ON_THE_FLOOR: [u8; STEPS_PER_TRACK] = [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0];
