#![allow(dead_code)]

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::TempDir;
use waymark_core::core::backing::RedbBacking;
use waymark_core::types::Config;

pub fn open_backing(temp: &TempDir) -> RedbBacking {
    let config = Config {
        base_path: temp.path().to_path_buf(),
    };
    RedbBacking::open(&config).unwrap()
}

pub fn at(millis: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(millis)
}
