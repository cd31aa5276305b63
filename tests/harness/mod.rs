#![allow(dead_code)]

pub mod scripted_source;
pub mod temp_db;
