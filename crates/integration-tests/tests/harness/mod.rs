#![allow(dead_code)]

pub mod cloud;
pub mod config;
pub mod server;
