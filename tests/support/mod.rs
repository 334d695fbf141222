#![allow(dead_code)]

pub mod catalog;
pub mod chain;
pub mod config;
