#![allow(dead_code)]

pub mod fake_tmdb;
pub mod helpers;
