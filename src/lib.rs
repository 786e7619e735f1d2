// src/lib.rs

//! Precipitation Mailer Library
//!
//! Scrapes the MARFC daily precipitation report, picks the station nearest
//! a fixed reference location and emails its reading.

pub mod config;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod mail;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
