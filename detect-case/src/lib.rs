//! Command-line harness around [`ergative_detector`]: reads labelled datasets
//! and parser output, runs the detector and reports accuracy and F1.

pub mod config;
pub mod dataset;
pub mod evaluate;
pub mod logging;
pub mod parses;
pub mod report;
