//! End-to-end checks of the analysis components on synthetic images.

mod definitions;
mod report;
mod space;
mod tables;
