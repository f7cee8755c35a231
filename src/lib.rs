#![no_std]

extern crate alloc;

pub mod encoding;
pub mod gauss;
pub mod good_turing;
pub mod hamming;
pub mod language;
