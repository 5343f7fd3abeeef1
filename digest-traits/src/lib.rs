#![no_std]

pub mod digest;
