// src/utils/mod.rs
mod ebcdic;

pub(crate) use ebcdic::*;
