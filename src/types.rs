// src/types.rs
use crate::error::{Result, SegyError};

/// SEG-Y sample format code (binary header bytes 3225-3226)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum SampleFormat {
    IbmFloat = 1,
    Int32 = 2,
    Int16 = 3,
    IeeeFloat = 5,
    Int8 = 8,
}

impl SampleFormat {
    pub fn from_code(code: i16) -> Result<Self> {
        match code {
            1 => Ok(SampleFormat::IbmFloat),
            2 => Ok(SampleFormat::Int32),
            3 => Ok(SampleFormat::Int16),
            5 => Ok(SampleFormat::IeeeFloat),
            8 => Ok(SampleFormat::Int8),
            _ => Err(SegyError::UnsupportedSampleFormat(code)),
        }
    }

    pub fn code(&self) -> i16 {
        *self as i16
    }

    /// Size of one encoded sample in bytes
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            SampleFormat::IbmFloat | SampleFormat::Int32 | SampleFormat::IeeeFloat => 4,
            SampleFormat::Int16 => 2,
            SampleFormat::Int8 => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SampleFormat::IbmFloat => "IBM Float",
            SampleFormat::Int32 => "4-byte integer",
            SampleFormat::Int16 => "2-byte integer",
            SampleFormat::IeeeFloat => "IEEE Float",
            SampleFormat::Int8 => "1-byte integer",
        }
    }
}

/// Measurement system declared in the binary header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementSystem {
    Meters,
    Feet,
    Unknown(i16),
}

impl MeasurementSystem {
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => MeasurementSystem::Meters,
            2 => MeasurementSystem::Feet,
            other => MeasurementSystem::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MeasurementSystem::Meters => "Meters",
            MeasurementSystem::Feet => "Feet",
            MeasurementSystem::Unknown(_) => "Unknown",
        }
    }
}

/// Per-trace label used to annotate the trace axis of a section display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraceAxisKey {
    /// 1-based position of the trace in the file
    #[default]
    TraceIndex,
    Cdp,
    Inline,
    Crossline,
}

impl TraceAxisKey {
    /// Trace header field backing this key, if any
    pub fn header_field(&self) -> Option<&'static str> {
        match self {
            TraceAxisKey::TraceIndex => None,
            TraceAxisKey::Cdp => Some("cdp"),
            TraceAxisKey::Inline => Some("inlineNumber"),
            TraceAxisKey::Crossline => Some("crosslineNumber"),
        }
    }
}
