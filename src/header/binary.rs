// src/header/binary.rs
use crate::error::{Result, SegyError};
use crate::header::field::header_record;
use crate::types::{MeasurementSystem, SampleFormat};

header_record! {
    /// 400-byte binary file header (file bytes 3201-3600).
    ///
    /// Bytes outside the named fields (unassigned and revision areas) are
    /// carried through a decode/encode round trip unchanged.
    pub struct BinaryHeader [400] {
        job_id: i32 @ 0 => "jobId", "Job identification number";
        line_key: i32 @ 4 => "lineKey", "Line number";
        reel_key: i32 @ 8 => "reelKey", "Reel number";
        traces_per_ensemble: i16 @ 12 => "tracesPerEnsemble", "Number of data traces per ensemble";
        aux_traces: i16 @ 14 => "auxTraces", "Number of auxiliary traces per ensemble";
        sample_interval: i16 @ 16 => "sampleInterval", "Sample interval (µs)";
        sample_interval_original: i16 @ 18 => "sampleIntervalOriginal", "Sample interval of original field recording (µs)";
        samples_per_trace: i16 @ 20 => "samplesPerTrace", "Number of samples per data trace";
        samples_per_trace_original: i16 @ 22 => "samplesPerTraceOriginal", "Number of samples per trace for original field recording";
        sample_format: i16 @ 24 => "sampleFormat", "Data sample format code";
        ensemble_fold: i16 @ 26 => "ensembleFold", "Ensemble fold";
        trace_sorting: i16 @ 28 => "traceSorting", "Trace sorting code";
        vertical_sum_code: i16 @ 30 => "verticalSumCode", "Vertical sum code";
        sweep_frequency_start: i16 @ 32 => "sweepFrequencyStart", "Sweep frequency at start (Hz)";
        sweep_frequency_end: i16 @ 34 => "sweepFrequencyEnd", "Sweep frequency at end (Hz)";
        sweep_length: i16 @ 36 => "sweepLength", "Sweep length (ms)";
        sweep_type: i16 @ 38 => "sweepType", "Sweep type code";
        trace_number_sweep_channel: i16 @ 40 => "traceNumberSweepChannel", "Trace number of sweep channel";
        sweep_taper_start: i16 @ 42 => "sweepTaperStart", "Sweep trace taper length at start (ms)";
        sweep_taper_end: i16 @ 44 => "sweepTaperEnd", "Sweep trace taper length at end (ms)";
        taper_type: i16 @ 46 => "taperType", "Taper type";
        correlated_data_traces: i16 @ 48 => "correlatedDataTraces", "Correlated data traces (1-no, 2-yes)";
        binary_gain: i16 @ 50 => "binaryGain", "Binary gain recovered (1-yes, 2-no)";
        amplitude_recovery_method: i16 @ 52 => "amplitudeRecoveryMethod", "Amplitude recovery method";
        measurement_system: i16 @ 54 => "measurementSystem", "Measurement system (1-meters, 2-feet)";
        impulse_signal_polarity: i16 @ 56 => "impulseSignalPolarity", "Impulse signal polarity";
        vibratory_polarity_code: i16 @ 58 => "vibratoryPolarityCode", "Vibratory polarity code";
    }
}

impl BinaryHeader {
    /// Position of the binary header in a SEG-Y file
    pub const FILE_OFFSET: usize = 3200;

    /// Declared sample format, failing on codes outside {1, 2, 3, 5, 8}
    pub fn sample_format(&self) -> Result<SampleFormat> {
        SampleFormat::from_code(self.sample_format)
    }

    pub fn set_sample_format(&mut self, format: SampleFormat) {
        self.sample_format = format.code();
    }

    pub fn measurement_system(&self) -> MeasurementSystem {
        MeasurementSystem::from_code(self.measurement_system)
    }

    /// Sample interval converted from microseconds to milliseconds
    pub fn sample_interval_ms(&self) -> f32 {
        self.sample_interval as f32 / 1000.0
    }

    /// Duration of one trace in milliseconds
    pub fn record_length_ms(&self) -> f64 {
        self.samples_per_trace as f64 * self.sample_interval as f64 / 1000.0
    }

    /// Size of one trace record (240-byte header plus samples)
    pub fn trace_record_size(&self) -> Result<usize> {
        let format = self.sample_format()?;
        let samples = self.checked_samples_per_trace()?;
        Ok(crate::header::TraceHeader::SIZE + samples * format.bytes_per_sample())
    }

    /// Samples per trace as a length, rejecting zero and negative values
    pub fn checked_samples_per_trace(&self) -> Result<usize> {
        if self.samples_per_trace <= 0 {
            return Err(SegyError::MalformedHeader(format!(
                "samples per trace must be positive, found {}",
                self.samples_per_trace
            )));
        }
        Ok(self.samples_per_trace as usize)
    }

    /// Check the invariants every parsed or edited header must hold
    pub fn validate(&self) -> Result<()> {
        self.sample_format()?;
        self.checked_samples_per_trace()?;
        if self.sample_interval <= 0 {
            return Err(SegyError::MalformedHeader(format!(
                "sample interval must be positive, found {}",
                self.sample_interval
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> BinaryHeader {
        let mut header = BinaryHeader::default();
        header.job_id = 7;
        header.sample_interval = 4000;
        header.samples_per_trace = 100;
        header.sample_format = 5;
        header.measurement_system = 1;
        header
    }

    #[test]
    fn test_offsets_match_layout() {
        let bytes = sample_header().encode();
        assert_eq!(&bytes[0..4], &[0, 0, 0, 7]);
        assert_eq!(&bytes[16..18], &4000i16.to_be_bytes());
        assert_eq!(&bytes[20..22], &100i16.to_be_bytes());
        assert_eq!(&bytes[24..26], &5i16.to_be_bytes());
    }

    #[test]
    fn test_decode_encode_roundtrip() {
        let header = sample_header();
        let decoded = BinaryHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.sample_interval, 4000);
    }

    #[test]
    fn test_unknown_bytes_preserved() {
        let mut bytes = sample_header().encode();
        bytes[300] = 0x01;
        bytes[301] = 0x00; // revision number area
        bytes[399] = 0xEE;

        let mut header = BinaryHeader::decode(&bytes).unwrap();
        header.job_id = 99;
        let encoded = header.encode();

        assert_eq!(encoded[300], 0x01);
        assert_eq!(encoded[399], 0xEE);
        assert_eq!(&encoded[0..4], &99i32.to_be_bytes());
    }

    #[test]
    fn test_decode_short_block() {
        let err = BinaryHeader::decode(&[0u8; 100]).unwrap_err();
        assert!(matches!(err, SegyError::MalformedHeader(_)));
    }

    #[test]
    fn test_named_access() {
        let mut header = sample_header();
        assert_eq!(header.get("sampleInterval"), Some(4000));
        assert_eq!(header.get("nope"), None);

        header.set("ensembleFold", 12).unwrap();
        assert_eq!(header.ensemble_fold, 12);

        assert!(matches!(
            header.set("ensembleFold", 40_000),
            Err(SegyError::FieldOutOfRange { .. })
        ));
        assert!(matches!(header.set("nope", 1), Err(SegyError::FieldNotFound(_))));
    }

    #[test]
    fn test_field_table() {
        assert_eq!(BinaryHeader::FIELDS.len(), 27);
        let spec = BinaryHeader::field_spec("sampleFormat").unwrap();
        assert_eq!(spec.offset, 24);
        assert_eq!(spec.width, 2);
        assert_eq!(spec.byte_range(), 25..=26);
    }

    #[test]
    fn test_derived_values() {
        let header = sample_header();
        assert_eq!(header.sample_format().unwrap(), SampleFormat::IeeeFloat);
        assert_eq!(header.measurement_system(), MeasurementSystem::Meters);
        assert_eq!(header.sample_interval_ms(), 4.0);
        assert_eq!(header.record_length_ms(), 400.0);
        assert_eq!(header.trace_record_size().unwrap(), 240 + 400);
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_headers() {
        let mut header = sample_header();
        header.samples_per_trace = 0;
        assert!(matches!(header.validate(), Err(SegyError::MalformedHeader(_))));

        let mut header = sample_header();
        header.sample_format = 4;
        assert!(matches!(
            header.validate(),
            Err(SegyError::UnsupportedSampleFormat(4))
        ));

        let mut header = sample_header();
        header.sample_interval = -1;
        assert!(header.validate().is_err());
    }
}
