// src/header/trace.rs
use crate::header::field::header_record;

header_record! {
    /// 240-byte header preceding every trace's samples.
    ///
    /// Named fields cover bytes 1-204; the remainder is kept verbatim.
    pub struct TraceHeader [240] {
        trace_sequence_line: i32 @ 0 => "traceSequenceLine", "Trace sequence number within line";
        trace_sequence_file: i32 @ 4 => "traceSequenceFile", "Trace sequence number within reel";
        field_record: i32 @ 8 => "fieldRecord", "FFID - Original field record number";
        trace_number: i32 @ 12 => "traceNumber", "Trace number within field record";
        energy_source_point: i32 @ 16 => "energySourcePoint", "SP - Energy source point number";
        cdp: i32 @ 20 => "cdp", "CDP ensemble number";
        cdp_trace: i32 @ 24 => "cdpTrace", "Trace number";
        trace_id: i16 @ 28 => "traceId", "Trace identification code";
        n_summed_traces: i16 @ 30 => "nSummedTraces", "Number of vertically summed traces";
        n_stacked_traces: i16 @ 32 => "nStackedTraces", "Number of horizontally stacked traces";
        data_use: i16 @ 34 => "dataUse", "Data use (1-production, 2-test)";
        source_receiver_offset: i32 @ 36 => "offset", "Distance from source point to receiver group";
        receiver_elevation: i32 @ 40 => "receiverElevation", "Receiver group elevation";
        source_elevation: i32 @ 44 => "sourceElevation", "Surface elevation at source";
        source_depth: i32 @ 48 => "sourceDepth", "Source depth below surface";
        receiver_datum_elevation: i32 @ 52 => "receiverDatumElevation", "Datum elevation at receiver group";
        source_datum_elevation: i32 @ 56 => "sourceDatumElevation", "Datum elevation at source";
        source_water_depth: i32 @ 60 => "sourceWaterDepth", "Water depth at source";
        receiver_water_depth: i32 @ 64 => "receiverWaterDepth", "Water depth at group";
        scalar_elevation: i16 @ 68 => "scalarElevation", "Scalar to all elevations & depths";
        scalar_coordinates: i16 @ 70 => "scalarCoordinates", "Scalar to all coordinates";
        source_x: i32 @ 72 => "sourceX", "Source X coordinate";
        source_y: i32 @ 76 => "sourceY", "Source Y coordinate";
        group_x: i32 @ 80 => "groupX", "Group X coordinate";
        group_y: i32 @ 84 => "groupY", "Group Y coordinate";
        coordinate_units: i16 @ 88 => "coordinateUnits", "Coordinate units (1-len/m, 2-sec/arc)";
        weathering_velocity: i16 @ 90 => "weatheringVelocity", "Weathering velocity";
        subweathering_velocity: i16 @ 92 => "subweatheringVelocity", "Subweathering velocity";
        source_uphole_time: i16 @ 94 => "sourceUpholeTime", "Uphole time at source";
        group_uphole_time: i16 @ 96 => "groupUpholeTime", "Uphole time at group";
        source_static_correction: i16 @ 98 => "sourceStaticCorrection", "Source static correction";
        group_static_correction: i16 @ 100 => "groupStaticCorrection", "Group static correction";
        total_static_applied: i16 @ 102 => "totalStaticApplied", "Total static applied";
        lag_time_a: i16 @ 104 => "lagTimeA", "Lag time A";
        lag_time_b: i16 @ 106 => "lagTimeB", "Lag time B";
        delay_recording_time: i16 @ 108 => "delayRecordingTime", "Delay recording time";
        mute_time_start: i16 @ 110 => "muteTimeStart", "Mute time start";
        mute_time_end: i16 @ 112 => "muteTimeEnd", "Mute time end";
        samples_in_this_trace: i16 @ 114 => "samplesInThisTrace", "Number of samples in this trace";
        sample_interval: i16 @ 116 => "sampleInterval", "Sample interval (µs)";
        gain_type: i16 @ 118 => "gainType", "Gain type of field instruments";
        instrument_gain_constant: i16 @ 120 => "instrumentGainConstant", "Instrument gain constant (dB)";
        instrument_initial_gain: i16 @ 122 => "instrumentInitialGain", "Instrument early or initial gain (dB)";
        correlated: i16 @ 124 => "correlated", "Correlated (1-yes / 2-no)";
        sweep_frequency_start: i16 @ 126 => "sweepFrequencyStart", "Sweep frequency at start";
        sweep_frequency_end: i16 @ 128 => "sweepFrequencyEnd", "Sweep frequency at end";
        sweep_length: i16 @ 130 => "sweepLength", "Sweep length (ms)";
        sweep_type: i16 @ 132 => "sweepType", "Sweep type (1-lin,2-parabol,3-exp,4-other)";
        sweep_trace_taper_length_start: i16 @ 134 => "sweepTraceTaperLengthStart", "Sweep trace taper length at start (ms)";
        sweep_trace_taper_length_end: i16 @ 136 => "sweepTraceTaperLengthEnd", "Sweep trace taper length at end (ms)";
        taper_type: i16 @ 138 => "taperType", "Taper type (1-lin,2-cos²,3-other)";
        alias_filter_frequency: i16 @ 140 => "aliasFilterFrequency", "Alias filter frequency (if used)";
        alias_filter_slope: i16 @ 142 => "aliasFilterSlope", "Alias filter slope";
        notch_filter_frequency: i16 @ 144 => "notchFilterFrequency", "Notch filter frequency (if used)";
        notch_filter_slope: i16 @ 146 => "notchFilterSlope", "Notch filter slope";
        low_cut_frequency: i16 @ 148 => "lowCutFrequency", "Low-cut frequency (if used)";
        high_cut_frequency: i16 @ 150 => "highCutFrequency", "High-cut frequency (if used)";
        low_cut_slope: i16 @ 152 => "lowCutSlope", "Low-cut slope";
        high_cut_slope: i16 @ 154 => "highCutSlope", "High-cut slope";
        year_data_recorded: i16 @ 156 => "yearDataRecorded", "Year data recorded";
        day_of_year: i16 @ 158 => "dayOfYear", "Day of year";
        hour: i16 @ 160 => "hour", "Hour of day";
        minute: i16 @ 162 => "minute", "Minute of hour";
        second: i16 @ 164 => "second", "Second of minute";
        time_basis_code: i16 @ 166 => "timeBasisCode", "Time basis code (1-local,2-GMT,3-other)";
        trace_weighting_factor: i16 @ 168 => "traceWeightingFactor", "Trace weighting factor";
        geophone_group_number_roll1: i16 @ 170 => "geophoneGroupNumberRoll1", "Geophone group number of roll sw pos 1";
        geophone_group_number_first_trace_original: i16 @ 172 => "geophoneGroupNumberFirstTraceOriginal", "Geophone group number of trace #1";
        geophone_group_number_last_trace_original: i16 @ 174 => "geophoneGroupNumberLastTraceOriginal", "Geophone group number of last trace";
        gap_size: i16 @ 176 => "gapSize", "Gap size (total # of groups dropped)";
        over_travel: i16 @ 178 => "overTravel", "Overtravel assoc w taper of beg/end line";
        cdp_x: i32 @ 180 => "cdpX", "CDP X";
        cdp_y: i32 @ 184 => "cdpY", "CDP Y";
        inline_number: i32 @ 188 => "inlineNumber", "Inline number";
        crossline_number: i32 @ 192 => "crosslineNumber", "Crossline number";
        shot_point_number: i32 @ 196 => "shotPointNumber", "Shot point number";
        shot_point_scalar: i16 @ 200 => "shotPointScalar", "Shot point scalar";
        trace_value_measurement_unit: i16 @ 202 => "traceValueMeasurementUnit", "Trace value measurement unit";
    }
}

impl TraceHeader {
    /// Apply the SEG-Y coordinate scalar: negative divides, positive multiplies, zero is 1
    pub fn scaled_coordinate(&self, value: i32) -> f64 {
        apply_scalar(value, self.scalar_coordinates)
    }

    /// Apply the elevation scalar the same way as [`scaled_coordinate`](Self::scaled_coordinate)
    pub fn scaled_elevation(&self, value: i32) -> f64 {
        apply_scalar(value, self.scalar_elevation)
    }
}

fn apply_scalar(value: i32, scalar: i16) -> f64 {
    match scalar {
        0 => value as f64,
        s if s < 0 => value as f64 / -(s as f64),
        s => value as f64 * s as f64,
    }
}
