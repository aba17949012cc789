// demos/agc_section.rs
use segy_rs::prelude::*;

fn main() -> Result<()> {
    let dir = std::env::temp_dir();
    let input = dir.join("agc_section_input.sgy");
    let output = dir.join("agc_section_gained.sgy");

    // A decaying synthetic shot record, stored as IEEE floats
    let mut binary = BinaryHeader::default();
    binary.sample_interval = 4000;
    binary.samples_per_trace = 500;
    binary.set_sample_format(SampleFormat::IeeeFloat);

    let mut dataset = SegyDataset::with_capacity(500, 120)?;
    for t in 0..120 {
        let mut header = TraceHeader::default();
        header.trace_sequence_line = t + 1;
        header.cdp = 1000 + t;
        let samples: Vec<f32> = (0..500)
            .map(|s| {
                let time = s as f32 * 0.004;
                (time * 60.0 + t as f32 * 0.1).sin() * 5000.0 * (-time * 3.0).exp()
            })
            .collect();
        dataset.push_trace(header, &samples)?;
    }
    let source = SegyFile::new(TextHeader::new("C 1 AGC DEMO SECTION"), binary, dataset)?;
    SegyWriter::create(&input, &source)?;

    let reader = SegyReader::open(&input)?;
    println!(
        "Read {} traces ({}) from {}",
        reader.summary().traces,
        reader.summary().format.name(),
        input.display()
    );
    let file = reader.into_file();

    // Gain the middle of the section, the way a viewer would for one screen
    let mut cache = WindowCache::default();
    let request = WindowRequest::new(40..80).with_agc(AgcSettings::enabled(250.0));
    let window = cache.file_window(&file, &request)?;

    let mut gained = SegyDataset::with_capacity(file.dataset.samples_per_trace(), window.len())?;
    for (offset, samples) in window.iter().enumerate() {
        let header = file.dataset.header(40 + offset).cloned().unwrap_or_default();
        gained.push_trace(header, samples)?;
    }

    let mut binary = file.binary_header.clone();
    binary.set_sample_format(SampleFormat::IbmFloat);
    let result = SegyFile::new(file.text_header.clone(), binary, gained)?;
    SegyWriter::create(&output, &result)?;

    println!(
        "Wrote {} AGC-balanced traces as IBM floats to {}",
        result.num_traces(),
        output.display()
    );

    Ok(())
}
