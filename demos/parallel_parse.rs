// demos/parallel_parse.rs
#[cfg(feature = "async")]
use segy_rs::*;

#[cfg(feature = "async")]
fn encoded_survey(lines: i32) -> Result<Vec<u8>> {
    let mut binary = BinaryHeader::default();
    binary.sample_interval = 2000;
    binary.samples_per_trace = 250;
    binary.set_sample_format(SampleFormat::Int16);

    let mut dataset = SegyDataset::new(250)?;
    for line in 0..lines {
        for xline in 0..50 {
            let mut header = TraceHeader::default();
            header.inline_number = 100 + line;
            header.crossline_number = 200 + xline;
            let samples: Vec<f32> = (0..250).map(|s| ((s + xline) as f32 * 0.1).sin() * 1000.0).collect();
            dataset.push_trace(header, &samples)?;
        }
    }
    let file = SegyFile::new(TextHeader::default(), binary, dataset)?;
    Ok(SegyWriter::to_bytes(&file)?.to_vec())
}

#[cfg(feature = "async")]
#[tokio::main]
async fn main() -> Result<()> {
    let worker = AsyncParseWorker::spawn();

    let mut handles = vec![];
    for lines in 1..=4 {
        let worker = worker.clone();
        let bytes = encoded_survey(lines)?;
        handles.push(tokio::spawn(async move { worker.parse(bytes).await }));
    }

    for handle in handles {
        match handle.await.unwrap()? {
            ParseResponse::Success { file } => {
                let inlines = file.dataset.axis_values(TraceAxisKey::Inline);
                println!(
                    "Parsed {} traces, inlines {:?}..={:?}",
                    file.num_traces(),
                    inlines.first(),
                    inlines.last()
                );
            }
            ParseResponse::Error { message } => println!("Parse failed: {}", message),
        }
    }

    worker.close().await?;
    Ok(())
}

#[cfg(not(feature = "async"))]
fn main() {
    println!("This demo requires the 'async' feature.");
    println!("Run with: cargo run --example parallel_parse --features async");
}
