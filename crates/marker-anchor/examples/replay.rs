//! Replay a recorded session and print the tracked poses.
//!
//! ```text
//! cargo run -p marker-anchor --example replay -- session.json
//! MARKER_ANCHOR_LOG=debug cargo run -p marker-anchor --example replay -- session.json
//! ```

use marker_anchor::replay::Recording;
use marker_anchor::FrameOutput;

#[cfg(feature = "tracing")]
use marker_anchor::core::{init_tracing, TraceFormat};
#[cfg(not(feature = "tracing"))]
use {log::LevelFilter, marker_anchor::core::init_with_level};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::Info)?;
    #[cfg(feature = "tracing")]
    init_tracing(TraceFormat::Compact)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: replay <session.json>");
        return Ok(());
    };

    let recording = Recording::load_json(&path)?;
    let outputs = recording.run();

    let mut tracked = 0usize;
    for (i, out) in outputs.iter().enumerate() {
        match out {
            FrameOutput::Character(pose) => {
                tracked += 1;
                println!(
                    "{i:5} character ({:8.2}, {:8.2}, {:8.2}) {}",
                    pose.location.x, pose.location.y, pose.location.z, pose.rotation
                );
            }
            FrameOutput::Prop(cmd) => println!("{i:5} prop {cmd:?}"),
            FrameOutput::Window(pose) => println!(
                "{i:5} window ({:8.2}, {:8.2}, {:8.2})",
                pose.location.x, pose.location.y, pose.location.z
            ),
            FrameOutput::Hold => {}
        }
    }
    println!("{tracked}/{} frames tracked", outputs.len());

    Ok(())
}
