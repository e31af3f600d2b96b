//! handsign demo — drives a scripted landmark detector through a
//! recognition session and logs accepted letters and running stats.
//!
//! Stands in for the camera/UI consumer: real integrations implement
//! [`handsign::HandDetector`] over an actual landmark model and feed
//! frames the same way.

use clap::Parser;
use tracing::info;

use handsign::{
    detector::open_palm_hand, DetectedHand, GestureMatcher, RecognitionSession, ScriptedDetector,
    SessionConfig, Vocabulary,
};

#[derive(Parser, Debug)]
#[command(name = "handsign", about = "Static ASL letter recognition demo")]
struct Cli {
    /// Number of scripted frames to classify
    #[arg(long, default_value_t = 12)]
    frames: usize,

    /// Milliseconds between scripted frames
    #[arg(long, default_value_t = 250.0)]
    frame_interval_ms: f64,

    /// Acceptance threshold for a match to become an event
    #[arg(long, default_value_t = 0.7)]
    threshold: f32,

    /// Cooldown between accepted events (ms)
    #[arg(long, default_value_t = 500.0)]
    cooldown_ms: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handsign=info".into()),
        )
        .init();

    info!("handsign v{} starting", env!("CARGO_PKG_VERSION"));

    // Script a stream the way a webcam feed looks: the same static
    // pose held across consecutive frames, with hand-absent gaps.
    let mut detector = ScriptedDetector::new();
    for i in 0..cli.frames {
        if i % 4 == 3 {
            detector.push_frame(Vec::new()); // hand briefly out of frame
        } else {
            detector.push_frame(vec![DetectedHand::new(open_palm_hand())]);
        }
    }

    let config = SessionConfig {
        acceptance_threshold: cli.threshold,
        cooldown_ms: cli.cooldown_ms,
        ..SessionConfig::default()
    };
    let mut session = RecognitionSession::new(
        detector,
        GestureMatcher::new(Vocabulary::asl_alphabet()),
        config,
    );

    session.start()?;

    let mut text = String::new();
    for i in 0..cli.frames {
        let timestamp_ms = i as f64 * cli.frame_interval_ms;
        if let Some(event) = session.classify_next(timestamp_ms)? {
            info!(
                "t={:>5.0}ms recognized '{}' ({:.0}% confidence)",
                event.timestamp_ms,
                event.text,
                event.confidence * 100.0,
            );
            text.push(event.text);
        }
    }

    let stats = session.stats();
    info!(
        "recognized text {:?}: {} events, {:.1}% mean confidence, {} unique letters",
        text,
        stats.total_recognitions,
        stats.average_confidence * 100.0,
        stats.unique_letters,
    );

    session.stop();
    Ok(())
}
