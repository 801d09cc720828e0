//! voicegate - enroll and verify voiceprints from raw PCM files.
//!
//! Audio files are raw 16-bit signed little-endian mono PCM at 16kHz
//! (`ffmpeg -i in.wav -f s16le -ar 16000 -ac 1 out.pcm`). The `synth`
//! subcommand generates a test tone in the same format.

use std::fs;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use voicegate_audio::pcm::{self, Format};
use voicegate_audio::{synth, BufferSource};
use voicegate_auth::{AuthConfig, AuthError, EnrollmentState, VoiceAuthenticator};
use voicegate_store::{BlobStore, FileStore};
use voicegate_voiceprint::decode_voiceprint;

/// Voice enrollment and verification over raw PCM files.
#[derive(Parser)]
#[command(name = "voicegate")]
#[command(about = "Voice enrollment and verification over raw PCM files")]
#[command(version)]
struct Cli {
    /// Voiceprint store path
    #[arg(long, global = true, default_value = "voiceprint.dat")]
    store: PathBuf,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sine test tone as raw PCM
    Synth {
        /// Tone frequency in Hz
        #[arg(long, default_value_t = 440.0)]
        freq: f64,

        /// Tone length in seconds
        #[arg(long, default_value_t = 5)]
        seconds: u64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Enroll a voiceprint from a raw PCM file
    Enroll {
        /// Input PCM file (s16le, 16kHz, mono)
        #[arg(short, long)]
        input: PathBuf,

        /// Capture duration in seconds
        #[arg(long, default_value_t = 5)]
        seconds: u64,
    },
    /// Verify a raw PCM file against the enrolled voiceprint
    Verify {
        /// Input PCM file (s16le, 16kHz, mono)
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Show enrollment status
    Status {
        /// Output as JSON (for piping)
        #[arg(long)]
        json: bool,
    },
    /// Delete the enrolled voiceprint
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    }

    let store = Arc::new(FileStore::new(&cli.store));
    let auth = VoiceAuthenticator::new(store.clone(), AuthConfig::default());

    match cli.command {
        Commands::Synth {
            freq,
            seconds,
            output,
        } => {
            let format = Format::MONO_16K;
            let samples = synth::sine(
                freq,
                format.samples_in_duration(Duration::from_secs(seconds)),
                format.sample_rate,
            );
            fs::write(&output, pcm::samples_to_bytes(&samples))
                .with_context(|| format!("write {}", output.display()))?;
            println!("wrote {} ({} samples)", output.display(), samples.len());
        }

        Commands::Enroll { input, seconds } => {
            let samples = read_pcm(&input)?;
            let mut handle = auth.enroll(
                Box::new(BufferSource::new(samples)),
                Duration::from_secs(seconds),
            )?;

            let mut failed = false;
            while let Some(state) = handle.updates.recv().await {
                println!("{state}");
                if matches!(state, EnrollmentState::Error(_)) {
                    failed = true;
                }
            }
            handle.finished().await;
            if failed {
                exit(1);
            }
        }

        Commands::Verify { input } => {
            let samples = read_pcm(&input)?;
            match auth.try_authenticate(&samples) {
                Ok(decision) if decision.matched => {
                    println!("accepted (similarity {:.3})", decision.similarity);
                }
                Ok(decision) => {
                    println!("rejected (similarity {:.3})", decision.similarity);
                    exit(1);
                }
                Err(AuthError::NotEnrolled) => {
                    println!("rejected: no voiceprint enrolled");
                    exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Status { json } => {
            let frames = match store.load()? {
                Some(blob) => Some(decode_voiceprint(&blob)?.len()),
                None => None,
            };
            if json {
                let status = serde_json::json!({
                    "enrolled": frames.is_some(),
                    "frames": frames,
                });
                println!("{status}");
            } else {
                match frames {
                    Some(n) => println!("enrolled ({n} frames)"),
                    None => println!("not enrolled"),
                }
            }
        }

        Commands::Clear => {
            auth.clear_enrollment()?;
            println!("enrollment cleared");
        }
    }

    Ok(())
}

fn read_pcm(path: &PathBuf) -> Result<Vec<i16>> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let samples = pcm::bytes_to_samples(&bytes);
    if samples.is_empty() {
        bail!("{}: empty PCM input", path.display());
    }
    Ok(samples)
}
