use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kotoba::audio::{AudioPlayback, AudioStore, PcmFormat};
use kotoba::{Config, GeminiClient, Result, WordRecord, pipeline};

/// Kotoba - Japanese vocabulary lookup and speech synthesis
#[derive(Parser)]
#[command(name = "kotoba", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a word and speak it with example sentences
    Lookup {
        /// Word to look up
        word: String,

        /// Save the generated WAV files to the configured save directory
        #[arg(short, long)]
        save: bool,

        /// Skip speaker playback (for headless use)
        #[arg(long, env = "KOTOBA_NO_PLAY")]
        no_play: bool,
    },
    /// Speak arbitrary text without analysis
    Say {
        /// Text to speak
        text: String,

        /// Save the generated WAV file to the configured save directory
        #[arg(short, long)]
        save: bool,

        /// Skip speaker playback (for headless use)
        #[arg(long, env = "KOTOBA_NO_PLAY")]
        no_play: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,kotoba=info",
        1 => "info,kotoba=debug",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let result = match cli.command {
        Command::Lookup { word, save, no_play } => lookup(&word, save, no_play).await,
        Command::Say { text, save, no_play } => say(&text, save, no_play).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn lookup(word: &str, save: bool, no_play: bool) -> Result<()> {
    let config = Config::load()?;
    let client = client_from(&config)?;
    let store = AudioStore::new();
    let format = PcmFormat::mono(config.sample_rate);

    let record = client.analyze(word).await?;
    print_record(&record);

    // The word's own audio plus one payload per example sentence; the
    // synthesis requests run concurrently, each conversion is independent.
    let mut texts = vec![record.original.clone()];
    texts.extend(record.sentences.iter().map(|s| s.japanese.clone()));

    let payloads =
        futures::future::try_join_all(texts.iter().map(|text| client.synthesize(text))).await?;

    let mut conversions = Vec::with_capacity(payloads.len());
    for payload in &payloads {
        conversions.push(pipeline::convert(payload, format, &store)?);
    }

    if save {
        for conversion in &conversions {
            let path = store.save_to(conversion.handle, &config.save_dir)?;
            println!("saved {}", path.display());
        }
    }

    if !no_play {
        let playback = AudioPlayback::new(config.sample_rate)?;
        for conversion in &conversions {
            playback.play(&conversion.playback)?;
        }
    }

    for conversion in conversions {
        store.release(conversion.handle);
    }
    Ok(())
}

async fn say(text: &str, save: bool, no_play: bool) -> Result<()> {
    let config = Config::load()?;
    let client = client_from(&config)?;
    let store = AudioStore::new();

    let payload = client.synthesize(text).await?;
    let conversion = pipeline::convert(&payload, PcmFormat::mono(config.sample_rate), &store)?;

    if save {
        let path = store.save_to(conversion.handle, &config.save_dir)?;
        println!("saved {}", path.display());
    }

    if !no_play {
        AudioPlayback::new(config.sample_rate)?.play(&conversion.playback)?;
    }

    store.release(conversion.handle);
    Ok(())
}

fn client_from(config: &Config) -> Result<GeminiClient> {
    GeminiClient::new(
        config.api_key.clone(),
        config.base_url.clone(),
        config.text_model.clone(),
        config.audio_model.clone(),
        config.voice.clone(),
    )
}

fn print_record(record: &WordRecord) {
    println!("{}  ({} / {})", record.original, record.reading, record.romaji);
    for meaning in &record.meanings {
        println!("  - {meaning}");
    }
    if !record.sentences.is_empty() {
        println!();
        for sentence in &record.sentences {
            println!("  {}", sentence.japanese);
            println!("    {}", sentence.reading);
            println!("    {}", sentence.english);
        }
    }
}
