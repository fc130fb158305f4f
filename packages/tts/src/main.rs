// src/main.rs
// ─────────────────────────────────────────────────────────────────────────────
// voice-tts reference CLI
//
//  ❯ voice-tts speak "Hello world!" --out hello.wav
//  ❯ voice-tts --engine coqui clone "Hi there" --reference me.wav --language en
//  ❯ voice-tts validate me.wav --quick
// ─────────────────────────────────────────────────────────────────────────────

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use voice_assistant_tts::domain::{Language, SynthesisRequest};
use voice_assistant_tts::{
    EngineConfig, SampleValidator, TextToSpeech, TtsConfig, ValidationPolicy, VoiceCloning,
    audio, default_output_path,
};

/// CLI switches.
#[derive(Parser, Debug)]
#[command(name = "voice-tts", author, version, about = "Text-to-speech and voice cloning")]
struct Cli {
    /// JSON config file (defaults to <config_dir>/voice-assistant/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured synthesis backend.
    #[arg(long, global = true, value_enum)]
    engine: Option<EngineKind>,

    /// XTTS API server URL (implies `--engine coqui`).
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Keep punctuation and case instead of normalizing the text.
    #[arg(long, global = true)]
    raw_text: bool,

    /// Debug logging (otherwise RUST_LOG or `info`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineKind {
    Espeak,
    Coqui,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert text to a WAV file.
    Speak(Speak),
    /// Speak text in the voice of a reference recording.
    Clone(CloneVoice),
    /// Check whether a WAV file is usable as a voice reference.
    Validate(Validate),
    /// Prompt for text in a loop; `q` quits.
    Interactive(Interactive),
    /// Record a reference sample from the microphone.
    #[cfg(feature = "microphone")]
    Record(Record),
    /// Print or write the effective configuration.
    Config(ConfigCmd),
}

#[derive(Args, Debug)]
struct Speak {
    text: String,
    /// Output WAV (defaults to tts_output_<timestamp>.wav).
    #[arg(short, long)]
    out: Option<PathBuf>,
    #[arg(short, long)]
    language: Option<String>,
    /// Play the result through the speakers.
    #[arg(long)]
    play: bool,
}

#[derive(Args, Debug)]
struct CloneVoice {
    text: String,
    /// Reference WAV of the target speaker.
    #[arg(short, long)]
    reference: PathBuf,
    #[arg(short, long)]
    language: Option<String>,
    #[arg(short, long, default_value = "cloned_voice_output.wav")]
    out: PathBuf,
    #[arg(long)]
    play: bool,
}

#[derive(Args, Debug)]
struct Validate {
    path: PathBuf,
    /// Use the short-prompt policy (1 s minimum) instead of the configured one.
    #[arg(long)]
    quick: bool,
    /// Minimum duration in seconds (overrides the configured policy).
    #[arg(long)]
    min_duration: Option<f32>,
}

#[derive(Args, Debug)]
struct Interactive {
    /// Clone this reference voice for every line.
    #[arg(short, long)]
    reference: Option<PathBuf>,
    #[arg(short, long)]
    language: Option<String>,
}

#[cfg(feature = "microphone")]
#[derive(Args, Debug)]
struct Record {
    #[arg(long, default_value_t = 10)]
    seconds: u64,
    #[arg(long, default_value_t = 44_100)]
    sample_rate: u32,
    #[arg(short, long, default_value = "reference_sample.wav")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ConfigCmd {
    /// Write the configuration here instead of printing it.
    #[arg(long)]
    write: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = effective_config(&cli)?;
    match cli.command {
        Commands::Speak(args) => speak(&config, args),
        Commands::Clone(args) => clone(&config, args),
        Commands::Validate(args) => validate(&config, args),
        Commands::Interactive(args) => interactive(&config, args),
        #[cfg(feature = "microphone")]
        Commands::Record(args) => record(&config, args),
        Commands::Config(args) => show_config(&config, args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn effective_config(cli: &Cli) -> Result<TtsConfig> {
    let mut config =
        TtsConfig::resolve(cli.config.as_deref()).context("failed to load configuration")?;

    match (cli.engine, &cli.server_url) {
        (Some(EngineKind::Espeak), Some(_)) => bail!("--server-url only applies to the coqui engine"),
        (Some(EngineKind::Espeak), None) => config.engine = EngineConfig::default(),
        (_, Some(url)) => config.engine = EngineConfig::coqui_server(url.clone()),
        (Some(EngineKind::Coqui), None) => {
            if !matches!(config.engine, EngineConfig::CoquiServer { .. }) {
                config.engine = EngineConfig::default_coqui_server();
            }
        }
        (None, None) => {}
    }
    if cli.raw_text {
        config.normalize_text = false;
    }
    tracing::debug!(?config, "effective configuration");
    Ok(config)
}

fn language(config: &TtsConfig, arg: Option<String>) -> Language {
    arg.map(Language::from)
        .unwrap_or_else(|| config.language.clone())
}

/// Run `work` under a spinner.
fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .context("Failed to create spinner template")?,
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = work();
    spinner.finish_and_clear();
    Ok(out)
}

fn play(path: &Path) -> Result<()> {
    tracing::info!(path = %path.display(), "• playing audio through speakers...");
    audio::play_wav(path).with_context(|| format!("play {}", path.display()))
}

fn speak(config: &TtsConfig, args: Speak) -> Result<()> {
    let tts = TextToSpeech::from_config(config);
    let out = args.out.unwrap_or_else(default_output_path);
    let request = SynthesisRequest::new(args.text, out).language(language(config, args.language));

    let path = with_spinner("Generating audio...", || tts.try_synthesize(&request))?
        .context("text-to-speech failed")?;
    println!("Successfully generated audio file at: {}", path.display());
    if args.play {
        play(&path)?;
    }
    Ok(())
}

fn clone(config: &TtsConfig, args: CloneVoice) -> Result<()> {
    let cloning = VoiceCloning::from_config(config);
    let language = language(config, args.language);

    let path = with_spinner("Generating cloned voice...", || {
        cloning.try_clone_voice(&args.text, &args.reference, language, args.out)
    })?
    .context("voice cloning failed")?;
    println!("Successfully generated cloned voice at {}", path.display());
    if args.play {
        play(&path)?;
    }
    Ok(())
}

fn validate(config: &TtsConfig, args: Validate) -> Result<()> {
    let mut policy = if args.quick {
        ValidationPolicy::QUICK
    } else {
        config.validation
    };
    if let Some(secs) = args.min_duration {
        policy = policy.with_min_duration(secs);
    }
    let verdict = SampleValidator::new(policy).validate(&args.path);
    println!("{}: {}", args.path.display(), verdict);
    if !verdict.is_accepted() {
        bail!("sample rejected");
    }
    Ok(())
}

fn interactive(config: &TtsConfig, args: Interactive) -> Result<()> {
    let cloning = VoiceCloning::from_config(config);
    let language = language(config, args.language);

    if let Some(reference) = &args.reference {
        let verdict = cloning.sample_verdict(reference);
        if !verdict.is_accepted() {
            bail!("reference rejected: {verdict}");
        }
    }
    if !cloning.tts().initialize() {
        bail!("Failed to initialize TTS engine");
    }

    println!("Text-to-Speech Demo");
    println!("Enter 'q' to quit");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nEnter text to convert to speech: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let text = line?;
        if text.trim().eq_ignore_ascii_case("q") {
            break;
        }
        if text.trim().is_empty() {
            println!("Error: Please enter some text");
            continue;
        }

        let out = default_output_path();
        let result = with_spinner("Generating audio...", || match &args.reference {
            Some(reference) => cloning.try_clone_voice(&text, reference, language.clone(), &out),
            None => cloning
                .tts()
                .try_synthesize(&SynthesisRequest::new(&text, &out).language(language.clone())),
        })?;
        match result {
            Ok(path) => {
                println!("Audio written to {}", path.display());
                if cfg!(feature = "playback")
                    && let Err(e) = play(&path)
                {
                    println!("Failed to play audio: {e:#}");
                }
            }
            Err(e) => println!("Failed to generate audio: {e}"),
        }
    }
    println!("Exiting...");
    Ok(())
}

#[cfg(feature = "microphone")]
fn record(config: &TtsConfig, args: Record) -> Result<()> {
    use voice_assistant_tts::microphone;

    println!("Please speak clearly for {} seconds after the beep...", args.seconds);
    std::thread::sleep(Duration::from_secs(1));
    println!("\x07");

    let recording = microphone::record(Duration::from_secs(args.seconds), Some(args.sample_rate))
        .context("recording failed")?;
    let temp = args.out.with_extension("tmp.wav");
    recording.save(&temp).context("failed to save recording")?;

    let verdict = SampleValidator::new(config.validation).validate(&temp);
    if !verdict.is_accepted() {
        std::fs::remove_file(&temp).ok();
        bail!("Sample rejected, please try again: {verdict}");
    }
    std::fs::rename(&temp, &args.out)
        .with_context(|| format!("failed to save reference as {}", args.out.display()))?;
    println!("Sample accepted and saved as {}!", args.out.display());
    Ok(())
}

fn show_config(config: &TtsConfig, args: ConfigCmd) -> Result<()> {
    match args.write {
        Some(path) => {
            config.save(&path)?;
            println!("Wrote configuration to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}
