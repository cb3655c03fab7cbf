//! Shared CLI helpers used across multiple commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use muta_config::Settings;
use muta_core::{Augmentation, Waveform};
use muta_io::{Encoding, decode, encode, output_path, output_path_in};
use muta_transcode::{ExternalOptions, Ffmpeg, SilenceParams, apply_external};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Everything a command needs besides its own arguments.
#[derive(Clone)]
pub struct Context {
    /// Resolved settings file contents.
    pub settings: Settings,
    out_dir: Option<PathBuf>,
    seed: Option<u64>,
    encoding: Encoding,
}

impl Context {
    /// Build from loaded settings and the global flags.
    ///
    /// An `--encoding` flag wins over `[output] encoding`.
    pub fn new(
        settings: Settings,
        out_dir: Option<PathBuf>,
        seed: Option<u64>,
        encoding: Option<Encoding>,
    ) -> Self {
        let encoding = encoding.unwrap_or(settings.output.encoding);
        Self {
            settings,
            out_dir,
            seed,
            encoding,
        }
    }

    /// Random source for noise and cropping, seeded when `--seed` was given.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Where the augmented version of `input` goes.
    pub fn output_path(&self, input: &Path, augmentation: &Augmentation) -> PathBuf {
        match &self.out_dir {
            Some(dir) => output_path_in(dir, input, augmentation),
            None => output_path(input, augmentation),
        }
    }

    /// Copy with the silence thresholds replaced where given.
    pub fn with_silence(&self, threshold_db: Option<f64>, min_duration_secs: Option<f64>) -> Self {
        let mut ctx = self.clone();
        if let Some(db) = threshold_db {
            ctx.settings.transcoder.silence_threshold_db = db;
        }
        if let Some(secs) = min_duration_secs {
            ctx.settings.transcoder.silence_min_duration_secs = secs;
        }
        ctx
    }

    fn silence(&self) -> SilenceParams {
        SilenceParams::from_settings(&self.settings.transcoder)
    }
}

/// Run one augmentation on `input` and print the written path.
///
/// `impulse_response` is only used by convolution.
pub fn run_augmentation(
    ctx: &Context,
    input: &Path,
    augmentation: &Augmentation,
    impulse_response: Option<&Waveform>,
) -> anyhow::Result<()> {
    let output = ctx.output_path(input, augmentation);

    if augmentation.is_external() {
        run_external(ctx, input, &output, augmentation)?;
    } else {
        let wave = decode(input)?;
        let mut rng = ctx.rng();
        let augmented = augmentation.apply(&wave, impulse_response, &mut rng)?;
        encode(&augmented, &output, ctx.encoding)?;
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            augmentation = augmentation.name(),
            samples = augmented.len(),
            "augmented"
        );
    }

    println!("{}", output.display());
    Ok(())
}

fn run_external(
    ctx: &Context,
    input: &Path,
    output: &Path,
    augmentation: &Augmentation,
) -> anyhow::Result<()> {
    if let Some(dir) = output.parent()
        && !dir.as_os_str().is_empty()
        && !dir.is_dir()
    {
        return Err(muta_io::Error::MissingDirectory(dir.to_path_buf()).into());
    }

    let ffmpeg = Ffmpeg::from_settings(&ctx.settings.transcoder)?;
    let options = ExternalOptions {
        silence: ctx.silence(),
        encoding: ctx.encoding,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
    spinner.set_message(format!("{} via {}", augmentation.name(), ffmpeg.program().display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = apply_external(&ffmpeg, augmentation, input, output, &options);
    spinner.finish_and_clear();
    result?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        augmentation = augmentation.name(),
        "augmented externally"
    );
    Ok(())
}
