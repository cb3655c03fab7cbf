//! ffmpeg process runner.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use muta_config::TranscoderSettings;

use crate::transcoder::{
    SilenceParams, Transcoder, validate_rate, validate_tempo_ratio, validate_tone,
};
use crate::{Error, Result};

/// Program name searched on `PATH` when none is configured.
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Overwrite outputs, never read stdin, report errors only.
const COMMON_ARGS: [&str; 5] = ["-y", "-nostdin", "-hide_banner", "-loglevel", "error"];

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs ffmpeg with argument vectors (no shell) and a per-call timeout.
///
/// A run that outlives the timeout is killed and reported as
/// [`Error::Timeout`]. Exit status 0 only counts as success when the output
/// file exists afterwards.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
    timeout: Duration,
}

impl Ffmpeg {
    /// Use a specific executable.
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Find `ffmpeg` on `PATH`.
    pub fn locate(timeout: Duration) -> Result<Self> {
        Self::resolve(Path::new(DEFAULT_PROGRAM), timeout)
    }

    /// Build from the `[transcoder]` settings table.
    ///
    /// A configured program is resolved through `PATH` when it is a bare
    /// name and checked as given otherwise.
    pub fn from_settings(settings: &TranscoderSettings) -> Result<Self> {
        match &settings.program {
            Some(program) => Self::resolve(program, settings.timeout()),
            None => Self::locate(settings.timeout()),
        }
    }

    fn resolve(program: &Path, timeout: Duration) -> Result<Self> {
        let found = which::which(program).map_err(|_| Error::ToolNotFound {
            program: program.display().to_string(),
        })?;
        tracing::debug!(program = %found.display(), "resolved transcoder");
        Ok(Self::new(found, timeout))
    }

    /// Executable that will be run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn run(&self, args: Vec<OsString>, output: &Path) -> Result<()> {
        tracing::info!(program = %self.program.display(), ?args, "running transcoder");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // read concurrently so a full pipe never blocks the child
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(timeout = ?self.timeout, "transcoder timed out, killed");
                    return Err(Error::Timeout {
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(Error::Spawn {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        };

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            tracing::warn!(code = ?status.code(), stderr = %stderr.trim(), "transcoder failed");
            return Err(Error::ToolFailed {
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }
        if !output.is_file() {
            tracing::warn!(output = %output.display(), "transcoder exited cleanly without output");
            return Err(Error::MissingOutput(output.to_path_buf()));
        }

        tracing::info!(output = %output.display(), "transcoder finished");
        Ok(())
    }
}

/// Full argument vector: common flags, input, operation arguments, output.
fn command_args(input: &Path, output: &Path, operation: Vec<OsString>) -> Vec<OsString> {
    let mut args: Vec<OsString> = COMMON_ARGS.iter().map(OsString::from).collect();
    args.push("-i".into());
    args.push(input.into());
    args.extend(operation);
    args.push(output.into());
    args
}

fn tempo_args(ratio: f64) -> Vec<OsString> {
    vec!["-filter:a".into(), format!("atempo={ratio}").into()]
}

fn resample_args(sample_rate: u32) -> Vec<OsString> {
    vec!["-ar".into(), sample_rate.to_string().into()]
}

/// Retime to `rate * tone` then resample back to `rate`, which shifts pitch.
fn tone_args(source_rate: u32, tone: f64) -> Vec<OsString> {
    let shifted = (f64::from(source_rate) * tone).round() as u64;
    vec![
        "-af".into(),
        format!("asetrate={shifted},aresample={source_rate}").into(),
    ]
}

fn silence_args(params: SilenceParams) -> Vec<OsString> {
    vec![
        "-af".into(),
        format!(
            "silenceremove=stop_periods=-1:stop_duration={}:stop_threshold={}dB",
            params.min_duration_secs, params.threshold_db
        )
        .into(),
        "-acodec".into(),
        "pcm_s16le".into(),
        "-ac".into(),
        "1".into(),
    ]
}

impl Transcoder for Ffmpeg {
    fn change_tempo(&self, input: &Path, output: &Path, ratio: f64) -> Result<()> {
        validate_tempo_ratio(ratio)?;
        self.run(command_args(input, output, tempo_args(ratio)), output)
    }

    fn resample(&self, input: &Path, output: &Path, sample_rate: u32) -> Result<()> {
        validate_rate(sample_rate)?;
        self.run(command_args(input, output, resample_args(sample_rate)), output)
    }

    fn change_tone(
        &self,
        input: &Path,
        output: &Path,
        source_rate: u32,
        tone: f64,
    ) -> Result<()> {
        validate_rate(source_rate)?;
        validate_tone(tone)?;
        self.run(
            command_args(input, output, tone_args(source_rate, tone)),
            output,
        )
    }

    fn trim_silence(&self, input: &Path, output: &Path, params: SilenceParams) -> Result<()> {
        params.validate()?;
        self.run(command_args(input, output, silence_args(params)), output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn command_layout() {
        let args = command_args(
            Path::new("in put.wav"),
            Path::new("out.wav"),
            resample_args(16000),
        );
        assert_eq!(
            strings(&args),
            [
                "-y",
                "-nostdin",
                "-hide_banner",
                "-loglevel",
                "error",
                "-i",
                "in put.wav",
                "-ar",
                "16000",
                "out.wav"
            ]
        );
    }

    #[test]
    fn tempo_filter() {
        assert_eq!(strings(&tempo_args(0.8)), ["-filter:a", "atempo=0.8"]);
        assert_eq!(strings(&tempo_args(2.0)), ["-filter:a", "atempo=2"]);
    }

    #[test]
    fn tone_filter_rounds_shifted_rate() {
        assert_eq!(
            strings(&tone_args(8000, 1.1)),
            ["-af", "asetrate=8800,aresample=8000"]
        );
    }

    #[test]
    fn silence_filter() {
        assert_eq!(
            strings(&silence_args(SilenceParams::default())),
            [
                "-af",
                "silenceremove=stop_periods=-1:stop_duration=0.25:stop_threshold=-36dB",
                "-acodec",
                "pcm_s16le",
                "-ac",
                "1"
            ]
        );
    }

    #[test]
    fn invalid_parameters_fail_before_spawning() {
        let ffmpeg = Ffmpeg::new("/nonexistent/ffmpeg", Duration::from_secs(1));
        let (i, o) = (Path::new("a.wav"), Path::new("b.wav"));
        assert!(matches!(ffmpeg.change_tempo(i, o, 200.0), Err(Error::Core(_))));
        assert!(matches!(ffmpeg.resample(i, o, 0), Err(Error::Core(_))));
        assert!(matches!(ffmpeg.change_tone(i, o, 8000, -1.0), Err(Error::Core(_))));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let ffmpeg = Ffmpeg::new("/nonexistent/ffmpeg", Duration::from_secs(1));
        let err = ffmpeg
            .resample(Path::new("a.wav"), Path::new("b.wav"), 8000)
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn unresolvable_program_is_not_found() {
        let mut settings = TranscoderSettings::default();
        settings.program = Some(PathBuf::from("muta-no-such-transcoder-4711"));
        assert!(matches!(
            Ffmpeg::from_settings(&settings),
            Err(Error::ToolNotFound { .. })
        ));
    }
}
