//! WAV file reading and writing.

use core::fmt;
use core::str::FromStr;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use muta_core::Waveform;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone, Serialize)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Sample encoding used when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// 32-bit IEEE float. Keeps values above unity left by normalization.
    #[default]
    Float32,
    /// 16-bit PCM, clamped to the integer range.
    Pcm16,
}

impl Encoding {
    /// Name as written in settings files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Float32 => "float32",
            Encoding::Pcm16 => "pcm16",
        }
    }

    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            Encoding::Float32 => (32, SampleFormat::Float),
            Encoding::Pcm16 => (16, SampleFormat::Int),
        };
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "float32" => Ok(Encoding::Float32),
            "pcm16" => Ok(Encoding::Pcm16),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown encoding '{other}' (expected float32 or pcm16)"
            ))),
        }
    }
}

/// Decode a WAV file into a mono [`Waveform`].
///
/// Integer PCM of any bit depth is scaled by `2^(bits-1)` into `[-1, 1)`;
/// float data is read as is. Only channel 0 of a multi-channel file is kept
/// (no downmix).
pub fn decode<P: AsRef<Path>>(path: P) -> Result<Waveform> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let wave = match spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(Error::UnsupportedFormat(format!(
                    "{}-bit float samples",
                    spec.bits_per_sample
                )));
            }
            let interleaved = reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Waveform::from_f32(&first_channel(interleaved, channels), spec.sample_rate)?
        }
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            let interleaved = reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Waveform::new(first_channel(interleaved, channels), spec.sample_rate)?
        }
    };

    tracing::debug!(
        path = %path.display(),
        channels,
        sample_rate = spec.sample_rate,
        frames = wave.len(),
        "decoded"
    );

    Ok(wave)
}

fn first_channel<T>(interleaved: Vec<T>, channels: usize) -> Vec<T> {
    if channels > 1 {
        interleaved.into_iter().step_by(channels).collect()
    } else {
        interleaved
    }
}

/// Write a waveform as a mono WAV file at its own sample rate.
///
/// The destination directory must already exist; a missing one fails with
/// [`Error::MissingDirectory`] before any file is created. No resampling or
/// dithering is applied.
pub fn encode<P: AsRef<Path>>(wave: &Waveform, path: P, encoding: Encoding) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty() && !d.is_dir())
    {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }

    let mut writer = WavWriter::create(path, encoding.spec(wave.sample_rate()))?;
    match encoding {
        Encoding::Float32 => {
            for sample in wave.to_f32() {
                writer.write_sample(sample)?;
            }
        }
        Encoding::Pcm16 => {
            let max_val = f64::from(1i32 << 15);
            for &sample in wave.samples() {
                let int_sample = (sample * max_val).round().clamp(-max_val, max_val - 1.0) as i16;
                writer.write_sample(int_sample)?;
            }
        }
    }
    writer.finalize()?;

    tracing::debug!(path = %path.display(), %encoding, frames = wave.len(), "encoded");
    Ok(())
}
