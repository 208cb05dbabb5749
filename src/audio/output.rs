use rodio::{
    OutputStream, OutputStreamBuilder, Source,
    cpal::{
        BufferSize, Device, SampleFormat, SampleRate, StreamConfig, default_host,
        traits::{DeviceTrait, HostTrait},
    },
    mixer::Mixer,
};
use tracing::info;

use crate::audio::{
    error::AudioError,
    fx::{Gain, Shaped, envelope::Decay},
    synth::Oscillator,
    voice::{Voice, VoiceSink},
};

const BUFFER_FRAMES: u32 = 1024;

pub fn setup_device_config() -> Result<(Device, StreamConfig, SampleFormat), AudioError> {
    let host = default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoOutputDevice)?;

    let best = device
        .supported_output_configs()
        .ok()
        .and_then(|configs| configs.max_by_key(|cfg| cfg.max_sample_rate().0));

    let (config, sample_format) = match best {
        Some(cfg) => (
            StreamConfig {
                channels: cfg.channels(),
                sample_rate: cfg.max_sample_rate(),
                buffer_size: BufferSize::Fixed(BUFFER_FRAMES),
            },
            cfg.sample_format(),
        ),
        None => (
            StreamConfig {
                channels: 2,
                sample_rate: SampleRate(48000),
                buffer_size: BufferSize::Fixed(BUFFER_FRAMES),
            },
            SampleFormat::F32,
        ),
    };

    Ok((device, config, sample_format))
}

/// The acquired output. Whoever holds this keeps sound alive; dropping it
/// silences every voice handed out through its sinks.
pub struct AudioDevice {
    _stream: OutputStream,
    mixer: Mixer,
    synth_rate: u32,
}

impl AudioDevice {
    pub fn open(synth_rate: u32) -> Result<Self, AudioError> {
        let (device, config, sample_format) = setup_device_config()?;
        let mut stream = OutputStreamBuilder::default()
            .with_buffer_size(config.buffer_size)
            .with_sample_rate(config.sample_rate.0)
            .with_device(device)
            .with_sample_format(sample_format)
            .open_stream_or_fallback()
            .map_err(|e| AudioError::Stream(e.to_string()))?;
        stream.log_on_drop(false);

        info!(
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "audio_device_opened"
        );

        let mixer = stream.mixer().clone();
        Ok(Self {
            _stream: stream,
            mixer,
            synth_rate,
        })
    }

    pub fn voice_sink(&self) -> MixerSink {
        MixerSink {
            mixer: self.mixer.clone(),
            synth_rate: self.synth_rate,
        }
    }
}

#[derive(Clone)]
pub struct MixerSink {
    mixer: Mixer,
    synth_rate: u32,
}

/// The oscillator for `voice`, scaled to its gain and fading out over its
/// duration.
pub fn render(voice: &Voice, sample_rate: u32) -> Shaped<Oscillator> {
    Shaped::new(Oscillator::new(
        voice.waveform,
        voice.frequency,
        voice.duration,
        sample_rate,
    ))
    .then(Gain(voice.gain))
    .then(Decay::new(voice.duration, sample_rate))
}

impl VoiceSink for MixerSink {
    fn play(&self, voice: Voice) {
        if voice.gain <= 0.0 {
            return;
        }
        let source = render(&voice, self.synth_rate).delay(voice.delay);
        self.mixer.add(source);
    }
}
