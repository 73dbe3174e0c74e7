use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

const DEFAULT_TTS_URL: &str = "https://tts.api.cloud.yandex.net/speech/v1/tts:synthesize";
const LPCM_SAMPLE_RATE_HERTZ: u32 = 48_000;

/// Speech synthesis configuration
///
/// Every request is rendered with the same locale, voice, emotion and speed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Synthesis endpoint
    #[serde(default = "default_url")]
    pub url: Url,
    /// Locale of the synthesized speech
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Voice preset
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Emotion preset for the voice
    #[serde(default = "default_emotion")]
    pub emotion: String,
    /// Speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Output audio format requested from the synthesizer
    #[serde(default)]
    pub format: AudioFormat,
    /// Directory for staged audio files, defaults to the OS temp dir
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            lang: default_lang(),
            voice: default_voice(),
            emotion: default_emotion(),
            speed: default_speed(),
            format: AudioFormat::default(),
            staging_dir: None,
        }
    }
}

/// Audio container produced by the synthesizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// Ogg container with Opus audio
    #[default]
    Oggopus,
    /// MPEG layer 3
    Mp3,
    /// Raw 16-bit PCM
    Lpcm,
}

impl AudioFormat {
    /// Value of the `format` form field
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oggopus => "oggopus",
            Self::Mp3 => "mp3",
            Self::Lpcm => "lpcm",
        }
    }

    /// File extension used for staged audio
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Oggopus => "ogg",
            Self::Mp3 => "mp3",
            Self::Lpcm => "pcm",
        }
    }

    /// MIME type reported for uploaded objects
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Oggopus => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
            Self::Lpcm => "audio/l16",
        }
    }

    /// Sample rate of headerless formats, requested from the synthesizer
    /// and declared to the recognizer
    pub const fn sample_rate_hertz(self) -> Option<u32> {
        match self {
            Self::Lpcm => Some(LPCM_SAMPLE_RATE_HERTZ),
            Self::Oggopus | Self::Mp3 => None,
        }
    }
}

#[allow(clippy::missing_panics_doc)]
fn default_url() -> Url {
    Url::parse(DEFAULT_TTS_URL).expect("default TTS URL is valid")
}

fn default_lang() -> String {
    "ru-RU".to_string()
}

fn default_voice() -> String {
    "marina".to_string()
}

fn default_emotion() -> String {
    "friendly".to_string()
}

const fn default_speed() -> f64 {
    1.2
}
