use highlight_config::{AudioFormat, TtsConfig};

/// Fixed rendering parameters applied to every synthesis request
#[derive(Debug, Clone)]
pub struct VoiceSettings {
    /// Locale (e.g. "ru-RU")
    pub lang: String,
    /// Voice preset (e.g. "marina")
    pub voice: String,
    /// Emotion preset (e.g. "friendly")
    pub emotion: String,
    /// Speed multiplier
    pub speed: f64,
    /// Requested audio container
    pub format: AudioFormat,
}

impl From<&TtsConfig> for VoiceSettings {
    fn from(config: &TtsConfig) -> Self {
        Self {
            lang: config.lang.clone(),
            voice: config.voice.clone(),
            emotion: config.emotion.clone(),
            speed: config.speed,
            format: config.format,
        }
    }
}
