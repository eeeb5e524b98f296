//! Instrument presets: a closed set of named timbre configurations.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

/// How a triggered note ends when no further gesture arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayClass {
    /// Rings until the next retrigger or an explicit silence.
    Sustained,
    /// Naturally decaying timbre: released after [`PLUCK_WINDOW_MS`].
    Plucked,
}

/// Fixed release window for plucked timbres, independent of further gestures.
pub const PLUCK_WINDOW_MS: u64 = 800;

#[derive(Clone, Copy, Debug)]
pub struct InstrumentConfig {
    pub name: &'static str,
    pub waveform: Waveform,
    pub attack_sec: f32,
    pub release_sec: f32,
    pub level: f32,
    /// Lowpass cutoff shaping the timbre's brightness.
    pub cutoff_hz: f32,
    /// Octave shift applied when resolving note frequencies.
    pub octave_offset: i32,
    pub decay: DecayClass,
    /// Whether the preset constructs a polyphonic or a single-note voice.
    pub polyphonic: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrumentPreset {
    Piano,
    Synth,
    Marimba,
    Guitar,
    Bass,
}

static PIANO: InstrumentConfig = InstrumentConfig {
    name: "piano",
    waveform: Waveform::Triangle,
    attack_sec: 0.01,
    release_sec: 0.6,
    level: 0.9,
    cutoff_hz: 4000.0,
    octave_offset: 0,
    decay: DecayClass::Plucked,
    polyphonic: true,
};

static SYNTH: InstrumentConfig = InstrumentConfig {
    name: "synth",
    waveform: Waveform::Saw,
    attack_sec: 0.03,
    release_sec: 0.25,
    level: 0.7,
    cutoff_hz: 6000.0,
    octave_offset: 0,
    decay: DecayClass::Sustained,
    polyphonic: true,
};

static MARIMBA: InstrumentConfig = InstrumentConfig {
    name: "marimba",
    waveform: Waveform::Sine,
    attack_sec: 0.005,
    release_sec: 0.4,
    level: 1.0,
    cutoff_hz: 3000.0,
    octave_offset: 0,
    decay: DecayClass::Plucked,
    polyphonic: true,
};

static GUITAR: InstrumentConfig = InstrumentConfig {
    name: "guitar",
    waveform: Waveform::Square,
    attack_sec: 0.01,
    release_sec: 0.5,
    level: 0.6,
    cutoff_hz: 2200.0,
    octave_offset: 0,
    decay: DecayClass::Plucked,
    polyphonic: true,
};

static BASS: InstrumentConfig = InstrumentConfig {
    name: "bass",
    waveform: Waveform::Sine,
    attack_sec: 0.02,
    release_sec: 0.3,
    level: 1.0,
    cutoff_hz: 900.0,
    octave_offset: -1,
    decay: DecayClass::Sustained,
    polyphonic: false,
};

impl InstrumentPreset {
    pub const ALL: [InstrumentPreset; 5] = [
        InstrumentPreset::Piano,
        InstrumentPreset::Synth,
        InstrumentPreset::Marimba,
        InstrumentPreset::Guitar,
        InstrumentPreset::Bass,
    ];

    pub fn config(self) -> &'static InstrumentConfig {
        match self {
            InstrumentPreset::Piano => &PIANO,
            InstrumentPreset::Synth => &SYNTH,
            InstrumentPreset::Marimba => &MARIMBA,
            InstrumentPreset::Guitar => &GUITAR,
            InstrumentPreset::Bass => &BASS,
        }
    }

    pub fn key(self) -> &'static str {
        self.config().name
    }

    pub fn from_key(key: &str) -> Option<InstrumentPreset> {
        InstrumentPreset::ALL.into_iter().find(|p| p.key() == key)
    }
}
