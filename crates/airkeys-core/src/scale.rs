//! Musical scales, height-to-pitch quantization, and note arithmetic.

/// Scientific pitch notation, e.g. `"G4"` or `"Eb4"`. All preset scale data
/// is static.
pub type NoteName = &'static str;

/// Every preset scale spans exactly eight degrees.
pub const SCALE_LEN: usize = 8;

#[derive(Clone, Copy, Debug)]
pub struct Scale {
    pub name: &'static str,
    pub notes: [NoteName; SCALE_LEN],
}

pub static MAJOR: Scale = Scale {
    name: "C major",
    notes: ["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"],
};

pub static MINOR: Scale = Scale {
    name: "A minor",
    notes: ["A3", "B3", "C4", "D4", "E4", "F4", "G4", "A4"],
};

pub static MAJOR_PENTATONIC: Scale = Scale {
    name: "C major pentatonic",
    notes: ["C4", "D4", "E4", "G4", "A4", "C5", "D5", "E5"],
};

pub static MINOR_PENTATONIC: Scale = Scale {
    name: "A minor pentatonic",
    notes: ["A3", "C4", "D4", "E4", "G4", "A4", "C5", "D5"],
};

pub static BLUES: Scale = Scale {
    name: "A blues",
    notes: ["A3", "C4", "D4", "Eb4", "E4", "G4", "A4", "C5"],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalePreset {
    Major,
    Minor,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
}

impl ScalePreset {
    pub const ALL: [ScalePreset; 5] = [
        ScalePreset::Major,
        ScalePreset::Minor,
        ScalePreset::MajorPentatonic,
        ScalePreset::MinorPentatonic,
        ScalePreset::Blues,
    ];

    pub fn scale(self) -> &'static Scale {
        match self {
            ScalePreset::Major => &MAJOR,
            ScalePreset::Minor => &MINOR,
            ScalePreset::MajorPentatonic => &MAJOR_PENTATONIC,
            ScalePreset::MinorPentatonic => &MINOR_PENTATONIC,
            ScalePreset::Blues => &BLUES,
        }
    }

    /// Identifier used by the configuration surface (select values, keys).
    pub fn key(self) -> &'static str {
        match self {
            ScalePreset::Major => "major",
            ScalePreset::Minor => "minor",
            ScalePreset::MajorPentatonic => "major-pentatonic",
            ScalePreset::MinorPentatonic => "minor-pentatonic",
            ScalePreset::Blues => "blues",
        }
    }

    pub fn from_key(key: &str) -> Option<ScalePreset> {
        ScalePreset::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// Quantize a normalized finger height into a scale degree and resolve it.
///
/// `index = floor(height * N)` clamped to `[0, N-1]`, so `height = 1.0`
/// still lands on the top degree. Which finger moved decides *that* a note
/// plays; height alone decides *which*.
pub fn note_for_height(scale: &Scale, height: f32) -> NoteName {
    let index = (height * SCALE_LEN as f32).floor() as isize;
    let index = index.clamp(0, SCALE_LEN as isize - 1) as usize;
    scale.notes[index]
}

/// Parse scientific pitch notation to a MIDI note number (C4 = 60).
/// Supports a single `#` or `b` accidental.
pub fn note_to_midi(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let semitone = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let rest = chars.as_str();
    let (accidental, octave_str) = match rest.as_bytes().first() {
        Some(b'#') => (1, &rest[1..]),
        Some(b'b') => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let octave: i32 = octave_str.parse().ok()?;
    Some((octave + 1) * 12 + semitone + accidental)
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

pub fn note_to_hz(name: &str) -> Option<f32> {
    note_to_midi(name).map(|m| midi_to_hz(m as f32))
}
