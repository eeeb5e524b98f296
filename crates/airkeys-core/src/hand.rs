//! Hand-landmark geometry: raw tracker output and per-finger features.
//!
//! The tracker delivers 21 landmarks per detected hand in normalized image
//! coordinates (x/y in \[0, 1\], y growing downward; z is a relative depth
//! estimate). Everything downstream works on the five [`FingerFeature`]
//! records derived here.

use glam::Vec3;
use thiserror::Error;

/// Landmarks per detected hand (wrist + 4 joints for each of 5 fingers).
pub const LANDMARKS_PER_HAND: usize = 21;

pub const FINGER_COUNT: usize = 5;

/// Wrist landmark index.
pub const WRIST: usize = 0;

/// Fingertip landmark index per finger, thumb..pinky.
pub const FINGER_TIPS: [usize; FINGER_COUNT] = [4, 8, 12, 16, 20];

/// Finger base landmark index per finger, thumb..pinky.
pub const FINGER_BASES: [usize; FINGER_COUNT] = [2, 5, 9, 13, 17];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; FINGER_COUNT] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<Finger> {
        Finger::ALL.get(i).copied()
    }
}

#[derive(Debug, Error)]
pub enum HandFrameError {
    #[error("expected at least {LANDMARKS_PER_HAND} landmarks, got {0}")]
    TooFewLandmarks(usize),
    #[error("flat landmark buffer length {0} is not a multiple of 3")]
    RaggedBuffer(usize),
}

/// One hand's landmark set for a single video frame. Immutable once built.
#[derive(Clone, Debug)]
pub struct HandFrame {
    landmarks: [Vec3; LANDMARKS_PER_HAND],
}

impl HandFrame {
    /// Build a frame from at least 21 points; extra points are ignored.
    pub fn from_landmarks(points: &[Vec3]) -> Result<Self, HandFrameError> {
        if points.len() < LANDMARKS_PER_HAND {
            return Err(HandFrameError::TooFewLandmarks(points.len()));
        }
        let mut landmarks = [Vec3::ZERO; LANDMARKS_PER_HAND];
        landmarks.copy_from_slice(&points[..LANDMARKS_PER_HAND]);
        Ok(Self { landmarks })
    }

    /// Build a frame from a flat `[x0, y0, z0, x1, y1, z1, ..]` buffer, the
    /// shape the tracker hands across the wasm boundary.
    pub fn from_flat(coords: &[f32]) -> Result<Self, HandFrameError> {
        if coords.len() % 3 != 0 {
            return Err(HandFrameError::RaggedBuffer(coords.len()));
        }
        let points: Vec<Vec3> = coords
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Self::from_landmarks(&points)
    }

    #[inline]
    pub fn landmark(&self, i: usize) -> Vec3 {
        self.landmarks[i]
    }

    #[inline]
    pub fn wrist(&self) -> Vec3 {
        self.landmarks[WRIST]
    }
}

/// Per-finger features derived from one frame's landmarks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FingerFeature {
    /// Fingertip position in normalized image coordinates.
    pub tip: Vec3,
    /// Tip position relative to the wrist.
    pub wrist_relative: Vec3,
    /// Tip-to-base distance; proxy for how straight the finger is.
    pub extension: f32,
    /// `1 - tip.y`, so larger means higher in the frame.
    pub height: f32,
}

/// Derive the five per-finger feature records for one frame.
///
/// Pure function of its input; order-correlated with [`Finger::ALL`].
pub fn finger_features(frame: &HandFrame) -> [FingerFeature; FINGER_COUNT] {
    let wrist = frame.wrist();
    let mut features = [FingerFeature::default(); FINGER_COUNT];
    for i in 0..FINGER_COUNT {
        let tip = frame.landmark(FINGER_TIPS[i]);
        let base = frame.landmark(FINGER_BASES[i]);
        features[i] = FingerFeature {
            tip,
            wrist_relative: tip - wrist,
            extension: tip.distance(base),
            height: 1.0 - tip.y,
        };
    }
    features
}
