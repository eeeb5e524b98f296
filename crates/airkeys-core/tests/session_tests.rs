use airkeys_core::{
    Finger, HandFrame, InstrumentPreset, MonophonicVoice, NoteName, PolyphonicVoice, ScalePreset,
    Session, VoiceError, VoiceHandle, FINGER_BASES, FINGER_TIPS, LANDMARKS_PER_HAND,
};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Cmd {
    Start(Vec<&'static str>),
    Stop,
    ScheduleStop(u64),
    Basic(&'static str),
    Dispose,
}

type Log = Rc<RefCell<Vec<Cmd>>>;

struct RecordingPoly {
    log: Log,
}

impl PolyphonicVoice for RecordingPoly {
    fn start_notes(&mut self, notes: &[NoteName]) -> Result<(), VoiceError> {
        self.log.borrow_mut().push(Cmd::Start(notes.to_vec()));
        Ok(())
    }
    fn stop_all(&mut self) -> Result<(), VoiceError> {
        self.log.borrow_mut().push(Cmd::Stop);
        Ok(())
    }
    fn schedule_stop(&mut self, after: Duration) -> Result<(), VoiceError> {
        self.log
            .borrow_mut()
            .push(Cmd::ScheduleStop(after.as_millis() as u64));
        Ok(())
    }
    fn basic_trigger(&mut self, note: NoteName) {
        self.log.borrow_mut().push(Cmd::Basic(note));
    }
    fn dispose(&mut self) {
        self.log.borrow_mut().push(Cmd::Dispose);
    }
}

struct RecordingMono {
    log: Log,
}

impl MonophonicVoice for RecordingMono {
    fn start_note(&mut self, note: NoteName) -> Result<(), VoiceError> {
        self.log.borrow_mut().push(Cmd::Start(vec![note]));
        Ok(())
    }
    fn stop_note(&mut self) -> Result<(), VoiceError> {
        self.log.borrow_mut().push(Cmd::Stop);
        Ok(())
    }
    fn schedule_stop(&mut self, after: Duration) -> Result<(), VoiceError> {
        self.log
            .borrow_mut()
            .push(Cmd::ScheduleStop(after.as_millis() as u64));
        Ok(())
    }
    fn basic_trigger(&mut self, note: NoteName) {
        self.log.borrow_mut().push(Cmd::Basic(note));
    }
    fn dispose(&mut self) {
        self.log.borrow_mut().push(Cmd::Dispose);
    }
}

fn poly_voice() -> (VoiceHandle, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    (
        VoiceHandle::Polyphonic(Box::new(RecordingPoly { log: log.clone() })),
        log,
    )
}

fn mono_voice() -> (VoiceHandle, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    (
        VoiceHandle::Monophonic(Box::new(RecordingMono { log: log.clone() })),
        log,
    )
}

/// Landmark set where finger `i` has the given tip and a base placed so
/// its extension is exactly `extensions[i]`. Wrist at the origin.
fn frame(tips: [Vec3; 5], extensions: [f32; 5]) -> HandFrame {
    let mut points = vec![Vec3::ZERO; LANDMARKS_PER_HAND];
    for i in 0..5 {
        points[FINGER_TIPS[i]] = tips[i];
        points[FINGER_BASES[i]] = tips[i] - Vec3::new(extensions[i], 0.0, 0.0);
    }
    HandFrame::from_landmarks(&points).unwrap()
}

fn uniform_tips(tip_y: f32) -> [Vec3; 5] {
    let mut tips = [Vec3::ZERO; 5];
    for (i, t) in tips.iter_mut().enumerate() {
        *t = Vec3::new(0.1 * i as f32, tip_y, 0.0);
    }
    tips
}

/// Canonical gesture: all fingers at extension 0.1, height 0.5; then the
/// index finger rises by 0.05 and extends to 0.2.
fn scenario_frames() -> (HandFrame, HandFrame) {
    let first = frame(uniform_tips(0.5), [0.1; 5]);
    let mut tips = uniform_tips(0.5);
    tips[1].y = 0.45;
    let second = frame(tips, [0.1, 0.2, 0.1, 0.1, 0.1]);
    (first, second)
}

#[test]
fn first_frame_after_acquisition_never_triggers() {
    let mut session = Session::new(ScalePreset::Major, InstrumentPreset::Synth);
    let (voice, log) = poly_voice();
    session.attach_voice(voice);
    let (first, _) = scenario_frames();
    let report = session.on_frame(Some(&first));
    assert!(report.moved.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn index_finger_rise_triggers_g4_on_c_major() {
    let mut session = Session::new(ScalePreset::Major, InstrumentPreset::Synth);
    let (voice, log) = poly_voice();
    session.attach_voice(voice);

    let (first, second) = scenario_frames();
    session.on_frame(Some(&first));
    let report = session.on_frame(Some(&second));

    assert_eq!(report.moved.as_slice(), &[Finger::Index]);
    assert_eq!(report.notes.as_slice(), &["G4"]);
    assert_eq!(*log.borrow(), vec![Cmd::Start(vec!["G4"])]);
    let state = session.playback_state().unwrap();
    assert!(state.is_playing);
    assert!(state.current_notes.contains("G4"));
}

#[test]
fn scale_selection_changes_the_resolved_note() {
    let mut session = Session::new(ScalePreset::Blues, InstrumentPreset::Synth);
    let (voice, log) = poly_voice();
    session.attach_voice(voice);

    let (first, second) = scenario_frames();
    session.on_frame(Some(&first));
    let report = session.on_frame(Some(&second));
    assert_eq!(report.notes.as_slice(), &["E4"]);
    assert_eq!(*log.borrow(), vec![Cmd::Start(vec!["E4"])]);
}

#[test]
fn no_hand_silences_exactly_once_and_forgets_features() {
    let mut session = Session::new(ScalePreset::Major, InstrumentPreset::Synth);
    let (voice, log) = poly_voice();
    session.attach_voice(voice);

    let (first, second) = scenario_frames();
    session.on_frame(Some(&first));
    session.on_frame(Some(&second));

    // Contiguous run of no-hand frames: one stop, then no-ops.
    session.on_frame(None);
    session.on_frame(None);
    session.on_frame(None);
    let stops = log.borrow().iter().filter(|c| **c == Cmd::Stop).count();
    assert_eq!(stops, 1);
    let state = session.playback_state().unwrap();
    assert!(!state.is_playing);
    assert!(state.current_notes.is_empty());

    // Previous features were dropped: one fresh frame cannot trigger.
    let report = session.on_frame(Some(&second));
    assert!(report.moved.is_empty());
    assert_eq!(log.borrow().iter().filter(|c| matches!(c, Cmd::Start(_))).count(), 1);
}

#[test]
fn gestures_are_dropped_until_a_voice_is_attached() {
    let mut session = Session::new(ScalePreset::Major, InstrumentPreset::Synth);
    assert!(!session.audio_ready());

    let (first, second) = scenario_frames();
    session.on_frame(Some(&first));
    let report = session.on_frame(Some(&second));
    // The gesture is still observed (display keeps working), just unvoiced.
    assert_eq!(report.notes.as_slice(), &["G4"]);
    assert!(session.playback_state().is_none());

    // Audio comes up; the pre-audio gesture is never replayed.
    let (voice, log) = poly_voice();
    session.attach_voice(voice);
    assert!(log.borrow().is_empty());
    let (_, held) = scenario_frames();
    let report = session.on_frame(Some(&held));
    assert!(report.moved.is_empty(), "held pose must not retrigger");

    // A fresh acquisition then sounds normally.
    session.on_frame(None);
    let (first, second) = scenario_frames();
    session.on_frame(Some(&first));
    session.on_frame(Some(&second));
    assert_eq!(*log.borrow(), vec![Cmd::Start(vec!["G4"])]);
}

#[test]
fn instrument_change_tears_down_the_old_voice_first() {
    let mut session = Session::new(ScalePreset::Major, InstrumentPreset::Synth);
    let (voice, old_log) = poly_voice();
    session.attach_voice(voice);

    let (first, second) = scenario_frames();
    session.on_frame(Some(&first));
    session.on_frame(Some(&second));

    session.change_instrument(InstrumentPreset::Bass);
    assert_eq!(
        *old_log.borrow(),
        vec![Cmd::Start(vec!["G4"]), Cmd::Stop, Cmd::Dispose]
    );
    assert!(!session.audio_ready());

    let (voice, new_log) = mono_voice();
    session.attach_voice(voice);
    session.on_frame(None);
    session.on_frame(Some(&first));
    session.on_frame(Some(&second));
    assert_eq!(*new_log.borrow(), vec![Cmd::Start(vec!["G4"])]);
}

#[test]
fn reset_silences_and_requires_two_new_frames() {
    let mut session = Session::new(ScalePreset::Major, InstrumentPreset::Synth);
    let (voice, log) = poly_voice();
    session.attach_voice(voice);

    let (first, second) = scenario_frames();
    session.on_frame(Some(&first));
    session.on_frame(Some(&second));
    session.reset();

    assert_eq!(
        *log.borrow(),
        vec![Cmd::Start(vec!["G4"]), Cmd::Stop]
    );
    let report = session.on_frame(Some(&second));
    assert!(report.moved.is_empty());
}
