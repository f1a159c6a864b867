//! Landmark sources — from LeapMotion hardware or a mouse simulation.
//!
//! The public interface is [`LandmarkSource::poll`], called once per frame
//! by the application loop.  Consumers don't need to know whether samples
//! came from real hardware or the mouse.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use hand_cursor::{HandPose, LandmarkPoint, LandmarkSample, Point, ScreenMapping};
use tracing::warn;

// ════════════════════════════════════════════════════════════════════════════
// SourceEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum SourceEvent {
    /// The device is open and delivering frames.
    Ready,
    Frame(LandmarkSample),
    /// The device could not be acquired or went away.  Terminal.
    DeviceError(String),
}

/// Mouse state sampled from the window each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSnapshot {
    /// `None` while the pointer is outside the window.
    pub position:  Option<(f32, f32)>,
    /// Left button: pinch.
    pub primary:   bool,
    /// Right button: simulated hand loss.
    pub secondary: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

pub trait LandmarkSource {
    /// Non-blocking.  Returns `Frame(NotReady)` when nothing new arrived.
    fn poll(&mut self) -> SourceEvent;

    /// Window pointer state for this frame; only the simulator uses it.
    fn observe_pointer(&mut self, _pointer: &PointerSnapshot) {}
}

/// A hardware poller that runs on its own thread and pushes events.
pub trait LandmarkFeed: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>);
}

/// Spawn a feed on its own thread and return the polling end.
pub fn spawn_landmark_feed<F: LandmarkFeed>(feed: F) -> ChannelSource {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(feed).run(tx));
    ChannelSource::new(rx)
}

// ════════════════════════════════════════════════════════════════════════════
// ChannelSource — the loop side of a threaded feed
// ════════════════════════════════════════════════════════════════════════════

/// Drains the feed channel each poll and keeps only the newest frame that
/// says something about the hand.  A buffered `NotReady` never hides an
/// earlier pose.
pub struct ChannelSource {
    rx:           Receiver<SourceEvent>,
    /// Control event met behind a frame; delivered on the next poll.
    pending:      Option<SourceEvent>,
    disconnected: bool,
}

impl ChannelSource {
    pub fn new(rx: Receiver<SourceEvent>) -> Self {
        ChannelSource { rx, pending: None, disconnected: false }
    }
}

impl LandmarkSource for ChannelSource {
    fn poll(&mut self) -> SourceEvent {
        if let Some(control) = self.pending.take() {
            return control;
        }
        if self.disconnected {
            return SourceEvent::Frame(LandmarkSample::NotReady);
        }

        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(SourceEvent::Frame(LandmarkSample::NotReady)) => {}
                Ok(SourceEvent::Frame(sample)) => latest = Some(sample),
                Ok(control) => {
                    if latest.is_none() {
                        return control;
                    }
                    self.pending = Some(control);
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    if latest.is_none() {
                        warn!("landmark feed stopped");
                        return SourceEvent::DeviceError("Landmark feed stopped".into());
                    }
                    break;
                }
            }
        }
        SourceEvent::Frame(latest.unwrap_or(LandmarkSample::NotReady))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UnavailableSource — a device that never came up
// ════════════════════════════════════════════════════════════════════════════

/// Reports `reason` once, then stays silent.
pub struct UnavailableSource {
    reason:   String,
    reported: bool,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        UnavailableSource { reason: reason.into(), reported: false }
    }
}

impl LandmarkSource for UnavailableSource {
    fn poll(&mut self) -> SourceEvent {
        if self.reported {
            return SourceEvent::Frame(LandmarkSample::NotReady);
        }
        self.reported = true;
        SourceEvent::DeviceError(self.reason.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MouseLandmarkSource — simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Thumb offset (normalized) while the left button is held.
const PINCHED_GAP: f32 = 0.02;
/// Thumb offset with the button released, well above the pinch threshold.
const OPEN_GAP:    f32 = 0.15;

/// Turns the window pointer into a synthetic hand: index tip under the
/// pointer, thumb tip close to it while the left button is down.
pub struct MouseLandmarkSource {
    mapping: ScreenMapping,
    pointer: PointerSnapshot,
    ready:   bool,
}

impl MouseLandmarkSource {
    pub fn new(mapping: ScreenMapping) -> Self {
        MouseLandmarkSource { mapping, pointer: PointerSnapshot::default(), ready: false }
    }
}

impl LandmarkSource for MouseLandmarkSource {
    fn poll(&mut self) -> SourceEvent {
        if !self.ready {
            self.ready = true;
            return SourceEvent::Ready;
        }
        if self.pointer.secondary {
            return SourceEvent::Frame(LandmarkSample::NoHand);
        }
        let Some((px, py)) = self.pointer.position else {
            return SourceEvent::Frame(LandmarkSample::NotReady);
        };

        let (nx, ny) = self.mapping.to_normalized(Point::new(px, py));
        let gap = if self.pointer.primary { PINCHED_GAP } else { OPEN_GAP };
        let pose = HandPose::from_tips(
            LandmarkPoint::new(nx, ny, 0.0),
            LandmarkPoint::new(nx, ny + gap, 0.0),
        );
        SourceEvent::Frame(LandmarkSample::Hand(pose))
    }

    fn observe_pointer(&mut self, pointer: &PointerSnapshot) {
        self.pointer = *pointer;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InteractionBox — LeapMotion millimetres → normalized camera coordinates
// ════════════════════════════════════════════════════════════════════════════

/// The region above the controller that maps onto the full screen.
///
/// Leap coordinates are millimetres with y up and x to the user's right.
/// Output follows the camera-frame convention (y down, x seen from the
/// device facing the user) so the default mirrored screen mapping applies.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionBox {
    pub width_mm:  f32,
    pub floor_mm:  f32,
    pub height_mm: f32,
    pub depth_mm:  f32,
}

impl Default for InteractionBox {
    fn default() -> Self {
        InteractionBox {
            width_mm:  300.0,
            floor_mm:  100.0,
            height_mm: 300.0,
            depth_mm:  300.0,
        }
    }
}

impl InteractionBox {
    pub fn normalize(&self, x: f32, y: f32, z: f32) -> LandmarkPoint {
        let nx = 1.0 - (x + self.width_mm / 2.0) / self.width_mm;
        let ny = 1.0 - (y - self.floor_mm) / self.height_mm;
        LandmarkPoint::new(nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0), z / self.depth_mm)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Feed backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Only the first tracked hand is used; its thumb and index distal tips
/// become landmarks 4 and 8 of the pose.
#[cfg(feature = "leap")]
#[derive(Default)]
pub struct LeapLandmarkSource {
    pub bounds: InteractionBox,
}

#[cfg(feature = "leap")]
impl LandmarkFeed for LeapLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
        use leaprs::*;
        use tracing::info;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                let _ = tx.send(SourceEvent::DeviceError(format!("Failed to open LeapC connection: {:?}", e)));
                return;
            }
        };
        if let Err(e) = connection.open() {
            let _ = tx.send(SourceEvent::DeviceError(format!("Failed to open LeapMotion device: {:?}", e)));
            return;
        }
        info!("LeapMotion connection open");
        if tx.send(SourceEvent::Ready).is_err() { return; }

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                let sample = match hands.first() {
                    None       => LandmarkSample::NoHand,
                    Some(hand) => leap_pose(hand, &self.bounds)
                        .map(LandmarkSample::Hand)
                        .unwrap_or(LandmarkSample::NotReady),
                };
                if tx.send(SourceEvent::Frame(sample)).is_err() { return; }
            }
        }
    }
}

#[cfg(feature = "leap")]
fn leap_pose(hand: &leaprs::Hand, bounds: &InteractionBox) -> Option<HandPose> {
    let fingers: Vec<_> = hand.digits().collect();
    if fingers.len() < 2 { return None; }

    let thumb = fingers[0].distal().next_joint();
    let index = fingers[1].distal().next_joint();
    Some(HandPose::from_tips(
        bounds.normalize(index.x, index.y, index.z),
        bounds.normalize(thumb.x, thumb.y, thumb.z),
    ))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    struct Burst(Vec<SourceEvent>);

    impl LandmarkFeed for Burst {
        fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
            for e in self.0 {
                let _ = tx.send(e);
            }
        }
    }

    fn channel_with(events: Vec<SourceEvent>) -> ChannelSource {
        let (tx, rx) = mpsc::channel();
        for e in events {
            tx.send(e).unwrap();
        }
        drop(tx);
        ChannelSource::new(rx)
    }

    fn mouse() -> MouseLandmarkSource {
        MouseLandmarkSource::new(ScreenMapping::new(1000.0, 500.0, true))
    }

    #[test]
    fn channel_keeps_only_newest_frame() {
        let mut src = channel_with(vec![
            SourceEvent::Frame(LandmarkSample::NoHand),
            SourceEvent::Frame(LandmarkSample::NotReady),
            SourceEvent::Frame(LandmarkSample::NoHand),
        ]);
        assert_eq!(src.poll(), SourceEvent::Frame(LandmarkSample::NoHand));
        // sender dropped and nothing buffered: from now on nothing is ready
        assert_eq!(src.poll(), SourceEvent::Frame(LandmarkSample::NotReady));
    }

    fn open_hand() -> LandmarkSample {
        LandmarkSample::Hand(HandPose::from_tips(
            LandmarkPoint::new(0.4, 0.4, 0.0),
            LandmarkPoint::new(0.4, 0.6, 0.0),
        ))
    }

    #[test]
    fn not_ready_does_not_hide_a_buffered_pose() {
        let mut src = channel_with(vec![
            SourceEvent::Frame(open_hand()),
            SourceEvent::Frame(LandmarkSample::NotReady),
        ]);
        assert_eq!(src.poll(), SourceEvent::Frame(open_hand()));
    }

    #[test]
    fn frame_before_control_event_is_kept() {
        let mut src = channel_with(vec![
            SourceEvent::Frame(open_hand()),
            SourceEvent::DeviceError("unplugged".into()),
        ]);
        assert_eq!(src.poll(), SourceEvent::Frame(open_hand()));
        assert_eq!(src.poll(), SourceEvent::DeviceError("unplugged".into()));
    }

    #[test]
    fn control_events_are_delivered_first() {
        let mut src = channel_with(vec![
            SourceEvent::Ready,
            SourceEvent::Frame(LandmarkSample::NoHand),
        ]);
        assert_eq!(src.poll(), SourceEvent::Ready);
        assert_eq!(src.poll(), SourceEvent::Frame(LandmarkSample::NoHand));
    }

    #[test]
    fn stopped_feed_reports_device_error_once() {
        let mut src = channel_with(vec![]);
        assert!(matches!(src.poll(), SourceEvent::DeviceError(_)));
        assert_eq!(src.poll(), SourceEvent::Frame(LandmarkSample::NotReady));
    }

    #[test]
    fn spawned_feed_delivers_to_poller() {
        let mut src = spawn_landmark_feed(Burst(vec![SourceEvent::Ready]));
        let mut seen = None;
        for _ in 0..1000 {
            match src.poll() {
                SourceEvent::Frame(LandmarkSample::NotReady) => thread::yield_now(),
                other => { seen = Some(other); break; }
            }
        }
        assert_eq!(seen, Some(SourceEvent::Ready));
    }

    #[test]
    fn unavailable_reports_once() {
        let mut src = UnavailableSource::new("built without LeapMotion support");
        assert_eq!(src.poll(), SourceEvent::DeviceError("built without LeapMotion support".into()));
        assert_eq!(src.poll(), SourceEvent::Frame(LandmarkSample::NotReady));
    }

    #[test]
    fn mouse_announces_ready_then_tracks() {
        let mut src = mouse();
        assert_eq!(src.poll(), SourceEvent::Ready);
        src.observe_pointer(&PointerSnapshot { position: Some((250.0, 100.0)), ..Default::default() });
        let SourceEvent::Frame(LandmarkSample::Hand(pose)) = src.poll() else {
            panic!("expected a hand");
        };
        let tip = pose.index_tip().unwrap();
        // mirrored: 250 px of 1000 is 0.75 of the camera frame
        assert!((tip.x - 0.75).abs() < 1e-5);
        assert!((tip.y - 0.2).abs() < 1e-5);
    }

    #[test]
    fn mouse_button_closes_the_pinch() {
        let mut src = mouse();
        src.poll();
        for (primary, expect_close) in [(false, false), (true, true)] {
            src.observe_pointer(&PointerSnapshot { position: Some((10.0, 10.0)), primary, secondary: false });
            let SourceEvent::Frame(LandmarkSample::Hand(pose)) = src.poll() else {
                panic!("expected a hand");
            };
            let d = pose.index_tip().unwrap().distance(pose.thumb_tip().unwrap());
            assert_eq!(d < 0.08, expect_close);
        }
    }

    #[test]
    fn mouse_outside_window_is_not_ready_and_right_button_hides_hand() {
        let mut src = mouse();
        src.poll();
        src.observe_pointer(&PointerSnapshot::default());
        assert_eq!(src.poll(), SourceEvent::Frame(LandmarkSample::NotReady));
        src.observe_pointer(&PointerSnapshot { position: Some((1.0, 1.0)), primary: false, secondary: true });
        assert_eq!(src.poll(), SourceEvent::Frame(LandmarkSample::NoHand));
    }

    #[test]
    fn interaction_box_maps_centre_and_clamps() {
        let b = InteractionBox::default();
        let c = b.normalize(0.0, 250.0, 0.0);
        assert!((c.x - 0.5).abs() < 1e-5 && (c.y - 0.5).abs() < 1e-5);
        let high_right = b.normalize(500.0, 900.0, 0.0);
        assert_eq!((high_right.x, high_right.y), (0.0, 0.0));
    }
}
