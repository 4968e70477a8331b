use crate::{
    animation::ease::Ease,
    animation::interpolate::interpolate_clamped,
    foundation::core::{Fps, FrameIndex},
};

/// Count-up animation for a goal tally.
///
/// The displayed value ramps from 0 to `target` over `duration` frames with
/// a symmetric quadratic ease, so the count accelerates in and settles out
/// instead of ticking linearly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GoalCounter {
    pub target: u32,
    pub duration: FrameIndex,
}

/// Large tallies finish in a fixed 2.5 s regardless of magnitude.
const BIG_TALLY_THRESHOLD: u32 = 300;
const BIG_TALLY_SECS: f64 = 2.5;
/// Small tallies tick five frames per goal, floored at 3 s.
const FRAMES_PER_GOAL: u64 = 5;
const MIN_SECS: f64 = 3.0;

impl GoalCounter {
    pub fn for_target(target: u32, fps: Fps) -> Self {
        Self {
            target,
            duration: Self::duration_for(target, fps),
        }
    }

    /// Duration policy: `target >= 300` counts up in 2.5 s; smaller tallies
    /// take `target * 5` frames with a 3 s floor, so short lists still get a
    /// visible ramp.
    pub fn duration_for(target: u32, fps: Fps) -> FrameIndex {
        if target >= BIG_TALLY_THRESHOLD {
            return FrameIndex(fps.secs_to_frames_round(BIG_TALLY_SECS));
        }
        let floor = fps.secs_to_frames_round(MIN_SECS);
        FrameIndex(floor.max(u64::from(target) * FRAMES_PER_GOAL))
    }

    /// Linear progress in `[0, 1]` at `local_frame` frames into the count.
    /// Negative frames (before the card's entry) read as 0.
    pub fn progress(&self, local_frame: i64) -> f64 {
        interpolate_clamped(
            local_frame as f64,
            (0.0, self.duration.0 as f64),
            (0.0, 1.0),
        )
    }

    /// Eased integer value shown at `local_frame`.
    pub fn displayed(&self, local_frame: i64) -> u32 {
        let eased = Ease::InOutQuad.apply(self.progress(local_frame));
        (f64::from(self.target) * eased).round() as u32
    }
}
