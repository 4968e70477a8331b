//! Scorereel turns a club's all-time top-scorer roster into a deterministic,
//! frame-addressable video composition.
//!
//! The crate is the thin, testable layer between a JSON data file and an
//! external rendering engine:
//!
//! 1. **Validate**: `roster JSON -> Roster` (all-or-nothing, path-addressed
//!    errors, optional bounded gate)
//! 2. **Compose**: `Roster + TimelineParams -> Timeline` (three absolute
//!    frame windows, static card layout, entry delays, audio envelope)
//! 3. **Evaluate**: `Timeline + FrameIndex -> SceneFrame` (interpolated
//!    positions, opacities, counter values, audio gain)
//!
//! Evaluation is pure and stateless: the scene for a frame is a function of
//! the frame number and the composed timeline, nothing else. Rendering,
//! encoding, fonts, and image decoding are external collaborators; this
//! crate only describes what each frame should show.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod eval;
mod foundation;
mod roster;
mod timeline;

pub use animation::counter::GoalCounter;
pub use animation::ease::Ease;
pub use animation::interpolate::{
    Envelope, EnvelopePoint, Extrapolate, interpolate, interpolate_clamped,
};
pub use assets::lookup::{
    AssetIndex, AssetRef, CountryCodeIndex, StaticAssets, club_logo_index, error_avatar_url,
    fallback_avatar_url,
};
pub use eval::evaluator::{CardFrame, Evaluator, IntroFrame, OutroFrame, SceneFrame};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use roster::load::{GatePolicy, Roster, load_roster, load_roster_gated, parse_roster};
pub use roster::schema::{
    PlayerRecord, SchemaError, SchemaErrors, SchemaPathElem, validate_roster,
};
pub use timeline::compose::{
    AudioSpec, CardContent, CardTiming, IntroSpec, OutroSpec, Timeline, TimelineBuilder,
    WindowSummary, default_volume_envelope,
};
pub use timeline::params::TimelineParams;
