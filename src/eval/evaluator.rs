use crate::{
    animation::interpolate::interpolate_clamped,
    assets::lookup::AssetRef,
    foundation::core::{FrameIndex, Vec2},
    foundation::error::{ReelError, ReelResult},
    timeline::compose::Timeline,
};

/// Scene description for a single frame, in painter's order: background
/// windows first, outro last. Pure function of (timeline, frame); consumed
/// by the external renderer.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneFrame {
    pub frame: FrameIndex,
    pub intro: Option<IntroFrame>,
    pub cards: Vec<CardFrame>,
    pub audio_gain: Option<f64>,
    pub outro: Option<OutroFrame>,
}

/// Intro window state: club identity sliding into place.
///
/// Slide values are percentage offsets of the element's own height, matching
/// the renderer's `translateY(..%)` contract.
#[derive(Clone, Debug, serde::Serialize)]
pub struct IntroFrame {
    pub club: String,
    pub logo: Option<AssetRef>,
    pub title: String,
    pub subtitle: String,
    pub credit: String,
    pub logo_slide_pct: f64,
    pub club_slide_pct: f64,
    pub title_slide_pct: f64,
    pub subtitle_slide_pct: f64,
    pub credit_slide_pct: f64,
}

/// One card's resolved layout for this frame, with its static display
/// content carried along for the renderer.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CardFrame {
    pub rank: u32,
    pub name: String,
    pub position: Vec2,
    pub opacity: f64,
    pub displayed_goals: u32,
    pub content: crate::timeline::compose::CardContent,
}

/// Outro window state: the closing clip and how far into it we are.
#[derive(Clone, Debug, serde::Serialize)]
pub struct OutroFrame {
    pub video: AssetRef,
    pub local_frame: FrameIndex,
}

/// Frames over which a card fades in after its entry delay.
const CARD_FADE_FRAMES: f64 = 20.0;
/// Frames over which a main card slides up, and its starting offset.
const CARD_SLIDE_FRAMES: f64 = 30.0;
const CARD_SLIDE_START_PX: f64 = 200.0;

/// Stateless per-frame evaluator. Frame number alone decides which windows
/// contribute; windows are evaluated independently and may overlap.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(timeline))]
    pub fn eval_frame(timeline: &Timeline, frame: FrameIndex) -> ReelResult<SceneFrame> {
        if frame.0 >= timeline.total.0 {
            return Err(ReelError::evaluation(format!(
                "frame {} is out of bounds (total {})",
                frame.0, timeline.total.0
            )));
        }

        let intro = match (&timeline.intro, timeline.intro_range.local(frame)) {
            (Some(spec), Some(local)) => Some(eval_intro(spec, local as f64)),
            _ => None,
        };

        let (cards, audio_gain) = match timeline.main_range.local(frame) {
            Some(local) => eval_main(timeline, local),
            None => (Vec::new(), None),
        };

        let outro = match (&timeline.outro, timeline.outro_range) {
            (Some(spec), Some(range)) => range.local(frame).map(|local| OutroFrame {
                video: spec.video.clone(),
                local_frame: FrameIndex(local),
            }),
            _ => None,
        };

        Ok(SceneFrame {
            frame,
            intro,
            cards,
            audio_gain,
            outro,
        })
    }
}

fn eval_intro(spec: &crate::timeline::compose::IntroSpec, local: f64) -> IntroFrame {
    // The club headline leads; title, subtitle, and credit follow together
    // on the later curve.
    IntroFrame {
        club: spec.club.clone(),
        logo: spec.logo.clone(),
        title: spec.title.clone(),
        subtitle: spec.subtitle.clone(),
        credit: spec.credit.clone(),
        logo_slide_pct: interpolate_clamped(local, (0.0, 15.0), (0.0, 5.0)),
        club_slide_pct: interpolate_clamped(local, (0.0, 25.0), (100.0, 0.0)),
        title_slide_pct: interpolate_clamped(local, (15.0, 40.0), (100.0, 0.0)),
        subtitle_slide_pct: interpolate_clamped(local, (15.0, 40.0), (100.0, 0.0)),
        credit_slide_pct: interpolate_clamped(local, (15.0, 40.0), (100.0, 0.0)),
    }
}

fn eval_main(timeline: &Timeline, local: u64) -> (Vec<CardFrame>, Option<f64>) {
    let params = &timeline.params;
    let local_f = local as f64;

    // Scroll begins only after every main card has entered. The distance is
    // fixed by the configured card count, not the roster size, so short
    // rosters keep the stock pacing.
    let scroll_x = interpolate_clamped(
        local_f - (params.main_cards_window() as f64),
        (0.0, params.scroll_duration() as f64),
        (0.0, -params.scroll_distance(params.cards_to_show)),
    );

    let cards = timeline
        .cards
        .iter()
        .map(|card| {
            let entry_local = local_f - (card.entry_delay as f64);

            let opacity = interpolate_clamped(entry_local, (0.0, CARD_FADE_FRAMES), (0.0, 1.0));
            let slide_up = if card.is_main_card {
                interpolate_clamped(
                    entry_local,
                    (0.0, CARD_SLIDE_FRAMES),
                    (CARD_SLIDE_START_PX, 0.0),
                )
            } else {
                0.0
            };

            CardFrame {
                rank: card.rank,
                name: card.name.clone(),
                position: Vec2::new(card.slot_x + scroll_x, slide_up),
                opacity,
                // Counters run on window-local time, so late cards join
                // mid-count rather than each restarting from zero.
                displayed_goals: card.counter.displayed(local as i64),
                content: card.content.clone(),
            }
        })
        .collect();

    let audio_gain = timeline.audio.as_ref().map(|a| a.volume.sample(local_f));

    (cards, audio_gain)
}
