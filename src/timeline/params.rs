use crate::foundation::{
    core::{Canvas, Fps, FrameIndex},
    error::{ReelError, ReelResult},
};

/// Every timing and layout constant a composition build needs.
///
/// All frame math downstream derives from these fields; nothing reads an
/// absolute frame literal. Defaults reproduce the stock render: 60 fps,
/// 2560x1440, a 120-frame intro, a 200 s main window, 30 cards in 650 px
/// lanes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineParams {
    pub fps: Fps,
    pub canvas: Canvas,
    /// Intro window length in frames.
    pub intro_frames: u64,
    /// Main (scrolling list) window length in frames.
    pub main_frames: u64,
    /// Cards kept from the roster.
    pub cards_to_show: usize,
    /// Frames before the first card enters.
    pub initial_delay: u64,
    /// Gap between consecutive main-card entries.
    pub card_entry_duration: u64,
    /// Gap between consecutive entries after the main cards.
    pub stagger_delay: u64,
    /// Leading cards that get the fast sequential reveal.
    pub main_card_count: usize,
    /// Lane width between neighboring card slots.
    pub card_spacing_px: f64,
    /// Distance of slot 0 left of the canvas midline.
    pub slot_base_offset_px: f64,
    /// How many frames before the main window ends the outro overlaps in.
    pub outro_lead_frames: u64,
}

impl TimelineParams {
    /// Stock parameters for a given render surface and main-window length.
    pub fn for_render(fps: Fps, canvas: Canvas, main_secs: f64) -> Self {
        Self {
            fps,
            canvas,
            intro_frames: 120,
            main_frames: fps.secs_to_frames_round(main_secs),
            cards_to_show: 30,
            initial_delay: 30,
            card_entry_duration: 30,
            stagger_delay: 100,
            main_card_count: 4,
            card_spacing_px: 650.0,
            slot_base_offset_px: 1300.0,
            outro_lead_frames: 30,
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.intro_frames == 0 {
            return Err(ReelError::validation("intro_frames must be > 0"));
        }
        if self.cards_to_show == 0 {
            return Err(ReelError::validation("cards_to_show must be > 0"));
        }
        if self.card_entry_duration == 0 || self.stagger_delay == 0 {
            return Err(ReelError::validation(
                "card_entry_duration and stagger_delay must be > 0",
            ));
        }
        if self.main_card_count == 0 {
            return Err(ReelError::validation("main_card_count must be > 0"));
        }
        if self.main_frames <= self.main_cards_window() {
            return Err(ReelError::validation(
                "main_frames must exceed the main-card entry window",
            ));
        }
        if self.outro_lead_frames > self.intro_frames + self.main_frames {
            return Err(ReelError::validation(
                "outro_lead_frames cannot exceed the intro+main span",
            ));
        }
        if !(self.card_spacing_px > 0.0) || !(self.slot_base_offset_px >= 0.0) {
            return Err(ReelError::validation(
                "card_spacing_px must be > 0 and slot_base_offset_px >= 0",
            ));
        }
        Ok(())
    }

    /// Static horizontal slot of card `index`, frame-independent.
    pub fn slot_x(&self, index: usize) -> f64 {
        let start = f64::from(self.canvas.width) / 2.0 - self.slot_base_offset_px;
        start + (index as f64) * self.card_spacing_px
    }

    /// Main-window-local frame at which card `index` begins entering.
    ///
    /// Two-phase reveal: the leading cards enter back to back every
    /// `card_entry_duration`; the rest follow on the slower stagger cadence
    /// once the main-card window closes.
    pub fn entry_delay(&self, index: usize) -> u64 {
        if index < self.main_card_count {
            self.initial_delay + (index as u64) * self.card_entry_duration
        } else {
            self.main_cards_window()
                + ((index - self.main_card_count) as u64) * self.stagger_delay
        }
    }

    pub fn is_main_card(&self, index: usize) -> bool {
        index < self.main_card_count
    }

    /// Frames until the last main card has fully entered.
    pub fn main_cards_window(&self) -> u64 {
        self.initial_delay + (self.main_card_count as u64) * self.card_entry_duration
    }

    /// Frames available for the horizontal scroll after all entries.
    pub fn scroll_duration(&self) -> u64 {
        self.main_frames.saturating_sub(self.main_cards_window())
    }

    /// Total leftward scroll needed to bring the last of `cards` into view.
    pub fn scroll_distance(&self, cards: usize) -> f64 {
        self.card_spacing_px * (cards.saturating_sub(1) as f64)
    }

    /// Absolute frame at which the outro window opens, derived from the
    /// configured durations rather than hard-coded.
    pub fn outro_start(&self) -> FrameIndex {
        FrameIndex(self.intro_frames + self.main_frames - self.outro_lead_frames)
    }
}
