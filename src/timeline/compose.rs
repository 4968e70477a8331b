use crate::{
    animation::counter::GoalCounter,
    animation::interpolate::Envelope,
    assets::lookup::{AssetIndex, AssetRef, CountryCodeIndex, club_logo_index, error_avatar_url},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::ReelResult,
    roster::load::Roster,
    roster::schema::PlayerRecord,
    timeline::params::TimelineParams,
};

/// Everything a renderer needs to draw one card, resolved once at compose
/// time: portrait and flag/badge refs, display strings with their
/// missing-field placeholders already applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CardContent {
    pub portrait: String,
    /// Swapped in by the renderer when the portrait fails to load.
    pub portrait_fallback: String,
    pub nation: String,
    pub flag: Option<String>,
    pub club: String,
    pub club_badge: Option<AssetRef>,
    pub position: String,
    pub appearances: u32,
    pub assists: u32,
    pub minutes: String,
    pub birthday: String,
    pub period: String,
}

impl CardContent {
    fn resolve(player: &PlayerRecord, logos: &AssetIndex, flags: &CountryCodeIndex) -> Self {
        Self {
            portrait: player.portrait_url(),
            portrait_fallback: error_avatar_url(&player.name),
            nation: player.nation.clone(),
            flag: flags.lookup(&player.nation_code),
            club: player.club.clone(),
            club_badge: logos.lookup(&player.club).cloned(),
            position: player.position_display().to_string(),
            appearances: player.appearances,
            assists: player.assists,
            minutes: player.minutes_display(),
            birthday: player.birthday_display().to_string(),
            period: player.period.clone(),
        }
    }
}

/// Static per-card layout and timing, fixed once the roster is known.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CardTiming {
    pub index: usize,
    pub rank: u32,
    pub name: String,
    pub slot_x: f64,
    pub entry_delay: u64,
    pub is_main_card: bool,
    pub counter: GoalCounter,
    pub content: CardContent,
}

/// Intro window content: the leader's club identity.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IntroSpec {
    pub club: String,
    pub logo: Option<AssetRef>,
    pub title: String,
    pub subtitle: String,
    pub credit: String,
}

const INTRO_TITLE: &str = "All-Time Top Scorers";
const INTRO_SUBTITLE: &str = "A Legacy of Goals, A History of Greatness";
const INTRO_CREDIT: &str = "Present by: DANGO BALL";

/// Background music placement over the main window.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AudioSpec {
    pub asset: AssetRef,
    /// Frames skipped from the start of the media file.
    pub trim_start_frames: FrameIndex,
    /// Gain over main-window-local frames.
    pub volume: Envelope,
}

/// Pre-rendered closing clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OutroSpec {
    pub video: AssetRef,
    pub length_frames: u64,
}

/// Summary row for one time window, as reported by the CLI.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WindowSummary {
    pub name: &'static str,
    pub range: FrameRange,
}

/// Fully composed timeline: three windows keyed by absolute frame offsets,
/// plus the static card layout. Everything here is frame-independent; the
/// evaluator turns it into per-frame state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    pub params: TimelineParams,
    pub intro: Option<IntroSpec>,
    pub intro_range: FrameRange,
    pub main_range: FrameRange,
    pub outro_range: Option<FrameRange>,
    pub cards: Vec<CardTiming>,
    pub audio: Option<AudioSpec>,
    pub outro: Option<OutroSpec>,
    pub total: FrameIndex,
}

impl Timeline {
    pub fn windows(&self) -> Vec<WindowSummary> {
        let mut out = vec![
            WindowSummary {
                name: "intro",
                range: self.intro_range,
            },
            WindowSummary {
                name: "main",
                range: self.main_range,
            },
        ];
        if let Some(range) = self.outro_range {
            out.push(WindowSummary {
                name: "outro",
                range,
            });
        }
        out
    }
}

/// The stock volume curve: ramp in over 30 frames, hold at half gain, ramp
/// out over the final 10 seconds of the main window.
pub fn default_volume_envelope(params: &TimelineParams) -> ReelResult<Envelope> {
    let main = params.main_frames as f64;
    let ramp_in_end = 30.0_f64.min(main);
    let fade_out_start = (main - 10.0 * params.fps.as_f64()).max(ramp_in_end);
    Envelope::from_pairs(&[
        (0.0, 0.0),
        (ramp_in_end, 0.5),
        (fade_out_start, 0.5),
        (main, 0.0),
    ])
}

/// Builder assembling a [`Timeline`] from params, roster, and assets.
pub struct TimelineBuilder {
    params: TimelineParams,
    audio: Option<AssetRef>,
    volume: Option<Envelope>,
    outro: Option<(AssetRef, u64)>,
    logos: AssetIndex,
}

impl TimelineBuilder {
    pub fn new(params: TimelineParams) -> Self {
        Self {
            params,
            audio: None,
            volume: None,
            outro: None,
            logos: club_logo_index(),
        }
    }

    /// Attach a background audio track (stock volume curve unless
    /// [`volume`](Self::volume) overrides it).
    pub fn audio(mut self, asset: AssetRef) -> Self {
        self.audio = Some(asset);
        self
    }

    /// Override the volume envelope (main-window-local frames).
    pub fn volume(mut self, envelope: Envelope) -> Self {
        self.volume = Some(envelope);
        self
    }

    /// Attach a closing clip of the given length.
    pub fn outro(mut self, video: AssetRef, length_frames: u64) -> Self {
        self.outro = Some((video, length_frames));
        self
    }

    /// Replace the club-badge lookup table.
    pub fn logos(mut self, logos: AssetIndex) -> Self {
        self.logos = logos;
        self
    }

    #[tracing::instrument(skip(self, roster), fields(players = roster.len()))]
    pub fn build(self, roster: &Roster) -> ReelResult<Timeline> {
        let params = self.params;
        params.validate()?;

        let flags = CountryCodeIndex::default();
        let cards: Vec<CardTiming> = roster
            .players
            .iter()
            .take(params.cards_to_show)
            .enumerate()
            .map(|(index, p)| CardTiming {
                index,
                rank: p.rank,
                name: p.display_name().to_string(),
                slot_x: params.slot_x(index),
                entry_delay: params.entry_delay(index),
                is_main_card: params.is_main_card(index),
                counter: GoalCounter::for_target(p.goals, params.fps),
                content: CardContent::resolve(p, &self.logos, &flags),
            })
            .collect();

        let intro = roster.leader().map(|leader| IntroSpec {
            club: leader.club.clone(),
            logo: self.logos.lookup(&leader.club).cloned(),
            title: INTRO_TITLE.to_string(),
            subtitle: INTRO_SUBTITLE.to_string(),
            credit: INTRO_CREDIT.to_string(),
        });

        let intro_range = FrameRange::new(FrameIndex(0), FrameIndex(params.intro_frames))?;
        let main_end = params.intro_frames + params.main_frames;
        let main_range = FrameRange::new(FrameIndex(params.intro_frames), FrameIndex(main_end))?;

        let outro = self
            .outro
            .map(|(video, length_frames)| OutroSpec {
                video,
                length_frames,
            });
        let outro_range = outro
            .as_ref()
            .map(|o| {
                let start = params.outro_start();
                FrameRange::new(start, FrameIndex(start.0 + o.length_frames))
            })
            .transpose()?;

        let volume = match self.volume {
            Some(env) => {
                env.validate()?;
                env
            }
            None => default_volume_envelope(&params)?,
        };
        let audio = self.audio.map(|asset| AudioSpec {
            asset,
            trim_start_frames: FrameIndex(params.intro_frames),
            volume,
        });

        let total = FrameIndex(
            outro_range
                .map(|r| r.end.0)
                .unwrap_or(0)
                .max(main_end),
        );

        tracing::debug!(
            cards = cards.len(),
            total = total.0,
            outro = outro_range.map(|r| r.start.0),
            "timeline composed"
        );

        Ok(Timeline {
            params,
            intro,
            intro_range,
            main_range,
            outro_range,
            cards,
            audio,
            outro,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::lookup::StaticAssets,
        foundation::core::{Canvas, Fps},
        roster::load::parse_roster,
    };

    fn stock_params() -> TimelineParams {
        TimelineParams::for_render(
            Fps::new(60, 1).unwrap(),
            Canvas::new(2560, 1440).unwrap(),
            200.0,
        )
    }

    fn roster_of(n: usize) -> Roster {
        let entries: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"rank": {rank}, "name": "Player {rank}", "image_url": "https://img.example.com/{rank}.png",
                        "appearances": 100, "goals": {goals}, "assists": 10, "nation": "England",
                        "nation_code": "ENG", "club": "Manchester City", "date_of_birth": "1990-01-01",
                        "position": "Forward", "jersey_name": "P{rank}", "minutes_played": 9000, "period": "2010 - 2020"}}"#,
                    rank = n - i,
                    goals = 50 + (n - i) * 10,
                )
            })
            .collect();
        parse_roster(&format!("[{}]", entries.join(",")), 30).unwrap()
    }

    #[test]
    fn builds_three_windows_with_derived_outro() {
        let assets = StaticAssets::default();
        let tl = TimelineBuilder::new(stock_params())
            .audio(assets.audio_track.clone())
            .outro(assets.outro_clip.clone(), 600)
            .build(&roster_of(10))
            .unwrap();

        let windows = tl.windows();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].range, FrameRange::new(FrameIndex(0), FrameIndex(120)).unwrap());
        assert_eq!(
            windows[1].range,
            FrameRange::new(FrameIndex(120), FrameIndex(12_120)).unwrap()
        );
        // Outro overlaps the tail of the main window.
        assert_eq!(windows[2].range.start, FrameIndex(12_090));
        assert_eq!(tl.total, FrameIndex(12_690));
    }

    #[test]
    fn intro_carries_leader_club_and_logo() {
        let tl = TimelineBuilder::new(stock_params())
            .build(&roster_of(5))
            .unwrap();
        let intro = tl.intro.unwrap();
        assert_eq!(intro.club, "Manchester City");
        assert!(intro.logo.is_some());
        assert_eq!(intro.title, "All-Time Top Scorers");
    }

    #[test]
    fn empty_roster_builds_without_intro_or_cards() {
        let tl = TimelineBuilder::new(stock_params())
            .build(&Roster::empty())
            .unwrap();
        assert!(tl.intro.is_none());
        assert!(tl.cards.is_empty());
        assert_eq!(tl.total, FrameIndex(12_120));
    }

    #[test]
    fn card_timings_follow_two_phase_reveal() {
        let tl = TimelineBuilder::new(stock_params())
            .build(&roster_of(8))
            .unwrap();
        assert_eq!(tl.cards.len(), 8);
        assert!(tl.cards[3].is_main_card);
        assert!(!tl.cards[4].is_main_card);
        assert_eq!(tl.cards[4].entry_delay, 150);
        assert_eq!(tl.cards[7].entry_delay, 450);
        assert_eq!(tl.cards[0].rank, 1);
    }

    #[test]
    fn card_content_resolves_refs_and_fallbacks() {
        let tl = TimelineBuilder::new(stock_params())
            .build(&roster_of(3))
            .unwrap();
        let content = &tl.cards[0].content;
        assert_eq!(content.flag.as_deref(), Some("gb-eng"));
        assert_eq!(
            content.club_badge.as_ref().map(|a| a.as_str()),
            Some("logos/manchester_city.png")
        );
        assert!(content.portrait.starts_with("https://img.example.com/"));
        assert!(content.portrait_fallback.contains("Player+1"));
        assert_eq!(content.minutes, "9,000");
        assert_eq!(content.period, "2010 - 2020");
    }

    #[test]
    fn stock_volume_envelope_shape() {
        let env = default_volume_envelope(&stock_params()).unwrap();
        assert_eq!(env.sample(0.0), 0.0);
        assert_eq!(env.sample(30.0), 0.5);
        assert_eq!(env.sample(6_000.0), 0.5);
        assert_eq!(env.sample(12_000.0), 0.0);
    }

    #[test]
    fn no_outro_means_total_is_intro_plus_main() {
        let tl = TimelineBuilder::new(stock_params())
            .build(&roster_of(3))
            .unwrap();
        assert!(tl.outro_range.is_none());
        assert_eq!(tl.total, FrameIndex(12_120));
    }
}
