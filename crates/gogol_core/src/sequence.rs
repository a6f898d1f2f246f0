//! Time-driven playback over a contiguous range of a sprite's clips.
//!
//! While playing, the current frame is recomputed on every draw from the
//! wall-clock time elapsed since `play`, so playback never accumulates
//! per-frame error and tolerates uneven frame rates. Pausing freezes the
//! current frame until playback resumes. A sequence that has never played
//! sits on clip 0.
//!
//! Speed is in frames per second and may be signed. The frame offset is
//! `floor(speed * elapsed)` wrapped into the range with Euclidean remainder:
//! zero speed holds the first frame, negative speed plays the range backwards
//! starting from its last frame.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;

use crate::error::{GogolError, Result};
use crate::host::RenderHost;
use crate::sprite::Sprite;

pub const DEFAULT_SPEED: f64 = 1.0;

/// Frame index inside `frames` after `elapsed_secs` at `speed`. Returns
/// `None` for an empty range.
pub fn frame_at(
    elapsed_secs: f64,
    speed: f64,
    frames: RangeInclusive<usize>,
) -> Option<usize> {
    if frames.is_empty() {
        return None;
    }
    let (from, to) = frames.into_inner();
    let range_len = (to - from) as i64 + 1;
    let advanced = (speed * elapsed_secs).floor() as i64;
    Some(from + advanced.rem_euclid(range_len) as usize)
}

/// `frame_at` for playback that started at `start` and is sampled at `now`.
/// A `now` earlier than `start` counts as no time elapsed.
pub fn frame_index(
    start: Instant,
    now: Instant,
    speed: f64,
    frames: RangeInclusive<usize>,
) -> Option<usize> {
    let elapsed = now.saturating_duration_since(start).as_secs_f64();
    frame_at(elapsed, speed, frames)
}

fn resolve_index(index: isize, len: usize) -> isize {
    if index < 0 {
        len as isize + index
    } else {
        index
    }
}

#[derive(Debug, Clone)]
pub struct Sequence {
    sprite: Arc<Sprite>,
    from: usize,
    to: usize,
    speed: f64,
    current: usize,
    playing: bool,
    start_time: Option<Instant>,
    stop_time: Option<Instant>,
}

impl Sequence {
    /// Negative `from`/`to` count back from the end of the sprite's clips, so
    /// `(0, -1)` covers every clip. The resolved range must satisfy
    /// `0 <= from <= to < len`.
    pub fn new(sprite: Arc<Sprite>, from: isize, to: isize) -> Result<Self> {
        let len = sprite.len();
        let from = resolve_index(from, len);
        let to = resolve_index(to, len);
        for index in [from, to] {
            if index < 0 || index as usize >= len {
                return Err(GogolError::IndexOutOfRange { index, len });
            }
        }
        let (from, to) = (from as usize, to as usize);
        if from > to {
            return Err(GogolError::InvalidRange { from, to });
        }

        Ok(Self {
            sprite,
            from,
            to,
            speed: DEFAULT_SPEED,
            current: 0,
            playing: false,
            start_time: None,
            stop_time: None,
        })
    }

    /// Sets the speed used by `toggle` without starting playback.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn sprite(&self) -> &Arc<Sprite> {
        &self.sprite
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    /// Number of frames in the range.
    pub fn frame_count(&self) -> usize {
        self.to - self.from + 1
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    pub fn stop_time(&self) -> Option<Instant> {
        self.stop_time
    }

    pub fn play(&mut self, speed: f64) {
        self.play_at(speed, Instant::now());
    }

    pub fn play_at(&mut self, speed: f64, now: Instant) {
        self.start_time = Some(now);
        self.speed = speed;
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// No-op when already paused.
    pub fn pause_at(&mut self, now: Instant) {
        if self.playing {
            self.stop_time = Some(now);
            self.playing = false;
        }
    }

    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    pub fn toggle_at(&mut self, now: Instant) {
        if self.playing {
            self.pause_at(now);
        } else {
            self.play_at(self.speed, now);
        }
    }

    /// Recompute the current frame for `now` if playing; return it either way.
    pub fn update(&mut self, now: Instant) -> usize {
        if self.playing {
            let frames = self.from..=self.to;
            if let Some(frame) = self
                .start_time
                .and_then(|start| frame_index(start, now, self.speed, frames))
            {
                self.current = frame;
            }
        }
        self.current
    }

    pub fn draw_frame_at(&mut self, host: &mut dyn RenderHost, pos: Vec2) -> Result<()> {
        self.draw_frame_at_time(host, pos, Instant::now())
    }

    pub fn draw_frame_at_time(
        &mut self,
        host: &mut dyn RenderHost,
        pos: Vec2,
        now: Instant,
    ) -> Result<()> {
        let index = self.update(now);
        self.sprite.draw_clip_at(index, host, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Rect;
    use crate::test_support::{blank_image, RecordingHost};
    use std::time::Duration;

    /// 4x2 grid of 16px clips.
    fn sprite() -> Arc<Sprite> {
        Arc::new(Sprite::new(blank_image("seq.png", 64, 32), 16, 16).unwrap())
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn negative_to_resolves_to_last_clip() {
        let sprite = sprite();
        let seq = Sequence::new(Arc::clone(&sprite), 0, -1).unwrap();
        assert_eq!(seq.from(), 0);
        assert_eq!(seq.to(), sprite.len() - 1);
        assert_eq!(seq.frame_count(), 8);
    }

    #[test]
    fn negative_from_resolves_from_the_end() {
        let seq = Sequence::new(sprite(), -3, -1).unwrap();
        assert_eq!((seq.from(), seq.to()), (5, 7));
    }

    #[test]
    fn from_past_to_is_invalid_range() {
        let err = Sequence::new(sprite(), 5, 2).unwrap_err();
        assert!(matches!(err, GogolError::InvalidRange { from: 5, to: 2 }));

        let err = Sequence::new(sprite(), -1, 0).unwrap_err();
        assert!(matches!(err, GogolError::InvalidRange { from: 7, to: 0 }));
    }

    #[test]
    fn indices_outside_clips_are_out_of_range() {
        let err = Sequence::new(sprite(), 0, 8).unwrap_err();
        assert!(matches!(err, GogolError::IndexOutOfRange { index: 8, len: 8 }));

        let err = Sequence::new(sprite(), -9, 3).unwrap_err();
        assert!(matches!(err, GogolError::IndexOutOfRange { index: -1, len: 8 }));
    }

    #[test]
    fn empty_sprite_cannot_build_a_sequence() {
        let empty = Arc::new(Sprite::new(blank_image("empty.png", 8, 8), 16, 16).unwrap());
        let err = Sequence::new(empty, 0, -1).unwrap_err();
        assert!(matches!(err, GogolError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn new_sequence_is_stopped_on_clip_zero() {
        let seq = Sequence::new(sprite(), 2, 5).unwrap();
        assert!(!seq.is_playing());
        assert_eq!(seq.current(), 0);
        assert_eq!(seq.speed(), DEFAULT_SPEED);
        assert!(seq.start_time().is_none());
    }

    #[test]
    fn never_played_sequence_draws_clip_zero() {
        let mut seq = Sequence::new(sprite(), 2, 5).unwrap();
        let mut host = RecordingHost::default();
        seq.draw_frame_at(&mut host, Vec2::ZERO).unwrap();
        assert_eq!(seq.current(), 0);
        assert_eq!(host.draws[0].src, Rect::new(0, 0, 16, 16));
    }

    #[test]
    fn play_moves_to_range_start() {
        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 2, 5).unwrap();
        seq.play_at(1.0, t0);
        assert_eq!(seq.update(t0), 2);
    }

    #[test]
    fn inverted_range_has_no_frame() {
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 3..=1;
        assert_eq!(frame_at(1.0, 1.0, inverted), None);
        assert_eq!(frame_at(1.0, 1.0, 3..=3), Some(3));
    }

    #[test]
    fn frame_after_one_second_at_two_fps() {
        assert_eq!(frame_at(1.0, 2.0, 0..=3), Some(2));

        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 0, 3).unwrap();
        seq.play_at(2.0, t0);
        assert_eq!(seq.update(t0 + secs(1.0)), 2);
    }

    #[test]
    fn frame_wraps_around_range() {
        assert_eq!(frame_at(3.0, 2.0, 0..=3), Some(2));

        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 0, 3).unwrap();
        seq.play_at(2.0, t0);
        assert_eq!(seq.update(t0 + secs(3.0)), 2);
        assert_eq!(seq.update(t0 + secs(0.4)), 0);
        assert_eq!(seq.update(t0 + secs(1.6)), 3);
    }

    #[test]
    fn offset_range_stays_inside_bounds() {
        for step in 0..40 {
            let frame = frame_at(step as f64 * 0.25, 7.0, 4..=6).unwrap();
            assert!((4..=6).contains(&frame), "frame {frame} escaped range");
        }
        assert_eq!(frame_at(0.0, 7.0, 4..=6), Some(4));
    }

    #[test]
    fn zero_speed_holds_first_frame() {
        assert_eq!(frame_at(10.0, 0.0, 2..=5), Some(2));
    }

    #[test]
    fn negative_speed_plays_backwards() {
        assert_eq!(frame_at(0.0, -2.0, 0..=3), Some(0));
        assert_eq!(frame_at(0.25, -2.0, 0..=3), Some(3));
        assert_eq!(frame_at(0.75, -2.0, 0..=3), Some(2));
        assert_eq!(frame_at(1.0, -2.0, 0..=3), Some(2));
        assert_eq!(frame_at(1.75, -2.0, 0..=3), Some(0));
    }

    #[test]
    fn sampling_before_start_counts_as_no_time() {
        let t0 = Instant::now() + secs(5.0);
        assert_eq!(frame_index(t0, t0 - secs(1.0), 3.0, 1..=4), Some(1));
    }

    #[test]
    fn pause_freezes_current_frame() {
        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 0, 3).unwrap();
        seq.play_at(2.0, t0);
        assert_eq!(seq.update(t0 + secs(1.0)), 2);

        seq.pause_at(t0 + secs(1.2));
        assert!(!seq.is_playing());
        assert_eq!(seq.stop_time(), Some(t0 + secs(1.2)));

        let mut host = RecordingHost::default();
        for later in [2.0, 5.0, 100.0] {
            seq.draw_frame_at_time(&mut host, Vec2::ZERO, t0 + secs(later))
                .unwrap();
            assert_eq!(seq.current(), 2);
        }
        assert!(host
            .draws
            .iter()
            .all(|d| d.src == Rect::new(32, 0, 16, 16)));
    }

    #[test]
    fn toggle_round_trip_keeps_speed() {
        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 0, -1).unwrap();
        seq.play_at(7.0, t0);
        seq.toggle_at(t0 + secs(1.0));
        assert!(!seq.is_playing());
        seq.toggle_at(t0 + secs(2.0));
        assert!(seq.is_playing());
        assert_eq!(seq.speed(), 7.0);
        assert_eq!(seq.start_time(), Some(t0 + secs(2.0)));
    }

    #[test]
    fn toggle_from_fresh_uses_configured_speed() {
        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 0, 3).unwrap().with_speed(4.0);
        seq.toggle_at(t0);
        assert!(seq.is_playing());
        assert_eq!(seq.update(t0 + secs(0.5)), 2);
    }

    #[test]
    fn pause_when_stopped_is_noop() {
        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 0, 3).unwrap();
        seq.pause_at(t0);
        assert!(seq.stop_time().is_none());
    }

    #[test]
    fn replay_restarts_from_first_frame() {
        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 0, 3).unwrap();
        seq.play_at(2.0, t0);
        seq.update(t0 + secs(1.0));
        seq.play_at(2.0, t0 + secs(10.0));
        assert_eq!(seq.update(t0 + secs(10.0)), 0);
    }

    #[test]
    fn draw_frame_uses_current_clip_position() {
        let t0 = Instant::now();
        let mut seq = Sequence::new(sprite(), 2, 5).unwrap();
        seq.play_at(1.0, t0);

        let mut host = RecordingHost::default();
        seq.draw_frame_at_time(&mut host, Vec2::new(8.0, 9.0), t0 + secs(2.5))
            .unwrap();

        // frame 4 is the first clip of the second row
        assert_eq!(seq.current(), 4);
        assert_eq!(host.draws[0].src, Rect::new(0, 16, 16, 16));
        assert_eq!(host.draws[0].dst, Vec2::new(8.0, 9.0));
    }

    #[test]
    fn sprite_sequence_shortcut() {
        let sprite = sprite();
        let seq = sprite.sequence(1, -2).unwrap();
        assert_eq!((seq.from(), seq.to()), (1, 6));
    }
}
