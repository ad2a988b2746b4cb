//! Score and status display
//!
//! The simulation raises [`GameEvent`]s; this module turns them into what the
//! page shows: score, attempt count, a colored status line, the fact box, and
//! the retry button. The page implements [`StatusSink`].

use crate::renderer::Color;
use crate::sim::{GameEvent, Session};

pub const MSG_AIM: &str = "Click anywhere on Earth to choose launch point, then drag to aim!";
pub const MSG_LAUNCHED: &str = "🚀 Rocket launched!";
pub const MSG_CRASHED_PLANET: &str = "💥 Rocket crashed into Earth!";
pub const MSG_CRASHED_OBSTACLE: &str = "💥 CRASH! Asteroid collision!";
pub const MSG_WON: &str = "🎉 SUCCESS! You hit the moon!";
pub const MSG_MISSED: &str = "Missed! Try again!";

pub const COLOR_INFO: Color = Color::rgb(255, 255, 255);
pub const COLOR_LAUNCH: Color = Color::rgb(255, 255, 0);
pub const COLOR_SUCCESS: Color = Color::rgb(0, 255, 0);
pub const COLOR_FAILURE: Color = Color::rgb(255, 107, 107);

/// Where score and status text end up
pub trait StatusSink {
    fn set_score(&mut self, score: u64);
    fn set_attempts(&mut self, attempts: u32);
    fn show_message(&mut self, text: &str, color: Color);
    /// `None` hides the fact box
    fn show_fact(&mut self, fact: Option<&str>);
    fn set_retry_visible(&mut self, visible: bool);
}

/// Push the initial state to a fresh page
pub fn init(session: &Session, sink: &mut dyn StatusSink) {
    sink.set_score(session.score);
    sink.set_attempts(session.attempts);
    sink.show_message(MSG_AIM, COLOR_INFO);
    sink.show_fact(None);
    sink.set_retry_visible(false);
}

/// Reflect one event on the page
pub fn apply_event(event: &GameEvent, session: &Session, sink: &mut dyn StatusSink) {
    match event {
        GameEvent::Launched { .. } => {
            sink.set_attempts(session.attempts);
            sink.show_message(MSG_LAUNCHED, COLOR_LAUNCH);
        }
        GameEvent::Won { score, fact } => {
            sink.set_score(*score);
            sink.set_attempts(session.attempts);
            sink.show_message(MSG_WON, COLOR_SUCCESS);
            sink.show_fact(Some(*fact));
        }
        GameEvent::CrashedPlanet { .. } => sink.show_message(MSG_CRASHED_PLANET, COLOR_FAILURE),
        GameEvent::CrashedObstacle { .. } => {
            sink.show_message(MSG_CRASHED_OBSTACLE, COLOR_FAILURE)
        }
        // The miss is only announced once its delay has passed
        GameEvent::Missed { .. } => {}
        GameEvent::MissAnnounced => {
            sink.show_message(MSG_MISSED, COLOR_FAILURE);
            sink.set_retry_visible(true);
        }
        GameEvent::FactExpired => sink.show_fact(None),
        GameEvent::Reset => {
            sink.set_retry_visible(false);
            sink.show_message(MSG_AIM, COLOR_INFO);
        }
        GameEvent::DifficultyChanged(_) | GameEvent::UpgradeToggled { .. } => {}
    }
}

/// In-memory status display, for tests and the native host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStatus {
    pub score: u64,
    pub attempts: u32,
    pub message: String,
    pub color: Option<Color>,
    pub fact: Option<String>,
    pub retry_visible: bool,
}

impl StatusSink for TextStatus {
    fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    fn set_attempts(&mut self, attempts: u32) {
        self.attempts = attempts;
    }

    fn show_message(&mut self, text: &str, color: Color) {
        self.message = text.to_string();
        self.color = Some(color);
    }

    fn show_fact(&mut self, fact: Option<&str>) {
        self.fact = fact.map(str::to_string);
    }

    fn set_retry_visible(&mut self, visible: bool) {
        self.retry_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;
    use glam::Vec2;

    fn session(score: u64, attempts: u32) -> Session {
        Session {
            score,
            attempts,
            ..Session::default()
        }
    }

    #[test]
    fn test_init() {
        let mut status = TextStatus::default();
        init(&session(0, 0), &mut status);
        assert_eq!(status.message, MSG_AIM);
        assert_eq!(status.color, Some(COLOR_INFO));
        assert!(!status.retry_visible);
    }

    #[test]
    fn test_win_shows_fact_and_score() {
        let mut status = TextStatus::default();
        let fact = "🌙 test fact";
        apply_event(&GameEvent::Won { score: 200, fact }, &session(200, 3), &mut status);
        assert_eq!(status.score, 200);
        assert_eq!(status.attempts, 3);
        assert_eq!(status.message, MSG_WON);
        assert_eq!(status.fact.as_deref(), Some(fact));

        apply_event(&GameEvent::FactExpired, &session(200, 3), &mut status);
        assert_eq!(status.fact, None);
    }

    #[test]
    fn test_miss_then_retry() {
        let mut status = TextStatus::default();
        let s = session(0, 1);
        apply_event(&GameEvent::Missed { at: Vec2::new(900.0, 0.0) }, &s, &mut status);
        assert!(!status.retry_visible);
        assert!(status.message.is_empty());

        apply_event(&GameEvent::MissAnnounced, &s, &mut status);
        assert!(status.retry_visible);
        assert_eq!(status.message, MSG_MISSED);
        assert_eq!(status.color, Some(COLOR_FAILURE));

        apply_event(&GameEvent::Reset, &s, &mut status);
        assert!(!status.retry_visible);
        assert_eq!(status.message, MSG_AIM);
    }

    #[test]
    fn test_crash_messages() {
        let mut status = TextStatus::default();
        let s = session(0, 1);
        apply_event(&GameEvent::CrashedPlanet { at: Vec2::ZERO }, &s, &mut status);
        assert_eq!(status.message, MSG_CRASHED_PLANET);
        apply_event(&GameEvent::CrashedObstacle { at: Vec2::ZERO }, &s, &mut status);
        assert_eq!(status.message, MSG_CRASHED_OBSTACLE);
        // Settings changes leave the status line alone
        apply_event(&GameEvent::DifficultyChanged(Difficulty::Hard), &s, &mut status);
        assert_eq!(status.message, MSG_CRASHED_OBSTACLE);
    }

    #[test]
    fn test_colors_are_css() {
        assert_eq!(COLOR_FAILURE.to_css(), "rgba(255, 107, 107, 1)");
        assert_eq!(COLOR_LAUNCH.to_css(), "rgba(255, 255, 0, 1)");
    }
}
