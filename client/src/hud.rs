//! Pure view-model for the header, modals, and leaderboard table.
//!
//! The host shell owns the actual DOM/canvas text nodes and copies these
//! strings across whenever they change; nothing here touches a display.

use proto::LeaderboardResponse;

/// Start-button caption, tracking the run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartLabel {
    Start,
    Pause,
    Restart,
}

impl StartLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StartLabel::Start => "START",
            StartLabel::Pause => "PAUSE",
            StartLabel::Restart => "RESTART",
        }
    }
}

/// End-of-run modal contents
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverModal {
    pub score_text: String,
    /// Set once the backend answers the score submission
    pub rank: Option<u32>,
}

/// Header and modal state as display-ready strings
#[derive(Debug, Clone)]
pub struct Hud {
    max_lives: u32,
    pub score_text: String,
    pub lives_text: String,
    pub timer_text: String,
    pub difficulty_text: String,
    pub combo_text: String,
    pub buff_text: String,
    pub start_label: StartLabel,
    pub modal: Option<GameOverModal>,
    pub alert: Option<String>,
}

impl Hud {
    pub fn new(max_lives: u32) -> Self {
        Self {
            max_lives,
            score_text: "0.0".to_string(),
            lives_text: hearts(max_lives, max_lives),
            timer_text: "0:00".to_string(),
            difficulty_text: "1".to_string(),
            combo_text: "1.0".to_string(),
            buff_text: "0".to_string(),
            start_label: StartLabel::Start,
            modal: None,
            alert: None,
        }
    }

    pub fn set_score(&mut self, score: f64) {
        assign_if_changed(&mut self.score_text, format!("{score:.1}"));
    }

    pub fn set_lives(&mut self, lives: u32) {
        assign_if_changed(&mut self.lives_text, hearts(lives, self.max_lives));
    }

    pub fn set_timer(&mut self, text: String) {
        assign_if_changed(&mut self.timer_text, text);
    }

    pub fn set_difficulty(&mut self, level: u32) {
        assign_if_changed(&mut self.difficulty_text, level.to_string());
    }

    pub fn set_combo(&mut self, multiplier: f64) {
        assign_if_changed(&mut self.combo_text, format!("{multiplier:.1}"));
    }

    pub fn set_buff_seconds(&mut self, secs: u64) {
        assign_if_changed(&mut self.buff_text, secs.to_string());
    }

    pub fn set_start_label(&mut self, label: StartLabel) {
        self.start_label = label;
    }

    /// Flip into the end-of-run presentation
    pub fn show_game_over(&mut self, score: f64) {
        self.start_label = StartLabel::Restart;
        self.modal = Some(GameOverModal {
            score_text: format!("{score:.1}"),
            rank: None,
        });
    }

    /// Enrich the open modal with the submitted rank
    pub fn set_game_over_rank(&mut self, score: f64, rank: u32) {
        self.modal = Some(GameOverModal {
            score_text: format!("{score:.1} (Rank: {rank})"),
            rank: Some(rank),
        });
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn set_alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }

    /// Hand the pending alert to the host, clearing it
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Back to the fresh-run presentation
    pub fn reset(&mut self) {
        *self = Hud::new(self.max_lives);
    }
}

fn assign_if_changed(slot: &mut String, value: String) {
    if *slot != value {
        *slot = value;
    }
}

fn hearts(lives: u32, max_lives: u32) -> String {
    let mut out = String::new();
    for i in 0..max_lives {
        out.push_str(if i < lives { "❤️" } else { "🤍" });
    }
    out
}

// ============================================================================
// Leaderboard
// ============================================================================

/// One rendered leaderboard line
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub nickname: String,
    pub score: f64,
    pub date: String,
}

/// Read-only table the host renders verbatim
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeaderboardView {
    pub rows: Vec<LeaderboardRow>,
}

impl LeaderboardView {
    pub fn from_response(response: &LeaderboardResponse) -> Self {
        let rows = response
            .items
            .iter()
            .enumerate()
            .map(|(index, entry)| LeaderboardRow {
                rank: index + 1,
                nickname: entry.nickname.clone(),
                score: entry.score,
                date: format_date(entry.when),
            })
            .collect();
        Self { rows }
    }
}

/// `DD.MM.YYYY` from a Unix-seconds timestamp, UTC
pub fn format_date(when_secs: i64) -> String {
    let days = when_secs.div_euclid(86_400);
    let (year, month, day) = civil_from_days(days);
    format!("{day:02}.{month:02}.{year}")
}

// Gregorian date from days since the Unix epoch (Howard Hinnant's
// civil_from_days).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::LeaderboardEntry;

    #[test]
    fn test_format_date_epoch() {
        assert_eq!(format_date(0), "01.01.1970");
    }

    #[test]
    fn test_format_date_known_values() {
        assert_eq!(format_date(1_700_000_000), "14.11.2023");
        // Leap day
        assert_eq!(format_date(951_782_400), "29.02.2000");
        // Last second of a year
        assert_eq!(format_date(1_704_067_199), "31.12.2023");
        // First second of the next
        assert_eq!(format_date(1_704_067_200), "01.01.2024");
    }

    #[test]
    fn test_hearts_padding() {
        assert_eq!(hearts(3, 3), "❤️❤️❤️");
        assert_eq!(hearts(1, 3), "❤️🤍🤍");
        assert_eq!(hearts(0, 3), "🤍🤍🤍");
    }

    #[test]
    fn test_score_text_has_one_decimal() {
        let mut hud = Hud::new(3);
        hud.set_score(12.0);
        assert_eq!(hud.score_text, "12.0");
        hud.set_score(3.35);
        assert_eq!(hud.score_text, "3.3");
    }

    #[test]
    fn test_game_over_flow_updates_label_and_modal() {
        let mut hud = Hud::new(3);
        hud.set_start_label(StartLabel::Pause);
        hud.show_game_over(41.5);

        assert_eq!(hud.start_label, StartLabel::Restart);
        let modal = hud.modal.as_ref().expect("modal should be open");
        assert_eq!(modal.score_text, "41.5");
        assert_eq!(modal.rank, None);

        hud.set_game_over_rank(41.5, 7);
        let modal = hud.modal.as_ref().unwrap();
        assert_eq!(modal.score_text, "41.5 (Rank: 7)");
        assert_eq!(modal.rank, Some(7));
    }

    #[test]
    fn test_reset_restores_fresh_presentation() {
        let mut hud = Hud::new(3);
        hud.set_score(10.0);
        hud.set_lives(1);
        hud.show_game_over(10.0);
        hud.reset();

        assert_eq!(hud.score_text, "0.0");
        assert_eq!(hud.lives_text, "❤️❤️❤️");
        assert_eq!(hud.start_label, StartLabel::Start);
        assert!(hud.modal.is_none());
    }

    #[test]
    fn test_leaderboard_rows_are_ranked_and_dated() {
        let response = LeaderboardResponse {
            items: vec![
                LeaderboardEntry {
                    nickname: "ada".into(),
                    score: 120.5,
                    when: 1_700_000_000,
                },
                LeaderboardEntry {
                    nickname: "bob".into(),
                    score: 88.0,
                    when: 0,
                },
            ],
        };
        let view = LeaderboardView::from_response(&response);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].rank, 1);
        assert_eq!(view.rows[0].date, "14.11.2023");
        assert_eq!(view.rows[1].rank, 2);
        assert_eq!(view.rows[1].date, "01.01.1970");
    }
}
