use crate::{BatchError, Odds, RaceSummary, SolitaireSummary};
use serde::Serialize;
use std::fs;
use std::path::Path;

impl SolitaireSummary {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![format!(
            "Winners: {} Total: {} Win Rate: {}%",
            self.wins,
            self.trials,
            significant(self.win_rate * 100.0, 2)
        )];
        match self.odds {
            Odds::OneIn(n) => lines.push(format!("1 in {n} chance of winning")),
            Odds::Undefined => {
                lines.push("chance of winning undefined: no wins observed".to_string())
            }
        }
        lines.push(String::new());
        lines.push("cards left:".to_string());
        for (cards, count) in &self.cards_left_histogram {
            lines.push(format!("  {cards:>2}: {count}"));
        }
        lines.join("\n")
    }
}

impl RaceSummary {
    pub fn to_text_report(&self) -> String {
        let best = &self.min_trial;
        let lines = vec![
            format!("Trials: {}", self.trials),
            format!("Minimum rolls: {}", self.min_rolls),
            format!(
                "  chutes={} ladders={} positions={:?}",
                best.chutes, best.ladders, best.positions
            ),
            format!("  roll_history={:?}", best.roll_history),
            format!("Maximum rolls: {}", self.max_rolls),
            format!("Average rolls: {}", self.mean_rolls),
            format!(
                "Average chutes: {:.3} Average ladders: {:.3}",
                self.mean_chutes, self.mean_ladders
            ),
        ];
        lines.join("\n")
    }
}

/// Fixed-point rendering with `digits` significant digits, keeping at
/// least one digit after the point.
fn significant(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value:.1}");
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(1) as usize;
    format!("{value:.decimals$}")
}

pub fn write_json<T: Serialize>(path: &Path, summary: &T) -> Result<(), BatchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(summary)?;
    fs::write(path, body)?;
    Ok(())
}
