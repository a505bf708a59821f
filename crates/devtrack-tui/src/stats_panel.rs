//! Progress stats panel: headline counters plus a 7-day bar chart.
//!
//! Pure rendering over [`ActivityStats`]; the app shell keeps the stats
//! fresh through its change-bus subscription.

use devtrack_core::stats::ActivityStats;

/// Width, in glyphs, of the longest bar.
const BAR_WIDTH: u32 = 20;

#[must_use]
pub fn render(stats: &ActivityStats) -> Vec<String> {
    let mut lines = vec![
        "Progress Stats - your development activity".to_owned(),
        format!(
            "  total {} | this week {} | day streak {}",
            stats.total_logs, stats.logs_this_week, stats.current_streak
        ),
    ];

    if stats.weekly.is_empty() {
        lines.push("  start logging to see your progress".to_owned());
        return lines;
    }

    lines.push("  last 7 days".to_owned());
    let max = stats
        .weekly
        .iter()
        .map(|bucket| bucket.count)
        .max()
        .unwrap_or(0)
        .max(1);
    for bucket in &stats.weekly {
        lines.push(format!(
            "  {} {:>2} {}",
            bucket.day_label,
            bucket.count,
            bar(bucket.count, max)
        ));
    }
    lines
}

/// Scale `count` against the busiest day; any non-zero day gets at least
/// one glyph.
fn bar(count: u32, max: u32) -> String {
    if count == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH / max).max(1);
    "#".repeat(width as usize)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::{bar, render, BAR_WIDTH};
    use devtrack_core::model::LogEntry;
    use devtrack_core::stats::{recompute, ActivityStats};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 9).expect("valid date")
    }

    #[test]
    fn untouched_stats_render_the_placeholder() {
        let lines = render(&ActivityStats::default());
        assert!(lines[1].contains("total 0"));
        assert!(lines[2].contains("start logging"));
    }

    #[test]
    fn active_stats_render_seven_labeled_rows() {
        let logs = vec![LogEntry {
            text: "shipped the chart".to_owned(),
            date: "2026-02-09 18:00:00".to_owned(),
        }];
        let lines = render(&recompute(&logs, today()));

        assert_eq!(lines.len(), 3 + 7);
        assert!(lines[1].contains("this week 1"));
        assert!(lines[1].contains("day streak 1"));
        let today_row = lines.last().expect("rows");
        assert!(today_row.contains("Mon"));
        assert!(today_row.contains('#'));
    }

    #[test]
    fn bars_scale_to_the_busiest_day() {
        assert_eq!(bar(0, 4), "");
        assert_eq!(bar(4, 4).len() as u32, BAR_WIDTH);
        assert_eq!(bar(2, 4).len() as u32, BAR_WIDTH / 2);
        assert_eq!(bar(1, 100), "#");
    }
}
