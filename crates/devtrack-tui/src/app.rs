//! App shell: wires the store, the change bus, and the three panels, and
//! executes parsed user commands.
//!
//! The stats consumer is an ordinary bus subscriber holding a shared cell;
//! it recomputes from each published payload and never re-reads storage
//! after the initial load. Everything runs on one thread: a command is
//! fully applied (mutate, persist, notify) before the next one is read.

use std::cell::RefCell;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::Local;
use devtrack_core::bus::{ChangeBus, SubscriberId};
use devtrack_core::confirm::ConfirmPrompt;
use devtrack_core::log::LogBook;
use devtrack_core::plans::PlanBoard;
use devtrack_core::stats::{self, ActivityStats};
use devtrack_core::store::{FileStore, StoreError};

use crate::log_panel::LogPanel;
use crate::plans_panel::PlansPanel;
use crate::stats_panel;

/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "DEVTRACK_DATA_DIR";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".devtrack";

#[must_use]
pub fn resolve_data_dir() -> PathBuf {
    env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// One parsed user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Log(String),
    Plan(String),
    Up(usize),
    Down(usize),
    Remove(usize),
    ToggleExpand,
    ClearLogs,
    ClearPlans,
    Show,
    Help,
    Quit,
}

/// Whether the command loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line. Rank arguments are the displayed 1-based ranks.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Show);
    }
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };

    let rank = |verb: &str, rest: &str| {
        rest.trim()
            .parse::<usize>()
            .map_err(|_| format!("usage: {verb} <rank>"))
    };

    match verb {
        "log" => Ok(Command::Log(rest.to_owned())),
        "plan" => Ok(Command::Plan(rest.to_owned())),
        "up" => Ok(Command::Up(rank(verb, rest)?)),
        "down" => Ok(Command::Down(rank(verb, rest)?)),
        "rm" => Ok(Command::Remove(rank(verb, rest)?)),
        "expand" => Ok(Command::ToggleExpand),
        "clear-logs" => Ok(Command::ClearLogs),
        "clear-plans" => Ok(Command::ClearPlans),
        "show" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

#[must_use]
pub fn help_lines() -> Vec<String> {
    [
        "log <text>      append a build log entry",
        "plan <text>     append a plan at the lowest priority",
        "up <rank>       raise the plan shown at #rank",
        "down <rank>     lower the plan shown at #rank",
        "rm <rank>       delete the plan shown at #rank",
        "expand          toggle the full log history",
        "clear-logs      delete all log entries (asks first)",
        "clear-plans     delete all plans (asks first)",
        "show            redraw the panels",
        "quit            exit",
    ]
    .iter()
    .map(|line| (*line).to_owned())
    .collect()
}

pub struct App {
    store: FileStore,
    bus: ChangeBus,
    log_panel: LogPanel,
    plans_panel: PlansPanel,
    stats: Rc<RefCell<ActivityStats>>,
    stats_subscription: Option<SubscriberId>,
}

impl App {
    /// Load both sequences from the store, derive the initial statistics
    /// from the loaded log, and register the stats subscriber on the bus.
    #[must_use]
    pub fn new(store: FileStore) -> Self {
        let mut bus = ChangeBus::new();
        let book = LogBook::load(&store);
        let board = PlanBoard::load(&store);

        let stats = Rc::new(RefCell::new(stats::recompute(
            book.entries(),
            Local::now().date_naive(),
        )));
        let cell = Rc::clone(&stats);
        let stats_subscription = bus.subscribe(Box::new(move |logs| {
            *cell.borrow_mut() = stats::recompute(logs, Local::now().date_naive());
        }));

        Self {
            store,
            bus,
            log_panel: LogPanel::new(book),
            plans_panel: PlansPanel::new(board),
            stats,
            stats_subscription: Some(stats_subscription),
        }
    }

    /// Apply one command. Store failures propagate; the caller decides how
    /// to report them and the loop keeps running.
    pub fn execute(
        &mut self,
        command: Command,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Flow, StoreError> {
        match command {
            Command::Log(text) => {
                self.log_panel
                    .submit(&text, Local::now(), &mut self.store, &mut self.bus)?;
            }
            Command::Plan(text) => {
                self.plans_panel
                    .submit(&text, Local::now(), &mut self.store)?;
            }
            Command::Up(rank) => {
                self.plans_panel.move_up(rank, &mut self.store)?;
            }
            Command::Down(rank) => {
                self.plans_panel.move_down(rank, &mut self.store)?;
            }
            Command::Remove(rank) => {
                self.plans_panel.remove(rank, &mut self.store)?;
            }
            Command::ToggleExpand => {
                self.log_panel.toggle_expanded();
            }
            Command::ClearLogs => {
                self.log_panel
                    .clear(prompt, &mut self.store, &mut self.bus)?;
            }
            Command::ClearPlans => {
                self.plans_panel.clear(prompt, &mut self.store)?;
            }
            Command::Show | Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// All three panels, top to bottom, separated by blank lines.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines = self.log_panel.render();
        lines.push(String::new());
        lines.extend(self.plans_panel.render());
        lines.push(String::new());
        lines.extend(stats_panel::render(&self.stats.borrow()));
        lines
    }

    #[must_use]
    pub fn stats(&self) -> ActivityStats {
        self.stats.borrow().clone()
    }

    /// Drop the stats subscription; the panel's lifetime ends with the app.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.stats_subscription.take() {
            self.bus.unsubscribe(id);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::{help_lines, parse_command, App, Command, Flow};
    use devtrack_core::confirm::{AutoConfirm, ConfirmPrompt, PromptError};
    use devtrack_core::store::FileStore;

    struct DeclinePrompt;

    impl ConfirmPrompt for DeclinePrompt {
        fn confirm(&mut self, _message: &str) -> Result<bool, PromptError> {
            Ok(false)
        }
    }

    fn fresh_app(dir: &tempfile::TempDir) -> App {
        App::new(FileStore::new(dir.path().join(".devtrack")))
    }

    #[test]
    fn parses_commands_and_ranks() {
        assert_eq!(
            parse_command("log shipped the parser"),
            Ok(Command::Log("shipped the parser".to_owned()))
        );
        assert_eq!(parse_command("up 3"), Ok(Command::Up(3)));
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert!(parse_command("rm three").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn parsing_preserves_entry_text_verbatim() {
        assert_eq!(
            parse_command("log   spaced   out  "),
            Ok(Command::Log("  spaced   out".to_owned()))
        );
    }

    #[test]
    fn logging_updates_stats_through_the_bus() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = fresh_app(&dir);
        assert_eq!(app.stats().total_logs, 0);
        assert!(app.stats().weekly.is_empty());

        let flow = app
            .execute(Command::Log("first note".to_owned()), &mut AutoConfirm)
            .expect("execute");

        assert_eq!(flow, Flow::Continue);
        assert_eq!(app.stats().total_logs, 1);
        assert_eq!(app.stats().current_streak, 1);
        assert_eq!(app.stats().weekly.len(), 7);
    }

    #[test]
    fn state_survives_an_app_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let mut app = fresh_app(&dir);
            app.execute(Command::Log("persisted".to_owned()), &mut AutoConfirm)
                .expect("execute");
            app.execute(Command::Plan("tomorrow".to_owned()), &mut AutoConfirm)
                .expect("execute");
            app.shutdown();
        }

        let app = fresh_app(&dir);
        assert_eq!(app.stats().total_logs, 1);
        let rendered = app.render().join("\n");
        assert!(rendered.contains("persisted"));
        assert!(rendered.contains("tomorrow"));
    }

    #[test]
    fn declined_clear_keeps_everything() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = fresh_app(&dir);
        app.execute(Command::Log("still here".to_owned()), &mut AutoConfirm)
            .expect("execute");

        app.execute(Command::ClearLogs, &mut DeclinePrompt)
            .expect("execute");

        assert_eq!(app.stats().total_logs, 1);
        assert!(app.render().join("\n").contains("still here"));
    }

    #[test]
    fn confirmed_clear_resets_stats_to_the_no_data_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = fresh_app(&dir);
        app.execute(Command::Log("doomed".to_owned()), &mut AutoConfirm)
            .expect("execute");

        app.execute(Command::ClearLogs, &mut AutoConfirm)
            .expect("execute");

        assert_eq!(app.stats().total_logs, 0);
        assert!(app.stats().weekly.is_empty());
    }

    #[test]
    fn after_shutdown_log_mutations_no_longer_touch_stats() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = fresh_app(&dir);
        app.shutdown();

        app.execute(Command::Log("unobserved".to_owned()), &mut AutoConfirm)
            .expect("execute");

        assert_eq!(app.stats().total_logs, 0);
    }

    #[test]
    fn help_covers_every_verb() {
        let help = help_lines().join("\n");
        for verb in [
            "log", "plan", "up", "down", "rm", "expand", "clear-logs", "clear-plans", "show",
            "quit",
        ] {
            assert!(help.contains(verb), "missing help for {verb}");
        }
    }
}
