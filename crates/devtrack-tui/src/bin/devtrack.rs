use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use devtrack_core::store::FileStore;
use devtrack_tui::app::{help_lines, parse_command, App, Command, Flow};
use devtrack_tui::prompt::StdinPrompt;

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn show_prompt() {
    print!("devtrack> ");
    let _ = io::stdout().flush();
}

fn main() -> ExitCode {
    let store = FileStore::new(devtrack_tui::app::resolve_data_dir());
    let mut app = App::new(store);
    let mut prompt = StdinPrompt;

    print_lines(&app.render());
    show_prompt();

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("read input: {err}");
                return ExitCode::FAILURE;
            }
        };

        match parse_command(&line) {
            Ok(Command::Help) => print_lines(&help_lines()),
            Ok(command) => match app.execute(command, &mut prompt) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => print_lines(&app.render()),
                Err(err) => eprintln!("{err}"),
            },
            Err(message) => eprintln!("{message}"),
        }
        show_prompt();
    }

    app.shutdown();
    ExitCode::SUCCESS
}
