/*
 * @file shell.rs
 * @brief Terminal front end
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Terminal front end: typed commands stand in for clicks, key presses and
//! recognized speech.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::app::{Outcome, Portfolio, UiEvent};
use crate::assistant::SUGGESTIONS;
use crate::commands::describe_rules;
use crate::navigator::{Focus, Key, LinkStyle, Trigger};
use crate::recognition::RecognitionEvent;

const HELP: &str = "\
commands:
  next | prev              move between sections
  key <arrow> [--in-input] press an arrow key (ignored while typing)
  go <index>               click the nav link at <index>
  contact                  click \"Let's Talk\"
  scroll <index> <ratio>   report how much of a section is visible
  theme                    toggle dark/light
  panel | close            open/close the assistant panel
  listen                   start listening; the next line is your speech,
                           and `listen` again stops the session
  ask <question>           type a question
  suggest <n>              click suggestion <n>
  topics | suggestions     show what the assistant knows
  log | sections | help | quit";

/// One parsed command line.
#[derive(Clone, Debug, PartialEq)]
pub enum ShellCommand {
    Event(UiEvent),
    GoTo(usize),
    ShowLog,
    ShowSections,
    ShowTopics,
    ShowSuggestions,
    Help,
    Quit,
    Empty,
}

/// Parses a command line.
///
/// # Errors
/// Returns an error describing the problem for unknown commands or bad
/// arguments.
pub fn parse_line(line: &str) -> Result<ShellCommand> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();
    let command = match command.to_ascii_lowercase().as_str() {
        "next" => ShellCommand::Event(UiEvent::Navigate(Trigger::NextClicked)),
        "prev" | "previous" => ShellCommand::Event(UiEvent::Navigate(Trigger::PreviousClicked)),
        "key" => {
            let Some(name) = rest.first() else {
                bail!("usage: key <arrow> [--in-input]");
            };
            let focus = if rest.contains(&"--in-input") {
                Focus::TextInput
            } else {
                Focus::Page
            };
            ShellCommand::Event(UiEvent::Navigate(Trigger::KeyPressed {
                key: Key::from_name(name),
                focus,
            }))
        }
        "go" => ShellCommand::GoTo(parse_arg(&rest, 0, "go <index>")?),
        "contact" => ShellCommand::Event(UiEvent::Navigate(Trigger::CallToAction)),
        "scroll" => ShellCommand::Event(UiEvent::Scrolled {
            section: parse_arg(&rest, 0, "scroll <index> <ratio>")?,
            ratio: parse_arg(&rest, 1, "scroll <index> <ratio>")?,
        }),
        "theme" => ShellCommand::Event(UiEvent::ToggleTheme),
        "panel" => ShellCommand::Event(UiEvent::TogglePanel),
        "close" => ShellCommand::Event(UiEvent::ClosePanel),
        "listen" => ShellCommand::Event(UiEvent::ListenClicked),
        "ask" => {
            if rest.is_empty() {
                bail!("usage: ask <question>");
            }
            ShellCommand::Event(UiEvent::Ask(rest.join(" ")))
        }
        "suggest" => ShellCommand::Event(UiEvent::Suggestion(parse_arg(&rest, 0, "suggest <n>")?)),
        "topics" => ShellCommand::ShowTopics,
        "suggestions" => ShellCommand::ShowSuggestions,
        "log" => ShellCommand::ShowLog,
        "sections" => ShellCommand::ShowSections,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => bail!("unknown command `{}`; try `help`", other),
    };
    Ok(command)
}

/// Maps a line typed while a listening session is open.
///
/// # Returns
/// * `UiEvent` - A click on the listen control for a bare `listen`, otherwise
///   the recognized transcript.
pub fn parse_heard_line(line: &str) -> UiEvent {
    if line.trim().eq_ignore_ascii_case("listen") {
        UiEvent::ListenClicked
    } else {
        UiEvent::Recognition(RecognitionEvent::Result(line.to_string()))
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[&str], index: usize, usage: &str) -> Result<T> {
    let raw = args
        .get(index)
        .with_context(|| format!("usage: {}", usage))?;
    match raw.parse() {
        Ok(value) => Ok(value),
        Err(_) => bail!("invalid argument `{}`; usage: {}", raw, usage),
    }
}

/// Reads commands from stdin until `quit` or end of input.
///
/// # Errors
/// Returns an error if stdin cannot be read.
pub async fn run_shell(mut page: Portfolio) -> Result<()> {
    println!("{}", HELP);
    print_page(&page);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if page.listen().is_listening() {
            hear(&mut page, &line).await;
            continue;
        }
        match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(&mut page, command).await,
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}

/// Delivers a typed line to the open listening session, then ends it.
async fn hear(page: &mut Portfolio, line: &str) {
    let event = parse_heard_line(line);
    if event == UiEvent::ListenClicked {
        let outcome = page.dispatch(event).await;
        report(page, outcome);
        return;
    }
    if let Outcome::Reply(reply) = page.dispatch(event).await {
        println!("you: {}", line.trim());
        println!("assistant: {}", reply);
    }
    page.dispatch(UiEvent::Recognition(RecognitionEvent::End)).await;
    println!("[{}]", page.listen().status());
}

async fn execute(page: &mut Portfolio, command: ShellCommand) {
    match command {
        ShellCommand::Event(event) => {
            let outcome = page.dispatch(event).await;
            report(page, outcome);
        }
        ShellCommand::GoTo(index) => {
            let count = page.navigator().section_count();
            if index >= count {
                warn!(index, count, "nav link does not exist");
                println!("no section {}; pick 0..{}", index, count - 1);
                return;
            }
            let outcome = page
                .dispatch(UiEvent::Navigate(Trigger::NavLinkClicked(index)))
                .await;
            report(page, outcome);
        }
        ShellCommand::ShowLog => {
            for entry in page.assistant().log().iter() {
                println!("{}: {}", entry.role.label(), entry.text);
            }
        }
        ShellCommand::ShowSections => print_page(page),
        ShellCommand::ShowTopics => print!("{}", describe_rules(page.assistant().rules())),
        ShellCommand::ShowSuggestions => {
            for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
                println!("{}: {}", i, suggestion);
            }
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit | ShellCommand::Empty => {}
    }
}

fn report(page: &Portfolio, outcome: Outcome) {
    match outcome {
        Outcome::Navigated(_) => print_page(page),
        Outcome::Ignored => println!("(ignored)"),
        Outcome::ThemeChanged(theme) => println!("theme: {} [{}]", theme.as_str(), theme.icon()),
        Outcome::Listening(_) => println!("[{}]", page.listen().status()),
        Outcome::Reply(reply) => println!("assistant: {}", reply),
        Outcome::Panel(open) => println!("assistant panel {}", if open { "open" } else { "closed" }),
        Outcome::Revealed(count) => println!("{} element(s) revealed", count),
    }
}

fn print_page(page: &Portfolio) {
    let navigator = page.navigator();
    let bar: Vec<String> = navigator
        .links()
        .iter()
        .enumerate()
        .map(|(i, link)| match link.style() {
            LinkStyle::Highlighted => format!("[{}:{}]", i, link.label()),
            LinkStyle::Normal => format!(" {}:{} ", i, link.label()),
        })
        .collect();
    println!("{}", bar.join(" "));
    let section = navigator.active_section();
    let shown = section.elements().iter().filter(|e| e.is_shown()).count();
    println!(
        "showing {} ({}/{} elements visible) | theme {}",
        section.title(),
        shown,
        section.elements().len(),
        page.theme().as_str()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(
            parse_line("next").expect("parse"),
            ShellCommand::Event(UiEvent::Navigate(Trigger::NextClicked))
        );
        assert_eq!(parse_line("  go 3 ").expect("parse"), ShellCommand::GoTo(3));
        assert_eq!(
            parse_line("key left --in-input").expect("parse"),
            ShellCommand::Event(UiEvent::Navigate(Trigger::KeyPressed {
                key: Key::ArrowLeft,
                focus: Focus::TextInput,
            }))
        );
        assert_eq!(
            parse_line("contact").expect("parse"),
            ShellCommand::Event(UiEvent::Navigate(Trigger::CallToAction))
        );
    }

    #[test]
    fn parses_assistant_commands() {
        assert_eq!(
            parse_line("ask what are your   skills").expect("parse"),
            ShellCommand::Event(UiEvent::Ask("what are your skills".into()))
        );
        assert_eq!(
            parse_line("suggest 2").expect("parse"),
            ShellCommand::Event(UiEvent::Suggestion(2))
        );
        assert_eq!(
            parse_line("scroll 1 0.5").expect("parse"),
            ShellCommand::Event(UiEvent::Scrolled { section: 1, ratio: 0.5 })
        );
        assert_eq!(parse_line("").expect("parse"), ShellCommand::Empty);
        assert_eq!(parse_line("EXIT").expect("parse"), ShellCommand::Quit);
    }

    #[test]
    fn heard_lines_become_transcripts_except_listen() {
        assert_eq!(parse_heard_line(" Listen "), UiEvent::ListenClicked);
        assert_eq!(
            parse_heard_line("listen to me"),
            UiEvent::Recognition(RecognitionEvent::Result("listen to me".into()))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("fly").is_err());
        assert!(parse_line("go").is_err());
        assert!(parse_line("go two").is_err());
        assert!(parse_line("ask").is_err());
        assert!(parse_line("key").is_err());
    }
}
