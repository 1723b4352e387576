//! REPL session management

use std::io::{self, Stdout};
use std::path::PathBuf;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use super::render;
use crate::auth::Credentials;
use crate::domain::{Preferences, QUESTIONS, StoryTheme};
use crate::export::{self, TripExport};
use crate::narration::{Narrator, TerminalNarrator, VoicePicker};
use crate::session::{SessionController, View};

/// Slash commands understood by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Quit,
    Home,
    Start,
    Plan,
    Login,
    Signup,
    Logout,
    Day(u32),
    Story(StoryTheme),
    Storybook,
    Back,
    Show,
    Save(Option<PathBuf>),
    Voices,
    Voice(String),
    Narrate,
}

/// Parse a `/command args` line
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };

    match cmd {
        "/help" | "/h" => Ok(SlashCommand::Help),
        "/quit" | "/q" | "/exit" => Ok(SlashCommand::Quit),
        "/home" => Ok(SlashCommand::Home),
        "/start" => Ok(SlashCommand::Start),
        "/plan" | "/p" => Ok(SlashCommand::Plan),
        "/login" => Ok(SlashCommand::Login),
        "/signup" => Ok(SlashCommand::Signup),
        "/logout" => Ok(SlashCommand::Logout),
        "/day" | "/d" => rest
            .parse::<u32>()
            .map(SlashCommand::Day)
            .map_err(|_| "Usage: /day <number>".to_string()),
        "/story" => {
            if rest.is_empty() {
                Ok(SlashCommand::Story(StoryTheme::Historical))
            } else {
                rest.parse().map(SlashCommand::Story)
            }
        }
        "/storybook" | "/book" => Ok(SlashCommand::Storybook),
        "/back" | "/b" => Ok(SlashCommand::Back),
        "/show" | "/s" => Ok(SlashCommand::Show),
        "/save" => Ok(SlashCommand::Save(if rest.is_empty() { None } else { Some(PathBuf::from(rest)) })),
        "/voices" => Ok(SlashCommand::Voices),
        "/voice" if !rest.is_empty() => Ok(SlashCommand::Voice(rest.to_string())),
        "/voice" => Err("Usage: /voice <name>".to_string()),
        "/narrate" => Ok(SlashCommand::Narrate),
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Match an answer to one of the options by number or by name
pub fn pick_option<'a>(input: &str, options: &[&'a str]) -> Option<&'a str> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    options.iter().copied().find(|o| o.eq_ignore_ascii_case(input))
}

/// Trip length in days, 1 to 10; empty input means 7
pub fn parse_duration(input: &str) -> Option<u8> {
    let input = input.trim();
    if input.is_empty() {
        return Some(7);
    }
    input.parse::<u8>().ok().filter(|d| (1..=10).contains(d))
}

enum SlashResult {
    Continue,
    Quit,
}

/// Interactive planning session
pub struct ReplSession {
    ctl: SessionController,
    rl: DefaultEditor,
    voices: VoicePicker,
    narrator: TerminalNarrator<Stdout>,
}

impl ReplSession {
    pub fn new(ctl: SessionController) -> Result<Self> {
        let rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        let narrator = TerminalNarrator::new(io::stdout());
        let voices = VoicePicker::new(&narrator.available_voices());
        Ok(Self {
            ctl,
            rl,
            voices,
            narrator,
        })
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = format!("{} {} ", self.ctl.state().view.name().dimmed(), ">".bright_green());
            match self.rl.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = self.rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match parse_command(input) {
                            Ok(cmd) => match self.handle(cmd).await? {
                                SlashResult::Continue => continue,
                                SlashResult::Quit => break,
                            },
                            Err(msg) => {
                                println!("{} {}", "?".yellow(), msg);
                                println!("Type {} for available commands", "/help".yellow());
                            }
                        }
                    } else {
                        println!("Type {} for available commands", "/help".yellow());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Happy travels!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Wander Wise".bright_cyan().bold());
        println!("AI trip planner. Model: {}", self.ctl.gateway().model());
        println!(
            "Type {} to begin, {} for help, {} to quit",
            "/start".yellow(),
            "/help".yellow(),
            "/quit".yellow()
        );
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Exit", "/quit".yellow());
        println!("  {:16} Open the planner", "/start".yellow());
        println!("  {:16} Answer the questions and plan a trip", "/plan".yellow());
        println!("  {:16} Sign in", "/login".yellow());
        println!("  {:16} Create an account", "/signup".yellow());
        println!("  {:16} Sign out", "/logout".yellow());
        println!("  {:16} Details for day N", "/day N".yellow());
        println!("  {:16} Story for the selected day", "/story THEME".yellow());
        println!("  {:16} Retell the trip as a storybook", "/storybook".yellow());
        println!("  {:16} Go back one screen", "/back".yellow());
        println!("  {:16} Show the current screen", "/show".yellow());
        println!("  {:16} Export the trip as JSON", "/save [FILE]".yellow());
        println!("  {:16} List or pick narrator voices", "/voices, /voice".yellow());
        println!("  {:16} Read the last story aloud", "/narrate".yellow());
        println!("  {:16} Back to the start, dropping the plan", "/home".yellow());
        println!();
    }

    async fn handle(&mut self, cmd: SlashCommand) -> Result<SlashResult> {
        debug!(?cmd, view = %self.ctl.state().view, "handle: called");
        match cmd {
            SlashCommand::Help => self.print_help(),
            SlashCommand::Quit => return Ok(SlashResult::Quit),
            SlashCommand::Home => {
                self.ctl.go_home();
                println!("{}", "Back at the start. Type /start to plan a new trip.".dimmed());
            }
            SlashCommand::Start => {
                self.ctl.start_journey();
                println!("{}", "Planner open. Type /plan to answer the questions.".dimmed());
            }
            SlashCommand::Plan => self.plan().await?,
            SlashCommand::Login => self.login(false).await?,
            SlashCommand::Signup => self.login(true).await?,
            SlashCommand::Logout => {
                self.ctl.logout();
                println!("{}", "Signed out.".dimmed());
            }
            SlashCommand::Day(n) => {
                if self.ctl.know_more(n) {
                    self.show();
                } else {
                    println!("{} No day {} in the current itinerary", "?".yellow(), n);
                }
            }
            SlashCommand::Story(theme) => self.story(theme).await,
            SlashCommand::Storybook => self.storybook().await,
            SlashCommand::Back => {
                match self.ctl.state().view {
                    View::Details | View::Storybook => self.ctl.back_to_itinerary(),
                    View::Itinerary => self.ctl.back_to_planner(),
                    View::Planner => self.ctl.go_home(),
                    View::Home => {}
                }
                self.show();
            }
            SlashCommand::Show => self.show(),
            SlashCommand::Save(path) => self.save(path),
            SlashCommand::Voices => {
                let selected = self.voices.selected().map(|v| v.name.clone());
                for voice in self.voices.voices() {
                    let marker = if Some(&voice.name) == selected.as_ref() { "*" } else { " " };
                    println!(" {} {}", marker.bright_green(), voice.label());
                }
            }
            SlashCommand::Voice(name) => {
                if !self.voices.select(&name) {
                    println!("{} No voice named {}", "?".yellow(), name);
                }
            }
            SlashCommand::Narrate => self.narrate(),
        }
        Ok(SlashResult::Continue)
    }

    /// Print whatever the current view shows
    fn show(&self) {
        let state = self.ctl.state();
        if let Some(err) = &state.error {
            println!("{} {}", "Oops!".red().bold(), err);
        }
        match state.view {
            View::Home => {
                match &state.user {
                    Some(user) => println!("Welcome back, {} ({})", user.name, user.initials()),
                    None => println!("Welcome, traveller. /login or /signup to save your plans."),
                }
                println!("{}", "Type /start to plan a trip.".dimmed());
            }
            View::Planner => println!("{}", "Type /plan to answer the questions.".dimmed()),
            View::Itinerary => {
                if let Some(itinerary) = &state.itinerary {
                    println!("{}", render::itinerary(itinerary));
                }
            }
            View::Details => {
                if let Some(day) = &state.selected_day {
                    println!("{}", render::day(day));
                }
                if let Some(story) = &state.story {
                    println!();
                    println!("{}", render::story(story));
                }
            }
            View::Storybook => {
                if let Some(book) = &state.storybook {
                    println!("{}", render::storybook(book));
                }
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.rl.readline(&format!("{} ", prompt.bright_blue())) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }

    async fn login(&mut self, signup: bool) -> Result<()> {
        if self.ctl.state().is_logged_in() {
            println!("{}", "Already signed in.".dimmed());
            return Ok(());
        }
        self.ctl.request_login();

        let name = if signup {
            let Some(name) = self.ask("Name:")? else {
                self.ctl.close_login();
                return Ok(());
            };
            Some(name)
        } else {
            None
        };
        let Some(email) = self.ask("Email:")? else {
            self.ctl.close_login();
            return Ok(());
        };
        let Some(password) = self.ask("Password:")? else {
            self.ctl.close_login();
            return Ok(());
        };

        let credentials = match name {
            Some(name) => Credentials::signup(name, email, password),
            None => Credentials::login(email, password),
        };
        match self.ctl.authenticate(&credentials).await {
            Ok(()) => {
                if let Some(user) = &self.ctl.state().user {
                    println!("{} Welcome, {}!", "✓".bright_green(), user.name);
                }
            }
            Err(e) => println!("{} {}", "Oops!".red().bold(), e),
        }
        Ok(())
    }

    /// Walk the questionnaire, then request the plan
    async fn plan(&mut self) -> Result<()> {
        if !self.ctl.state().is_logged_in() {
            self.ctl.request_login();
            println!("{}", "Please sign in first (/login or /signup).".yellow());
            return Ok(());
        }
        self.ctl.start_journey();

        let mut prefs = Preferences::default();
        for question in QUESTIONS.iter() {
            println!();
            println!("{}", question.prompt.bright_cyan());
            for (i, option) in question.options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            loop {
                let Some(answer) = self.ask(">")? else {
                    println!("{}", "Planning cancelled.".dimmed());
                    return Ok(());
                };
                match pick_option(&answer, question.options) {
                    Some(choice) => {
                        prefs.set(question.key, choice);
                        break;
                    }
                    None => println!("{} Pick 1-{}", "?".yellow(), question.options.len()),
                }
            }
        }

        println!();
        println!("{}", "How many days? (1-10, default 7)".bright_cyan());
        loop {
            let Some(answer) = self.ask(">")? else {
                println!("{}", "Planning cancelled.".dimmed());
                return Ok(());
            };
            match parse_duration(&answer) {
                Some(days) => {
                    prefs.set("duration", days.to_string());
                    break;
                }
                None => println!("{} Enter a number from 1 to 10", "?".yellow()),
            }
        }

        let details = prefs.to_trip_details();
        info!(destination = %details.destination, duration = %details.duration, "Planning trip");
        let Some(ticket) = self.ctl.begin_itinerary(details.clone()) else {
            self.show();
            return Ok(());
        };

        println!("{}", "Crafting your personalized itinerary... (Ctrl+C to cancel)".dimmed());
        let gateway = self.ctl.gateway();
        let result = tokio::select! {
            r = gateway.generate_itinerary(&details) => Some(r),
            _ = tokio::signal::ctrl_c() => None,
        };

        match result {
            Some(r) => {
                self.ctl.finish_itinerary(ticket, r);
                self.show();
            }
            None => {
                self.ctl.cancel_pending();
                self.ctl.back_to_itinerary();
                println!("{}", "Cancelled.".dimmed());
            }
        }
        Ok(())
    }

    async fn story(&mut self, theme: StoryTheme) {
        let Some(job) = self.ctl.begin_story(theme) else {
            println!("{} Pick a day first with /day N", "?".yellow());
            return;
        };
        println!("{}", format!("Weaving a {} tale...", theme).dimmed());
        let result = self.ctl.gateway().generate_story(&job.poi, job.theme).await;
        self.ctl.finish_story(job, result);
        self.show();
    }

    async fn storybook(&mut self) {
        let Some(job) = self.ctl.begin_storybook() else {
            println!("{} Plan a trip first, then try /storybook again", "?".yellow());
            return;
        };
        println!("{}", "Writing your storybook...".dimmed());
        let result = self
            .ctl
            .gateway()
            .generate_storybook(&job.itinerary, &job.details)
            .await;
        self.ctl.finish_storybook(job.ticket, result);
        self.show();
    }

    fn narrate(&mut self) {
        let Some(story) = self.ctl.state().story.clone() else {
            println!("{} Generate a story first with /story THEME", "?".yellow());
            return;
        };
        let result = self
            .voices
            .require()
            .cloned()
            .and_then(|voice| self.narrator.speak(&story.text, &voice));
        if let Err(e) = result {
            println!("{} {}", "Oops!".red().bold(), e);
        }
    }

    fn save(&self, path: Option<PathBuf>) {
        let state = self.ctl.state();
        let Some(itinerary) = state.itinerary.clone() else {
            println!("{} Nothing to save yet", "?".yellow());
            return;
        };
        let export = TripExport {
            trip_details: state.trip_details.clone(),
            itinerary,
            storybook: state.storybook.clone(),
        };
        match export::save(&export, path.as_deref()) {
            Ok(path) => println!("{} Saved to {}", "✓".bright_green(), path.display()),
            Err(e) => println!("{} {:#}", "Oops!".red().bold(), e),
        }
    }
}
