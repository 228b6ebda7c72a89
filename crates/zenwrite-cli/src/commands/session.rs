//! Interactive writing session.
//!
//! One `select!` loop owns the session and interleaves timer ticks, typed
//! commands and assistant replies. Assistant calls run in spawned tasks and
//! come back with the ticket they were issued; late replies are dropped.

use std::sync::Arc;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use zenwrite_core::timer::{format_clock, TICK_PERIOD};
use zenwrite_core::{
    AssistError, Assistant, Config, Event, FocusSettings, HttpPromptService, Phase, TickDriver,
    Ticket, WritingSession,
};

use super::assist::{call, superseded_notice, ToolReply, ToolRequest};

#[derive(Args)]
pub struct SessionArgs {
    /// Print events as JSON lines instead of messages
    #[arg(long)]
    json: bool,
    /// Word goal for this session
    #[arg(long)]
    word_goal: Option<String>,
    /// Writing-time goal in minutes
    #[arg(long)]
    time_goal: Option<String>,
    /// Start the timer immediately
    #[arg(long)]
    start: bool,
}

const HELP: &str = "\
commands:
  start | pause | reset | skip      timer control
  write <text>                      append text to the draft
  clear                             empty the draft
  show                              print the draft
  zen                               toggle zen mode
  goal words <n> | goal time <min>  set goals
  set <flag> <on|off>               change a focus setting
  toggle <flag>                     flip a focus setting
  pace | break | improve            ask the assistant about the draft
  stuck [problem]                   get unstuck
  exercise                          break-time writing exercise
  status                            show timer and progress
  help | quit";

type Reply = (Ticket, Result<ToolReply, AssistError>);

struct Shell {
    session: WritingSession,
    assistant: Option<Arc<Assistant<HttpPromptService>>>,
    replies: mpsc::Sender<Reply>,
    json: bool,
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run_loop(config, args))
}

async fn run_loop(config: Config, args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = match config.assistant() {
        Ok(assistant) => Some(Arc::new(assistant)),
        Err(e) => {
            tracing::warn!(error = %e, "assistant disabled");
            None
        }
    };
    let (tx, mut rx) = mpsc::channel::<Reply>(16);
    let mut shell = Shell {
        session: WritingSession::from_config(&config),
        assistant,
        replies: tx,
        json: args.json,
    };
    tracing::info!(session = %shell.session.id(), "session opened");

    if let Some(goal) = &args.word_goal {
        let events = shell.session.set_word_goal(goal);
        shell.emit(&events);
    }
    if let Some(goal) = &args.time_goal {
        shell.session.set_time_goal(goal);
    }

    let mut driver = TickDriver::new(TICK_PERIOD);
    if args.start {
        let events = shell.session.start();
        shell.emit(&events);
    }
    driver.sync_with(shell.session.timer().is_running());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if !shell.json {
        println!("ZenWrite session. Type 'help' for commands.");
    }

    loop {
        tokio::select! {
            _ = driver.next_tick() => {
                let phase = shell.session.timer().phase();
                let events = shell.session.tick();
                shell.emit(&events);
                if shell.session.timer().phase() != phase {
                    shell.on_phase_change();
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !shell.handle(line.trim()) {
                    break;
                }
            }
            Some((ticket, reply)) = rx.recv() => {
                shell.on_reply(ticket, reply);
            }
        }
        driver.sync_with(shell.session.timer().is_running());
    }

    driver.stop();
    shell.print_status();
    Ok(())
}

fn flag_usage(form: &str) -> String {
    format!("usage: {form}  (flags: {})", FocusSettings::FLAGS.join(", "))
}

impl Shell {
    fn emit(&self, events: &[Event]) {
        for event in events {
            if self.json {
                if let Ok(line) = serde_json::to_string(event) {
                    println!("{line}");
                }
                continue;
            }
            match event {
                Event::XpAwarded { amount, total, .. } => println!("+{amount} XP ({total} total)"),
                other => {
                    if let Some(msg) = other.message() {
                        println!("* {msg}");
                    }
                }
            }
        }
    }

    fn say(&self, msg: &str) {
        if !self.json {
            println!("{msg}");
        }
    }

    /// Returns false when the user asked to leave.
    fn handle(&mut self, line: &str) -> bool {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        let events = match cmd {
            "" => Vec::new(),
            "start" => self.session.start(),
            "pause" => self.session.pause(),
            "reset" => self.session.reset(),
            "skip" => {
                let events = self.session.skip();
                self.emit(&events);
                self.on_phase_change();
                return true;
            }
            "write" => {
                if self.session.is_writing_disabled() {
                    self.say("Writing is paused during breaks.");
                    Vec::new()
                } else {
                    self.session.append_text(rest)
                }
            }
            "clear" => self.session.update_text(String::new()),
            "show" => {
                self.say(self.session.text());
                Vec::new()
            }
            "zen" => {
                if self.session.in_zen_mode() {
                    self.session.exit_zen_mode();
                    self.say("Left zen mode.");
                    Vec::new()
                } else {
                    self.session.enter_zen_mode()
                }
            }
            "goal" => self.goal(rest),
            "set" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(flag), Some(value)) => match self.session.settings_mut().set_from_str(flag, value) {
                        Ok(()) => self.say(&format!("{flag} = {value}")),
                        Err(e) => self.say(&format!("error: {e}")),
                    },
                    _ => self.say(&flag_usage("set <flag> <on|off>")),
                }
                Vec::new()
            }
            "toggle" if rest.is_empty() => {
                self.say(&flag_usage("toggle <flag>"));
                Vec::new()
            }
            "toggle" => {
                match self.session.settings_mut().toggle(rest) {
                    Ok(on) => self.say(&format!("{rest} = {}", if on { "on" } else { "off" })),
                    Err(e) => self.say(&format!("error: {e}")),
                }
                Vec::new()
            }
            "pace" => self.ask(ToolRequest::Pace),
            "break" => {
                if self.session.settings().break_suggestions_enabled() {
                    self.ask(ToolRequest::Break)
                } else {
                    self.say("Content-aware breaks are off.");
                    Vec::new()
                }
            }
            "improve" => self.ask(ToolRequest::Improve),
            "stuck" => {
                let problem = (!rest.is_empty()).then(|| rest.to_string());
                self.ask(ToolRequest::Stuck { problem })
            }
            "exercise" => match self.session.exercise_request() {
                Some(req) => self.ask(ToolRequest::Exercise(req)),
                None => {
                    self.say("Exercises are offered during breaks when enabled.");
                    Vec::new()
                }
            },
            "status" => {
                self.print_status();
                Vec::new()
            }
            "help" => {
                self.say(HELP);
                Vec::new()
            }
            "quit" | "exit" => return false,
            other => {
                self.say(&format!("unknown command: {other} (try 'help')"));
                Vec::new()
            }
        };
        self.emit(&events);
        true
    }

    fn goal(&mut self, rest: &str) -> Vec<Event> {
        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("words"), Some(n)) => self.session.set_word_goal(n),
            (Some("time"), Some(n)) => {
                self.session.set_time_goal(n);
                Vec::new()
            }
            _ => {
                self.say("usage: goal words <n> | goal time <minutes>");
                Vec::new()
            }
        }
    }

    /// Dispatch a tool call; its reply arrives through the loop.
    fn ask(&mut self, request: ToolRequest) -> Vec<Event> {
        if self.session.deep_work_active() {
            self.say("Deep work mode: tools are hidden until the break.");
            return Vec::new();
        }
        let Some(assistant) = self.assistant.clone() else {
            self.say("The writing assistant is not configured (no API key).");
            return Vec::new();
        };
        let ticket = self.session.begin_tool_request();
        let text = self.session.text().to_string();
        let tx = self.replies.clone();
        tokio::spawn(async move {
            let reply = call(&assistant, request, &text).await;
            let _ = tx.send((ticket, reply)).await;
        });
        self.say("Asking the assistant...");
        Vec::new()
    }

    fn on_reply(&mut self, ticket: Ticket, reply: Result<ToolReply, AssistError>) {
        match reply {
            Ok(reply) => {
                if let Some(events) = reply.apply(&mut self.session, ticket) {
                    if self.json {
                        if let Ok(line) = serde_json::to_string(&reply) {
                            println!("{line}");
                        }
                    } else {
                        println!("{}", reply.render());
                    }
                    self.emit(&events);
                } else {
                    self.say(&superseded_notice(&reply));
                }
            }
            Err(e) => self.say(&e.to_string()),
        }
    }

    /// Offer a writing exercise when a break begins.
    fn on_phase_change(&mut self) {
        if self.session.timer().phase() == Phase::Work || self.assistant.is_none() {
            return;
        }
        if let Some(req) = self.session.exercise_request() {
            self.ask(ToolRequest::Exercise(req));
        }
    }

    fn print_status(&self) {
        let timer = self.session.timer();
        let stats = self.session.stats();
        if self.json {
            let events = [timer.snapshot()];
            self.emit(&events);
            if let Ok(line) = serde_json::to_string(stats) {
                println!("{line}");
            }
            return;
        }
        let state = if timer.is_running() { "running" } else { "paused" };
        println!(
            "{} {} ({state}) | cycles {} | {:.0}%",
            timer.phase().label(),
            timer.display(),
            timer.completed_work_cycles(),
            timer.phase_progress_pct()
        );
        let level = self.session.level_progress();
        println!(
            "words {} | XP {} | level {} ({:.0}%) | streak {} | today {}",
            stats.word_count,
            stats.experience_points,
            level.level,
            level.pct,
            stats.streak_days,
            format_clock(stats.writing_seconds_today)
        );
        let goals = self.session.goals();
        if goals.word_goal > 0 {
            println!("word goal {:.0}%", goals.word_progress_pct(stats.word_count));
        }
        if goals.time_goal_minutes > 0 {
            println!("time goal {:.0}%", goals.time_progress_pct(stats.writing_seconds_today));
        }
        println!("badges {}/{}", self.session.badges().achieved().len(), zenwrite_core::ACHIEVEMENTS.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_usage_lists_every_flag() {
        let usage = flag_usage("toggle <flag>");
        assert!(usage.starts_with("usage: toggle <flag>"));
        for flag in FocusSettings::FLAGS {
            assert!(usage.contains(flag), "{flag} missing from {usage}");
        }
    }
}
