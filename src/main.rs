//! Magic Stick CLI
//!
//! Usage:
//!   magicstick --persona child               # Interactive play
//!   magicstick --persona elder --seed 7      # Reproducible spawns
//!   magicstick --json                        # JSON output per step
//!   magicstick --serve                       # Progress API server

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use magicstick::core::{
    run_server, Burst, Celebration, Collaborators, GameConfig, GameSession, PlaceholderImages,
    ProgressStore, SoundCue, SpeechInput, SpeechOutput, DEMO_USER_ID,
};
use magicstick::types::{
    EntityId, GameError, GameEvent, InputEvent, LevelIndex, ModuleId, Persona, StepOutput,
};
use magicstick::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "magicstick",
    version = VERSION,
    about = "Magic Stick - computer-skills game for children and seniors",
    long_about = "Magic Stick walks a learner through five modules:\n\n  \
                  pointer   - click flowers, drag leaves into the basket\n  \
                  keyboard  - press target keys, type whole words\n  \
                  prompt    - compose a picture prompt (child only)\n  \
                  voice     - talk to the helper (elder only)\n  \
                  creation  - turn words into a picture\n\n\
                  Type 'help' in the play loop for the command list."
)]
struct Args {
    /// Persona: child or elder (can also be chosen in the loop)
    #[arg(short, long)]
    persona: Option<Persona>,

    /// RNG seed for reproducible spawns (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// User id that bloom counts are saved under
    #[arg(long, default_value = DEMO_USER_ID)]
    user: String,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_serve(&args).await;
        return;
    }

    let mut config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    run_play(&args, config);
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// =============================================================================
// Console collaborators
// =============================================================================

/// Prints what would be spoken
struct ConsoleSpeech;

impl SpeechOutput for ConsoleSpeech {
    fn speak(&mut self, text: &str, rate: f32) {
        println!("  {} {} {}", "🔊".bold(), text.cyan(), format!("(x{:.1})", rate).dimmed());
    }
}

/// Typed lines stand in for the microphone
struct ConsoleListener;

impl SpeechInput for ConsoleListener {
    fn start_listening(&mut self) -> bool {
        true
    }
}

struct ConsoleSound;

impl SoundCue for ConsoleSound {
    fn play_tone(&mut self, frequency: f32) {
        debug!(frequency, "tone");
    }
}

struct ConsoleCelebration;

impl Celebration for ConsoleCelebration {
    fn burst(&mut self, intensity: Burst) {
        println!("  {}", "🎉".repeat((intensity.particle_count() / 30) as usize));
    }
}

fn console_collaborators() -> Collaborators {
    Collaborators {
        speech: Box::new(ConsoleSpeech),
        listener: Box::new(ConsoleListener),
        sound: Box::new(ConsoleSound),
        celebration: Box::new(ConsoleCelebration),
        images: Box::new(PlaceholderImages),
    }
}

// =============================================================================
// Play loop
// =============================================================================

/// One line of learner input
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Persona(Persona),
    Start,
    Click(u64),
    Drop(u64, f64, f64),
    Key(String),
    Type(String),
    Choose(usize),
    Advance,
    Goto(ModuleId, LevelIndex),
    Restart,
    Reset,
    Say(String),
    Create,
    Wait(u64),
    Status,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();
        let arg = |i: usize| {
            args.get(i)
                .copied()
                .ok_or_else(|| format!("'{}' needs more arguments", word))
        };

        match word.to_ascii_lowercase().as_str() {
            "persona" => Ok(Command::Persona(arg(0)?.parse()?)),
            "start" => Ok(Command::Start),
            "click" => Ok(Command::Click(parse_num(arg(0)?)?)),
            "drop" => Ok(Command::Drop(
                parse_num(arg(0)?)?,
                parse_num(arg(1)?)?,
                parse_num(arg(2)?)?,
            )),
            // "key" alone sends a space
            "key" if rest.is_empty() => Ok(Command::Key(" ".to_string())),
            "key" => Ok(Command::Key(rest.to_string())),
            "type" => Ok(Command::Type(rest.to_string())),
            "choose" => Ok(Command::Choose(parse_num(arg(0)?)?)),
            "advance" | "next" => Ok(Command::Advance),
            "goto" => {
                let level = match args.get(1) {
                    Some(level) => parse_num(level)?,
                    None => 1,
                };
                Ok(Command::Goto(arg(0)?.parse()?, level))
            }
            "restart" => Ok(Command::Restart),
            "reset" => Ok(Command::Reset),
            "say" if rest.is_empty() => Err("'say' needs some words".to_string()),
            "say" => Ok(Command::Say(rest.to_string())),
            "create" => Ok(Command::Create),
            "wait" => Ok(Command::Wait(parse_num(arg(0)?)?)),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}', type 'help'", other)),
        }
    }
}

fn parse_num<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("'{}' is not a number", s))
}

/// Run the interactive play loop
fn run_play(args: &Args, config: GameConfig) {
    let mut session = GameSession::new(config, console_collaborators());
    let mut store = ProgressStore::seeded();

    print_header(args.no_color);
    match args.persona {
        Some(persona) => {
            if let Ok(out) = session.select_persona(persona) {
                print_output(&out, args);
            }
        }
        None => println!("Choose a persona first: 'persona child' or 'persona elder'"),
    }
    println!("Type 'help' for commands.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut last = Instant::now();

    loop {
        print!("{}", format_prompt(&session, args.no_color));
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        // Wall-clock time since the last command drives the timers
        let elapsed = last.elapsed().as_millis() as u64;
        last = Instant::now();
        let ticked = session.tick(elapsed);
        if !ticked.events.is_empty() {
            print_output(&ticked, args);
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };
        if command == Command::Quit {
            println!("\nBye! Score this level: {}", session.score());
            break;
        }

        for result in execute(&mut session, command) {
            match result {
                Ok(out) => {
                    print_output(&out, args);
                    save_blooms(&out, &mut store, &args.user);
                }
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
    }
}

/// Apply a command; voice input produces several steps
fn execute(session: &mut GameSession, command: Command) -> Vec<Result<StepOutput, GameError>> {
    match command {
        Command::Persona(persona) => vec![session.select_persona(persona)],
        Command::Start => vec![session.start()],
        Command::Click(id) => vec![session.handle(InputEvent::Click { id: EntityId(id) })],
        Command::Drop(id, x, y) => vec![session.handle(InputEvent::DragRelease { id: EntityId(id), x, y })],
        Command::Key(key) => vec![session.handle(InputEvent::KeyDown { key })],
        Command::Type(value) => vec![session.handle(InputEvent::TextChanged { value })],
        Command::Choose(n) => vec![session.handle(InputEvent::ChooseOption { index: n.saturating_sub(1) })],
        Command::Advance => vec![session.advance()],
        Command::Goto(module, level) => vec![session.jump_to_level(module, level)],
        Command::Restart => vec![session.restart_current()],
        Command::Reset => vec![Ok(session.reset())],
        Command::Say(text) => {
            let started = session.start_listening();
            let listening = matches!(&started, Ok(out) if out.snapshot.listening);
            let mut steps = vec![started];
            if listening {
                steps.push(session.receive_transcript(&text));
                steps.push(Ok(session.stop_listening()));
            }
            steps
        }
        Command::Create => vec![session.request_creation()],
        Command::Wait(ms) => vec![Ok(session.tick(ms))],
        Command::Status => {
            print_status(session);
            vec![Ok(session.status())]
        }
        Command::Help => {
            print_help(session);
            vec![session.ask_help()]
        }
        Command::Quit => Vec::new(),
    }
}

/// Finishing the flower level adds its blooms to the lifetime total
fn save_blooms(out: &StepOutput, store: &mut ProgressStore, user_id: &str) {
    for event in &out.events {
        if let GameEvent::GoalReached { module: ModuleId::Pointer, level: 1, score } = event {
            match store.submit_progress(user_id, u64::from(*score)) {
                Ok(user) => println!("  🌸 Lifetime flowers: {}", user.total_flowers),
                Err(e) => warn!(error = %e, "progress not saved"),
            }
        }
    }
}

// =============================================================================
// Output
// =============================================================================

fn print_header(no_color: bool) {
    let title = format!("🪄 Magic Stick v{}", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "╔══════════════════════════════════════╗".bold());
        println!("{}", format!("  {}", title).bold());
        println!("{}", "╚══════════════════════════════════════╝".bold());
    }
    println!();
}

fn format_prompt(session: &GameSession, no_color: bool) -> String {
    let state = session.level_state();
    let module = session.module();
    if no_color {
        format!("[{} L{}/{} {}] > ", module, session.level(), module.level_count(), state)
    } else {
        format!(
            "{}{} [{} L{}/{} {}]{} > ",
            state.color_code(),
            module.icon(),
            module.title(session.level()),
            session.level(),
            module.level_count(),
            state,
            magicstick::types::LevelState::color_reset()
        )
    }
}

fn print_output(out: &StepOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(out) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!(error = %e, "could not serialize output"),
        }
        return;
    }
    if args.no_color {
        println!("{}", out.to_parseable_string());
    } else {
        println!("{}", out.to_terminal_string());
    }
    for event in &out.events {
        if let Some(line) = describe(event) {
            println!("  {}", line);
        }
    }
}

/// Human-readable line for the events worth showing
fn describe(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::BloomSpawned { id } => format!("🌷 new flower #{}", id),
        GameEvent::LeavesSpawned { count } => format!("🍂 {} leaves fell", count),
        GameEvent::KeySelected { key } => format!("⌨️  press [{}] {}", key, key.glyph()),
        GameEvent::WordSelected { word } => format!("📝 type \"{}\"", word),
        GameEvent::MissionAnswered { choice, .. } => format!("✨ {}", choice),
        GameEvent::RoundCompleted { prompt } => format!("🪄 {}", prompt),
        GameEvent::PraiseShown { text } => format!("{}", text.green()),
        GameEvent::MilestoneShown { text } => format!("{}", text.green().bold()),
        GameEvent::TranscriptReceived { text } => format!("🎤 \"{}\"", text),
        GameEvent::CreationStarted { prompt } => format!("🎨 drawing \"{}\"...", prompt),
        GameEvent::CreationReady { image_url } => format!("🖼  {}", image_url),
        GameEvent::CreationFailed => format!("{}", "image could not be made".red()),
        _ => return None,
    };
    Some(line)
}

/// Entities on screen, for playing without a GUI
fn print_status(session: &GameSession) {
    let entities = session.entities();
    for bloom in entities.blooms.iter().filter(|b| !b.is_bloomed) {
        println!(
            "  flower #{} at ({:.0}%, {:.0}%) {}",
            bloom.id, bloom.position.x, bloom.position.y, bloom.color()
        );
    }
    for leaf in entities.leaves.iter().filter(|l| !l.is_collected) {
        println!("  leaf #{} at ({:.0}%, {:.0}%)", leaf.id, leaf.position.x, leaf.position.y);
    }
    if let Some(mission) = entities.prompt.current_mission() {
        if session.module() == ModuleId::Prompt && session.is_started() {
            println!("  {}", mission.question);
            for (i, choice) in mission.choices.iter().enumerate() {
                println!("    {}. {}", i + 1, choice);
            }
        }
    }
    if session.module() == ModuleId::Pointer && session.level() == 2 {
        let config = session.config();
        println!(
            "  basket: x > {:.0}, y > {:.0} (px)",
            config.surface_width - config.basket_size,
            config.surface_height - config.basket_size
        );
    }
}

fn print_help(session: &GameSession) {
    if let Some(persona) = session.persona() {
        println!("  {} helper", persona.mascot());
    }
    println!("  persona <child|elder>   choose who is playing");
    println!("  start                   start the current level");
    println!("  click <id>              click a flower");
    println!("  drop <id> <x> <y>       release a leaf at pixel (x, y)");
    println!("  key <name>              press a key (a, Enter, Space)");
    println!("  type <text>             set the text box contents");
    println!("  choose <n>              pick answer n (1-4)");
    println!("  advance                 go to the next level");
    println!("  goto <module> [level]   jump to a module");
    println!("  restart | reset         restart level | start over");
    println!("  say <text>              talk to the helper");
    println!("  create                  make a picture");
    println!("  wait <ms>               let time pass");
    println!("  status | quit");
    println!();
    for module in ModuleId::ALL {
        println!("  {} {:<10} levels 1-{}", module.icon(), module.to_string(), module.level_count());
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    println!("╔══════════════════════════════════════╗");
    println!("║  🪄 Magic Stick Progress API         ║");
    println!("║  Version: {:<27}║", VERSION);
    println!("╚══════════════════════════════════════╝");
    println!();

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("click 3"), Ok(Command::Click(3)));
        assert_eq!(Command::parse("drop 4 1100 700"), Ok(Command::Drop(4, 1100.0, 700.0)));
        assert_eq!(Command::parse("key Enter"), Ok(Command::Key("Enter".into())));
        assert_eq!(Command::parse("key"), Ok(Command::Key(" ".into())));
        assert_eq!(Command::parse("type 사랑"), Ok(Command::Type("사랑".into())));
        assert_eq!(Command::parse("goto mouse"), Ok(Command::Goto(ModuleId::Pointer, 1)));
        assert_eq!(Command::parse("goto keyboard 2"), Ok(Command::Goto(ModuleId::Keyboard, 2)));
        assert_eq!(Command::parse("persona silver"), Ok(Command::Persona(Persona::Elder)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("click").is_err());
        assert!(Command::parse("click abc").is_err());
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("say").is_err());
        assert!(Command::parse("goto keyboard two").is_err());
    }
}
