use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use delve::{
    AppConfig, DungeonGenerator, DungeonRenderer, DungeonRng, GameSession, SavedDungeon,
    WeaponType,
};

/// Length of one simulated frame.
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    init_tracing();

    let matches = Command::new("delve")
        .about("Procedural dungeon generator and headless game core")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generate a dungeon and print it")
                .arg(Arg::new("width").long("width").value_parser(value_parser!(i32)))
                .arg(Arg::new("height").long("height").value_parser(value_parser!(i32)))
                .arg(seed_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("save")
                        .long("save")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the dungeon as JSON"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Print a saved dungeon")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run a headless session where the player swings every frame")
                .arg(seed_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .default_value("3000")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("weapon")
                        .long("weapon")
                        .value_parser(["sword", "bow", "magic"]),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("generate", args)) => run_generate(args),
        Some(("show", args)) => {
            let path = args
                .get_one::<PathBuf>("file")
                .context("missing dungeon file")?;
            run_show(path)
        }
        Some(("simulate", args)) => run_simulate(args),
        _ => Ok(()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("delve=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .value_parser(value_parser!(u64))
        .help("Seed for reproducible output")
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON configuration file")
}

fn load_config(args: &ArgMatches) -> Result<AppConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
}

fn seeded_rng(args: &ArgMatches) -> DungeonRng {
    match args.get_one::<u64>("seed") {
        Some(seed) => DungeonRng::new(*seed),
        None => DungeonRng::from_entropy(),
    }
}

fn run_generate(args: &ArgMatches) -> Result<()> {
    let mut config = load_config(args)?;
    if let Some(width) = args.get_one::<i32>("width") {
        config.generator.width = *width;
    }
    if let Some(height) = args.get_one::<i32>("height") {
        config.generator.height = *height;
    }
    config.validate()?;

    let rng = seeded_rng(args);
    let seed = rng.seed();
    let mut generator = DungeonGenerator::from_config(config.generator, rng);
    let grid = generator.generate();
    let report = generator.report();

    print!("{}", grid);
    println!();
    println!("Seed:        {}", seed);
    println!("Size:        {}x{}", grid.width(), grid.height());
    println!("Attempts:    {}", report.attempts);
    println!("Rooms:       {}", report.accepted_rooms());
    println!("Overlapping: {}", report.rejected_overlap);
    println!("Too small:   {}", report.skipped_too_small);
    println!("Corridors:   {}", report.corridors.len());
    println!("Floor tiles: {}", report.floor_tiles);
    if report.is_degenerate() {
        println!("Warning: no room fit, the dungeon is solid wall");
    }

    if let Some(path) = args.get_one::<PathBuf>("save") {
        SavedDungeon::new(grid.clone(), report.rooms.clone(), Some(seed)).save(path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn run_show(path: &Path) -> Result<()> {
    let saved = SavedDungeon::load(path)?;
    print!("{}", saved.grid);
    println!();
    println!("Created: {}", saved.metadata.created_at);
    if let Some(seed) = saved.metadata.seed {
        println!("Seed:    {}", seed);
    }
    println!("Rooms:   {}", saved.rooms.len());
    Ok(())
}

fn run_simulate(args: &ArgMatches) -> Result<()> {
    let mut config = load_config(args)?;
    if let Some(weapon) = args.get_one::<String>("weapon") {
        config.session.weapon = weapon.parse::<WeaponType>().map_err(anyhow::Error::msg)?;
    }
    let ticks = args.get_one::<u64>("ticks").copied().unwrap_or(3000);

    let rng = seeded_rng(args);
    let seed = rng.seed();
    let mut session = GameSession::start(&config, rng)?;

    let mut now = 0;
    for _ in 0..ticks {
        now += FRAME_MS;
        session.player_attack(now);
        if session.tick(now, FRAME_MS) == delve::SessionState::GameOver {
            break;
        }
    }

    let renderer = DungeonRenderer::new()
        .with_player(session.player().position.to_tile())
        .with_enemies(session.enemies().iter().map(|enemy| enemy.position.to_tile()));
    for line in renderer.render(session.dungeon()) {
        println!("{}", line);
    }
    println!();
    println!("Seed:    {}", seed);
    let profile = session.player().weapon_profile();
    println!(
        "Weapon:  {} ({} damage, {:.0}px, {}ms)",
        session.player().weapon,
        profile.damage,
        profile.range,
        profile.cooldown_ms
    );
    println!("Time:    {:.1}s", now as f64 / 1000.0);
    println!("Health:  {}/{}", session.player().health.current(), session.player().health.max());
    println!("Kills:   {}", session.kills());
    println!("Score:   {}", session.score());
    println!("State:   {:?}", session.state());
    Ok(())
}
