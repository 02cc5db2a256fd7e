use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{get_styles, print_error, print_success, print_warning};

use musicdb::catalog::{
    AlbumId, AlbumUpdate, ArtistId, ArtistType, ArtistUpdate, Catalog, SongId, SongUpdate, Year,
};
use musicdb::config::{AppConfig, CascadePolicy, CliConfig, FileConfig};
use musicdb::seed::SeedCatalog;

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to a TOML config file, its values override the arguments below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to a JSON seed document loaded into the catalog at startup.
    #[clap(long, value_parser = parse_path)]
    pub seed: Option<PathBuf>,

    /// What deleting an artist does to the songs referencing it.
    #[clap(long, value_enum, default_value_t = CascadePolicy::Reject)]
    pub cascade_policy: CascadePolicy,

    /// Log level (error, warn, info, debug, trace).
    #[clap(long)]
    pub logging_level: Option<String>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            cascade_policy: self.cascade_policy,
            logging_level: self.logging_level.clone(),
            seed_path: self.seed.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RecordKind {
    Songs,
    Albums,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Creates an artist (singer, band or composer).
    AddArtist { name: String, artist_type: ArtistType },

    /// Creates a song of an existing artist.
    AddSong {
        name: String,
        year: Year,
        artist_id: u64,
    },

    /// Creates an album.
    AddAlbum { name: String, year: Year },

    /// Changes the given fields of an artist.
    UpdateArtist {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        artist_type: Option<ArtistType>,
    },

    /// Changes the given fields of a song.
    UpdateSong {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        year: Option<Year>,
        #[arg(long)]
        artist_id: Option<u64>,
    },

    /// Changes the given fields of an album.
    UpdateAlbum {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        year: Option<Year>,
    },

    /// Deletes an artist, its songs are handled by the cascade policy.
    DeleteArtist { id: u64 },

    /// Deletes a song and its album links.
    DeleteSong { id: u64 },

    /// Deletes an album and its links, the songs are kept.
    DeleteAlbum { id: u64 },

    /// Links a song to an album.
    Link { song_id: u64, album_id: u64 },

    /// Removes the link between a song and an album.
    Unlink { song_id: u64, album_id: u64 },

    ShowArtist { id: u64 },

    ShowSong { id: u64 },

    ShowAlbum { id: u64 },

    /// Lists songs or albums released in a year.
    ByYear { kind: RecordKind, year: Year },

    /// Lists songs or albums released between two years, both included.
    ByYearRange { kind: RecordKind, lo: Year, hi: Year },

    /// Lists the albums a song is on.
    AlbumsOf { song_id: u64 },

    /// Lists the songs on an album.
    SongsOf { album_id: u64 },

    /// Lists the songs of an artist.
    ArtistSongs { artist_id: u64 },

    /// Lists the artists with at least one song on an album.
    AlbumArtists { album_id: u64 },

    /// Shows record counts and the catalog version.
    Stats,

    /// Verifies that every index agrees with the stored records.
    Check,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_command(command: InnerCommand, catalog: &Catalog) -> Result<CommandExecutionResult> {
    match command {
        InnerCommand::AddArtist { name, artist_type } => {
            let id = catalog.create_artist(&name, artist_type)?;
            print_success(&format!("Created artist {}", id));
        }
        InnerCommand::AddSong {
            name,
            year,
            artist_id,
        } => {
            let id = catalog.create_song(&name, year, ArtistId::new(artist_id))?;
            print_success(&format!("Created song {}", id));
        }
        InnerCommand::AddAlbum { name, year } => {
            let id = catalog.create_album(&name, year)?;
            print_success(&format!("Created album {}", id));
        }
        InnerCommand::UpdateArtist {
            id,
            name,
            artist_type,
        } => {
            let update = ArtistUpdate { name, artist_type };
            if update.is_empty() {
                print_warning("Nothing to update.");
            }
            print_json(&catalog.update_artist(ArtistId::new(id), update)?)?;
        }
        InnerCommand::UpdateSong {
            id,
            name,
            year,
            artist_id,
        } => {
            let update = SongUpdate {
                name,
                year,
                artist_id: artist_id.map(ArtistId::new),
            };
            if update.is_empty() {
                print_warning("Nothing to update.");
            }
            print_json(&catalog.update_song(SongId::new(id), update)?)?;
        }
        InnerCommand::UpdateAlbum { id, name, year } => {
            let update = AlbumUpdate { name, year };
            if update.is_empty() {
                print_warning("Nothing to update.");
            }
            print_json(&catalog.update_album(AlbumId::new(id), update)?)?;
        }
        InnerCommand::DeleteArtist { id } => {
            catalog.delete_artist(ArtistId::new(id))?;
            print_success(&format!("Deleted artist {}", id));
        }
        InnerCommand::DeleteSong { id } => {
            catalog.delete_song(SongId::new(id))?;
            print_success(&format!("Deleted song {}", id));
        }
        InnerCommand::DeleteAlbum { id } => {
            catalog.delete_album(AlbumId::new(id))?;
            print_success(&format!("Deleted album {}", id));
        }
        InnerCommand::Link { song_id, album_id } => {
            catalog.link(SongId::new(song_id), AlbumId::new(album_id))?;
            print_success(&format!("Song {} is on album {}", song_id, album_id));
        }
        InnerCommand::Unlink { song_id, album_id } => {
            catalog.unlink(SongId::new(song_id), AlbumId::new(album_id))?;
            print_success(&format!("Song {} removed from album {}", song_id, album_id));
        }
        InnerCommand::ShowArtist { id } => print_json(&catalog.get_artist(ArtistId::new(id))?)?,
        InnerCommand::ShowSong { id } => print_json(&catalog.get_song(SongId::new(id))?)?,
        InnerCommand::ShowAlbum { id } => print_json(&catalog.get_album(AlbumId::new(id))?)?,
        InnerCommand::ByYear { kind, year } => match kind {
            RecordKind::Songs => print_json(&catalog.songs_by_year(year)?)?,
            RecordKind::Albums => print_json(&catalog.albums_by_year(year)?)?,
        },
        InnerCommand::ByYearRange { kind, lo, hi } => match kind {
            RecordKind::Songs => print_json(&catalog.songs_by_year_range(lo, hi)?)?,
            RecordKind::Albums => print_json(&catalog.albums_by_year_range(lo, hi)?)?,
        },
        InnerCommand::AlbumsOf { song_id } => {
            print_json(&catalog.albums_of(SongId::new(song_id))?)?
        }
        InnerCommand::SongsOf { album_id } => {
            print_json(&catalog.songs_of(AlbumId::new(album_id))?)?
        }
        InnerCommand::ArtistSongs { artist_id } => {
            print_json(&catalog.artist_songs(ArtistId::new(artist_id))?)?
        }
        InnerCommand::AlbumArtists { album_id } => {
            print_json(&catalog.album_artists(AlbumId::new(album_id))?)?
        }
        InnerCommand::Stats => {
            let stats = catalog.stats();
            cli_style::print_section_header("Catalog");
            cli_style::print_key_value("Artists", &stats.artists.to_string());
            cli_style::print_key_value("Songs", &stats.songs.to_string());
            cli_style::print_key_value("Albums", &stats.albums.to_string());
            cli_style::print_key_value("Links", &stats.links.to_string());
            cli_style::print_key_value("Version", &catalog.version().to_string());
            cli_style::print_key_value("Cascade policy", catalog.cascade_policy().as_str());
            cli_style::print_section_footer();
        }
        InnerCommand::Check => {
            let problems = catalog.check_integrity();
            if problems.is_empty() {
                print_success("Catalog is consistent.");
            } else {
                for problem in problems.iter() {
                    print_warning(&problem.to_string());
                }
            }
        }
        InnerCommand::Exit => return Ok(CommandExecutionResult::Exit),
    }
    Ok(CommandExecutionResult::Ok)
}

fn execute_command(line: &str, catalog: &Catalog) -> CommandExecutionResult {
    if line.trim().is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => {
            cli_style::print_command_echo(line);
            match run_command(cli.command, catalog) {
                Ok(result) => result,
                Err(err) => CommandExecutionResult::Error(format!("{:#}", err)),
            }
        }
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            CommandExecutionResult::Ok
        }
    }
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn load_app_config(cli_args: &CliArgs) -> Result<AppConfig> {
    let file_config = match cli_args.config.as_ref() {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    AppConfig::resolve(&cli_args.to_cli_config(), file_config)
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let app_config = load_app_config(&cli_args)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(app_config.logging_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let catalog = Catalog::new(app_config.catalog);
    info!(
        "Created catalog with cascade policy {}",
        catalog.cascade_policy()
    );

    if let Some(seed_path) = app_config.seed_path.as_ref() {
        info!("Loading seed from {:?}...", seed_path);
        SeedCatalog::load(seed_path)?.apply(&catalog)?;

        #[cfg(not(feature = "no_checks"))]
        {
            let problems = catalog.check_integrity();
            if !problems.is_empty() {
                anyhow::bail!("Seeded catalog failed {} integrity check(s)", problems.len());
            }
        }
    }

    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = cli_style::get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(&line, &catalog) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    cli_style::print_goodbye();
    Ok(())
}
