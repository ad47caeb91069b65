//! Team Builder CLI
//!
//! Thin wrapper around teambuilder-core functions for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Show the grid for a mode
//! teambuilder layout limbo
//!
//! # Build a share code (use "-" for an empty slot)
//! teambuilder encode --mode mode1 --name "Test" --slot 3003 --slot - --slot 3004
//!
//! # Read a share code or link against the roster
//! teambuilder --catalog characters.json decode "https://example.com/#JTdC..."
//!
//! # Browse the roster
//! teambuilder --catalog characters.json characters --attribute Star --specialty Buff
//!
//! # Save, list and share teams
//! teambuilder team save "Limbo clear" --description "boss 3" <token>
//! teambuilder team list
//! teambuilder team share <team_id> --base https://example.com/
//!
//! # Render a QR code
//! teambuilder qr "https://example.com/#JTdC..." --output team.svg
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use teambuilder_core::share::parse_input;
use teambuilder_core::stats::UNLABELED_PARTY;
use teambuilder_core::{
    codec, layout, qr, reconcile, team_stats, Attribute, CharacterCatalog, CharacterFilter,
    CharacterId, DamageType, Mode, RedbStore, ShareLinkBuilder, ShareSummary, SlotInstruction,
    Team, TeamId, TeamStore,
};

/// Team Builder - build, save and share roster teams
#[derive(Parser)]
#[command(name = "teambuilder")]
#[command(version = "0.1.0")]
#[command(about = "Team Builder - build, save and share roster teams")]
#[command(
    long_about = "Build teams of one, two or four parties, share them as compact codes or links, and keep a list of saved teams."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: ~/.teambuilder/data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Character catalog (JSON array of character records)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the party layout for a mode (mode1, limbo, 4parties)
    Layout {
        mode: String,
    },

    /// Build a share code from slot ids
    Encode {
        /// Mode tag: mode1, limbo or 4parties
        #[arg(short, long, default_value = "mode1")]
        mode: String,
        /// Team name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Team description
        #[arg(long, default_value = "")]
        description: String,
        /// Slot contents in order; "-" leaves a slot empty
        #[arg(short, long = "slot")]
        slots: Vec<String>,
        /// Print a full link with this base address instead of the bare code
        #[arg(short, long)]
        base: Option<String>,
    },

    /// Decode a share code or link
    Decode {
        /// Bare code or full link
        input: String,
    },

    /// List characters in the catalog
    Characters {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,
        /// Attribute (Beast, Plant, Star, Mineral, Spirit, Intellect)
        #[arg(short, long)]
        attribute: Option<String>,
        /// Damage type (Reality, Mental)
        #[arg(long)]
        damage_type: Option<String>,
        /// Required specialty (repeatable)
        #[arg(long = "specialty")]
        specialties: Vec<String>,
        /// Required tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Saved team management
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },

    /// Render text (usually a share link) as a QR code
    Qr {
        text: String,
        /// Write an SVG file instead of printing to the terminal
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// SVG size in pixels
        #[arg(short, long, default_value_t = qr::DEFAULT_QR_SIZE)]
        size: u32,
    },
}

#[derive(Subcommand)]
enum TeamAction {
    /// List saved teams
    List,
    /// Show a saved team
    Show {
        team_id: String,
    },
    /// Save the team in a share code or link under a name
    Save {
        name: String,
        /// Share code or link
        input: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Rename a saved team
    Rename {
        team_id: String,
        name: String,
        /// Replace the description as well
        #[arg(long)]
        description: Option<String>,
    },
    /// Replace a saved team's description
    Describe {
        team_id: String,
        text: String,
    },
    /// Delete a saved team
    Delete {
        team_id: String,
    },
    /// Print the share code (or link) for a saved team
    Share {
        team_id: String,
        #[arg(short, long)]
        base: Option<String>,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (~/.teambuilder/data)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".teambuilder")
        .join("data")
}

fn parse_mode(s: &str) -> Result<Mode> {
    s.parse::<Mode>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid mode '{}'. Must be one of: mode1, limbo, 4parties",
            s
        )
    })
}

fn parse_slot(s: &str) -> Option<CharacterId> {
    match s.trim() {
        "" | "-" => None,
        id => Some(CharacterId::new(id)),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Option<CharacterCatalog>> {
    path.map(|path| {
        CharacterCatalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))
    })
    .transpose()
}

fn require_catalog(path: Option<&Path>) -> Result<CharacterCatalog> {
    load_catalog(path)?.context("This command needs a character catalog (--catalog <file>)")
}

fn open_store(data_dir: &Path) -> Result<TeamStore<RedbStore>> {
    let kv = RedbStore::open_dir(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    Ok(TeamStore::new(kv))
}

/// "Party A #2" style label for a flat slot index
fn slot_label(team: &Team, index: usize) -> String {
    let party = layout::party_of(index);
    let label = team.layout().party_label(party).unwrap_or(UNLABELED_PARTY);
    format!("{} #{}", label, layout::position_in_party(index) + 1)
}

fn print_summary(team: &Team) {
    let summary = ShareSummary::of(team);
    let layout = summary.mode.layout();
    println!(
        "Team: {}",
        if summary.name.is_empty() { "(unnamed)" } else { summary.name.as_str() }
    );
    println!(
        "  Mode: {} ({} x {} slots)",
        summary.mode,
        layout.party_count,
        layout.slots_per_party
    );
    println!("  Characters: {}", summary.character_count);
    if !summary.description.is_empty() {
        println!("  Description: {}", summary.description);
    }
}

fn print_slots(team: &Team, catalog: Option<&CharacterCatalog>) {
    println!();
    match catalog {
        Some(catalog) => {
            for instruction in reconcile(team, catalog) {
                let index = instruction.index();
                let label = slot_label(team, index);
                match instruction {
                    SlotInstruction::Fill(_, character) => println!(
                        "  {:<12} {} ({}) {}",
                        label,
                        character.name,
                        character.id,
                        character.stars()
                    ),
                    SlotInstruction::Clear(_) => match team.slot(index) {
                        Some(id) => println!("  {:<12} - (unknown: {})", label, id),
                        None => println!("  {:<12} -", label),
                    },
                }
            }

            let stats = team_stats(team, catalog);
            if !stats.is_empty() {
                println!();
                for party in stats {
                    let attributes: Vec<String> = party
                        .attributes
                        .iter()
                        .map(|(attribute, count)| format!("{} x{}", attribute, count))
                        .collect();
                    let specialties: Vec<String> = party
                        .specialties
                        .iter()
                        .map(|(specialty, count)| format!("{} x{}", specialty, count))
                        .collect();
                    println!("  {}: {}", party.label, attributes.join(", "));
                    if !specialties.is_empty() {
                        println!("    Specialties: {}", specialties.join(", "));
                    }
                }
            }
        }
        None => {
            for (index, slot) in team.slots().iter().enumerate() {
                let label = slot_label(team, index);
                match slot {
                    Some(id) => println!("  {:<12} {}", label, id),
                    None => println!("  {:<12} -", label),
                }
            }
        }
    }
}

fn share_output(team: &Team, base: Option<&str>) -> Result<String> {
    Ok(match base {
        Some(base) => ShareLinkBuilder::new(base).build_url(team)?,
        None => codec::encode(team)?,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let catalog_path = cli.catalog.as_deref();

    match cli.command {
        Commands::Layout { mode } => {
            let mode = parse_mode(&mode)?;
            let layout = mode.layout();
            println!("Mode: {}", mode);
            println!("  Parties: {}", layout.party_count);
            println!("  Slots per party: {}", layout.slots_per_party);
            println!("  Total slots: {}", layout.total_slots);
            for party in 0..layout.party_count {
                let first = layout.slot_index(party, 0).unwrap_or_default();
                println!(
                    "  {}: slots {}-{}",
                    layout.party_label(party).unwrap_or(UNLABELED_PARTY),
                    first,
                    first + layout.slots_per_party - 1
                );
            }
        }

        Commands::Encode {
            mode,
            name,
            description,
            slots,
            base,
        } => {
            let mode = parse_mode(&mode)?;
            let total = mode.layout().total_slots;
            if slots.len() > total {
                anyhow::bail!(
                    "Too many slots for {}: got {}, the layout has {}",
                    mode,
                    slots.len(),
                    total
                );
            }

            let team = Team::from_slots(mode, slots.iter().map(|s| parse_slot(s)))
                .with_name(name)
                .with_description(description);

            if let Some(catalog) = load_catalog(catalog_path)? {
                for id in team.slots().iter().flatten() {
                    if !catalog.contains(id) {
                        tracing::warn!(id = %id, "Character is not in the catalog");
                    }
                }
            }

            println!("{}", share_output(&team, base.as_deref())?);
        }

        Commands::Decode { input } => {
            let team = parse_input(&input)?.context("No team code found in input")?;
            let catalog = load_catalog(catalog_path)?;
            print_summary(&team);
            print_slots(&team, catalog.as_ref());
        }

        Commands::Characters {
            search,
            attribute,
            damage_type,
            specialties,
            tags,
        } => {
            let catalog = require_catalog(catalog_path)?;

            let mut filter = CharacterFilter::new();
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            if let Some(name) = attribute {
                let attribute = Attribute::from_name(&name)
                    .with_context(|| format!("Unknown attribute '{}'", name))?;
                filter = filter.with_attribute(attribute);
            }
            if let Some(name) = damage_type {
                let damage_type = DamageType::from_name(&name)
                    .with_context(|| format!("Unknown damage type '{}'", name))?;
                filter = filter.with_damage_type(damage_type);
            }
            for specialty in specialties {
                filter = filter.with_specialty(specialty);
            }
            for tag in tags {
                filter = filter.with_tag(tag);
            }

            let matches = catalog.filter(&filter);
            if matches.is_empty() {
                println!("No characters found.");
            } else {
                println!("Characters ({}):", matches.len());
                println!();
                for character in matches {
                    println!(
                        "  {:<6} {:<20} {:<6} {}/{}",
                        character.id.as_str(),
                        character.name,
                        character.stars(),
                        character.attribute,
                        character.damage_type
                    );
                }
            }
        }

        Commands::Team { action } => {
            let store = open_store(&data_dir)?;

            match action {
                TeamAction::List => {
                    let records = store.list()?;
                    if records.is_empty() {
                        println!("No saved teams.");
                    } else {
                        println!("Saved teams ({}):", records.len());
                        println!();
                        for record in records {
                            println!(
                                "  {} {} [{}] {} characters",
                                record.id,
                                record.name(),
                                record.mode(),
                                record.team.filled_count()
                            );
                        }
                    }
                }

                TeamAction::Show { team_id } => {
                    let id = TeamId::new(team_id.as_str());
                    let record = store
                        .get(&id)?
                        .with_context(|| format!("Team not found: {}", team_id))?;
                    let catalog = load_catalog(catalog_path)?;

                    print_summary(&record.team);
                    println!("  ID: {}", record.id);
                    if let Some(saved) = record
                        .id
                        .as_millis()
                        .and_then(chrono::DateTime::from_timestamp_millis)
                    {
                        println!("  Saved: {}", saved.to_rfc3339());
                    }
                    print_slots(&record.team, catalog.as_ref());
                }

                TeamAction::Save {
                    name,
                    input,
                    description,
                } => {
                    let team = parse_input(&input)?.context("No team code found in input")?;
                    let record = store.create(&name, &description, &team)?;
                    println!("Saved team: {}", record.name());
                    println!("  ID: {}", record.id);
                }

                TeamAction::Rename {
                    team_id,
                    name,
                    description,
                } => {
                    let id = TeamId::new(team_id.as_str());
                    let description = match description {
                        Some(description) => description,
                        None => store
                            .get(&id)?
                            .with_context(|| format!("Team not found: {}", team_id))?
                            .description()
                            .to_string(),
                    };
                    let record = store.update(&id, &name, &description)?;
                    println!("Renamed team: {}", record.name());
                }

                TeamAction::Describe { team_id, text } => {
                    let id = TeamId::new(team_id.as_str());
                    if store.get(&id)?.is_none() {
                        anyhow::bail!("Team not found: {}", team_id);
                    }
                    if store.update_description(&id, &text)? {
                        println!("Saved description.");
                    } else {
                        println!("Description unchanged.");
                    }
                }

                TeamAction::Delete { team_id } => {
                    let id = TeamId::new(team_id.as_str());
                    if store.delete(&id)? {
                        println!("Deleted team: {}", team_id);
                    } else {
                        println!("No team with id {}", team_id);
                    }
                }

                TeamAction::Share { team_id, base } => {
                    let id = TeamId::new(team_id.as_str());
                    let record = store
                        .get(&id)?
                        .with_context(|| format!("Team not found: {}", team_id))?;
                    println!("{}", share_output(&record.team, base.as_deref())?);
                }
            }
        }

        Commands::Qr { text, output, size } => match output {
            Some(path) => {
                let svg = qr::render_svg(&text, size)?;
                std::fs::write(&path, svg)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote QR code to {}", path.display());
            }
            None => {
                print!("{}", qr::render_terminal(&text)?);
                println!();
            }
        },
    }

    Ok(())
}
