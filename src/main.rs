mod analysis;
mod config;
mod display;
mod error;
mod export;
mod store;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;

use analysis::builds::{BuildTracker, Decoder};
use analysis::damage::DamageClassifier;
use analysis::defence::{self, DefenceTracker};
use analysis::events;
use analysis::normalizer::ItemNormalizer;
use analysis::roles::RoleClassifier;
use analysis::starting::{StartingTracker, STARTING_CUTOFF_MS};
use config::Config;
use display::output::{
    display_builds, display_defence, display_error, display_info, display_starting,
    display_success,
};
use export::Report;
use store::catalog::{self, Catalog};
use store::corpus::MatchStore;
use store::models::MatchDto;

#[derive(Parser, Debug)]
#[command(name = "League Builds")]
#[command(about = "Mine conventional item builds from a corpus of ranked matches", long_about = None)]
struct Args {
    /// Number of corpus chunks to fold in
    #[arg(short, long, default_value = "100")]
    chunks: usize,

    /// Matches per chunk file
    #[arg(long, default_value = "100")]
    chunk_size: usize,

    /// Aggregator used for the representative builds
    #[arg(short, long, value_enum, default_value = "merge")]
    decoder: Decoder,

    /// Rows shown per console table
    #[arg(short, long, default_value = "20")]
    top_n: usize,

    /// Corpus directory (overrides LEAGUE_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Region prefix of the chunk files (overrides LEAGUE_REGION)
    #[arg(short, long)]
    region: Option<String>,

    /// Local directory holding champion.json and item.json
    #[arg(long)]
    catalog_dir: Option<PathBuf>,

    /// Re-download the catalogs, ignoring the on-disk cache
    #[arg(long)]
    refresh: bool,

    /// Report directory (overrides LEAGUE_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

struct Trackers {
    builds: BuildTracker,
    starting: StartingTracker,
    defence: DefenceTracker,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(region) = args.region {
        config.region = region;
    }
    if args.catalog_dir.is_some() {
        config.catalog_dir = args.catalog_dir;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    display_info(&format!(
        "Mining builds from corpus {} in {}",
        config.region,
        config.data_dir.display()
    ));

    // Step 1: Catalogs
    display_info("Step 1: Loading champion and item catalogs...");
    let catalog = catalog::load_catalog(
        &config.catalog_version,
        config.catalog_dir.as_deref(),
        args.refresh,
    )
    .context("loading catalogs")?;
    let normalizer = ItemNormalizer::new(&catalog);
    display_success(&format!("Catalog version {}", config.catalog_version));

    // Step 2: Fold the corpus into the trackers
    display_info(&format!(
        "Step 2: Folding {} chunks of {} matches...",
        args.chunks, args.chunk_size
    ));
    let store = MatchStore::new(&config.data_dir, &config.region);
    let role_classifier = RoleClassifier::new();
    let damage_classifier = DamageClassifier::new();

    let mut trackers = Trackers {
        builds: BuildTracker::new(),
        starting: StartingTracker::new(),
        defence: DefenceTracker::new(),
    };

    let pb = ProgressBar::new(args.chunks as u64);
    pb.set_message("Folding matches");
    let mut total_matches = 0usize;

    for chunk in 0..args.chunks {
        let matches = store
            .load_chunk(chunk * args.chunk_size)
            .context("loading corpus chunk")?;

        for match_data in &matches {
            ingest(
                match_data,
                &catalog,
                &normalizer,
                &role_classifier,
                &damage_classifier,
                &mut trackers,
            );
        }

        total_matches += matches.len();
        pb.inc(1);
    }

    pb.finish_with_message("✓ Corpus folded");
    display_success(&format!("Folded {} matches", total_matches));

    // Step 3: Finalize the aggregates (runs once, after all folding)
    display_info("Step 3: Aggregating builds...");
    let build_report = trackers.builds.finalize(args.decoder);
    let starting_report = trackers.starting.finalize();
    let defence_report = trackers.defence.finalize();

    display_builds(&catalog, &build_report, args.top_n);
    display_starting(&catalog, &starting_report, args.top_n);
    display_defence(&catalog, &defence_report, args.top_n);

    // Step 4: Reports
    display_info("Step 4: Writing reports...");
    export::write_report(
        &config.output_dir.join("builds.json"),
        &Report::new(&config.region, &build_report),
    )
    .context("writing builds report")?;
    export::write_report(
        &config.output_dir.join("starting_items.json"),
        &Report::new(&config.region, &starting_report),
    )
    .context("writing starting items report")?;
    export::write_report(
        &config.output_dir.join("defence_items.json"),
        &Report::new(&config.region, &defence_report),
    )
    .context("writing defence items report")?;
    display_success(&format!("Reports written to {}", config.output_dir.display()));

    Ok(())
}

fn ingest(
    match_data: &MatchDto,
    catalog: &Catalog,
    normalizer: &ItemNormalizer,
    role_classifier: &RoleClassifier,
    damage_classifier: &DamageClassifier,
    trackers: &mut Trackers,
) {
    let roles = role_classifier.classify_match(match_data);

    let mut sequences = events::purchase_sequences(&match_data.timeline, normalizer);
    let mut openings = events::net_purchases(&match_data.timeline, Some(STARTING_CUTOFF_MS));

    for p in &match_data.participants {
        let Some(&role) = roles.get(&p.participant_id) else {
            continue;
        };

        let sequence = sequences.remove(&p.participant_id).unwrap_or_default();
        trackers.builds.add_sequence(p.champion_id, role, sequence);

        if let Some(opening) = openings.remove(&p.participant_id) {
            trackers.starting.add_participant(p.champion_id, role, &opening);
        }
    }

    // What the enemies of each damage profile ended the game holding.
    let damage_types = damage_classifier.classify_match(match_data);
    for (&team_id, &damage_type) in &damage_types {
        for p in match_data
            .participants
            .iter()
            .filter(|p| p.team_id != team_id)
        {
            let Some(&role) = roles.get(&p.participant_id) else {
                continue;
            };

            let defensive = p.stats.item_slots().into_iter().filter_map(|slot| {
                let item_id = normalizer.normalize(slot)?;
                let item = catalog.item(item_id)?;
                defence::is_defensive(item).then_some(item_id)
            });

            trackers
                .defence
                .add_participant(p.champion_id, role, damage_type, defensive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::roles::Role;
    use crate::store::catalog::Item;
    use crate::store::models::{
        EventDto, FrameDto, ParticipantDto, ParticipantStatsDto, TeamDto, TimelineDto,
        EVENT_ITEM_PURCHASED,
    };

    fn finished(id: u32, tags: &[&str]) -> Item {
        Item {
            id,
            name: format!("Item {}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            builds_from: Vec::new(),
            upgrades_into: Vec::new(),
            total_cost: 2600,
        }
    }

    fn purchase(participant_id: i32, item_id: u32) -> EventDto {
        EventDto {
            event_type: EVENT_ITEM_PURCHASED.to_string(),
            participant_id,
            item_id,
            ..Default::default()
        }
    }

    fn solo_match(log: &[u32]) -> MatchDto {
        MatchDto {
            participants: vec![
                ParticipantDto {
                    participant_id: 1,
                    champion_id: 22,
                    team_id: 100,
                    stats: ParticipantStatsDto {
                        minions_killed: 220,
                        physical_damage_dealt_to_champions: 30_000,
                        ..Default::default()
                    },
                },
                ParticipantDto {
                    participant_id: 2,
                    champion_id: 412,
                    team_id: 200,
                    stats: ParticipantStatsDto {
                        magic_damage_dealt_to_champions: 25_000,
                        ..Default::default()
                    },
                },
            ],
            teams: vec![TeamDto { team_id: 100 }, TeamDto { team_id: 200 }],
            timeline: TimelineDto {
                frames: vec![FrameDto {
                    timestamp: 300_000,
                    events: log.iter().map(|&item_id| purchase(1, item_id)).collect(),
                }],
            },
        }
    }

    #[test]
    fn a_clean_six_purchase_log_survives_the_whole_pipeline() {
        let log = [3031, 3072, 3142, 3812, 3156, 3026];
        let catalog = Catalog::new(
            Vec::new(),
            log.iter().map(|&id| finished(id, &["Damage"])).collect(),
        );
        let normalizer = ItemNormalizer::new(&catalog);
        let match_data = solo_match(&log);

        for decoder in [Decoder::Merge, Decoder::Markov] {
            let mut trackers = Trackers {
                builds: BuildTracker::new(),
                starting: StartingTracker::new(),
                defence: DefenceTracker::new(),
            };
            ingest(
                &match_data,
                &catalog,
                &normalizer,
                &RoleClassifier::new(),
                &DamageClassifier::new(),
                &mut trackers,
            );

            let builds = trackers.builds.finalize(decoder);
            let summary = &builds[&22][&Role::Carry];
            assert_eq!(summary.games, 1, "{:?}", decoder);
            assert_eq!(summary.build, log.to_vec(), "{:?}", decoder);
        }
    }

    fn versus_match(enemy_physical: u64, enemy_magic: u64, held_item: u32) -> MatchDto {
        let mut match_data = solo_match(&[]);
        match_data.participants[0].stats.item0 = held_item;
        match_data.participants[1]
            .stats
            .physical_damage_dealt_to_champions = enemy_physical;
        match_data.participants[1].stats.magic_damage_dealt_to_champions = enemy_magic;
        match_data
    }

    #[test]
    fn defensive_slots_land_in_the_enemy_damage_bucket() {
        use crate::analysis::damage::DamageType;

        let catalog = Catalog::new(
            Vec::new(),
            vec![finished(3065, &["SpellBlock", "Health"])],
        );
        let normalizer = ItemNormalizer::new(&catalog);

        // Magic resist held every game against ap, half the games against
        // mixed, never against ad: rates 100 > 50 > 0.
        let corpus = [
            versus_match(2_000, 25_000, 3065),
            versus_match(22_000, 22_000, 3065),
            versus_match(22_000, 22_000, 0),
            versus_match(25_000, 2_000, 0),
        ];

        let mut trackers = Trackers {
            builds: BuildTracker::new(),
            starting: StartingTracker::new(),
            defence: DefenceTracker::new(),
        };
        for match_data in &corpus {
            ingest(
                match_data,
                &catalog,
                &normalizer,
                &RoleClassifier::new(),
                &DamageClassifier::new(),
                &mut trackers,
            );
        }

        let report = trackers.defence.finalize();
        let kept = &report[&22][&Role::Carry][&DamageType::Ap];
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].item_id, 3065);
        assert!((kept[0].pick_rate - 100.0).abs() < 1e-9);
    }
}
