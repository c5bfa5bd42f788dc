use colored::*;
use std::collections::HashMap;
use tabled::{settings::Style, Table, Tabled};

use crate::analysis::builds::BuildSummary;
use crate::analysis::damage::DamageType;
use crate::analysis::defence::DefenceReport;
use crate::analysis::roles::Role;
use crate::analysis::starting::StartingSet;
use crate::store::catalog::Catalog;

#[derive(Tabled)]
struct BuildRow {
    champion: String,
    role: String,
    games: String,
    build: String,
}

#[derive(Tabled)]
struct DefenceRow {
    champion: String,
    role: String,
    #[tabled(rename = "vs")]
    versus: String,
    item: String,
    #[tabled(rename = "pick rate")]
    pick_rate: String,
}

#[derive(Tabled)]
struct StartingRow {
    champion: String,
    role: String,
    games: String,
    items: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_builds(
    catalog: &Catalog,
    builds: &HashMap<i32, HashMap<Role, BuildSummary>>,
    top_n: usize,
) {
    println!("\n{}", "🛒 REPRESENTATIVE BUILDS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut flat: Vec<(i32, Role, &BuildSummary)> = builds
        .iter()
        .flat_map(|(&champion_id, roles)| {
            roles
                .iter()
                .map(move |(&role, summary)| (champion_id, role, summary))
        })
        .collect();
    flat.sort_by(|a, b| b.2.games.cmp(&a.2.games).then(a.0.cmp(&b.0)));
    flat.truncate(top_n);

    if flat.is_empty() {
        println!("{}", "No builds aggregated (empty corpus?)".yellow());
        return;
    }

    let rows: Vec<BuildRow> = flat
        .into_iter()
        .map(|(champion_id, role, summary)| BuildRow {
            champion: catalog.champion_name(champion_id),
            role: role.to_string(),
            games: summary.games.to_string(),
            build: item_names(catalog, &summary.build),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_defence(catalog: &Catalog, report: &DefenceReport, top_n: usize) {
    println!("\n{}", "🛡️  DEFENSIVE COUNTER ITEMS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut rows: Vec<DefenceRow> = Vec::new();
    let mut champion_ids: Vec<i32> = report.keys().copied().collect();
    champion_ids.sort_unstable();

    'outer: for champion_id in champion_ids {
        for role in Role::ALL {
            let Some(by_damage) = report[&champion_id].get(&role) else {
                continue;
            };
            for damage in [DamageType::Ad, DamageType::Ap] {
                let Some(choices) = by_damage.get(&damage) else {
                    continue;
                };
                for choice in choices {
                    rows.push(DefenceRow {
                        champion: catalog.champion_name(champion_id),
                        role: role.to_string(),
                        versus: damage.to_string(),
                        item: catalog.item_name(choice.item_id),
                        pick_rate: format!("{:.1}%", choice.pick_rate),
                    });
                    if rows.len() >= top_n {
                        break 'outer;
                    }
                }
            }
        }
    }

    if rows.is_empty() {
        println!("{}", "No damage-specific defensive items found".yellow());
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_starting(
    catalog: &Catalog,
    report: &HashMap<i32, HashMap<Role, Vec<StartingSet>>>,
    top_n: usize,
) {
    println!("\n{}", "🏁 STARTING ITEMS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut flat: Vec<(i32, Role, &StartingSet)> = report
        .iter()
        .flat_map(|(&champion_id, roles)| {
            roles.iter().flat_map(move |(&role, sets)| {
                sets.iter().map(move |set| (champion_id, role, set))
            })
        })
        .collect();
    flat.sort_by(|a, b| b.2.games.cmp(&a.2.games).then(a.0.cmp(&b.0)));
    flat.truncate(top_n);

    if flat.is_empty() {
        println!("{}", "No opening purchases recorded".yellow());
        return;
    }

    let rows: Vec<StartingRow> = flat
        .into_iter()
        .map(|(champion_id, role, set)| StartingRow {
            champion: catalog.champion_name(champion_id),
            role: role.to_string(),
            games: set.games.to_string(),
            items: set
                .items
                .iter()
                .map(|item| {
                    if item.count > 1 {
                        format!("{} x{}", catalog.item_name(item.item_id), item.count)
                    } else {
                        catalog.item_name(item.item_id)
                    }
                })
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn item_names(catalog: &Catalog, items: &[u32]) -> String {
    items
        .iter()
        .map(|&id| catalog.item_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}
