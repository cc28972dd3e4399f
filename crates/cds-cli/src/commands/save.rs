//! Save file commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use cds_core::save::CrewRole;
use cds_core::{CityTable, HireStatus, SaveEditor, SaveFile, SaveGameInfo, SkillKind};
use serde::Serialize;

use crate::cli::SaveCommand;
use crate::cli_utils::{Settings, print_json};

pub fn run(settings: &Settings, path: &Path, command: SaveCommand) -> Result<()> {
    match command {
        SaveCommand::Info { json } => info(path, json),
        SaveCommand::Characters {
            cities,
            hirable,
            json,
        } => characters(path, &settings.cities(cities)?, hirable, json),
        SaveCommand::Player { cities, json } => player(path, &settings.cities(cities)?, json),
        SaveCommand::Hints { discovered, json } => hints(path, discovered, json),
        SaveCommand::SetHireStatus { index, status } => {
            let status = HireStatus::from(status);
            let mut editor = SaveEditor::open(path, settings.backup_policy())?;
            editor.set_hire_status(index, status)?;
            println!("Character {} -> {}", index, status);
            Ok(())
        }
        SaveCommand::SetFame { index, fame } => {
            let mut editor = SaveEditor::open(path, settings.backup_policy())?;
            editor.set_fame(index, fame)?;
            println!("Character {} fame -> {}", index, fame);
            Ok(())
        }
        SaveCommand::SetAge { index, age } => {
            let mut editor = SaveEditor::open(path, settings.backup_policy())?;
            editor.set_age(index, age)?;
            println!("Character {} age -> {}", index, age);
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<SaveGameInfo> {
    SaveFile::load(path).with_context(|| format!("Failed to read save file {}", path.display()))
}

#[derive(Serialize)]
struct SaveSummary<'a> {
    path: &'a Path,
    date: String,
    player: Option<String>,
    characters: usize,
    hirable: usize,
    hints: usize,
    discovered: usize,
}

fn info(path: &Path, json: bool) -> Result<()> {
    let info = load(path)?;
    let summary = SaveSummary {
        path,
        date: info.header.to_string(),
        player: info.player.as_ref().map(|p| p.full_name()),
        characters: info.characters.len(),
        hirable: info.characters.iter().filter(|c| c.is_hirable()).count(),
        hints: info.hints.len(),
        discovered: info.hints.iter().filter(|h| h.is_discovered()).count(),
    };

    if json {
        return print_json(&summary);
    }

    println!("File:        {}", summary.path.display());
    println!("Date:        {}", summary.date);
    if let Some(name) = &summary.player {
        println!("Player:      {}", name);
    }
    println!(
        "Characters:  {} ({} hirable)",
        summary.characters, summary.hirable
    );
    println!("Hints:       {}/{} discovered", summary.discovered, summary.hints);
    Ok(())
}

fn characters(path: &Path, cities: &CityTable, hirable_only: bool, json: bool) -> Result<()> {
    let info = load(path)?;
    let characters: Vec<_> = info
        .characters
        .iter()
        .filter(|c| !hirable_only || c.is_hirable())
        .collect();

    if json {
        return print_json(&characters);
    }

    println!(
        "{:>4}  {:<20} {:>3} {:>3} {:>3} {:>3} {:>3} {:>5} {:>4}  {:<10} {:<12} Skills",
        "#", "Name", "HP", "INT", "STR", "CHM", "LCK", "Fame", "Age", "Status", "Location"
    );
    for c in &characters {
        let status = c.hire_status().map_or("?", |s| s.label());
        let gray = if c.is_gray() { "*" } else { "" };
        println!(
            "{:>4}  {:<20} {:>3} {:>3} {:>3} {:>3} {:>3} {:>5} {:>3}{:<1}  {:<10} {:<12} {} | {}",
            c.index,
            c.name,
            c.hp,
            c.intelligence,
            c.strength,
            c.charm,
            c.luck,
            c.fame,
            c.age,
            gray,
            status,
            c.location.display_name(cities),
            c.skill_summary(SkillKind::Profession),
            c.skill_summary(SkillKind::Language),
        );
    }
    println!("{} characters", characters.len());
    Ok(())
}

fn player(path: &Path, cities: &CityTable, json: bool) -> Result<()> {
    let info = load(path)?;
    let Some(player) = info.player else {
        bail!("{} is too short to contain a player record", path.display());
    };

    if json {
        return print_json(&player);
    }

    println!("Name:       {}", player.full_name());
    println!("Fame:       {}", player.fame);
    println!("Notoriety:  {}", player.notoriety);
    println!("City:       {}", player.current_city.display_name(cities));

    for kind in [SkillKind::Profession, SkillKind::Language] {
        let learned: Vec<_> = player
            .skills(kind)
            .into_iter()
            .filter(|(_, level)| *level > 0)
            .map(|(name, level)| format!("{}:{}", name, level))
            .collect();
        let label: &'static str = kind.into();
        println!("{:<11} {}", format!("{}:", label), learned.join(" "));
    }

    println!("Crew:");
    for role in [
        CrewRole::Adjutant,
        CrewRole::Navigator,
        CrewRole::Surveyor,
        CrewRole::Interpreter,
    ] {
        let name = player
            .crew
            .get(role)
            .map_or("-", |member| member.character.name.as_str());
        println!("  {:<12} {}", role.label(), name);
    }
    Ok(())
}

fn hints(path: &Path, discovered_only: bool, json: bool) -> Result<()> {
    let info = load(path)?;
    let hints: Vec<_> = info
        .hints
        .iter()
        .filter(|h| !discovered_only || h.is_discovered())
        .collect();

    if json {
        return print_json(&hints);
    }

    for hint in &hints {
        println!("{:>3}  0x{:02X}  {}", hint.index, hint.value, hint.status());
    }
    println!("{} hints", hints.len());
    Ok(())
}
