//! Executable commands.

use std::path::Path;

use anyhow::{Context, Result};
use cds_core::{ExecutablePatcher, HireStatus};

use crate::cli::ExeCommand;
use crate::cli_utils::{Settings, print_json};

pub fn run(settings: &Settings, path: &Path, command: ExeCommand) -> Result<()> {
    let mut patcher = ExecutablePatcher::new(path, settings.backup_policy())
        .with_context(|| format!("Failed to open {}", path.display()))?;

    match command {
        ExeCommand::Status { json } => status(&patcher, json),
        ExeCommand::Apply => {
            let count = patcher.apply_all()?;
            println!("Applied {} patch(es)", count);
            Ok(())
        }
        ExeCommand::Restore => {
            let count = patcher.restore_all()?;
            println!("Restored {} patch(es)", count);
            Ok(())
        }
        ExeCommand::RestoreBackup => {
            patcher.restore_from_backup()?;
            println!("Restored {} from backup", path.display());
            Ok(())
        }
        ExeCommand::Roster { json } => roster(&patcher, json),
        ExeCommand::SetHireStatus { record, status } => {
            let status = HireStatus::from(status);
            patcher.set_hire_status(record, status)?;
            println!("Roster {} -> {}", record, status);
            Ok(())
        }
        ExeCommand::SetAppearYear { record, year } => {
            patcher.set_appear_year(record, year)?;
            println!("Roster {} appears: {}", record, year);
            Ok(())
        }
        ExeCommand::SetAppearCondition { record, value } => {
            patcher.set_appear_condition(record, value)?;
            println!("Roster {} appear condition -> {}", record, value);
            Ok(())
        }
        ExeCommand::SetBirthYear { record, year } => {
            patcher.set_birth_year(record, year)?;
            println!("Roster {} born -> {}", record, year);
            Ok(())
        }
        ExeCommand::LongRest { set, restore } => {
            if let Some(months) = set {
                patcher.set_long_rest_limit(months)?;
            } else if restore {
                patcher.restore_long_rest_limit()?;
            }
            println!("Long-rest limit: {} months", patcher.long_rest_limit()?);
            Ok(())
        }
    }
}

fn status(patcher: &ExecutablePatcher, json: bool) -> Result<()> {
    let report = patcher.report()?;
    if json {
        return print_json(&report);
    }

    println!("File: {}", report.path.display());
    for site in &report.sites {
        let offset = site
            .offset
            .map_or_else(|| "?".to_string(), |o| format!("0x{:06X}", o));
        match (&site.state, &site.current) {
            (Some(state), Some(current)) => println!(
                "  {:<10} {:<9} {:<32} [{}]",
                offset,
                state.label(),
                site.description,
                current
            ),
            _ => println!(
                "  {:<10} {:<9} {:<32} {}",
                offset,
                "error",
                site.description,
                site.error.as_deref().unwrap_or_default()
            ),
        }
    }
    println!("{}/{} patched", report.patched, report.total());
    if let Some(limit) = report.long_rest_limit {
        println!("Long-rest limit: {} months", limit);
    }
    Ok(())
}

fn roster(patcher: &ExecutablePatcher, json: bool) -> Result<()> {
    let roster = patcher.roster()?;
    if json {
        return print_json(&roster);
    }

    println!(
        "{:>3}  {:<24} {:>6} {:<7} {:>4} {:>5} {:<23} {:<10}",
        "#", "Name", "Appear", "Gender", "Cond", "Born", "Stats", "Status"
    );
    for entry in &roster {
        let status = entry.hire_status().map_or("?", |s| s.label());
        println!(
            "{:>3}  {:<24} {:>6} {:<7} {:>4} {:>5} {:<23} {:<10}",
            entry.index,
            entry.name,
            entry.appear_year.to_string(),
            entry.gender.to_string(),
            entry.appear_condition,
            entry.birth_year,
            entry.stats.to_string(),
            status
        );
    }
    println!(
        "{} characters, {} talk only",
        roster.len(),
        roster
            .iter()
            .filter(|e| e.hire_status() == Some(HireStatus::TalkOnly))
            .count()
    );
    Ok(())
}
