// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::company_of;
use crate::models::{CategoryType, CostClassification, MarkupType};
use crate::utils::{id_for_category, load_categories, maybe_print_json, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let category_type = CategoryType::parse(sub.get_one::<String>("type").unwrap().trim())?;
    let classification = sub
        .get_one::<String>("classification")
        .map(|s| CostClassification::parse(s.trim()))
        .transpose()?;
    let markup_type = sub
        .get_one::<String>("markup-type")
        .map(|s| MarkupType::parse(s.trim()))
        .transpose()?;
    if classification.is_some()
        && !matches!(category_type, CategoryType::Cost | CategoryType::Expense)
    {
        bail!(
            "A fixed/variable classification only applies to cost or expense categories, not {}",
            category_type.as_str()
        );
    }
    let parent_id = sub
        .get_one::<String>("parent")
        .map(|p| id_for_category(conn, company_id, p.trim()))
        .transpose()?;

    conn.execute(
        "INSERT INTO dre_categories(company_id, name, category_type, cost_classification, markup_type, parent_id)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            company_id,
            name,
            category_type.as_str(),
            classification.map(|c| c.as_str()),
            markup_type.map(|m| m.as_str()),
            parent_id
        ],
    )?;
    println!("Added category '{}' ({})", name, category_type.as_str());
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let categories = load_categories(conn, company_id)?;
    if maybe_print_json(json_flag, jsonl_flag, &categories)? {
        return Ok(());
    }
    let rows = categories
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.category_type.as_str().to_string(),
                c.cost_classification
                    .map(|cl| cl.as_str().to_string())
                    .unwrap_or_default(),
                c.markup_type
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                if c.is_active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Type", "Classification", "Markup", "Active"],
            rows
        )
    );
    Ok(())
}
