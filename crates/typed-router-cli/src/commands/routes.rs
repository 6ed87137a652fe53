use anyhow::Result;
use colored::Colorize;
use typed_router::contract::derive;
use typed_router::{ParamContract, ParamKind};

use super::load_tree;
use crate::config::Config;

pub fn execute(config: &Config) -> Result<()> {
    let tree = load_tree(config)?;
    let contracts = derive(&tree);

    println!(
        "{} {}",
        "Routes in".green().bold(),
        config.routing.app_dir.cyan()
    );
    println!();

    for (_, pattern) in tree.routes() {
        let pathname = pattern.pathname();
        let params = contracts
            .get(&pathname)
            .map(describe)
            .unwrap_or_default();

        print!("  {}", pathname.bold());
        if pattern.declared() != pathname {
            print!("  {}", pattern.declared().dimmed());
        }
        if !params.is_empty() {
            print!("  {}", params.yellow());
        }
        println!();
    }

    println!();
    println!("{} route(s)", tree.len());
    Ok(())
}

/// `{ color: string, slug?: string[] }`
pub fn describe(contract: &ParamContract) -> String {
    if contract.is_empty() {
        return String::new();
    }

    let fields: Vec<String> = contract
        .params
        .iter()
        .map(|spec| {
            let ty = match spec.kind {
                ParamKind::Single => "string",
                ParamKind::CatchAllArray => "string[]",
            };
            let marker = if spec.optional { "?" } else { "" };
            format!("{}{marker}: {ty}", spec.name)
        })
        .collect();

    format!("{{ {} }}", fields.join(", "))
}
