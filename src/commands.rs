use crate::{Commands, OutputMode, emit_success};
use owo_colors::OwoColorize;
use std::path::Path;
use stockpile::config::{self, StockpileConfig};
use stockpile::shell::Shell;
use stockpile::ui::{self, Icons, banner, info, section, success, warn};
use stockpile::{Inventory, Item};

/// Dispatch a command that needs an open inventory
pub fn run(inventory: &mut Inventory, command: Commands, output_mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Shell => run_shell(inventory),
        Commands::Add { id, name, quantity, price } => {
            run_add(inventory, Item::new(id, name, quantity, price), output_mode)
        }
        Commands::Remove { id } => run_remove(inventory, id, output_mode),
        Commands::SetQuantity { id, quantity } => run_set_quantity(inventory, id, quantity, output_mode),
        Commands::SetPrice { id, price } => run_set_price(inventory, id, price, output_mode),
        Commands::Search { text } => run_search(inventory, &text, output_mode),
        Commands::List => run_list(inventory, output_mode),
        Commands::Get { id } => run_get(inventory, id, output_mode),
        Commands::Stats => run_stats(inventory, output_mode),
        Commands::Init { .. } | Commands::Version => {
            anyhow::bail!("command does not operate on an inventory")
        }
    }
}

pub fn run_shell(inventory: &mut Inventory) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(inventory, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

pub fn run_add(inventory: &mut Inventory, item: Item, output_mode: OutputMode) -> anyhow::Result<()> {
    let id = item.id;
    let data = serde_json::to_value(&item)?;
    if !inventory.add(item)? {
        warn(&format!("An item with id {} already exists", id));
        anyhow::bail!("duplicate item id {}", id);
    }

    if output_mode.is_human() {
        success(&format!("Added item {}", id));
    }
    emit_success(output_mode, "add", data)
}

pub fn run_remove(inventory: &mut Inventory, id: i64, output_mode: OutputMode) -> anyhow::Result<()> {
    if !inventory.remove_by_id(id)? {
        warn(&format!("No item with id {}", id));
        anyhow::bail!("item {} not found", id);
    }

    if output_mode.is_human() {
        success(&format!("{} Removed item {}", Icons::DEL, id));
    }
    emit_success(output_mode, "remove", serde_json::json!({ "id": id }))
}

pub fn run_set_quantity(
    inventory: &mut Inventory,
    id: i64,
    quantity: i64,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    if !inventory.update_quantity(id, quantity)? {
        warn(&format!("No item with id {}", id));
        anyhow::bail!("item {} not found", id);
    }
    report_updated(inventory, id, "set-quantity", output_mode)
}

pub fn run_set_price(inventory: &mut Inventory, id: i64, price: f64, output_mode: OutputMode) -> anyhow::Result<()> {
    if !inventory.update_price(id, price)? {
        warn(&format!("No item with id {}", id));
        anyhow::bail!("item {} not found", id);
    }
    report_updated(inventory, id, "set-price", output_mode)
}

fn report_updated(inventory: &Inventory, id: i64, command: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let Some(item) = inventory.get_by_id(id) else {
        anyhow::bail!("item {} vanished after update", id);
    };

    if output_mode.is_human() {
        success(&format!("{} Updated item {}", Icons::MOD, id));
        ui::item_line(item);
    }
    emit_success(output_mode, command, serde_json::to_value(item)?)
}

pub fn run_search(inventory: &Inventory, text: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let results = sorted_by_id(inventory.search_by_name(text));

    if output_mode.is_human() {
        if results.is_empty() {
            println!("{} No items match '{}'.", Icons::EMPTY, text);
        } else {
            info(&format!("{} Matches for '{}'", Icons::SEARCH, text), &results.len().to_string());
            println!("{}", ui::items_table(&results));
        }
    }
    emit_success(output_mode, "search", serde_json::to_value(&results)?)
}

pub fn run_list(inventory: &Inventory, output_mode: OutputMode) -> anyhow::Result<()> {
    let items = sorted_by_id(inventory.list_all());

    if output_mode.is_human() {
        if items.is_empty() {
            println!("{} Inventory is empty.", Icons::EMPTY);
        } else {
            info("Total items", &items.len().to_string());
            println!("{}", ui::items_table(&items));
        }
    }
    emit_success(output_mode, "list", serde_json::to_value(&items)?)
}

pub fn run_get(inventory: &Inventory, id: i64, output_mode: OutputMode) -> anyhow::Result<()> {
    let Some(item) = inventory.get_by_id(id) else {
        warn(&format!("No item with id {}", id));
        anyhow::bail!("item {} not found", id);
    };

    if output_mode.is_human() {
        ui::item_line(item);
    }
    emit_success(output_mode, "get", serde_json::to_value(item)?)
}

pub fn run_stats(inventory: &Inventory, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = inventory.stats();

    if output_mode.is_human() {
        ui::header(&format!("{} Stockpile Statistics", Icons::STATS));
        info(&format!("{} Database", Icons::DATABASE), inventory.location());
        let items = stats.items.to_string();
        let units = stats.total_units.to_string();
        let value = format!("{:.2}", stats.total_value);
        println!("{}", ui::stats_table(&[("Items", items.as_str()), ("Units", units.as_str()), ("Stock value", value.as_str())]));
    }
    emit_success(output_mode, "stats", serde_json::to_value(&stats)?)
}

pub fn run_init(path: &Path, new_config: &StockpileConfig, force: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    config::write_config(path, new_config, force)?;

    if output_mode.is_human() {
        success(&format!("{} Wrote {}", Icons::NEW, path.display()));
        if let Some(database) = &new_config.database {
            ui::summary_row("database =", database);
        }
    }
    emit_success(output_mode, "init", serde_json::to_value(new_config)?)
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        banner(
            &format!("{}", "Stockpile".bold().style(ui::theme().info.clone())),
            &format!("Version {}", env!("CARGO_PKG_VERSION").bold()),
        );
        section("Storage");
        ui::summary_row("default database:", config::DEFAULT_DATABASE);
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}

/// Display order for one-shot listings; the core returns map order
fn sorted_by_id(mut items: Vec<&Item>) -> Vec<&Item> {
    items.sort_by_key(|item| item.id);
    items
}
