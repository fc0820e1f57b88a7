use crate::item::Item;
use crate::output::is_quiet;
use crate::ui::{theme, Icons, Theme};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::BOX, text.style(theme().header.clone()));
}

pub fn banner(title: &str, subtitle: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("  {}", title);
    println!("  {}", subtitle.style(theme().dim.clone()));
    println!();
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Print one item in its canonical single-line form
pub fn item_line(item: &Item) {
    println!("{}", styled_item_line(item, theme()));
}

/// Canonical item line, dimmed in red once nothing is left in stock
pub fn styled_item_line(item: &Item, theme: &Theme) -> String {
    let line = item.to_string();
    if item.quantity > 0 {
        return line;
    }
    line.style(theme.out_of_stock.clone()).to_string()
}
