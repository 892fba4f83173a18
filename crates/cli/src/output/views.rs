//! Human-readable views of portfolio payloads.
//!
//! Detail payloads are loosely structured JSON, so every field is read
//! defensively: missing names show as placeholders and missing amounts as 0.

use super::format::{display_value, format_currency, format_number, is_truthy, title_case};
use super::table::{Align, Cell, Table};
use super::tree::Node;
use super::{bold, dimmed, fg, print_json};
use kubera_rest::PortfolioSummary;
use serde_json::Value;
use std::collections::HashSet;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

const DEFAULT_CURRENCY: &str = "USD";
const TREE_SHEET_LIMIT: usize = 5;
const TREE_ITEM_LIMIT: usize = 10;

/// Items under a category key, accepting the plural spelling as well.
pub fn category_items<'a>(portfolio: &'a Value, key: &str, alt_key: &str) -> &'a [Value] {
    portfolio
        .get(key)
        .or_else(|| portfolio.get(alt_key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn str_field<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// `item[field].amount`, if present and numeric.
fn amount(item: &Value, field: &str) -> Option<f64> {
    item.get(field)?.get("amount")?.as_f64()
}

fn value_currency(item: &Value) -> &str {
    item.get("value")
        .map_or(DEFAULT_CURRENCY, |v| str_field(v, "currency", DEFAULT_CURRENCY))
}

fn portfolio_currency(portfolio: &Value) -> &str {
    str_field(portfolio, "currency", DEFAULT_CURRENCY)
}

/// Group items by a string field, keeping first-seen order.
fn group_by<'a>(items: impl IntoIterator<Item = &'a Value>, key: &str) -> Vec<(String, Vec<&'a Value>)> {
    let mut groups: Vec<(String, Vec<&'a Value>)> = Vec::new();
    for item in items {
        let name = str_field(item, key, "Other");
        match groups.iter_mut().find(|(group, _)| group.as_str() == name) {
            Some((_, members)) => members.push(item),
            None => groups.push((name.to_string(), vec![item])),
        }
    }
    groups
}

fn sum_amounts<'a>(items: impl IntoIterator<Item = &'a &'a Value>, field: &str) -> f64 {
    items
        .into_iter()
        .filter_map(|item| amount(item, field))
        .sum()
}

fn gain_style(gain: f64) -> (ColorSpec, &'static str) {
    if gain >= 0.0 {
        (fg(Color::Green), "+")
    } else {
        (fg(Color::Red), "")
    }
}

/// Portfolio list as a numbered table.
pub fn print_portfolios(
    w: &mut dyn WriteColor,
    portfolios: &[PortfolioSummary],
    raw: bool,
) -> io::Result<()> {
    if raw {
        return print_json(w, &portfolios);
    }

    if portfolios.is_empty() {
        w.set_color(&fg(Color::Yellow))?;
        writeln!(w, "No portfolios found.")?;
        return w.reset();
    }

    w.set_color(&bold())?;
    writeln!(w, "Portfolios ({})", portfolios.len())?;
    w.reset()?;

    let mut table = Table::new()
        .column("#", Align::Right, fg(Color::Magenta))
        .column("Name", Align::Left, fg(Color::Green))
        .column("Currency", Align::Left, fg(Color::Yellow))
        .column("ID", Align::Left, dimmed(Color::Cyan));

    for (idx, portfolio) in portfolios.iter().enumerate() {
        table.row(vec![
            (idx + 1).to_string().into(),
            or_na(portfolio.name()).into(),
            or_na(portfolio.currency()).into(),
            or_na(portfolio.id()).into(),
        ]);
    }
    table.render(w)?;

    w.set_color(&dimmed(Color::White))?;
    writeln!(
        w,
        "\nTip: Use the index number (e.g., 'kubera show 1') instead of the full ID"
    )?;
    w.reset()
}

fn or_na(text: Option<&str>) -> &str {
    match text {
        Some(text) if !text.is_empty() => text,
        _ => "N/A",
    }
}

/// Portfolio overview: net worth and per-sheet totals, no individual items.
pub fn print_portfolio(w: &mut dyn WriteColor, portfolio: &Value, raw: bool) -> io::Result<()> {
    if raw {
        return print_json(w, portfolio);
    }

    let currency = portfolio_currency(portfolio);

    writeln!(w)?;
    let mut title = fg(Color::Cyan);
    title.set_bold(true);
    w.set_color(&title)?;
    writeln!(w, "{}", str_field(portfolio, "name", "Portfolio"))?;
    w.set_color(&dimmed(Color::White))?;
    writeln!(w, "ID: {}", str_field(portfolio, "id", "N/A"))?;
    w.reset()?;

    if let Some(net_worth) = portfolio.get("netWorth").and_then(Value::as_f64) {
        writeln!(w)?;
        let mut label = fg(Color::Green);
        label.set_bold(true);
        w.set_color(&label)?;
        write!(w, "Net Worth:")?;
        w.reset()?;
        writeln!(w, " {}", format_currency(Some(net_worth), currency))?;
    }

    let assets = category_items(portfolio, "asset", "assets");
    if !assets.is_empty() {
        let total = portfolio.get("assetTotal").and_then(Value::as_f64);
        category_heading(w, "Assets", assets.len(), total, currency)?;
        sheet_totals_table(assets, Color::Green).render(w)?;
    }

    let debts = category_items(portfolio, "debt", "debts");
    if !debts.is_empty() {
        let total = portfolio.get("debtTotal").and_then(Value::as_f64);
        category_heading(w, "Debts", debts.len(), total, currency)?;
        sheet_totals_table(debts, Color::Red).render(w)?;
    }

    let insurance = category_items(portfolio, "insurance", "insurance");
    if !insurance.is_empty() {
        let total: f64 = insurance.iter().filter_map(|i| amount(i, "value")).sum();
        let total = (total != 0.0).then_some(total);
        category_heading(w, "Insurance", insurance.len(), total, currency)?;

        if group_by(insurance, "sheetName").len() > 1 {
            sheet_totals_table(insurance, Color::Blue).render(w)?;
        }
    }

    let documents = category_items(portfolio, "document", "documents");
    if !documents.is_empty() {
        writeln!(w)?;
        w.set_color(&bold())?;
        write!(w, "Documents:")?;
        w.reset()?;
        writeln!(w, " {} documents", documents.len())?;
    }

    writeln!(w)
}

fn category_heading(
    w: &mut dyn WriteColor,
    label: &str,
    count: usize,
    total: Option<f64>,
    currency: &str,
) -> io::Result<()> {
    let total = total
        .map(|t| format!(" - Total: {}", format_currency(Some(t), currency)))
        .unwrap_or_default();

    writeln!(w)?;
    w.set_color(&bold())?;
    writeln!(w, "{label} ({count} items){total}")?;
    w.reset()
}

fn sheet_totals_table(items: &[Value], total_color: Color) -> Table {
    let mut table = Table::new()
        .column("Sheet", Align::Left, fg(Color::Cyan))
        .column("Items", Align::Right, ColorSpec::new())
        .column("Total Value", Align::Right, fg(total_color));

    for (sheet, members) in group_by(items, "sheetName") {
        let total = sum_amounts(&members, "value");
        let currency = value_currency(members[0]);
        table.row(vec![
            sheet.into(),
            members.len().to_string().into(),
            format_currency(Some(total), currency).into(),
        ]);
    }
    table
}

/// Tree of categories, sheets and items, truncated to keep it readable.
pub fn print_asset_tree(w: &mut dyn WriteColor, portfolio: &Value) -> io::Result<()> {
    let currency = portfolio_currency(portfolio);
    let net_worth = portfolio
        .get("netWorth")
        .and_then(Value::as_f64)
        .map(|n| format!(" - Net Worth: {}", format_currency(Some(n), currency)))
        .unwrap_or_default();

    let mut root = Node::new(
        format!("{}{net_worth}", str_field(portfolio, "name", "Portfolio")),
        bold(),
    );

    let assets = category_items(portfolio, "asset", "assets");
    if !assets.is_empty() {
        let total = portfolio
            .get("assetTotal")
            .and_then(Value::as_f64)
            .map(|t| format!(" - Total: {}", format_currency(Some(t), currency)))
            .unwrap_or_default();
        let branch = root.add(Node::new(
            format!("Assets ({}){total}", assets.len()),
            fg(Color::Cyan),
        ));

        let sheets = group_by(assets, "sheetName");
        for (sheet, members) in sheets.iter().take(TREE_SHEET_LIMIT) {
            let sheet_branch = branch.add(Node::new(sheet.as_str(), fg(Color::Yellow)));
            add_items(sheet_branch, members.iter().copied());
        }
        if sheets.len() > TREE_SHEET_LIMIT {
            branch.add(Node::new(
                format!("... {} more categories", sheets.len() - TREE_SHEET_LIMIT),
                dimmed(Color::White),
            ));
        }
    }

    let debts = category_items(portfolio, "debt", "debts");
    if !debts.is_empty() {
        let total = portfolio
            .get("debtTotal")
            .and_then(Value::as_f64)
            .map(|t| format!(" - Total: {}", format_currency(Some(t), currency)))
            .unwrap_or_default();
        let branch = root.add(Node::new(
            format!("Debts ({}){total}", debts.len()),
            fg(Color::Red),
        ));
        add_items(branch, debts.iter());
    }

    let insurance = category_items(portfolio, "insurance", "insurance");
    if !insurance.is_empty() {
        let branch = root.add(Node::new(
            format!("Insurance ({})", insurance.len()),
            fg(Color::Blue),
        ));
        add_items(branch, insurance.iter());
    }

    root.render(w)
}

fn add_items<'a>(branch: &mut Node, items: impl ExactSizeIterator<Item = &'a Value>) {
    let count = items.len();
    for item in items.take(TREE_ITEM_LIMIT) {
        let value = format_currency(amount(item, "value"), value_currency(item));
        branch.add(Node::new(
            format!("{}: {value}", str_field(item, "name", "Unknown")),
            ColorSpec::new(),
        ));
    }
    if count > TREE_ITEM_LIMIT {
        branch.add(Node::new(
            format!("... {} more", count - TREE_ITEM_LIMIT),
            dimmed(Color::White),
        ));
    }
}

/// A single asset or debt, as returned by an update.
pub fn print_item(w: &mut dyn WriteColor, item: &Value, raw: bool) -> io::Result<()> {
    if raw {
        return print_json(w, item);
    }

    writeln!(w)?;
    let mut title = fg(Color::Cyan);
    title.set_bold(true);
    w.set_color(&title)?;
    writeln!(w, "{}", str_field(item, "name", "Item"))?;
    w.set_color(&dimmed(Color::White))?;
    writeln!(w, "ID: {}", str_field(item, "id", "N/A"))?;
    w.reset()?;

    if let Some(value) = item.get("value") {
        let currency = str_field(value, "currency", "");
        labelled(w, "Value", &format_currency(amount(item, "value"), currency))?;
    }

    if let Some(cost) = item.get("cost").filter(|c| is_truthy(c)) {
        let currency = str_field(cost, "currency", "");
        labelled(w, "Cost", &format_currency(amount(item, "cost"), currency))?;
    }

    for (key, label) in [
        ("description", "Description"),
        ("ticker", "Ticker"),
        ("quantity", "Quantity"),
    ] {
        if let Some(field) = item.get(key).filter(|f| is_truthy(f)) {
            labelled(w, label, &display_value(field))?;
        }
    }

    writeln!(w)
}

fn labelled(w: &mut dyn WriteColor, label: &str, text: &str) -> io::Result<()> {
    w.set_color(&bold())?;
    write!(w, "{label}:")?;
    w.reset()?;
    writeln!(w, " {text}")
}

/// Every item of one sheet, grouped by section, with cost basis and gains.
///
/// Items referenced as another item's `parent` are aggregates of their
/// children; they are left out of the listing and of every total.
pub fn print_sheet_detail(
    w: &mut dyn WriteColor,
    items: &[&Value],
    sheet_name: &str,
    category: &str,
    portfolio_name: &str,
    raw: bool,
) -> io::Result<()> {
    if raw {
        return print_json(w, &items);
    }

    writeln!(w)?;
    let mut title = fg(Color::Cyan);
    title.set_bold(true);
    w.set_color(&title)?;
    writeln!(w, "{portfolio_name}")?;
    w.set_color(&bold())?;
    writeln!(w, "{}: {sheet_name}", title_case(category))?;
    w.reset()?;

    let parent_ids: HashSet<&str> = items
        .iter()
        .filter_map(|item| item.get("parent")?.get("id")?.as_str())
        .collect();
    let leaves: Vec<&Value> = items
        .iter()
        .copied()
        .filter(|item| {
            item.get("id")
                .and_then(Value::as_str)
                .map_or(true, |id| !parent_ids.contains(id))
        })
        .collect();

    let total_value = sum_amounts(&leaves, "value");
    let total_cost = sum_amounts(&leaves, "cost");

    writeln!(w)?;
    labelled_inline(w, "Total Value", &format_currency(Some(total_value), DEFAULT_CURRENCY))?;
    if total_cost > 0.0 {
        let gain = total_value - total_cost;
        let (style, sign) = gain_style(gain);
        write!(w, " | ")?;
        labelled_inline(w, "Cost Basis", &format_currency(Some(total_cost), DEFAULT_CURRENCY))?;
        write!(w, " | ")?;
        w.set_color(&style)?;
        write!(
            w,
            "Gain: {sign}{} ({sign}{:.2}%)",
            format_currency(Some(gain), DEFAULT_CURRENCY),
            gain / total_cost * 100.0
        )?;
        w.reset()?;
    }
    writeln!(w)?;

    let sections = group_by(leaves.iter().copied(), "sectionName");

    w.set_color(&dimmed(Color::White))?;
    writeln!(
        w,
        "\nTotal Items: {} across {} section(s)",
        leaves.len(),
        sections.len()
    )?;
    w.reset()?;

    for (section, members) in &sections {
        print_section(w, section, members)?;
    }

    writeln!(w)
}

fn labelled_inline(w: &mut dyn WriteColor, label: &str, text: &str) -> io::Result<()> {
    w.set_color(&bold())?;
    write!(w, "{label}:")?;
    w.reset()?;
    write!(w, " {text}")
}

fn print_section(w: &mut dyn WriteColor, section: &str, members: &[&Value]) -> io::Result<()> {
    let value = sum_amounts(members, "value");
    let cost = sum_amounts(members, "cost");

    writeln!(w)?;
    let mut heading = fg(Color::Yellow);
    heading.set_bold(true);
    w.set_color(&heading)?;
    write!(w, "{section}")?;
    w.reset()?;
    writeln!(w, " ({} items)", members.len())?;

    w.set_color(&dimmed(Color::White))?;
    write!(w, "Value: {}", format_currency(Some(value), DEFAULT_CURRENCY))?;
    if cost > 0.0 {
        let gain = value - cost;
        let (mut style, sign) = gain_style(gain);
        style.set_dimmed(true);
        write!(w, " | Cost: {} | ", format_currency(Some(cost), DEFAULT_CURRENCY))?;
        w.set_color(&style)?;
        write!(
            w,
            "Gain: {sign}{} ({sign}{:.2}%)",
            format_currency(Some(gain), DEFAULT_CURRENCY),
            gain / cost * 100.0
        )?;
    }
    w.reset()?;
    writeln!(w)?;

    let has_ticker = members.iter().any(|m| m.get("ticker").is_some_and(is_truthy));
    let has_quantity = members.iter().any(|m| m.get("quantity").is_some_and(is_truthy));
    let has_cost = members
        .iter()
        .any(|m| m.get("cost").and_then(|c| c.get("amount")).is_some_and(is_truthy));

    let mut table = Table::plain()
        .column("Name", Align::Left, fg(Color::Cyan))
        .column("Value", Align::Right, fg(Color::Green));
    if has_ticker {
        table = table.column("Ticker", Align::Left, fg(Color::Yellow));
    }
    if has_quantity {
        table = table.column("Quantity", Align::Right, ColorSpec::new());
    }
    if has_cost {
        table = table
            .column("Cost Basis", Align::Right, ColorSpec::new())
            .column("Gain/Loss", Align::Right, ColorSpec::new())
            .column("Gain %", Align::Right, ColorSpec::new());
    }

    for item in members {
        let value_amount = amount(item, "value").unwrap_or(0.0);
        let currency = value_currency(item);

        let mut row: Vec<Cell> = vec![
            str_field(item, "name", "N/A").into(),
            format_currency(Some(value_amount), currency).into(),
        ];
        if has_ticker {
            row.push(item.get("ticker").map(display_value).unwrap_or_default().into());
        }
        if has_quantity {
            row.push(item.get("quantity").map(format_number).unwrap_or_default().into());
        }
        if has_cost {
            row.extend(cost_cells(item, value_amount, currency));
        }
        table.row(row);
    }

    table.render(w)
}

fn cost_cells(item: &Value, value_amount: f64, currency: &str) -> [Cell; 3] {
    if item.get("cost").is_none() {
        return Default::default();
    }

    let cost_amount = amount(item, "cost").unwrap_or(0.0);
    let cost = Cell::from(format_currency(Some(cost_amount), currency));
    if cost_amount <= 0.0 {
        return [cost, Cell::default(), Cell::default()];
    }

    let gain = value_amount - cost_amount;
    let (style, sign) = gain_style(gain);
    [
        cost,
        Cell::styled(
            format!("{sign}{}", format_currency(Some(gain), currency)),
            style.clone(),
        ),
        Cell::styled(
            format!("{sign}{:.2}%", gain / cost_amount * 100.0),
            style,
        ),
    ]
}
