use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::time::Duration;
use toon_status::{ClientConfig, CorporateClash, Invasions, Population, SillyMeter, Snapshot};
use unicode_width::UnicodeWidthStr;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Print the raw JSON response instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Toontown Rewritten API host (e.g. https://www.toontownrewritten.com)
    #[arg(long, global = true)]
    toontown_url: Option<String>,

    /// Corporate Clash API host (e.g. https://corporateclash.net)
    #[arg(long, global = true)]
    clash_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ongoing Toontown Rewritten invasions
    Invasions,
    /// Toontown Rewritten population by district
    Population,
    /// Toontown Rewritten silly meter
    SillyMeter,
    /// Corporate Clash districts
    Districts,
    /// Corporate Clash launcher news
    News,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args);

    match args.command {
        Command::Invasions => show_invasions(&config, args.json),
        Command::Population => show_population(&config, args.json),
        Command::SillyMeter => show_silly_meter(&config, args.json),
        Command::Districts => show_districts(&config, args.json),
        Command::News => show_news(&config, args.json),
    }
}

fn build_config(args: &Args) -> ClientConfig {
    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let mut config = ClientConfig::default().with_timeout(timeout);
    if let Some(url) = &args.toontown_url {
        config = config.with_toontown_base_url(url.clone());
    }
    if let Some(url) = &args.clash_url {
        config = config.with_clash_base_url(url.clone());
    }
    config
}

/// The decoded document, or the reason there is none.
fn require(snapshot: &Snapshot) -> Result<&Value> {
    match (snapshot.raw(), snapshot.last_error()) {
        (Some(value), _) => Ok(value),
        (None, Some(err)) => bail!("{} unavailable: {}", snapshot.url(), err),
        (None, None) => bail!("{} unavailable", snapshot.url()),
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn show_invasions(config: &ClientConfig, json: bool) -> Result<()> {
    let invasions = Invasions::with_config(config);
    let raw = require(invasions.snapshot())?;
    if json {
        return print_json(raw);
    }
    if let Some(message) = invasions.error() {
        bail!("upstream error: {}", message);
    }

    let rows: Vec<Vec<String>> = invasions
        .invasions_as_array()
        .unwrap_or_default()
        .into_iter()
        .map(Vec::from)
        .collect();
    if rows.is_empty() {
        println!("No invasions in progress.");
    } else {
        print!("{}", render_table(&["District", "Cog", "Progress"], &rows));
    }
    Ok(())
}

fn show_population(config: &ClientConfig, json: bool) -> Result<()> {
    let population = Population::with_config(config);
    let raw = require(population.snapshot())?;
    if json {
        return print_json(raw);
    }

    if let Some(total) = population.total_population() {
        println!("Total population: {}", total);
    }
    let rows: Vec<Vec<String>> = population
        .population_by_district()
        .map(|districts| {
            districts
                .iter()
                .map(|(name, count)| vec![name.clone(), count.to_string()])
                .collect()
        })
        .unwrap_or_default();
    if !rows.is_empty() {
        print!("{}", render_table(&["District", "Toons"], &rows));
    }
    Ok(())
}

fn show_silly_meter(config: &ClientConfig, json: bool) -> Result<()> {
    let meter = SillyMeter::with_config(config);
    let raw = require(meter.snapshot())?;
    if json {
        return print_json(raw);
    }

    let state = meter
        .state()
        .map(|state| state.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    println!("State: {}", state);
    if let Some(hp) = meter.hp() {
        println!("HP: {}", hp);
    }
    if let Some(winner) = meter.winner() {
        println!("Winner: {}", winner);
    }
    if let Some(next) = meter.next_update_timestamp() {
        println!("Next update: {}", next);
    }

    if let Some(rewards) = meter.rewards() {
        let descriptions = meter.reward_descriptions();
        let points = meter.reward_points().unwrap_or([None, None, None]);
        let rows: Vec<Vec<String>> = rewards
            .iter()
            .enumerate()
            .map(|(i, reward)| {
                vec![
                    reward.clone(),
                    descriptions
                        .as_ref()
                        .map(|d| d[i].clone())
                        .unwrap_or_default(),
                    points[i].map(|p| p.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        print!(
            "{}",
            render_table(&["Reward", "Description", "Points"], &rows)
        );
    }
    Ok(())
}

fn show_districts(config: &ClientConfig, json: bool) -> Result<()> {
    let clash = CorporateClash::with_config(config);
    let raw = require(clash.districts_snapshot())?;
    if json {
        return print_json(raw);
    }

    let Some(districts) = clash.districts() else {
        bail!("unrecognized district list from {}", clash.districts_snapshot().url());
    };
    let rows: Vec<Vec<String>> = districts
        .into_iter()
        .map(|d| {
            let invasion = if d.invasion_online {
                format!(
                    "{} {}/{}",
                    d.cogs_attacking.unwrap_or_default(),
                    d.count_defeated,
                    d.count_total
                )
            } else {
                String::new()
            };
            vec![
                d.name,
                if d.online { "online" } else { "offline" }.to_string(),
                d.population.to_string(),
                invasion,
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(&["District", "Status", "Toons", "Invasion"], &rows)
    );
    Ok(())
}

fn show_news(config: &ClientConfig, json: bool) -> Result<()> {
    let clash = CorporateClash::with_config(config);
    let raw = require(clash.news_snapshot())?;
    if json {
        return print_json(raw);
    }

    let Some(articles) = clash.news() else {
        bail!("unrecognized news list from {}", clash.news_snapshot().url());
    };
    let rows: Vec<Vec<String>> = articles
        .into_iter()
        .map(|a| vec![a.posted, a.category, a.title])
        .collect();
    print!("{}", render_table(&["Posted", "Category", "Title"], &rows));
    Ok(())
}

/// Left-aligned columns padded by display width, two spaces apart.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate().take(widths.len()) {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let pad = widths[i].saturating_sub(cell.width());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
