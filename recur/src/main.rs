use chrono::{DateTime, SecondsFormat, Utc};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{debug, info};

use recur::cli::{Cli, Command};
use recur::config::Config;
use recur::{Completion, EvaluationResult, RepeatRule};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
    Ok(())
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn print_result(rule: &RepeatRule, result: Option<EvaluationResult>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        None => println!("{} Rule '{}' does not repeat", "-".dimmed(), rule),
        Some(result) => match result.next_due_date() {
            Some(next) => println!(
                "{} Next due: {} (occurrence {})",
                "✓".green(),
                format_ts(next).cyan(),
                result.new_occurrence_count()
            ),
            None => println!(
                "{} Series ended after occurrence {}",
                "■".yellow(),
                result.new_occurrence_count()
            ),
        },
    }
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let json = cli.json || config.json;

    debug!("recur starting with {:?}", config);

    match cli.command {
        Command::Next {
            rule,
            due,
            completed,
            anchor,
            count,
        } => {
            let rule = rule.to_rule().context("Invalid repetition rule")?;
            let completion = Completion::new(
                due,
                completed.unwrap_or_else(Utc::now),
                anchor.unwrap_or(config.default_anchor),
            )
            .with_count(count);

            info!("Evaluating '{}' for {:?}", rule, completion);
            let result = recur::evaluate(&rule, &completion).context("Failed to compute next occurrence")?;
            print_result(&rule, result, json)?;
        }
        Command::Preview {
            rule,
            due,
            count,
            limit,
        } => {
            let rule = rule.to_rule().context("Invalid repetition rule")?;
            let limit = limit.unwrap_or(config.preview_limit);

            let dates = recur::preview(&rule, due, count)
                .take(limit)
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to project series")?;

            if json {
                let formatted: Vec<String> = dates.iter().copied().map(format_ts).collect();
                println!("{}", serde_json::to_string_pretty(&formatted)?);
            } else {
                println!("Series: {}", rule.to_string().cyan());
                for (i, date) in dates.iter().enumerate() {
                    let number = count as usize + i + 1;
                    println!("  {:>3}  {}", number.to_string().dimmed(), format_ts(*date));
                }
            }
        }
    }

    Ok(())
}
