use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use log::{debug, info};

use loto::env_config;
use loto::ingest::load_draws;
use loto::sampler::seeded_rng;
use loto::search::search_profitable;
use loto::session::{Session, SortColumn};

const USAGE: &str = "Usage: loto-play [--numbers N1,N2,N3,N4,N5 --lucky C | --random] [--search] [--max-attempts N] [--batch-size N] [--seed S] [--sort date|gain]... [--limit N] [--data PATH]";

struct Args {
    numbers: Vec<u8>,
    lucky: Option<u8>,
    random: bool,
    search: bool,
    max_attempts: Option<u32>,
    batch_size: Option<u32>,
    seed: Option<u64>,
    sorts: Vec<SortColumn>,
    limit: usize,
    data: Option<PathBuf>,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> anyhow::Result<T> {
    let value = value.with_context(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid {flag} value: {value}"))
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        numbers: Vec::new(),
        lucky: None,
        random: false,
        search: false,
        max_attempts: None,
        batch_size: None,
        seed: None,
        sorts: Vec::new(),
        limit: 20,
        data: None,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--numbers" => {
                i += 1;
                let list: String = parse_value(flag, args.get(i))?;
                parsed.numbers = list
                    .split(',')
                    .map(|n| n.trim().parse::<u8>())
                    .collect::<Result<_, _>>()
                    .with_context(|| format!("invalid --numbers value: {list}"))?;
            }
            "--lucky" => {
                i += 1;
                parsed.lucky = Some(parse_value(flag, args.get(i))?);
            }
            "--random" => parsed.random = true,
            "--search" => parsed.search = true,
            "--max-attempts" => {
                i += 1;
                parsed.max_attempts = Some(parse_value(flag, args.get(i))?);
            }
            "--batch-size" => {
                i += 1;
                parsed.batch_size = Some(parse_value(flag, args.get(i))?);
            }
            "--seed" => {
                i += 1;
                parsed.seed = Some(parse_value(flag, args.get(i))?);
            }
            "--sort" => {
                i += 1;
                let column: String = parse_value(flag, args.get(i))?;
                parsed.sorts.push(match column.to_ascii_lowercase().as_str() {
                    "date" => SortColumn::Date,
                    "gain" => SortColumn::Gain,
                    other => bail!("invalid --sort value: {other}"),
                });
            }
            "--limit" => {
                i += 1;
                parsed.limit = parse_value(flag, args.get(i))?;
            }
            "--data" => {
                i += 1;
                parsed.data = Some(parse_value(flag, args.get(i))?);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                println!();
                println!("Options:");
                println!("  --numbers LIST     Five distinct numbers from 1-49, comma separated");
                println!("  --lucky C          Lucky number from 1-10");
                println!("  --random           Play a random ticket");
                println!("  --search           Search random tickets for a profitable one");
                println!("  --max-attempts N   Search attempt cap (default: 20000)");
                println!("  --batch-size N     Attempts between yields (default: 200)");
                println!("  --seed S           RNG seed for --random and --search");
                println!("  --sort COLUMN      Sort by date or gain; repeat to flip the order");
                println!("  --limit N          Result rows to print (default: 20)");
                println!("  --data PATH        Draw history feed (default: $LOTO_DATA_PATH)");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }
    Ok(parsed)
}

fn print_results(session: &Session, limit: usize) {
    println!(
        "{:<12} {:<20} {:>6} {:>7} {:>6} {:>12}",
        "Date", "Draw", "Chance", "Matches", "Lucky", "Gain"
    );
    for r in session.results().iter().take(limit) {
        let draw = r
            .draw
            .numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("-");
        println!(
            "{:<12} {:<20} {:>6} {:>7} {:>6} {:>12.2}",
            r.draw.date.format("%d/%m/%Y"),
            draw,
            r.draw.chance,
            r.match_count,
            if r.lucky_match { "yes" } else { "no" },
            r.payout
        );
    }
    if session.results().len() > limit {
        println!("... {} more draws", session.results().len() - limit);
    }

    let summary = session.summary();
    println!();
    println!("Total spent: {:>12.2}", summary.total_spent);
    println!("Total won:   {:>12.2}", summary.total_won);
    println!("Games won:   {:>12}", summary.games_won);
    println!("Net result:  {:>12.2}", summary.net_result);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_config::init_logging();
    let args = parse_args()?;
    let data_path = args.data.clone().unwrap_or_else(env_config::data_path);

    let draws = load_draws(&data_path)
        .with_context(|| format!("load draw history from {}", data_path.display()))?;
    let mut session = Session::new(Arc::new(draws));
    let mut events = session.subscribe();
    let mut rng = seeded_rng(args.seed);

    if args.search {
        let mut config = env_config::search_config();
        if let Some(n) = args.max_attempts {
            config.max_attempts = n;
        }
        if let Some(n) = args.batch_size {
            config.batch_size = n;
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.store(true, Ordering::Relaxed);
            }
        });

        info!(
            "searching up to {} tickets against {} draws",
            config.max_attempts,
            session.draws().len()
        );
        let outcome = search_profitable(session.draws(), config, rng, Some(&*cancel)).await;
        session.apply_search_outcome(&outcome);
    } else {
        if args.random {
            session.randomize_selection(&mut rng);
        } else {
            for &n in &args.numbers {
                session.toggle_number(n);
            }
            if let Some(c) = args.lucky {
                session.select_lucky_number(c);
            }
        }
        if !session.calculate_results() {
            bail!("select five distinct numbers (1-49) and a lucky number (1-10)\n{USAGE}");
        }
    }

    for &column in &args.sorts {
        session.sort_by(column);
    }

    while let Ok(event) = events.try_recv() {
        debug!("session event: {event:?}");
    }

    if !session.message().is_empty() {
        println!("{}", session.message());
    }
    if let Some(ticket) = session.ticket() {
        println!(
            "Ticket: {:?} + {}",
            ticket.numbers(),
            ticket.lucky_number()
        );
    }
    if !session.results().is_empty() {
        print_results(&session, args.limit);
    }
    Ok(())
}
