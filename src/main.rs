// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod command_line_args;

use anyhow::{Context, Result};
use basket_rules::demo::{DEMO_ORDERS, DEMO_RECORDS};
use basket_rules::{demo_transactions, mine, read_or_demo, write_itemsets, write_rules, Replay};
use command_line_args::{parse_args_or_exit, Arguments};
use std::fs::File;
use std::io::BufWriter;
use std::process;
use std::time::{Duration, Instant};
use tracing::{info, Level};

fn run(args: &Arguments) -> Result<()> {
    let config = args.mining_config()?;
    let start = Instant::now();

    let records = match args.input_file_path {
        Some(ref path) if !args.demo => {
            info!(input = %path, "reading transactions");
            let (records, demo) = read_or_demo(path, &args.reader_options(), args.seed)
                .with_context(|| format!("failed to read {}", path))?;
            if demo {
                println!("Input lacks the expected columns; mining the demo basket.");
            }
            records
        }
        _ => {
            info!(seed = args.seed, "generating demo basket");
            demo_transactions(DEMO_RECORDS, DEMO_ORDERS, args.seed)
        }
    };

    let report = mine(&records, &config)?;
    let summary = report.summary();
    println!("Orders analyzed: {}", summary.orders_analyzed);
    if summary.support_orders != summary.orders_analyzed {
        println!("Support relative to: {} orders", summary.support_orders);
    }
    println!("Products: {}", summary.products);
    println!("Frequent itemsets: {}", summary.frequent_itemsets);
    println!("Rules found: {}", summary.rules_found);

    let records = report.rule_records();
    if args.show > 0 && !records.is_empty() {
        println!("Top {} rules by {}:", args.show.min(records.len()), config.sort_by);
        for record in records.iter().take(args.show) {
            println!("  {}", record);
        }
    }

    let output = File::create(&args.output_rules_path)
        .with_context(|| format!("failed to create {}", args.output_rules_path))?;
    write_rules(BufWriter::new(output), &records)?;
    info!(output = %args.output_rules_path, rules = records.len(), "wrote rules");

    if let Some(ref path) = args.output_itemsets_path {
        let output = File::create(path).with_context(|| format!("failed to create {}", path))?;
        write_itemsets(BufWriter::new(output), &report.itemset_records())?;
        info!(output = %path, "wrote frequent itemsets");
    }

    if args.simulate > 0 {
        let replay = Replay::new(&records, args.simulate)
            .with_interval(Duration::from_millis(args.simulate_interval_ms));
        for order in replay {
            println!("{}", order);
        }
    }

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn main() {
    let arguments = parse_args_or_exit();

    let level = if arguments.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&arguments) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
