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

use basket_rules::{Metric, MiningConfig, MiningError, ReaderOptions, SortOrder, SupportBase};
use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};

pub struct Arguments {
    pub input_file_path: Option<String>,
    pub demo: bool,
    pub seed: u64,
    pub show: usize,
    pub output_rules_path: String,
    pub output_itemsets_path: Option<String>,
    pub order_column: String,
    pub item_column: String,
    pub min_support: f64,
    pub metric: String,
    pub min_threshold: f64,
    pub top_n_items: usize,
    pub all_items: bool,
    pub support_base: String,
    pub sort_by: Option<String>,
    pub ascending: bool,
    pub simulate: usize,
    pub simulate_interval_ms: u64,
    pub verbose: bool,
}

impl Arguments {
    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            order_column: self.order_column.clone(),
            item_column: self.item_column.clone(),
        }
    }

    pub fn mining_config(&self) -> Result<MiningConfig, MiningError> {
        let metric: Metric = self.metric.parse()?;
        let sort_by = match self.sort_by {
            Some(ref name) => name.parse()?,
            None => metric,
        };
        let sort_order = if self.ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        };
        let top_n_items = if self.all_items {
            None
        } else {
            Some(self.top_n_items)
        };
        let config = MiningConfig::new(self.min_support)
            .with_metric(metric, self.min_threshold)
            .with_top_n_items(top_n_items)
            .with_support_base(self.support_base.parse::<SupportBase>()?)
            .with_sort(sort_by, sort_order);
        config.validate()?;
        Ok(config)
    }
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: None,
        demo: false,
        seed: 0,
        show: 10,
        output_rules_path: String::new(),
        output_itemsets_path: None,
        order_column: String::from("order_id"),
        item_column: String::from("product_name"),
        min_support: 0.01,
        metric: String::from("lift"),
        min_threshold: 1.0,
        top_n_items: 50,
        all_items: false,
        support_base: String::from("retained"),
        sort_by: None,
        ascending: false,
        simulate: 0,
        simulate_interval_ms: 1000,
        verbose: false,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Market basket association rule mining with Apriori.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(
                &["--input"],
                StoreOption,
                "Transaction table in CSV format, with a header row. A table \
                 without the order or item column falls back to the demo basket.",
            )
            .metavar("file_path");

        parser.refer(&mut args.demo).add_option(
            &["--demo"],
            StoreTrue,
            "Mine a synthetic demo basket instead of --input.",
        );

        parser
            .refer(&mut args.seed)
            .add_option(&["--seed"], Store, "Random seed for the demo basket.")
            .metavar("n");

        parser
            .refer(&mut args.show)
            .add_option(&["--show"], Store, "Print the N top ranked rules.")
            .metavar("n");

        parser
            .refer(&mut args.output_rules_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store output rules. Columns: antecedents, \
                 consequents, antecedent support, consequent support, support, \
                 confidence, lift, leverage, conviction.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_itemsets_path)
            .add_option(
                &["--itemsets-output"],
                StoreOption,
                "File path in which to store frequent itemsets.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.order_column)
            .add_option(&["--order-column"], Store, "Order id column name.")
            .metavar("name");

        parser
            .refer(&mut args.item_column)
            .add_option(&["--item-column"], Store, "Item label column name.")
            .metavar("name");

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range (0,1].",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.metric)
            .add_option(
                &["--metric"],
                Store,
                "Rule filter metric: support, confidence, lift, leverage or conviction.",
            )
            .metavar("name");

        parser
            .refer(&mut args.min_threshold)
            .add_option(
                &["--min-threshold"],
                Store,
                "Minimum value of the rule filter metric.",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.top_n_items)
            .add_option(
                &["--top-n-items"],
                Store,
                "Only mine the N items with the most records.",
            )
            .metavar("n");

        parser.refer(&mut args.all_items).add_option(
            &["--all-items"],
            StoreTrue,
            "Mine every item, ignoring --top-n-items.",
        );

        parser
            .refer(&mut args.support_base)
            .add_option(
                &["--support-base"],
                Store,
                "Support denominator: `retained` orders with a mined item, or `all` orders.",
            )
            .metavar("base");

        parser
            .refer(&mut args.sort_by)
            .add_option(
                &["--sort-by"],
                StoreOption,
                "Metric to rank rules by. Defaults to --metric.",
            )
            .metavar("name");

        parser.refer(&mut args.ascending).add_option(
            &["--ascending"],
            StoreTrue,
            "Rank rules in ascending order.",
        );

        parser
            .refer(&mut args.simulate)
            .add_option(
                &["--simulate"],
                Store,
                "Replay N incoming orders from the ranked rules.",
            )
            .metavar("n");

        parser
            .refer(&mut args.simulate_interval_ms)
            .add_option(
                &["--simulate-interval-ms"],
                Store,
                "Delay between replayed orders, in milliseconds.",
            )
            .metavar("ms");

        parser
            .refer(&mut args.verbose)
            .add_option(&["-v", "--verbose"], StoreTrue, "Log debug output.");

        if env::args().count() == 1 {
            parser.print_help("Usage:", &mut io::stderr()).unwrap();
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    if args.input_file_path.is_none() && !args.demo {
        eprintln!("One of --input or --demo is required");
        process::exit(1);
    }

    args
}
