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

use crate::apriori::{apriori, validate_min_support, SupportBase};
use crate::encoder::{TransactionEncoder, TransactionRecord};
use crate::error::MiningError;
use crate::generate_rules::generate_rules;
use crate::incidence_matrix::IncidenceMatrix;
use crate::itemset::{FrequentItemsets, ItemsetRecord};
use crate::metric::Metric;
use crate::ranker::{rank_rules, RuleRecord, SortOrder};
use crate::rule::Rule;
use std::time::Instant;
use tracing::info;

/// Parameters of one mining run.
#[derive(Clone, Debug, PartialEq)]
pub struct MiningConfig {
    /// Minimum itemset support, in (0, 1].
    pub min_support: f64,
    /// Metric rules are filtered by.
    pub metric: Metric,
    /// Rules with `metric` below this are dropped.
    pub min_threshold: f64,
    /// Keep only the N items with the most records. `None` keeps all.
    pub top_n_items: Option<usize>,
    pub support_base: SupportBase,
    pub sort_by: Metric,
    pub sort_order: SortOrder,
}

impl Default for MiningConfig {
    fn default() -> MiningConfig {
        MiningConfig {
            min_support: 0.01,
            metric: Metric::Lift,
            min_threshold: 1.0,
            top_n_items: Some(50),
            support_base: SupportBase::RetainedOrders,
            sort_by: Metric::Lift,
            sort_order: SortOrder::Descending,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: f64) -> MiningConfig {
        MiningConfig {
            min_support,
            ..MiningConfig::default()
        }
    }

    pub fn with_metric(mut self, metric: Metric, min_threshold: f64) -> MiningConfig {
        self.metric = metric;
        self.min_threshold = min_threshold;
        self
    }

    pub fn with_top_n_items(mut self, top_n_items: Option<usize>) -> MiningConfig {
        self.top_n_items = top_n_items;
        self
    }

    pub fn with_support_base(mut self, support_base: SupportBase) -> MiningConfig {
        self.support_base = support_base;
        self
    }

    pub fn with_sort(mut self, sort_by: Metric, sort_order: SortOrder) -> MiningConfig {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn validate(&self) -> Result<(), MiningError> {
        validate_min_support(self.min_support)?;
        self.metric.validate_threshold(self.min_threshold)?;
        TransactionEncoder::with_top_n_items(self.top_n_items)?;
        Ok(())
    }
}

/// Headline counts of a mining run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Rows of the incidence matrix: orders with at least one mined item.
    pub orders_analyzed: usize,
    /// Orders supports are a fraction of; differs from `orders_analyzed`
    /// under `SupportBase::AllOrders` when the top-N filter emptied orders.
    pub support_orders: usize,
    pub products: usize,
    pub frequent_itemsets: usize,
    pub rules_found: usize,
}

/// Everything one run produced: the matrix it mined, the frequent itemsets,
/// and the ranked rules.
#[derive(Clone, Debug)]
pub struct MiningReport {
    matrix: IncidenceMatrix,
    itemsets: FrequentItemsets,
    rules: Vec<Rule>,
    support_orders: usize,
}

impl MiningReport {
    pub fn matrix(&self) -> &IncidenceMatrix {
        &self.matrix
    }

    pub fn itemsets(&self) -> &FrequentItemsets {
        &self.itemsets
    }

    /// Rules in rank order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule_records(&self) -> Vec<RuleRecord> {
        self.rules
            .iter()
            .map(|rule| RuleRecord::from_rule(rule, self.matrix.itemizer()))
            .collect()
    }

    pub fn itemset_records(&self) -> Vec<ItemsetRecord> {
        self.itemsets.to_records(self.matrix.itemizer())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            orders_analyzed: self.matrix.num_orders(),
            support_orders: self.support_orders,
            products: self.matrix.num_items(),
            frequent_itemsets: self.itemsets.len(),
            rules_found: self.rules.len(),
        }
    }
}

/// Runs encode, mine, generate and rank over `records`. The configuration
/// is validated before any work; an input that yields nothing is an empty
/// report, not an error.
pub fn mine(records: &[TransactionRecord], config: &MiningConfig) -> Result<MiningReport, MiningError> {
    config.validate()?;
    let start = Instant::now();

    let matrix = TransactionEncoder::with_top_n_items(config.top_n_items)?.encode(records);
    info!(
        records = records.len(),
        orders = matrix.num_orders(),
        items = matrix.num_items(),
        "built incidence matrix"
    );

    let support_orders = config.support_base.denominator(&matrix);
    let itemsets = apriori(&matrix, config.min_support, config.support_base)?;
    let rules = generate_rules(&itemsets, config.metric, config.min_threshold)?;
    let rules = rank_rules(rules, config.sort_by, config.sort_order);

    info!(
        itemsets = itemsets.len(),
        rules = rules.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "mining finished"
    );
    Ok(MiningReport {
        matrix,
        itemsets,
        rules,
        support_orders,
    })
}
