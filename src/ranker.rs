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

use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::itemset::ItemsetRecord;
use crate::metric::Metric;
use crate::rule::Rule;
use ordered_float::OrderedFloat;
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Sorts rules by `metric` in the given direction. Equal values are ordered
/// by antecedent, then consequent, each compared label by label (ids follow
/// label order), so the result is fully determined by the rule set.
///
/// This is not the order of the exported text: `[Banana, Milk]` sorts before
/// `[Banana Bread]` because `Banana` < `Banana Bread`, while the joined
/// strings compare the other way round at the `,`.
pub fn rank_rules(mut rules: Vec<Rule>, metric: Metric, order: SortOrder) -> Vec<Rule> {
    rules.sort_by(|a, b| {
        let x = OrderedFloat(a.metric(metric));
        let y = OrderedFloat(b.metric(metric));
        let by_metric = match order {
            SortOrder::Ascending => x.cmp(&y),
            SortOrder::Descending => y.cmp(&x),
        };
        by_metric
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
    rules
}

pub const RULE_COLUMNS: [&str; 9] = [
    "antecedents",
    "consequents",
    "antecedent support",
    "consequent support",
    "support",
    "confidence",
    "lift",
    "leverage",
    "conviction",
];

pub const ITEMSET_COLUMNS: [&str; 3] = ["support", "itemsets", "length"];

/// Flat export row for a rule. Item sets are in canonical form: sorted
/// labels joined by commas.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleRecord {
    pub antecedents: String,
    pub consequents: String,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

impl RuleRecord {
    pub fn from_rule(rule: &Rule, itemizer: &Itemizer) -> RuleRecord {
        RuleRecord {
            antecedents: Item::item_vec_to_string(&rule.antecedent, itemizer),
            consequents: Item::item_vec_to_string(&rule.consequent, itemizer),
            antecedent_support: rule.antecedent_support,
            consequent_support: rule.consequent_support,
            support: rule.support,
            confidence: rule.confidence,
            lift: rule.lift,
            leverage: rule.leverage,
            conviction: rule.conviction,
        }
    }
}

impl fmt::Display for RuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} => {} (support {:.4}, confidence {:.4}, lift {:.4})",
            self.antecedents, self.consequents, self.support, self.confidence, self.lift
        )
    }
}

/// Writes the rule table as CSV. Infinite conviction is written as `inf`.
/// An empty table is just the header row.
pub fn write_rules<W: Write>(mut output: W, records: &[RuleRecord]) -> io::Result<()> {
    writeln!(output, "{}", RULE_COLUMNS.join(","))?;
    for record in records {
        writeln!(
            output,
            "{},{},{},{},{},{},{},{},{}",
            escape_field(&record.antecedents),
            escape_field(&record.consequents),
            record.antecedent_support,
            record.consequent_support,
            record.support,
            record.confidence,
            record.lift,
            record.leverage,
            record.conviction
        )?;
    }
    output.flush()
}

pub fn write_itemsets<W: Write>(mut output: W, records: &[ItemsetRecord]) -> io::Result<()> {
    writeln!(output, "{}", ITEMSET_COLUMNS.join(","))?;
    for record in records {
        writeln!(
            output,
            "{},{},{}",
            record.support,
            escape_field(&record.itemsets),
            record.length
        )?;
    }
    output.flush()
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(|c: char| c == ',' || c == '"' || c == '\n' || c == '\r') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
