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

use crate::error::MiningError;
use std::fmt;
use std::str::FromStr;

/// Statistic a rule can be filtered or ranked by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Support,
    Confidence,
    Lift,
    Leverage,
    Conviction,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Support,
        Metric::Confidence,
        Metric::Lift,
        Metric::Leverage,
        Metric::Conviction,
    ];

    pub fn name(&self) -> &'static str {
        match *self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Leverage => "leverage",
            Metric::Conviction => "conviction",
        }
    }

    /// Closed range of values the metric can take.
    pub fn range(&self) -> (f64, f64) {
        match *self {
            Metric::Support | Metric::Confidence => (0.0, 1.0),
            Metric::Lift => (0.0, f64::MAX),
            Metric::Leverage => (-0.25, 0.25),
            Metric::Conviction => (0.0, f64::INFINITY),
        }
    }

    pub fn validate_threshold(&self, threshold: f64) -> Result<(), MiningError> {
        let (low, high) = self.range();
        if threshold >= low && threshold <= high {
            Ok(())
        } else {
            Err(MiningError::invalid_argument(format!(
                "{} threshold must be in [{}, {}], got {}",
                self, low, high, threshold
            )))
        }
    }
}

impl FromStr for Metric {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Metric, MiningError> {
        let name = s.trim().to_ascii_lowercase();
        Metric::ALL
            .iter()
            .find(|metric| metric.name() == name)
            .cloned()
            .ok_or_else(|| MiningError::invalid_argument(format!("unknown metric `{}`", s)))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Metric;
    use crate::error::MiningError;

    #[test]
    fn test_parse() {
        for metric in Metric::ALL.iter() {
            assert_eq!(metric.name().parse::<Metric>(), Ok(*metric));
        }
        assert_eq!(" Lift ".parse::<Metric>(), Ok(Metric::Lift));
        assert!(matches!(
            "zhangs_metric".parse::<Metric>(),
            Err(MiningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_threshold() {
        let cases = [
            (Metric::Support, 0.0, true),
            (Metric::Support, 1.0, true),
            (Metric::Support, 1.5, false),
            (Metric::Confidence, -0.1, false),
            (Metric::Lift, 3.0, true),
            (Metric::Lift, -1.0, false),
            (Metric::Lift, f64::INFINITY, false),
            (Metric::Leverage, -0.25, true),
            (Metric::Leverage, 0.3, false),
            (Metric::Conviction, f64::INFINITY, true),
            (Metric::Conviction, -0.5, false),
            (Metric::Confidence, f64::NAN, false),
        ];
        for &(metric, threshold, ok) in cases.iter() {
            assert_eq!(
                metric.validate_threshold(threshold).is_ok(),
                ok,
                "{} {}",
                metric,
                threshold
            );
        }
    }
}
