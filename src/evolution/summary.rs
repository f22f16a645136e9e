//! # Evolution summary
//!
//! Initial-versus-final comparison of the tracked metrics of an [`EvolutionSeries`],
//! as consumed by text reports.
//!
//! Display
//! -----------------
//! * `format!("{}", summary)` – one line, e.g.
//!   ```text
//!   t=0.00->10.00, r_core=-12.50%, r_half=+0.00%, density_core=+95.31%, concentration=+14.29%
//!   ```
//! * `format!("{:#}", summary)` – a multi-line block with initial/final/change per metric.
use std::fmt;

use serde::Serialize;

use crate::{constants::Time, evolution::EvolutionSeries};

/// First and last value of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricChange {
    pub initial: f64,
    pub last: f64,
}

impl MetricChange {
    /// `last / initial − 1`, or `None` when the initial value is zero or either end is not finite.
    pub fn relative_change(&self) -> Option<f64> {
        if self.initial == 0.0 || !self.initial.is_finite() || !self.last.is_finite() {
            None
        } else {
            Some(self.last / self.initial - 1.0)
        }
    }

    fn fmt_change(&self) -> String {
        match self.relative_change() {
            Some(c) => format!("{:+.2}%", c * 100.0),
            None => "n/a".to_string(),
        }
    }
}

/// Summary of an evolution between its first and last snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvolutionSummary {
    pub t_start: Time,
    pub t_end: Time,
    pub r_core: MetricChange,
    pub r_half: MetricChange,
    pub density_core: MetricChange,
    /// `None` when `r_core` is zero at either end.
    pub concentration: Option<MetricChange>,
}

impl EvolutionSummary {
    /// Summarize a series.
    ///
    /// Return
    /// ----------
    /// * `None` for an empty series. A single snapshot gives identical initial and final values.
    pub fn from_series(series: &EvolutionSeries) -> Option<Self> {
        let change = |values: &[f64]| -> Option<MetricChange> {
            Some(MetricChange {
                initial: *values.first()?,
                last: *values.last()?,
            })
        };

        let concentration = series.concentration();
        let concentration = match (concentration.first(), concentration.last()) {
            (Some(Some(initial)), Some(Some(last))) => Some(MetricChange {
                initial: *initial,
                last: *last,
            }),
            _ => None,
        };

        Some(EvolutionSummary {
            t_start: *series.time.first()?,
            t_end: *series.time.last()?,
            r_core: change(&series.r_core)?,
            r_half: change(&series.r_half)?,
            density_core: change(&series.density_core)?,
            concentration,
        })
    }
}

impl fmt::Display for EvolutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let concentration = self
            .concentration
            .map(|c| c.fmt_change())
            .unwrap_or_else(|| "n/a".to_string());

        if f.alternate() {
            writeln!(f, "Cluster evolution summary")?;
            writeln!(f, "-------------------------")?;
            writeln!(f, "time         : {:.2} -> {:.2}", self.t_start, self.t_end)?;

            let mut block = |name: &str, c: &MetricChange| -> fmt::Result {
                writeln!(
                    f,
                    "{name:<13}: initial={:.4}, final={:.4}, change={}",
                    c.initial,
                    c.last,
                    c.fmt_change()
                )
            };
            block("r_core", &self.r_core)?;
            block("r_half", &self.r_half)?;
            block("density_core", &self.density_core)?;

            match &self.concentration {
                Some(c) => write!(
                    f,
                    "{:<13}: initial={:.4}, final={:.4}, change={}",
                    "concentration",
                    c.initial,
                    c.last,
                    c.fmt_change()
                ),
                None => write!(f, "{:<13}: n/a", "concentration"),
            }
        } else {
            write!(
                f,
                "t={:.2}->{:.2}, r_core={}, r_half={}, density_core={}, concentration={}",
                self.t_start,
                self.t_end,
                self.r_core.fmt_change(),
                self.r_half.fmt_change(),
                self.density_core.fmt_change(),
                concentration
            )
        }
    }
}

#[cfg(test)]
mod summary_test {
    use super::*;
    use approx::assert_relative_eq;

    fn series() -> EvolutionSeries {
        EvolutionSeries {
            time: vec![0.0, 5.0, 10.0],
            r_core: vec![1.0, 0.9, 0.5],
            r_half: vec![5.0, 5.0, 5.0],
            r_tidal: vec![10.0, 10.0, 10.0],
            v_std: vec![0.3, 0.3, 0.3],
            density_core: vec![2.0, 2.5, 4.0],
            n_particles: vec![100, 100, 100],
            ..Default::default()
        }
    }

    #[test]
    fn test_from_series() {
        let summary = EvolutionSummary::from_series(&series()).unwrap();
        assert_eq!(summary.t_start, 0.0);
        assert_eq!(summary.t_end, 10.0);
        assert_relative_eq!(summary.r_core.relative_change().unwrap(), -0.5);
        assert_eq!(summary.r_half.relative_change(), Some(0.0));
        assert_relative_eq!(summary.density_core.relative_change().unwrap(), 1.0);

        let concentration = summary.concentration.unwrap();
        assert_eq!(concentration.initial, 5.0);
        assert_eq!(concentration.last, 10.0);
    }

    #[test]
    fn test_empty_and_degenerate() {
        assert_eq!(EvolutionSummary::from_series(&EvolutionSeries::new()), None);

        let mut s = series();
        s.r_core[0] = 0.0;
        s.density_core[0] = 0.0;
        let summary = EvolutionSummary::from_series(&s).unwrap();
        assert_eq!(summary.concentration, None);
        assert_eq!(summary.density_core.relative_change(), None);
    }

    #[test]
    fn test_display() {
        let summary = EvolutionSummary::from_series(&series()).unwrap();
        assert_eq!(
            summary.to_string(),
            "t=0.00->10.00, r_core=-50.00%, r_half=+0.00%, density_core=+100.00%, concentration=+100.00%"
        );
        let pretty = format!("{summary:#}");
        assert!(pretty.starts_with("Cluster evolution summary\n"));
        assert!(pretty.contains("r_core       : initial=1.0000, final=0.5000, change=-50.00%"));
    }
}
