//! Rule engine for bye-week scoring.
//!
//! Composes scoring rules with configurable evaluation modes and
//! tie-breaking strategies.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::{rules, ByeCandidate, ByeContext, ByeRule, RuleScore};
use crate::config::ByePenalties;

/// How rule penalties are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMode {
    /// Compare rule by rule; a later rule only decides ties of earlier ones.
    Sequential,
    /// Compare the sum of weighted penalties.
    #[default]
    Weighted,
}

/// Ordering of candidates whose penalties are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreaker {
    /// Candidate order.
    #[default]
    Stable,
    /// Earliest week first.
    ByWeek,
}

#[derive(Clone)]
struct Penalty {
    rule: Arc<dyn ByeRule>,
    weight: f64,
}

impl Penalty {
    fn score(&self, candidate: &ByeCandidate, context: &ByeContext) -> RuleScore {
        self.rule.evaluate(candidate, context) * self.weight
    }
}

/// Ranks candidate bye weeks by summed or lexicographic rule penalties.
///
/// # Example
/// ```
/// use u_season::bye::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_weighted_rule(rules::HardCap, 1000.0)
///     .with_weighted_rule(rules::Load, 10.0);
/// assert_eq!(engine.rule_names(), vec!["HARD_CAP", "LOAD"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    penalties: Vec<Penalty>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an engine with no rules; every week scores zero.
    pub fn new() -> Self {
        Self {
            penalties: Vec::new(),
            mode: EvaluationMode::Weighted,
            tie_breaker: TieBreaker::Stable,
            epsilon: 1e-9,
        }
    }

    /// The standard penalty stack: hard cap, division cap, odd count, load, jitter.
    pub fn from_penalties(penalties: &ByePenalties) -> Self {
        Self::new()
            .with_weighted_rule(rules::HardCap, penalties.hard_cap)
            .with_weighted_rule(rules::DivisionCap, penalties.division_cap)
            .with_weighted_rule(rules::OddCount, penalties.odd_count)
            .with_weighted_rule(rules::Load, penalties.load_per_team)
            .with_weighted_rule(rules::Jitter, penalties.jitter)
            .with_final_tie_breaker(TieBreaker::ByWeek)
    }

    /// Appends a rule scaled by `weight`.
    pub fn with_weighted_rule<R: ByeRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.penalties.push(Penalty {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.penalties.iter().map(|p| p.rule.name()).collect()
    }

    /// Candidate indices, cheapest week first.
    pub fn rank(&self, candidates: &[ByeCandidate], context: &ByeContext) -> Vec<usize> {
        // One row of weighted scores per candidate; Weighted mode compares row sums.
        let rows: Vec<Vec<RuleScore>> = candidates
            .iter()
            .map(|c| self.breakdown(c, context))
            .collect();
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            let by_score = match self.mode {
                EvaluationMode::Weighted => {
                    self.compare(rows[a].iter().sum(), rows[b].iter().sum())
                }
                EvaluationMode::Sequential => rows[a]
                    .iter()
                    .zip(&rows[b])
                    .map(|(&x, &y)| self.compare(x, y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal),
            };
            by_score.then_with(|| self.break_tie(&candidates[a], &candidates[b]))
        });
        order
    }

    /// Index of the cheapest candidate, `None` if there are none.
    pub fn select_best(&self, candidates: &[ByeCandidate], context: &ByeContext) -> Option<usize> {
        self.rank(candidates, context).first().copied()
    }

    /// Weighted penalty of each rule for one candidate.
    pub fn breakdown(&self, candidate: &ByeCandidate, context: &ByeContext) -> Vec<RuleScore> {
        self.penalties
            .iter()
            .map(|p| p.score(candidate, context))
            .collect()
    }

    /// Total weighted penalty of one candidate.
    pub fn total_penalty(&self, candidate: &ByeCandidate, context: &ByeContext) -> RuleScore {
        self.penalties.iter().map(|p| p.score(candidate, context)).sum()
    }

    fn compare(&self, a: RuleScore, b: RuleScore) -> Ordering {
        if (a - b).abs() > self.epsilon {
            a.total_cmp(&b)
        } else {
            Ordering::Equal
        }
    }

    fn break_tie(&self, a: &ByeCandidate, b: &ByeCandidate) -> Ordering {
        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ByWeek => a.week.cmp(&b.week),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::from_penalties(&ByePenalties::default())
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<String> = self
            .penalties
            .iter()
            .map(|p| format!("{}(w={})", p.rule.name(), p.weight))
            .collect();
        f.debug_struct("RuleEngine")
            .field("rules", &rules)
            .field("mode", &self.mode)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DivisionId;

    fn candidates(jitters: &[f64]) -> Vec<ByeCandidate> {
        jitters
            .iter()
            .enumerate()
            .map(|(i, &jitter)| ByeCandidate {
                team: 1,
                division: DivisionId::new(1).unwrap(),
                week: 5 + i as u8,
                jitter,
            })
            .collect()
    }

    #[test]
    fn test_prefers_pairing_odd_week() {
        let mut ctx = ByeContext::new(4, 2);
        ctx.place(DivisionId::new(3).unwrap(), 6);
        let cands = candidates(&[0.0, 0.5, 0.0]);
        // Week 6 already holds one team: joining it makes an even count.
        let engine = RuleEngine::default();
        assert_eq!(engine.select_best(&cands, &ctx), Some(1));
    }

    #[test]
    fn test_hard_cap_dominates() {
        let mut ctx = ByeContext::new(4, 2);
        let d = DivisionId::new(3).unwrap();
        for _ in 0..4 {
            ctx.place(d, 5);
        }
        for _ in 0..2 {
            ctx.place(DivisionId::new(1).unwrap(), 6);
        }
        let cands = candidates(&[0.0, 0.0, 0.9]);
        let engine = RuleEngine::default();
        let order = engine.rank(&cands, &ctx);
        // week 7 (empty) < week 6 (division cap) < week 5 (hard cap)
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_penalty_breakdown() {
        let ctx = ByeContext::new(4, 2);
        let engine = RuleEngine::default();
        let first = candidates(&[0.5])[0];
        let scores = engine.breakdown(&first, &ctx);
        assert_eq!(scores.len(), 5);
        assert_eq!(scores[2], 100.0); // odd count
        assert!((engine.total_penalty(&first, &ctx) - 100.5).abs() < 1e-10);
    }

    #[test]
    fn test_sequential_with_tie_breaker() {
        let ctx = ByeContext::new(4, 2);
        let engine = RuleEngine::new()
            .with_mode(EvaluationMode::Sequential)
            .with_weighted_rule(rules::Load, 1.0)
            .with_final_tie_breaker(TieBreaker::ByWeek);
        let mut cands = candidates(&[0.0, 0.0]);
        cands.reverse();
        // Loads tie, so the earlier week wins.
        assert_eq!(engine.rank(&cands, &ctx), vec![1, 0]);
    }

    #[test]
    fn test_sequential_earlier_rule_decides() {
        let mut ctx = ByeContext::new(4, 2);
        ctx.place(DivisionId::new(2).unwrap(), 5);
        // Week 5 has load 1 but even count; week 6 is empty but odd.
        let engine = RuleEngine::new()
            .with_mode(EvaluationMode::Sequential)
            .with_weighted_rule(rules::OddCount, 1.0)
            .with_weighted_rule(rules::Load, 1.0);
        assert_eq!(engine.rank(&candidates(&[0.0, 0.0]), &ctx), vec![0, 1]);
        let load_first = RuleEngine::new()
            .with_mode(EvaluationMode::Sequential)
            .with_weighted_rule(rules::Load, 1.0)
            .with_weighted_rule(rules::OddCount, 1.0);
        assert_eq!(load_first.rank(&candidates(&[0.0, 0.0]), &ctx), vec![1, 0]);
    }

    #[test]
    fn test_empty_candidates() {
        let ctx = ByeContext::new(4, 2);
        assert!(RuleEngine::default().select_best(&[], &ctx).is_none());
    }

    #[test]
    fn test_debug_lists_rules() {
        let text = format!("{:?}", RuleEngine::default());
        assert!(text.contains("HARD_CAP(w=1000)"));
        assert!(text.contains("JITTER(w=1)"));
    }
}
