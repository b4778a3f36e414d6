//! Prize distribution
//!
//! Pure computation over a completed game's standings. The platform fee
//! comes off the collected pool first; the distributable remainder is
//! paid per mode. The recorded fee is defined as collected minus
//! distributed, so the conservation identity
//! `sum(payout) + platform_fee_taken == entry_amount * participant_count`
//! holds for every mode, including a solo win where the house tops up
//! the pot and the fee goes negative.

use std::cmp::Ordering;

use crate::config::PayoutConfig;
use crate::games::types::GameMode;

/// Fixed bracket shares for league ranks 1..4, percent of the
/// distributable pool. Ranks beyond the bracket receive nothing.
pub const BRACKET_SHARES_PERCENT: [u64; 4] = [45, 25, 15, 15];

/// One participant's final score and time, input to ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub user_id: String,
    pub score: u32,
    pub total_time_seconds: f64,
}

/// One participant's computed share.
#[derive(Debug, Clone, PartialEq)]
pub struct Award {
    pub user_id: String,
    /// 1-based final rank after sorting by (score desc, time asc).
    pub rank: u32,
    pub payout: u64,
    pub is_winner: bool,
}

/// Full distribution for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub awards: Vec<Award>,
    pub total_collected: u64,
    pub prize_pool_distributed: u64,
    /// `total_collected - prize_pool_distributed`, signed.
    pub platform_fee_taken: i64,
}

pub struct PayoutEngine {
    platform_fee_percent: u64,
    tie_window_seconds: f64,
}

impl PayoutEngine {
    pub fn new(config: &PayoutConfig) -> Self {
        Self {
            platform_fee_percent: config.platform_fee_percent,
            tie_window_seconds: config.tie_window_seconds,
        }
    }

    /// Compute the distribution for a completed game.
    pub fn compute(
        &self,
        mode: GameMode,
        entry_amount: u64,
        total_questions: usize,
        standings: &[Standing],
    ) -> Distribution {
        let total_collected = entry_amount * standings.len() as u64;
        let awards = match mode {
            GameMode::Solo => self.solo(entry_amount, total_questions, standings),
            GameMode::Duel => self.ranked(entry_amount, standings, &[50, 50], true),
            GameMode::League => {
                self.ranked(entry_amount, standings, &BRACKET_SHARES_PERCENT, false)
            }
        };
        let prize_pool_distributed: u64 = awards.iter().map(|a| a.payout).sum();
        Distribution {
            awards,
            total_collected,
            prize_pool_distributed,
            platform_fee_taken: total_collected as i64 - prize_pool_distributed as i64,
        }
    }

    fn distributable(&self, total_collected: u64) -> u64 {
        total_collected - total_collected * self.platform_fee_percent / 100
    }

    /// Solo is a threshold check, not a ranking: a perfect score returns
    /// the stake plus the distributable share of it; anything less loses
    /// the whole stake.
    fn solo(&self, entry_amount: u64, total_questions: usize, standings: &[Standing]) -> Vec<Award> {
        standings
            .iter()
            .map(|s| {
                let perfect = total_questions > 0 && s.score as usize == total_questions;
                let payout = if perfect {
                    entry_amount + self.distributable(entry_amount)
                } else {
                    0
                };
                Award {
                    user_id: s.user_id.clone(),
                    rank: 1,
                    payout,
                    is_winner: payout > 0,
                }
            })
            .collect()
    }

    /// Ranked distribution shared by duel and league. `shares` holds the
    /// per-rank percentages of the distributable pool; a tie run splits
    /// the combined amount of the ranks it spans evenly. For a duel,
    /// `winner_takes_all` collapses the shares to the full pool for rank 1
    /// unless the two participants tie.
    fn ranked(
        &self,
        entry_amount: u64,
        standings: &[Standing],
        shares: &[u64],
        winner_takes_all: bool,
    ) -> Vec<Award> {
        let n = standings.len();
        if n == 0 {
            return Vec::new();
        }
        let pool = self.distributable(entry_amount * n as u64);

        let mut ranked = standings.to_vec();
        ranked.sort_by(|a, b| {
            b.score.cmp(&a.score).then(
                a.total_time_seconds
                    .partial_cmp(&b.total_time_seconds)
                    .unwrap_or(Ordering::Equal),
            )
        });

        // Per-rank amounts before tie merging. Floor-division remainders
        // go to the top rank whenever every bracket slot is occupied, so
        // the pool pays out to the cent.
        let funded = n.min(shares.len());
        let mut rank_amounts = vec![0u64; n];
        if winner_takes_all && !self.is_tie(&ranked[0], ranked.get(1)) {
            rank_amounts[0] = pool;
        } else {
            for (k, amount) in rank_amounts.iter_mut().take(funded).enumerate() {
                *amount = pool * shares[k] / 100;
            }
            if n >= shares.len() {
                let allocated: u64 = rank_amounts.iter().sum();
                rank_amounts[0] += pool - allocated;
            }
        }

        // Single pass over rank order: detect each tie run, split its
        // combined bracket amount evenly, advance past the run.
        let mut awards = Vec::with_capacity(n);
        let mut i = 0;
        while i < n {
            let mut j = i + 1;
            while j < n && self.is_tie(&ranked[j - 1], Some(&ranked[j])) {
                j += 1;
            }
            let run = (j - i) as u64;
            let combined: u64 = rank_amounts[i..j].iter().sum();
            let base = combined / run;
            let mut remainder = combined % run;
            for (offset, standing) in ranked[i..j].iter().enumerate() {
                let mut payout = base;
                if remainder > 0 {
                    payout += 1;
                    remainder -= 1;
                }
                awards.push(Award {
                    user_id: standing.user_id.clone(),
                    rank: (i + offset) as u32 + 1,
                    payout,
                    is_winner: payout > 0,
                });
            }
            i = j;
        }
        awards
    }

    fn is_tie(&self, a: &Standing, b: Option<&Standing>) -> bool {
        match b {
            Some(b) => {
                a.score == b.score
                    && (a.total_time_seconds - b.total_time_seconds).abs()
                        < self.tie_window_seconds
            }
            None => false,
        }
    }
}
