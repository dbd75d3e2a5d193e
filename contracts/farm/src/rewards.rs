//! Reward accrual arithmetic.
//!
//! Everything here is pure: the same [`advance`] routine is used by the
//! mutating `update_pool` path and by the read-only `pending_reward` view, so
//! the two can never disagree about how much a pool has earned.

use crate::{pool::PoolInfo, ContractError, EmissionState};

/// Fixed-point scale of `acc_reward_per_share`.
pub const ACC_PRECISION: i128 = 1_000_000_000_000;

/// The dev address receives `pool_reward / DEV_FEE_DIVISOR` on top of every
/// pool emission (12.5 %).
pub const DEV_FEE_DIVISOR: i128 = 8;

/// Reward tokens to be minted for one accrual step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Emission {
    /// Minted into the reward vault for the pool's stakers.
    pub pool_reward: i128,
    /// Minted directly to the dev address.
    pub dev_fee: i128,
}

impl Emission {
    pub fn merge(self, other: Emission) -> Result<Emission, ContractError> {
        Ok(Emission {
            pool_reward: self
                .pool_reward
                .checked_add(other.pool_reward)
                .ok_or(ContractError::ArithmeticOverflow)?,
            dev_fee: self
                .dev_fee
                .checked_add(other.dev_fee)
                .ok_or(ContractError::ArithmeticOverflow)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pool_reward == 0 && self.dev_fee == 0
    }
}

/// Reward emitted to a pool for the block range `[from, to)`.
///
/// `(to - from) * reward_per_block * bonus_multiplier * alloc_point / total_alloc_point`,
/// multiplied out before the single division.
pub fn pool_reward(
    from: u32,
    to: u32,
    state: &EmissionState,
    alloc_point: u64,
) -> Result<i128, ContractError> {
    if to <= from || state.total_alloc_point == 0 {
        return Ok(0);
    }
    let elapsed = i128::from(to - from);
    elapsed
        .checked_mul(state.reward_per_block)
        .and_then(|v| v.checked_mul(i128::from(state.bonus_multiplier)))
        .and_then(|v| v.checked_mul(i128::from(alloc_point)))
        .map(|v| v / i128::from(state.total_alloc_point))
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Dev-fee top-up for a given pool reward.
pub fn dev_fee(pool_reward: i128) -> i128 {
    pool_reward / DEV_FEE_DIVISOR
}

/// `amount * acc_reward_per_share / ACC_PRECISION`: the settled-reward
/// snapshot stored as a user's reward debt.
pub fn accrued(amount: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    amount
        .checked_mul(acc_reward_per_share)
        .map(|v| v / ACC_PRECISION)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Reward earned since the last settlement.
pub fn pending(
    amount: i128,
    acc_reward_per_share: i128,
    reward_debt: i128,
) -> Result<i128, ContractError> {
    accrued(amount, acc_reward_per_share)?
        .checked_sub(reward_debt)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Bring `pool` current as of block `now`.
///
/// Returns the advanced pool and the emission it implies. Nothing is
/// persisted or minted here.
pub fn advance(
    pool: &PoolInfo,
    state: &EmissionState,
    now: u32,
) -> Result<(PoolInfo, Emission), ContractError> {
    let mut next = pool.clone();
    if now <= pool.last_reward_block {
        return Ok((next, Emission::default()));
    }
    // An empty pool skips the interval entirely; nothing is owed for it.
    if pool.total_staked == 0 {
        next.last_reward_block = now;
        return Ok((next, Emission::default()));
    }

    let reward = pool_reward(pool.last_reward_block, now, state, pool.alloc_point)?;
    let increment = reward
        .checked_mul(ACC_PRECISION)
        .map(|v| v / pool.total_staked)
        .ok_or(ContractError::ArithmeticOverflow)?;

    next.acc_reward_per_share = pool
        .acc_reward_per_share
        .checked_add(increment)
        .ok_or(ContractError::ArithmeticOverflow)?;
    next.last_reward_block = now;

    Ok((
        next,
        Emission {
            pool_reward: reward,
            dev_fee: dev_fee(reward),
        },
    ))
}
