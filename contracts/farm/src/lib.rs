#![no_std]

pub mod events;
pub mod ledger;
pub mod pool;
pub mod rewards;
pub mod vault;

use common::{authority, ttl};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol};

use ledger::UserInfo;
use pool::PoolInfo;
use rewards::Emission;
use vault::RewardVaultClient;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_VAULT: Symbol = symbol_short!("RWD_VLT");
const EMISSION: Symbol = symbol_short!("EMISSION");

/// Pool 0 stakes the reward token itself. It is created by `initialize` and
/// is entered and left through `enter_staking` / `leave_staking`.
pub const STAKING_POOL: u32 = 0;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientStake = 5,
    PoolNotFound = 6,
    PoolExists = 7,
    UseStakingEntry = 8,
    ArithmeticOverflow = 9,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Farm-wide emission parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmissionState {
    /// Base reward minted per block, before the bonus multiplier.
    pub reward_per_block: i128,
    /// Flat scalar applied to `reward_per_block`.
    pub bonus_multiplier: u64,
    /// Always equal to the sum of every pool's `alloc_point`.
    pub total_alloc_point: u64,
    /// No pool accrues before this block.
    pub start_block: u32,
    /// Receiver of the dev-fee top-up.
    pub dev_address: Address,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmContract;

#[contractimpl]
impl FarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `reward_token`     – token emitted to stakers; the farm must be its mint admin.
    /// * `reward_vault`     – vault owned by the farm that holds emitted rewards.
    /// * `dev_address`      – receiver of the 12.5 % dev-fee top-up.
    /// * `reward_per_block` – base emission per block.
    /// * `start_block`      – first block that accrues rewards.
    ///
    /// Pool 0, staking the reward token with zero weight, is created here.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        reward_vault: Address,
        dev_address: Address,
        reward_per_block: i128,
        start_block: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_block < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let state = EmissionState {
            reward_per_block,
            bonus_multiplier: 1,
            total_alloc_point: 0,
            start_block,
            dev_address: dev_address.clone(),
        };

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&REWARD_VAULT, &reward_vault);
        env.storage().instance().set(&EMISSION, &state);
        authority::init(&env, &admin);

        pool::push(
            &env,
            &PoolInfo {
                stake_asset: reward_token.clone(),
                alloc_point: 0,
                last_reward_block: start_block,
                acc_reward_per_share: 0,
                total_staked: 0,
            },
        );

        events::publish_initialized(
            &env,
            admin,
            reward_token,
            reward_vault,
            dev_address,
            reward_per_block,
            start_block,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` of pool `pid`'s asset, paying out any pending reward
    /// first. `amount = 0` harvests only.
    pub fn deposit(env: Env, user: Address, pid: u32, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        if pid == STAKING_POOL {
            return Err(ContractError::UseStakingEntry);
        }
        Self::stake(&env, &user, pid, amount)
    }

    /// Unstake `amount` from pool `pid`, paying out pending reward.
    pub fn withdraw(env: Env, user: Address, pid: u32, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        if pid == STAKING_POOL {
            return Err(ContractError::UseStakingEntry);
        }
        Self::unstake(&env, &user, pid, amount)
    }

    /// Stake the reward token in pool 0 and receive as many vault receipt
    /// shares.
    pub fn enter_staking(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        Self::stake(&env, &user, STAKING_POOL, amount)?;

        if amount > 0 {
            Self::vault(&env)?.mint(&env.current_contract_address(), &user, &amount);
        }
        Ok(())
    }

    /// Unstake the reward token from pool 0, burning the matching receipt
    /// shares.
    pub fn leave_staking(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        Self::unstake(&env, &user, STAKING_POOL, amount)?;

        if amount > 0 {
            Self::vault(&env)?.burn(&env.current_contract_address(), &user, &amount);
        }
        Ok(())
    }

    /// Return the caller's whole stake in `pid` without touching rewards.
    ///
    /// Pending reward is forfeited and the position is zeroed. Nothing is
    /// accrued or minted, so this works even when the reward path is broken.
    pub fn emergency_withdraw(env: Env, user: Address, pid: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        let mut pool_info = pool::load(&env, pid).ok_or(ContractError::PoolNotFound)?;
        let amount = ledger::load(&env, pid, &user).amount;

        pool_info.total_staked = pool_info
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool::store(&env, pid, &pool_info);
        ledger::store(&env, pid, &user, &UserInfo::default());

        let farm = env.current_contract_address();
        if amount > 0 {
            token::Client::new(&env, &pool_info.stake_asset).transfer(&farm, &user, &amount);
        }
        if pid == STAKING_POOL && amount > 0 {
            let vault = Self::vault(&env)?;
            let held = vault.balance(&user);
            let receipts = if held < amount { held } else { amount };
            if receipts > 0 {
                vault.burn(&farm, &user, &receipts);
            }
        }

        events::publish_emergency_withdrawn(&env, user, pid, amount);

        Ok(amount)
    }

    // ── Accrual ─────────────────────────────────────────────────────────────

    /// Bring pool `pid` current as of this block and mint its emission.
    pub fn update_pool(env: Env, pid: u32) -> Result<PoolInfo, ContractError> {
        Self::require_initialized(&env)?;
        let (pool_info, emission) = Self::advance_pool(&env, pid)?;
        pool::store(&env, pid, &pool_info);
        Self::settle_emission(&env, pid, &pool_info, emission)?;
        Ok(pool_info)
    }

    /// Update every pool. Runs before weight or multiplier changes so that
    /// elapsed blocks are settled under the old parameters.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::mass_update(&env)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Append a new pool with weight `alloc_point` and return its pid.
    ///
    /// A stake asset can back at most one pool.
    pub fn add_pool(
        env: Env,
        caller: Address,
        alloc_point: u64,
        stake_asset: Address,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        Self::require_admin(&env, &caller)?;
        if pool::find_by_asset(&env, &stake_asset).is_some() {
            return Err(ContractError::PoolExists);
        }
        if with_update {
            Self::mass_update(&env)?;
        }

        let mut state = Self::load_emission(&env)?;
        let now = env.ledger().sequence();
        let last_reward_block = if now > state.start_block {
            now
        } else {
            state.start_block
        };
        state.total_alloc_point = state
            .total_alloc_point
            .checked_add(alloc_point)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::store_emission(&env, &state);

        let pid = pool::push(
            &env,
            &PoolInfo {
                stake_asset: stake_asset.clone(),
                alloc_point,
                last_reward_block,
                acc_reward_per_share: 0,
                total_staked: 0,
            },
        );

        events::publish_pool_added(&env, pid, stake_asset, alloc_point, state.total_alloc_point);

        Ok(pid)
    }

    /// Change pool `pid`'s weight.
    pub fn set_alloc_point(
        env: Env,
        caller: Address,
        pid: u32,
        alloc_point: u64,
        with_update: bool,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if pool::load(&env, pid).is_none() {
            return Err(ContractError::PoolNotFound);
        }
        if with_update {
            Self::mass_update(&env)?;
        }

        let mut pool_info = pool::load(&env, pid).ok_or(ContractError::PoolNotFound)?;
        let mut state = Self::load_emission(&env)?;
        state.total_alloc_point = state
            .total_alloc_point
            .checked_sub(pool_info.alloc_point)
            .and_then(|v| v.checked_add(alloc_point))
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool_info.alloc_point = alloc_point;

        Self::store_emission(&env, &state);
        pool::store(&env, pid, &pool_info);

        events::publish_alloc_point_set(&env, pid, alloc_point, state.total_alloc_point);

        Ok(())
    }

    /// Change the flat bonus multiplier. Every pool is settled at the old
    /// rate first.
    pub fn set_bonus_multiplier(
        env: Env,
        caller: Address,
        bonus_multiplier: u64,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        Self::mass_update(&env)?;

        let mut state = Self::load_emission(&env)?;
        state.bonus_multiplier = bonus_multiplier;
        Self::store_emission(&env, &state);

        events::publish_bonus_multiplier_set(&env, bonus_multiplier);

        Ok(())
    }

    /// Move the dev fee to `new_dev`. Only the current dev address may call
    /// this; the admin has no say.
    pub fn set_dev_address(env: Env, caller: Address, new_dev: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut state = Self::load_emission(&env)?;
        if state.dev_address != caller {
            return Err(ContractError::Unauthorized);
        }
        state.dev_address = new_dev.clone();
        Self::store_emission(&env, &state);

        events::publish_dev_address_set(&env, caller, new_dev);

        Ok(())
    }

    /// Hand the admin authority to `new_admin` in one step.
    pub fn transfer_authority(
        env: Env,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let previous =
            authority::transfer(&env, &caller, &new_admin).ok_or(ContractError::Unauthorized)?;

        events::publish_authority_transferred(&env, previous, new_admin);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward `user` would receive from pool `pid` if they harvested now.
    pub fn pending_reward(env: Env, pid: u32, user: Address) -> Result<i128, ContractError> {
        let (pool_info, _) = Self::advance_pool(&env, pid)?;
        let info = ledger::load(&env, pid, &user);
        rewards::pending(info.amount, pool_info.acc_reward_per_share, info.reward_debt)
    }

    pub fn pool_length(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn pool_info(env: Env, pid: u32) -> Result<PoolInfo, ContractError> {
        pool::load(&env, pid).ok_or(ContractError::PoolNotFound)
    }

    pub fn user_info(env: Env, pid: u32, user: Address) -> UserInfo {
        ledger::load(&env, pid, &user)
    }

    pub fn emission_state(env: Env) -> Result<EmissionState, ContractError> {
        Self::load_emission(&env)
    }

    pub fn total_alloc_point(env: Env) -> u64 {
        Self::load_emission(&env)
            .map(|s| s.total_alloc_point)
            .unwrap_or(0)
    }

    pub fn bonus_multiplier(env: Env) -> u64 {
        Self::load_emission(&env)
            .map(|s| s.bonus_multiplier)
            .unwrap_or(0)
    }

    pub fn reward_per_block(env: Env) -> i128 {
        Self::load_emission(&env)
            .map(|s| s.reward_per_block)
            .unwrap_or(0)
    }

    pub fn start_block(env: Env) -> u32 {
        Self::load_emission(&env).map(|s| s.start_block).unwrap_or(0)
    }

    pub fn dev_address(env: Env) -> Result<Address, ContractError> {
        Self::load_emission(&env).map(|s| s.dev_address)
    }

    pub fn admin(env: Env) -> Result<Address, ContractError> {
        authority::holder(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn reward_vault(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_VAULT)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and revert unless it holds the authority.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !authority::is_holder(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_emission(env: &Env) -> Result<EmissionState, ContractError> {
        env.storage()
            .instance()
            .get(&EMISSION)
            .ok_or(ContractError::NotInitialized)
    }

    fn store_emission(env: &Env, state: &EmissionState) {
        env.storage().instance().set(&EMISSION, state);
        ttl::extend_instance(env);
    }

    fn vault(env: &Env) -> Result<RewardVaultClient<'_>, ContractError> {
        let address: Address = env
            .storage()
            .instance()
            .get(&REWARD_VAULT)
            .ok_or(ContractError::NotInitialized)?;
        Ok(RewardVaultClient::new(env, &address))
    }

    /// Compute pool `pid` as of the current block without persisting it.
    fn advance_pool(env: &Env, pid: u32) -> Result<(PoolInfo, Emission), ContractError> {
        let state = Self::load_emission(env)?;
        let current = pool::load(env, pid).ok_or(ContractError::PoolNotFound)?;
        rewards::advance(&current, &state, env.ledger().sequence())
    }

    /// Advance and persist every pool, then mint the combined emission once
    /// all pool state is written.
    fn mass_update(env: &Env) -> Result<(), ContractError> {
        let mut total = Emission::default();
        for pid in 0..pool::count(env) {
            let (pool_info, emission) = Self::advance_pool(env, pid)?;
            pool::store(env, pid, &pool_info);
            if !emission.is_empty() {
                events::publish_pool_updated(
                    env,
                    pid,
                    pool_info.last_reward_block,
                    pool_info.acc_reward_per_share,
                    emission.pool_reward,
                    emission.dev_fee,
                );
            }
            total = total.merge(emission)?;
        }
        Self::mint_emission(env, &total)
    }

    /// Publish and mint the emission of an already persisted pool update.
    fn settle_emission(
        env: &Env,
        pid: u32,
        pool_info: &PoolInfo,
        emission: Emission,
    ) -> Result<(), ContractError> {
        if emission.is_empty() {
            return Ok(());
        }
        events::publish_pool_updated(
            env,
            pid,
            pool_info.last_reward_block,
            pool_info.acc_reward_per_share,
            emission.pool_reward,
            emission.dev_fee,
        );
        Self::mint_emission(env, &emission)
    }

    /// Mint the stakers' share into the vault and the dev fee to the dev
    /// address.
    fn mint_emission(env: &Env, emission: &Emission) -> Result<(), ContractError> {
        if emission.is_empty() {
            return Ok(());
        }
        let reward_token = Self::reward_token(env.clone())?;
        let vault = Self::reward_vault(env.clone())?;
        let dev_address = Self::load_emission(env)?.dev_address;

        let minter = token::StellarAssetClient::new(env, &reward_token);
        if emission.pool_reward > 0 {
            minter.mint(&vault, &emission.pool_reward);
        }
        if emission.dev_fee > 0 {
            minter.mint(&dev_address, &emission.dev_fee);
        }
        Ok(())
    }

    /// Pay `pending` reward out of the vault, capped at the vault's float.
    fn pay_reward(env: &Env, user: &Address, pid: u32, pending: i128) -> Result<(), ContractError> {
        if pending <= 0 {
            return Ok(());
        }
        let paid = Self::vault(env)?.safe_transfer_capped(
            &env.current_contract_address(),
            user,
            &pending,
        );
        events::publish_harvested(env, user.clone(), pid, pending, paid);
        Ok(())
    }

    /// Shared deposit path.
    ///
    /// Ledger effects (pool accrual, user amount and reward debt) are all
    /// written before the first token call.
    fn stake(env: &Env, user: &Address, pid: u32, amount: i128) -> Result<(), ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let (mut pool_info, emission) = Self::advance_pool(env, pid)?;
        let mut info = ledger::load(env, pid, user);

        let pending = if info.amount > 0 {
            rewards::pending(info.amount, pool_info.acc_reward_per_share, info.reward_debt)?
        } else {
            0
        };

        info.amount = info
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool_info.total_staked = pool_info
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        info.reward_debt = rewards::accrued(info.amount, pool_info.acc_reward_per_share)?;

        pool::store(env, pid, &pool_info);
        ledger::store(env, pid, user, &info);

        Self::settle_emission(env, pid, &pool_info, emission)?;
        Self::pay_reward(env, user, pid, pending)?;
        if amount > 0 {
            token::Client::new(env, &pool_info.stake_asset).transfer(
                user,
                &env.current_contract_address(),
                &amount,
            );
        }

        events::publish_deposited(env, user.clone(), pid, amount, info.amount);

        Ok(())
    }

    /// Shared withdraw path. Same effects-before-interactions ordering as
    /// [`Self::stake`].
    fn unstake(env: &Env, user: &Address, pid: u32, amount: i128) -> Result<(), ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if pool::load(env, pid).is_none() {
            return Err(ContractError::PoolNotFound);
        }
        let mut info = ledger::load(env, pid, user);
        if amount > info.amount {
            return Err(ContractError::InsufficientStake);
        }

        let (mut pool_info, emission) = Self::advance_pool(env, pid)?;
        let pending =
            rewards::pending(info.amount, pool_info.acc_reward_per_share, info.reward_debt)?;

        info.amount -= amount;
        pool_info.total_staked = pool_info
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        info.reward_debt = rewards::accrued(info.amount, pool_info.acc_reward_per_share)?;

        pool::store(env, pid, &pool_info);
        ledger::store(env, pid, user, &info);

        Self::settle_emission(env, pid, &pool_info, emission)?;
        Self::pay_reward(env, user, pid, pending)?;
        if amount > 0 {
            token::Client::new(env, &pool_info.stake_asset).transfer(
                &env.current_contract_address(),
                user,
                &amount,
            );
        }

        events::publish_withdrawn(env, user.clone(), pid, amount, info.amount);

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
