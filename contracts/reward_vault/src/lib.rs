#![no_std]

pub mod events;

use common::{authority, ttl};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const TOTAL_SUPPLY: Symbol = symbol_short!("TOT_SUP");

// Per-holder persistent storage uses tuple keys:  (prefix, holder_address)
const BALANCE: Symbol = symbol_short!("BAL");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    ArithmeticOverflow = 6,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Reward sink sitting between the farm and its stakers.
///
/// Freshly emitted reward tokens are minted into this contract and paid out
/// through [`RewardVault::safe_transfer_capped`]. The vault also keeps a
/// receipt-share ledger that mirrors single-sided reward-token stakes in the
/// farm's pool 0. Every mutating call is reserved to the owner (the farm).
#[contract]
pub struct RewardVault;

#[contractimpl]
impl RewardVault {
    // ── Initialisation ──────────────────────────────────────────────────────

    pub fn initialize(env: Env, owner: Address, reward_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        authority::init(&env, &owner);

        events::publish_initialized(&env, owner, reward_token);

        Ok(())
    }

    // ── Receipt shares ──────────────────────────────────────────────────────

    /// Mint `amount` receipt shares to `to`.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        Self::store_balance(&env, &to, balance);
        env.storage().instance().set(&TOTAL_SUPPLY, &supply);

        events::publish_minted(&env, to, amount, supply);

        Ok(())
    }

    /// Burn `amount` receipt shares held by `from`.
    pub fn burn(env: Env, caller: Address, from: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let held = Self::balance(env.clone(), from.clone());
        if held < amount {
            return Err(ContractError::InsufficientBalance);
        }
        let supply = Self::total_supply(env.clone())
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        Self::store_balance(&env, &from, held - amount);
        env.storage().instance().set(&TOTAL_SUPPLY, &supply);

        events::publish_burned(&env, from, amount, supply);

        Ok(())
    }

    // ── Reward payout ───────────────────────────────────────────────────────

    /// Pay up to `amount` reward tokens to `to`.
    ///
    /// Transfers `min(amount, float)` where `float` is the vault's own
    /// reward-token balance, and returns what was actually sent. A short
    /// float never fails the call.
    pub fn safe_transfer_capped(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_owner(&env, &caller)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let reward_token = Self::reward_token(env.clone())?;
        let client = token::Client::new(&env, &reward_token);
        let float = client.balance(&env.current_contract_address());
        let paid = if amount > float { float } else { amount };

        if paid > 0 {
            client.transfer(&env.current_contract_address(), &to, &paid);
        }

        events::publish_reward_paid(&env, to, amount, paid);

        Ok(paid)
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let previous =
            authority::transfer(&env, &caller, &new_owner).ok_or(ContractError::Unauthorized)?;

        events::publish_ownership_transferred(&env, previous, new_owner);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        authority::holder(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage().persistent().get(&(BALANCE, id)).unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and revert unless it owns the vault.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !authority::is_holder(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn store_balance(env: &Env, id: &Address, amount: i128) {
        let key = (BALANCE, id.clone());
        env.storage().persistent().set(&key, &amount);
        ttl::extend_persistent(env, &key);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
