#![no_std]

pub mod events;
mod queue;

use common::{authority, ttl};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, BytesN, Env, InvokeError,
    Symbol, TryFromVal, Val, Vec,
};

// ── Delay bounds (seconds) ───────────────────────────────────────────────────

const DAY: u64 = 86_400;

/// How long after `eta` a queued transaction stays executable.
pub const GRACE_PERIOD: u64 = 14 * DAY;
pub const MINIMUM_DELAY: u64 = DAY;
pub const MAXIMUM_DELAY: u64 = 30 * DAY;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const DELAY: Symbol = symbol_short!("DELAY");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const PENDING_ADMIN_SET: Symbol = symbol_short!("PADM_SET");
const ADMIN_INITIALIZED: Symbol = symbol_short!("ADM_INIT");
const VALUE_TOKEN: Symbol = symbol_short!("VAL_TOK");

// Functions reachable through a self-targeted transaction.
const SET_DELAY: Symbol = symbol_short!("set_delay");
const SET_PENDING_ADMIN: &str = "set_pending_admin";

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    DelayOutOfRange = 4,
    EtaTooSoon = 5,
    TransactionNotQueued = 6,
    TransactionNotSurpassedLock = 7,
    TransactionStale = 8,
    NoPendingAdmin = 9,
    UnknownSelfCall = 10,
    InvalidCallData = 11,
    InvalidAmount = 12,
    InsufficientValue = 13,
    ArithmeticOverflow = 14,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Result of running a queued transaction that passed every queue check.
///
/// A `Reverted` target leaves no effects behind, but the queue entry is
/// spent all the same; re-queue under a new `eta` to retry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExecutionOutcome {
    Executed,
    /// Error code reported by the target.
    Reverted(u32),
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Delayed-execution queue for privileged calls.
///
/// The admin queues a call with an `eta` at least `delay` seconds away,
/// and may execute it once `eta` has passed and before
/// `eta + GRACE_PERIOD`. The timelock itself is meant to hold the authority
/// of the contracts it governs.
#[contract]
pub struct TimelockContract;

#[contractimpl]
impl TimelockContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the queue.
    ///
    /// * `delay`       – minimum distance between queueing and `eta`.
    /// * `value_token` – asset used to deliver a transaction's `value`.
    pub fn initialize(
        env: Env,
        admin: Address,
        delay: u64,
        value_token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        Self::check_delay(delay)?;

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&DELAY, &delay);
        env.storage().instance().set(&ADMIN_INITIALIZED, &false);
        env.storage().instance().set(&VALUE_TOKEN, &value_token);
        authority::init(&env, &admin);

        events::publish_initialized(&env, admin, delay, value_token);

        Ok(())
    }

    // ── Queue ───────────────────────────────────────────────────────────────

    /// Schedule `target.signature(data...)` for `eta` and return its key.
    ///
    /// Calls targeting the timelock itself carry no value.
    pub fn queue_transaction(
        env: Env,
        caller: Address,
        target: Address,
        value: i128,
        signature: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> Result<BytesN<32>, ContractError> {
        Self::require_admin(&env, &caller)?;
        if value < 0 || (value != 0 && target == env.current_contract_address()) {
            return Err(ContractError::InvalidAmount);
        }

        let earliest = env
            .ledger()
            .timestamp()
            .checked_add(Self::delay(env.clone()))
            .ok_or(ContractError::ArithmeticOverflow)?;
        if eta < earliest {
            return Err(ContractError::EtaTooSoon);
        }

        let key = queue::key(&env, &target, value, &signature, &data, eta);
        queue::insert(&env, &key);

        events::publish_queued(&env, key.clone(), target, value, signature, eta);

        Ok(key)
    }

    /// Drop a queued transaction. Clearing a key that is not queued is a
    /// no-op.
    pub fn cancel_transaction(
        env: Env,
        caller: Address,
        target: Address,
        value: i128,
        signature: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> Result<BytesN<32>, ContractError> {
        Self::require_admin(&env, &caller)?;

        let key = queue::key(&env, &target, value, &signature, &data, eta);
        let was_queued = queue::remove(&env, &key);

        events::publish_cancelled(&env, key.clone(), target, signature, eta, was_queued);

        Ok(key)
    }

    /// Run a queued transaction inside its execution window.
    ///
    /// The key is consumed before the target runs. On success `value` of the
    /// value token is sent to the target.
    pub fn execute_transaction(
        env: Env,
        caller: Address,
        target: Address,
        value: i128,
        signature: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> Result<ExecutionOutcome, ContractError> {
        Self::require_admin(&env, &caller)?;

        let key = queue::key(&env, &target, value, &signature, &data, eta);
        if !queue::contains(&env, &key) {
            return Err(ContractError::TransactionNotQueued);
        }

        let now = env.ledger().timestamp();
        if now < eta {
            return Err(ContractError::TransactionNotSurpassedLock);
        }
        let expiry = eta
            .checked_add(GRACE_PERIOD)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if now > expiry {
            return Err(ContractError::TransactionStale);
        }

        let this = env.current_contract_address();
        let delivers_value = value > 0;
        let value_token = Self::value_token(env.clone())?;
        if delivers_value && token::Client::new(&env, &value_token).balance(&this) < value {
            return Err(ContractError::InsufficientValue);
        }

        queue::remove(&env, &key);

        let result = if target == this {
            Self::dispatch_self(&env, &signature, &data)
        } else {
            Self::invoke_target(&env, &target, &signature, data)
        };

        match result {
            Ok(()) => {
                if delivers_value {
                    token::Client::new(&env, &value_token).transfer(&this, &target, &value);
                }
                events::publish_executed(&env, key, target, value, signature, eta);
                Ok(ExecutionOutcome::Executed)
            }
            Err(code) => {
                events::publish_reverted(&env, key, target, signature, code);
                Ok(ExecutionOutcome::Reverted(code))
            }
        }
    }

    // ── Self-governed settings ──────────────────────────────────────────────

    /// Change the delay. Only the timelock itself may call this, which in
    /// practice means through a queued self-targeted transaction.
    pub fn set_delay(env: Env, caller: Address, delay: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if caller != env.current_contract_address() {
            return Err(ContractError::Unauthorized);
        }
        Self::apply_delay(&env, delay)
    }

    /// Nominate the next admin.
    ///
    /// Until the first `accept_admin` only the timelock itself may
    /// nominate, and only once; afterwards only the current admin.
    pub fn set_pending_admin(
        env: Env,
        caller: Address,
        candidate: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let allowed = if Self::admin_initialized(env.clone()) {
            authority::is_holder(&env, &caller)
        } else {
            caller == env.current_contract_address()
        };
        if !allowed {
            return Err(ContractError::Unauthorized);
        }
        Self::apply_pending_admin(&env, candidate)
    }

    /// Complete a handoff. Must be called by the nominated admin.
    pub fn accept_admin(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;
        if pending != caller {
            return Err(ContractError::Unauthorized);
        }

        let previous = authority::holder(&env).ok_or(ContractError::NotInitialized)?;
        authority::transfer(&env, &previous, &caller).ok_or(ContractError::Unauthorized)?;
        env.storage().instance().remove(&PENDING_ADMIN);
        env.storage().instance().set(&ADMIN_INITIALIZED, &true);
        ttl::extend_instance(&env);

        events::publish_admin_accepted(&env, previous, caller);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn admin(env: Env) -> Result<Address, ContractError> {
        authority::holder(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn delay(env: Env) -> u64 {
        env.storage().instance().get(&DELAY).unwrap_or(0)
    }

    pub fn admin_initialized(env: Env) -> bool {
        env.storage()
            .instance()
            .get(&ADMIN_INITIALIZED)
            .unwrap_or(false)
    }

    pub fn value_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&VALUE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_queued(env: Env, key: BytesN<32>) -> bool {
        queue::contains(&env, &key)
    }

    /// The key `queue_transaction` would assign to these parameters.
    pub fn transaction_key(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> BytesN<32> {
        queue::key(&env, &target, value, &signature, &data, eta)
    }

    pub fn grace_period() -> u64 {
        GRACE_PERIOD
    }

    pub fn minimum_delay() -> u64 {
        MINIMUM_DELAY
    }

    pub fn maximum_delay() -> u64 {
        MAXIMUM_DELAY
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and revert unless it is the admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !authority::is_holder(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn check_delay(delay: u64) -> Result<(), ContractError> {
        if !(MINIMUM_DELAY..=MAXIMUM_DELAY).contains(&delay) {
            return Err(ContractError::DelayOutOfRange);
        }
        Ok(())
    }

    fn apply_delay(env: &Env, delay: u64) -> Result<(), ContractError> {
        Self::check_delay(delay)?;
        let previous = Self::delay(env.clone());
        env.storage().instance().set(&DELAY, &delay);
        ttl::extend_instance(env);

        events::publish_delay_set(env, previous, delay);
        Ok(())
    }

    /// Record `candidate` as pending admin. Before the first `accept_admin`
    /// a nomination may only be made once.
    fn apply_pending_admin(env: &Env, candidate: Address) -> Result<(), ContractError> {
        if !Self::admin_initialized(env.clone()) {
            if env.storage().instance().has(&PENDING_ADMIN_SET) {
                return Err(ContractError::Unauthorized);
            }
            env.storage().instance().set(&PENDING_ADMIN_SET, &true);
        }
        env.storage().instance().set(&PENDING_ADMIN, &candidate);
        ttl::extend_instance(env);

        events::publish_pending_admin_set(env, candidate);
        Ok(())
    }

    /// Run a transaction that targets the timelock itself. The host does not
    /// let a contract call into itself, so the supported setters are
    /// dispatched here directly.
    fn dispatch_self(env: &Env, signature: &Symbol, data: &Vec<Val>) -> Result<(), u32> {
        let result = if *signature == SET_DELAY {
            Self::single_arg::<u64>(env, data).and_then(|delay| Self::apply_delay(env, delay))
        } else if *signature == Symbol::new(env, SET_PENDING_ADMIN) {
            Self::single_arg::<Address>(env, data)
                .and_then(|candidate| Self::apply_pending_admin(env, candidate))
        } else {
            Err(ContractError::UnknownSelfCall)
        };
        result.map_err(|e| e as u32)
    }

    fn single_arg<T>(env: &Env, data: &Vec<Val>) -> Result<T, ContractError>
    where
        T: TryFromVal<Env, Val>,
    {
        if data.len() != 1 {
            return Err(ContractError::InvalidCallData);
        }
        let raw = data.get(0).ok_or(ContractError::InvalidCallData)?;
        T::try_from_val(env, &raw).map_err(|_| ContractError::InvalidCallData)
    }

    /// Call an external target. Its effects are rolled back on failure and
    /// the error code is handed back.
    fn invoke_target(
        env: &Env,
        target: &Address,
        signature: &Symbol,
        data: Vec<Val>,
    ) -> Result<(), u32> {
        match env.try_invoke_contract::<Val, soroban_sdk::Error>(target, signature, data) {
            Ok(_) => Ok(()),
            Err(Ok(err)) => Err(err.get_code()),
            Err(Err(InvokeError::Contract(code))) => Err(code),
            Err(Err(InvokeError::Abort)) => Err(0),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
