use soroban_sdk::{contractclient, Address, Env};

/// The subset of the reward vault the farm drives. The farm must be the
/// vault's owner.
#[contractclient(name = "RewardVaultClient")]
pub trait RewardVaultInterface {
    fn mint(env: Env, caller: Address, to: Address, amount: i128);
    fn burn(env: Env, caller: Address, from: Address, amount: i128);
    fn safe_transfer_capped(env: Env, caller: Address, to: Address, amount: i128) -> i128;
    fn balance(env: Env, id: Address) -> i128;
}
