//! Event types and topic constants for the lending pool contract.
//! Stable event schemas for indexing and analytics.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

/// Event emitted when a participant supplies the lending asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LendEvent {
    pub lender: Address,
    pub amount: i128,
    pub new_balance: i128,
}

/// Event emitted when a loan is opened.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowEvent {
    pub borrower: Address,
    pub amount: i128,
    pub start_time: u64,
}

/// Event emitted when a loan is repaid in full.
/// Carries the interest actually charged alongside the principal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepayEvent {
    pub borrower: Address,
    pub principal: i128,
    pub interest: i128,
    pub timestamp: u64,
}

/// Event emitted when collateral moves in or out (deposit, withdraw).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralEvent {
    pub event_type: Symbol,
    pub participant: Address,
    pub amount: i128,
    pub new_collateral: i128,
}

/// Publish a lend event.
pub fn publish_lend(env: &Env, event: LendEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("lend")), event);
}

/// Publish a borrow event.
pub fn publish_borrow(env: &Env, event: BorrowEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("borrow")), event);
}

/// Publish a repay event.
pub fn publish_repay(env: &Env, event: RepayEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("repay")), event);
}

/// Publish a collateral movement event.
pub fn publish_collateral(env: &Env, topic: (Symbol, Symbol), event: CollateralEvent) {
    env.events().publish(topic, event);
}
