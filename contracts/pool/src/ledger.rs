//! Checked per-participant balance storage.
//!
//! All balance mutation funnels through this module. Credits trap on
//! `i128` overflow, debits trap before a balance can go negative, and the
//! two loan fields are only ever written together, so the
//! "principal == 0 iff start time == 0" invariant cannot be broken by a
//! partial write.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::types::{DataKey, Error};

fn read_amount(env: &Env, key: &DataKey) -> i128 {
    env.storage().persistent().get(key).unwrap_or(0)
}

pub fn lending_balance(env: &Env, who: &Address) -> i128 {
    read_amount(env, &DataKey::LendingBalance(who.clone()))
}

pub fn borrowing_balance(env: &Env, who: &Address) -> i128 {
    read_amount(env, &DataKey::BorrowingBalance(who.clone()))
}

pub fn borrow_start_time(env: &Env, who: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::BorrowStartTime(who.clone()))
        .unwrap_or(0)
}

pub fn collateral(env: &Env, who: &Address) -> i128 {
    read_amount(env, &DataKey::Collateral(who.clone()))
}

fn credit(env: &Env, key: &DataKey, amount: i128) -> i128 {
    let new_balance = read_amount(env, key)
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
    env.storage().persistent().set(key, &new_balance);
    new_balance
}

fn debit(env: &Env, key: &DataKey, amount: i128) -> i128 {
    let new_balance = read_amount(env, key)
        .checked_sub(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticUnderflow));
    if new_balance < 0 {
        panic_with_error!(env, Error::ArithmeticUnderflow);
    }
    env.storage().persistent().set(key, &new_balance);
    new_balance
}

pub fn credit_lending(env: &Env, who: &Address, amount: i128) -> i128 {
    credit(env, &DataKey::LendingBalance(who.clone()), amount)
}

pub fn credit_collateral(env: &Env, who: &Address, amount: i128) -> i128 {
    credit(env, &DataKey::Collateral(who.clone()), amount)
}

pub fn debit_collateral(env: &Env, who: &Address, amount: i128) -> i128 {
    debit(env, &DataKey::Collateral(who.clone()), amount)
}

/// Record an active loan: principal and start time are set as one unit.
pub fn open_loan(env: &Env, who: &Address, principal: i128, start_time: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::BorrowingBalance(who.clone()), &principal);
    env.storage()
        .persistent()
        .set(&DataKey::BorrowStartTime(who.clone()), &start_time);
}

/// Clear an active loan: both fields reset to zero as one unit.
pub fn settle_loan(env: &Env, who: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::BorrowingBalance(who.clone()), &0_i128);
    env.storage()
        .persistent()
        .set(&DataKey::BorrowStartTime(who.clone()), &0_u64);
}
