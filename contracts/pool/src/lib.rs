#![no_std]

//! Single-asset lending pool: supply, collateralized borrowing, simple
//! interest accrual, and repayment, settled against external token
//! contracts (the lending asset and the collateral asset).
//!
//! # Reentrancy
//! Every operation commits its ledger mutation before making its single
//! external token call, so a reentrant call observes the updated state and
//! fails its own preconditions (a reentrant repay sees no active loan). A
//! pool-wide guard flag on all mutating entrypoints backs this up as a
//! defense-in-depth measure; a trapped invocation reverts the flag along
//! with everything else.

mod events;
mod interest;
mod ledger;
mod types;


use soroban_sdk::{
    contract, contractimpl, panic_with_error, symbol_short, token, Address, Env, Symbol,
};

use events::{BorrowEvent, CollateralEvent, LendEvent, RepayEvent};
use types::{Error, Position};

/// Instance storage key for the lending-asset token address.
fn asset_key(env: &Env) -> Symbol {
    Symbol::new(env, "asset")
}

/// Instance storage key for the collateral-asset token address.
fn collateral_asset_key(env: &Env) -> Symbol {
    Symbol::new(env, "collateral_asset")
}

/// Instance storage key for the annual interest rate (whole percent).
fn rate_key(env: &Env) -> Symbol {
    Symbol::new(env, "rate")
}

/// Instance storage key for reentrancy guard.
fn reentrancy_key(env: &Env) -> Symbol {
    Symbol::new(env, "reentrancy")
}

fn read_asset(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&asset_key(env))
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn read_collateral_asset(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&collateral_asset_key(env))
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn read_rate(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&rate_key(env))
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn set_reentrancy_guard(env: &Env) {
    let key = reentrancy_key(env);
    if env.storage().instance().get(&key).unwrap_or(false) {
        panic_with_error!(env, Error::Reentrancy);
    }
    env.storage().instance().set(&key, &true);
}

fn clear_reentrancy_guard(env: &Env) {
    env.storage().instance().set(&reentrancy_key(env), &false);
}

/// Principal plus interest accrued between `start_time` and `now`.
fn amount_owed(env: &Env, principal: i128, start_time: u64, now: u64) -> i128 {
    let elapsed = now.saturating_sub(start_time);
    let interest = interest::interest_due(principal, read_rate(env), elapsed)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow));
    principal
        .checked_add(interest)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticOverflow))
}

#[contract]
pub struct LendingPool;

#[contractimpl]
impl LendingPool {
    /// Initialize the pool with the lending-asset and collateral-asset token
    /// addresses and the annual interest rate in whole percent (5 means 5%).
    /// The rate is immutable after creation.
    ///
    /// # Panics
    /// * `AlreadyInitialized` if called a second time
    pub fn init(env: Env, asset: Address, collateral_asset: Address, interest_rate: u32) {
        if env.storage().instance().has(&asset_key(&env)) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        env.storage().instance().set(&asset_key(&env), &asset);
        env.storage()
            .instance()
            .set(&collateral_asset_key(&env), &collateral_asset);
        env.storage().instance().set(&rate_key(&env), &interest_rate);
    }

    /// Supply `amount` of the lending asset to the pool. The amount is
    /// pulled from `from` after the lending balance is credited; supplied
    /// funds cannot be withdrawn.
    ///
    /// # Panics
    /// * `InvalidAmount` – amount is zero or negative
    /// * `NotInitialized` – pool not configured
    pub fn lend(env: Env, from: Address, amount: i128) {
        set_reentrancy_guard(&env);
        from.require_auth();
        let asset = read_asset(&env);

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let new_balance = ledger::credit_lending(&env, &from, amount);

        token::Client::new(&env, &asset).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        clear_reentrancy_guard(&env);

        events::publish_lend(
            &env,
            LendEvent {
                lender: from,
                amount,
                new_balance,
            },
        );
    }

    /// Open a loan of `amount` against posted collateral. At most one loan
    /// may be active per participant. The loan state is committed before the
    /// asset is pushed to the borrower.
    ///
    /// # Panics
    /// * `InvalidAmount` – amount is zero or negative
    /// * `DuplicateLoan` – a loan is already active for `from`
    /// * `NoCollateral` – `from` has no posted collateral
    /// * `InsufficientReserve` – the pool holds less than `amount`
    pub fn borrow(env: Env, from: Address, amount: i128) {
        set_reentrancy_guard(&env);
        from.require_auth();
        let asset = read_asset(&env);

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        if ledger::borrowing_balance(&env, &from) != 0 {
            panic_with_error!(&env, Error::DuplicateLoan);
        }
        if ledger::collateral(&env, &from) == 0 {
            panic_with_error!(&env, Error::NoCollateral);
        }

        let gateway = token::Client::new(&env, &asset);
        if gateway.balance(&env.current_contract_address()) < amount {
            panic_with_error!(&env, Error::InsufficientReserve);
        }

        let start_time = env.ledger().timestamp();
        ledger::open_loan(&env, &from, amount, start_time);

        gateway.transfer(&env.current_contract_address(), &from, &amount);

        clear_reentrancy_guard(&env);

        events::publish_borrow(
            &env,
            BorrowEvent {
                borrower: from,
                amount,
                start_time,
            },
        );
    }

    /// Repay the active loan in full: principal plus interest accrued since
    /// the loan was opened. Both loan fields are reset before the repayment
    /// is pulled from `from`, so a reentrant call finds no active loan.
    ///
    /// # Panics
    /// * `NoActiveLoan` – `from` has no outstanding loan
    /// * `ArithmeticOverflow` – principal plus interest out of range
    pub fn repay(env: Env, from: Address) {
        set_reentrancy_guard(&env);
        from.require_auth();
        let asset = read_asset(&env);

        let principal = ledger::borrowing_balance(&env, &from);
        if principal == 0 {
            panic_with_error!(&env, Error::NoActiveLoan);
        }

        let now = env.ledger().timestamp();
        let start_time = ledger::borrow_start_time(&env, &from);
        let total = amount_owed(&env, principal, start_time, now);
        let interest = total - principal;

        ledger::settle_loan(&env, &from);

        token::Client::new(&env, &asset).transfer(
            &from,
            &env.current_contract_address(),
            &total,
        );

        clear_reentrancy_guard(&env);

        events::publish_repay(
            &env,
            RepayEvent {
                borrower: from,
                principal,
                interest,
                timestamp: now,
            },
        );
    }

    /// Post `amount` of the collateral asset. The collateral balance is
    /// credited before the amount is pulled from `from`.
    ///
    /// # Panics
    /// * `InvalidAmount` – amount is zero or negative
    pub fn deposit_collateral(env: Env, from: Address, amount: i128) {
        set_reentrancy_guard(&env);
        from.require_auth();
        let collateral_asset = read_collateral_asset(&env);

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let new_collateral = ledger::credit_collateral(&env, &from, amount);

        token::Client::new(&env, &collateral_asset).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        clear_reentrancy_guard(&env);

        events::publish_collateral(
            &env,
            (symbol_short!("pool"), symbol_short!("deposit")),
            CollateralEvent {
                event_type: symbol_short!("deposit"),
                participant: from,
                amount,
                new_collateral,
            },
        );
    }

    /// Withdraw `amount` of posted collateral. Blocked while a loan is
    /// active. The collateral balance is debited before the amount is pushed
    /// back to `from`.
    ///
    /// # Panics
    /// * `InvalidAmount` – amount is zero or negative
    /// * `LoanStillOpen` – `from` has an active loan
    /// * `InsufficientCollateral` – amount exceeds posted collateral
    pub fn withdraw_collateral(env: Env, from: Address, amount: i128) {
        set_reentrancy_guard(&env);
        from.require_auth();
        let collateral_asset = read_collateral_asset(&env);

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        if ledger::borrowing_balance(&env, &from) != 0 {
            panic_with_error!(&env, Error::LoanStillOpen);
        }
        if ledger::collateral(&env, &from) < amount {
            panic_with_error!(&env, Error::InsufficientCollateral);
        }

        let new_collateral = ledger::debit_collateral(&env, &from, amount);

        token::Client::new(&env, &collateral_asset).transfer(
            &env.current_contract_address(),
            &from,
            &amount,
        );

        clear_reentrancy_guard(&env);

        events::publish_collateral(
            &env,
            (symbol_short!("pool"), symbol_short!("withdraw")),
            CollateralEvent {
                event_type: symbol_short!("withdraw"),
                participant: from,
                amount,
                new_collateral,
            },
        );
    }

    /// Get a participant's ledger row (view function). All fields are zero
    /// for a participant the pool has never seen.
    pub fn get_position(env: Env, who: Address) -> Position {
        Position {
            lending_balance: ledger::lending_balance(&env, &who),
            borrowing_balance: ledger::borrowing_balance(&env, &who),
            borrow_start_time: ledger::borrow_start_time(&env, &who),
            collateral: ledger::collateral(&env, &who),
        }
    }

    /// Lending-asset balance currently held by the pool (view function).
    pub fn reserve(env: Env) -> i128 {
        token::Client::new(&env, &read_asset(&env)).balance(&env.current_contract_address())
    }

    /// Amount a full repayment would pull right now: principal plus interest
    /// accrued to the current ledger timestamp. Zero when no loan is active
    /// (view function).
    pub fn repayment_due(env: Env, who: Address) -> i128 {
        let principal = ledger::borrowing_balance(&env, &who);
        if principal == 0 {
            return 0;
        }
        let start_time = ledger::borrow_start_time(&env, &who);
        amount_owed(&env, principal, start_time, env.ledger().timestamp())
    }

    /// Annual interest rate in whole percent (view function).
    pub fn interest_rate(env: Env) -> u32 {
        read_rate(&env)
    }
}
