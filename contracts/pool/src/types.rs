//! Core data types for the lending pool contract.

use soroban_sdk::{contracterror, contracttype, Address};

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidAmount = 3,
    DuplicateLoan = 4,
    InsufficientReserve = 5,
    NoActiveLoan = 6,
    InsufficientCollateral = 7,
    LoanStillOpen = 8,
    NoCollateral = 9,
    ArithmeticOverflow = 10,
    ArithmeticUnderflow = 11,
    Reentrancy = 12,
}

/// Persistent ledger rows, one parallel mapping per tracked quantity.
/// Every entry defaults to zero for a participant that has never been seen.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    LendingBalance(Address),
    BorrowingBalance(Address),
    BorrowStartTime(Address),
    Collateral(Address),
}

/// Snapshot of a participant's ledger row, assembled for view calls.
///
/// Invariant: `borrowing_balance == 0` exactly when `borrow_start_time == 0`;
/// a non-zero `borrowing_balance` is the active-loan marker.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub lending_balance: i128,
    pub borrowing_balance: i128,
    pub borrow_start_time: u64,
    pub collateral: i128,
}
