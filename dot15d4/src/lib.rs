#![allow(unused)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
pub(crate) mod utils;

pub mod mac;
pub mod phy;
pub mod sync;
pub mod time;
pub mod upper;
