#![deny(missing_docs)]
#![cfg_attr(not(test), forbid(unsafe_code))]

//! Per-mint token metadata with royalty creators

pub mod assertions;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

// Exclude the on-chain entrypoint for host builds, unit tests, or when the
// consumer opts into the "no-entrypoint" feature.
#[cfg(all(target_os = "solana", not(feature = "no-entrypoint"), not(test)))]
mod entrypoint;

use solana_program::pubkey::Pubkey;

solana_program::declare_id!("CrMetaDaTa1111111111111111111111111111111111");

/// PDA seed for metadata account
pub const METADATA_SEED: &[u8] = b"metadata";

/// Helper to derive the `TokenMetadata` PDA for a given mint
pub fn find_metadata_pda_with_program(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[METADATA_SEED, mint.as_ref()], program_id)
}
