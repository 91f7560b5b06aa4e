//! Instruction types

use {
    crate::state::MetadataData,
    borsh::{BorshDeserialize, BorshSerialize},
    solana_program::program_error::ProgramError,
};

/// Instructions supported by the creator metadata program.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum MetadataInstruction {
    /// Create the metadata account for a mint
    ///
    /// Accounts (strict order):
    /// 0. `[writable, signer]` payer
    /// 1. `[]` system program
    /// 2. `[]` mint
    /// 3. `[writable]` metadata PDA
    /// 4. `[signer]` mint authority (freeze authority if the mint has none)
    /// 5. `[]` update authority
    /// 6. `..` optional extra signers, e.g. creators verifying themselves
    CreateMetadataAccount {
        /// Payload to validate and store
        data: MetadataData,
        /// Whether the data may be changed later
        is_mutable: bool,
    },
}

impl MetadataInstruction {
    /// Unpack a byte array into a MetadataInstruction
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        borsh::from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }

    /// Pack the MetadataInstruction into a byte array
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.serialize(&mut buf);
        buf
    }
}
