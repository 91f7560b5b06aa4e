//! Creator Metadata – Rust SDK (client-side helpers)
//!
//! This crate provides:
//! - PDA helpers for metadata accounts
//! - Instruction builders with correct account ordering and client-side validation
//! - Transaction builders for common flows (compose Vec<Instruction>)
//! - A reader that fetches and decodes metadata accounts
//!
//! The builders run the same payload validation as the on-chain program, so a
//! rejected payload fails here with the program's error before any fee is paid.
//! Signers, recent blockhashes, and submission are left to the caller.

mod reader;

pub use reader::{AccountFetcher, MetadataReader};

use {
    creator_metadata::{
        self as program, assertions::assert_data_valid, error::MetadataError,
        instruction::MetadataInstruction, state::MetadataData,
    },
    num_traits::FromPrimitive,
    solana_program::{
        instruction::{AccountMeta, Instruction},
        program_error::ProgramError,
        program_pack::Pack,
        pubkey::Pubkey,
        rent::Rent,
        system_instruction, system_program,
    },
    std::collections::HashSet,
};

/// Thin client for building PDAs and instructions for the Creator Metadata program.
///
/// The `program_id` must be the deployed Creator Metadata program id.
pub struct MetadataClient {
    pub program_id: Pubkey,
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new(program::id())
    }
}

impl MetadataClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Derive the metadata PDA for a given mint.
    pub fn metadata_pda(&self, mint: &Pubkey) -> Pubkey {
        let (pda, _bump) = program::find_metadata_pda_with_program(&self.program_id, mint);
        pda
    }

    /// Derive the metadata PDA for a given mint, with the bump.
    pub fn metadata_pda_and_bump(&self, mint: &Pubkey) -> (Pubkey, u8) {
        program::find_metadata_pda_with_program(&self.program_id, mint)
    }

    /// Build a CreateMetadataAccount instruction.
    ///
    /// Accounts (strict order):
    /// - payer (writable, signer)
    /// - system_program (readonly)
    /// - mint (readonly)
    /// - metadata_pda (writable)
    /// - mint_or_freeze_authority (readonly, signer)
    /// - update_authority (readonly, signer if `update_authority_is_signer`)
    /// - extra_signers (readonly, signer)
    pub fn create_metadata_account_ix(
        &self,
        params: CreateMetadataAccountParams,
    ) -> anyhow::Result<Instruction> {
        let metadata_pda = self.metadata_pda(&params.mint);

        let mut signers: HashSet<Pubkey> = params.extra_signers.iter().copied().collect();
        signers.insert(params.payer);
        signers.insert(params.mint_or_freeze_authority);
        if params.update_authority_is_signer {
            signers.insert(params.update_authority);
        }
        validate_data(&params.data, &signers)?;

        let data = MetadataInstruction::CreateMetadataAccount {
            data: params.data,
            is_mutable: params.is_mutable,
        }
        .pack();

        let mut accounts = vec![
            AccountMeta::new(params.payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(params.mint, false),
            AccountMeta::new(metadata_pda, false),
            AccountMeta::new_readonly(params.mint_or_freeze_authority, true),
            AccountMeta::new_readonly(params.update_authority, params.update_authority_is_signer),
        ];
        accounts.extend(
            params
                .extra_signers
                .iter()
                .map(|signer| AccountMeta::new_readonly(*signer, true)),
        );

        tracing::debug!(
            mint = %params.mint,
            metadata = %metadata_pda,
            accounts = accounts.len(),
            "built create_metadata_account instruction"
        );

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }

    // Upstream SPL Token program helpers
    /// Build a SystemProgram create_account to allocate a rent-exempt SPL Token mint account.
    pub fn create_mint_account_ix(&self, payer: Pubkey, mint: Pubkey) -> Instruction {
        let lamports = Rent::default().minimum_balance(spl_token::state::Mint::LEN);
        system_instruction::create_account(
            &payer,
            &mint,
            lamports,
            spl_token::state::Mint::LEN as u64,
            &spl_token::id(),
        )
    }

    /// Build an SPL Token initialize_mint2 instruction.
    pub fn initialize_mint2_ix(
        &self,
        mint: Pubkey,
        mint_authority: Pubkey,
        freeze_authority: Option<Pubkey>,
        decimals: u8,
    ) -> anyhow::Result<Instruction> {
        let ix = spl_token::instruction::initialize_mint2(
            &spl_token::id(),
            &mint,
            &mint_authority,
            freeze_authority.as_ref(),
            decimals,
        )?;
        Ok(ix)
    }

    /// Build an SPL Token set_authority(MintTokens) instruction.
    pub fn set_mint_authority_ix(
        &self,
        mint: Pubkey,
        new_authority: Option<Pubkey>,
        current_authority: Pubkey,
    ) -> anyhow::Result<Instruction> {
        let ix = spl_token::instruction::set_authority(
            &spl_token::id(),
            &mint,
            new_authority.as_ref(),
            spl_token::instruction::AuthorityType::MintTokens,
            &current_authority,
            &[],
        )?;
        Ok(ix)
    }

    // Transaction patterns (compose instructions; signing and submission left to caller)
    /// Create an SPL Token mint and its metadata account in one sequence.
    ///
    /// Returns a Vec<Instruction> with: [create_mint, initialize_mint2, create_metadata_account].
    pub fn create_token_with_metadata_tx(
        &self,
        params: TxCreateTokenWithMetadataParams,
    ) -> anyhow::Result<Vec<Instruction>> {
        let create_mint_ix = self.create_mint_account_ix(params.payer, params.mint);

        let init_mint_ix = self.initialize_mint2_ix(
            params.mint,
            params.mint_authority,
            params.freeze_authority,
            params.decimals,
        )?;

        let create_md_ix = self.create_metadata_account_ix(CreateMetadataAccountParams {
            payer: params.payer,
            mint: params.mint,
            mint_or_freeze_authority: params.mint_authority,
            update_authority: params.update_authority,
            update_authority_is_signer: params.update_authority_is_signer,
            extra_signers: params.extra_signers,
            data: params.data,
            is_mutable: params.is_mutable,
        })?;

        Ok(vec![create_mint_ix, init_mint_ix, create_md_ix])
    }

    /// Create metadata using the freeze authority by clearing the mint authority beforehand.
    ///
    /// Returns: [create_mint, initialize_mint2(with freeze), set_authority(MintTokens -> None), create_metadata_account]
    pub fn create_token_with_freeze_auth_metadata_tx(
        &self,
        params: TxCreateTokenWithFreezeAuthMetadataParams,
    ) -> anyhow::Result<Vec<Instruction>> {
        let create_mint_ix = self.create_mint_account_ix(params.payer, params.mint);
        let init_mint_ix = self.initialize_mint2_ix(
            params.mint,
            params.initial_mint_authority,
            Some(params.freeze_authority),
            params.decimals,
        )?;

        let clear_mint_auth_ix =
            self.set_mint_authority_ix(params.mint, None, params.initial_mint_authority)?;

        // create metadata signed by freeze authority
        let create_md_ix = self.create_metadata_account_ix(CreateMetadataAccountParams {
            payer: params.payer,
            mint: params.mint,
            mint_or_freeze_authority: params.freeze_authority,
            update_authority: params.update_authority,
            update_authority_is_signer: false,
            extra_signers: Vec::new(),
            data: params.data,
            is_mutable: params.is_mutable,
        })?;

        Ok(vec![
            create_mint_ix,
            init_mint_ix,
            clear_mint_auth_ix,
            create_md_ix,
        ])
    }
}

// === Params ===
/// Parameters for CreateMetadataAccount instruction.
pub struct CreateMetadataAccountParams {
    /// Account that pays for the metadata PDA creation
    pub payer: Pubkey,
    /// Token mint the metadata is associated with
    pub mint: Pubkey,
    /// Signer that must match the mint authority, or the freeze authority if mint authority is None
    pub mint_or_freeze_authority: Pubkey,
    /// Authority recorded on the metadata account
    pub update_authority: Pubkey,
    /// Whether the update authority signs the transaction
    pub update_authority_is_signer: bool,
    /// Additional signers, typically creators marking themselves verified
    pub extra_signers: Vec<Pubkey>,
    /// Payload to store
    pub data: MetadataData,
    /// Whether the metadata may be changed later
    pub is_mutable: bool,
}

/// Parameters for create_token_with_metadata_tx transaction pattern.
pub struct TxCreateTokenWithMetadataParams {
    /// Payer that funds the mint account and metadata PDA
    pub payer: Pubkey,
    /// Mint account public key
    pub mint: Pubkey,
    /// Initial mint authority
    pub mint_authority: Pubkey,
    /// Optional freeze authority for the mint
    pub freeze_authority: Option<Pubkey>,
    /// Number of decimals for the mint
    pub decimals: u8,
    /// Authority recorded on the metadata account
    pub update_authority: Pubkey,
    /// Whether the update authority signs the transaction
    pub update_authority_is_signer: bool,
    /// Additional signers, typically creators marking themselves verified
    pub extra_signers: Vec<Pubkey>,
    /// Metadata payload
    pub data: MetadataData,
    /// Whether the metadata may be changed later
    pub is_mutable: bool,
}

/// Parameters for freeze-authority metadata creation flow.
pub struct TxCreateTokenWithFreezeAuthMetadataParams {
    /// Payer that funds the mint account and metadata PDA
    pub payer: Pubkey,
    /// Mint account public key
    pub mint: Pubkey,
    /// Initial mint authority that will be cleared to None before create_metadata_account
    pub initial_mint_authority: Pubkey,
    /// Freeze authority who will sign create_metadata_account
    pub freeze_authority: Pubkey,
    /// Number of decimals for the mint
    pub decimals: u8,
    /// Authority recorded on the metadata account
    pub update_authority: Pubkey,
    /// Metadata payload
    pub data: MetadataData,
    /// Whether the metadata may be changed later
    pub is_mutable: bool,
}

// === Validation helpers ===
/// Run the program's payload validation for the given signer set.
pub fn validate_data(data: &MetadataData, signers: &HashSet<Pubkey>) -> anyhow::Result<()> {
    assert_data_valid(data, signers).map_err(|err| anyhow::Error::msg(describe_error(&err)))
}

/// Render a program error, naming the `MetadataError` variant for custom codes.
pub fn describe_error(err: &ProgramError) -> String {
    match err {
        ProgramError::Custom(code) => match MetadataError::from_u32(*code) {
            Some(e) => format!("{e:?}: {e}"),
            None => format!("custom program error {code:#x}"),
        },
        other => other.to_string(),
    }
}
