//! Program state processor

use {
    crate::{
        assertions::{
            assert_data_valid, assert_metadata_derivation, assert_mint_authority,
            assert_mint_valid,
        },
        error::MetadataError,
        instruction::MetadataInstruction,
        state::{MetadataData, TokenMetadata},
        METADATA_SEED,
    },
    solana_program::{
        account_info::{next_account_info, AccountInfo},
        entrypoint::ProgramResult,
        msg,
        program::{invoke, invoke_signed},
        program_error::ProgramError,
        pubkey::Pubkey,
        rent::Rent,
        system_instruction, system_program,
        sysvar::Sysvar,
    },
    std::collections::HashSet,
};

/// Program state handler.
pub struct Processor {}

impl Processor {
    /// Process a single instruction
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = MetadataInstruction::unpack(instruction_data)?;

        match instruction {
            MetadataInstruction::CreateMetadataAccount { data, is_mutable } => {
                msg!("Instruction: CreateMetadataAccount");
                Self::process_create_metadata_account(program_id, accounts, data, is_mutable)
            }
        }
    }

    fn process_create_metadata_account(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        data: MetadataData,
        is_mutable: bool,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let payer_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;
        let mint_info = next_account_info(account_info_iter)?;
        let metadata_info = next_account_info(account_info_iter)?;
        let mint_authority_info = next_account_info(account_info_iter)?;
        let update_authority_info = next_account_info(account_info_iter)?;

        if !payer_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }
        if !system_program::check_id(system_program_info.key) {
            return Err(ProgramError::IncorrectProgramId);
        }

        let mint = assert_mint_valid(mint_info)?;
        assert_mint_authority(&mint, mint_authority_info)?;

        let bump = assert_metadata_derivation(program_id, metadata_info, mint_info)?;
        if !metadata_info.data_is_empty() {
            return Err(MetadataError::MetadataAlreadyExists.into());
        }

        // Every account flagged as signer, including trailing extra signers.
        let signers: HashSet<Pubkey> = accounts
            .iter()
            .filter(|info| info.is_signer)
            .map(|info| *info.key)
            .collect();
        assert_data_valid(&data, &signers)?;

        let metadata = TokenMetadata::new(
            *mint_info.key,
            *update_authority_info.key,
            data,
            is_mutable,
        );

        let bump_seed = [bump];
        let signer_seeds: &[&[u8]] = &[METADATA_SEED, mint_info.key.as_ref(), &bump_seed];
        create_pda_account(
            program_id,
            metadata_info,
            system_program_info,
            payer_info,
            TokenMetadata::LEN,
            signer_seeds,
        )?;

        metadata.save(&mut metadata_info.try_borrow_mut_data()?)?;
        Ok(())
    }
}

/// Create a program-owned PDA, tolerating lamports sent to the address beforehand.
fn create_pda_account<'a>(
    program_id: &Pubkey,
    new_account_info: &AccountInfo<'a>,
    system_program_info: &AccountInfo<'a>,
    payer_info: &AccountInfo<'a>,
    size: usize,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    let rent = Rent::get()?;
    let required_lamports = rent
        .minimum_balance(size)
        .max(1)
        .saturating_sub(new_account_info.lamports());

    if required_lamports > 0 {
        msg!("Transfer {} lamports to the new account", required_lamports);
        invoke(
            &system_instruction::transfer(payer_info.key, new_account_info.key, required_lamports),
            &[
                payer_info.clone(),
                new_account_info.clone(),
                system_program_info.clone(),
            ],
        )?;
    }

    let accounts = &[new_account_info.clone(), system_program_info.clone()];

    msg!("Allocate space for the account");
    invoke_signed(
        &system_instruction::allocate(new_account_info.key, size as u64),
        accounts,
        &[signer_seeds],
    )?;

    msg!("Assign the account to the owning program");
    invoke_signed(
        &system_instruction::assign(new_account_info.key, program_id),
        accounts,
        &[signer_seeds],
    )?;

    Ok(())
}
