//! Validation of account inputs and metadata payloads

use {
    crate::{
        error::MetadataError,
        find_metadata_pda_with_program,
        state::{
            Creator, MetadataData, MAX_CREATOR_LIMIT, MAX_NAME_LENGTH,
            MAX_SELLER_FEE_BASIS_POINTS, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH,
        },
    },
    solana_program::{
        account_info::AccountInfo, entrypoint::ProgramResult, msg, program_option::COption,
        program_pack::Pack, pubkey::Pubkey,
    },
    spl_token::state::Mint,
    std::collections::HashSet,
};

/// Validate a creation payload against the signers of the current transaction.
///
/// Checks run in a fixed order and the first failure is returned:
/// creators (count, duplicates, verification, share sum), then field
/// lengths, then the royalty rate.
pub fn assert_data_valid(data: &MetadataData, signers: &HashSet<Pubkey>) -> ProgramResult {
    if let Some(creators) = &data.creators {
        assert_creators_valid(creators, signers)?;
    }

    assert_field_len("name", &data.name, MAX_NAME_LENGTH)?;
    assert_field_len("symbol", &data.symbol, MAX_SYMBOL_LENGTH)?;
    assert_field_len("uri", &data.uri, MAX_URI_LENGTH)?;

    if data.seller_fee_basis_points > MAX_SELLER_FEE_BASIS_POINTS {
        return Err(MetadataError::InvalidBasisPoints.into());
    }

    Ok(())
}

/// Validate a present creators list.
pub fn assert_creators_valid(creators: &[Creator], signers: &HashSet<Pubkey>) -> ProgramResult {
    if creators.is_empty() {
        return Err(MetadataError::CreatorsMustBeAtleastOne.into());
    }

    if creators.len() > MAX_CREATOR_LIMIT {
        return Err(MetadataError::CreatorsTooLong.into());
    }

    let mut seen = HashSet::with_capacity(creators.len());
    for creator in creators {
        if !seen.insert(creator.address) {
            msg!("Duplicate creator {}", creator.address);
            return Err(MetadataError::DuplicateCreatorAddress.into());
        }
    }

    // A creator can only verify itself by signing.
    if let Some(creator) = creators
        .iter()
        .find(|c| c.verified && !signers.contains(&c.address))
    {
        msg!("Creator {} is verified but did not sign", creator.address);
        return Err(MetadataError::CannotVerifyAnotherCreator.into());
    }

    let share_total = creators.iter().try_fold(0u8, |total, creator| {
        total
            .checked_add(creator.share)
            .ok_or(MetadataError::NumericalOverflowError)
    })?;

    if share_total != 100 {
        return Err(MetadataError::ShareTotalMustBe100.into());
    }

    Ok(())
}

fn assert_field_len(field: &str, value: &str, max: usize) -> ProgramResult {
    if value.len() > max {
        msg!("{} is {} bytes, max {}", field, value.len(), max);
        return Err(MetadataError::FieldTooLong.into());
    }
    Ok(())
}

/// Unpack an initialized SPL Token mint owned by the token program.
pub fn assert_mint_valid(mint_info: &AccountInfo) -> Result<Mint, MetadataError> {
    if mint_info.owner != &spl_token::id() {
        return Err(MetadataError::InvalidMint);
    }
    let data = mint_info
        .try_borrow_data()
        .map_err(|_| MetadataError::InvalidMint)?;
    Mint::unpack(&data).map_err(|_| MetadataError::InvalidMint)
}

/// The signer must be the mint authority or, when the mint has none, the
/// freeze authority.
pub fn assert_mint_authority(mint: &Mint, authority_info: &AccountInfo) -> ProgramResult {
    if !authority_info.is_signer {
        return Err(MetadataError::InvalidMintAuthority.into());
    }
    let expected = match (mint.mint_authority, mint.freeze_authority) {
        (COption::Some(authority), _) => authority,
        (COption::None, COption::Some(authority)) => authority,
        (COption::None, COption::None) => return Err(MetadataError::InvalidMintAuthority.into()),
    };
    if expected != *authority_info.key {
        return Err(MetadataError::InvalidMintAuthority.into());
    }
    Ok(())
}

/// Check the metadata account is the PDA for the mint and return its bump.
pub fn assert_metadata_derivation(
    program_id: &Pubkey,
    metadata_info: &AccountInfo,
    mint_info: &AccountInfo,
) -> Result<u8, MetadataError> {
    let (pda, bump) = find_metadata_pda_with_program(program_id, mint_info.key);
    if pda != *metadata_info.key {
        return Err(MetadataError::InvalidMetadataKey);
    }
    Ok(bump)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::state::{Collection, UseMethod, Uses},
        solana_program::program_error::ProgramError,
    };

    fn creator(address: Pubkey, share: u8, verified: bool) -> Creator {
        Creator {
            address,
            verified,
            share,
        }
    }

    fn data_with(creators: Option<Vec<Creator>>) -> MetadataData {
        MetadataData {
            name: "test".to_string(),
            symbol: "sym".to_string(),
            uri: "uri".to_string(),
            seller_fee_basis_points: 10,
            creators,
            collection: None,
            uses: None,
        }
    }

    fn err(e: MetadataError) -> ProgramResult {
        Err(e.into())
    }

    #[test]
    fn no_creators_is_valid() {
        assert_eq!(assert_data_valid(&data_with(None), &HashSet::new()), Ok(()));
    }

    #[test]
    fn empty_creators_rejected() {
        assert_eq!(
            assert_data_valid(&data_with(Some(vec![])), &HashSet::new()),
            err(MetadataError::CreatorsMustBeAtleastOne)
        );
    }

    #[test]
    fn six_creators_rejected() {
        let creators = [1, 1, 1, 1, 1, 95]
            .into_iter()
            .map(|share| creator(Pubkey::new_unique(), share, false))
            .collect();
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::CreatorsTooLong)
        );
    }

    #[test]
    fn five_creators_accepted() {
        let creators = [20, 20, 20, 20, 20]
            .into_iter()
            .map(|share| creator(Pubkey::new_unique(), share, false))
            .collect();
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            Ok(())
        );
    }

    #[test]
    fn duplicate_address_rejected() {
        let payer = Pubkey::new_unique();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let creators = vec![
            creator(payer, 25, false),
            creator(a, 25, false),
            creator(b, 25, false),
            creator(a, 25, false),
        ];
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::DuplicateCreatorAddress)
        );
    }

    #[test]
    fn duplicate_wins_over_bad_shares() {
        let a = Pubkey::new_unique();
        let creators = vec![creator(a, 200, false), creator(a, 200, false)];
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::DuplicateCreatorAddress)
        );
    }

    #[test]
    fn low_share_total_rejected() {
        let creators = vec![
            creator(Pubkey::new_unique(), 1, false),
            creator(Pubkey::new_unique(), 1, false),
            creator(Pubkey::new_unique(), 1, false),
        ];
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::ShareTotalMustBe100)
        );
    }

    #[test]
    fn share_total_of_101_rejected() {
        let creators = vec![
            creator(Pubkey::new_unique(), 90, false),
            creator(Pubkey::new_unique(), 1, false),
            creator(Pubkey::new_unique(), 10, false),
        ];
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::ShareTotalMustBe100)
        );
    }

    #[test]
    fn share_overflow_is_distinct_from_bad_total() {
        let creators = vec![
            creator(Pubkey::new_unique(), 100, false),
            creator(Pubkey::new_unique(), 100, false),
            creator(Pubkey::new_unique(), 100, false),
        ];
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::NumericalOverflowError)
        );
    }

    #[test]
    fn share_sum_of_255_is_not_overflow() {
        let creators = vec![
            creator(Pubkey::new_unique(), 200, false),
            creator(Pubkey::new_unique(), 55, false),
        ];
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::ShareTotalMustBe100)
        );
    }

    #[test]
    fn verifying_a_non_signer_rejected() {
        let payer = Pubkey::new_unique();
        let creators = vec![
            creator(Pubkey::new_unique(), 90, true),
            creator(payer, 1, false),
            creator(Pubkey::new_unique(), 9, false),
        ];
        let signers = HashSet::from([payer]);
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &signers),
            err(MetadataError::CannotVerifyAnotherCreator)
        );
    }

    #[test]
    fn signer_may_verify_itself() {
        let payer = Pubkey::new_unique();
        let creators = vec![
            creator(Pubkey::new_unique(), 90, false),
            creator(payer, 1, true),
            creator(Pubkey::new_unique(), 9, false),
        ];
        let signers = HashSet::from([payer]);
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &signers),
            Ok(())
        );
    }

    #[test]
    fn verification_checked_before_shares() {
        let creators = vec![
            creator(Pubkey::new_unique(), 100, true),
            creator(Pubkey::new_unique(), 100, false),
            creator(Pubkey::new_unique(), 100, false),
        ];
        assert_eq!(
            assert_data_valid(&data_with(Some(creators)), &HashSet::new()),
            err(MetadataError::CannotVerifyAnotherCreator)
        );
    }

    #[test]
    fn long_fields_rejected() {
        let mut data = data_with(None);
        data.name = "n".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            assert_data_valid(&data, &HashSet::new()),
            err(MetadataError::FieldTooLong)
        );

        let mut data = data_with(None);
        data.symbol = "s".repeat(MAX_SYMBOL_LENGTH + 1);
        assert_eq!(
            assert_data_valid(&data, &HashSet::new()),
            err(MetadataError::FieldTooLong)
        );

        let mut data = data_with(None);
        data.uri = "u".repeat(MAX_URI_LENGTH + 1);
        assert_eq!(
            assert_data_valid(&data, &HashSet::new()),
            err(MetadataError::FieldTooLong)
        );
    }

    #[test]
    fn creator_errors_come_before_field_errors() {
        let mut data = data_with(Some(vec![]));
        data.name = "n".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            assert_data_valid(&data, &HashSet::new()),
            err(MetadataError::CreatorsMustBeAtleastOne)
        );
    }

    #[test]
    fn basis_points_bounded() {
        let mut data = data_with(None);
        data.seller_fee_basis_points = MAX_SELLER_FEE_BASIS_POINTS + 1;
        assert_eq!(
            assert_data_valid(&data, &HashSet::new()),
            err(MetadataError::InvalidBasisPoints)
        );
    }

    #[test]
    fn collection_and_uses_are_not_validated() {
        let mut data = data_with(None);
        data.collection = Some(Collection {
            verified: true,
            key: Pubkey::new_unique(),
        });
        data.uses = Some(Uses {
            use_method: UseMethod::Single,
            remaining: 7,
            total: 1,
        });
        assert_eq!(assert_data_valid(&data, &HashSet::new()), Ok(()));
    }

    #[test]
    fn mint_authority_falls_back_to_freeze_authority() {
        let freeze = Pubkey::new_unique();
        let mint = Mint {
            mint_authority: COption::None,
            supply: 0,
            decimals: 0,
            is_initialized: true,
            freeze_authority: COption::Some(freeze),
        };
        let mut lamports = 0;
        let mut data = vec![];
        let owner = Pubkey::default();
        let info = AccountInfo::new(
            &freeze,
            true,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );
        assert_eq!(assert_mint_authority(&mint, &info), Ok(()));
    }

    #[test]
    fn mint_authority_must_sign_and_match() {
        let authority = Pubkey::new_unique();
        let mint = Mint {
            mint_authority: COption::Some(authority),
            supply: 0,
            decimals: 0,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        let owner = Pubkey::default();

        let mut lamports = 0;
        let mut data = vec![];
        let unsigned = AccountInfo::new(
            &authority,
            false,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );
        assert_eq!(
            assert_mint_authority(&mint, &unsigned),
            err(MetadataError::InvalidMintAuthority)
        );

        let other = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![];
        let impostor = AccountInfo::new(
            &other,
            true,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );
        assert_eq!(
            assert_mint_authority(&mint, &impostor),
            err(MetadataError::InvalidMintAuthority)
        );
    }

    #[test]
    fn mint_must_be_owned_by_token_program() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![0u8; Mint::LEN];
        let owner = Pubkey::new_unique();
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );
        assert_eq!(assert_mint_valid(&info), Err(MetadataError::InvalidMint));
    }

    #[test]
    fn uninitialized_mint_rejected() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = vec![0u8; Mint::LEN];
        let owner = spl_token::id();
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );
        assert_eq!(assert_mint_valid(&info), Err(MetadataError::InvalidMint));
    }
}
