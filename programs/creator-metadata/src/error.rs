//! Error types

use {
    num_derive::FromPrimitive,
    solana_program::{
        decode_error::DecodeError,
        msg,
        program_error::{PrintProgramError, ProgramError},
    },
    thiserror::Error,
};

/// Errors that may be returned by the Creator Metadata program.
#[derive(Clone, Copy, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum MetadataError {
    // 0
    /// Invalid mint
    #[error("Invalid mint")]
    InvalidMint,
    /// Signer is neither the mint authority nor, absent one, the freeze authority
    #[error("Invalid mint authority")]
    InvalidMintAuthority,
    /// Metadata already exists
    #[error("Metadata already exists")]
    MetadataAlreadyExists,
    /// Metadata account is not the PDA for the mint
    #[error("Invalid metadata key")]
    InvalidMetadataKey,
    /// Name, symbol or uri exceeds its maximum length
    #[error("Field too long")]
    FieldTooLong,

    // 5
    /// Seller fee basis points above 10000
    #[error("Basis points cannot be more than 10000")]
    InvalidBasisPoints,
    /// Creators list present but empty
    #[error("Creators must be at least one if set")]
    CreatorsMustBeAtleastOne,
    /// More than `MAX_CREATOR_LIMIT` creators
    #[error("Creators list too long")]
    CreatorsTooLong,
    /// The same address appears twice in the creators list
    #[error("No duplicate creator addresses")]
    DuplicateCreatorAddress,
    /// A creator that did not sign is marked verified
    #[error("You cannot unilaterally verify another creator, they must sign")]
    CannotVerifyAnotherCreator,

    // 10
    /// Share accumulation overflowed
    #[error("Numerical overflow error")]
    NumericalOverflowError,
    /// Shares do not add up to 100
    #[error("Share total must equal 100 for creator array")]
    ShareTotalMustBe100,
}

impl From<MetadataError> for ProgramError {
    fn from(e: MetadataError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for MetadataError {
    fn type_of() -> &'static str {
        "MetadataError"
    }
}

impl PrintProgramError for MetadataError {
    fn print<E>(&self)
    where
        E: 'static
            + std::error::Error
            + DecodeError<E>
            + PrintProgramError
            + num_traits::FromPrimitive,
    {
        msg!("Error: {}", self);
    }
}

#[cfg(test)]
mod tests {
    use {super::*, num_traits::FromPrimitive};

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            ProgramError::from(MetadataError::InvalidMint),
            ProgramError::Custom(0)
        );
        assert_eq!(
            ProgramError::from(MetadataError::CreatorsTooLong),
            ProgramError::Custom(7)
        );
        assert_eq!(
            ProgramError::from(MetadataError::ShareTotalMustBe100),
            ProgramError::Custom(11)
        );
    }

    #[test]
    fn decodes_from_custom_code() {
        for code in 0..12u32 {
            let err = MetadataError::from_u32(code).expect("known code");
            assert_eq!(ProgramError::from(err), ProgramError::Custom(code));
        }
        assert!(MetadataError::from_u32(12).is_none());
    }
}
