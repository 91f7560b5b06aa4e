//! State transition types

use {
    borsh::{BorshDeserialize, BorshSerialize},
    solana_program::{program_error::ProgramError, pubkey::Pubkey},
};

/// Maximum name length in bytes
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum symbol length in bytes
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Maximum uri length in bytes
pub const MAX_URI_LENGTH: usize = 200;

/// Maximum number of creators on a metadata account
pub const MAX_CREATOR_LIMIT: usize = 5;

/// Upper bound for `seller_fee_basis_points` (100%)
pub const MAX_SELLER_FEE_BASIS_POINTS: u16 = 10_000;

/// Serialized size of a `Creator`
pub const MAX_CREATOR_LEN: usize = 32 + 1 + 1;

/// Serialized upper bound of `MetadataData`
pub const MAX_DATA_SIZE: usize = 4
    + MAX_NAME_LENGTH
    + 4
    + MAX_SYMBOL_LENGTH
    + 4
    + MAX_URI_LENGTH
    + 2 // seller fee basis points
    + 1 // creators option
    + 4
    + MAX_CREATOR_LIMIT * MAX_CREATOR_LEN
    + 1 + 33 // collection
    + 1 + 17; // uses

/// Account discriminator
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Zeroed account data
    Uninitialized,
    /// `TokenMetadata` account
    MetadataV1,
}

/// An identity entitled to a share of resale royalties
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Creator {
    /// The creator's address
    pub address: Pubkey,
    /// Whether the creator signed to attest to this listing
    pub verified: bool,
    /// Percentage of royalties (0-100), not basis points
    pub share: u8,
}

/// Collection the token claims to belong to; stored as given
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Whether membership was verified by the collection authority
    pub verified: bool,
    /// Collection mint
    pub key: Pubkey,
}

/// How uses of the token are consumed
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseMethod {
    /// Token is burned when used up
    Burn,
    /// Token can be used several times
    Multiple,
    /// Token can be used once
    Single,
}

/// Usage counter attached to a token; stored as given
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Uses {
    /// How uses are consumed
    pub use_method: UseMethod,
    /// Uses left
    pub remaining: u64,
    /// Uses at creation
    pub total: u64,
}

/// Candidate payload supplied when creating a metadata account
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct MetadataData {
    /// The name of the token
    pub name: String,
    /// The symbol of the token
    pub symbol: String,
    /// URI pointing to the off-chain JSON
    pub uri: String,
    /// Royalty rate on secondary sales, in basis points
    pub seller_fee_basis_points: u16,
    /// Royalty recipients; `None` records no creators
    pub creators: Option<Vec<Creator>>,
    /// Claimed collection
    pub collection: Option<Collection>,
    /// Usage counter
    pub uses: Option<Uses>,
}

/// Metadata account, one per mint at the PDA `["metadata", mint]`
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Account discriminator
    pub key: Key,
    /// Identity allowed to modify this account later
    pub update_authority: Pubkey,
    /// The mint address this metadata belongs to
    pub mint: Pubkey,
    /// Validated payload
    pub data: MetadataData,
    /// Once flipped, all sales of this token are secondary
    pub primary_sale_happened: bool,
    /// Whether `data` may be changed later
    pub is_mutable: bool,
}

impl TokenMetadata {
    /// Allocated account size
    pub const LEN: usize = 1 // key
        + 32 // update authority
        + 32 // mint
        + MAX_DATA_SIZE
        + 1 // primary sale
        + 1 // mutable
        + 64; // padding

    /// Build a freshly created record; the primary sale has not happened yet.
    pub fn new(mint: Pubkey, update_authority: Pubkey, data: MetadataData, is_mutable: bool) -> Self {
        Self {
            key: Key::MetadataV1,
            update_authority,
            mint,
            data,
            primary_sale_happened: false,
            is_mutable,
        }
    }

    /// Deserialize from account data, ignoring the zero padding after the record.
    pub fn unpack(src: &[u8]) -> Result<Self, ProgramError> {
        let metadata = Self::deserialize(&mut &src[..])
            .map_err(|_| ProgramError::InvalidAccountData)?;
        if metadata.key != Key::MetadataV1 {
            return Err(ProgramError::UninitializedAccount);
        }
        Ok(metadata)
    }

    /// Serialize into account data.
    pub fn save(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        let bytes = borsh::to_vec(self).map_err(|_| ProgramError::InvalidAccountData)?;
        if bytes.len() > dst.len() {
            return Err(ProgramError::AccountDataTooSmall);
        }
        dst[..bytes.len()].copy_from_slice(&bytes);
        Ok(())
    }
}
