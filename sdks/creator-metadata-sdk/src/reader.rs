use {
    crate::MetadataClient,
    anyhow::Context as _,
    async_trait::async_trait,
    creator_metadata::state::TokenMetadata,
    solana_program::pubkey::Pubkey,
};

/// Source of raw account data (RPC client, banks client, in-memory map).
#[async_trait(?Send)]
pub trait AccountFetcher {
    /// Return the account's data, or `None` if the account does not exist.
    async fn fetch_account_data(&self, address: &Pubkey) -> anyhow::Result<Option<Vec<u8>>>;
}

/// Reads metadata accounts by mint.
pub struct MetadataReader<F> {
    client: MetadataClient,
    fetcher: F,
}

impl<F: AccountFetcher> MetadataReader<F> {
    pub fn new(program_id: Pubkey, fetcher: F) -> Self {
        Self {
            client: MetadataClient::new(program_id),
            fetcher,
        }
    }

    /// Fetch the metadata account of `mint`, if one was created.
    pub async fn fetch(&self, mint: &Pubkey) -> anyhow::Result<Option<TokenMetadata>> {
        let address = self.client.metadata_pda(mint);
        let Some(data) = self.fetcher.fetch_account_data(&address).await? else {
            tracing::debug!(%mint, %address, "no metadata account");
            return Ok(None);
        };
        if data.is_empty() {
            return Ok(None);
        }
        let metadata = TokenMetadata::unpack(&data)
            .with_context(|| format!("decode metadata account {address}"))?;
        Ok(Some(metadata))
    }

    /// Fetch the metadata account of `mint`, failing if it does not exist.
    pub async fn fetch_metadata(&self, mint: &Pubkey) -> anyhow::Result<TokenMetadata> {
        self.fetch(mint)
            .await?
            .with_context(|| format!("metadata for mint {mint} not found"))
    }
}
